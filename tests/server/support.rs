
use user_dashboard::server::{self, Inbox};
use user_dashboard::ServerConfig;

/// A throwaway `dist/` with an index page, one asset and a robots file.
pub fn site(name: &str) -> ServerConfig {
    let root = std::env::temp_dir().join(format!("user_dashboard_{name}_{}", std::process::id()));
    let dist = root.join("dist");
    std::fs::create_dir_all(dist.join("assets")).unwrap();
    std::fs::write(dist.join("index.html"), "<html>dashboard</html>").unwrap();
    std::fs::write(dist.join("assets/app.js"), "console.log('hi')").unwrap();
    std::fs::write(root.join("robots.txt"), "User-agent: *\nAllow: /\n").unwrap();

    ServerConfig {
        port: 0,
        static_dir: dist,
        robots_path: root.join("robots.txt"),
    }
}

/// Bind to port 0 and return the base URL.
pub async fn start_server(config: &ServerConfig, inbox: Inbox) -> String {
    let app = server::router(config, inbox);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
