use user_dashboard::{logging, server, DashboardConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_tracing();

    let config = DashboardConfig::from_env()?;
    server::serve(&config.server).await?;
    Ok(())
}
