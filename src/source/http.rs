use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::{parse_payload, DataSource, DataSourceError};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches the batch over HTTP with a blocking client.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Result<Self, DataSourceError> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| DataSourceError::Transport(format!("client build failed: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl DataSource for HttpSource {
    fn fetch(&self) -> Result<Value, DataSourceError> {
        debug!(url = %self.url, "fetching record batch");
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| DataSourceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.url, status = status.as_u16(), "record fetch rejected");
            return Err(DataSourceError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .map_err(|e| DataSourceError::Transport(e.to_string()))?;
        parse_payload(&body)
    }
}
