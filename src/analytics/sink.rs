use std::sync::{Arc, Mutex};

use tracing::info;

use super::{AnalyticsBatch, AnalyticsError};

/// Destination for analytics batches.
pub trait AnalyticsSink {
    fn send(&mut self, batch: &AnalyticsBatch) -> Result<(), AnalyticsError>;
}

/// Logs batches, or collects them into a shared buffer when given one.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    buffer: Option<Arc<Mutex<Vec<AnalyticsBatch>>>>,
}

impl BufferSink {
    pub fn new() -> Self {
        BufferSink { buffer: None }
    }

    pub fn with_buffer(buffer: Arc<Mutex<Vec<AnalyticsBatch>>>) -> Self {
        BufferSink {
            buffer: Some(buffer),
        }
    }
}

impl AnalyticsSink for BufferSink {
    fn send(&mut self, batch: &AnalyticsBatch) -> Result<(), AnalyticsError> {
        match &self.buffer {
            Some(buffer) => {
                let mut buffer = buffer.lock().map_err(|_| AnalyticsError::BufferPoisoned)?;
                buffer.push(batch.clone());
            }
            None => info!(
                events = batch.events.len(),
                session = %batch.session_id,
                "analytics batch"
            ),
        }
        Ok(())
    }
}

#[cfg(feature = "fetch")]
pub use self::http::HttpSink;

#[cfg(feature = "fetch")]
mod http {
    use std::time::Duration;

    use reqwest::blocking::Client;

    use super::{AnalyticsBatch, AnalyticsError, AnalyticsSink};

    const SEND_TIMEOUT: Duration = Duration::from_secs(5);

    /// Posts each batch as JSON to a tracking endpoint.
    #[derive(Debug, Clone)]
    pub struct HttpSink {
        client: Client,
        endpoint: String,
    }

    impl HttpSink {
        pub fn new(endpoint: impl Into<String>) -> Result<Self, AnalyticsError> {
            let client = Client::builder()
                .timeout(SEND_TIMEOUT)
                .build()
                .map_err(|e| AnalyticsError::Transport(e.to_string()))?;
            Ok(Self {
                client,
                endpoint: endpoint.into(),
            })
        }
    }

    impl AnalyticsSink for HttpSink {
        fn send(&mut self, batch: &AnalyticsBatch) -> Result<(), AnalyticsError> {
            let response = self
                .client
                .post(&self.endpoint)
                .json(batch)
                .send()
                .map_err(|e| AnalyticsError::Transport(e.to_string()))?;
            if !response.status().is_success() {
                return Err(AnalyticsError::Status(response.status().as_u16()));
            }
            Ok(())
        }
    }
}
