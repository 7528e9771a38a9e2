use async_trait::async_trait;
use std::time::Duration;

/// Raw HTTP reply as seen by the fetcher
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request cancelled/timeout: {0}")]
    Timeout(String),

    #[error("request failed: {0}")]
    Network(String),
}

/// HTTP GET capability used by the fetcher
#[async_trait]
pub trait SalesTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError>;
}

/// Transport backed by reqwest
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;
        Ok(Self { client })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else {
        TransportError::Network(e.to_string())
    }
}

#[async_trait]
impl SalesTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("").to_string();
        let body = response.text().await.map_err(map_reqwest_error)?;

        Ok(TransportResponse {
            status: status.as_u16(),
            reason,
            body,
        })
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("client error HTTP {status}, request was not retried")]
    ClientError { status: u16 },

    #[error("max retries reached after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one
    pub max_retries: u32,
    pub initial_delay: Duration,
}

/// How a single attempt ended
#[derive(Debug)]
enum AttemptOutcome {
    Succeeded(String),
    Retriable,
    Terminal(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusClass {
    Success,
    Retriable,
    Terminal,
}

/// 2xx succeeds, 4xx other than 429 is final, everything else is worth another try
fn classify_status(status: u16) -> StatusClass {
    match status {
        200..=299 => StatusClass::Success,
        429 => StatusClass::Retriable,
        400..=499 => StatusClass::Terminal,
        _ => StatusClass::Retriable,
    }
}

/// GET with bounded retries and exponential backoff
pub struct Fetcher<T: SalesTransport> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: SalesTransport> Fetcher<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt: u32 = 0;
        let mut delay = self.policy.initial_delay;

        loop {
            attempt += 1;
            tracing::info!("Fetching (attempt {})...", attempt);

            match self.attempt(url).await {
                AttemptOutcome::Succeeded(body) => return Ok(body),
                AttemptOutcome::Terminal(status) => {
                    tracing::warn!("Client error, will not retry.");
                    return Err(FetchError::ClientError { status });
                }
                AttemptOutcome::Retriable => {}
            }

            if attempt > self.policy.max_retries {
                break;
            }
            tracing::info!("Waiting {}ms before next attempt...", delay.as_millis());
            tokio::time::sleep(delay).await;
            delay *= 2;
        }

        tracing::error!("Max retries reached, giving up.");
        Err(FetchError::Exhausted { attempts: attempt })
    }

    async fn attempt(&self, url: &str) -> AttemptOutcome {
        let response = match self.transport.get(url).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("{}", e);
                return AttemptOutcome::Retriable;
            }
        };

        match classify_status(response.status) {
            StatusClass::Success => {
                tracing::info!("HTTP {} OK received.", response.status);
                log_body_preview(&response.body);
                AttemptOutcome::Succeeded(response.body)
            }
            StatusClass::Terminal => {
                tracing::warn!("HTTP {} - {}", response.status, response.reason);
                AttemptOutcome::Terminal(response.status)
            }
            StatusClass::Retriable => {
                tracing::warn!("HTTP {} - {}", response.status, response.reason);
                AttemptOutcome::Retriable
            }
        }
    }
}

fn log_body_preview(body: &str) {
    let preview: String = body.chars().take(500).collect();
    let preview = if preview.len() < body.len() {
        format!("{}...", preview)
    } else {
        preview
    };
    tracing::debug!("PetPooja API response preview: {}", preview);
    tracing::trace!("RAW JSON RESPONSE:\n{}", body);
}
