use async_trait::async_trait;
use reqwest::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

use super::MediaSource;
use anyhow::{Result, bail};

/// Default number of attempts per URL
pub const DEFAULT_MAX_RETRY: u32 = 3;

/// HTTP(S) media downloader
pub struct HttpSource {
    client: Client,
    transferred_bytes: AtomicU64,
    max_retry: u32,
    backoff: Duration,
}

impl HttpSource {
    /// Create a new HTTP source with a 30 second request timeout
    pub fn new() -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            transferred_bytes: AtomicU64::new(0),
            max_retry: DEFAULT_MAX_RETRY,
            backoff: Duration::from_millis(500),
        })
    }

    /// Attempts per URL before giving up (at least one)
    pub fn with_max_retry(mut self, max_retry: u32) -> Self {
        self.max_retry = max_retry.max(1);
        self
    }

    /// Base delay; retry `n` waits `backoff * 2^(n-1)`
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Get total bytes transferred from network
    pub fn transferred_bytes(&self) -> u64 {
        self.transferred_bytes.load(Ordering::Relaxed)
    }

    async fn retry_later(&self, retry_count: u32, url: &str, reason: &str) -> Result<()> {
        if retry_count >= self.max_retry {
            bail!("Max retries exceeded for {url}: {reason}");
        }
        warn!(
            "Fetch failed, retry {}/{} for {}: {}",
            retry_count, self.max_retry, url, reason
        );
        tokio::time::sleep(backoff_delay(self.backoff, retry_count)).await;
        Ok(())
    }
}

/// Exponential delay before retry number `retry_count` (1-based).
fn backoff_delay(base: Duration, retry_count: u32) -> Duration {
    let factor = 2u32.saturating_pow(retry_count.saturating_sub(1));
    base.saturating_mul(factor)
}

#[async_trait]
impl MediaSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let mut retry_count = 0;

        loop {
            match self.client.get(url).send().await {
                Ok(resp) if resp.status().is_success() => {
                    let bytes = resp.bytes().await?;
                    self.transferred_bytes
                        .fetch_add(bytes.len() as u64, Ordering::Relaxed);
                    debug!(url, len = bytes.len(), "fetched");
                    return Ok(bytes.to_vec());
                }
                Ok(resp) if resp.status().is_server_error() => {
                    retry_count += 1;
                    self.retry_later(retry_count, url, &resp.status().to_string())
                        .await?;
                }
                Ok(resp) => {
                    bail!("HTTP request for {} failed with status: {}", url, resp.status());
                }
                Err(e) if e.is_timeout() || e.is_connect() => {
                    retry_count += 1;
                    self.retry_later(retry_count, url, &e.to_string()).await?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_per_retry() {
        let base = Duration::from_millis(500);
        assert_eq!(backoff_delay(base, 1), Duration::from_millis(500));
        assert_eq!(backoff_delay(base, 2), Duration::from_secs(1));
        assert_eq!(backoff_delay(base, 3), Duration::from_secs(2));
        assert_eq!(backoff_delay(base, 0), base);
    }

    #[test]
    fn backoff_saturates() {
        let delay = backoff_delay(Duration::from_secs(1), 64);
        assert_eq!(delay, Duration::from_secs(1).saturating_mul(u32::MAX));
    }
}
