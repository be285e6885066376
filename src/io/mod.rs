mod http;
mod local;

pub use http::{DEFAULT_MAX_RETRY, HttpSource};
pub use local::{LocalFileSource, write_output};

use anyhow::Result;
use async_trait::async_trait;

/// Trait for fetching the full content of a media file
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Fetch everything stored at `location`
    async fn fetch(&self, location: &str) -> Result<Vec<u8>>;
}

/// Returns true for locations served over HTTP(S)
pub fn is_http_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Source that sends HTTP(S) URLs to [`HttpSource`] and everything else to
/// [`LocalFileSource`].
pub struct AutoSource {
    http: HttpSource,
    local: LocalFileSource,
}

impl AutoSource {
    pub fn new(http: HttpSource) -> Self {
        Self {
            http,
            local: LocalFileSource,
        }
    }

    pub fn http(&self) -> &HttpSource {
        &self.http
    }
}

#[async_trait]
impl MediaSource for AutoSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        if is_http_url(location) {
            self.http.fetch(location).await
        } else {
            self.local.fetch(location).await
        }
    }
}
