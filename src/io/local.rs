use super::MediaSource;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Reads media from the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSource;

#[async_trait]
impl MediaSource for LocalFileSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        tokio::fs::read(location)
            .await
            .with_context(|| format!("Failed to read {location}"))
    }
}

/// Write `bytes` to `path`. Without `overwrite` the file must not exist yet;
/// the check and the create are one atomic open.
pub async fn write_output(path: &Path, bytes: &[u8], overwrite: bool) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let mut file = match options.open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            bail!("{} already exists (use -f to overwrite)", path.display())
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to create {}", path.display()));
        }
    };
    file.write_all(bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.flush().await?;
    Ok(())
}
