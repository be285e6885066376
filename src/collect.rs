//! Gathering media into an ordered [`FileMap`] ready for encoding.
//!
//! Items are fetched with bounded concurrency but kept in input order, so
//! the archive lists files in the order they were requested. A failed fetch
//! is recorded and skipped; only a policy breach on the item count aborts
//! the whole collection.

use anyhow::Result;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::io::MediaSource;
use crate::policy::{ArchivePolicy, UniqueNames, name_from_location, sanitize_filename};
use crate::zip::FileMap;

/// Default number of simultaneous fetches
pub const DEFAULT_CONCURRENCY: usize = 4;

/// One file to fetch, with an optional archive name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub location: String,
    pub name: Option<String>,
}

impl MediaItem {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Requested name, or one derived from the location
    fn desired_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| name_from_location(&self.location))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CollectOptions {
    pub concurrency: usize,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// An item that did not make it into the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub location: String,
    pub error: String,
}

/// Result of a collection run
#[derive(Debug, Default)]
pub struct Collection {
    pub files: FileMap,
    pub failures: Vec<Failure>,
}

impl Collection {
    pub fn successful(&self) -> usize {
        self.files.len()
    }

    /// True when items were requested but none could be fetched
    pub fn all_failed(&self) -> bool {
        self.files.is_empty() && !self.failures.is_empty()
    }
}

/// Fetch `items` from `source` and name them for the archive.
///
/// # Errors
///
/// Returns an error only if there are more items than `policy` allows.
/// Per-item problems end up in [`Collection::failures`].
pub async fn collect<S>(
    source: &S,
    items: &[MediaItem],
    policy: &ArchivePolicy,
    options: &CollectOptions,
) -> Result<Collection>
where
    S: MediaSource + ?Sized,
{
    policy.check_count(items.len())?;
    info!(count = items.len(), "collecting media");

    let fetched: Vec<_> = stream::iter(items)
        .map(|item| async move { (item, source.fetch(&item.location).await) })
        .buffered(options.concurrency.max(1))
        .collect()
        .await;

    let mut names = UniqueNames::new();
    let mut collection = Collection::default();

    for (item, result) in fetched {
        let outcome = result.and_then(|data| {
            let name = archive_name(item, policy);
            policy.check_content(&name, &data)?;
            let name = names.claim(&name, policy.max_filename_length);
            if let Err(e) = policy.check_file(&name, data.len() as u64) {
                names.release(&name);
                return Err(e.into());
            }
            Ok((name, data))
        });

        match outcome {
            Ok((name, data)) => {
                collection.files.insert(name, data);
            }
            Err(e) => {
                warn!("Skipping {}: {:#}", item.location, e);
                collection.failures.push(Failure {
                    location: item.location.clone(),
                    error: format!("{e:#}"),
                });
            }
        }
    }

    info!(
        successful = collection.successful(),
        failed = collection.failures.len(),
        "collection finished"
    );
    Ok(collection)
}

/// Sanitized archive path for `item`, falling back to a name taken from
/// its location when the requested one sanitizes to nothing.
fn archive_name(item: &MediaItem, policy: &ArchivePolicy) -> String {
    let name = sanitize_filename(&item.desired_name(), policy.max_filename_length);
    if name.is_empty() {
        sanitize_filename(
            &name_from_location(&item.location),
            policy.max_filename_length,
        )
    } else {
        name
    }
}
