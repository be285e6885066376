//! # mediazip
//!
//! Pack downloaded media files into a single store-only ZIP archive.
//!
//! The core is an exact ZIP encoder: given an ordered set of named byte
//! buffers it writes local file headers and data, the central directory and
//! the end record, with CRC-32 checksums and packed DOS timestamps. Media is
//! usually compressed already, so entries use the STORED method.
//!
//! Around the encoder sit the pieces a download tool needs: a filename and
//! size policy, sources for local files and HTTP(S) URLs, and a collector
//! that fetches many items concurrently while keeping their order.
//!
//! ## Features
//!
//! - Byte-exact STORED archives readable by any standard unzip tool
//! - UTF-8 file names (general purpose flag bit 11)
//! - One shared timestamp for every entry of an archive
//! - Fetching from local paths and HTTP(S) URLs with retries
//! - Name sanitizing and collision-free renaming
//!
//! ## Example
//!
//! ```no_run
//! use mediazip::{
//!     ArchiveEncoder, ArchivePolicy, AutoSource, CollectOptions, HttpSource, MediaItem, collect,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let source = AutoSource::new(HttpSource::new()?);
//!     let items = vec![
//!         MediaItem::new("https://example.com/media/photo.jpg"),
//!         MediaItem::new("clip.mp4"),
//!     ];
//!
//!     let collection = collect(&source, &items, &ArchivePolicy::default(), &CollectOptions::default()).await?;
//!     let bytes = ArchiveEncoder::now().encode(&collection.files)?;
//!     tokio::fs::write("media.zip", bytes).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod collect;
pub mod io;
pub mod policy;
pub mod zip;

pub use cli::Cli;
pub use collect::{CollectOptions, Collection, Failure, MediaItem, collect};
pub use io::{AutoSource, HttpSource, LocalFileSource, MediaSource};
pub use policy::{ArchivePolicy, PolicyViolation};
pub use zip::{
    ArchiveEncoder, ArchiveError, ArchiveResult, ArchiveSummary, DosDateTime, FileMap, encode_files,
};
