//! ZIP archive encoding.
//!
//! This module packs an in-memory set of named files into a single ZIP
//! archive using the STORED method (no compression), which suits media that
//! is already compressed (JPEG, PNG, MP4).
//!
//! ## Architecture
//!
//! - [`crc32`]: table-driven CRC-32 checksum
//! - [`timestamp`]: packed MS-DOS date/time fields
//! - [`sink`]: append-only little-endian output buffer
//! - [`structures`]: fixed header layouts (LFH, CDFH, EOCD)
//! - [`encoder`]: the three-stage writer tying it all together
//!
//! ## ZIP Format Overview
//!
//! A ZIP file consists of:
//! 1. Local file headers and data for each file
//! 2. Central Directory with metadata for all files
//! 3. End of Central Directory (EOCD) record at the end
//!
//! ## Limitations
//!
//! - STORED method only
//! - No ZIP64: at most 65535 entries, and every offset and size below 4 GiB
//! - No encryption, no multi-disk archives, no extra fields or comments

pub mod crc32;
mod encoder;
mod entry;
mod error;
mod file_map;
mod sink;
mod structures;
mod summary;
mod timestamp;

pub use encoder::{ArchiveEncoder, encode_files};
pub use entry::{FileEntry, PlacedEntry};
pub use error::{ArchiveError, ArchiveResult};
pub use file_map::FileMap;
pub use sink::ByteSink;
pub use structures::*;
pub use summary::{ArchiveSummary, SummaryEntry};
pub use timestamp::DosDateTime;

/// Media type for the encoded bytes.
pub const MEDIA_TYPE: &str = "application/zip";
