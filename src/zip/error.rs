//! Error types for archive encoding

use thiserror::Error;

/// Archive encoding result type
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Inputs the store-only, non-ZIP64 format cannot represent.
///
/// Every variant is raised before the first byte is written, so a failed
/// encode never yields a partial archive.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArchiveError {
    /// An entry has an empty name
    #[error("File name cannot be empty")]
    EmptyFileName,

    /// Name does not fit the 16-bit length field
    #[error("File name too long: {name:?} is {len} bytes (max 65535)")]
    FileNameTooLong {
        /// Offending name, truncated for display
        name: String,
        /// UTF-8 length in bytes
        len: usize,
    },

    /// Data does not fit the 32-bit size fields
    #[error("File too large: {name:?} is {len} bytes (max 4294967295)")]
    FileTooLarge {
        /// Offending name
        name: String,
        /// Data length in bytes
        len: usize,
    },

    /// Entry count does not fit the 16-bit end record fields
    #[error("Too many entries: {0} (max 65535)")]
    TooManyEntries(usize),

    /// An offset or the central directory size would exceed 32 bits
    #[error("Archive too large: {0} bytes (max 4294967295 without ZIP64)")]
    ArchiveTooLarge(u64),
}
