//! Filename and size policy applied before files reach the encoder.
//!
//! The encoder itself only rejects what the ZIP format cannot represent.
//! This module enforces the stricter limits of a media download: how many
//! files, how large each may be, and what an archive path may look like.

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

/// Default cap on files per archive.
pub const DEFAULT_MAX_FILES: usize = 1000;
/// Default cap on a single file (100 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;
/// Default cap on a file name, in characters.
pub const DEFAULT_MAX_FILENAME_LENGTH: usize = 255;

/// Characters rejected by common filesystems.
const FORBIDDEN_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// Name used when a location has no usable path segment.
const FALLBACK_NAME: &str = "file";

/// A limit that a file or file set exceeds.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyViolation {
    #[error("Too many files: {count} > {max}")]
    TooManyFiles { count: usize, max: usize },

    #[error("File too large: {name} is {size} bytes (max {max})")]
    FileTooLarge { name: String, size: u64, max: u64 },

    #[error("Filename too long: {len} > {max} characters")]
    FilenameTooLong { len: usize, max: usize },

    #[error("Filename cannot be empty")]
    EmptyFilename,

    #[error("Not an image: {name}")]
    NotAnImage { name: String },
}

/// Limits for one archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchivePolicy {
    pub max_files: usize,
    pub max_file_size: u64,
    pub max_filename_length: usize,
    /// Only accept JPEG, PNG, GIF and WebP content
    pub images_only: bool,
}

impl Default for ArchivePolicy {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_filename_length: DEFAULT_MAX_FILENAME_LENGTH,
            images_only: false,
        }
    }
}

impl ArchivePolicy {
    pub fn check_count(&self, count: usize) -> Result<(), PolicyViolation> {
        if count > self.max_files {
            return Err(PolicyViolation::TooManyFiles {
                count,
                max: self.max_files,
            });
        }
        Ok(())
    }

    pub fn check_file(&self, name: &str, size: u64) -> Result<(), PolicyViolation> {
        if name.trim().is_empty() {
            return Err(PolicyViolation::EmptyFilename);
        }
        let len = name.chars().count();
        if len > self.max_filename_length {
            return Err(PolicyViolation::FilenameTooLong {
                len,
                max: self.max_filename_length,
            });
        }
        if size > self.max_file_size {
            return Err(PolicyViolation::FileTooLarge {
                name: name.to_string(),
                size,
                max: self.max_file_size,
            });
        }
        Ok(())
    }

    /// Check a fetched file: name and size, then the image signature when
    /// `images_only` is set.
    pub fn check_content(&self, name: &str, data: &[u8]) -> Result<(), PolicyViolation> {
        self.check_file(name, data.len() as u64)?;
        if self.images_only && !is_image_data(data) {
            return Err(PolicyViolation::NotAnImage {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

/// Returns true if `data` starts with a JPEG, PNG, GIF or WebP signature.
pub fn is_image_data(data: &[u8]) -> bool {
    match data {
        [0xFF, 0xD8, 0xFF, ..] => true,
        [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => true,
        [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => true,
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => true,
        _ => false,
    }
}

/// Make `name` safe to use as an archive path.
///
/// Control characters and `< > : " | ? *` become `_`, backslashes become
/// `/`, repeated, leading and trailing slashes are dropped, and the result
/// is cut to `max_len` characters. A trailing slash would turn the entry into
/// a directory.
pub fn sanitize_filename(name: &str, max_len: usize) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let c = match c {
            '\u{0}'..='\u{1F}' => '_',
            '\\' => '/',
            c if FORBIDDEN_CHARS.contains(&c) => '_',
            c => c,
        };
        if c == '/' && (out.is_empty() || out.ends_with('/')) {
            continue;
        }
        out.push(c);
    }
    let mut out: String = out.chars().take(max_len).collect();
    while out.ends_with('/') {
        out.pop();
    }
    out
}

/// Best-effort file name for a URL or filesystem path.
///
/// Uses the last non-empty path segment, ignoring any query string or
/// fragment.
pub fn name_from_location(location: &str) -> String {
    let path = match location.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map_or("", |(_, path)| path),
        None => location,
    };
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty())
        .unwrap_or(FALLBACK_NAME)
        .to_string()
}

/// Suggested file name for a new archive: `download_<unix millis>.zip`.
pub fn default_archive_name(now: SystemTime) -> String {
    let millis = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("download_{millis}.zip")
}

/// Hands out archive paths that have not been used yet.
///
/// The first request for a name gets it unchanged; later requests get
/// `stem-1.ext`, `stem-2.ext` and so on, with the stem shortened so the
/// result stays within the length limit.
#[derive(Debug, Default)]
pub struct UniqueNames {
    taken: HashSet<String>,
}

impl UniqueNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `name`, or the first free suffixed variant of at most
    /// `max_len` characters.
    pub fn claim(&mut self, name: &str, max_len: usize) -> String {
        if self.taken.insert(name.to_string()) {
            return name.to_string();
        }
        let (stem, ext) = split_extension(name);
        let mut n = 1usize;
        loop {
            let suffix = format!("-{n}{ext}");
            let room = max_len.saturating_sub(suffix.chars().count());
            let stem: String = stem.chars().take(room).collect();
            let candidate = format!("{stem}{suffix}");
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Give back a name that ended up unused.
    pub fn release(&mut self, name: &str) -> bool {
        self.taken.remove(name)
    }
}

/// Split `photo.jpg` into (`photo`, `.jpg`). Dotfiles and names without a
/// dot keep an empty extension.
fn split_extension(name: &str) -> (&str, &str) {
    let base_start = name.rfind('/').map_or(0, |i| i + 1);
    match name[base_start..].rfind('.') {
        Some(0) | None => (name, ""),
        Some(dot) => name.split_at(base_start + dot),
    }
}
