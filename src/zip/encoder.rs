//! Store-only ZIP writer.
//!
//! ## Write Protocol
//!
//! An archive is produced in three sequential stages:
//! 1. For each file, in input order: Local File Header, name, then raw data
//! 2. One Central Directory File Header per file, in the same order
//! 3. The End of Central Directory record
//!
//! Every entry is validated and the final layout is sized before the first
//! byte is written, so an encode either returns a complete archive or an
//! error.

use chrono::NaiveDateTime;
use tracing::debug;

use super::entry::{FileEntry, PlacedEntry};
use super::error::{ArchiveError, ArchiveResult};
use super::file_map::FileMap;
use super::sink::ByteSink;
use super::structures::EndOfCentralDirectory;
use super::timestamp::DosDateTime;

/// Single-use ZIP archive encoder.
///
/// The timestamp given at construction is applied to every entry. Calling
/// [`encode`](Self::encode) consumes the encoder, so each archive gets a
/// fresh instance and its own output buffer.
///
/// ## Example
///
/// ```
/// use mediazip::{ArchiveEncoder, DosDateTime, FileMap};
///
/// let mut files = FileMap::new();
/// files.insert("photo.jpg", vec![0xFF, 0xD8, 0xFF]);
///
/// let encoder = ArchiveEncoder::new(DosDateTime::from_calendar(2025, 10, 6, 14, 30, 0));
/// let bytes = encoder.encode(&files)?;
/// assert_eq!(&bytes[..4], b"PK\x03\x04");
/// # Ok::<(), mediazip::ArchiveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ArchiveEncoder {
    last_mod: DosDateTime,
}

impl ArchiveEncoder {
    pub fn new(last_mod: DosDateTime) -> Self {
        Self { last_mod }
    }

    /// Encoder stamping entries with the current local time.
    pub fn now() -> Self {
        Self::new(DosDateTime::now())
    }

    pub fn last_mod(&self) -> DosDateTime {
        self.last_mod
    }

    /// Encode `files` in iteration order and return the complete archive.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is empty or longer than 65535 bytes, a file
    /// is larger than 4 GiB - 1, there are more than 65535 files, or the
    /// central directory would start or span beyond the 32-bit limit.
    pub fn encode<'a, I>(self, files: I) -> ArchiveResult<Vec<u8>>
    where
        I: IntoIterator<Item = (&'a str, &'a [u8])>,
    {
        let entries = files
            .into_iter()
            .map(|(name, data)| FileEntry::new(name, data, self.last_mod))
            .collect::<ArchiveResult<Vec<_>>>()?;
        let entry_count =
            u16::try_from(entries.len()).map_err(|_| ArchiveError::TooManyEntries(entries.len()))?;
        let layout = Layout::plan(&entries)?;

        debug!(
            entries = entry_count,
            total_len = layout.total_len,
            "encoding archive"
        );

        let mut sink = ByteSink::with_capacity(layout.total_len);
        let placed = write_local_files(&mut sink, entries)?;
        let (cd_offset, cd_size) = write_central_directory(&mut sink, &placed)?;
        debug_assert_eq!((cd_offset, cd_size), (layout.cd_offset, layout.cd_size));

        EndOfCentralDirectory::new(entry_count, cd_size, cd_offset).write_to(&mut sink);
        debug_assert_eq!(sink.len(), layout.total_len);

        Ok(sink.finalize())
    }
}

/// Encode a [`FileMap`] with `timestamp`, or the current local time when
/// `None` is given.
pub fn encode_files(files: &FileMap, timestamp: Option<NaiveDateTime>) -> ArchiveResult<Vec<u8>> {
    let encoder = match timestamp {
        Some(timestamp) => ArchiveEncoder::new(DosDateTime::from_datetime(timestamp)),
        None => ArchiveEncoder::now(),
    };
    encoder.encode(files)
}

/// Section sizes computed before anything is written.
struct Layout {
    cd_offset: u32,
    cd_size: u32,
    total_len: usize,
}

impl Layout {
    fn plan(entries: &[FileEntry<'_>]) -> ArchiveResult<Self> {
        let local_len: u64 = entries.iter().map(FileEntry::local_len).sum();
        let central_len: u64 = entries.iter().map(FileEntry::central_len).sum();
        let total = local_len + central_len + EndOfCentralDirectory::SIZE as u64;
        let too_large = |_| ArchiveError::ArchiveTooLarge(total);

        Ok(Self {
            cd_offset: u32::try_from(local_len).map_err(too_large)?,
            cd_size: u32::try_from(central_len).map_err(too_large)?,
            total_len: usize::try_from(total).map_err(too_large)?,
        })
    }
}

/// Stage 1: local headers and data. Returns the entries with their offsets.
fn write_local_files<'a>(
    sink: &mut ByteSink,
    entries: Vec<FileEntry<'a>>,
) -> ArchiveResult<Vec<PlacedEntry<'a>>> {
    let mut placed = Vec::with_capacity(entries.len());
    for entry in entries {
        let offset = cursor(sink)?;
        entry.local_header().write_to(sink);
        sink.write_bytes(entry.data());
        placed.push(entry.placed_at(offset));
    }
    Ok(placed)
}

/// Stage 2: central directory. Returns its (offset, size).
fn write_central_directory(
    sink: &mut ByteSink,
    placed: &[PlacedEntry<'_>],
) -> ArchiveResult<(u32, u32)> {
    let start = cursor(sink)?;
    for entry in placed {
        entry.central_header().write_to(sink);
    }
    let size = cursor(sink)? - start;
    debug!(offset = start, size, "wrote central directory");
    Ok((start, size))
}

fn cursor(sink: &ByteSink) -> ArchiveResult<u32> {
    u32::try_from(sink.len()).map_err(|_| ArchiveError::ArchiveTooLarge(sink.len() as u64))
}
