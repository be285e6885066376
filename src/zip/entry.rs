use tracing::debug;

use super::crc32;
use super::error::{ArchiveError, ArchiveResult};
use super::structures::{CentralDirectoryHeader, LocalFileHeader};
use super::timestamp::DosDateTime;

/// Longest name shown in error messages.
const NAME_PREVIEW_CHARS: usize = 64;

/// One input file, with its metadata computed up front.
///
/// Length fields are converted to their on-disk widths when the entry is
/// created, so nothing is truncated when headers are written later.
#[derive(Debug, Clone)]
pub struct FileEntry<'a> {
    file_name: &'a str,
    file_name_length: u16,
    data: &'a [u8],
    size: u32,
    crc32: u32,
    last_mod: DosDateTime,
}

impl<'a> FileEntry<'a> {
    pub fn new(file_name: &'a str, data: &'a [u8], last_mod: DosDateTime) -> ArchiveResult<Self> {
        if file_name.is_empty() {
            return Err(ArchiveError::EmptyFileName);
        }
        let file_name_length =
            u16::try_from(file_name.len()).map_err(|_| ArchiveError::FileNameTooLong {
                name: preview(file_name),
                len: file_name.len(),
            })?;
        let size = u32::try_from(data.len()).map_err(|_| ArchiveError::FileTooLarge {
            name: preview(file_name),
            len: data.len(),
        })?;
        let crc32 = crc32::checksum(data);

        debug!(name = file_name, size, crc32, "prepared entry");

        Ok(Self {
            file_name,
            file_name_length,
            data,
            size,
            crc32,
            last_mod,
        })
    }

    pub fn file_name(&self) -> &'a str {
        self.file_name
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn crc32(&self) -> u32 {
        self.crc32
    }

    pub fn last_mod(&self) -> DosDateTime {
        self.last_mod
    }

    /// Bytes this entry occupies in the local section (header, name, data).
    pub fn local_len(&self) -> u64 {
        (LocalFileHeader::SIZE + self.file_name.len() + self.data.len()) as u64
    }

    /// Bytes this entry occupies in the central directory.
    pub fn central_len(&self) -> u64 {
        (CentralDirectoryHeader::SIZE + self.file_name.len()) as u64
    }

    pub fn local_header(&self) -> LocalFileHeader<'a> {
        LocalFileHeader {
            last_mod: self.last_mod,
            crc32: self.crc32,
            size: self.size,
            file_name_length: self.file_name_length,
            file_name: self.file_name.as_bytes(),
        }
    }

    /// Record where this entry's local header was written.
    pub fn placed_at(self, local_header_offset: u32) -> PlacedEntry<'a> {
        PlacedEntry {
            entry: self,
            local_header_offset,
        }
    }
}

/// An entry whose local header has been written.
///
/// Built once by the local-file stage and never modified; the central
/// directory reads its offset from here.
#[derive(Debug, Clone)]
pub struct PlacedEntry<'a> {
    entry: FileEntry<'a>,
    local_header_offset: u32,
}

impl<'a> PlacedEntry<'a> {
    pub fn entry(&self) -> &FileEntry<'a> {
        &self.entry
    }

    pub fn local_header_offset(&self) -> u32 {
        self.local_header_offset
    }

    pub fn central_header(&self) -> CentralDirectoryHeader<'a> {
        CentralDirectoryHeader {
            last_mod: self.entry.last_mod,
            crc32: self.entry.crc32,
            size: self.entry.size,
            lfh_offset: self.local_header_offset,
            file_name_length: self.entry.file_name_length,
            file_name: self.entry.file_name.as_bytes(),
        }
    }
}

fn preview(name: &str) -> String {
    name.chars().take(NAME_PREVIEW_CHARS).collect()
}
