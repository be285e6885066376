use super::crc32;
use super::file_map::FileMap;
use super::timestamp::DosDateTime;

/// Listing row for one packed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    pub file_name: String,
    pub size: u64,
    pub crc32: u32,
}

/// What went into an archive, for reporting after it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub entries: Vec<SummaryEntry>,
    pub last_mod: DosDateTime,
    pub archive_size: u64,
}

impl ArchiveSummary {
    pub fn new(files: &FileMap, last_mod: DosDateTime, archive_size: u64) -> Self {
        let entries = files
            .iter()
            .map(|(name, data)| SummaryEntry {
                file_name: name.to_string(),
                size: data.len() as u64,
                crc32: crc32::checksum(data),
            })
            .collect();
        Self {
            entries,
            last_mod,
            archive_size,
        }
    }

    pub fn total_files(&self) -> usize {
        self.entries.len()
    }

    /// Sum of stored file sizes, without headers.
    pub fn stored_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    /// Header and directory bytes added on top of the stored data.
    pub fn overhead_bytes(&self) -> u64 {
        self.archive_size.saturating_sub(self.stored_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zip::ArchiveEncoder;

    #[test]
    fn totals_match_encoded_archive() {
        let stamp = DosDateTime::from_calendar(2024, 2, 29, 8, 0, 0);
        let files: FileMap = [("a.jpg", vec![0u8; 100]), ("b.mp4", vec![1u8; 50])]
            .into_iter()
            .collect();
        let bytes = ArchiveEncoder::new(stamp).encode(&files).unwrap();
        let summary = ArchiveSummary::new(&files, stamp, bytes.len() as u64);

        assert_eq!(summary.total_files(), 2);
        assert_eq!(summary.stored_bytes(), 150);
        // two local headers, two central headers, names twice, end record
        assert_eq!(summary.overhead_bytes(), 2 * 30 + 2 * 46 + 2 * 2 * 5 + 22);
        assert_eq!(summary.entries[1].file_name, "b.mp4");
        assert_eq!(summary.entries[0].crc32, crc32fast::hash(&[0u8; 100]));
    }
}
