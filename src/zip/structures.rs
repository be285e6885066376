use super::sink::ByteSink;
use super::timestamp::DosDateTime;

/// Version 1.0: stored entries, no ZIP64, no encryption.
pub const VERSION_NEEDED: u16 = 10;
/// MS-DOS host, APPNOTE version 1.0.
pub const VERSION_MADE_BY: u16 = 10;
/// General purpose flag bit 11: file names are UTF-8.
pub const FLAG_UTF8_NAMES: u16 = 0x0800;

/// ZIP compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    /// Method 0: bytes are copied verbatim.
    Stored,
}

impl CompressionMethod {
    pub fn as_u16(&self) -> u16 {
        match self {
            CompressionMethod::Stored => 0,
        }
    }
}

/// Local File Header (LFH) - 30 bytes plus the file name
pub struct LocalFileHeader<'a> {
    pub last_mod: DosDateTime,
    pub crc32: u32,
    pub size: u32,
    pub file_name_length: u16,
    pub file_name: &'a [u8],
}

impl LocalFileHeader<'_> {
    pub const SIGNATURE: u32 = 0x0403_4B50;
    pub const SIZE: usize = 30;

    pub fn write_to(&self, sink: &mut ByteSink) {
        sink.write_u32_le(Self::SIGNATURE);
        sink.write_u16_le(VERSION_NEEDED);
        sink.write_u16_le(FLAG_UTF8_NAMES);
        sink.write_u16_le(CompressionMethod::Stored.as_u16());
        sink.write_u16_le(self.last_mod.time());
        sink.write_u16_le(self.last_mod.date());
        sink.write_u32_le(self.crc32);
        // Stored: compressed and uncompressed sizes are the same
        sink.write_u32_le(self.size);
        sink.write_u32_le(self.size);
        sink.write_u16_le(self.file_name_length);
        sink.write_u16_le(0); // extra field length
        sink.write_bytes(self.file_name);
    }
}

/// Central Directory File Header (CDFH) - 46 bytes plus the file name
pub struct CentralDirectoryHeader<'a> {
    pub last_mod: DosDateTime,
    pub crc32: u32,
    pub size: u32,
    pub lfh_offset: u32,
    pub file_name_length: u16,
    pub file_name: &'a [u8],
}

impl CentralDirectoryHeader<'_> {
    pub const SIGNATURE: u32 = 0x0201_4B50;
    pub const SIZE: usize = 46;

    pub fn write_to(&self, sink: &mut ByteSink) {
        sink.write_u32_le(Self::SIGNATURE);
        sink.write_u16_le(VERSION_MADE_BY);
        sink.write_u16_le(VERSION_NEEDED);
        sink.write_u16_le(FLAG_UTF8_NAMES);
        sink.write_u16_le(CompressionMethod::Stored.as_u16());
        sink.write_u16_le(self.last_mod.time());
        sink.write_u16_le(self.last_mod.date());
        sink.write_u32_le(self.crc32);
        sink.write_u32_le(self.size);
        sink.write_u32_le(self.size);
        sink.write_u16_le(self.file_name_length);
        sink.write_u16_le(0); // extra field length
        sink.write_u16_le(0); // file comment length
        sink.write_u16_le(0); // disk number start
        sink.write_u16_le(0); // internal attributes
        sink.write_u32_le(0); // external attributes
        sink.write_u32_le(self.lfh_offset);
        sink.write_bytes(self.file_name);
    }
}

/// End of Central Directory (EOCD) - 22 bytes, no archive comment
pub struct EndOfCentralDirectory {
    pub disk_number: u16,
    pub disk_with_cd: u16,
    pub disk_entries: u16,
    pub total_entries: u16,
    pub cd_size: u32,
    pub cd_offset: u32,
}

impl EndOfCentralDirectory {
    pub const SIGNATURE: u32 = 0x0605_4B50;
    pub const SIZE: usize = 22;

    /// Single-disk record for `entries` entries.
    pub fn new(entries: u16, cd_size: u32, cd_offset: u32) -> Self {
        Self {
            disk_number: 0,
            disk_with_cd: 0,
            disk_entries: entries,
            total_entries: entries,
            cd_size,
            cd_offset,
        }
    }

    pub fn write_to(&self, sink: &mut ByteSink) {
        sink.write_u32_le(Self::SIGNATURE);
        sink.write_u16_le(self.disk_number);
        sink.write_u16_le(self.disk_with_cd);
        sink.write_u16_le(self.disk_entries);
        sink.write_u16_le(self.total_entries);
        sink.write_u32_le(self.cd_size);
        sink.write_u32_le(self.cd_offset);
        sink.write_u16_le(0); // comment length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const STAMP: DosDateTime = DosDateTime::from_calendar(2025, 10, 6, 14, 30, 0);

    #[test]
    fn local_header_layout() {
        let mut sink = ByteSink::new();
        LocalFileHeader {
            last_mod: STAMP,
            crc32: 0xCBF4_3926,
            size: 9,
            file_name_length: 5,
            file_name: b"a.txt",
        }
        .write_to(&mut sink);

        let bytes = sink.finalize();
        assert_eq!(bytes.len(), LocalFileHeader::SIZE + 5);
        assert_eq!(
            &bytes[..LocalFileHeader::SIZE],
            &[
                0x50, 0x4B, 0x03, 0x04, // signature
                0x0A, 0x00, // version needed
                0x00, 0x08, // flags
                0x00, 0x00, // method
                0xC0, 0x73, // time 29632
                0x46, 0x5B, // date 23366
                0x26, 0x39, 0xF4, 0xCB, // crc32
                0x09, 0x00, 0x00, 0x00, // compressed size
                0x09, 0x00, 0x00, 0x00, // uncompressed size
                0x05, 0x00, // name length
                0x00, 0x00, // extra length
            ][..]
        );
        assert_eq!(&bytes[LocalFileHeader::SIZE..], b"a.txt");
    }

    #[test]
    fn central_header_layout() {
        let mut sink = ByteSink::new();
        CentralDirectoryHeader {
            last_mod: STAMP,
            crc32: 1,
            size: 0x0102_0304,
            lfh_offset: 0x0A0B_0C0D,
            file_name_length: 2,
            file_name: "é".as_bytes(),
        }
        .write_to(&mut sink);

        let bytes = sink.finalize();
        assert_eq!(bytes.len(), CentralDirectoryHeader::SIZE + 2);
        assert_eq!(&bytes[0..4], b"PK\x01\x02");
        assert_eq!(&bytes[4..6], &[10, 0]);
        assert_eq!(&bytes[6..8], &[10, 0]);
        assert_eq!(&bytes[8..10], &[0x00, 0x08]);
        assert_eq!(&bytes[20..24], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&bytes[24..28], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&bytes[28..30], &[2, 0]);
        assert_eq!(&bytes[30..42], &[0u8; 12]);
        assert_eq!(&bytes[42..46], &[0x0D, 0x0C, 0x0B, 0x0A]);
        assert_eq!(&bytes[46..], "é".as_bytes());
    }

    #[test]
    fn end_record_layout() {
        let mut sink = ByteSink::new();
        EndOfCentralDirectory::new(3, 0x90, 0x1234).write_to(&mut sink);
        assert_eq!(
            sink.finalize(),
            vec![
                0x50, 0x4B, 0x05, 0x06, 0, 0, 0, 0, 3, 0, 3, 0, 0x90, 0, 0, 0, 0x34, 0x12, 0, 0,
                0, 0,
            ]
        );
    }
}
