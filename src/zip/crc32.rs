//! CRC-32 checksum used by ZIP headers.
//!
//! This is the reflected IEEE 802.3 variant (polynomial `0xEDB88320`),
//! computed with a 256-entry lookup table. The table is built at compile
//! time, so there is no lazily-initialized global to share between threads.

/// Reflected IEEE 802.3 polynomial.
const POLYNOMIAL: u32 = 0xEDB8_8320;

/// Byte-indexed lookup table.
static TABLE: [u32; 256] = build_table();

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut round = 0;
        while round < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ POLYNOMIAL
            } else {
                crc >> 1
            };
            round += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Compute the CRC-32 of `data` in one call.
///
/// Total over any input; the checksum of an empty slice is `0`.
pub fn checksum(data: &[u8]) -> u32 {
    let mut hasher = Crc32::new();
    hasher.update(data);
    hasher.finalize()
}

/// Streaming CRC-32 hasher.
///
/// Feeding the same bytes through any number of [`update`](Self::update)
/// calls yields the same value as [`checksum`].
#[derive(Debug, Clone, Copy)]
pub struct Crc32 {
    state: u32,
}

impl Crc32 {
    pub fn new() -> Self {
        Self { state: 0xFFFF_FFFF }
    }

    pub fn update(&mut self, data: &[u8]) {
        let mut acc = self.state;
        for &byte in data {
            acc = (acc >> 8) ^ TABLE[((acc ^ byte as u32) & 0xFF) as usize];
        }
        self.state = acc;
    }

    pub fn finalize(self) -> u32 {
        self.state ^ 0xFFFF_FFFF
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}
