//! PSID container reader.
//!
//! Only the fields the player needs are decoded. The header is big-endian;
//! the program image follows at offset 0x7C and starts with its own
//! little-endian load address.
//!
//! # Examples
//!
//! ```
//! use sid_notes::PsidFile;
//!
//! let mut bytes = vec![0u8; 0x7C];
//! bytes[0..4].copy_from_slice(b"PSID");
//! bytes[4..6].copy_from_slice(&2u16.to_be_bytes());      // version
//! bytes[6..8].copy_from_slice(&0x7Cu16.to_be_bytes());   // data offset
//! bytes[10..12].copy_from_slice(&0x1000u16.to_be_bytes()); // init
//! bytes[12..14].copy_from_slice(&0x1003u16.to_be_bytes()); // play
//! bytes[14..16].copy_from_slice(&1u16.to_be_bytes());    // songs
//! bytes[16..18].copy_from_slice(&1u16.to_be_bytes());    // start song
//! bytes.extend_from_slice(&[0x00, 0x10, 0x60, 0x00, 0x00, 0x60]);
//!
//! let psid = PsidFile::parse(&bytes).unwrap();
//! assert_eq!(psid.load_address, 0x1000);
//! assert_eq!(psid.data, vec![0x60, 0x00, 0x00, 0x60]);
//! ```

use std::path::Path;

/// Fixed offset of the program image.
pub const DATA_OFFSET: usize = 0x7C;

/// Length of the name, author and released fields.
const STRING_FIELD_LEN: usize = 32;

/// Errors raised while reading a PSID container.
#[derive(Debug, thiserror::Error)]
pub enum PsidError {
    #[error("file is too small: {len} bytes, a PSID file has at least 124 bytes")]
    TooSmall { len: usize },

    #[error("unknown file format {magic:?}, only PSID is supported")]
    UnknownFormat { magic: String },

    #[error("unsupported version {0}, only versions 2, 3 and 4 are supported")]
    UnsupportedVersion(u16),

    #[error("invalid data offset 0x{0:04X}, expected 0x007C")]
    InvalidDataOffset(u16),

    #[error("unsupported load address ${0:04X}, only an embedded load address is supported")]
    UnsupportedLoadAddress(u16),

    #[error("program image is missing its load address")]
    MissingLoadAddress,

    #[error("failed to read PSID file: {0}")]
    Io(#[from] std::io::Error),
}

/// A parsed PSID file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PsidFile {
    pub version: u16,
    /// Where `data` is loaded, taken from the first two bytes of the image.
    pub load_address: u16,
    pub init_address: u16,
    /// Zero when the tune installs its own interrupt handler.
    pub play_address: u16,
    pub songs: u16,
    /// 1-based default song.
    pub start_song: u16,
    pub name: String,
    pub author: String,
    pub released: String,
    /// Program image without the load address bytes.
    pub data: Vec<u8>,
}

impl PsidFile {
    /// Parses a complete file image.
    pub fn parse(bytes: &[u8]) -> Result<Self, PsidError> {
        if bytes.len() < DATA_OFFSET {
            return Err(PsidError::TooSmall { len: bytes.len() });
        }

        if &bytes[0..4] != b"PSID" {
            return Err(PsidError::UnknownFormat {
                magic: latin1(&bytes[0..4]),
            });
        }

        let version = read_be_u16(bytes, 0x04);
        if !(2..=4).contains(&version) {
            return Err(PsidError::UnsupportedVersion(version));
        }

        let data_offset = read_be_u16(bytes, 0x06);
        if data_offset as usize != DATA_OFFSET {
            return Err(PsidError::InvalidDataOffset(data_offset));
        }

        let header_load_address = read_be_u16(bytes, 0x08);
        if header_load_address != 0 {
            return Err(PsidError::UnsupportedLoadAddress(header_load_address));
        }

        let image = &bytes[DATA_OFFSET..];
        if image.len() < 2 {
            return Err(PsidError::MissingLoadAddress);
        }
        let load_address = u16::from_le_bytes([image[0], image[1]]);

        Ok(Self {
            version,
            load_address,
            init_address: read_be_u16(bytes, 0x0A),
            play_address: read_be_u16(bytes, 0x0C),
            songs: read_be_u16(bytes, 0x0E),
            start_song: read_be_u16(bytes, 0x10),
            name: read_string(bytes, 0x16),
            author: read_string(bytes, 0x36),
            released: read_string(bytes, 0x56),
            data: image[2..].to_vec(),
        })
    }

    /// Reads and parses the file at `path`.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, PsidError> {
        let bytes = std::fs::read(path)?;
        Self::parse(&bytes)
    }

    /// Last address occupied by the program image.
    pub fn end_address(&self) -> u32 {
        self.load_address as u32 + self.data.len().saturating_sub(1) as u32
    }
}

fn read_be_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([bytes[offset], bytes[offset + 1]])
}

/// Reads a NUL-terminated Latin-1 string field.
fn read_string(bytes: &[u8], offset: usize) -> String {
    let field = &bytes[offset..offset + STRING_FIELD_LEN];
    let end = field.iter().position(|&b| b == 0).unwrap_or(STRING_FIELD_LEN);
    latin1(&field[..end])
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
