//! Tests for the PSID container reader

use sid_notes::{PsidError, PsidFile};

/// Header fields a test may override.
struct Header {
    magic: &'static [u8; 4],
    version: u16,
    data_offset: u16,
    load_address: u16,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: b"PSID",
            version: 2,
            data_offset: 0x7C,
            load_address: 0,
        }
    }
}

fn write_string(bytes: &mut [u8], offset: usize, text: &[u8]) {
    bytes[offset..offset + text.len()].copy_from_slice(text);
}

/// Builds a file with init $2003, play $2000, 7 songs starting at song 5.
fn build(header: Header, image: &[u8]) -> Vec<u8> {
    let mut bytes = vec![0u8; 0x7C];
    bytes[0..4].copy_from_slice(header.magic);
    bytes[4..6].copy_from_slice(&header.version.to_be_bytes());
    bytes[6..8].copy_from_slice(&header.data_offset.to_be_bytes());
    bytes[8..10].copy_from_slice(&header.load_address.to_be_bytes());
    bytes[10..12].copy_from_slice(&0x2003u16.to_be_bytes());
    bytes[12..14].copy_from_slice(&0x2000u16.to_be_bytes());
    bytes[14..16].copy_from_slice(&7u16.to_be_bytes());
    bytes[16..18].copy_from_slice(&5u16.to_be_bytes());
    write_string(&mut bytes, 0x16, b"Imaginary game");
    write_string(&mut bytes, 0x36, b"Imaginary author");
    write_string(&mut bytes, 0x56, b"Copyright 2019");
    bytes.extend_from_slice(image);
    bytes
}

const IMAGE: [u8; 6] = [0x00, 0x20, 1, 2, 3, 4];

#[test]
fn test_valid_file() {
    let psid = PsidFile::parse(&build(Header::default(), &IMAGE)).unwrap();

    assert_eq!(psid.version, 2);
    assert_eq!(psid.init_address, 0x2003);
    assert_eq!(psid.play_address, 0x2000);
    assert_eq!(psid.songs, 7);
    assert_eq!(psid.start_song, 5);
    assert_eq!(psid.name, "Imaginary game");
    assert_eq!(psid.author, "Imaginary author");
    assert_eq!(psid.released, "Copyright 2019");
    assert_eq!(psid.load_address, 0x2000);
    assert_eq!(psid.data, vec![1, 2, 3, 4]);
    assert_eq!(psid.end_address(), 0x2003);
}

#[test]
fn test_versions_three_and_four_accepted() {
    for version in [3, 4] {
        let header = Header {
            version,
            ..Header::default()
        };
        assert_eq!(PsidFile::parse(&build(header, &IMAGE)).unwrap().version, version);
    }
}

#[test]
fn test_unknown_format() {
    let header = Header {
        magic: b"RSID",
        ..Header::default()
    };

    let err = PsidFile::parse(&build(header, &IMAGE)).unwrap_err();
    assert!(matches!(err, PsidError::UnknownFormat { ref magic } if magic == "RSID"));
    assert_eq!(
        err.to_string(),
        "unknown file format \"RSID\", only PSID is supported"
    );
}

#[test]
fn test_version_out_of_range() {
    for version in [1, 5] {
        let header = Header {
            version,
            ..Header::default()
        };
        let err = PsidFile::parse(&build(header, &IMAGE)).unwrap_err();
        assert!(matches!(err, PsidError::UnsupportedVersion(v) if v == version));
    }
}

#[test]
fn test_wrong_data_offset() {
    let header = Header {
        data_offset: 25,
        ..Header::default()
    };

    let err = PsidFile::parse(&build(header, &IMAGE)).unwrap_err();
    assert!(matches!(err, PsidError::InvalidDataOffset(25)));
}

#[test]
fn test_header_load_address_rejected() {
    let header = Header {
        load_address: 0x07E8,
        ..Header::default()
    };

    let err = PsidFile::parse(&build(header, &IMAGE)).unwrap_err();
    assert!(matches!(err, PsidError::UnsupportedLoadAddress(0x07E8)));
    assert!(err.to_string().contains("$07E8"));
}

#[test]
fn test_too_small() {
    let err = PsidFile::parse(&[]).unwrap_err();
    assert!(matches!(err, PsidError::TooSmall { len: 0 }));

    let truncated = &build(Header::default(), &IMAGE)[..0x7B];
    assert!(matches!(
        PsidFile::parse(truncated),
        Err(PsidError::TooSmall { len: 0x7B })
    ));
}

#[test]
fn test_missing_load_address() {
    let err = PsidFile::parse(&build(Header::default(), &[0x00])).unwrap_err();
    assert!(matches!(err, PsidError::MissingLoadAddress));

    // The address alone is a valid, empty image
    let empty = PsidFile::parse(&build(Header::default(), &[0x00, 0x10])).unwrap();
    assert_eq!(empty.load_address, 0x1000);
    assert!(empty.data.is_empty());
}

#[test]
fn test_read_from_disk() {
    let path = std::env::temp_dir().join(format!("sid-notes-psid-test-{}.sid", std::process::id()));
    std::fs::write(&path, build(Header::default(), &IMAGE)).unwrap();

    let psid = PsidFile::read(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(psid.name, "Imaginary game");

    assert!(matches!(PsidFile::read(&path), Err(PsidError::Io(_))));
}
