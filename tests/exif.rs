//! Exif decoding tests over hand-built APP1/TIFF fixtures.

use exifgraft::exif::tags::{
    TAG_ARTIST, TAG_COPYRIGHT, TAG_GPS_IFD_POINTER, TAG_GPS_LATITUDE, TAG_GPS_LATITUDE_REF,
    TAG_GPS_LONGITUDE, TAG_GPS_LONGITUDE_REF, TAG_MAKE, TAG_MODEL, TAG_ORIENTATION, TYPE_ASCII,
    TYPE_LONG, TYPE_RATIONAL, TYPE_SHORT,
};
use exifgraft::{decode_exif, gps_to_degree, ref_to_sign, scan};

const SOI: u16 = 0xFFD8;
const SOS: u16 = 0xFFDA;
const APP1: u16 = 0xFFE1;
const DQT: u16 = 0xFFDB;

fn put16(v: u16, le: bool) -> [u8; 2] {
    if le {
        v.to_le_bytes()
    } else {
        v.to_be_bytes()
    }
}

fn put32(v: u32, le: bool) -> [u8; 4] {
    if le {
        v.to_le_bytes()
    } else {
        v.to_be_bytes()
    }
}

/// One 12-byte IFD entry; `value` is the raw 4-byte value/offset slot.
fn entry(tag: u16, field_type: u16, count: u32, value: [u8; 4], le: bool) -> Vec<u8> {
    let mut v = Vec::with_capacity(12);
    v.extend_from_slice(&put16(tag, le));
    v.extend_from_slice(&put16(field_type, le));
    v.extend_from_slice(&put32(count, le));
    v.extend_from_slice(&value);
    v
}

/// TIFF block: header, IFD0 at offset 8, zero next-IFD link, then the
/// caller's value area (offsets inside entries are TIFF-base relative).
fn tiff_block(le: bool, entries: &[Vec<u8>], value_area: &[u8]) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(if le { b"II" } else { b"MM" });
    v.extend_from_slice(&put16(42, le));
    v.extend_from_slice(&put32(8, le));
    v.extend_from_slice(&put16(entries.len() as u16, le));
    for e in entries {
        v.extend_from_slice(e);
    }
    v.extend_from_slice(&put32(0, le));
    v.extend_from_slice(value_area);
    v
}

fn segment(code: u16, payload: &[u8]) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(&code.to_be_bytes());
    v.extend_from_slice(&(payload.len() as u16 + 2).to_be_bytes());
    v.extend_from_slice(payload);
    v
}

fn exif_app1(tiff: &[u8]) -> Vec<u8> {
    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(tiff);
    segment(APP1, &payload)
}

fn jpeg_with(segments: &[Vec<u8>], scan_data: &[u8]) -> Vec<u8> {
    let mut v = SOI.to_be_bytes().to_vec();
    for s in segments {
        v.extend_from_slice(s);
    }
    v.extend_from_slice(&SOS.to_be_bytes());
    v.extend_from_slice(scan_data);
    v
}

fn rational(n: u32, d: u32, le: bool) -> Vec<u8> {
    let mut v = put32(n, le).to_vec();
    v.extend_from_slice(&put32(d, le));
    v
}

/// Full fixture: six IFD0 tags plus a GPSInfo directory at 40°26'46" N,
/// 79°58'56" W.
fn full_exif_jpeg(le: bool) -> Vec<u8> {
    // IFD0 value area starts at TIFF offset 8 + 2 + 6*12 + 4 = 86.
    let make_at = 86u32;
    let model_at = make_at + 6;
    let artist_at = model_at + 7;
    let copyright_at = artist_at + 9;
    let gps_ifd_at = copyright_at + 9; // 117

    // GPS value area starts after its own directory: 2 + 4*12 + 4 = 54.
    let lat_at = gps_ifd_at + 54;
    let lon_at = lat_at + 24;

    let ifd0 = [
        entry(TAG_MAKE, TYPE_ASCII, 6, put32(make_at, le), le),
        entry(TAG_MODEL, TYPE_ASCII, 7, put32(model_at, le), le),
        entry(TAG_ARTIST, TYPE_ASCII, 9, put32(artist_at, le), le),
        entry(TAG_COPYRIGHT, TYPE_ASCII, 9, put32(copyright_at, le), le),
        {
            let mut slot = [0u8; 4];
            slot[..2].copy_from_slice(&put16(6, le));
            entry(TAG_ORIENTATION, TYPE_SHORT, 1, slot, le)
        },
        entry(TAG_GPS_IFD_POINTER, TYPE_LONG, 1, put32(gps_ifd_at, le), le),
    ];

    let mut value_area = Vec::new();
    value_area.extend_from_slice(b"Canon\0");
    value_area.extend_from_slice(b"EOS 5D\0");
    value_area.extend_from_slice(b"Jane Doe\0");
    value_area.extend_from_slice(b"(c) 2014\0");

    // GPSInfo directory.
    value_area.extend_from_slice(&put16(4, le));
    let gps_entries = [
        entry(TAG_GPS_LATITUDE_REF, TYPE_ASCII, 2, *b"N\0\0\0", le),
        entry(TAG_GPS_LATITUDE, TYPE_RATIONAL, 3, put32(lat_at, le), le),
        entry(TAG_GPS_LONGITUDE_REF, TYPE_ASCII, 2, *b"W\0\0\0", le),
        entry(TAG_GPS_LONGITUDE, TYPE_RATIONAL, 3, put32(lon_at, le), le),
    ];
    for e in &gps_entries {
        value_area.extend_from_slice(e);
    }
    value_area.extend_from_slice(&put32(0, le));

    for (n, d) in [(40, 1), (26, 1), (46, 1)] {
        value_area.extend_from_slice(&rational(n, d, le));
    }
    for (n, d) in [(79, 1), (58, 1), (56, 1)] {
        value_area.extend_from_slice(&rational(n, d, le));
    }

    let tiff = tiff_block(le, &ifd0, &value_area);
    jpeg_with(&[segment(DQT, &[0u8; 4]), exif_app1(&tiff)], &[1, 2, 3])
}

#[test]
fn decodes_little_endian_exif() {
    let img = full_exif_jpeg(true);
    let exif = decode_exif(&img, None);
    assert!(exif.present);
    assert_eq!(exif.make.as_deref(), Some("Canon"));
    assert_eq!(exif.model.as_deref(), Some("EOS 5D"));
    assert_eq!(exif.artist.as_deref(), Some("Jane Doe"));
    assert_eq!(exif.copyright.as_deref(), Some("(c) 2014"));
    assert_eq!(exif.orientation, 6);
    assert!(exif.has_gps_location);
    assert!((exif.latitude - 40.446111).abs() < 1e-9);
    assert!((exif.longitude + 79.982222).abs() < 1e-9);
}

#[test]
fn decodes_big_endian_exif() {
    let exif = decode_exif(&full_exif_jpeg(false), None);
    assert!(exif.present);
    assert_eq!(exif.make.as_deref(), Some("Canon"));
    assert_eq!(exif.orientation, 6);
    assert!(exif.has_gps_location);
    assert!((exif.latitude - 40.446111).abs() < 1e-9);
}

#[test]
fn precomputed_table_matches_fresh_scan() {
    let img = full_exif_jpeg(true);
    let table = scan(&img);
    assert_eq!(decode_exif(&img, Some(&table)), decode_exif(&img, None));
}

#[test]
fn non_jpeg_is_all_absent() {
    let exif = decode_exif(b"not an image", None);
    assert!(!exif.present);
    assert_eq!(exif.orientation, 0);
    assert!(!exif.has_gps_location);
    assert_eq!(exif.latitude, 0.0);
    assert_eq!(exif.longitude, 0.0);
}

#[test]
fn jpeg_without_app_markers_is_absent() {
    let img = jpeg_with(&[segment(DQT, &[0u8; 4])], &[0]);
    assert!(!decode_exif(&img, None).present);
}

#[test]
fn app1_without_exif_payload_is_skipped() {
    let xmp = segment(APP1, b"http://ns.adobe.com/xap/1.0/\0");
    let img = jpeg_with(&[xmp], &[0]);
    assert!(!decode_exif(&img, None).present);
}

#[test]
fn second_app1_with_exif_payload_qualifies() {
    let xmp = segment(APP1, b"http://ns.adobe.com/xap/1.0/\0");
    let tiff = tiff_block(true, &[], &[]);
    let img = jpeg_with(&[xmp, exif_app1(&tiff)], &[0]);
    assert!(decode_exif(&img, None).present);
}

#[test]
fn empty_directory_is_present_but_all_absent() {
    let tiff = tiff_block(true, &[], &[]);
    let exif = decode_exif(&jpeg_with(&[exif_app1(&tiff)], &[0]), None);
    assert!(exif.present);
    assert_eq!(exif.make, None);
    assert_eq!(exif.orientation, 0);
    assert!(!exif.has_gps_location);
}

#[test]
fn wrong_magic_is_rejected() {
    let mut tiff = tiff_block(true, &[], &[]);
    tiff[2..4].copy_from_slice(&43u16.to_le_bytes());
    assert!(!decode_exif(&jpeg_with(&[exif_app1(&tiff)], &[0]), None).present);
}

#[test]
fn non_standard_first_ifd_offset_is_rejected() {
    let mut tiff = tiff_block(true, &[], &[]);
    tiff[4..8].copy_from_slice(&16u32.to_le_bytes());
    assert!(!decode_exif(&jpeg_with(&[exif_app1(&tiff)], &[0]), None).present);
}

#[test]
fn unknown_tags_are_walked_past() {
    // An unrecognized tag sits between two recognized ones; the 12-byte
    // stride must keep the walk aligned.
    let le = true;
    let make_at = 8 + 2 + 3 * 12 + 4;
    let ifd0 = [
        {
            let mut slot = [0u8; 4];
            slot[..2].copy_from_slice(&put16(3, le));
            entry(TAG_ORIENTATION, TYPE_SHORT, 1, slot, le)
        },
        entry(0x9999, TYPE_LONG, 1, put32(7, le), le),
        entry(TAG_MAKE, TYPE_ASCII, 5, put32(make_at as u32, le), le),
    ];
    let tiff = tiff_block(le, &ifd0, b"Sony\0");
    let exif = decode_exif(&jpeg_with(&[exif_app1(&tiff)], &[0]), None);
    assert!(exif.present);
    assert_eq!(exif.orientation, 3);
    assert_eq!(exif.make.as_deref(), Some("Sony"));
}

#[test]
fn bad_hemisphere_ref_drops_gps_only() {
    let le = true;
    let gps_ifd_at = 8 + 2 + 12 + 4; // right after a one-entry IFD0
    let lat_at = gps_ifd_at + 2 + 4 * 12 + 4;
    let lon_at = lat_at + 24;

    let ifd0 = [entry(
        TAG_GPS_IFD_POINTER,
        TYPE_LONG,
        1,
        put32(gps_ifd_at as u32, le),
        le,
    )];

    let mut value_area = put16(4, le).to_vec();
    for e in [
        entry(TAG_GPS_LATITUDE_REF, TYPE_ASCII, 2, *b"X\0\0\0", le),
        entry(TAG_GPS_LATITUDE, TYPE_RATIONAL, 3, put32(lat_at as u32, le), le),
        entry(TAG_GPS_LONGITUDE_REF, TYPE_ASCII, 2, *b"W\0\0\0", le),
        entry(TAG_GPS_LONGITUDE, TYPE_RATIONAL, 3, put32(lon_at as u32, le), le),
    ] {
        value_area.extend_from_slice(&e);
    }
    value_area.extend_from_slice(&put32(0, le));
    for (n, d) in [(40, 1), (26, 1), (46, 1), (79, 1), (58, 1), (56, 1)] {
        value_area.extend_from_slice(&rational(n, d, le));
    }

    let tiff = tiff_block(le, &ifd0, &value_area);
    let exif = decode_exif(&jpeg_with(&[exif_app1(&tiff)], &[0]), None);
    assert!(exif.present);
    assert!(!exif.has_gps_location);
    assert_eq!(exif.latitude, 0.0);
}

#[test]
fn gps_pointer_outside_block_drops_gps_only() {
    let le = true;
    let ifd0 = [entry(TAG_GPS_IFD_POINTER, TYPE_LONG, 1, put32(60_000, le), le)];
    let tiff = tiff_block(le, &ifd0, &[]);
    let exif = decode_exif(&jpeg_with(&[exif_app1(&tiff)], &[0]), None);
    assert!(exif.present);
    assert!(!exif.has_gps_location);
}

#[test]
fn resolver_reference_values() {
    assert!((gps_to_degree("40/1 26/1 46/1", 1.0).unwrap() - 40.446111).abs() < 1e-9);
    assert_eq!(ref_to_sign("S"), Some(-1.0));
    assert_eq!(ref_to_sign("X"), None);
    assert_eq!(gps_to_degree("1/1 2/1", 1.0), None);
}
