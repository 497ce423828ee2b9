//! Exif/TIFF decoder: locates the Exif APP1 segment and reads the IFD0 and
//! GPSInfo tag directories.
//!
//! Only the minimal TIFF layout typical cameras emit is supported: magic 42
//! with the first directory at offset 8. Every read stays inside the APP1
//! payload, so a tag offset pointing outside the segment simply drops that
//! value.

use log::{debug, trace};

use crate::cursor::{ByteCursor, Endian};
use crate::exif::gps::{gps_to_degree, ref_to_sign};
use crate::exif::tags::{
    type_unit_size, GPS_TAGS, IFD0_TAGS, IFD_ENTRY_LEN, TAG_ARTIST, TAG_COPYRIGHT,
    TAG_GPS_IFD_POINTER, TAG_GPS_LATITUDE, TAG_GPS_LATITUDE_REF, TAG_GPS_LONGITUDE,
    TAG_GPS_LONGITUDE_REF, TAG_MAKE, TAG_MODEL, TAG_ORIENTATION, TYPE_ASCII, TYPE_LONG,
    TYPE_RATIONAL, TYPE_SHORT,
};
use crate::jpeg::{scan, MarkerTable, APP1};

/// Offset of the TIFF block inside an Exif APP1 payload ("Exif" + two NULs).
const TIFF_BASE: usize = 6;
/// TIFF magic number.
const TIFF_MAGIC: u16 = 42;
/// Little-endian byte-order flag ("II"); anything else reads as big-endian.
const BYTE_ORDER_LITTLE: u16 = 0x4949;
/// The only first-IFD offset the decoder accepts.
const FIRST_IFD_OFFSET: u32 = 8;

/// Exif fields extracted from a JPEG.
///
/// `present` is false when no usable Exif segment was found; `orientation`
/// is 0 (not a valid orientation) when absent; latitude/longitude are only
/// meaningful when `has_gps_location` is true.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExifData {
    pub present: bool,
    pub copyright: Option<String>,
    pub artist: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub orientation: u16,
    pub has_gps_location: bool,
    /// Signed decimal degrees, rounded to six places.
    pub latitude: f64,
    pub longitude: f64,
}

/// One decoded directory entry value.
#[derive(Debug, Clone, PartialEq)]
enum TagValue {
    Text(String),
    Short(u16),
    Long(u32),
    /// Exactly three rationals joined as "num/den num/den num/den"
    /// (the GPS degree/minute/second convention).
    Rationals(String),
}

impl TagValue {
    fn into_text(self) -> Option<String> {
        match self {
            TagValue::Text(s) => Some(s),
            _ => None,
        }
    }

    fn as_u32(&self) -> Option<u32> {
        match *self {
            TagValue::Short(v) => Some(v as u32),
            TagValue::Long(v) => Some(v),
            _ => None,
        }
    }

    fn into_rationals(self) -> Option<String> {
        match self {
            TagValue::Rationals(s) => Some(s),
            _ => None,
        }
    }
}

/// Extract Exif metadata from a JPEG buffer.
///
/// Total, never errors: an invalid marker table, no qualifying APP1/Exif
/// segment, or an unsupported TIFF layout all yield an all-absent
/// [`ExifData`]. Pass `table` when the buffer was already scanned; `None`
/// scans it here.
pub fn decode_exif(data: &[u8], table: Option<&MarkerTable>) -> ExifData {
    let scanned;
    let table = match table {
        Some(table) => table,
        None => {
            scanned = scan(data);
            &scanned
        }
    };

    let mut exif = ExifData::default();
    if !table.valid || table.app_markers.is_empty() {
        return exif;
    }

    let Some(block) = find_exif_block(data, table) else {
        debug!("no APP1 segment with an Exif payload");
        return exif;
    };

    let cur = ByteCursor::new(block);
    let endian = match cur.read_u16_at(TIFF_BASE, Endian::Big) {
        Ok(BYTE_ORDER_LITTLE) => Endian::Little,
        Ok(_) => Endian::Big,
        Err(_) => return exif,
    };
    if cur.read_u16_at(TIFF_BASE + 2, endian) != Ok(TIFF_MAGIC)
        || cur.read_u32_at(TIFF_BASE + 4, endian) != Ok(FIRST_IFD_OFFSET)
    {
        debug!("unsupported TIFF layout in Exif segment");
        return exif;
    }

    exif.present = true;

    let mut gps_pointer = None;
    for (tag, value) in read_tag_directory(
        block,
        TIFF_BASE + FIRST_IFD_OFFSET as usize,
        IFD0_TAGS,
        endian,
    ) {
        match tag {
            TAG_COPYRIGHT => exif.copyright = value.into_text(),
            TAG_ARTIST => exif.artist = value.into_text(),
            TAG_MAKE => exif.make = value.into_text(),
            TAG_MODEL => exif.model = value.into_text(),
            TAG_ORIENTATION => {
                if let Some(v) = value.as_u32() {
                    exif.orientation = v as u16;
                }
            }
            TAG_GPS_IFD_POINTER => gps_pointer = value.as_u32(),
            _ => {}
        }
    }

    if let Some(pointer) = gps_pointer {
        decode_gps(block, pointer, endian, &mut exif);
    }
    exif
}

/// Payload of the first APP1 segment that starts with ASCII "Exif"
/// (everything after the segment's 2-byte length field). Non-Exif APP1
/// segments (XMP and friends) are skipped in order.
fn find_exif_block<'a>(data: &'a [u8], table: &MarkerTable) -> Option<&'a [u8]> {
    table
        .app_markers
        .iter()
        .filter(|m| m.code == APP1)
        .map(|m| &data[m.offset + 4..m.end()])
        .find(|payload| payload.starts_with(b"Exif"))
}

/// Resolve the GPSInfo sub-directory at `TIFF_BASE + pointer` and fill in
/// the coordinate fields. Both hemisphere letters and both coordinate
/// triples must resolve; any failure leaves the location absent without
/// disturbing the rest of the result.
fn decode_gps(block: &[u8], pointer: u32, endian: Endian, exif: &mut ExifData) {
    let Some(dir) = TIFF_BASE.checked_add(pointer as usize) else {
        return;
    };

    let mut lat_ref = None;
    let mut lat = None;
    let mut lon_ref = None;
    let mut lon = None;
    for (tag, value) in read_tag_directory(block, dir, GPS_TAGS, endian) {
        match tag {
            TAG_GPS_LATITUDE_REF => lat_ref = value.into_text(),
            TAG_GPS_LATITUDE => lat = value.into_rationals(),
            TAG_GPS_LONGITUDE_REF => lon_ref = value.into_text(),
            TAG_GPS_LONGITUDE => lon = value.into_rationals(),
            _ => {}
        }
    }

    let (Some(lat_ref), Some(lat), Some(lon_ref), Some(lon)) = (lat_ref, lat, lon_ref, lon) else {
        return;
    };
    let (Some(lat_sign), Some(lon_sign)) = (ref_to_sign(&lat_ref), ref_to_sign(&lon_ref)) else {
        debug!("unusable GPS hemisphere references {lat_ref:?}/{lon_ref:?}");
        return;
    };
    let (Some(latitude), Some(longitude)) =
        (gps_to_degree(&lat, lat_sign), gps_to_degree(&lon, lon_sign))
    else {
        return;
    };

    exif.has_gps_location = true;
    exif.latitude = latitude;
    exif.longitude = longitude;
}

/// Walk one tag directory at `dir` within the Exif block, collecting values
/// for recognized tags.
///
/// Directories are walked positionally: an unrecognized entry still
/// advances by one 12-byte slot. The whole entry table must lie inside the
/// block or nothing is read; a value read that falls outside the block
/// drops only that value.
fn read_tag_directory(
    block: &[u8],
    dir: usize,
    recognized: &[u16],
    endian: Endian,
) -> Vec<(u16, TagValue)> {
    let cur = ByteCursor::new(block);
    let Ok(count) = cur.read_u16_at(dir, endian) else {
        return Vec::new();
    };
    let entries_start = dir + 2;
    let Some(entries_end) = (count as usize)
        .checked_mul(IFD_ENTRY_LEN)
        .and_then(|n| entries_start.checked_add(n))
    else {
        return Vec::new();
    };
    if entries_end > block.len() {
        return Vec::new();
    }

    let mut values = Vec::new();
    for i in 0..count as usize {
        let at = entries_start + i * IFD_ENTRY_LEN;
        // In bounds per the entries_end check above.
        let (Ok(tag), Ok(field_type), Ok(n), Ok(value_offset)) = (
            cur.read_u16_at(at, endian),
            cur.read_u16_at(at + 2, endian),
            cur.read_u32_at(at + 4, endian),
            cur.read_u32_at(at + 8, endian),
        ) else {
            break;
        };
        if !recognized.contains(&tag) {
            continue;
        }
        trace!("tag 0x{tag:04X} type {field_type} count {n} value/offset 0x{value_offset:08X}");
        if let Some(value) = read_tag_value(block, field_type, n, at + 8, value_offset, endian) {
            values.push((tag, value));
        }
    }
    values
}

/// Decode one entry's value. `value_field` is the absolute position of the
/// entry's own 4-byte value slot; when the encoded size (`count` elements
/// of the field type) exceeds those 4 bytes, `value_offset` is an offset
/// from the TIFF base and the value lives there instead.
fn read_tag_value(
    block: &[u8],
    field_type: u16,
    count: u32,
    value_field: usize,
    value_offset: u32,
    endian: Endian,
) -> Option<TagValue> {
    let unit = type_unit_size(field_type)?;
    let byte_size = (count as usize).checked_mul(unit)?;
    let pos = if byte_size > 4 {
        TIFF_BASE.checked_add(value_offset as usize)?
    } else {
        value_field
    };

    let cur = ByteCursor::new(block);
    match field_type {
        TYPE_ASCII => {
            // Declared count includes the trailing NUL.
            let len = (count as usize).checked_sub(1)?;
            Some(TagValue::Text(cur.read_str_at(pos, len).ok()?))
        }
        TYPE_SHORT => Some(TagValue::Short(cur.read_u16_at(pos, endian).ok()?)),
        TYPE_LONG => Some(TagValue::Long(cur.read_u32_at(pos, endian).ok()?)),
        TYPE_RATIONAL => {
            // Only the GPS degree/minute/second triple shape is supported.
            if count != 3 {
                return None;
            }
            let mut parts = Vec::with_capacity(3);
            for i in 0..3 {
                let numerator = cur.read_u32_at(pos + i * 8, endian).ok()?;
                let denominator = cur.read_u32_at(pos + 4 + i * 8, endian).ok()?;
                parts.push(format!("{numerator}/{denominator}"));
            }
            Some(TagValue::Rationals(parts.join(" ")))
        }
        _ => None,
    }
}
