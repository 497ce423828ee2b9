//! Tag IDs and TIFF field types recognized by the Exif decoder.

/// Offset of a GPSInfo sub-directory, relative to the TIFF base (IFD0).
pub const TAG_GPS_IFD_POINTER: u16 = 0x8825;
/// Image orientation, values 1-8 (IFD0).
pub const TAG_ORIENTATION: u16 = 0x0112;
/// Camera manufacturer (IFD0).
pub const TAG_MAKE: u16 = 0x010F;
/// Camera model (IFD0).
pub const TAG_MODEL: u16 = 0x0110;
/// Artist / photographer (IFD0).
pub const TAG_ARTIST: u16 = 0x013B;
/// Copyright notice (IFD0).
pub const TAG_COPYRIGHT: u16 = 0x8298;

/// Hemisphere letter for latitude, "N" or "S" (GPSInfo).
pub const TAG_GPS_LATITUDE_REF: u16 = 0x0001;
/// Latitude as three degree/minute/second rationals (GPSInfo).
pub const TAG_GPS_LATITUDE: u16 = 0x0002;
/// Hemisphere letter for longitude, "E" or "W" (GPSInfo).
pub const TAG_GPS_LONGITUDE_REF: u16 = 0x0003;
/// Longitude as three degree/minute/second rationals (GPSInfo).
pub const TAG_GPS_LONGITUDE: u16 = 0x0004;

/// IFD0 tags the decoder extracts. Entries for any other tag are skipped
/// positionally during the directory walk.
pub const IFD0_TAGS: &[u16] = &[
    TAG_GPS_IFD_POINTER,
    TAG_ORIENTATION,
    TAG_MAKE,
    TAG_MODEL,
    TAG_ARTIST,
    TAG_COPYRIGHT,
];

/// GPSInfo sub-directory tags the decoder extracts.
pub const GPS_TAGS: &[u16] = &[
    TAG_GPS_LATITUDE_REF,
    TAG_GPS_LATITUDE,
    TAG_GPS_LONGITUDE_REF,
    TAG_GPS_LONGITUDE,
];

/// TIFF field types.
pub const TYPE_ASCII: u16 = 2;
pub const TYPE_SHORT: u16 = 3;
pub const TYPE_LONG: u16 = 4;
pub const TYPE_RATIONAL: u16 = 5;

/// Size of one IFD entry in bytes.
pub const IFD_ENTRY_LEN: usize = 12;

/// Bytes per element for a TIFF field type; `None` for type codes the
/// decoder does not handle.
#[inline]
pub fn type_unit_size(field_type: u16) -> Option<usize> {
    match field_type {
        TYPE_ASCII => Some(1),
        TYPE_SHORT => Some(2),
        TYPE_LONG => Some(4),
        TYPE_RATIONAL => Some(8),
        _ => None,
    }
}
