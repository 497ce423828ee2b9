//! JPEG marker codes and the per-image marker table.

/// Start of image.
pub const SOI: u16 = 0xFFD8;
/// Start of scan; entropy-coded pixel data follows.
pub const SOS: u16 = 0xFFDA;
/// JFIF application segment.
pub const APP0: u16 = 0xFFE0;
/// Exif application segment.
pub const APP1: u16 = 0xFFE1;
/// Comment segment.
pub const COM: u16 = 0xFFFE;
/// Temporary private use marker.
pub const TEM: u16 = 0xFF01;

/// Application marker for grafting purposes: APP1..APP15 plus COM.
///
/// APP0 (JFIF) deliberately classifies as an "other" marker so the splicer
/// can keep the destination's JFIF header instead of the source's.
#[inline]
pub fn is_app_marker(code: u16) -> bool {
    (0xFFE1..=0xFFEF).contains(&code) || code == COM
}

/// Header segment codes the scanner recognizes: APP0-APP15, the SOF family
/// (incl. DHT, JPG, DAC), DQT, DNL, DRI, DHP, EXP, RST0-7, JPG0-13, COM,
/// and TEM. All of them carry a big-endian length field that includes
/// itself. SOI, EOI, and SOS are handled separately by the scanner.
#[inline]
pub fn is_header_marker(code: u16) -> bool {
    matches!(code,
        0xFFE0..=0xFFEF     // APP0-APP15
        | 0xFFC0..=0xFFCF   // SOF0-SOF15 family, DHT, JPG, DAC
        | 0xFFDB..=0xFFDF   // DQT, DNL, DRI, DHP, EXP
        | 0xFFD0..=0xFFD7   // RST0-7
        | 0xFFF0..=0xFFFD   // JPG0-13
        | COM
        | TEM)
}

/// One header segment: a 2-byte code at `offset` followed by a declared
/// `length` that covers the 2-byte length field and the payload, but not
/// the code itself.
///
/// Every marker emitted by the scanner satisfies
/// `offset + 2 + length as usize <= buffer.len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Marker {
    pub code: u16,
    pub offset: usize,
    pub length: u16,
}

impl Marker {
    /// Total segment size in bytes: code, length field, payload.
    #[inline]
    pub fn total_len(&self) -> usize {
        2 + self.length as usize
    }

    /// Offset one past the end of the segment.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.total_len()
    }
}

/// The full segment bytes (code + length field + payload) for a marker
/// recorded from `data`. In bounds by the [`Marker`] invariant.
#[inline]
pub fn segment_bytes<'a>(data: &'a [u8], marker: &Marker) -> &'a [u8] {
    &data[marker.offset..marker.end()]
}

/// Segment inventory of one JPEG buffer, produced by [`scan`](super::scan).
///
/// `valid` is true only when both the SOI signature and an SOS marker were
/// seen inside the scan window. Built fresh per call and never mutated
/// afterwards.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MarkerTable {
    pub valid: bool,
    /// Position of the SOS code; scan data runs from here to the end.
    pub scan_start: usize,
    /// APP1-APP15 and COM segments, in scan order.
    pub app_markers: Vec<Marker>,
    /// Every other recognized header segment (incl. APP0/JFIF), in scan order.
    pub other_markers: Vec<Marker>,
}
