//! JPEG segment structure: marker scanning and metadata grafting.
//!
//! Follows the ITU T.81 marker grammar far enough to locate header segment
//! boundaries; entropy-coded scan data after SOS is never parsed or
//! re-encoded.

mod markers;
mod scanner;
mod splice;

pub use markers::{
    is_app_marker, is_header_marker, segment_bytes, Marker, MarkerTable, APP0, APP1, COM, SOI, SOS,
    TEM,
};
pub use scanner::{scan, MAX_SCAN_BYTES};
pub use splice::splice_markers;
