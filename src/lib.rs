//! # exifgraft
//!
//! Library to parse the marker/segment structure of a JPEG byte stream,
//! extract Exif metadata (camera make/model, artist, copyright,
//! orientation, GPS position) from the embedded TIFF block, and graft the
//! metadata segments of one JPEG onto another while leaving the
//! destination's compressed pixel data untouched.
//!
//! Everything is buffer-in/buffer-out: callers hand in `&[u8]` (from a file
//! read, an upload, an mmap) and get plain values or a fresh `Vec<u8>`
//! back. The crate performs no I/O and keeps no global state, so calls may
//! run concurrently on separate buffers without coordination.
//!
//! Malformed input is the common case for camera files and never raises:
//! [`scan`] fails closed with `valid = false`, [`decode_exif`] returns an
//! all-absent [`ExifData`], and [`splice_markers`] falls back to returning
//! the destination bytes unchanged. The one real failure mode,
//! [`Error::OutOfRange`], is surfaced only by the low-level [`ByteCursor`]
//! API.
//!
//! ## Example
//!
//! ```no_run
//! use exifgraft::{decode_exif, splice_markers};
//!
//! let stamped = std::fs::read("with_gps.jpg").unwrap();
//! let exif = decode_exif(&stamped, None);
//! if exif.has_gps_location {
//!     println!("taken at {}, {}", exif.latitude, exif.longitude);
//! }
//!
//! // Re-stamp a stripped copy with the original's metadata.
//! let stripped = std::fs::read("stripped.jpg").unwrap();
//! let restamped = splice_markers(&stamped, &stripped, None);
//! ```

mod cursor;
mod error;
pub mod exif;
pub mod jpeg;

pub use cursor::{ByteCursor, Endian};
pub use error::Error;
pub use exif::{decode_exif, gps_to_degree, ref_to_sign, ExifData};
pub use jpeg::{scan, splice_markers, Marker, MarkerTable};

/// Detect whether `data` starts with the JPEG start-of-image signature.
/// Cheap content sniffing for callers routing mixed files.
#[inline]
pub fn is_jpeg(data: &[u8]) -> bool {
    data.len() >= 2 && data[0] == 0xFF && data[1] == 0xD8
}
