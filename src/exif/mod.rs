//! Exif metadata extraction from the APP1/TIFF block of a JPEG.
//!
//! Decodes six IFD0 tags (make, model, artist, copyright, orientation, the
//! GPSInfo pointer) and the four GPSInfo position tags; every other tag is
//! skipped. Only the minimal TIFF layout typical cameras write is accepted.

mod decoder;
mod gps;
pub mod tags;

pub use decoder::{decode_exif, ExifData};
pub use gps::{gps_to_degree, ref_to_sign};
