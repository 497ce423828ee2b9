//! Marker splicer: reassemble a JPEG byte stream from two marker tables,
//! taking metadata segments from a source image and pixel data from a
//! destination image.

use log::debug;

use crate::jpeg::markers::{segment_bytes, MarkerTable, APP0};
use crate::jpeg::scanner::scan;

/// Graft the source's application markers onto the destination image.
///
/// The output is: destination SOI, destination JFIF (APP0) if present, all
/// of the source's APPn/COM markers in scan order, the destination's
/// remaining header markers in scan order, then the destination's scan
/// data verbatim. Pixel data is never re-encoded.
///
/// Total, never errors: when the source table is invalid or carries no
/// application markers, or the destination fails to scan, the destination
/// bytes are returned unchanged.
///
/// Pass `source_table` when the source was already scanned; `None` scans it
/// here. The destination is always scanned fresh.
pub fn splice_markers(source: &[u8], dest: &[u8], source_table: Option<&MarkerTable>) -> Vec<u8> {
    let scanned;
    let src = match source_table {
        Some(table) => table,
        None => {
            scanned = scan(source);
            &scanned
        }
    };
    let dst = scan(dest);

    if !src.valid || src.app_markers.is_empty() || !dst.valid {
        debug!(
            "splice fallback: source valid={} app={} dest valid={}",
            src.valid,
            src.app_markers.len(),
            dst.valid
        );
        return dest.to_vec();
    }

    // The destination's JFIF header leads the output and must not repeat
    // when the remaining "other" markers are written.
    let jfif_idx = dst.other_markers.iter().position(|m| m.code == APP0);

    let app_bytes: usize = src.app_markers.iter().map(|m| m.total_len()).sum();
    let mut out = Vec::with_capacity(dest.len() + app_bytes);
    out.extend_from_slice(&dest[..2]);
    if let Some(i) = jfif_idx {
        out.extend_from_slice(segment_bytes(dest, &dst.other_markers[i]));
    }
    for marker in &src.app_markers {
        out.extend_from_slice(segment_bytes(source, marker));
    }
    for (i, marker) in dst.other_markers.iter().enumerate() {
        if Some(i) == jfif_idx {
            continue;
        }
        out.extend_from_slice(segment_bytes(dest, marker));
    }
    out.extend_from_slice(&dest[dst.scan_start..]);
    out
}
