//! JPEG marker scanner: walks header segment boundaries without decoding
//! pixel data.

use log::debug;

use crate::cursor::{ByteCursor, Endian};
use crate::jpeg::markers::{is_app_marker, is_header_marker, Marker, MarkerTable, SOI, SOS};

/// Scan window cap. Bounds pathological input that never reaches SOS.
pub const MAX_SCAN_BYTES: usize = 2 * 1024 * 1024;

/// Walk the header segments of a JPEG buffer and build its [`MarkerTable`].
///
/// Fails closed, never errors: a buffer that does not start with the SOI
/// signature yields `valid = false` with empty marker lists. The scan also
/// turns invalid (keeping whatever was collected) when a segment declares a
/// length below 2 or past the end of the buffer, when an unrecognized
/// marker code appears before SOS, or when the scan cap is reached without
/// finding SOS. A segment that would overrun the buffer is never emitted,
/// so every marker in the table is safe to slice.
pub fn scan(data: &[u8]) -> MarkerTable {
    let mut table = MarkerTable::default();
    let mut cur = ByteCursor::new(data);

    if cur.read_u16(Endian::Big) != Ok(SOI) {
        return table;
    }

    let cap = data.len().min(MAX_SCAN_BYTES);
    while cur.tell() < cap {
        let Ok(code) = cur.read_u16(Endian::Big) else {
            break;
        };

        // SOS means the header is done and scan data begins.
        if code == SOS {
            table.scan_start = cur.tell() - 2;
            table.valid = true;
            break;
        }

        if !is_header_marker(code) {
            // The segment chain is broken; nothing after this point can be
            // located reliably.
            debug!("unrecognized marker 0x{:04X} at offset {}", code, cur.tell() - 2);
            break;
        }

        let offset = cur.tell() - 2;
        let Ok(length) = cur.read_u16(Endian::Big) else {
            break;
        };
        if length < 2 || offset + 2 + length as usize > data.len() {
            debug!(
                "segment 0x{:04X} at offset {} declares length {} past the buffer end",
                code, offset, length
            );
            break;
        }

        let marker = Marker {
            code,
            offset,
            length,
        };
        if is_app_marker(code) {
            table.app_markers.push(marker);
        } else {
            table.other_markers.push(marker);
        }
        cur.seek(offset + 2 + length as usize);
    }

    debug!(
        "scan: valid={} app={} other={} scan_start={}",
        table.valid,
        table.app_markers.len(),
        table.other_markers.len(),
        table.scan_start
    );
    table
}
