//! GPS coordinate resolution: degree/minute/second rational triples plus a
//! hemisphere letter into signed decimal degrees.
//!
//! Malformed geodetic input is a normal outcome for camera files, so every
//! failure path here is a recoverable `None`, never an error.

/// Map a hemisphere reference letter to a coordinate sign: "N"/"E" are
/// positive, "S"/"W" negative, case-insensitive. Anything else means the
/// reference is unusable.
pub fn ref_to_sign(reference: &str) -> Option<f64> {
    match reference.to_ascii_uppercase().as_str() {
        "N" | "E" => Some(1.0),
        "S" | "W" => Some(-1.0),
        _ => None,
    }
}

/// One "numerator/denominator" part as a float.
fn rational_to_float(rational: &str) -> Option<f64> {
    let (numerator, denominator) = rational.split_once('/')?;
    let numerator: f64 = numerator.trim().parse().ok()?;
    let denominator: f64 = denominator.trim().parse().ok()?;
    Some(numerator / denominator)
}

/// Convert a `"deg/1 min/1 sec/1"` triple and a sign from [`ref_to_sign`]
/// into decimal degrees, rounded half-away-from-zero to six places.
///
/// Returns `None` when the string does not split into exactly three
/// rational parts, any part fails to parse, or the arithmetic produces a
/// non-finite value (zero denominators included).
pub fn gps_to_degree(rational: &str, sign: f64) -> Option<f64> {
    let parts: Vec<&str> = rational.split(' ').collect();
    if parts.len() != 3 {
        return None;
    }

    let degrees = rational_to_float(parts[0])?;
    let minutes = rational_to_float(parts[1])?;
    let seconds = rational_to_float(parts[2])?;

    let degree = (degrees + minutes / 60.0 + seconds / 3600.0) * sign;
    if !degree.is_finite() {
        return None;
    }
    Some((degree * 1e6).round() / 1e6)
}
