//! Encoder and decoder for the Encoded Polyline Algorithm Format.
//!
//! Coordinates are scaled to five decimal places (1e5), delta-encoded
//! against the previous point, zig-zag transformed, and emitted as 5-bit
//! groups offset into the printable ASCII range. Output is byte-for-byte
//! compatible with Google Maps and other implementations of the format.

use tracing::trace;

use crate::error::MalformedPolylineError;

/// Scale factor giving five decimal places (~1.1 m at the equator).
const SCALE: f64 = 1e5;

/// Continuation bit marking that more 5-bit groups follow.
const CONTINUATION: u64 = 0x20;

/// Offset keeping every emitted byte printable (range 63..=126).
const OFFSET: u8 = 63;

/// Encodes a sequence of (latitude, longitude) points into a polyline string.
///
/// Points are taken in order; an empty slice yields an empty string.
/// Out-of-range or duplicate coordinates are encoded mechanically, the
/// codec does not validate geographic bounds.
pub fn encode(points: &[(f64, f64)]) -> String {
    let mut out = String::new();
    let mut prev_lat = 0i64;
    let mut prev_lng = 0i64;

    for &(lat, lng) in points {
        let scaled_lat = (lat * SCALE).round() as i64;
        let scaled_lng = (lng * SCALE).round() as i64;

        encode_value(scaled_lat - prev_lat, &mut out);
        encode_value(scaled_lng - prev_lng, &mut out);

        prev_lat = scaled_lat;
        prev_lng = scaled_lng;
    }

    trace!(points = points.len(), bytes = out.len(), "encoded polyline");
    out
}

/// Decodes a polyline string back into (latitude, longitude) points,
/// each component rounded to five decimal places.
///
/// An empty string yields an empty vector. Input that ends inside a
/// continuation chain, ends between the latitude and longitude of a pair,
/// or contains bytes the format never emits is rejected.
pub fn decode(encoded: &str) -> Result<Vec<(f64, f64)>, MalformedPolylineError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut cursor = 0usize;
    let mut lat = 0i64;
    let mut lng = 0i64;

    while cursor < bytes.len() {
        lat += decode_value(bytes, &mut cursor)?;
        lng += decode_value(bytes, &mut cursor)?;
        points.push((lat as f64 / SCALE, lng as f64 / SCALE));
    }

    trace!(points = points.len(), "decoded polyline");
    Ok(points)
}

/// Appends one zig-zag, variable-length encoded delta to the output.
fn encode_value(delta: i64, out: &mut String) {
    // Zig-zag: the sign moves into the low bit so small magnitudes of
    // either sign stay small.
    let mut value = (if delta < 0 { !(delta << 1) } else { delta << 1 }) as u64;

    while value >= CONTINUATION {
        out.push(((CONTINUATION | (value & 0x1F)) as u8 + OFFSET) as char);
        value >>= 5;
    }
    out.push((value as u8 + OFFSET) as char);
}

/// Reads one variable-length delta starting at the cursor, advancing it
/// past the consumed bytes.
fn decode_value(bytes: &[u8], cursor: &mut usize) -> Result<i64, MalformedPolylineError> {
    let mut result = 0u64;
    let mut shift = 0u32;

    loop {
        let Some(&byte) = bytes.get(*cursor) else {
            return Err(MalformedPolylineError::UnexpectedEof { offset: *cursor });
        };
        if !(OFFSET..=OFFSET + 63).contains(&byte) {
            return Err(MalformedPolylineError::InvalidByte {
                offset: *cursor,
                byte,
            });
        }
        if shift >= u64::BITS {
            return Err(MalformedPolylineError::OverlongChain { offset: *cursor });
        }
        *cursor += 1;

        let chunk = (byte - OFFSET) as u64;
        result |= (chunk & 0x1F) << shift;
        shift += 5;

        if chunk & CONTINUATION == 0 {
            break;
        }
    }

    // The accumulator is unsigned while the groups are OR-ed together;
    // only the final zig-zag undo applies the signed interpretation.
    if result & 1 == 1 {
        Ok(!((result >> 1) as i64))
    } else {
        Ok((result >> 1) as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Published example from the algorithm's reference documentation.
    const REFERENCE_POINTS: [(f64, f64); 3] =
        [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];
    const REFERENCE_ENCODED: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    #[test]
    fn test_encode_reference_vector() {
        assert_eq!(encode(&REFERENCE_POINTS), REFERENCE_ENCODED);
    }

    #[test]
    fn test_decode_reference_vector() {
        let points = decode(REFERENCE_ENCODED).unwrap();
        assert_eq!(points, REFERENCE_POINTS.to_vec());
    }

    #[test]
    fn test_empty_sequence() {
        assert_eq!(encode(&[]), "");
        assert_eq!(decode("").unwrap(), Vec::<(f64, f64)>::new());
    }

    #[test]
    fn test_origin_point() {
        // Two zero deltas, each a single chunk of value 0.
        assert_eq!(encode(&[(0.0, 0.0)]), "??");
        assert_eq!(decode("??").unwrap(), vec![(0.0, 0.0)]);
    }

    #[test]
    fn test_negative_deltas_round_trip() {
        let points = vec![(10.0, 10.0), (9.0, 9.0)];
        assert_eq!(decode(&encode(&points)).unwrap(), points);
    }

    #[test]
    fn test_multi_chunk_delta_round_trip() {
        // Scaled delta of 1,000,000 spans several 5-bit groups.
        let points = vec![(0.0, 0.0), (10.0, 10.0)];
        assert_eq!(decode(&encode(&points)).unwrap(), points);
    }

    #[test]
    fn test_out_of_range_coordinates_accepted() {
        let points = vec![(123.456, -200.0), (95.0, 181.5)];
        assert_eq!(decode(&encode(&points)).unwrap(), points);
    }

    #[test]
    fn test_unterminated_chain_rejected() {
        // '_' has the continuation bit set, so the chain never ends.
        assert_eq!(
            decode("_"),
            Err(MalformedPolylineError::UnexpectedEof { offset: 1 })
        );
    }

    #[test]
    fn test_dangling_latitude_rejected() {
        // One complete delta, then nothing left for the longitude.
        assert_eq!(
            decode("?"),
            Err(MalformedPolylineError::UnexpectedEof { offset: 1 })
        );
    }

    #[test]
    fn test_invalid_byte_rejected() {
        assert_eq!(
            decode("?? ??"),
            Err(MalformedPolylineError::InvalidByte {
                offset: 2,
                byte: b' '
            })
        );
    }

    #[test]
    fn test_overlong_chain_rejected() {
        // Thirteen continuation groups exhaust a 64-bit accumulator.
        let overlong = "_".repeat(13) + "?";
        assert_eq!(
            decode(&overlong),
            Err(MalformedPolylineError::OverlongChain { offset: 13 })
        );
    }
}
