//! Codec for the delta/varint coordinate compression used by routing
//! providers for their `overview_polyline` field. Coordinates are scaled
//! to 1e-5 degrees, delta-encoded against the previous point, and packed
//! into printable 5-bit chunks offset by 63.

use shared::Coordinate;

const PRECISION: f64 = 1e5;
const CHUNK_BITS: u32 = 5;
const CHUNK_MASK: u64 = 0x1f;
const CONTINUATION_BIT: u64 = 0x20;
const CHUNK_OFFSET: u8 = 63;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PolylineError {
    #[error("byte {byte:#04x} at offset {offset} is outside the encoding range")]
    InvalidByte { byte: u8, offset: usize },
    #[error("encoded value truncated at end of input")]
    UnexpectedEnd,
    #[error("encoded value at offset {0} is too long")]
    ValueTooLong(usize),
}

pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut coords = Vec::new();
    let mut pos = 0;
    let mut lat = 0i64;
    let mut lon = 0i64;

    while pos < bytes.len() {
        lat += next_value(bytes, &mut pos)?;
        lon += next_value(bytes, &mut pos)?;
        coords.push(Coordinate {
            lat: lat as f64 / PRECISION,
            lon: lon as f64 / PRECISION,
        });
    }

    Ok(coords)
}

pub fn encode(path: &[Coordinate]) -> String {
    let mut out = String::new();
    let mut prev_lat = 0i64;
    let mut prev_lon = 0i64;

    for coord in path {
        let lat = (coord.lat * PRECISION).round() as i64;
        let lon = (coord.lon * PRECISION).round() as i64;
        push_value(lat - prev_lat, &mut out);
        push_value(lon - prev_lon, &mut out);
        prev_lat = lat;
        prev_lon = lon;
    }

    out
}

fn next_value(bytes: &[u8], pos: &mut usize) -> Result<i64, PolylineError> {
    let start = *pos;
    let mut result: u64 = 0;
    let mut shift = 0u32;

    loop {
        let byte = *bytes.get(*pos).ok_or(PolylineError::UnexpectedEnd)?;
        let chunk = byte
            .checked_sub(CHUNK_OFFSET)
            .ok_or(PolylineError::InvalidByte {
                byte,
                offset: *pos,
            })? as u64;
        if shift >= u64::BITS {
            return Err(PolylineError::ValueTooLong(start));
        }
        *pos += 1;
        result |= (chunk & CHUNK_MASK) << shift;
        shift += CHUNK_BITS;
        if chunk & CONTINUATION_BIT == 0 {
            break;
        }
    }

    // The low bit carries the sign; the remaining bits the magnitude.
    let value = if result & 1 != 0 {
        !(result >> 1) as i64
    } else {
        (result >> 1) as i64
    };
    Ok(value)
}

fn push_value(value: i64, out: &mut String) {
    let mut v = (value << 1) as u64;
    if value < 0 {
        v = !v;
    }
    loop {
        let mut chunk = v & CHUNK_MASK;
        v >>= CHUNK_BITS;
        if v > 0 {
            chunk |= CONTINUATION_BIT;
        }
        out.push((chunk as u8 + CHUNK_OFFSET) as char);
        if v == 0 {
            break;
        }
    }
}
