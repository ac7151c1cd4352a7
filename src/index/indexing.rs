use crate::index::constants::{LAT_BOUNDS, LON_BOUNDS};
use geo_types::{Rect, coord};

/// Outcome of halving one axis range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bisection {
    /// `true` when the position lies strictly above the midpoint
    pub bit: bool,
    /// Lower bound of the half that was kept
    pub lower: f64,
    /// Upper bound of the half that was kept
    pub upper: f64,
}

/// Halves `[lower, upper]` and keeps the half containing `position`.
///
/// A position exactly on the midpoint takes the lower half.
#[inline]
pub fn bisect(position: f64, lower: f64, upper: f64) -> Bisection {
    let mid = (lower + upper) / 2.0;
    if position > mid {
        Bisection {
            bit: true,
            lower: mid,
            upper,
        }
    } else {
        Bisection {
            bit: false,
            lower,
            upper: mid,
        }
    }
}

/// A code together with the cell its final bisection step left behind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Encoding {
    pub code: i64,
    /// Longitude on x, latitude on y
    pub bounds: Rect<f64>,
}

/// Bit position of the longitude bit emitted at `iteration`; the latitude bit sits one below.
///
/// Shift amounts are taken modulo 64 by the caller, so the truncation to `u32` is harmless.
fn interleave_position(depth: u32, iteration: u32) -> u32 {
    (u64::from(depth - iteration) * 2 - 1) as u32
}

/// Encodes a coordinate by bisecting both axes `depth` times and interleaving the bits.
///
/// The first iteration lands on the highest positions, so at depth 32 the first
/// longitude bit is bit 63 and codes east of the prime meridian are negative.
/// No input is rejected: depths above 32 wrap their shifts and additions, and a
/// depth of 0 performs no iterations.
pub fn encode_cell(longitude: f64, latitude: f64, depth: u32) -> Encoding {
    let (mut lon_low, mut lon_high) = (LON_BOUNDS[0], LON_BOUNDS[1]);
    let (mut lat_low, mut lat_high) = (LAT_BOUNDS[0], LAT_BOUNDS[1]);
    let mut code: i64 = 0;

    for iteration in 0..depth {
        let lon = bisect(longitude, lon_low, lon_high);
        lon_low = lon.lower;
        lon_high = lon.upper;

        let lat = bisect(latitude, lat_low, lat_high);
        lat_low = lat.lower;
        lat_high = lat.upper;

        let position = interleave_position(depth, iteration);
        if lon.bit {
            code = code.wrapping_add(1i64.wrapping_shl(position));
        }
        if lat.bit {
            code = code.wrapping_add(1i64.wrapping_shl(position - 1));
        }
    }

    Encoding {
        code,
        bounds: Rect::new(
            coord! { x: lon_low, y: lat_low },
            coord! { x: lon_high, y: lat_high },
        ),
    }
}

/// Computes the interleaved code for a longitude/latitude pair.
///
/// # Example
/// ```
/// use geobox::compute_code;
///
/// let code = compute_code(12.481563961993402, 41.87643118161227, 32);
/// assert_eq!(code, -4195692029019287352);
/// ```
pub fn compute_code(longitude: f64, latitude: f64, depth: u32) -> i64 {
    encode_cell(longitude, latitude, depth).code
}
