use crate::index::constants::{GEOSTRING_ALPHABET, LAT_BOUNDS, LON_BOUNDS};
use crate::index::indexing::bisect;

/// Renders a coordinate as a hemisphere-prefixed alphabet string.
///
/// The first character picks the hemisphere: `w` bisects longitude within
/// [-180, 0], `e` within [0, 180]. Every following character carries one
/// longitude and one latitude bisection step, mapped through `g`, `a`, `t`, `c`
/// (`lon_bit << 1 | lat_bit`). Strings sharing a prefix share a cell, and
/// `precision` counts the prefix character.
///
/// # Example
/// ```
/// use geobox::encode_geostring;
///
/// let s = encode_geostring(12.481563961993402, 41.87643118161227, 18);
/// assert_eq!(s, "eagacagacctggaaaga");
/// ```
pub fn encode_geostring(longitude: f64, latitude: f64, precision: usize) -> String {
    let mut out = String::with_capacity(precision.clamp(1, 64));

    let (mut lon_low, mut lon_high) = if longitude < 0.0 {
        out.push('w');
        (LON_BOUNDS[0], 0.0)
    } else {
        out.push('e');
        (0.0, LON_BOUNDS[1])
    };
    let (mut lat_low, mut lat_high) = (LAT_BOUNDS[0], LAT_BOUNDS[1]);

    for _ in 1..precision {
        let lon = bisect(longitude, lon_low, lon_high);
        lon_low = lon.lower;
        lon_high = lon.upper;

        let lat = bisect(latitude, lat_low, lat_high);
        lat_low = lat.lower;
        lat_high = lat.upper;

        let symbol = (usize::from(lon.bit) << 1) | usize::from(lat.bit);
        out.push(GEOSTRING_ALPHABET[symbol]);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::constants::DEFAULT_GEOSTRING_PRECISION;

    #[test]
    fn test_known_landmarks() {
        let cases = [
            ((12.481563961993402, 41.87643118161227), "eagacagacctggaaaga"),
            ((2.335861599932855, 48.86102675689321), "eaagggatcgcacaataa"),
            ((0.0, 51.48), "eaaggaggaggaagaaag"),
        ];

        for ((lon, lat), expected) in cases {
            assert_eq!(
                encode_geostring(lon, lat, DEFAULT_GEOSTRING_PRECISION),
                expected
            );
        }
    }

    #[test]
    fn test_western_hemisphere_prefix() {
        assert_eq!(encode_geostring(-151.2093, -33.8688, 8), "wgatgcaa");
    }

    #[test]
    fn test_precision_truncates() {
        let full = encode_geostring(12.481563961993402, 41.87643118161227, 18);
        let short = encode_geostring(12.481563961993402, 41.87643118161227, 6);

        assert_eq!(short, "eagaca");
        assert!(full.starts_with(&short));
    }

    #[test]
    fn test_long_precision_grows_past_capacity_hint() {
        let long = encode_geostring(12.481563961993402, 41.87643118161227, 200);

        assert_eq!(long.len(), 200);
        assert!(long.starts_with("eagacagacctggaaaga"));
    }

    #[test]
    fn test_precision_below_two_is_prefix_only() {
        assert_eq!(encode_geostring(10.0, 10.0, 0), "e");
        assert_eq!(encode_geostring(-10.0, 10.0, 1), "w");
    }
}
