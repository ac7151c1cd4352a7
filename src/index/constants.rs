/// Identifier version for encoding/decoding
pub const IDENTIFIER_VERSION: u8 = 1;

/// Longitude range [min, max] bisected by the encoder
pub const LON_BOUNDS: [f64; 2] = [-180.0, 180.0];

/// Latitude range [min, max] bisected by the encoder
pub const LAT_BOUNDS: [f64; 2] = [-90.0, 90.0];

/// Bisection iterations per axis when no depth is given
pub const DEFAULT_DEPTH: u32 = 32;

/// Deepest depth whose code fits in 64 bits (two bits per iteration)
pub const MAX_DEPTH: u32 = 32;

/// Geostring length when no precision is given, prefix character included
pub const DEFAULT_GEOSTRING_PRECISION: usize = 18;

/// Symbols for the four (longitude bit, latitude bit) combinations, indexed by `lon << 1 | lat`
pub(crate) const GEOSTRING_ALPHABET: [char; 4] = ['g', 'a', 't', 'c'];
