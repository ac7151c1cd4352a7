pub mod constants;
mod geostring;
mod identifier;
mod indexing;

pub use constants::{
    DEFAULT_DEPTH, DEFAULT_GEOSTRING_PRECISION, IDENTIFIER_VERSION, LAT_BOUNDS, LON_BOUNDS,
    MAX_DEPTH,
};
pub use geostring::encode_geostring;
pub use identifier::{decode_identifier, generate_identifier};
pub use indexing::{Bisection, Encoding, bisect, compute_code, encode_cell};
