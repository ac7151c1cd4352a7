use crate::error::GeoboxError;
use crate::index::constants::IDENTIFIER_VERSION;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

const PAYLOAD_LEN: usize = 13;

/// Generates a textual identifier for a code at a given depth.
///
/// The identifier is a URL-safe Base64 string encoding a 14-byte binary structure.
///
/// # Binary Format
///
/// | Offset | Size | Field    | Description                                  |
/// |--------|------|----------|----------------------------------------------|
/// | 0      | 1    | Version  | Identifier format version (currently 1)      |
/// | 1      | 4    | Depth    | Bisection depth as big-endian `u32`          |
/// | 5      | 8    | Code     | Interleaved code as big-endian `i64`         |
/// | 13     | 1    | Checksum | Wrapping sum of bytes 0-12 for validation    |
///
/// # Example
/// ```
/// use geobox::generate_identifier;
///
/// let id = generate_identifier(32, -4195692029019287352);
/// assert_eq!(id.len(), 19);
/// ```
pub fn generate_identifier(depth: u32, code: i64) -> String {
    let mut binary_data = Vec::with_capacity(PAYLOAD_LEN + 1);
    binary_data.push(IDENTIFIER_VERSION);
    binary_data.extend_from_slice(&depth.to_be_bytes());
    binary_data.extend_from_slice(&code.to_be_bytes());

    let checksum: u8 = binary_data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    binary_data.push(checksum);

    URL_SAFE_NO_PAD.encode(&binary_data)
}

/// Decodes an identifier back to `(version, depth, code)`.
///
/// This recovers the code, not a coordinate.
///
/// # Errors
///
/// - [`GeoboxError::Base64DecodeError`] - Invalid Base64 encoding
/// - [`GeoboxError::InvalidIdentifierLength`] - Decoded data is not 14 bytes
/// - [`GeoboxError::InvalidChecksum`] - Checksum validation failed
/// - [`GeoboxError::UnsupportedVersion`] - Version byte doesn't match current version
pub fn decode_identifier(identifier: &str) -> Result<(u8, u32, i64), GeoboxError> {
    let binary_data = URL_SAFE_NO_PAD
        .decode(identifier)
        .map_err(|_| GeoboxError::Base64DecodeError)?;

    if binary_data.len() != PAYLOAD_LEN + 1 {
        return Err(GeoboxError::InvalidIdentifierLength);
    }

    let (data, checksum_bytes) = binary_data.split_at(PAYLOAD_LEN);
    let checksum = checksum_bytes[0];

    let calculated_checksum: u8 = data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    if calculated_checksum != checksum {
        return Err(GeoboxError::InvalidChecksum);
    }

    let version = data[0];
    if version != IDENTIFIER_VERSION {
        return Err(GeoboxError::UnsupportedVersion(version));
    }

    let depth_bytes: [u8; 4] = data[1..5]
        .try_into()
        .map_err(|_| GeoboxError::InvalidIdentifierLength)?;
    let code_bytes: [u8; 8] = data[5..13]
        .try_into()
        .map_err(|_| GeoboxError::InvalidIdentifierLength)?;

    Ok((
        version,
        u32::from_be_bytes(depth_bytes),
        i64::from_be_bytes(code_bytes),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_decode_identifier() -> Result<(), GeoboxError> {
        let id = generate_identifier(32, -4195692029019287352);
        let (version, depth, code) = decode_identifier(&id)?;

        assert_eq!(version, IDENTIFIER_VERSION);
        assert_eq!(depth, 32);
        assert_eq!(code, -4195692029019287352);
        Ok(())
    }

    #[test]
    fn test_invalid_identifier() {
        assert_eq!(
            decode_identifier("not base64!"),
            Err(GeoboxError::Base64DecodeError)
        );
        assert_eq!(
            decode_identifier("AQID"),
            Err(GeoboxError::InvalidIdentifierLength)
        );
    }

    #[test]
    fn test_tampered_checksum() {
        let mut bytes = URL_SAFE_NO_PAD
            .decode(generate_identifier(12, 197))
            .unwrap_or_default();
        bytes[13] = bytes[13].wrapping_add(1);

        let tampered = URL_SAFE_NO_PAD.encode(&bytes);
        assert_eq!(
            decode_identifier(&tampered),
            Err(GeoboxError::InvalidChecksum)
        );
    }

    #[test]
    fn test_unsupported_version() {
        let mut bytes = vec![9u8];
        bytes.extend_from_slice(&4u32.to_be_bytes());
        bytes.extend_from_slice(&197i64.to_be_bytes());
        let checksum = bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
        bytes.push(checksum);

        assert_eq!(
            decode_identifier(&URL_SAFE_NO_PAD.encode(&bytes)),
            Err(GeoboxError::UnsupportedVersion(9))
        );
    }
}
