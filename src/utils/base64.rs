//! Encoding of Base 64.
//!
//! Keys, signatures and certificates in record data are presented in the
//! standard Base 64 alphabet of [RFC 4648] with padding. The actual work
//! is done by the `base64` crate.
//!
//! [RFC 4648]: https://tools.ietf.org/html/rfc4648

use ::base64::engine::general_purpose::STANDARD;
use ::base64::Engine;
use core::fmt;

/// Encodes binary data in Base 64 and writes it into a format stream.
pub fn display<Octets, Target>(octets: &Octets, f: &mut Target) -> fmt::Result
where
    Octets: AsRef<[u8]> + ?Sized,
    Target: fmt::Write,
{
    f.write_str(&encode_string(octets))
}

/// Encodes binary data in Base 64 and returns the encoded data as a string.
pub fn encode_string<B: AsRef<[u8]> + ?Sized>(bytes: &B) -> String {
    STANDARD.encode(bytes.as_ref())
}

/// Decodes a string with Base 64 encoded data.
pub fn decode_vec(s: &str) -> Result<Vec<u8>, DecodeError> {
    STANDARD.decode(s).map_err(|_| DecodeError)
}

//------------ DecodeError ---------------------------------------------------

/// A Base 64 string could not be decoded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecodeError;

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("invalid Base 64 data")
    }
}

impl std::error::Error for DecodeError {}

//============ Test ==========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn encode_and_decode() {
        assert_eq!(encode_string(b"foobar"), "Zm9vYmFy");
        assert_eq!(encode_string(b"fo"), "Zm8=");
        assert_eq!(decode_vec("Zm9vYg==").unwrap(), b"foob");
        assert_eq!(decode_vec("Zm9v!"), Err(DecodeError));
    }
}
