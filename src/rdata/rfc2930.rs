//! Record data from [RFC 2930]: TKEY records.
//!
//! [RFC 2930]: https://tools.ietf.org/html/rfc2930

use super::rfc2535::Timestamp;
use super::rfc2845::{clamp_blob, compose_blob, display_error, read_clamped};
use crate::base::cursor::Cursor;
use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::rdata::{reread_rdlen, RecordData};
use crate::base::wire::Compose;
use crate::utils::base64;
use bytes::{BufMut, Bytes};
use core::fmt;

//------------ Tkey ----------------------------------------------------------

/// Tkey record data.
///
/// Tkey records are used to establish shared secret keys between resolvers
/// and servers. Key and other data are length-prefixed blobs.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Tkey {
    algorithm: Name,
    inception: Timestamp,
    expiration: Timestamp,
    mode: u16,
    error: u16,
    key: Bytes,
    other: Bytes,
}

impl Tkey {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::TKEY;

    /// Creates new Tkey record data.
    pub fn new(
        algorithm: Name,
        inception: Timestamp,
        expiration: Timestamp,
        mode: u16,
        error: u16,
        key: Bytes,
        other: Bytes,
    ) -> Self {
        Tkey {
            algorithm,
            inception,
            expiration,
            mode,
            error,
            key: clamp_blob(key),
            other: clamp_blob(other),
        }
    }

    /// Returns the key algorithm name.
    pub fn algorithm(&self) -> &Name {
        &self.algorithm
    }

    /// Returns the start of the key’s validity.
    pub fn inception(&self) -> Timestamp {
        self.inception
    }

    /// Returns the end of the key’s validity.
    pub fn expiration(&self) -> Timestamp {
        self.expiration
    }

    /// The key agreement mode, e.g., 3 for Diffie-Hellman exchange.
    pub fn mode(&self) -> u16 {
        self.mode
    }

    /// Returns the error code.
    pub fn error(&self) -> u16 {
        self.error
    }

    /// Returns the key data.
    pub fn key(&self) -> &Bytes {
        &self.key
    }

    /// Returns the other data.
    pub fn other(&self) -> &Bytes {
        &self.other
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let end = cursor.pos() + reread_rdlen(cursor);
        let algorithm = cursor.read_name();
        let inception = Timestamp::read(cursor);
        let expiration = Timestamp::read(cursor);
        let mode = cursor.read_u16();
        let error = cursor.read_u16();
        let key = read_clamped(cursor, end);
        let other = read_clamped(cursor, end);
        Tkey::new(algorithm, inception, expiration, mode, error, key, other)
    }
}

impl RecordData for Tkey {
    fn rtype(&self) -> Rtype {
        Tkey::RTYPE
    }
}

impl Compose for Tkey {
    fn compose_len(&self) -> usize {
        self.algorithm.compose_len() + 16 + self.key.len() + self.other.len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.algorithm.compose(target);
        self.inception.compose(target);
        self.expiration.compose(target);
        self.mode.compose(target);
        self.error.compose(target);
        compose_blob(&self.key, target);
        compose_blob(&self.other, target);
    }
}

impl fmt::Display for Tkey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} ",
            self.algorithm, self.inception, self.expiration, self.mode
        )?;
        display_error(self.error, f)?;
        f.write_str(" ")?;
        base64::display(&self.key, f)?;
        if !self.other.is_empty() {
            f.write_str(" ")?;
            base64::display(&self.other, f)?;
        }
        Ok(())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::rdata_cursor;

    #[test]
    fn compose_parse_display() {
        let tkey = Tkey::new(
            "gss-tsig".parse().unwrap(),
            Timestamp::from_int(1704024000),
            Timestamp::from_int(1704110400),
            3,
            0,
            Bytes::from_static(b"foobar"),
            Bytes::new(),
        );
        let mut buf = Vec::new();
        tkey.compose(&mut buf);
        assert_eq!(buf.len(), tkey.compose_len());
        let mut cursor = rdata_cursor(&buf);
        assert_eq!(Tkey::parse(&mut cursor), tkey);
        assert!(cursor.check().is_ok());
        assert_eq!(
            tkey.to_string(),
            "gss-tsig. 20231231120000 20240101120000 3 NOERROR Zm9vYmFy"
        );
    }

    #[test]
    fn long_key_is_cut_to_length_field() {
        let tkey = Tkey::new(
            "gss-tsig".parse().unwrap(),
            Timestamp::from_int(1704024000),
            Timestamp::from_int(1704110400),
            3,
            0,
            Bytes::from(vec![0; 70000]),
            Bytes::new(),
        );
        assert_eq!(tkey.key().len(), usize::from(u16::MAX));
        let mut buf = Vec::new();
        tkey.compose(&mut buf);
        assert_eq!(buf.len(), tkey.compose_len());
    }
}
