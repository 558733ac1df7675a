//! Record data from [RFC 4034]: DS records.
//!
//! Only the delegation signer is implemented. The other DNSSEC record types
//! of this RFC are kept as raw data.
//!
//! [RFC 4034]: https://tools.ietf.org/html/rfc4034

use crate::base::cursor::Cursor;
use crate::base::iana::Rtype;
use crate::base::rdata::{read_remaining, reread_rdlen, RecordData};
use crate::base::wire::Compose;
use crate::utils::base16;
use bytes::{BufMut, Bytes};
use core::fmt;

//------------ Ds -----------------------------------------------------------

/// Ds record data.
///
/// The Ds record refers to a DNSKEY record of the delegated zone by its key
/// tag, algorithm, and a digest of the key. The digest is presented as upper
/// case hex digits.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Ds {
    key_tag: u16,
    algorithm: u8,
    digest_type: u8,
    digest: Bytes,
}

impl Ds {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::DS;

    /// Creates new Ds record data.
    pub fn new(
        key_tag: u16,
        algorithm: u8,
        digest_type: u8,
        digest: Bytes,
    ) -> Self {
        Ds {
            key_tag,
            algorithm,
            digest_type,
            digest,
        }
    }

    /// Returns the key tag.
    pub fn key_tag(&self) -> u16 {
        self.key_tag
    }

    /// Returns the algorithm of the key.
    pub fn algorithm(&self) -> u8 {
        self.algorithm
    }

    /// Returns the digest type.
    pub fn digest_type(&self) -> u8 {
        self.digest_type
    }

    /// Returns the digest.
    pub fn digest(&self) -> &Bytes {
        &self.digest
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let start = cursor.pos();
        let rdlen = reread_rdlen(cursor);
        let key_tag = cursor.read_u16();
        let algorithm = cursor.read_u8();
        let digest_type = cursor.read_u8();
        Ds::new(
            key_tag,
            algorithm,
            digest_type,
            read_remaining(cursor, start, rdlen),
        )
    }
}

impl RecordData for Ds {
    fn rtype(&self) -> Rtype {
        Ds::RTYPE
    }
}

impl Compose for Ds {
    fn compose_len(&self) -> usize {
        4 + self.digest.len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.key_tag.compose(target);
        self.algorithm.compose(target);
        self.digest_type.compose(target);
        target.put_slice(&self.digest);
    }
}

impl fmt::Display for Ds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} ",
            self.key_tag, self.algorithm, self.digest_type
        )?;
        base16::display(&self.digest, f)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::rdata_cursor;

    #[test]
    fn ds() {
        let mut cursor = rdata_cursor(b"\x4f\x66\x08\x02\x2a\xbc\xde\xf0");
        let ds = Ds::parse(&mut cursor);
        assert!(cursor.check().is_ok());
        assert_eq!(ds.key_tag(), 20326);
        assert_eq!(ds.digest().len(), 4);
        assert_eq!(ds.to_string(), "20326 8 2 2ABCDEF0");
    }
}
