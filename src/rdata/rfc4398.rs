//! Record data from [RFC 4398]: CERT records.
//!
//! [RFC 4398]: https://tools.ietf.org/html/rfc4398

use crate::base::cursor::Cursor;
use crate::base::iana::Rtype;
use crate::base::rdata::{read_remaining, reread_rdlen, RecordData};
use crate::base::wire::Compose;
use crate::utils::base64;
use bytes::{BufMut, Bytes};
use core::fmt;

//------------ Cert ---------------------------------------------------------

/// Cert record data.
///
/// The Cert record stores a certificate or a certificate revocation list.
/// The certificate is presented in Base 64.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Cert {
    cert_type: u16,
    key_tag: u16,
    algorithm: u8,
    certificate: Bytes,
}

impl Cert {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::CERT;

    /// Creates new Cert record data.
    pub fn new(
        cert_type: u16,
        key_tag: u16,
        algorithm: u8,
        certificate: Bytes,
    ) -> Self {
        Cert {
            cert_type,
            key_tag,
            algorithm,
            certificate,
        }
    }

    /// The certificate type, e.g., 1 for X.509 or 3 for OpenPGP.
    pub fn cert_type(&self) -> u16 {
        self.cert_type
    }

    /// Returns the key tag of the certificate.
    pub fn key_tag(&self) -> u16 {
        self.key_tag
    }

    /// Returns the algorithm of the certificate.
    pub fn algorithm(&self) -> u8 {
        self.algorithm
    }

    /// Returns the certificate data.
    pub fn certificate(&self) -> &Bytes {
        &self.certificate
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let start = cursor.pos();
        let rdlen = reread_rdlen(cursor);
        let cert_type = cursor.read_u16();
        let key_tag = cursor.read_u16();
        let algorithm = cursor.read_u8();
        Cert::new(
            cert_type,
            key_tag,
            algorithm,
            read_remaining(cursor, start, rdlen),
        )
    }
}

impl RecordData for Cert {
    fn rtype(&self) -> Rtype {
        Cert::RTYPE
    }
}

impl Compose for Cert {
    fn compose_len(&self) -> usize {
        5 + self.certificate.len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.cert_type.compose(target);
        self.key_tag.compose(target);
        self.algorithm.compose(target);
        target.put_slice(&self.certificate);
    }
}

impl fmt::Display for Cert {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {} ", self.cert_type, self.key_tag, self.algorithm)?;
        base64::display(&self.certificate, f)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::rdata_cursor;

    #[test]
    fn cert() {
        let mut cursor = rdata_cursor(b"\x00\x01\x30\x39\x08foobar");
        let cert = Cert::parse(&mut cursor);
        assert!(cursor.check().is_ok());
        assert_eq!(cert.key_tag(), 12345);
        assert_eq!(cert.to_string(), "1 12345 8 Zm9vYmFy");
    }
}
