//! Record data from [RFC 1706].
//!
//! These record types map between domain names and OSI network service
//! access point addresses.
//!
//! [RFC 1706]: https://tools.ietf.org/html/rfc1706

use crate::base::cursor::Cursor;
use crate::base::iana::Rtype;
use crate::base::rdata::{reread_rdlen, RecordData};
use crate::base::wire::Compose;
use crate::utils::base16;
use bytes::{BufMut, Bytes};
use core::fmt;

//------------ Nsap ---------------------------------------------------------

/// Nsap record data.
///
/// The record data is the binary NSAP address. It is presented as hex
/// digits with a leading `0x`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Nsap {
    address: Bytes,
}

impl Nsap {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::NSAP;

    /// Creates new Nsap record data.
    pub fn new(address: impl Into<Bytes>) -> Self {
        Nsap {
            address: address.into(),
        }
    }

    /// Returns the address.
    pub fn address(&self) -> &Bytes {
        &self.address
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let rdlen = reread_rdlen(cursor);
        Nsap::new(cursor.read_bytes(rdlen))
    }
}

impl RecordData for Nsap {
    fn rtype(&self) -> Rtype {
        Nsap::RTYPE
    }
}

impl Compose for Nsap {
    fn compose_len(&self) -> usize {
        self.address.len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        target.put_slice(&self.address)
    }
}

impl fmt::Display for Nsap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("0x")?;
        base16::display(&self.address, f)
    }
}

//------------ NsapPtr ------------------------------------------------------

name_type! {
    /// NsapPtr record data.
    ///
    /// The record maps an NSAP address in the reverse tree back to the
    /// domain name of its owner.
    (NsapPtr, NSAPPTR, owner)
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::rdata_cursor;

    #[test]
    fn nsap() {
        let nsap = Nsap::parse(&mut rdata_cursor(b"\x47\x00\x05\x80\xff"));
        assert_eq!(nsap.to_string(), "0x47000580FF");
        assert_eq!(nsap.compose_len(), 5);
    }

    #[test]
    fn nsap_ptr() {
        let ptr = NsapPtr::parse(&mut rdata_cursor(b"\x03foo\x03net\0"));
        assert_eq!(ptr.to_string(), "foo.net.");
        assert_eq!(ptr.rtype().to_string(), "NSAP-PTR");
    }
}
