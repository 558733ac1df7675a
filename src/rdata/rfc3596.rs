//! Record data from [RFC 3596]: AAAA records.
//!
//! This RFC defines the Aaaa record type.
//!
//! [RFC 3596]: https://tools.ietf.org/html/rfc3596

use crate::base::cursor::Cursor;
use crate::base::iana::Rtype;
use crate::base::rdata::RecordData;
use crate::base::wire::Compose;
use bytes::BufMut;
use core::fmt;
use core::str::FromStr;
use std::net::{AddrParseError, Ipv6Addr};

//------------ Aaaa ---------------------------------------------------------

/// Aaaa record data.
///
/// Aaaa records convey the IPv6 address of a host. The wire format is the
/// 128 bit IPv6 address in network byte order. The presentation format is
/// the compressed text form of RFC 5952.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Aaaa {
    addr: Ipv6Addr,
}

impl Aaaa {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::AAAA;

    /// Creates new Aaaa record data.
    pub fn new(addr: Ipv6Addr) -> Aaaa {
        Aaaa { addr }
    }

    /// Returns the address.
    pub fn addr(&self) -> Ipv6Addr {
        self.addr
    }

    /// Sets the address.
    pub fn set_addr(&mut self, addr: Ipv6Addr) {
        self.addr = addr
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let mut octets = [0u8; 16];
        for octet in octets.iter_mut() {
            *octet = cursor.read_u8();
        }
        Aaaa::new(Ipv6Addr::from(octets))
    }
}

//--- From and FromStr

impl From<Ipv6Addr> for Aaaa {
    fn from(addr: Ipv6Addr) -> Self {
        Self::new(addr)
    }
}

impl From<Aaaa> for Ipv6Addr {
    fn from(data: Aaaa) -> Self {
        data.addr
    }
}

impl FromStr for Aaaa {
    type Err = AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv6Addr::from_str(s).map(Aaaa::new)
    }
}

//--- RecordData, Compose

impl RecordData for Aaaa {
    fn rtype(&self) -> Rtype {
        Aaaa::RTYPE
    }
}

impl Compose for Aaaa {
    fn compose_len(&self) -> usize {
        16
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.addr.compose(target)
    }
}

//--- Display

impl fmt::Display for Aaaa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.addr, f)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::rdata_cursor;

    #[test]
    fn display_compressed() {
        let aaaa = Aaaa::from_str("2001:0db8:85a3::8a2e:0370:7334").unwrap();
        assert_eq!(aaaa.to_string(), "2001:db8:85a3::8a2e:370:7334");
    }

    #[test]
    fn parse_and_compose() {
        let aaaa = Aaaa::from_str("2001:db8::1").unwrap();
        let mut buf = Vec::new();
        aaaa.compose(&mut buf);
        assert_eq!(buf.len(), 16);
        let mut cursor = rdata_cursor(&buf);
        assert_eq!(Aaaa::parse(&mut cursor), aaaa);
        assert!(cursor.check().is_ok());
    }
}
