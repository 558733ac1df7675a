//! Record data from [RFC 2163].
//!
//! [RFC 2163]: https://tools.ietf.org/html/rfc2163

use crate::base::cursor::Cursor;
use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::rdata::RecordData;
use crate::base::wire::Compose;
use bytes::BufMut;
use core::fmt;

//------------ Px -----------------------------------------------------------

/// Px record data.
///
/// The Px record maps between RFC 822 and X.400 mail addressing. It holds
/// a preference, the RFC 822 part of the mapping and the X.400 part, both
/// as domain names.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Px {
    preference: u16,
    map822: Name,
    mapx400: Name,
}

impl Px {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::PX;

    /// Creates new Px record data.
    pub fn new(preference: u16, map822: Name, mapx400: Name) -> Self {
        Px {
            preference,
            map822,
            mapx400,
        }
    }

    /// Returns the preference.
    pub fn preference(&self) -> u16 {
        self.preference
    }

    /// Returns the RFC 822 part of the mapping.
    pub fn map822(&self) -> &Name {
        &self.map822
    }

    /// Returns the X.400 part of the mapping.
    pub fn mapx400(&self) -> &Name {
        &self.mapx400
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let preference = cursor.read_u16();
        let map822 = cursor.read_name();
        Px::new(preference, map822, cursor.read_name())
    }
}

impl RecordData for Px {
    fn rtype(&self) -> Rtype {
        Px::RTYPE
    }
}

impl Compose for Px {
    fn compose_len(&self) -> usize {
        2 + self.map822.compose_len() + self.mapx400.compose_len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.preference.compose(target);
        self.map822.compose(target);
        self.mapx400.compose(target);
    }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.preference, self.map822, self.mapx400)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::rdata_cursor;

    #[test]
    fn px() {
        let mut cursor =
            rdata_cursor(b"\x00\x0a\x03net\x02it\0\x04PRMD\x03net\x02it\0");
        let px = Px::parse(&mut cursor);
        assert!(cursor.check().is_ok());
        assert_eq!(px.preference(), 10);
        assert_eq!(px.to_string(), "10 net.it. PRMD.net.it.");
    }
}
