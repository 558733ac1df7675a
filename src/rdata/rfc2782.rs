//! Record data from [RFC 2782].
//!
//! This RFC defines the Srv record type.
//!
//! [RFC 2782]: https://tools.ietf.org/html/rfc2782

use crate::base::cursor::Cursor;
use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::rdata::RecordData;
use crate::base::wire::Compose;
use bytes::BufMut;
use core::cmp::Ordering;
use core::fmt;

//------------ Srv ---------------------------------------------------------

/// Srv record data.
///
/// Srv records specify the location of the server(s) for a specific
/// protocol and domain.
///
/// Values are ordered by priority, then weight, then port, then target.
/// Both priority and weight sort ascending so that a sorted list starts
/// with the servers to try first.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Srv {
    priority: u16,
    weight: u16,
    port: u16,
    target: Name,
}

impl Srv {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::SRV;

    /// Creates new Srv record data.
    pub fn new(priority: u16, weight: u16, port: u16, target: Name) -> Self {
        Srv {
            priority,
            weight,
            port,
            target,
        }
    }

    /// Returns the priority.
    pub fn priority(&self) -> u16 {
        self.priority
    }

    /// Returns the weight.
    pub fn weight(&self) -> u16 {
        self.weight
    }

    /// Returns the port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the target host.
    pub fn target(&self) -> &Name {
        &self.target
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let priority = cursor.read_u16();
        let weight = cursor.read_u16();
        let port = cursor.read_u16();
        Srv::new(priority, weight, port, cursor.read_name())
    }
}

//--- PartialOrd and Ord

impl PartialOrd for Srv {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Srv {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.priority.cmp(&other.priority) {
            Ordering::Equal => {}
            other => return other,
        }
        match self.weight.cmp(&other.weight) {
            Ordering::Equal => {}
            other => return other,
        }
        match self.port.cmp(&other.port) {
            Ordering::Equal => {}
            other => return other,
        }
        self.target.name_cmp(&other.target)
    }
}

//--- RecordData, Compose

impl RecordData for Srv {
    fn rtype(&self) -> Rtype {
        Srv::RTYPE
    }
}

impl Compose for Srv {
    fn compose_len(&self) -> usize {
        6 + self.target.compose_len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.priority.compose(target);
        self.weight.compose(target);
        self.port.compose(target);
        self.target.compose(target);
    }
}

//--- Display

impl fmt::Display for Srv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.priority, self.weight, self.port, self.target
        )
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::rdata_cursor;

    fn srv(priority: u16, weight: u16, port: u16, target: &str) -> Srv {
        Srv::new(priority, weight, port, target.parse().unwrap())
    }

    #[test]
    fn display() {
        assert_eq!(
            srv(10, 20, 80, "test.com").to_string(),
            "10 20 80 test.com."
        );
    }

    #[test]
    fn parse_and_compose() {
        let wire = b"\x00\x0a\x00\x14\x00\x50\x04test\x03com\0";
        let mut cursor = rdata_cursor(wire);
        let parsed = Srv::parse(&mut cursor);
        assert!(cursor.check().is_ok());
        assert_eq!(parsed, srv(10, 20, 80, "test.com"));
        let mut buf = Vec::new();
        parsed.compose(&mut buf);
        assert_eq!(buf.as_slice(), wire);
    }

    #[test]
    fn ordering() {
        let mut list = vec![
            srv(20, 0, 80, "c.test"),
            srv(10, 50, 80, "b.test"),
            srv(10, 5, 80, "a.test"),
        ];
        list.sort();
        assert_eq!(
            list,
            [
                srv(10, 5, 80, "a.test"),
                srv(10, 50, 80, "b.test"),
                srv(20, 0, 80, "c.test"),
            ]
        );
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(srv(1, 2, 3, "x.test"), srv(1, 2, 3, "X.TEST"));
        assert_ne!(srv(1, 2, 3, "x.test"), srv(1, 2, 4, "x.test"));
    }
}
