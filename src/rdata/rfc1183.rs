//! Record data from [RFC 1183].
//!
//! This RFC defines a number of experimental record types for locating
//! people, AFS databases, and hosts reachable over networks other than the
//! Internet.
//!
//! [RFC 1183]: https://tools.ietf.org/html/rfc1183

use crate::base::charstr::CharStr;
use crate::base::cursor::Cursor;
use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::rdata::{reread_rdlen, RecordData};
use crate::base::wire::Compose;
use bytes::BufMut;
use core::fmt;

//------------ Rp -----------------------------------------------------------

/// Rp record data.
///
/// The Rp record names the mailbox of the responsible person for the owner
/// and the domain name of a TXT record with further information.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Rp {
    mbox: Name,
    txt: Name,
}

impl Rp {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::RP;

    /// Creates new Rp record data.
    pub fn new(mbox: Name, txt: Name) -> Self {
        Rp { mbox, txt }
    }

    /// The mailbox of the responsible person.
    pub fn mbox(&self) -> &Name {
        &self.mbox
    }

    /// A domain name with TXT records for the responsible person.
    pub fn txt(&self) -> &Name {
        &self.txt
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let mbox = cursor.read_name();
        Rp::new(mbox, cursor.read_name())
    }
}

impl RecordData for Rp {
    fn rtype(&self) -> Rtype {
        Rp::RTYPE
    }
}

impl Compose for Rp {
    fn compose_len(&self) -> usize {
        self.mbox.compose_len() + self.txt.compose_len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.mbox.compose(target);
        self.txt.compose(target);
    }
}

impl fmt::Display for Rp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.mbox, self.txt)
    }
}

//------------ Afsdb --------------------------------------------------------

/// Afsdb record data.
///
/// The Afsdb record points to an AFS database server. The subtype selects
/// the kind of server: 1 for an AFS cell database server, 2 for a DCE
/// authenticated name server.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Afsdb {
    subtype: u16,
    hostname: Name,
}

impl Afsdb {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::AFSDB;

    /// Creates new Afsdb record data.
    pub fn new(subtype: u16, hostname: Name) -> Self {
        Afsdb { subtype, hostname }
    }

    /// Returns the subtype.
    pub fn subtype(&self) -> u16 {
        self.subtype
    }

    /// Returns the host name.
    pub fn hostname(&self) -> &Name {
        &self.hostname
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let subtype = cursor.read_u16();
        Afsdb::new(subtype, cursor.read_name())
    }
}

impl RecordData for Afsdb {
    fn rtype(&self) -> Rtype {
        Afsdb::RTYPE
    }
}

impl Compose for Afsdb {
    fn compose_len(&self) -> usize {
        2 + self.hostname.compose_len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.subtype.compose(target);
        self.hostname.compose(target);
    }
}

impl fmt::Display for Afsdb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.subtype, self.hostname)
    }
}

//------------ X25 ----------------------------------------------------------

/// X25 record data.
///
/// The X25 record holds the PSDN address of the owner as a single
/// character string of decimal digits.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct X25 {
    psdn_address: CharStr,
}

impl X25 {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::X25;

    /// Creates new X25 record data.
    pub fn new(psdn_address: CharStr) -> Self {
        X25 { psdn_address }
    }

    /// Returns the PSDN address.
    pub fn psdn_address(&self) -> &CharStr {
        &self.psdn_address
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        X25::new(CharStr::read(cursor))
    }
}

impl RecordData for X25 {
    fn rtype(&self) -> Rtype {
        X25::RTYPE
    }
}

impl Compose for X25 {
    fn compose_len(&self) -> usize {
        self.psdn_address.compose_len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.psdn_address.compose(target)
    }
}

impl fmt::Display for X25 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\"", self.psdn_address)
    }
}

//------------ Isdn ---------------------------------------------------------

/// Isdn record data.
///
/// The Isdn record holds an ISDN address and an optional subaddress. The
/// subaddress is present only if there is record data left after the
/// address.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Isdn {
    isdn_address: CharStr,
    subaddress: Option<CharStr>,
}

impl Isdn {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::ISDN;

    /// Creates new Isdn record data.
    pub fn new(isdn_address: CharStr, subaddress: Option<CharStr>) -> Self {
        Isdn {
            isdn_address,
            subaddress,
        }
    }

    /// Returns the ISDN address.
    pub fn isdn_address(&self) -> &CharStr {
        &self.isdn_address
    }

    /// Returns the ISDN subaddress if present.
    pub fn subaddress(&self) -> Option<&CharStr> {
        self.subaddress.as_ref()
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let end = cursor.pos() + reread_rdlen(cursor);
        let isdn_address = CharStr::read(cursor);
        let subaddress = if cursor.pos() < end {
            Some(CharStr::read(cursor))
        } else {
            None
        };
        Isdn::new(isdn_address, subaddress)
    }
}

impl RecordData for Isdn {
    fn rtype(&self) -> Rtype {
        Isdn::RTYPE
    }
}

impl Compose for Isdn {
    fn compose_len(&self) -> usize {
        self.isdn_address.compose_len()
            + self.subaddress.as_ref().map_or(0, Compose::compose_len)
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.isdn_address.compose(target);
        if let Some(ref subaddress) = self.subaddress {
            subaddress.compose(target)
        }
    }
}

impl fmt::Display for Isdn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\"", self.isdn_address)?;
        if let Some(ref subaddress) = self.subaddress {
            write!(f, " \"{}\"", subaddress)?;
        }
        Ok(())
    }
}

//------------ Rt -----------------------------------------------------------

preference_name_type! {
    /// Rt record data.
    ///
    /// The Rt record names an intermediate host that routes to the owner.
    /// Hosts with a lower preference are tried first.
    (Rt, RT, intermediate)
}

//============ Testing =======================================================
