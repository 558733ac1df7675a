//! Resource Records.
//!
//! This module defines the type [`Record`] which contains a complete
//! resource record as found in the answer, authority, and additional
//! sections of a DNS message.

use super::cursor::Cursor;
use super::iana::{Class, Rtype};
use super::name::Name;
use super::rdata::RecordData;
use super::wire::Compose;
use crate::rdata::{AllRecordData, FromAllRecordData};
use bytes::BufMut;
use core::fmt;
use core::time::Duration;

//------------ Record --------------------------------------------------------

/// A DNS resource record.
///
/// All information available through the DNS is stored in resource records.
/// They have a three part key of a domain name, resource record type, and
/// class. The domain name is called the *owner* of the record.
///
/// The record type describes the kind of data the record holds, such as IP
/// addresses. The class describes which sort of network the information is
/// for. In practice, the only relevant class is IN, the Internet.
///
/// The payload of a resource record is its data. Its purpose, meaning, and
/// format is determined by the record type.
///
/// There is one more piece of data: the TTL or time to live. This value
/// says how long a record remains valid before it should be refreshed from
/// its original source. The record keeps the TTL as it was received. The
/// time left for a record received a while ago is available through
/// [`effective_ttl`][Self::effective_ttl].
///
/// Finally, the record keeps the RDLENGTH value found in the wire data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The owner of the record.
    owner: Name,

    /// The type of the record.
    rtype: Rtype,

    /// The class of the record.
    class: Class,

    /// The time-to-live value of the record as received.
    ttl: u32,

    /// The record data length as declared in the wire data.
    rdlen: u16,

    /// The record data.
    data: AllRecordData,
}

/// # Creation and Element Access
///
impl Record {
    /// Creates a new record from its parts.
    ///
    /// The record type and data length are taken from the data.
    pub fn new(
        owner: Name,
        class: Class,
        ttl: u32,
        data: impl Into<AllRecordData>,
    ) -> Self {
        let data = data.into();
        Record {
            owner,
            rtype: data.rtype(),
            class,
            ttl,
            rdlen: u16::try_from(data.compose_len()).unwrap_or(u16::MAX),
            data,
        }
    }

    /// Creates a new record in class IN.
    pub fn new_in(
        owner: Name,
        ttl: u32,
        data: impl Into<AllRecordData>,
    ) -> Self {
        Record::new(owner, Class::IN, ttl, data)
    }

    /// Returns a reference to the owner domain name.
    ///
    /// The owner of a record is the domain name that specifies the node in
    /// the DNS tree this record belongs to.
    pub fn owner(&self) -> &Name {
        &self.owner
    }

    /// Returns the record type.
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    /// Returns the record class.
    pub fn class(&self) -> Class {
        self.class
    }

    /// Returns the record’s time-to-live as received.
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Sets the record’s time-to-live.
    pub fn set_ttl(&mut self, ttl: u32) {
        self.ttl = ttl
    }

    /// Returns the time-to-live left after `elapsed` time has passed.
    ///
    /// The value never goes below zero.
    pub fn effective_ttl(&self, elapsed: Duration) -> u32 {
        let elapsed = u32::try_from(elapsed.as_secs()).unwrap_or(u32::MAX);
        self.ttl.saturating_sub(elapsed)
    }

    /// Returns the record data length as declared in the wire data.
    pub fn rdlen(&self) -> u16 {
        self.rdlen
    }

    /// Return a reference to the record data.
    pub fn data(&self) -> &AllRecordData {
        &self.data
    }

    /// Returns the record data if it is of type `T`.
    pub fn data_as<T: FromAllRecordData>(&self) -> Option<&T> {
        T::from_all(&self.data)
    }

    /// Trades the record for its data.
    pub fn into_data(self) -> AllRecordData {
        self.data
    }
}

/// # Parsing
///
impl Record {
    /// Reads a record from the cursor.
    ///
    /// After the record has been read, the cursor is positioned at the end
    /// of the record data as declared by the RDLENGTH field, no matter how
    /// much the record data parser consumed.
    pub fn read(cursor: &mut Cursor) -> Self {
        let owner = cursor.read_name();
        let rtype = Rtype::read(cursor);
        let class = Class::read(cursor);
        let ttl = cursor.read_u32();
        let rdlen = cursor.read_u16();
        let start = cursor.pos();
        let data = AllRecordData::parse(rtype, cursor);
        cursor.set_pos(start + usize::from(rdlen));
        Record {
            owner,
            rtype,
            class,
            ttl,
            rdlen,
            data,
        }
    }
}

//--- Compose

impl Compose for Record {
    fn compose_len(&self) -> usize {
        self.owner.compose_len() + 10 + self.data.compose_len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.owner.compose(target);
        self.rtype.compose(target);
        self.class.compose(target);
        self.ttl.compose(target);
        u16::try_from(self.data.compose_len())
            .unwrap_or(u16::MAX)
            .compose(target);
        self.data.compose(target);
    }
}

//--- Display

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_with_ttl(self.ttl, f)
    }
}

impl Record {
    /// Formats the record with the given TTL instead of its own.
    pub(crate) fn fmt_with_ttl(
        &self,
        ttl: u32,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.owner, ttl, self.class, self.rtype, self.data
        )
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::rdata::{Mx, A};
    use core::str::FromStr;

    fn owner() -> Name {
        Name::from_str("example.com").unwrap()
    }

    #[test]
    fn compose_and_read() {
        let record = Record::new_in(owner(), 3600, A::from_octets(192, 0, 2, 1));
        assert_eq!(record.rtype(), Rtype::A);
        assert_eq!(record.rdlen(), 4);

        let mut buf = Vec::new();
        record.compose(&mut buf);
        assert_eq!(buf.len(), record.compose_len());

        let mut cursor = Cursor::new(buf);
        let parsed = Record::read(&mut cursor);
        assert!(cursor.check().is_ok());
        assert_eq!(parsed, record);
        assert_eq!(parsed.to_string(), "example.com.\t3600\tIN\tA\t192.0.2.1");
    }

    #[test]
    fn read_resyncs_after_data() {
        // An A record that declares six octets of data followed by a
        // second record. The A parser consumes only four of them.
        let mut wire = Vec::new();
        owner().compose(&mut wire);
        wire.extend_from_slice(b"\x00\x01\x00\x01\x00\x00\x0e\x10\x00\x06");
        wire.extend_from_slice(&[192, 0, 2, 1, 0xAA, 0xBB]);
        Record::new_in(owner(), 60, Mx::new(10, owner())).compose(&mut wire);

        let mut cursor = Cursor::new(wire);
        let first = Record::read(&mut cursor);
        assert_eq!(first.rdlen(), 6);
        assert_eq!(first.data_as::<A>(), Some(&A::from_octets(192, 0, 2, 1)));
        let second = Record::read(&mut cursor);
        assert_eq!(second.data_as::<Mx>().map(Mx::preference), Some(10));
        assert!(cursor.check().is_ok());
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn effective_ttl() {
        let record = Record::new_in(owner(), 300, A::from_octets(10, 0, 0, 1));
        assert_eq!(record.effective_ttl(Duration::from_secs(0)), 300);
        assert_eq!(record.effective_ttl(Duration::from_secs(100)), 200);
        assert_eq!(record.effective_ttl(Duration::from_millis(299_999)), 1);
        assert_eq!(record.effective_ttl(Duration::from_secs(300)), 0);
        assert_eq!(record.effective_ttl(Duration::from_secs(10_000)), 0);
        assert_eq!(record.effective_ttl(Duration::MAX), 0);
    }
}
