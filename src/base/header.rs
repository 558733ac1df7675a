//! The header of a DNS message.
//!
//! Each DNS message starts with a twelve octet long header section
//! containing some general information related to the message as well as
//! the number of records in each of the four sections that follow the header.
//! Its content and format are defined in section 4.1.1 of [RFC 1035].
//!
//! The header has been split into two separate types: [`Header`] contains
//! the message ID and the flags word, [`HeaderCounts`] contains the section
//! counts. The [`HeaderSection`] type wraps both of them into a single
//! type.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use super::cursor::Cursor;
use super::iana::{Opcode, Rcode};
use super::wire::Compose;
use bytes::BufMut;
use core::fmt;

//------------ Header --------------------------------------------------

/// The first part of the header of a DNS message.
///
/// This type represents the information contained in the first four octets
/// of the header: the message ID and the flags word. The flags word is
/// layed out like this:
///
/// ```text
///   1  1  1  1  1  1
///   5  4  3  2  1  0  9  8  7  6  5  4  3  2  1  0
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// Each field is identified by the position of its lowest bit and its
/// length in bits. The generic accessors [`field`][Self::field] and
/// [`set_field`][Self::set_field] work on these pairs, the named accessors
/// in the section [Field Access] below are built on top of them.
///
/// [Field Access]: #field-access
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Header {
    /// The message ID.
    id: u16,

    /// The flags word.
    flags: u16,
}

/// # Creation and Conversion
///
impl Header {
    /// Creates a new header.
    ///
    /// The new header has all fields as either zero or false. Thus, the
    /// opcode will be [`Opcode::QUERY`] and the response code will be
    /// [`Rcode::NOERROR`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the complete flags word.
    pub fn flags(self) -> u16 {
        self.flags
    }

    /// Replaces the complete flags word.
    pub fn set_flags(&mut self, flags: u16) {
        self.flags = flags
    }
}

/// # Generic Field Access
///
impl Header {
    /// Returns the value of the flags field at `pos` with `len` bits.
    ///
    /// Returns zero if the field lies outside the flags word.
    pub fn field(self, pos: u32, len: u32) -> u16 {
        if len == 0 || pos >= 16 {
            return 0;
        }
        let mask = field_mask(len);
        ((u32::from(self.flags) >> pos) & mask) as u16
    }

    /// Sets the value of the flags field at `pos` with `len` bits.
    ///
    /// Bits of `value` that do not fit into the field are dropped, the
    /// other fields stay untouched. If the field lies outside the flags
    /// word, nothing happens. Returns the resulting flags word.
    pub fn set_field(&mut self, pos: u32, len: u32, value: u16) -> u16 {
        if len == 0 || pos >= 16 {
            return self.flags;
        }
        let mask = field_mask(len) << pos;
        let flags = (u32::from(self.flags) & !mask)
            | ((u32::from(value) << pos) & mask);
        self.flags = (flags & 0xFFFF) as u16;
        self.flags
    }

    fn bit(self, pos: u32) -> bool {
        self.field(pos, 1) != 0
    }

    fn set_bit(&mut self, pos: u32, set: bool) {
        self.set_field(pos, 1, u16::from(set));
    }
}

fn field_mask(len: u32) -> u32 {
    if len >= 16 {
        0xFFFF
    } else {
        (1 << len) - 1
    }
}

/// # Field Access
///
impl Header {
    /// Returns the value of the ID field.
    ///
    /// The ID field is an identifier chosen by whoever created a query
    /// and is copied into a response by a server. It allows matching
    /// incoming responses to their queries.
    pub fn id(self) -> u16 {
        self.id
    }

    /// Sets the value of the ID field.
    pub fn set_id(&mut self, value: u16) {
        self.id = value
    }

    /// Returns whether the QR bit is set.
    ///
    /// The bit is set in responses and unset in queries.
    pub fn qr(self) -> bool {
        self.bit(15)
    }

    /// Sets the value of the QR bit.
    pub fn set_qr(&mut self, set: bool) {
        self.set_bit(15, set)
    }

    /// Returns the value of the Opcode field.
    pub fn opcode(self) -> Opcode {
        Opcode::from_int(self.field(11, 4) as u8)
    }

    /// Sets the value of the opcode field.
    pub fn set_opcode(&mut self, opcode: Opcode) {
        self.set_field(11, 4, u16::from(opcode.to_int()));
    }

    /// Returns whether the AA bit is set.
    ///
    /// Using this bit, a name server generating a response states whether
    /// it is authoritative for the requested domain name.
    pub fn aa(self) -> bool {
        self.bit(10)
    }

    /// Sets the value of the AA bit.
    pub fn set_aa(&mut self, set: bool) {
        self.set_bit(10, set)
    }

    /// Returns whether the TC bit is set.
    ///
    /// The *truncation* bit is set if there was more data available then
    /// fit into the message.
    pub fn tc(self) -> bool {
        self.bit(9)
    }

    /// Sets the value of the TC bit.
    pub fn set_tc(&mut self, set: bool) {
        self.set_bit(9, set)
    }

    /// Returns whether the RD bit is set.
    ///
    /// The *recursion desired* bit may be set in a query to ask the name
    /// server to try and recursively gather a response if it doesn’t have
    /// the data available locally.
    pub fn rd(self) -> bool {
        self.bit(8)
    }

    /// Sets the value of the RD bit.
    pub fn set_rd(&mut self, set: bool) {
        self.set_bit(8, set)
    }

    /// Returns whether the RA bit is set.
    ///
    /// In a response, the *recursion available* bit denotes whether the
    /// responding name server supports recursion.
    pub fn ra(self) -> bool {
        self.bit(7)
    }

    /// Sets the value of the RA bit.
    pub fn set_ra(&mut self, set: bool) {
        self.set_bit(7, set)
    }

    /// Returns the value of the three bit Z field.
    ///
    /// The field is reserved and should always be zero.
    pub fn z(self) -> u8 {
        self.field(4, 3) as u8
    }

    /// Sets the value of the Z field.
    pub fn set_z(&mut self, value: u8) {
        self.set_field(4, 3, u16::from(value));
    }

    /// Returns the value of the RCODE field.
    ///
    /// The *response code* is used in a response to indicate what happened
    /// when processing the query.
    pub fn rcode(self) -> Rcode {
        Rcode::from_int(self.field(0, 4) as u8)
    }

    /// Sets the value of the RCODE field.
    pub fn set_rcode(&mut self, rcode: Rcode) {
        self.set_field(0, 4, u16::from(rcode.to_int()));
    }

    /// Returns the names of all flags that are set.
    ///
    /// The names are in lower case and separated by a single space, the
    /// way dig prints them.
    pub fn flags_str(self) -> String {
        let mut res = Vec::new();
        if self.qr() {
            res.push("qr")
        }
        if self.aa() {
            res.push("aa")
        }
        if self.tc() {
            res.push("tc")
        }
        if self.rd() {
            res.push("rd")
        }
        if self.ra() {
            res.push("ra")
        }
        res.join(" ")
    }
}

//------------ HeaderCounts -------------------------------------------------

/// The section count part of the header section of a DNS message.
///
/// This part consists of four 16 bit counters for the number of entries in
/// the four sections of a DNS message.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct HeaderCounts {
    qdcount: u16,
    ancount: u16,
    nscount: u16,
    arcount: u16,
}

/// # Field Access
///
impl HeaderCounts {
    /// Creates a new value with all counters set to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of the QDCOUNT field.
    ///
    /// This field contains the number of questions in the first
    /// section of the message.
    pub fn qdcount(self) -> u16 {
        self.qdcount
    }

    /// Sets the value of the QDCOUNT field.
    pub fn set_qdcount(&mut self, value: u16) {
        self.qdcount = value
    }

    /// Increases the value of the QDCOUNT field by one.
    pub fn inc_qdcount(&mut self) -> Result<(), CountOverflow> {
        self.qdcount = self.qdcount.checked_add(1).ok_or(CountOverflow)?;
        Ok(())
    }

    /// Returns the value of the ANCOUNT field.
    ///
    /// This field contains the number of resource records in the second
    /// section of the message.
    pub fn ancount(self) -> u16 {
        self.ancount
    }

    /// Sets the value of the ANCOUNT field.
    pub fn set_ancount(&mut self, value: u16) {
        self.ancount = value
    }

    /// Increases the value of the ANCOUNT field by one.
    pub fn inc_ancount(&mut self) -> Result<(), CountOverflow> {
        self.ancount = self.ancount.checked_add(1).ok_or(CountOverflow)?;
        Ok(())
    }

    /// Returns the value of the NSCOUNT field.
    ///
    /// This field contains the number of resource records in the third
    /// section of the message.
    pub fn nscount(self) -> u16 {
        self.nscount
    }

    /// Sets the value of the NSCOUNT field.
    pub fn set_nscount(&mut self, value: u16) {
        self.nscount = value
    }

    /// Increases the value of the NSCOUNT field by one.
    pub fn inc_nscount(&mut self) -> Result<(), CountOverflow> {
        self.nscount = self.nscount.checked_add(1).ok_or(CountOverflow)?;
        Ok(())
    }

    /// Returns the value of the ARCOUNT field.
    ///
    /// This field contains the number of resource records in the fourth
    /// section of the message.
    pub fn arcount(self) -> u16 {
        self.arcount
    }

    /// Sets the value of the ARCOUNT field.
    pub fn set_arcount(&mut self, value: u16) {
        self.arcount = value
    }

    /// Increases the value of the ARCOUNT field by one.
    pub fn inc_arcount(&mut self) -> Result<(), CountOverflow> {
        self.arcount = self.arcount.checked_add(1).ok_or(CountOverflow)?;
        Ok(())
    }
}

//------------ HeaderSection -------------------------------------------------

/// The complete header section of a DNS message.
///
/// Consists of a [`Header`] directly followed by a [`HeaderCounts`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct HeaderSection {
    header: Header,
    counts: HeaderCounts,
}

impl HeaderSection {
    /// The length of the header section in octets.
    pub const LEN: usize = 12;

    /// Creates a new header section from its parts.
    pub fn new(header: Header, counts: HeaderCounts) -> Self {
        HeaderSection { header, counts }
    }

    /// Returns the header.
    pub fn header(&self) -> Header {
        self.header
    }

    /// Returns a mutable reference to the header.
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Returns the section counts.
    pub fn counts(&self) -> HeaderCounts {
        self.counts
    }

    /// Returns a mutable reference to the section counts.
    pub fn counts_mut(&mut self) -> &mut HeaderCounts {
        &mut self.counts
    }

    /// Reads a header section from the cursor.
    pub fn read(cursor: &mut Cursor) -> Self {
        let id = cursor.read_u16();
        let flags = cursor.read_u16();
        HeaderSection {
            header: Header { id, flags },
            counts: HeaderCounts {
                qdcount: cursor.read_u16(),
                ancount: cursor.read_u16(),
                nscount: cursor.read_u16(),
                arcount: cursor.read_u16(),
            },
        }
    }
}

//--- Compose

impl Compose for HeaderSection {
    fn compose_len(&self) -> usize {
        Self::LEN
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        target.put_u16(self.header.id);
        target.put_u16(self.header.flags);
        target.put_u16(self.counts.qdcount);
        target.put_u16(self.counts.ancount);
        target.put_u16(self.counts.nscount);
        target.put_u16(self.counts.arcount);
    }
}

//------------ CountOverflow -------------------------------------------------

/// A section count would exceed its 16 bit range.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CountOverflow;

impl fmt::Display for CountOverflow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("section count overflow")
    }
}

impl std::error::Error for CountOverflow {}

//============ Testing ======================================================

#[cfg(test)]
mod test {
    use super::*;
    use bytes::Bytes;

    macro_rules! test_field {
        ($get:ident, $set:ident, $default:expr, $($value:expr),*) => {
            $({
                let mut h = Header::new();
                assert_eq!(h.$get(), $default);
                h.$set($value);
                assert_eq!(h.$get(), $value);
            })*
        }
    }

    #[test]
    fn header() {
        test_field!(id, set_id, 0, 0x1234);
        test_field!(qr, set_qr, false, true, false);
        test_field!(opcode, set_opcode, Opcode::QUERY, Opcode::NOTIFY);
        test_field!(aa, set_aa, false, true, false);
        test_field!(tc, set_tc, false, true, false);
        test_field!(rd, set_rd, false, true, false);
        test_field!(ra, set_ra, false, true, false);
        test_field!(z, set_z, 0, 5, 0);
        test_field!(rcode, set_rcode, Rcode::NOERROR, Rcode::REFUSED);
    }

    #[test]
    fn flag_bit_positions() {
        let mut h = Header::new();
        h.set_qr(true);
        assert_eq!(h.flags(), 0x8000);
        h.set_opcode(Opcode::UPDATE);
        assert_eq!(h.flags(), 0xA800);
        h.set_rd(true);
        h.set_ra(true);
        assert_eq!(h.flags(), 0xA980);
        h.set_rcode(Rcode::NXDOMAIN);
        assert_eq!(h.flags(), 0xA983);
        h.set_z(7);
        assert_eq!(h.flags(), 0xA9F3);
    }

    #[test]
    fn fields_do_not_disturb_each_other() {
        let mut h = Header::new();
        h.set_flags(0xFFFF);
        h.set_opcode(Opcode::QUERY);
        assert_eq!(h.flags(), 0x87FF);
        h.set_rcode(Rcode::from_int(0x1F));
        assert_eq!(h.rcode(), Rcode::from_int(0x0F));
        assert_eq!(h.flags(), 0x87FF);
    }

    #[test]
    fn out_of_range_field_is_noop() {
        let mut h = Header::new();
        h.set_flags(0x1234);
        assert_eq!(h.set_field(16, 1, 1), 0x1234);
        assert_eq!(h.set_field(3, 0, 1), 0x1234);
        assert_eq!(h.field(17, 2), 0);
        assert_eq!(h.flags(), 0x1234);
    }

    #[test]
    fn counts() {
        let mut c = HeaderCounts::new();
        c.set_qdcount(1);
        c.inc_ancount().unwrap();
        c.inc_ancount().unwrap();
        c.set_arcount(u16::MAX);
        assert_eq!(c.qdcount(), 1);
        assert_eq!(c.ancount(), 2);
        assert_eq!(c.nscount(), 0);
        assert_eq!(c.inc_arcount(), Err(CountOverflow));
        assert_eq!(c.arcount(), u16::MAX);
    }

    #[test]
    fn read_and_compose() {
        let wire = b"\x12\x34\x81\x80\x00\x01\x00\x02\x00\x03\x00\x04";
        let mut cursor = Cursor::new(Bytes::from_static(wire));
        let section = HeaderSection::read(&mut cursor);
        assert_eq!(section.header().id(), 0x1234);
        assert!(section.header().qr());
        assert!(section.header().rd());
        assert!(section.header().ra());
        assert_eq!(section.header().flags_str(), "qr rd ra");
        assert_eq!(section.counts().nscount(), 3);
        assert_eq!(section.counts().arcount(), 4);
        let mut buf = Vec::new();
        section.compose(&mut buf);
        assert_eq!(buf.as_slice(), wire);
    }
}
