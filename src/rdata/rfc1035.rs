//! Record data from [RFC 1035].
//!
//! This RFC defines the initial set of record types.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use crate::base::charstr::CharStr;
use crate::base::cursor::Cursor;
use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::rdata::{read_remaining, reread_rdlen, RecordData};
use crate::base::wire::Compose;
use bytes::{BufMut, Bytes};
use core::fmt;
use std::net::Ipv4Addr;

//------------ A ------------------------------------------------------------

/// A record data.
///
/// A records convey the IPv4 address of a host. The wire format is the 32
/// bit IPv4 address in network byte order. The representation file format
/// is the usual dotted notation.
///
/// The A record type is defined in RFC 1035, section 3.4.1.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct A {
    addr: Ipv4Addr,
}

impl A {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::A;

    /// Creates a new A record data from an IPv4 address.
    pub fn new(addr: Ipv4Addr) -> A {
        A { addr }
    }

    /// Creates a new A record from the IPv4 address components.
    pub fn from_octets(a: u8, b: u8, c: u8, d: u8) -> A {
        A::new(Ipv4Addr::new(a, b, c, d))
    }

    /// Returns the address.
    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        A::new(Ipv4Addr::from(cursor.read_u32()))
    }
}

impl From<Ipv4Addr> for A {
    fn from(addr: Ipv4Addr) -> Self {
        Self::new(addr)
    }
}

impl From<A> for Ipv4Addr {
    fn from(a: A) -> Ipv4Addr {
        a.addr
    }
}

impl RecordData for A {
    fn rtype(&self) -> Rtype {
        A::RTYPE
    }
}

impl Compose for A {
    fn compose_len(&self) -> usize {
        4
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.addr.compose(target)
    }
}

impl fmt::Display for A {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.addr, f)
    }
}

//------------ Single Name Types ---------------------------------------------

name_type! {
    /// NS record data.
    ///
    /// NS records specify hosts that are authoritative for a class and
    /// domain.
    ///
    /// The NS record type is defined in RFC 1035, section 3.3.11.
    (Ns, NS, nsdname)
}

name_type! {
    /// MD record data.
    ///
    /// The MD record specifices a host which has a mail agent for
    /// the domain which should be able to deliver mail for the domain.
    ///
    /// The MD record is obsolete. It is recommended to either reject the
    /// record or convert them into an Mx record at preference 0.
    ///
    /// The MD record type is defined in RFC 1035, section 3.3.4.
    (Md, MD, madname)
}

name_type! {
    /// MF record data.
    ///
    /// The MF record specifices a host which has a mail agent for
    /// the domain which will be accept mail for forwarding to the domain.
    ///
    /// The MF record is obsolete. It is recommended to either reject the
    /// record or convert them into an Mx record at preference 10.
    ///
    /// The MF record type is defined in RFC 1035, section 3.3.5.
    (Mf, MF, madname)
}

name_type! {
    /// CNAME record data.
    ///
    /// The CNAME record specifies the canonical or primary name for domain
    /// name alias.
    ///
    /// The CNAME type is defined in RFC 1035, section 3.3.1.
    (Cname, CNAME, cname)
}

name_type! {
    /// MB record data.
    ///
    /// The experimental MB record specifies a host that serves a mailbox.
    ///
    /// The MB record type is defined in RFC 1035, section 3.3.3.
    (Mb, MB, madname)
}

name_type! {
    /// MG record data.
    ///
    /// The experimental MG record specifies a mailbox which is a member of
    /// the mail group specified by the domain name.
    ///
    /// The MG record type is defined in RFC 1035, section 3.3.6.
    (Mg, MG, madname)
}

name_type! {
    /// MR record data.
    ///
    /// The experimental MR record specifies a mailbox which is the proper
    /// rename of the specified mailbox.
    ///
    /// The MR record type is defined in RFC 1035, section 3.3.8.
    (Mr, MR, newname)
}

name_type! {
    /// PTR record data.
    ///
    /// PRT records are used in special domains to point to some other
    /// location in the domain space.
    ///
    /// The PTR record type is defined in RFC 1035, section 3.3.12.
    (Ptr, PTR, ptrdname)
}

//------------ Soa ----------------------------------------------------------

/// Soa record data.
///
/// Soa records mark the top of a zone and contain information pertinent
/// to name server maintenance operations.
///
/// The Soa record type is defined in RFC 1035, section 3.3.13.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Soa {
    mname: Name,
    rname: Name,
    serial: u32,
    refresh: u32,
    retry: u32,
    expire: u32,
    minimum: u32,
}

impl Soa {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::SOA;

    /// Creates new Soa record data from content.
    pub fn new(
        mname: Name,
        rname: Name,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    ) -> Self {
        Soa {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        }
    }

    /// The primary name server for the zone.
    pub fn mname(&self) -> &Name {
        &self.mname
    }

    /// The mailbox for the person responsible for this zone.
    pub fn rname(&self) -> &Name {
        &self.rname
    }

    /// The serial number of the original copy of the zone.
    pub fn serial(&self) -> u32 {
        self.serial
    }

    /// The time interval in seconds before the zone should be refreshed.
    pub fn refresh(&self) -> u32 {
        self.refresh
    }

    /// The time in seconds before a failed refresh is retried.
    pub fn retry(&self) -> u32 {
        self.retry
    }

    /// The upper limit of time in seconds the zone is authoritative.
    pub fn expire(&self) -> u32 {
        self.expire
    }

    /// The minimum TTL to be exported with any RR from this zone.
    pub fn minimum(&self) -> u32 {
        self.minimum
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let mname = cursor.read_name();
        let rname = cursor.read_name();
        let serial = cursor.read_u32();
        let refresh = cursor.read_u32();
        let retry = cursor.read_u32();
        let expire = cursor.read_u32();
        Soa::new(
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            cursor.read_u32(),
        )
    }
}

impl RecordData for Soa {
    fn rtype(&self) -> Rtype {
        Soa::RTYPE
    }
}

impl Compose for Soa {
    fn compose_len(&self) -> usize {
        self.mname.compose_len() + self.rname.compose_len() + 20
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.mname.compose(target);
        self.rname.compose(target);
        self.serial.compose(target);
        self.refresh.compose(target);
        self.retry.compose(target);
        self.expire.compose(target);
        self.minimum.compose(target);
    }
}

impl fmt::Display for Soa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.mname,
            self.rname,
            self.serial,
            self.refresh,
            self.retry,
            self.expire,
            self.minimum
        )
    }
}

//------------ Null ---------------------------------------------------------

/// Null record data.
///
/// Null records can contain whatever data. They are experimental and not
/// allowed in zone files. Their presentation format is the marker
/// `not-used`.
///
/// The Null record type is defined in RFC 1035, section 3.3.10.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Null {
    data: Bytes,
}

impl Null {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::NULL;

    /// Creates new null record data from octets.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Null { data: data.into() }
    }

    /// The raw content of the record.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let rdlen = reread_rdlen(cursor);
        Null::new(cursor.read_bytes(rdlen))
    }
}

impl RecordData for Null {
    fn rtype(&self) -> Rtype {
        Null::RTYPE
    }
}

impl Compose for Null {
    fn compose_len(&self) -> usize {
        self.data.len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        target.put_slice(&self.data)
    }
}

impl fmt::Display for Null {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("not-used")
    }
}

//------------ Wks ----------------------------------------------------------

/// Wks record data.
///
/// Wks records describe the well known services supported by a particular
/// protocol on a particular internet address. The services are given as a
/// bitmap where bit _n_ is set if port _n_ is in service. Bits are counted
/// from the most significant bit of the first octet.
///
/// The Wks record type is defined in RFC 1035, section 3.4.2.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Wks {
    address: Ipv4Addr,
    protocol: u8,
    bitmap: Bytes,
}

impl Wks {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::WKS;

    /// Creates new Wks record data.
    pub fn new(address: Ipv4Addr, protocol: u8, bitmap: Bytes) -> Self {
        Wks {
            address,
            protocol,
            bitmap,
        }
    }

    /// Creates Wks record data from a list of ports.
    pub fn from_ports(
        address: Ipv4Addr,
        protocol: u8,
        ports: impl IntoIterator<Item = u16>,
    ) -> Self {
        let mut bitmap = Vec::new();
        for port in ports {
            let octet = usize::from(port / 8);
            if bitmap.len() <= octet {
                bitmap.resize(octet + 1, 0);
            }
            bitmap[octet] |= 0x80 >> (port % 8);
        }
        Wks::new(address, protocol, bitmap.into())
    }

    /// Returns the address.
    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    /// Returns the protocol.
    pub fn protocol(&self) -> u8 {
        self.protocol
    }

    /// Returns the bitmap of services.
    pub fn bitmap(&self) -> &Bytes {
        &self.bitmap
    }

    /// Returns an iterator over the ports in the bitmap.
    pub fn ports(&self) -> impl Iterator<Item = u16> + '_ {
        bitmap_positions(&self.bitmap).filter_map(|n| u16::try_from(n).ok())
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let start = cursor.pos();
        let rdlen = reread_rdlen(cursor);
        let address = Ipv4Addr::from(cursor.read_u32());
        let protocol = cursor.read_u8();
        Wks::new(address, protocol, read_remaining(cursor, start, rdlen))
    }
}

impl RecordData for Wks {
    fn rtype(&self) -> Rtype {
        Wks::RTYPE
    }
}

impl Compose for Wks {
    fn compose_len(&self) -> usize {
        5 + self.bitmap.len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.address.compose(target);
        self.protocol.compose(target);
        target.put_slice(&self.bitmap);
    }
}

impl fmt::Display for Wks {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.address, self.protocol)?;
        for port in self.ports() {
            write!(f, " {}", port)?;
        }
        Ok(())
    }
}

/// Returns the positions of all set bits in a bitmap.
///
/// Bit zero is the most significant bit of the first octet.
pub(crate) fn bitmap_positions(
    bitmap: &[u8],
) -> impl Iterator<Item = usize> + '_ {
    bitmap.iter().enumerate().flat_map(|(idx, &octet)| {
        (0..8usize)
            .filter(move |bit| octet & (0x80 >> bit) != 0)
            .map(move |bit| idx * 8 + bit)
    })
}

//------------ Hinfo --------------------------------------------------------

/// Hinfo record data.
///
/// Hinfo records are used to acquire general information about a host,
/// specifically the CPU type and operating system type.
///
/// The Hinfo type is defined in RFC 1035, section 3.3.2.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Hinfo {
    cpu: CharStr,
    os: CharStr,
}

impl Hinfo {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::HINFO;

    /// Creates a new Hinfo record data from the components.
    pub fn new(cpu: CharStr, os: CharStr) -> Self {
        Hinfo { cpu, os }
    }

    /// The CPU type of the host.
    pub fn cpu(&self) -> &CharStr {
        &self.cpu
    }

    /// The operating system type of the host.
    pub fn os(&self) -> &CharStr {
        &self.os
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let cpu = CharStr::read(cursor);
        Hinfo::new(cpu, CharStr::read(cursor))
    }
}

impl RecordData for Hinfo {
    fn rtype(&self) -> Rtype {
        Hinfo::RTYPE
    }
}

impl Compose for Hinfo {
    fn compose_len(&self) -> usize {
        self.cpu.compose_len() + self.os.compose_len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.cpu.compose(target);
        self.os.compose(target);
    }
}

impl fmt::Display for Hinfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\" \"{}\"", self.cpu, self.os)
    }
}

//------------ Minfo --------------------------------------------------------

/// Minfo record data.
///
/// The Minfo record specifies a mailbox which is responsible for the mailing
/// list or mailbox and a mailbox that receives error messages related to the
/// list or box.
///
/// The Minfo record is experimental.
///
/// The Minfo record type is defined in RFC 1035, section 3.3.7.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Minfo {
    rmailbx: Name,
    emailbx: Name,
}

impl Minfo {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::MINFO;

    /// Creates a new Minfo record data from the components.
    pub fn new(rmailbx: Name, emailbx: Name) -> Self {
        Minfo { rmailbx, emailbx }
    }

    /// The responsible mail box.
    pub fn rmailbx(&self) -> &Name {
        &self.rmailbx
    }

    /// The error mail box.
    pub fn emailbx(&self) -> &Name {
        &self.emailbx
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let rmailbx = cursor.read_name();
        Minfo::new(rmailbx, cursor.read_name())
    }
}

impl RecordData for Minfo {
    fn rtype(&self) -> Rtype {
        Minfo::RTYPE
    }
}

impl Compose for Minfo {
    fn compose_len(&self) -> usize {
        self.rmailbx.compose_len() + self.emailbx.compose_len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.rmailbx.compose(target);
        self.emailbx.compose(target);
    }
}

impl fmt::Display for Minfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.rmailbx, self.emailbx)
    }
}

//------------ Mx -----------------------------------------------------------

preference_name_type! {
    /// Mx record data.
    ///
    /// The Mx record specifies a host willing to serve as a mail exchange
    /// for the owner name.
    ///
    /// The Mx record type is defined in RFC 1035, section 3.3.9.
    (Mx, MX, exchange)
}

//------------ Txt ----------------------------------------------------------

/// Txt record data.
///
/// Txt records hold descriptive text. The record data is a sequence of
/// one or more character strings.
///
/// The Txt record type is defined in RFC 1035, section 3.3.14.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Txt {
    text: Vec<CharStr>,
}

impl Txt {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::TXT;

    /// Creates new Txt record data from its character strings.
    pub fn new(text: Vec<CharStr>) -> Self {
        Txt { text }
    }

    /// Returns an iterator over the character strings.
    pub fn iter(&self) -> impl Iterator<Item = &CharStr> {
        self.text.iter()
    }

    /// Returns the content of all character strings concatenated.
    pub fn text(&self) -> Vec<u8> {
        self.text
            .iter()
            .flat_map(|s| s.as_slice().iter().copied())
            .collect()
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let start = cursor.pos();
        let end = start + reread_rdlen(cursor);
        let mut text = Vec::new();
        while cursor.pos() < end {
            let pos = cursor.pos();
            text.push(CharStr::read(cursor));
            if cursor.pos() == pos {
                break;
            }
        }
        Txt::new(text)
    }
}

impl RecordData for Txt {
    fn rtype(&self) -> Rtype {
        Txt::RTYPE
    }
}

impl Compose for Txt {
    fn compose_len(&self) -> usize {
        self.text.iter().map(Compose::compose_len).sum()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        for item in &self.text {
            item.compose(target)
        }
    }
}

impl fmt::Display for Txt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, item) in self.text.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "\"{}\"", item)?;
        }
        Ok(())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::rdata_cursor as cursor_for;
    use core::str::FromStr;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    #[test]
    fn a() {
        let mut cursor = cursor_for(&[192, 168, 0, 1]);
        let a = A::parse(&mut cursor);
        assert_eq!(a.to_string(), "192.168.0.1");
        assert_eq!(a, A::from_octets(192, 168, 0, 1));
        let mut buf = Vec::new();
        a.compose(&mut buf);
        assert_eq!(buf, [192, 168, 0, 1]);
    }

    #[test]
    fn soa() {
        let soa = Soa::new(
            name("ns1.example.com"),
            name("hostmaster.example.com"),
            2024010101,
            7200,
            3600,
            1209600,
            300,
        );
        let mut buf = Vec::new();
        soa.compose(&mut buf);
        assert_eq!(buf.len(), soa.compose_len());
        let parsed = Soa::parse(&mut cursor_for(&buf));
        assert_eq!(parsed, soa);
        assert_eq!(
            soa.to_string(),
            "ns1.example.com. hostmaster.example.com. \
             2024010101 7200 3600 1209600 300"
        );
    }

    #[test]
    fn null_takes_all_data() {
        let mut cursor = cursor_for(b"\x01\x02\x03");
        let null = Null::parse(&mut cursor);
        assert_eq!(null.data().as_ref(), b"\x01\x02\x03");
        assert_eq!(cursor.pos(), 5);
        assert_eq!(null.to_string(), "not-used");
    }

    #[test]
    fn wks() {
        let wks = Wks::from_ports(Ipv4Addr::new(10, 0, 0, 1), 6, [25, 80, 21]);
        assert_eq!(wks.bitmap().len(), 11);
        assert_eq!(wks.ports().collect::<Vec<_>>(), [21, 25, 80]);
        let mut buf = Vec::new();
        wks.compose(&mut buf);
        let parsed = Wks::parse(&mut cursor_for(&buf));
        assert_eq!(parsed, wks);
        assert_eq!(parsed.to_string(), "10.0.0.1 6 21 25 80");
    }

    #[test]
    fn hinfo() {
        let hinfo = Hinfo::parse(&mut cursor_for(b"\x05INTEL\x05Linux"));
        assert_eq!(hinfo.cpu().as_slice(), b"INTEL");
        assert_eq!(hinfo.to_string(), "\"INTEL\" \"Linux\"");
    }

    #[test]
    fn mx_ordering() {
        let mut list = vec![
            Mx::new(20, name("b.example.com")),
            Mx::new(10, name("Z.example.com")),
            Mx::new(10, name("a.example.com")),
        ];
        list.sort();
        assert_eq!(
            list,
            [
                Mx::new(10, name("a.example.com")),
                Mx::new(10, name("z.example.com")),
                Mx::new(20, name("b.example.com")),
            ]
        );
        assert_eq!(list[0].to_string(), "10 a.example.com.");
    }

    #[test]
    fn txt() {
        let mut cursor = cursor_for(b"\x05hello\x00\x06world!");
        let txt = Txt::parse(&mut cursor);
        assert_eq!(txt.iter().count(), 3);
        assert_eq!(txt.text(), b"helloworld!");
        assert_eq!(txt.to_string(), "\"hello\" \"\" \"world!\"");
        assert!(cursor.check().is_ok());
    }

    #[test]
    fn txt_stops_at_end_of_data() {
        let mut cursor = cursor_for(b"\x05hel");
        let txt = Txt::parse(&mut cursor);
        assert_eq!(txt.iter().count(), 1);
        assert!(cursor.overrun());
    }

    #[test]
    fn name_types() {
        let ptr = Ptr::parse(&mut cursor_for(b"\x04host\x07example\0"));
        assert_eq!(ptr.ptrdname(), &name("host.example"));
        assert_eq!(ptr.to_string(), "host.example.");
        assert_eq!(Ns::RTYPE, Rtype::NS);
        assert_eq!(Cname::new(name("a.b")).rtype(), Rtype::CNAME);
    }
}
