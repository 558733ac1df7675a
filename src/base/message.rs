//! Accessing existing DNS messages.
//!
//! This module defines the [`Message`] type. A message is parsed from wire
//! data in one go into its header and four sections, so all records are
//! readily available afterwards.
//!
//! There are two ways to parse a message. [`Message::from_bytes`] is strict:
//! it rejects the message if any read went past the end of the data or if a
//! domain name was malformed. [`Message::from_bytes_lenient`] never fails.
//! Truncated fields read as zeros and malformed names are cut short. The
//! transports of the resolver use the strict variant.

use super::cursor::Cursor;
use super::dig_printer::DigPrinter;
use super::header::{Header, HeaderCounts, HeaderSection};
use super::iana::Rcode;
use super::question::Question;
use super::record::Record;
use super::wire::{Compose, ParseError};
use crate::rdata::FromAllRecordData;
use bytes::{BufMut, Bytes, BytesMut};
use core::fmt;

//------------ Message -------------------------------------------------------

/// A DNS message.
///
/// The message consists of the header section and the question, answer,
/// authority, and additional sections. When a message is parsed, the counts
/// in the header section reflect the wire data while the sections hold
/// what was actually read. When a message is composed, the counts are
/// taken from the sections.
///
/// The message also remembers the size of the wire data it was parsed from.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Message {
    section: HeaderSection,
    questions: Vec<Question>,
    answers: Vec<Record>,
    authorities: Vec<Record>,
    additionals: Vec<Record>,
    size: usize,
}

/// # Creation and Parsing
///
impl Message {
    /// Creates a message from its parts.
    ///
    /// The counts of the header section are set from the sections.
    pub fn from_parts(
        header: Header,
        questions: Vec<Question>,
        answers: Vec<Record>,
        authorities: Vec<Record>,
        additionals: Vec<Record>,
    ) -> Self {
        let mut res = Message {
            section: HeaderSection::new(header, HeaderCounts::new()),
            questions,
            answers,
            authorities,
            additionals,
            size: 0,
        };
        res.fix_counts();
        res.size = res.compose_len();
        res
    }

    /// Parses a message from wire data.
    ///
    /// Fails if the data is too short for the counts given in the header
    /// or if a domain name is malformed.
    pub fn from_bytes(octets: impl Into<Bytes>) -> Result<Self, ParseError> {
        let mut cursor = Cursor::new(octets);
        let res = Self::read(&mut cursor);
        cursor.check()?;
        Ok(res)
    }

    /// Parses a message from wire data without ever failing.
    pub fn from_bytes_lenient(octets: impl Into<Bytes>) -> Self {
        Self::read(&mut Cursor::new(octets))
    }

    fn read(cursor: &mut Cursor) -> Self {
        let section = HeaderSection::read(cursor);
        let counts = section.counts();
        let questions = Self::read_questions(cursor, counts.qdcount());
        let answers = Self::read_records(cursor, counts.ancount());
        let authorities = Self::read_records(cursor, counts.nscount());
        let additionals = Self::read_records(cursor, counts.arcount());
        Message {
            section,
            questions,
            answers,
            authorities,
            additionals,
            size: cursor.len(),
        }
    }

    fn read_questions(cursor: &mut Cursor, count: u16) -> Vec<Question> {
        let mut res = Vec::new();
        for _ in 0..count {
            if cursor.overrun() {
                break;
            }
            res.push(Question::read(cursor));
        }
        res
    }

    fn read_records(cursor: &mut Cursor, count: u16) -> Vec<Record> {
        let mut res = Vec::new();
        for _ in 0..count {
            // Once the data has run out, every further record would be
            // all zeros.
            if cursor.overrun() {
                break;
            }
            res.push(Record::read(cursor));
        }
        res
    }
}

/// # Header Access
///
impl Message {
    /// Returns the message header.
    pub fn header(&self) -> Header {
        self.section.header()
    }

    /// Returns a mutable reference to the message header.
    pub fn header_mut(&mut self) -> &mut Header {
        self.section.header_mut()
    }

    /// Returns the header counts of the message.
    pub fn header_counts(&self) -> HeaderCounts {
        self.section.counts()
    }

    /// Returns the complete header section.
    pub fn header_section(&self) -> HeaderSection {
        self.section
    }

    /// Returns the response code of the message.
    pub fn rcode(&self) -> Rcode {
        self.header().rcode()
    }

    /// Returns whether this message is an answer to `request`.
    ///
    /// This is the case if the QR bit is set, the IDs match, and the
    /// message has the same first question.
    pub fn is_answer(&self, request: &Message) -> bool {
        self.header().qr()
            && self.header().id() == request.header().id()
            && (self.questions.is_empty()
                || self.first_question() == request.first_question())
    }
}

/// # Sections
///
impl Message {
    /// Returns the questions of the message.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Returns the first question, if there is one.
    pub fn first_question(&self) -> Option<&Question> {
        self.questions.first()
    }

    /// Returns the records of the answer section.
    pub fn answers(&self) -> &[Record] {
        &self.answers
    }

    /// Returns the records of the authority section.
    pub fn authorities(&self) -> &[Record] {
        &self.authorities
    }

    /// Returns the records of the additional section.
    pub fn additionals(&self) -> &[Record] {
        &self.additionals
    }

    /// Returns an iterator over the records of all three record sections.
    pub fn all_records(&self) -> impl Iterator<Item = &Record> {
        self.answers
            .iter()
            .chain(self.authorities.iter())
            .chain(self.additionals.iter())
    }

    /// Returns an iterator over the answer data of type `T`.
    ///
    /// Records of other types, such as a CNAME leading to the requested
    /// records, are skipped.
    pub fn answer_records<'a, T: FromAllRecordData + 'a>(
        &'a self,
    ) -> impl Iterator<Item = &'a T> {
        self.answers.iter().filter_map(Record::data_as::<T>)
    }

    /// Appends the records of the three record sections of `other`.
    ///
    /// This is used to merge the messages of a zone transfer. The counts
    /// and size are updated accordingly.
    pub fn append_records(&mut self, other: Message) {
        self.answers.extend(other.answers);
        self.authorities.extend(other.authorities);
        self.additionals.extend(other.additionals);
        self.size += other.size.saturating_sub(HeaderSection::LEN);
        self.fix_counts();
    }

    /// Sets the header counts to the number of items in the sections.
    pub fn fix_counts(&mut self) {
        let counts = self.section.counts_mut();
        counts.set_qdcount(len_to_count(self.questions.len()));
        counts.set_ancount(len_to_count(self.answers.len()));
        counts.set_nscount(len_to_count(self.authorities.len()));
        counts.set_arcount(len_to_count(self.additionals.len()));
    }
}

/// # Size and Composing
///
impl Message {
    /// Returns the size of the wire data in octets.
    ///
    /// For a parsed message this is the length of the data it was parsed
    /// from. For merged messages, it is the sum of the sizes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Composes the message into wire data.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.compose_len());
        self.compose(&mut buf);
        buf.freeze()
    }

    /// Returns a value that displays the message in the style of dig.
    pub fn display_dig(&self) -> impl fmt::Display + '_ {
        DigPrinter::new(self)
    }
}

fn len_to_count(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}

//--- Compose

impl Compose for Message {
    fn compose_len(&self) -> usize {
        HeaderSection::LEN
            + self
                .questions
                .iter()
                .map(Compose::compose_len)
                .sum::<usize>()
            + self.all_records().map(Compose::compose_len).sum::<usize>()
    }

    /// Composes the message.
    ///
    /// The counts are taken from the sections and no name compression is
    /// applied.
    fn compose<Target: BufMut>(&self, target: &mut Target) {
        let mut section = self.section;
        let counts = section.counts_mut();
        counts.set_qdcount(len_to_count(self.questions.len()));
        counts.set_ancount(len_to_count(self.answers.len()));
        counts.set_nscount(len_to_count(self.authorities.len()));
        counts.set_arcount(len_to_count(self.additionals.len()));
        section.compose(target);
        for question in &self.questions {
            question.compose(target)
        }
        for record in self.all_records() {
            record.compose(target)
        }
    }
}

//--- Display

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&DigPrinter::new(self), f)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::{Class, Opcode, Rtype};
    use crate::base::message_builder::MessageBuilder;
    use crate::base::name::Name;
    use crate::base::wire::FormError;
    use crate::rdata::{Mx, Soa, A};
    use core::str::FromStr;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    fn answer() -> Message {
        let mut builder = MessageBuilder::new();
        builder.header_mut().set_id(0x1234);
        builder.header_mut().set_qr(true);
        builder.header_mut().set_rd(true);
        builder.header_mut().set_ra(true);
        builder
            .push_question(Question::new_in(name("example.com"), Rtype::A))
            .unwrap();
        builder
            .push_answer(Record::new_in(
                name("example.com"),
                3600,
                A::from_octets(192, 0, 2, 1),
            ))
            .unwrap();
        builder
            .push_authority(Record::new_in(
                name("example.com"),
                3600,
                Soa::new(
                    name("ns.example.com"),
                    name("admin.example.com"),
                    1,
                    2,
                    3,
                    4,
                    5,
                ),
            ))
            .unwrap();
        builder
            .push_additional(Record::new_in(
                name("example.com"),
                60,
                Mx::new(10, name("mail.example.com")),
            ))
            .unwrap();
        builder.into_message()
    }

    #[test]
    fn compose_and_parse() {
        let msg = answer();
        let wire = msg.to_bytes();
        assert_eq!(wire.len(), msg.size());

        let parsed = Message::from_bytes(wire.clone()).unwrap();
        assert_eq!(parsed, msg);
        assert_eq!(parsed.size(), wire.len());
        assert_eq!(parsed.header().id(), 0x1234);
        assert_eq!(parsed.header().opcode(), Opcode::QUERY);
        assert_eq!(parsed.rcode(), Rcode::NOERROR);
        assert_eq!(parsed.header_counts().ancount(), 1);
        assert_eq!(parsed.header_counts().nscount(), 1);
        assert_eq!(parsed.header_counts().arcount(), 1);
        assert_eq!(parsed.first_question().map(Question::qclass), Some(Class::IN));
        assert_eq!(
            parsed.answer_records::<A>().collect::<Vec<_>>(),
            [&A::from_octets(192, 0, 2, 1)]
        );
        assert_eq!(parsed.all_records().count(), 3);
    }

    #[test]
    fn truncated_message() {
        let wire = answer().to_bytes();
        let short = wire.slice(..wire.len() - 3);
        assert_eq!(
            Message::from_bytes(short.clone()),
            Err(ParseError::ShortInput)
        );

        let lenient = Message::from_bytes_lenient(short);
        assert_eq!(lenient.answers().len(), 1);
        assert_eq!(lenient.authorities().len(), 1);
        assert_eq!(lenient.additionals().len(), 1);
        assert_eq!(
            lenient.additionals()[0].data_as::<Mx>().map(Mx::preference),
            Some(10)
        );
    }

    #[test]
    fn short_header() {
        assert_eq!(
            Message::from_bytes(&b"\x12\x34\x81"[..]),
            Err(ParseError::ShortInput)
        );
        let msg = Message::from_bytes_lenient(&b"\x12\x34\x81"[..]);
        assert_eq!(msg.header().id(), 0x1234);
        assert!(msg.questions().is_empty());
    }

    #[test]
    fn excessive_question_count() {
        // A header claiming 65535 questions and nothing else.
        let wire = b"\x00\x01\x01\x00\xff\xff\x00\x00\x00\x00\x00\x00";
        assert_eq!(
            Message::from_bytes(&wire[..]),
            Err(ParseError::ShortInput)
        );
        let msg = Message::from_bytes_lenient(&wire[..]);
        assert_eq!(msg.questions().len(), 1);
        assert!(msg.answers().is_empty());
    }

    #[test]
    fn bad_compression_pointer() {
        // One question whose name is a pointer to itself.
        let wire = b"\x00\x01\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00\
                     \xc0\x0c\x00\x01\x00\x01";
        assert_eq!(
            Message::from_bytes(&wire[..]),
            Err(ParseError::Form(FormError::new(
                "too many compression pointers"
            )))
        );
        assert_eq!(Message::from_bytes_lenient(&wire[..]).questions().len(), 1);
    }

    #[test]
    fn is_answer() {
        let msg = answer();
        let mut request = MessageBuilder::request(
            0x1234,
            Question::new_in(name("example.com"), Rtype::A),
            true,
        )
        .into_message();
        assert!(msg.is_answer(&request));
        request.header_mut().set_id(0x4321);
        assert!(!msg.is_answer(&request));
    }

    #[test]
    fn append_records() {
        let mut first = answer();
        let size = first.size();
        first.append_records(answer());
        assert_eq!(first.answers().len(), 2);
        assert_eq!(first.header_counts().ancount(), 2);
        assert_eq!(first.header_counts().qdcount(), 1);
        assert_eq!(first.size(), 2 * size - HeaderSection::LEN);
    }
}
