//! Building a new DNS message.
//!
//! The [`MessageBuilder`] collects a header, questions, and records into a
//! [`Message`]. Questions and records can be pushed in any order; they end
//! up in their section. Each push checks that the section count still
//! fits into its 16 bit header field and, if a size limit has been set,
//! that the composed message would still fit into that limit.
//!
//! Messages are always composed without name compression.
//!
//! # Example
//!
//! ```
//! use dnsstub::base::{Class, Message, MessageBuilder, Question, Rtype};
//!
//! let question =
//!     Question::from_str_name("example.com", Rtype::A, Class::IN).unwrap();
//! let builder = MessageBuilder::request(1, question, true);
//! let wire = builder.into_message().to_bytes();
//! assert_eq!(Message::from_bytes(wire).unwrap().questions().len(), 1);
//! ```

use super::header::{Header, HeaderSection};
use super::iana::Opcode;
use super::message::Message;
use super::question::Question;
use super::record::Record;
use super::wire::Compose;
use core::fmt;

//------------ MessageBuilder ------------------------------------------------

/// Builds a message by pushing questions and records.
#[derive(Clone, Debug, Default)]
pub struct MessageBuilder {
    header: Header,
    questions: Vec<Question>,
    answers: Vec<Record>,
    authorities: Vec<Record>,
    additionals: Vec<Record>,

    /// The size of the message composed so far.
    size: usize,

    /// The maximum size of the composed message.
    limit: Option<usize>,
}

impl MessageBuilder {
    /// Creates a new builder for an empty message.
    pub fn new() -> Self {
        MessageBuilder {
            size: HeaderSection::LEN,
            ..Default::default()
        }
    }

    /// Creates a builder for a standard query with a single question.
    ///
    /// The opcode is QUERY and the RD flag is set according to `recurse`.
    pub fn request(id: u16, question: Question, recurse: bool) -> Self {
        let mut res = Self::new();
        res.header.set_id(id);
        res.header.set_opcode(Opcode::QUERY);
        res.header.set_rd(recurse);
        res.size += question.compose_len();
        res.questions.push(question);
        res
    }

    /// Creates a builder for a response to `request`.
    ///
    /// The ID, opcode, RD flag and questions are copied from the request
    /// and the QR flag is set.
    pub fn start_answer(request: &Message) -> Self {
        let mut res = Self::new();
        let header = request.header();
        res.header.set_id(header.id());
        res.header.set_opcode(header.opcode());
        res.header.set_rd(header.rd());
        res.header.set_qr(true);
        for question in request.questions() {
            res.size += question.compose_len();
            res.questions.push(question.clone());
        }
        res
    }

    /// Limits the size of the composed message.
    ///
    /// Pushes that would make the message larger fail with
    /// [`PushError::ShortBuf`].
    pub fn set_push_limit(&mut self, limit: usize) {
        self.limit = Some(limit)
    }

    /// Returns a reference to the header.
    pub fn header(&self) -> Header {
        self.header
    }

    /// Returns a mutable reference to the header.
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Returns the size of the message composed so far.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Appends a question to the question section.
    pub fn push_question(
        &mut self,
        question: Question,
    ) -> Result<(), PushError> {
        self.check_push(self.questions.len(), question.compose_len())?;
        self.size += question.compose_len();
        self.questions.push(question);
        Ok(())
    }

    /// Appends a record to the answer section.
    pub fn push_answer(&mut self, record: Record) -> Result<(), PushError> {
        self.check_push(self.answers.len(), record.compose_len())?;
        self.size += record.compose_len();
        self.answers.push(record);
        Ok(())
    }

    /// Appends a record to the authority section.
    pub fn push_authority(
        &mut self,
        record: Record,
    ) -> Result<(), PushError> {
        self.check_push(self.authorities.len(), record.compose_len())?;
        self.size += record.compose_len();
        self.authorities.push(record);
        Ok(())
    }

    /// Appends a record to the additional section.
    pub fn push_additional(
        &mut self,
        record: Record,
    ) -> Result<(), PushError> {
        self.check_push(self.additionals.len(), record.compose_len())?;
        self.size += record.compose_len();
        self.additionals.push(record);
        Ok(())
    }

    fn check_push(&self, count: usize, len: usize) -> Result<(), PushError> {
        if count >= usize::from(u16::MAX) {
            return Err(PushError::CountOverflow);
        }
        match self.limit {
            Some(limit) if self.size + len > limit => Err(PushError::ShortBuf),
            _ => Ok(()),
        }
    }

    /// Finishes building and returns the message.
    pub fn into_message(self) -> Message {
        Message::from_parts(
            self.header,
            self.questions,
            self.answers,
            self.authorities,
            self.additionals,
        )
    }
}

//============ Errors ========================================================

/// Pushing to a message builder failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PushError {
    /// The section already has the maximum number of entries.
    CountOverflow,

    /// The message would grow beyond its size limit.
    ShortBuf,
}

impl fmt::Display for PushError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            PushError::CountOverflow => f.write_str("counter overflow"),
            PushError::ShortBuf => f.write_str("buffer size exceeded"),
        }
    }
}

impl std::error::Error for PushError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::Rtype;
    use crate::base::name::Name;
    use crate::rdata::A;
    use core::str::FromStr;

    fn question() -> Question {
        Question::new_in(Name::from_str("example.com").unwrap(), Rtype::A)
    }

    #[test]
    fn request() {
        let builder = MessageBuilder::request(0xBEEF, question(), true);
        let msg = builder.into_message();
        let wire = msg.to_bytes();
        assert_eq!(
            wire.as_ref(),
            b"\xbe\xef\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00\
              \x07example\x03com\x00\x00\x01\x00\x01"
        );
        assert_eq!(msg.size(), wire.len());

        let msg = MessageBuilder::request(1, question(), false).into_message();
        assert!(!msg.header().rd());
    }

    #[test]
    fn start_answer() {
        let request = MessageBuilder::request(7, question(), true).into_message();
        let mut builder = MessageBuilder::start_answer(&request);
        builder
            .push_answer(Record::new_in(
                question().qname().clone(),
                60,
                A::from_octets(192, 0, 2, 1),
            ))
            .unwrap();
        let answer = builder.into_message();
        assert!(answer.is_answer(&request));
        assert_eq!(answer.header_counts().ancount(), 1);
    }

    #[test]
    fn push_limit() {
        let mut builder = MessageBuilder::request(7, question(), true);
        let record = Record::new_in(
            question().qname().clone(),
            60,
            A::from_octets(192, 0, 2, 1),
        );
        builder.set_push_limit(builder.size() + record.compose_len());
        assert_eq!(builder.push_answer(record.clone()), Ok(()));
        assert_eq!(
            builder.push_additional(record),
            Err(PushError::ShortBuf)
        );
        assert_eq!(builder.into_message().header_counts().arcount(), 0);
    }
}
