//! A single question in a DNS message.
//!
//! This module defines the type [`Question`] which represents an entry in
//! the question section of a DNS message.

use super::cursor::Cursor;
use super::iana::{Class, Rtype};
use super::name::{self, Name};
use super::wire::Compose;
use bytes::BufMut;
use core::{fmt, str::FromStr};

//------------ Question ------------------------------------------------------

/// A question in a DNS message.
///
/// In DNS, a question describes what is requested in a query. It consists
/// of three elements: a domain name, a record type, and a class. This type
/// represents such a question.
///
/// The name is always absolute, so its presentation format always ends in
/// a dot.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Question {
    /// The domain name of the question.
    qname: Name,

    /// The record type of the question.
    qtype: Rtype,

    /// The class of the question.
    qclass: Class,
}

/// # Creation and Conversion
///
impl Question {
    /// Creates a new question from its three components.
    pub fn new(qname: Name, qtype: Rtype, qclass: Class) -> Self {
        Question {
            qname,
            qtype,
            qclass,
        }
    }

    /// Creates a new question from a name and record type, assuming class IN.
    pub fn new_in(qname: Name, qtype: Rtype) -> Self {
        Question::new(qname, qtype, Class::IN)
    }

    /// Creates a new question from a name in presentation format.
    ///
    /// A missing final dot is added to the name.
    pub fn from_str_name(
        qname: &str,
        qtype: Rtype,
        qclass: Class,
    ) -> Result<Self, name::FromStrError> {
        Ok(Question::new(Name::from_str(qname)?, qtype, qclass))
    }
}

/// # Field Access
///
impl Question {
    /// Returns a reference to the domain name in the question.
    pub fn qname(&self) -> &Name {
        &self.qname
    }

    /// Replaces the domain name of the question.
    pub fn set_qname(&mut self, qname: Name) {
        self.qname = qname
    }

    /// Returns the record type of the question.
    pub fn qtype(&self) -> Rtype {
        self.qtype
    }

    /// Returns the class of the question.
    pub fn qclass(&self) -> Class {
        self.qclass
    }
}

/// # Parsing and Composing
///
impl Question {
    /// Reads a question from the cursor.
    pub fn read(cursor: &mut Cursor) -> Self {
        let qname = cursor.read_name();
        let qtype = Rtype::read(cursor);
        Question::new(qname, qtype, Class::read(cursor))
    }
}

impl Compose for Question {
    fn compose_len(&self) -> usize {
        self.qname.compose_len() + 4
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.qname.compose(target);
        self.qtype.compose(target);
        self.qclass.compose(target);
    }
}

//--- Display

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.qname, self.qclass, self.qtype)
    }
}

//============ Testing =======================================================
