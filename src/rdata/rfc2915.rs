//! Record data from [RFC 2915].
//!
//! [RFC 2915]: https://tools.ietf.org/html/rfc2915

use crate::base::charstr::CharStr;
use crate::base::cursor::Cursor;
use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::rdata::RecordData;
use crate::base::wire::Compose;
use bytes::BufMut;
use core::fmt;

//------------ Naptr ---------------------------------------------------------

/// Naptr record data.
///
/// The Naptr record holds a rewrite rule for the Dynamic Delegation
/// Discovery System. Rules are processed in order, then by preference.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Naptr {
    order: u16,
    preference: u16,
    flags: CharStr,
    services: CharStr,
    regexp: CharStr,
    replacement: Name,
}

impl Naptr {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::NAPTR;

    /// Creates new Naptr record data.
    pub fn new(
        order: u16,
        preference: u16,
        flags: CharStr,
        services: CharStr,
        regexp: CharStr,
        replacement: Name,
    ) -> Self {
        Naptr {
            order,
            preference,
            flags,
            services,
            regexp,
            replacement,
        }
    }

    /// The order in which the records must be processed.
    pub fn order(&self) -> u16 {
        self.order
    }

    /// The order among records with equal `order`.
    pub fn preference(&self) -> u16 {
        self.preference
    }

    /// Returns the flags.
    pub fn flags(&self) -> &CharStr {
        &self.flags
    }

    /// Returns the services field.
    pub fn services(&self) -> &CharStr {
        &self.services
    }

    /// Returns the regular expression.
    pub fn regexp(&self) -> &CharStr {
        &self.regexp
    }

    /// Returns the replacement name.
    pub fn replacement(&self) -> &Name {
        &self.replacement
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let order = cursor.read_u16();
        let preference = cursor.read_u16();
        let flags = CharStr::read(cursor);
        let services = CharStr::read(cursor);
        let regexp = CharStr::read(cursor);
        Naptr::new(
            order,
            preference,
            flags,
            services,
            regexp,
            cursor.read_name(),
        )
    }
}

impl RecordData for Naptr {
    fn rtype(&self) -> Rtype {
        Naptr::RTYPE
    }
}

impl Compose for Naptr {
    fn compose_len(&self) -> usize {
        4 + self.flags.compose_len()
            + self.services.compose_len()
            + self.regexp.compose_len()
            + self.replacement.compose_len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.order.compose(target);
        self.preference.compose(target);
        self.flags.compose(target);
        self.services.compose(target);
        self.regexp.compose(target);
        self.replacement.compose(target);
    }
}

impl fmt::Display for Naptr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} \"{}\" \"{}\" \"{}\" {}",
            self.order,
            self.preference,
            self.flags,
            self.services,
            self.regexp,
            self.replacement
        )
    }
}

//============ Testing =======================================================
