//! Record data from [RFC 1712].
//!
//! [RFC 1712]: https://tools.ietf.org/html/rfc1712

use crate::base::charstr::CharStr;
use crate::base::cursor::Cursor;
use crate::base::iana::Rtype;
use crate::base::rdata::RecordData;
use crate::base::wire::Compose;
use bytes::BufMut;
use core::fmt;

//------------ Gpos ---------------------------------------------------------

/// Gpos record data.
///
/// The Gpos record gives the geographical position of the owner as three
/// character strings holding decimal numbers for longitude, latitude, and
/// altitude.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Gpos {
    longitude: CharStr,
    latitude: CharStr,
    altitude: CharStr,
}

impl Gpos {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::GPOS;

    /// Creates new Gpos record data.
    pub fn new(
        longitude: CharStr,
        latitude: CharStr,
        altitude: CharStr,
    ) -> Self {
        Gpos {
            longitude,
            latitude,
            altitude,
        }
    }

    /// Returns the longitude.
    pub fn longitude(&self) -> &CharStr {
        &self.longitude
    }

    /// Returns the latitude.
    pub fn latitude(&self) -> &CharStr {
        &self.latitude
    }

    /// Returns the altitude.
    pub fn altitude(&self) -> &CharStr {
        &self.altitude
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let longitude = CharStr::read(cursor);
        let latitude = CharStr::read(cursor);
        Gpos::new(longitude, latitude, CharStr::read(cursor))
    }
}

impl RecordData for Gpos {
    fn rtype(&self) -> Rtype {
        Gpos::RTYPE
    }
}

impl Compose for Gpos {
    fn compose_len(&self) -> usize {
        self.longitude.compose_len()
            + self.latitude.compose_len()
            + self.altitude.compose_len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.longitude.compose(target);
        self.latitude.compose(target);
        self.altitude.compose(target);
    }
}

impl fmt::Display for Gpos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.longitude, self.latitude, self.altitude)
    }
}

//============ Testing =======================================================
