//! Record data from [RFC 1876].
//!
//! [RFC 1876]: https://tools.ietf.org/html/rfc1876

use crate::base::cursor::Cursor;
use crate::base::iana::Rtype;
use crate::base::rdata::RecordData;
use crate::base::wire::Compose;
use bytes::BufMut;
use core::fmt;

/// The latitude and longitude value of the equator and prime meridian.
const ORIGIN: u32 = 1 << 31;

/// The altitude value of the reference sphere in centimeters.
const ALTITUDE_ORIGIN: i64 = 10_000_000;

//------------ Loc ----------------------------------------------------------

/// Loc record data.
///
/// The Loc record describes the location of the owner: a position on the
/// globe given as latitude, longitude, and altitude plus the size of the
/// described object and the precision of the position.
///
/// Latitude and longitude are thousandths of a second of arc offset by
/// 2<sup>31</sup>. The altitude is in centimeters above a base 100,000
/// meters below the WGS 84 reference spheroid. The size and precision
/// values encode a mantissa in the high nibble and a power of ten in the
/// low nibble, in centimeters.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Loc {
    version: u8,
    size: u8,
    horiz_pre: u8,
    vert_pre: u8,
    latitude: u32,
    longitude: u32,
    altitude: u32,
}

impl Loc {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::LOC;

    /// Creates new Loc record data.
    pub fn new(
        size: u8,
        horiz_pre: u8,
        vert_pre: u8,
        latitude: u32,
        longitude: u32,
        altitude: u32,
    ) -> Self {
        Loc {
            version: 0,
            size,
            horiz_pre,
            vert_pre,
            latitude,
            longitude,
            altitude,
        }
    }

    /// Returns the version.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Returns the size of the sphere.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Returns the horizontal precision.
    pub fn horiz_pre(&self) -> u8 {
        self.horiz_pre
    }

    /// Returns the vertical precision.
    pub fn vert_pre(&self) -> u8 {
        self.vert_pre
    }

    /// Returns the latitude.
    pub fn latitude(&self) -> u32 {
        self.latitude
    }

    /// Returns the longitude.
    pub fn longitude(&self) -> u32 {
        self.longitude
    }

    /// Returns the altitude.
    pub fn altitude(&self) -> u32 {
        self.altitude
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let version = cursor.read_u8();
        let size = cursor.read_u8();
        let horiz_pre = cursor.read_u8();
        let vert_pre = cursor.read_u8();
        let latitude = cursor.read_u32();
        let longitude = cursor.read_u32();
        Loc {
            version,
            size,
            horiz_pre,
            vert_pre,
            latitude,
            longitude,
            altitude: cursor.read_u32(),
        }
    }
}

impl RecordData for Loc {
    fn rtype(&self) -> Rtype {
        Loc::RTYPE
    }
}

impl Compose for Loc {
    fn compose_len(&self) -> usize {
        16
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.version.compose(target);
        self.size.compose(target);
        self.horiz_pre.compose(target);
        self.vert_pre.compose(target);
        self.latitude.compose(target);
        self.longitude.compose(target);
        self.altitude.compose(target);
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_angle(self.latitude, 'N', 'S', f)?;
        f.write_str(" ")?;
        write_angle(self.longitude, 'E', 'W', f)?;
        f.write_str(" ")?;
        write_centimeters(i64::from(self.altitude) - ALTITUDE_ORIGIN, f)?;
        for value in [self.size, self.horiz_pre, self.vert_pre] {
            f.write_str(" ")?;
            write_centimeters(precision_to_centimeters(value), f)?;
        }
        Ok(())
    }
}

/// Writes an angle as degrees, minutes, seconds, and hemisphere.
fn write_angle(
    value: u32,
    positive: char,
    negative: char,
    f: &mut fmt::Formatter,
) -> fmt::Result {
    let (millis, hemisphere) = if value >= ORIGIN {
        (value - ORIGIN, positive)
    } else {
        (ORIGIN - value, negative)
    };
    let secs = millis / 1000;
    write!(
        f,
        "{} {} {}.{:03} {}",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60,
        millis % 1000,
        hemisphere
    )
}

/// Writes a length given in centimeters as meters.
fn write_centimeters(value: i64, f: &mut fmt::Formatter) -> fmt::Result {
    let sign = if value < 0 { "-" } else { "" };
    let value = value.unsigned_abs();
    write!(f, "{}{}.{:02}m", sign, value / 100, value % 100)
}

/// Converts a size or precision value into centimeters.
fn precision_to_centimeters(value: u8) -> i64 {
    let mantissa = i64::from(value >> 4);
    let exponent = u32::from(value & 0x0F).min(9);
    mantissa * 10i64.pow(exponent)
}

//============ Testing =======================================================
