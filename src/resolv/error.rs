//! Error type for the transports.
//!
//! None of these errors ever reach users of the resolver. A failed
//! exchange is logged and the next server or attempt is tried. They only
//! surface through the transport functions themselves.

use crate::base::wire::ParseError;
use std::error;
use std::fmt;
use std::io;
use std::sync::Arc;

//------------ Error ---------------------------------------------------------

/// A single exchange with a server failed.
#[derive(Clone, Debug)]
pub enum Error {
    /// Binding a UDP socket gave an error.
    UdpBind(Arc<io::Error>),

    /// Connecting a UDP socket gave an error.
    UdpConnect(Arc<io::Error>),

    /// Sending over a UDP socket gave an error.
    UdpSend(Arc<io::Error>),

    /// Sending over a UDP socket gave a partial result.
    UdpShortSend,

    /// Receiving from a UDP socket gave an error.
    UdpReceive(Arc<io::Error>),

    /// Timeout receiving a response over a UDP socket.
    UdpTimeoutNoResponse,

    /// Connecting to a TCP server gave an error.
    TcpConnect(Arc<io::Error>),

    /// Connecting to a TCP server took too long.
    TcpConnectTimeout,

    /// Writing to a stream gave an error.
    StreamWrite(Arc<io::Error>),

    /// Reading from a stream gave an error.
    StreamRead(Arc<io::Error>),

    /// Reading from a stream took too long.
    StreamTimeout,

    /// Reading from a stream ended unexpectedly.
    StreamUnexpectedEndOfData,

    /// The request is too large for the transport.
    MessageTooLarge,

    /// A response could not be parsed.
    ParseError(ParseError),
}

impl Error {
    /// Returns whether the error is a timeout of some sort.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Error::UdpTimeoutNoResponse
                | Error::TcpConnectTimeout
                | Error::StreamTimeout
        )
    }
}

//--- From

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::ParseError(err)
    }
}

//--- Display and Error

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UdpBind(_) => write!(f, "error binding UDP socket"),
            Error::UdpConnect(_) => write!(f, "error connecting UDP socket"),
            Error::UdpSend(_) => write!(f, "error sending to UDP socket"),
            Error::UdpShortSend => write!(f, "partial send to UDP socket"),
            Error::UdpReceive(_) => {
                write!(f, "error receiving from UDP socket")
            }
            Error::UdpTimeoutNoResponse => {
                write!(f, "timeout waiting for response")
            }
            Error::TcpConnect(_) => write!(f, "error connecting TCP socket"),
            Error::TcpConnectTimeout => {
                write!(f, "timeout connecting TCP socket")
            }
            Error::StreamWrite(_) => write!(f, "error writing to stream"),
            Error::StreamRead(_) => write!(f, "error reading from stream"),
            Error::StreamTimeout => write!(f, "timeout reading from stream"),
            Error::StreamUnexpectedEndOfData => {
                write!(f, "unexpected end of data")
            }
            Error::MessageTooLarge => write!(f, "message too large"),
            Error::ParseError(err) => {
                write!(f, "error parsing response: {}", err)
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::UdpBind(e)
            | Error::UdpConnect(e)
            | Error::UdpSend(e)
            | Error::UdpReceive(e)
            | Error::TcpConnect(e)
            | Error::StreamWrite(e)
            | Error::StreamRead(e) => Some(e.as_ref()),
            Error::ParseError(e) => Some(e),
            Error::UdpShortSend
            | Error::UdpTimeoutNoResponse
            | Error::TcpConnectTimeout
            | Error::StreamTimeout
            | Error::StreamUnexpectedEndOfData
            | Error::MessageTooLarge => None,
        }
    }
}
