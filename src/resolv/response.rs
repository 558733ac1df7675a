//! The outcome of a query.

use super::clock::Elapsed;
use crate::base::dig_printer::DigPrinter;
use crate::base::iana::Rcode;
use crate::base::message::Message;
use crate::base::name::Name;
use crate::rdata::{Aaaa, Mx, Ptr, Srv, Txt, A};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use std::{fmt, ops};

//------------ Module Configuration ------------------------------------------

/// The error string of a response produced when no server answered.
pub const TIMEOUT_ERROR: &str = "Timeout Error";

//------------ Response ------------------------------------------------------

/// The response to a query.
///
/// This type wraps the DNS [`Message`] received from a server and adds
/// where and when it was received. It dereferences into the message.
///
/// If no server answered at all, the response carries an error and an
/// empty message instead. Check [`error`][Self::error] before looking at
/// the message.
///
/// Records of a response age: the TTL of each record decays with the time
/// passed since the response was received. The aged TTLs are used when
/// the response is printed and when deciding whether a cached response
/// may still be used.
#[derive(Clone, Debug)]
pub struct Response {
    /// The message received.
    message: Message,

    /// The server the message was received from.
    server: Option<SocketAddr>,

    /// When the message was received.
    received: Arc<dyn Elapsed>,

    /// What went wrong, if anything.
    error: Option<String>,
}

impl Response {
    /// Creates a response for a message received from `server`.
    pub fn new(
        message: Message,
        server: SocketAddr,
        received: impl Elapsed + 'static,
    ) -> Self {
        Response {
            message,
            server: Some(server),
            received: Arc::new(received),
            error: None,
        }
    }

    /// Creates the response for a query that nobody answered.
    pub fn timeout(received: impl Elapsed + 'static) -> Self {
        Self::failed(TIMEOUT_ERROR, received)
    }

    /// Creates the response for a query that failed for another reason.
    pub fn failed(
        error: impl Into<String>,
        received: impl Elapsed + 'static,
    ) -> Self {
        Response {
            message: Message::default(),
            server: None,
            received: Arc::new(received),
            error: Some(error.into()),
        }
    }

    /// Returns a reference to the message.
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Trades the response for its message.
    pub fn into_message(self) -> Message {
        self.message
    }

    /// Returns the address of the server that sent the response.
    pub fn server(&self) -> Option<SocketAddr> {
        self.server
    }

    /// Returns the error if the query failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns whether a server responded at all.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Returns the time passed since the response was received.
    pub fn elapsed(&self) -> Duration {
        self.received.elapsed()
    }

    /// Returns whether the response may be kept in a cache.
    ///
    /// This is the case for successful NOERROR responses with a question.
    pub fn is_cacheable(&self) -> bool {
        self.is_success()
            && self.message.rcode() == Rcode::NOERROR
            && !self.message.questions().is_empty()
    }

    /// Returns whether any of the records has run out of time to live.
    pub fn is_expired(&self) -> bool {
        let elapsed = self.elapsed();
        self.message
            .all_records()
            .any(|record| record.effective_ttl(elapsed) == 0)
    }
}

/// # Typed Answers
///
impl Response {
    /// Returns the IPv4 addresses in the answer section.
    pub fn a_records(&self) -> Vec<Ipv4Addr> {
        self.message.answer_records::<A>().map(A::addr).collect()
    }

    /// Returns the IPv6 addresses in the answer section.
    pub fn aaaa_records(&self) -> Vec<Ipv6Addr> {
        self.message.answer_records::<Aaaa>().map(Aaaa::addr).collect()
    }

    /// Returns the mail exchangers in the answer section.
    ///
    /// They are sorted by ascending preference.
    pub fn mx_records(&self) -> Vec<Mx> {
        let mut res: Vec<_> =
            self.message.answer_records::<Mx>().cloned().collect();
        res.sort();
        res
    }

    /// Returns the services in the answer section.
    ///
    /// They are sorted by ascending priority and weight.
    pub fn srv_records(&self) -> Vec<Srv> {
        let mut res: Vec<_> =
            self.message.answer_records::<Srv>().cloned().collect();
        res.sort();
        res
    }

    /// Returns the text records in the answer section.
    pub fn txt_records(&self) -> Vec<Txt> {
        self.message.answer_records::<Txt>().cloned().collect()
    }

    /// Returns the names pointed to by PTR records in the answer section.
    pub fn ptr_names(&self) -> Vec<Name> {
        self.message
            .answer_records::<Ptr>()
            .map(|ptr| ptr.ptrdname().clone())
            .collect()
    }
}

//--- Deref

impl ops::Deref for Response {
    type Target = Message;

    fn deref(&self) -> &Message {
        &self.message
    }
}

//--- Display

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error) = self.error.as_ref() {
            return writeln!(f, ";; {}", error);
        }
        fmt::Display::fmt(
            &DigPrinter::with_elapsed(&self.message, self.elapsed()),
            f,
        )?;
        if let Some(server) = self.server {
            writeln!(f, "\n;; SERVER: {}", server)?;
        }
        writeln!(f, ";; MSG SIZE  rcvd: {}", self.message.size())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::Rtype;
    use crate::base::message_builder::MessageBuilder;
    use crate::base::question::Question;
    use crate::base::record::Record;
    use crate::resolv::clock::{Clock, FakeClock};
    use std::str::FromStr;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    fn server() -> SocketAddr {
        SocketAddr::from(([192, 0, 2, 53], 53))
    }

    fn mx_response(clock: &FakeClock) -> Response {
        let mut builder = MessageBuilder::request(
            1,
            Question::new_in(name("example.com"), Rtype::MX),
            true,
        );
        builder.header_mut().set_qr(true);
        for (pref, exchange, ttl) in [
            (20, "mx2.example.com", 300),
            (10, "mx1.example.com", 60),
            (30, "mx3.example.com", 300),
        ] {
            builder
                .push_answer(Record::new_in(
                    name("example.com"),
                    ttl,
                    Mx::new(pref, name(exchange)),
                ))
                .unwrap();
        }
        Response::new(builder.into_message(), server(), clock.now())
    }

    #[test]
    fn sorted_mx() {
        let response = mx_response(&FakeClock::new());
        let prefs: Vec<_> =
            response.mx_records().iter().map(Mx::preference).collect();
        assert_eq!(prefs, [10, 20, 30]);
        assert!(response.a_records().is_empty());
        assert_eq!(response.server(), Some(server()));
    }

    #[test]
    fn expiry() {
        let clock = FakeClock::new();
        let response = mx_response(&clock);
        assert!(response.is_cacheable());
        assert!(!response.is_expired());

        clock.adjust_time(Duration::from_secs(59));
        assert!(!response.is_expired());
        clock.adjust_time(Duration::from_secs(1));
        assert!(response.is_expired());
        assert_eq!(response.elapsed(), Duration::from_secs(60));
    }

    #[test]
    fn timeout() {
        let response = Response::timeout(FakeClock::new().now());
        assert_eq!(response.error(), Some("Timeout Error"));
        assert!(!response.is_success());
        assert!(!response.is_cacheable());
        assert_eq!(response.all_records().count(), 0);
        assert_eq!(response.server(), None);
        assert_eq!(response.to_string(), ";; Timeout Error\n");
    }

    #[test]
    fn display_ages_ttls() {
        let clock = FakeClock::new();
        let response = mx_response(&clock);
        clock.adjust_time(Duration::from_secs(100));
        let text = response.to_string();
        assert!(text.contains("example.com.\t200\tIN\tMX\t20 mx2.example.com."));
        assert!(text.contains("example.com.\t0\tIN\tMX\t10 mx1.example.com."));
        assert!(text.contains(";; SERVER: 192.0.2.53:53"));
    }
}
