use core::fmt;
use core::time::Duration;

use super::message::Message;
use super::record::Record;

/// Interal type for printing a message in dig style
///
/// This is only exposed to users of this library as `impl fmt::Display`.
pub(crate) struct DigPrinter<'a> {
    msg: &'a Message,

    /// Time passed since the message was received.
    ///
    /// If present, records are shown with their remaining TTL.
    elapsed: Option<Duration>,
}

impl<'a> DigPrinter<'a> {
    pub(crate) fn new(msg: &'a Message) -> Self {
        DigPrinter { msg, elapsed: None }
    }

    pub(crate) fn with_elapsed(msg: &'a Message, elapsed: Duration) -> Self {
        DigPrinter {
            msg,
            elapsed: Some(elapsed),
        }
    }

    fn write_section(
        &self,
        f: &mut fmt::Formatter<'_>,
        title: &str,
        records: &[Record],
    ) -> fmt::Result {
        if records.is_empty() {
            return Ok(());
        }
        writeln!(f, "\n;; {} SECTION:", title)?;
        for record in records {
            let ttl = match self.elapsed {
                Some(elapsed) => record.effective_ttl(elapsed),
                None => record.ttl(),
            };
            record.fmt_with_ttl(ttl, f)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<'a> fmt::Display for DigPrinter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Header
        let header = self.msg.header();
        let counts = self.msg.header_counts();

        writeln!(
            f,
            ";; ->>HEADER<<- opcode: {}, status: {}, id: {}",
            header.opcode(),
            header.rcode(),
            header.id()
        )?;
        write!(f, ";; flags: {}", header.flags_str())?;
        writeln!(
            f,
            "; QUERY: {}, ANSWER: {}, AUTHORITY: {}, ADDITIONAL: {}",
            counts.qdcount(),
            counts.ancount(),
            counts.nscount(),
            counts.arcount()
        )?;

        // Question
        if !self.msg.questions().is_empty() {
            writeln!(f, "\n;; QUESTION SECTION:")?;
            for item in self.msg.questions() {
                writeln!(f, ";{}", item)?;
            }
        }

        self.write_section(f, "ANSWER", self.msg.answers())?;
        self.write_section(f, "AUTHORITY", self.msg.authorities())?;
        self.write_section(f, "ADDITIONAL", self.msg.additionals())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::Rtype;
    use crate::base::message_builder::MessageBuilder;
    use crate::base::question::Question;
    use crate::rdata::A;

    #[test]
    fn print() {
        let mut builder = MessageBuilder::request(
            0x1234,
            Question::new_in("example.com".parse().unwrap(), Rtype::A),
            true,
        );
        builder.header_mut().set_qr(true);
        builder
            .push_answer(Record::new_in(
                "example.com".parse().unwrap(),
                300,
                A::from_octets(192, 0, 2, 1),
            ))
            .unwrap();
        let msg = builder.into_message();

        assert_eq!(
            msg.to_string(),
            ";; ->>HEADER<<- opcode: QUERY, status: NOERROR, id: 4660\n\
             ;; flags: qr rd; QUERY: 1, ANSWER: 1, AUTHORITY: 0, \
             ADDITIONAL: 0\n\
             \n\
             ;; QUESTION SECTION:\n\
             ;example.com.\tIN\tA\n\
             \n\
             ;; ANSWER SECTION:\n\
             example.com.\t300\tIN\tA\t192.0.2.1\n"
        );
        assert!(DigPrinter::with_elapsed(&msg, Duration::from_secs(100))
            .to_string()
            .ends_with("example.com.\t200\tIN\tA\t192.0.2.1\n"));
    }
}
