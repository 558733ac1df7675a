//! Exchanging messages over TCP.
//!
//! Each request opens a new connection. Messages on the stream are
//! preceded by their length as a 16 bit big-endian integer.
//!
//! Zone transfers are special: the server sends the zone as a sequence of
//! messages which starts and ends with the SOA record of the zone. The
//! records of all these messages are merged into a single response.

use super::conf::ServerConf;
use super::error::Error;
use crate::base::iana::{Rcode, Rtype};
use crate::base::message::Message;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

//------------ query ---------------------------------------------------------

/// Sends a request to a server and waits for the response.
///
/// Connecting, writing the request, and reading each message of the
/// response are each bounded by the server’s request timeout. A zone
/// transfer may therefore take longer than the timeout as long as the
/// server keeps sending.
pub async fn query(
    request: &Message,
    server: &ServerConf,
) -> Result<Message, Error> {
    let wire = request.to_bytes();
    let len = u16::try_from(wire.len()).map_err(|_| Error::MessageTooLarge)?;

    let mut sock =
        match timeout(server.request_timeout, TcpStream::connect(server.addr))
            .await
        {
            Ok(Ok(sock)) => sock,
            Ok(Err(err)) => return Err(Error::TcpConnect(Arc::new(err))),
            Err(_) => return Err(Error::TcpConnectTimeout),
        };

    let mut frame = Vec::with_capacity(wire.len() + 2);
    frame.extend_from_slice(&len.to_be_bytes());
    frame.extend_from_slice(&wire);
    send(&mut sock, &frame, server.request_timeout).await?;
    receive(&mut sock, request, server.request_timeout).await
}

/// Writes a framed request to the stream.
async fn send<S: AsyncWrite + Unpin>(
    sock: &mut S,
    frame: &[u8],
    limit: Duration,
) -> Result<(), Error> {
    match timeout(limit, sock.write_all(frame)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(Error::StreamWrite(Arc::new(err))),
        Err(_) => Err(Error::StreamTimeout),
    }
}

/// Reads the response to `request` from the stream.
///
/// Every read waits at most `limit`.
async fn receive<S: AsyncRead + Unpin>(
    sock: &mut S,
    request: &Message,
    limit: Duration,
) -> Result<Message, Error> {
    let id = request.header().id();
    let axfr = request
        .first_question()
        .map(|question| question.qtype() == Rtype::AXFR)
        .unwrap_or(false);

    let mut response: Option<Message> = None;
    loop {
        let msg = read_message(sock, limit).await?;
        if msg.header().id() != id {
            trace!("ignoring message with foreign id {}", msg.header().id());
            continue;
        }
        if msg.rcode() != Rcode::NOERROR {
            return Ok(msg);
        }
        if !axfr {
            return Ok(msg);
        }

        let merged = match response.take() {
            Some(mut merged) => {
                merged.append_records(msg);
                merged
            }
            None => msg,
        };
        let soa_count = count_soa(&merged);
        trace!(
            "AXFR: {} answers accumulated, {} SOA records",
            merged.answers().len(),
            soa_count
        );
        if soa_count >= 2 {
            return Ok(merged);
        }
        response = Some(merged);
    }
}

/// Reads a single length-prefixed message from the stream.
async fn read_message<S: AsyncRead + Unpin>(
    sock: &mut S,
    limit: Duration,
) -> Result<Message, Error> {
    let len = timeout(limit, sock.read_u16())
        .await
        .map_err(|_| Error::StreamTimeout)?
        .map_err(read_error)?;
    let mut buf = vec![0; usize::from(len)];
    timeout(limit, sock.read_exact(&mut buf))
        .await
        .map_err(|_| Error::StreamTimeout)?
        .map_err(read_error)?;
    Ok(Message::from_bytes(buf)?)
}

fn read_error(err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        Error::StreamUnexpectedEndOfData
    } else {
        Error::StreamRead(Arc::new(err))
    }
}

fn count_soa(msg: &Message) -> usize {
    msg.answers()
        .iter()
        .filter(|record| record.rtype() == Rtype::SOA)
        .count()
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::message_builder::MessageBuilder;
    use crate::base::name::Name;
    use crate::base::question::Question;
    use crate::base::record::Record;
    use crate::rdata::{Soa, A};
    use std::str::FromStr;

    const LIMIT: Duration = Duration::from_secs(1);

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    fn frame(msg: &Message) -> Vec<u8> {
        let wire = msg.to_bytes();
        let mut res = (wire.len() as u16).to_be_bytes().to_vec();
        res.extend_from_slice(&wire);
        res
    }

    fn soa() -> Record {
        Record::new_in(
            name("example.com"),
            3600,
            Soa::new(
                name("ns.example.com"),
                name("hostmaster.example.com"),
                1,
                7200,
                3600,
                1209600,
                300,
            ),
        )
    }

    fn a(host: &str) -> Record {
        Record::new_in(name(host), 300, A::from_octets(192, 0, 2, 1))
    }

    #[tokio::test]
    async fn single_message() {
        let request = MessageBuilder::request(
            5,
            Question::new_in(name("example.com"), Rtype::A),
            true,
        )
        .into_message();
        let mut answer = MessageBuilder::start_answer(&request);
        answer.push_answer(a("example.com")).unwrap();
        let answer = answer.into_message();

        let data = frame(&answer);
        let res = receive(&mut data.as_slice(), &request, LIMIT)
            .await
            .unwrap();
        assert_eq!(res, Message::from_bytes(answer.to_bytes()).unwrap());
    }

    #[tokio::test]
    async fn axfr_merge() {
        let request = MessageBuilder::request(
            9,
            Question::new_in(name("example.com"), Rtype::AXFR),
            false,
        )
        .into_message();

        let mut first = MessageBuilder::start_answer(&request);
        first.push_answer(soa()).unwrap();
        first.push_answer(a("a.example.com")).unwrap();
        let first = first.into_message();
        let mut second = MessageBuilder::start_answer(&request);
        second.push_answer(a("b.example.com")).unwrap();
        second.push_answer(a("c.example.com")).unwrap();
        let second = second.into_message();
        let mut third = MessageBuilder::start_answer(&request);
        third.push_answer(soa()).unwrap();
        let third = third.into_message();

        let mut data = Vec::new();
        data.extend(frame(&first));
        data.extend(frame(&second));
        data.extend(frame(&third));
        // Anything after the closing SOA is never read.
        data.extend(frame(&third));

        let res = receive(&mut data.as_slice(), &request, LIMIT)
            .await
            .unwrap();
        assert_eq!(res.answers().len(), 5);
        assert_eq!(res.header_counts().ancount(), 5);
        assert_eq!(res.header_counts().qdcount(), 1);
        assert_eq!(
            res.size(),
            first.size() + second.size() + third.size() - 24
        );
        assert_eq!(count_soa(&res), 2);
    }

    #[tokio::test]
    async fn error_rcode_returns_immediately() {
        let request = MessageBuilder::request(
            9,
            Question::new_in(name("example.com"), Rtype::AXFR),
            false,
        )
        .into_message();
        let mut refused = MessageBuilder::start_answer(&request);
        refused.header_mut().set_rcode(Rcode::REFUSED);
        let data = frame(&refused.into_message());

        let res = receive(&mut data.as_slice(), &request, LIMIT)
            .await
            .unwrap();
        assert_eq!(res.rcode(), Rcode::REFUSED);
    }

    #[tokio::test]
    async fn truncated_stream() {
        let request = MessageBuilder::request(
            5,
            Question::new_in(name("example.com"), Rtype::A),
            true,
        )
        .into_message();
        let data = frame(&request);
        let res =
            receive(&mut &data[..data.len() - 3], &request, LIMIT).await;
        assert!(matches!(res, Err(Error::StreamUnexpectedEndOfData)));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_axfr_within_read_timeout() {
        let request = MessageBuilder::request(
            9,
            Question::new_in(name("example.com"), Rtype::AXFR),
            false,
        )
        .into_message();
        let frames: Vec<_> = [
            soa(),
            a("a.example.com"),
            a("b.example.com"),
            a("c.example.com"),
            soa(),
        ]
        .into_iter()
        .map(|record| {
            let mut msg = MessageBuilder::start_answer(&request);
            msg.push_answer(record).unwrap();
            frame(&msg.into_message())
        })
        .collect();

        let (mut client, mut server) = tokio::io::duplex(4096);
        tokio::spawn(async move {
            for data in frames {
                tokio::time::sleep(Duration::from_millis(150)).await;
                server.write_all(&data).await.unwrap();
            }
            // Keep the stream open until the client is done.
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        // Each frame arrives in time, the transfer as a whole does not.
        let res = receive(&mut client, &request, Duration::from_millis(300))
            .await
            .unwrap();
        assert_eq!(res.answers().len(), 5);
        assert_eq!(count_soa(&res), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_read_times_out() {
        let request = MessageBuilder::request(
            5,
            Question::new_in(name("example.com"), Rtype::A),
            true,
        )
        .into_message();
        let (mut client, _server) = tokio::io::duplex(64);
        let res = receive(&mut client, &request, LIMIT).await;
        assert!(matches!(res, Err(Error::StreamTimeout)));
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_write_times_out() {
        // The peer never reads, so the small pipe fills up.
        let (mut client, _server) = tokio::io::duplex(16);
        let res = send(&mut client, &[0u8; 512], LIMIT).await;
        assert!(matches!(res, Err(Error::StreamTimeout)));
    }
}
