//! Exchanging messages over UDP.
//!
//! A request is sent as a single datagram from a fresh socket bound to a
//! random port. The socket is connected to the server, so datagrams from
//! other peers never reach us. Datagrams with a message ID other than that
//! of the request are ignored. The whole exchange is bounded by the
//! server’s request timeout.

use super::conf::ServerConf;
use super::error::Error;
use crate::base::message::Message;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::trace;

//------------ Module Configuration ------------------------------------------

/// How many times do we try a new random port if we get ‘address in use.’
const RETRY_RANDOM_PORT: usize = 10;

//------------ query ---------------------------------------------------------

/// Sends a request to a server and waits for the response.
pub async fn query(
    request: &Message,
    server: &ServerConf,
) -> Result<Message, Error> {
    match timeout(server.request_timeout, exchange(request, server)).await {
        Ok(res) => res,
        Err(_) => Err(Error::UdpTimeoutNoResponse),
    }
}

async fn exchange(
    request: &Message,
    server: &ServerConf,
) -> Result<Message, Error> {
    let sock = bind(server.addr.is_ipv4())
        .await
        .map_err(|err| Error::UdpBind(Arc::new(err)))?;
    sock.connect(server.addr)
        .await
        .map_err(|err| Error::UdpConnect(Arc::new(err)))?;

    let wire = request.to_bytes();
    let sent = sock
        .send(&wire)
        .await
        .map_err(|err| Error::UdpSend(Arc::new(err)))?;
    if sent != wire.len() {
        return Err(Error::UdpShortSend);
    }

    let id = request.header().id();
    loop {
        let mut buf = vec![0; server.recv_size];
        let len = sock
            .recv(&mut buf)
            .await
            .map_err(|err| Error::UdpReceive(Arc::new(err)))?;
        buf.truncate(len);

        // Only the ID is checked before parsing. A datagram that claims to
        // be our answer has to parse, though.
        if buf.len() < 2 || u16::from_be_bytes([buf[0], buf[1]]) != id {
            trace!(
                "ignoring {} octet datagram with foreign id from {}",
                len,
                server.addr
            );
            continue;
        }
        return Ok(Message::from_bytes(buf)?);
    }
}

/// Binds a UDP socket to a random port.
async fn bind(v4: bool) -> Result<UdpSocket, std::io::Error> {
    let mut i = 0;
    loop {
        let local: SocketAddr = if v4 {
            ([0u8; 4], 0).into()
        } else {
            ([0u16; 8], 0).into()
        };
        match UdpSocket::bind(&local).await {
            Ok(sock) => return Ok(sock),
            Err(err) => {
                if i == RETRY_RANDOM_PORT {
                    return Err(err);
                } else {
                    i += 1
                }
            }
        }
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::Rtype;
    use crate::base::message_builder::MessageBuilder;
    use crate::base::name::Name;
    use crate::base::question::Question;
    use crate::base::record::Record;
    use crate::rdata::A;
    use crate::resolv::conf::Transport;
    use std::str::FromStr;
    use std::time::Duration;

    fn request(id: u16) -> Message {
        MessageBuilder::request(
            id,
            Question::new_in(Name::from_str("example.com").unwrap(), Rtype::A),
            true,
        )
        .into_message()
    }

    #[tokio::test]
    async fn ignores_foreign_ids() {
        crate::logging::init_logging();

        let server_sock = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let mut conf = ServerConf::new(
            server_sock.local_addr().unwrap(),
            Transport::Udp,
        );
        conf.request_timeout = Duration::from_secs(5);

        tokio::spawn(async move {
            let mut buf = [0u8; 512];
            let (len, peer) = server_sock.recv_from(&mut buf).await.unwrap();
            let request = Message::from_bytes(buf[..len].to_vec()).unwrap();

            let mut answer = MessageBuilder::start_answer(&request);
            answer
                .push_answer(Record::new_in(
                    Name::from_str("example.com").unwrap(),
                    60,
                    A::from_octets(192, 0, 2, 1),
                ))
                .unwrap();
            let answer = answer.into_message();

            let mut wrong = answer.clone();
            wrong.header_mut().set_id(request.header().id().wrapping_add(1));
            server_sock.send_to(&wrong.to_bytes(), peer).await.unwrap();
            server_sock.send_to(&answer.to_bytes(), peer).await.unwrap();
        });

        let answer = query(&request(0x1234), &conf).await.unwrap();
        assert_eq!(answer.header().id(), 0x1234);
        assert_eq!(answer.answers().len(), 1);
    }

    #[tokio::test]
    async fn times_out() {
        let server_sock = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let mut conf = ServerConf::new(
            server_sock.local_addr().unwrap(),
            Transport::Udp,
        );
        conf.request_timeout = Duration::from_millis(100);

        let res = query(&request(1), &conf).await;
        assert!(matches!(res, Err(Error::UdpTimeoutNoResponse)));
        drop(server_sock);
    }
}
