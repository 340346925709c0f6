#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::{Ipv4Addr, SocketAddr};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

#[derive(Clone, Copy)]
enum Mode {
    Answer,
    /// UDP answers carry only the TC bit; the full answer is served over TCP.
    Truncate,
    /// Sends a reply with a foreign id before the real one.
    WrongIdFirst,
    /// Never replies.
    Silent,
}

/// Loopback upstream answering every question with fixed A records.
pub struct MockUpstream {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockUpstream {
    pub async fn answering(addresses: Vec<Ipv4Addr>) -> Self {
        Self::start(Mode::Answer, addresses).await
    }

    pub async fn truncating(addresses: Vec<Ipv4Addr>) -> Self {
        Self::start(Mode::Truncate, addresses).await
    }

    pub async fn wrong_id_first(addresses: Vec<Ipv4Addr>) -> Self {
        Self::start(Mode::WrongIdFirst, addresses).await
    }

    pub async fn silent() -> Self {
        Self::start(Mode::Silent, vec![]).await
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    async fn start(mode: Mode, addresses: Vec<Ipv4Addr>) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let listener = TcpListener::bind(addr).await.unwrap();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        let response = match mode {
                            Mode::Silent => continue,
                            Mode::Answer => build_response(&buf[..len], &addresses, false),
                            Mode::Truncate => build_response(&buf[..len], &addresses, true),
                            Mode::WrongIdFirst => {
                                let mut spoofed = build_response(&buf[..len], &[], false);
                                spoofed[0] ^= 0xff;
                                let _ = socket.send_to(&spoofed, peer).await;
                                build_response(&buf[..len], &addresses, false)
                            }
                        };
                        let _ = socket.send_to(&response, peer).await;
                    }
                    accepted = listener.accept() => {
                        let Ok((mut stream, _)) = accepted else { continue };
                        let addresses = addresses.clone();
                        tokio::spawn(async move {
                            let mut len_buf = [0u8; 2];
                            if stream.read_exact(&mut len_buf).await.is_err() {
                                return;
                            }
                            let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                            if stream.read_exact(&mut query).await.is_err() {
                                return;
                            }
                            let response = build_response(&query, &addresses, false);
                            let _ = stream.write_all(&(response.len() as u16).to_be_bytes()).await;
                            let _ = stream.write_all(&response).await;
                        });
                    }
                }
            }
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn build_response(query_bytes: &[u8], addresses: &[Ipv4Addr], truncated: bool) -> Vec<u8> {
    let query = Message::from_vec(query_bytes).unwrap();
    let mut response = Message::new(query.id(), MessageType::Response, query.op_code());
    response
        .set_recursion_desired(query.recursion_desired())
        .set_recursion_available(true)
        .add_queries(query.queries().to_vec());

    if truncated {
        response.set_truncated(true);
    } else if let Some(question) = query.queries().first() {
        for addr in addresses {
            response.add_answer(Record::from_rdata(
                question.name().clone(),
                60,
                RData::A(A(*addr)),
            ));
        }
    }

    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    response.emit(&mut encoder).unwrap();
    buf
}
