#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{RData, Record, RecordType};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How the mock upstream reacts to a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Answers A/AAAA with the configured addresses, other types empty.
    Answer,
    /// Never replies.
    Silent,
    /// Sends a reply with a foreign transaction ID before the real one.
    WrongIdFirst,
    /// Replies with the right ID followed by bytes that are not DNS.
    Garbage,
}

/// Mock upstream DNS server on an ephemeral localhost port.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub const ANSWER_V4: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);
    pub const ANSWER_V6: Ipv6Addr = Ipv6Addr::new(0x2606, 0x2800, 0x220, 0x1, 0, 0, 0, 0x1946);
    pub const ANSWER_TTL: u32 = 60;

    pub async fn start() -> Result<Self, std::io::Error> {
        Self::start_with(MockBehavior::Answer).await
    }

    pub async fn start_with(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = queries.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        counter.fetch_add(1, Ordering::SeqCst);
                        for reply in Self::replies(&buf[..len], behavior) {
                            let _ = socket.send_to(&reply, peer).await;
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn replies(query: &[u8], behavior: MockBehavior) -> Vec<Vec<u8>> {
        let Ok(request) = Message::from_vec(query) else {
            return Vec::new();
        };
        let Some(answer) = Self::build_answer(&request) else {
            return Vec::new();
        };

        match behavior {
            MockBehavior::Answer => vec![answer],
            MockBehavior::Silent => Vec::new(),
            MockBehavior::WrongIdFirst => {
                let mut stray = answer.clone();
                stray[0] ^= 0xff;
                vec![stray, answer]
            }
            MockBehavior::Garbage => {
                let mut garbage = answer[..2].to_vec();
                garbage.extend_from_slice(&[0xff; 14]);
                vec![garbage]
            }
        }
    }

    /// Builds the reply the mock sends for `request`.
    pub fn build_answer(request: &Message) -> Option<Vec<u8>> {
        let mut response = Message::new();
        response
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .set_op_code(request.op_code())
            .set_recursion_desired(request.recursion_desired())
            .set_recursion_available(true)
            .set_response_code(ResponseCode::NoError);
        response.add_queries(request.queries().to_vec());

        if let Some(query) = request.queries().first() {
            let rdata = match query.query_type() {
                RecordType::A => Some(RData::A(A(Self::ANSWER_V4))),
                RecordType::AAAA => Some(RData::AAAA(AAAA(Self::ANSWER_V6))),
                _ => None,
            };
            if let Some(rdata) = rdata {
                response.add_answer(Record::from_rdata(
                    query.name().clone(),
                    Self::ANSWER_TTL,
                    rdata,
                ));
            }
        }

        response.to_vec().ok()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
