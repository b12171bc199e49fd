use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// What the mock upstream does with each datagram it receives.
#[derive(Clone)]
pub enum MockReply {
    /// Answer with these bytes, the first two overwritten by the query id.
    EchoId(Vec<u8>),
    /// Answer with these bytes unchanged.
    Raw(Vec<u8>),
    /// Never answer.
    Silent,
}

pub struct MockDnsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(reply: MockReply) -> Result<Self, std::io::Error> {
        let socket = Arc::new(UdpSocket::bind("127.0.0.1:0").await?);
        let addr = socket.local_addr()?;

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if let Some(response) = Self::build_response(&reply, &buf[..len]) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn build_response(reply: &MockReply, query: &[u8]) -> Option<Vec<u8>> {
        match reply {
            MockReply::Silent => None,
            MockReply::Raw(bytes) => Some(bytes.clone()),
            MockReply::EchoId(bytes) => {
                if query.len() < 2 || bytes.len() < 2 {
                    return None;
                }
                let mut response = bytes.clone();
                response[..2].copy_from_slice(&query[..2]);
                Some(response)
            }
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
