use dns_relay_infrastructure::dns::server::DnsServerHandler;
use dns_relay_infrastructure::dns::wire::MAX_PACKET_SIZE;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

pub async fn start_dns_server(
    bind_addr: String,
    handler: DnsServerHandler,
    max_concurrent_queries: usize,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr.parse()?;
    let socket = Arc::new(create_udp_socket(socket_addr)?);

    info!(
        bind_address = %socket_addr,
        max_concurrent_queries,
        "DNS relay ready"
    );

    run_udp_loop(socket, Arc::new(handler), max_concurrent_queries).await;
    Ok(())
}

async fn run_udp_loop(
    socket: Arc<UdpSocket>,
    handler: Arc<DnsServerHandler>,
    max_concurrent_queries: usize,
) {
    let permits = Arc::new(Semaphore::new(max_concurrent_queries));
    // One spare byte lets the codec reject oversized datagrams.
    let mut recv_buf = [0u8; MAX_PACKET_SIZE + 1];

    loop {
        let permit = match permits.clone().acquire_owned().await {
            Ok(p) => p,
            Err(_) => break,
        };

        let (n, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                // ICMP port-unreachable surfaces here on some platforms.
                warn!(error = %e, "UDP recv error");
                continue;
            }
        };

        let query = recv_buf[..n].to_vec();
        let handler = handler.clone();
        let socket = socket.clone();

        tokio::spawn(async move {
            let _permit = permit;
            if let Some(response) = handler.handle_raw_udp(&query, from).await {
                match socket.send_to(&response, from).await {
                    Ok(sent) => debug!(client = %from, bytes = sent, "Reply sent"),
                    Err(e) => error!(client = %from, error = %e, "Failed to send reply"),
                }
            }
        });
    }
}

fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket
        .bind(&socket_addr.into())
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", socket_addr, e))?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}
