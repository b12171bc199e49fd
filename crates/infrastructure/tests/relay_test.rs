use dns_relay_application::ports::UpstreamResolver;
use dns_relay_application::use_cases::HandleDnsQueryUseCase;
use dns_relay_domain::{DomainError, Header, Packet, QueryType, Question, ResultCode};
use dns_relay_infrastructure::dns::transport::udp::UdpTransport;
use dns_relay_infrastructure::dns::{DnsServerHandler, PacketCodec, UdpForwarder};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

mod fixtures;
mod helpers;
use fixtures::*;
use helpers::{MockDnsServer, MockReply};

fn client_addr() -> SocketAddr {
    "127.0.0.1:40000".parse().unwrap()
}

fn forwarder_to(server: SocketAddr, timeout: Duration) -> Arc<UdpForwarder> {
    let transport = Arc::new(UdpTransport::new(server, "127.0.0.1:0".parse().unwrap()));
    Arc::new(UdpForwarder::new(transport, PacketCodec::default(), timeout))
}

fn handler_for(forwarder: Arc<UdpForwarder>) -> DnsServerHandler {
    let use_case = Arc::new(HandleDnsQueryUseCase::new(forwarder));
    DnsServerHandler::new(use_case, PacketCodec::default())
}

fn query(id: u16) -> Packet {
    let mut header = Header::new(id);
    header.recursion_desired = true;
    let mut packet = Packet::new(header);
    packet
        .questions
        .push(Question::new(FIXTURE_DOMAIN, QueryType::A));
    packet
}

#[tokio::test]
async fn test_forwarder_decodes_upstream_answer() {
    let server = MockDnsServer::start(MockReply::EchoId(RESPONSE_PACKET.to_vec()))
        .await
        .unwrap();
    let forwarder = forwarder_to(server.addr(), Duration::from_secs(2));

    let response = forwarder.forward(&query(0x1111)).await.unwrap();

    assert_eq!(response.header.id, 0x1111);
    assert_eq!(response.answers.len(), 1);
    assert_eq!(forwarder.server(), server.addr().to_string());
}

#[tokio::test]
async fn test_forwarder_rejects_mismatched_response_id() {
    let mut reply = RESPONSE_PACKET.to_vec();
    reply[..2].copy_from_slice(&0x0001u16.to_be_bytes());
    let server = MockDnsServer::start(MockReply::Raw(reply)).await.unwrap();
    let forwarder = forwarder_to(server.addr(), Duration::from_secs(2));

    let err = forwarder.forward(&query(0x2222)).await.unwrap_err();

    assert!(matches!(err, DomainError::NetworkIo(_)));
}

#[tokio::test]
async fn test_forwarder_times_out_on_silent_upstream() {
    let server = MockDnsServer::start(MockReply::Silent).await.unwrap();
    let forwarder = forwarder_to(server.addr(), Duration::from_millis(100));

    let err = forwarder.forward(&query(0x3333)).await.unwrap_err();

    assert_eq!(
        err,
        DomainError::UpstreamTimeout {
            server: server.addr().to_string()
        }
    );
}

#[tokio::test]
async fn test_relay_answers_captured_query() {
    let server = MockDnsServer::start(MockReply::EchoId(RESPONSE_PACKET.to_vec()))
        .await
        .unwrap();
    let handler = handler_for(forwarder_to(server.addr(), Duration::from_secs(2)));

    let reply = handler
        .handle_raw_udp(QUERY_PACKET, client_addr())
        .await
        .expect("relay should answer");

    let packet = PacketCodec::default().decode(&reply).unwrap();
    assert_eq!(packet.header.id, FIXTURE_ID);
    assert!(packet.header.response);
    assert!(packet.header.recursion_desired);
    assert!(packet.header.recursion_available);
    assert_eq!(packet.header.rescode, ResultCode::NoError);
    assert_eq!(
        packet.questions,
        vec![Question::new(FIXTURE_DOMAIN, QueryType::A)]
    );
    assert_eq!(packet.answers.len(), 1);
    assert_eq!(packet.answers[0].domain, FIXTURE_DOMAIN);
    assert_eq!(packet.answers[0].ttl, FIXTURE_TTL);
    assert_eq!(
        packet.answers[0].data,
        dns_relay_domain::RecordData::A {
            addr: Ipv4Addr::from(FIXTURE_ADDR)
        }
    );
}

#[tokio::test]
async fn test_relay_drops_query_when_upstream_is_silent() {
    let server = MockDnsServer::start(MockReply::Silent).await.unwrap();
    let handler = handler_for(forwarder_to(server.addr(), Duration::from_millis(100)));

    let reply = handler.handle_raw_udp(QUERY_PACKET, client_addr()).await;

    assert!(reply.is_none());
}

#[tokio::test]
async fn test_relay_drops_undecodable_query() {
    let server = MockDnsServer::start(MockReply::EchoId(RESPONSE_PACKET.to_vec()))
        .await
        .unwrap();
    let handler = handler_for(forwarder_to(server.addr(), Duration::from_secs(2)));

    let reply = handler.handle_raw_udp(&QUERY_PACKET[..5], client_addr()).await;

    assert!(reply.is_none());
}

#[tokio::test]
async fn test_relay_keeps_serving_after_failure() {
    let server = MockDnsServer::start(MockReply::EchoId(RESPONSE_PACKET.to_vec()))
        .await
        .unwrap();
    let handler = handler_for(forwarder_to(server.addr(), Duration::from_secs(2)));

    assert!(handler
        .handle_raw_udp(&[0xFF; 3], client_addr())
        .await
        .is_none());
    assert!(handler
        .handle_raw_udp(QUERY_PACKET, client_addr())
        .await
        .is_some());
}
