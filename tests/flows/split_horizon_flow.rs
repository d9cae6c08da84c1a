/// Split-Horizon Flow Tests
///
/// Query → classification → local answer or trusted/policy upstream → cache

#[path = "../common/mod.rs"]
mod common;

use common::{addresses, ttls, TestDomains, TestServer, POLICY_ANSWERS, TRUSTED_ANSWERS};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::RecordType;
use splitdns_infrastructure::dns::SYNTHESIZED_TTL;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

// ============================================================================
// Trusted resolution
// ============================================================================

#[tokio::test]
async fn test_unclassified_domain_resolves_through_trusted_upstream() {
    // Arrange
    let server = TestServer::start().await;
    let client = server.client();

    // Act
    let reply = client.query(TestDomains::unclassified(), RecordType::A).await;

    // Assert
    assert_eq!(reply.response_code(), ResponseCode::NoError);
    assert_eq!(addresses(&reply), vec![IpAddr::V4(TRUSTED_ANSWERS.v4)]);
    assert_eq!(server.trusted.query_count(), 1);
    assert_eq!(server.policy.query_count(), 0);
}

#[tokio::test]
async fn test_repeated_query_is_answered_from_cache() {
    // Arrange
    let server = TestServer::start().await;
    let client = server.client();
    client.query(TestDomains::unclassified(), RecordType::AAAA).await;

    // Act
    let second = client.query(TestDomains::unclassified(), RecordType::AAAA).await;

    // Assert
    assert_eq!(addresses(&second), vec![IpAddr::V6(TRUSTED_ANSWERS.v6)]);
    assert_eq!(server.trusted.query_count(), 1);
}

#[tokio::test]
async fn test_non_address_query_is_forwarded_uncached() {
    let server = TestServer::start().await;
    let client = server.client();

    let first = client.query(TestDomains::unclassified(), RecordType::MX).await;
    let second = client.query(TestDomains::unclassified(), RecordType::MX).await;

    assert_eq!(first.response_code(), ResponseCode::NoError);
    assert_eq!(second.response_code(), ResponseCode::NoError);
    assert_eq!(server.trusted.query_count(), 2);
}

// ============================================================================
// Ad blocking
// ============================================================================

#[tokio::test]
async fn test_adblock_domain_is_sinkholed_to_loopback() {
    // Arrange
    let server = TestServer::start().await;
    let client = server.client();
    let (status, _) = server
        .manage("/addDomain?domain=ads.tracker.com&type=adblock")
        .await;
    assert_eq!(status, 200);

    // Act
    let v4 = client.query(TestDomains::ad_server(), RecordType::A).await;
    let v6 = client.query(TestDomains::ad_server(), RecordType::AAAA).await;

    // Assert
    assert_eq!(addresses(&v4), vec![IpAddr::V4(Ipv4Addr::LOCALHOST)]);
    assert_eq!(addresses(&v6), vec![IpAddr::V6(Ipv6Addr::LOCALHOST)]);
    assert_eq!(ttls(&v4), vec![SYNTHESIZED_TTL]);
    assert_eq!(server.trusted.query_count(), 0);
}

#[tokio::test]
async fn test_adblock_tag_on_registrable_domain_covers_subdomains() {
    let server = TestServer::start().await;
    let client = server.client();
    server
        .manage("/addDomain?domain=tracker.com&type=adblock")
        .await;

    let reply = client.query(TestDomains::ad_server(), RecordType::A).await;

    assert_eq!(addresses(&reply), vec![IpAddr::V4(Ipv4Addr::LOCALHOST)]);
    assert_eq!(server.trusted.query_count(), 0);
}

// ============================================================================
// Policy routing
// ============================================================================

#[tokio::test]
async fn test_policy_domain_resolves_through_policy_upstream_and_registers_routes() {
    // Arrange
    let server = TestServer::start().await;
    let client = server.client();
    server
        .manage("/addDomain?domain=video.streaming.com&type=policy")
        .await;

    // Act
    let reply = client.query(TestDomains::policy_site(), RecordType::A).await;

    // Assert
    assert_eq!(addresses(&reply), vec![IpAddr::V4(POLICY_ANSWERS.v4)]);
    assert_eq!(server.policy.query_count(), 1);
    assert_eq!(server.trusted.query_count(), 0);
    assert_eq!(
        server.registrar.wait_for(1).await,
        vec![IpAddr::V4(POLICY_ANSWERS.v4)]
    );
}

// ============================================================================
// Host overrides
// ============================================================================

#[tokio::test]
async fn test_host_override_answers_matching_family_only() {
    // Arrange
    let server = TestServer::start().await;
    let client = server.client();
    let (status, body) = server
        .manage("/addHost?host=nas.home.lan&ip=192.168.1.10")
        .await;
    assert_eq!(status, 200);
    assert_eq!(body, "AddHost nas.home.lan IP [192.168.1.10]");

    // Act
    let v4 = client.query(TestDomains::lan_host(), RecordType::A).await;
    let v6 = client.query(TestDomains::lan_host(), RecordType::AAAA).await;

    // Assert
    assert_eq!(
        addresses(&v4),
        vec![IpAddr::V4(Ipv4Addr::new(192, 168, 1, 10))]
    );
    assert_eq!(v6.response_code(), ResponseCode::NoError);
    assert!(v6.answers().is_empty());
    assert_eq!(server.trusted.query_count(), 0);
}

// ============================================================================
// Malformed traffic
// ============================================================================

#[tokio::test]
async fn test_garbage_datagram_does_not_stop_the_listener() {
    // Arrange
    let server = TestServer::start().await;
    let client = server.client();
    let socket = tokio::net::UdpSocket::bind("127.0.0.1:0").await.unwrap();

    // Act
    socket.send_to(&[0xde, 0xad], server.dns_addr()).await.unwrap();
    let reply = client.query(TestDomains::unclassified(), RecordType::A).await;

    // Assert
    assert_eq!(reply.response_code(), ResponseCode::NoError);
    assert_eq!(addresses(&reply), vec![IpAddr::V4(TRUSTED_ANSWERS.v4)]);
}
