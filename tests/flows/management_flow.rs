/// Management Flow Tests
///
/// HTTP management call → store change → next DNS answer reflects it

#[path = "../common/mod.rs"]
mod common;

use common::{addresses, serve_list, TestDomains, TestServer, POLICY_ANSWERS, TRUSTED_ANSWERS};
use hickory_proto::rr::RecordType;
use std::net::{IpAddr, Ipv4Addr};
use tokio_util::sync::CancellationToken;

// ============================================================================
// Reclassification invalidates cached answers
// ============================================================================

#[tokio::test]
async fn test_add_domain_overrides_previously_cached_trusted_answer() {
    // Arrange
    let server = TestServer::start().await;
    let client = server.client();
    let before = client.query(TestDomains::policy_site(), RecordType::A).await;
    assert_eq!(addresses(&before), vec![IpAddr::V4(TRUSTED_ANSWERS.v4)]);

    // Act
    let (status, body) = server
        .manage("/addDomain?domain=video.streaming.com&type=policy")
        .await;
    let after = client.query(TestDomains::policy_site(), RecordType::A).await;

    // Assert
    assert_eq!(status, 200);
    assert_eq!(body, "AddDomain video.streaming.com Type [policy]");
    assert_eq!(addresses(&after), vec![IpAddr::V4(POLICY_ANSWERS.v4)]);
}

#[tokio::test]
async fn test_del_domain_returns_blocked_name_to_trusted_resolution() {
    // Arrange
    let server = TestServer::start().await;
    let client = server.client();
    server
        .manage("/addDomain?domain=ads.tracker.com&type=adblock")
        .await;
    let blocked = client.query(TestDomains::ad_server(), RecordType::A).await;
    assert_eq!(addresses(&blocked), vec![IpAddr::V4(Ipv4Addr::LOCALHOST)]);

    // Act
    let (status, body) = server.manage("/delDomain?domain=ads.tracker.com").await;
    let unblocked = client.query(TestDomains::ad_server(), RecordType::A).await;

    // Assert
    assert_eq!(status, 200);
    assert_eq!(body, "DelDomain ads.tracker.com");
    assert_eq!(addresses(&unblocked), vec![IpAddr::V4(TRUSTED_ANSWERS.v4)]);
    assert_eq!(server.trusted.query_count(), 1);
}

#[tokio::test]
async fn test_del_domain_unblocks_subdomain_blocked_through_it() {
    // Arrange
    let server = TestServer::start().await;
    let client = server.client();
    server.manage("/addDomain?domain=zzz.com&type=adblock").await;
    let blocked = client.query("www.zzz.com", RecordType::A).await;
    assert_eq!(addresses(&blocked), vec![IpAddr::V4(Ipv4Addr::LOCALHOST)]);

    // Act
    server.manage("/delDomain?domain=zzz.com").await;
    let unblocked = client.query("www.zzz.com", RecordType::A).await;

    // Assert
    assert_eq!(addresses(&unblocked), vec![IpAddr::V4(TRUSTED_ANSWERS.v4)]);
}

#[tokio::test]
async fn test_add_host_replaces_cached_override() {
    let server = TestServer::start().await;
    let client = server.client();
    server.manage("/addHost?host=nas.home.lan&ip=10.0.0.1").await;
    client.query(TestDomains::lan_host(), RecordType::A).await;

    server.manage("/addHost?host=nas.home.lan&ip=10.0.0.2").await;
    let reply = client.query(TestDomains::lan_host(), RecordType::A).await;

    assert_eq!(addresses(&reply), vec![IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2))]);
}

// ============================================================================
// Bulk list update
// ============================================================================

#[tokio::test]
async fn test_update_loads_list_and_reports_counts() {
    // Arrange
    let server = TestServer::start().await;
    let client = server.client();
    let lists = CancellationToken::new();
    let url = serve_list(
        "adblock/ads.tracker.com\r\npolicy/video.streaming.com\n\nnot a list line\n",
        lists.clone(),
    )
    .await;

    // Act
    let (status, body) = server.manage(&format!("/update?url={}", url)).await;

    // Assert
    assert_eq!(status, 200);
    assert_eq!(body, format!("Update Url {} applied [2] skipped [1]", url));
    let blocked = client.query(TestDomains::ad_server(), RecordType::A).await;
    assert_eq!(addresses(&blocked), vec![IpAddr::V4(Ipv4Addr::LOCALHOST)]);
    let routed = client.query(TestDomains::policy_site(), RecordType::A).await;
    assert_eq!(addresses(&routed), vec![IpAddr::V4(POLICY_ANSWERS.v4)]);

    lists.cancel();
}

#[tokio::test]
async fn test_update_with_unreachable_list_is_bad_gateway() {
    let server = TestServer::start().await;

    let (status, _) = server
        .manage("/update?url=http://127.0.0.1:1/list")
        .await;

    assert_eq!(status, 502);
}

// ============================================================================
// Input validation
// ============================================================================

#[tokio::test]
async fn test_invalid_management_input_is_rejected() {
    let server = TestServer::start().await;

    let (bad_ip, _) = server.manage("/addHost?host=nas.home.lan&ip=not-an-ip").await;
    let (bad_tag, _) = server.manage("/addDomain?domain=a.com&type=bogus").await;
    let (missing_url, _) = server.manage("/update").await;

    assert_eq!(bad_ip, 400);
    assert_eq!(bad_tag, 400);
    assert_eq!(missing_url, 400);
}

#[tokio::test]
async fn test_health_endpoint_responds() {
    let server = TestServer::start().await;

    let (status, _) = server.manage("/health").await;

    assert_eq!(status, 200);
}
