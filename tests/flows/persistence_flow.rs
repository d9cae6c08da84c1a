/// Persistence Flow Tests
///
/// State written before shutdown is served again after a restart

#[path = "../common/mod.rs"]
mod common;

use common::{addresses, TestDomains, TestServer, TRUSTED_ANSWERS};
use hickory_proto::rr::RecordType;
use std::net::{IpAddr, Ipv4Addr};

#[tokio::test]
async fn test_classifications_and_cached_answers_survive_restart() {
    // Arrange
    let first = TestServer::start().await;
    first
        .manage("/addDomain?domain=ads.tracker.com&type=adblock")
        .await;
    first.manage("/addHost?host=nas.home.lan&ip=192.168.1.10").await;
    first
        .client()
        .query(TestDomains::unclassified(), RecordType::A)
        .await;
    let snapshot = first.snapshot_path();
    let dir = first.stop().await.expect("first run owns the directory");

    // Act
    let second = TestServer::start_with_snapshot(&snapshot).await;
    let client = second.client();
    let blocked = client.query(TestDomains::ad_server(), RecordType::A).await;
    let host = client.query(TestDomains::lan_host(), RecordType::A).await;
    let cached = client.query(TestDomains::unclassified(), RecordType::A).await;

    // Assert
    assert_eq!(addresses(&blocked), vec![IpAddr::V4(Ipv4Addr::LOCALHOST)]);
    assert_eq!(
        addresses(&host),
        vec![IpAddr::V4(Ipv4Addr::new(192, 168, 1, 10))]
    );
    assert_eq!(addresses(&cached), vec![IpAddr::V4(TRUSTED_ANSWERS.v4)]);
    assert_eq!(second.trusted.query_count(), 0);

    drop(second);
    drop(dir);
}

#[tokio::test]
async fn test_deleted_classification_stays_deleted_after_restart() {
    let first = TestServer::start().await;
    first
        .manage("/addDomain?domain=ads.tracker.com&type=adblock")
        .await;
    first.manage("/delDomain?domain=ads.tracker.com").await;
    let snapshot = first.snapshot_path();
    let _dir = first.stop().await;

    let second = TestServer::start_with_snapshot(&snapshot).await;
    let reply = second
        .client()
        .query(TestDomains::ad_server(), RecordType::A)
        .await;

    assert_eq!(addresses(&reply), vec![IpAddr::V4(TRUSTED_ANSWERS.v4)]);
}
