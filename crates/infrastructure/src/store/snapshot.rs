use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use splitdns_domain::{Classification, DomainTag, StoredValue};
use std::net::IpAddr;

pub(super) const SNAPSHOT_VERSION: u32 = 1;

/// On-disk document. Records stay untyped until decoded one by one so a
/// single corrupt record cannot fail the whole load.
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct SnapshotDocument<R> {
    pub version: u32,
    pub entries: Vec<R>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct SnapshotRecord {
    pub key: String,
    pub value: SnapshotValue,
    /// Unix milliseconds; absent for entries that never expire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at_ms: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub(super) enum SnapshotValue {
    Classification(DomainTag),
    HostAddress(String),
    /// Base64 of the packed DNS message.
    Response(String),
    InheritedResponse {
        response: String,
        owner: String,
        tag: DomainTag,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        address: Option<IpAddr>,
    },
}

impl From<&StoredValue> for SnapshotValue {
    fn from(value: &StoredValue) -> Self {
        match value {
            StoredValue::Classification(tag) => Self::Classification(*tag),
            StoredValue::HostAddress(ip) => Self::HostAddress(ip.clone()),
            StoredValue::Response(bytes) => Self::Response(STANDARD.encode(bytes)),
            StoredValue::InheritedResponse {
                bytes,
                owner,
                source,
            } => Self::InheritedResponse {
                response: STANDARD.encode(bytes),
                owner: owner.clone(),
                tag: source.tag(),
                address: source.address(),
            },
        }
    }
}

impl TryFrom<SnapshotValue> for StoredValue {
    type Error = base64::DecodeError;

    fn try_from(value: SnapshotValue) -> Result<Self, Self::Error> {
        Ok(match value {
            SnapshotValue::Classification(tag) => StoredValue::Classification(tag),
            SnapshotValue::HostAddress(ip) => StoredValue::HostAddress(ip),
            SnapshotValue::Response(encoded) => StoredValue::response(STANDARD.decode(encoded)?),
            SnapshotValue::InheritedResponse {
                response,
                owner,
                tag,
                address,
            } => StoredValue::InheritedResponse {
                bytes: STANDARD.decode(response)?.into(),
                owner,
                source: Classification::from_parts(tag, address),
            },
        })
    }
}
