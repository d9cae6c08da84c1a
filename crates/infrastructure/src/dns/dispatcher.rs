use crate::dns::wire;
use hickory_proto::op::Message;
use hickory_proto::rr::{DNSClass, RecordType};
use splitdns_application::ports::{KeyValueStore, RouteRegistrar, UpstreamExchanger};
use splitdns_application::services::DomainClassifier;
use splitdns_domain::{
    normalize_domain, Classification, Expiration, QueryFingerprint, StoredValue, UpstreamRole,
};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// TTL of every answer synthesized in-process (adblock and host overrides).
pub const SYNTHESIZED_TTL: u32 = 3000;

/// Per-query state machine: cache replay, classification, then local
/// synthesis or an upstream exchange.
///
/// `handle` answers every parseable query with exactly one datagram.
pub struct QueryDispatcher {
    store: Arc<dyn KeyValueStore>,
    classifier: Arc<DomainClassifier>,
    upstream: Arc<dyn UpstreamExchanger>,
    registrar: Arc<dyn RouteRegistrar>,
}

impl QueryDispatcher {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        classifier: Arc<DomainClassifier>,
        upstream: Arc<dyn UpstreamExchanger>,
        registrar: Arc<dyn RouteRegistrar>,
    ) -> Self {
        Self {
            store,
            classifier,
            upstream,
            registrar,
        }
    }

    /// Returns the packed reply, or `None` when the datagram is not a DNS
    /// message at all.
    pub async fn handle(&self, datagram: &[u8]) -> Option<Vec<u8>> {
        let request = match wire::parse(datagram) {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, bytes = datagram.len(), "Dropping unparseable datagram");
                return None;
            }
        };

        let Some(query) = request.queries().first() else {
            debug!(id = request.id(), "Query without question");
            return wire::format_error(&request);
        };

        let record_type = query.query_type();
        if query.query_class() != DNSClass::IN
            || !matches!(record_type, RecordType::A | RecordType::AAAA)
        {
            return self.forward(&request, datagram).await;
        }

        let domain = normalize_domain(&query.name().to_ascii());
        let fingerprint = QueryFingerprint::new(
            &domain,
            &query.query_class().to_string(),
            &record_type.to_string(),
        );

        if let Some(reply) = self.replay_cached(&fingerprint, request.id()) {
            debug!(domain = %domain, record_type = %record_type, "Cache hit");
            return Some(reply);
        }

        let (classification, owner) = self.classifier.classify_with_owner(&domain);
        let inherited = (owner != domain).then_some((owner, classification));

        match classification {
            Classification::AdBlock => {
                let sink = match record_type {
                    RecordType::AAAA => IpAddr::V6(Ipv6Addr::LOCALHOST),
                    _ => IpAddr::V4(Ipv4Addr::LOCALHOST),
                };
                debug!(domain = %domain, record_type = %record_type, "Blocked");
                self.answer_locally(&request, &fingerprint, Some(sink), inherited)
            }
            Classification::Host(address) => {
                let address = address.filter(|ip| family_matches(ip, record_type));
                if address.is_none() {
                    warn!(
                        domain = %domain,
                        record_type = %record_type,
                        "Host override has no usable address, answering empty"
                    );
                    let empty = wire::synthesize(&request, None, SYNTHESIZED_TTL);
                    return wire::pack(&empty)
                        .ok()
                        .or_else(|| wire::server_failure(&request));
                }
                self.answer_locally(&request, &fingerprint, address, inherited)
            }
            Classification::Policy => {
                self.resolve_upstream(&request, datagram, &fingerprint, &domain, UpstreamRole::Policy)
                    .await
            }
            Classification::Trusted => {
                self.resolve_upstream(&request, datagram, &fingerprint, &domain, UpstreamRole::Trusted)
                    .await
            }
        }
    }

    /// Relays a non-address or non-IN query to the trusted upstream, uncached.
    async fn forward(&self, request: &Message, datagram: &[u8]) -> Option<Vec<u8>> {
        match self.upstream.exchange(datagram, UpstreamRole::Trusted).await {
            Ok(reply) => Some(reply),
            Err(e) => {
                warn!(id = request.id(), error = %e, "Forwarding failed");
                wire::server_failure(request)
            }
        }
    }

    fn replay_cached(&self, fingerprint: &QueryFingerprint, id: u16) -> Option<Vec<u8>> {
        let cached = self.store.get(fingerprint.as_str())?;
        if let Some((owner, source)) = cached.inherited_from() {
            if self.classifier.classify_exact(owner) != Some(source) {
                debug!(fingerprint = %fingerprint, owner = %owner, "Inherited answer is stale");
                self.store.delete(fingerprint.as_str());
                return None;
            }
        }
        let bytes = cached.as_response()?;
        match wire::rewrite_id(bytes, id) {
            Some(reply) => Some(reply),
            None => {
                warn!(fingerprint = %fingerprint, "Dropping undecodable cached response");
                self.store.delete(fingerprint.as_str());
                None
            }
        }
    }

    /// Synthesizes, caches without expiration, and requests a snapshot.
    ///
    /// An answer decided by the registrable domain's entry is cached with
    /// that owner, so replay notices when the owner is reclassified.
    fn answer_locally(
        &self,
        request: &Message,
        fingerprint: &QueryFingerprint,
        address: Option<IpAddr>,
        inherited: Option<(&str, Classification)>,
    ) -> Option<Vec<u8>> {
        let response = wire::synthesize(request, address, SYNTHESIZED_TTL);
        match wire::pack(&response) {
            Ok(bytes) => {
                let value = match inherited {
                    Some((owner, source)) => StoredValue::InheritedResponse {
                        bytes: bytes.as_slice().into(),
                        owner: owner.to_string(),
                        source,
                    },
                    None => StoredValue::response(bytes.as_slice()),
                };
                self.store.set(fingerprint.as_str(), value, Expiration::Never);
                self.store.request_persist();
                Some(bytes)
            }
            Err(e) => {
                error!(id = request.id(), error = %e, "Failed to pack synthesized answer");
                wire::server_failure(request)
            }
        }
    }

    async fn resolve_upstream(
        &self,
        request: &Message,
        datagram: &[u8],
        fingerprint: &QueryFingerprint,
        domain: &str,
        role: UpstreamRole,
    ) -> Option<Vec<u8>> {
        let reply = match self.upstream.exchange(datagram, role).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(domain = %domain, role = %role, error = %e, "Upstream resolution failed");
                return wire::server_failure(request);
            }
        };

        self.cache(fingerprint, &reply, Expiration::Default);

        if role == UpstreamRole::Policy {
            match wire::parse(&reply) {
                Ok(message) => self.register_routes(domain, wire::answer_addresses(&message)),
                Err(e) => warn!(domain = %domain, error = %e, "Cannot read policy answer addresses"),
            }
        }

        Some(reply)
    }

    fn cache(&self, fingerprint: &QueryFingerprint, bytes: &[u8], expiration: Expiration) {
        self.store.set(
            fingerprint.as_str(),
            StoredValue::response(bytes),
            expiration,
        );
    }

    /// Registrations run detached so the reply is never held back by them.
    fn register_routes(&self, domain: &str, addresses: Vec<IpAddr>) {
        if addresses.is_empty() {
            return;
        }

        let registrar = Arc::clone(&self.registrar);
        let domain = domain.to_string();
        tokio::spawn(async move {
            for ip in addresses {
                if let Err(e) = registrar.register(ip).await {
                    warn!(domain = %domain, ip = %ip, error = %e, "Route registration failed");
                }
            }
        });
    }
}

fn family_matches(ip: &IpAddr, record_type: RecordType) -> bool {
    matches!(
        (ip, record_type),
        (IpAddr::V4(_), RecordType::A) | (IpAddr::V6(_), RecordType::AAAA)
    )
}
