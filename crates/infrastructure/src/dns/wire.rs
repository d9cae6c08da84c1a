//! DNS wire helpers built on `hickory-proto`.

use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{RData, Record};
use splitdns_domain::DomainError;
use std::net::IpAddr;

pub fn parse(bytes: &[u8]) -> Result<Message, DomainError> {
    Message::from_vec(bytes)
        .map_err(|e| DomainError::InvalidDnsResponse(format!("Failed to parse DNS message: {}", e)))
}

pub fn pack(message: &Message) -> Result<Vec<u8>, DomainError> {
    message
        .to_vec()
        .map_err(|e| DomainError::InvalidDnsResponse(format!("Failed to pack DNS message: {}", e)))
}

/// Response header for `request`: same ID and opcode, RD copied, RA set,
/// question echoed, no records.
pub fn reply_to(request: &Message, code: ResponseCode) -> Message {
    let mut response = Message::new();
    response
        .set_id(request.id())
        .set_message_type(MessageType::Response)
        .set_op_code(request.op_code())
        .set_recursion_desired(request.recursion_desired())
        .set_recursion_available(true)
        .set_response_code(code);
    response.add_queries(request.queries().to_vec());
    response
}

/// Packed SERVFAIL for `request`, falling back to a bare header when even the
/// echoed question cannot be packed.
pub fn server_failure(request: &Message) -> Option<Vec<u8>> {
    error_reply(request, ResponseCode::ServFail)
}

pub fn format_error(request: &Message) -> Option<Vec<u8>> {
    error_reply(request, ResponseCode::FormErr)
}

fn error_reply(request: &Message, code: ResponseCode) -> Option<Vec<u8>> {
    let response = reply_to(request, code);
    match pack(&response) {
        Ok(bytes) => Some(bytes),
        Err(_) => {
            let mut bare = Message::new();
            bare.set_id(request.id())
                .set_message_type(MessageType::Response)
                .set_response_code(code);
            pack(&bare).ok()
        }
    }
}

/// NOERROR answer to the first question of `request`, holding one address
/// record when `address` is given.
pub fn synthesize(request: &Message, address: Option<IpAddr>, ttl: u32) -> Message {
    let mut response = reply_to(request, ResponseCode::NoError);
    if let (Some(ip), Some(query)) = (address, request.queries().first()) {
        let rdata = match ip {
            IpAddr::V4(v4) => RData::A(A(v4)),
            IpAddr::V6(v6) => RData::AAAA(AAAA(v6)),
        };
        response.add_answer(Record::from_rdata(query.name().clone(), ttl, rdata));
    }
    response
}

/// Unpacks a cached reply and stamps it with `id`. `None` when the payload is
/// not a valid DNS message.
pub fn rewrite_id(cached: &[u8], id: u16) -> Option<Vec<u8>> {
    let mut message = Message::from_vec(cached).ok()?;
    message.set_id(id);
    message.to_vec().ok()
}

/// Every A/AAAA address in the answer section.
pub fn answer_addresses(message: &Message) -> Vec<IpAddr> {
    message
        .answers()
        .iter()
        .filter_map(|record| match record.data() {
            RData::A(a) => Some(IpAddr::V4(a.0)),
            RData::AAAA(aaaa) => Some(IpAddr::V6(aaaa.0)),
            _ => None,
        })
        .collect()
}
