use super::label::Label;
use super::name::Name;
use crate::{RecordClass, RecordType, WireError};
use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const MAILBOX_LABEL: &str = "hostmaster";

/// Typed payload of a resource record.
pub trait RecordData {
    fn record_type(&self) -> u16;

    fn record_class(&self) -> u16 {
        RecordClass::IN.to_u16()
    }

    fn ttl(&self) -> u32;

    fn encode_payload(&self, out: &mut BytesMut);
}

/// A resource record whose fixed part (type, class, TTL, length-prefixed payload)
/// is serialized once. The owner name is supplied at encode time so the same
/// record can be emitted under different owners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    rr_type: u16,
    rr_class: u16,
    ttl: u32,
    body: Bytes,
}

impl ResourceRecord {
    pub fn new(rr_type: u16, rr_class: u16, ttl: u32, payload: &[u8]) -> Result<Self, WireError> {
        let payload_len =
            u16::try_from(payload.len()).map_err(|_| WireError::PayloadTooLarge(payload.len()))?;

        let mut body = BytesMut::with_capacity(10 + payload.len());
        body.put_u16(rr_type);
        body.put_u16(rr_class);
        body.put_u32(ttl);
        body.put_u16(payload_len);
        body.put_slice(payload);

        Ok(Self {
            rr_type,
            rr_class,
            ttl,
            body: body.freeze(),
        })
    }

    pub fn from_data<D: RecordData>(data: &D) -> Result<Self, WireError> {
        let mut payload = BytesMut::new();
        data.encode_payload(&mut payload);
        Self::new(data.record_type(), data.record_class(), data.ttl(), &payload)
    }

    pub fn rr_type(&self) -> u16 {
        self.rr_type
    }

    pub fn rr_class(&self) -> u16 {
        self.rr_class
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn payload(&self) -> &[u8] {
        &self.body[10..]
    }

    pub fn encoded_len(&self, owner: &Name) -> usize {
        owner.encoded_len() + self.body.len()
    }

    pub fn encode(&self, owner: &Name, out: &mut BytesMut) {
        owner.encode(out);
        out.put_slice(&self.body);
    }
}

/// SOA timer values. Defaults are the ones every canary reply has always carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SoaTimers {
    pub ttl: u32,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

impl Default for SoaTimers {
    fn default() -> Self {
        Self {
            ttl: 300,
            serial: 1,
            refresh: 900,
            retry: 300,
            expire: 7200,
            minimum: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaData {
    primary: Name,
    mailbox: Name,
    timers: SoaTimers,
}

impl SoaData {
    /// The mailbox is `hostmaster.<name_server>`.
    pub fn new(name_server: &Name, timers: SoaTimers) -> Result<Self, WireError> {
        let mailbox = name_server.with_prefix(Label::literal(MAILBOX_LABEL)?)?;
        Ok(Self {
            primary: name_server.clone(),
            mailbox,
            timers,
        })
    }

    pub fn primary(&self) -> &Name {
        &self.primary
    }

    pub fn mailbox(&self) -> &Name {
        &self.mailbox
    }
}

impl RecordData for SoaData {
    fn record_type(&self) -> u16 {
        RecordType::SOA.to_u16()
    }

    fn ttl(&self) -> u32 {
        self.timers.ttl
    }

    fn encode_payload(&self, out: &mut BytesMut) {
        self.primary.encode(out);
        self.mailbox.encode(out);
        out.put_u32(self.timers.serial);
        out.put_u32(self.timers.refresh);
        out.put_u32(self.timers.retry);
        out.put_u32(self.timers.expire);
        out.put_u32(self.timers.minimum);
    }
}

/// Builds the SOA record shared by every reply.
pub fn build_soa(name_server: &Name, timers: SoaTimers) -> Result<ResourceRecord, WireError> {
    ResourceRecord::from_data(&SoaData::new(name_server, timers)?)
}

/// A shared record paired with the owner name it is emitted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordInstance {
    record: Arc<ResourceRecord>,
    owner: Name,
}

impl RecordInstance {
    pub fn new(record: Arc<ResourceRecord>, owner: Name) -> Self {
        Self { record, owner }
    }

    pub fn record(&self) -> &ResourceRecord {
        &self.record
    }

    pub fn owner(&self) -> &Name {
        &self.owner
    }

    pub fn encoded_len(&self) -> usize {
        self.record.encoded_len(&self.owner)
    }

    pub fn encode(&self, out: &mut BytesMut) {
        self.record.encode(&self.owner, out);
    }
}
