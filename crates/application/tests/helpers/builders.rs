#![allow(dead_code)]
use bytes::Bytes;

/// Assembles raw request datagrams byte by byte.
pub struct PacketBuilder {
    id: u16,
    flags: u16,
    qdcount: u16,
    qdcount_override: Option<u16>,
    body: Vec<u8>,
}

impl PacketBuilder {
    pub fn new() -> Self {
        Self {
            id: 0x1234,
            flags: 0x0100,
            qdcount: 0,
            qdcount_override: None,
            body: Vec::new(),
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    /// Forces the header QDCOUNT regardless of how many questions were added.
    pub fn qdcount(mut self, qdcount: u16) -> Self {
        self.qdcount_override = Some(qdcount);
        self
    }

    pub fn question(mut self, domain: &str, qtype: u16, qclass: u16) -> Self {
        self.body.extend_from_slice(&encode_domain(domain));
        self.body.extend_from_slice(&qtype.to_be_bytes());
        self.body.extend_from_slice(&qclass.to_be_bytes());
        self.qdcount += 1;
        self
    }

    /// Appends a question whose name is `prefix` followed by a compression
    /// pointer to `target`.
    pub fn pointer_question(mut self, prefix: &str, target: u16, qtype: u16, qclass: u16) -> Self {
        for label in prefix.split('.').filter(|l| !l.is_empty()) {
            self.body.push(label.len() as u8);
            self.body.extend_from_slice(label.as_bytes());
        }
        self.body.extend_from_slice(&(0xC000 | target).to_be_bytes());
        self.body.extend_from_slice(&qtype.to_be_bytes());
        self.body.extend_from_slice(&qclass.to_be_bytes());
        self.qdcount += 1;
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(bytes);
        self
    }

    /// Offset the next appended byte will land at.
    pub fn offset(&self) -> usize {
        12 + self.body.len()
    }

    pub fn build(self) -> Bytes {
        let mut buf = Vec::with_capacity(12 + self.body.len());
        buf.extend_from_slice(&self.id.to_be_bytes());
        buf.extend_from_slice(&self.flags.to_be_bytes());
        buf.extend_from_slice(&self.qdcount_override.unwrap_or(self.qdcount).to_be_bytes());
        buf.extend_from_slice(&[0, 0, 0, 0, 0, 0]);
        buf.extend_from_slice(&self.body);
        Bytes::from(buf)
    }
}

impl Default for PacketBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn encode_domain(domain: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in domain.split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

/// Twelve zero bytes followed by `body`, for decoding names at fixed offsets.
pub fn with_header(body: &[u8]) -> Vec<u8> {
    let mut buf = vec![0u8; 12];
    buf.extend_from_slice(body);
    buf
}
