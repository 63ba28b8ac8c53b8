use super::name::Name;
use super::record::RecordInstance;
use crate::WireError;
use bytes::{BufMut, Bytes, BytesMut};

pub const HEADER_SIZE: usize = 12;

pub const FLAG_RESPONSE: u16 = 1 << 15;
pub const FLAG_AUTHORITATIVE: u16 = 1 << 10;
pub const OPCODE_SHIFT: u16 = 11;
pub const OPCODE_MASK: u16 = 0xF << OPCODE_SHIFT;
pub const RCODE_NXDOMAIN: u16 = 3;

const QUESTION_FOOTER_LEN: usize = 4;

/// A question entry: owner name, QTYPE and QCLASS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    name: Name,
    qtype: u16,
    qclass: u16,
    /// Request wire bytes, kept only when the name was contiguous in the request.
    raw: Option<Bytes>,
}

impl Question {
    pub fn new(name: Name, qtype: u16, qclass: u16) -> Self {
        Self {
            name,
            qtype,
            qclass,
            raw: None,
        }
    }

    pub fn decode(packet: &Bytes, offset: usize) -> Result<(Self, usize), WireError> {
        if offset >= packet.len() {
            return Err(WireError::QuestionTruncated { offset });
        }

        let decoded = Name::decode(packet, offset)?;
        let footer = decoded.next_offset;
        let end = footer + QUESTION_FOOTER_LEN;
        if end > packet.len() {
            return Err(WireError::QuestionTruncated { offset });
        }

        let qtype = u16::from_be_bytes([packet[footer], packet[footer + 1]]);
        let qclass = u16::from_be_bytes([packet[footer + 2], packet[footer + 3]]);
        let raw = (!decoded.followed_pointer).then(|| packet.slice(offset..end));

        Ok((
            Self {
                name: decoded.name,
                qtype,
                qclass,
                raw,
            },
            end,
        ))
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn qtype(&self) -> u16 {
        self.qtype
    }

    pub fn qclass(&self) -> u16 {
        self.qclass
    }

    pub fn raw(&self) -> Option<&Bytes> {
        self.raw.as_ref()
    }

    pub fn encoded_len(&self) -> usize {
        match &self.raw {
            Some(raw) => raw.len(),
            None => self.name.encoded_len() + QUESTION_FOOTER_LEN,
        }
    }

    pub fn encode(&self, out: &mut BytesMut) {
        match &self.raw {
            Some(raw) => out.put_slice(raw),
            None => {
                self.name.encode(out);
                out.put_u16(self.qtype);
                out.put_u16(self.qclass);
            }
        }
    }
}

/// A DNS message. Decoding only materializes the header and question section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub id: u16,
    pub flags: u16,
    pub questions: Vec<Question>,
    pub answers: Vec<RecordInstance>,
    pub authorities: Vec<RecordInstance>,
    pub additionals: Vec<RecordInstance>,
}

impl Message {
    pub fn decode(packet: &Bytes) -> Result<Self, WireError> {
        if packet.len() < HEADER_SIZE {
            return Err(WireError::HeaderTruncated(packet.len()));
        }

        let field = |i: usize| u16::from_be_bytes([packet[2 * i], packet[2 * i + 1]]);
        let id = field(0);
        let flags = field(1);
        let qdcount = field(2);

        let mut questions = Vec::with_capacity(usize::from(qdcount).min(64));
        let mut offset = HEADER_SIZE;
        for _ in 0..qdcount {
            let (question, next) = Question::decode(packet, offset)?;
            questions.push(question);
            offset = next;
        }

        Ok(Self {
            id,
            flags,
            questions,
            ..Self::default()
        })
    }

    /// Four-bit OPCODE from the flags word.
    pub fn opcode(&self) -> u16 {
        (self.flags & OPCODE_MASK) >> OPCODE_SHIFT
    }

    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE
            + self.questions.iter().map(Question::encoded_len).sum::<usize>()
            + self.records().map(RecordInstance::encoded_len).sum::<usize>()
    }

    /// Serializes the header with the live section counts followed by every
    /// section in order.
    pub fn encode(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(self.encoded_len());
        out.put_u16(self.id);
        out.put_u16(self.flags);
        // Section sizes are bounded by the u16 counts of the request they answer.
        out.put_u16(self.questions.len() as u16);
        out.put_u16(self.answers.len() as u16);
        out.put_u16(self.authorities.len() as u16);
        out.put_u16(self.additionals.len() as u16);

        for question in &self.questions {
            question.encode(&mut out);
        }
        for record in self.records() {
            record.encode(&mut out);
        }
        out.freeze()
    }

    fn records(&self) -> impl Iterator<Item = &RecordInstance> {
        self.answers
            .iter()
            .chain(&self.authorities)
            .chain(&self.additionals)
    }
}
