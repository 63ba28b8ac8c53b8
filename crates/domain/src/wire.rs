//! RFC 1035 wire format, restricted to what a canary responder needs: the
//! header and question section of a request, and an authority-only reply.
pub mod label;
pub mod message;
pub mod name;
pub mod record;

pub use label::{Label, MAX_LABEL_LEN};
pub use message::{
    Message, Question, FLAG_AUTHORITATIVE, FLAG_RESPONSE, HEADER_SIZE, OPCODE_MASK,
    OPCODE_SHIFT, RCODE_NXDOMAIN,
};
pub use name::{DecodedName, Name, SuffixMatch, MAX_NAME_LEN};
pub use record::{build_soa, RecordData, RecordInstance, ResourceRecord, SoaData, SoaTimers};
