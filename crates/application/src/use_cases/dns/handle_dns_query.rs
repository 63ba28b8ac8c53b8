use crate::ports::QueryMetricsPort;
use bytes::Bytes;
use canary_dns_domain::wire::{
    FLAG_AUTHORITATIVE, FLAG_RESPONSE, HEADER_SIZE, OPCODE_SHIFT, RCODE_NXDOMAIN,
};
use canary_dns_domain::{
    Message, Name, Opcode, Question, RecordClass, RecordInstance, RecordType, ResourceRecord,
    WireError,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

const ACCEPTED_TYPES: [RecordType; 3] = [RecordType::A, RecordType::AAAA, RecordType::ANY];
const ACCEPTED_CLASSES: [RecordClass; 2] = [RecordClass::IN, RecordClass::ANY];

/// Largest offset a compression pointer can address.
const MAX_POINTER_TARGET: usize = 0x3FFF;

/// What to do with one inbound datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Authoritative NXDOMAIN to send back to the requester.
    Reply(Bytes),
    /// Every question was filtered out. Nothing is sent.
    Dropped,
    /// Valid DNS, but not something the canary answers. Nothing is sent.
    Rejected(RejectReason),
    /// The datagram failed to decode. Nothing is sent.
    Malformed(WireError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NonQuery(u16),
    Empty,
}

/// Filters one request against the monitored domains and builds the
/// NXDOMAIN reply, one SOA authority record per accepted question.
pub struct HandleDnsQueryUseCase {
    allowed_domains: Arc<[Name]>,
    soa: Arc<ResourceRecord>,
    metrics: Arc<dyn QueryMetricsPort>,
}

impl HandleDnsQueryUseCase {
    pub fn new(
        allowed_domains: Arc<[Name]>,
        soa: Arc<ResourceRecord>,
        metrics: Arc<dyn QueryMetricsPort>,
    ) -> Self {
        Self {
            allowed_domains,
            soa,
            metrics,
        }
    }

    pub fn execute(&self, packet: &Bytes, remote: SocketAddr) -> QueryOutcome {
        let request = match Message::decode(packet) {
            Ok(request) => request,
            Err(e) => {
                self.metrics.record_malformed();
                warn!(error = %e, remote = %remote, "Malformed DNS datagram");
                return QueryOutcome::Malformed(e);
            }
        };

        let opcode = request.opcode();
        if opcode != Opcode::Query.to_u16() {
            self.metrics.record_rejected();
            info!(opcode = %Opcode::describe(opcode), remote = %remote, "Non-query rejected");
            return QueryOutcome::Rejected(RejectReason::NonQuery(opcode));
        }

        if request.questions.is_empty() {
            self.metrics.record_rejected();
            info!(remote = %remote, "Empty query rejected");
            return QueryOutcome::Rejected(RejectReason::Empty);
        }

        let mut questions = Vec::with_capacity(request.questions.len());
        let mut authorities = Vec::with_capacity(request.questions.len());
        // Where the next accepted question will start inside the reply.
        let mut offset = HEADER_SIZE;

        for question in request.questions {
            let target = self
                .match_question(&question)
                .map(|suffix_offset| offset + suffix_offset)
                .filter(|&target| target <= MAX_POINTER_TARGET);
            let accept = target.is_some();

            info!(
                name = %question.name(),
                qtype = %RecordType::describe(question.qtype()),
                qclass = %RecordClass::describe(question.qclass()),
                remote = %remote,
                accept,
                "DNS question"
            );

            let Some(target) = target else {
                self.metrics.record_rejected();
                continue;
            };

            self.metrics
                .record_accepted(&question.name().to_string().to_ascii_lowercase());

            authorities.push(RecordInstance::new(
                Arc::clone(&self.soa),
                Name::from_pointer(target as u16),
            ));
            offset += question.encoded_len();
            questions.push(question);
        }

        if questions.is_empty() {
            return QueryOutcome::Dropped;
        }

        let reply = Message {
            id: request.id,
            flags: FLAG_RESPONSE
                | FLAG_AUTHORITATIVE
                | (Opcode::Query.to_u16() << OPCODE_SHIFT)
                | RCODE_NXDOMAIN,
            questions,
            answers: Vec::new(),
            authorities,
            additionals: Vec::new(),
        };

        QueryOutcome::Reply(reply.encode())
    }

    /// Byte offset of the matched allowed domain inside the question's name, if
    /// the question passes the type, class and domain filters.
    fn match_question(&self, question: &Question) -> Option<usize> {
        let type_ok = RecordType::from_u16(question.qtype())
            .is_some_and(|t| ACCEPTED_TYPES.contains(&t));
        let class_ok = RecordClass::from_u16(question.qclass())
            .is_some_and(|c| ACCEPTED_CLASSES.contains(&c));
        if !type_ok || !class_ok {
            return None;
        }

        self.allowed_domains
            .iter()
            .find_map(|domain| question.name().find_suffix(domain))
            .map(|found| found.offset)
    }
}
