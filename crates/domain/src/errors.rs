use thiserror::Error;

/// Failure while decoding or building DNS wire data.
///
/// Every variant raised while parsing an inbound datagram is treated the same
/// way by the query processor: the datagram is counted as malformed and dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("label too long: {0} bytes (max 63)")]
    LabelTooLong(usize),

    #[error("invalid characters in label: {0}")]
    InvalidLabelCharacters(String),

    #[error("empty label inside a name")]
    EmptyLabel,

    #[error("invalid compression pointer at offset {offset} targeting {target}")]
    InvalidPointer { offset: usize, target: u16 },

    #[error("name too long (max 255 bytes)")]
    NameTooLong,

    #[error("label truncated at offset {offset}")]
    LabelTruncated { offset: usize },

    #[error("header truncated: {0} bytes (need 12)")]
    HeaderTruncated(usize),

    #[error("question truncated at offset {offset}")]
    QuestionTruncated { offset: usize },

    #[error("record payload too large: {0} bytes")]
    PayloadTooLarge(usize),

    #[error("malformed packet: {0}")]
    MalformedPacket(String),
}
