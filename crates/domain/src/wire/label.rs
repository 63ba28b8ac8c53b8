use crate::WireError;
use bytes::{BufMut, BytesMut};
use std::fmt;

pub const MAX_LABEL_LEN: usize = 63;

const POINTER_FLAGS: u8 = 0xC0;
const POINTER_MASK: u16 = 0x3FFF;

/// A single DNS label: either literal text or a 14-bit compression pointer.
///
/// Derived equality is exact (byte-for-byte). DNS comparison semantics live in
/// [`Label::matches`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    Literal(Box<[u8]>),
    Pointer(u16),
}

impl Label {
    /// Decodes the label starting at `offset`.
    ///
    /// `name_start` is the offset where the enclosing name began. A pointer must
    /// target an offset before both its own position and the start of the name
    /// being decoded, which rules out forward references and self-loops.
    ///
    /// Returns the label together with the offset of the byte following it.
    pub fn decode(
        buf: &[u8],
        offset: usize,
        name_start: usize,
    ) -> Result<(Self, usize), WireError> {
        let first = *buf.get(offset).ok_or(WireError::LabelTruncated { offset })?;

        if first & POINTER_FLAGS == POINTER_FLAGS {
            let second = *buf
                .get(offset + 1)
                .ok_or(WireError::LabelTruncated { offset })?;
            let target = u16::from_be_bytes([first, second]) & POINTER_MASK;
            let target_offset = target as usize;
            if offset != 0 && (target_offset > offset || target_offset >= name_start) {
                return Err(WireError::InvalidPointer { offset, target });
            }
            return Ok((Label::Pointer(target), offset + 2));
        }

        let len = first as usize;
        if len > MAX_LABEL_LEN {
            return Err(WireError::LabelTooLong(len));
        }

        let start = offset + 1;
        let content = buf
            .get(start..start + len)
            .ok_or(WireError::LabelTruncated { offset })?;
        validate(content)?;

        Ok((Label::Literal(content.into()), start + len))
    }

    /// Builds a non-empty literal label from text, applying the same rules as decoding.
    pub fn literal(text: &str) -> Result<Self, WireError> {
        let content = text.as_bytes();
        if content.is_empty() {
            return Err(WireError::EmptyLabel);
        }
        if content.len() > MAX_LABEL_LEN {
            return Err(WireError::LabelTooLong(content.len()));
        }
        validate(content)?;
        Ok(Label::Literal(content.into()))
    }

    /// The zero-length label terminating every name.
    pub fn null() -> Self {
        Label::Literal(Box::default())
    }

    pub fn pointer(target: u16) -> Self {
        Label::Pointer(target & POINTER_MASK)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Label::Literal(content) if content.is_empty())
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, Label::Pointer(_))
    }

    pub fn content(&self) -> Option<&[u8]> {
        match self {
            Label::Literal(content) => Some(&content[..]),
            Label::Pointer(_) => None,
        }
    }

    /// Bytes this label occupies on the wire.
    pub fn encoded_len(&self) -> usize {
        match self {
            Label::Literal(content) => 1 + content.len(),
            Label::Pointer(_) => 2,
        }
    }

    pub fn encode(&self, out: &mut BytesMut) {
        match self {
            Label::Literal(content) => {
                out.put_u8(content.len() as u8);
                out.put_slice(content);
            }
            Label::Pointer(target) => {
                out.put_u16(*target | (u16::from(POINTER_FLAGS) << 8));
            }
        }
    }

    /// Case-insensitive comparison of literal labels. Pointers never match.
    pub fn matches(&self, other: &Label) -> bool {
        match (self, other) {
            (Label::Literal(a), Label::Literal(b)) => a.eq_ignore_ascii_case(b),
            _ => false,
        }
    }
}

fn is_label_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

fn validate(content: &[u8]) -> Result<(), WireError> {
    let Some((&first, rest)) = content.split_first() else {
        return Ok(());
    };
    let last = rest.last().copied().unwrap_or(first);

    if !content.iter().all(|&b| is_label_byte(b)) || first == b'-' || last == b'-' {
        return Err(WireError::InvalidLabelCharacters(sanitize(content)));
    }
    Ok(())
}

/// Renders untrusted label bytes for logging, replacing anything outside
/// `[A-Za-z0-9-]` with `+`.
fn sanitize(content: &[u8]) -> String {
    content
        .iter()
        .map(|&b| if is_label_byte(b) { b as char } else { '+' })
        .collect()
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Literal(content) => f.write_str(&sanitize(content)),
            Label::Pointer(_) => Ok(()),
        }
    }
}
