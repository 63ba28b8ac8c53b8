use super::label::Label;
use crate::WireError;
use bytes::BytesMut;
use std::fmt;
use std::str::FromStr;

pub const MAX_NAME_LEN: usize = 255;

/// An ordered sequence of labels.
///
/// Decoded and text-built names end in exactly one null label. The only other
/// shape is a pointer-only name produced by [`Name::from_pointer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    labels: Vec<Label>,
}

/// Result of [`Name::decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedName {
    pub name: Name,
    /// Offset just past the name in the source buffer.
    pub next_offset: usize,
    /// True when a compression pointer was followed, in which case the name's
    /// bytes are not contiguous in the buffer.
    pub followed_pointer: bool,
}

/// Where a suffix was found by [`Name::find_suffix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixMatch<'a> {
    /// First label of `self` belonging to the matched suffix.
    pub label: &'a Label,
    /// Encoded length of all labels preceding the match.
    pub offset: usize,
}

impl Name {
    /// Decodes a name starting at `offset`, resolving compression pointers.
    ///
    /// A pointer always ends the label sequence at its position; decoding
    /// continues at its target as a fresh name. Each hop lands strictly before
    /// the previous name start, and the hop count is additionally capped at the
    /// buffer length.
    pub fn decode(buf: &[u8], offset: usize) -> Result<DecodedName, WireError> {
        let mut labels = Vec::new();
        let mut encoded_len = 0usize;
        let mut cursor = offset;
        let mut name_start = offset;
        let mut resume_at: Option<usize> = None;
        let mut hops = 0usize;

        loop {
            let (label, after) = Label::decode(buf, cursor, name_start)?;

            if let Label::Pointer(target) = label {
                hops += 1;
                if hops > buf.len() {
                    return Err(WireError::MalformedPacket(
                        "compression pointer chain too long".to_string(),
                    ));
                }
                resume_at.get_or_insert(after);
                cursor = target as usize;
                name_start = cursor;
                continue;
            }

            encoded_len += label.encoded_len();
            if encoded_len > MAX_NAME_LEN {
                return Err(WireError::NameTooLong);
            }

            let done = label.is_null();
            labels.push(label);
            if done {
                return Ok(DecodedName {
                    name: Name { labels },
                    next_offset: resume_at.unwrap_or(after),
                    followed_pointer: resume_at.is_some(),
                });
            }
            cursor = after;
        }
    }

    /// Builds a name from dotted text. A single trailing dot is accepted, and
    /// `""` or `"."` yields the root name.
    pub fn from_domain(domain: &str) -> Result<Self, WireError> {
        let trimmed = domain.strip_suffix('.').unwrap_or(domain);
        let mut labels = Vec::new();
        if !trimmed.is_empty() {
            for part in trimmed.split('.') {
                labels.push(Label::literal(part)?);
            }
        }
        labels.push(Label::null());
        Self::from_labels(labels)
    }

    /// Single-label name made of one compression pointer.
    pub fn from_pointer(target: u16) -> Self {
        Name {
            labels: vec![Label::pointer(target)],
        }
    }

    /// Returns a copy of this name with `label` prepended.
    pub fn with_prefix(&self, label: Label) -> Result<Self, WireError> {
        let mut labels = Vec::with_capacity(self.labels.len() + 1);
        labels.push(label);
        labels.extend(self.labels.iter().cloned());
        Self::from_labels(labels)
    }

    fn from_labels(labels: Vec<Label>) -> Result<Self, WireError> {
        let name = Name { labels };
        if name.encoded_len() > MAX_NAME_LEN {
            return Err(WireError::NameTooLong);
        }
        Ok(name)
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn encoded_len(&self) -> usize {
        self.labels.iter().map(Label::encoded_len).sum()
    }

    pub fn encode(&self, out: &mut BytesMut) {
        for label in &self.labels {
            label.encode(out);
        }
    }

    /// Checks whether `other` matches the trailing labels of `self`,
    /// case-insensitively.
    pub fn find_suffix(&self, other: &Name) -> Option<SuffixMatch<'_>> {
        let wanted = other.labels.len();
        if wanted == 0 || wanted > self.labels.len() {
            return None;
        }

        let (prefix, tail) = self.labels.split_at(self.labels.len() - wanted);
        if !tail.iter().zip(&other.labels).all(|(a, b)| a.matches(b)) {
            return None;
        }

        Some(SuffixMatch {
            label: &tail[0],
            offset: prefix.iter().map(Label::encoded_len).sum(),
        })
    }
}

impl FromStr for Name {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Name::from_domain(s)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for label in self.labels.iter().filter(|l| !l.is_null() && !l.is_pointer()) {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", label)?;
            first = false;
        }
        Ok(())
    }
}
