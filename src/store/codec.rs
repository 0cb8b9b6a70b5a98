//! Packing a sequence of strings into a single stored value

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Separator used by the joined encoding unless configured otherwise
pub const DEFAULT_SEPARATOR: char = ',';

/// Malformed input handed to [`SequenceCodec::decode`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed sequence at byte {offset}: {reason}")]
pub struct DecodeError {
    pub offset: usize,
    pub reason: &'static str,
}

/// Encoding of a string sequence as one string value
///
/// `Separated` joins elements with a separator and splits on it when reading,
/// discarding empty fragments. It is the format older stores were written in
/// and it cannot represent elements that contain the separator or are empty.
///
/// `LengthPrefixed` writes every element as `<byte length>:<bytes>` and
/// round-trips any sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceCodec {
    Separated(char),
    #[default]
    LengthPrefixed,
}

impl SequenceCodec {
    pub fn encode<'a, I>(&self, elements: I) -> String
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut out = String::new();
        match self {
            SequenceCodec::Separated(separator) => {
                for (index, element) in elements.into_iter().enumerate() {
                    if element.contains(*separator) {
                        log::warn!(
                            "Element {:?} contains separator {:?}; it will be split on the next transaction and may exceed the queue capacity",
                            element,
                            separator
                        );
                    }
                    if index > 0 {
                        out.push(*separator);
                    }
                    out.push_str(element);
                }
            }
            SequenceCodec::LengthPrefixed => {
                for element in elements {
                    out.push_str(&element.len().to_string());
                    out.push(':');
                    out.push_str(element);
                }
            }
        }
        out
    }

    pub fn decode(&self, raw: &str) -> Result<VecDeque<String>, DecodeError> {
        match self {
            SequenceCodec::Separated(separator) => Ok(raw
                .split(*separator)
                .filter(|fragment| !fragment.is_empty())
                .map(str::to_string)
                .collect()),
            SequenceCodec::LengthPrefixed => decode_length_prefixed(raw),
        }
    }
}

fn decode_length_prefixed(raw: &str) -> Result<VecDeque<String>, DecodeError> {
    let mut elements = VecDeque::new();
    let mut offset = 0;

    while offset < raw.len() {
        let rest = &raw[offset..];
        let colon = rest.find(':').ok_or(DecodeError {
            offset,
            reason: "missing length delimiter",
        })?;
        let len: usize = rest[..colon].parse().map_err(|_| DecodeError {
            offset,
            reason: "invalid length prefix",
        })?;

        let start = offset + colon + 1;
        let end = start.checked_add(len).ok_or(DecodeError {
            offset,
            reason: "length prefix overflows",
        })?;
        let element = raw.get(start..end).ok_or(DecodeError {
            offset: start,
            reason: "element runs past end of input or splits a character",
        })?;

        elements.push_back(element.to_string());
        offset = end;
    }

    Ok(elements)
}
