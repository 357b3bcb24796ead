//! Field layout descriptors.
//!
//! A layout tag has the form `pos,len` or `pos,len,occurs`, where `pos` is the
//! 1-based offset of the field within the whole logical record, `len` is the
//! width of one value in bytes, and `occurs` (at least 2) repeats the value
//! that many times back-to-back.

use core::str::FromStr;

use thiserror::Error;

/// An error parsing a layout tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Fewer than two parameters.
    #[error("Position and length parameters must be provided, as `pos,len` or `pos,len,occurs`.")]
    MissingParameters,
    /// Position is not an integer, or is less than 1.
    #[error("Invalid position parameter `{0}` (must be an integer of at least 1, positions are 1-indexed).")]
    InvalidPosition(String),
    /// Length is not an integer, or is less than 1.
    #[error("Invalid length parameter `{0}` (must be an integer of at least 1).")]
    InvalidLength(String),
    /// Occurs count is not an integer, or is less than 2.
    #[error("Invalid occurs parameter `{0}` (must be an integer of at least 2).")]
    InvalidOccurrence(String),
}

/// A parsed layout tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout {
    /// 1-based byte offset into the logical record.
    pub position: usize,
    /// Width of a single value in bytes.
    pub length: usize,
    /// Number of back-to-back repetitions, if given.
    pub occurs: Option<usize>,
}

impl Layout {
    /// Parse a layout tag.
    ///
    /// Parameters past the third are ignored.
    pub fn parse(tag: &str) -> Result<Self, LayoutError> {
        let mut params = tag.split(',');

        let (Some(position), Some(length)) = (params.next(), params.next()) else {
            return Err(LayoutError::MissingParameters);
        };

        let position =
            at_least(position, 1).ok_or_else(|| LayoutError::InvalidPosition(position.into()))?;
        let length =
            at_least(length, 1).ok_or_else(|| LayoutError::InvalidLength(length.into()))?;

        let occurs = params
            .next()
            .map(|o| at_least(o, 2).ok_or_else(|| LayoutError::InvalidOccurrence(o.into())))
            .transpose()?;

        Ok(Self {
            position,
            length,
            occurs,
        })
    }

    /// Zero-based index of the first byte, relative to the logical record.
    pub fn start(&self) -> usize {
        self.position - 1
    }
}

impl FromStr for Layout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse a base-10 integer, accepting it only if it is at least `min`.
fn at_least(param: &str, min: i64) -> Option<usize> {
    let value = param.parse::<i64>().ok()?;
    if value < min {
        return None;
    }
    usize::try_from(value).ok()
}
