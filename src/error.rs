//! Decoding errors.

use thiserror::Error;

use crate::{layout::LayoutError, schema::IntWidth};

/// Errors occurring while decoding a record.
///
/// Errors raised below a record field are wrapped in [`Error::Field`] (and
/// [`Error::Element`] for array and sequence items) at each level of nesting.
/// Use [`Error::kind`] to inspect the underlying cause.
#[derive(Debug, Error)]
pub enum Error {
    /// A field's layout tag could not be parsed.
    #[error("Failed to parse layout tag `{tag}`: {source}")]
    Layout {
        tag: &'static str,
        #[source]
        source: LayoutError,
    },
    /// The schema names a field that the record has no setter for.
    #[error("Schema field {index} has no mutable counterpart in the record.")]
    NotAReference { index: usize },
    /// A sequence field has no occurs parameter.
    #[error("An occurs parameter must be provided for a sequence, as `pos,len,occurs`.")]
    MissingOccurrence,
    /// The field starts inside the buffer but runs past its end.
    #[error("Field bytes {lower}..{upper} overrun the {available} bytes available.")]
    TruncatedField {
        lower: usize,
        upper: usize,
        available: usize,
    },
    /// The bytes a field covers exceed the addressable range.
    #[error("Field span overflows the addressable range.")]
    SpanOverflow,
    #[error("Failed to parse `{}` as a boolean.", lossy(.0))]
    InvalidBoolean(Vec<u8>),
    #[error("Failed to parse `{}` as a {}-bit integer.", lossy(.raw), .width.bits())]
    InvalidInteger { raw: Vec<u8>, width: IntWidth },
    #[error("Failed to parse `{}` as a floating point number.", lossy(.0))]
    InvalidFloat(Vec<u8>),
    #[error("Field bytes `{}` are not valid UTF-8.", lossy(.0))]
    InvalidText(Vec<u8>),
    /// An error within a named record field.
    #[error("Field `{name}`: {source}")]
    Field {
        name: &'static str,
        #[source]
        source: Box<Error>,
    },
    /// An error within one item of an array or sequence.
    #[error("Item {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<Error>,
    },
}

/// The underlying cause of an [`Error`], with field wrapping removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingParameters,
    InvalidPosition,
    InvalidLength,
    InvalidOccurrence,
    NotAReference,
    MissingOccurrence,
    TruncatedField,
    SpanOverflow,
    InvalidBoolean,
    InvalidInteger,
    InvalidFloat,
    InvalidText,
}

impl Error {
    /// Wrap this error with the name of the field it occurred in.
    pub fn within(self, name: &'static str) -> Self {
        Self::Field {
            name,
            source: Box::new(self),
        }
    }

    /// Wrap this error with the position of the item it occurred in.
    pub fn at(self, index: usize) -> Self {
        Self::Element {
            index,
            source: Box::new(self),
        }
    }

    /// The innermost error, past any field or element wrappers.
    pub fn root(&self) -> &Self {
        match self {
            Self::Field { source, .. } | Self::Element { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self.root() {
            Self::Layout { source, .. } => match source {
                LayoutError::MissingParameters => ErrorKind::MissingParameters,
                LayoutError::InvalidPosition(_) => ErrorKind::InvalidPosition,
                LayoutError::InvalidLength(_) => ErrorKind::InvalidLength,
                LayoutError::InvalidOccurrence(_) => ErrorKind::InvalidOccurrence,
            },
            Self::NotAReference { .. } => ErrorKind::NotAReference,
            Self::MissingOccurrence => ErrorKind::MissingOccurrence,
            Self::TruncatedField { .. } => ErrorKind::TruncatedField,
            Self::SpanOverflow => ErrorKind::SpanOverflow,
            Self::InvalidBoolean(_) => ErrorKind::InvalidBoolean,
            Self::InvalidInteger { .. } => ErrorKind::InvalidInteger,
            Self::InvalidFloat(_) => ErrorKind::InvalidFloat,
            Self::InvalidText(_) => ErrorKind::InvalidText,
            Self::Field { .. } | Self::Element { .. } => unreachable!(),
        }
    }

    /// Dotted path to the failing field, e.g. `phones[1]` or `address.city`.
    pub fn path(&self) -> String {
        let mut path = String::new();
        let mut error = self;

        loop {
            error = match error {
                Self::Field { name, source } => {
                    if !path.is_empty() {
                        path.push('.');
                    }
                    path.push_str(name);
                    &**source
                }
                Self::Element { index, source } => {
                    path.push_str(&format!("[{index}]"));
                    &**source
                }
                _ => break path,
            }
        }
    }

    /// The bytes a coercion failed on, if any.
    pub fn raw(&self) -> Option<&[u8]> {
        match self.root() {
            Self::InvalidBoolean(raw)
            | Self::InvalidInteger { raw, .. }
            | Self::InvalidFloat(raw)
            | Self::InvalidText(raw) => Some(raw),
            _ => None,
        }
    }
}

fn lossy(raw: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(raw)
}
