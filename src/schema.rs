//! Record schemas and field shapes.
//!
//! A [`Schema`] lists every field of a record type in declaration order. Fields
//! carrying a layout tag are mapped to a [`Shape`], which tells the decoder how
//! many bytes the field spans and how to turn them into a value. Fields without
//! a tag are inert and never touched while decoding.
//!
//! Schemas are normally emitted by the [`Record`](macro@crate::Record) derive
//! macro, built once per type and kept for the life of the program.

use core::fmt;

use crate::{error::Error, layout::Layout};

/// Bit width used when parsing an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
}

impl IntWidth {
    /// Width of the target's `isize` and `usize`.
    pub const NATIVE: Self = match usize::BITS {
        8 => Self::W8,
        16 => Self::W16,
        32 => Self::W32,
        _ => Self::W64,
    };

    /// Number of bits.
    pub fn bits(self) -> u32 {
        match self {
            Self::W8 => 8,
            Self::W16 => 16,
            Self::W32 => 32,
            Self::W64 => 64,
        }
    }
}

/// Bit width of a floating point field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    F32,
    F64,
}

/// The shape of a mapped field.
#[derive(Debug, Clone)]
pub enum Shape {
    Bool,
    Int(IntWidth),
    UInt(IntWidth),
    Float(FloatWidth),
    Text,
    /// A nested record, decoded from its own slice with a fresh offset.
    Record(fn() -> &'static Schema),
    /// A fixed-size array of back-to-back elements.
    Array(usize, Box<Shape>),
    /// A repeated value whose count comes from the layout's occurs parameter.
    Sequence(Box<Shape>),
}

impl Shape {
    /// Number of bytes a field of this shape covers under a layout.
    pub fn span(&self, layout: &Layout) -> Result<usize, Error> {
        let (count, element) = match self {
            Self::Array(len, element) => (*len, element),
            Self::Sequence(element) => (layout.occurs.ok_or(Error::MissingOccurrence)?, element),
            _ => return Ok(layout.length),
        };

        count
            .checked_mul(element.span(layout)?)
            .ok_or(Error::SpanOverflow)
    }

    /// Replace the width of every integer in this shape.
    pub fn with_width(self, width: IntWidth) -> Self {
        match self {
            Self::Int(_) => Self::Int(width),
            Self::UInt(_) => Self::UInt(width),
            Self::Array(len, element) => Self::Array(len, Box::new(element.with_width(width))),
            Self::Sequence(element) => Self::Sequence(Box::new(element.with_width(width))),
            other => other,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int(w) => write!(f, "i{}", w.bits()),
            Self::UInt(w) => write!(f, "u{}", w.bits()),
            Self::Float(FloatWidth::F32) => write!(f, "f32"),
            Self::Float(FloatWidth::F64) => write!(f, "f64"),
            Self::Text => write!(f, "text"),
            Self::Record(_) => write!(f, "record"),
            Self::Array(len, element) => write!(f, "[{element}; {len}]"),
            Self::Sequence(element) => write!(f, "seq<{element}>"),
        }
    }
}

/// A field's layout tag together with the shape it decodes into.
#[derive(Debug, Clone)]
pub struct Mapping {
    /// The unparsed layout tag, e.g. `"34,10,2"`.
    pub tag: &'static str,
    pub shape: Shape,
}

/// One declared field of a record type.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: &'static str,
    /// `None` for inert fields.
    pub mapping: Option<Mapping>,
}

impl FieldDef {
    /// A field decoded from the bytes described by `tag`.
    pub fn mapped(name: &'static str, tag: &'static str, shape: Shape) -> Self {
        Self {
            name,
            mapping: Some(Mapping { tag, shape }),
        }
    }

    /// A field the decoder never touches.
    pub fn inert(name: &'static str) -> Self {
        Self {
            name,
            mapping: None,
        }
    }
}

/// The ordered fields of a record type.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldDef>,
}

impl Schema {
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Self { fields }
    }

    /// All fields, in declaration order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Renders the schema as an indented tree, one field per line, for debugging.
impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tree(f, self, 0)
    }
}

fn write_tree(f: &mut fmt::Formatter<'_>, schema: &Schema, depth: usize) -> fmt::Result {
    for field in &schema.fields {
        write!(f, "{:indent$}{}", "", field.name, indent = depth * 2)?;

        let Some(Mapping { tag, shape }) = &field.mapping else {
            writeln!(f, " (inert)")?;
            continue;
        };

        writeln!(f, ": {shape} @ \"{tag}\"")?;

        if let Some(nested) = innermost_record(shape) {
            write_tree(f, nested(), depth + 1)?;
        }
    }

    Ok(())
}

fn innermost_record(shape: &Shape) -> Option<fn() -> &'static Schema> {
    match shape {
        Shape::Record(schema) => Some(*schema),
        Shape::Array(_, element) | Shape::Sequence(element) => innermost_record(element),
        _ => None,
    }
}
