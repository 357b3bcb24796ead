//! Traits implemented by decodable records and field types.
//!
//! A type implementing [`Record`] exposes its [`Schema`] and a setter for each
//! of its fields. Each mapped field type implements [`Decode`], which turns the
//! bytes the engine slices out for it into a value. Scalars are provided by
//! [`crate::coerce`], containers below, and nested records by the derive
//! macro.

use crate::{error::Error, layout::Layout, schema::Schema, schema::Shape};

/// Derive [`Record`] and [`Decode`] for a struct with named fields.
///
/// _Requires Cargo feature `derive`._
///
/// # Example
///
/// Add the `layout("pos,len")` attribute to each field decoded from the
/// record, where `pos` is the 1-based offset of the field and `len` its width
/// in bytes. Fields without an attribute are left untouched.
///
/// ```
/// #[derive(Debug, Default, Record)]
/// struct Customer {
///     #[layout("1,3")]
///     name: String,
///     #[layout("4,10")]
///     open_date: String,
///     #[layout("14,3")]
///     age: u8,
///     #[layout("17,15")]
///     address: String,
///     #[layout("32,2")]
///     country_code: String,
/// }
/// ```
///
/// To decode a repeated value, use a `Vec<T>` and supply the number of
/// occurrences as a third parameter. A fixed-size array `[T; N]` repeats `N`
/// times without one. In both cases `len` is the width of each item.
///
/// ```
/// #[derive(Debug, Default, Record)]
/// struct Contact {
///     #[layout("1,10,2")]
///     phone_numbers: Vec<String>,
///     #[layout("21,1")]
///     flags: [bool; 4],
/// }
/// ```
///
/// Nested records (including through `Option<T>` and `Box<T>`) are decoded
/// from their own slice, with positions relative to the start of that slice.
///
/// `isize` and `usize` are parsed with the target's pointer width unless a
/// width is given explicitly.
///
/// ```
/// #[derive(Debug, Default, Record)]
/// struct Balance {
///     #[layout("1,12", width = 32)]
///     cents: isize,
/// }
/// ```
///
/// Generic structs are not supported, since each record type holds a single
/// schema.
#[cfg(feature = "derive")]
pub use flatrec_derive::Record;

/// A fixed-width record type.
///
/// See the [`Record`](macro@Record) derive macro for an automatic
/// implementation of this trait.
pub trait Record {
    /// The fields of this record, built once and shared for the life of the
    /// program.
    fn schema() -> &'static Schema;

    /// Decode the bytes of the field at `index` in [`Record::schema`].
    ///
    /// The slice spans exactly the bytes the field covers. Implementations
    /// return [`Error::NotAReference`] for an index they have no field for.
    fn decode_field(
        &mut self,
        index: usize,
        r: &[u8],
        layout: &Layout,
        shape: &Shape,
    ) -> Result<(), Error>;
}

/// A type that can be decoded from the bytes of a single field.
pub trait Decode {
    /// The shape this type decodes as.
    fn shape() -> Shape;

    /// Decode `r` into `self`.
    ///
    /// `shape` is the shape recorded in the schema, which may differ from
    /// [`Decode::shape`] in its integer widths.
    fn decode(&mut self, r: &[u8], layout: &Layout, shape: &Shape) -> Result<(), Error>;
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn shape() -> Shape {
        Shape::Array(N, Box::new(T::shape()))
    }

    fn decode(&mut self, r: &[u8], layout: &Layout, shape: &Shape) -> Result<(), Error> {
        match shape {
            Shape::Array(_, element) => decode_items(self, r, layout, element),
            _ => decode_items(self, r, layout, &T::shape()),
        }
    }
}

impl<T: Decode + Default> Decode for Vec<T> {
    fn shape() -> Shape {
        Shape::Sequence(Box::new(T::shape()))
    }

    fn decode(&mut self, r: &[u8], layout: &Layout, shape: &Shape) -> Result<(), Error> {
        let occurs = layout.occurs.ok_or(Error::MissingOccurrence)?;

        let fallback;
        let element = match shape {
            Shape::Sequence(element) => &**element,
            _ => {
                fallback = T::shape();
                &fallback
            }
        };

        // Checked before allocating, so a huge occurs count can't exhaust memory.
        let upper = occurs
            .checked_mul(element.span(layout)?)
            .ok_or(Error::SpanOverflow)?;

        if upper > r.len() {
            return Err(Error::TruncatedField {
                lower: 0,
                upper,
                available: r.len(),
            });
        }

        self.clear();
        self.resize_with(occurs, T::default);

        decode_items(self, r, layout, element)
    }
}

/// An absent value is replaced with `T::default()` before decoding into it.
impl<T: Decode + Default> Decode for Option<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn decode(&mut self, r: &[u8], layout: &Layout, shape: &Shape) -> Result<(), Error> {
        self.get_or_insert_with(T::default).decode(r, layout, shape)
    }
}

impl<T: Decode> Decode for Box<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn decode(&mut self, r: &[u8], layout: &Layout, shape: &Shape) -> Result<(), Error> {
        (**self).decode(r, layout, shape)
    }
}

/// Decode back-to-back items, each spanning one element of `r`.
fn decode_items<T: Decode>(
    items: &mut [T],
    r: &[u8],
    layout: &Layout,
    element: &Shape,
) -> Result<(), Error> {
    let stride = element.span(layout)?;

    for (i, item) in items.iter_mut().enumerate() {
        let lower = i.checked_mul(stride).ok_or(Error::SpanOverflow)?;
        let upper = lower.checked_add(stride).ok_or(Error::SpanOverflow)?;

        let bytes = r.get(lower..upper).ok_or(Error::TruncatedField {
            lower,
            upper,
            available: r.len(),
        })?;

        item.decode(bytes, layout, element).map_err(|e| e.at(i))?;
    }

    Ok(())
}
