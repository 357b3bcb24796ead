//! Estimation of how many fields a partial record covers.

use tracing::debug;

use crate::{
    error::Error,
    layout::Layout,
    schema::{Schema, Shape},
};

/// Count the mapped fields, from schema index `from`, that fit in `r`.
///
/// Each mapped field contributes `len × occurs` bytes if it has an occurs
/// parameter, `len × N` if it is an array of `N` items, and `len` otherwise.
/// Fields are counted while the running total fits in `r`; a contribution too
/// large to represent never fits. Also returns the bytes of `r` starting `len`
/// bytes before the end of the first field that doesn't fit, or an empty slice
/// if all fit.
///
/// The remainder is also empty when that starting point lies past the end of
/// `r`, even if bytes after the last counted field remain. This happens when a
/// long repeated field follows a short prefix, e.g. `"1,2"` then `"3,10,3"` on
/// 12 bytes: the count is 1 and the 10 bytes beyond the prefix are not
/// returned.
///
/// Counts here are an estimate for slicing input and may differ from the bytes
/// [`decode`](crate::decode()) reads. Nested arrays contribute `len × N` above,
/// while decoding reads every inner item.
///
/// This assumes fields are laid out back-to-back in schema order. Overlapping
/// fields (such as a full name field covering separate first and last name
/// fields) are summed anyway, producing an undercount:
///
/// ```
/// #[derive(Record)]
/// struct Profile {
///     #[layout("1,10")]
///     first_name: String,
///     #[layout("11,10")]
///     last_name: String,
///     #[layout("1,20")]
///     full_name: String,
/// }
/// ```
///
/// Here a full 20-byte record yields a count of 2, not 3.
pub fn estimate<'a>(r: &'a [u8], schema: &Schema, from: usize) -> Result<(usize, &'a [u8]), Error> {
    let mut count = 0;
    let mut cumulative: usize = 0;

    for extent in extents(schema, from) {
        let extent = extent?;
        let total = extent.bytes().and_then(|bytes| cumulative.checked_add(bytes));

        match total {
            Some(total) if total <= r.len() => cumulative = total,
            _ => {
                let remainder = total
                    .and_then(|total| total.checked_sub(extent.layout.length))
                    .and_then(|lower| r.get(lower..))
                    .unwrap_or_default();

                debug!(count, remainder = remainder.len(), "estimated partial record");
                return Ok((count, remainder));
            }
        }

        count += 1;
    }

    debug!(count, "estimated complete record");
    Ok((count, &r[r.len()..]))
}

/// A mapped field with its parsed layout.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Extent<'a> {
    /// Index of the field in its schema.
    pub index: usize,
    pub name: &'static str,
    pub layout: Layout,
    pub shape: &'a Shape,
}

impl Extent<'_> {
    /// Bytes the estimator expects the field to consume, or `None` on overflow.
    pub fn bytes(&self) -> Option<usize> {
        match (self.layout.occurs, self.shape) {
            (Some(occurs), _) => self.layout.length.checked_mul(occurs),
            (None, Shape::Array(len, _)) => self.layout.length.checked_mul(*len),
            (None, _) => Some(self.layout.length),
        }
    }

    /// Bytes the decoder reads for the field.
    pub fn span(&self) -> Result<usize, Error> {
        self.shape.span(&self.layout).map_err(|e| e.within(self.name))
    }
}

/// Extents of the mapped fields from schema index `from` onward.
pub(crate) fn extents(schema: &Schema, from: usize) -> impl Iterator<Item = Result<Extent<'_>, Error>> {
    schema
        .fields()
        .iter()
        .enumerate()
        .skip(from)
        .filter_map(|(index, field)| {
            let mapping = field.mapping.as_ref()?;

            let extent = Layout::parse(mapping.tag)
                .map(|layout| Extent {
                    index,
                    name: field.name,
                    layout,
                    shape: &mapping.shape,
                })
                .map_err(|source| {
                    Error::Layout {
                        tag: mapping.tag,
                        source,
                    }
                    .within(field.name)
                });

            Some(extent)
        })
}
