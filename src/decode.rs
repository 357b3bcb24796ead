//! The schema-driven decode engine.

use tracing::{debug, trace};

use crate::{error::Error, layout::Layout, record::Record};

/// Decode a record, or a window of its fields, from a slice.
///
/// Fields are visited in schema order from index `start`. When `count` is
/// non-zero at most `count` fields are visited (inert fields included),
/// otherwise decoding continues to the end of the schema.
///
/// Layout positions are relative to the whole logical record. The first mapped
/// field visited is assumed to begin at `r[0]`, which allows a long record to
/// be decoded from successive chunks: mapped fields before it are skipped, and
/// fields starting at or past the end of `r` are left untouched. Fields
/// starting inside `r` but running past its end fail with
/// [`Error::TruncatedField`].
///
/// On error, fields decoded before the failing one keep their new values.
pub fn decode<R: Record>(r: &[u8], o: &mut R, start: usize, count: usize) -> Result<(), Error> {
    let schema = R::schema();

    let end = if count > 0 {
        start.saturating_add(count).min(schema.len())
    } else {
        schema.len()
    };

    // Position translation constant, fixed by the first mapped field.
    let mut offset = None;

    for index in start..end {
        let field = &schema.fields()[index];

        let Some(mapping) = &field.mapping else {
            continue;
        };

        let layout = Layout::parse(mapping.tag).map_err(|source| {
            Error::Layout {
                tag: mapping.tag,
                source,
            }
            .within(field.name)
        })?;

        let offset = *offset.get_or_insert_with(|| {
            debug!(start, end, offset = layout.start(), len = r.len(), "decoding record window");
            layout.start()
        });

        if layout.position <= offset {
            trace!(field = field.name, "field precedes window, skipping");
            continue;
        }

        let lower = layout.start() - offset;

        if lower >= r.len() {
            trace!(field = field.name, lower, "field past end of data, skipping");
            continue;
        }

        let upper = mapping
            .shape
            .span(&layout)
            .and_then(|span| lower.checked_add(span).ok_or(Error::SpanOverflow))
            .map_err(|e| e.within(field.name))?;

        let Some(bytes) = r.get(lower..upper) else {
            return Err(Error::TruncatedField {
                lower,
                upper,
                available: r.len(),
            }
            .within(field.name));
        };

        trace!(field = field.name, lower, upper, "decoding field");

        o.decode_field(index, bytes, &layout, &mapping.shape)
            .map_err(|e| e.within(field.name))?;
    }

    Ok(())
}
