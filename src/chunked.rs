//! Decoding a record delivered in successive chunks.
//!
//! Records too long to buffer at once can be decoded piecewise. Each call to
//! [`Chunked::advance`] decodes every further field that the bytes received so
//! far cover, keeping any trailing partial field for the next chunk.
//!
//! ```
//! let mut state = Chunked::new(Customer::default());
//!
//! let customer = loop {
//!     let chunk = next_chunk()?;
//!     state = match state.advance(&chunk) {
//!         Ok(Left(state)) => state,
//!         Ok(Right(customer)) => break customer,
//!         Err((state, e)) => return Err(Failed(state.finish(), e)),
//!     };
//! };
//! ```
//!
//! Each field is taken to span exactly the bytes [`decode`] reads for it, and
//! fields must be laid out back-to-back in schema order.

use either::Either::{self, Left, Right};
use tracing::debug;

use crate::{decode::decode, error::Error, estimate::extents, record::Record};

/// State token for a partially decoded record.
#[derive(Debug)]
pub struct Chunked<R> {
    record: R,
    /// Schema index of the next field to decode.
    index: usize,
    /// Received bytes not yet decoded, starting at the field at `index`.
    pending: Vec<u8>,
}

impl<R: Record> Chunked<R> {
    /// Begin decoding into `record`, starting with its first field.
    pub fn new(record: R) -> Self {
        Self {
            record,
            index: 0,
            pending: Vec::new(),
        }
    }

    /// Transition to another state by decoding the next chunk of the record.
    ///
    /// Returns the record once every mapped field has been decoded, or a
    /// successor state awaiting more bytes. Bytes past the end of the last
    /// field are discarded.
    ///
    /// On error the state is returned alongside it. Fields decoded before the
    /// failing one keep their new values, and the state still points at the
    /// first field of the failed window, so [`Chunked::finish`] recovers the
    /// partial record.
    pub fn advance(mut self, chunk: &[u8]) -> Result<Either<Self, R>, (Self, Error)> {
        self.pending.extend_from_slice(chunk);

        match self.decode_covered() {
            Ok(true) => Ok(Right(self.record)),
            Ok(false) => Ok(Left(self)),
            Err(e) => Err((self, e)),
        }
    }

    /// Decode the fields the pending bytes cover, returning whether the record
    /// is complete.
    fn decode_covered(&mut self) -> Result<bool, Error> {
        let schema = R::schema();

        let mut count = 0;
        let mut end = self.index;
        let mut consumed: usize = 0;

        for extent in extents(schema, self.index) {
            let extent = extent?;

            match consumed.checked_add(extent.span()?) {
                Some(total) if total <= self.pending.len() => consumed = total,
                Some(_) => break,
                None => return Err(Error::SpanOverflow.within(extent.name)),
            }

            count += 1;
            end = extent.index + 1;
        }

        if count > 0 {
            decode(&self.pending[..consumed], &mut self.record, self.index, end - self.index)?;
            self.pending.drain(..consumed);
            self.index = end;
        }

        debug!(count, index = self.index, pending = self.pending.len(), "advanced chunked record");

        Ok(schema.fields()[self.index..].iter().all(|f| f.mapping.is_none()))
    }

    /// The record as decoded so far.
    pub fn record(&self) -> &R {
        &self.record
    }

    /// Stop decoding, returning the record with any remaining fields untouched.
    pub fn finish(self) -> R {
        self.record
    }
}
