//! A schema-driven decoder for fixed-width records.
//!
//! Flatrec maps the fixed-width byte records found in flat files and COBOL
//! `OCCURS` layouts onto Rust structs. Each field declares where it lives in
//! the record with a layout tag of the form `pos,len` or `pos,len,occurs`, and
//! is parsed from the text at that position into its Rust type.
//!
//! Most users should begin with the [`Record`](macro@Record) derive macro and
//! the [`decode`] function. Records too long to buffer at once can be decoded
//! piecewise with [`decode`]'s field window, or with the [`Chunked`] state
//! token. The [`estimate`] function reports how many fields a partial record
//! covers.
//!
//! ```
//! #[derive(Debug, Default, Record)]
//! struct Customer {
//!     #[layout("1,3")]
//!     name: String,
//!     #[layout("14,3")]
//!     age: u8,
//!     #[layout("34,10,2")]
//!     phone_numbers: Vec<String>,
//! }
//!
//! let mut customer = Customer::default();
//! flatrec::decode(line.as_bytes(), &mut customer, 0, 0)?;
//! ```
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable derive macros (default).

pub mod chunked;
pub mod coerce;
pub mod decode;
pub mod error;
pub mod estimate;
pub mod layout;
pub mod record;
pub mod schema;

pub use chunked::Chunked;
pub use decode::decode;
pub use error::{Error, ErrorKind};
pub use estimate::estimate;
pub use layout::{Layout, LayoutError};
pub use record::{Decode, Record};
pub use schema::{FieldDef, FloatWidth, IntWidth, Mapping, Schema, Shape};
