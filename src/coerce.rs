//! Conversion of field bytes into scalar values.
//!
//! Field bytes are read as text exactly as they appear in the record, without
//! trimming padding. Integers and floats are base-10.

use core::str;

use crate::{
    error::Error,
    layout::Layout,
    record::Decode,
    schema::{FloatWidth, IntWidth, Shape},
};

/// Parse a boolean from one of `1 t T TRUE true True` or
/// `0 f F FALSE false False`.
pub fn parse_bool(r: &[u8]) -> Result<bool, Error> {
    match r {
        b"1" | b"t" | b"T" | b"TRUE" | b"true" | b"True" => Ok(true),
        b"0" | b"f" | b"F" | b"FALSE" | b"false" | b"False" => Ok(false),
        _ => Err(Error::InvalidBoolean(r.to_vec())),
    }
}

/// Parse a signed integer that must fit in `width` bits.
pub fn parse_signed(r: &[u8], width: IntWidth) -> Result<i64, Error> {
    let invalid = || Error::InvalidInteger {
        raw: r.to_vec(),
        width,
    };

    let value: i64 = text(r).and_then(|s| s.parse().ok()).ok_or_else(invalid)?;

    let (min, max) = match width {
        IntWidth::W64 => (i64::MIN, i64::MAX),
        w => (-(1 << (w.bits() - 1)), (1 << (w.bits() - 1)) - 1),
    };

    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(invalid())
    }
}

/// Parse an unsigned integer that must fit in `width` bits.
pub fn parse_unsigned(r: &[u8], width: IntWidth) -> Result<u64, Error> {
    let invalid = || Error::InvalidInteger {
        raw: r.to_vec(),
        width,
    };

    // A leading `+` is accepted by `u64::from_str` but has no place in an
    // unsigned field.
    if r.first() == Some(&b'+') {
        return Err(invalid());
    }

    let value: u64 = text(r).and_then(|s| s.parse().ok()).ok_or_else(invalid)?;

    let max = match width {
        IntWidth::W64 => u64::MAX,
        w => (1 << w.bits()) - 1,
    };

    if value <= max { Ok(value) } else { Err(invalid()) }
}

pub fn parse_f32(r: &[u8]) -> Result<f32, Error> {
    text(r)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| Error::InvalidFloat(r.to_vec()))
}

pub fn parse_f64(r: &[u8]) -> Result<f64, Error> {
    text(r)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| Error::InvalidFloat(r.to_vec()))
}

/// Take field bytes verbatim as a string.
pub fn parse_text(r: &[u8]) -> Result<String, Error> {
    String::from_utf8(r.to_vec()).map_err(|e| Error::InvalidText(e.into_bytes()))
}

fn text(r: &[u8]) -> Option<&str> {
    str::from_utf8(r).ok()
}

impl Decode for bool {
    fn shape() -> Shape {
        Shape::Bool
    }

    fn decode(&mut self, r: &[u8], _: &Layout, _: &Shape) -> Result<(), Error> {
        *self = parse_bool(r)?;
        Ok(())
    }
}

macro_rules! decode_int {
    ($variant:ident, $parse:ident, $($t:ty => $width:expr),* $(,)?) => {$(
        impl Decode for $t {
            fn shape() -> Shape {
                Shape::$variant($width)
            }

            fn decode(&mut self, r: &[u8], _: &Layout, shape: &Shape) -> Result<(), Error> {
                let width = match shape {
                    Shape::$variant(w) => *w,
                    _ => $width,
                };

                // The declared width may be wider than the Rust type.
                *self = <$t>::try_from($parse(r, width)?).map_err(|_| Error::InvalidInteger {
                    raw: r.to_vec(),
                    width,
                })?;

                Ok(())
            }
        }
    )*};
}

decode_int!(
    Int,
    parse_signed,
    i8 => IntWidth::W8,
    i16 => IntWidth::W16,
    i32 => IntWidth::W32,
    i64 => IntWidth::W64,
    isize => IntWidth::NATIVE,
);

decode_int!(
    UInt,
    parse_unsigned,
    u8 => IntWidth::W8,
    u16 => IntWidth::W16,
    u32 => IntWidth::W32,
    u64 => IntWidth::W64,
    usize => IntWidth::NATIVE,
);

impl Decode for f32 {
    fn shape() -> Shape {
        Shape::Float(FloatWidth::F32)
    }

    fn decode(&mut self, r: &[u8], _: &Layout, _: &Shape) -> Result<(), Error> {
        *self = parse_f32(r)?;
        Ok(())
    }
}

impl Decode for f64 {
    fn shape() -> Shape {
        Shape::Float(FloatWidth::F64)
    }

    fn decode(&mut self, r: &[u8], _: &Layout, _: &Shape) -> Result<(), Error> {
        *self = parse_f64(r)?;
        Ok(())
    }
}

impl Decode for String {
    fn shape() -> Shape {
        Shape::Text
    }

    fn decode(&mut self, r: &[u8], _: &Layout, _: &Shape) -> Result<(), Error> {
        *self = parse_text(r)?;
        Ok(())
    }
}
