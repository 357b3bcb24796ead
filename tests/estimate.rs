#![allow(dead_code)]

use flatrec::{ErrorKind, Record};

#[derive(Debug, Default, Record)]
struct Sequential {
    #[layout("1,3")]
    name: String,
    #[layout("4,10")]
    open_date: String,
    #[layout("14,3")]
    age: u8,
}

#[test]
fn estimate_complete() {
    let data = b"AMY1900-01-01019";
    let (count, remainder) = flatrec::estimate(data, Sequential::schema(), 0).unwrap();
    assert_eq!(count, 3);
    assert!(remainder.is_empty());
}

#[test]
fn estimate_partial() {
    let data = b"AMY1900-01";
    let (count, remainder) = flatrec::estimate(data, Sequential::schema(), 0).unwrap();
    assert_eq!(count, 1);
    assert_eq!(remainder, b"1900-01");
}

#[test]
fn estimate_from_field_offset() {
    let data = b"1900-01-01019";
    let (count, remainder) = flatrec::estimate(data, Sequential::schema(), 1).unwrap();
    assert_eq!(count, 2);
    assert!(remainder.is_empty());
}

#[test]
fn estimate_empty() {
    let (count, remainder) = flatrec::estimate(b"", Sequential::schema(), 0).unwrap();
    assert_eq!(count, 0);
    assert!(remainder.is_empty());
}

#[derive(Debug, Default, Record)]
struct Repeated {
    #[layout("1,2")]
    code: String,
    cache: Vec<u8>,
    #[layout("3,1")]
    flags: [bool; 4],
    #[layout("7,10,2")]
    phone_numbers: Vec<String>,
}

#[test]
fn estimate_repeated_fields() {
    let data = [b'0'; 26];
    let (count, remainder) = flatrec::estimate(&data, Repeated::schema(), 0).unwrap();
    assert_eq!(count, 3);
    assert!(remainder.is_empty());

    // Flags need 4 bytes after the code, but only 3 remain.
    let (count, remainder) = flatrec::estimate(&data[..5], Repeated::schema(), 0).unwrap();
    assert_eq!(count, 1);
    assert_eq!(remainder.len(), 0);

    let (count, remainder) = flatrec::estimate(&data[..20], Repeated::schema(), 0).unwrap();
    assert_eq!(count, 2);
    assert_eq!(remainder.len(), 4);
}

#[derive(Debug, Default, Record)]
struct Profile {
    #[layout("1,10")]
    first_name: String,
    #[layout("11,10")]
    last_name: String,
    #[layout("1,20")]
    full_name: String,
}

#[test]
fn estimate_overlapping_fields_undercounts() {
    let data = b"JANE      DOE       ";
    let (count, _) = flatrec::estimate(data, Profile::schema(), 0).unwrap();
    assert_eq!(count, 2);

    // Decoding is unaffected.
    let mut profile = Profile::default();
    flatrec::decode(data, &mut profile, 0, 0).unwrap();
    assert_eq!(profile.full_name, "JANE      DOE       ");
}

#[derive(Debug, Default, Record)]
struct Malformed {
    #[layout("1,3")]
    name: String,
    #[layout("4")]
    age: u8,
}

#[test]
fn estimate_malformed_tag() {
    let err = flatrec::estimate(b"AMY019", Malformed::schema(), 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingParameters);
    assert_eq!(err.path(), "age");
}

#[derive(Debug, Default, Record)]
struct Prefixed {
    #[layout("1,2")]
    code: String,
    #[layout("3,10,3")]
    names: Vec<String>,
}

#[test]
fn estimate_remainder_past_end_is_empty() {
    let data = [b'0'; 12];
    let (count, remainder) = flatrec::estimate(&data, Prefixed::schema(), 0).unwrap();
    assert_eq!(count, 1);
    assert!(remainder.is_empty());
}
