#![allow(dead_code)]

use either::Either::{Left, Right};
use flatrec::{Chunked, ErrorKind, Record};

const RECORD: &str = "AMY1900-01-01019123 FAKE STREETCA41611122229053334444T";

#[derive(Debug, Default, Clone, PartialEq, Record)]
struct Customer {
    #[layout("1,3")]
    name: String,
    #[layout("4,10")]
    open_date: String,
    #[layout("14,3")]
    age: u8,
    #[layout("17,15")]
    address: String,
    #[layout("32,2")]
    country_code: String,
    #[layout("34,10,2")]
    phone_numbers: Vec<String>,
    #[layout("54,1")]
    active: bool,
}

fn decode_whole() -> Customer {
    let mut customer = Customer::default();
    flatrec::decode(RECORD.as_bytes(), &mut customer, 0, 0).unwrap();
    customer
}

#[test]
fn decode_two_windows() {
    let data = RECORD.as_bytes();
    let mut customer = Customer::default();

    flatrec::decode(&data[..16], &mut customer, 0, 3).unwrap();
    assert_eq!(customer.age, 19);
    assert_eq!(customer.address, "");

    flatrec::decode(&data[16..], &mut customer, 3, 0).unwrap();
    assert_eq!(customer, decode_whole());
}

#[test]
fn decode_window_limits_fields() {
    let mut customer = Customer::default();
    flatrec::decode(&RECORD.as_bytes()[3..], &mut customer, 1, 2).unwrap();

    assert_eq!(customer.name, "");
    assert_eq!(customer.open_date, "1900-01-01");
    assert_eq!(customer.age, 19);
    assert_eq!(customer.address, "");
}

#[test]
fn decode_window_past_schema() {
    let mut customer = Customer::default();
    flatrec::decode(&RECORD.as_bytes()[33..], &mut customer, 5, 100).unwrap();
    assert_eq!(customer.phone_numbers, ["4161112222", "9053334444"]);
    assert!(customer.active);
    assert_eq!(customer.name, "");

    let mut customer = Customer::default();
    flatrec::decode(RECORD.as_bytes(), &mut customer, 7, 0).unwrap();
    assert_eq!(customer, Customer::default());
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
fn decode_window_skips_preceding_fields() {
    let data = b"JANE      DOE       ";
    let mut profile = Profile::default();

    flatrec::decode(&data[10..], &mut profile, 1, 0).unwrap();
    assert_eq!(profile.last_name, "DOE       ");
    assert_eq!(profile.full_name, "");
}

#[test]
fn chunked_matches_whole() {
    for size in [1, 7, 16, 33, RECORD.len()] {
        let mut state = Chunked::new(Customer::default());
        let mut chunks = RECORD.as_bytes().chunks(size);

        let customer = loop {
            let chunk = chunks.next().expect("record incomplete after final chunk");
            state = match state.advance(chunk).unwrap() {
                Left(state) => state,
                Right(customer) => break customer,
            };
        };

        assert_eq!(customer, decode_whole(), "chunk size {size}");
        assert!(chunks.next().is_none());
    }
}

#[test]
fn chunked_finish_early() {
    let state = Chunked::new(Customer::default());

    let Left(state) = state.advance(&RECORD.as_bytes()[..20]).unwrap() else {
        panic!("record complete after 20 bytes");
    };

    assert_eq!(state.record().age, 19);

    let customer = state.finish();
    assert_eq!(customer.name, "AMY");
    assert_eq!(customer.address, "");
}

#[test]
fn chunked_propagates_errors() {
    let data = RECORD.replace("019", "0X9");
    let state = Chunked::new(Customer::default());

    let (state, err) = state.advance(data.as_bytes()).unwrap_err();
    assert_eq!(err.path(), "age");

    // Fields before the failure are kept.
    let customer = state.finish();
    assert_eq!(customer.open_date, "1900-01-01");
    assert_eq!(customer.address, "");
}

#[test]
fn chunked_error_keeps_earlier_windows() {
    let mut data = RECORD.as_bytes().to_vec();
    data[31] = 0xFF;
    let state = Chunked::new(Customer::default());

    let Left(state) = state.advance(&data[..20]).unwrap() else {
        panic!("record complete after 20 bytes");
    };

    let (state, err) = state.advance(&data[20..]).unwrap_err();
    assert_eq!(err.path(), "country_code");
    assert_eq!(state.record().age, 19);
    assert_eq!(state.record().address, "123 FAKE STREET");
}

#[derive(Debug, Default, Clone, PartialEq, Record)]
struct Grid {
    #[layout("1,2")]
    id: String,
    #[layout("3,1")]
    cells: [[u8; 2]; 2],
    #[layout("7,1,2")]
    pairs: Vec<[u8; 2]>,
    #[layout("11,1")]
    tail: String,
}

#[test]
fn chunked_nested_arrays_match_whole() {
    const GRID: &[u8] = b"AB12345678Z";

    let mut whole = Grid::default();
    flatrec::decode(GRID, &mut whole, 0, 0).unwrap();

    for size in 1..=GRID.len() {
        let mut state = Chunked::new(Grid::default());
        let mut chunks = GRID.chunks(size);

        let grid = loop {
            let chunk = chunks.next().expect("record incomplete after final chunk");
            state = match state.advance(chunk).unwrap() {
                Left(state) => state,
                Right(grid) => break grid,
            };
        };

        assert_eq!(grid, whole, "chunk size {size}");
    }
}

#[derive(Debug, Default, Record)]
struct Oversized {
    #[layout("1,2")]
    code: String,
    #[layout("3,4294967296,4294967296")]
    items: Vec<u8>,
}

#[test]
#[cfg(target_pointer_width = "64")]
fn chunked_overflowing_span() {
    let state = Chunked::new(Oversized::default());

    let (state, err) = state.advance(b"AB0102").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SpanOverflow);
    assert_eq!(err.path(), "items");
    assert_eq!(state.record().code, "");
}
