use std::path::Path;

use csv::ReaderBuilder;
use flatrec::Record;

#[test]
fn decode_lines_customers() {
    const PATH: &str = "fixtures/customers.dat";
    let data = std::fs::read_to_string(PATH).unwrap();
    let mut validator = Validator::new(PATH);

    for line in data.lines() {
        let mut customer = Customer::default();
        flatrec::decode(line.as_bytes(), &mut customer, 0, 0).unwrap();
        validator.validate(&customer);
    }

    validator.finish();
}

#[test]
fn decode_lines_customers_without_phones() {
    const PATH: &str = "fixtures/customers.dat";
    let data = std::fs::read_to_string(PATH).unwrap();
    let mut validator = Validator::new(PATH);

    for line in data.lines() {
        let mut customer = Customer::default();
        flatrec::decode(&line.as_bytes()[..33], &mut customer, 0, 0).unwrap();

        assert!(customer.phone_numbers.is_empty());
        customer.phone_numbers = validator.expected_phones();
        validator.validate(&customer);
    }

    validator.finish();
}

#[derive(Debug, Default, Record)]
struct Customer {
    #[layout("1,3")]
    name: String,
    #[layout("4,10")]
    open_date: String,
    #[layout("14,3")]
    age: u16,
    #[layout("17,15")]
    address: String,
    #[layout("32,2")]
    country_code: String,
    #[layout("34,10,2")]
    phone_numbers: Vec<String>,
}

/// Expected field values, one row per fixture line.
struct Validator(Vec<Vec<String>>);

impl Validator {
    fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().with_extension("csv");

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)
            .unwrap();

        let expected = reader
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .collect();

        Self(expected)
    }

    fn expected_phones(&self) -> Vec<String> {
        self.0[0][5..].to_vec()
    }

    fn validate(&mut self, customer: &Customer) {
        let row = self.0.remove(0);

        assert_eq!(row[0], customer.name);
        assert_eq!(row[1], customer.open_date);
        assert_eq!(row[2], customer.age.to_string());
        assert_eq!(row[3], customer.address);
        assert_eq!(row[4], customer.country_code);
        assert_eq!(row[5..], customer.phone_numbers[..]);
    }

    fn finish(self) {
        assert!(self.0.is_empty(), "{} expected rows not decoded", self.0.len());
    }
}
