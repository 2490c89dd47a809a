use canonical_extjson::value::{DateTime, Timestamp};
use canonical_extjson::{
    doc, write_document, CanonicalGenerator, Decimal128, Document, ExtJsonOptions, Generator,
    ObjectId, Result,
};

fn emit(f: impl FnOnce(&CanonicalGenerator, &mut String)) -> String {
    let mut buf = String::new();
    f(&CanonicalGenerator, &mut buf);
    buf
}

#[test]
fn test_double_special_values() {
    for (v, expected) in [
        (f64::NAN, r#"{"$numberDouble":"NaN"}"#),
        (f64::INFINITY, r#"{"$numberDouble":"Infinity"}"#),
        (f64::NEG_INFINITY, r#"{"$numberDouble":"-Infinity"}"#),
    ] {
        assert_eq!(emit(|g, b| g.write_double(b, v).unwrap()), expected);
    }
}

#[test]
fn test_double_full_precision() {
    assert_eq!(
        emit(|g, b| g.write_double(b, 0.1 + 0.2).unwrap()),
        r#"{"$numberDouble":"0.30000000000000004"}"#
    );
    assert_eq!(
        emit(|g, b| g.write_double(b, -1.0e-10).unwrap()),
        r#"{"$numberDouble":"-1e-10"}"#
    );
}

#[test]
fn test_double_ties_pick_the_even_digit() {
    for (bits, expected) in [
        (0x42df_5754_84f5_b3e8_u64, r#"{"$numberDouble":"137839762462415.62"}"#),
        (0x4311_9d55_7fc6_0531_u64, r#"{"$numberDouble":"1239516286386508.2"}"#),
    ] {
        let v = f64::from_bits(bits);
        assert_eq!(emit(|g, b| g.write_double(b, v).unwrap()), expected);
    }
}

#[test]
fn test_integers() {
    assert_eq!(emit(|g, b| g.write_int32(b, -7)), r#"{"$numberInt":"-7"}"#);
    assert_eq!(
        emit(|g, b| g.write_int64(b, 9_223_372_036_854_775_807)),
        r#"{"$numberLong":"9223372036854775807"}"#
    );
}

#[test]
fn test_string_quote_is_escaped() {
    let out = emit(|g, b| g.write_string(b, "a\"b"));
    assert_eq!(out, r#""a\"b""#);
    let parsed: String = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed, "a\"b");
}

#[test]
fn test_bin_data_subtype_is_two_hex_digits() {
    assert_eq!(
        emit(|g, b| g.write_bin_data(b, &[1, 2, 3], 0x05)),
        r#"{"$binary":{"base64":"AQID","subType":"05"}}"#
    );
    assert_eq!(
        emit(|g, b| g.write_bin_data(b, &[1, 2], 0xfe)),
        r#"{"$binary":{"base64":"AQI=","subType":"fe"}}"#
    );
}

#[test]
fn test_oid() {
    let oid = ObjectId::from_bytes([0xff, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 0x0a]);
    assert_eq!(
        emit(|g, b| g.write_oid(b, oid)),
        r#"{"$oid":"ff000102030405060708090a"}"#
    );
}

#[test]
fn test_code_with_empty_scope() {
    let out = emit(|g, b| {
        g.write_code_with_scope(b, "f()", &doc!({}), 0, &ExtJsonOptions::default())
            .unwrap()
    });
    assert_eq!(out, r#"{"$code":"f()","$scope":{}}"#);
}

#[test]
fn test_code_with_scope_escapes_code() {
    let out = emit(|g, b| {
        g.write_code_with_scope(b, "a\tb", &doc!({ "y": "z" }), 0, &ExtJsonOptions::default())
            .unwrap()
    });
    assert_eq!(out, r#"{"$code":"a\tb","$scope":{"y":"z"}}"#);
}

#[test]
fn test_decimal_keeps_coefficient_and_exponent() {
    let d = Decimal128::from_parts(false, 1000, -3).unwrap();
    assert_eq!(
        emit(|g, b| g.write_decimal128(b, d)),
        r#"{"$numberDecimal":"1.000"}"#
    );
}

#[test]
fn test_writers_append_without_touching_existing_content() {
    let mut buf = String::from("prefix:");
    CanonicalGenerator.write_date(&mut buf, DateTime::from_millis(0));
    CanonicalGenerator.write_timestamp(
        &mut buf,
        Timestamp {
            time: 0,
            increment: 0,
        },
    );
    assert_eq!(
        buf,
        r#"prefix:{"$date":{"$numberLong":"0"}}{"$timestamp":{"t":0,"i":0}}"#
    );
}

#[test]
fn test_idempotent_across_buffers() {
    let d = doc!({ "a": [1, 2.5, "x"], "b": { "c": null } });
    let mut first = String::new();
    let mut second = String::new();
    write_document(&CanonicalGenerator, &mut first, &d, 0, &ExtJsonOptions::default()).unwrap();
    write_document(&CanonicalGenerator, &mut second, &d, 0, &ExtJsonOptions::default()).unwrap();
    assert_eq!(first, second);
}

/// Delegates every kind to the canonical generator but pads with a space.
struct Spaced;

impl Generator for Spaced {
    fn write_null(&self, buf: &mut String) {
        CanonicalGenerator.write_null(buf)
    }
    fn write_undefined(&self, buf: &mut String) {
        CanonicalGenerator.write_undefined(buf)
    }
    fn write_string(&self, buf: &mut String, s: &str) {
        CanonicalGenerator.write_string(buf, s)
    }
    fn write_bool(&self, buf: &mut String, v: bool) {
        CanonicalGenerator.write_bool(buf, v)
    }
    fn write_int32(&self, buf: &mut String, v: i32) {
        CanonicalGenerator.write_int32(buf, v)
    }
    fn write_int64(&self, buf: &mut String, v: i64) {
        CanonicalGenerator.write_int64(buf, v)
    }
    fn write_double(&self, buf: &mut String, v: f64) -> Result<()> {
        CanonicalGenerator.write_double(buf, v)
    }
    fn write_decimal128(&self, buf: &mut String, v: Decimal128) {
        CanonicalGenerator.write_decimal128(buf, v)
    }
    fn write_date(&self, buf: &mut String, v: DateTime) {
        CanonicalGenerator.write_date(buf, v)
    }
    fn write_db_ref(&self, buf: &mut String, namespace: &str, id: ObjectId) {
        CanonicalGenerator.write_db_ref(buf, namespace, id)
    }
    fn write_oid(&self, buf: &mut String, id: ObjectId) {
        CanonicalGenerator.write_oid(buf, id)
    }
    fn write_timestamp(&self, buf: &mut String, v: Timestamp) {
        CanonicalGenerator.write_timestamp(buf, v)
    }
    fn write_bin_data(&self, buf: &mut String, bytes: &[u8], subtype: u8) {
        CanonicalGenerator.write_bin_data(buf, bytes, subtype)
    }
    fn write_regex(&self, buf: &mut String, pattern: &str, options: &str) {
        CanonicalGenerator.write_regex(buf, pattern, options)
    }
    fn write_symbol(&self, buf: &mut String, symbol: &str) {
        CanonicalGenerator.write_symbol(buf, symbol)
    }
    fn write_code(&self, buf: &mut String, code: &str) {
        CanonicalGenerator.write_code(buf, code)
    }
    fn write_code_with_scope(
        &self,
        buf: &mut String,
        code: &str,
        scope: &Document,
        depth: usize,
        options: &ExtJsonOptions,
    ) -> Result<()> {
        buf.push_str(r#"{"$code":""#);
        buf.push_str(code);
        buf.push_str(r#"","$scope":"#);
        write_document(self, buf, scope, depth + 1, options)?;
        buf.push('}');
        Ok(())
    }
    fn write_min_key(&self, buf: &mut String) {
        CanonicalGenerator.write_min_key(buf)
    }
    fn write_max_key(&self, buf: &mut String) {
        CanonicalGenerator.write_max_key(buf)
    }
    fn write_padding(&self, buf: &mut String) {
        buf.push(' ');
    }
}

#[test]
fn test_walker_calls_padding_hook() {
    let d = doc!({ "a": true, "b": [null] });
    let mut buf = String::new();
    write_document(&Spaced, &mut buf, &d, 0, &ExtJsonOptions::default()).unwrap();
    assert_eq!(buf, r#"{ "a":true, "b":[ null ] }"#);
}

#[test]
fn test_scope_walk_uses_the_calling_generator() {
    let mut d = Document::new();
    d.insert(
        "f",
        canonical_extjson::CodeWithScope {
            code: "g".to_string(),
            scope: doc!({ "x": false }),
        },
    );
    let mut buf = String::new();
    write_document(&Spaced, &mut buf, &d, 0, &ExtJsonOptions::default()).unwrap();
    assert_eq!(buf, r#"{ "f":{"$code":"g","$scope":{ "x":false }} }"#);
}
