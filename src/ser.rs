//! Canonical Extended JSON generation.
//!
//! This module holds the two halves of generation:
//!
//! - the [`Generator`] trait, one emission method per value kind, and
//!   [`CanonicalGenerator`], the stateless implementation that produces canonical
//!   Extended JSON v2
//! - the document walker ([`write_document`], [`write_value`], and the buffer-owning
//!   [`Serializer`]) that visits fields in insertion order and dispatches each value to the
//!   generator
//!
//! The two call each other: a code-with-scope value asks the walker to emit its scope
//! document. Every hop into a nested document, array, or scope carries an explicit depth,
//! checked against [`ExtJsonOptions::max_depth`].
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use canonical_extjson::{doc, to_string};
//!
//! let json = to_string(&doc!({ "x": 5, "pi": 3.25 })).unwrap();
//! assert_eq!(json, r#"{"x":{"$numberInt":"5"},"pi":{"$numberDouble":"3.25"}}"#);
//! ```
//!
//! ## Direct Generator Usage
//!
//! The generator appends to any caller-owned buffer:
//!
//! ```rust
//! use canonical_extjson::{CanonicalGenerator, Generator};
//!
//! let mut buf = String::new();
//! CanonicalGenerator.write_int64(&mut buf, 9_223_372_036_854_775_807);
//! assert_eq!(buf, r#"{"$numberLong":"9223372036854775807"}"#);
//! ```

use base64::Engine;

use crate::escape::escape_json_into;
use crate::value::{DateTime, Timestamp};
use crate::{Bson, Decimal128, Document, Error, ExtJsonOptions, ObjectId, Result};

/// One emission operation per value kind.
///
/// Implementations append text to `buf` and must not keep state between calls. Only the
/// double writer and the code-with-scope writer can fail.
pub trait Generator {
    fn write_null(&self, buf: &mut String);
    fn write_undefined(&self, buf: &mut String);
    fn write_string(&self, buf: &mut String, s: &str);
    fn write_bool(&self, buf: &mut String, v: bool);
    fn write_int32(&self, buf: &mut String, v: i32);
    fn write_int64(&self, buf: &mut String, v: i64);
    fn write_double(&self, buf: &mut String, v: f64) -> Result<()>;
    fn write_decimal128(&self, buf: &mut String, v: Decimal128);
    fn write_date(&self, buf: &mut String, v: DateTime);
    fn write_db_ref(&self, buf: &mut String, namespace: &str, id: ObjectId);
    fn write_oid(&self, buf: &mut String, id: ObjectId);
    fn write_timestamp(&self, buf: &mut String, v: Timestamp);
    fn write_bin_data(&self, buf: &mut String, bytes: &[u8], subtype: u8);
    fn write_regex(&self, buf: &mut String, pattern: &str, options: &str);
    fn write_symbol(&self, buf: &mut String, symbol: &str);
    fn write_code(&self, buf: &mut String, code: &str);

    /// Emits code plus its scope. `depth` is the nesting level of the code value itself; the
    /// scope document is walked one level deeper.
    fn write_code_with_scope(
        &self,
        buf: &mut String,
        code: &str,
        scope: &Document,
        depth: usize,
        options: &ExtJsonOptions,
    ) -> Result<()>;

    fn write_min_key(&self, buf: &mut String);
    fn write_max_key(&self, buf: &mut String);

    /// Hook for whitespace between structural tokens. Compact output emits nothing.
    fn write_padding(&self, _buf: &mut String) {}
}

/// Generator for canonical Extended JSON v2.
///
/// Zero-sized and stateless; copy it freely across threads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CanonicalGenerator;

impl Generator for CanonicalGenerator {
    fn write_null(&self, buf: &mut String) {
        buf.push_str("null");
    }

    fn write_undefined(&self, buf: &mut String) {
        buf.push_str(r#"{"$undefined":true}"#);
    }

    fn write_string(&self, buf: &mut String, s: &str) {
        buf.push('"');
        escape_json_into(buf, s);
        buf.push('"');
    }

    fn write_bool(&self, buf: &mut String, v: bool) {
        buf.push_str(if v { "true" } else { "false" });
    }

    fn write_int32(&self, buf: &mut String, v: i32) {
        buf.push_str(r#"{"$numberInt":""#);
        buf.push_str(&v.to_string());
        buf.push_str(r#""}"#);
    }

    fn write_int64(&self, buf: &mut String, v: i64) {
        buf.push_str(r#"{"$numberLong":""#);
        buf.push_str(&v.to_string());
        buf.push_str(r#""}"#);
    }

    fn write_double(&self, buf: &mut String, v: f64) -> Result<()> {
        if (f64::MIN..=f64::MAX).contains(&v) {
            buf.push_str(r#"{"$numberDouble":""#);
            push_shortest_double(buf, v);
            buf.push_str(r#""}"#);
        } else if v.is_nan() {
            buf.push_str(r#"{"$numberDouble":"NaN"}"#);
        } else if v.is_infinite() {
            if v > 0.0 {
                buf.push_str(r#"{"$numberDouble":"Infinity"}"#);
            } else {
                buf.push_str(r#"{"$numberDouble":"-Infinity"}"#);
            }
        } else {
            tracing::error!(value = %v, "finite double outside the representable range");
            return Err(Error::unrepresentable_number(v));
        }
        Ok(())
    }

    fn write_decimal128(&self, buf: &mut String, v: Decimal128) {
        if v.is_nan() {
            buf.push_str(r#"{"$numberDecimal":"NaN"}"#);
        } else if v.is_infinite() {
            buf.push_str(if v.is_negative() {
                r#"{"$numberDecimal":"-Infinity"}"#
            } else {
                r#"{"$numberDecimal":"Infinity"}"#
            });
        } else {
            buf.push_str(r#"{"$numberDecimal":""#);
            buf.push_str(&v.to_string());
            buf.push_str(r#""}"#);
        }
    }

    fn write_date(&self, buf: &mut String, v: DateTime) {
        buf.push_str(r#"{"$date":{"$numberLong":""#);
        buf.push_str(&v.timestamp_millis().to_string());
        buf.push_str(r#""}}"#);
    }

    fn write_db_ref(&self, buf: &mut String, namespace: &str, id: ObjectId) {
        // Collection names may contain control characters.
        buf.push_str(r#"{"$ref":""#);
        escape_json_into(buf, namespace);
        // Hex never needs escaping.
        buf.push_str(r#"","$id":""#);
        buf.push_str(&id.to_hex());
        buf.push_str(r#""}"#);
    }

    fn write_oid(&self, buf: &mut String, id: ObjectId) {
        buf.push_str(r#"{"$oid":""#);
        buf.push_str(&id.to_hex());
        buf.push_str(r#""}"#);
    }

    fn write_timestamp(&self, buf: &mut String, v: Timestamp) {
        buf.push_str(r#"{"$timestamp":{"t":"#);
        buf.push_str(&v.time.to_string());
        buf.push_str(r#","i":"#);
        buf.push_str(&v.increment.to_string());
        buf.push_str("}}");
    }

    fn write_bin_data(&self, buf: &mut String, bytes: &[u8], subtype: u8) {
        buf.push_str(r#"{"$binary":{"base64":""#);
        base64::engine::general_purpose::STANDARD.encode_string(bytes, buf);
        buf.push_str(r#"","subType":""#);
        buf.push_str(&format!("{subtype:02x}"));
        buf.push_str(r#""}}"#);
    }

    fn write_regex(&self, buf: &mut String, pattern: &str, options: &str) {
        buf.push_str(r#"{"$regularExpression":{"pattern":""#);
        escape_json_into(buf, pattern);
        buf.push_str(r#"","options":""#);
        escape_json_into(buf, options);
        buf.push_str(r#""}}"#);
    }

    fn write_symbol(&self, buf: &mut String, symbol: &str) {
        buf.push_str(r#"{"$symbol":""#);
        escape_json_into(buf, symbol);
        buf.push_str(r#""}"#);
    }

    fn write_code(&self, buf: &mut String, code: &str) {
        buf.push_str(r#"{"$code":""#);
        escape_json_into(buf, code);
        buf.push_str(r#""}"#);
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
        escape_json_into(buf, code);
        buf.push_str(r#"","$scope":"#);
        write_document(self, buf, scope, depth + 1, options)?;
        buf.push('}');
        Ok(())
    }

    fn write_min_key(&self, buf: &mut String) {
        buf.push_str(r#"{"$minKey":1}"#);
    }

    fn write_max_key(&self, buf: &mut String) {
        buf.push_str(r#"{"$maxKey":1}"#);
    }
}

/// Appends the shortest text that parses back to the identical `f64`.
///
/// Fixed notation is used while the decimal exponent is in `-4..16`, exponent notation
/// (`1e+16`, `1e-05`) outside it. Integral values carry no fractional part. `v` must be
/// finite.
fn push_shortest_double(buf: &mut String, v: f64) {
    let mut ryu_buf = ryu::Buffer::new();
    let (negative, digits, exp) = shortest_digits(ryu_buf.format_finite(v));
    if negative {
        buf.push('-');
    }
    let len = digits.len() as i32;

    if (-4..16).contains(&exp) {
        if exp >= 0 {
            let int_len = exp + 1;
            if len <= int_len {
                buf.push_str(&digits);
                for _ in 0..(int_len - len) {
                    buf.push('0');
                }
            } else {
                let (int_part, frac_part) = digits.split_at(int_len as usize);
                buf.push_str(int_part);
                buf.push('.');
                buf.push_str(frac_part);
            }
        } else {
            buf.push_str("0.");
            for _ in 0..(-exp - 1) {
                buf.push('0');
            }
            buf.push_str(&digits);
        }
    } else {
        let (lead, rest) = digits.split_at(1);
        buf.push_str(lead);
        if !rest.is_empty() {
            buf.push('.');
            buf.push_str(rest);
        }
        buf.push('e');
        buf.push(if exp < 0 { '-' } else { '+' });
        let abs = exp.unsigned_abs();
        if abs < 10 {
            buf.push('0');
        }
        buf.push_str(&abs.to_string());
    }
}

/// Splits ryu output (`"123.456"`, `"0.0001"`, `"1.5e-7"`, `"-0.0"`) into sign, significant
/// digits without leading or trailing zeros, and the decimal exponent of the first digit.
/// Zero comes back as `"0"` with exponent 0.
fn shortest_digits(text: &str) -> (bool, String, i32) {
    let (negative, text) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (mantissa, exp_part) = match text.split_once(['e', 'E']) {
        Some((mantissa, exp)) => {
            let magnitude = exp
                .bytes()
                .filter(u8::is_ascii_digit)
                .fold(0i32, |acc, b| acc * 10 + i32::from(b - b'0'));
            (mantissa, if exp.starts_with('-') { -magnitude } else { magnitude })
        }
        None => (text, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let all: String = int_part.chars().chain(frac_part.chars()).collect();
    let leading_zeros = all.len() - all.trim_start_matches('0').len();
    let digits = all.trim_matches('0');
    if digits.is_empty() {
        return (negative, "0".to_string(), 0);
    }
    let exp = int_part.len() as i32 - 1 - leading_zeros as i32 + exp_part;
    (negative, digits.to_string(), exp)
}

fn check_depth(depth: usize, options: &ExtJsonOptions) -> Result<()> {
    if depth > options.max_depth {
        tracing::debug!(
            depth,
            max_depth = options.max_depth,
            "nesting exceeds configured depth"
        );
        return Err(Error::depth_exceeded(depth, options.max_depth));
    }
    Ok(())
}

/// Walks `doc` in insertion order, emitting `{"field":value,...}` through `generator`.
///
/// `depth` is the nesting level of `doc`; the top-level document is at depth 0.
///
/// # Errors
///
/// Returns [`Error::DepthExceeded`] when `depth` or any nested level passes
/// `options.max_depth`, and propagates generator failures.
pub fn write_document<G>(
    generator: &G,
    buf: &mut String,
    doc: &Document,
    depth: usize,
    options: &ExtJsonOptions,
) -> Result<()>
where
    G: Generator + ?Sized,
{
    check_depth(depth, options)?;
    buf.push('{');
    for (i, (key, value)) in doc.iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        generator.write_padding(buf);
        buf.push('"');
        escape_json_into(buf, key);
        buf.push_str("\":");
        write_value(generator, buf, value, depth, options)?;
    }
    if !doc.is_empty() {
        generator.write_padding(buf);
    }
    buf.push('}');
    Ok(())
}

fn write_array<G>(
    generator: &G,
    buf: &mut String,
    items: &[Bson],
    depth: usize,
    options: &ExtJsonOptions,
) -> Result<()>
where
    G: Generator + ?Sized,
{
    check_depth(depth, options)?;
    buf.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        generator.write_padding(buf);
        write_value(generator, buf, item, depth, options)?;
    }
    if !items.is_empty() {
        generator.write_padding(buf);
    }
    buf.push(']');
    Ok(())
}

/// Dispatches one value to the matching generator method.
///
/// `depth` is the nesting level of the container holding `value`.
///
/// # Errors
///
/// See [`write_document`].
pub fn write_value<G>(
    generator: &G,
    buf: &mut String,
    value: &Bson,
    depth: usize,
    options: &ExtJsonOptions,
) -> Result<()>
where
    G: Generator + ?Sized,
{
    match value {
        Bson::Double(v) => generator.write_double(buf, *v)?,
        Bson::String(s) => generator.write_string(buf, s),
        Bson::Document(doc) => write_document(generator, buf, doc, depth + 1, options)?,
        Bson::Array(items) => write_array(generator, buf, items, depth + 1, options)?,
        Bson::Binary(bin) => generator.write_bin_data(buf, &bin.bytes, bin.subtype),
        Bson::Undefined => generator.write_undefined(buf),
        Bson::ObjectId(id) => generator.write_oid(buf, *id),
        Bson::Boolean(v) => generator.write_bool(buf, *v),
        Bson::DateTime(v) => generator.write_date(buf, *v),
        Bson::Null => generator.write_null(buf),
        Bson::RegularExpression(re) => generator.write_regex(buf, &re.pattern, &re.options),
        Bson::DbPointer(ptr) => generator.write_db_ref(buf, &ptr.namespace, ptr.id),
        Bson::JavaScriptCode(code) => generator.write_code(buf, code),
        Bson::Symbol(s) => generator.write_symbol(buf, s),
        Bson::JavaScriptCodeWithScope(cws) => {
            generator.write_code_with_scope(buf, &cws.code, &cws.scope, depth, options)?
        }
        Bson::Int32(v) => generator.write_int32(buf, *v),
        Bson::Timestamp(v) => generator.write_timestamp(buf, *v),
        Bson::Int64(v) => generator.write_int64(buf, *v),
        Bson::Decimal128(v) => generator.write_decimal128(buf, *v),
        Bson::MinKey => generator.write_min_key(buf),
        Bson::MaxKey => generator.write_max_key(buf),
    }
    Ok(())
}

/// Buffer-owning front end to the walker.
///
/// A failed call leaves the buffer as it was before the call, so a partial document is
/// never observable.
pub struct Serializer<G = CanonicalGenerator> {
    output: String,
    options: ExtJsonOptions,
    generator: G,
}

impl Serializer<CanonicalGenerator> {
    pub fn new(options: ExtJsonOptions) -> Self {
        Self::with_generator(CanonicalGenerator, options)
    }
}

impl<G: Generator> Serializer<G> {
    pub fn with_generator(generator: G, options: ExtJsonOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
            generator,
        }
    }

    /// Appends `doc` as a top-level document.
    ///
    /// # Errors
    ///
    /// See [`write_document`].
    pub fn serialize_document(&mut self, doc: &Document) -> Result<()> {
        let start = self.output.len();
        let result = write_document(&self.generator, &mut self.output, doc, 0, &self.options);
        self.finish(start, result)
    }

    /// Appends a single value at the top level.
    ///
    /// A document or array passed here counts as depth 0, like the argument of
    /// [`Serializer::serialize_document`].
    ///
    /// # Errors
    ///
    /// See [`write_document`].
    pub fn serialize_value(&mut self, value: &Bson) -> Result<()> {
        let start = self.output.len();
        // A top-level container sits at depth 0, same as a top-level document.
        let result = match value {
            Bson::Document(doc) => {
                write_document(&self.generator, &mut self.output, doc, 0, &self.options)
            }
            Bson::Array(items) => {
                write_array(&self.generator, &mut self.output, items, 0, &self.options)
            }
            other => write_value(&self.generator, &mut self.output, other, 0, &self.options),
        };
        self.finish(start, result)
    }

    fn finish(&mut self, start: usize, result: Result<()>) -> Result<()> {
        match result {
            Ok(()) => {
                tracing::trace!(bytes = self.output.len() - start, "generated extended JSON");
                Ok(())
            }
            Err(err) => {
                self.output.truncate(start);
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.output
    }

    pub fn into_inner(self) -> String {
        self.output
    }
}
