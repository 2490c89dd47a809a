/// Builds a [`Bson`](crate::Bson) value from JSON-like syntax.
///
/// Literals convert through `Bson::from`, so integer literals become `Int32`, floats become
/// `Double`, and strings become `String`. Wrap negative numbers or other multi-token
/// expressions in parentheses.
///
/// ```rust
/// use canonical_extjson::{bson, Bson};
///
/// let value = bson!([1, (-2), "three", null]);
/// assert_eq!(
///     value,
///     Bson::Array(vec![Bson::Int32(1), Bson::Int32(-2), Bson::from("three"), Bson::Null])
/// );
/// ```
#[macro_export]
macro_rules! bson {
    (null) => {
        $crate::Bson::Null
    };

    (true) => {
        $crate::Bson::Boolean(true)
    };

    (false) => {
        $crate::Bson::Boolean(false)
    };

    ([]) => {
        $crate::Bson::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Bson::Array(vec![$($crate::bson!($elem)),*])
    };

    ({}) => {
        $crate::Bson::Document($crate::Document::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {
        $crate::Bson::Document($crate::doc!({ $($key : $value),* }))
    };

    // Any other expression
    ($e:expr) => {
        $crate::Bson::from($e)
    };
}

/// Builds a [`Document`](crate::Document), keeping fields in the order written.
///
/// ```rust
/// use canonical_extjson::{doc, to_string};
///
/// let d = doc!({ "b": 1, "a": { "nested": true } });
/// assert_eq!(
///     to_string(&d).unwrap(),
///     r#"{"b":{"$numberInt":"1"},"a":{"nested":true}}"#
/// );
/// ```
#[macro_export]
macro_rules! doc {
    ({}) => {
        $crate::Document::new()
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut document = $crate::Document::new();
        $(
            document.insert($key, $crate::bson!($value));
        )*
        document
    }};
}
