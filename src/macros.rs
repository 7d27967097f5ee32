/// Builds a [`Value`](crate::Value) from JSON-like literals.
///
/// Objects become records with an empty name whose fields are always
/// emitted; arrays become sequences.
///
/// ```rust
/// use record_codec::{encode, value, Format, Value};
///
/// let v = value!({ "key": [{ "key": "value" }] });
/// let record = v.as_record().unwrap();
/// assert_eq!(encode(record, Format::Json).unwrap().as_str(), r#"{"key":[{"key":"value"}]}"#);
/// ```
#[macro_export]
macro_rules! value {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty array
    ([]) => {
        $crate::Value::Sequence(vec![])
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Sequence(vec![$($crate::value!($elem)),*])
    };

    // Handle empty object
    ({}) => {
        $crate::Value::Record($crate::Record::new(""))
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut record = $crate::Record::new("");
        $(
            record.push($crate::FieldSpec::new($key, $crate::value!($value)));
        )*
        $crate::Value::Record(record)
    }};

    // Any other expression convertible into a Value
    ($e:expr) => {
        $crate::Value::from($e)
    };
}
