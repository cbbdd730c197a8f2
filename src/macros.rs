/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Object members are appended in the order written. Any other expression is
/// converted with [`Value::from`](crate::Value).
///
/// ```rust
/// use json_data::json;
///
/// let book = json!({
///     "name": "Book of Flames",
///     "spells": ["Scorch", "Flame Wave"],
///     "value": 500
/// });
/// assert_eq!(
///     json_data::to_string(&book).unwrap(),
///     r#"{"name":"Book of Flames","spells":["Scorch","Flame Wave"],"value":500}"#
/// );
/// ```
#[macro_export]
macro_rules! json {
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
        $crate::Value::array()
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::json!($elem)),*])
    };

    // Handle empty object
    ({}) => {
        $crate::Value::object()
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.append($key.to_string(), $crate::json!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Any other expression
    ($other:expr) => {
        $crate::Value::from($other)
    };
}
