//! Student record types.

use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// A student record held by the registry.
///
/// Fields other than `id` are stored exactly as supplied. A field that was
/// missing from the request body stays absent and is omitted from JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Student {
    /// Student identifier.
    #[schema(example = 1)]
    pub id: i64,
    /// Student name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Alice")]
    pub name: Option<String>,
    /// Student age.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 20)]
    pub age: Option<i64>,
    /// Student grade.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "A")]
    pub grade: Option<String>,
}

impl Student {
    /// Build a record from a payload under the given id.
    pub fn from_payload(id: i64, payload: StudentPayload) -> Self {
        Self {
            id,
            name: payload.name,
            age: payload.age,
            grade: payload.grade,
        }
    }
}

/// Body accepted by create and update.
///
/// Any `id` in the body is ignored; unknown fields are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentPayload {
    /// Student name.
    #[serde(default)]
    #[schema(example = "Carol")]
    pub name: Option<String>,
    /// Student age.
    #[serde(default)]
    #[schema(example = 22)]
    pub age: Option<i64>,
    /// Student grade.
    #[serde(default)]
    #[schema(example = "B")]
    pub grade: Option<String>,
}

impl StudentPayload {
    /// Parse a raw request body. An empty body is an empty payload.
    ///
    /// A non-empty body must be a JSON object; arrays and scalars are
    /// rejected rather than mapped onto the fields by position.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(serde_json::Error::invalid_type(
                unexpected(&value),
                &"a JSON object",
            ));
        }
        serde_json::from_value(value)
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

/// Records present when the process starts.
pub fn seed_students() -> Vec<Student> {
    vec![
        Student {
            id: 1,
            name: Some("Alice".to_string()),
            age: Some(20),
            grade: Some("A".to_string()),
        },
        Student {
            id: 2,
            name: Some("Bob".to_string()),
            age: Some(21),
            grade: Some("B".to_string()),
        },
    ]
}

/// Parse an id taken from a request path.
///
/// Leading whitespace and an optional sign are accepted, then the leading
/// run of digits is used and anything after it ignored, so `"7abc"` yields 7.
/// A `0x`/`0X` prefix switches to hexadecimal digits. Returns `None` when
/// there are no digits or the value overflows.
pub fn parse_student_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, rest) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let digits_len = rest
        .bytes()
        .take_while(|b| (*b as char).is_digit(radix))
        .count();
    if digits_len == 0 {
        return None;
    }

    let magnitude = i64::from_str_radix(&rest[..digits_len], radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
