//! Lenient form field deserializers.
//!
//! Form clients send phone numbers and postal codes as JSON numbers as often
//! as strings. These helpers accept any JSON scalar and keep its text form;
//! `null` reads as missing.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Flag(bool),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(text) => text,
            Scalar::Integer(n) => n.to_string(),
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Flag(b) => b.to_string(),
        }
    }
}

/// Use with `#[serde(default, deserialize_with = "string_or_number")]`
pub fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}

/// List form of `string_or_number`
pub fn strings_or_numbers<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Scalar>>::deserialize(deserializer)?
        .map(|values| values.into_iter().map(String::from).collect()))
}
