//! Built-in converters for the most common secret formats.
//!
//! Each converter is a plain type so it can be stored as the default converter of a
//! [`crate::SecretConnector`]; the `as_*` functions are shorthands for building them.

use crate::{converter::SecretConverter, errors::ConversionError};
use regex::Regex;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// Returns the secret unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringConverter;

impl SecretConverter<String> for StringConverter {
    fn convert(&self, value: String) -> Result<String, ConversionError> {
        Ok(value)
    }
}

/// Parses a base-10 `i32`.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntegerConverter;

impl SecretConverter<i32> for IntegerConverter {
    fn convert(&self, value: String) -> Result<i32, ConversionError> {
        Ok(value.parse()?)
    }
}

/// Parses a base-10 `i64`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LongConverter;

impl SecretConverter<i64> for LongConverter {
    fn convert(&self, value: String) -> Result<i64, ConversionError> {
        Ok(value.parse()?)
    }
}

/// Parses an `f64` written in decimal or scientific notation. Surrounding whitespace is ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct DoubleConverter;

impl SecretConverter<f64> for DoubleConverter {
    fn convert(&self, value: String) -> Result<f64, ConversionError> {
        Ok(value.trim().parse()?)
    }
}

/// `true` only for a case-insensitive `"true"`, `false` for anything else.
#[derive(Debug, Default, Clone, Copy)]
pub struct BooleanConverter;

impl SecretConverter<bool> for BooleanConverter {
    fn convert(&self, value: String) -> Result<bool, ConversionError> {
        Ok(value.eq_ignore_ascii_case("true"))
    }
}

/// Splits the secret into segments.
///
/// The delimiter is compiled as a regular expression and is **not** escaped, so
/// delimiters such as `|` or `.` keep their pattern meaning and the resulting
/// segments for them are whatever the pattern matches. Use [`regex::escape`] before
/// building the converter when a literal split is wanted.
///
/// Leading and interior empty segments are kept, trailing empty segments are dropped,
/// and a value without any match yields a single segment holding the whole value.
#[derive(Debug, Clone)]
pub struct ArrayConverter {
    delimiter: Regex,
}

impl ArrayConverter {
    pub fn new(delimiter: &str) -> Result<ArrayConverter, ConversionError> {
        Ok(ArrayConverter {
            delimiter: Regex::new(delimiter)?,
        })
    }

    pub fn delimiter(&self) -> &str {
        self.delimiter.as_str()
    }
}

impl SecretConverter<Vec<String>> for ArrayConverter {
    fn convert(&self, value: String) -> Result<Vec<String>, ConversionError> {
        let mut segments: Vec<String> = self
            .delimiter
            .split(&value)
            .map(str::to_owned)
            .collect();

        if segments.len() > 1 {
            while segments.last().is_some_and(String::is_empty) {
                segments.pop();
            }
        }

        Ok(segments)
    }
}

/// Deserializes a JSON secret into `T`.
///
/// Fields of the secret that `T` does not declare are rejected with
/// [`ConversionError::UnknownField`]; build the converter with [`JsonConverter::lenient`]
/// to ignore them instead.
pub struct JsonConverter<T> {
    strict: bool,
    shape: PhantomData<fn() -> T>,
}

impl<T> JsonConverter<T> {
    pub fn new() -> JsonConverter<T> {
        JsonConverter {
            strict: true,
            shape: PhantomData,
        }
    }

    pub fn lenient() -> JsonConverter<T> {
        JsonConverter {
            strict: false,
            shape: PhantomData,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

impl<T> Default for JsonConverter<T> {
    fn default() -> Self {
        JsonConverter::new()
    }
}

impl<T> SecretConverter<T> for JsonConverter<T>
where
    T: DeserializeOwned,
{
    fn convert(&self, value: String) -> Result<T, ConversionError> {
        let mut deserializer = serde_json::Deserializer::from_str(&value);
        let mut unknown = Vec::new();

        let shape: T = serde_ignored::deserialize(&mut deserializer, |path| {
            unknown.push(path.to_string())
        })?;
        deserializer.end()?;

        if self.strict && !unknown.is_empty() {
            return Err(ConversionError::UnknownField(unknown.join(", ")));
        }

        Ok(shape)
    }
}

/// Registers ad hoc conversion logic through a named type.
pub struct CustomConverter<F> {
    func: F,
}

impl<F> CustomConverter<F> {
    pub fn new(func: F) -> CustomConverter<F> {
        CustomConverter { func }
    }
}

impl<T, F> SecretConverter<T> for CustomConverter<F>
where
    F: Fn(String) -> Result<T, ConversionError> + Send + Sync,
{
    fn convert(&self, value: String) -> Result<T, ConversionError> {
        (self.func)(value)
    }
}

pub fn as_string() -> StringConverter {
    StringConverter
}

pub fn as_integer() -> IntegerConverter {
    IntegerConverter
}

pub fn as_long() -> LongConverter {
    LongConverter
}

pub fn as_double() -> DoubleConverter {
    DoubleConverter
}

pub fn as_boolean() -> BooleanConverter {
    BooleanConverter
}

pub fn as_array(delimiter: &str) -> Result<ArrayConverter, ConversionError> {
    ArrayConverter::new(delimiter)
}

pub fn as_json<T>() -> JsonConverter<T>
where
    T: DeserializeOwned,
{
    JsonConverter::new()
}

pub fn as_json_lenient<T>() -> JsonConverter<T>
where
    T: DeserializeOwned,
{
    JsonConverter::lenient()
}

pub fn custom<T, F>(func: F) -> CustomConverter<F>
where
    F: Fn(String) -> Result<T, ConversionError> + Send + Sync,
{
    CustomConverter::new(func)
}
