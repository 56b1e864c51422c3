//! Cursor token encoding/decoding.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use miniserde::json::{self, Array as JsonArray, Value as JsonValue};
use thiserror::Error;

use crate::builder::Value;

/// Maximum allowed cursor size in bytes (4KB).
/// This prevents DoS attacks via oversized cursor payloads.
pub(crate) const MAX_CURSOR_SIZE: usize = 4 * 1024;

/// Maximum number of values allowed in a cursor.
pub(crate) const MAX_CURSOR_FIELDS: usize = 16;

/// Access to the model-level key values of a row.
///
/// Keys are the names configured on the paginator (`"ID"`, `"CreatedAt"`),
/// not storage column names.
///
/// ```
/// use mik_keyset::{CursorFields, Value};
///
/// struct User {
///     id: i64,
///     name: String,
/// }
///
/// impl CursorFields for User {
///     fn cursor_value(&self, key: &str) -> Option<Value> {
///         match key {
///             "ID" => Some(self.id.into()),
///             "Name" => Some(self.name.as_str().into()),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait CursorFields {
    /// Value of the model field `key`, or `None` if the row has no such field.
    fn cursor_value(&self, key: &str) -> Option<Value>;
}

/// Serializes key values to and from opaque tokens.
pub trait CursorCodec {
    /// Decode `token` into exactly `keys.len()` values in key order.
    ///
    /// An empty token decodes to an empty sequence.
    fn decode(&self, token: &str, keys: &[String]) -> Result<Vec<Value>, CursorError>;

    /// Encode the values of `keys` read from `row`, in key order.
    fn encode<T: CursorFields + ?Sized>(
        &self,
        row: &T,
        keys: &[String],
    ) -> Result<String, CursorError>;
}

/// Default codec: URL-safe unpadded base64 of a JSON array of key values.
///
/// A cursor on `[ID]` for the row with id 10 is the base64 of `[10]`.
///
/// # Security Note
///
/// Tokens use simple base64, **not encryption**. Clients can read and forge
/// them, so never paginate on keys holding sensitive data.
///
/// ```
/// use mik_keyset::{CursorCodec, CursorFields, JsonCursorCodec, Value};
///
/// struct Row(i64);
/// impl CursorFields for Row {
///     fn cursor_value(&self, key: &str) -> Option<Value> {
///         (key == "ID").then(|| Value::Int(self.0))
///     }
/// }
///
/// let keys = vec!["ID".to_string()];
/// let token = JsonCursorCodec.encode(&Row(10), &keys).unwrap();
/// assert_eq!(JsonCursorCodec.decode(&token, &keys).unwrap(), vec![Value::Int(10)]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCursorCodec;

impl JsonCursorCodec {
    /// Encode raw values, in order, without reading them from a row.
    pub fn encode_values(&self, values: &[Value]) -> Result<String, CursorError> {
        if values.len() > MAX_CURSOR_FIELDS {
            return Err(CursorError::TooManyFields);
        }
        let mut array = JsonArray::new();
        for value in values {
            let json = value
                .to_json()
                .ok_or_else(|| CursorError::UnsupportedValue(format!("{value:?}")))?;
            array.push(json);
        }
        let text = json::to_string(&JsonValue::Array(array));
        if text.len() > MAX_CURSOR_SIZE {
            return Err(CursorError::TooLarge);
        }
        Ok(URL_SAFE_NO_PAD.encode(text))
    }

    /// Decode a token into its raw values without checking arity.
    pub fn decode_values(&self, token: &str) -> Result<Vec<Value>, CursorError> {
        if token.is_empty() {
            return Ok(Vec::new());
        }
        // Check size before decoding to prevent DoS attacks
        if token.len() > MAX_CURSOR_SIZE {
            return Err(CursorError::TooLarge);
        }
        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| CursorError::InvalidBase64)?;
        let text = String::from_utf8(bytes).map_err(|_| CursorError::InvalidFormat)?;
        let parsed: JsonValue = json::from_str(&text).map_err(|_| CursorError::InvalidFormat)?;

        let JsonValue::Array(items) = parsed else {
            return Err(CursorError::InvalidFormat);
        };
        if items.len() > MAX_CURSOR_FIELDS {
            return Err(CursorError::TooManyFields);
        }
        items
            .iter()
            .map(|item| Value::from_json(item).ok_or(CursorError::InvalidFormat))
            .collect()
    }
}

impl CursorCodec for JsonCursorCodec {
    fn decode(&self, token: &str, keys: &[String]) -> Result<Vec<Value>, CursorError> {
        let values = self.decode_values(token)?;
        // Only the empty token carries no fields
        if !token.is_empty() && values.len() != keys.len() {
            return Err(CursorError::ArityMismatch {
                expected: keys.len(),
                found: values.len(),
            });
        }
        Ok(values)
    }

    fn encode<T: CursorFields + ?Sized>(
        &self,
        row: &T,
        keys: &[String],
    ) -> Result<String, CursorError> {
        let values = keys
            .iter()
            .map(|key| {
                row.cursor_value(key)
                    .ok_or_else(|| CursorError::MissingField(key.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.encode_values(&values)
    }
}

/// Errors that can occur when encoding or decoding a cursor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CursorError {
    /// The base64 encoding is invalid.
    #[error("invalid base64 encoding in cursor")]
    InvalidBase64,
    /// The cursor format is invalid.
    #[error("invalid cursor format (expected JSON array of scalars)")]
    InvalidFormat,
    /// The cursor exceeds the maximum allowed size.
    #[error("cursor exceeds maximum size ({}KB limit)", MAX_CURSOR_SIZE / 1024)]
    TooLarge,
    /// The cursor has too many values.
    #[error("cursor has too many fields (max {MAX_CURSOR_FIELDS})")]
    TooManyFields,
    /// The decoded value count does not match the key set.
    #[error("cursor has {found} values but {expected} keys are configured")]
    ArityMismatch {
        /// Number of configured keys.
        expected: usize,
        /// Number of values in the token.
        found: usize,
    },
    /// A row does not expose one of the configured keys.
    #[error("row has no value for cursor key '{0}'")]
    MissingField(String),
    /// A value cannot be carried by the codec.
    #[error("value cannot be encoded in a cursor: {0}")]
    UnsupportedValue(String),
}

impl CursorError {
    /// Returns `true` if this is an encoding/format error.
    ///
    /// Includes `InvalidBase64`, `InvalidFormat` and `ArityMismatch`.
    #[inline]
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidBase64 | Self::InvalidFormat | Self::ArityMismatch { .. }
        )
    }

    /// Returns `true` if this is a size/limit error.
    ///
    /// Includes `TooLarge` and `TooManyFields`.
    #[inline]
    #[must_use]
    pub const fn is_limit_error(&self) -> bool {
        matches!(self, Self::TooLarge | Self::TooManyFields)
    }
}
