//! Token response decoders.
//!
//! The token endpoint answers with a JSON object
//! ([RFC 6749 Section 5.1] on success, [Section 5.2] on error). Each field is
//! decoded by a method of [`ResponseDecoders`], so a single field can be
//! decoded differently without touching the others. Key names are fixed by
//! the RFC and are not configurable.
//!
//! [RFC 6749 Section 5.1]: https://datatracker.ietf.org/doc/html/rfc6749#section-5.1
//! [Section 5.2]: https://datatracker.ietf.org/doc/html/rfc6749#section-5.2
use serde_json::{Map, Value};

use crate::{AccessTokenBuf, ErrorCode, Scope};

use super::{AuthenticationError, AuthenticationResult, AuthenticationSuccess};

/// Malformed token response.
///
/// Distinct from [`AuthenticationError`]: the server did not declare an
/// OAuth error, it sent something that does not follow the protocol.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
	#[error("invalid JSON: {0}")]
	Json(#[from] serde_json::Error),

	#[error("expected a JSON object")]
	NotAnObject,

	#[error("missing field `{0}`")]
	MissingField(&'static str),

	#[error("invalid field `{field}`: {reason}")]
	InvalidField {
		field: &'static str,
		reason: &'static str,
	},
}

impl DecodeError {
	pub fn invalid(field: &'static str, reason: &'static str) -> Self {
		Self::InvalidField { field, reason }
	}
}

/// Set of decoding strategies for the token response.
///
/// Every field decoder receives the raw JSON value of its key, or `None` if
/// the key is absent.
pub trait ResponseDecoders {
	fn decode_access_token(&self, value: Option<&Value>) -> Result<AccessTokenBuf, DecodeError> {
		access_token(value)
	}

	fn decode_token_type(&self, value: Option<&Value>) -> Result<Option<String>, DecodeError> {
		optional_string("token_type", value)
	}

	fn decode_refresh_token(&self, value: Option<&Value>) -> Result<Option<String>, DecodeError> {
		optional_string("refresh_token", value)
	}

	fn decode_expires_in(&self, value: Option<&Value>) -> Result<Option<u64>, DecodeError> {
		expires_in(value)
	}

	fn decode_scope(&self, value: Option<&Value>) -> Result<Vec<String>, DecodeError> {
		scope(value)
	}

	fn decode_error_code(&self, value: Option<&Value>) -> Result<ErrorCode, DecodeError> {
		error_code(value)
	}

	fn decode_error_description(
		&self,
		value: Option<&Value>,
	) -> Result<Option<String>, DecodeError> {
		optional_string("error_description", value)
	}

	fn decode_error_uri(&self, value: Option<&Value>) -> Result<Option<String>, DecodeError> {
		optional_string("error_uri", value)
	}

	/// Decodes a successful token response object.
	fn success_from_json(
		&self,
		object: &Map<String, Value>,
	) -> Result<AuthenticationSuccess, DecodeError> {
		Ok(AuthenticationSuccess {
			token: self.decode_access_token(object.get("access_token"))?,
			token_type: self.decode_token_type(object.get("token_type"))?,
			refresh_token: self.decode_refresh_token(object.get("refresh_token"))?,
			expires_in: self.decode_expires_in(object.get("expires_in"))?,
			scope: self.decode_scope(object.get("scope"))?,
		})
	}

	/// Decodes an error response object.
	fn error_from_json(
		&self,
		object: &Map<String, Value>,
	) -> Result<AuthenticationError, DecodeError> {
		Ok(AuthenticationError {
			error: self.decode_error_code(object.get("error"))?,
			error_description: self.decode_error_description(object.get("error_description"))?,
			error_uri: self.decode_error_uri(object.get("error_uri"))?,
		})
	}

	/// Decodes a successful token response body.
	fn decode_success(&self, body: &[u8]) -> Result<AuthenticationSuccess, DecodeError> {
		self.success_from_json(&json_object(body)?)
	}

	/// Decodes an error response body.
	fn decode_error(&self, body: &[u8]) -> Result<AuthenticationError, DecodeError> {
		self.error_from_json(&json_object(body)?)
	}

	/// Decodes a token response body of unknown outcome.
	///
	/// Bodies with an `error` key are error responses.
	fn decode(&self, body: &[u8]) -> Result<AuthenticationResult, DecodeError> {
		let object = json_object(body)?;

		if object.contains_key("error") {
			self.error_from_json(&object).map(AuthenticationResult::Error)
		} else {
			self.success_from_json(&object)
				.map(AuthenticationResult::Success)
		}
	}
}

impl<D: ResponseDecoders> ResponseDecoders for &D {
	fn decode_access_token(&self, value: Option<&Value>) -> Result<AccessTokenBuf, DecodeError> {
		D::decode_access_token(*self, value)
	}

	fn decode_token_type(&self, value: Option<&Value>) -> Result<Option<String>, DecodeError> {
		D::decode_token_type(*self, value)
	}

	fn decode_refresh_token(&self, value: Option<&Value>) -> Result<Option<String>, DecodeError> {
		D::decode_refresh_token(*self, value)
	}

	fn decode_expires_in(&self, value: Option<&Value>) -> Result<Option<u64>, DecodeError> {
		D::decode_expires_in(*self, value)
	}

	fn decode_scope(&self, value: Option<&Value>) -> Result<Vec<String>, DecodeError> {
		D::decode_scope(*self, value)
	}

	fn decode_error_code(&self, value: Option<&Value>) -> Result<ErrorCode, DecodeError> {
		D::decode_error_code(*self, value)
	}

	fn decode_error_description(
		&self,
		value: Option<&Value>,
	) -> Result<Option<String>, DecodeError> {
		D::decode_error_description(*self, value)
	}

	fn decode_error_uri(&self, value: Option<&Value>) -> Result<Option<String>, DecodeError> {
		D::decode_error_uri(*self, value)
	}

	fn success_from_json(
		&self,
		object: &Map<String, Value>,
	) -> Result<AuthenticationSuccess, DecodeError> {
		D::success_from_json(*self, object)
	}

	fn error_from_json(
		&self,
		object: &Map<String, Value>,
	) -> Result<AuthenticationError, DecodeError> {
		D::error_from_json(*self, object)
	}
}

/// RFC 6749 decoders. `scope` must be a space-separated string.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DefaultResponseDecoders;

impl ResponseDecoders for DefaultResponseDecoders {}

/// RFC 6749 decoders accepting the `scope` encodings found in the wild:
/// comma-separated strings and JSON arrays of strings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LenientResponseDecoders;

impl ResponseDecoders for LenientResponseDecoders {
	fn decode_scope(&self, value: Option<&Value>) -> Result<Vec<String>, DecodeError> {
		lenient_scope(value)
	}
}

/// RFC 6749 decoders that also enforce the `scope` grammar.
///
/// A scope with an out-of-grammar token fails the whole response, access
/// token included.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StrictResponseDecoders;

impl ResponseDecoders for StrictResponseDecoders {
	fn decode_scope(&self, value: Option<&Value>) -> Result<Vec<String>, DecodeError> {
		strict_scope(value)
	}
}

fn json_object(body: &[u8]) -> Result<Map<String, Value>, DecodeError> {
	match serde_json::from_slice::<Value>(body)? {
		Value::Object(object) => Ok(object),
		_ => Err(DecodeError::NotAnObject),
	}
}

/// `null` is read as absent.
fn present(value: Option<&Value>) -> Option<&Value> {
	value.filter(|v| !v.is_null())
}

/// Decodes the required `access_token`.
pub fn access_token(value: Option<&Value>) -> Result<AccessTokenBuf, DecodeError> {
	match present(value) {
		Some(Value::String(token)) => AccessTokenBuf::new(token.clone())
			.map_err(|_| DecodeError::invalid("access_token", "expected a non-empty token")),
		Some(_) => Err(DecodeError::invalid("access_token", "expected a string")),
		None => Err(DecodeError::MissingField("access_token")),
	}
}

/// Decodes an optional string field.
pub fn optional_string(
	field: &'static str,
	value: Option<&Value>,
) -> Result<Option<String>, DecodeError> {
	match present(value) {
		Some(Value::String(s)) => Ok(Some(s.clone())),
		Some(_) => Err(DecodeError::invalid(field, "expected a string")),
		None => Ok(None),
	}
}

/// Decodes the optional `expires_in` lifetime, in seconds.
///
/// Integral floats such as `3600.0` are accepted. Negative, fractional and
/// out of range values are rejected.
pub fn expires_in(value: Option<&Value>) -> Result<Option<u64>, DecodeError> {
	const INVALID: DecodeError = DecodeError::InvalidField {
		field: "expires_in",
		reason: "expected a non-negative integer",
	};

	match present(value) {
		Some(Value::Number(n)) => n
			.as_u64()
			.or_else(|| {
				n.as_f64()
					.filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f < u64::MAX as f64)
					.map(|f| f as u64)
			})
			.map(Some)
			.ok_or(INVALID),
		Some(_) => Err(INVALID),
		None => Ok(None),
	}
}

/// Splits `value` on any of `separators`. Empty pieces are dropped.
fn split_words(value: &str, separators: &[char]) -> impl Iterator<Item = String> {
	value
		.split(|c| separators.contains(&c))
		.filter(|t| !t.is_empty())
		.map(ToOwned::to_owned)
}

/// Decodes the optional `scope` as a space-separated string.
///
/// Tokens are not checked against the scope-token grammar. An absent scope
/// decodes as an empty list.
pub fn scope(value: Option<&Value>) -> Result<Vec<String>, DecodeError> {
	match present(value) {
		Some(Value::String(s)) => Ok(split_words(s, &[' ']).collect()),
		Some(_) => Err(DecodeError::invalid("scope", "expected a string")),
		None => Ok(Vec::new()),
	}
}

/// Decodes the optional `scope` as a space or comma separated string, or as
/// an array of strings.
pub fn lenient_scope(value: Option<&Value>) -> Result<Vec<String>, DecodeError> {
	const SEPARATORS: &[char] = &[' ', ','];

	match present(value) {
		Some(Value::String(s)) => Ok(split_words(s, SEPARATORS).collect()),
		Some(Value::Array(items)) => {
			let mut tokens = Vec::new();

			for item in items {
				match item {
					Value::String(s) => tokens.extend(split_words(s, SEPARATORS)),
					_ => return Err(DecodeError::invalid("scope", "expected an array of strings")),
				}
			}

			Ok(tokens)
		}
		Some(_) => Err(DecodeError::invalid("scope", "expected a string or an array")),
		None => Ok(Vec::new()),
	}
}

/// Decodes the optional `scope` as a [`Scope`]: scope tokens separated by
/// single spaces.
///
/// An empty string decodes as an empty list.
pub fn strict_scope(value: Option<&Value>) -> Result<Vec<String>, DecodeError> {
	match present(value) {
		Some(Value::String(s)) if s.is_empty() => Ok(Vec::new()),
		Some(Value::String(s)) => {
			let scope = Scope::new(s.as_str())
				.map_err(|_| DecodeError::invalid("scope", "invalid scope"))?;
			Ok(scope.iter().map(|t| t.as_str().to_owned()).collect())
		}
		Some(_) => Err(DecodeError::invalid("scope", "expected a string")),
		None => Ok(Vec::new()),
	}
}

/// Decodes the required `error` code. Unknown codes are preserved.
pub fn error_code(value: Option<&Value>) -> Result<ErrorCode, DecodeError> {
	match present(value) {
		Some(Value::String(s)) if !s.is_empty() => Ok(ErrorCode::new(s)),
		Some(_) => Err(DecodeError::invalid("error", "expected a non-empty string")),
		None => Err(DecodeError::MissingField("error")),
	}
}
