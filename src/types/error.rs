use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::is_nqschar;

/// OAuth 2.0 error code.
///
/// Covers the codes returned by the authorization endpoint
/// ([RFC 6749 Section 4.1.2.1]) and by the token endpoint
/// ([RFC 6749 Section 5.2]). Codes outside of the RFC, such as
/// provider-specific extensions, are preserved verbatim in
/// [`ErrorCode::Unknown`] so that parsing never fails on them.
///
/// [RFC 6749 Section 4.1.2.1]: https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.2.1
/// [RFC 6749 Section 5.2]: https://datatracker.ietf.org/doc/html/rfc6749#section-5.2
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCode {
	/// The request is missing a required parameter, includes an invalid parameter value,
	/// includes a parameter more than once, or is otherwise malformed.
	InvalidRequest,

	/// The client is not authorized to request an authorization code using this method.
	UnauthorizedClient,

	/// The resource owner or authorization server denied the request.
	AccessDenied,

	/// The authorization server does not support obtaining an authorization code using this method.
	UnsupportedResponseType,

	/// The requested scope is invalid, unknown, or malformed.
	InvalidScope,

	/// The authorization server encountered an unexpected condition that prevented it from
	/// fulfilling the request. (This error code is needed because a 500 Internal Server
	/// Error HTTP status code cannot be returned to the client via an HTTP redirect.)
	ServerError,

	/// The authorization server is currently unable to handle the request due to a temporary
	/// overloading or maintenance of the server. (This error code is needed because a 503
	/// Service Unavailable HTTP status code cannot be returned to the client via an HTTP redirect.)
	TemporarilyUnavailable,

	/// Client authentication failed.
	InvalidClient,

	/// The provided authorization grant is invalid, expired, revoked, does not match the
	/// redirection URI used in the authorization request, or was issued to another client.
	InvalidGrant,

	/// The authorization grant type is not supported by the authorization server.
	UnsupportedGrantType,

	/// Any other error code, kept as sent by the server.
	Unknown(String),
}

impl ErrorCode {
	/// Parses an error code. Never fails: unrecognized codes end up in
	/// [`ErrorCode::Unknown`].
	pub fn new(code: &str) -> Self {
		match code {
			"invalid_request" => Self::InvalidRequest,
			"unauthorized_client" => Self::UnauthorizedClient,
			"access_denied" => Self::AccessDenied,
			"unsupported_response_type" => Self::UnsupportedResponseType,
			"invalid_scope" => Self::InvalidScope,
			"server_error" => Self::ServerError,
			"temporarily_unavailable" => Self::TemporarilyUnavailable,
			"invalid_client" => Self::InvalidClient,
			"invalid_grant" => Self::InvalidGrant,
			"unsupported_grant_type" => Self::UnsupportedGrantType,
			other => Self::Unknown(other.to_owned()),
		}
	}

	/// Returns the wire representation of this error code.
	pub fn as_str(&self) -> &str {
		match self {
			Self::InvalidRequest => "invalid_request",
			Self::UnauthorizedClient => "unauthorized_client",
			Self::AccessDenied => "access_denied",
			Self::UnsupportedResponseType => "unsupported_response_type",
			Self::InvalidScope => "invalid_scope",
			Self::ServerError => "server_error",
			Self::TemporarilyUnavailable => "temporarily_unavailable",
			Self::InvalidClient => "invalid_client",
			Self::InvalidGrant => "invalid_grant",
			Self::UnsupportedGrantType => "unsupported_grant_type",
			Self::Unknown(code) => code,
		}
	}

	/// Returns `true` for codes outside of RFC 6749.
	pub fn is_unknown(&self) -> bool {
		matches!(self, Self::Unknown(_))
	}
}

impl FromStr for ErrorCode {
	type Err = std::convert::Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self::new(s))
	}
}

impl From<String> for ErrorCode {
	fn from(value: String) -> Self {
		match Self::new(&value) {
			Self::Unknown(_) => Self::Unknown(value),
			known => known,
		}
	}
}

impl fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Serialize for ErrorCode {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		self.as_str().serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for ErrorCode {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		String::deserialize(deserializer).map(Self::from)
	}
}

/// Validates an `error_description` value.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#appendix-A.7>
///
/// # Grammar
///
/// ```abnf
/// error-description = 1*( %x20-21 / %x23-5B / %x5D-7E )
/// ```
pub const fn is_valid_error_description(s: &str) -> bool {
	let bytes = s.as_bytes();
	let mut i = 0;

	while i < bytes.len() {
		if !is_nqschar(bytes[i]) {
			return false;
		}

		i += 1
	}

	i > 0
}

/// Validates an `error_uri` value.
///
/// Only the character range is checked, not the URI-reference syntax.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#appendix-A.8>
///
/// # Grammar
///
/// ```abnf
/// error-uri = URI-reference ; restricted to %x21 / %x23-5B / %x5D-7E
/// ```
pub const fn is_valid_error_uri(s: &str) -> bool {
	let bytes = s.as_bytes();
	let mut i = 0;

	while i < bytes.len() {
		if bytes[i] == b' ' || !is_nqschar(bytes[i]) {
			return false;
		}

		i += 1
	}

	i > 0
}
