//! Query parsers for the authorization response.
//!
//! The redirect back to the client carries the authorization response in its
//! query ([RFC 6749 Section 4.1.2]). How each field is extracted is decided by
//! a [`QueryParsers`] implementation: every method has an RFC-compliant
//! default, so implementors override only what they need, or replace the
//! whole set.
//!
//! [RFC 6749 Section 4.1.2]: https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.2
use crate::{
	Code, ErrorCode, State, is_valid_error_description, is_valid_error_uri, util::QueryParams,
};

use super::{AuthorizationError, AuthorizationSuccess};

/// Set of parsing strategies applied to the redirect query.
///
/// [`parse_code`](Self::parse_code) and [`parse_error`](Self::parse_error)
/// run first. The detail parser matching the outcome then receives the value
/// they extracted.
pub trait QueryParsers {
	/// Extracts the authorization code.
	fn parse_code(&self, query: &QueryParams) -> Option<String> {
		code(query)
	}

	/// Extracts the error code.
	fn parse_error(&self, query: &QueryParams) -> Option<ErrorCode> {
		error(query)
	}

	/// Builds the success response for the given `code`.
	fn parse_success(&self, code: String, query: &QueryParams) -> Option<AuthorizationSuccess> {
		Some(AuthorizationSuccess {
			code,
			state: state(query),
		})
	}

	/// Builds the error response for the given `error` code.
	fn parse_error_response(
		&self,
		error: ErrorCode,
		query: &QueryParams,
	) -> Option<AuthorizationError> {
		Some(AuthorizationError {
			error,
			error_description: error_description(query),
			error_uri: error_uri(query),
			state: state(query),
		})
	}
}

impl<P: QueryParsers> QueryParsers for &P {
	fn parse_code(&self, query: &QueryParams) -> Option<String> {
		P::parse_code(*self, query)
	}

	fn parse_error(&self, query: &QueryParams) -> Option<ErrorCode> {
		P::parse_error(*self, query)
	}

	fn parse_success(&self, code: String, query: &QueryParams) -> Option<AuthorizationSuccess> {
		P::parse_success(*self, code, query)
	}

	fn parse_error_response(
		&self,
		error: ErrorCode,
		query: &QueryParams,
	) -> Option<AuthorizationError> {
		P::parse_error_response(*self, error, query)
	}
}

/// RFC 6749 parsers.
///
/// Optional fields are passed through without character-range checks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DefaultQueryParsers;

impl QueryParsers for DefaultQueryParsers {}

/// RFC 6749 parsers enforcing the grammar of every field.
///
/// A `code` outside of `1*VSCHAR` counts as absent. Optional fields outside
/// of their grammar are dropped, they never abort the parse.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StrictQueryParsers;

impl QueryParsers for StrictQueryParsers {
	fn parse_code(&self, query: &QueryParams) -> Option<String> {
		code(query).filter(|code| validated("code", code, Code::validate_str))
	}

	fn parse_success(&self, code: String, query: &QueryParams) -> Option<AuthorizationSuccess> {
		Some(AuthorizationSuccess {
			code,
			state: strict_state(query),
		})
	}

	fn parse_error_response(
		&self,
		error: ErrorCode,
		query: &QueryParams,
	) -> Option<AuthorizationError> {
		Some(AuthorizationError {
			error,
			error_description: error_description(query)
				.filter(|v| validated("error_description", v, is_valid_error_description)),
			error_uri: error_uri(query)
				.filter(|v| validated("error_uri", v, is_valid_error_uri)),
			state: strict_state(query),
		})
	}
}

fn validated(name: &str, value: &str, validate: impl FnOnce(&str) -> bool) -> bool {
	let valid = validate(value);
	if !valid {
		log::warn!("ignoring malformed `{name}` query parameter");
	}
	valid
}

fn strict_state(query: &QueryParams) -> Option<String> {
	state(query).filter(|v| validated("state", v, State::validate_str))
}

/// Reads the `code` parameter. An empty value counts as absent.
pub fn code(query: &QueryParams) -> Option<String> {
	query
		.get("code")
		.filter(|code| !code.is_empty())
		.map(ToOwned::to_owned)
}

/// Reads the `error` parameter. Unknown codes are preserved, an empty value
/// counts as absent.
pub fn error(query: &QueryParams) -> Option<ErrorCode> {
	query
		.get("error")
		.filter(|error| !error.is_empty())
		.map(ErrorCode::new)
}

/// Reads the `state` parameter verbatim.
pub fn state(query: &QueryParams) -> Option<String> {
	query.get("state").map(ToOwned::to_owned)
}

/// Reads the `error_description` parameter verbatim.
pub fn error_description(query: &QueryParams) -> Option<String> {
	query.get("error_description").map(ToOwned::to_owned)
}

/// Reads the `error_uri` parameter verbatim.
pub fn error_uri(query: &QueryParams) -> Option<String> {
	query.get("error_uri").map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_parsers_pass_through() {
		let query = QueryParams::parse(
			"error=access_denied&error_description=caf%C3%A9%20%22no%22&error_uri=a%20b&state=%0A",
		);
		let parsers = DefaultQueryParsers;
		let error = parsers.parse_error(&query).unwrap();
		let response = parsers.parse_error_response(error, &query).unwrap();

		assert_eq!(response.error, ErrorCode::AccessDenied);
		assert_eq!(response.error_description.as_deref(), Some("café \"no\""));
		assert_eq!(response.error_uri.as_deref(), Some("a b"));
		assert_eq!(response.state.as_deref(), Some("\n"));
	}

	#[test]
	fn strict_parsers_drop_malformed_optional_fields() {
		let query = QueryParams::parse(
			"error=access_denied&error_description=caf%C3%A9&error_uri=a%20b&state=%0A",
		);
		let parsers = StrictQueryParsers;
		let error = parsers.parse_error(&query).unwrap();
		let response = parsers.parse_error_response(error, &query).unwrap();

		assert_eq!(response.error, ErrorCode::AccessDenied);
		assert_eq!(response.error_description, None);
		assert_eq!(response.error_uri, None);
		assert_eq!(response.state, None);
	}

	#[test]
	fn strict_parsers_keep_valid_fields() {
		let query = QueryParams::parse(
			"error=invalid_scope&error_description=Unknown%20scope&error_uri=https%3A%2F%2Fauth.test%2Ferr&state=xyz",
		);
		let response = StrictQueryParsers
			.parse_error_response(ErrorCode::InvalidScope, &query)
			.unwrap();

		assert_eq!(response.error_description.as_deref(), Some("Unknown scope"));
		assert_eq!(response.error_uri.as_deref(), Some("https://auth.test/err"));
		assert_eq!(response.state.as_deref(), Some("xyz"));
	}

	#[test]
	fn strict_code_must_be_vschar() {
		let query = QueryParams::parse("code=caf%C3%A9");
		assert_eq!(DefaultQueryParsers.parse_code(&query).as_deref(), Some("café"));
		assert_eq!(StrictQueryParsers.parse_code(&query), None);
	}

	#[test]
	fn empty_code_and_error_are_absent() {
		let query = QueryParams::parse("code=&error=");
		assert_eq!(code(&query), None);
		assert_eq!(error(&query), None);
	}

	#[test]
	fn empty_state_is_kept() {
		let query = QueryParams::parse("state=");
		assert_eq!(state(&query).as_deref(), Some(""));
	}
}
