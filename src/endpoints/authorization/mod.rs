//! Authorization endpoint.
//!
//! Building the authorization request redirect
//! ([RFC 6749 Section 4.1.1]) and classifying the redirect back to the client
//! ([RFC 6749 Section 4.1.2]).
//!
//! [RFC 6749 Section 4.1.1]: https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.1
//! [RFC 6749 Section 4.1.2]: https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.2
use iref::{Uri, UriBuf};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
	ClientIdBuf, ErrorCode, ScopeBuf, ScopeTokenBuf, State, StateBuf, Stateful,
	endpoints::RedirectRequest,
	util::{QueryParams, extend_uri_query},
};

pub mod parsers;

pub use parsers::{DefaultQueryParsers, QueryParsers, StrictQueryParsers};

/// Authorization request configuration.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.1>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorization {
	/// Client identifier.
	pub client_id: ClientIdBuf,

	/// Authorization endpoint.
	pub uri: UriBuf,

	/// Where the authorization server redirects the user-agent back to.
	///
	/// The token request must carry the exact same value.
	pub redirect_uri: UriBuf,

	/// Requested scope, in order. May be empty.
	pub scope: Vec<ScopeTokenBuf>,

	/// CSRF token echoed back by the authorization server.
	///
	/// See [`StateBuf::new_random`].
	pub state: Option<StateBuf>,
}

impl Authorization {
	pub fn new(client_id: ClientIdBuf, uri: UriBuf, redirect_uri: UriBuf) -> Self {
		Self {
			client_id,
			uri,
			redirect_uri,
			scope: Vec::new(),
			state: None,
		}
	}

	pub fn with_scope(self, scope: impl IntoIterator<Item = ScopeTokenBuf>) -> Self {
		Self {
			scope: scope.into_iter().collect(),
			..self
		}
	}

	pub fn with_state(self, state: Option<StateBuf>) -> Self {
		Self { state, ..self }
	}

	/// Builds the URI the user-agent must be redirected to.
	///
	/// Query parameters already present on the authorization endpoint URI are
	/// kept.
	pub fn to_uri(&self) -> UriBuf {
		let mut uri = self.uri.clone();
		extend_uri_query(&mut uri, self.build_query());
		log::debug!("authorization request: {}", uri.as_str());
		uri
	}
}

impl RedirectRequest for Authorization {
	type RequestBody<'b>
		= Stateful<AuthorizationRequest<'b>>
	where
		Self: 'b;

	fn build_query(&self) -> Self::RequestBody<'_> {
		Stateful::new(
			AuthorizationRequest {
				client_id: self.client_id.as_str(),
				redirect_uri: self.redirect_uri.as_str(),
				scope: ScopeBuf::from_tokens(self.scope.iter().map(|t| &**t)),
			},
			self.state.clone(),
		)
	}
}

/// Authorization request query parameters, without `state`.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "response_type", rename = "code")]
pub struct AuthorizationRequest<'a> {
	pub client_id: &'a str,

	pub redirect_uri: &'a str,

	/// Space-separated scope, omitted when nothing is requested.
	pub scope: Option<ScopeBuf>,
}

/// Successful authorization response.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.2>
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorizationSuccess {
	/// Authorization code, to be exchanged at the token endpoint.
	pub code: String,

	/// `state` as sent back by the authorization server.
	pub state: Option<String>,
}

impl AuthorizationSuccess {
	/// Checks the returned `state` against the one sent in the request.
	///
	/// Both must be absent, or both present and equal.
	pub fn state_matches(&self, expected: Option<&State>) -> bool {
		self.state.as_deref() == expected.map(State::as_str)
	}
}

/// Error response of the authorization endpoint.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.2.1>
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorizationError {
	pub error: ErrorCode,

	/// Human-readable text providing additional information about the error.
	pub error_description: Option<String>,

	/// URI of a human-readable web page with information about the error.
	pub error_uri: Option<String>,

	/// `state` as sent back by the authorization server.
	pub state: Option<String>,
}

/// Outcome of classifying a redirect URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthorizationResult {
	/// The URI carries no authorization response.
	Empty,

	/// The authorization server reported an error.
	Error(AuthorizationError),

	/// The authorization server issued a code.
	Success(AuthorizationSuccess),
}

impl AuthorizationResult {
	/// Classifies the redirect `uri` with the [`DefaultQueryParsers`].
	pub fn parse(uri: &Uri) -> Self {
		Self::parse_with(uri, &DefaultQueryParsers)
	}

	/// Classifies the redirect `uri` with the given parsers.
	///
	/// Only the query is looked at, path and fragment are ignored.
	pub fn parse_with(uri: &Uri, parsers: &impl QueryParsers) -> Self {
		let result = Self::from_query(&QueryParams::from_uri(uri), parsers);
		log::debug!("authorization response: {}", result.kind());
		result
	}

	/// Classifies already decoded query parameters.
	///
	/// A `code` wins over an `error` when the server sends both.
	pub fn from_query(query: &QueryParams, parsers: &impl QueryParsers) -> Self {
		match (parsers.parse_code(query), parsers.parse_error(query)) {
			(Some(code), _) => parsers
				.parse_success(code, query)
				.map_or(Self::Empty, Self::Success),
			(None, Some(error)) => parsers
				.parse_error_response(error, query)
				.map_or(Self::Empty, Self::Error),
			(None, None) => Self::Empty,
		}
	}

	fn kind(&self) -> &'static str {
		match self {
			Self::Empty => "empty",
			Self::Error(_) => "error",
			Self::Success(_) => "success",
		}
	}
}

#[cfg(test)]
mod tests {
	use iref::uri;

	use super::*;
	use crate::{ScopeToken, client_id};

	fn authorization() -> Authorization {
		Authorization::new(
			client_id!("abc").to_owned(),
			uri!("https://auth.test/authorize").to_owned(),
			uri!("https://app.test/cb").to_owned(),
		)
	}

	fn tokens(tokens: &[&str]) -> Vec<ScopeTokenBuf> {
		tokens
			.iter()
			.map(|t| ScopeToken::new(*t).unwrap().to_owned())
			.collect()
	}

	// --- Authorization URL ---

	#[test]
	fn authorization_uri() {
		let uri = authorization()
			.with_scope(tokens(&["read", "write"]))
			.with_state(Some(StateBuf::new("xyz".to_owned()).unwrap()))
			.to_uri();

		assert_eq!(
			uri.as_str(),
			"https://auth.test/authorize?response_type=code&client_id=abc&redirect_uri=https%3A%2F%2Fapp.test%2Fcb&scope=read%20write&state=xyz"
		);
	}

	#[test]
	fn authorization_uri_omits_empty_scope_and_state() {
		let uri = authorization().to_uri();

		assert_eq!(
			uri.as_str(),
			"https://auth.test/authorize?response_type=code&client_id=abc&redirect_uri=https%3A%2F%2Fapp.test%2Fcb"
		);
	}

	#[test]
	fn authorization_uri_keeps_endpoint_query() {
		let mut authorization = authorization();
		authorization.uri = uri!("https://auth.test/authorize?prompt=consent").to_owned();

		let query = QueryParams::from_uri(&authorization.to_uri());
		assert_eq!(query.get("prompt"), Some("consent"));
		assert_eq!(query.get("response_type"), Some("code"));
		assert_eq!(query.get("client_id"), Some("abc"));
	}

	#[test]
	fn authorization_uri_keeps_redirect_uri_verbatim() {
		let mut authorization = authorization();
		authorization.redirect_uri = uri!("https://app.test:443/cb/?x=1").to_owned();

		let query = QueryParams::from_uri(&authorization.to_uri());
		assert_eq!(query.get("redirect_uri"), Some("https://app.test:443/cb/?x=1"));
	}

	// --- Classification ---

	#[test]
	fn classify_empty() {
		assert_eq!(
			AuthorizationResult::parse(uri!("https://app.test/cb")),
			AuthorizationResult::Empty
		);
		assert_eq!(
			AuthorizationResult::parse(uri!("https://app.test/cb?state=xyz&foo=bar")),
			AuthorizationResult::Empty
		);
	}

	#[test]
	fn classify_success() {
		assert_eq!(
			AuthorizationResult::parse(uri!("https://app.test/cb?code=abc123&state=xyz")),
			AuthorizationResult::Success(AuthorizationSuccess {
				code: "abc123".to_owned(),
				state: Some("xyz".to_owned()),
			})
		);
	}

	#[test]
	fn classify_success_without_state() {
		assert_eq!(
			AuthorizationResult::parse(uri!("https://app.test/other/path?code=abc123")),
			AuthorizationResult::Success(AuthorizationSuccess {
				code: "abc123".to_owned(),
				state: None,
			})
		);
	}

	#[test]
	fn code_takes_precedence_over_error() {
		assert_eq!(
			AuthorizationResult::parse(uri!(
				"https://app.test/cb?error=access_denied&code=abc123&state=xyz"
			)),
			AuthorizationResult::Success(AuthorizationSuccess {
				code: "abc123".to_owned(),
				state: Some("xyz".to_owned()),
			})
		);
	}

	#[test]
	fn classify_error() {
		assert_eq!(
			AuthorizationResult::parse(uri!("https://app.test/cb?error=access_denied&state=xyz")),
			AuthorizationResult::Error(AuthorizationError {
				error: ErrorCode::AccessDenied,
				error_description: None,
				error_uri: None,
				state: Some("xyz".to_owned()),
			})
		);
	}

	#[test]
	fn classify_error_with_details() {
		let result = AuthorizationResult::parse(uri!(
			"https://app.test/cb?error=invalid_scope&error_description=Scope%20%22admin%22%20is%20unknown&error_uri=https%3A%2F%2Fauth.test%2Fdocs"
		));

		assert_eq!(
			result,
			AuthorizationResult::Error(AuthorizationError {
				error: ErrorCode::InvalidScope,
				error_description: Some("Scope \"admin\" is unknown".to_owned()),
				error_uri: Some("https://auth.test/docs".to_owned()),
				state: None,
			})
		);
	}

	#[test]
	fn classify_unknown_error() {
		match AuthorizationResult::parse(uri!("https://app.test/cb?error=login_required")) {
			AuthorizationResult::Error(e) => {
				assert_eq!(e.error, ErrorCode::Unknown("login_required".to_owned()))
			}
			other => panic!("unexpected result: {other:?}"),
		}
	}

	#[test]
	fn classify_ignores_fragment() {
		assert_eq!(
			AuthorizationResult::parse(uri!("https://app.test/cb#code=abc123")),
			AuthorizationResult::Empty
		);
	}

	#[test]
	fn custom_parsers() {
		struct LegacyParsers;

		impl QueryParsers for LegacyParsers {
			fn parse_code(&self, query: &QueryParams) -> Option<String> {
				query.get("auth_code").map(ToOwned::to_owned)
			}
		}

		let uri = uri!("https://app.test/cb?auth_code=abc123&state=xyz");
		assert_eq!(AuthorizationResult::parse(uri), AuthorizationResult::Empty);
		assert_eq!(
			AuthorizationResult::parse_with(uri, &LegacyParsers),
			AuthorizationResult::Success(AuthorizationSuccess {
				code: "abc123".to_owned(),
				state: Some("xyz".to_owned()),
			})
		);
	}

	#[test]
	fn rejecting_detail_parser_yields_empty() {
		struct RequireState;

		impl QueryParsers for RequireState {
			fn parse_success(
				&self,
				code: String,
				query: &QueryParams,
			) -> Option<AuthorizationSuccess> {
				let state = parsers::state(query)?;
				Some(AuthorizationSuccess {
					code,
					state: Some(state),
				})
			}
		}

		assert_eq!(
			AuthorizationResult::parse_with(uri!("https://app.test/cb?code=abc"), &RequireState),
			AuthorizationResult::Empty
		);
	}

	#[test]
	fn state_round_trip() {
		let state = StateBuf::new_random();
		let uri = authorization()
			.with_state(Some(state.clone()))
			.to_uri();
		let sent = QueryParams::from_uri(&uri);
		assert_eq!(sent.get("state"), Some(state.as_str()));

		let redirect =
			UriBuf::new(format!("https://app.test/cb?code=c&state={}", state.as_str()).into_bytes())
				.unwrap();
		match AuthorizationResult::parse(&redirect) {
			AuthorizationResult::Success(success) => {
				assert!(success.state_matches(Some(&state)));
				assert!(!success.state_matches(None));
			}
			other => panic!("unexpected result: {other:?}"),
		}
	}
}
