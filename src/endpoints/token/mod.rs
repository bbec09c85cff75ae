//! Token endpoint.
//!
//! A [`TokenRequest`] is a plain description of the HTTP exchange: building
//! one performs no I/O. The host executes it, either by hand or through an
//! [`HttpClient`], and hands the response back for decoding.
//!
//! See: <https://datatracker.ietf.org/doc/html/rfc6749#section-3.2>
use base64::{Engine, prelude::BASE64_STANDARD};
use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use iref::UriBuf;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
	AccessTokenBuf, ErrorCode,
	client::{OAuth2Client, OAuth2ClientError},
	transport::{APPLICATION_JSON, ContentType, HttpClient, expect_content_type},
};

pub mod decoders;

pub use decoders::{
	DecodeError, DefaultResponseDecoders, LenientResponseDecoders, ResponseDecoders,
	StrictResponseDecoders,
};

/// Token request descriptor.
///
/// Carries the decoders its response is expected to be read with.
#[derive(Debug, Clone)]
pub struct TokenRequest<D = DefaultResponseDecoders> {
	pub method: Method,

	/// Token endpoint.
	pub uri: UriBuf,

	pub headers: HeaderMap,

	pub body: Vec<u8>,

	pub decoders: D,
}

impl TokenRequest {
	/// Builds a `POST` request to the token endpoint `uri` with the given
	/// `body`.
	///
	/// Confidential clients (with a secret) additionally get an HTTP Basic
	/// `Authorization` header. Whatever identifies the client in the body is
	/// left untouched.
	pub fn new<C: ContentType>(
		uri: UriBuf,
		client: &impl OAuth2Client,
		body: &impl Serialize,
	) -> Self {
		let mut headers = HeaderMap::new();
		headers.insert(header::CONTENT_TYPE, C::VALUE);

		if let Some(secret) = client.client_secret() {
			headers.insert(
				header::AUTHORIZATION,
				basic_authorization(client.client_id().as_str(), secret),
			);
		}

		Self {
			method: Method::POST,
			uri,
			headers,
			body: C::encode(body),
			decoders: DefaultResponseDecoders,
		}
	}
}

impl<D> TokenRequest<D> {
	/// Replaces the decoders used on the response.
	pub fn with_decoders<E>(self, decoders: E) -> TokenRequest<E> {
		TokenRequest {
			method: self.method,
			uri: self.uri,
			headers: self.headers,
			body: self.body,
			decoders,
		}
	}

	/// Converts this descriptor into an [`http::Request`].
	pub fn to_http_request(&self) -> Result<http::Request<Vec<u8>>, OAuth2ClientError> {
		let mut request = http::Request::builder()
			.method(self.method.clone())
			.uri(self.uri.as_str())
			.body(self.body.clone())
			.map_err(OAuth2ClientError::request)?;

		*request.headers_mut() = self.headers.clone();
		Ok(request)
	}
}

impl<D: ResponseDecoders> TokenRequest<D> {
	/// Decodes a token endpoint response.
	///
	/// `200 OK` is decoded as a success, `400 Bad Request` and
	/// `401 Unauthorized` as an error response. Any other status is a
	/// [`OAuth2ClientError::ServerError`].
	pub fn decode_response(
		&self,
		response: http::Response<Vec<u8>>,
	) -> Result<AuthenticationResult, OAuth2ClientError> {
		let status = response.status();

		let result = match status {
			StatusCode::OK => {
				expect_content_type(response.headers(), &APPLICATION_JSON)?;
				AuthenticationResult::Success(self.decoders.decode_success(response.body())?)
			}
			StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
				expect_content_type(response.headers(), &APPLICATION_JSON)?;
				AuthenticationResult::Error(self.decoders.decode_error(response.body())?)
			}
			_ => return Err(OAuth2ClientError::server(status)),
		};

		log::debug!("token response ({status}): {}", result.kind());
		Ok(result)
	}

	/// Sends the request with `http_client` and decodes the response.
	pub async fn send(
		&self,
		http_client: &impl HttpClient,
	) -> Result<AuthenticationResult, OAuth2ClientError> {
		let request = self.to_http_request()?;
		let response = http_client.send(request).await?;
		self.decode_response(response)
	}
}

/// Builds an HTTP Basic `Authorization` header value.
///
/// `client_id` and `secret` are joined with `:` and encoded as they are.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-2.3.1>
pub fn basic_authorization(client_id: &str, secret: &str) -> HeaderValue {
	let credentials = BASE64_STANDARD.encode(format!("{client_id}:{secret}"));
	let mut value = HeaderValue::try_from(format!("Basic {credentials}"))
		// UNWRAP SAFETY: base64 output is always a valid header value.
		.unwrap();
	value.set_sensitive(true);
	value
}

/// Successful token response.
///
/// `scope` is reported as received: an empty list means the server did not
/// send any, in which case the granted scope is the requested one.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-5.1>
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthenticationSuccess {
	/// Access token, otherwise opaque.
	///
	/// Limited to visible ASCII (`1*VSCHAR`, RFC 6749 Appendix A.12) so it can
	/// be sent back in an `Authorization` header. Responses carrying any other
	/// token fail to decode.
	pub token: AccessTokenBuf,

	/// Token type, e.g. `Bearer`. Case insensitive.
	pub token_type: Option<String>,

	pub refresh_token: Option<String>,

	/// Lifetime of the access token, in seconds.
	pub expires_in: Option<u64>,

	/// Scope tokens, not checked against the scope-token grammar unless
	/// decoded with [`StrictResponseDecoders`].
	pub scope: Vec<String>,
}

/// Error response of the token endpoint.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-5.2>
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthenticationError {
	pub error: ErrorCode,

	/// Human-readable text providing additional information about the error.
	pub error_description: Option<String>,

	/// URI of a human-readable web page with information about the error.
	pub error_uri: Option<String>,
}

/// Decoded token endpoint response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AuthenticationResult {
	Success(AuthenticationSuccess),
	Error(AuthenticationError),
}

impl AuthenticationResult {
	fn kind(&self) -> &'static str {
		match self {
			Self::Success(_) => "success",
			Self::Error(_) => "error",
		}
	}
}

#[cfg(test)]
mod tests {
	use iref::uri;

	use super::*;
	use crate::{client::Credentials, client_id, transport::WwwFormUrlEncoded};

	#[derive(Serialize)]
	struct Body {
		grant_type: &'static str,
	}

	fn request(credentials: &Credentials) -> TokenRequest {
		TokenRequest::new::<WwwFormUrlEncoded>(
			uri!("https://auth.test/token").to_owned(),
			credentials,
			&Body {
				grant_type: "client_credentials",
			},
		)
	}

	fn json_response(status: StatusCode, body: &str) -> http::Response<Vec<u8>> {
		http::Response::builder()
			.status(status)
			.header(header::CONTENT_TYPE, "application/json;charset=UTF-8")
			.body(body.as_bytes().to_vec())
			.unwrap()
	}

	#[test]
	fn basic_authorization_header() {
		// Example from RFC 7617.
		assert_eq!(
			basic_authorization("Aladdin", "open sesame"),
			"Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ=="
		);
	}

	#[test]
	fn http_request_conversion() {
		let credentials =
			Credentials::confidential(client_id!("abc").to_owned(), "s".to_owned());
		let request = request(&credentials).to_http_request().unwrap();

		assert_eq!(request.method(), Method::POST);
		assert_eq!(request.uri(), "https://auth.test/token");
		assert_eq!(
			request.headers()[header::CONTENT_TYPE],
			"application/x-www-form-urlencoded"
		);
		assert_eq!(request.headers()[header::AUTHORIZATION], "Basic YWJjOnM=");
		assert_eq!(request.body(), b"grant_type=client_credentials");
	}

	#[test]
	fn decode_ok_response() {
		let request = request(&Credentials::public(client_id!("abc").to_owned()));
		let result = request
			.decode_response(json_response(
				StatusCode::OK,
				r#"{"access_token":"tok","token_type":"Bearer","expires_in":60}"#,
			))
			.unwrap();

		match result {
			AuthenticationResult::Success(success) => {
				assert_eq!(success.token.as_str(), "tok");
				assert_eq!(success.expires_in, Some(60));
			}
			other => panic!("unexpected result: {other:?}"),
		}
	}

	#[test]
	fn decode_error_response() {
		let request = request(&Credentials::public(client_id!("abc").to_owned()));

		for status in [StatusCode::BAD_REQUEST, StatusCode::UNAUTHORIZED] {
			let result = request
				.decode_response(json_response(status, r#"{"error":"invalid_client"}"#))
				.unwrap();

			assert_eq!(
				result,
				AuthenticationResult::Error(AuthenticationError {
					error: ErrorCode::InvalidClient,
					error_description: None,
					error_uri: None,
				})
			);
		}
	}

	#[test]
	fn decode_malformed_response() {
		let request = request(&Credentials::public(client_id!("abc").to_owned()));

		assert!(matches!(
			request.decode_response(json_response(StatusCode::OK, r#"{"token_type":"Bearer"}"#)),
			Err(OAuth2ClientError::Decode(DecodeError::MissingField(
				"access_token"
			)))
		));
	}

	#[test]
	fn decode_unexpected_status() {
		let request = request(&Credentials::public(client_id!("abc").to_owned()));

		assert!(matches!(
			request.decode_response(json_response(StatusCode::INTERNAL_SERVER_ERROR, "{}")),
			Err(OAuth2ClientError::ServerError(StatusCode::INTERNAL_SERVER_ERROR))
		));
	}

	#[test]
	fn decode_with_custom_decoders() {
		let request = request(&Credentials::public(client_id!("abc").to_owned()))
			.with_decoders(LenientResponseDecoders);

		match request
			.decode_response(json_response(
				StatusCode::OK,
				r#"{"access_token":"tok","scope":["a","b"]}"#,
			))
			.unwrap()
		{
			AuthenticationResult::Success(success) => assert_eq!(success.scope.len(), 2),
			other => panic!("unexpected result: {other:?}"),
		}
	}
}
