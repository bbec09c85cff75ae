//! HTTP transport layer, content type encoding, and client abstraction.
//!
//! The library never performs I/O on its own: token requests are plain
//! descriptors that a host [`HttpClient`] executes.
use http::{HeaderMap, HeaderValue, header};
use serde::Serialize;

use crate::client::OAuth2ClientError;

mod client;

pub use client::*;

/// `Content-Type: application/json` header value.
pub const APPLICATION_JSON: HeaderValue = HeaderValue::from_static("application/json");

/// `Content-Type: application/x-www-form-urlencoded` header value.
pub const APPLICATION_X_WWW_FORM_URLENCODED: HeaderValue =
	HeaderValue::from_static("application/x-www-form-urlencoded");

/// Validates that the response `Content-Type` header matches the expected
/// value.
///
/// Parameters such as `; charset=utf-8` are accepted. Returns an error if the
/// header is missing or does not match.
pub fn expect_content_type(
	headers: &HeaderMap,
	expected_value: &HeaderValue,
) -> ::std::result::Result<(), OAuth2ClientError> {
	let content_type = headers
		.get(header::CONTENT_TYPE)
		.ok_or_else(|| OAuth2ClientError::response("missing content type"))?;

	if !content_type
		.as_bytes()
		.starts_with(expected_value.as_bytes())
	{
		Err(OAuth2ClientError::response("unexpected content type"))
	} else {
		Ok(())
	}
}

/// Trait for encoding request bodies with a specific content type.
pub trait ContentType {
	/// The `Content-Type` header value.
	const VALUE: HeaderValue;

	/// Serializes the given value into a byte vector using this content type's
	/// encoding.
	fn encode<T: Serialize>(value: &T) -> Vec<u8>;
}

/// URL-encoded form (`application/x-www-form-urlencoded`) content type
/// encoding.
pub struct WwwFormUrlEncoded;

impl ContentType for WwwFormUrlEncoded {
	const VALUE: HeaderValue = APPLICATION_X_WWW_FORM_URLENCODED;

	fn encode<T: Serialize>(value: &T) -> Vec<u8> {
		log::debug!("serializing {}", std::any::type_name_of_val(value));
		serde_html_form::to_string(value)
			// UNWRAP SAFETY: request bodies are flat structs of strings.
			.unwrap()
			.into_bytes()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn content_type_accepts_parameters() {
		let mut headers = HeaderMap::new();
		headers.insert(
			header::CONTENT_TYPE,
			HeaderValue::from_static("application/json; charset=utf-8"),
		);
		assert!(expect_content_type(&headers, &APPLICATION_JSON).is_ok());
	}

	#[test]
	fn content_type_mismatch() {
		let mut headers = HeaderMap::new();
		assert!(matches!(
			expect_content_type(&headers, &APPLICATION_JSON),
			Err(OAuth2ClientError::Response(_))
		));

		headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html"));
		assert!(expect_content_type(&headers, &APPLICATION_JSON).is_err());
	}

	#[test]
	fn form_encoding() {
		#[derive(Serialize)]
		struct Body<'a> {
			grant_type: &'a str,
			redirect_uri: &'a str,
		}

		let body = WwwFormUrlEncoded::encode(&Body {
			grant_type: "authorization_code",
			redirect_uri: "https://app.test/cb",
		});
		assert_eq!(
			body,
			b"grant_type=authorization_code&redirect_uri=https%3A%2F%2Fapp.test%2Fcb"
		);
	}
}
