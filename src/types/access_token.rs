use http::{HeaderMap, HeaderValue, header};
use str_newtype::StrNewType;

use super::is_vschar;

/// An OAuth 2.0 access token (borrowed).
///
/// Opaque credential issued by the token endpoint, see
/// [RFC 6749 Section 1.4](https://datatracker.ietf.org/doc/html/rfc6749#section-1.4).
///
/// # Grammar
///
/// ```abnf
/// access-token = 1*VSCHAR
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(
	serde,
	owned(AccessTokenBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash))
)]
pub struct AccessToken(str);

impl AccessToken {
	/// Validates that the given string is a well-formed access token.
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	/// Validates that the given byte slice is a well-formed access token.
	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		let mut i = 0;

		while i < bytes.len() {
			if !is_vschar(bytes[i]) {
				return false;
			}

			i += 1
		}

		i > 0
	}

	/// Returns the `Authorization: Bearer <token>` header value for this
	/// token.
	///
	/// See: <https://datatracker.ietf.org/doc/html/rfc6750#section-2.1>
	pub fn bearer_header(&self) -> HeaderValue {
		let mut value = HeaderValue::try_from(format!("Bearer {}", self.as_str()))
			// UNWRAP SAFETY: VSCHAR is a subset of the visible ASCII allowed
			//                in header values.
			.unwrap();
		value.set_sensitive(true);
		value
	}

	/// Inserts the bearer `Authorization` header into `headers`, replacing any
	/// previous value.
	pub fn authorize(&self, headers: &mut HeaderMap) {
		headers.insert(header::AUTHORIZATION, self.bearer_header());
	}
}
