use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use rand::{RngExt, rng};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use str_newtype::StrNewType;

use super::is_vschar;

/// An OAuth 2.0 state parameter (borrowed).
///
/// The state parameter is an opaque value used to maintain state between an
/// authorization request and callback, primarily for CSRF protection.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-10.12>
///
/// # Grammar
///
/// ```abnf
/// state = 1*VSCHAR
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(serde, owned(StateBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash)))]
pub struct State(str);

impl State {
	/// Validates that the given string is a well-formed state value.
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	/// Validates that the given byte slice is a well-formed state value.
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
}

impl StateBuf {
	/// Generates a new random, base64url-encoded 128-bit CSRF token.
	pub fn new_random() -> Self {
		Self::new_random_len(16)
	}

	/// Generates a new random, base64url-encoded CSRF token from `len`
	/// random bytes.
	///
	/// # Panics
	///
	/// Panics if `len` is zero.
	pub fn new_random_len(len: u32) -> Self {
		assert!(len > 0);
		let random_bytes: Vec<u8> = (0..len).map(|_| rng().random::<u8>()).collect();
		// SAFETY: base64url output is a non-empty run of VSCHAR.
		unsafe { Self::new_unchecked(BASE64_URL_SAFE_NO_PAD.encode(random_bytes)) }
	}
}

/// Wrapper that attaches an optional [`State`] to a redirect request.
///
/// The `state` parameter is serialized after the wrapped request's own
/// parameters and omitted entirely when absent.
#[skip_serializing_none]
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Stateful<T> {
	#[serde(flatten)]
	pub value: T,

	/// Opaque value used by the client to maintain state between the request
	/// and callback.
	///
	/// The authorization server includes this value when redirecting the
	/// user-agent back to the client. The parameter *should* be used for
	/// preventing cross-site request forgery.
	///
	/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-10.12>
	pub state: Option<StateBuf>,
}

impl<T> Stateful<T> {
	/// Creates a new [`Stateful`] wrapping the given value with an optional
	/// state token.
	pub fn new(value: T, state: Option<StateBuf>) -> Self {
		Self { value, state }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn valid_state() {
		assert!(State::new("xyz").is_ok());
		assert!(State::new("a b c").is_ok());
		assert!(State::new("").is_err());
		assert!(State::new("x\ny").is_err());
	}

	#[test]
	fn random_state_is_valid() {
		let state = StateBuf::new_random();
		assert!(State::validate_str(state.as_str()));
		// 16 bytes -> 22 base64url characters without padding.
		assert_eq!(state.as_str().len(), 22);
	}

	#[test]
	fn random_states_differ() {
		assert_ne!(StateBuf::new_random(), StateBuf::new_random());
	}
}
