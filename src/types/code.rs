use str_newtype::StrNewType;

use super::is_vschar;

/// An OAuth 2.0 authorization code (borrowed).
///
/// Authorization codes are short-lived credentials returned by the
/// authorization endpoint and exchanged at the token endpoint, as defined in
/// [RFC 6749 Section 4.1.2](https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.2).
///
/// Single use is enforced by the authorization server, not here.
///
/// # Grammar
///
/// ```abnf
/// code = 1*VSCHAR
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
pub struct Code(str);

impl Code {
	/// Validates that the given string is a well-formed authorization code.
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	/// Validates that the given byte slice is a well-formed authorization code.
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

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn valid_code() {
		assert!(Code::new("abc123").is_ok());
		assert!(Code::new("a").is_ok());
		assert!(Code::new("code with spaces").is_ok());
		assert!(Code::new("~!@#$%^&*()").is_ok());
	}

	#[test]
	fn empty_code_is_invalid() {
		assert!(Code::new("").is_err());
		assert!(!Code::validate_str(""));
	}

	#[test]
	fn code_rejects_control_chars() {
		assert!(!Code::validate_str("\x00"));
		assert!(!Code::validate_str("abc\ndef"));
		assert!(!Code::validate_str("abc\x7f"));
		assert!(!Code::validate_str("caf\u{e9}"));
	}
}
