//! Endpoint abstractions.
//!
//! - [`authorization`] — building the authorization redirect and classifying
//!   the redirect back to the client.
//! - [`token`] — token request descriptors and token response decoding.
use serde::Serialize;

pub mod authorization;
pub mod token;

/// Request sent to an endpoint through a user-agent redirect, encoded in the
/// endpoint URI query.
pub trait RedirectRequest {
	type RequestBody<'b>: Serialize
	where
		Self: 'b;

	/// Returns the serializable query parameters of this request.
	fn build_query(&self) -> Self::RequestBody<'_>;
}
