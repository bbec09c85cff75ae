//! Client side of the [OAuth 2.0 Authorization Code Grant][rfc6749-4.1].
//!
//! The crate covers the protocol logic of the grant and nothing else: it
//! builds requests and reads responses, the host application moves the bytes.
//!
//! 1. [`Authorization::to_uri`] builds the URI to redirect the user-agent to.
//! 2. [`AuthorizationResult::parse`] classifies the URI the authorization
//!    server redirects back to as empty, error or success.
//! 3. [`Authentication::to_token_request`] turns the obtained code into a
//!    [`TokenRequest`] descriptor.
//! 4. The response of the token endpoint is decoded by the request's
//!    [`ResponseDecoders`] into an [`AuthenticationResult`].
//!
//! ```
//! use iref::uri;
//! use open_auth2_code::{
//!     Authorization, AuthorizationResult, ClientIdBuf, StateBuf, client::Credentials,
//!     grant::authorization_code::Authentication,
//! };
//!
//! let client_id = ClientIdBuf::new("abc".to_owned()).unwrap();
//! let state = StateBuf::new_random();
//!
//! let redirect = Authorization::new(
//!     client_id.clone(),
//!     uri!("https://auth.example.com/authorize").to_owned(),
//!     uri!("https://app.example.com/cb").to_owned(),
//! )
//! .with_state(Some(state.clone()))
//! .to_uri();
//! # let _ = redirect;
//!
//! let callback = uri!("https://app.example.com/cb?code=SplxlOBeZQQYbYS6WxSbIA");
//! if let AuthorizationResult::Success(success) = AuthorizationResult::parse(callback) {
//!     let request = Authentication::from_success(
//!         Credentials::confidential(client_id, "secret".to_owned()),
//!         success,
//!         uri!("https://app.example.com/cb").to_owned(),
//!         uri!("https://auth.example.com/token").to_owned(),
//!     )
//!     .to_token_request();
//!
//!     assert_eq!(request.method, "POST");
//! }
//! ```
//!
//! # Modules
//!
//! - [`client`] — Client credentials and error types.
//! - [`endpoints`] — Authorization and token endpoints, with their pluggable
//!   query parsers and response decoders.
//! - [`grant`] — Authorization code token request.
//! - [`transport`] — Content type encoding and HTTP client abstraction.
//! - [`util`] — URI query string utilities.
//!
//! [rfc6749-4.1]: https://datatracker.ietf.org/doc/html/rfc6749#section-4.1
#[cfg(feature = "reqwest")]
pub use reqwest;

pub use http;
pub use iref;

pub mod client;
pub mod endpoints;
pub mod grant;
pub mod transport;
mod types;
pub mod util;

pub use endpoints::{
	authorization::{
		Authorization, AuthorizationError, AuthorizationResult, AuthorizationSuccess,
	},
	token::{
		AuthenticationError, AuthenticationResult, AuthenticationSuccess, DecodeError,
		ResponseDecoders, TokenRequest,
	},
};
pub use grant::authorization_code::Authentication;
pub use types::*;
