//! Authorization Code Grant.
//!
//! See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1>
use iref::UriBuf;
use serde::Serialize;

use crate::{
	client::{Credentials, OAuth2Client},
	endpoints::{authorization::AuthorizationSuccess, token::TokenRequest},
	transport::WwwFormUrlEncoded,
};

/// Token request configuration for the authorization code grant.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.3>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authentication<C = Credentials> {
	pub credentials: C,

	/// Authorization code received on the redirect URI.
	pub code: String,

	/// Must be identical to the `redirect_uri` of the authorization request.
	pub redirect_uri: UriBuf,

	/// Token endpoint.
	pub uri: UriBuf,
}

impl<C: OAuth2Client> Authentication<C> {
	pub fn new(credentials: C, code: String, redirect_uri: UriBuf, uri: UriBuf) -> Self {
		Self {
			credentials,
			code,
			redirect_uri,
			uri,
		}
	}

	/// Prepares the exchange of the code carried by a successful authorization
	/// response.
	pub fn from_success(
		credentials: C,
		success: AuthorizationSuccess,
		redirect_uri: UriBuf,
		uri: UriBuf,
	) -> Self {
		Self::new(credentials, success.code, redirect_uri, uri)
	}

	/// Token request body.
	pub fn request(&self) -> AuthorizationCodeTokenRequest<'_> {
		AuthorizationCodeTokenRequest {
			client_id: self.credentials.client_id().as_str(),
			redirect_uri: self.redirect_uri.as_str(),
			code: &self.code,
		}
	}

	/// Builds the token request descriptor.
	///
	/// `client_id` is always part of the body, even when the client also
	/// authenticates with HTTP Basic.
	pub fn to_token_request(&self) -> TokenRequest {
		log::debug!(
			"token request for client `{}` to {}",
			self.credentials.client_id().as_str(),
			self.uri.as_str()
		);

		TokenRequest::new::<WwwFormUrlEncoded>(self.uri.clone(), &self.credentials, &self.request())
	}
}

/// Access Token Request with Authorization Code Grant.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.3>
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "grant_type", rename = "authorization_code")]
pub struct AuthorizationCodeTokenRequest<'a> {
	pub client_id: &'a str,

	pub redirect_uri: &'a str,

	pub code: &'a str,
}
