//! OAuth 2.0 client identity and client-side error types.
use crate::{ClientId, ClientIdBuf, endpoints::token::DecodeError};

/// A registered OAuth 2.0 client.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-2>
pub trait OAuth2Client {
	/// Client identifier issued by the authorization server.
	fn client_id(&self) -> &ClientId;

	/// Client secret, for confidential clients.
	///
	/// When present, token requests authenticate with HTTP Basic.
	fn client_secret(&self) -> Option<&str> {
		None
	}
}

impl<C: OAuth2Client> OAuth2Client for &C {
	fn client_id(&self) -> &ClientId {
		C::client_id(*self)
	}

	fn client_secret(&self) -> Option<&str> {
		C::client_secret(*self)
	}
}

/// Client credentials.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credentials {
	pub client_id: ClientIdBuf,
	pub secret: Option<String>,
}

impl Credentials {
	/// Credentials of a public client, without secret.
	pub fn public(client_id: ClientIdBuf) -> Self {
		Self {
			client_id,
			secret: None,
		}
	}

	/// Credentials of a confidential client.
	pub fn confidential(client_id: ClientIdBuf, secret: String) -> Self {
		Self {
			client_id,
			secret: Some(secret),
		}
	}
}

impl std::fmt::Debug for Credentials {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Credentials")
			.field("client_id", &self.client_id)
			.field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
			.finish()
	}
}

impl OAuth2Client for Credentials {
	fn client_id(&self) -> &ClientId {
		&self.client_id
	}

	fn client_secret(&self) -> Option<&str> {
		self.secret.as_deref()
	}
}

#[derive(Debug, thiserror::Error)]
pub enum OAuth2ClientError {
	#[error("unable to send request: {0}")]
	Request(String),

	#[error("unable to receive response: {0}")]
	Response(String),

	#[error("server responded with status code: {0}")]
	ServerError(http::StatusCode),

	#[error("invalid token response: {0}")]
	Decode(#[from] DecodeError),
}

impl OAuth2ClientError {
	pub fn request(e: impl ToString) -> Self {
		let msg = e.to_string();
		log::error!("request error: {msg}");
		Self::Request(msg)
	}

	pub fn response(e: impl ToString) -> Self {
		let msg = e.to_string();
		log::error!("response error: {msg}");
		Self::Response(msg)
	}

	pub fn server(status: http::StatusCode) -> Self {
		log::error!("unexpected server response status: {status}");
		Self::ServerError(status)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn credentials_secret() {
		let client_id = ClientIdBuf::new("abc".to_owned()).unwrap();
		let public = Credentials::public(client_id.clone());
		assert_eq!(public.client_id().as_str(), "abc");
		assert_eq!(public.client_secret(), None);

		let confidential = Credentials::confidential(client_id, "s".to_owned());
		assert_eq!(confidential.client_secret(), Some("s"));
	}

	#[test]
	fn debug_redacts_secret() {
		let credentials = Credentials::confidential(
			ClientIdBuf::new("abc".to_owned()).unwrap(),
			"hunter2".to_owned(),
		);
		let debug = format!("{credentials:?}");
		assert!(debug.contains("abc"));
		assert!(!debug.contains("hunter2"));
	}
}
