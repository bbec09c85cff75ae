use crate::{client::OAuth2ClientError, transport::HttpClient};

impl HttpClient for reqwest::Client {
	async fn send(
		&self,
		request: http::Request<Vec<u8>>,
	) -> Result<http::Response<Vec<u8>>, OAuth2ClientError> {
		log::debug!("{} {}", request.method(), request.uri());

		let request: reqwest::Request = request.try_into().map_err(OAuth2ClientError::request)?;
		let response = self
			.execute(request)
			.await
			.map_err(OAuth2ClientError::request)?;

		let mut builder = http::Response::builder().status(response.status());

		#[cfg(not(target_arch = "wasm32"))]
		{
			builder = builder.version(response.version());
		}

		for (name, value) in response.headers() {
			builder = builder.header(name, value);
		}

		let body = response
			.bytes()
			.await
			.map_err(OAuth2ClientError::response)?;

		let response = builder
			.body(body.to_vec())
			.map_err(OAuth2ClientError::response)?;

		// Token responses carry credentials, keep them out of lower log levels.
		log::trace!("token endpoint responded with {}", response.status());

		Ok(response)
	}
}
