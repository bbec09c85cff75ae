//! URI query string utilities.
use std::collections::BTreeMap;

use iref::{
	Uri, UriBuf,
	uri::{Query, QueryBuf},
};
use serde::Serialize;

/// Decoded `application/x-www-form-urlencoded` query parameters.
///
/// OAuth 2.0 parameters must not appear more than once; when they do anyway,
/// [`QueryParams::get`] returns the first occurrence.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, Vec<String>>);

impl QueryParams {
	/// Decodes the given query string.
	///
	/// Undecodable input yields an empty parameter set.
	pub fn parse(query: &str) -> Self {
		match serde_html_form::from_str(query) {
			Ok(params) => Self(params),
			Err(e) => {
				log::warn!("unable to decode query string: {e}");
				Self::default()
			}
		}
	}

	/// Decodes the query parameters of `uri`, ignoring its path and fragment.
	pub fn from_uri(uri: &Uri) -> Self {
		uri.query()
			.map(|query| Self::parse(query.as_str()))
			.unwrap_or_default()
	}

	/// Returns the first value of the parameter `key`, if any.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0
			.get(key)
			.and_then(|values| values.first())
			.map(String::as_str)
	}
}

/// Extends the query parameters of a URI by serializing `value` as
/// `application/x-www-form-urlencoded` and appending the result.
///
/// Existing query parameters on the URI are preserved.
///
/// # Panics
///
/// Panics if `value` cannot be serialized as form-urlencoded data.
pub fn extend_uri_query<T: Serialize>(uri: &mut UriBuf, value: T) {
	let query = serialize_concat_query(
		uri.query().map(ToOwned::to_owned).unwrap_or_default(),
		value,
	);

	if !query.is_empty() {
		uri.set_query(Some(
			Query::new(&query)
				// UNWRAP SAFETY: We trust `serde_html_form` to serialize the URI
				//                query correctly.
				.unwrap(),
		));
	}
}

/// Serializes `value` as form-urlencoded data and concatenates it with the
/// existing query string.
///
/// Spaces are written as `%20` rather than `+`, which reads the same to
/// any form decoder but is unambiguous to plain URI decoders.
///
/// # Panics
///
/// Panics if `value` cannot be serialized as form-urlencoded data.
pub fn serialize_concat_query<T>(query: QueryBuf, value: T) -> QueryBuf
where
	T: Serialize,
{
	// A literal `+` is serialized as `%2B`, so every remaining `+` is a space.
	let serialized = serde_html_form::to_string(value)
		.unwrap()
		.replace('+', "%20");

	concat_query(
		query,
		&QueryBuf::new(serialized.into_bytes()).unwrap(),
	)
}

/// Concatenates two query strings with `&` as separator.
///
/// If either query is empty, the other is returned as-is without a
/// separator.
pub fn concat_query(query: QueryBuf, other: &Query) -> QueryBuf {
	let mut query = query.into_string();

	if !query.is_empty() && !other.is_empty() {
		query.push('&')
	}

	query.push_str(other.as_str());

	QueryBuf::new(query.into_bytes()).unwrap()
}
