// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Types for the Guggy API.

use serde::{Deserialize, Deserializer, Serialize};

use crate::language::Language;

/// Request parameters for a Guggy search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
	pub query: String,
	pub language: Option<Language>,
}

impl SearchRequest {
	/// Creates a request for `query` with no language hint.
	pub fn new(query: impl Into<String>) -> Self {
		Self {
			query: query.into(),
			language: None,
		}
	}

	/// Sets the language hint.
	pub fn with_language(mut self, language: Language) -> Self {
		self.language = Some(language);
		self
	}
}

/// Body of the `POST /guggify` call.
#[derive(Debug, Serialize)]
pub(crate) struct WireRequest<'a> {
	pub sentence: &'a str,
	pub lang: &'static str,
}

impl<'a> From<&'a SearchRequest> for WireRequest<'a> {
	fn from(request: &'a SearchRequest) -> Self {
		Self {
			sentence: &request.query,
			lang: request.language.as_ref().map_or("", Language::as_str),
		}
	}
}

/// Pixel size of an image. A missing or `null` side decodes as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
	#[serde(default, deserialize_with = "null_as_default")]
	pub width: i64,
	#[serde(default, deserialize_with = "null_as_default")]
	pub height: i64,
}

/// A single rendition of a media asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
	#[serde(
		rename = "secureUrl",
		default,
		deserialize_with = "empty_as_none",
		skip_serializing_if = "is_blank_url"
	)]
	pub secure_url: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub dimensions: Option<Dimensions>,
}

/// The resolution/quality variants of one media asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSizeSet {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub original: Option<Image>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub preview: Option<Image>,
	#[serde(rename = "lowQuality", default, skip_serializing_if = "Option::is_none")]
	pub low_quality: Option<Image>,
	#[serde(rename = "hires", default, skip_serializing_if = "Option::is_none")]
	pub high_resolution: Option<Image>,
}

/// Format-specific variants for one search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaCollection {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gif: Option<MediaSizeSet>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub mp4: Option<MediaSizeSet>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub png: Option<MediaSizeSet>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub webp: Option<MediaSizeSet>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub original: Option<MediaSizeSet>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub thumbnail: Option<MediaSizeSet>,
}

/// Response from a Guggy search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
	#[serde(rename = "reqId", default, deserialize_with = "null_as_default")]
	pub request_id: String,
	#[serde(default, deserialize_with = "collections")]
	pub stickers: Vec<MediaCollection>,
	#[serde(rename = "animated", default, deserialize_with = "collections")]
	pub gifs: Vec<MediaCollection>,
}

impl SearchResponse {
	/// True when the service returned nothing usable: no request id, no
	/// stickers and no gifs. A `null` list counts the same as an empty one.
	pub fn is_empty(&self) -> bool {
		self.request_id.is_empty() && self.stickers.is_empty() && self.gifs.is_empty()
	}
}

/// The service encodes missing lists and ids as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Drops `null` entries from a result list.
fn collections<'de, D>(deserializer: D) -> Result<Vec<MediaCollection>, D::Error>
where
	D: Deserializer<'de>,
{
	let items: Option<Vec<Option<MediaCollection>>> = Option::deserialize(deserializer)?;
	Ok(items.into_iter().flatten().flatten().collect())
}

fn is_blank_url(url: &Option<String>) -> bool {
	url.as_deref().map_or(true, str::is_empty)
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<String>::deserialize(deserializer)?.filter(|url| !url.is_empty()))
}
