// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Language hints accepted by the Guggy API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Language tag forwarded to the service to hint the language of the query.
///
/// The tag is passed through untouched; the client does not translate or
/// otherwise interpret it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
	#[serde(rename = "es")]
	Spanish,
	#[serde(rename = "pt")]
	Portuguese,
	#[serde(rename = "id")]
	Indonesian,
	#[serde(rename = "fr")]
	French,
	#[serde(rename = "ar")]
	Arabic,
	#[serde(rename = "tr")]
	Turkish,
	#[serde(rename = "th")]
	Thai,
	#[serde(rename = "vi")]
	Vietnamese,
	#[serde(rename = "de")]
	German,
	#[serde(rename = "it")]
	Italian,
	#[serde(rename = "ja")]
	Japanese,
	#[serde(rename = "zh-CN")]
	ChineseSimplified,
	#[serde(rename = "zh-TW")]
	ChineseTraditional,
	#[serde(rename = "ru")]
	Russian,
	#[serde(rename = "ko")]
	Korean,
	#[serde(rename = "pl")]
	Polish,
	#[serde(rename = "nl")]
	Dutch,
	#[serde(rename = "ro")]
	Romanian,
	#[serde(rename = "hu")]
	Hungarian,
	#[serde(rename = "sv")]
	Swedish,
	#[serde(rename = "cs")]
	Czech,
	#[serde(rename = "hi")]
	Hindi,
	#[serde(rename = "bn")]
	Bengali,
	#[serde(rename = "da")]
	Danish,
	#[serde(rename = "fa")]
	Farsi,
	#[serde(rename = "tl")]
	Filipino,
	#[serde(rename = "fi")]
	Finnish,
	/// Guggy uses the legacy `iw` code for Hebrew.
	#[serde(rename = "iw")]
	Hebrew,
	#[serde(rename = "ms")]
	Malay,
	#[serde(rename = "no")]
	Norwegian,
	#[serde(rename = "uk")]
	Ukrainian,
}

impl Language {
	/// Every supported language, in declaration order.
	pub const ALL: [Language; 31] = [
		Language::Spanish,
		Language::Portuguese,
		Language::Indonesian,
		Language::French,
		Language::Arabic,
		Language::Turkish,
		Language::Thai,
		Language::Vietnamese,
		Language::German,
		Language::Italian,
		Language::Japanese,
		Language::ChineseSimplified,
		Language::ChineseTraditional,
		Language::Russian,
		Language::Korean,
		Language::Polish,
		Language::Dutch,
		Language::Romanian,
		Language::Hungarian,
		Language::Swedish,
		Language::Czech,
		Language::Hindi,
		Language::Bengali,
		Language::Danish,
		Language::Farsi,
		Language::Filipino,
		Language::Finnish,
		Language::Hebrew,
		Language::Malay,
		Language::Norwegian,
		Language::Ukrainian,
	];

	/// The tag sent on the wire.
	pub fn as_str(&self) -> &'static str {
		match self {
			Language::Spanish => "es",
			Language::Portuguese => "pt",
			Language::Indonesian => "id",
			Language::French => "fr",
			Language::Arabic => "ar",
			Language::Turkish => "tr",
			Language::Thai => "th",
			Language::Vietnamese => "vi",
			Language::German => "de",
			Language::Italian => "it",
			Language::Japanese => "ja",
			Language::ChineseSimplified => "zh-CN",
			Language::ChineseTraditional => "zh-TW",
			Language::Russian => "ru",
			Language::Korean => "ko",
			Language::Polish => "pl",
			Language::Dutch => "nl",
			Language::Romanian => "ro",
			Language::Hungarian => "hu",
			Language::Swedish => "sv",
			Language::Czech => "cs",
			Language::Hindi => "hi",
			Language::Bengali => "bn",
			Language::Danish => "da",
			Language::Farsi => "fa",
			Language::Filipino => "tl",
			Language::Finnish => "fi",
			Language::Hebrew => "iw",
			Language::Malay => "ms",
			Language::Norwegian => "no",
			Language::Ukrainian => "uk",
		}
	}
}

impl fmt::Display for Language {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when parsing an unknown language tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language tag: {0:?}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
	type Err = UnknownLanguage;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Language::ALL
			.into_iter()
			.find(|lang| lang.as_str() == s)
			.ok_or_else(|| UnknownLanguage(s.to_string()))
	}
}
