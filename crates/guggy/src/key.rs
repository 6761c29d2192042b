// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! API key wrapper that keeps the key out of logs.
//!
//! The key is sent on every request in the `apiKey` header, so it flows
//! through the client, the transport and any `tracing` span that captures the
//! client. [`ApiKey`] makes that safe:
//!
//! - `Debug` and `Display` print `[REDACTED]`
//! - the buffer is zeroized on drop
//! - the raw value is only reachable through [`ApiKey::expose`]
//!
//! ```
//! use guggy::ApiKey;
//!
//! let key = ApiKey::new("  gg-secret \n").unwrap();
//! assert_eq!(format!("{key}"), "[REDACTED]");
//! assert_eq!(format!("{key:?}"), "ApiKey(\"[REDACTED]\")");
//! assert_eq!(key.expose(), "gg-secret");
//! ```

use std::fmt;

use zeroize::Zeroize;

use crate::error::{GuggyError, Result};

/// The redaction placeholder used in all output.
pub const REDACTED: &str = "[REDACTED]";

/// A non-blank Guggy API key.
#[derive(Clone, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct ApiKey {
	inner: String,
}

impl ApiKey {
	/// Trims the key and rejects it if nothing is left.
	pub fn new(key: impl Into<String>) -> Result<Self> {
		let mut raw = key.into();
		let trimmed = raw.trim().to_string();
		raw.zeroize();

		if trimmed.is_empty() {
			return Err(GuggyError::config("expecting a non-blank API key"));
		}
		Ok(Self { inner: trimmed })
	}

	/// Explicitly access the key.
	pub fn expose(&self) -> &str {
		&self.inner
	}
}

impl fmt::Debug for ApiKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ApiKey").field(&REDACTED).finish()
	}
}

impl fmt::Display for ApiKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn blank_keys_are_rejected() {
		for key in ["", "   ", "\n\t"] {
			let err = ApiKey::new(key).unwrap_err();
			assert!(err.is_config(), "{key:?} should be a config error");
		}
	}

	#[test]
	fn surrounding_whitespace_is_trimmed() {
		let key = ApiKey::new(" test-api-key-1\n").unwrap();
		assert_eq!(key.expose(), "test-api-key-1");
	}

	#[test]
	fn debug_and_display_are_redacted() {
		let key = ApiKey::new("super-secret").unwrap();
		assert!(!format!("{key:?}").contains("super-secret"));
		assert!(!format!("{key}").contains("super-secret"));
	}

	proptest! {
		/// Whatever the key, formatting never leaks it.
		#[test]
		fn formatting_never_leaks(key in "[a-zA-Z0-9]{12,40}") {
			let api_key = ApiKey::new(key.clone()).unwrap();
			let debug = format!("{api_key:?}");
			let display = format!("{api_key}");
			prop_assert!(!debug.contains(&key));
			prop_assert!(!display.contains(&key));
		}
	}
}
