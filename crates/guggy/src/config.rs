// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Loading the API key from the environment.
//!
//! Two ways of providing the key are supported, following the `*_FILE`
//! convention used by Docker and Kubernetes secrets:
//!
//! 1. `GUGGY_API_KEY_FILE` names a file holding the key (takes precedence)
//! 2. `GUGGY_API_KEY` holds the key directly
//!
//! When reading from a file a single trailing newline is stripped.

use std::path::PathBuf;
use std::{env, fs};

use crate::error::{GuggyError, Result};
use crate::key::ApiKey;

/// Environment variable consulted by [`SearchClient::from_env`](crate::SearchClient::from_env).
pub const API_KEY_ENV: &str = "GUGGY_API_KEY";

/// Load an API key from `var` or the file named by `{var}_FILE`.
///
/// Returns `Ok(None)` when neither variable is set, or when the value is
/// blank after trimming.
pub fn load_api_key_env(var: &str) -> Result<Option<ApiKey>> {
	let file_var = format!("{var}_FILE");

	if let Ok(path_str) = env::var(&file_var) {
		if path_str.is_empty() {
			return Err(GuggyError::config(format!(
				"secret file path in {file_var} is empty"
			)));
		}

		let path = PathBuf::from(&path_str);
		let content = fs::read_to_string(&path)
			.map_err(|source| GuggyError::SecretFile { path, source })?;
		let value = content.strip_suffix('\n').unwrap_or(&content);
		return Ok(ApiKey::new(value).ok());
	}

	match env::var(var) {
		Ok(value) => Ok(ApiKey::new(value).ok()),
		Err(_) => Ok(None),
	}
}

/// Load a required API key, failing with an error that names `var`.
pub fn require_api_key_env(var: &str) -> Result<ApiKey> {
	load_api_key_env(var)?.ok_or_else(|| {
		GuggyError::config(format!(
			"expected {var:?} (or {var}_FILE) to have been set in your environment"
		))
	})
}
