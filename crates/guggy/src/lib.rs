// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Client for the Guggy text-to-GIF search API.
//!
//! This crate provides a typed Rust client for the Guggy `guggify` endpoint:
//! send a sentence (plus an optional language hint), get back animated GIFs
//! and stickers in several formats and sizes.
//!
//! ```no_run
//! use guggy::{Language, SearchClient, SearchRequest};
//!
//! # async fn run() -> guggy::Result<()> {
//! let client = SearchClient::from_env()?;
//! let request = SearchRequest::new("What is the weather up there?").with_language(Language::Spanish);
//! let response = client.search(&request).await?;
//!
//! for gif in &response.gifs {
//!     println!("{:?}", gif.mp4);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod key;
pub mod language;
pub mod transport;
pub mod types;

pub use client::{SearchClient, SearchClientBuilder, DEFAULT_BASE_URL};
pub use config::API_KEY_ENV;
pub use error::{BoxError, GuggyError, Result};
pub use key::ApiKey;
pub use language::{Language, UnknownLanguage};
pub use tokio_util::sync::CancellationToken;
pub use transport::{ReqwestTransport, Transport};
pub use types::{Dimensions, Image, MediaCollection, MediaSizeSet, SearchRequest, SearchResponse};
