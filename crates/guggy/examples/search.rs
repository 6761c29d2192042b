// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Searches Guggy for a sentence and prints the returned media URLs.
//!
//! ```sh
//! GUGGY_API_KEY=... RUST_LOG=guggy=debug cargo run -p guggy --example search -- "What is the weather up there?" es
//! ```

use std::time::Duration;

use guggy::{Language, MediaCollection, SearchClient, SearchRequest};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.init();

	let mut args = std::env::args().skip(1);
	let query = args
		.next()
		.unwrap_or_else(|| "What is the weather up there?".to_string());
	let mut request = SearchRequest::new(query);
	if let Some(tag) = args.next() {
		request = request.with_language(tag.parse::<Language>()?);
	}

	let client = SearchClient::from_env()?;
	let response = client
		.search_with_timeout(&request, Duration::from_secs(10))
		.await?;

	println!("request id: {}", response.request_id);
	for (i, gif) in response.gifs.iter().enumerate() {
		println!("GIF {i}: {}", best_url(gif).unwrap_or("-"));
	}
	for (i, sticker) in response.stickers.iter().enumerate() {
		println!("Sticker {i}: {}", best_url(sticker).unwrap_or("-"));
	}

	Ok(())
}

fn best_url(collection: &MediaCollection) -> Option<&str> {
	[&collection.mp4, &collection.gif, &collection.webp, &collection.png]
		.into_iter()
		.flatten()
		.flat_map(|set| [&set.high_resolution, &set.original, &set.preview, &set.low_quality])
		.flatten()
		.find_map(|image| image.secure_url.as_deref())
}
