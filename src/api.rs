//! Thin client for the pair endpoints. The core never retries; failures
//! are reported by the calling component and the record set stays as-is.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::components::relation_canvas::RelationRecord;

/// Failures crossing the fetch boundary.
#[derive(Debug, Error)]
pub enum ApiError {
	#[error("request failed: {0}")]
	Request(String),
	#[error("unexpected status {0}")]
	Status(u16),
	#[error("malformed payload: {0}")]
	Decode(String),
}

fn js_error(value: JsValue) -> ApiError {
	ApiError::Request(format!("{value:?}"))
}

async fn fetch_text(request: &Request) -> Result<String, ApiError> {
	let window = web_sys::window().ok_or_else(|| ApiError::Request("no window".into()))?;
	let response = JsFuture::from(window.fetch_with_request(request))
		.await
		.map_err(js_error)?;
	let response: Response = response.dyn_into().map_err(js_error)?;
	if !response.ok() {
		return Err(ApiError::Status(response.status()));
	}
	let body = JsFuture::from(response.text().map_err(js_error)?)
		.await
		.map_err(js_error)?;
	body.as_string()
		.ok_or_else(|| ApiError::Decode("response body is not text".into()))
}

/// Decodes records one by one so a single malformed element cannot take
/// down the whole set.
fn decode_records(body: &str) -> Result<Vec<RelationRecord>, ApiError> {
	let values: Vec<serde_json::Value> =
		serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))?;
	let mut records = Vec::with_capacity(values.len());
	for value in values {
		match serde_json::from_value::<RelationRecord>(value) {
			Ok(record) => records.push(record),
			Err(err) => log::warn!("skipping malformed record: {err}"),
		}
	}
	Ok(records)
}

/// Reads the full record set from the backing store.
pub async fn fetch_relations() -> Result<Vec<RelationRecord>, ApiError> {
	let request = Request::new_with_str("/api/pairs").map_err(js_error)?;
	let body = fetch_text(&request).await?;
	decode_records(&body)
}

/// Submits a labeled pair; the response is the updated full record set.
pub async fn submit_pair(
	expectation: &str,
	experience: &str,
) -> Result<Vec<RelationRecord>, ApiError> {
	let payload = serde_json::json!({
		"expectation": expectation,
		"experience": experience,
	});
	let init = RequestInit::new();
	init.set_method("POST");
	init.set_body(&JsValue::from_str(&payload.to_string()));
	let request = Request::new_with_str_and_init("/api/addPair", &init).map_err(js_error)?;
	request
		.headers()
		.set("Content-Type", "application/json")
		.map_err(js_error)?;
	let body = fetch_text(&request).await?;
	decode_records(&body)
}
