//! Envelope decoding: turns a completed HTTP round-trip into either a typed
//! `MarvelResponse<T>` or an `ApiError`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, MarvelApiError};
use crate::http::HttpResponse;
use crate::types::MarvelResponse;

/// Error payload shapes used by the gateway. The code is either a category
/// string (`"InvalidCredentials"`) or a number, and the human-readable text
/// arrives as `message` or `status`, or not at all.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Value,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl ErrorBody {
    fn into_error(self, http_status: u16) -> Option<MarvelApiError> {
        let code = match self.code {
            Value::String(code) => code,
            Value::Number(code) => code.to_string(),
            _ => return None,
        };
        let message = self.message.or(self.status).unwrap_or_default();
        Some(MarvelApiError {
            status: http_status,
            code,
            message,
        })
    }
}

/// Decode a gateway response into its typed envelope.
///
/// Non-2xx responses become [`ApiError::Marvel`] when the body is a gateway
/// error payload and [`ApiError::HttpError`] otherwise.
pub fn decode_response<T: DeserializeOwned>(
    response: &HttpResponse,
) -> Result<MarvelResponse<T>, ApiError> {
    if !response.is_success() {
        return Err(decode_error(response));
    }
    let envelope: MarvelResponse<T> = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
    tracing::debug!(
        status = response.status,
        code = envelope.code,
        "decoded marvel response"
    );
    Ok(envelope)
}

fn decode_error(response: &HttpResponse) -> ApiError {
    let parsed = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.into_error(response.status));
    match parsed {
        Some(err) => {
            tracing::warn!(
                status = err.status,
                code = %err.code,
                message = %err.message,
                "marvel api returned an error"
            );
            ApiError::Marvel(err)
        }
        None => {
            tracing::warn!(status = response.status, "unrecognised error body");
            ApiError::HttpError {
                status: response.status,
                body: response.body.clone(),
            }
        }
    }
}
