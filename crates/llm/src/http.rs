//! Request plumbing shared by every adapter.

use pipeline::LlmError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Joins a configured base URL and an endpoint path.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Sends `body` as JSON and decodes a successful response as `R`.
///
/// Non-success statuses become [`LlmError::Status`] carrying the provider's
/// body verbatim; nothing is retried.
pub(crate) async fn post_json<B, R>(
    request: reqwest::RequestBuilder,
    body: &B,
) -> Result<R, LlmError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let response = request
        .json(body)
        .send()
        .await
        .map_err(|e| LlmError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(LlmError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<R>()
        .await
        .map_err(|e| LlmError::InvalidResponse(format!("failed to parse response: {e}")))
}
