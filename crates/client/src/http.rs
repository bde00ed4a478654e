//! Shared response handling for the backend clients.

use serde::Deserialize;

/// JSON error body returned by the backend (`{"error": "..."}`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Extract the server's error message from a failed response, falling back
/// to the HTTP status when the body is not the expected shape.
pub(crate) async fn rejection_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("request failed with status {status}"),
    }
}
