//! The isolated execution contexts and the JSON wire entry point.
//!
//! Contexts never share memory. They talk through [`MessageEndpoint`]s and
//! the shared store, and learn about activation changes from the status bus.

pub mod background;
pub mod content_script;
pub mod listener;
pub mod new_tab;
pub mod popup;

pub use background::BackgroundService;
pub use content_script::{ContentScript, INDICATOR_LABEL};
pub use listener::spawn_status_listener;
pub use new_tab::NewTabPage;
pub use popup::PopupController;

use sherwood_contracts::messaging::MessageEndpoint;
use sherwood_model::{ExtensionRequest, ExtensionResponse};
use tracing::debug;

/// Parses a raw JSON request, lets `endpoint` handle it and encodes the
/// reply.
///
/// A body that does not decode into a known request gets a failure reply.
/// Unknown actions are reported as such; anything else malformed carries
/// the decoder's message.
pub async fn dispatch_json<E>(endpoint: &E, raw: &str) -> String
where
    E: MessageEndpoint + ?Sized,
{
    let response = match serde_json::from_str::<ExtensionRequest>(raw) {
        Ok(request) => endpoint.handle(request).await,
        Err(err) => {
            debug!(
                context = endpoint.context().as_str(),
                %err,
                "undecodable request"
            );
            if has_unknown_action(raw) {
                ExtensionResponse::unknown_action()
            } else {
                ExtensionResponse::failure(format!("malformed request: {err}"))
            }
        }
    };
    encode(&response)
}

fn has_unknown_action(raw: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .and_then(|value| {
            value
                .get("action")
                .and_then(|action| action.as_str())
                .map(|action| {
                    !matches!(
                        action,
                        "toggle-active" | "get-status" | "status-changed"
                    )
                })
        })
        .unwrap_or(false)
}

fn encode(response: &ExtensionResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|err| {
        serde_json::json!({
            "success": false,
            "error": format!("failed to encode reply: {err}"),
        })
        .to_string()
    })
}
