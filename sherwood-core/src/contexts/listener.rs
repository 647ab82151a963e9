use std::sync::Arc;

use sherwood_contracts::messaging::MessageEndpoint;
use sherwood_model::ExtensionRequest;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::activation::StatusSubscription;

/// Drives `endpoint` from `subscription` until the bus shuts down.
///
/// Each frame is handed over as a `status-changed` request and the reply's
/// `success` flag is reported back as the acknowledgment.
pub fn spawn_status_listener(
    mut subscription: StatusSubscription,
    endpoint: Arc<dyn MessageEndpoint>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let context = endpoint.context();
        while let Some(frame) = subscription.recv().await {
            let response = endpoint
                .handle(ExtensionRequest::status_changed(frame.state))
                .await;
            if !response.success {
                warn!(
                    context = context.as_str(),
                    sequence = frame.sequence,
                    error = ?response.error,
                    "listener rejected status change"
                );
            }
            subscription.ack(&frame, response.success);
        }
        debug!(context = context.as_str(), "status listener stopped");
    })
}
