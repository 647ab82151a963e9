use async_trait::async_trait;
use sherwood_model::{ExtensionRequest, ExtensionResponse};

/// Which isolated environment a piece of code runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContextKind {
    Background,
    ContentScript,
    Popup,
    NewTab,
}

impl ContextKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextKind::Background => "background",
            ContextKind::ContentScript => "content-script",
            ContextKind::Popup => "popup",
            ContextKind::NewTab => "new-tab",
        }
    }
}

/// Receiving side of the cross-context transport.
///
/// Every request gets a reply; an endpoint that does not understand a
/// request answers with `success: false` instead of failing.
#[async_trait]
pub trait MessageEndpoint: Send + Sync {
    fn context(&self) -> ContextKind;

    async fn handle(&self, request: ExtensionRequest) -> ExtensionResponse;
}
