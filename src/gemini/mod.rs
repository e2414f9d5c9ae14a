// Gemini API client module
// Author: kelexine (https://github.com/kelexine)

mod client;
pub mod fallback;

pub use client::GeminiClient;
pub use fallback::{Dispatched, Exhausted, FallbackDispatcher};

use crate::models::gemini::GenerateContentRequest;
use async_trait::async_trait;

/// Text returned when Gemini answers 2xx without any usable text.
pub const NO_RESPONSE_PLACEHOLDER: &str = "No response generated.";

/// Result of one delivery attempt against one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// 2xx with the extracted (or placeholder) text.
    Success(String),
    /// HTTP 429. The model is saturated; move on.
    RateLimited,
    /// Any other non-2xx status, with the raw response body.
    Rejected { status: u16, body: String },
    /// The call did not complete: connect/send/read failure or an unparseable 2xx body.
    Transport(String),
}

impl AttemptOutcome {
    /// Stable label used for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            AttemptOutcome::Success(_) => "success",
            AttemptOutcome::RateLimited => "rate_limited",
            AttemptOutcome::Rejected { .. } => "rejected",
            AttemptOutcome::Transport(_) => "transport_error",
        }
    }
}

/// Anything that can submit a generation payload to a named model.
///
/// `GeminiClient` is the production implementation; the fallback dispatcher
/// and the HTTP layer only ever see this trait.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Whether a credential is available. No call is attempted otherwise.
    fn is_configured(&self) -> bool;

    /// Make exactly one call against `model`.
    async fn submit(&self, model: &str, payload: &GenerateContentRequest) -> AttemptOutcome;
}
