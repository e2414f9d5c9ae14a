//! Ordered multi-model fallback with a per-model retry budget.
//!
//! The dispatcher walks the candidate models in order and stops at the first
//! success. Retry eligibility depends on how an attempt failed:
//!
//! - HTTP 429: the model is saturated, move to the next candidate at once.
//! - Any other non-2xx: not transient, move to the next candidate at once.
//! - Transport failure: retry the same model after the fixed delay, until its
//!   attempt budget is spent.
//!
//! The last error seen is what the caller gets back when every candidate fails.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use super::{AttemptOutcome, ContentGenerator};
use crate::config::GeminiConfig;
use crate::error::ProxyError;
use crate::metrics;
use crate::models::gemini::GenerateContentRequest;
use crate::utils::retry::RetryPolicy;
use backoff::backoff::Backoff;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Successful dispatch: the text plus which model/attempt produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    pub text: String,
    pub model: String,
    /// Zero-based attempt number on `model`.
    pub attempt: u32,
}

/// Every candidate and attempt failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exhausted {
    /// Detail of the most recent failure. `None` only if nothing was tried.
    pub last_error: Option<String>,
}

impl From<Exhausted> for ProxyError {
    fn from(exhausted: Exhausted) -> Self {
        ProxyError::ServiceBusy {
            details: exhausted.last_error,
        }
    }
}

/// Position in the fallback chain.
#[derive(Debug)]
enum State {
    Trying { model: usize, attempt: u32 },
    NextModel { model: usize },
    Success(Dispatched),
    Exhausted,
}

/// Delivers one payload across an ordered list of candidate models.
#[derive(Debug, Clone)]
pub struct FallbackDispatcher {
    models: Vec<String>,
    policy: RetryPolicy,
}

impl FallbackDispatcher {
    pub fn new(models: Vec<String>, policy: RetryPolicy) -> Self {
        Self { models, policy }
    }

    pub fn from_config(config: &GeminiConfig) -> Self {
        Self::new(config.models.clone(), RetryPolicy::from_config(config))
    }

    /// Candidate models in the order they are tried.
    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Run the fallback chain. Attempts are strictly sequential.
    pub async fn dispatch<G>(
        &self,
        generator: &G,
        payload: &GenerateContentRequest,
    ) -> Result<Dispatched, Exhausted>
    where
        G: ContentGenerator + ?Sized,
    {
        let mut last_error: Option<String> = None;
        let mut last_outcome = "none";
        let mut backoff = self.policy.backoff();

        let mut state = if self.models.is_empty() {
            State::Exhausted
        } else {
            State::Trying { model: 0, attempt: 0 }
        };

        loop {
            state = match state {
                State::Trying { model, attempt } => {
                    let name = &self.models[model];

                    if let Some(delay) = self.policy.delay_before(attempt, &mut backoff) {
                        if !delay.is_zero() {
                            debug!("Waiting {}ms before retrying {}", delay.as_millis(), name);
                            tokio::time::sleep(delay).await;
                        }
                    }

                    let started = Instant::now();
                    let outcome = generator.submit(name, payload).await;
                    metrics::record_attempt(name, outcome.label(), started.elapsed().as_secs_f64());
                    last_outcome = outcome.label();

                    match outcome {
                        AttemptOutcome::Success(text) => {
                            info!("{} answered on attempt {}", name, attempt + 1);
                            State::Success(Dispatched {
                                text,
                                model: name.clone(),
                                attempt,
                            })
                        }
                        AttemptOutcome::RateLimited => {
                            warn!("429 on {}, attempt {}", name, attempt + 1);
                            last_error = Some(format!("Rate limited on {}", name));
                            State::NextModel { model }
                        }
                        AttemptOutcome::Rejected { status, body } => {
                            error!("Error on {} (HTTP {}): {}", name, status, body);
                            last_error = Some(body);
                            State::NextModel { model }
                        }
                        AttemptOutcome::Transport(message) => {
                            error!("Fetch error on {}: {}", name, message);
                            last_error = Some(message);
                            if attempt + 1 < self.policy.attempts_per_model {
                                State::Trying {
                                    model,
                                    attempt: attempt + 1,
                                }
                            } else {
                                State::NextModel { model }
                            }
                        }
                    }
                }
                State::NextModel { model } => {
                    backoff.reset();
                    if model + 1 < self.models.len() {
                        State::Trying {
                            model: model + 1,
                            attempt: 0,
                        }
                    } else {
                        State::Exhausted
                    }
                }
                State::Success(dispatched) => return Ok(dispatched),
                State::Exhausted => {
                    warn!(
                        "All {} candidate models failed, last error: {:?}",
                        self.models.len(),
                        last_error
                    );
                    metrics::record_exhausted(last_outcome);
                    return Err(Exhausted { last_error });
                }
            };
        }
    }
}
