// Shared test doubles
// Author: kelexine (https://github.com/kelexine)

#![allow(dead_code)]

use async_trait::async_trait;
use scentwise::gemini::{AttemptOutcome, ContentGenerator};
use scentwise::models::gemini::GenerateContentRequest;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Generator that replays a per-model script and records every call.
/// An unscripted call is answered with HTTP 500.
pub struct ScriptedGenerator {
    configured: bool,
    scripts: Mutex<HashMap<String, VecDeque<AttemptOutcome>>>,
    calls: Mutex<Vec<String>>,
    payloads: Mutex<Vec<GenerateContentRequest>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self {
            configured: true,
            scripts: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            payloads: Mutex::new(Vec::new()),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    pub fn script(self, model: &str, outcomes: Vec<AttemptOutcome>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(model.to_string(), outcomes.into());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, model: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|m| *m == model).count()
    }

    pub fn payloads(&self) -> Vec<GenerateContentRequest> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn submit(&self, model: &str, payload: &GenerateContentRequest) -> AttemptOutcome {
        self.calls.lock().unwrap().push(model.to_string());
        self.payloads.lock().unwrap().push(payload.clone());
        self.scripts
            .lock()
            .unwrap()
            .get_mut(model)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| AttemptOutcome::Rejected {
                status: 500,
                body: format!("unscripted call to {}", model),
            })
    }
}

pub fn success(text: &str) -> AttemptOutcome {
    AttemptOutcome::Success(text.to_string())
}

pub fn rejected(status: u16, body: &str) -> AttemptOutcome {
    AttemptOutcome::Rejected {
        status,
        body: body.to_string(),
    }
}

pub fn transport(message: &str) -> AttemptOutcome {
    AttemptOutcome::Transport(message.to_string())
}

pub fn chain() -> Vec<String> {
    vec!["model-a".to_string(), "model-b".to_string(), "model-c".to_string()]
}
