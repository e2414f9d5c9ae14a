// Fallback chain behaviour tests
// Author: kelexine (https://github.com/kelexine)

mod common;

use common::{chain, rejected, success, transport, ScriptedGenerator};
use proptest::prelude::*;
use scentwise::gemini::{AttemptOutcome, Dispatched, Exhausted, FallbackDispatcher};
use scentwise::models::gemini::GenerateContentRequest;
use scentwise::utils::retry::RetryPolicy;
use std::time::Duration;

fn payload() -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![],
        system_instruction: None,
        generation_config: None,
    }
}

fn dispatcher() -> FallbackDispatcher {
    FallbackDispatcher::new(chain(), RetryPolicy::default())
}

#[tokio::test(start_paused = true)]
async fn test_first_model_success_short_circuits() {
    let generator = ScriptedGenerator::new().script("model-a", vec![success("Try Santal 33")]);

    let result = dispatcher().dispatch(&generator, &payload()).await.unwrap();

    assert_eq!(result.text, "Try Santal 33");
    assert_eq!(result.model, "model-a");
    assert_eq!(result.attempt, 0);
    assert_eq!(generator.calls(), vec!["model-a"]);
    assert_eq!(generator.calls_to("model-b"), 0);
    assert_eq!(generator.calls_to("model-c"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_skips_to_next_model_without_retry() {
    let generator = ScriptedGenerator::new()
        .script("model-a", vec![AttemptOutcome::RateLimited, success("never used")])
        .script("model-b", vec![success("from b")]);

    let start = tokio::time::Instant::now();
    let result = dispatcher().dispatch(&generator, &payload()).await.unwrap();

    assert_eq!(result.text, "from b");
    assert_eq!(generator.calls(), vec!["model-a", "model-b"]);
    // No backoff is spent on a rate-limited model
    assert!(start.elapsed() < Duration::from_millis(2000));
}

#[tokio::test(start_paused = true)]
async fn test_transport_failure_retries_same_model_after_delay() {
    let generator = ScriptedGenerator::new()
        .script("model-a", vec![transport("connection reset"), success("second try")]);

    let start = tokio::time::Instant::now();
    let result = dispatcher().dispatch(&generator, &payload()).await.unwrap();

    assert_eq!(
        result,
        Dispatched {
            text: "second try".to_string(),
            model: "model-a".to_string(),
            attempt: 1,
        }
    );
    assert_eq!(generator.calls(), vec!["model-a", "model-a"]);
    assert!(start.elapsed() >= Duration::from_millis(2000));
}

#[tokio::test(start_paused = true)]
async fn test_rejection_is_not_retried() {
    let generator = ScriptedGenerator::new()
        .script("model-a", vec![rejected(400, "bad request"), success("never used")])
        .script("model-b", vec![success("from b")]);

    let result = dispatcher().dispatch(&generator, &payload()).await.unwrap();

    assert_eq!(result.model, "model-b");
    assert_eq!(generator.calls_to("model-a"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_exhaustion_reports_last_error() {
    let generator = ScriptedGenerator::new()
        .script("model-a", vec![rejected(500, "a failed")])
        .script("model-b", vec![transport("b down"), transport("b still down")])
        .script("model-c", vec![AttemptOutcome::RateLimited]);

    let result = dispatcher().dispatch(&generator, &payload()).await;

    assert_eq!(
        result,
        Err(Exhausted {
            last_error: Some("Rate limited on model-c".to_string())
        })
    );
    assert_eq!(generator.calls(), vec!["model-a", "model-b", "model-b", "model-c"]);
}

#[tokio::test(start_paused = true)]
async fn test_mixed_chain_scenario() {
    // A: 429, B: two transport failures, C: success
    let generator = ScriptedGenerator::new()
        .script("model-a", vec![AttemptOutcome::RateLimited])
        .script("model-b", vec![transport("socket hang up"), transport("socket hang up")])
        .script("model-c", vec![success("Use X by Y")]);

    let result = dispatcher().dispatch(&generator, &payload()).await.unwrap();

    assert_eq!(result.text, "Use X by Y");
    assert_eq!(generator.calls_to("model-a"), 1);
    assert_eq!(generator.calls_to("model-b"), 2);
    assert_eq!(generator.calls_to("model-c"), 1);
    assert_eq!(generator.calls().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_all_rejected_scenario() {
    let generator = ScriptedGenerator::new()
        .script("model-a", vec![rejected(400, "A error body")])
        .script("model-b", vec![rejected(500, "B error body")])
        .script("model-c", vec![rejected(503, "C error body")]);

    let result = dispatcher().dispatch(&generator, &payload()).await;

    assert_eq!(
        result,
        Err(Exhausted {
            last_error: Some("C error body".to_string())
        })
    );
    assert_eq!(generator.calls(), vec!["model-a", "model-b", "model-c"]);
}

#[tokio::test(start_paused = true)]
async fn test_placeholder_success_still_short_circuits() {
    let generator = ScriptedGenerator::new()
        .script("model-a", vec![success("No response generated.")])
        .script("model-b", vec![success("real text")]);

    let result = dispatcher().dispatch(&generator, &payload()).await.unwrap();

    assert_eq!(result.text, "No response generated.");
    assert_eq!(generator.calls(), vec!["model-a"]);
}

#[tokio::test(start_paused = true)]
async fn test_same_payload_sent_to_every_attempt() {
    let request = GenerateContentRequest {
        contents: vec![scentwise::models::gemini::Content {
            role: "user".to_string(),
            parts: vec![scentwise::models::gemini::Part::text("hello")],
        }],
        system_instruction: None,
        generation_config: None,
    };
    let generator = ScriptedGenerator::new()
        .script("model-a", vec![transport("reset"), AttemptOutcome::RateLimited])
        .script("model-b", vec![success("ok")]);

    dispatcher().dispatch(&generator, &request).await.unwrap();

    let payloads = generator.payloads();
    assert_eq!(payloads.len(), 3);
    assert!(payloads.iter().all(|p| *p == request));
}

// ============================================================================
// Property tests
// ============================================================================

fn outcome_strategy() -> impl Strategy<Value = AttemptOutcome> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(AttemptOutcome::Success),
        Just(AttemptOutcome::RateLimited),
        (400u16..600, "[a-z]{1,8}").prop_map(|(status, body)| AttemptOutcome::Rejected { status, body }),
        "[a-z]{1,8}".prop_map(AttemptOutcome::Transport),
    ]
}

/// What the dispatcher should do, computed directly from the scripts.
fn expected(
    scripts: &[Vec<AttemptOutcome>],
    attempts_per_model: u32,
) -> (Result<String, Option<String>>, Vec<usize>) {
    let mut last_error = None;
    let mut calls = Vec::new();

    for (index, script) in scripts.iter().enumerate() {
        let mut queue = script.iter();
        for _ in 0..attempts_per_model {
            calls.push(index);
            match queue.next() {
                Some(AttemptOutcome::Success(text)) => return (Ok(text.clone()), calls),
                Some(AttemptOutcome::RateLimited) => {
                    last_error = Some(format!("Rate limited on m{}", index));
                    break;
                }
                Some(AttemptOutcome::Rejected { body, .. }) => {
                    last_error = Some(body.clone());
                    break;
                }
                Some(AttemptOutcome::Transport(message)) => {
                    last_error = Some(message.clone());
                }
                None => {
                    last_error = Some(format!("unscripted call to m{}", index));
                    break;
                }
            }
        }
    }

    (Err(last_error), calls)
}

proptest! {
    #[test]
    fn prop_dispatch_follows_retry_rules(
        scripts in prop::collection::vec(prop::collection::vec(outcome_strategy(), 0..3), 0..4),
        attempts_per_model in 1u32..4,
    ) {
        let models: Vec<String> = (0..scripts.len()).map(|i| format!("m{}", i)).collect();
        let mut generator = ScriptedGenerator::new();
        for (model, script) in models.iter().zip(&scripts) {
            generator = generator.script(model, script.clone());
        }

        let policy = RetryPolicy { attempts_per_model, delay: Duration::ZERO };
        let dispatcher = FallbackDispatcher::new(models.clone(), policy);
        let result = tokio_test::block_on(dispatcher.dispatch(&generator, &payload()));

        let (expected_result, expected_calls) = expected(&scripts, attempts_per_model);
        let calls: Vec<String> = expected_calls.iter().map(|i| models[*i].clone()).collect();
        prop_assert_eq!(generator.calls(), calls);

        for model in &models {
            prop_assert!(generator.calls_to(model) as u32 <= attempts_per_model);
        }

        match (result, expected_result) {
            (Ok(dispatched), Ok(text)) => prop_assert_eq!(dispatched.text, text),
            (Err(exhausted), Err(last_error)) => prop_assert_eq!(exhausted.last_error, last_error),
            (got, want) => prop_assert!(false, "got {:?}, want {:?}", got, want),
        }
    }
}
