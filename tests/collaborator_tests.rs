//! Tests for the collaborator abstraction: the scripted mock and the
//! retry wrapper. Back-off tests run on tokio's paused clock, so no
//! real time passes.

use agentloop::{Collaborator, CollaboratorError, MockCollaborator, RetryingCollaborator};
use std::sync::Arc;

#[tokio::test]
async fn mock_records_prompts_and_plays_back_in_order() {
    let mock = MockCollaborator::replies(vec!["first", "second"]);

    assert_eq!(mock.complete("prompt A").await.unwrap(), "first");
    assert_eq!(mock.complete("prompt B").await.unwrap(), "second");
    assert_eq!(mock.call_count(), 2);
    assert_eq!(mock.prompt_for_call(0).as_deref(), Some("prompt A"));
    assert_eq!(mock.prompt_for_call(1).as_deref(), Some("prompt B"));
}

#[tokio::test]
async fn exhausted_mock_reports_unavailable() {
    let mock = MockCollaborator::replies(vec!["only one"]);

    mock.complete("p").await.unwrap();
    let err = mock.complete("p").await.expect_err("queue is empty");
    assert!(matches!(err, CollaboratorError::Unavailable(_)));
}

#[test]
fn retryability_follows_the_error_taxonomy() {
    assert!(CollaboratorError::RateLimited("429".into()).is_retryable());
    assert!(CollaboratorError::Timeout("deadline".into()).is_retryable());
    assert!(CollaboratorError::Transport("reset".into()).is_retryable());

    assert!(!CollaboratorError::Auth("401".into()).is_retryable());
    assert!(!CollaboratorError::Malformed("bad json".into()).is_retryable());
    assert!(!CollaboratorError::EmptyResponse.is_retryable());
    assert!(!CollaboratorError::Unavailable("down".into()).is_retryable());
}

#[tokio::test(start_paused = true)]
async fn retry_wrapper_recovers_from_transient_errors() {
    let mock = Arc::new(MockCollaborator::scripted(vec![
        Err(CollaboratorError::Timeout("deadline".to_string())),
        Err(CollaboratorError::Transport("connection reset".to_string())),
        Ok("recovered".to_string()),
    ]));
    let retrying = RetryingCollaborator::new(Arc::clone(&mock) as Arc<dyn Collaborator>, 3);

    let text = retrying.complete("prompt").await.expect("third attempt succeeds");
    assert_eq!(text, "recovered");
    assert_eq!(mock.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn retry_wrapper_never_retries_auth_failures() {
    let mock = Arc::new(MockCollaborator::scripted(vec![
        Err(CollaboratorError::Auth("invalid api key".to_string())),
        Ok("never reached".to_string()),
    ]));
    let retrying = RetryingCollaborator::new(Arc::clone(&mock) as Arc<dyn Collaborator>, 3);

    let err = retrying.complete("prompt").await.expect_err("auth is fatal");
    assert!(matches!(err, CollaboratorError::Auth(_)));
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn retry_wrapper_gives_up_after_max_retries() {
    let mock = Arc::new(MockCollaborator::scripted(vec![
        Err(CollaboratorError::RateLimited("429".to_string())),
        Err(CollaboratorError::RateLimited("429".to_string())),
        Err(CollaboratorError::RateLimited("429".to_string())),
    ]));
    let retrying = RetryingCollaborator::new(Arc::clone(&mock) as Arc<dyn Collaborator>, 2);

    let err = retrying.complete("prompt").await.expect_err("retries exhausted");
    assert!(matches!(err, CollaboratorError::RateLimited(_)));
    // 1 initial attempt + 2 retries
    assert_eq!(mock.call_count(), 3);
}
