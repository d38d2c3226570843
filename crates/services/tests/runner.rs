use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::{BLANK_MARKER, QuestionSet};
use services::{
    JsonQuestionProvider, ProviderError, QuestionProvider, QuizHandle, QuizRunner, QuizService,
    QuizSnapshot, SilentNotifier, parse_quiz,
};

fn payload(id: &str) -> String {
    format!(
        r#"{{
            "data": {{
                "questions": [{{
                    "questionId": "{id}",
                    "question": "A {BLANK_MARKER} day.",
                    "options": ["sunny", "rainy"],
                    "correctAnswer": ["sunny"]
                }}]
            }}
        }}"#
    )
}

fn spawn(provider: Arc<dyn QuestionProvider>) -> QuizHandle {
    let service = QuizService::new(Default::default(), Arc::new(SilentNotifier));
    let (handle, _task) = QuizRunner::new(provider).spawn(service);
    handle
}

async fn wait_until(handle: &QuizHandle, check: impl FnMut(&QuizSnapshot) -> bool) {
    let mut rx = handle.subscribe();
    tokio::time::timeout(Duration::from_secs(600), rx.wait_for(check))
        .await
        .expect("condition reached in time")
        .expect("runner alive");
}

#[tokio::test(start_paused = true)]
async fn countdown_ticks_once_per_second_after_load() {
    let handle = spawn(Arc::new(JsonQuestionProvider::inline(payload("q1"))));
    handle.load().unwrap();
    wait_until(&handle, |s| s.state.is_running()).await;

    tokio::time::sleep(Duration::from_millis(3_500)).await;

    assert_eq!(handle.snapshot().state.time_remaining(), 57);
}

#[tokio::test(start_paused = true)]
async fn countdown_follows_a_custom_period() {
    let service = QuizService::new(Default::default(), Arc::new(SilentNotifier));
    let (handle, _task) = QuizRunner::new(Arc::new(JsonQuestionProvider::inline(payload("q1"))))
        .with_period(Duration::from_millis(100))
        .spawn(service);
    handle.load().unwrap();
    wait_until(&handle, |s| s.state.is_running()).await;

    tokio::time::sleep(Duration::from_millis(350)).await;

    assert_eq!(handle.snapshot().state.time_remaining(), 57);
}

#[tokio::test(start_paused = true)]
async fn countdown_restarts_when_the_question_changes() {
    let two_questions = payload("q1").replacen(
        "}]",
        &format!(
            r#"}}, {{
                "questionId": "q2",
                "question": "A {BLANK_MARKER} night.",
                "options": ["calm", "stormy"],
                "correctAnswer": ["calm"]
            }}]"#
        ),
        1,
    );
    let handle = spawn(Arc::new(JsonQuestionProvider::inline(two_questions)));
    handle.load().unwrap();
    wait_until(&handle, |s| s.state.is_running()).await;

    tokio::time::sleep(Duration::from_millis(2_500)).await;
    assert_eq!(handle.snapshot().state.time_remaining(), 58);

    handle.place_option(0).unwrap();
    handle.advance().unwrap();
    wait_until(&handle, |s| s.state.current_index() == 1).await;

    // a full period must pass on the new question before the first tick
    tokio::time::sleep(Duration::from_millis(700)).await;
    assert_eq!(handle.snapshot().state.time_remaining(), 60);
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(handle.snapshot().state.time_remaining(), 59);
}

#[tokio::test(start_paused = true)]
async fn answering_the_last_question_publishes_a_summary() {
    let handle = spawn(Arc::new(JsonQuestionProvider::inline(payload("q1"))));
    handle.load().unwrap();
    wait_until(&handle, |s| s.state.is_running()).await;

    handle.place_option(0).unwrap();
    handle.advance().unwrap();
    wait_until(&handle, |s| s.state.is_complete()).await;

    let summary = handle.snapshot().summary.expect("summary once complete");
    assert_eq!(summary.score().correct, 1);
    assert_eq!(summary.score().percent(), 100);
}

#[tokio::test(start_paused = true)]
async fn unanswered_question_times_out_and_completes() {
    let handle = spawn(Arc::new(JsonQuestionProvider::inline(payload("q1"))));
    handle.load().unwrap();
    wait_until(&handle, |s| s.state.is_complete()).await;

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.state.time_remaining(), 0);
    let summary = snapshot.summary.unwrap();
    assert_eq!(summary.score().correct, 0);
    assert!(!summary.items()[0].answered);

    // completed sessions stop ticking
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(handle.snapshot().state.time_remaining(), 0);
}

/// First call answers slowly with "stale", later calls answer at once with "fresh".
struct SlowThenFast {
    calls: AtomicUsize,
}

#[async_trait]
impl QuestionProvider for SlowThenFast {
    async fn fetch_questions(&self) -> Result<QuestionSet, ProviderError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            tokio::time::sleep(Duration::from_secs(5)).await;
            parse_quiz(&payload("stale"))
        } else {
            parse_quiz(&payload("fresh"))
        }
    }
}

#[tokio::test(start_paused = true)]
async fn load_started_before_reset_is_discarded() {
    let handle = spawn(Arc::new(SlowThenFast {
        calls: AtomicUsize::new(0),
    }));

    handle.load().unwrap();
    wait_until(&handle, |s| s.loading).await;
    handle.reset().unwrap();
    handle.load().unwrap();
    wait_until(&handle, |s| s.state.is_running()).await;

    tokio::time::sleep(Duration::from_secs(10)).await;

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.generation, 1);
    assert_eq!(snapshot.state.questions().len(), 1);
    assert_eq!(snapshot.state.questions()[0].id().as_str(), "fresh");
}

/// Panics on the first fetch, then serves a valid quiz.
struct PanicsOnce {
    calls: AtomicUsize,
}

#[async_trait]
impl QuestionProvider for PanicsOnce {
    async fn fetch_questions(&self) -> Result<QuestionSet, ProviderError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            panic!("provider blew up");
        }
        parse_quiz(&payload("retry"))
    }
}

#[tokio::test(start_paused = true)]
async fn panicking_fetch_fails_the_load_instead_of_hanging() {
    let handle = spawn(Arc::new(PanicsOnce {
        calls: AtomicUsize::new(0),
    }));

    handle.load().unwrap();
    wait_until(&handle, |s| s.state.load_status().error().is_some()).await;

    let snapshot = handle.snapshot();
    assert!(!snapshot.loading);
    assert!(
        snapshot
            .state
            .load_status()
            .error()
            .is_some_and(|message| message.contains("aborted"))
    );

    handle.reset().unwrap();
    handle.load().unwrap();
    wait_until(&handle, |s| s.state.is_running()).await;
    assert_eq!(handle.snapshot().state.questions()[0].id().as_str(), "retry");
}

#[tokio::test]
async fn handles_fail_after_shutdown() {
    let service = QuizService::new(Default::default(), Arc::new(SilentNotifier));
    let (handle, task) =
        QuizRunner::new(Arc::new(JsonQuestionProvider::inline(payload("q1")))).spawn(service);

    handle.shutdown().unwrap();
    task.await.unwrap();

    assert!(handle.advance().is_err());
}
