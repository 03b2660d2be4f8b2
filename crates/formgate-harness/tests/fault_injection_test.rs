//! Fault injection tests for submission orchestration.
//!
//! Every failure path must clear the busy indicator and surface a notice;
//! a later retry must still go through.

use std::{future::Future, time::Duration};

use formgate_app::{
    App, AppEvent, AuthBackend, FieldKey, NoticeLevel, Runtime, Screen, ValidationRules,
};
use formgate_harness::{BackendConfig, MemoryBackend, ScriptedDriver};
use formgate_proto::{AuthRequest, StatusCode, SubmitFailure, SubmitResult};

/// Backend whose submission task panics instead of answering.
#[derive(Debug, Clone)]
struct CrashingBackend;

impl AuthBackend for CrashingBackend {
    fn submit(&self, request: AuthRequest) -> impl Future<Output = SubmitResult> + Send {
        async move {
            if request.username().is_empty() {
                return Err(SubmitFailure::Transport("no username".into()));
            }
            panic!("backend crashed handling {}", request.username())
        }
    }
}

fn filled_sign_up() -> Vec<AppEvent> {
    [
        (FieldKey::Username, "carol"),
        (FieldKey::Name, "Carol"),
        (FieldKey::Password, "Secret123"),
        (FieldKey::ConfirmPassword, "Secret123"),
    ]
    .into_iter()
    .map(|(field, value)| AppEvent::Input { field, value: value.to_string() })
    .chain([AppEvent::Submit])
    .collect()
}

fn app() -> App {
    App::new(&ValidationRules::default()).unwrap()
}

#[tokio::test]
async fn transport_failure_then_retry() {
    let backend = MemoryBackend::default();
    backend.fail_next_with_transport("connection reset");

    let mut script = filled_sign_up();
    script.push(AppEvent::Submit);
    let driver = ScriptedDriver::new(backend.clone(), script);
    let frames = driver.frames();

    let app = Runtime::new(driver, app()).run().await.unwrap();

    let notices: Vec<String> =
        frames.snapshot().into_iter().filter_map(|frame| frame.notice.map(|n| n.text)).collect();
    assert!(notices.contains(&"Network error: connection reset".to_string()));
    assert_eq!(app.screen(), Screen::Login);
    assert!(backend.has_account("carol"));
}

#[tokio::test]
async fn server_error_reports_code() {
    let backend = MemoryBackend::default();
    backend.fail_next_with_status(StatusCode::INTERNAL_SERVER_ERROR);
    let driver = ScriptedDriver::new(backend.clone(), filled_sign_up());

    let app = Runtime::new(driver, app()).run().await.unwrap();

    let notice = app.notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.text, "Something went wrong (500)");
    assert!(!app.is_busy());
    assert!(!backend.has_account("carol"));
}

#[tokio::test(start_paused = true)]
async fn slow_backend_keeps_busy_until_completion() {
    let backend = MemoryBackend::new(BackendConfig { latency: Duration::from_secs(30) });
    let driver = ScriptedDriver::new(backend.clone(), filled_sign_up());
    let frames = driver.frames();

    let app = Runtime::new(driver, app()).run().await.unwrap();

    let frames = frames.snapshot();
    let busy_frames = frames.iter().filter(|frame| frame.busy).count();
    assert_eq!(busy_frames, 1);
    assert!(!frames.last().unwrap().busy);
    assert_eq!(app.screen(), Screen::Login);
}

#[tokio::test]
async fn crashed_submission_task_clears_busy() {
    let driver = ScriptedDriver::new(CrashingBackend, filled_sign_up());
    let frames = driver.frames();

    let run = Runtime::new(driver, app()).run();
    let app = tokio::time::timeout(Duration::from_secs(5), run).await.unwrap().unwrap();

    assert!(!app.is_busy());
    assert_eq!(app.screen(), Screen::SignUp);
    let notice = app.notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.text, "Network error: submission task failed");
    assert!(frames.stopped());
}

#[tokio::test(start_paused = true)]
async fn quit_aborts_in_flight_submission() {
    let backend = MemoryBackend::new(BackendConfig { latency: Duration::from_secs(30) });
    let mut script = filled_sign_up();
    script.push(AppEvent::Quit);
    let driver = ScriptedDriver::new(backend.clone(), script).with_busy_input();
    let frames = driver.frames();

    let app = Runtime::new(driver, app()).run().await.unwrap();
    assert!(app.is_busy());
    assert!(frames.stopped());

    // Long past the latency: an aborted task never reaches the backend.
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(backend.received().is_empty());
    assert!(!backend.has_account("carol"));
}
