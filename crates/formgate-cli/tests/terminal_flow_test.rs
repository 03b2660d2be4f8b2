//! Drives the terminal front-end through the generic runtime with canned
//! input, as a piped script would.

use std::{
    io::{self, Write},
    sync::{Arc, Mutex, PoisonError},
};

use formgate_app::{App, Runtime, Screen, ValidationRules};
use formgate_cli::TerminalDriver;
use formgate_harness::MemoryBackend;

#[derive(Clone, Default)]
struct SharedOutput(Arc<Mutex<Vec<u8>>>);

impl SharedOutput {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap_or_else(PoisonError::into_inner)).into_owned()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

async fn run_script(script: &'static str, backend: MemoryBackend) -> (App, String) {
    let out = SharedOutput::default();
    let driver = TerminalDriver::new(script.as_bytes(), out.clone(), backend);
    let app = Runtime::new(driver, App::new(&ValidationRules::default()).unwrap())
        .run()
        .await
        .unwrap();
    (app, out.text())
}

#[tokio::test]
async fn piped_sign_up_completes_before_eof_quit() {
    let backend = MemoryBackend::default();
    let script = "/set username alice\n\
                  /set name Alice\n\
                  /set password Secret123\n\
                  /set confirm Secret123\n\
                  /submit\n";

    let (app, output) = run_script(script, backend.clone()).await;

    assert!(backend.has_account("alice"));
    assert_eq!(app.screen(), Screen::Login);
    assert!(output.contains("[submitting...]"));
    assert!(output.contains("[ok] Registration successful"));
    assert!(!output.contains("Secret123"));
}

#[tokio::test]
async fn parse_errors_are_reported_locally() {
    let (app, output) = run_script("/frobnicate\n/set email x\n/quit\n", MemoryBackend::default()).await;

    assert!(output.contains("unknown command: /frobnicate"));
    assert!(output.contains("/set: unknown field 'email'"));
    assert_eq!(app.screen(), Screen::SignUp);
}

#[tokio::test]
async fn cascade_is_visible_in_output() {
    let script = "/set password Secret123\n/set confirm Secret123\n/set password Secret456\n/quit\n";
    let (_, output) = run_script(script, MemoryBackend::default()).await;

    let last_screen = output.rsplit("== sign up ==").next().unwrap_or_default();
    assert!(last_screen.contains("! Confirm Password does not match Password"));
}
