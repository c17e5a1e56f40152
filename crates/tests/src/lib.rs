//! # Integration Tests
//!
//! End-to-end checks of the reporter against real sinks and the global hook
//! slots.

#[cfg(test)]
mod support {
    use std::sync::{Mutex, MutexGuard, PoisonError};
    use thiserror::Error;

    /// Stand-in for a validation failure raised by host code
    #[derive(Debug, Error)]
    #[error("{0}")]
    pub struct ValueError(pub String);

    /// Stand-in for a generic runtime failure raised by host code
    #[derive(Debug, Error)]
    #[error("{0}")]
    pub struct RuntimeError(pub String);

    use hooks::runtime;

    static GLOBAL_LOCK: Mutex<()> = Mutex::new(());

    /// Serializes tests sharing the process-wide reporter and resets it
    pub struct Isolated {
        _guard: MutexGuard<'static, ()>,
    }

    pub fn isolate() -> Isolated {
        let guard = GLOBAL_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        reset();
        Isolated { _guard: guard }
    }

    fn reset() {
        exception_reporter::disable();
        runtime::set_main_hook(runtime::default_main_hook());
        runtime::set_thread_hook(runtime::default_thread_hook());
        runtime::release_router();
    }

    impl Drop for Isolated {
        fn drop(&mut self) {
            reset();
        }
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::fs;
    use std::panic::{self, PanicHookInfo};
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use std::thread;

    use exception_reporter::{EnableOptions, ExceptionInfo, SinkSelection};
    use hooks::runtime::{self, UncaughtPanic};
    use tempfile::tempdir;

    use super::support::{isolate, RuntimeError, ValueError};

    fn file_options(path: &Path) -> EnableOptions {
        EnableOptions::new()
            .sink(SinkSelection::File)
            .log_file(path)
            .enabled(true)
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap_or_default()
    }

    #[test]
    fn test_manual_report_reaches_file() {
        let _isolated = isolate();
        let dir = tempdir().unwrap();
        let log = dir.path().join("nested").join("exceptions.log");

        exception_reporter::enable(file_options(&log)).unwrap();
        assert!(log.parent().unwrap().is_dir());

        let error = ValueError("integration test error".to_string());
        exception_reporter::report_error(&error, None);
        exception_reporter::disable();

        let content = read(&log);
        assert!(content.contains("Type: ValueError"));
        assert!(content.contains("Message: integration test error"));
        assert!(!content.contains("Scope:"));
    }

    #[test]
    fn test_repeated_reports_append() {
        let _isolated = isolate();
        let dir = tempdir().unwrap();
        let log = dir.path().join("exceptions.log");

        exception_reporter::enable(file_options(&log)).unwrap();
        for i in 0..3 {
            let error = RuntimeError(format!("failure {i}"));
            exception_reporter::report_error(&error, Some("loop"));
        }
        exception_reporter::disable();

        let content = read(&log);
        assert_eq!(content.matches("Exception Report - ").count(), 3);
        assert_eq!(content.matches("Scope: loop").count(), 3);
        assert!(content.contains("Message: failure 2"));
    }

    #[test]
    fn test_worker_panic_is_reported() {
        let _isolated = isolate();
        let dir = tempdir().unwrap();
        let log = dir.path().join("exceptions.log");

        exception_reporter::enable(file_options(&log)).unwrap();
        let joined = thread::Builder::new()
            .name("integration-worker".to_string())
            .spawn(|| panic!("thread exception"))
            .unwrap()
            .join();
        exception_reporter::disable();

        assert!(joined.is_err());
        let content = read(&log);
        assert!(content.contains("Type: panic"));
        assert!(content.contains("Message: thread exception"));
        assert!(content.contains("Thread: integration-worker"));
        assert!(content.contains("Main Thread: False"));
    }

    #[test]
    fn test_worker_named_main_is_not_main_thread() {
        let _isolated = isolate();
        let dir = tempdir().unwrap();
        let log = dir.path().join("exceptions.log");

        exception_reporter::enable(file_options(&log)).unwrap();
        let joined = thread::Builder::new()
            .name("main".to_string())
            .spawn(|| panic!("impostor"))
            .unwrap()
            .join();
        exception_reporter::disable();

        assert!(joined.is_err());
        let content = read(&log);
        assert!(content.contains("Message: impostor"));
        assert!(content.contains("Thread: main (ID: "));
        assert!(content.contains("Main Thread: False"));
    }

    #[test]
    fn test_reenable_after_host_replaces_std_hook() {
        let _isolated = isolate();
        let dir = tempdir().unwrap();
        let log = dir.path().join("exceptions.log");

        exception_reporter::enable(file_options(&log)).unwrap();
        exception_reporter::disable();

        let host_calls: Arc<Mutex<usize>> = Arc::default();
        let counter = Arc::clone(&host_calls);
        panic::set_hook(Box::new(move |_: &PanicHookInfo<'_>| {
            *counter.lock().unwrap() += 1;
        }));

        exception_reporter::enable(file_options(&log)).unwrap();
        assert!(exception_reporter::is_hooks_installed());
        let joined = thread::Builder::new()
            .name("late-worker".to_string())
            .spawn(|| panic!("after re-enable"))
            .unwrap()
            .join();
        exception_reporter::disable();
        // The host hook is back in std after disable; restore std's default
        drop(panic::take_hook());

        assert!(joined.is_err());
        assert!(read(&log).contains("Message: after re-enable"));
        assert_eq!(*host_calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_disable_restores_previous_hook() {
        let _isolated = isolate();
        let dir = tempdir().unwrap();
        let log = dir.path().join("exceptions.log");

        let seen: Arc<Mutex<Vec<String>>> = Arc::default();
        let recorder = Arc::clone(&seen);
        let stub: runtime::MainHook = Arc::new(move |event: &UncaughtPanic<'_>| {
            recorder
                .lock()
                .unwrap()
                .push(event.exception.message.clone());
        });
        runtime::set_main_hook(Arc::clone(&stub));

        exception_reporter::enable(file_options(&log)).unwrap();
        exception_reporter::disable();
        assert!(Arc::ptr_eq(&runtime::main_hook(), &stub));

        runtime::fire_main(&UncaughtPanic::new(ExceptionInfo::new(
            "ValueError",
            "after disable",
        )));

        assert_eq!(read(&log), "");
        assert_eq!(*seen.lock().unwrap(), vec!["after disable".to_string()]);
    }

    #[test]
    fn test_installed_hook_reports_then_chains() {
        let _isolated = isolate();
        let dir = tempdir().unwrap();
        let log = dir.path().join("exceptions.log");

        let calls: Arc<Mutex<usize>> = Arc::default();
        let counter = Arc::clone(&calls);
        runtime::set_main_hook(Arc::new(move |_: &UncaughtPanic<'_>| {
            *counter.lock().unwrap() += 1;
        }));

        exception_reporter::enable(file_options(&log)).unwrap();
        runtime::fire_main(&UncaughtPanic::new(ExceptionInfo::new(
            "ValueError",
            "chained",
        )));
        exception_reporter::disable();

        assert!(read(&log).contains("Message: chained"));
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_disable_is_idempotent() {
        let _isolated = isolate();
        let dir = tempdir().unwrap();

        exception_reporter::enable(file_options(&dir.path().join("e.log"))).unwrap();
        exception_reporter::disable();
        exception_reporter::disable();

        assert!(!exception_reporter::is_hooks_installed());
        assert!(!exception_reporter::is_enabled());
    }

    #[test]
    fn test_hooks_installed_transitions() {
        let _isolated = isolate();
        let dir = tempdir().unwrap();
        assert!(!exception_reporter::is_hooks_installed());

        exception_reporter::enable(file_options(&dir.path().join("e.log"))).unwrap();
        assert!(exception_reporter::is_hooks_installed());
        assert!(exception_reporter::is_enabled());

        exception_reporter::disable();
        assert!(!exception_reporter::is_hooks_installed());
    }

    #[test]
    fn test_disabled_config_writes_nothing() {
        let _isolated = isolate();
        let dir = tempdir().unwrap();
        let log = dir.path().join("exceptions.log");

        let options = file_options(&log).enabled(false);
        exception_reporter::enable(options).unwrap();
        assert!(exception_reporter::is_hooks_installed());
        assert!(!exception_reporter::is_enabled());

        exception_reporter::report_error(&ValueError("ignored".to_string()), None);
        runtime::fire_main(&UncaughtPanic::new(ExceptionInfo::new(
            "ValueError",
            "ignored",
        )));
        exception_reporter::disable();

        assert_eq!(read(&log), "");
    }

    #[test]
    fn test_report_without_enable_is_noop() {
        let _isolated = isolate();
        exception_reporter::report_error(&ValueError("nobody listening".to_string()), None);
        assert!(!exception_reporter::is_enabled());
    }
}

#[cfg(test)]
mod http_tests {
    use std::fs;

    use exception_reporter::{EnableOptions, SinkSelection};
    use tempfile::tempdir;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::support::{isolate, ValueError};

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_both_sinks_receive_report() {
        let _isolated = isolate();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/exception"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let log = dir.path().join("exceptions.log");
        let options = EnableOptions::new()
            .sink(SinkSelection::Both)
            .log_file(&log)
            .http_endpoint(format!("{}/exception", server.uri()))
            .enabled(true);

        exception_reporter::enable(options).unwrap();
        exception_reporter::report_error(&ValueError("over the wire".to_string()), Some("sync"));
        exception_reporter::disable();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["exception_type"], "ValueError");
        assert_eq!(body["exception_message"], "over the wire");
        assert_eq!(body["scope"], "sync");
        assert!(body["thread_info"]["thread_name"].is_string());

        assert!(fs::read_to_string(&log).unwrap().contains("Scope: sync"));
    }

    #[test]
    fn test_unreachable_endpoint_is_swallowed() {
        let _isolated = isolate();
        let options = EnableOptions::new()
            .sink(SinkSelection::Http)
            .http_endpoint("http://127.0.0.1:9/exception")
            .enabled(true);

        exception_reporter::enable(options).unwrap();
        exception_reporter::report_error(&ValueError("dropped".to_string()), None);
        assert!(exception_reporter::is_enabled());
        exception_reporter::disable();
    }
}
