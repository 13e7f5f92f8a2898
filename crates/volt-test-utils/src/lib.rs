//! Test fixtures and log capture for Volt development.
//!
//! - [`fixtures`]: small prebuilt circuits used across integration
//!   tests and benches.
//! - [`init_tracing`]: installs an `EnvFilter`-driven subscriber that
//!   writes through the test harness, so `RUST_LOG=volt_engine=trace`
//!   shows propagation steps for a failing test.
//! - [`capture_logs`]: records formatted events for assertions.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::io;
use std::sync::{Arc, Mutex, Once};

use tracing::subscriber::DefaultGuard;
use tracing::Level;
use tracing_subscriber::EnvFilter;

pub use fixtures::{Bus, Chain, GateHarness};

static INIT: Once = Once::new();

/// Install a global test subscriber once per process.
///
/// Reads `RUST_LOG`; defaults to `warn`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Formatted log output collected by [`capture_logs`].
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Everything written so far.
    pub fn contents(&self) -> String {
        let buf = self.0.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&buf).into_owned()
    }
}

struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CaptureWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self.0.lock().unwrap_or_else(|e| e.into_inner());
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Capture events at `max_level` and above on the current thread until
/// the returned guard drops.
pub fn capture_logs(max_level: Level) -> (LogCapture, DefaultGuard) {
    let capture = LogCapture::default();
    let buf = Arc::clone(&capture.0);
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(move || CaptureWriter(Arc::clone(&buf)))
        .with_ansi(false)
        .without_time()
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}
