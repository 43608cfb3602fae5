//! Shared integration test helpers for consol.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{Capture, TestLogger};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers are used per file.

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};
use consol::{ColorCapability, Consol, CpuInfo, HostMetrics, MemoryInfo, Options};
use parking_lot::Mutex;
use tempfile::TempDir;

/// In-memory console that can be cloned into the logger and read back.
#[derive(Clone, Default)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.text().lines().map(str::to_string).collect()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// 2024-03-09 14:05:00 in local time.
pub fn fixed_now() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2024, 3, 9, 14, 5, 0)
        .single()
        .expect("fixed test time is unambiguous")
}

/// Deterministic host metrics.
pub struct FakeMetrics;

impl HostMetrics for FakeMetrics {
    fn memory(&self) -> MemoryInfo {
        MemoryInfo {
            total: 8_000,
            free: 2_000,
        }
    }

    fn cpu(&self) -> CpuInfo {
        CpuInfo {
            names: vec!["Test CPU".to_string()],
            cores: 4,
            speed_mhz: 3_200,
        }
    }

    fn hostname(&self) -> String {
        "testhost".to_string()
    }

    fn username(&self) -> Option<String> {
        Some("tester".to_string())
    }

    fn uptime_secs(&self) -> u64 {
        90
    }
}

/// A logger wired to a capture buffer, a fixed clock, fake metrics and a
/// temp directory for log files. Fatal calls do not exit.
pub struct TestLogger {
    pub consol: Consol,
    pub console: Capture,
    pub dir: TempDir,
}

impl TestLogger {
    pub fn new(capability: ColorCapability) -> Self {
        let options = Options {
            capability,
            exit_on_fatal: false,
            ..Options::default()
        };
        Self::with_options(options)
    }

    pub fn with_options(options: Options) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let console = Capture::default();
        let consol = Consol::with_options(options)
            .expect("test options render")
            .with_console(console.clone())
            .with_clock(fixed_now)
            .with_metrics(FakeMetrics);
        Self {
            consol,
            console,
            dir,
        }
    }

    /// Enable file output with a path template rooted in the temp dir.
    pub fn log_to_file(&mut self, relative_template: &str) {
        let template = format!("{}/{}", self.dir.path().display(), relative_template);
        self.consol.set_path_format(template);
        self.consol.set_output_to_file(true);
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative)).expect("Failed to read log file")
    }
}
