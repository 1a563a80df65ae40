//! Writing the Finder tag attribute.
//!
//! [`XattrWriter`] shells out to `xattr -w <key> <plist> <path>`. The call is
//! fire-and-forget: `write` spawns the process and returns immediately, and a
//! watcher thread logs the outcome at debug level. Failures are never reported
//! to the caller. Several writes may be in flight at once and may finish in any
//! order.

use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

pub const XATTR_PROGRAM: &str = "xattr";
pub const TAGS_ATTRIBUTE: &str = "com.apple.metadata:_kMDItemUserTags";

/// Something that can attach an encoded tag blob to a file.
pub trait AttributeWriter {
    fn write(&self, path: &Path, blob: &str) -> PendingWrite;
}

/// Handle to a write that has been started.
///
/// Dropping the handle detaches the write; it still completes and logs.
#[derive(Debug)]
pub struct PendingWrite {
    watcher: Option<JoinHandle<()>>,
}

impl PendingWrite {
    /// A write with nothing left to wait for.
    pub fn done() -> Self {
        Self { watcher: None }
    }

    pub fn is_done(&self) -> bool {
        self.watcher.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Block until the outcome has been logged.
    pub fn settle(self) {
        if let Some(watcher) = self.watcher {
            let _ = watcher.join();
        }
    }
}

#[derive(Debug, Clone)]
pub struct XattrWriter {
    program: String,
    attribute: String,
}

impl Default for XattrWriter {
    fn default() -> Self {
        Self {
            program: XATTR_PROGRAM.to_string(),
            attribute: TAGS_ATTRIBUTE.to_string(),
        }
    }
}

impl XattrWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }
}

impl AttributeWriter for XattrWriter {
    fn write(&self, path: &Path, blob: &str) -> PendingWrite {
        // Arguments go straight to the process; no shell sees the tag text.
        let spawned = Command::new(&self.program)
            .arg("-w")
            .arg(&self.attribute)
            .arg(blob)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        let child = match spawned {
            Ok(child) => child,
            Err(e) => {
                debug!(program = %self.program, path = %path.display(), "error: {}", e);
                return PendingWrite::done();
            }
        };

        info!(path = %path.display(), "writing tags");
        let path = path.to_path_buf();
        let watcher = thread::spawn(move || match child.wait_with_output() {
            Ok(output) => log_outcome(&path, &output),
            Err(e) => debug!(path = %path.display(), "error: {}", e),
        });

        PendingWrite {
            watcher: Some(watcher),
        }
    }
}

fn log_outcome(path: &Path, output: &Output) {
    if !output.status.success() {
        debug!(path = %path.display(), "error: {}", output.status);
        return;
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        debug!(path = %path.display(), "stderr: {}", stderr.trim_end());
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub use recording::RecordingWriter;

#[cfg(any(test, feature = "test_utils"))]
mod recording {
    use super::{AttributeWriter, PendingWrite};
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    /// Remembers every write instead of touching the filesystem.
    #[derive(Debug, Default)]
    pub struct RecordingWriter {
        writes: RefCell<Vec<(PathBuf, String)>>,
    }

    impl RecordingWriter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn writes(&self) -> Vec<(PathBuf, String)> {
            self.writes.borrow().clone()
        }

        pub fn paths(&self) -> Vec<PathBuf> {
            self.writes.borrow().iter().map(|(p, _)| p.clone()).collect()
        }
    }

    impl AttributeWriter for RecordingWriter {
        fn write(&self, path: &Path, blob: &str) -> PendingWrite {
            self.writes
                .borrow_mut()
                .push((path.to_path_buf(), blob.to_string()));
            PendingWrite::done()
        }
    }
}
