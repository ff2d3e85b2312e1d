//! Line-oriented output sinks shared by text reporters and monitors.
//!
//! # Invariants
//! - Writes never fail the caller; I/O errors are logged and the line dropped.
//! - File sinks create the file (and parent directories) on first write.

use log::{error, warn};
use std::fmt::{Debug, Formatter};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

enum SinkTarget {
    Stdout,
    Writer(Box<dyn Write + Send>),
    File {
        path: PathBuf,
        file: Option<BufWriter<File>>,
        failed: bool,
    },
}

/// Thread-safe line writer.
pub struct PrintSink {
    target: Mutex<SinkTarget>,
}

impl Debug for PrintSink {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &*self.lock() {
            SinkTarget::Stdout => f.write_str("PrintSink(stdout)"),
            SinkTarget::Writer(_) => f.write_str("PrintSink(writer)"),
            SinkTarget::File { path, .. } => write!(f, "PrintSink(file={})", path.display()),
        }
    }
}

impl PrintSink {
    pub fn stdout() -> Self {
        Self::with_target(SinkTarget::Stdout)
    }

    pub fn writer(writer: impl Write + Send + 'static) -> Self {
        Self::with_target(SinkTarget::Writer(Box::new(writer)))
    }

    /// Sink that writes to `path`, truncating it on first write.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::with_target(SinkTarget::File {
            path: path.into(),
            file: None,
            failed: false,
        })
    }

    fn with_target(target: SinkTarget) -> Self {
        Self {
            target: Mutex::new(target),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SinkTarget> {
        self.target
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// File path for file sinks.
    pub fn path(&self) -> Option<PathBuf> {
        match &*self.lock() {
            SinkTarget::File { path, .. } => Some(path.clone()),
            _ => None,
        }
    }

    /// Writes `line` followed by a newline.
    pub fn write_line(&self, line: &str) {
        let mut target = self.lock();
        let result = match &mut *target {
            SinkTarget::Stdout => writeln!(io::stdout().lock(), "{line}"),
            SinkTarget::Writer(writer) => writeln!(writer, "{line}"),
            SinkTarget::File { path, file, failed } => {
                if *failed {
                    return;
                }
                if file.is_none() {
                    match open_file(path) {
                        Ok(opened) => *file = Some(opened),
                        Err(err) => {
                            error!(
                                "event=report_open module=reporters status=error path={} error={}",
                                path.display(),
                                err
                            );
                            *failed = true;
                            return;
                        }
                    }
                }
                match file.as_mut() {
                    Some(writer) => writeln!(writer, "{line}"),
                    None => Ok(()),
                }
            }
        };
        if let Err(err) = result {
            warn!("event=report_write module=reporters status=error error={err}");
        }
    }

    pub fn flush(&self) {
        let mut target = self.lock();
        let result = match &mut *target {
            SinkTarget::Stdout => io::stdout().flush(),
            SinkTarget::Writer(writer) => writer.flush(),
            SinkTarget::File { file, .. } => match file.as_mut() {
                Some(writer) => writer.flush(),
                None => Ok(()),
            },
        };
        if let Err(err) = result {
            warn!("event=report_flush module=reporters status=error error={err}");
        }
    }
}

impl Drop for PrintSink {
    fn drop(&mut self) {
        self.flush();
    }
}

fn open_file(path: &Path) -> io::Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    File::create(path).map(BufWriter::new)
}

/// In-memory writer whose contents stay readable after it is handed to a sink.
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        let buffer = self
            .buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
