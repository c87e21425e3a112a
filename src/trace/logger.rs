use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::service::error::{AutofillError, AutofillResult};
use crate::trace::trace::TraceEvent;

/// Protocol trace sink: one JSON object per line, flushed per event.
///
/// Write failures go to `tracing` and never reach the protocol.
#[derive(Default)]
pub struct TraceLogger {
    sink: Option<TraceSink>,
}

struct TraceSink {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl TraceLogger {
    /// Append to `path`, failing when it cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> AutofillResult<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| AutofillError::Io {
                path: path.display().to_string(),
                source,
            })?;

        debug!(path = %path.display(), "protocol trace enabled");
        Ok(Self {
            sink: Some(TraceSink {
                path: path.to_path_buf(),
                writer: Mutex::new(BufWriter::new(file)),
            }),
        })
    }

    /// Like `open`, but an unusable path only turns tracing off.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::open(path).unwrap_or_else(|e| {
            warn!("{e}; protocol trace disabled");
            Self::disabled()
        })
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn log(&self, event: &TraceEvent) {
        let Some(sink) = &self.sink else {
            return;
        };

        if let Err(e) = sink.append(event) {
            warn!(path = %sink.path.display(), "dropped trace event: {e}");
        }
    }
}

impl TraceSink {
    fn append(&self, event: &TraceEvent) -> io::Result<()> {
        let mut writer = self.lock();
        serde_json::to_writer(&mut *writer, event)?;
        writer.write_all(b"\n")?;
        writer.flush()
    }

    fn lock(&self) -> MutexGuard<'_, BufWriter<File>> {
        match self.writer.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
