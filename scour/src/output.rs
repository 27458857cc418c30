use colored::Colorize;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

/// The shared report sink all workers write to.
///
/// Concurrent workers emit reports at whole-line granularity: each report is
/// formatted first and written under the sink's lock in a single call, so
/// output from different threads never interleaves at the character level.
/// No ordering is guaranteed across files or threads beyond that.
#[derive(Clone)]
pub struct OutputSink {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl OutputSink {
    /// Creates a sink that writes reports to stdout
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    /// Creates a sink over an arbitrary writer (a capture buffer in tests,
    /// `io::sink()` in benchmarks)
    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Creates a sink backed by an in-memory buffer, returning a handle that
    /// can read back everything written to it
    pub fn capture() -> (Self, CapturedOutput) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let captured = CapturedOutput {
            buffer: Arc::clone(&buffer),
        };
        (Self::from_writer(SharedBuffer { buffer }), captured)
    }

    /// Emits a highlighted `name: path` report for a matching file or
    /// directory name, or as the header preceding a file's content scan
    pub fn name_match(&self, name: &str, path: &Path) {
        self.write_line(format_args!(
            "{}: {}",
            name.red().bold(),
            path.display()
        ));
    }

    /// Emits one scanned content line, prefixed with its 1-based number when
    /// `line_number` is set
    pub fn scanned_line(&self, line: &str, line_number: Option<usize>) {
        match line_number {
            Some(n) => self.write_line(format_args!("Line {}: {}", n, line)),
            None => self.write_line(format_args!("{}", line)),
        }
    }

    /// Emits the bare name of a target file that contained no match
    pub fn file_without_match(&self, name: &str) {
        self.write_line(format_args!("{}", name.red().bold()));
    }

    fn write_line(&self, args: std::fmt::Arguments<'_>) {
        // Format outside the lock; hold it only for the single write.
        let line = format!("{}\n", args);
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writer.write_all(line.as_bytes()) {
            warn!(error = %e, "failed to write report line");
        }
    }
}

impl std::fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputSink").finish_non_exhaustive()
    }
}

struct SharedBuffer {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Read handle for a capturing [`OutputSink`]
#[derive(Clone)]
pub struct CapturedOutput {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedOutput {
    /// Returns everything written to the sink so far, decoded lossily
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Returns the captured output split into lines
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}
