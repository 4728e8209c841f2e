use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;

use crate::error::Result;

pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(Arc<File>),
    Sink(io::Sink),
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(f) => (&**f).write(buf),
            DelegatingInner::Sink(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(f) => (&**f).flush(),
            DelegatingInner::Sink(s) => s.flush(),
        }
    }
}

/// Hands out writers to the log file, or to nowhere when logging is off.
/// The terminal owns stdout and stderr while the desktop is up.
#[derive(Clone, Debug, Default)]
pub struct SubscriberMakeWriter {
    file: Option<Arc<File>>,
}

impl SubscriberMakeWriter {
    /// Append to `path`, creating it if needed.
    pub fn to_file(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Some(Arc::new(file)),
        })
    }

    pub fn discard() -> Self {
        Self::default()
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        let inner = match &self.file {
            Some(file) => DelegatingInner::File(Arc::clone(file)),
            None => DelegatingInner::Sink(io::sink()),
        };
        DelegatingWriter { inner }
    }
}

/// Install the global subscriber. With `verbose` gesture-level `trace`
/// events are kept too. Calling this again is a no-op.
pub fn init(log_file: Option<&Path>, verbose: bool) -> Result<()> {
    let writer = match log_file {
        Some(path) => SubscriberMakeWriter::to_file(path)?,
        None => SubscriberMakeWriter::discard(),
    };
    let level = if verbose { Level::TRACE } else { Level::DEBUG };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(writer)
        .with_target(false)
        .with_thread_names(false)
        .with_ansi(false)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn file_writer_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("desk.log");
        let make = SubscriberMakeWriter::to_file(&path).unwrap();
        make.make_writer().write_all(b"one\n").unwrap();
        make.make_writer().write_all(b"two\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn discard_swallows_everything() {
        let make = SubscriberMakeWriter::discard();
        let mut w = make.make_writer();
        assert_eq!(w.write(b"gone").unwrap(), 4);
        w.flush().unwrap();
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("desk.log");
        let err = SubscriberMakeWriter::to_file(&path).unwrap_err();
        assert!(matches!(err, crate::error::DeskError::Io(_)));
    }
}
