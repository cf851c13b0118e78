use std::io::{self, ErrorKind, Write};

use tracing::debug;

/// Write guard in front of the output stream.
///
/// The gate starts enabled and flips off permanently the first time the
/// consumer side goes away; a disabled sink swallows writes. Rust binaries
/// ignore SIGPIPE by default, so a closed consumer surfaces here as
/// `BrokenPipe` write errors rather than killing the process.
#[derive(Debug)]
pub struct GuardedSink<W: Write> {
    writer: W,
    enabled: bool,
}

impl<W: Write> GuardedSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            enabled: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Forces the gate shut. Nothing re-enables it.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Writes one display line plus newline and flushes, so each event is
    /// visible as soon as it is rendered.
    ///
    /// A broken pipe is the anticipated failure: the gate closes and the
    /// call reports success so the caller keeps streaming. Any other I/O
    /// error also closes the gate but is handed back to the caller.
    pub fn print(&mut self, line: &str) -> io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        match self.try_write(line) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::BrokenPipe => {
                debug!("output consumer went away; suppressing further output");
                self.enabled = false;
                Ok(())
            }
            Err(err) => {
                self.enabled = false;
                Err(err)
            }
        }
    }

    fn try_write(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
