use std::io::{Read, Write};

use tracing::debug;

use crate::config::WatchConfig;
use crate::parser::SessionEventParser;
use crate::reader::{BoundedLineReader, ReadLine};
use crate::render::render;
use crate::sink::GuardedSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriverState {
    Streaming,
    Draining,
}

/// What one run over a stream did. Returned for observability; the process
/// outcome never depends on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    pub lines_read: usize,
    pub events_rendered: usize,
    pub drained: bool,
}

/// The blocking read loop over one producer's stream.
///
/// Malformed lines cost at most their own iteration. An unexpected output
/// failure flips the driver into drain mode: the rest of the input is
/// consumed and discarded so the upstream producer never sees a broken pipe,
/// then the run ends normally. Nothing leaves drain mode except
/// end-of-input.
pub struct WatchDriver<R: Read, W: Write> {
    reader: BoundedLineReader<R>,
    parser: SessionEventParser,
    sink: GuardedSink<W>,
    config: WatchConfig,
    state: DriverState,
}

impl<R: Read, W: Write> WatchDriver<R, W> {
    pub fn new(input: R, output: W, config: WatchConfig) -> Self {
        Self {
            reader: BoundedLineReader::new(input, config.limits.max_line_bytes),
            parser: SessionEventParser::new(),
            sink: GuardedSink::new(output),
            config,
            state: DriverState::Streaming,
        }
    }

    /// Runs to end-of-input. Infallible: every failure class is either
    /// skipped per-line or converted into drain mode.
    pub fn run(&mut self) -> StreamSummary {
        let mut summary = StreamSummary::default();

        while let Some(next) = self.reader.next_line() {
            summary.lines_read += 1;

            if self.state == DriverState::Draining {
                continue;
            }

            let line = match next {
                ReadLine::Line(line) => line,
                ReadLine::Skipped(reason) => {
                    debug!(
                        ?reason,
                        line = self.reader.line_number(),
                        "skipping unprocessable line"
                    );
                    continue;
                }
            };

            let event = match self.parser.parse_line(&line) {
                Ok(Some(event)) => event,
                Ok(None) => continue,
                Err(err) => {
                    debug!(%err, line = self.reader.line_number(), "skipping malformed line");
                    continue;
                }
            };

            let Some(rendered) = render(&event, self.config.verbose, &self.config.palette) else {
                continue;
            };

            match self.sink.print(&rendered) {
                Ok(()) => {
                    if self.sink.is_enabled() {
                        summary.events_rendered += 1;
                    }
                }
                Err(err) => {
                    debug!(%err, "output failed; draining remaining input");
                    self.sink.disable();
                    self.state = DriverState::Draining;
                }
            }
        }

        summary.drained = self.state == DriverState::Draining;
        summary
    }

    /// Consumes the driver and hands back the output writer.
    pub fn into_writer(self) -> W {
        self.sink.into_inner()
    }
}
