use std::io::Read;

use tracing::debug;

const CHUNK_SIZE_BYTES: usize = 8192;

/// Outcome of pulling one line from a [`BoundedLineReader`].
#[derive(Debug)]
pub enum ReadLine {
    Line(String),
    /// The line was fully consumed but cannot be processed; the fail-open
    /// policy is to skip it and keep streaming.
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    TooLong { observed_bytes: usize },
    InvalidUtf8,
}

/// Bounded-memory line reader over a byte stream.
///
/// Lines longer than `max_line_bytes` are consumed in discard mode and
/// reported as skipped, so a single runaway record cannot grow the buffer
/// without limit. A read error ends the stream the same way end-of-input
/// does.
pub struct BoundedLineReader<R: Read> {
    reader: R,
    max_line_bytes: usize,
    buffer: [u8; CHUNK_SIZE_BYTES],
    buffer_pos: usize,
    buffer_len: usize,
    current_line: Vec<u8>,
    observed_bytes: usize,
    discard_mode: bool,
    line_number: usize,
    done: bool,
}

impl<R: Read> BoundedLineReader<R> {
    pub fn new(reader: R, max_line_bytes: usize) -> Self {
        Self {
            reader,
            max_line_bytes,
            buffer: [0u8; CHUNK_SIZE_BYTES],
            buffer_pos: 0,
            buffer_len: 0,
            current_line: Vec::new(),
            observed_bytes: 0,
            discard_mode: false,
            line_number: 0,
            done: false,
        }
    }

    /// 1-based number of the most recently finished line.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Blocking pull of the next line. `None` means end-of-input.
    pub fn next_line(&mut self) -> Option<ReadLine> {
        if self.done {
            return None;
        }

        loop {
            if self.buffer_pos >= self.buffer_len {
                match self.fill_buffer() {
                    Ok(0) => {
                        self.done = true;
                        if self.discard_mode || !self.current_line.is_empty() {
                            return Some(self.finish_line());
                        }
                        return None;
                    }
                    Ok(_) => {}
                    Err(err) => {
                        debug!(%err, "read failed; treating as end of input");
                        self.done = true;
                        return None;
                    }
                }
            }

            let (newline_idx, slice_len) = {
                let slice = &self.buffer[self.buffer_pos..self.buffer_len];
                (slice.iter().position(|b| *b == b'\n'), slice.len())
            };

            let Some(newline_idx) = newline_idx else {
                self.take_bytes(slice_len);
                self.buffer_pos = self.buffer_len;
                continue;
            };

            self.take_bytes(newline_idx);
            self.buffer_pos += newline_idx + 1;
            return Some(self.finish_line());
        }
    }

    fn fill_buffer(&mut self) -> std::io::Result<usize> {
        self.buffer_pos = 0;
        let n = self.reader.read(&mut self.buffer)?;
        self.buffer_len = n;
        Ok(n)
    }

    fn take_bytes(&mut self, count: usize) {
        self.observed_bytes = self.observed_bytes.saturating_add(count);
        if self.observed_bytes > self.max_line_bytes && !self.discard_mode {
            self.discard_mode = true;
            self.current_line.clear();
        }
        if !self.discard_mode {
            let segment = &self.buffer[self.buffer_pos..self.buffer_pos + count];
            self.current_line.extend_from_slice(segment);
        }
    }

    fn finish_line(&mut self) -> ReadLine {
        self.line_number += 1;
        let too_long = self.discard_mode;
        let observed_bytes = self.observed_bytes;
        let bytes = std::mem::take(&mut self.current_line);
        self.observed_bytes = 0;
        self.discard_mode = false;

        if too_long {
            return ReadLine::Skipped(SkipReason::TooLong { observed_bytes });
        }
        match String::from_utf8(bytes) {
            Ok(line) => ReadLine::Line(line),
            Err(_) => ReadLine::Skipped(SkipReason::InvalidUtf8),
        }
    }
}
