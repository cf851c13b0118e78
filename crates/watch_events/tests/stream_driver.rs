use std::io::{self, Cursor, ErrorKind, Write};

use watch_events::{StreamSummary, WatchConfig, WatchDriver, WatchLimits};

fn run_stream(input: &str, verbose: bool) -> (StreamSummary, String) {
    run_stream_bytes(input.as_bytes(), verbose)
}

fn run_stream_bytes(input: &[u8], verbose: bool) -> (StreamSummary, String) {
    let config = WatchConfig {
        verbose,
        ..WatchConfig::default()
    };
    let mut driver = WatchDriver::new(Cursor::new(input.to_vec()), Vec::new(), config);
    let summary = driver.run();
    let out = String::from_utf8(driver.into_writer()).expect("utf8 output");
    (summary, out)
}

/// Writer whose every write fails with a fixed error kind, counting attempts.
struct FailingWriter {
    kind: ErrorKind,
    attempts: usize,
}

impl FailingWriter {
    fn new(kind: ErrorKind) -> Self {
        Self { kind, attempts: 0 }
    }
}

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        self.attempts += 1;
        Err(io::Error::new(self.kind, "consumer refused the write"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn blank_lines_produce_no_output_and_no_error() {
    let (summary, out) = run_stream("\n   \n\t\n", false);
    assert_eq!(out, "");
    assert_eq!(summary.lines_read, 3);
    assert_eq!(summary.events_rendered, 0);
    assert!(!summary.drained);
}

#[test]
fn malformed_line_between_two_valid_events_costs_only_itself() {
    let input = concat!(
        "{\"type\":\"tool_use\",\"part\":{\"tool\":\"bash\",\"state\":{\"input\":{\"command\":\"ls\"}}}}\n",
        "not json\n",
        "{\"type\":\"error\",\"error\":{\"message\":\"boom\"}}\n",
    );
    let (summary, out) = run_stream(input, false);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Bash: ls"));
    assert!(lines[1].contains("boom"));
    assert_eq!(summary.events_rendered, 2);
    assert!(!summary.drained);
}

#[test]
fn unparseable_line_then_text_event_renders_only_the_text() {
    let input = "not json\n{\"type\":\"text\",\"part\":{\"text\":\"hello\"}}\n";
    let (_, out) = run_stream(input, true);
    assert_eq!(out.lines().count(), 1);
    assert!(out.contains("hello"));
    assert!(!out.contains("not json"));
}

#[test]
fn text_events_appear_only_when_verbose() {
    let input = "{\"type\":\"text\",\"part\":{\"text\":\"hello\"}}\n";
    let (_, quiet) = run_stream(input, false);
    assert_eq!(quiet, "");
    let (_, verbose) = run_stream(input, true);
    assert!(verbose.contains("hello"));
}

#[test]
fn broken_pipe_suppresses_output_but_keeps_streaming() {
    let input = concat!(
        "{\"type\":\"error\",\"error\":{\"message\":\"one\"}}\n",
        "{\"type\":\"error\",\"error\":{\"message\":\"two\"}}\n",
    );
    let config = WatchConfig::default();
    let mut driver = WatchDriver::new(
        Cursor::new(input.as_bytes().to_vec()),
        FailingWriter::new(ErrorKind::BrokenPipe),
        config,
    );
    let summary = driver.run();

    assert_eq!(summary.lines_read, 2);
    assert_eq!(summary.events_rendered, 0);
    assert!(!summary.drained, "broken pipe is anticipated, not drain-worthy");
    // One attempt for the first event; the closed gate swallows the second.
    assert_eq!(driver.into_writer().attempts, 1);
}

#[test]
fn unexpected_write_failure_drains_the_rest_of_the_input() {
    let input = concat!(
        "{\"type\":\"error\",\"error\":{\"message\":\"first\"}}\n",
        "not json\n",
        "{\"type\":\"error\",\"error\":{\"message\":\"second\"}}\n",
        "{\"type\":\"error\",\"error\":{\"message\":\"third\"}}\n",
    );
    let config = WatchConfig::default();
    let mut driver = WatchDriver::new(
        Cursor::new(input.as_bytes().to_vec()),
        FailingWriter::new(ErrorKind::Other),
        config,
    );
    let summary = driver.run();

    // Every remaining line is consumed but none is processed.
    assert_eq!(summary.lines_read, 4);
    assert_eq!(summary.events_rendered, 0);
    assert!(summary.drained);
    assert_eq!(driver.into_writer().attempts, 1);
}

#[test]
fn oversized_line_is_skipped_and_the_stream_continues() {
    let config = WatchConfig {
        limits: WatchLimits { max_line_bytes: 64 },
        ..WatchConfig::default()
    };
    let huge = format!(
        "{{\"type\":\"error\",\"error\":{{\"message\":\"{}\"}}}}\n",
        "x".repeat(200)
    );
    let input = format!("{huge}{{\"type\":\"error\",\"error\":{{\"message\":\"small\"}}}}\n");
    let mut driver = WatchDriver::new(Cursor::new(input.into_bytes()), Vec::new(), config);
    let summary = driver.run();
    let out = String::from_utf8(driver.into_writer()).unwrap();

    assert_eq!(out.lines().count(), 1);
    assert!(out.contains("small"));
    assert_eq!(summary.events_rendered, 1);
    assert!(!summary.drained);
}

#[test]
fn invalid_utf8_line_is_skipped_and_the_stream_continues() {
    let mut input = Vec::new();
    input.extend_from_slice(b"{\"type\":\"error\",\"error\":{\"message\":\"ok\"}}\n");
    input.extend_from_slice(b"\xff\xfe\n");
    input.extend_from_slice(b"{\"type\":\"error\",\"error\":{\"message\":\"ok2\"}}\n");

    let (summary, out) = run_stream_bytes(&input, false);
    assert_eq!(out.lines().count(), 2);
    assert!(out.contains("ok2"));
    assert_eq!(summary.events_rendered, 2);
}

#[test]
fn carriage_returns_are_tolerated() {
    let input = "{\"type\":\"error\",\"error\":{\"message\":\"boom\"}}\r\n";
    let (summary, out) = run_stream(input, false);
    assert!(out.contains("boom"));
    assert_eq!(summary.events_rendered, 1);
}

#[test]
fn end_of_input_terminates_a_quiet_run() {
    let (summary, out) = run_stream("", false);
    assert_eq!(out, "");
    assert_eq!(summary, StreamSummary::default());
}
