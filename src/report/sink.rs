//! Diagnostic output for timing reports

use std::io::{self, Write};
#[cfg(test)]
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Default)]
pub(crate) enum Sink {
    #[default]
    Stderr,
    #[cfg(test)]
    Buffer(Arc<Mutex<Vec<u8>>>),
}

impl Sink {
    /// Write one line followed by a newline.
    pub(crate) fn write_line(&self, line: &str) -> io::Result<()> {
        match self {
            Sink::Stderr => {
                let mut stderr = io::stderr().lock();
                writeln!(stderr, "{}", line)?;
                stderr.flush()
            }
            #[cfg(test)]
            Sink::Buffer(buffer) => {
                let mut buffer = buffer.lock().unwrap_or_else(PoisonError::into_inner);
                writeln!(buffer, "{}", line)
            }
        }
    }
}

/// Captured output shared between a test body and the timers it drives.
#[cfg(test)]
pub(crate) mod capture {
    use super::*;

    /// Expected output line.
    #[derive(Debug, Clone, Copy)]
    pub(crate) enum Line<'a> {
        Text(&'a str),
        /// `"{label} took <number> ms"` or `"{label} took <number> s"`.
        Took(&'a str),
    }

    impl Line<'_> {
        fn matches(&self, line: &str) -> bool {
            match *self {
                Line::Text(text) => line == text,
                Line::Took(label) => {
                    let Some(rest) = line.strip_prefix(label).and_then(|r| r.strip_prefix(" took ")) else {
                        return false;
                    };
                    match rest.split_once(' ') {
                        Some((amount, "ms" | "s")) => amount.parse::<f64>().is_ok(),
                        _ => false,
                    }
                }
            }
        }
    }

    #[derive(Debug, Clone, Default)]
    pub(crate) struct Capture {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl Capture {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn sink(&self) -> Sink {
            Sink::Buffer(Arc::clone(&self.buffer))
        }

        /// Stand-in for regular program output, interleaved with reports.
        pub(crate) fn print(&self, line: &str) {
            self.sink().write_line(line).unwrap();
        }

        pub(crate) fn output(&self) -> String {
            let buffer = self.buffer.lock().unwrap();
            String::from_utf8(buffer.clone()).unwrap()
        }

        pub(crate) fn assert_lines(&self, expected: &[Line<'_>]) {
            let output = self.output();
            let lines: Vec<&str> = output.lines().collect();
            let ok = lines.len() == expected.len()
                && lines.iter().zip(expected).all(|(line, want)| want.matches(line));
            assert!(ok, "Output did not match.\nExpected: {:?}\nOutput: {:?}", expected, output);
        }
    }

    #[test]
    fn test_line_matching() {
        assert!(Line::Took("it").matches("it took 0.0500 ms"));
        assert!(Line::Took("it").matches("it took 1.5 s"));
        assert!(Line::Took("one").matches("one took 12 ms"));
        assert!(!Line::Took("one").matches("two took 12 ms"));
        assert!(!Line::Took("it").matches("it took a while"));
        assert!(!Line::Took("it").matches("it took 12 min"));
        assert!(Line::Text("it worked").matches("it worked"));
    }

    #[test]
    fn test_capture_collects_lines() {
        let capture = Capture::new();
        capture.print("first");
        capture.sink().write_line("it took 1.0 s").unwrap();
        assert_eq!(capture.output(), "first\nit took 1.0 s\n");
        capture.assert_lines(&[Line::Text("first"), Line::Took("it")]);
    }
}
