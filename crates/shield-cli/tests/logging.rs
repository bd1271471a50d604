//! Tests for the redacted-by-default handling of extracted message text.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

use shield_cli::logging::{
    LogConfig, LogFormat, REDACTED_VALUE, init_logging_with_writer, redact_value,
};

/// Capturing writer for subscriber output.
#[derive(Clone, Default)]
struct BufferWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl BufferWriter {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().expect("buffer lock")).into_owned()
    }
}

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .map_err(|_| io::Error::other("buffer lock poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BufferWriter {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn extracted_text_stays_redacted_until_log_data_enabled() {
    // Before any init the flag is off and values come back redacted.
    assert_eq!(redact_value("Rs. 500 debited"), REDACTED_VALUE);

    let writer = BufferWriter::default();
    let config = LogConfig {
        level_filter: LevelFilter::DEBUG,
        use_env_filter: false,
        format: LogFormat::Compact,
        log_file: None,
        with_ansi: false,
        log_data: true,
    };
    init_logging_with_writer(&config, writer.clone());

    // With --log-data the same helper passes values through verbatim.
    assert_eq!(redact_value("Rs. 500 debited"), "Rs. 500 debited");
    tracing::debug!(
        target: "shield_cli",
        evidence = redact_value("Rs. 500 debited"),
        "analysis evidence"
    );
    assert!(writer.contents().contains("Rs. 500 debited"));
}
