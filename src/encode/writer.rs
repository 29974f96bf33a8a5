use crate::constants::FLOAT_PRECISION;

/// Accumulates output lines. Headers, entry lines and block separators go
/// through here so the line discipline lives in one place.
pub(crate) struct Writer {
    buffer: String,
}

impl Writer {
    pub fn new() -> Self {
        Writer {
            buffer: String::new(),
        }
    }

    pub fn finish(self) -> String {
        self.buffer
    }

    pub fn write_header(&mut self, header: &str) {
        self.buffer.push('[');
        self.buffer.push_str(header);
        self.buffer.push_str("]\n");
    }

    /// Writes one formatted entry. `text` may span multiple lines (a list in
    /// the bare repeated-key form); empty text emits nothing.
    pub fn write_entry(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    /// Blank line separating sections and per-object entries.
    pub fn write_separator(&mut self) {
        self.buffer.push('\n');
    }
}

/// `key=value` with the platform's canonical integer form.
pub(crate) fn format_int(key: &str, value: i64) -> String {
    let mut buf = itoa::Buffer::new();
    format!("{key}={}", buf.format(value))
}

/// `key=value` with exactly six fractional digits, `.` separator.
pub(crate) fn format_float(key: &str, value: f32) -> String {
    format!("{key}={value:.FLOAT_PRECISION$}")
}
