//! Numeric keypad staging.

/// Accumulates digit keystrokes into the score about to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputStager {
    buffer: String,
}

impl InputStager {
    pub fn new() -> Self {
        Self {
            buffer: "0".to_string(),
        }
    }

    /// Append a digit. A lone leading zero is replaced rather than kept.
    /// Returns `false` and leaves the buffer alone for non-digits.
    pub fn press_digit(&mut self, digit: char) -> bool {
        if !digit.is_ascii_digit() {
            return false;
        }
        if self.buffer == "0" {
            self.buffer.clear();
        }
        self.buffer.push(digit);
        true
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
        if self.buffer.is_empty() {
            self.buffer.push('0');
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.buffer.push('0');
    }

    /// Staged value. Saturates at `u64::MAX` instead of failing.
    pub fn value(&self) -> u64 {
        self.buffer.parse().unwrap_or(u64::MAX)
    }

    pub fn display(&self) -> &str {
        &self.buffer
    }
}

impl Default for InputStager {
    fn default() -> Self {
        Self::new()
    }
}
