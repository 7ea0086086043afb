//! Reader options.

/// Number of lines following `TILT=INCLUDE` that hold the tilt table.
pub const DEFAULT_TILT_INCLUDE_LINES: usize = 4;

/// Options for reading LM-63 files.
#[derive(Debug, Clone)]
pub struct Lm63ReaderOptions {
    /// Lines skipped after `TILT=INCLUDE` before the field rows (default: 4).
    pub tilt_include_lines: usize,
    /// Skip blank lines inside the numeric sections (default: true).
    pub skip_blank_lines: bool,
}

impl Default for Lm63ReaderOptions {
    fn default() -> Self {
        Self {
            tilt_include_lines: DEFAULT_TILT_INCLUDE_LINES,
            skip_blank_lines: true,
        }
    }
}

impl Lm63ReaderOptions {
    /// Create reader options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_tilt_include_lines(mut self, lines: usize) -> Self {
        self.tilt_include_lines = lines;
        self
    }

    /// Treat blank lines in the numeric sections as malformed rows.
    #[must_use]
    pub fn strict_blank_lines(mut self) -> Self {
        self.skip_blank_lines = false;
        self
    }
}
