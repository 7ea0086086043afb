//! LM-63 file reader.
//!
//! The file is read into memory and fed line by line through an explicit
//! state machine:
//!
//! ```text
//! Header ─TILT=─▶ [TiltData] ─▶ FieldRows ─▶ VerticalAngles ─▶ HorizontalAngles ─▶ CandelaGrid ─▶ Done
//! ```
//!
//! Parsing stops as soon as the last horizontal sweep of the candela grid is
//! complete; anything after it is never looked at.

use std::collections::VecDeque;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use ies_model::field::{NUM_HORIZONTAL_ANGLES, NUM_VERTICAL_ANGLES};
use ies_model::{IesDocument, Keyword, Tilt};
use tracing::{debug, debug_span, warn};

use crate::error::{Axis, Lm63Error, Result};
use crate::options::Lm63ReaderOptions;
use crate::rows::{parse_candela_row, parse_field_row, parse_real_row};
use crate::tokenizer::is_blank_line;

/// Required first line of every accepted file.
pub const SIGNATURE: &str = "IESNA:LM-63-2002";

const TILT_PREFIX: &str = "TILT=";

/// LM-63 file reader.
pub struct Lm63Reader<R: Read> {
    reader: R,
    options: Lm63ReaderOptions,
    filename: Option<String>,
}

impl<R: Read> Lm63Reader<R> {
    /// Create a new LM-63 reader.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, Lm63ReaderOptions::default())
    }

    /// Create a new LM-63 reader with options.
    pub fn with_options(reader: R, options: Lm63ReaderOptions) -> Self {
        Self {
            reader,
            options,
            filename: None,
        }
    }

    /// Record the file name on the parsed document.
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Read the whole input and parse it into a document.
    ///
    /// Bytes that are not valid UTF-8 (Latin-1 copyright signs are common in
    /// keyword values) are replaced rather than rejected.
    pub fn read_document(mut self) -> Result<IesDocument> {
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data)?;
        let text = String::from_utf8_lossy(&data);
        let mut document = parse_ies_str_with_options(&text, &self.options)?;
        document.filename = self.filename;
        Ok(document)
    }
}

impl Lm63Reader<File> {
    /// Open an LM-63 file for reading.
    ///
    /// A leading `~` is expanded to the home directory.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_options(path, Lm63ReaderOptions::default())
    }

    /// Open an LM-63 file with options.
    pub fn open_with_options(path: &Path, options: Lm63ReaderOptions) -> Result<Self> {
        let path = expand_home(path);
        let file = File::open(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Lm63Error::FileNotFound { path: path.clone() }
            } else {
                Lm63Error::Io(e)
            }
        })?;
        Ok(Self::with_options(file, options).with_filename(path.display().to_string()))
    }
}

/// Read an LM-63 file from a path.
pub fn read_ies(path: impl AsRef<Path>) -> Result<IesDocument> {
    read_ies_with_options(path, Lm63ReaderOptions::default())
}

/// Read an LM-63 file with options.
pub fn read_ies_with_options(
    path: impl AsRef<Path>,
    options: Lm63ReaderOptions,
) -> Result<IesDocument> {
    let path = path.as_ref();
    let _span = debug_span!("read_ies", path = %path.display()).entered();
    Lm63Reader::open_with_options(path, options)?.read_document()
}

/// Parse LM-63 text already in memory.
pub fn parse_ies_str(text: &str) -> Result<IesDocument> {
    parse_ies_str_with_options(text, &Lm63ReaderOptions::default())
}

/// Parse LM-63 text with options.
pub fn parse_ies_str_with_options(text: &str, options: &Lm63ReaderOptions) -> Result<IesDocument> {
    let mut parser = Lm63Parser::new(options);
    for (index, line) in text.lines().enumerate() {
        if let Err(error) = parser.feed(index, line) {
            warn!(line = index + 1, %error, "rejecting LM-63 input");
            return Err(error);
        }
        if parser.is_done() {
            break;
        }
    }
    parser.finish().inspect_err(|error| {
        warn!(%error, "LM-63 input ended early");
    })
}

/// Expand a leading `~` to the value of `HOME`.
///
/// Other paths, and every path when `HOME` is unset, are returned unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    let Some(text) = path.to_str() else {
        return path.to_path_buf();
    };
    let rest = match text.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => &rest[1..],
        _ => return path.to_path_buf(),
    };
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(rest),
        None => path.to_path_buf(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Header,
    TiltData { remaining: usize },
    FieldRows { row: usize },
    VerticalAngles,
    HorizontalAngles,
    CandelaGrid,
    Done,
}

impl ParseState {
    fn name(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::TiltData { .. } => "tilt data",
            Self::FieldRows { .. } => "field rows",
            Self::VerticalAngles => "vertical angles",
            Self::HorizontalAngles => "horizontal angles",
            Self::CandelaGrid => "candela grid",
            Self::Done => "done",
        }
    }
}

/// Accumulators for one parse. Dropped with the partial document on failure.
struct Lm63Parser<'a> {
    options: &'a Lm63ReaderOptions,
    document: IesDocument,
    state: ParseState,
    lines_seen: usize,
    expected_vertical: usize,
    expected_horizontal: usize,
    vertical: Vec<f64>,
    horizontal: Vec<f64>,
    pending_vertical: VecDeque<f64>,
    pending_horizontal: VecDeque<f64>,
}

impl<'a> Lm63Parser<'a> {
    fn new(options: &'a Lm63ReaderOptions) -> Self {
        Self {
            options,
            document: IesDocument::new(),
            state: ParseState::Header,
            lines_seen: 0,
            expected_vertical: 0,
            expected_horizontal: 0,
            vertical: Vec::new(),
            horizontal: Vec::new(),
            pending_vertical: VecDeque::new(),
            pending_horizontal: VecDeque::new(),
        }
    }

    fn is_done(&self) -> bool {
        self.state == ParseState::Done
    }

    fn transition(&mut self, next: ParseState, line: usize) {
        debug!(
            line,
            from = self.state.name(),
            to = next.name(),
            "LM-63 state transition"
        );
        self.state = next;
    }

    /// Feed the line at 0-based `index`.
    fn feed(&mut self, index: usize, text: &str) -> Result<()> {
        self.lines_seen += 1;
        let line = index + 1;
        match self.state {
            ParseState::Header => self.header_line(index, text),
            ParseState::TiltData { remaining } => {
                if let Some(Tilt::Include { lines }) = self.document.tilt.as_mut() {
                    lines.push(text.to_string());
                }
                let next = match remaining - 1 {
                    0 => ParseState::FieldRows { row: 0 },
                    remaining => ParseState::TiltData { remaining },
                };
                self.transition(next, line);
                Ok(())
            }
            ParseState::Done => Ok(()),
            _ if self.options.skip_blank_lines && is_blank_line(text) => Ok(()),
            ParseState::FieldRows { row } => self.field_row(row, text, line),
            ParseState::VerticalAngles => self.angle_row(Axis::Vertical, text, line),
            ParseState::HorizontalAngles => self.angle_row(Axis::Horizontal, text, line),
            ParseState::CandelaGrid => self.candela_row(text, line),
        }
    }

    fn header_line(&mut self, index: usize, text: &str) -> Result<()> {
        if index == 0 {
            if text.trim_start_matches('\u{feff}').trim_end() != SIGNATURE {
                return Err(Lm63Error::InvalidSignature {
                    expected: SIGNATURE,
                    found: text.to_string(),
                });
            }
            return Ok(());
        }
        if text.starts_with('[') {
            let keyword =
                Keyword::from_line(text).map_err(|error| Lm63Error::at_line(index + 1, error))?;
            self.document.add_keyword(keyword);
        } else if let Some(directive) = text.strip_prefix(TILT_PREFIX) {
            let tilt = Tilt::from_directive(directive);
            let next = if tilt.is_include() && self.options.tilt_include_lines > 0 {
                ParseState::TiltData {
                    remaining: self.options.tilt_include_lines,
                }
            } else {
                ParseState::FieldRows { row: 0 }
            };
            debug!(
                keywords = self.document.keyword_count(),
                tilt = tilt.directive(),
                "LM-63 header complete"
            );
            self.document.tilt = Some(tilt);
            self.transition(next, index + 1);
        }
        Ok(())
    }

    fn field_row(&mut self, row: usize, text: &str, line: usize) -> Result<()> {
        let fields = parse_field_row(text, row, line)?;
        self.document.extend_fields(fields);
        if row == 0 {
            self.transition(ParseState::FieldRows { row: 1 }, line);
            return Ok(());
        }
        self.expected_vertical = self.declared_count(NUM_VERTICAL_ANGLES)?;
        self.expected_horizontal = self.declared_count(NUM_HORIZONTAL_ANGLES)?;
        self.transition(ParseState::VerticalAngles, line);
        self.skip_completed_sections(line);
        Ok(())
    }

    fn declared_count(&self, name: &'static str) -> Result<usize> {
        let field = self.document.get_field(name)?;
        field.value.as_count().ok_or_else(|| Lm63Error::InvalidCount {
            name,
            value: field.value.to_string(),
        })
    }

    /// Accumulate one line of angles for `axis`.
    ///
    /// Overflow is checked per line: a section that is short by whole lines
    /// borrows the following lines until its count is met, so a file whose
    /// vertical list is one line short only fails if the borrowed lines
    /// overflow a later section.
    fn angle_row(&mut self, axis: Axis, text: &str, line: usize) -> Result<()> {
        let angles = parse_real_row(text, line)?;
        let (list, expected) = match axis {
            Axis::Vertical => (&mut self.vertical, self.expected_vertical),
            Axis::Horizontal => (&mut self.horizontal, self.expected_horizontal),
        };
        let actual = list.len() + angles.len();
        if actual > expected {
            return Err(Lm63Error::AngleCountMismatch {
                line,
                axis,
                expected,
                actual,
            });
        }
        for angle in angles {
            if list.contains(&angle) {
                return Err(Lm63Error::DuplicateAngle { line, axis, angle });
            }
            list.push(angle);
        }
        self.skip_completed_sections(line);
        Ok(())
    }

    /// Advance past angle sections whose declared count is already met,
    /// including sections declared empty.
    fn skip_completed_sections(&mut self, line: usize) {
        if self.state == ParseState::VerticalAngles && self.vertical.len() == self.expected_vertical
        {
            self.transition(ParseState::HorizontalAngles, line);
        }
        if self.state == ParseState::HorizontalAngles
            && self.horizontal.len() == self.expected_horizontal
        {
            if self.vertical.is_empty() || self.horizontal.is_empty() {
                self.transition(ParseState::Done, line);
            } else {
                self.pending_horizontal = self.horizontal.iter().copied().collect();
                self.transition(ParseState::CandelaGrid, line);
            }
        }
    }

    fn candela_row(&mut self, text: &str, line: usize) -> Result<()> {
        let Some(&horizontal) = self.pending_horizontal.front() else {
            self.transition(ParseState::Done, line);
            return Ok(());
        };
        if self.pending_vertical.is_empty() {
            self.pending_vertical.extend(self.vertical.iter().copied());
        }
        let values = parse_candela_row(text, horizontal, &mut self.pending_vertical, line)?;
        for value in values {
            self.document.add_candela_value(value);
        }
        if self.pending_vertical.is_empty() {
            self.pending_horizontal.pop_front();
        }
        if self.pending_horizontal.is_empty() {
            debug!(
                vertical = self.vertical.len(),
                horizontal = self.horizontal.len(),
                values = self.document.candela_count(),
                "LM-63 candela grid complete"
            );
            self.transition(ParseState::Done, line);
        }
        Ok(())
    }

    fn finish(self) -> Result<IesDocument> {
        let (expected, actual) = match self.state {
            ParseState::Done => return Ok(self.document),
            ParseState::Header if self.lines_seen == 0 => {
                return Err(Lm63Error::InvalidSignature {
                    expected: SIGNATURE,
                    found: String::new(),
                });
            }
            ParseState::Header => (1, 0),
            ParseState::TiltData { remaining } => (
                self.options.tilt_include_lines,
                self.options.tilt_include_lines - remaining,
            ),
            ParseState::FieldRows { row } => (2, row),
            ParseState::VerticalAngles => (self.expected_vertical, self.vertical.len()),
            ParseState::HorizontalAngles => (self.expected_horizontal, self.horizontal.len()),
            ParseState::CandelaGrid => (
                self.expected_vertical * self.expected_horizontal,
                self.document.candela_count(),
            ),
        };
        Err(Lm63Error::UnexpectedEof {
            section: self.state.name(),
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "IESNA:LM-63-2002\n\
                           [TEST]unit\n\
                           TILT=NONE\n\
                           1 -1 1.0 2 1 1 1 0.0 0.0 0.0\n\
                           1.0 1 10.0\n\
                           0 90\n\
                           0\n\
                           100 50\n";

    #[test]
    fn parses_minimal_file() {
        let document = parse_ies_str(MINIMAL).unwrap();
        assert_eq!(document.keyword_count(), 1);
        assert_eq!(document.field_count(), 13);
        assert_eq!(document.candela_count(), 2);
        assert_eq!(document.tilt, Some(Tilt::None));
        assert_eq!(document.candela_at(90.0, 0.0).map(|c| c.value), Some(50.0));
    }

    #[test]
    fn empty_input_is_a_format_error() {
        let err = parse_ies_str("").unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn missing_tilt_reports_header() {
        let err = parse_ies_str("IESNA:LM-63-2002\n[TEST]x\n").unwrap_err();
        assert!(matches!(
            err,
            Lm63Error::UnexpectedEof {
                section: "header",
                ..
            }
        ));
    }

    #[test]
    fn zero_angles_yield_an_empty_grid() {
        let text = "IESNA:LM-63-2002\nTILT=NONE\n1 -1 1.0 0 0 1 1 0 0 0\n1.0 1 10.0\n";
        let document = parse_ies_str(text).unwrap();
        assert_eq!(document.candela_count(), 0);
    }

    #[test]
    fn expands_home_prefix() {
        let Some(home) = std::env::var_os("HOME") else {
            return;
        };
        assert_eq!(
            expand_home(Path::new("~/lights/a.ies")),
            PathBuf::from(&home).join("lights/a.ies")
        );
        assert_eq!(expand_home(Path::new("~")), PathBuf::from(&home));
        assert_eq!(
            expand_home(Path::new("/tmp/~a.ies")),
            PathBuf::from("/tmp/~a.ies")
        );
        assert_eq!(expand_home(Path::new("~other/a.ies")), PathBuf::from("~other/a.ies"));
    }
}
