//! Line tokenizer for the numeric sections.
//!
//! LM-63 files separate values with commas, semicolons or spaces, freely
//! mixed. All three are mapped to one internal separator before splitting.

/// Delimiters accepted between values, replaced in this order.
pub const DELIMITERS: [char; 3] = [',', ';', ' '];

/// Internal separator every delimiter is normalized to.
const SEPARATOR: char = '\t';

/// Split a line into its value tokens.
///
/// Runs of delimiters collapse, so column-aligned rows tokenize cleanly. A
/// line without any token yields a single empty string; callers that accept
/// blank lines must check for it.
pub fn split_line(line: &str) -> Vec<String> {
    let mut normalized = line.to_string();
    for delimiter in DELIMITERS {
        normalized = normalized.replace(delimiter, "\t");
    }
    let tokens: Vec<String> = normalized
        .trim_matches(SEPARATOR)
        .split(SEPARATOR)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();
    if tokens.is_empty() {
        vec![String::new()]
    } else {
        tokens
    }
}

/// True when [`split_line`] would find no value on this line.
pub fn is_blank_line(line: &str) -> bool {
    line.chars()
        .all(|ch| ch == SEPARATOR || DELIMITERS.contains(&ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_every_delimiter() {
        assert_eq!(split_line("1,2;3 4"), ["1", "2", "3", "4"]);
    }

    #[test]
    fn empty_line_yields_one_empty_token() {
        assert_eq!(split_line(""), [""]);
        assert_eq!(split_line(" , ;"), [""]);
        assert!(is_blank_line(""));
        assert!(is_blank_line(" , ;\t"));
    }

    #[test]
    fn collapses_runs_and_strips_edges() {
        assert_eq!(split_line("   0.0    5.0 ,10.0  "), ["0.0", "5.0", "10.0"]);
        assert_eq!(split_line("1\t2"), ["1", "2"]);
    }

    #[test]
    fn single_token() {
        let tokens = split_line("42");
        assert_eq!(tokens, ["42"]);
        assert!(!is_blank_line("42"));
    }
}
