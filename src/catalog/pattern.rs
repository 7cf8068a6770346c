//==================================================
// File: catalog/pattern.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Match source lines against catalog command patterns
// Objective: Split patterns into literal segments and placeholders, then bind
//            placeholders by sequential suffix and token scanning
//==================================================

use std::collections::HashMap;

use thiserror::Error;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

//==================================================
// Section 1.0 - Bindings
//==================================================

/// Placeholder name to the raw text captured from one matched line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: HashMap<String, String>,
}

impl Bindings {
    /// Bound text for `name`, or the empty string when the placeholder was
    /// left unbound by an early suffix stop.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn insert(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
    }
}

//==================================================
// Section 2.0 - Pattern
//==================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("placeholder opened at byte {0} is never closed")]
    Unterminated(usize),
    #[error("placeholder at byte {0} has no name")]
    EmptyName(usize),
}

/// A pattern of the form `L0 {{p1}} L1 ... {{pn}} Ln`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPattern {
    source: String,
    literals: Vec<String>,
    placeholders: Vec<String>,
}

impl CommandPattern {
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let mut literals = Vec::new();
        let mut placeholders = Vec::new();
        let mut rest = pattern;
        let mut offset = 0;

        while let Some(open) = rest.find(OPEN) {
            let after_open = &rest[open + OPEN.len()..];
            let close = after_open
                .find(CLOSE)
                .ok_or(PatternError::Unterminated(offset + open))?;
            let name = after_open[..close].trim();
            if name.is_empty() {
                return Err(PatternError::EmptyName(offset + open));
            }
            literals.push(rest[..open].to_string());
            placeholders.push(name.to_string());

            let consumed = open + OPEN.len() + close + CLOSE.len();
            offset += consumed;
            rest = &rest[consumed..];
        }
        literals.push(rest.to_string());

        Ok(Self {
            source: pattern.to_string(),
            literals,
            placeholders,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// True when two placeholders sit next to each other with no literal text
    /// between them. Such patterns cannot be split reliably.
    pub fn has_adjacent_placeholders(&self) -> bool {
        let last = self.literals.len() - 1;
        self.literals[1..last.max(1)].iter().any(String::is_empty)
    }

    /// Match a line against this pattern, comparing literals case-insensitively
    /// and keeping the line's casing in the bound text.
    pub fn match_line(&self, line: &str) -> Option<Bindings> {
        let line = line.trim();
        if self.placeholders.is_empty() {
            return eq_ci(line, self.source.trim()).then(Bindings::default);
        }

        let mut rest = strip_prefix_ci(line, &self.literals[0])?;
        let mut bindings = Bindings::default();

        for (idx, name) in self.placeholders.iter().enumerate() {
            let literal = &self.literals[idx + 1];

            if let Some(value) = strip_suffix_ci(rest, literal) {
                let value = value.trim();
                if value.is_empty() {
                    return None;
                }
                bindings.insert(name, value);
                return Some(bindings);
            }

            let separator = literal.trim();
            let (value, tail) = split_token(rest, separator)?;
            bindings.insert(name, value);
            rest = strip_prefix_ci(tail.trim_start(), separator)?.trim_start();
        }

        None
    }
}

//==================================================
// Section 3.0 - Case-insensitive helpers
//==================================================

fn chars_eq_ci(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn eq_ci(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count()
        && a.chars().zip(b.chars()).all(|(x, y)| chars_eq_ci(x, y))
}

fn strip_prefix_ci<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let mut chars = text.char_indices();
    for expected in prefix.chars() {
        let (_, actual) = chars.next()?;
        if !chars_eq_ci(actual, expected) {
            return None;
        }
    }
    let offset = chars.next().map(|(idx, _)| idx).unwrap_or(text.len());
    Some(&text[offset..])
}

fn strip_suffix_ci<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let mut chars = text.char_indices().rev();
    let mut cut = text.len();
    for expected in suffix.chars().rev() {
        let (idx, actual) = chars.next()?;
        if !chars_eq_ci(actual, expected) {
            return None;
        }
        cut = idx;
    }
    Some(&text[..cut])
}

fn find_ci(text: &str, needle: &str) -> Option<usize> {
    text.char_indices()
        .map(|(idx, _)| idx)
        .find(|&idx| strip_prefix_ci(&text[idx..], needle).is_some())
}

/// Split off the next token: text up to the first whitespace or the first
/// occurrence of `separator`, whichever comes first.
fn split_token<'a>(text: &'a str, separator: &str) -> Option<(&'a str, &'a str)> {
    let whitespace = text.find(char::is_whitespace);
    let literal = if separator.is_empty() {
        None
    } else {
        find_ci(text, separator)
    };
    let end = match (whitespace, literal) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) | (None, Some(a)) => a,
        (None, None) => text.len(),
    };
    let token = &text[..end];
    (!token.is_empty()).then_some((token, &text[end..]))
}

//==================================================
// Section 4.0 - Tests
//==================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(source: &str) -> CommandPattern {
        CommandPattern::parse(source).expect("valid pattern")
    }

    #[test]
    fn literal_pattern_matches_ignoring_case() {
        let memory = pattern("memory out");
        assert!(memory.match_line("  MEMORY Out ").is_some());
        assert!(memory.match_line("memory out now").is_none());
    }

    #[test]
    fn last_placeholder_takes_remainder_with_original_case() {
        let print = pattern("Print {{var}}");
        let bindings = print.match_line("print Hello World").expect("match");
        assert_eq!(bindings.get("var"), "Hello World");
        assert!(print.match_line("Print").is_none());
        assert!(print.match_line("Printer x").is_none());
    }

    #[test]
    fn middle_literals_are_consumed() {
        let guard = pattern("If {{var}} == {{value}} {");
        let bindings = guard.match_line("if Count == 5 {").expect("match");
        assert_eq!(bindings.get("var"), "Count");
        assert_eq!(bindings.get("value"), "5");
        assert!(guard.match_line("If count == 5").is_none());
        assert!(guard.match_line("If count 5 {").is_none());
    }

    #[test]
    fn token_stops_at_separator_without_whitespace() {
        let range = pattern("for {{var}} in [{{start}},{{end}}] {");
        let bindings = range.match_line("for i in [1,3] {").expect("match");
        assert_eq!(bindings.get("var"), "i");
        assert_eq!(bindings.get("start"), "1");
        assert_eq!(bindings.get("end"), "3");

        let spaced = range.match_line("for i in [ -2 , 4 ] {").expect("match");
        assert_eq!(spaced.get("start"), "-2");
        assert_eq!(spaced.get("end"), "4");
    }

    #[test]
    fn whitespace_separated_placeholders() {
        let substr = pattern("substr {{var}} {{start}} {{length}}");
        let bindings = substr.match_line("substr name 1 3").expect("match");
        assert_eq!(bindings.get("var"), "name");
        assert_eq!(bindings.get("start"), "1");
        assert_eq!(bindings.get("length"), "3");
    }

    #[test]
    fn word_literals_split_tokens() {
        let movement = pattern("move {{from}} to {{to}}");
        let both = movement.match_line("move a to b").expect("match");
        assert_eq!(both.get("from"), "a");
        assert_eq!(both.get("to"), "b");
    }

    #[test]
    fn suffix_stop_leaves_later_placeholders_unbound() {
        let dotted = pattern("{{a}}.{{b}}.");
        let early = dotted.match_line("x.").expect("match");
        assert_eq!(early.get("a"), "x");
        assert!(!early.contains("b"));

        let greedy = dotted.match_line("x.y.").expect("match");
        assert_eq!(greedy.get("a"), "x.y");
        assert_eq!(greedy.len(), 1);
    }

    #[test]
    fn malformed_patterns_are_rejected() {
        assert_eq!(
            CommandPattern::parse("Print {{var"),
            Err(PatternError::Unterminated(6))
        );
        assert_eq!(
            CommandPattern::parse("Print {{ }}"),
            Err(PatternError::EmptyName(6))
        );
    }

    #[test]
    fn adjacent_placeholders_are_flagged() {
        assert!(pattern("pair {{a}}{{b}}").has_adjacent_placeholders());
        assert!(!pattern("pow {{base}} {{exponent}}").has_adjacent_placeholders());
        assert!(!pattern("Print {{var}}").has_adjacent_placeholders());
    }
}

//==================================================
// End of file
//==================================================
