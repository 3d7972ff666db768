//! Byte-level cleanup of raw report text.
//!
//! Reports are typed in by hand and arrive with every sort of line ending,
//! mixed case and stray whitespace. Everything downstream assumes the
//! output of [`normalize`]: valid UTF-8, `\n` line endings, lower case, and
//! spaces compressed around delimiters.

use serde::Deserialize;

/// Characters that swallow any adjacent run of spaces.
const DELIMITERS: &[char] = &['\n', ',', '(', ')', '\\', ':'];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Replace control and non-ASCII characters with spaces.
    pub scrub_non_printable: bool,
}

pub fn normalize(input: &[u8], options: &NormalizeOptions) -> String {
    let text = String::from_utf8_lossy(input);
    let mut text = normalize_line_endings(&text);
    text.make_ascii_lowercase();
    let text = compress_spaces(&text);
    if !options.scrub_non_printable {
        return text;
    }
    let scrubbed: String = text
        .chars()
        .map(|c| if is_printable(c) { c } else { ' ' })
        .collect();
    if scrubbed == text {
        text
    } else {
        compress_spaces(&scrubbed)
    }
}

/// CRLF, bare CR and LF all become `\n`. A run of CRs, optionally followed
/// by a single LF, is one line terminator.
pub fn normalize_line_endings(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\r' {
            out.push(c);
            continue;
        }
        while chars.peek() == Some(&'\r') {
            chars.next();
        }
        if chars.peek() == Some(&'\n') {
            chars.next();
        }
        out.push('\n');
    }
    out
}

/// Collapse runs of spaces and tabs to one space, or drop the run entirely
/// when it touches a delimiter or either end of the text.
pub fn compress_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != ' ' && c != '\t' {
            out.push(c);
            continue;
        }
        while matches!(chars.peek(), Some(' ') | Some('\t')) {
            chars.next();
        }
        let after_delimiter = out.chars().last().map_or(true, |p| DELIMITERS.contains(&p));
        let before_delimiter = chars.peek().map_or(true, |n| DELIMITERS.contains(n));
        if !after_delimiter && !before_delimiter {
            out.push(' ');
        }
    }
    out
}

fn is_printable(c: char) -> bool {
    c == '\n' || ('!'..='~').contains(&c) || c == ' '
}

/// Split normalized text into lines without their terminators.
pub fn lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(s: &str) -> String {
        normalize(s.as_bytes(), &NormalizeOptions::default())
    }

    #[test]
    fn compresses_spaces_around_delimiters() {
        assert_eq!(
            norm("tribe   0987 ,  ( status )."),
            "tribe 0987,(status)."
        );
        assert_eq!(norm("  leading and trailing  "), "leading and trailing");
        assert_eq!(norm("a\t\t b"), "a b");
        assert_eq!(norm("scout 1 : scout"), "scout 1:scout");
    }

    #[test]
    fn folds_case() {
        assert_eq!(norm("Tribe 0987, Current Hex = AB 1013"), "tribe 0987,current hex = ab 1013");
    }

    #[test]
    fn unifies_line_endings() {
        assert_eq!(norm("a\r\nb\rc\nd"), "a\nb\nc\nd");
        assert_eq!(norm("a\r\r\nb"), "a\nb");
        assert_eq!(norm("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn replaces_invalid_utf8() {
        let out = normalize(b"ab\xff cd", &NormalizeOptions::default());
        assert_eq!(out, "ab\u{fffd} cd");
    }

    #[test]
    fn scrub_replaces_non_printable_and_recompresses() {
        let opts = NormalizeOptions {
            scrub_non_printable: true,
        };
        assert_eq!(normalize(b"ab\xff cd", &opts), "ab cd");
        assert_eq!(normalize("x\u{7}, y".as_bytes(), &opts), "x,y");
    }

    #[test]
    fn normalize_is_idempotent_on_samples() {
        for s in [
            "Tribe 0987 , , Current Hex = AB 1013 , ( Previous Hex = N/A )\r\n",
            " \t\r\r\n ",
            "scout 1:scout n-pr ,  \\ nothing of interest found",
        ] {
            let once = norm(s);
            assert_eq!(norm(&once), once, "input {:?}", s);
        }
    }
}
