//! Reading JSON-with-comments, the dialect VS Code uses for its settings files.
//!
//! We don't need to round-trip comments: the settings merger rewrites the file
//! as plain JSON anyway. So rather than a full JSONC parser we reduce the text
//! to strict JSON and hand it to `serde_json`.

use std::iter::Peekable;
use std::str::Chars;

use serde_json::Value;

/// Parse JSONC text into a JSON value.
pub fn parse(text: &str) -> serde_json::Result<Value> {
    serde_json::from_str(&strip(text))
}

/// Reduce JSONC text to strict JSON.
///
/// Removes `//` line comments, `/* */` block comments, and trailing commas
/// before `}` or `]`. String literals are copied through untouched, so a `//`
/// inside a URL survives. Line comments keep their terminating newline so that
/// `serde_json` error positions still line up with the input text. A leading
/// byte order mark is dropped.
pub fn strip(text: &str) -> String {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                out.push(c);
                copy_string(&mut chars, &mut out);
            }
            '/' if chars.peek() == Some(&'/') => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push(c);
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                skip_block_comment(&mut chars, &mut out);
            }
            '}' | ']' => {
                drop_trailing_comma(&mut out);
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    out
}

/// Copy the rest of a string literal, including its closing quote.
fn copy_string(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    while let Some(c) = chars.next() {
        out.push(c);
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '"' => return,
            _ => {}
        }
    }
}

/// Skip to the end of a block comment.
///
/// Newlines inside the comment are kept for the same reason line comments keep
/// theirs; everything else becomes nothing.
fn skip_block_comment(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'/') => {
                chars.next();
                return;
            }
            '\n' => out.push(c),
            _ => {}
        }
    }
}

/// Remove a comma if it's the last non-whitespace character emitted so far and
/// it follows a value.
///
/// Only called outside of string literals, where the last emitted
/// non-whitespace character is always structural. A comma with no value before
/// it (`[,]`, `{,}`, `[1,,]`) is left for `serde_json` to reject.
fn drop_trailing_comma(out: &mut String) {
    let Some(before) = out.trim_end().strip_suffix(',') else {
        return;
    };
    let follows_value = before
        .trim_end()
        .chars()
        .next_back()
        .is_some_and(|c| !matches!(c, '[' | '{' | ','));
    if follows_value {
        out.remove(before.len());
    }
}
