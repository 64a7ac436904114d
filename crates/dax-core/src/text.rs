//! Lexical helpers shared by both dialect parsers.
//!
//! Every scanner here treats text inside `'...'`, `"..."` and `[...]` as
//! opaque, so commas, parentheses and keywords inside literals or bracketed
//! column names never act as structure.

use std::str::CharIndices;

/// True for characters that may appear inside an identifier
pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True for characters that may start an identifier
pub fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// True when `text` is a plain identifier (`[A-Za-z_][A-Za-z0-9_]*`)
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if is_ident_start(first) => chars.all(is_ident_char),
        _ => false,
    }
}

/// Iterator over the characters of a text that sit outside literals and
/// bracketed names, paired with the parenthesis depth they occur at.
///
/// An opening parenthesis reports the depth outside it; a closing one reports
/// the depth after it closes, so matching pairs report the same depth.
pub struct StructuralChars<'a> {
    chars: CharIndices<'a>,
    quote: Option<char>,
    in_bracket: bool,
    depth: i32,
}

impl<'a> StructuralChars<'a> {
    /// Start scanning a text at depth zero
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.char_indices(),
            quote: None,
            in_bracket: false,
            depth: 0,
        }
    }
}

impl Iterator for StructuralChars<'_> {
    type Item = (usize, char, i32);

    fn next(&mut self) -> Option<Self::Item> {
        for (idx, ch) in self.chars.by_ref() {
            if let Some(quote) = self.quote {
                if ch == quote {
                    self.quote = None;
                }
                continue;
            }
            if self.in_bracket {
                if ch == ']' {
                    self.in_bracket = false;
                }
                continue;
            }
            match ch {
                '\'' | '"' => self.quote = Some(ch),
                '[' => self.in_bracket = true,
                '(' => {
                    let depth = self.depth;
                    self.depth += 1;
                    return Some((idx, ch, depth));
                }
                ')' => {
                    self.depth -= 1;
                    return Some((idx, ch, self.depth));
                }
                _ => return Some((idx, ch, self.depth)),
            }
        }
        None
    }
}

/// Net parenthesis balance of a text and the lowest depth reached.
///
/// A negative minimum means a closing parenthesis appeared before its opener.
pub fn paren_balance(text: &str) -> (i32, i32) {
    let mut depth = 0;
    let mut lowest = 0;
    for (_, ch, _) in StructuralChars::new(text) {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                lowest = lowest.min(depth);
            }
            _ => {}
        }
    }
    (depth, lowest)
}

/// Split on a separator that occurs at parenthesis depth zero.
///
/// Pieces are trimmed; empty pieces are kept so callers can detect
/// positional gaps such as `If(a,,b)`.
pub fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (idx, ch, depth) in StructuralChars::new(text) {
        if ch == separator && depth == 0 {
            pieces.push(text[start..idx].trim());
            start = idx + ch.len_utf8();
        }
    }
    pieces.push(text[start..].trim());
    pieces
}

/// Byte index of the parenthesis closing the one at `open`
pub fn closing_paren(text: &str, open: usize) -> Option<usize> {
    let tail = text.get(open..)?;
    if !tail.starts_with('(') {
        return None;
    }
    StructuralChars::new(tail)
        .skip(1)
        .find(|&(_, ch, depth)| ch == ')' && depth == 0)
        .map(|(idx, _, _)| open + idx)
}

/// A function call found in a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call<'a> {
    /// Function name as written
    pub name: &'a str,
    /// Byte index where the name starts
    pub start: usize,
    /// Byte index of the opening parenthesis
    pub open: usize,
    /// Byte index of the closing parenthesis, if balanced
    pub close: Option<usize>,
}

impl<'a> Call<'a> {
    /// Argument text between the parentheses (to the end when unbalanced)
    pub fn arguments(&self, text: &'a str) -> &'a str {
        let end = self.close.unwrap_or(text.len());
        text[self.open + 1..end].trim()
    }

    /// Byte index just past the call
    pub fn end(&self, text: &str) -> usize {
        self.close.map(|c| c + 1).unwrap_or(text.len())
    }
}

/// Find every `identifier(` call outside literals and bracketed names, in
/// source order (outer calls before the calls nested in their arguments).
pub fn find_calls(text: &str) -> Vec<Call<'_>> {
    let mut calls = Vec::new();
    let mut skip_until = 0;
    for (idx, ch, _) in StructuralChars::new(text) {
        if idx < skip_until || !is_ident_start(ch) || preceded_by_ident(text, idx) {
            continue;
        }
        let word_end = word_end(text, idx);
        skip_until = word_end;
        let after = skip_whitespace(text, word_end);
        if text[after..].starts_with('(') {
            calls.push(Call {
                name: &text[idx..word_end],
                start: idx,
                open: after,
                close: closing_paren(text, after),
            });
        }
    }
    calls
}

/// A keyword located in a text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordMatch {
    /// Keyword as listed by the caller (e.g. `"GROUP BY"`)
    pub keyword: &'static str,
    /// Byte index of the first character
    pub start: usize,
    /// Byte index just past the last word of the keyword
    pub end: usize,
}

/// Locate whole-word, case-insensitive keywords at parenthesis depth zero.
///
/// Multi-word keywords (`"GROUP BY"`) match across any run of whitespace.
/// When several keywords start at the same word, the first listed wins.
pub fn find_keywords(text: &str, keywords: &[&'static str]) -> Vec<KeywordMatch> {
    scan_keywords(text, keywords, true)
}

/// Like [`find_keywords`], but at any parenthesis depth
pub fn find_words(text: &str, keywords: &[&'static str]) -> Vec<KeywordMatch> {
    scan_keywords(text, keywords, false)
}

fn scan_keywords(text: &str, keywords: &[&'static str], top_level: bool) -> Vec<KeywordMatch> {
    let mut found = Vec::new();
    let mut skip_until = 0;
    for (idx, ch, depth) in StructuralChars::new(text) {
        if idx < skip_until || !is_ident_start(ch) || preceded_by_ident(text, idx) {
            continue;
        }
        let first_end = word_end(text, idx);
        skip_until = first_end;
        if top_level && depth != 0 {
            continue;
        }
        for keyword in keywords {
            if let Some(end) = match_words(text, idx, keyword) {
                found.push(KeywordMatch {
                    keyword,
                    start: idx,
                    end,
                });
                skip_until = end;
                break;
            }
        }
    }
    found
}

/// True when a whole-word keyword occurs anywhere outside literals and
/// bracketed names, at any depth
pub fn contains_word(text: &str, word: &str) -> bool {
    let mut skip_until = 0;
    for (idx, ch, _) in StructuralChars::new(text) {
        if idx < skip_until || !is_ident_start(ch) || preceded_by_ident(text, idx) {
            continue;
        }
        let end = word_end(text, idx);
        skip_until = end;
        if text[idx..end].eq_ignore_ascii_case(word) {
            return true;
        }
    }
    false
}

fn match_words(text: &str, start: usize, keyword: &str) -> Option<usize> {
    let mut pos = start;
    for (i, word) in keyword.split_whitespace().enumerate() {
        if i > 0 {
            let next = skip_whitespace(text, pos);
            if next == pos {
                return None;
            }
            pos = next;
        }
        let end = word_end(text, pos);
        if !text[pos..end].eq_ignore_ascii_case(word) {
            return None;
        }
        pos = end;
    }
    Some(pos)
}

fn word_end(text: &str, start: usize) -> usize {
    text[start..]
        .char_indices()
        .find(|&(_, c)| !is_ident_char(c))
        .map(|(i, _)| start + i)
        .unwrap_or(text.len())
}

fn skip_whitespace(text: &str, start: usize) -> usize {
    text[start..]
        .char_indices()
        .find(|&(_, c)| !c.is_whitespace())
        .map(|(i, _)| start + i)
        .unwrap_or(text.len())
}

fn preceded_by_ident(text: &str, idx: usize) -> bool {
    text[..idx].chars().next_back().is_some_and(is_ident_char)
}

/// Remove one pair of enclosing square brackets: `[Sales]` becomes `Sales`
pub fn unbracket(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .filter(|inner| !inner.contains(']'))
        .unwrap_or(trimmed)
}

#[cfg(test)]
#[path = "text_test.rs"]
mod tests;
