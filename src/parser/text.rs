//! Tokenizing decoder for the formatted (text) encoding

use crate::error::{EclError, Result};
use std::borrow::Cow;

/// Read position into an in-memory text buffer
#[derive(Debug, Clone)]
pub struct TextCursor<'a> {
    buf: &'a str,
    pos: usize,
}

impl<'a> TextCursor<'a> {
    pub fn new(buf: &'a str) -> Self {
        Self { buf, pos: 0 }
    }

    /// Cursor starting at a byte offset (e.g. one taken from an index)
    pub fn at(buf: &'a str, pos: usize) -> Self {
        let mut pos = pos.min(buf.len());
        while !buf.is_char_boundary(pos) {
            pos -= 1;
        }
        Self { buf, pos }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Whether only whitespace is left
    pub fn is_exhausted(&self) -> bool {
        self.buf[self.pos..].trim_start().is_empty()
    }

    /// Consume the rest of the current line, without its line ending
    pub(crate) fn next_line(&mut self) -> Option<&'a str> {
        if self.pos >= self.buf.len() {
            return None;
        }
        let rest = &self.buf[self.pos..];
        let (line, consumed) = match rest.find('\n') {
            Some(end) => (&rest[..end], end + 1),
            None => (rest, rest.len()),
        };
        self.pos += consumed;
        Some(line.strip_suffix('\r').unwrap_or(line))
    }

    /// Next whitespace-delimited token
    fn next_token(&mut self) -> Option<&'a str> {
        let bytes = self.buf.as_bytes();
        let start = self.pos + bytes[self.pos..].iter().position(|b| !b.is_ascii_whitespace())?;
        let end = bytes[start..]
            .iter()
            .position(u8::is_ascii_whitespace)
            .map_or(bytes.len(), |n| start + n);
        self.pos = end;
        Some(&self.buf[start..end])
    }
}

/// Parses one text token into a value of its declared kind
pub trait TokenParser {
    type Output;

    fn parse_token(&self, token: &str) -> Result<Self::Output>;
}

/// `INTE` tokens
pub struct IntToken;

impl TokenParser for IntToken {
    type Output = i32;

    fn parse_token(&self, token: &str) -> Result<i32> {
        token.parse().map_err(|_| EclError::token(token, "INTE"))
    }
}

/// `REAL` tokens, parsed wide and narrowed so out-of-range magnitudes
/// saturate instead of failing
pub struct RealToken;

impl TokenParser for RealToken {
    type Output = f32;

    fn parse_token(&self, token: &str) -> Result<f32> {
        let wide: f64 = token.parse().map_err(|_| EclError::token(token, "REAL"))?;
        Ok(wide as f32)
    }
}

/// `DOUB` tokens, accepting `D` exponents and the compact `1.5-100` form
pub struct DoubToken;

impl TokenParser for DoubToken {
    type Output = f64;

    fn parse_token(&self, token: &str) -> Result<f64> {
        fortran_exponent(token)
            .parse()
            .map_err(|_| EclError::token(token, "DOUB"))
    }
}

/// `LOGI` tokens: `T...` or `F...`
pub struct LogiToken;

impl TokenParser for LogiToken {
    type Output = bool;

    fn parse_token(&self, token: &str) -> Result<bool> {
        match token.as_bytes().first() {
            Some(b'T') => Ok(true),
            Some(b'F') => Ok(false),
            _ => Err(EclError::token(token, "LOGI")),
        }
    }
}

/// Tokens kept verbatim
pub struct RawToken;

impl TokenParser for RawToken {
    type Output = String;

    fn parse_token(&self, token: &str) -> Result<String> {
        Ok(token.to_string())
    }
}

/// Rewrite a legacy double literal into a form `f64::from_str` accepts
fn fortran_exponent(token: &str) -> Cow<'_, str> {
    if let Some(p) = token.find(['D', 'd']) {
        let mut fixed = token.to_string();
        fixed.replace_range(p..p + 1, "E");
        return Cow::Owned(fixed);
    }
    if token.contains(['E', 'e']) {
        return Cow::Borrowed(token);
    }
    match token.get(1..).and_then(|tail| tail.find(['+', '-'])) {
        Some(p) => {
            let mut fixed = token.to_string();
            fixed.insert(p + 1, 'E');
            Cow::Owned(fixed)
        }
        None => Cow::Borrowed(token),
    }
}

/// Decode `count` whitespace-delimited tokens
pub fn decode_tokens<P: TokenParser>(
    cursor: &mut TextCursor<'_>,
    count: u64,
    parser: &P,
) -> Result<Vec<P::Output>> {
    let mut values = Vec::with_capacity(count.min(1 << 20) as usize);
    for _ in 0..count {
        let token = cursor
            .next_token()
            .ok_or_else(|| EclError::token("", "array element"))?;
        values.push(parser.parse_token(token)?);
    }
    Ok(values)
}

/// Decode `count` numeric tokens as their literal text
pub fn decode_text_raw(cursor: &mut TextCursor<'_>, count: u64) -> Result<Vec<String>> {
    decode_tokens(cursor, count, &RawToken)
}

/// Decode `count` logical tokens
pub fn decode_text_logicals(cursor: &mut TextCursor<'_>, count: u64) -> Result<Vec<bool>> {
    decode_tokens(cursor, count, &LogiToken)
}

/// Decode `count` quoted character fields of `width` characters.
///
/// An all-space field decodes to the empty string; otherwise trailing spaces
/// are removed.
pub fn decode_text_strings(
    cursor: &mut TextCursor<'_>,
    count: u64,
    width: usize,
) -> Result<Vec<String>> {
    let mut values = Vec::with_capacity(count.min(1 << 20) as usize);
    for _ in 0..count {
        let rest = &cursor.buf[cursor.pos..];
        let quote = rest
            .find('\'')
            .map(|q| cursor.pos + q)
            .ok_or_else(|| EclError::token(rest.trim(), "character field"))?;

        let field = cursor
            .buf
            .get(quote + 1..quote + 1 + width)
            .ok_or_else(|| {
                let tail = &cursor.buf[quote..];
                let mut cut = tail.len().min(width + 1);
                while !tail.is_char_boundary(cut) {
                    cut -= 1;
                }
                EclError::token(&tail[..cut], "character field")
            })?;
        values.push(field.trim_end_matches(' ').to_string());

        // step over the closing quote
        let end = quote + 1 + width;
        cursor.pos = end + cursor.buf[end..].chars().next().map_or(0, char::len_utf8);
    }
    Ok(values)
}
