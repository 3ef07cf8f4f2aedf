//! Restricted-grammar evaluator for object literals.
//!
//! Accepts data only: strings, numbers, booleans, `null`, arrays, nested
//! objects and calls to a whitelisted set of helpers. Calls are captured as
//! [`PlaceholderCall`]s and never evaluated. Anything else (identifiers,
//! operators, functions, computed keys) is rejected with
//! [`DomainError::UnsupportedExpression`]; broken syntax is
//! [`DomainError::MalformedConfig`].

use super::extract::{is_ident_byte, match_delimiter, skip_trivia};
use super::value::{ConfigMap, ConfigValue, KnownCallables, PlaceholderCall};
use crate::domain::error::DomainError;

/// Evaluate `literal` into a structured value.
///
/// # Errors
///
/// See the module docs.
pub fn evaluate(literal: &str, known: &KnownCallables) -> Result<ConfigValue, DomainError> {
    let mut parser = Parser::new(literal, known);
    let value = parser
        .value(false)?
        .ok_or_else(|| DomainError::malformed("literal evaluates to undefined"))?;
    parser.finish()?;
    Ok(value)
}

/// Evaluate `literal`, requiring the result to be an object.
pub fn evaluate_object(literal: &str, known: &KnownCallables) -> Result<ConfigMap, DomainError> {
    match evaluate(literal, known)? {
        ConfigValue::Object(map) => Ok(map),
        _ => Err(DomainError::malformed("exported value is not an object literal")),
    }
}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    known: &'a KnownCallables,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, known: &'a KnownCallables) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            known,
        }
    }

    fn finish(&mut self) -> Result<(), DomainError> {
        self.trivia()?;
        if self.pos < self.bytes.len() {
            return Err(self.unexpected("end of literal"));
        }
        Ok(())
    }

    fn trivia(&mut self) -> Result<(), DomainError> {
        self.pos = skip_trivia(self.src, self.pos)?;
        Ok(())
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Parse one value. `None` means `undefined`.
    fn value(&mut self, in_array: bool) -> Result<Option<ConfigValue>, DomainError> {
        self.trivia()?;
        let start = self.pos;

        match self.peek() {
            Some(b'{') => self.object().map(|m| Some(ConfigValue::Object(m))),
            Some(b'[') => self.array().map(|a| Some(ConfigValue::Array(a))),
            Some(b'\'' | b'"') => self.string().map(|s| Some(ConfigValue::String(s))),
            Some(b'`') => self.template().map(|s| Some(ConfigValue::String(s))),
            Some(b'0'..=b'9' | b'-' | b'+') => self.number().map(|n| Some(ConfigValue::Number(n))),
            Some(b'.') if self.src[start..].starts_with("...") => {
                if !in_array {
                    return Err(self.unsupported_at(start));
                }
                self.pos += 3;
                self.trivia()?;
                match self.value(false)? {
                    Some(ConfigValue::Call(call)) => Ok(Some(ConfigValue::Call(call.spread()))),
                    _ => Err(self.unsupported_at(start)),
                }
            }
            Some(b'.') => self.number().map(|n| Some(ConfigValue::Number(n))),
            Some(b) if is_ident_start(b) => self.word(start),
            Some(b'(') => Err(self.unsupported_at(start)),
            Some(_) => Err(self.unexpected("a value")),
            None => Err(DomainError::malformed("unexpected end of literal")),
        }
    }

    fn object(&mut self) -> Result<ConfigMap, DomainError> {
        self.pos += 1;
        let mut map = ConfigMap::new();

        loop {
            self.trivia()?;
            if self.eat(b'}') {
                return Ok(map);
            }

            let key_start = self.pos;
            let key = self.key()?;
            self.trivia()?;
            match self.peek() {
                Some(b':') => self.pos += 1,
                // shorthand properties and methods
                Some(b',' | b'}' | b'(') => return Err(self.unsupported_at(key_start)),
                _ => return Err(self.unexpected("':'")),
            }

            if let Some(value) = self.value(false)? {
                map.insert(key, value);
            }
            if self.separator(b'}')? {
                return Ok(map);
            }
        }
    }

    fn key(&mut self) -> Result<String, DomainError> {
        let start = self.pos;
        match self.peek() {
            Some(b'\'' | b'"') => self.string(),
            Some(b'0'..=b'9') => {
                let n = self.number()?;
                Ok(format_number_key(n))
            }
            Some(b) if is_ident_start(b) => Ok(self.ident().to_string()),
            Some(b'[' | b'.') => Err(self.unsupported_at(start)),
            _ => Err(self.unexpected("a property name")),
        }
    }

    fn array(&mut self) -> Result<Vec<ConfigValue>, DomainError> {
        self.pos += 1;
        let mut items = Vec::new();

        loop {
            self.trivia()?;
            if self.eat(b']') {
                return Ok(items);
            }
            if self.peek() == Some(b',') {
                return Err(self.unexpected("an array element"));
            }
            if let Some(value) = self.value(true)? {
                items.push(value);
            }
            if self.separator(b']')? {
                return Ok(items);
            }
        }
    }

    /// After an entry: consume `,` (returns false) or the closer (returns true).
    fn separator(&mut self, closer: u8) -> Result<bool, DomainError> {
        self.trivia()?;
        match self.peek() {
            Some(b',') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b) if b == closer => {
                self.pos += 1;
                Ok(true)
            }
            Some(b'+' | b'-' | b'*' | b'/' | b'%' | b'?' | b'|' | b'&' | b'<' | b'>' | b'='
            | b'!' | b'.' | b'(' | b'[') => Err(self.unsupported_at(self.pos)),
            _ => Err(self.unexpected(if closer == b'}' { "',' or '}'" } else { "',' or ']'" })),
        }
    }

    /// Identifier path: keyword literal or a call to a known helper.
    fn word(&mut self, start: usize) -> Result<Option<ConfigValue>, DomainError> {
        self.ident();
        while self.peek() == Some(b'.')
            && self
                .bytes
                .get(self.pos + 1)
                .is_some_and(|b| b.is_ascii_alphabetic() || *b == b'_' || *b == b'$')
        {
            self.pos += 1;
            self.ident();
        }
        let src = self.src;
        let end = self.pos;
        let path = &src[start..end];

        self.trivia()?;
        if self.peek() == Some(b'(') {
            if !self.known.contains(path) {
                return Err(self.unsupported_at(start));
            }
            let open = self.pos;
            let close = match_delimiter(src, open, b'(', b')')?;
            self.pos = close + 1;
            let arguments = src[open + 1..close].trim();
            return Ok(Some(PlaceholderCall::new(path, arguments).into()));
        }
        self.pos = end;

        match path {
            "true" => Ok(Some(ConfigValue::Bool(true))),
            "false" => Ok(Some(ConfigValue::Bool(false))),
            "null" => Ok(Some(ConfigValue::Null)),
            "undefined" => Ok(None),
            "Infinity" => Ok(Some(ConfigValue::Number(f64::INFINITY))),
            "NaN" => Ok(Some(ConfigValue::Number(f64::NAN))),
            _ => Err(self.unsupported_at(start)),
        }
    }

    fn ident(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_byte) {
            self.pos += 1;
        }
        let src = self.src;
        &src[start..self.pos]
    }

    fn number(&mut self) -> Result<f64, DomainError> {
        let start = self.pos;
        let negative = match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        };

        let digits_start = self.pos;
        let rest = &self.src[digits_start..];
        let magnitude = if rest.starts_with("Infinity") {
            self.pos += "Infinity".len();
            f64::INFINITY
        } else if rest.starts_with("0x") || rest.starts_with("0X") {
            self.pos += 2;
            let hex_start = self.pos;
            while self.peek().is_some_and(|b| b.is_ascii_hexdigit() || b == b'_') {
                self.pos += 1;
            }
            let hex = self.src[hex_start..self.pos].replace('_', "");
            u64::from_str_radix(&hex, 16)
                .map(|n| n as f64)
                .map_err(|_| self.bad_number(start))?
        } else {
            while let Some(b) = self.peek() {
                let prev = self.bytes.get(self.pos.wrapping_sub(1)).copied();
                let exponent_sign =
                    matches!(b, b'+' | b'-') && matches!(prev, Some(b'e' | b'E'));
                if b.is_ascii_digit() || matches!(b, b'.' | b'_' | b'e' | b'E') || exponent_sign {
                    self.pos += 1;
                } else {
                    break;
                }
            }
            self.src[digits_start..self.pos]
                .replace('_', "")
                .parse::<f64>()
                .map_err(|_| self.bad_number(start))?
        };

        if self.peek().is_some_and(is_ident_byte) {
            return Err(self.bad_number(start));
        }
        Ok(if negative { -magnitude } else { magnitude })
    }

    fn bad_number(&self, start: usize) -> DomainError {
        DomainError::malformed(format!(
            "invalid number '{}' at offset {start}",
            &self.src[start..self.pos]
        ))
    }

    fn string(&mut self) -> Result<String, DomainError> {
        let start = self.pos;
        let quote = self.bytes[start] as char;
        self.pos += 1;
        self.string_body(start, quote)
    }

    fn template(&mut self) -> Result<String, DomainError> {
        let start = self.pos;
        self.pos += 1;
        let mut i = self.pos;
        while i < self.bytes.len() {
            match self.bytes[i] {
                b'\\' => i += 2,
                b'`' => break,
                b'$' if self.bytes.get(i + 1) == Some(&b'{') => {
                    return Err(self.unsupported_at(start));
                }
                _ => i += 1,
            }
        }
        self.string_body(start, '`')
    }

    /// Decode a quoted body up to the closing `quote`.
    fn string_body(&mut self, start: usize, quote: char) -> Result<String, DomainError> {
        let src = self.src;
        let mut out = String::new();
        let mut chars = src[self.pos..].char_indices().peekable();
        let unterminated =
            || DomainError::malformed(format!("unterminated string starting at offset {start}"));

        while let Some((i, c)) = chars.next() {
            match c {
                c if c == quote => {
                    self.pos += i + c.len_utf8();
                    return Ok(out);
                }
                '\n' if quote != '`' => return Err(unterminated()),
                '\\' => {
                    let (_, esc) = chars.next().ok_or_else(unterminated)?;
                    match esc {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        'b' => out.push('\u{8}'),
                        'f' => out.push('\u{c}'),
                        'v' => out.push('\u{b}'),
                        '0' => out.push('\0'),
                        '\r' => {
                            if chars.peek().is_some_and(|(_, c)| *c == '\n') {
                                chars.next();
                            }
                        }
                        '\n' | '\u{2028}' | '\u{2029}' => {}
                        'x' => {
                            let code = take_hex(&mut chars, 2).ok_or_else(|| {
                                DomainError::malformed(format!("bad \\x escape in string at offset {start}"))
                            })?;
                            out.push(char::from_u32(code).ok_or_else(unterminated)?);
                        }
                        'u' => out.push(unicode_escape(&mut chars).ok_or_else(|| {
                            DomainError::malformed(format!(
                                "bad \\u escape in string at offset {start}"
                            ))
                        })?),
                        other => out.push(other),
                    }
                }
                c => out.push(c),
            }
        }

        Err(unterminated())
    }

    fn unexpected(&self, expected: &str) -> DomainError {
        let found = self.src[self.pos..]
            .chars()
            .next()
            .map_or_else(|| "end of input".to_string(), |c| format!("'{c}'"));
        DomainError::malformed(format!(
            "expected {expected} at offset {}, found {found}",
            self.pos
        ))
    }

    fn unsupported_at(&self, start: usize) -> DomainError {
        DomainError::unsupported(snippet(self.src, start), start)
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$' || !b.is_ascii()
}

type Chars<'s> = std::iter::Peekable<std::str::CharIndices<'s>>;

fn take_hex(chars: &mut Chars<'_>, len: usize) -> Option<u32> {
    let mut code = 0u32;
    for _ in 0..len {
        let (_, c) = chars.next()?;
        code = code * 16 + c.to_digit(16)?;
    }
    Some(code)
}

/// `\uXXXX`, `\u{X...}` and surrogate pairs written as two `\u` escapes.
fn unicode_escape(chars: &mut Chars<'_>) -> Option<char> {
    if chars.peek().is_some_and(|(_, c)| *c == '{') {
        chars.next();
        let mut code = 0u32;
        loop {
            let (_, c) = chars.next()?;
            if c == '}' {
                return char::from_u32(code);
            }
            code = code.checked_mul(16)?.checked_add(c.to_digit(16)?)?;
        }
    }

    let high = take_hex(chars, 4)?;
    if !(0xD800..0xDC00).contains(&high) {
        return char::from_u32(high);
    }
    if chars.next()?.1 != '\\' || chars.next()?.1 != 'u' {
        return None;
    }
    let low = take_hex(chars, 4)?;
    if !(0xDC00..0xE000).contains(&low) {
        return None;
    }
    char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
}

fn format_number_key(n: f64) -> String {
    format!("{n}")
}

/// Short excerpt of the offending expression for error messages.
fn snippet(src: &str, start: usize) -> String {
    let rest = &src[start..];
    let end = rest
        .char_indices()
        .find(|(_, c)| matches!(c, ',' | '\n' | '}' | ']'))
        .map_or(rest.len(), |(i, _)| i);
    let text = rest[..end].trim_end();
    match text.char_indices().nth(48) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
