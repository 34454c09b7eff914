//! Lexical scanners over the character cursor.
//!
//! Low-level recognizers shared by the markup and text handlers:
//! - literal matching with full restore on mismatch
//! - scan-until-char / scan-until-string (terminator consumed, EOF stops)
//! - whitespace collection
//! - name scanning with ASCII lowercasing and prefix splitting
//! - attribute value scanning (quoted or unquoted, entity-decoded)

use super::cursor::{CharSource, Cursor, EOF_CHAR};
use super::entities::decode_text;

/// Whitespace as the emitter understands it: space, tab, LF and CR.
///
/// Form feed is deliberately absent; downstream XML serializers reject it
/// inside whitespace nodes.
#[inline]
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// First character of a name. Non-ASCII is allowed and passed through.
#[inline]
pub fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == ':' || c as u32 >= 0x80
}

/// Continuation character of a name.
#[inline]
pub fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '.' || c == '-'
}

/// Characters allowed in an unquoted attribute value.
#[inline]
fn is_ok_attr_char_unquoted(c: char) -> bool {
    c > '\u{20}' && !matches!(c, '"' | '\'' | '=' | '<' | '>' | '`')
}

/// Lexical scanner over a cursor.
pub struct Scanner<S> {
    cursor: Cursor<S>,
}

impl<S: CharSource> Scanner<S> {
    /// Create a scanner over the given source.
    pub fn new(source: S) -> Self {
        Scanner {
            cursor: Cursor::new(source),
        }
    }

    /// Read one character.
    #[inline]
    pub fn read(&mut self) -> char {
        self.cursor.read()
    }

    /// Look at the next character without consuming it.
    #[inline]
    pub fn peek(&mut self) -> char {
        self.cursor.peek()
    }

    /// Push a character back.
    #[inline]
    pub fn unread(&mut self, c: char) {
        self.cursor.unread(c)
    }

    /// Count of characters consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Release the underlying source.
    pub fn close_source(&mut self) {
        self.cursor.close_source();
    }

    /// Try to consume a literal. On mismatch every character already taken
    /// is pushed back and false is returned. Case folding affects ASCII
    /// A-Z only.
    pub fn match_literal(&mut self, literal: &str, ignore_case: bool) -> bool {
        let mut taken: Vec<char> = Vec::with_capacity(literal.len());
        for want in literal.chars() {
            let got = self.cursor.read();
            let ok = got != EOF_CHAR
                && (got == want || (ignore_case && got.eq_ignore_ascii_case(&want)));
            if !ok {
                self.cursor.unread(got);
                while let Some(c) = taken.pop() {
                    self.cursor.unread(c);
                }
                return false;
            }
            taken.push(got);
        }
        true
    }

    /// Accumulate characters until `terminator`, which is consumed but not
    /// returned. EOF terminates without error.
    pub fn scan_until_char(&mut self, terminator: char) -> String {
        let mut out = String::new();
        loop {
            let c = self.cursor.read();
            if c == EOF_CHAR || c == terminator {
                break;
            }
            out.push(c);
        }
        out
    }

    /// Accumulate characters until the string `terminator` appears; the
    /// terminator is consumed but not returned. EOF terminates without
    /// error, returning everything accumulated.
    pub fn scan_until_str(&mut self, terminator: &str) -> String {
        let mut out = String::new();
        loop {
            let c = self.cursor.read();
            if c == EOF_CHAR {
                break;
            }
            out.push(c);
            if out.ends_with(terminator) {
                out.truncate(out.len() - terminator.len());
                break;
            }
        }
        out
    }

    /// Collect a run of whitespace characters.
    pub fn collect_whitespace(&mut self) -> String {
        let mut out = String::new();
        while is_whitespace(self.cursor.peek()) {
            out.push(self.cursor.read());
        }
        out
    }

    /// Skip a run of whitespace characters.
    pub fn skip_whitespace(&mut self) {
        while is_whitespace(self.cursor.peek()) {
            self.cursor.read();
        }
    }

    /// Read a name, ASCII-lowercased and split at its first embedded colon
    /// into `(prefix, local)`. Returns `None` without consuming anything
    /// when the next character cannot start a name.
    pub fn read_name(&mut self) -> Option<(String, String)> {
        if !is_name_start(self.cursor.peek()) {
            return None;
        }
        let mut name = String::new();
        while is_name_char(self.cursor.peek()) {
            name.push(self.cursor.read().to_ascii_lowercase());
        }
        match name.find(':') {
            Some(i) if i > 0 && i + 1 < name.len() => {
                let local = name[i + 1..].to_string();
                name.truncate(i);
                Some((name, local))
            }
            _ => Some((String::new(), name)),
        }
    }

    /// Scan an attribute value after `=`: leading whitespace is skipped,
    /// quoted and unquoted forms are accepted, entities are decoded.
    pub fn read_attr_value(&mut self) -> String {
        self.skip_whitespace();
        let mut raw = String::new();
        let quote = self.cursor.peek();
        if quote == '"' || quote == '\'' {
            self.cursor.read();
            loop {
                let c = self.cursor.read();
                if c == EOF_CHAR || c == quote {
                    break;
                }
                raw.push(c);
            }
        } else {
            while is_ok_attr_char_unquoted(self.cursor.peek()) {
                raw.push(self.cursor.read());
            }
        }
        decode_text(&raw).into_owned()
    }
}
