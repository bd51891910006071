//! The tokenizer: a single left-to-right scan over the SQL text.
//!
//! For each start position the first character selects a branch; at most a
//! few characters of lookahead decide the branch length, and string or
//! identifier bodies scan to their closing quote. Whitespace and comments
//! are consumed without emitting tokens; block comments nest.

use tracing::trace;

use emsql_core::{ErrorKind, FrontendError, Keyword, ParserConfig, Result};

use crate::token::{Token, TokenSpan, Word};

/// The SQL tokenizer.
pub struct Tokenizer<'a> {
    config: &'a ParserConfig,
    sql: &'a str,
    pos: usize,
    stop_on_close_paren: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer over the given input.
    pub fn new(config: &'a ParserConfig, sql: &'a str) -> Self {
        Self {
            config,
            sql,
            pos: 0,
            stop_on_close_paren: false,
        }
    }

    /// Stop after the parenthesis that closes the first one opened.
    /// Used when tokenizing embedded fragments such as column lists.
    pub fn stop_on_close_paren(mut self) -> Self {
        self.stop_on_close_paren = true;
        self
    }

    /// Tokenizes the whole input into a vector terminated by exactly one
    /// [`Token::EndOfInput`].
    pub fn tokenize(self) -> Result<Vec<TokenSpan>> {
        self.tokenize_from(0)
    }

    /// Tokenizes starting at the given byte offset; spans stay absolute.
    /// This is the re-tokenization entry used when re-reading a suffix of a
    /// statement.
    pub fn tokenize_from(mut self, offset: usize) -> Result<Vec<TokenSpan>> {
        self.pos = offset;
        let mut tokens = Vec::new();
        let mut paren_depth = 0usize;
        let mut seen_paren = false;
        loop {
            self.skip_space_and_comments()?;
            let start = self.pos;
            let Some(ch) = self.peek() else {
                tokens.push(TokenSpan {
                    token: Token::EndOfInput,
                    start,
                    end: start,
                });
                break;
            };
            let token = self.next_token(ch)?;
            match token {
                Token::LeftParen => {
                    paren_depth += 1;
                    seen_paren = true;
                }
                Token::RightParen => {
                    paren_depth = paren_depth.saturating_sub(1);
                }
                _ => {}
            }
            let stop = self.stop_on_close_paren
                && seen_paren
                && paren_depth == 0
                && token == Token::RightParen;
            tokens.push(TokenSpan {
                token,
                start,
                end: self.pos,
            });
            if stop {
                tokens.push(TokenSpan {
                    token: Token::EndOfInput,
                    start: self.pos,
                    end: self.pos,
                });
                break;
            }
        }
        trace!(tokens = tokens.len(), "tokenized statement");
        Ok(tokens)
    }

    // ---- scanning helpers ----

    fn rest(&self) -> &'a str {
        &self.sql[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn eat_str_ci(&mut self, upper: &str) -> bool {
        match self.rest().get(..upper.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(upper) => {
                self.pos += upper.len();
                true
            }
            _ => false,
        }
    }

    fn syntax_at<T>(&self, offset: usize, message: &str) -> Result<T> {
        Err(FrontendError::syntax(offset, message.to_owned()))
    }

    fn is_ident_start(&self, ch: char) -> bool {
        ch.is_alphabetic()
            || ch == '_'
            || (ch == '#' && self.config.flags.pound_in_identifiers)
    }

    fn is_ident_part(&self, ch: char) -> bool {
        ch.is_alphanumeric()
            || ch == '_'
            || (ch == '#' && self.config.flags.pound_in_identifiers)
    }

    fn skip_space_and_comments(&mut self) -> Result<()> {
        loop {
            match self.peek() {
                Some(ch) if ch.is_whitespace() => {
                    self.bump();
                }
                Some('-') if self.rest().starts_with("--") => {
                    // line comment, ends at CR or LF
                    while let Some(ch) = self.peek() {
                        if ch == '\r' || ch == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                Some('/') if self.rest().starts_with("/*") => {
                    let start = self.pos;
                    self.pos += 2;
                    let mut depth = 1u32;
                    loop {
                        if self.eat_str("*/") {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        } else if self.eat_str("/*") {
                            depth += 1;
                        } else if self.bump().is_none() {
                            return self.syntax_at(start, "Unterminated block comment");
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    // ---- token dispatch ----

    fn next_token(&mut self, ch: char) -> Result<Token> {
        match ch {
            'N' | 'n' if self.second_is_quote() => {
                self.bump();
                self.read_char_string()
            }
            'X' | 'x' if self.second_is_quote() => {
                self.bump();
                self.read_hex_string()
            }
            'U' | 'u' if self.rest().len() >= 3 && self.rest()[1..].starts_with('&') => {
                match self.rest()[2..].chars().next() {
                    Some('\'') => {
                        self.pos += 2;
                        self.read_unicode_string()
                    }
                    Some('"') => {
                        self.pos += 2;
                        self.read_unicode_quoted_ident()
                    }
                    _ => self.read_word(),
                }
            }
            '"' => self.read_quoted_ident('"', '"', false),
            '`' if self.config.flags.backtick_quoted_names => {
                self.read_quoted_ident('`', '`', true)
            }
            '[' if self.config.flags.square_bracket_quoted_names => {
                self.read_quoted_ident('[', ']', false)
            }
            '\'' => self.read_char_string(),
            '$' => self.read_dollar(),
            '?' => self.read_question(),
            '0'..='9' => self.read_number(),
            '.' => {
                if matches!(self.peek_second(), Some('0'..='9')) {
                    self.read_number()
                } else {
                    self.bump();
                    Ok(Token::Period)
                }
            }
            ch if self.is_ident_start(ch) => self.read_word(),
            _ => self.read_symbol(),
        }
    }

    fn second_is_quote(&self) -> bool {
        self.peek_second() == Some('\'')
    }

    fn read_symbol(&mut self) -> Result<Token> {
        let start = self.pos;
        let ch = self.bump().expect("caller checked peek");
        let token = match ch {
            '=' => Token::Eq,
            '<' => {
                if self.eat('=') {
                    Token::LtEq
                } else if self.eat('>') {
                    Token::NotEq
                } else {
                    Token::Lt
                }
            }
            '>' => {
                if self.eat('=') {
                    Token::GtEq
                } else {
                    Token::Gt
                }
            }
            '!' => {
                if self.eat('=') {
                    Token::NotEq
                } else if self.eat('~') {
                    Token::NotTilde
                } else {
                    return self.syntax_at(start, "Unexpected character '!'");
                }
            }
            '|' => {
                if self.eat('|') {
                    Token::Concat
                } else {
                    return self.syntax_at(start, "Unexpected character '|'; did you mean '||'?");
                }
            }
            '&' => {
                if self.eat('&') {
                    Token::SpatialIntersects
                } else {
                    return self.syntax_at(start, "Unexpected character '&'; did you mean '&&'?");
                }
            }
            ':' => {
                if self.eat(':') {
                    Token::DoubleColon
                } else if self.eat('=') {
                    Token::ColonEq
                } else {
                    Token::Colon
                }
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Asterisk,
            '/' => Token::Slash,
            '%' => Token::Percent,
            ',' => Token::Comma,
            ';' => Token::SemiColon,
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            '{' => Token::LeftBrace,
            '}' => Token::RightBrace,
            '[' => Token::LeftBracket,
            ']' => Token::RightBracket,
            '~' => Token::Tilde,
            '@' => Token::At,
            other => {
                return Err(FrontendError::syntax(
                    start,
                    format!("Unexpected character '{}'", other),
                ))
            }
        };
        Ok(token)
    }

    // ---- words and identifiers ----

    fn read_word(&mut self) -> Result<Token> {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if self.is_ident_part(ch) {
                self.bump();
            } else {
                break;
            }
        }
        let raw = &self.sql[start..self.pos];
        self.check_name_length(raw, start)?;
        let upper = raw.to_uppercase();
        let mut keyword = Keyword::lookup(&upper);
        if let Some(kw) = keyword {
            if self.config.non_keywords.contains(kw)
                || (kw == Keyword::LIMIT && !self.config.flags.limit)
            {
                keyword = None;
            }
        }
        let value = self.config.case_folding.fold(raw);
        Ok(Token::Word(Word::new(value, keyword)))
    }

    fn read_quoted_ident(&mut self, open: char, close: char, fold: bool) -> Result<Token> {
        let start = self.pos;
        self.bump(); // the open quote
        let mut value = String::new();
        loop {
            match self.bump() {
                None => return self.syntax_at(start, "Unterminated quoted identifier"),
                Some(ch) if ch == close => {
                    // a doubled close quote is an escaped quote
                    if close == open && self.eat(close) {
                        value.push(close);
                    } else {
                        break;
                    }
                }
                Some(ch) => value.push(ch),
            }
        }
        self.check_name_length(&value, start)?;
        if fold {
            value = self.config.case_folding.fold(&value);
        }
        Ok(Token::Word(Word::quoted(value)))
    }

    fn read_unicode_quoted_ident(&mut self) -> Result<Token> {
        let start = self.pos;
        let Token::Word(word) = self.read_quoted_ident('"', '"', false)? else {
            unreachable!()
        };
        let escape = self.read_uescape_clause(start)?.unwrap_or('\\');
        let value = decode_unicode_escapes(&word.value, escape, start)?;
        self.check_name_length(&value, start)?;
        Ok(Token::Word(Word::quoted(value)))
    }

    fn check_name_length(&self, name: &str, offset: usize) -> Result<()> {
        if name.chars().count() > self.config.max_identifier_length {
            return Err(FrontendError::new(
                ErrorKind::NameTooLong,
                format!(
                    "The name is too long (maximum {} characters)",
                    self.config.max_identifier_length
                ),
            )
            .with_sql(&self.sql[offset..self.pos.min(self.sql.len())]));
        }
        Ok(())
    }

    // ---- string literals ----

    /// Reads a character string literal, concatenating adjacent literals
    /// separated only by whitespace or comments. Backslash escapes in the
    /// body are processed only when the mode asks for it; the legacy
    /// `E'...'` form is post-processed by the parser, not here.
    fn read_char_string(&mut self) -> Result<Token> {
        let start = self.pos;
        let escapes = self.config.flags.backslash_escapes;
        let mut value = String::new();
        self.read_string_body(&mut value, start, escapes)?;
        loop {
            let save = self.pos;
            if self.skip_space_and_comments().is_err() {
                self.pos = save;
                break;
            }
            if self.peek() == Some('\'') {
                self.read_string_body(&mut value, start, escapes)?;
            } else {
                self.pos = save;
                break;
            }
        }
        Ok(Token::CharString(value))
    }

    fn read_string_body(&mut self, value: &mut String, start: usize, escapes: bool) -> Result<()> {
        self.bump(); // the open quote
        loop {
            match self.bump() {
                None => return self.syntax_at(start, "Unterminated string literal"),
                Some('\'') => {
                    if self.eat('\'') {
                        value.push('\'');
                    } else {
                        return Ok(());
                    }
                }
                Some('\\') if escapes => match self.bump() {
                    None => return self.syntax_at(start, "Unterminated string literal"),
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('b') => value.push('\u{8}'),
                    Some('f') => value.push('\u{c}'),
                    Some(other) => value.push(other),
                },
                Some(ch) => value.push(ch),
            }
        }
    }

    fn read_unicode_string(&mut self) -> Result<Token> {
        let start = self.pos;
        let mut raw = String::new();
        self.read_string_body(&mut raw, start, false)?;
        let escape = self.read_uescape_clause(start)?.unwrap_or('\\');
        let value = decode_unicode_escapes(&raw, escape, start)?;
        Ok(Token::CharString(value))
    }

    /// Consumes a trailing `UESCAPE 'X'` clause if present.
    fn read_uescape_clause(&mut self, start: usize) -> Result<Option<char>> {
        let save = self.pos;
        if self.skip_space_and_comments().is_err() {
            self.pos = save;
            return Ok(None);
        }
        if !self.eat_str_ci("UESCAPE") {
            self.pos = save;
            return Ok(None);
        }
        self.skip_space_and_comments()?;
        if self.peek() != Some('\'') {
            return self.syntax_at(self.pos, "Expected escape character after UESCAPE");
        }
        let mut escape = String::new();
        self.read_string_body(&mut escape, start, false)?;
        let mut chars = escape.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return self.syntax_at(start, "UESCAPE argument must be a single character");
        };
        if ch.is_ascii_hexdigit() || ch.is_whitespace() || matches!(ch, '\'' | '"' | '+') {
            return self.syntax_at(start, "Invalid UESCAPE character");
        }
        Ok(Some(ch))
    }

    /// `X'...'`; hex digits with optional embedded whitespace, and adjacent
    /// literals concatenated into one byte buffer.
    fn read_hex_string(&mut self) -> Result<Token> {
        let start = self.pos;
        let mut nibbles = Vec::new();
        self.read_hex_body(&mut nibbles, start)?;
        loop {
            let save = self.pos;
            if self.skip_space_and_comments().is_err() {
                self.pos = save;
                break;
            }
            if self.peek() == Some('\'') {
                self.read_hex_body(&mut nibbles, start)?;
            } else if matches!(self.peek(), Some('X') | Some('x')) && self.second_is_quote() {
                self.bump();
                self.read_hex_body(&mut nibbles, start)?;
            } else {
                self.pos = save;
                break;
            }
        }
        bytes_from_nibbles(nibbles, start).map(Token::BinaryString)
    }

    fn read_hex_body(&mut self, nibbles: &mut Vec<u8>, start: usize) -> Result<()> {
        self.bump(); // the open quote
        loop {
            match self.bump() {
                None => return self.syntax_at(start, "Unterminated binary string literal"),
                Some('\'') => return Ok(()),
                Some(ch) if ch.is_whitespace() => {}
                Some(ch) => match ch.to_digit(16) {
                    Some(digit) => nibbles.push(digit as u8),
                    None => {
                        return Err(FrontendError::new(
                            ErrorKind::HexStringWrong,
                            format!("Invalid character '{}' in binary string literal", ch),
                        ))
                    }
                },
            }
        }
    }

    /// `$$...$$` verbatim string, or `$N` indexed parameter.
    fn read_dollar(&mut self) -> Result<Token> {
        let start = self.pos;
        if self.eat_str("$$") {
            let Some(end) = self.rest().find("$$") else {
                return self.syntax_at(start, "Unterminated dollar-quoted string literal");
            };
            let value = self.rest()[..end].to_owned();
            self.pos += end + 2;
            return Ok(Token::CharString(value));
        }
        self.bump(); // '$'
        if matches!(self.peek(), Some('0'..='9')) {
            self.read_parameter_index(start)
        } else {
            self.syntax_at(start, "Unexpected character '$'")
        }
    }

    fn read_question(&mut self) -> Result<Token> {
        let start = self.pos;
        self.bump(); // '?'
        // `??(` and `??)` are not emitted by this front-end; `?(` / `?)` are
        // the square-bracket aliases.
        if self.eat('(') {
            return Ok(Token::LeftBracket);
        }
        if self.eat(')') {
            return Ok(Token::RightBracket);
        }
        if matches!(self.peek(), Some('0'..='9')) {
            self.read_parameter_index(start)
        } else {
            Ok(Token::Parameter(0))
        }
    }

    fn read_parameter_index(&mut self, start: usize) -> Result<Token> {
        let digits_start = self.pos;
        while matches!(self.peek(), Some('0'..='9')) {
            self.bump();
        }
        let digits = &self.sql[digits_start..self.pos];
        let index: u32 = digits.parse().map_err(|_| {
            FrontendError::new(ErrorKind::InvalidParameterIndex, "Parameter index out of range")
        })?;
        if index == 0 || index > self.config.max_parameter_index {
            return Err(FrontendError::new(
                ErrorKind::InvalidParameterIndex,
                format!("Invalid parameter index {}", index),
            )
            .with_sql(&self.sql[start..self.pos]));
        }
        Ok(Token::Parameter(index))
    }

    // ---- numbers ----

    fn read_number(&mut self) -> Result<Token> {
        let start = self.pos;
        if self.eat_str("0x") || self.eat_str("0X") {
            return self.read_hex_number(start);
        }
        while matches!(self.peek(), Some('0'..='9')) {
            self.bump();
        }
        let mut decimal = false;
        if self.peek() == Some('.') && matches!(self.peek_second(), Some('0'..='9')) {
            decimal = true;
            self.bump();
            while matches!(self.peek(), Some('0'..='9')) {
                self.bump();
            }
        } else if self.peek() == Some('.') && self.pos > start {
            // trailing dot as in `1.`
            decimal = true;
            self.bump();
        }
        let mut approximate = false;
        if matches!(self.peek(), Some('e') | Some('E')) {
            let mut lookahead = self.pos + 1;
            if matches!(self.sql[lookahead..].chars().next(), Some('+') | Some('-')) {
                lookahead += 1;
            }
            if matches!(self.sql[lookahead..].chars().next(), Some('0'..='9')) {
                approximate = true;
                self.pos = lookahead;
                while matches!(self.peek(), Some('0'..='9')) {
                    self.bump();
                }
            }
        }
        let spelling = &self.sql[start..self.pos];
        if approximate {
            return Ok(Token::Approximate(spelling.to_owned()));
        }
        if decimal {
            return Ok(Token::Numeric(spelling.to_owned()));
        }
        if self.eat('L') || self.eat('l') {
            return match spelling.parse::<i64>() {
                Ok(value) => Ok(Token::Bigint(value)),
                Err(_) => Ok(Token::Numeric(spelling.to_owned())),
            };
        }
        if let Ok(value) = spelling.parse::<i32>() {
            return Ok(Token::Integer(value));
        }
        if let Ok(value) = spelling.parse::<i64>() {
            return Ok(Token::Bigint(value));
        }
        Ok(Token::Numeric(spelling.to_owned()))
    }

    fn read_hex_number(&mut self, start: usize) -> Result<Token> {
        let digits_start = self.pos;
        while matches!(self.peek(), Some(ch) if ch.is_ascii_hexdigit()) {
            self.bump();
        }
        let digits = &self.sql[digits_start..self.pos];
        if digits.is_empty() {
            return self.syntax_at(start, "Invalid hexadecimal literal");
        }
        if self.config.flags.zero_ex_literals_are_binary_strings {
            let nibbles = digits
                .chars()
                .map(|ch| ch.to_digit(16).expect("scanned hex digits") as u8)
                .collect();
            return bytes_from_nibbles(nibbles, start).map(Token::BinaryString);
        }
        match i64::from_str_radix(digits, 16) {
            Ok(value) => {
                if let Ok(small) = i32::try_from(value) {
                    Ok(Token::Integer(small))
                } else {
                    Ok(Token::Bigint(value))
                }
            }
            Err(_) => self.syntax_at(start, "Hexadecimal literal out of range"),
        }
    }
}

fn bytes_from_nibbles(nibbles: Vec<u8>, offset: usize) -> Result<Vec<u8>> {
    if nibbles.len() % 2 != 0 {
        let mut error = FrontendError::new(
            ErrorKind::HexStringWrong,
            "Binary string literal has an odd number of hex digits",
        );
        error.offset = Some(offset);
        return Err(error);
    }
    Ok(nibbles
        .chunks(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect())
}

/// Decodes `<esc>XXXX` and `<esc>+XXXXXX` escapes of a `U&` literal.
fn decode_unicode_escapes(body: &str, escape: char, offset: usize) -> Result<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch != escape {
            out.push(ch);
            continue;
        }
        let rest = chars.as_str();
        if rest.starts_with(escape) {
            chars.next();
            out.push(escape);
        } else if let Some(hex) = rest.strip_prefix('+') {
            let code = parse_hex_escape(hex, 6, offset)?;
            out.push(code);
            for _ in 0..7 {
                chars.next();
            }
        } else {
            let code = parse_hex_escape(rest, 4, offset)?;
            out.push(code);
            for _ in 0..4 {
                chars.next();
            }
        }
    }
    Ok(out)
}

fn parse_hex_escape(input: &str, len: usize, offset: usize) -> Result<char> {
    let digits: String = input.chars().take(len).collect();
    if digits.chars().count() != len || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(FrontendError::syntax(offset, "Invalid Unicode escape".to_owned()));
    }
    let value = u32::from_str_radix(&digits, 16)
        .ok()
        .and_then(char::from_u32);
    value.ok_or_else(|| FrontendError::syntax(offset, "Invalid Unicode code point".to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use emsql_core::{CaseFolding, CompatMode, KeywordSet};

    fn tokens(sql: &str) -> Vec<Token> {
        tokens_with(&ParserConfig::default(), sql)
    }

    fn tokens_with(config: &ParserConfig, sql: &str) -> Vec<Token> {
        Tokenizer::new(config, sql)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|span| span.token)
            .collect()
    }

    fn kw(keyword: Keyword) -> Token {
        Token::Word(Word::new(keyword.as_str(), Some(keyword)))
    }

    fn ident(value: &str) -> Token {
        Token::Word(Word::new(value, None))
    }

    #[test]
    fn tokenize_simple_select() {
        assert_eq!(
            tokens("SELECT * FROM customer WHERE id = 1"),
            vec![
                kw(Keyword::SELECT),
                Token::Asterisk,
                kw(Keyword::FROM),
                ident("CUSTOMER"),
                kw(Keyword::WHERE),
                ident("ID"),
                Token::Eq,
                Token::Integer(1),
                Token::EndOfInput,
            ]
        );
    }

    #[test]
    fn tokenize_comments() {
        assert_eq!(
            tokens("1 -- line comment\n2 /* block /* nested */ comment */ 3"),
            vec![
                Token::Integer(1),
                Token::Integer(2),
                Token::Integer(3),
                Token::EndOfInput,
            ]
        );
        let error = Tokenizer::new(&ParserConfig::default(), "/* open")
            .tokenize()
            .unwrap_err();
        assert_eq!(error.offset, Some(0));
    }

    #[test]
    fn tokenize_strings() {
        assert_eq!(
            tokens("'it''s'"),
            vec![Token::CharString("it's".into()), Token::EndOfInput]
        );
        // adjacent literals separated by whitespace or comments concatenate
        assert_eq!(
            tokens("'a' /* glue */ 'b', 'c'"),
            vec![
                Token::CharString("ab".into()),
                Token::Comma,
                Token::CharString("c".into()),
                Token::EndOfInput,
            ]
        );
        assert_eq!(
            tokens("N'national'"),
            vec![Token::CharString("national".into()), Token::EndOfInput]
        );
        assert_eq!(
            tokens("$$any 'verbatim' text$$"),
            vec![Token::CharString("any 'verbatim' text".into()), Token::EndOfInput]
        );
        let error = Tokenizer::new(&ParserConfig::default(), "SELECT 'foo")
            .tokenize()
            .unwrap_err();
        assert_eq!(error.offset, Some(7));
    }

    #[test]
    fn backslash_escapes_in_plain_strings_are_mode_gated() {
        // the default mode keeps backslashes verbatim
        assert_eq!(
            tokens(r"'a\nb'"),
            vec![Token::CharString("a\\nb".into()), Token::EndOfInput]
        );
        // PostgreSQL mode decodes them in plain literals
        let config = ParserConfig::for_mode(CompatMode::PostgreSql);
        assert_eq!(
            tokens_with(&config, r"'a\nb'"),
            vec![Token::CharString("a\nb".into()), Token::EndOfInput]
        );
        // the legacy E prefix always lexes as a separate word; the parser
        // recognizes the pair and applies the escapes
        assert_eq!(
            tokens(r"E'a\nb'"),
            vec![
                ident("E"),
                Token::CharString("a\\nb".into()),
                Token::EndOfInput,
            ]
        );
    }

    #[test]
    fn tokenize_unicode_string() {
        assert_eq!(
            tokens(r"U&'d\0061t\+000061'"),
            vec![Token::CharString("data".into()), Token::EndOfInput]
        );
        assert_eq!(
            tokens("U&'d!0061ta' UESCAPE '!'"),
            vec![Token::CharString("data".into()), Token::EndOfInput]
        );
    }

    #[test]
    fn tokenize_hex_strings() {
        assert_eq!(
            tokens("X'deadbeef'"),
            vec![Token::BinaryString(vec![0xde, 0xad, 0xbe, 0xef]), Token::EndOfInput]
        );
        assert_eq!(
            tokens("X'de ad' 'be' X'ef'"),
            vec![Token::BinaryString(vec![0xde, 0xad, 0xbe, 0xef]), Token::EndOfInput]
        );
        let error = Tokenizer::new(&ParserConfig::default(), "X'abc'")
            .tokenize()
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::HexStringWrong);
        let error = Tokenizer::new(&ParserConfig::default(), "X'zz'")
            .tokenize()
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::HexStringWrong);
    }

    #[test]
    fn tokenize_numbers() {
        assert_eq!(
            tokens("0 2147483647 2147483648 9223372036854775807 12345678901234567890123"),
            vec![
                Token::Integer(0),
                Token::Integer(2147483647),
                Token::Bigint(2147483648),
                Token::Bigint(9223372036854775807),
                Token::Numeric("12345678901234567890123".into()),
                Token::EndOfInput,
            ]
        );
        assert_eq!(
            tokens("1.5 .25 2. 1e3 1.5E-2 10L"),
            vec![
                Token::Numeric("1.5".into()),
                Token::Numeric(".25".into()),
                Token::Numeric("2.".into()),
                Token::Approximate("1e3".into()),
                Token::Approximate("1.5E-2".into()),
                Token::Bigint(10),
                Token::EndOfInput,
            ]
        );
        assert_eq!(
            tokens("0x1f"),
            vec![Token::Integer(31), Token::EndOfInput]
        );
        let config = ParserConfig::for_mode(CompatMode::MySql);
        assert_eq!(
            tokens_with(&config, "0x1f2e"),
            vec![Token::BinaryString(vec![0x1f, 0x2e]), Token::EndOfInput]
        );
    }

    #[test]
    fn tokenize_parameters() {
        assert_eq!(
            tokens("? ?3 $2"),
            vec![
                Token::Parameter(0),
                Token::Parameter(3),
                Token::Parameter(2),
                Token::EndOfInput,
            ]
        );
        assert_eq!(
            tokens("?(1?)"),
            vec![
                Token::LeftBracket,
                Token::Integer(1),
                Token::RightBracket,
                Token::EndOfInput,
            ]
        );
        let error = Tokenizer::new(&ParserConfig::default(), "?0")
            .tokenize()
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::InvalidParameterIndex);
    }

    #[test]
    fn tokenize_punctuation() {
        assert_eq!(
            tokens("<= <> >= != ~ !~ || && :: := [ ] { }"),
            vec![
                Token::LtEq,
                Token::NotEq,
                Token::GtEq,
                Token::NotEq,
                Token::Tilde,
                Token::NotTilde,
                Token::Concat,
                Token::SpatialIntersects,
                Token::DoubleColon,
                Token::ColonEq,
                Token::LeftBracket,
                Token::RightBracket,
                Token::LeftBrace,
                Token::RightBrace,
                Token::EndOfInput,
            ]
        );
        assert!(Tokenizer::new(&ParserConfig::default(), "a | b").tokenize().is_err());
        assert!(Tokenizer::new(&ParserConfig::default(), "a & b").tokenize().is_err());
    }

    #[test]
    fn tokenize_quoted_identifiers() {
        assert_eq!(
            tokens("\"MiXeD\" \"with \"\" quote\""),
            vec![
                Token::Word(Word::quoted("MiXeD")),
                Token::Word(Word::quoted("with \" quote")),
                Token::EndOfInput,
            ]
        );
        let error = Tokenizer::new(&ParserConfig::default(), "x \"ident")
            .tokenize()
            .unwrap_err();
        assert_eq!(error.offset, Some(2));

        let config = ParserConfig::for_mode(CompatMode::MsSqlServer);
        assert_eq!(
            tokens_with(&config, "[my table]"),
            vec![Token::Word(Word::quoted("my table")), Token::EndOfInput]
        );

        // backtick quoting folds like an unquoted identifier
        let config = ParserConfig::for_mode(CompatMode::MySql);
        assert_eq!(
            tokens_with(&config, "`MiXeD`"),
            vec![Token::Word(Word::quoted("mixed")), Token::EndOfInput]
        );
    }

    #[test]
    fn tokenize_case_folding_policies() {
        let mut config = ParserConfig::default();
        config.case_folding = CaseFolding::Lower;
        assert_eq!(tokens_with(&config, "MyCol"), vec![ident("mycol"), Token::EndOfInput]);
        config.case_folding = CaseFolding::Preserve;
        assert_eq!(tokens_with(&config, "MyCol"), vec![ident("MyCol"), Token::EndOfInput]);
    }

    #[test]
    fn non_keyword_downgrade() {
        let mut config = ParserConfig::default();
        config.non_keywords = KeywordSet::from_keywords(&[Keyword::VALUE]);
        assert_eq!(
            tokens_with(&config, "VALUE"),
            vec![ident("VALUE"), Token::EndOfInput]
        );
        assert_eq!(tokens("VALUE"), vec![kw(Keyword::VALUE), Token::EndOfInput]);
    }

    #[test]
    fn offsets_are_monotonic_and_cover_source() {
        let sql = "SELECT a, 'x''y' /* c */ FROM t WHERE a >= 10";
        let spans = Tokenizer::new(&ParserConfig::default(), sql)
            .tokenize()
            .unwrap();
        let mut last = None;
        for span in &spans {
            if let Some(previous) = last {
                assert!(span.start > previous, "offsets must be strictly monotonic");
            }
            if span.token != Token::EndOfInput {
                assert!(span.end > span.start);
                // re-tokenizing the covered range yields the same token
                let again = Tokenizer::new(&ParserConfig::default(), &sql[span.start..span.end])
                    .tokenize()
                    .unwrap();
                assert_eq!(again[0].token, span.token);
            }
            last = Some(span.start);
        }
        assert_eq!(spans.last().unwrap().token, Token::EndOfInput);
    }

    #[test]
    fn stop_on_close_paren() {
        let sql = "(a, b) AND MORE";
        let spans = Tokenizer::new(&ParserConfig::default(), sql)
            .stop_on_close_paren()
            .tokenize()
            .unwrap();
        let kinds: Vec<_> = spans.into_iter().map(|s| s.token).collect();
        assert_eq!(
            kinds,
            vec![
                Token::LeftParen,
                ident("A"),
                Token::Comma,
                ident("B"),
                Token::RightParen,
                Token::EndOfInput,
            ]
        );
    }

    #[test]
    fn tokenize_from_offset() {
        let sql = "IGNORED SELECT 1";
        let spans = Tokenizer::new(&ParserConfig::default(), sql)
            .tokenize_from(8)
            .unwrap();
        assert_eq!(spans[0].token, kw(Keyword::SELECT));
        assert_eq!(spans[0].start, 8);
    }
}
