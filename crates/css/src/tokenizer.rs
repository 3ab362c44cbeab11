//! CSS tokenizer
//!
//! An explicit state machine over the source text. Whitespace and newlines
//! are real tokens here; the grammar layer decides when to skip them, since
//! whitespace can act as a descendant combinator inside selectors.
//!
//! Lexical errors never abort scanning: an unterminated string, an unknown
//! unit suffix or an unclassifiable character all become INVALID tokens and
//! the machine keeps going.

use crate::error::SourceLocation;

/// Token kinds produced by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Quoted string, quotes preserved in the text
    String,
    /// Identifier or keyword
    Ident,
    /// Function name, trailing '(' included in the text
    Function,
    /// '#' followed by an identifier run, '#' included in the text
    Hash,
    /// Unit-less number
    Number,
    /// Number with 'em' suffix
    Ems,
    /// Number with 'ex' suffix
    Exs,
    /// Number with 'px' suffix
    Px,
    /// Number with 'cm' suffix
    Cm,
    /// Number with 'mm' suffix
    Mm,
    /// Number with 'in' suffix
    In,
    /// Number with 'pt' suffix
    Pt,
    /// Number with 'pc' suffix
    Pc,
    /// Number with 'deg' suffix
    Deg,
    /// Number with 'grad' suffix
    Grad,
    /// Number with 'rad' suffix
    Rad,
    /// Number with 'turn' suffix
    Turn,
    /// Number with '%' suffix
    Percentage,
    /// '('
    LParen,
    /// ')'
    RParen,
    /// '{'
    LBrace,
    /// '}'
    RBrace,
    /// ';'
    Semi,
    /// ':'
    Colon,
    /// ','
    Comma,
    /// '.'
    Dot,
    /// '>'
    Greater,
    /// '*'
    Star,
    /// '/'
    Solidus,
    /// '!important', case-insensitive, comments and whitespace tolerated
    ImportantSym,
    /// Run of spaces and tabs
    Ws,
    /// A single line break
    Nl,
    /// The distinguished '@font-face' at-keyword
    FontFace,
    /// Text consumed while recovering from a malformed '!important'
    Skip,
    /// End of input
    Eof,
    /// Lexically invalid text, consumed as a single token
    Invalid,
}

impl TokenKind {
    /// Whether this kind is a number with or without a unit suffix
    pub fn is_size(self) -> bool {
        matches!(
            self,
            TokenKind::Number
                | TokenKind::Ems
                | TokenKind::Exs
                | TokenKind::Px
                | TokenKind::Cm
                | TokenKind::Mm
                | TokenKind::In
                | TokenKind::Pt
                | TokenKind::Pc
                | TokenKind::Deg
                | TokenKind::Grad
                | TokenKind::Rad
                | TokenKind::Turn
                | TokenKind::Percentage
        )
    }
}

/// A lexed token with its verbatim text and source position
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self { kind, text: text.into(), location }
    }

    fn eof(location: SourceLocation) -> Self {
        Self::new(TokenKind::Eof, "", location)
    }
}

/// Dimension suffixes recognized after a number, narrowed per character
/// with a candidate bitmask. '%' is handled separately since it can never
/// collide with an identifier run.
const UNITS: &[(&str, TokenKind)] = &[
    ("cm", TokenKind::Cm),
    ("deg", TokenKind::Deg),
    ("em", TokenKind::Ems),
    ("ex", TokenKind::Exs),
    ("grad", TokenKind::Grad),
    ("in", TokenKind::In),
    ("mm", TokenKind::Mm),
    ("pc", TokenKind::Pc),
    ("pt", TokenKind::Pt),
    ("px", TokenKind::Px),
    ("rad", TokenKind::Rad),
    ("turn", TokenKind::Turn),
];

/// CSS tokenizer
pub struct Tokenizer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Get the current source location
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column, self.position)
    }

    /// Peek at the next character without consuming
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Peek at the second character without consuming
    fn peek_second(&self) -> Option<char> {
        let mut iter = self.input[self.position..].chars();
        iter.next();
        iter.next()
    }

    /// Peek at the third character without consuming
    fn peek_third(&self) -> Option<char> {
        let mut iter = self.input[self.position..].chars();
        iter.next();
        iter.next();
        iter.next()
    }

    /// Consume the next character
    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.position = pos + c.len_utf8();
            let crlf = c == '\r' && self.peek() == Some('\n');
            if c == '\n' || (c == '\r' && !crlf) {
                self.line += 1;
                self.column = 1;
            } else if c != '\r' {
                self.column += 1;
            }
            Some(c)
        } else {
            None
        }
    }

    /// Consume a comment if one starts here
    fn consume_comment(&mut self) -> bool {
        if self.peek() == Some('/') && self.peek_second() == Some('*') {
            self.advance();
            self.advance();

            loop {
                match self.advance() {
                    Some('*') if self.peek() == Some('/') => {
                        self.advance();
                        return true;
                    }
                    Some(_) => continue,
                    None => return true, // EOF in comment
                }
            }
        }
        false
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Token {
        loop {
            let loc = self.location();

            let c = match self.peek() {
                Some(c) => c,
                None => return Token::eof(loc),
            };

            let token = match c {
                '/' if self.peek_second() == Some('*') => {
                    self.consume_comment();
                    continue;
                }
                '\n' | '\r' => {
                    self.advance();
                    // CRLF counts as one newline
                    if c == '\r' && self.peek() == Some('\n') {
                        self.advance();
                    }
                    Token::new(TokenKind::Nl, "\n", loc)
                }
                ' ' | '\t' | '\x0c' => self.consume_whitespace_run(loc),
                '{' => self.punct(TokenKind::LBrace, loc),
                '}' => self.punct(TokenKind::RBrace, loc),
                '(' => self.punct(TokenKind::LParen, loc),
                ')' => self.punct(TokenKind::RParen, loc),
                ';' => self.punct(TokenKind::Semi, loc),
                ':' => self.punct(TokenKind::Colon, loc),
                ',' => self.punct(TokenKind::Comma, loc),
                '>' => self.punct(TokenKind::Greater, loc),
                '*' => self.punct(TokenKind::Star, loc),
                '/' => self.punct(TokenKind::Solidus, loc),
                '"' | '\'' => self.consume_string(loc),
                '#' => self.consume_hash(loc),
                '@' => match self.consume_at_rule(loc) {
                    Some(token) => token,
                    None => continue,
                },
                '!' => self.consume_important(loc),
                '0'..='9' => self.consume_number(loc),
                '.' => {
                    if self.peek_second().map(|c| c.is_ascii_digit()).unwrap_or(false) {
                        self.consume_number(loc)
                    } else {
                        self.punct(TokenKind::Dot, loc)
                    }
                }
                '+' | '-' => {
                    let second = self.peek_second();
                    let third = self.peek_third();
                    let starts_number = second.map(|c| c.is_ascii_digit()).unwrap_or(false)
                        || (second == Some('.')
                            && third.map(|c| c.is_ascii_digit()).unwrap_or(false));
                    if starts_number {
                        self.consume_number(loc)
                    } else if c == '-' && second.map(is_ident_char).unwrap_or(false) {
                        self.consume_ident_like(loc)
                    } else {
                        self.invalid_char(c, loc)
                    }
                }
                _ if is_ident_start(c) => self.consume_ident_like(loc),
                _ => self.invalid_char(c, loc),
            };

            return token;
        }
    }

    /// Tokenize all remaining input, EOF excluded
    pub fn tokenize_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            if token.kind == TokenKind::Eof {
                break;
            }
            tokens.push(token);
        }
        tokens
    }

    fn punct(&mut self, kind: TokenKind, loc: SourceLocation) -> Token {
        let c = self.advance().unwrap_or_default();
        Token::new(kind, c.to_string(), loc)
    }

    fn invalid_char(&mut self, c: char, loc: SourceLocation) -> Token {
        self.advance();
        Token::new(TokenKind::Invalid, c.to_string(), loc)
    }

    fn consume_whitespace_run(&mut self, loc: SourceLocation) -> Token {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c == ' ' || c == '\t' || c == '\x0c' {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        Token::new(TokenKind::Ws, text, loc)
    }

    /// Consume a string token, quotes preserved. Unterminated at EOF is a
    /// lexical error and yields INVALID.
    fn consume_string(&mut self, loc: SourceLocation) -> Token {
        let quote = match self.advance() {
            Some(q) => q,
            None => return Token::eof(loc),
        };
        let mut text = String::new();
        text.push(quote);

        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    text.push(c);
                    return Token::new(TokenKind::String, text, loc);
                }
                Some('\\') => {
                    text.push('\\');
                    if let Some(c) = self.advance() {
                        text.push(c);
                    }
                }
                Some(c) => text.push(c),
                None => return Token::new(TokenKind::Invalid, text, loc),
            }
        }
    }

    /// Consume a hash token; the '#' stays in the text
    fn consume_hash(&mut self, loc: SourceLocation) -> Token {
        let mut text = String::from(self.advance().unwrap_or('#'));

        while let Some(c) = self.peek() {
            if is_ident_char(c) || c.is_ascii_digit() {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if text.len() == 1 {
            return Token::new(TokenKind::Invalid, text, loc);
        }
        Token::new(TokenKind::Hash, text, loc)
    }

    /// Consume an at-keyword. '@font-face' is a distinguished token; every
    /// other at-rule is skipped through its terminating ';' and produces
    /// nothing.
    fn consume_at_rule(&mut self, loc: SourceLocation) -> Option<Token> {
        self.advance(); // '@'
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if is_ident_char(c) {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if name.eq_ignore_ascii_case("font-face") {
            return Some(Token::new(TokenKind::FontFace, "@font-face", loc));
        }

        log::debug!("skipping @{} rule at {}", name, loc);
        loop {
            match self.advance() {
                Some(';') | None => break,
                Some(q @ ('"' | '\'')) => {
                    // a quoted argument may contain ';'
                    loop {
                        match self.advance() {
                            Some(c) if c == q => break,
                            Some('\\') => {
                                self.advance();
                            }
                            Some(_) => continue,
                            None => break,
                        }
                    }
                }
                Some(_) => continue,
            }
        }
        None
    }

    /// Scan '!important', tolerating whitespace and comments anywhere
    /// between the '!' and the letters. On mismatch, everything through to
    /// the next ';' or '}' is consumed into a SKIP token so the parser can
    /// resynchronize on the terminator.
    fn consume_important(&mut self, loc: SourceLocation) -> Token {
        const WORD: &[u8] = b"important";
        let mut text = String::from(self.advance().unwrap_or('!'));
        let mut matched = 0;

        loop {
            match self.peek() {
                Some(c) if c.is_ascii_whitespace() => {
                    text.push(c);
                    self.advance();
                }
                Some('/') if self.peek_second() == Some('*') => {
                    self.consume_comment();
                }
                Some(c) if matched < WORD.len() && c.to_ascii_lowercase() == WORD[matched] as char => {
                    text.push(c);
                    self.advance();
                    matched += 1;
                    if matched == WORD.len() {
                        return Token::new(TokenKind::ImportantSym, "!important", loc);
                    }
                }
                _ => break,
            }
        }

        while let Some(c) = self.peek() {
            if c == ';' || c == '}' {
                break;
            }
            text.push(c);
            self.advance();
        }
        Token::new(TokenKind::Skip, text, loc)
    }

    /// Consume an identifier or function token
    fn consume_ident_like(&mut self, loc: SourceLocation) -> Token {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if is_ident_char(c) || c.is_ascii_digit() {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if self.peek() == Some('(') {
            self.advance();
            text.push('(');
            return Token::new(TokenKind::Function, text, loc);
        }
        Token::new(TokenKind::Ident, text, loc)
    }

    /// Consume a number, then classify its suffix.
    ///
    /// The machine runs integer -> fraction -> suffix. The suffix narrows a
    /// bitmask over the unit candidates one character at a time; if the run
    /// ends on anything but exactly one fully-matched candidate, the whole
    /// alphanumeric run collapses into a single INVALID token.
    fn consume_number(&mut self, loc: SourceLocation) -> Token {
        let mut text = String::new();

        if let Some(c @ ('+' | '-')) = self.peek() {
            text.push(c);
            self.advance();
        }

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }

        // hex color literal, e.g. 0xff00ff00
        if text == "0" && matches!(self.peek(), Some('x' | 'X')) {
            text.push(self.advance().unwrap_or('x'));
            while let Some(c) = self.peek() {
                if is_ident_char(c) || c.is_ascii_digit() {
                    text.push(c);
                    self.advance();
                } else {
                    break;
                }
            }
            return Token::new(TokenKind::Ident, text, loc);
        }

        if self.peek() == Some('.')
            && self.peek_second().map(|c| c.is_ascii_digit()).unwrap_or(false)
        {
            text.push('.');
            self.advance();
            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    text.push(c);
                    self.advance();
                } else {
                    break;
                }
            }
        }

        if self.peek() == Some('%') {
            text.push('%');
            self.advance();
            return Token::new(TokenKind::Percentage, text, loc);
        }

        let starts_suffix = self.peek().map(is_ident_char).unwrap_or(false);
        if !starts_suffix {
            return Token::new(TokenKind::Number, text, loc);
        }

        let mut mask: u16 = (1 << UNITS.len()) - 1;
        let mut suffix = String::new();
        while let Some(c) = self.peek() {
            if !is_ident_char(c) && !c.is_ascii_digit() {
                break;
            }
            let lc = c.to_ascii_lowercase();
            for (bit, (name, _)) in UNITS.iter().enumerate() {
                if mask & (1 << bit) != 0 && name.chars().nth(suffix.len()) != Some(lc) {
                    mask &= !(1 << bit);
                }
            }
            suffix.push(c);
            self.advance();
        }

        for (bit, (name, kind)) in UNITS.iter().enumerate() {
            if mask & (1 << bit) != 0 && name.len() == suffix.len() {
                text.push_str(&suffix);
                return Token::new(*kind, text, loc);
            }
        }

        text.push_str(&suffix);
        Token::new(TokenKind::Invalid, text, loc)
    }
}

/// Check if character can start an identifier
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c > '\x7F'
}

/// Check if character can appear inside an identifier
fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        Tokenizer::new(input).tokenize_all()
    }

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_single_px_token() {
        let tokens = tokenize("10px");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Px);
        assert_eq!(tokens[0].text, "10px");
    }

    #[test]
    fn test_unknown_unit_is_one_invalid_token() {
        let tokens = tokenize("10xyzzy");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Invalid);
        assert_eq!(tokens[0].text, "10xyzzy");
    }

    #[test]
    fn test_ambiguous_prefix_narrows() {
        // 'p' keeps px, pt and pc alive; the second char decides
        assert_eq!(kinds("1px"), vec![TokenKind::Px]);
        assert_eq!(kinds("1pt"), vec![TokenKind::Pt]);
        assert_eq!(kinds("1pc"), vec![TokenKind::Pc]);
        assert_eq!(kinds("1p"), vec![TokenKind::Invalid]);
    }

    #[test]
    fn test_all_units() {
        assert_eq!(kinds("1em"), vec![TokenKind::Ems]);
        assert_eq!(kinds("1ex"), vec![TokenKind::Exs]);
        assert_eq!(kinds("1cm"), vec![TokenKind::Cm]);
        assert_eq!(kinds("1mm"), vec![TokenKind::Mm]);
        assert_eq!(kinds("1in"), vec![TokenKind::In]);
        assert_eq!(kinds("1deg"), vec![TokenKind::Deg]);
        assert_eq!(kinds("1grad"), vec![TokenKind::Grad]);
        assert_eq!(kinds("1rad"), vec![TokenKind::Rad]);
        assert_eq!(kinds("1turn"), vec![TokenKind::Turn]);
        assert_eq!(kinds("50%"), vec![TokenKind::Percentage]);
    }

    #[test]
    fn test_units_case_insensitive() {
        assert_eq!(kinds("10PX"), vec![TokenKind::Px]);
        assert_eq!(kinds("10Deg"), vec![TokenKind::Deg]);
    }

    #[test]
    fn test_seconds_are_not_a_unit() {
        assert_eq!(kinds("10s"), vec![TokenKind::Invalid]);
        assert_eq!(kinds("10ms"), vec![TokenKind::Invalid]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(kinds("42"), vec![TokenKind::Number]);
        assert_eq!(kinds("3.14"), vec![TokenKind::Number]);
        assert_eq!(kinds(".5"), vec![TokenKind::Number]);
        assert_eq!(kinds("-10px"), vec![TokenKind::Px]);
        assert_eq!(kinds("+2"), vec![TokenKind::Number]);
        assert_eq!(kinds("-.5em"), vec![TokenKind::Ems]);
    }

    #[test]
    fn test_hex_color_literal() {
        let tokens = tokenize("0xff00ff00");
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].text, "0xff00ff00");
    }

    #[test]
    fn test_ident_and_function() {
        let tokens = tokenize("-fx-padding");
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].text, "-fx-padding");

        let tokens = tokenize("rgb(255, 0, 0)");
        assert_eq!(tokens[0].kind, TokenKind::Function);
        assert_eq!(tokens[0].text, "rgb(");
        assert_eq!(tokens[1].kind, TokenKind::Number);
    }

    #[test]
    fn test_hash() {
        let tokens = tokenize("#ff0000");
        assert_eq!(tokens[0].kind, TokenKind::Hash);
        assert_eq!(tokens[0].text, "#ff0000");
    }

    #[test]
    fn test_strings_keep_quotes() {
        let tokens = tokenize("\"hello world\"");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "\"hello world\"");

        let tokens = tokenize("'hello'");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "'hello'");
    }

    #[test]
    fn test_unterminated_string_is_invalid() {
        let tokens = tokenize("\"no end");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Invalid);
    }

    #[test]
    fn test_important() {
        assert_eq!(kinds("!important"), vec![TokenKind::ImportantSym]);
        assert_eq!(kinds("! IMPORTANT"), vec![TokenKind::ImportantSym]);
        assert_eq!(kinds("! /* sure? */ important"), vec![TokenKind::ImportantSym]);
    }

    #[test]
    fn test_malformed_important_skips_to_terminator() {
        let tokens = tokenize("!importunate; x");
        assert_eq!(tokens[0].kind, TokenKind::Skip);
        assert_eq!(tokens[1].kind, TokenKind::Semi);
    }

    #[test]
    fn test_font_face_token() {
        let tokens = tokenize("@font-face");
        assert_eq!(tokens[0].kind, TokenKind::FontFace);
    }

    #[test]
    fn test_other_at_rules_skipped() {
        let tokens = tokenize("@import \"other;style.css\"; a");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Ws);
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].text, "a");
    }

    #[test]
    fn test_comment_is_transparent() {
        assert_eq!(kinds("a/* comment */b"), vec![TokenKind::Ident, TokenKind::Ident]);
    }

    #[test]
    fn test_whitespace_and_newline_are_distinct() {
        assert_eq!(kinds("a b"), vec![TokenKind::Ident, TokenKind::Ws, TokenKind::Ident]);
        assert_eq!(kinds("a\nb"), vec![TokenKind::Ident, TokenKind::Nl, TokenKind::Ident]);
    }

    #[test]
    fn test_crlf_is_a_single_newline() {
        assert_eq!(
            kinds("a\r\nb"),
            vec![TokenKind::Ident, TokenKind::Nl, TokenKind::Ident]
        );
        let tokens = tokenize("a\r\nb");
        assert_eq!(tokens[2].location.line, 2);
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            kinds("{}();:,.>*/"),
            vec![
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Semi,
                TokenKind::Colon,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::Greater,
                TokenKind::Star,
                TokenKind::Solidus,
            ]
        );
    }

    #[test]
    fn test_unknown_char_is_single_invalid() {
        let tokens = tokenize("+++");
        assert_eq!(tokens.len(), 3);
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Invalid));
    }

    #[test]
    fn test_locations() {
        let tokens = tokenize("a {\n  b: 1px;\n}");
        let b = tokens.iter().find(|t| t.text == "b").unwrap();
        assert_eq!(b.location.line, 2);
        assert_eq!(b.location.column, 3);
    }

    #[test]
    fn test_retokenizing_token_text_reproduces_kind() {
        for input in ["10px", "50%", "#abc", "rgb(", "\"str\"", "-fx-base", "1.5em"] {
            let first = Tokenizer::new(input).next_token();
            let again = Tokenizer::new(&first.text).next_token();
            assert_eq!(first.kind, again.kind, "kind not stable for {input}");
        }
    }
}
