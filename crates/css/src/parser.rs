//! Stylesheet parser
//!
//! A pull parser with a single token of lookahead. Errors are appended to
//! the parser's error sink and recovered locally at ';', '}' or EOF, so a
//! parse always yields a (possibly partial) stylesheet. Each parse uses its
//! own parser instance; nothing is shared between parses.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{CssError, SourceLocation};
use crate::resolve::ValueResolver;
use crate::selector::Selector;
use crate::tokenizer::{Token, TokenKind, Tokenizer};
use crate::value::ParsedValue;

/// A space-separated run of terms
pub type Seq = Vec<Term>;

/// One node of a declaration's value tree
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// A single value token
    Leaf(Token),
    /// A function application; each argument is a term sequence. A bare
    /// parenthesized group is a call whose name token is '('.
    Call { name: Token, args: Vec<Seq> },
}

impl Term {
    pub fn location(&self) -> SourceLocation {
        match self {
            Term::Leaf(token) => token.location,
            Term::Call { name, .. } => name.location,
        }
    }

    /// The leaf token, if this term is one
    pub fn token(&self) -> Option<&Token> {
        match self {
            Term::Leaf(token) => Some(token),
            Term::Call { .. } => None,
        }
    }

    /// The identifier text, if this term is a leaf identifier
    pub fn ident(&self) -> Option<&str> {
        match self {
            Term::Leaf(token) if token.kind == TokenKind::Ident => Some(&token.text),
            _ => None,
        }
    }

    /// Whether this term is the given identifier, ASCII case-insensitive
    pub fn is_ident(&self, name: &str) -> bool {
        self.ident().map(|s| s.eq_ignore_ascii_case(name)).unwrap_or(false)
    }

    /// The call name and arguments, if this term is a call
    pub fn as_call(&self) -> Option<(&Token, &[Seq])> {
        match self {
            Term::Call { name, args } => Some((name, args)),
            Term::Leaf(_) => None,
        }
    }
}

/// A declaration's full value: comma-separated layers of term sequences
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub layers: Vec<Seq>,
}

/// A resolved declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Property name, lowercased
    pub property: String,
    pub value: ParsedValue,
    /// Whether !important was specified
    pub important: bool,
}

/// A style rule: selectors and their declarations
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
}

/// One source inside an @font-face src list
#[derive(Debug, Clone, PartialEq)]
pub enum FontFaceSrc {
    /// url(...) source
    Url(String),
    /// local(...) source
    Local(String),
    /// A bare font name reference
    Reference(String),
}

/// A parsed @font-face block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FontFace {
    /// Descriptors other than src, keyed by lowercased name
    pub descriptors: FxHashMap<String, String>,
    pub sources: Vec<FontFaceSrc>,
}

/// A parsed stylesheet
#[derive(Debug, Default)]
pub struct Stylesheet {
    /// Where this stylesheet came from, if known
    pub source: Option<String>,
    pub rules: Vec<Rule>,
    pub font_faces: Vec<FontFace>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a stylesheet from text, returning the (possibly partial)
    /// stylesheet together with every error encountered.
    pub fn parse(input: &str) -> (Self, Vec<CssError>) {
        let mut parser = CssParser::new(input);
        let stylesheet = parser.parse();
        (stylesheet, parser.take_errors())
    }

    /// Parse a stylesheet from a reader. A read failure degrades to EOF:
    /// whatever was read up to that point is parsed.
    pub fn from_reader<R: std::io::Read>(
        mut reader: R,
        source: Option<String>,
    ) -> (Self, Vec<CssError>) {
        let mut text = String::new();
        if let Err(err) = reader.read_to_string(&mut text) {
            log::warn!("stylesheet read failed, parsing what was read: {}", err);
        }
        let mut parser = CssParser::new(&text);
        if let Some(source) = source {
            parser = parser.with_source(source);
        }
        let stylesheet = parser.parse();
        (stylesheet, parser.take_errors())
    }
}

/// Stylesheet parser over a single input
pub struct CssParser<'a> {
    tokenizer: Tokenizer<'a>,
    current: Token,
    seen_properties: FxHashSet<String>,
    errors: Vec<CssError>,
    source: Option<String>,
    fail_fast: bool,
    aborted: bool,
}

impl<'a> CssParser<'a> {
    /// Create a parser over the given input
    pub fn new(input: &'a str) -> Self {
        let mut tokenizer = Tokenizer::new(input);
        let current = tokenizer.next_token();
        Self {
            tokenizer,
            current,
            seen_properties: FxHashSet::default(),
            errors: Vec::new(),
            source: None,
            fail_fast: false,
            aborted: false,
        }
    }

    /// Attach a source locator to parsed stylesheets
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Abort the whole parse on the first reported error. The partial
    /// stylesheet built up to that point is still returned.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Errors reported so far
    pub fn errors(&self) -> &[CssError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Drain the error sink
    pub fn take_errors(&mut self) -> Vec<CssError> {
        std::mem::take(&mut self.errors)
    }

    /// Parse a complete stylesheet
    pub fn parse(&mut self) -> Stylesheet {
        let mut stylesheet = Stylesheet {
            source: self.source.clone(),
            rules: Vec::new(),
            font_faces: Vec::new(),
        };

        loop {
            self.skip_ws();
            if self.aborted {
                break;
            }
            match self.current.kind {
                TokenKind::Eof => break,
                TokenKind::FontFace => {
                    if let Some(font_face) = self.font_face() {
                        stylesheet.font_faces.push(font_face);
                    }
                }
                _ => {
                    let Some(selectors) = self.selector_list() else {
                        // recovery skipped past the rule already
                        continue;
                    };
                    self.skip_ws();
                    if self.current.kind != TokenKind::LBrace {
                        self.report(CssError::expected(
                            "'{'",
                            &self.current.text,
                            self.current.location,
                        ));
                        break;
                    }
                    self.bump();
                    let declarations = self.declarations();
                    self.skip_ws();
                    if self.aborted {
                        stylesheet.rules.push(Rule { selectors, declarations });
                        break;
                    }
                    if self.current.kind != TokenKind::RBrace {
                        self.report(CssError::expected(
                            "'}'",
                            &self.current.text,
                            self.current.location,
                        ));
                        break;
                    }
                    self.bump();
                    stylesheet.rules.push(Rule { selectors, declarations });
                }
            }
        }

        log::debug!(
            "parsed {} rules, {} font faces, {} errors",
            stylesheet.rules.len(),
            stylesheet.font_faces.len(),
            self.errors.len()
        );
        stylesheet
    }

    /// Parse declarations only, as found in an element's style attribute.
    /// The result is a stylesheet holding one universal-selector rule.
    pub fn parse_inline_style(&mut self) -> Stylesheet {
        let declarations = self.declarations();
        let mut stylesheet = Stylesheet {
            source: self.source.clone(),
            rules: Vec::new(),
            font_faces: Vec::new(),
        };
        if !declarations.is_empty() {
            stylesheet.rules.push(Rule {
                selectors: vec![Selector::universal()],
                declarations,
            });
        }
        stylesheet
    }

    pub(crate) fn current(&self) -> &Token {
        &self.current
    }

    /// Advance to the next raw token
    pub(crate) fn bump(&mut self) {
        self.current = self.tokenizer.next_token();
    }

    /// Skip whitespace and newline tokens
    pub(crate) fn skip_ws(&mut self) {
        while matches!(self.current.kind, TokenKind::Ws | TokenKind::Nl) {
            self.bump();
        }
    }

    /// Append an error to the sink
    pub(crate) fn report(&mut self, error: CssError) {
        log::warn!("css: {}", error);
        if self.fail_fast {
            self.aborted = true;
        }
        self.errors.push(error);
    }

    /// Skip to the next ';' or '}' without consuming it
    fn skip_to_semi_or_rbrace(&mut self) {
        while !matches!(
            self.current.kind,
            TokenKind::Semi | TokenKind::RBrace | TokenKind::Eof
        ) {
            self.bump();
        }
    }

    /// Skip past the end of the current rule, consuming the '}'
    fn skip_past_rule(&mut self) {
        loop {
            match self.current.kind {
                TokenKind::RBrace => {
                    self.bump();
                    break;
                }
                TokenKind::Eof => break,
                _ => self.bump(),
            }
        }
    }

    fn selector_list(&mut self) -> Option<Vec<Selector>> {
        let mut selectors = Vec::new();
        loop {
            if self.aborted {
                return None;
            }
            match self.selector() {
                Some(selector) => selectors.push(selector),
                None => {
                    self.skip_past_rule();
                    return None;
                }
            }
            self.skip_ws();
            if self.current.kind == TokenKind::Comma {
                self.bump();
                self.skip_ws();
                continue;
            }
            break;
        }
        Some(selectors)
    }

    fn declarations(&mut self) -> Vec<Declaration> {
        let mut declarations = Vec::new();
        loop {
            self.skip_ws();
            if self.aborted {
                break;
            }
            match self.current.kind {
                TokenKind::RBrace | TokenKind::Eof => break,
                TokenKind::Semi => {
                    self.bump();
                    continue;
                }
                _ => {}
            }

            match self.declaration() {
                Some(declaration) => declarations.push(declaration),
                None => {
                    self.skip_to_semi_or_rbrace();
                    if self.current.kind == TokenKind::Semi {
                        self.bump();
                        continue;
                    }
                    break;
                }
            }

            self.skip_ws();
            match self.current.kind {
                TokenKind::Semi => self.bump(),
                TokenKind::RBrace | TokenKind::Eof => break,
                _ => {
                    self.report(CssError::expected(
                        "';'",
                        &self.current.text,
                        self.current.location,
                    ));
                    self.skip_to_semi_or_rbrace();
                    if self.current.kind == TokenKind::Semi {
                        self.bump();
                    } else {
                        break;
                    }
                }
            }
        }
        declarations
    }

    fn declaration(&mut self) -> Option<Declaration> {
        if self.current.kind != TokenKind::Ident {
            self.report(CssError::unexpected_token(
                &self.current.text,
                self.current.location,
            ));
            return None;
        }
        let property = self.current.text.to_lowercase();
        self.bump();
        self.skip_ws();

        if self.current.kind != TokenKind::Colon {
            self.report(CssError::expected(
                "':'",
                &self.current.text,
                self.current.location,
            ));
            return None;
        }
        self.bump();
        self.skip_ws();

        let expr = self.expr()?;

        // registered before resolution, so a value can reference any
        // property declared up to and including this one
        self.seen_properties.insert(property.clone());

        let resolver = ValueResolver::new(&self.seen_properties);
        let value = match resolver.value_for(&property, &expr) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("failed to resolve '{}': {}", property, err);
                self.report(err);
                return None;
            }
        };

        let mut important = false;
        self.skip_ws();
        match self.current.kind {
            TokenKind::ImportantSym => {
                important = true;
                self.bump();
            }
            TokenKind::Skip => {
                self.report(CssError::expected(
                    "'!important'",
                    &self.current.text,
                    self.current.location,
                ));
                self.bump();
            }
            _ => {}
        }

        Some(Declaration { property, value, important })
    }

    /// Parse a value expression: comma-separated layers of adjacent terms
    fn expr(&mut self) -> Option<Expr> {
        let mut layers: Vec<Seq> = Vec::new();
        let mut seq: Seq = Vec::new();

        loop {
            self.skip_ws();
            match self.current.kind {
                TokenKind::Semi
                | TokenKind::RBrace
                | TokenKind::Eof
                | TokenKind::ImportantSym
                | TokenKind::Skip => break,
                TokenKind::Comma => {
                    layers.push(std::mem::take(&mut seq));
                    self.bump();
                }
                TokenKind::Invalid => {
                    self.report(CssError::unexpected_token(
                        &self.current.text,
                        self.current.location,
                    ));
                    self.skip_to_semi_or_rbrace();
                    return None;
                }
                _ => match self.term() {
                    Some(term) => seq.push(term),
                    None => {
                        self.skip_to_semi_or_rbrace();
                        return None;
                    }
                },
            }
        }

        if layers.is_empty() && seq.is_empty() {
            self.report(CssError::unexpected_token(
                &self.current.text,
                self.current.location,
            ));
            return None;
        }
        layers.push(seq);
        Some(Expr { layers })
    }

    fn term(&mut self) -> Option<Term> {
        let token = self.current.clone();
        match token.kind {
            kind if kind.is_size() => {
                self.bump();
                Some(Term::Leaf(token))
            }
            TokenKind::String | TokenKind::Ident | TokenKind::Hash | TokenKind::Solidus => {
                self.bump();
                Some(Term::Leaf(token))
            }
            TokenKind::Function | TokenKind::LParen => {
                self.bump();
                self.call(token)
            }
            _ => {
                self.report(CssError::unexpected_token(&token.text, token.location));
                None
            }
        }
    }

    /// Parse the arguments of a function term, through the closing ')'
    fn call(&mut self, name: Token) -> Option<Term> {
        let mut args: Vec<Seq> = Vec::new();
        let mut seq: Seq = Vec::new();

        loop {
            self.skip_ws();
            match self.current.kind {
                TokenKind::RParen => {
                    self.bump();
                    if !seq.is_empty() || !args.is_empty() {
                        args.push(seq);
                    }
                    return Some(Term::Call { name, args });
                }
                TokenKind::Comma => {
                    args.push(std::mem::take(&mut seq));
                    self.bump();
                }
                TokenKind::Eof => {
                    self.report(CssError::unexpected_eof(self.current.location));
                    return None;
                }
                TokenKind::Invalid => {
                    self.report(CssError::unexpected_token(
                        &self.current.text,
                        self.current.location,
                    ));
                    return None;
                }
                _ => match self.term() {
                    Some(term) => seq.push(term),
                    None => return None,
                },
            }
        }
    }

    /// Parse an @font-face block into descriptors and a source list
    fn font_face(&mut self) -> Option<FontFace> {
        self.bump(); // @font-face
        self.skip_ws();

        if self.current.kind != TokenKind::LBrace {
            self.report(CssError::expected(
                "'{'",
                &self.current.text,
                self.current.location,
            ));
            self.skip_past_rule();
            return None;
        }
        self.bump();

        let mut font_face = FontFace::default();
        loop {
            self.skip_ws();
            match self.current.kind {
                TokenKind::RBrace => {
                    self.bump();
                    break;
                }
                TokenKind::Eof => {
                    self.report(CssError::unexpected_eof(self.current.location));
                    break;
                }
                TokenKind::Semi => {
                    self.bump();
                    continue;
                }
                TokenKind::Ident => {}
                _ => {
                    self.report(CssError::unexpected_token(
                        &self.current.text,
                        self.current.location,
                    ));
                    self.skip_to_semi_or_rbrace();
                    continue;
                }
            }

            let name = self.current.text.to_lowercase();
            self.bump();
            self.skip_ws();
            if self.current.kind != TokenKind::Colon {
                self.report(CssError::expected(
                    "':'",
                    &self.current.text,
                    self.current.location,
                ));
                self.skip_to_semi_or_rbrace();
                continue;
            }
            self.bump();
            self.skip_ws();

            if name == "src" {
                match self.font_face_sources() {
                    Some(mut sources) => font_face.sources.append(&mut sources),
                    None => self.skip_to_semi_or_rbrace(),
                }
            } else {
                let mut value = String::new();
                while !matches!(
                    self.current.kind,
                    TokenKind::Semi | TokenKind::RBrace | TokenKind::Eof
                ) {
                    if self.current.kind == TokenKind::String {
                        value.push_str(strip_quotes(&self.current.text));
                    } else {
                        value.push_str(&self.current.text);
                    }
                    self.bump();
                }
                font_face.descriptors.insert(name, value.trim().to_string());
            }
        }

        Some(font_face)
    }

    fn font_face_sources(&mut self) -> Option<Vec<FontFaceSrc>> {
        let mut sources = Vec::new();
        loop {
            self.skip_ws();
            match self.current.kind {
                TokenKind::Function => {
                    let name = self.current.text.to_lowercase();
                    let location = self.current.location;
                    self.bump();
                    match name.as_str() {
                        "url(" => {
                            let url = self.function_string_arg()?;
                            self.skip_ws();
                            // an optional format(...) hint is validated and dropped
                            if self.current.kind == TokenKind::Function
                                && self.current.text.eq_ignore_ascii_case("format(")
                            {
                                self.bump();
                                self.function_string_arg()?;
                            }
                            sources.push(FontFaceSrc::Url(url));
                        }
                        "local(" => {
                            let family = self.function_string_arg()?;
                            sources.push(FontFaceSrc::Local(family));
                        }
                        _ => {
                            self.report(CssError::parse_error(
                                format!("Unexpected function '{}' in src", name),
                                location,
                            ));
                            return None;
                        }
                    }
                }
                TokenKind::Ident => {
                    sources.push(FontFaceSrc::Reference(self.current.text.clone()));
                    self.bump();
                }
                _ => {
                    self.report(CssError::expected(
                        "<font-face-src>",
                        &self.current.text,
                        self.current.location,
                    ));
                    return None;
                }
            }

            self.skip_ws();
            if self.current.kind == TokenKind::Comma {
                self.bump();
                continue;
            }
            break;
        }
        Some(sources)
    }

    /// Consume a single quoted-string argument and the closing ')'
    fn function_string_arg(&mut self) -> Option<String> {
        self.skip_ws();
        if self.current.kind != TokenKind::String {
            self.report(CssError::expected(
                "<string>",
                &self.current.text,
                self.current.location,
            ));
            return None;
        }
        let value = strip_quotes(&self.current.text).to_string();
        self.bump();
        self.skip_ws();
        if self.current.kind != TokenKind::RParen {
            self.report(CssError::expected(
                "')'",
                &self.current.text,
                self.current.location,
            ));
            return None;
        }
        self.bump();
        Some(value)
    }
}

/// Remove matching surrounding quotes, if any
pub(crate) fn strip_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if s.len() >= 2 && (bytes[0] == b'"' || bytes[0] == b'\'') && bytes[s.len() - 1] == bytes[0] {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Converter, Payload, Size, SizeUnits};

    fn parse(input: &str) -> (Stylesheet, Vec<CssError>) {
        let _ = env_logger::builder().is_test(true).try_init();
        Stylesheet::parse(input)
    }

    #[test]
    fn test_simple_rule() {
        let (sheet, errors) = parse("button { -fx-padding: 2px; }");
        assert!(errors.is_empty());
        assert_eq!(sheet.rules.len(), 1);
        let rule = &sheet.rules[0];
        assert_eq!(rule.selectors.len(), 1);
        assert_eq!(rule.selectors[0].parts[0].element, "button");
        assert_eq!(rule.declarations.len(), 1);
        assert_eq!(rule.declarations[0].property, "-fx-padding");
    }

    #[test]
    fn test_padding_shorthand_expansion() {
        let (sheet, errors) = parse("a { -fx-padding: 1px 2px; }");
        assert!(errors.is_empty());
        let value = &sheet.rules[0].declarations[0].value;
        assert_eq!(value.converter, Converter::Insets);
        let sides = value.as_sequence().unwrap();
        assert_eq!(sides.len(), 4);
        // top, right, bottom = top, left = right
        assert_eq!(sides[0].as_size(), Some(Size::new(1.0, SizeUnits::Px)));
        assert_eq!(sides[1].as_size(), Some(Size::new(2.0, SizeUnits::Px)));
        assert_eq!(sides[2].as_size(), Some(Size::new(1.0, SizeUnits::Px)));
        assert_eq!(sides[3].as_size(), Some(Size::new(2.0, SizeUnits::Px)));
    }

    #[test]
    fn test_recovery_keeps_later_declarations() {
        let (sheet, errors) = parse("a { x: 1px; +++ ; y: 2px; }");
        assert_eq!(errors.len(), 1);
        let decls = &sheet.rules[0].declarations;
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].property, "x");
        assert_eq!(decls[1].property, "y");
    }

    #[test]
    fn test_missing_colon_recovers() {
        let (sheet, errors) = parse("a { x 1px; y: 2px; }");
        assert_eq!(errors.len(), 1);
        let decls = &sheet.rules[0].declarations;
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].property, "y");
    }

    #[test]
    fn test_empty_value_is_an_error() {
        let (sheet, errors) = parse("a { x: ; }");
        assert_eq!(errors.len(), 1);
        assert!(sheet.rules[0].declarations.is_empty());
    }

    #[test]
    fn test_important() {
        let (sheet, errors) = parse("a { -fx-fill: red !important; }");
        assert!(errors.is_empty());
        assert!(sheet.rules[0].declarations[0].important);
    }

    #[test]
    fn test_malformed_important_is_reported() {
        let (sheet, errors) = parse("a { -fx-fill: red !importont; -fx-opacity: 1; }");
        assert_eq!(errors.len(), 1);
        let decls = &sheet.rules[0].declarations;
        assert_eq!(decls.len(), 2);
        assert!(!decls[0].important);
    }

    #[test]
    fn test_selector_list() {
        let (sheet, errors) = parse(".a, .b { -fx-fill: red; }");
        assert!(errors.is_empty());
        assert_eq!(sheet.rules[0].selectors.len(), 2);
    }

    #[test]
    fn test_multiple_rules_and_comments() {
        let (sheet, errors) = parse(
            "/* header */\n.a { -fx-fill: red; }\n\n.b { -fx-opacity: 0.5; }\n",
        );
        assert!(errors.is_empty());
        assert_eq!(sheet.rules.len(), 2);
    }

    #[test]
    fn test_bad_selector_skips_whole_rule() {
        let (sheet, errors) = parse(".. { -fx-fill: red; } b { -fx-opacity: 1; }");
        assert!(!errors.is_empty());
        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(sheet.rules[0].selectors[0].parts[0].element, "b");
    }

    #[test]
    fn test_layers_split_on_comma() {
        let (sheet, errors) = parse("a { -fx-background-color: red, blue; }");
        assert!(errors.is_empty());
        let value = &sheet.rules[0].declarations[0].value;
        assert_eq!(value.converter, Converter::PaintSequence);
        assert_eq!(value.as_sequence().unwrap().len(), 2);
    }

    #[test]
    fn test_lookup_value() {
        let (sheet, errors) = parse("a { -fx-base: #ff0000; -fx-color: -fx-base; }");
        assert!(errors.is_empty());
        let decls = &sheet.rules[0].declarations;
        assert!(!decls[0].value.lookup);
        assert!(decls[1].value.lookup);
        assert_eq!(decls[1].value.as_str(), Some("-fx-base"));
    }

    #[test]
    fn test_inline_style() {
        let mut parser = CssParser::new("-fx-fill: red; -fx-opacity: 0.5");
        let sheet = parser.parse_inline_style();
        assert!(!parser.has_errors());
        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(sheet.rules[0].selectors[0].parts[0].element, "*");
        assert_eq!(sheet.rules[0].declarations.len(), 2);
    }

    #[test]
    fn test_fail_fast_stops_at_first_error() {
        let mut parser =
            CssParser::new("a { x: ; y: ; z: 1px; }").with_fail_fast(true);
        parser.parse();
        assert_eq!(parser.errors().len(), 1);
    }

    #[test]
    fn test_font_face() {
        let (sheet, errors) = parse(
            "@font-face { font-family: 'MyFont'; src: url('fonts/my.ttf') format('truetype'), local('Arial'); }\n\
             a { -fx-fill: red; }",
        );
        assert!(errors.is_empty());
        assert_eq!(sheet.font_faces.len(), 1);
        let font_face = &sheet.font_faces[0];
        assert_eq!(font_face.descriptors.get("font-family").map(String::as_str), Some("MyFont"));
        assert_eq!(
            font_face.sources,
            vec![
                FontFaceSrc::Url("fonts/my.ttf".to_string()),
                FontFaceSrc::Local("Arial".to_string()),
            ]
        );
        assert_eq!(sheet.rules.len(), 1);
    }

    #[test]
    fn test_source_locator() {
        let mut parser = CssParser::new("a { -fx-fill: red; }").with_source("theme.css");
        let sheet = parser.parse();
        assert_eq!(sheet.source.as_deref(), Some("theme.css"));
    }

    #[test]
    fn test_from_reader() {
        let input = b"a { -fx-fill: red; }" as &[u8];
        let (sheet, errors) = Stylesheet::from_reader(input, Some("mem".to_string()));
        assert!(errors.is_empty());
        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(sheet.source.as_deref(), Some("mem"));
    }

    #[test]
    fn test_unknown_at_rule_is_skipped() {
        let (sheet, errors) = parse("@import 'other.css';\na { -fx-fill: red; }");
        assert!(errors.is_empty());
        assert_eq!(sheet.rules.len(), 1);
    }

    #[test]
    fn test_generic_number_value() {
        let (sheet, errors) = parse("a { -fx-opacity: 0.5; }");
        assert!(errors.is_empty());
        let value = &sheet.rules[0].declarations[0].value;
        assert_eq!(value.converter, Converter::Size);
        assert_eq!(value.as_size(), Some(Size::px(0.5)));
    }

    #[test]
    fn test_nested_function_terms() {
        let (sheet, errors) =
            parse("a { -fx-background-color: derive(rgb(0, 0, 255), 20%); }");
        assert!(errors.is_empty());
        let value = &sheet.rules[0].declarations[0].value;
        assert_eq!(value.converter, Converter::PaintSequence);
        let layer = &value.as_sequence().unwrap()[0];
        assert_eq!(layer.converter, Converter::DeriveColor);
        match &layer.payload {
            Payload::Sequence(parts) => assert_eq!(parts.len(), 2),
            other => panic!("unexpected payload {:?}", other),
        }
    }
}
