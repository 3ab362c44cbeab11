//! Selector model and parsing
//!
//! Selectors are parsed from raw tokens rather than the whitespace-skipping
//! grammar stream, because a run of whitespace between two simple selectors
//! is itself the descendant combinator.

use std::fmt;

use smallvec::SmallVec;

use crate::error::CssError;
use crate::parser::CssParser;
use crate::tokenizer::TokenKind;

/// Combinator between two simple selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Whitespace: any descendant
    Descendant,
    /// '>': direct child
    Child,
}

/// A simple selector: element (or '*'), style classes, optional id and
/// pseudo-classes.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleSelector {
    pub element: String,
    pub id: Option<String>,
    pub classes: SmallVec<[String; 4]>,
    pub pseudo_classes: SmallVec<[String; 4]>,
}

impl SimpleSelector {
    pub fn universal() -> Self {
        Self {
            element: "*".to_string(),
            id: None,
            classes: SmallVec::new(),
            pseudo_classes: SmallVec::new(),
        }
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.element)?;
        for class in &self.classes {
            write!(f, ".{}", class)?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{}", id)?;
        }
        for pseudo in &self.pseudo_classes {
            write!(f, ":{}", pseudo)?;
        }
        Ok(())
    }
}

/// A selector: one simple selector, or several joined by combinators.
/// `parts.len() == combinators.len() + 1` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    pub parts: Vec<SimpleSelector>,
    pub combinators: Vec<Combinator>,
}

impl Selector {
    pub fn universal() -> Self {
        Self {
            parts: vec![SimpleSelector::universal()],
            combinators: Vec::new(),
        }
    }

    pub fn is_compound(&self) -> bool {
        self.parts.len() > 1
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parts[0])?;
        for (combinator, part) in self.combinators.iter().zip(&self.parts[1..]) {
            match combinator {
                Combinator::Descendant => write!(f, " {}", part)?,
                Combinator::Child => write!(f, " > {}", part)?,
            }
        }
        Ok(())
    }
}

impl<'a> CssParser<'a> {
    /// Parse one selector, possibly compound. Returns None after reporting
    /// on malformed input; the caller recovers to the end of the rule.
    pub(crate) fn selector(&mut self) -> Option<Selector> {
        let first = self.simple_selector()?;
        let mut parts = vec![first];
        let mut combinators = Vec::new();

        while let Some(combinator) = self.combinator() {
            let next = self.simple_selector()?;
            combinators.push(combinator);
            parts.push(next);
        }

        Some(Selector { parts, combinators })
    }

    fn simple_selector(&mut self) -> Option<SimpleSelector> {
        let start = self.current().location;
        let mut element = String::new();
        let mut id = None;
        let mut classes: SmallVec<[String; 4]> = SmallVec::new();
        let mut pseudo_classes: SmallVec<[String; 4]> = SmallVec::new();
        let mut seen_element = false;

        loop {
            match self.current().kind {
                TokenKind::Star if !seen_element => {
                    element = "*".to_string();
                    seen_element = true;
                    self.bump();
                }
                TokenKind::Ident if !seen_element => {
                    element = self.current().text.clone();
                    seen_element = true;
                    self.bump();
                }
                TokenKind::Dot => {
                    self.bump();
                    if self.current().kind == TokenKind::Ident {
                        classes.push(self.current().text.clone());
                        self.bump();
                    } else {
                        self.report(CssError::invalid_selector(
                            "Expected style class after '.'",
                            self.current().location,
                        ));
                        return None;
                    }
                }
                TokenKind::Hash => {
                    id = Some(self.current().text[1..].to_string());
                    self.bump();
                }
                TokenKind::Colon => {
                    self.bump();
                    if self.current().kind == TokenKind::Ident {
                        pseudo_classes.push(self.current().text.clone());
                        self.bump();
                    } else {
                        self.report(CssError::invalid_selector(
                            "Expected pseudo-class after ':'",
                            self.current().location,
                        ));
                        return None;
                    }
                }
                TokenKind::Ws
                | TokenKind::Nl
                | TokenKind::Comma
                | TokenKind::Greater
                | TokenKind::LBrace
                | TokenKind::Eof => break,
                _ => {
                    self.report(CssError::invalid_selector(
                        format!("Unexpected token '{}'", self.current().text),
                        self.current().location,
                    ));
                    return None;
                }
            }
        }

        if !seen_element && id.is_none() && classes.is_empty() && pseudo_classes.is_empty() {
            self.report(CssError::invalid_selector("Expected selector", start));
            return None;
        }

        if element.is_empty() {
            element = "*".to_string();
        }

        Some(SimpleSelector { element, id, classes, pseudo_classes })
    }

    /// Decide whether the gap before the next token is a combinator. Eats
    /// any whitespace it inspects; returns None at the end of the selector.
    fn combinator(&mut self) -> Option<Combinator> {
        match self.current().kind {
            TokenKind::Greater => {
                self.bump();
                self.skip_ws();
                Some(Combinator::Child)
            }
            TokenKind::Ws | TokenKind::Nl => {
                self.skip_ws();
                match self.current().kind {
                    TokenKind::Greater => {
                        self.bump();
                        self.skip_ws();
                        Some(Combinator::Child)
                    }
                    TokenKind::Ident
                    | TokenKind::Star
                    | TokenKind::Dot
                    | TokenKind::Hash
                    | TokenKind::Colon => Some(Combinator::Descendant),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_selector(input: &str) -> Option<Selector> {
        let mut parser = CssParser::new(input);
        parser.selector()
    }

    #[test]
    fn test_element_selector() {
        let sel = parse_selector("button").unwrap();
        assert_eq!(sel.parts.len(), 1);
        assert_eq!(sel.parts[0].element, "button");
    }

    #[test]
    fn test_universal_selector() {
        let sel = parse_selector("*").unwrap();
        assert_eq!(sel.parts[0].element, "*");
    }

    #[test]
    fn test_class_and_id() {
        let sel = parse_selector(".toolbar.raised#main").unwrap();
        let part = &sel.parts[0];
        assert_eq!(part.element, "*");
        assert_eq!(part.classes.as_slice(), ["toolbar", "raised"]);
        assert_eq!(part.id.as_deref(), Some("main"));
    }

    #[test]
    fn test_pseudo_classes() {
        let sel = parse_selector("button:hover:focused").unwrap();
        assert_eq!(sel.parts[0].pseudo_classes.as_slice(), ["hover", "focused"]);
    }

    #[test]
    fn test_descendant_combinator() {
        let sel = parse_selector("pane .label").unwrap();
        assert_eq!(sel.parts.len(), 2);
        assert_eq!(sel.combinators, vec![Combinator::Descendant]);
        assert_eq!(sel.parts[1].classes.as_slice(), ["label"]);
    }

    #[test]
    fn test_child_combinator() {
        let sel = parse_selector("pane > .label").unwrap();
        assert_eq!(sel.combinators, vec![Combinator::Child]);

        // '>' without surrounding whitespace
        let sel = parse_selector("pane>.label").unwrap();
        assert_eq!(sel.combinators, vec![Combinator::Child]);
    }

    #[test]
    fn test_mixed_combinators() {
        let sel = parse_selector("a > b c").unwrap();
        assert_eq!(sel.parts.len(), 3);
        assert_eq!(sel.combinators, vec![Combinator::Child, Combinator::Descendant]);
    }

    #[test]
    fn test_malformed_class() {
        let mut parser = CssParser::new(". {");
        assert!(parser.selector().is_none());
        assert!(!parser.errors().is_empty());
    }

    #[test]
    fn test_display_round_trip() {
        let sel = parse_selector("pane > .label:hover").unwrap();
        assert_eq!(sel.to_string(), "pane > *.label:hover");
    }
}
