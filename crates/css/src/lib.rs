//! Nimbus CSS
//!
//! Stylesheet tokenizer, parser and value resolver. Parsing is lenient:
//! errors are collected per parse and the surrounding rule or declaration
//! is skipped, so one bad declaration never takes down a stylesheet.
//!
//! ```
//! use nimbus_css::Stylesheet;
//!
//! let (sheet, errors) = Stylesheet::parse(".button { -fx-padding: 4px 8px; }");
//! assert!(errors.is_empty());
//! assert_eq!(sheet.rules.len(), 1);
//! ```

mod error;
mod parser;
mod resolve;
mod selector;
mod tokenizer;
mod value;

pub use error::{CssError, CssResult, SourceLocation};
pub use parser::{
    CssParser, Declaration, Expr, FontFace, FontFaceSrc, Rule, Seq, Stylesheet, Term,
};
pub use selector::{Combinator, Selector, SimpleSelector};
pub use tokenizer::{Token, TokenKind, Tokenizer};
pub use value::{Color, Converter, ParsedValue, Payload, Size, SizeUnits};
