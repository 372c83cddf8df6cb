pub mod lexer;
pub mod node;
pub mod parser;
pub mod stream;

pub use self::{
	lexer::{Token, TokenKind, scan},
	node::{Ast, Node, NodeKind},
	parser::generate_ast,
	stream::TokenStream
};
use self::{lexer::Error as LexerError, parser::Error as ParserError};
use std::{
	error::Error as STDError,
	fmt::{Display, Formatter, Result as FMTResult},
	result::Result as STDResult
};

pub type Result<T> = STDResult<T, Error>;

/// A syntax error, raised by either stage of the front end.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
	Lexer(LexerError),
	Parser(ParserError)
}

impl Error {
	/// The 1-based line and column the error points at.
	pub fn location(&self) -> (usize, usize) {
		match self {
			Self::Lexer(lexer) => (lexer.row, lexer.col),
			Self::Parser(parser) => parser.location()
		}
	}
}

impl STDError for Error {
	fn source(&self) -> Option<&(dyn STDError + 'static)> {
		match self {
			Self::Lexer(lexer) => Some(lexer),
			Self::Parser(parser) => Some(parser)
		}
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter) -> FMTResult {
		match self {
			Self::Lexer(lexer) => lexer.fmt(f),
			Self::Parser(parser) => parser.fmt(f)
		}
	}
}

impl From<LexerError> for Error {
	fn from(lexer: LexerError) -> Self {
		Self::Lexer(lexer)
	}
}

impl From<ParserError> for Error {
	fn from(parser: ParserError) -> Self {
		Self::Parser(parser)
	}
}

/// Scans and parses `source` in one go.
///
/// Example
/// -------
/// ```rust
/// # use luagam::ast::{parse, NodeKind};
/// let ast = parse("function GAM() y = x + 1 end").unwrap();
///
/// assert_eq!(ast.len(), 1);
/// assert_eq!(ast.nodes[0].kind, NodeKind::Block);
/// assert!(parse("function GAM() y = end").is_err());
/// ```
pub fn parse(source: &str) -> Result<Ast> {
	let tokens = scan(source)?;
	Ok(generate_ast(&tokens)?)
}
