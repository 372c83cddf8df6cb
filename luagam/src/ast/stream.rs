use self::super::lexer::{Token, TokenKind};
use itertools::Itertools;
use std::slice::Iter;

/// The scanner's output: every token of a source, comments included, always
/// closed by exactly one `ENDCODE` sentinel.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenStream {
	tokens: Vec<Token>
}

impl TokenStream {
	pub(crate) fn terminate(mut tokens: Vec<Token>, row: usize, col: usize) -> Self {
		tokens.push(Token::end_of_code(row, col));
		Self {tokens}
	}

	/// The number of tokens, sentinel included.
	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	/// Always false, as the sentinel is always present.
	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<&Token> {
		self.tokens.get(index)
	}

	pub fn iter(&self) -> Iter<'_, Token> {
		self.tokens.iter()
	}

	pub fn cursor(&self) -> Cursor<'_> {
		Cursor::new(self)
	}
}

impl<'t> IntoIterator for &'t TokenStream {
	type Item = &'t Token;
	type IntoIter = Iter<'t, Token>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// A position in a [`TokenStream`], as seen by the parser.
///
/// Comments are trivia to the cursor: it only ever rests on significant
/// tokens or on the sentinel, and its lookahead and lookbehind skip them too.
/// Saving [`position`](Self::position) and handing it back to
/// [`rewind`](Self::rewind) is how the parser backtracks.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'t> {
	tokens: &'t [Token],
	position: usize
}

impl<'t> Cursor<'t> {
	pub fn new(stream: &'t TokenStream) -> Self {
		let mut cursor = Self {tokens: &stream.tokens, position: 0};
		cursor.skip_comments();
		cursor
	}

	fn skip_comments(&mut self) {
		while self.position + 1 < self.tokens.len()
			&& self.tokens[self.position].kind == TokenKind::Comment
				{self.position += 1}
	}

	/// The token under the cursor. Once the sentinel is reached, it stays the
	/// current token forever.
	pub fn current(&self) -> &'t Token {
		&self.tokens[self.position]
	}

	/// The significant token right after the current one.
	#[allow(clippy::should_implement_trait)]
	pub fn next(&self) -> Option<&'t Token> {
		self.tokens.get(self.position + 1..)?.iter()
			.find(|token| token.kind != TokenKind::Comment)
	}

	/// The significant token right before the current one.
	pub fn prev(&self) -> Option<&'t Token> {
		self.tokens[..self.position].iter().rev()
			.find(|token| token.kind != TokenKind::Comment)
	}

	/// The comments between the previous significant token and the current
	/// one, in source order.
	pub fn preceding_comments(&self) -> Vec<&'t Token> {
		let mut comments = self.tokens[..self.position].iter().rev()
			.take_while(|token| token.kind == TokenKind::Comment)
			.collect_vec();
		comments.reverse();
		comments
	}

	/// Moves to the next significant token, unless the sentinel was reached.
	pub fn advance(&mut self) {
		if !self.at_end() {
			self.position += 1;
			self.skip_comments();
		}
	}

	pub fn at_end(&self) -> bool {
		self.current().kind == TokenKind::EndCode
	}

	pub fn position(&self) -> usize {
		self.position
	}

	/// Moves back to a position previously returned by
	/// [`position`](Self::position).
	pub fn rewind(&mut self, position: usize) {
		self.position = position;
	}
}
