use self::super::stream::TokenStream;
use std::fmt::{Display, Formatter, Result as FMTResult};
use thiserror::Error;
use tracing::{debug, error};

pub type Result<T> = std::result::Result<T, Error>;

/// A scan failure, carrying the position where the offending lexeme starts and
/// the part of it read so far.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("[Line:{row}, Col:{col}, Token:`{token}`] {reason}")]
pub struct Error {
	pub row: usize,
	pub col: usize,
	pub token: String,
	pub reason: Reason
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Reason {
	#[error("String not closed.")]
	UnterminatedString,
	#[error("Long bracket not closed.")]
	UnterminatedLongBracket,
	#[error("Error in long bracket.")]
	MalformedLongBracket,
	#[error("Wrong number punctuation.")]
	NumberPunctuation,
	#[error("Expecting number after `{0}`.")]
	MissingDigits(char)
}

/// Every lexical category a token can belong to.
///
/// The discriminant of each variant is its index in the static syntax table,
/// which holds the spelling matched in source text and the short name used in
/// dumps and diagnostics. Only keywords and operators are ever matched by
/// spelling, the remaining categories are classified by their leading
/// characters.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenKind {
	/// The `require` keyword.
	KeywordRequire,

	/// The sentinel closing every token stream.
	EndCode,

	/// Reserved line break category, never produced by the scanner.
	EndLine,

	// Keywords

	/// The `and` keyword.
	KeywordAnd,

	/// The `break` keyword.
	KeywordBreak,

	/// The `do` keyword.
	KeywordDo,

	/// The `else` keyword.
	KeywordElse,

	/// The `elseif` keyword.
	KeywordElseIf,

	/// The `end` keyword.
	KeywordEnd,

	/// The `false` keyword.
	LiteralFalse,

	/// The `for` keyword.
	KeywordFor,

	/// The `function` keyword.
	KeywordFunction,

	/// The `goto` keyword.
	KeywordGoto,

	/// The `if` keyword.
	KeywordIf,

	/// The `in` keyword.
	KeywordIn,

	/// The `local` keyword.
	KeywordLocal,

	/// The `nil` keyword.
	LiteralNil,

	/// The `not` keyword.
	KeywordNot,

	/// The `or` keyword.
	KeywordOr,

	/// The `repeat` keyword.
	KeywordRepeat,

	/// The `return` keyword.
	KeywordReturn,

	/// The `then` keyword.
	KeywordThen,

	/// The `true` keyword.
	LiteralTrue,

	/// The `until` keyword.
	KeywordUntil,

	/// The `while` keyword.
	KeywordWhile,

	// Multiple character operators, longest first

	/// The `...` symbol.
	VarArgs,

	/// The `..` symbol.
	Concat,

	/// The `//` symbol.
	FloorDivide,

	/// The `==` symbol.
	Equal,

	/// The `~=` symbol.
	NotEqual,

	/// The `<=` symbol.
	LessThanOrEqual,

	/// The `>=` symbol.
	GreaterThanOrEqual,

	/// The `::` symbol.
	DoubleColon,

	/// The `>>` symbol.
	ShiftRight,

	/// The `<<` symbol.
	ShiftLeft,

	// Single character operators

	/// The `+` symbol.
	Add,

	/// The `-` symbol.
	Minus,

	/// The `*` symbol.
	Multiply,

	/// The `/` symbol.
	Divide,

	/// The `%` symbol.
	Modulo,

	/// The `^` symbol.
	Exponent,

	/// The `#` symbol.
	Length,

	/// The `<` symbol.
	LessThan,

	/// The `>` symbol.
	GreaterThan,

	/// The `=` symbol.
	Assign,

	/// The `&` symbol.
	BitwiseAnd,

	/// The `|` symbol.
	BitwiseOr,

	/// The `~` symbol.
	BitwiseNotOrXOr,

	/// The `(` symbol.
	OpenParen,

	/// The `)` symbol.
	CloseParen,

	/// The `{` symbol.
	OpenCurly,

	/// The `}` symbol.
	CloseCurly,

	/// The `[` symbol.
	OpenBracket,

	/// The `]` symbol.
	CloseBracket,

	/// The `:` symbol.
	Colon,

	/// The `,` symbol.
	Comma,

	/// The `.` symbol.
	Period,

	/// The `;` symbol.
	SemiColon,

	/// Reserved whitespace category, never produced by the scanner.
	Space,

	// Classified by leading characters

	/// An identifier, excluding keywords.
	Identifier,

	/// A quoted or long bracket string, kept verbatim with its delimiters.
	String,

	/// A line or long bracket comment, kept verbatim with its leading `--`.
	Comment,

	/// A decimal or hexadecimal numeral.
	Number
}

/// The syntax table, indexed by [`TokenKind`] discriminant: kind, spelling and
/// name.
static SYNTAX_ELEMENTS: [(TokenKind, &str, &str); 63] = [
	(TokenKind::KeywordRequire, "require", "REQUIRE"),
	(TokenKind::EndCode, "endcode", "ENDCODE"),
	(TokenKind::EndLine, "endline", "ENDLINE"),
	(TokenKind::KeywordAnd, "and", "AND"),
	(TokenKind::KeywordBreak, "break", "BREAK"),
	(TokenKind::KeywordDo, "do", "DO"),
	(TokenKind::KeywordElse, "else", "ELSE"),
	(TokenKind::KeywordElseIf, "elseif", "ELSEIF"),
	(TokenKind::KeywordEnd, "end", "END"),
	(TokenKind::LiteralFalse, "false", "FALSE"),
	(TokenKind::KeywordFor, "for", "FOR"),
	(TokenKind::KeywordFunction, "function", "FUNCTION"),
	(TokenKind::KeywordGoto, "goto", "GOTO"),
	(TokenKind::KeywordIf, "if", "IF"),
	(TokenKind::KeywordIn, "in", "IN"),
	(TokenKind::KeywordLocal, "local", "LOCAL"),
	(TokenKind::LiteralNil, "nil", "NIL"),
	(TokenKind::KeywordNot, "not", "NOT"),
	(TokenKind::KeywordOr, "or", "OR"),
	(TokenKind::KeywordRepeat, "repeat", "REPEAT"),
	(TokenKind::KeywordReturn, "return", "RETURN"),
	(TokenKind::KeywordThen, "then", "THEN"),
	(TokenKind::LiteralTrue, "true", "TRUE"),
	(TokenKind::KeywordUntil, "until", "UNTIL"),
	(TokenKind::KeywordWhile, "while", "WHILE"),
	(TokenKind::VarArgs, "...", "VARARGS"),
	(TokenKind::Concat, "..", "CONCAT"),
	(TokenKind::FloorDivide, "//", "FLOOR"),
	(TokenKind::Equal, "==", "EQ"),
	(TokenKind::NotEqual, "~=", "NEQ"),
	(TokenKind::LessThanOrEqual, "<=", "LTEQ"),
	(TokenKind::GreaterThanOrEqual, ">=", "GTEQ"),
	(TokenKind::DoubleColon, "::", "COLCOL"),
	(TokenKind::ShiftRight, ">>", "BITRSHIFT"),
	(TokenKind::ShiftLeft, "<<", "BITLSHIFT"),
	(TokenKind::Add, "+", "ADD"),
	(TokenKind::Minus, "-", "MINUS"),
	(TokenKind::Multiply, "*", "MULT"),
	(TokenKind::Divide, "/", "DIV"),
	(TokenKind::Modulo, "%", "MOD"),
	(TokenKind::Exponent, "^", "POW"),
	(TokenKind::Length, "#", "LENGTH"),
	(TokenKind::LessThan, "<", "LT"),
	(TokenKind::GreaterThan, ">", "GT"),
	(TokenKind::Assign, "=", "ASSIGN"),
	(TokenKind::BitwiseAnd, "&", "BITAND"),
	(TokenKind::BitwiseOr, "|", "BITOR"),
	(TokenKind::BitwiseNotOrXOr, "~", "BITNOT"),
	(TokenKind::OpenParen, "(", "OPAR"),
	(TokenKind::CloseParen, ")", "CPAR"),
	(TokenKind::OpenCurly, "{", "OBRACE"),
	(TokenKind::CloseCurly, "}", "CBRACE"),
	(TokenKind::OpenBracket, "[", "OBRACK"),
	(TokenKind::CloseBracket, "]", "CBRACK"),
	(TokenKind::Colon, ":", "COL"),
	(TokenKind::Comma, ",", "COMMA"),
	(TokenKind::Period, ".", "DOT"),
	(TokenKind::SemiColon, ";", "SEMCOL"),
	(TokenKind::Space, " ", "SPACE"),
	(TokenKind::Identifier, "ID", "ID"),
	(TokenKind::String, "STRING", "STRING"),
	(TokenKind::Comment, "COMM", "COMM"),
	(TokenKind::Number, "NUM", "NUM")
];

/// Every keyword, matched against whole identifier-like runs.
pub static KEYWORDS: [TokenKind; 23] = [
	TokenKind::KeywordRequire, TokenKind::KeywordAnd, TokenKind::KeywordBreak,
	TokenKind::KeywordDo, TokenKind::KeywordElse, TokenKind::KeywordElseIf,
	TokenKind::KeywordEnd, TokenKind::LiteralFalse, TokenKind::KeywordFor,
	TokenKind::KeywordFunction, TokenKind::KeywordGoto, TokenKind::KeywordIf,
	TokenKind::KeywordIn, TokenKind::KeywordLocal, TokenKind::LiteralNil,
	TokenKind::KeywordNot, TokenKind::KeywordOr, TokenKind::KeywordRepeat,
	TokenKind::KeywordReturn, TokenKind::KeywordThen, TokenKind::LiteralTrue,
	TokenKind::KeywordUntil, TokenKind::KeywordWhile
];

/// Every operator and punctuation symbol, ordered so the first prefix match
/// at the cursor is also the longest one.
pub static OPERATORS: [TokenKind; 33] = [
	TokenKind::VarArgs, TokenKind::Concat, TokenKind::FloorDivide,
	TokenKind::Equal, TokenKind::NotEqual, TokenKind::LessThanOrEqual,
	TokenKind::GreaterThanOrEqual, TokenKind::DoubleColon, TokenKind::ShiftRight,
	TokenKind::ShiftLeft, TokenKind::Add, TokenKind::Minus, TokenKind::Multiply,
	TokenKind::Divide, TokenKind::Modulo, TokenKind::Exponent, TokenKind::Length,
	TokenKind::LessThan, TokenKind::GreaterThan, TokenKind::Assign,
	TokenKind::BitwiseAnd, TokenKind::BitwiseOr, TokenKind::BitwiseNotOrXOr,
	TokenKind::OpenParen, TokenKind::CloseParen, TokenKind::OpenCurly,
	TokenKind::CloseCurly, TokenKind::OpenBracket, TokenKind::CloseBracket,
	TokenKind::Colon, TokenKind::Comma, TokenKind::Period, TokenKind::SemiColon
];

impl TokenKind {
	/// The text this kind is matched against, or a placeholder for the
	/// categories classified by leading characters.
	pub fn spelling(self) -> &'static str {
		SYNTAX_ELEMENTS[self as usize].1
	}

	/// The short upper case name of this kind, as printed in syntax tree dumps.
	pub fn name(self) -> &'static str {
		SYNTAX_ELEMENTS[self as usize].2
	}

	/// Classifies raw token text.
	///
	/// Example
	/// -------
	/// ```rust
	/// # use luagam::ast::lexer::TokenKind;
	/// assert_eq!(TokenKind::classify("while"), TokenKind::KeywordWhile);
	/// assert_eq!(TokenKind::classify("~="), TokenKind::NotEqual);
	/// assert_eq!(TokenKind::classify("0x1F"), TokenKind::Number);
	/// assert_eq!(TokenKind::classify("'hi'"), TokenKind::String);
	/// assert_eq!(TokenKind::classify("whiles"), TokenKind::Identifier);
	/// ```
	pub fn classify(raw: &str) -> Self {
		let mut characters = raw.chars();
		match (characters.next(), characters.next()) {
			(Some('"' | '\''), _) => Self::String,
			(Some('['), Some('[' | '=')) => Self::String,
			(Some('-'), Some('-')) => Self::Comment,
			(Some('0'..='9'), _) => Self::Number,
			_ => KEYWORDS.iter().chain(OPERATORS.iter()).copied()
				.find(|kind| kind.spelling() == raw)
				.unwrap_or(Self::Identifier)
		}
	}

	pub fn is_unary_operator(self) -> bool {
		matches!(self, Self::KeywordNot | Self::Minus | Self::Length
			| Self::BitwiseNotOrXOr)
	}

	pub fn is_binary_operator(self) -> bool {
		matches!(self, Self::KeywordAnd | Self::KeywordOr | Self::Concat
			| Self::FloorDivide | Self::Equal | Self::NotEqual
			| Self::LessThanOrEqual | Self::GreaterThanOrEqual | Self::ShiftRight
			| Self::ShiftLeft | Self::Add | Self::Minus | Self::Multiply
			| Self::Divide | Self::Modulo | Self::Exponent | Self::LessThan
			| Self::GreaterThan | Self::BitwiseAnd | Self::BitwiseOr
			| Self::BitwiseNotOrXOr)
	}

	/// Whether a token of this kind closes the statement list of a block.
	pub fn ends_block(self) -> bool {
		matches!(self, Self::KeywordReturn | Self::KeywordEnd | Self::KeywordElse
			| Self::KeywordElseIf | Self::KeywordUntil | Self::EndCode)
	}

	/// Whether a token of this kind is the last token of a complete operand,
	/// making an operator that follows it binary.
	pub fn completes_operand(self) -> bool {
		matches!(self, Self::Identifier | Self::Number | Self::String
			| Self::CloseParen | Self::CloseBracket | Self::CloseCurly
			| Self::LiteralNil | Self::LiteralTrue | Self::LiteralFalse
			| Self::VarArgs | Self::KeywordEnd)
	}
}

impl Display for TokenKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> FMTResult {
		write!(f, "{}", self.name())
	}
}

/// A single lexeme of Lua code, with its 1-based position.
///
/// The kind and operator flags are computed once, from the raw text, when the
/// token is built. Tokens are never mutated afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
	pub raw: String,
	pub kind: TokenKind,
	pub row: usize,
	pub col: usize,
	pub unary: bool,
	pub binary: bool
}

impl Token {
	pub fn new(raw: impl Into<String>, row: usize, col: usize) -> Self {
		let raw = raw.into();
		let kind = TokenKind::classify(&raw);
		Self {
			unary: kind.is_unary_operator(),
			binary: kind.is_binary_operator(),
			raw, kind, row, col
		}
	}

	pub(crate) fn end_of_code(row: usize, col: usize) -> Self {
		Self {
			raw: TokenKind::EndCode.spelling().to_owned(),
			kind: TokenKind::EndCode,
			row, col,
			unary: false,
			binary: false
		}
	}

	/// Describes the token as `tok:<KIND> val:`<raw>``.
	pub fn describe(&self) -> String {
		format!("tok:{} val:`{}`", self.kind, self.raw)
	}
}

impl Display for Token {
	fn fmt(&self, f: &mut Formatter<'_>) -> FMTResult {
		write!(f, "{}", self.raw)
	}
}

/// Tokenizes LuaGAM scripts.
///
/// Characters are read left to right. Runs of characters that are not
/// whitespace, literals, comments or operators accumulate into a pending run,
/// which becomes one token (an identifier or keyword) as soon as something
/// else starts.
pub struct Lexer {
	source: Vec<char>,
	position: usize,
	row: usize,
	line_start: usize,
	pending: Option<usize>,
	tokens: Vec<Token>
}

impl Lexer {
	pub fn new(source: &str) -> Self {
		Self {
			source: source.chars().collect(),
			position: 0,
			row: 1,
			line_start: 0,
			pending: None,
			tokens: Vec::new()
		}
	}

	/// Peeks the character under the cursor, if any.
	pub(crate) fn peek(&self) -> Option<char> {
		self.peek_at(0)
	}

	/// Peeks the character `offset` characters after the cursor, if any.
	pub(crate) fn peek_at(&self, offset: usize) -> Option<char> {
		self.source.get(self.position + offset).copied()
	}

	/// Eats a character, keeping track of line breaks.
	pub(crate) fn eat(&mut self) {
		if let Some(character) = self.peek() {
			self.position += 1;
			if character == '\n' {
				self.row += 1;
				self.line_start = self.position;
			}
		}
	}

	fn column_of(&self, index: usize) -> usize {
		index - self.line_start + 1
	}

	/// The line and column of the cursor.
	pub(crate) fn location(&self) -> (usize, usize) {
		(self.row, self.column_of(self.position))
	}

	/// Remembers where the lexeme under the cursor starts.
	fn mark(&self) -> (usize, usize, usize) {
		let (row, col) = self.location();
		(self.position, row, col)
	}

	fn emit(&mut self, (start, row, col): (usize, usize, usize)) {
		let raw: String = self.source[start..self.position].iter().collect();
		self.tokens.push(Token::new(raw, row, col));
	}

	/// Builds an error for the lexeme starting at `start`. Only the first line
	/// of the partial lexeme is kept.
	fn error(&self, (start, row, col): (usize, usize, usize), reason: Reason)
			-> Error {
		let token = self.source[start..self.position].iter()
			.take_while(|&&character| character != '\n')
			.collect();
		Error {row, col, token, reason}
	}

	/// Turns the pending identifier-like run, if any, into a token.
	fn flush(&mut self) {
		if let Some(start) = self.pending.take() {
			let col = self.column_of(start);
			self.emit((start, self.row, col));
		}
	}

	/// Extends the pending run by the character under the cursor.
	fn extend(&mut self) {
		if self.pending.is_none() {self.pending = Some(self.position)}
		self.eat();
	}

	/// Counts the `=` of a long bracket opener starting `offset` characters
	/// after the cursor, if the opener is well formed.
	fn long_bracket_level(&self, offset: usize) -> Option<usize> {
		if self.peek_at(offset) != Some('[') {return None}
		let level = (offset + 1..).take_while(|&index| self.peek_at(index) == Some('='))
			.count();
		match self.peek_at(offset + 1 + level) {
			Some('[') => Some(level),
			_ => None
		}
	}

	/// Runs the scanner over the whole source.
	pub fn scan(mut self) -> Result<TokenStream> {
		while let Some(character) = self.peek() {
			match character {
				' ' | '\t' | '\r' | '\n' => {self.flush(); self.eat()},
				'"' | '\'' => {self.flush(); self.parse_string()?},
				'[' if matches!(self.peek_at(1), Some('[' | '=')) => {
					self.flush();
					let start = self.mark();
					self.parse_long_bracket(start)?
				},
				'-' if self.peek_at(1) == Some('-') => {self.flush(); self.parse_comment()?},
				'0'..='9' if self.pending.is_none() => self.parse_number()?,
				_ => match self.match_operator() {
					Some(kind) => {self.flush(); self.parse_operator(kind)},
					None => self.extend()
				}
			}
		}
		self.flush();

		let col = self.column_of(self.position);
		Ok(TokenStream::terminate(self.tokens, self.row, col))
	}

	/// Parses a quoted string. Assumes the opening quote *was not* consumed.
	///
	/// The string runs to the next matching quote on the same line; a
	/// backslash always escapes the character after it.
	pub(crate) fn parse_string(&mut self) -> Result<()> {
		let start = self.mark();
		let delimiter = self.peek();
		self.eat();

		loop {
			match self.peek() {
				None | Some('\n') =>
					return Err(self.error(start, Reason::UnterminatedString)),
				Some('\\') => {
					self.eat();
					if !matches!(self.peek(), None | Some('\n')) {self.eat()}
				},
				character if character == delimiter => {self.eat(); break},
				Some(_) => self.eat()
			}
		}

		self.emit(start);
		Ok(())
	}

	/// Parses a long bracket string or comment, starting at its `[`.
	///
	/// The raw text runs from `start` (which is the `--` for comments) to the
	/// closing bracket of the same level, embedded line breaks included.
	pub(crate) fn parse_long_bracket(&mut self, start: (usize, usize, usize))
			-> Result<()> {
		let level = match self.long_bracket_level(0) {
			Some(level) => level,
			None => {
				self.eat();
				return Err(self.error(start, Reason::MalformedLongBracket))
			}
		};
		(0..level + 2).for_each(|_| self.eat());

		loop {
			match self.peek() {
				None => return Err(self.error(start, Reason::UnterminatedLongBracket)),
				Some(']') => {
					self.eat();
					let mut closing = 0;
					while closing < level && self.peek() == Some('=')
						{self.eat(); closing += 1}
					if closing == level && self.peek() == Some(']') {self.eat(); break}
				},
				Some(_) => self.eat()
			}
		}

		self.emit(start);
		Ok(())
	}

	/// Parses a comment. Assumes the leading `--` *was not* consumed.
	///
	/// A well formed long bracket right after the dashes makes this a long
	/// comment, anything else is a line comment running to the end of the line.
	pub(crate) fn parse_comment(&mut self) -> Result<()> {
		let start = self.mark();
		if self.long_bracket_level(2).is_some() {
			self.eat(); self.eat();
			return self.parse_long_bracket(start)
		}

		while !matches!(self.peek(), None | Some('\n' | '\r')) {self.eat()}
		self.emit(start);
		Ok(())
	}

	/// Parses a decimal or hexadecimal number. Assumes the first digit *was
	/// not* consumed.
	pub(crate) fn parse_number(&mut self) -> Result<()> {
		let start = self.mark();
		let result = match (self.peek(), self.peek_at(1)) {
			(Some('0'), Some(marker @ ('x' | 'X'))) => {
				self.eat(); self.eat();
				self.consume_hexadecimal(marker)
			},
			_ => self.consume_decimal()
		};

		match result {
			Ok(()) => {self.emit(start); Ok(())},
			Err(reason) => Err(self.error(start, reason))
		}
	}

	fn consume_digits(&mut self, accept: fn(&char) -> bool) -> usize {
		let mut count = 0;
		while self.peek().filter(accept).is_some() {self.eat(); count += 1}
		count
	}

	fn consume_decimal(&mut self) -> std::result::Result<(), Reason> {
		let mut dot = false;
		loop {
			match self.peek() {
				Some('0'..='9') => self.eat(),
				Some('.') => {
					self.eat();
					if dot || self.peek() == Some('.') {return Err(Reason::NumberPunctuation)}
					dot = true;
					if self.consume_digits(char::is_ascii_digit) == 0
						{return Err(Reason::MissingDigits('.'))}
				},
				Some(marker @ ('e' | 'E')) => {
					self.eat();
					return self.consume_exponent(marker)
				},
				_ => return Ok(())
			}
		}
	}

	fn consume_hexadecimal(&mut self, marker: char)
			-> std::result::Result<(), Reason> {
		if self.consume_digits(char::is_ascii_hexdigit) == 0
			{return Err(Reason::MissingDigits(marker))}

		let mut dot = false;
		loop {
			match self.peek() {
				Some(character) if character.is_ascii_hexdigit() => self.eat(),
				Some('.') => {
					self.eat();
					if dot || self.peek() == Some('.') {return Err(Reason::NumberPunctuation)}
					dot = true;
					if self.consume_digits(char::is_ascii_hexdigit) == 0
						{return Err(Reason::MissingDigits('.'))}
				},
				Some(marker @ ('p' | 'P')) => {
					self.eat();
					return self.consume_exponent(marker)
				},
				_ => return Ok(())
			}
		}
	}

	/// Consumes an optional sign and the exponent digits. Assumes the exponent
	/// marker *was* consumed.
	fn consume_exponent(&mut self, marker: char) -> std::result::Result<(), Reason> {
		if matches!(self.peek(), Some('+' | '-')) {self.eat()}
		match self.consume_digits(char::is_ascii_digit) {
			0 => Err(Reason::MissingDigits(marker)),
			_ => Ok(())
		}
	}

	/// Finds the longest operator spelled at the cursor.
	fn match_operator(&self) -> Option<TokenKind> {
		OPERATORS.iter().copied().find(|kind| kind.spelling().chars().enumerate()
			.all(|(offset, character)| self.peek_at(offset) == Some(character)))
	}

	fn parse_operator(&mut self, kind: TokenKind) {
		let start = self.mark();
		kind.spelling().chars().for_each(|_| self.eat());
		self.emit(start);
	}
}

/// Tokenizes `source`, closing the stream with an `ENDCODE` sentinel.
///
/// The first malformed lexeme aborts the scan. The diagnostic is logged and
/// returned, and no partial token list survives.
///
/// Example
/// -------
/// ```rust
/// # use luagam::ast::lexer::{scan, TokenKind};
/// let tokens = scan("y = x + 1").unwrap();
/// let raw: Vec<_> = tokens.iter().map(|token| token.raw.as_str()).collect();
///
/// assert_eq!(raw, ["y", "=", "x", "+", "1", "endcode"]);
/// assert_eq!(tokens.iter().last().map(|token| token.kind), Some(TokenKind::EndCode));
/// ```
pub fn scan(source: &str) -> Result<TokenStream> {
	match Lexer::new(source).scan() {
		Ok(tokens) => {
			debug!(tokens = tokens.len(), "scanned source");
			Ok(tokens)
		},
		Err(scan_error) => {
			error!("{}", scan_error);
			Err(scan_error)
		}
	}
}
