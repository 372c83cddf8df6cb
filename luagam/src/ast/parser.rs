use self::super::{
	lexer::{Token, TokenKind},
	node::{Ast, Node, NodeKind},
	stream::{Cursor, TokenStream}
};
use thiserror::Error;
use tracing::{debug, error, trace};

pub type Result<T> = std::result::Result<T, Error>;

macro_rules! expect {
	($parser:expr, $kind:pat, $reason:expr) => {
		match $parser.kind() {
			$kind => $parser.cursor.advance(),
			_ => return Err($parser.error($reason))
		}
	}
}

/// A parse failure, located at the token the parser stopped on.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("[Line:{row}, Col:{col}, Token:`{token}`] {reason}")]
pub struct Error {
	pub row: usize,
	pub col: usize,
	pub token: String,
	pub reason: Reason
}

impl Error {
	pub fn at(token: &Token, reason: Reason) -> Self {
		Self {row: token.row, col: token.col, token: token.raw.clone(), reason}
	}

	pub fn location(&self) -> (usize, usize) {
		(self.row, self.col)
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Reason {
	#[error("Empty script.")]
	EmptyScript,
	#[error("Unexpected token.")]
	UnexpectedToken,
	#[error("Invalid statement.")]
	InvalidStatement,
	#[error("Missing name for `label` statement.")]
	MissingLabelName,
	#[error("Missing closing double colon for `label` statement.")]
	MissingLabelClose,
	#[error("Missing name for `goto` statement.")]
	MissingGotoName,
	#[error("Missing module name for `require` statement.")]
	MissingModuleName,
	#[error("Missing `end` for `{0}` block.")]
	MissingEnd(&'static str),
	#[error("Missing `do` for `{0}` statement.")]
	MissingDo(&'static str),
	#[error("Expecting `then` after `{0}` condition.")]
	MissingThen(&'static str),
	#[error("Missing `until` for `repeat` statement.")]
	MissingUntil,
	#[error("Expecting name or name list for `for` statement.")]
	MissingForName,
	#[error("Missing `in` after name list.")]
	MissingIn,
	#[error("Missing `=` for numeric `for` statement.")]
	MissingForAssign,
	#[error("Missing comma between `for` limits.")]
	MissingComma,
	#[error("Expecting `=` after variable list.")]
	ExpectedAssign,
	#[error("Missing local function name.")]
	MissingLocalFunctionName,
	#[error("Expecting `function` or name list after `local`.")]
	InvalidLocal,
	#[error("Missing opening parenthesis.")]
	MissingOpenParen,
	#[error("Missing closing parenthesis.")]
	MissingCloseParen,
	#[error("Missing closing bracket.")]
	MissingCloseBracket,
	#[error("Missing opening brace for table.")]
	MissingOpenCurly,
	#[error("Missing closing brace for table.")]
	MissingCloseCurly,
	#[error("Missing `=` after table key.")]
	MissingFieldAssign,
	#[error("Expecting variable name.")]
	ExpectedName,
	#[error("Expecting variable.")]
	ExpectedVariable,
	#[error("Expecting function call.")]
	ExpectedFunctionCall,
	#[error("Binary operator without left operand.")]
	MissingLeftOperand,
	#[error("Expecting expression.")]
	ExpectedExpression,
	#[error("Expecting expression after operator.")]
	ExpectedOperand,
	#[error("Invalid arguments for function call.")]
	InvalidArguments,
	#[error("Missing function name.")]
	MissingFunctionName,
	#[error("Expecting `return`.")]
	ExpectedReturn,
	#[error("Empty name list.")]
	EmptyNameList,
	#[error("Missing attribute name.")]
	MissingAttribute,
	#[error("Missing closing `>` for attribute.")]
	MissingAttributeClose,
	#[error("Blocks or expressions nested too deep.")]
	TooDeep
}

/// Sets the kind of the last child, if it is a leaf.
///
/// A node about to grow a suffix (an index, a field, call arguments) turns
/// into the prefix of the longer expression; only a bare name or token is
/// relabeled, bracketed expressions keep their kind.
fn mark_prefix(node: &mut Node) {
	if let Some(last) = node.children.last_mut() {
		if last.is_leaf() {last.kind = NodeKind::PrefixExp}
	}
}

/// A backtracking recursive descent parser building a concrete syntax tree.
///
/// Every production saves the cursor on entry and puts it back if it fails,
/// so a caller is always free to try another alternative from the same spot.
/// Each production consumes exactly the tokens of the node it returns.
pub struct Parser<'t> {
	cursor: Cursor<'t>,
	depth: usize
}

impl<'t> Parser<'t> {
	/// How many blocks and expressions may enclose each other.
	pub const MAX_DEPTH: usize = 200;

	pub fn new(tokens: &'t TokenStream) -> Self {
		Self {cursor: tokens.cursor(), depth: 0}
	}

	fn current(&self) -> &'t Token {
		self.cursor.current()
	}

	fn kind(&self) -> TokenKind {
		self.current().kind
	}

	fn check(&self, kind: TokenKind) -> bool {
		self.kind() == kind
	}

	fn next_is(&self, kind: TokenKind) -> bool {
		self.cursor.next().map_or(false, |token| token.kind == kind)
	}

	fn error(&self, reason: Reason) -> Error {
		Error::at(self.current(), reason)
	}

	/// Consumes the current token as a leaf of the given kind.
	fn leaf(&mut self, kind: NodeKind) -> Node {
		let node = Node::leaf(kind, self.current().clone());
		self.cursor.advance();
		node
	}

	/// Runs a production, rewinding the cursor if it fails.
	fn attempt<T>(&mut self, production: impl FnOnce(&mut Self) -> Result<T>)
			-> Result<T> {
		let entry = self.cursor.position();
		let result = production(self);
		if result.is_err() {self.cursor.rewind(entry)}
		result
	}

	/// Like [attempt](Self::attempt), for productions that can enclose
	/// themselves. Fails once [MAX_DEPTH](Self::MAX_DEPTH) of them are open.
	fn nested<T>(&mut self, production: impl FnOnce(&mut Self) -> Result<T>)
			-> Result<T> {
		if self.depth >= Self::MAX_DEPTH {return Err(self.error(Reason::TooDeep))}

		self.depth += 1;
		let result = self.attempt(production);
		self.depth -= 1;
		result
	}

	/// Appends the comments right before the current token to `block`.
	fn comments(&self, block: &mut Node) {
		self.cursor.preceding_comments().into_iter()
			.for_each(|comment| block.append(Node::leaf(NodeKind::Comment, comment.clone())));
	}

	/// Whether the token before the current one completes an operand, which
	/// decides whether an operator spelled both ways is binary or unary.
	fn follows_operand(&self) -> bool {
		self.cursor.prev().map_or(false, |token| token.kind.completes_operand())
	}

	/// Parses `block ::= {stat} [retstat]`.
	///
	/// Comments found at statement boundaries are kept as `COMMENT` leaves.
	pub fn block(&mut self) -> Result<Node> {
		self.nested(|parser| {
			let mut block = Node::new(NodeKind::Block);

			loop {
				parser.comments(&mut block);
				if parser.kind().ends_block() {break}
				block.append(parser.stat()?);
			}

			if parser.check(TokenKind::KeywordReturn) {
				block.append(parser.retstat()?);
				parser.comments(&mut block);
			}

			Ok(block)
		})
	}

	/// Parses a single statement, dispatching on its first token.
	pub fn stat(&mut self) -> Result<Node> {
		self.attempt(|parser| match parser.kind() {
			// ;
			// break
			TokenKind::SemiColon | TokenKind::KeywordBreak =>
				Ok(parser.leaf(NodeKind::Stat)),

			// require "module"
			TokenKind::KeywordRequire => parser.require(),

			// ::label::
			TokenKind::DoubleColon => parser.label(),

			// goto label
			TokenKind::KeywordGoto => {
				let mut stat = parser.leaf(NodeKind::Stat);
				if !parser.check(TokenKind::Identifier)
					{return Err(parser.error(Reason::MissingGotoName))}
				stat.append(parser.leaf(NodeKind::Name));
				Ok(stat)
			},

			// do block end
			TokenKind::KeywordDo => {
				let mut stat = parser.leaf(NodeKind::Stat);
				stat.append(parser.block()?);
				expect!(parser, TokenKind::KeywordEnd, Reason::MissingEnd("do"));
				Ok(stat)
			},

			// while condition do block end
			TokenKind::KeywordWhile => {
				let mut stat = parser.leaf(NodeKind::Stat);
				stat.append(parser.exp()?);
				expect!(parser, TokenKind::KeywordDo, Reason::MissingDo("while"));
				stat.append(parser.block()?);
				expect!(parser, TokenKind::KeywordEnd, Reason::MissingEnd("while"));
				Ok(stat)
			},

			// repeat block until condition
			TokenKind::KeywordRepeat => {
				let mut stat = parser.leaf(NodeKind::Stat);
				stat.append(parser.block()?);
				expect!(parser, TokenKind::KeywordUntil, Reason::MissingUntil);
				stat.append(parser.exp()?);
				Ok(stat)
			},

			// if condition then block {elseif condition then block} [else block] end
			TokenKind::KeywordIf => parser.if_statement(),

			// for name = start, limit [, step] do block end
			// for namelist in explist do block end
			TokenKind::KeywordFor => parser.for_statement(),

			// function funcname funcbody
			TokenKind::KeywordFunction => {
				let mut stat = parser.leaf(NodeKind::Stat);
				stat.append(parser.funcname()?);
				stat.append(parser.funcbody()?);
				Ok(stat)
			},

			// local function name funcbody
			// local attnamelist [= explist]
			TokenKind::KeywordLocal => parser.local(),

			// varlist = explist
			// functioncall
			TokenKind::Identifier | TokenKind::OpenParen => parser.assignment_or_call(),

			_ => Err(parser.error(Reason::InvalidStatement))
		})
	}

	fn require(&mut self) -> Result<Node> {
		let mut stat = self.leaf(NodeKind::Stat);

		let parenthesised = self.check(TokenKind::OpenParen);
		if parenthesised {self.cursor.advance()}
		if !self.check(TokenKind::String)
			{return Err(self.error(Reason::MissingModuleName))}
		stat.append(self.leaf(NodeKind::Module));
		if parenthesised
			{expect!(self, TokenKind::CloseParen, Reason::MissingCloseParen)}

		Ok(stat)
	}

	fn label(&mut self) -> Result<Node> {
		let mut stat = self.leaf(NodeKind::Stat);
		if !self.check(TokenKind::Identifier)
			{return Err(self.error(Reason::MissingLabelName))}
		stat.append(self.leaf(NodeKind::Label));
		expect!(self, TokenKind::DoubleColon, Reason::MissingLabelClose);
		Ok(stat)
	}

	fn if_statement(&mut self) -> Result<Node> {
		let mut stat = self.leaf(NodeKind::Stat);
		stat.append(self.exp()?);
		expect!(self, TokenKind::KeywordThen, Reason::MissingThen("if"));
		stat.append(self.block()?);

		while self.check(TokenKind::KeywordElseIf) {
			let mut branch = self.leaf(NodeKind::Stat);
			branch.append(self.exp()?);
			expect!(self, TokenKind::KeywordThen, Reason::MissingThen("elseif"));
			branch.append(self.block()?);
			stat.append(branch);
		}

		if self.check(TokenKind::KeywordElse) {
			let mut branch = self.leaf(NodeKind::Stat);
			branch.append(self.block()?);
			stat.append(branch);
		}

		expect!(self, TokenKind::KeywordEnd, Reason::MissingEnd("if"));
		Ok(stat)
	}

	fn for_statement(&mut self) -> Result<Node> {
		let mut stat = self.leaf(NodeKind::Stat);
		if !self.check(TokenKind::Identifier)
			{return Err(self.error(Reason::MissingForName))}

		if self.next_is(TokenKind::Comma) || self.next_is(TokenKind::KeywordIn) {
			stat.append(self.namelist()?);
			expect!(self, TokenKind::KeywordIn, Reason::MissingIn);
			stat.append(self.explist()?);
		} else {
			stat.append(self.leaf(NodeKind::Name));
			expect!(self, TokenKind::Assign, Reason::MissingForAssign);
			stat.append(self.exp()?);
			expect!(self, TokenKind::Comma, Reason::MissingComma);
			stat.append(self.exp()?);
			if self.check(TokenKind::Comma)
				{self.cursor.advance(); stat.append(self.exp()?)}
		}

		expect!(self, TokenKind::KeywordDo, Reason::MissingDo("for"));
		stat.append(self.block()?);
		expect!(self, TokenKind::KeywordEnd, Reason::MissingEnd("for"));
		Ok(stat)
	}

	fn local(&mut self) -> Result<Node> {
		let mut stat = self.leaf(NodeKind::LocalStat);

		match self.kind() {
			TokenKind::KeywordFunction => {
				stat.append(self.leaf(NodeKind::LocalFunction));
				if !self.check(TokenKind::Identifier)
					{return Err(self.error(Reason::MissingLocalFunctionName))}
				stat.append(self.leaf(NodeKind::Name));
				stat.append(self.funcbody()?);
			},

			TokenKind::Identifier => {
				stat.append(self.attnamelist()?);
				if self.check(TokenKind::Assign)
					{self.cursor.advance(); stat.append(self.explist()?)}
			},

			_ => return Err(self.error(Reason::InvalidLocal))
		}

		Ok(stat)
	}

	/// Parses `varlist '=' explist` or `functioncall`, telling them apart by
	/// the first suffixed expression: a `VAR` starts an assignment, a
	/// `FUNCTIONCALL` is the whole statement.
	fn assignment_or_call(&mut self) -> Result<Node> {
		self.attempt(|parser| {
			let entry = parser.current();
			let first = parser.suffixed().map_err(|error|
				if error.location() == (entry.row, entry.col)
					{Error::at(entry, Reason::InvalidStatement)} else {error})?;

			let mut stat = Node::new(NodeKind::Stat);
			match first.kind {
				NodeKind::FunctionCall => stat.append(first),

				NodeKind::Var => {
					let mut varlist = Node::new(NodeKind::VarList);
					varlist.append(first);
					while parser.check(TokenKind::Comma) {
						parser.cursor.advance();
						varlist.append(parser.var_or_funcall(NodeKind::Var)?);
					}
					stat.append(varlist);

					expect!(parser, TokenKind::Assign, Reason::ExpectedAssign);
					stat.append(parser.explist()?);
				},

				_ => {
					trace!("parenthesised expression used as a statement");
					return Err(parser.error(Reason::ExpectedVariable))
				}
			}

			Ok(stat)
		})
	}

	/// Parses `retstat ::= return [explist] [';']`.
	pub fn retstat(&mut self) -> Result<Node> {
		self.attempt(|parser| {
			if !parser.check(TokenKind::KeywordReturn)
				{return Err(parser.error(Reason::ExpectedReturn))}
			let mut retstat = parser.leaf(NodeKind::RetStat);

			if !parser.kind().ends_block() && !parser.check(TokenKind::SemiColon)
				{retstat.append(parser.explist()?)}
			if parser.check(TokenKind::SemiColon)
				{retstat.append(parser.leaf(NodeKind::Undefined))}

			Ok(retstat)
		})
	}

	/// Parses `funcname ::= Name {'.' Name} [':' Name]`, as a `FUNCNAME` node
	/// carrying the first name.
	pub fn funcname(&mut self) -> Result<Node> {
		self.attempt(|parser| {
			if !parser.check(TokenKind::Identifier)
				{return Err(parser.error(Reason::MissingFunctionName))}
			let mut funcname = parser.leaf(NodeKind::FuncName);

			while parser.check(TokenKind::Period) && parser.next_is(TokenKind::Identifier) {
				parser.cursor.advance();
				funcname.append(parser.leaf(NodeKind::Name));
			}

			if parser.check(TokenKind::Colon) {
				parser.cursor.advance();
				if !parser.check(TokenKind::Identifier)
					{return Err(parser.error(Reason::MissingFunctionName))}
				funcname.append(parser.leaf(NodeKind::Name));
			}

			Ok(funcname)
		})
	}

	/// Parses `varlist ::= var {',' var}`.
	pub fn varlist(&mut self) -> Result<Node> {
		self.attempt(|parser| {
			let mut varlist = Node::new(NodeKind::VarList);
			varlist.append(parser.var_or_funcall(NodeKind::Var)?);
			while parser.check(TokenKind::Comma) {
				parser.cursor.advance();
				varlist.append(parser.var_or_funcall(NodeKind::Var)?);
			}
			Ok(varlist)
		})
	}

	/// Parses a suffixed expression and succeeds only if it ends up being of
	/// the `expected` kind, either `VAR` or `FUNCTIONCALL`.
	pub fn var_or_funcall(&mut self, expected: NodeKind) -> Result<Node> {
		self.attempt(|parser| {
			let node = parser.suffixed()?;
			if node.kind == expected {return Ok(node)}

			Err(parser.error(match expected {
				NodeKind::FunctionCall => Reason::ExpectedFunctionCall,
				_ => Reason::ExpectedVariable
			}))
		})
	}

	/// Parses a name or a parenthesised expression followed by any number of
	/// suffixes. The kind of the returned node is decided by the last suffix:
	/// `VAR` for an index or a field, `FUNCTIONCALL` for arguments, and
	/// `PREFIXEXP` for a parenthesised expression without suffixes.
	fn suffixed(&mut self) -> Result<Node> {
		let mut node = match self.kind() {
			TokenKind::Identifier => {
				let mut var = Node::new(NodeKind::Var);
				var.append(self.leaf(NodeKind::Name));
				var
			},

			TokenKind::OpenParen => {
				self.cursor.advance();
				let mut prefix = Node::new(NodeKind::PrefixExp);
				prefix.append(self.exp()?);
				expect!(self, TokenKind::CloseParen, Reason::MissingCloseParen);
				prefix
			},

			_ => return Err(self.error(Reason::ExpectedName))
		};

		loop {
			match self.kind() {
				// prefix.name
				TokenKind::Period if self.next_is(TokenKind::Identifier) => {
					self.cursor.advance();
					mark_prefix(&mut node);
					node.append(self.leaf(NodeKind::Name));
					node.kind = NodeKind::Var;
				},

				// prefix[exp]
				TokenKind::OpenBracket => {
					self.cursor.advance();
					mark_prefix(&mut node);
					node.append(self.exp()?);
					expect!(self, TokenKind::CloseBracket, Reason::MissingCloseBracket);
					node.kind = NodeKind::Var;
				},

				// prefix:name args
				TokenKind::Colon if self.next_is(TokenKind::Identifier) => {
					self.cursor.advance();
					mark_prefix(&mut node);
					node.append(self.leaf(NodeKind::Name));
					node.append(self.args()?);
					node.kind = NodeKind::FunctionCall;
				},

				// prefix args
				TokenKind::OpenParen | TokenKind::String | TokenKind::OpenCurly => {
					mark_prefix(&mut node);
					node.append(self.args()?);
					node.kind = NodeKind::FunctionCall;
				},

				_ => break Ok(node)
			}
		}
	}

	/// Parses `prefixexp ::= var | functioncall | '(' exp ')'`.
	///
	/// A parenthesised expression without suffixes yields its inner `EXP`.
	pub fn prefixexp(&mut self) -> Result<Node> {
		self.attempt(|parser| {
			let prefix = parser.suffixed()?;
			match prefix.kind {
				NodeKind::Var | NodeKind::FunctionCall => Ok(prefix),
				_ => prefix.children.into_iter().next()
					.ok_or_else(|| parser.error(Reason::ExpectedExpression))
			}
		})
	}

	/// Parses `args ::= '(' [explist] ')' | tableconstructor | LiteralString`.
	pub fn args(&mut self) -> Result<Node> {
		self.attempt(|parser| {
			let mut args = Node::new(NodeKind::Args);

			match parser.kind() {
				TokenKind::OpenParen => {
					parser.cursor.advance();
					if !parser.check(TokenKind::CloseParen) {args.append(parser.explist()?)}
					expect!(parser, TokenKind::CloseParen, Reason::MissingCloseParen);
				},
				TokenKind::String => args.append(parser.leaf(NodeKind::LiteralString)),
				TokenKind::OpenCurly => args.append(parser.tableconstructor()?),
				_ => return Err(parser.error(Reason::InvalidArguments))
			}

			Ok(args)
		})
	}

	/// Parses `funcbody ::= '(' [parlist] ')' block end`.
	pub fn funcbody(&mut self) -> Result<Node> {
		self.attempt(|parser| {
			let mut funcbody = Node::new(NodeKind::FuncBody);
			expect!(parser, TokenKind::OpenParen, Reason::MissingOpenParen);
			if !parser.check(TokenKind::CloseParen) {funcbody.append(parser.parlist()?)}
			expect!(parser, TokenKind::CloseParen, Reason::MissingCloseParen);
			funcbody.append(parser.block()?);
			expect!(parser, TokenKind::KeywordEnd, Reason::MissingEnd("function"));
			Ok(funcbody)
		})
	}

	/// Parses `parlist ::= namelist [',' '...'] | '...'`.
	pub fn parlist(&mut self) -> Result<Node> {
		self.attempt(|parser| {
			if parser.check(TokenKind::VarArgs) {return Ok(parser.leaf(NodeKind::ParList))}

			let mut parlist = Node::new(NodeKind::ParList);
			parlist.append(parser.namelist()?);
			if parser.check(TokenKind::Comma) && parser.next_is(TokenKind::VarArgs) {
				parser.cursor.advance();
				parlist.append(parser.leaf(NodeKind::Name));
			}
			Ok(parlist)
		})
	}

	/// Parses `namelist ::= Name {',' Name}`.
	pub fn namelist(&mut self) -> Result<Node> {
		self.attempt(|parser| {
			if !parser.check(TokenKind::Identifier)
				{return Err(parser.error(Reason::EmptyNameList))}

			let mut namelist = Node::new(NodeKind::NameList);
			namelist.append(parser.leaf(NodeKind::Name));
			while parser.check(TokenKind::Comma) && parser.next_is(TokenKind::Identifier) {
				parser.cursor.advance();
				namelist.append(parser.leaf(NodeKind::Name));
			}
			Ok(namelist)
		})
	}

	/// Parses `attnamelist ::= Name attrib {',' Name attrib}`, with
	/// `attrib ::= ['<' Name '>']`.
	pub fn attnamelist(&mut self) -> Result<Node> {
		self.attempt(|parser| {
			if !parser.check(TokenKind::Identifier)
				{return Err(parser.error(Reason::EmptyNameList))}

			let mut attnamelist = Node::new(NodeKind::AttNameList);
			loop {
				attnamelist.append(parser.leaf(NodeKind::Name));

				if parser.check(TokenKind::LessThan) {
					parser.cursor.advance();
					if !parser.check(TokenKind::Identifier)
						{return Err(parser.error(Reason::MissingAttribute))}
					attnamelist.append(parser.leaf(NodeKind::Attrib));
					expect!(parser, TokenKind::GreaterThan, Reason::MissingAttributeClose);
				}

				if parser.check(TokenKind::Comma) && parser.next_is(TokenKind::Identifier) {
					parser.cursor.advance();
				} else {break}
			}
			Ok(attnamelist)
		})
	}

	/// Parses `explist ::= exp {',' exp}`.
	pub fn explist(&mut self) -> Result<Node> {
		self.attempt(|parser| {
			let mut explist = Node::new(NodeKind::ExpList);
			explist.append(parser.exp()?);
			while parser.check(TokenKind::Comma) {
				parser.cursor.advance();
				explist.append(parser.exp()?);
			}
			Ok(explist)
		})
	}

	/// Parses an expression into a flat `EXP` node: operands, `UNOP` and
	/// `BINOP` leaves in source order, with no precedence applied.
	///
	/// An operator that can be both unary and binary is binary only when the
	/// previous token completes an operand.
	pub fn exp(&mut self) -> Result<Node> {
		self.nested(|parser| {
			let mut exp = Node::new(NodeKind::Exp);
			let mut awaiting_operand = false;

			while !parser.cursor.at_end() {
				let operand = match parser.kind() {
					TokenKind::LiteralNil | TokenKind::LiteralFalse | TokenKind::LiteralTrue
						| TokenKind::VarArgs => Some(parser.leaf(NodeKind::Value)),
					TokenKind::Number => Some(parser.leaf(NodeKind::Numeral)),
					TokenKind::String => Some(parser.leaf(NodeKind::LiteralString)),
					TokenKind::KeywordFunction => Some(parser.functiondef()?),
					TokenKind::Identifier | TokenKind::OpenParen => Some(parser.prefixexp()?),
					TokenKind::OpenCurly => Some(parser.tableconstructor()?),
					_ => None
				};
				if let Some(operand) = operand {
					exp.append(operand);
					awaiting_operand = false;
				}

				let token = parser.current();
				if !token.unary && !token.binary {break}

				let binary = token.binary && (!token.unary || parser.follows_operand());
				if binary && (exp.children.is_empty() || awaiting_operand)
					{return Err(parser.error(Reason::MissingLeftOperand))}

				exp.append(parser.leaf(if binary {NodeKind::BinOp} else {NodeKind::UnOp}));
				awaiting_operand = true;
			}

			if exp.children.is_empty() {return Err(parser.error(Reason::ExpectedExpression))}
			if awaiting_operand {return Err(parser.error(Reason::ExpectedOperand))}
			Ok(exp)
		})
	}

	/// Parses `functiondef ::= function funcbody`.
	pub fn functiondef(&mut self) -> Result<Node> {
		self.attempt(|parser| {
			let mut functiondef = parser.leaf(NodeKind::FunctionDef);
			functiondef.append(parser.funcbody()?);
			Ok(functiondef)
		})
	}

	/// Parses `tableconstructor ::= '{' [fieldlist] '}'`, keeping field
	/// separators as `FIELDSEP` leaves.
	pub fn tableconstructor(&mut self) -> Result<Node> {
		self.attempt(|parser| {
			expect!(parser, TokenKind::OpenCurly, Reason::MissingOpenCurly);

			let mut fieldlist = Node::new(NodeKind::FieldList);
			while !parser.check(TokenKind::CloseCurly) {
				fieldlist.append(parser.field()?);
				match parser.kind() {
					TokenKind::Comma | TokenKind::SemiColon =>
						fieldlist.append(parser.leaf(NodeKind::FieldSep)),
					_ => break
				}
			}
			expect!(parser, TokenKind::CloseCurly, Reason::MissingCloseCurly);

			let mut table = Node::new(NodeKind::TableConstructor);
			table.append(fieldlist);
			Ok(table)
		})
	}

	/// Parses `field ::= '[' exp ']' '=' exp | Name '=' exp | exp`.
	pub fn field(&mut self) -> Result<Node> {
		self.attempt(|parser| {
			let mut field = Node::new(NodeKind::Field);

			match parser.kind() {
				// [key] = value
				TokenKind::OpenBracket => {
					parser.cursor.advance();
					field.append(parser.exp()?);
					expect!(parser, TokenKind::CloseBracket, Reason::MissingCloseBracket);
					expect!(parser, TokenKind::Assign, Reason::MissingFieldAssign);
					field.append(parser.exp()?);
				},

				// name = value
				TokenKind::Identifier if parser.next_is(TokenKind::Assign) => {
					field.append(parser.leaf(NodeKind::Name));
					parser.cursor.advance();
					field.append(parser.exp()?);
				},

				// value
				_ => field.append(parser.exp()?)
			}

			Ok(field)
		})
	}
}

/// Turns a token stream into a syntax tree.
///
/// Top level blocks are parsed until the sentinel is reached; a pass that
/// stops early, on a stray `end` for instance, is followed by another one,
/// and a pass that makes no progress at all is a syntax error. A source
/// yielding no nodes, such as an empty one, is rejected.
pub fn generate_ast(tokens: &TokenStream) -> Result<Ast> {
	let mut parser = Parser::new(tokens);
	let mut nodes = Vec::new();

	let result = loop {
		let entry = parser.cursor.position();
		let block = match parser.block() {
			Ok(block) => block,
			Err(parse_error) => break Err(parse_error)
		};
		if !block.children.is_empty() {nodes.push(block)}

		if parser.cursor.at_end() {
			break if nodes.is_empty() {
				Err(parser.error(Reason::EmptyScript))
			} else {Ok(Ast {nodes})}
		}
		if parser.cursor.position() == entry {break Err(parser.error(Reason::UnexpectedToken))}
		debug!(position = parser.cursor.position(), "top level block ended early");
	};

	match result {
		Ok(ast) => {
			debug!(nodes = ast.len(), "generated syntax tree");
			Ok(ast)
		},
		Err(parse_error) => {
			error!("{}", parse_error);
			Err(parse_error)
		}
	}
}
