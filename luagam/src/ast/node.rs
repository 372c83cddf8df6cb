use self::super::lexer::Token;
use std::fmt::{Display, Formatter, Result as FMTResult};

/// The grammar category of a syntax tree node.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NodeKind {
	Block,
	Stat,
	AttNameList,
	Attrib,
	RetStat,
	Label,
	FuncName,
	VarList,
	Var,
	NameList,
	ExpList,
	Exp,
	PrefixExp,
	FunctionCall,
	Args,
	FunctionDef,
	FuncBody,
	ParList,
	TableConstructor,
	FieldList,
	Field,
	FieldSep,
	BinOp,
	UnOp,
	Name,
	Numeral,
	LiteralString,
	LocalFunction,
	LocalStat,
	Undefined,
	Module,
	Value,
	Comment
}

static NODE_NAMES: [&str; 33] = [
	"BLOCK", "STAT", "ATTNAMELIST", "ATTRIB", "RETSTAT", "LABEL", "FUNCNAME",
	"VARLIST", "VAR", "NAMELIST", "EXPLIST", "EXP", "PREFIXEXP", "FUNCTIONCALL",
	"ARGS", "FUNCTIONDEF", "FUNCBODY", "PARLIST", "TABLECONSTRUCTOR", "FIELDLIST",
	"FIELD", "FIELDSEP", "BINOP", "UNOP", "NAME", "NUMERAL", "LITERALSTRING",
	"LOCALFUNCTION", "LOCALSTAT", "UNDEFINED", "MODULE", "VALUE", "COMMENT"
];

impl NodeKind {
	pub fn name(self) -> &'static str {
		NODE_NAMES[self as usize]
	}
}

impl Display for NodeKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> FMTResult {
		write!(f, "{}", self.name())
	}
}

/// A node of the concrete syntax tree.
///
/// The tree mirrors the grammar productions one to one. A node may carry the
/// token that introduced it (the keyword of a statement, the name of a
/// variable) and owns its children, in source order. Nodes without children
/// that carry a token are leaves.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Node {
	pub kind: NodeKind,
	pub token: Option<Token>,
	pub children: Vec<Node>
}

impl Node {
	pub fn new(kind: NodeKind) -> Self {
		Self {kind, token: None, children: Vec::new()}
	}

	pub fn leaf(kind: NodeKind, token: Token) -> Self {
		Self {kind, token: Some(token), children: Vec::new()}
	}

	pub fn append(&mut self, child: Node) {
		self.children.push(child);
	}

	pub fn is_leaf(&self) -> bool {
		self.token.is_some() && self.children.is_empty()
	}

	/// The raw text of this node's token, if it has one.
	pub fn raw(&self) -> Option<&str> {
		self.token.as_ref().map(|token| token.raw.as_str())
	}

	/// Iterates over this node and everything below it, depth first, parents
	/// before children.
	pub fn descendants(&self) -> Descendants<'_> {
		Descendants {stack: vec![self]}
	}

	fn dump(&self, f: &mut Formatter<'_>, level: usize) -> FMTResult {
		let indent = " ".repeat(level * 4);
		write!(f, "{}({}", indent, self.kind)?;
		if let Some(token) = &self.token {write!(f, " {}", token.describe())?}

		if !self.children.is_empty() {
			writeln!(f)?;
			for child in &self.children {child.dump(f, level + 1)?}
			write!(f, "{}", indent)?;
		}
		writeln!(f, ")")
	}
}

/// Dumps the tree below this node, one node per line, children indented by
/// four spaces.
///
/// Example
/// -------
/// ```rust
/// # use luagam::ast::parse;
/// let ast = parse("break").unwrap();
/// assert_eq!(ast.to_string(), "(BLOCK\n    (STAT tok:BREAK val:`break`)\n)\n");
/// ```
impl Display for Node {
	fn fmt(&self, f: &mut Formatter<'_>) -> FMTResult {
		self.dump(f, 0)
	}
}

pub struct Descendants<'n> {
	stack: Vec<&'n Node>
}

impl<'n> Iterator for Descendants<'n> {
	type Item = &'n Node;

	fn next(&mut self) -> Option<Self::Item> {
		let node = self.stack.pop()?;
		self.stack.extend(node.children.iter().rev());
		Some(node)
	}
}

/// A parsed script: one top level block per pass of the parser, normally
/// exactly one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ast {
	pub nodes: Vec<Node>
}

impl Ast {
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Iterates over every node of every top level block.
	pub fn descendants(&self) -> impl Iterator<Item = &Node> {
		self.nodes.iter().flat_map(Node::descendants)
	}
}

impl Display for Ast {
	fn fmt(&self, f: &mut Formatter<'_>) -> FMTResult {
		self.nodes.iter().try_for_each(|node| write!(f, "{}", node))
	}
}
