//! Static checks run over a parsed script before it is allowed to run as a
//! LuaGAM control law.
//!
//! The host exchanges data with the script through globals: input signals are
//! read by the script, output signals are assigned by it. The checks here look
//! for those names in the syntax tree, and for the overall shape of the script
//! (a single `GAM` entry function, nothing else at top level).
//!
//! Every check logs each problem it finds and returns the first one.
#[cfg(test)]
mod tests;

use crate::ast::{Ast, Node, NodeKind};
use hashbrown::HashSet;
use itertools::Itertools;
use std::fmt::{Display, Formatter, Result as FMTResult};
use thiserror::Error;
use tracing::{error, warn};

/// The name of the function the host calls on every cycle.
pub const ENTRY_FUNCTION: &str = "GAM";

pub type Result<T> = std::result::Result<T, Error>;

/// A 1-based source position. Positions order by line, then by column.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Position {
	pub row: usize,
	pub col: usize
}

impl Display for Position {
	fn fmt(&self, f: &mut Formatter<'_>) -> FMTResult {
		write!(f, "[Line:{}, Col:{}]", self.row, self.col)
	}
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
	#[error("Input signal `{name}` is not used.")]
	UnusedInput {name: String},
	#[error("{position} Input signal `{name}` is being reassigned.")]
	ReassignedInput {name: String, position: Position},
	#[error("{position} Input signal `{name}` is being reassigned as local.")]
	ShadowedInput {name: String, position: Position},
	#[error("Output signal `{name}` is not assigned.")]
	UnassignedOutput {name: String},
	#[error("{position} Output signal `{name}` is being reassigned as local.")]
	ShadowedOutput {name: String, position: Position},
	#[error("AST should contain only one node, instead it contains {count}")]
	TopLevelNodes {count: usize},
	#[error("No main `{}` function found", ENTRY_FUNCTION)]
	MissingEntry,
	#[error("Main `{}` function is defined {count} times", ENTRY_FUNCTION)]
	DuplicateEntry {count: usize},
	#[error("External code found outside `{}` function", ENTRY_FUNCTION)]
	CodeOutsideEntry,
	#[error("Variable `{name}` is not initialised.")]
	Uninitialised {name: String}
}

/// A finding that is reported but does not fail verification.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Warning {
	/// An output signal is read before the script first assigns it, so the
	/// read sees the initial value.
	UsedBeforeAssignment {name: String, position: Position}
}

impl Display for Warning {
	fn fmt(&self, f: &mut Formatter<'_>) -> FMTResult {
		match self {
			Self::UsedBeforeAssignment {name, position} => write!(f,
				"{} Output signal `{}` is used before assignment. Signals initial value is 0.",
				position, name)
		}
	}
}

/// Logs every violation, then fails with the first one, if any.
fn report(violations: Vec<Error>) -> Result<()> {
	violations.iter().for_each(|violation| error!("{}", violation));
	match violations.into_iter().next() {
		Some(violation) => Err(violation),
		None => Ok(())
	}
}

/// Collects every `VAR` node that is a plain name, skipping indexed and field
/// accesses.
pub fn extract_variables(ast: &Ast) -> Vec<&Node> {
	ast.descendants().filter(|node| node.kind == NodeKind::Var && matches!(
		node.children.as_slice(), [name] if name.kind == NodeKind::Name && name.is_leaf()
	)).collect()
}

/// Finds where `identifier` first appears directly below a node of `kind`.
///
/// The tree is searched depth first. For every node of `kind`, the tokens of
/// its grandchildren are compared against `identifier`; the first match wins.
/// This is how, for instance, a name read by an expression (`EXP` > `VAR` >
/// `NAME`) or assigned by a statement (`VARLIST` > `VAR` > `NAME`) is found.
///
/// Example
/// -------
/// ```rust
/// # use luagam::{ast::{parse, NodeKind}, verifier::{check, Position}};
/// let ast = parse("function GAM() y = x + 1 end").unwrap();
///
/// assert_eq!(check(&ast, "x", NodeKind::Exp), Some(Position {row: 1, col: 20}));
/// assert_eq!(check(&ast, "y", NodeKind::Exp), None);
/// ```
pub fn check(ast: &Ast, identifier: &str, kind: NodeKind) -> Option<Position> {
	ast.nodes.iter().find_map(|node| check_node(node, identifier, kind))
}

fn check_node(node: &Node, identifier: &str, kind: NodeKind) -> Option<Position> {
	let found = if node.kind == kind {
		node.children.iter().flat_map(|child| child.children.iter())
			.filter_map(|grandchild| grandchild.token.as_ref())
			.find(|token| token.raw == identifier)
			.map(|token| Position {row: token.row, col: token.col})
	} else {None};

	found.or_else(|| node.children.iter()
		.find_map(|child| check_node(child, identifier, kind)))
}

/// Runs the LuaGAM checks over one syntax tree.
pub struct Validator<'a> {
	ast: &'a Ast,
	variables: Vec<&'a Node>
}

impl<'a> Validator<'a> {
	pub fn new(ast: &'a Ast) -> Self {
		Self {ast, variables: extract_variables(ast)}
	}

	pub fn ast(&self) -> &'a Ast {
		self.ast
	}

	/// Every plain variable reference, as collected by [extract_variables].
	pub fn variables(&self) -> &[&'a Node] {
		&self.variables
	}

	/// Checks that an input signal is read, and never assigned nor shadowed by
	/// a local.
	pub fn validate_input_signal(&self, name: &str) -> Result<()> {
		let mut violations = Vec::new();

		if check(self.ast, name, NodeKind::Exp).is_none()
			{violations.push(Error::UnusedInput {name: name.to_owned()})}
		if let Some(position) = check(self.ast, name, NodeKind::VarList)
			{violations.push(Error::ReassignedInput {name: name.to_owned(), position})}
		if let Some(position) = check(self.ast, name, NodeKind::LocalStat)
			{violations.push(Error::ShadowedInput {name: name.to_owned(), position})}

		report(violations)
	}

	/// Checks that an output signal is assigned and not shadowed by a local.
	///
	/// Reading the signal before its first assignment only produces a warning.
	/// An unassigned signal counts as assigned at line and column `max_lines`,
	/// which should lie past the end of the source.
	pub fn validate_output_signal(&self, name: &str, max_lines: usize)
			-> Result<Option<Warning>> {
		let mut violations = Vec::new();

		let assignment = check(self.ast, name, NodeKind::VarList);
		if assignment.is_none()
			{violations.push(Error::UnassignedOutput {name: name.to_owned()})}
		let assignment = assignment.unwrap_or(Position {row: max_lines, col: max_lines});

		let warning = check(self.ast, name, NodeKind::Exp)
			.filter(|usage| *usage < assignment)
			.map(|position| Warning::UsedBeforeAssignment {name: name.to_owned(), position});
		if let Some(warning) = &warning {warn!("{}", warning)}

		if let Some(position) = check(self.ast, name, NodeKind::LocalStat)
			{violations.push(Error::ShadowedOutput {name: name.to_owned(), position})}

		report(violations).map(|()| warning)
	}

	/// Checks that the script is a single top level block defining the entry
	/// function exactly once.
	pub fn check_gam(&self) -> Result<()> {
		let root = match self.ast.nodes.as_slice() {
			[root] => root,
			nodes => return report(vec![Error::TopLevelNodes {count: nodes.len()}])
		};

		let definitions = root.children.iter().filter(|stat| {
			stat.kind == NodeKind::Stat && stat.children.first().map_or(false, |name|
				name.kind == NodeKind::FuncName && name.is_leaf()
					&& name.raw() == Some(ENTRY_FUNCTION))
		}).count();

		match definitions {
			0 => report(vec![Error::MissingEntry]),
			1 => Ok(()),
			count => report(vec![Error::DuplicateEntry {count}])
		}
	}

	/// Checks that nothing but the entry function sits at top level.
	///
	/// Comments do not count as code. Only meaningful for inline code, where
	/// the entry function is all the host expects.
	pub fn check_only_gam(&self) -> Result<()> {
		let statements = self.ast.nodes.iter().map(|root| root.children.iter()
			.filter(|child| child.kind != NodeKind::Comment).count()).collect_vec();

		match statements.as_slice() {
			[1] => Ok(()),
			_ => report(vec![Error::CodeOutsideEntry])
		}
	}

	/// Checks that every plain variable the script references is one of
	/// `names`.
	pub fn check_variables_initialisation(&self, names: &[&str]) -> Result<()> {
		let known: HashSet<&str> = names.iter().copied().collect();

		report(self.variables.iter()
			.filter_map(|variable| variable.children.first().and_then(Node::raw))
			.filter(|name| !known.contains(name))
			.unique()
			.map(|name| Error::Uninitialised {name: name.to_owned()})
			.collect())
	}
}
