//! The host side of a LuaGAM block: its configuration, and the initialise and
//! setup phases that decide whether a script may run.
//!
//! Configuration is read from YAML, mirroring the parameters of the block:
//! ```yaml
//! Code: |
//!   function GAM()
//!     y = x + 1
//!   end
//! InputSignals:
//!   - {Name: x, Type: float64}
//! OutputSignals:
//!   - {Name: y, Type: float64}
//! InternalStates:
//!   gain: 1.5
//! AuxiliaryFunctions:
//!   clamp: "function clamp(v) return v end"
//! ```
//! `Code` is either the script itself, or `file://` followed by the path of a
//! file holding it.
use crate::{
	ast::{self, Ast},
	verifier::{self, Validator, Warning}
};
use hashbrown::HashSet;
use itertools::Itertools;
use serde::{Deserialize, Deserializer, de::{MapAccess, Visitor}};
use std::{
	convert::TryFrom,
	fmt::{Display, Formatter, Result as FMTResult},
	fs::read_to_string,
	io::Error as IOError,
	marker::PhantomData,
	path::{Path, PathBuf},
	str::FromStr
};
use thiserror::Error;
use tracing::{debug, error, info};

/// The prefix marking `Code` as a path to an external file.
pub const FILE_SCHEME: &str = "file://";

#[derive(Debug, Error)]
pub enum Error {
	#[error("invalid configuration: {0}")]
	Config(#[from] serde_yaml::Error),
	#[error("could not read `{}`: {source}", .path.display())]
	Io {path: PathBuf, source: IOError},
	#[error("syntax error in code: {0}")]
	Code(#[source] ast::Error),
	#[error("syntax error in internal state `{statement}`: {source}")]
	InternalState {statement: String, source: ast::Error},
	#[error("syntax error in auxiliary function `{name}`: {source}")]
	AuxiliaryFunction {name: String, source: ast::Error},
	#[error("Input signal `{0}` has same name of output signal: this is not allowed")]
	SignalCollision(String),
	#[error(transparent)]
	Verification(#[from] verifier::Error)
}

impl Error {
	/// Whether this error comes from a syntax error in any of the script's Lua
	/// code.
	pub fn is_syntax(&self) -> bool {
		matches!(self, Self::Code(_) | Self::InternalState {..}
			| Self::AuxiliaryFunction {..})
	}
}

pub type Result<T> = std::result::Result<T, Error>;

/// The parameters of a LuaGAM block.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct ScriptConfig {
	pub code: String,
	#[serde(default)]
	pub input_signals: Vec<Signal>,
	#[serde(default)]
	pub output_signals: Vec<Signal>,
	#[serde(default, deserialize_with = "in_order")]
	pub internal_states: Vec<(String, StateValue)>,
	#[serde(default, deserialize_with = "in_order")]
	pub auxiliary_functions: Vec<(String, String)>
}

/// Reads a map as its entries, in the order they are written.
fn in_order<'de, D, V>(deserializer: D) -> std::result::Result<Vec<(String, V)>, D::Error>
		where D: Deserializer<'de>, V: Deserialize<'de> {
	struct EntriesVisitor<V>(PhantomData<V>);

	impl<'de, V> Visitor<'de> for EntriesVisitor<V>
			where V: Deserialize<'de> {
		type Value = Vec<(String, V)>;

		fn expecting(&self, f: &mut Formatter<'_>) -> FMTResult {
			f.write_str("a map of names to values")
		}

		fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
				where A: MapAccess<'de> {
			let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
			while let Some(entry) = map.next_entry()? {entries.push(entry)}
			Ok(entries)
		}
	}

	deserializer.deserialize_map(EntriesVisitor(PhantomData))
}

impl ScriptConfig {
	pub fn from_yaml(text: &str) -> Result<Self> {
		Ok(serde_yaml::from_str(text)?)
	}

	pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let text = read_to_string(path)
			.map_err(|source| Error::Io {path: path.to_owned(), source})?;
		Self::from_yaml(&text)
	}
}

impl FromStr for ScriptConfig {
	type Err = Error;

	fn from_str(text: &str) -> Result<Self> {
		Self::from_yaml(text)
	}
}

/// A signal exchanged with the host, exposed to the script as a global.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct Signal {
	pub name: String,
	#[serde(rename = "Type")]
	pub kind: SignalType,
	#[serde(default = "Signal::scalar")]
	pub number_of_elements: u32
}

impl Signal {
	fn scalar() -> u32 {1}
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
	Uint8,
	Int8,
	Uint16,
	Int16,
	Uint32,
	Int32,
	Uint64,
	Int64,
	Float32,
	Float64,
	Bool
}

/// The initial value of an internal state, a global owned by the script.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum StateValue {
	Boolean(bool),
	Integer(i64),
	Float(f64),
	/// Any other Lua expression, kept as written.
	Expression(String)
}

/// Formats the value as Lua source.
impl Display for StateValue {
	fn fmt(&self, f: &mut Formatter<'_>) -> FMTResult {
		match self {
			Self::Boolean(value) => write!(f, "{}", value),
			Self::Integer(value) => write!(f, "{}", value),
			Self::Float(value) => write!(f, "{:?}", value),
			Self::Expression(value) => write!(f, "{}", value)
		}
	}
}

/// Where the code of a script lives.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CodeSource {
	Inline(String),
	File(PathBuf)
}

impl CodeSource {
	pub fn is_external(&self) -> bool {
		matches!(self, Self::File(_))
	}
}

impl From<&str> for CodeSource {
	fn from(code: &str) -> Self {
		match code.strip_prefix(FILE_SCHEME) {
			Some(path) => Self::File(PathBuf::from(path)),
			None => Self::Inline(code.to_owned())
		}
	}
}

impl TryFrom<&CodeSource> for String {
	type Error = Error;

	fn try_from(source: &CodeSource) -> Result<Self> {
		match source {
			CodeSource::Inline(code) => Ok(code.clone()),
			CodeSource::File(path) => read_to_string(path)
				.map_err(|source| Error::Io {path: path.clone(), source})
		}
	}
}

/// What a successful setup found worth reporting.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Report {
	pub warnings: Vec<Warning>
}

impl Display for Report {
	fn fmt(&self, f: &mut Formatter<'_>) -> FMTResult {
		write!(f, "{}", self.warnings.iter().join("\n"))
	}
}

/// An initialised LuaGAM script: its configuration, its code and the code's
/// syntax tree.
#[derive(Clone, Debug)]
pub struct Script {
	config: ScriptConfig,
	source: CodeSource,
	code: String,
	ast: Ast
}

impl Script {
	/// Loads and parses everything the configuration names.
	///
	/// Internal states and auxiliary functions are checked in the order they
	/// are declared, so the first error reported is the first one written.
	///
	/// Each internal state must parse as the Lua statement `name=value`, each
	/// auxiliary function and the code itself as Lua source.
	pub fn initialise(config: ScriptConfig) -> Result<Self> {
		let source = CodeSource::from(config.code.as_str());
		let code = String::try_from(&source)?;

		for (name, value) in &config.internal_states {
			let statement = format!("{}={}", name, value);
			ast::parse(&statement).map_err(|source|
				Error::InternalState {statement: statement.clone(), source})?;
		}

		for (name, function) in &config.auxiliary_functions {
			ast::parse(function).map_err(|source|
				Error::AuxiliaryFunction {name: name.clone(), source})?;
		}

		let ast = ast::parse(&code).map_err(Error::Code)?;
		info!(external = source.is_external(), states = config.internal_states.len(),
			functions = config.auxiliary_functions.len(), "script initialised");

		Ok(Self {config, source, code, ast})
	}

	/// Shorthand for [`ScriptConfig::from_yaml`] followed by
	/// [`initialise`](Self::initialise).
	pub fn from_yaml(text: &str) -> Result<Self> {
		Self::initialise(ScriptConfig::from_yaml(text)?)
	}

	/// Verifies the script against its signals.
	///
	/// Fails on an input and an output sharing a name, on a missing or
	/// repeated entry function, on top level code besides the entry function
	/// (for inline code only), and on any input or output signal violation.
	pub fn setup(&self) -> Result<Report> {
		self.check_signal_names()?;

		let validator = Validator::new(&self.ast);
		validator.check_gam()?;
		if !self.is_code_external() {validator.check_only_gam()?}

		for signal in &self.config.input_signals
			{validator.validate_input_signal(&signal.name)?}

		let max_lines = self.code.len() + 1;
		let mut report = Report::default();
		for signal in &self.config.output_signals {
			if let Some(warning) = validator.validate_output_signal(&signal.name, max_lines)?
				{report.warnings.push(warning)}
		}

		debug!(warnings = report.warnings.len(), "script set up");
		Ok(report)
	}

	fn check_signal_names(&self) -> Result<()> {
		let inputs: HashSet<&str> = self.config.input_signals.iter()
			.map(|signal| signal.name.as_str()).collect();

		match self.config.output_signals.iter().find(|signal| inputs.contains(signal.name.as_str())) {
			Some(signal) => {
				let collision = Error::SignalCollision(signal.name.clone());
				error!("{}", collision);
				Err(collision)
			},
			None => Ok(())
		}
	}

	/// Checks that every plain variable of the code is a signal or an
	/// internal state.
	///
	/// Not part of [`setup`](Self::setup): locals and loop variables are
	/// flagged too.
	pub fn check_variables_initialisation(&self) -> Result<()> {
		let names = self.config.input_signals.iter()
			.chain(self.config.output_signals.iter())
			.map(|signal| signal.name.as_str())
			.chain(self.config.internal_states.iter().map(|(name, _)| name.as_str()))
			.collect_vec();

		Ok(Validator::new(&self.ast).check_variables_initialisation(&names)?)
	}

	pub fn config(&self) -> &ScriptConfig {
		&self.config
	}

	pub fn code(&self) -> &str {
		&self.code
	}

	pub fn ast(&self) -> &Ast {
		&self.ast
	}

	pub fn is_code_external(&self) -> bool {
		self.source.is_external()
	}

	/// The path the code was read from, for external code.
	pub fn code_path(&self) -> Option<&Path> {
		match &self.source {
			CodeSource::File(path) => Some(path),
			CodeSource::Inline(_) => None
		}
	}
}
