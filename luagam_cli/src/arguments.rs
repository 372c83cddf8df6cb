pub use pico_args::Error;
use pico_args::Arguments as Parser;
use std::{
	convert::TryFrom,
	fs::File,
	io::{Read, Error as IOError},
	path::PathBuf
};

pub static HELP: &str = "\
LuaGAM Script Checker

SYNOPSIS:
	luagam [OPTIONS] SOURCE

DESCRIPTION:
	luagam checks Lua control-law scripts before a LuaGAM block runs them. The script is tokenized and parsed, then verified: it must define a single `GAM` function, read every input signal without assigning it, and assign every output signal.

	After parsing the command line arguments, SOURCE is either checked directly, if -e is passed, otherwise the file named SOURCE is loaded and checked. Code given with -e is treated as inline code, and may not hold anything besides the `GAM` function.

	With -c, SOURCE is a YAML block configuration instead, naming the code, its signals, internal states and auxiliary functions, and the full initialise and setup phases are run over it.

	Exit status is 0 on success, 1 when verification fails, 2 on a syntax error and 3 on an input or configuration error.

	Passing -v will print verbose information to standard error.


OPTIONS:
	-h, --help        Displays this and quits
	-V, --version     Displays version information
	-v, --verbose     Runs with verbose output
	-e, --evaluate    Treats source as direct source code, rather than a file
	-t, --tokens      Shows tokens rather than checking
	-s, --ast         Shows the syntax tree rather than checking
	-c, --config      Treats source as a YAML block configuration
	-i, --input NAME  Declares an input signal, may be repeated
	-o, --output NAME Declares an output signal, may be repeated";

#[derive(Debug)]
pub enum Arguments {
	ShowHelp,
	ShowVersion,
	Run {
		source: Source,
		action: Action,
		signals: Signals,
		verbose: bool
	}
}

#[derive(Debug)]
pub enum Source {
	File(PathBuf),
	Code(String)
}

impl Source {
	/// Whether the source is code given on the command line.
	pub fn is_inline(&self) -> bool {
		matches!(self, Self::Code(_))
	}
}

#[derive(Debug)]
pub enum Action {
	Check,
	CheckConfig,
	ShowSyntaxTree,
	ShowTokens
}

#[derive(Debug, Default)]
pub struct Signals {
	pub inputs: Vec<String>,
	pub outputs: Vec<String>
}

impl Arguments {
	pub fn from_env() -> Result<Self, Error> {
		let mut parser = Parser::from_env();

		if parser.contains(["-h", "--help"]) {return Ok(Self::ShowHelp)}
		if parser.contains(["-V", "--version"]) {return Ok(Self::ShowVersion)}

		let verbose = parser.contains(["-v", "--verbose"]);
		let config = parser.contains(["-c", "--config"]);
		let syntax_tree = parser.contains(["-s", "--ast"]);
		let tokens = parser.contains(["-t", "--tokens"]);
		let evaluate = parser.contains(["-e", "--evaluate"]);

		let signals = Signals {
			inputs: parser.values_from_str(["-i", "--input"])?,
			outputs: parser.values_from_str(["-o", "--output"])?
		};

		let source = if evaluate {Source::Code(parser.free_from_str()?)}
			else {Source::File(parser.free_from_str()?)};

		let action = if config {
			Action::CheckConfig
		} else if syntax_tree {
			Action::ShowSyntaxTree
		} else if tokens {
			Action::ShowTokens
		} else {
			Action::Check
		};

		Ok(Self::Run {source, action, signals, verbose})
	}
}

impl TryFrom<Source> for String {
	type Error = IOError;

	fn try_from(value: Source) -> Result<Self, IOError> {
		Ok(match value {
			Source::Code(code) => code,
			Source::File(file) => {
				let mut file = File::open(&file)?;
				let mut code = String::new();
				file.read_to_string(&mut code)?;
				code
			}
		})
	}
}
