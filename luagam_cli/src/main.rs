mod arguments;

use self::arguments::{HELP, Action, Arguments, Signals};
use itertools::Itertools;
use luagam::{
	ast::{Ast, parse, scan},
	script::{Error as ScriptError, Script, ScriptConfig},
	verifier::{Validator, Warning, Error as VerifierError}
};
use std::{convert::TryFrom, io::{Error as IOError, stderr}, process::exit};
use tracing::Level;

pub static VERSION: &str = "\
LuaGAM Script Checker 0.1.0
Entry function `GAM`";

fn main() {
	match Arguments::from_env() {
		Ok(Arguments::ShowHelp) => eprintln!("{}", HELP),
		Ok(Arguments::ShowVersion) => eprintln!("{}", VERSION),
		Ok(Arguments::Run {source, action, signals, verbose}) => {
			init_logging(verbose);
			let inline = source.is_inline();
			let code = handle_io(String::try_from(source));

			match action {
				Action::Check => check(&code, inline, &signals),
				Action::CheckConfig => check_config(&code),
				Action::ShowSyntaxTree => show_syntax_tree(&code),
				Action::ShowTokens => show_tokens(&code)
			}
		},
		Err(error) => {
			eprintln!("argument error: {}\n\n{}", error, HELP);
			exit(3);
		}
	}
}

fn init_logging(verbose: bool) {
	tracing_subscriber::fmt()
		.with_max_level(if verbose {Level::DEBUG} else {Level::WARN})
		.with_writer(stderr)
		.with_target(false)
		.init();
}

fn handle_io<T>(result: Result<T, IOError>) -> T {
	match result {
		Ok(value) => value,
		Err(error) => {
			eprintln!("io error: {}", error);
			exit(3);
		}
	}
}

fn syntax_tree(code: &str) -> Ast {
	match parse(code) {
		Ok(ast) => ast,
		Err(error) => {
			eprintln!("syntax error: {}", error);
			exit(2);
		}
	}
}

fn report(warnings: &[Warning]) {
	warnings.iter().for_each(|warning| eprintln!("warning: {}", warning));
	println!("ok");
}

fn check(code: &str, inline: bool, signals: &Signals) {
	let ast = syntax_tree(code);
	let validator = Validator::new(&ast);
	let max_lines = code.len() + 1;

	let result = validator.check_gam()
		.and_then(|()| if inline {validator.check_only_gam()} else {Ok(())})
		.and_then(|()| signals.inputs.iter()
			.try_for_each(|name| validator.validate_input_signal(name)))
		.and_then(|()| signals.outputs.iter()
			.map(|name| validator.validate_output_signal(name, max_lines))
			.collect::<Result<Vec<_>, VerifierError>>());

	match result {
		Ok(warnings) => report(&warnings.into_iter().flatten().collect_vec()),
		Err(error) => {
			eprintln!("verification error: {}", error);
			exit(1);
		}
	}
}

fn check_config(text: &str) {
	let config = match ScriptConfig::from_yaml(text) {
		Ok(config) => config,
		Err(error) => {
			eprintln!("config error: {}", error);
			exit(3);
		}
	};

	match Script::initialise(config).and_then(|script| script.setup()) {
		Ok(setup) => report(&setup.warnings),
		Err(error) => {
			eprintln!("{}", error);
			exit(match error {
				ScriptError::Io {..} | ScriptError::Config(_) => 3,
				error if error.is_syntax() => 2,
				_ => 1
			});
		}
	}
}

fn show_syntax_tree(code: &str) {
	print!("{}", syntax_tree(code))
}

fn show_tokens(code: &str) {
	match scan(code) {
		Ok(tokens) => println!("{}", tokens.iter()
			.map(|token| format!("{:>4}:{:<4} {}", token.row, token.col, token.describe()))
			.join("\n")),
		Err(error) => {
			eprintln!("syntax error: {}", error);
			exit(2);
		}
	}
}
