use self::super::{
	Error, Position, Validator, Warning, check, extract_variables
};
use crate::ast::{Ast, NodeKind, parse};
use rstest::rstest;

fn ast(source: &str) -> Ast {
	parse(source).unwrap()
}

fn at(row: usize, col: usize) -> Position {
	Position {row, col}
}

#[test]
fn check_finds_first_occurrence() {
	let ast = ast("function GAM()\n  y = x + 1\n  x = x + 1\nend\n");

	assert_eq!(check(&ast, "x", NodeKind::Exp), Some(at(2, 7)));
	assert_eq!(check(&ast, "x", NodeKind::VarList), Some(at(3, 3)));
	assert_eq!(check(&ast, "y", NodeKind::VarList), Some(at(2, 3)));
	assert_eq!(check(&ast, "y", NodeKind::Exp), None);
	assert_eq!(check(&ast, "x", NodeKind::LocalStat), None);
}

/// Only grandchildren are compared, so names nested deeper below a node of the
/// requested kind are found through their own closer ancestors instead.
#[test]
fn check_looks_two_levels_down() {
	let ast = ast("function GAM()\n  y = f(x)\n  local a, z = 2\n  t.u = 1\nend");

	assert_eq!(check(&ast, "f", NodeKind::Exp), Some(at(2, 7)));
	assert_eq!(check(&ast, "x", NodeKind::Exp), Some(at(2, 9)));
	assert_eq!(check(&ast, "a", NodeKind::LocalStat), Some(at(3, 9)));
	assert_eq!(check(&ast, "z", NodeKind::LocalStat), Some(at(3, 12)));
	assert_eq!(check(&ast, "t", NodeKind::VarList), Some(at(4, 3)));
	assert_eq!(check(&ast, "GAM", NodeKind::Exp), None);
}

#[test]
fn extract_plain_variables() {
	let ast = ast("function GAM() y = x + t.a + u[1] + f(v) end");
	let names: Vec<_> = extract_variables(&ast).iter()
		.filter_map(|var| var.children[0].raw()).collect();

	assert_eq!(names, ["y", "x", "v"]);
}

#[test]
fn input_signals() {
	let ast = ast("function GAM()\n  y = x + 1\nend");
	let validator = Validator::new(&ast);

	assert_eq!(validator.validate_input_signal("x"), Ok(()));
	assert_eq!(validator.validate_input_signal("w"),
		Err(Error::UnusedInput {name: "w".to_owned()}));
}

#[rstest]
#[case("function GAM() x = x + 1 end",
	Error::ReassignedInput {name: "x".to_owned(), position: Position {row: 1, col: 16}})]
#[case("function GAM() local x = 1 y = x end",
	Error::ShadowedInput {name: "x".to_owned(), position: Position {row: 1, col: 22}})]
#[case("function GAM() y = 1 end", Error::UnusedInput {name: "x".to_owned()})]
fn input_signal_violations(#[case] source: &str, #[case] violation: Error) {
	let ast = ast(source);
	assert_eq!(Validator::new(&ast).validate_input_signal("x"), Err(violation));
}

#[test]
fn output_signals() {
	let ast = ast("function GAM()\n  y = x + 1\nend");
	let validator = Validator::new(&ast);

	assert_eq!(validator.validate_output_signal("y", 100), Ok(None));
	assert_eq!(validator.validate_output_signal("z", 100),
		Err(Error::UnassignedOutput {name: "z".to_owned()}));
}

/// Reading an output before assigning it is allowed, but reported.
#[test]
fn output_used_before_assignment() {
	let source = "function GAM()\n  y = x + 1\n  x = x + 1\nend\n";
	let ast = ast(source);

	let warning = Validator::new(&ast).validate_output_signal("x", source.len() + 1);
	assert_eq!(warning, Ok(Some(Warning::UsedBeforeAssignment {name: "x".to_owned(), position: at(2, 7)})));
	assert_eq!(warning.unwrap().unwrap().to_string(),
		"[Line:2, Col:7] Output signal `x` is used before assignment. Signals initial value is 0.");
}

/// A local declaration shadowing an output is rejected, even when the output
/// is assigned elsewhere.
#[test]
fn output_shadowed_by_local() {
	let ast = ast("function GAM()\n  y = 1\n  local y = 2\nend");

	assert_eq!(Validator::new(&ast).validate_output_signal("y", 100),
		Err(Error::ShadowedOutput {name: "y".to_owned(), position: at(3, 9)}));
}

#[rstest]
#[case("function GAM() end", Ok(()))]
#[case("-- control law\nfunction GAM() end", Ok(()))]
#[case("function gam() end", Err(Error::MissingEntry))]
#[case("function GAM.step() end", Err(Error::MissingEntry))]
#[case("local GAM = 1", Err(Error::MissingEntry))]
#[case("function GAM() end\nfunction GAM() end", Err(Error::DuplicateEntry {count: 2}))]
#[case("return 1\nfunction GAM() end", Err(Error::TopLevelNodes {count: 2}))]
fn entry_function(#[case] source: &str, #[case] expected: Result<(), Error>) {
	let ast = ast(source);
	assert_eq!(Validator::new(&ast).check_gam(), expected);
}

#[rstest]
#[case("function GAM() end", Ok(()))]
#[case("-- header\nfunction GAM() end\n-- footer", Ok(()))]
#[case("local t = 10\nfunction GAM()\n  y = x + t\nend\n", Err(Error::CodeOutsideEntry))]
#[case("function helper() end\nfunction GAM() end", Err(Error::CodeOutsideEntry))]
fn only_entry_function(#[case] source: &str, #[case] expected: Result<(), Error>) {
	let ast = ast(source);
	assert_eq!(Validator::new(&ast).check_only_gam(), expected);
}

#[test]
fn variables_initialisation() {
	let ast = ast("function GAM()\n  y = x + z\n  w = z\nend");
	let validator = Validator::new(&ast);

	assert_eq!(validator.variables().len(), 5);
	assert_eq!(validator.check_variables_initialisation(&["x", "y", "z", "w"]), Ok(()));
	assert_eq!(validator.check_variables_initialisation(&["x", "y"]),
		Err(Error::Uninitialised {name: "z".to_owned()}));
}

#[test]
fn error_messages() {
	assert_eq!(Error::MissingEntry.to_string(), "No main `GAM` function found");
	assert_eq!(Error::CodeOutsideEntry.to_string(), "External code found outside `GAM` function");
	assert_eq!(Error::ReassignedInput {name: "x".to_owned(), position: at(1, 16)}.to_string(),
		"[Line:1, Col:16] Input signal `x` is being reassigned.");
}
