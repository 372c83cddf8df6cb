use luagam::{
	script::{CodeSource, Error, Script, ScriptConfig, SignalType, StateValue},
	verifier::{Error as VerifierError, Warning}
};
use std::{io::Write, path::PathBuf};
use tempfile::NamedTempFile;

const CONTROL_LAW: &str = r#"
Code: |
  function GAM()
    y = x + 1
  end
InputSignals:
  - {Name: x, Type: float64}
OutputSignals:
  - {Name: y, Type: float64, NumberOfElements: 1}
"#;

fn setup(yaml: &str) -> Result<Vec<Warning>, Error> {
	let script = Script::from_yaml(yaml)?;
	Ok(script.setup()?.warnings)
}

#[test]
fn reads_configuration() {
	let config: ScriptConfig = CONTROL_LAW.parse().unwrap();

	assert_eq!(config.input_signals.len(), 1);
	assert_eq!(config.input_signals[0].name, "x");
	assert_eq!(config.input_signals[0].kind, SignalType::Float64);
	assert_eq!(config.output_signals[0].number_of_elements, 1);
	assert!(config.internal_states.is_empty());
}

#[test]
fn inline_control_law() {
	let script = Script::from_yaml(CONTROL_LAW).unwrap();

	assert!(!script.is_code_external());
	assert_eq!(script.code_path(), None);
	assert_eq!(script.ast().len(), 1);
	assert!(script.setup().unwrap().warnings.is_empty());
}

#[test]
fn input_and_output_sharing_a_name() {
	let yaml = r#"
Code: "function GAM() x = x + 1 end"
InputSignals:
  - {Name: x, Type: uint32}
OutputSignals:
  - {Name: x, Type: uint32}
"#;

	assert!(matches!(setup(yaml), Err(Error::SignalCollision(name)) if name == "x"));
}

#[test]
fn internal_states() {
	let yaml = r#"
Code: "function GAM() glob1=glob2 end"
InternalStates:
  glob1: 1.5
  glob2: 1
  enabled: true
  gains: "{1, 2, 3}"
"#;

	let script = Script::from_yaml(yaml).unwrap();
	let states = &script.config().internal_states;

	assert_eq!(states.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>(),
		["glob1", "glob2", "enabled", "gains"]);
	assert_eq!(states[0].1, StateValue::Float(1.5));
	assert_eq!(states[1].1, StateValue::Integer(1));
	assert_eq!(states[2].1.to_string(), "true");
	assert_eq!(states[3].1.to_string(), "{1, 2, 3}");
	assert!(script.setup().unwrap().warnings.is_empty());
	assert!(script.check_variables_initialisation().is_ok());
}

#[test]
fn malformed_internal_state() {
	let yaml = r#"
Code: "function GAM() glob1=glob2 end"
InternalStates:
  glob1: 1a
"#;

	let error = Script::from_yaml(yaml).unwrap_err();
	assert!(error.is_syntax());
	assert!(matches!(error, Error::InternalState {statement, ..} if statement == "glob1=1a"));
}

/// The first malformed entry reported is the first one declared, not the
/// first one alphabetically.
#[test]
fn declaration_order() {
	let states = r#"
Code: "function GAM() end"
InternalStates:
  zeta: 1a
  alpha: 2b
"#;
	assert!(matches!(Script::from_yaml(states),
		Err(Error::InternalState {statement, ..}) if statement == "zeta=1a"));

	let functions = r#"
Code: "function GAM() end"
AuxiliaryFunctions:
  second: "function second( end"
  first: "function first() return end end"
"#;
	assert!(matches!(Script::from_yaml(functions),
		Err(Error::AuxiliaryFunction {name, ..}) if name == "second"));
}

#[test]
fn auxiliary_functions() {
	let valid = r#"
Code: "function GAM() y = clamp(x) end"
InputSignals: [{Name: x, Type: float32}]
OutputSignals: [{Name: y, Type: float32}]
AuxiliaryFunctions:
  clamp: "function clamp(v) if v > 1 then return 1 end return v end"
"#;
	assert!(setup(valid).unwrap().is_empty());

	let invalid = r#"
Code: "function GAM() end"
AuxiliaryFunctions:
  broken: "function broken( end"
"#;
	assert!(matches!(Script::from_yaml(invalid),
		Err(Error::AuxiliaryFunction {name, ..}) if name == "broken"));
}

#[test]
fn code_syntax_error() {
	let error = Script::from_yaml("Code: \"function GAM() y = end\"").unwrap_err();
	assert!(matches!(error, Error::Code(_)));
}

/// Top level code besides the entry function is only allowed in external
/// files.
#[test]
fn code_outside_entry_function() {
	let code = "local t = 10\nfunction GAM()\n  y = x + t\nend\n";
	let yaml = format!(
		"Code: {:?}\nInputSignals: [{{Name: x, Type: int8}}]\nOutputSignals: [{{Name: y, Type: int8}}]\n",
		code);
	assert!(matches!(setup(&yaml),
		Err(Error::Verification(VerifierError::CodeOutsideEntry))));

	let mut file = NamedTempFile::new().unwrap();
	write!(file, "{}", code).unwrap();
	let yaml = format!(
		"Code: \"file://{}\"\nInputSignals: [{{Name: x, Type: int8}}]\nOutputSignals: [{{Name: y, Type: int8}}]\n",
		file.path().display());

	let script = Script::from_yaml(&yaml).unwrap();
	assert!(script.is_code_external());
	assert_eq!(script.code_path(), Some(file.path()));
	assert_eq!(script.code(), code);
	assert!(script.setup().unwrap().warnings.is_empty());
}

#[test]
fn missing_code_file() {
	let error = Script::from_yaml("Code: \"file:///nonexistent/luagam/law.lua\"").unwrap_err();
	assert!(matches!(error, Error::Io {path, ..} if path == PathBuf::from("/nonexistent/luagam/law.lua")));
}

#[test]
fn output_used_before_assignment() {
	let yaml = r#"
Code: |
  function GAM()
    y = x + 1
    x = x + 1
  end
OutputSignals:
  - {Name: x, Type: float64}
  - {Name: y, Type: float64}
"#;

	let warnings = setup(yaml).unwrap();
	assert_eq!(warnings.len(), 1);
	assert!(matches!(&warnings[0], Warning::UsedBeforeAssignment {name, ..} if name == "x"));
}

#[test]
fn signal_violations() {
	let reassigned = r#"
Code: "function GAM() x = 2 y = x end"
InputSignals: [{Name: x, Type: bool}]
OutputSignals: [{Name: y, Type: bool}]
"#;
	assert!(matches!(setup(reassigned),
		Err(Error::Verification(VerifierError::ReassignedInput {..}))));

	let unassigned = r#"
Code: "function GAM() local y = x end"
InputSignals: [{Name: x, Type: bool}]
OutputSignals: [{Name: y, Type: bool}]
"#;
	assert!(matches!(setup(unassigned),
		Err(Error::Verification(VerifierError::UnassignedOutput {..}))));

	let missing_entry = "Code: \"function gam() end\"";
	assert!(matches!(setup(missing_entry),
		Err(Error::Verification(VerifierError::MissingEntry))));
}

#[test]
fn invalid_configuration() {
	assert!(matches!(ScriptConfig::from_yaml("InputSignals: []"), Err(Error::Config(_))));
	assert!(matches!(ScriptConfig::from_yaml("Code: x\nInputSignals: [{Name: x, Type: complex}]"),
		Err(Error::Config(_))));
	assert!(matches!(ScriptConfig::from_yaml("Code: x\nFrequency: 10"), Err(Error::Config(_))));
}

#[test]
fn code_source() {
	assert_eq!(CodeSource::from("file://law.lua"), CodeSource::File(PathBuf::from("law.lua")));
	assert_eq!(CodeSource::from("function GAM() end"),
		CodeSource::Inline("function GAM() end".to_owned()));
}
