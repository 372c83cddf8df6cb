use luagam::parse;

/// Compares the dump of `source`'s syntax tree against `expected`, printing a
/// line diff when they differ.
fn assert_dump(source: &str, expected: &str) {
	let actual = parse(source).unwrap().to_string();
	if actual == expected {return}

	for line in diff::lines(expected, &actual) {
		match line {
			diff::Result::Left(line) => eprintln!("-{}", line),
			diff::Result::Right(line) => eprintln!("+{}", line),
			diff::Result::Both(line, _) => eprintln!(" {}", line)
		}
	}
	panic!("syntax tree of {:?} does not match", source);
}

#[test]
fn entry_function() {
	assert_dump("function GAM() y = x + 1 end", concat!(
		"(BLOCK\n",
		"    (STAT tok:FUNCTION val:`function`\n",
		"        (FUNCNAME tok:ID val:`GAM`)\n",
		"        (FUNCBODY\n",
		"            (BLOCK\n",
		"                (STAT\n",
		"                    (VARLIST\n",
		"                        (VAR\n",
		"                            (NAME tok:ID val:`y`)\n",
		"                        )\n",
		"                    )\n",
		"                    (EXPLIST\n",
		"                        (EXP\n",
		"                            (VAR\n",
		"                                (NAME tok:ID val:`x`)\n",
		"                            )\n",
		"                            (BINOP tok:ADD val:`+`)\n",
		"                            (NUMERAL tok:NUM val:`1`)\n",
		"                        )\n",
		"                    )\n",
		"                )\n",
		"            )\n",
		"        )\n",
		"    )\n",
		")\n"
	));
}

#[test]
fn comments_and_empty_blocks() {
	assert_dump("-- header\nfunction GAM()\nend\n", concat!(
		"(BLOCK\n",
		"    (COMMENT tok:COMM val:`-- header`)\n",
		"    (STAT tok:FUNCTION val:`function`\n",
		"        (FUNCNAME tok:ID val:`GAM`)\n",
		"        (FUNCBODY\n",
		"            (BLOCK)\n",
		"        )\n",
		"    )\n",
		")\n"
	));
}

#[test]
fn table_constructor() {
	assert_dump("t = {a = 1; -b}", concat!(
		"(BLOCK\n",
		"    (STAT\n",
		"        (VARLIST\n",
		"            (VAR\n",
		"                (NAME tok:ID val:`t`)\n",
		"            )\n",
		"        )\n",
		"        (EXPLIST\n",
		"            (EXP\n",
		"                (TABLECONSTRUCTOR\n",
		"                    (FIELDLIST\n",
		"                        (FIELD\n",
		"                            (NAME tok:ID val:`a`)\n",
		"                            (EXP\n",
		"                                (NUMERAL tok:NUM val:`1`)\n",
		"                            )\n",
		"                        )\n",
		"                        (FIELDSEP tok:SEMCOL val:`;`)\n",
		"                        (FIELD\n",
		"                            (EXP\n",
		"                                (UNOP tok:MINUS val:`-`)\n",
		"                                (VAR\n",
		"                                    (NAME tok:ID val:`b`)\n",
		"                                )\n",
		"                            )\n",
		"                        )\n",
		"                    )\n",
		"                )\n",
		"            )\n",
		"        )\n",
		"    )\n",
		")\n"
	));
}

#[test]
fn method_call_and_return() {
	assert_dump("local function f(...) return obj:get\"k\", nil; end", concat!(
		"(BLOCK\n",
		"    (LOCALSTAT tok:LOCAL val:`local`\n",
		"        (LOCALFUNCTION tok:FUNCTION val:`function`)\n",
		"        (NAME tok:ID val:`f`)\n",
		"        (FUNCBODY\n",
		"            (PARLIST tok:VARARGS val:`...`)\n",
		"            (BLOCK\n",
		"                (RETSTAT tok:RETURN val:`return`\n",
		"                    (EXPLIST\n",
		"                        (EXP\n",
		"                            (FUNCTIONCALL\n",
		"                                (PREFIXEXP tok:ID val:`obj`)\n",
		"                                (NAME tok:ID val:`get`)\n",
		"                                (ARGS\n",
		"                                    (LITERALSTRING tok:STRING val:`\"k\"`)\n",
		"                                )\n",
		"                            )\n",
		"                        )\n",
		"                        (EXP\n",
		"                            (VALUE tok:NIL val:`nil`)\n",
		"                        )\n",
		"                    )\n",
		"                    (UNDEFINED tok:SEMCOL val:`;`)\n",
		"                )\n",
		"            )\n",
		"        )\n",
		"    )\n",
		")\n"
	));
}

/// A script exercising most of the grammar parses, and its dump holds one line
/// per node.
#[test]
fn control_law() {
	let source = concat!(
		"function GAM()\n",
		"  output_sign = input_sign + 1 + sqrt(1)\n",
		"  if output_sign>sqrt(3) then\n",
		"    print(output_sign)\n",
		"  elseif output_sign<=(1+2) then\n",
		"    print(1)\n",
		"  else\n",
		"    print(2) --random comment\n",
		"  end\n",
		"  do\n",
		"    print(3)\n",
		"  end\n",
		"end\n",
		"local x\n",
		"::label::\n",
		"goto label\n",
		"repeat\n",
		"  print(a) \n",
		"until 1\n",
		"while a~=1 do\n",
		"  a = a-5\n",
		"end\n"
	);

	let ast = parse(source).unwrap();
	let nodes = ast.descendants().count();
	let dump = ast.to_string();

	assert_eq!(ast.len(), 1);
	assert_eq!(ast.nodes[0].children.len(), 6);
	assert_eq!(dump.lines().filter(|line| line.trim_start().starts_with('(')).count(), nodes);
	assert!(dump.contains("(COMMENT tok:COMM val:`--random comment`)"));
}
