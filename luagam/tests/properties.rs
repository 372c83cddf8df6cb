use luagam::{
	ast::lexer::{KEYWORDS, OPERATORS, TokenKind},
	parse, scan
};
use proptest::{collection::vec, prelude::*, sample::select};

fn spellings() -> Vec<&'static str> {
	KEYWORDS.iter().chain(OPERATORS.iter()).map(|kind| kind.spelling()).collect()
}

proptest! {
	/// Keywords and operators separated by spaces scan back to themselves, in
	/// order, followed by the sentinel.
	#[test]
	fn fixed_spellings_round_trip(words in vec(select(spellings()), 0..32)) {
		let tokens = scan(&words.join(" ")).unwrap();
		let raw: Vec<_> = tokens.iter().map(|token| token.raw.as_str()).collect();

		prop_assert_eq!(&raw[..raw.len() - 1], &words[..]);
		prop_assert_eq!(tokens.iter().last().map(|token| token.kind), Some(TokenKind::EndCode));
	}

	#[test]
	fn decimal_numbers_scan_whole(number in r"[0-9]{1,6}(\.[0-9]{1,4})?([eE][+-]?[0-9]{1,3})?") {
		let tokens = scan(&number).unwrap();

		prop_assert_eq!(tokens.len(), 2);
		prop_assert_eq!(tokens.get(0).map(|token| (token.raw.as_str(), token.kind)),
			Some((number.as_str(), TokenKind::Number)));
	}

	#[test]
	fn hexadecimal_numbers_scan_whole(number in r"0[xX][0-9a-fA-F]{1,6}(\.[0-9a-fA-F]{1,4})?([pP][+-]?[0-9]{1,3})?") {
		let tokens = scan(&number).unwrap();

		prop_assert_eq!(tokens.len(), 2);
		prop_assert_eq!(tokens.get(0).map(|token| token.kind), Some(TokenKind::Number));
	}

	/// Parsing has no hidden state: the same source always gives the same
	/// outcome.
	#[test]
	fn parse_is_idempotent(
		target in r"[a-z_][a-z0-9_]{0,6}",
		left in r"[a-z_][a-z0-9_]{0,6}",
		operator in select(vec!["+", "-", "*", "/", "..", "==", "and", "~"]),
		right in r"[a-z_][a-z0-9_]{0,6}"
	) {
		let source = format!("function GAM()\n  {} = {} {} -{}\nend", target, left, operator, right);
		prop_assert_eq!(parse(&source), parse(&source));
	}
}
