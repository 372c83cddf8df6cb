#![forbid(
	// Rationale: A verifier guarding what runs inside a real time loop must be
	// reliable, and has no need for memory unsafety.
	unsafe_code
)]
#![warn(
	// Rationale: Panics should be avoided in favor of returning a Result, and
	// situations where panics are intentional should be well documented
	// (requiring an allow attribute to signal complete documentation).
	clippy::unwrap_used,
	clippy::panic,

	// Rationale: These should not be in production code.
	clippy::todo,
	clippy::unimplemented
)]
#![allow(
	// Rationale: Tabs are superior, don't at me.
	clippy::tabs_in_doc_comments
)]
//! LuaGAM is the front end of a Lua scripting block for a real time control
//! framework. A user writes the control law as a Lua function named `GAM`,
//! reading input signals and assigning output signals through globals; before
//! the block ever runs the script, this crate checks that it is well formed
//! and that it uses its signals sensibly.
//!
//! This project is made of three components, each building on the last.
//! - [ast::lexer] - The tokenizer, turning Lua source text into a stream of
//!   positioned tokens
//! - [ast::parser] - The parser, building a concrete syntax tree that mirrors
//!   the Lua grammar from those tokens
//! - [verifier] - The static checks over the syntax tree: the entry function,
//!   and how input and output signals are used
//! On top of these, [script] reads a block's configuration and runs the
//! initialise and setup phases over it.
//!
//! Examples
//! --------
//! Checking a script by hand only requires stringing the pieces together.
//! ```rust
//! use luagam::{ast::{lexer, parser}, verifier::Validator};
//!
//! // Ready our Lua source code.
//! let source = "function GAM()\n  y = x * 2\nend";
//! // Tokenize it...
//! let tokens = lexer::scan(source).unwrap();
//! // ...and parse the tokens into a syntax tree.
//! let ast = parser::generate_ast(&tokens).unwrap();
//!
//! // Now check the tree.
//! let validator = Validator::new(&ast);
//! validator.check_gam().unwrap();
//! validator.check_only_gam().unwrap();
//! validator.validate_input_signal("x").unwrap();
//! assert_eq!(validator.validate_output_signal("y", source.len() + 1), Ok(None));
//! ```
//! The whole host flow, configuration included, is available through
//! [Script][script-script].
//!
//! [script-script]: crate::script::Script

pub mod ast;
pub mod script;
pub mod verifier;

pub use self::ast::{parse, scan};
