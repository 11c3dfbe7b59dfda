//! Slate is a small dynamically typed scripting language with lexical
//! scoping, first-class functions and closures. The implementation is a
//! tree-walk interpreter: source text is scanned into tokens, parsed into an
//! abstract syntax tree, statically resolved, and then evaluated by walking
//! the tree. There is no bytecode and no virtual machine.
//!
//! ## Scanning
//! The [`scanner`](scanner) makes a single forward pass over the source and
//! produces a flat list of [`Token`](token::Token)s, always terminated by an
//! EOF token. Malformed input such as an unterminated string or an unexpected
//! character is reported as a [`ScanError`](error::ScanError); the scanner
//! keeps going after reporting so a single run surfaces every lexical
//! problem in the file.
//!
//! ## Parsing
//! The [`parser`](parser) is a hand-written recursive descent parser over the
//! token list. It builds [`Expr`](expr::Expr) and [`Stmt`](stmt::Stmt) trees
//! and desugars `for` loops into `while` loops as it goes. On a
//! [`ParseError`](error::ParseError) the parser synchronizes at the next
//! statement boundary and continues, so several syntax errors can be reported
//! from one parse; if anything was reported, the parse yields no statements.
//!
//! ## Resolving
//! The [`resolver`](resolver) walks the finished tree once before execution
//! and computes, for every use of a local variable, how many scopes away its
//! declaration lives. Those distances are what make closures behave
//! correctly when an enclosing scope later redeclares the same name. The
//! pass also rejects semantically invalid programs (reading a variable in
//! its own initializer, redeclaring a name in the same scope, returning from
//! the top level) as [`ResolveError`](error::ResolveError)s, and flags
//! variables that are never read.
//!
//! ## Interpreting
//! The [`interpreter`](interpreter) executes statements in order against a
//! chain of [`Environment`](environment::Environment) frames. Each block and
//! each function call gets a fresh frame; a function value keeps hold of the
//! frame that was active at its declaration, which is all a closure is.
//! Errors that can only be caught at runtime, such as an undefined variable,
//! adding a number to a string, or calling something that is not callable,
//! unwind the current run as a [`RuntimeError`](error::RuntimeError).

use std::io::Write;
use std::{fs, process};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub mod ast;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// The interpreter driver. The interpreter instance, and with it the global
/// environment, lives as long as the driver so definitions persist across
/// prompt inputs.
#[allow(non_camel_case_types)]
pub struct slate<'a> {
    interpreter: interpreter::Interpreter<'a>,
}

impl<'a> slate<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        slate {
            interpreter: interpreter::Interpreter::new(output),
        }
    }

    /// Runs a script file. Exits with code 65 if the script had scan, parse
    /// or resolve errors, and 70 if it failed at runtime.
    pub fn run_file(&mut self, path: String) {
        let contents = fs::read_to_string(path)
            .expect("should have been able to read the file");

        self.run(&contents);

        if error::had_error() {
            process::exit(65);
        }
        if error::had_runtime_error() {
            process::exit(70);
        }
    }

    /// Runs the interactive prompt. The error flags are cleared between
    /// inputs so one bad line does not poison the next.
    pub fn run_prompt(&mut self) {
        let mut editor = DefaultEditor::new().expect("should have been able to start the prompt");

        let history = home::home_dir().map(|dir| dir.join(".slate_history"));
        if let Some(path) = &history {
            let _ = editor.load_history(path);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());

                    self.run(&line);
                    error::reset_error();
                },
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(error) => {
                    eprintln!("{error}");
                    break;
                },
            }
        }

        if let Some(path) = &history {
            let _ = editor.save_history(path);
        }
    }

    /// Runs the pipeline over a source string. Execution only starts if the
    /// scanner, the parser and the resolver all finished without errors.
    fn run(&mut self, source: &str) {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens();

        if error::had_error() {
            return;
        }

        let mut parser = Parser::new(tokens);
        let statements = parser.parse();

        if error::had_error() {
            return;
        }

        let mut resolver = Resolver::new(&mut self.interpreter);
        resolver.resolve(&statements);

        if error::had_error() {
            return;
        }

        self.interpreter.interpret(&statements);
    }
}
