//! The MiniPyLang command-line driver: REPL by default, or execute a file.

mod cli;

use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};

use cli::Cli;
use log::error;

use minipy::error::MiniPyError;
use minipy::interpreter::Interpreter;
use minipy::lexer::Lexer;
use minipy::parser::Parser;
use minipy::pretty;
use minipy::repl;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::init();

    simple_logger::init_with_level((&args.verbosity).into())?;

    match args.file {
        Some(path) => run_file(&path, args.tree),
        None => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut out = io::stdout();
            repl::run(&mut input, &mut out).map_err(|e| e.into())
        }
    }
}

fn run_file(path: &std::path::Path, dump_tree: bool) -> Result<(), Box<dyn Error>> {
    let source = fs::read_to_string(path)?;

    let program = match lex_and_parse(&source) {
        Ok(program) => program,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let mut out = io::stdout();

    if dump_tree {
        write!(out, "{}", pretty::print_program(&program))?;
    }

    let mut interpreter = Interpreter::new();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    if let Err(e) = interpreter.run(&program, &mut out, &mut input) {
        error!("{e}");
        std::process::exit(1);
    }

    Ok(())
}

fn lex_and_parse(source: &str) -> Result<Vec<minipy::ast::Stmt>, MiniPyError> {
    let tokens = Lexer::new(source).lex()?;
    let program = Parser::new(tokens).parse_program()?;
    Ok(program)
}
