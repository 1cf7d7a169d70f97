//! Interactive read-eval-print loop (spec.md §6).

use std::io::{self, BufRead, Write};

use crate::interpreter::Interpreter;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::pretty;

const BANNER: &str = "MiniPyLang REPL. Type 'help' for meta-commands, 'quit' to exit.";

/// Drives the REPL over `input`/`out`, sharing one `Interpreter` (and so one
/// `Environment`) across every submitted line, matching spec.md §4.4's
/// single global scope.
pub fn run(input: &mut dyn BufRead, out: &mut dyn Write) -> io::Result<()> {
    let mut interpreter = Interpreter::new();
    let mut show_tree = false;

    writeln!(out, "{BANNER}")?;

    loop {
        write!(out, ">>> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }
        let line = line.trim_end_matches(['\n', '\r']);

        match line.trim() {
            "" => continue,
            "quit" | "exit" => return Ok(()),
            "help" => {
                print_help(out)?;
                continue;
            }
            "vars" => {
                print_vars(&interpreter, out)?;
                continue;
            }
            "clear" => {
                interpreter.env.reset();
                continue;
            }
            "tree on" => {
                show_tree = true;
                continue;
            }
            "tree off" => {
                show_tree = false;
                continue;
            }
            _ => {}
        }

        let tokens = match Lexer::new(line).lex() {
            Ok(tokens) => tokens,
            Err(e) => {
                log::error!("{e}");
                continue;
            }
        };

        let program = match Parser::new(tokens).parse_program() {
            Ok(program) => program,
            Err(e) => {
                log::error!("{e}");
                continue;
            }
        };

        if show_tree {
            write!(out, "{}", pretty::print_program(&program))?;
        }

        if let Err(e) = interpreter.run(&program, out, input) {
            log::error!("{e}");
        }
    }
}

fn print_help(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Meta-commands:")?;
    writeln!(out, "  tree on|off   toggle AST dump before execution")?;
    writeln!(out, "  vars          list current bindings")?;
    writeln!(out, "  clear         reset the environment")?;
    writeln!(out, "  help          show this message")?;
    writeln!(out, "  quit          exit the REPL")
}

fn print_vars(interpreter: &Interpreter, out: &mut dyn Write) -> io::Result<()> {
    let mut bindings = interpreter.env.snapshot();
    bindings.sort_by(|a, b| a.0.cmp(b.0));
    for (name, value) in bindings {
        writeln!(out, "{name} = {}", crate::value::stringify(value))?;
    }
    Ok(())
}
