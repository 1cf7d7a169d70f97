//! AST pretty-printer used by the `--tree` CLI flag and the REPL's `tree on` mode.

use crate::ast::{BinaryOp, Expr, Stmt, Target, UnaryOp};

/// Render a full program as an indented tree, one line per node.
pub fn print_program(program: &[Stmt]) -> String {
    let mut out = String::new();
    for stmt in program {
        print_stmt(stmt, 0, &mut out);
    }
    out
}

fn indent(level: usize, out: &mut String) {
    for _ in 0..level {
        out.push_str("  ");
    }
}

fn print_stmt(stmt: &Stmt, level: usize, out: &mut String) {
    indent(level, out);
    match stmt {
        Stmt::Assign { target, value } => {
            out.push_str("Assign ");
            out.push_str(&format_target(target));
            out.push('\n');
            print_expr(value, level + 1, out);
        }
        Stmt::Print(expr) => {
            out.push_str("Print\n");
            print_expr(expr, level + 1, out);
        }
        Stmt::If {
            cond,
            then_block,
            else_block,
        } => {
            out.push_str("If\n");
            print_expr(cond, level + 1, out);
            indent(level, out);
            out.push_str("Then\n");
            for stmt in then_block {
                print_stmt(stmt, level + 1, out);
            }
            if let Some(else_block) = else_block {
                indent(level, out);
                out.push_str("Else\n");
                for stmt in else_block {
                    print_stmt(stmt, level + 1, out);
                }
            }
        }
        Stmt::While { cond, body } => {
            out.push_str("While\n");
            print_expr(cond, level + 1, out);
            indent(level, out);
            out.push_str("Do\n");
            for stmt in body {
                print_stmt(stmt, level + 1, out);
            }
        }
        Stmt::Del(target) => {
            out.push_str("Del ");
            out.push_str(&format_target(target));
            out.push('\n');
        }
        Stmt::ExprStmt(expr) => {
            out.push_str("ExprStmt\n");
            print_expr(expr, level + 1, out);
        }
    }
}

fn format_target(target: &Target) -> String {
    match target {
        Target::Name(name) => name.clone(),
        Target::Index(target, index) => {
            format!("{}[{}]", expr_summary(target), expr_summary(index))
        }
    }
}

fn expr_summary(expr: &Expr) -> String {
    match expr {
        Expr::IntLit(v) => v.to_string(),
        Expr::FloatLit(v) => v.to_string(),
        Expr::StringLit(s) => format!("{s:?}"),
        Expr::BoolLit(b) => b.to_string(),
        Expr::VarRef(name) => name.clone(),
        _ => "<expr>".to_owned(),
    }
}

fn print_expr(expr: &Expr, level: usize, out: &mut String) {
    indent(level, out);
    match expr {
        Expr::IntLit(v) => out.push_str(&format!("IntLit {v}\n")),
        Expr::FloatLit(v) => out.push_str(&format!("FloatLit {v}\n")),
        Expr::StringLit(s) => out.push_str(&format!("StringLit {s:?}\n")),
        Expr::BoolLit(b) => out.push_str(&format!("BoolLit {b}\n")),
        Expr::VarRef(name) => out.push_str(&format!("VarRef {name}\n")),
        Expr::ListLit(elements) => {
            out.push_str("ListLit\n");
            for element in elements {
                print_expr(element, level + 1, out);
            }
        }
        Expr::DictLit(entries) => {
            out.push_str("DictLit\n");
            for (key, value) in entries {
                print_expr(key, level + 1, out);
                print_expr(value, level + 1, out);
            }
        }
        Expr::Index { target, index } => {
            out.push_str("Index\n");
            print_expr(target, level + 1, out);
            print_expr(index, level + 1, out);
        }
        Expr::Unary { op, operand } => {
            out.push_str(&format!("Unary {}\n", unary_symbol(op)));
            print_expr(operand, level + 1, out);
        }
        Expr::Binary { op, left, right } => {
            out.push_str(&format!("Binary {}\n", binary_symbol(op)));
            print_expr(left, level + 1, out);
            print_expr(right, level + 1, out);
        }
        Expr::Call { name, args } => {
            out.push_str(&format!("Call {name}\n"));
            for arg in args {
                print_expr(arg, level + 1, out);
            }
        }
    }
}

fn unary_symbol(op: &UnaryOp) -> &'static str {
    match op {
        UnaryOp::Plus => "+",
        UnaryOp::Minus => "-",
        UnaryOp::Not => "not",
    }
}

fn binary_symbol(op: &BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Eq => "==",
        BinaryOp::NotEq => "!=",
        BinaryOp::Lt => "<",
        BinaryOp::LtEq => "<=",
        BinaryOp::Gt => ">",
        BinaryOp::GtEq => ">=",
        BinaryOp::And => "and",
        BinaryOp::Or => "or",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    #[test]
    fn prints_one_line_per_node() {
        let tokens = Lexer::new("x=1+2").lex().expect("lex");
        let program = Parser::new(tokens).parse_program().expect("parse");
        let tree = print_program(&program);
        assert!(tree.contains("Assign x"));
        assert!(tree.contains("Binary +"));
        assert!(tree.contains("IntLit 1"));
        assert!(tree.contains("IntLit 2"));
    }
}
