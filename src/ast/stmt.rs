//! Statement nodes (spec.md §3 "AST nodes" — Statements).

use super::{Expr, Target};

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign {
        target: Target,
        value: Expr,
    },
    Print(Expr),
    If {
        cond: Expr,
        then_block: Vec<Stmt>,
        else_block: Option<Vec<Stmt>>,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    Del(Target),
    ExprStmt(Expr),
}
