//! Recursive-descent parser with precedence climbing (spec.md §4.2).

use crate::ast::{BinaryOp, Expr, Stmt, Target, UnaryOp};
use crate::token::{Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error at line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse a complete program: a sequence of statements up to `Eof`.
    pub fn parse_program(mut self) -> ParseResult<Vec<Stmt>> {
        let mut stmts = vec![];

        while !self.check(&TokenKind::Eof) {
            stmts.push(self.parse_statement()?);
        }

        Ok(stmts)
    }

    // --- token-stream helpers -------------------------------------------------

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.pos - 1]
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        self.previous()
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    fn match_kind(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> ParseResult<&Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(format!("expected {what}, got '{}'", self.peek().lexeme)))
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            line: self.peek().line,
        }
    }

    // --- statements ------------------------------------------------------------

    fn parse_statement(&mut self) -> ParseResult<Stmt> {
        match self.peek().kind {
            TokenKind::Print => self.parse_print(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Del => self.parse_del(),
            _ => self.parse_assign_or_expr(),
        }
    }

    fn parse_block(&mut self) -> ParseResult<Vec<Stmt>> {
        self.expect(&TokenKind::LBrace, "'{'")?;

        let mut stmts = vec![];
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            stmts.push(self.parse_statement()?);
        }

        self.expect(&TokenKind::RBrace, "'}'")?;
        Ok(stmts)
    }

    fn parse_print(&mut self) -> ParseResult<Stmt> {
        self.advance(); // 'print'
        let expr = self.parse_expression()?;
        Ok(Stmt::Print(expr))
    }

    fn parse_if(&mut self) -> ParseResult<Stmt> {
        self.advance(); // 'if'
        self.expect(&TokenKind::LParen, "'('")?;
        let cond = self.parse_expression()?;
        self.expect(&TokenKind::RParen, "')'")?;
        let then_block = self.parse_block()?;

        let else_block = if self.match_kind(&TokenKind::Else) {
            if self.check(&TokenKind::If) {
                Some(vec![self.parse_if()?])
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };

        Ok(Stmt::If {
            cond,
            then_block,
            else_block,
        })
    }

    fn parse_while(&mut self) -> ParseResult<Stmt> {
        self.advance(); // 'while'
        self.expect(&TokenKind::LParen, "'('")?;
        let cond = self.parse_expression()?;
        self.expect(&TokenKind::RParen, "')'")?;
        let body = self.parse_block()?;
        Ok(Stmt::While { cond, body })
    }

    fn parse_del(&mut self) -> ParseResult<Stmt> {
        self.advance(); // 'del'
        let target = self.parse_target()?;
        Ok(Stmt::Del(target))
    }

    fn parse_target(&mut self) -> ParseResult<Target> {
        let expr = self.parse_postfix()?;
        expr_to_target(expr).map_err(|msg| self.error(msg))
    }

    fn parse_assign_or_expr(&mut self) -> ParseResult<Stmt> {
        let expr = self.parse_expression()?;

        if self.match_kind(&TokenKind::Assign) {
            let target = expr_to_target(expr).map_err(|msg| self.error(msg))?;
            let value = self.parse_expression()?;
            Ok(Stmt::Assign { target, value })
        } else {
            Ok(Stmt::ExprStmt(expr))
        }
    }

    // --- expressions (lowest to highest precedence) -----------------------------

    fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_and()?;
        while self.match_kind(&TokenKind::Or) {
            let right = self.parse_and()?;
            left = Expr::Binary {
                op: BinaryOp::Or,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_not()?;
        while self.match_kind(&TokenKind::And) {
            let right = self.parse_not()?;
            left = Expr::Binary {
                op: BinaryOp::And,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> ParseResult<Expr> {
        if self.match_kind(&TokenKind::Not) {
            let operand = self.parse_not()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            });
        }
        self.parse_equality()
    }

    fn parse_equality(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_comparison()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::EqEq => BinaryOp::Eq,
                TokenKind::NotEq => BinaryOp::NotEq,
                _ => break,
            };
            self.advance();
            let right = self.parse_comparison()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::LtEq => BinaryOp::LtEq,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::GtEq => BinaryOp::GtEq,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_factor()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_factor()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let op = match self.peek().kind {
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Minus => Some(UnaryOp::Minus),
            TokenKind::Bang => Some(UnaryOp::Not),
            _ => None,
        };

        if let Some(op) = op {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }

        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;

        loop {
            match self.peek().kind {
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.parse_expression()?;
                    self.expect(&TokenKind::RBracket, "']'")?;
                    expr = Expr::Index {
                        target: Box::new(expr),
                        index: Box::new(index),
                    };
                }
                TokenKind::LParen => {
                    let name = match &expr {
                        Expr::VarRef(name) => name.clone(),
                        _ => return Err(self.error("call target must be an identifier")),
                    };
                    self.advance();
                    let mut args = vec![];
                    if !self.check(&TokenKind::RParen) {
                        loop {
                            args.push(self.parse_expression()?);
                            if !self.match_kind(&TokenKind::Comma) {
                                break;
                            }
                        }
                    }
                    self.expect(&TokenKind::RParen, "')'")?;
                    expr = Expr::Call { name, args };
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = self.peek().clone();

        let expr = match token.kind {
            TokenKind::IntLit(v) => {
                self.advance();
                Expr::IntLit(v)
            }
            TokenKind::FloatLit(v) => {
                self.advance();
                Expr::FloatLit(v)
            }
            TokenKind::StringLit(ref s) => {
                let s = s.clone();
                self.advance();
                Expr::StringLit(s)
            }
            TokenKind::BoolLit(v) => {
                self.advance();
                Expr::BoolLit(v)
            }
            TokenKind::Ident(ref name) => {
                let name = name.clone();
                self.advance();
                Expr::VarRef(name)
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(&TokenKind::RParen, "')'")?;
                inner
            }
            TokenKind::LBracket => self.parse_list_literal()?,
            TokenKind::LBrace => self.parse_dict_literal()?,
            TokenKind::Input => {
                // `input` behaves as a call-only builtin; bare use is a parse error
                // unless immediately followed by `(`.
                self.advance();
                Expr::VarRef("input".into())
            }
            _ => return Err(self.error(format!("expected expression, got '{}'", token.lexeme))),
        };

        Ok(expr)
    }

    fn parse_list_literal(&mut self) -> ParseResult<Expr> {
        self.expect(&TokenKind::LBracket, "'['")?;
        let mut elements = vec![];
        if !self.check(&TokenKind::RBracket) {
            loop {
                elements.push(self.parse_expression()?);
                if !self.match_kind(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RBracket, "']'")?;
        Ok(Expr::ListLit(elements))
    }

    fn parse_dict_literal(&mut self) -> ParseResult<Expr> {
        self.expect(&TokenKind::LBrace, "'{'")?;
        let mut entries = vec![];
        if !self.check(&TokenKind::RBrace) {
            loop {
                let key = self.parse_expression()?;
                self.expect(&TokenKind::Colon, "':'")?;
                let value = self.parse_expression()?;
                entries.push((key, value));
                if !self.match_kind(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RBrace, "'}'")?;
        Ok(Expr::DictLit(entries))
    }
}

fn expr_to_target(expr: Expr) -> Result<Target, String> {
    match expr {
        Expr::VarRef(name) => Ok(Target::Name(name)),
        Expr::Index { target, index } => Ok(Target::Index(target, index)),
        other => Err(format!("invalid assignment target: {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse(src: &str) -> Vec<Stmt> {
        let tokens = Lexer::new(src).lex().unwrap();
        Parser::new(tokens).parse_program().unwrap()
    }

    #[test]
    fn precedence_of_arithmetic() {
        let stmts = parse("print 2 + 3 * 4");
        assert_eq!(
            stmts,
            vec![Stmt::Print(Expr::Binary {
                op: BinaryOp::Add,
                left: Box::new(Expr::IntLit(2)),
                right: Box::new(Expr::Binary {
                    op: BinaryOp::Mul,
                    left: Box::new(Expr::IntLit(3)),
                    right: Box::new(Expr::IntLit(4)),
                }),
            })]
        );
    }

    #[test]
    fn parenthesised_expression_overrides_precedence() {
        let stmts = parse("print (2+3)*4");
        assert_eq!(
            stmts,
            vec![Stmt::Print(Expr::Binary {
                op: BinaryOp::Mul,
                left: Box::new(Expr::Binary {
                    op: BinaryOp::Add,
                    left: Box::new(Expr::IntLit(2)),
                    right: Box::new(Expr::IntLit(3)),
                }),
                right: Box::new(Expr::IntLit(4)),
            })]
        );
    }

    #[test]
    fn while_and_assignment() {
        let stmts = parse("n=1\nwhile (n<=10) { n=n+1 }");
        assert_eq!(stmts.len(), 2);
        assert!(matches!(stmts[0], Stmt::Assign { .. }));
        assert!(matches!(stmts[1], Stmt::While { .. }));
    }

    #[test]
    fn dangling_else_attaches_to_nearest_if() {
        let stmts = parse("if (true) { if (false) { print 1 } else { print 2 } }");
        let Stmt::If { then_block, .. } = &stmts[0] else {
            panic!("expected if");
        };
        let Stmt::If { else_block, .. } = &then_block[0] else {
            panic!("expected nested if");
        };
        assert!(else_block.is_some());
    }

    #[test]
    fn else_if_chains() {
        let stmts = parse("if (false) { print 1 } else if (true) { print 2 } else { print 3 }");
        let Stmt::If { else_block, .. } = &stmts[0] else {
            panic!("expected if");
        };
        let else_block = else_block.as_ref().unwrap();
        assert_eq!(else_block.len(), 1);
        assert!(matches!(else_block[0], Stmt::If { .. }));
    }

    #[test]
    fn list_and_dict_literals() {
        let stmts = parse("xs=[1,2,3]\nd={\"a\":1,\"b\":2}");
        assert!(matches!(
            stmts[0],
            Stmt::Assign {
                value: Expr::ListLit(_),
                ..
            }
        ));
        assert!(matches!(
            stmts[1],
            Stmt::Assign {
                value: Expr::DictLit(_),
                ..
            }
        ));
    }

    #[test]
    fn index_assignment_target() {
        let stmts = parse(r#"d["x"]=1"#);
        let Stmt::Assign { target, .. } = &stmts[0] else {
            panic!("expected assign");
        };
        assert!(matches!(target, Target::Index(_, _)));
    }

    #[test]
    fn unexpected_token_is_a_parse_error() {
        let tokens = Lexer::new("1 +").lex().unwrap();
        let err = Parser::new(tokens).parse_program().unwrap_err();
        assert!(err.message.contains("expected expression"));
    }

    #[test]
    fn missing_closing_paren_is_a_parse_error() {
        let tokens = Lexer::new("print (1 + 2").lex().unwrap();
        let err = Parser::new(tokens).parse_program().unwrap_err();
        assert!(err.message.contains("')'"));
    }
}
