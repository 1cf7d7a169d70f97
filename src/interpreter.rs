//! Tree-walking evaluator over the AST (spec.md §4.3).

use std::io::{BufRead, Write};

use indexmap::IndexMap;

use crate::ast::{BinaryOp, Expr, Stmt, Target, UnaryOp};
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::value::{normalize_index, stringify, Value};

type EvalResult = Result<Value, RuntimeError>;
type ExecResult = Result<(), RuntimeError>;

/// Executes statements against a mutable [`Environment`], writing `print`
/// output to `out` and reading `input` lines from `input`. Both are taken as
/// trait objects so the REPL, the file driver, and tests can each supply
/// their own stdout/stdin — or an in-memory buffer — without the
/// interpreter itself caring which.
pub struct Interpreter {
    pub env: Environment,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    pub fn run(
        &mut self,
        program: &[Stmt],
        out: &mut dyn Write,
        input: &mut dyn BufRead,
    ) -> ExecResult {
        for stmt in program {
            self.exec_stmt(stmt, out, input)?;
        }
        Ok(())
    }

    fn exec_stmt(&mut self, stmt: &Stmt, out: &mut dyn Write, input: &mut dyn BufRead) -> ExecResult {
        match stmt {
            Stmt::Assign { target, value } => {
                let value = self.eval_expr(value, out, input)?;
                self.assign(target, value, out, input)
            }
            Stmt::Print(expr) => {
                let value = self.eval_expr(expr, out, input)?;
                writeln!(out, "{}", stringify(&value))
                    .map_err(|e| RuntimeError::new(format!("write failed: {e}")))
            }
            Stmt::If {
                cond,
                then_block,
                else_block,
            } => {
                if self.eval_expr(cond, out, input)?.is_truthy() {
                    self.run(then_block, out, input)
                } else if let Some(else_block) = else_block {
                    self.run(else_block, out, input)
                } else {
                    Ok(())
                }
            }
            Stmt::While { cond, body } => {
                while self.eval_expr(cond, out, input)?.is_truthy() {
                    self.run(body, out, input)?;
                }
                Ok(())
            }
            Stmt::Del(target) => self.exec_del(target, out, input),
            Stmt::ExprStmt(expr) => {
                self.eval_expr(expr, out, input)?;
                Ok(())
            }
        }
    }

    fn exec_del(&mut self, target: &Target, out: &mut dyn Write, input: &mut dyn BufRead) -> ExecResult {
        match target {
            Target::Name(name) => {
                if self.env.delete(name) {
                    Ok(())
                } else {
                    Err(RuntimeError::new(format!("undefined variable '{name}'")))
                }
            }
            Target::Index(target, key) => {
                let target = self.eval_expr(target, out, input)?;
                let key = self.eval_expr(key, out, input)?;
                match target {
                    Value::Dict(map) => {
                        let dict_key = key
                            .as_dict_key()
                            .ok_or_else(|| RuntimeError::new("dict keys must be hashable"))?;
                        map.borrow_mut()
                            .shift_remove(&dict_key)
                            .map(|_| ())
                            .ok_or_else(|| {
                                RuntimeError::new(format!("Key not found: {}", stringify(&key)))
                            })
                    }
                    other => Err(RuntimeError::new(format!(
                        "cannot delete an index of type {}",
                        other.type_name()
                    ))),
                }
            }
        }
    }

    fn assign(
        &mut self,
        target: &Target,
        value: Value,
        out: &mut dyn Write,
        input: &mut dyn BufRead,
    ) -> ExecResult {
        match target {
            Target::Name(name) => {
                self.env.set(name.clone(), value);
                Ok(())
            }
            Target::Index(target, index) => {
                let target_value = self.eval_expr(target, out, input)?;
                let index_value = self.eval_expr(index, out, input)?;
                match target_value {
                    Value::List(items) => {
                        let Value::Int(i) = index_value else {
                            return Err(RuntimeError::new("list index must be an integer"));
                        };
                        let len = items.borrow().len();
                        let idx = normalize_index(i, len)
                            .ok_or_else(|| RuntimeError::new(format!("list index {i} out of range")))?;
                        items.borrow_mut()[idx] = value;
                        Ok(())
                    }
                    Value::Dict(map) => {
                        let key = index_value
                            .as_dict_key()
                            .ok_or_else(|| RuntimeError::new("dict keys must be hashable"))?;
                        map.borrow_mut().insert(key, value);
                        Ok(())
                    }
                    other => Err(RuntimeError::new(format!(
                        "cannot index assign into type {}",
                        other.type_name()
                    ))),
                }
            }
        }
    }

    fn eval_expr(&mut self, expr: &Expr, out: &mut dyn Write, input: &mut dyn BufRead) -> EvalResult {
        match expr {
            Expr::IntLit(v) => Ok(Value::Int(*v)),
            Expr::FloatLit(v) => Ok(Value::Float(*v)),
            Expr::StringLit(s) => Ok(Value::string(s.clone())),
            Expr::BoolLit(b) => Ok(Value::Bool(*b)),
            Expr::VarRef(name) => self
                .env
                .get(name)
                .cloned()
                .ok_or_else(|| RuntimeError::new(format!("undefined variable '{name}'"))),
            Expr::ListLit(elements) => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(self.eval_expr(element, out, input)?);
                }
                Ok(Value::list(items))
            }
            Expr::DictLit(entries) => {
                let mut map = IndexMap::with_capacity(entries.len());
                for (key, value) in entries {
                    let key = self.eval_expr(key, out, input)?;
                    let value = self.eval_expr(value, out, input)?;
                    let key = key
                        .as_dict_key()
                        .ok_or_else(|| RuntimeError::new("dict keys must be hashable"))?;
                    map.insert(key, value);
                }
                Ok(Value::dict(map))
            }
            Expr::Index { target, index } => {
                let target = self.eval_expr(target, out, input)?;
                let index = self.eval_expr(index, out, input)?;
                eval_index(&target, &index)
            }
            Expr::Unary { op, operand } => {
                let value = self.eval_expr(operand, out, input)?;
                eval_unary(op, value)
            }
            Expr::Binary { op, left, right } => self.eval_binary(op, left, right, out, input),
            Expr::Call { name, args } => self.eval_call(name, args, out, input),
        }
    }

    fn eval_binary(
        &mut self,
        op: &BinaryOp,
        left: &Expr,
        right: &Expr,
        out: &mut dyn Write,
        input: &mut dyn BufRead,
    ) -> EvalResult {
        // `and`/`or` short-circuit: the right operand must not be evaluated
        // once the left operand determines the result.
        match op {
            BinaryOp::And => {
                let left = self.eval_expr(left, out, input)?;
                if !left.is_truthy() {
                    return Ok(Value::Bool(false));
                }
                let right = self.eval_expr(right, out, input)?;
                return Ok(Value::Bool(right.is_truthy()));
            }
            BinaryOp::Or => {
                let left = self.eval_expr(left, out, input)?;
                if left.is_truthy() {
                    return Ok(Value::Bool(true));
                }
                let right = self.eval_expr(right, out, input)?;
                return Ok(Value::Bool(right.is_truthy()));
            }
            _ => {}
        }

        let left = self.eval_expr(left, out, input)?;
        let right = self.eval_expr(right, out, input)?;
        eval_binary_op(op, left, right)
    }

    fn eval_call(
        &mut self,
        name: &str,
        args: &[Expr],
        out: &mut dyn Write,
        input: &mut dyn BufRead,
    ) -> EvalResult {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expr(arg, out, input)?);
        }

        match name {
            "str" => builtin_one(name, &values, |v| Ok(Value::string(stringify(v)))),
            "int" => builtin_one(name, &values, builtin_int),
            "float" => builtin_one(name, &values, builtin_float),
            "bool" => builtin_one(name, &values, |v| Ok(Value::Bool(v.is_truthy()))),
            "len" => builtin_one(name, &values, builtin_len),
            "append" => builtin_append(&values),
            "remove" => builtin_remove(&values),
            "keys" => builtin_keys(&values),
            "values" => builtin_values(&values),
            "has_key" => builtin_has_key(&values),
            "del_key" => builtin_del_key(&values),
            "input" => builtin_input(&values, out, input),
            other => Err(RuntimeError::new(format!("undefined function '{other}'"))),
        }
    }
}

fn eval_index(target: &Value, index: &Value) -> EvalResult {
    match target {
        Value::List(items) => {
            let Value::Int(i) = index else {
                return Err(RuntimeError::new("list index must be an integer"));
            };
            let items = items.borrow();
            let idx = normalize_index(*i, items.len())
                .ok_or_else(|| RuntimeError::new(format!("list index {i} out of range")))?;
            Ok(items[idx].clone())
        }
        Value::Dict(map) => {
            let key = index
                .as_dict_key()
                .ok_or_else(|| RuntimeError::new("dict keys must be hashable"))?;
            map.borrow()
                .get(&key)
                .cloned()
                .ok_or_else(|| RuntimeError::new(format!("Key not found: {}", stringify(index))))
        }
        Value::Str(s) => {
            let Value::Int(i) = index else {
                return Err(RuntimeError::new("string index must be an integer"));
            };
            let chars: Vec<char> = s.chars().collect();
            let idx = normalize_index(*i, chars.len())
                .ok_or_else(|| RuntimeError::new(format!("string index {i} out of range")))?;
            Ok(Value::string(chars[idx].to_string()))
        }
        other => Err(RuntimeError::new(format!(
            "cannot index type {}",
            other.type_name()
        ))),
    }
}

fn eval_unary(op: &UnaryOp, value: Value) -> EvalResult {
    match op {
        UnaryOp::Plus => match value {
            Value::Int(_) | Value::Float(_) => Ok(value),
            other => Err(RuntimeError::new(format!(
                "unary '+' not supported for type {}",
                other.type_name()
            ))),
        },
        UnaryOp::Minus => match value {
            Value::Int(i) => Ok(Value::Int(-i)),
            Value::Float(f) => Ok(Value::Float(-f)),
            other => Err(RuntimeError::new(format!(
                "unary '-' not supported for type {}",
                other.type_name()
            ))),
        },
        UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
    }
}

fn eval_binary_op(op: &BinaryOp, left: Value, right: Value) -> EvalResult {
    use BinaryOp::*;
    match op {
        Add => eval_add(left, right),
        Sub => eval_numeric(left, right, "-", |a, b| a - b, |a, b| a - b),
        Mul => eval_numeric(left, right, "*", |a, b| a * b, |a, b| a * b),
        Div => eval_div(left, right),
        Eq => Ok(Value::Bool(left == right)),
        NotEq => Ok(Value::Bool(left != right)),
        Lt => eval_ordering(left, right, "<", |o| o.is_lt()),
        LtEq => eval_ordering(left, right, "<=", |o| o.is_le()),
        Gt => eval_ordering(left, right, ">", |o| o.is_gt()),
        GtEq => eval_ordering(left, right, ">=", |o| o.is_ge()),
        And | Or => unreachable!("short-circuit operators are handled in eval_binary"),
    }
}

fn eval_add(left: Value, right: Value) -> EvalResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a + b)),
        (Value::Int(a), Value::Float(b)) => Ok(Value::Float(a as f64 + b)),
        (Value::Float(a), Value::Int(b)) => Ok(Value::Float(a + b as f64)),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a + b)),
        (Value::Str(a), Value::Str(b)) => Ok(Value::string(format!("{a}{b}"))),
        (Value::List(a), Value::List(b)) => {
            let mut items = a.borrow().clone();
            items.extend(b.borrow().iter().cloned());
            Ok(Value::list(items))
        }
        (a, b) => Err(RuntimeError::new(format!(
            "'+' not supported between {} and {}",
            a.type_name(),
            b.type_name()
        ))),
    }
}

fn eval_numeric(
    left: Value,
    right: Value,
    symbol: &str,
    int_op: fn(i64, i64) -> i64,
    float_op: fn(f64, f64) -> f64,
) -> EvalResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(int_op(a, b))),
        (Value::Int(a), Value::Float(b)) => Ok(Value::Float(float_op(a as f64, b))),
        (Value::Float(a), Value::Int(b)) => Ok(Value::Float(float_op(a, b as f64))),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(float_op(a, b))),
        (a, b) => Err(RuntimeError::new(format!(
            "'{symbol}' not supported between {} and {}",
            a.type_name(),
            b.type_name()
        ))),
    }
}

/// Division always yields Float if either operand is Float. Int/Int yields
/// Int iff the division is exact, otherwise Float — this resolves the
/// division Open Question from spec.md §9 in favour of the `20/4/2 → 2.5`
/// example.
fn eval_div(left: Value, right: Value) -> EvalResult {
    match (left, right) {
        (Value::Int(_), Value::Int(0)) => Err(RuntimeError::new("Division by zero")),
        (Value::Int(a), Value::Int(b)) => {
            if a % b == 0 {
                Ok(Value::Int(a / b))
            } else {
                Ok(Value::Float(a as f64 / b as f64))
            }
        }
        (Value::Int(a), Value::Float(b)) => {
            if b == 0.0 {
                Err(RuntimeError::new("Division by zero"))
            } else {
                Ok(Value::Float(a as f64 / b))
            }
        }
        (Value::Float(a), Value::Int(b)) => {
            if b == 0 {
                Err(RuntimeError::new("Division by zero"))
            } else {
                Ok(Value::Float(a / b as f64))
            }
        }
        (Value::Float(a), Value::Float(b)) => {
            if b == 0.0 {
                Err(RuntimeError::new("Division by zero"))
            } else {
                Ok(Value::Float(a / b))
            }
        }
        (a, b) => Err(RuntimeError::new(format!(
            "'/' not supported between {} and {}",
            a.type_name(),
            b.type_name()
        ))),
    }
}

fn eval_ordering(
    left: Value,
    right: Value,
    symbol: &str,
    accept: fn(std::cmp::Ordering) -> bool,
) -> EvalResult {
    let ordering = match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
        (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
        (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => Some(a.as_str().cmp(b.as_str())),
        _ => None,
    };

    match ordering {
        Some(ordering) => Ok(Value::Bool(accept(ordering))),
        None => Err(RuntimeError::new(format!(
            "'{symbol}' not supported between {} and {}",
            left.type_name(),
            right.type_name()
        ))),
    }
}

// --- builtins ---------------------------------------------------------------

fn builtin_one(name: &str, args: &[Value], f: impl FnOnce(&Value) -> EvalResult) -> EvalResult {
    match args {
        [value] => f(value),
        _ => Err(RuntimeError::new(format!(
            "{name}() takes exactly one argument, got {}",
            args.len()
        ))),
    }
}

fn builtin_int(value: &Value) -> EvalResult {
    match value {
        Value::Int(i) => Ok(Value::Int(*i)),
        Value::Float(f) => Ok(Value::Int(f.trunc() as i64)),
        Value::Bool(b) => Ok(Value::Int(if *b { 1 } else { 0 })),
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| RuntimeError::new(format!("invalid literal for int(): '{s}'"))),
        Value::List(items) => Ok(Value::Int(items.borrow().len() as i64)),
        Value::Dict(map) => Ok(Value::Int(map.borrow().len() as i64)),
        Value::Null => Err(RuntimeError::new("int() not supported for type null")),
    }
}

fn builtin_float(value: &Value) -> EvalResult {
    match value {
        Value::Int(i) => Ok(Value::Float(*i as f64)),
        Value::Float(f) => Ok(Value::Float(*f)),
        Value::Bool(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| RuntimeError::new(format!("invalid literal for float(): '{s}'"))),
        other => Err(RuntimeError::new(format!(
            "float() not supported for type {}",
            other.type_name()
        ))),
    }
}

fn builtin_len(value: &Value) -> EvalResult {
    match value {
        Value::Str(s) => Ok(Value::Int(s.chars().count() as i64)),
        Value::List(items) => Ok(Value::Int(items.borrow().len() as i64)),
        Value::Dict(map) => Ok(Value::Int(map.borrow().len() as i64)),
        other => Err(RuntimeError::new(format!(
            "len() not supported for type {}",
            other.type_name()
        ))),
    }
}

fn builtin_append(args: &[Value]) -> EvalResult {
    match args {
        [Value::List(items), value] => {
            items.borrow_mut().push(value.clone());
            Ok(Value::Null)
        }
        [other, _] => Err(RuntimeError::new(format!(
            "append() expects a list, got {}",
            other.type_name()
        ))),
        _ => Err(RuntimeError::new(format!(
            "append() takes exactly two arguments, got {}",
            args.len()
        ))),
    }
}

fn builtin_remove(args: &[Value]) -> EvalResult {
    match args {
        [Value::List(items), Value::Int(i)] => {
            let len = items.borrow().len();
            let idx = normalize_index(*i, len)
                .ok_or_else(|| RuntimeError::new(format!("list index {i} out of range")))?;
            Ok(items.borrow_mut().remove(idx))
        }
        [Value::List(_), other] => Err(RuntimeError::new(format!(
            "remove() index must be an integer, got {}",
            other.type_name()
        ))),
        [other, _] => Err(RuntimeError::new(format!(
            "remove() expects a list, got {}",
            other.type_name()
        ))),
        _ => Err(RuntimeError::new(format!(
            "remove() takes exactly two arguments, got {}",
            args.len()
        ))),
    }
}

fn builtin_keys(args: &[Value]) -> EvalResult {
    builtin_one("keys", args, |value| match value {
        Value::Dict(map) => Ok(Value::list(
            map.borrow().keys().map(Value::from_dict_key).collect(),
        )),
        other => Err(RuntimeError::new(format!(
            "keys() expects a dict, got {}",
            other.type_name()
        ))),
    })
}

fn builtin_values(args: &[Value]) -> EvalResult {
    builtin_one("values", args, |value| match value {
        Value::Dict(map) => Ok(Value::list(map.borrow().values().cloned().collect())),
        other => Err(RuntimeError::new(format!(
            "values() expects a dict, got {}",
            other.type_name()
        ))),
    })
}

fn builtin_has_key(args: &[Value]) -> EvalResult {
    match args {
        [Value::Dict(map), key] => {
            let Some(key) = key.as_dict_key() else {
                return Ok(Value::Bool(false));
            };
            Ok(Value::Bool(map.borrow().contains_key(&key)))
        }
        [other, _] => Err(RuntimeError::new(format!(
            "has_key() expects a dict, got {}",
            other.type_name()
        ))),
        _ => Err(RuntimeError::new(format!(
            "has_key() takes exactly two arguments, got {}",
            args.len()
        ))),
    }
}

fn builtin_del_key(args: &[Value]) -> EvalResult {
    match args {
        [Value::Dict(map), key] => {
            let dict_key = key
                .as_dict_key()
                .ok_or_else(|| RuntimeError::new("dict keys must be hashable"))?;
            map.borrow_mut()
                .shift_remove(&dict_key)
                .ok_or_else(|| RuntimeError::new(format!("Key not found: {}", stringify(key))))
        }
        [other, _] => Err(RuntimeError::new(format!(
            "del_key() expects a dict, got {}",
            other.type_name()
        ))),
        _ => Err(RuntimeError::new(format!(
            "del_key() takes exactly two arguments, got {}",
            args.len()
        ))),
    }
}

fn builtin_input(args: &[Value], out: &mut dyn Write, input: &mut dyn BufRead) -> EvalResult {
    let prompt = match args {
        [] => String::new(),
        [Value::Str(s)] => s.as_str().to_owned(),
        [other] => stringify(other),
        _ => {
            return Err(RuntimeError::new(format!(
                "input() takes at most one argument, got {}",
                args.len()
            )))
        }
    };

    write!(out, "{prompt}").map_err(|e| RuntimeError::new(format!("write failed: {e}")))?;
    out.flush()
        .map_err(|e| RuntimeError::new(format!("write failed: {e}")))?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| RuntimeError::new(format!("read failed: {e}")))?;

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }

    Ok(Value::string(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn run_capture(src: &str) -> String {
        let tokens = Lexer::new(src).lex().expect("lex");
        let program = Parser::new(tokens).parse_program().expect("parse");
        let mut interpreter = Interpreter::new();
        let mut out = Vec::new();
        let mut input = std::io::empty();
        let mut reader = std::io::BufReader::new(&mut input);
        interpreter.run(&program, &mut out, &mut reader).expect("run");
        String::from_utf8(out).unwrap()
    }

    fn run_err(src: &str) -> RuntimeError {
        let tokens = Lexer::new(src).lex().expect("lex");
        let program = Parser::new(tokens).parse_program().expect("parse");
        let mut interpreter = Interpreter::new();
        let mut out = Vec::new();
        let mut input = std::io::empty();
        let mut reader = std::io::BufReader::new(&mut input);
        interpreter.run(&program, &mut out, &mut reader).unwrap_err()
    }

    #[test]
    fn arithmetic_precedence() {
        let out = run_capture("print 2 + 3 * 4\nprint (2+3)*4\nprint 20 / 4 / 2");
        assert_eq!(out, "14\n20\n2.5\n");
    }

    #[test]
    fn while_accumulation() {
        let out = run_capture(
            "n=1\ntotal=0\nwhile (n<=10) { total=total+n\nn=n+1 }\nprint total",
        );
        assert_eq!(out, "55\n");
    }

    #[test]
    fn list_mutation_and_aliasing() {
        let out = run_capture("a=[1,2,3]\nb=a\nappend(a,4)\nprint str(b)");
        assert_eq!(out, "[1, 2, 3, 4]\n");
    }

    #[test]
    fn negative_index() {
        let out = run_capture("xs=[10,20,30]\nprint str(xs[-1])\nprint str(xs[-2])");
        assert_eq!(out, "30\n20\n");
    }

    #[test]
    fn dict_insertion_order_preserved() {
        let out = run_capture("d={}\nd[\"x\"]=1\nd[\"a\"]=2\nprint str(keys(d))");
        assert_eq!(out, "[\"x\", \"a\"]\n");
    }

    #[test]
    fn short_circuit_guards_division_by_zero() {
        let out = run_capture(
            "if (false and (1/0 == 0)) { print \"x\" } else { print \"ok\" }",
        );
        assert_eq!(out, "ok\n");
    }

    #[test]
    fn division_by_zero_is_a_runtime_error() {
        let err = run_err("print 1/0");
        assert!(err.message.contains("Division by zero"));
    }

    #[test]
    fn append_then_remove_restores_prior_state() {
        let out = run_capture(
            "xs=[1,2,3]\nv=append(xs,4)\nr=remove(xs,len(xs)-1)\nprint str(xs)\nprint str(r)",
        );
        assert_eq!(out, "[1, 2, 3]\n4\n");
    }

    #[test]
    fn has_key_and_del_key() {
        let out = run_capture(
            "d={}\nd[\"k\"]=5\nprint str(has_key(d,\"k\"))\ndel_key(d,\"k\")\nprint str(has_key(d,\"k\"))",
        );
        assert_eq!(out, "true\nfalse\n");
    }

    #[test]
    fn undefined_variable_is_a_runtime_error() {
        let err = run_err("print nope");
        assert!(err.message.contains("undefined variable"));
    }

    #[test]
    fn missing_dict_key_is_a_runtime_error() {
        let err = run_err("d={}\nprint d[\"missing\"]");
        assert!(err.message.contains("Key not found"));
    }

    #[test]
    fn string_concatenation_and_list_concatenation() {
        let out = run_capture("print \"a\" + \"b\"\nprint str([1,2] + [3])");
        assert_eq!(out, "ab\n[1, 2, 3]\n");
    }

    #[test]
    fn type_coercion_builtins() {
        let out = run_capture(
            "print int(3.9)\nprint float(2)\nprint bool(0)\nprint len(\"hello\")",
        );
        assert_eq!(out, "3\n2.0\nfalse\n5\n");
    }
}
