//! The dynamically-typed value domain (spec.md §3 "Values").

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

/// A value that may appear as a Dict key: String, Integer, Float or Boolean,
/// per spec.md §3. Integer/Float keys that are numerically equal collapse to
/// the same bucket, matching the cross-type numeric equality rule for `==`.
#[derive(Debug, Clone)]
pub enum DictKey {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(Rc<String>),
}

impl PartialEq for DictKey {
    fn eq(&self, other: &Self) -> bool {
        use DictKey::*;
        match (self, other) {
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Int(a), Float(b)) | (Float(b), Int(a)) => *a as f64 == *b,
            (Bool(a), Bool(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for DictKey {}

impl std::hash::Hash for DictKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            // Normalize numeric keys to a shared representation so that
            // DictKey::Int(1) and DictKey::Float(1.0) hash identically.
            DictKey::Int(i) => (*i as f64).to_bits().hash(state),
            DictKey::Float(f) => f.to_bits().hash(state),
            DictKey::Bool(b) => {
                2u8.hash(state);
                b.hash(state);
            }
            DictKey::Str(s) => {
                3u8.hash(state);
                s.hash(state);
            }
        }
    }
}

pub type SharedList = Rc<RefCell<Vec<Value>>>;
pub type SharedDict = Rc<RefCell<IndexMap<DictKey, Value>>>;

/// The closed value domain every MiniPyLang expression evaluates to.
///
/// `List` and `Dict` are represented through `Rc<RefCell<_>>` so that two
/// bindings referring to the same aggregate observe each other's mutations
/// (spec.md §3/§9 aliasing semantics) — value-copy-on-assignment would
/// silently break that invariant.
#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(Rc<String>),
    List(SharedList),
    Dict(SharedDict),
    Null,
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Rc::new(s.into()))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn dict(entries: IndexMap<DictKey, Value>) -> Self {
        Value::Dict(Rc::new(RefCell::new(entries)))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
            Value::Null => "null",
        }
    }

    /// Truthiness coercion (spec.md §4.3).
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
            Value::List(l) => !l.borrow().is_empty(),
            Value::Dict(d) => !d.borrow().is_empty(),
            Value::Null => false,
        }
    }

    /// Convert a value into a DictKey, if it is a hashable scalar.
    pub fn as_dict_key(&self) -> Option<DictKey> {
        match self {
            Value::Int(i) => Some(DictKey::Int(*i)),
            Value::Float(f) => Some(DictKey::Float(*f)),
            Value::Bool(b) => Some(DictKey::Bool(*b)),
            Value::Str(s) => Some(DictKey::Str(s.clone())),
            _ => None,
        }
    }

    pub fn from_dict_key(key: &DictKey) -> Value {
        match key {
            DictKey::Int(i) => Value::Int(*i),
            DictKey::Float(f) => Value::Float(*f),
            DictKey::Bool(b) => Value::Bool(*b),
            DictKey::Str(s) => Value::Str(s.clone()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Int(a), Float(b)) | (Float(b), Int(a)) => *a as f64 == *b,
            (Bool(a), Bool(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            (List(a), List(b)) => *a.borrow() == *b.borrow(),
            (Dict(a), Dict(b)) => {
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len() && a.iter().all(|(k, v)| b.get(k) == Some(v))
            }
            (Null, Null) => true,
            _ => false,
        }
    }
}

/// Canonical printable form (spec.md §4.3 `str`).
///
/// A bare String renders unquoted, but a String nested inside a List or Dict
/// renders quoted — spec.md §8 scenario 5 prints `keys(d)` as `["x", "a"]`,
/// not `[x, a]`, so containers render their elements the way Python's
/// `str()` does: with `repr`-style quoting one level down.
pub fn stringify(value: &Value) -> String {
    render(value, true)
}

fn render(value: &Value, top_level: bool) -> String {
    match value {
        Value::Int(i) => i.to_string(),
        Value::Float(f) => format_float(*f),
        Value::Bool(b) => b.to_string(),
        Value::Str(s) if top_level => s.as_str().to_owned(),
        Value::Str(s) => quote(s),
        Value::List(items) => {
            let items = items.borrow();
            let rendered: Vec<String> = items.iter().map(|v| render(v, false)).collect();
            format!("[{}]", rendered.join(", "))
        }
        Value::Dict(entries) => {
            let entries = entries.borrow();
            let rendered: Vec<String> = entries
                .iter()
                .map(|(k, v)| {
                    format!(
                        "{}: {}",
                        render(&Value::from_dict_key(k), false),
                        render(v, false)
                    )
                })
                .collect();
            format!("{{{}}}", rendered.join(", "))
        }
        Value::Null => "null".to_owned(),
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.is_finite() {
        format!("{f:.1}")
    } else {
        format!("{f}")
    }
}

/// Normalise a (possibly negative) index against a sequence of length `len`.
pub fn normalize_index(i: i64, len: usize) -> Option<usize> {
    let normalized = if i < 0 { i + len as i64 } else { i };
    if normalized < 0 || normalized as usize >= len {
        None
    } else {
        Some(normalized as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_index_normalisation() {
        assert_eq!(normalize_index(-1, 3), Some(2));
        assert_eq!(normalize_index(-2, 3), Some(1));
        assert_eq!(normalize_index(-4, 3), None);
        assert_eq!(normalize_index(3, 3), None);
    }

    #[test]
    fn numeric_cross_type_equality() {
        assert_eq!(Value::Int(2), Value::Float(2.0));
        assert_ne!(Value::Int(2), Value::Float(2.5));
    }

    #[test]
    fn list_equality_is_elementwise() {
        let a = Value::list(vec![Value::Int(1), Value::Int(2)]);
        let b = Value::list(vec![Value::Int(1), Value::Int(2)]);
        let c = Value::list(vec![Value::Int(2), Value::Int(1)]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn dict_equality_ignores_order() {
        let mut m1 = IndexMap::new();
        m1.insert(DictKey::Str(Rc::new("a".into())), Value::Int(1));
        m1.insert(DictKey::Str(Rc::new("b".into())), Value::Int(2));
        let mut m2 = IndexMap::new();
        m2.insert(DictKey::Str(Rc::new("b".into())), Value::Int(2));
        m2.insert(DictKey::Str(Rc::new("a".into())), Value::Int(1));
        assert_eq!(Value::dict(m1), Value::dict(m2));
    }

    #[test]
    fn truthiness_rules() {
        assert!(!Value::Int(0).is_truthy());
        assert!(Value::Int(1).is_truthy());
        assert!(!Value::Float(0.0).is_truthy());
        assert!(!Value::string("").is_truthy());
        assert!(Value::string("x").is_truthy());
        assert!(!Value::list(vec![]).is_truthy());
        assert!(Value::list(vec![Value::Null]).is_truthy());
    }

    #[test]
    fn stringify_nested_aggregates() {
        let list = Value::list(vec![Value::Int(1), Value::string("a")]);
        assert_eq!(stringify(&list), "[1, \"a\"]");
    }

    #[test]
    fn float_stringify_always_has_fractional_digit() {
        assert_eq!(stringify(&Value::Float(2.0)), "2.0");
        assert_eq!(stringify(&Value::Float(2.5)), "2.5");
    }

    #[test]
    fn aliasing_shares_storage() {
        let list = Value::list(vec![Value::Int(1)]);
        let alias = list.clone();
        if let Value::List(items) = &list {
            items.borrow_mut().push(Value::Int(2));
        }
        if let Value::List(items) = &alias {
            assert_eq!(items.borrow().len(), 2);
        } else {
            panic!("expected list");
        }
    }
}
