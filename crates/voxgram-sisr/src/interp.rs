//! Tree-walking interpreter over scope frames.
//!
//! Every rule activation owns a frame. Inside a frame, `out` is the rule's
//! result, `raw` its matched words and `rules` the published results of the
//! rules it referenced. `var` bindings live in the frame that declared them
//! and are visible to nested frames.
//!
//! Objects are plain values: assigning one copies it.

use indexmap::IndexMap;
use voxgram_lib::{EvalError, Value};

use crate::ast::{AssignOp, BinaryOp, Expr, LogicalOp, Property, Stmt, UnaryOp};

#[derive(Debug)]
struct Frame {
    out: Value,
    raw: Vec<String>,
    rules: Value,
    vars: IndexMap<String, Value>,
}

impl Frame {
    fn new() -> Self {
        Self {
            out: Value::Undefined,
            raw: Vec::new(),
            rules: Value::Object(Vec::new()),
            vars: IndexMap::new(),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Interpreter {
    frames: Vec<Frame>,
}

impl Interpreter {
    /// Drop all frames and open the outermost one.
    pub fn enter_root(&mut self) {
        self.frames.clear();
        self.frames.push(Frame::new());
    }

    pub fn push_scope(&mut self) {
        self.frames.push(Frame::new());
    }

    pub fn append_words(&mut self, words: &str) -> Result<(), EvalError> {
        self.current_mut()?.raw.push(words.to_owned());
        Ok(())
    }

    /// Publish a wildcard span as `rules[name]` of the current frame.
    pub fn capture(&mut self, name: &str, text: &str) -> Result<(), EvalError> {
        let result = rule_result(Value::from(text), text);
        self.current_mut()?.rules.set(name, result);
        Ok(())
    }

    /// Close the current frame and publish it to its parent as `rules[rule]`.
    /// A rule that never assigned `out` publishes its raw words instead.
    pub fn pop_scope(&mut self, rule: &str) -> Result<(), EvalError> {
        if self.frames.len() < 2 {
            return Err(EvalError::UnbalancedScopes);
        }
        let Some(frame) = self.frames.pop() else {
            return Err(EvalError::UnbalancedScopes);
        };
        let raw = frame.raw.join(" ");
        let out = match frame.out {
            Value::Undefined => Value::String(raw.clone()),
            out => out,
        };

        let parent = self.current_mut()?;
        parent.rules.set(rule, rule_result(out, &raw));
        if !raw.is_empty() {
            parent.raw.push(raw);
        }
        Ok(())
    }

    /// `rules[rule].out` of the outermost frame.
    pub fn bind_root(&self, rule: &str) -> Result<Value, EvalError> {
        let [global] = self.frames.as_slice() else {
            return Err(EvalError::UnbalancedScopes);
        };
        Ok(global
            .rules
            .get(rule)
            .and_then(|result| result.get("out"))
            .cloned()
            .unwrap_or_default())
    }

    pub fn run(&mut self, program: &[Stmt]) -> Result<(), EvalError> {
        for stmt in program {
            match stmt {
                Stmt::Var(decls) => {
                    for (name, init) in decls {
                        let value = match init {
                            Some(init) => Some(self.eval(init)?),
                            None => None,
                        };
                        let vars = &mut self.current_mut()?.vars;
                        match value {
                            Some(value) => {
                                vars.insert(name.clone(), value);
                            }
                            None => {
                                vars.entry(name.clone()).or_default();
                            }
                        }
                    }
                }
                Stmt::Expr(expr) => {
                    self.eval(expr)?;
                }
            }
        }
        Ok(())
    }

    fn current(&self) -> Result<&Frame, EvalError> {
        self.frames.last().ok_or(EvalError::UnbalancedScopes)
    }

    fn current_mut(&mut self) -> Result<&mut Frame, EvalError> {
        self.frames.last_mut().ok_or(EvalError::UnbalancedScopes)
    }

    pub fn eval(&mut self, expr: &Expr) -> Result<Value, EvalError> {
        match expr {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::String(s) => Ok(Value::String(s.clone())),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Null => Ok(Value::Null),
            Expr::Undefined => Ok(Value::Undefined),
            Expr::Ident(name) => self.lookup(name),
            Expr::Object(fields) => {
                let mut object = Value::Object(Vec::with_capacity(fields.len()));
                for (key, value) in fields {
                    let value = self.eval(value)?;
                    object.set(key, value);
                }
                Ok(object)
            }
            Expr::Member { object, property } => {
                let object = self.eval(object)?;
                let key = self.property_key(property)?;
                read_member(&object, &key)
            }
            Expr::Call { callee, args } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval(arg)?);
                }
                call(callee, &values)
            }
            Expr::Unary { op, operand } => {
                let value = self.eval(operand)?;
                Ok(match op {
                    UnaryOp::Not => Value::Bool(!truthy(&value)),
                    UnaryOp::Neg => Value::Number(-to_number(&value)),
                    UnaryOp::Plus => Value::Number(to_number(&value)),
                })
            }
            Expr::Binary { op, lhs, rhs } => {
                let lhs = self.eval(lhs)?;
                let rhs = self.eval(rhs)?;
                Ok(binary(*op, &lhs, &rhs))
            }
            Expr::Logical { op, lhs, rhs } => {
                let lhs = self.eval(lhs)?;
                match (op, truthy(&lhs)) {
                    (LogicalOp::And, false) | (LogicalOp::Or, true) => Ok(lhs),
                    _ => self.eval(rhs),
                }
            }
            Expr::Conditional {
                test,
                then,
                otherwise,
            } => {
                let test = self.eval(test)?;
                if truthy(&test) {
                    self.eval(then)
                } else {
                    self.eval(otherwise)
                }
            }
            Expr::Assign { op, target, value } => self.assign(*op, target, value),
        }
    }

    fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        let frame = self.current()?;
        match name {
            "out" => Ok(frame.out.clone()),
            "raw" => Ok(Value::String(frame.raw.join(" "))),
            "rules" => Ok(frame.rules.clone()),
            _ => self
                .frames
                .iter()
                .rev()
                .find_map(|frame| frame.vars.get(name))
                .cloned()
                .ok_or_else(|| EvalError::UnknownIdentifier(name.to_owned())),
        }
    }

    fn property_key(&mut self, property: &Property) -> Result<String, EvalError> {
        match property {
            Property::Name(name) => Ok(name.clone()),
            Property::Computed(key) => Ok(self.eval(key)?.to_string()),
        }
    }

    fn assign(&mut self, op: AssignOp, target: &Expr, value: &Expr) -> Result<Value, EvalError> {
        let (root, path) = self.place(target)?;
        let rhs = self.eval(value)?;
        let value = match op {
            AssignOp::Set => rhs,
            AssignOp::Add => add(&self.eval(target)?, &rhs),
            AssignOp::Sub => Value::Number(to_number(&self.eval(target)?) - to_number(&rhs)),
        };
        self.store(&root, &path, value.clone())?;
        Ok(value)
    }

    /// Split an assignment target into its root name and property path.
    fn place(&mut self, target: &Expr) -> Result<(String, Vec<String>), EvalError> {
        let mut path = Vec::new();
        let mut at = target;
        loop {
            match at {
                Expr::Ident(name) => {
                    path.reverse();
                    return Ok((name.clone(), path));
                }
                Expr::Member { object, property } => {
                    path.push(self.property_key(property)?);
                    at = object;
                }
                _ => {
                    return Err(EvalError::Type(format!(
                        "invalid assignment target `{target}`"
                    )));
                }
            }
        }
    }

    fn store(&mut self, root: &str, path: &[String], value: Value) -> Result<(), EvalError> {
        let slot = self.slot(root, path.is_empty())?;
        let Some((last, init)) = path.split_last() else {
            *slot = value;
            return Ok(());
        };

        if root == "out" && slot.is_undefined() {
            *slot = Value::Object(Vec::new());
        }
        let mut current = slot;
        for key in init {
            current = match current.get_mut(key) {
                Some(next) => next,
                None => {
                    return Err(EvalError::Type(format!(
                        "cannot assign to `{root}.{}`: `{key}` is undefined",
                        path.join(".")
                    )));
                }
            };
        }
        if matches!(current, Value::Undefined | Value::Null) {
            return Err(EvalError::Type(format!(
                "cannot set property `{last}` of {current}"
            )));
        }
        // Primitives silently ignore property writes.
        current.set(last, value);
        Ok(())
    }

    /// Storage of a name. Plain assignment to an undeclared name creates it
    /// in the outermost frame.
    fn slot(&mut self, name: &str, create: bool) -> Result<&mut Value, EvalError> {
        match name {
            "out" => return Ok(&mut self.current_mut()?.out),
            "rules" => return Ok(&mut self.current_mut()?.rules),
            "raw" => return Err(EvalError::Type("`raw` is read-only".into())),
            _ => {}
        }

        let index = match self
            .frames
            .iter()
            .rposition(|frame| frame.vars.contains_key(name))
        {
            Some(index) => index,
            None if create => {
                let global = self.frames.first_mut().ok_or(EvalError::UnbalancedScopes)?;
                global.vars.insert(name.to_owned(), Value::Undefined);
                0
            }
            None => return Err(EvalError::UnknownIdentifier(name.to_owned())),
        };
        self.frames[index]
            .vars
            .get_mut(name)
            .ok_or_else(|| EvalError::UnknownIdentifier(name.to_owned()))
    }
}

fn rule_result(out: Value, raw: &str) -> Value {
    Value::Object(vec![
        ("out".to_owned(), out),
        ("raw".to_owned(), Value::from(raw)),
    ])
}

fn read_member(object: &Value, key: &str) -> Result<Value, EvalError> {
    match object {
        Value::Undefined | Value::Null => Err(EvalError::Type(format!(
            "cannot read property `{key}` of {object}"
        ))),
        Value::Object(_) => Ok(object.get(key).cloned().unwrap_or_default()),
        Value::String(s) if key == "length" => Ok(Value::Number(s.encode_utf16().count() as f64)),
        _ => Ok(Value::Undefined),
    }
}

fn call(callee: &Expr, args: &[Value]) -> Result<Value, EvalError> {
    let arg = |i: usize| args.get(i).cloned().unwrap_or_default();
    let Expr::Ident(name) = callee else {
        return Err(EvalError::UnsupportedCall(callee.to_string()));
    };
    let value = match name.as_str() {
        "parseInt" => {
            let radix = args.get(1).map(to_number);
            Value::Number(parse_int(&arg(0).to_string(), radix))
        }
        "parseFloat" => Value::Number(parse_float(&arg(0).to_string())),
        "Number" => Value::Number(args.first().map_or(0.0, to_number)),
        "String" => Value::String(args.first().map(Value::to_string).unwrap_or_default()),
        _ => return Err(EvalError::UnsupportedCall(name.clone())),
    };
    Ok(value)
}

pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::String(s) => !s.is_empty(),
        Value::Object(_) => true,
    }
}

pub(crate) fn to_number(value: &Value) -> f64 {
    match value {
        Value::Undefined | Value::Object(_) => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => *n,
        Value::String(s) => string_to_number(s),
    }
}

fn string_to_number(s: &str) -> f64 {
    let text = s.trim();
    match text {
        "" => return 0.0,
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return match u64::from_str_radix(hex, 16) {
            Ok(n) => n as f64,
            Err(_) => f64::NAN,
        };
    }
    let numeric = text
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !numeric {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}

fn parse_int(text: &str, radix: Option<f64>) -> f64 {
    let text = text.trim_start();
    let (sign, mut digits) = match text.as_bytes().first() {
        Some(b'-') => (-1.0, &text[1..]),
        Some(b'+') => (1.0, &text[1..]),
        _ => (1.0, text),
    };

    let mut radix = match radix {
        Some(r) if r.is_finite() => r.trunc() as i64,
        _ => 0,
    };
    let hex_allowed = radix == 0 || radix == 16;
    if radix == 0 {
        radix = 10;
    }
    if hex_allowed {
        if let Some(rest) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
            digits = rest;
            radix = 16;
        }
    }
    if !(2..=36).contains(&radix) {
        return f64::NAN;
    }

    let mut value = 0.0;
    let mut seen = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix as u32) else {
            break;
        };
        value = value * radix as f64 + f64::from(d);
        seen = true;
    }
    if seen { sign * value } else { f64::NAN }
}

fn parse_float(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if text[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_end = digits_from(end);
    let mut mantissa = int_end > end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if mantissa || frac_end > end + 1 {
            mantissa = true;
            end = frac_end;
        }
    }
    if !mantissa {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut at = end + 1;
        if matches!(bytes.get(at), Some(b'+' | b'-')) {
            at += 1;
        }
        let exp_end = digits_from(at);
        if exp_end > at {
            end = exp_end;
        }
    }
    text[..end].parse().unwrap_or(f64::NAN)
}

fn add(lhs: &Value, rhs: &Value) -> Value {
    let stringy = |v: &Value| matches!(v, Value::String(_) | Value::Object(_));
    if stringy(lhs) || stringy(rhs) {
        return Value::String(format!("{lhs}{rhs}"));
    }
    Value::Number(to_number(lhs) + to_number(rhs))
}

fn binary(op: BinaryOp, lhs: &Value, rhs: &Value) -> Value {
    match op {
        BinaryOp::Add => add(lhs, rhs),
        BinaryOp::Sub => Value::Number(to_number(lhs) - to_number(rhs)),
        BinaryOp::Mul => Value::Number(to_number(lhs) * to_number(rhs)),
        BinaryOp::Div => Value::Number(to_number(lhs) / to_number(rhs)),
        BinaryOp::Rem => Value::Number(to_number(lhs) % to_number(rhs)),
        BinaryOp::Eq => Value::Bool(loose_eq(lhs, rhs)),
        BinaryOp::NotEq => Value::Bool(!loose_eq(lhs, rhs)),
        BinaryOp::StrictEq => Value::Bool(strict_eq(lhs, rhs)),
        BinaryOp::StrictNotEq => Value::Bool(!strict_eq(lhs, rhs)),
        BinaryOp::Less => Value::Bool(compare(lhs, rhs, |o| o.is_lt())),
        BinaryOp::LessEq => Value::Bool(compare(lhs, rhs, |o| o.is_le())),
        BinaryOp::Greater => Value::Bool(compare(lhs, rhs, |o| o.is_gt())),
        BinaryOp::GreaterEq => Value::Bool(compare(lhs, rhs, |o| o.is_ge())),
    }
}

/// Objects compare by content.
pub(crate) fn strict_eq(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => a == b,
        _ => lhs == rhs,
    }
}

pub(crate) fn loose_eq(lhs: &Value, rhs: &Value) -> bool {
    use Value::*;
    match (lhs, rhs) {
        (Undefined | Null, Undefined | Null) => true,
        (Undefined | Null, _) | (_, Undefined | Null) => false,
        (Number(a), String(_)) => *a == to_number(rhs),
        (String(_), Number(b)) => to_number(lhs) == *b,
        (Bool(_), _) => loose_eq(&Number(to_number(lhs)), rhs),
        (_, Bool(_)) => loose_eq(lhs, &Number(to_number(rhs))),
        (Object(_), Number(_) | String(_)) => loose_eq(&String(lhs.to_string()), rhs),
        (Number(_) | String(_), Object(_)) => loose_eq(lhs, &String(rhs.to_string())),
        _ => strict_eq(lhs, rhs),
    }
}

fn compare(lhs: &Value, rhs: &Value, test: impl Fn(std::cmp::Ordering) -> bool) -> bool {
    let primitive = |v: &Value| match v {
        Value::Object(_) => Value::String(v.to_string()),
        other => other.clone(),
    };
    match (primitive(lhs), primitive(rhs)) {
        (Value::String(a), Value::String(b)) => test(a.cmp(&b)),
        (a, b) => to_number(&a)
            .partial_cmp(&to_number(&b))
            .is_some_and(test),
    }
}

#[cfg(test)]
#[path = "interp_tests.rs"]
mod interp_tests;
