//! Runtime values and the pure operand-evaluation rules.
//!
//! A `Value` is what lives in variable slots and on the data stack. All
//! operations here are pure: given operands they produce a result value or
//! a typed failure, never a side effect. Uninitialized variable slots are
//! represented as `Option<Value>::None` in the frame store; `Value` itself
//! is always one concrete tag.

use crate::error::ValueError;

/// A concrete IPPcode23 runtime value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Signed 64-bit integer. Arithmetic wraps on overflow.
    Int(i64),
    /// Boolean value.
    Bool(bool),
    /// Sequence of Unicode scalar values. Escape sequences are decoded
    /// before a string ever becomes a `Value`.
    String(String),
    /// The nil value. Equal only to itself.
    Nil,
}

impl Value {
    /// The runtime type name, as produced by the TYPE instruction.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Nil => "nil",
        }
    }

    fn as_int(&self) -> Result<i64, ValueError> {
        match self {
            Value::Int(n) => Ok(*n),
            other => Err(ValueError::TypeMismatch {
                expected: "int",
                found: other.type_name(),
            }),
        }
    }

    fn as_bool(&self) -> Result<bool, ValueError> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(ValueError::TypeMismatch {
                expected: "bool",
                found: other.type_name(),
            }),
        }
    }

    fn as_str(&self) -> Result<&str, ValueError> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(ValueError::TypeMismatch {
                expected: "string",
                found: other.type_name(),
            }),
        }
    }

    /// Integer addition. Both operands must be Int; overflow wraps.
    pub fn add(&self, other: &Value) -> Result<Value, ValueError> {
        Ok(Value::Int(self.as_int()?.wrapping_add(other.as_int()?)))
    }

    /// Integer subtraction. Both operands must be Int; overflow wraps.
    pub fn sub(&self, other: &Value) -> Result<Value, ValueError> {
        Ok(Value::Int(self.as_int()?.wrapping_sub(other.as_int()?)))
    }

    /// Integer multiplication. Both operands must be Int; overflow wraps.
    pub fn mul(&self, other: &Value) -> Result<Value, ValueError> {
        Ok(Value::Int(self.as_int()?.wrapping_mul(other.as_int()?)))
    }

    /// Integer division truncating toward zero. Divisor 0 is a dedicated
    /// failure distinct from type errors.
    pub fn idiv(&self, other: &Value) -> Result<Value, ValueError> {
        let a = self.as_int()?;
        let b = other.as_int()?;
        if b == 0 {
            return Err(ValueError::DivisionByZero);
        }
        Ok(Value::Int(a.wrapping_div(b)))
    }

    /// Strict less-than over the natural ordering of a shared non-Nil type.
    pub fn lt(&self, other: &Value) -> Result<bool, ValueError> {
        self.ordered_cmp(other, "LT")
            .map(|ord| ord == std::cmp::Ordering::Less)
    }

    /// Strict greater-than over the natural ordering of a shared non-Nil type.
    pub fn gt(&self, other: &Value) -> Result<bool, ValueError> {
        self.ordered_cmp(other, "GT")
            .map(|ord| ord == std::cmp::Ordering::Greater)
    }

    fn ordered_cmp(&self, other: &Value, op: &'static str) -> Result<std::cmp::Ordering, ValueError> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Ok(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
            _ => Err(ValueError::IncomparableTypes {
                op,
                lhs: self.type_name(),
                rhs: other.type_name(),
            }),
        }
    }

    /// Equality. Nil may be compared with anything and equals only Nil;
    /// otherwise both operands must share a type.
    pub fn eq_value(&self, other: &Value) -> Result<bool, ValueError> {
        match (self, other) {
            (Value::Nil, _) | (_, Value::Nil) => Ok(self == other),
            (Value::Int(a), Value::Int(b)) => Ok(a == b),
            (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
            (Value::String(a), Value::String(b)) => Ok(a == b),
            _ => Err(ValueError::IncomparableTypes {
                op: "EQ",
                lhs: self.type_name(),
                rhs: other.type_name(),
            }),
        }
    }

    /// Logical conjunction. Both operands must be Bool.
    pub fn and(&self, other: &Value) -> Result<Value, ValueError> {
        Ok(Value::Bool(self.as_bool()? && other.as_bool()?))
    }

    /// Logical disjunction. Both operands must be Bool.
    pub fn or(&self, other: &Value) -> Result<Value, ValueError> {
        Ok(Value::Bool(self.as_bool()? || other.as_bool()?))
    }

    /// Logical negation. Operand must be Bool.
    pub fn not(&self) -> Result<Value, ValueError> {
        Ok(Value::Bool(!self.as_bool()?))
    }

    /// String concatenation. Both operands must be String.
    pub fn concat(&self, other: &Value) -> Result<Value, ValueError> {
        let mut s = self.as_str()?.to_string();
        s.push_str(other.as_str()?);
        Ok(Value::String(s))
    }

    /// String length in Unicode scalar values.
    pub fn strlen(&self) -> Result<Value, ValueError> {
        Ok(Value::Int(self.as_str()?.chars().count() as i64))
    }

    /// One-character string at `index`, counted in scalar values.
    pub fn getchar(&self, index: &Value) -> Result<Value, ValueError> {
        let s = self.as_str()?;
        let c = char_at(s, index.as_int()?)?;
        Ok(Value::String(c.to_string()))
    }

    /// Replace the character at `index` in `self` with the first character
    /// of `replacement`. Empty replacement is a string error.
    pub fn setchar(&self, index: &Value, replacement: &Value) -> Result<Value, ValueError> {
        let s = self.as_str()?;
        let i = index.as_int()?;
        let r = replacement.as_str()?;
        let first = r.chars().next().ok_or(ValueError::EmptyReplacement)?;
        // Bounds-check before rebuilding.
        char_at(s, i)?;
        let out: String = s
            .chars()
            .enumerate()
            .map(|(pos, c)| if pos as i64 == i { first } else { c })
            .collect();
        Ok(Value::String(out))
    }

    /// Convert an integer to a one-character string.
    pub fn int2char(&self) -> Result<Value, ValueError> {
        let n = self.as_int()?;
        let c = u32::try_from(n)
            .ok()
            .and_then(char::from_u32)
            .ok_or(ValueError::InvalidCharacter { value: n })?;
        Ok(Value::String(c.to_string()))
    }

    /// Code point of the character at `index` in `self`.
    pub fn stri2int(&self, index: &Value) -> Result<Value, ValueError> {
        let c = char_at(self.as_str()?, index.as_int()?)?;
        Ok(Value::Int(c as i64))
    }
}

/// The WRITE form: int as decimal, bool as true/false, string verbatim,
/// nil as the empty string.
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Nil => Ok(()),
        }
    }
}

/// Character at a signed index, or IndexOutOfRange.
fn char_at(s: &str, index: i64) -> Result<char, ValueError> {
    let length = s.chars().count();
    let out_of_range = ValueError::IndexOutOfRange { index, length };
    let i = usize::try_from(index).map_err(|_| out_of_range.clone())?;
    s.chars().nth(i).ok_or(out_of_range)
}
