//! Runtime classification of values into a closed set of categories.
//!
//! # Design
//! Every value the builder validates (header parts, base URLs, bodies,
//! middlewares) is mapped to exactly one `Kind` through the `TypeOf` trait.
//! Validation code matches on `Kind` instead of inspecting concrete types, so
//! the accepted/rejected sets stay in one place.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use bytes::Bytes;
use serde_json::Value;
use uuid::Uuid;

/// Category a value falls into.
///
/// Precedence when a value could match more than one category: null first,
/// then array, then NaN, then the value's own primitive category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Array,
    NaN,
    Symbol,
    String,
    Object,
    Number,
    Boolean,
    Function,
    Undefined,
}

impl Kind {
    pub fn is_null(self) -> bool {
        self == Kind::Null
    }

    pub fn is_array(self) -> bool {
        self == Kind::Array
    }

    pub fn is_nan(self) -> bool {
        self == Kind::NaN
    }

    pub fn is_symbol(self) -> bool {
        self == Kind::Symbol
    }

    pub fn is_string(self) -> bool {
        self == Kind::String
    }

    pub fn is_object(self) -> bool {
        self == Kind::Object
    }

    pub fn is_number(self) -> bool {
        self == Kind::Number
    }

    pub fn is_boolean(self) -> bool {
        self == Kind::Boolean
    }

    pub fn is_function(self) -> bool {
        self == Kind::Function
    }

    pub fn is_undefined(self) -> bool {
        self == Kind::Undefined
    }

    pub fn is_not_string(self) -> bool {
        !self.is_string()
    }

    pub fn is_undefined_or_null(self) -> bool {
        matches!(self, Kind::Undefined | Kind::Null)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Array => "array",
            Kind::NaN => "NaN",
            Kind::Symbol => "symbol",
            Kind::String => "string",
            Kind::Object => "object",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Function => "function",
            Kind::Undefined => "undefined",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a value to its `Kind`. Never fails: every value has a category.
pub trait TypeOf {
    fn type_of(&self) -> Kind;
}

/// Classify `value`.
pub fn type_of<T: TypeOf + ?Sized>(value: &T) -> Kind {
    value.type_of()
}

impl<T: TypeOf + ?Sized> TypeOf for &T {
    fn type_of(&self) -> Kind {
        (**self).type_of()
    }
}

impl<T: TypeOf + ?Sized> TypeOf for Box<T> {
    fn type_of(&self) -> Kind {
        (**self).type_of()
    }
}

impl<T: TypeOf> TypeOf for Option<T> {
    fn type_of(&self) -> Kind {
        match self {
            Some(value) => value.type_of(),
            None => Kind::Undefined,
        }
    }
}

impl TypeOf for () {
    fn type_of(&self) -> Kind {
        Kind::Null
    }
}

impl TypeOf for str {
    fn type_of(&self) -> Kind {
        Kind::String
    }
}

impl TypeOf for String {
    fn type_of(&self) -> Kind {
        Kind::String
    }
}

impl TypeOf for bool {
    fn type_of(&self) -> Kind {
        Kind::Boolean
    }
}

impl TypeOf for f64 {
    fn type_of(&self) -> Kind {
        if self.is_nan() {
            Kind::NaN
        } else {
            Kind::Number
        }
    }
}

impl TypeOf for f32 {
    fn type_of(&self) -> Kind {
        if self.is_nan() {
            Kind::NaN
        } else {
            Kind::Number
        }
    }
}

macro_rules! number_kind {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TypeOf for $ty {
                fn type_of(&self) -> Kind {
                    Kind::Number
                }
            }
        )*
    };
}

number_kind!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl<T> TypeOf for [T] {
    fn type_of(&self) -> Kind {
        Kind::Array
    }
}

impl<T, const N: usize> TypeOf for [T; N] {
    fn type_of(&self) -> Kind {
        Kind::Array
    }
}

impl<T> TypeOf for Vec<T> {
    fn type_of(&self) -> Kind {
        Kind::Array
    }
}

impl<K, V, S> TypeOf for HashMap<K, V, S> {
    fn type_of(&self) -> Kind {
        Kind::Object
    }
}

impl<K, V> TypeOf for BTreeMap<K, V> {
    fn type_of(&self) -> Kind {
        Kind::Object
    }
}

impl TypeOf for Bytes {
    fn type_of(&self) -> Kind {
        Kind::Object
    }
}

impl TypeOf for Uuid {
    fn type_of(&self) -> Kind {
        Kind::Symbol
    }
}

impl TypeOf for serde_json::Map<String, Value> {
    fn type_of(&self) -> Kind {
        Kind::Object
    }
}

impl TypeOf for Value {
    fn type_of(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Array(_) => Kind::Array,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Bool(_) => Kind::Boolean,
            Value::Object(_) => Kind::Object,
        }
    }
}
