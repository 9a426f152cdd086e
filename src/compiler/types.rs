//! Type tags for the arabscript type lattice.
//!
//! The lattice is flat: every tag is compared by equality, and `Any` is the
//! only tag compatible with everything else.

use std::fmt;

/// A primitive type tag attached to every expression of the bound AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Boolean,
    /// Integer literals (`١٢`) and anything derived from them without widening.
    Int,
    Number,
    String,
    Function,
    Array,
    Object,
    Class,
    /// `undefined`, `null` and declarations without an initializer.
    None,
    Any,
}

impl Type {
    /// Result tag of `+`, `+=` and the two branches of a ternary.
    ///
    /// Anything stringy or reference-like makes the result a String, any
    /// remaining numeric-ish operand makes it a Number, otherwise it is Any.
    pub fn widen(types: &[Type]) -> Type {
        let has = |candidates: &[Type]| types.iter().any(|t| candidates.contains(t));

        if has(&[Type::String, Type::Array, Type::Object, Type::Function]) {
            Type::String
        } else if has(&[Type::Int, Type::Number, Type::Boolean, Type::None]) {
            Type::Number
        } else {
            Type::Any
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Type::Int | Type::Number | Type::Any)
    }

    pub fn is_boolean(self) -> bool {
        matches!(self, Type::Boolean | Type::Any)
    }

    pub fn is_integer(self) -> bool {
        matches!(self, Type::Int | Type::Any)
    }

    pub fn is_array_or_object(self) -> bool {
        matches!(self, Type::Array | Type::Object | Type::Any)
    }

    pub fn is_object(self) -> bool {
        matches!(self, Type::Object | Type::Any)
    }

    pub fn is_iterable(self) -> bool {
        matches!(self, Type::Array | Type::Object | Type::String | Type::Any)
    }

    pub fn is_callable(self) -> bool {
        matches!(self, Type::Function | Type::Any)
    }

    pub fn is_class_reference(self) -> bool {
        matches!(self, Type::Class | Type::Any)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::Boolean => "Boolean",
            Type::Int => "Int",
            Type::Number => "Number",
            Type::String => "String",
            Type::Function => "Function",
            Type::Array => "Array",
            Type::Object => "Object",
            Type::Class => "Class",
            Type::None => "None",
            Type::Any => "Any",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widen_string_wins() {
        assert_eq!(Type::widen(&[Type::String, Type::Number]), Type::String);
        assert_eq!(Type::widen(&[Type::Number, Type::String]), Type::String);
    }

    #[test]
    fn test_widen_reference_types_become_string() {
        assert_eq!(Type::widen(&[Type::Array, Type::Number]), Type::String);
        assert_eq!(Type::widen(&[Type::Int, Type::Object]), Type::String);
        assert_eq!(Type::widen(&[Type::Function, Type::Any]), Type::String);
    }

    #[test]
    fn test_widen_numeric() {
        assert_eq!(Type::widen(&[Type::Number, Type::Boolean]), Type::Number);
        assert_eq!(Type::widen(&[Type::Int, Type::Int]), Type::Number);
        assert_eq!(Type::widen(&[Type::None, Type::Any]), Type::Number);
    }

    #[test]
    fn test_widen_falls_back_to_any() {
        assert_eq!(Type::widen(&[Type::Any, Type::Any]), Type::Any);
        assert_eq!(Type::widen(&[Type::Class, Type::Any]), Type::Any);
    }

    #[test]
    fn test_predicates() {
        assert!(Type::Any.is_numeric());
        assert!(!Type::String.is_numeric());
        assert!(Type::Int.is_integer());
        assert!(!Type::Number.is_integer());
        assert!(Type::String.is_iterable());
        assert!(!Type::Number.is_iterable());
        assert!(Type::Array.is_array_or_object());
        assert!(!Type::Array.is_object());
        assert!(Type::Class.is_class_reference());
        assert!(!Type::Function.is_class_reference());
        assert!(Type::Function.is_callable());
        assert!(!Type::Boolean.is_callable());
    }

    #[test]
    fn test_display() {
        assert_eq!(Type::Number.to_string(), "Number");
        assert_eq!(Type::None.to_string(), "None");
    }
}
