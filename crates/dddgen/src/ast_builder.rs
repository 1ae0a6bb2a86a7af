//! AST builder module for creating Go declaration nodes
//!
//! This module provides factory functions for the nodes in [`crate::go_ast`].
//! The code generator composes its output exclusively through these
//! functions, which keeps the builders free of struct-literal noise.
//!
//! Factories are grouped by node category:
//! - [`expressions`]: values, calls, selectors, function literals
//! - [`statements`]: assignments, conditionals, returns
//! - [`declarations`]: top-level declarations of a unit
//!
//! Type expressions and parameters are small enough to live here.

pub mod declarations;
pub mod expressions;
pub mod statements;

use crate::{
    go_ast::{Param, TypeExpr},
    types::QualifiedReference,
};

/// Creates a builtin or package-local type: `error`, `IncreaseBalance`
pub fn named_type(name: &str) -> TypeExpr {
    TypeExpr::Named(name.to_owned())
}

/// Creates a type declared in another package: `account.Account`
pub fn qual_type(reference: &QualifiedReference) -> TypeExpr {
    if reference.is_local() {
        named_type(&reference.local_name)
    } else {
        TypeExpr::Qual(reference.clone())
    }
}

/// Creates a pointer type: `*T`
pub fn pointer_to(ty: TypeExpr) -> TypeExpr {
    TypeExpr::Pointer(Box::new(ty))
}

/// The `error` type
pub fn error_type() -> TypeExpr {
    named_type("error")
}

/// Creates a named parameter: `name T`
pub fn param(name: &str, ty: TypeExpr) -> Param {
    Param {
        name: Some(name.to_owned()),
        ty,
    }
}

/// Creates an unnamed result: `T`
pub fn result(ty: TypeExpr) -> Param {
    Param { name: None, ty }
}
