//! Expression AST node factory functions
//!
//! This module provides factory functions for the expression nodes the
//! command handler generator needs.

use crate::{
    go_ast::{BinaryOp, Expr, Param, Stmt, TypeExpr, UnaryOp},
    types::QualifiedReference,
};

/// Creates an identifier expression: `name`
pub fn ident(name: &str) -> Expr {
    Expr::Ident(name.to_owned())
}

/// Creates a reference to a value declared in another package: `errwrap.Wrap`
pub fn qual(reference: &QualifiedReference) -> Expr {
    if reference.is_local() {
        ident(&reference.local_name)
    } else {
        Expr::Qual(reference.clone())
    }
}

/// Creates a string literal: `"value"`
pub fn string_lit(value: &str) -> Expr {
    Expr::StringLit(value.to_owned())
}

/// Creates the `nil` identifier
pub fn nil() -> Expr {
    ident("nil")
}

/// Creates a selector: `value.field`
pub fn selector(value: Expr, field: &str) -> Expr {
    Expr::Selector {
        value: Box::new(value),
        field: field.to_owned(),
    }
}

/// Creates a selector on a plain identifier: `obj.field`
///
/// # Example
/// ```go
/// h.agg
/// ```
pub fn field(obj: &str, field: &str) -> Expr {
    selector(ident(obj), field)
}

/// Creates a function call: `func(arg1, arg2, ...)`
pub fn call(func: Expr, args: Vec<Expr>) -> Expr {
    Expr::Call {
        func: Box::new(func),
        args,
    }
}

/// Creates a method call: `receiver.method(args...)`
///
/// # Example
/// ```go
/// h.pol.Can(ctx, ib, "IncreaseBalance", data)
/// ```
pub fn method_call(receiver: Expr, method: &str, args: Vec<Expr>) -> Expr {
    call(selector(receiver, method), args)
}

/// Creates a logical negation: `!operand`
pub fn not(operand: Expr) -> Expr {
    Expr::Unary {
        op: UnaryOp::Not,
        operand: Box::new(operand),
    }
}

/// Creates an address-of expression: `&operand`
pub fn address_of(operand: Expr) -> Expr {
    Expr::Unary {
        op: UnaryOp::AddressOf,
        operand: Box::new(operand),
    }
}

/// Creates an inequality comparison: `left != right`
pub fn not_eq(left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        left: Box::new(left),
        op: BinaryOp::NotEq,
        right: Box::new(right),
    }
}

/// Creates the ubiquitous `name != nil`
pub fn is_not_nil(name: &str) -> Expr {
    not_eq(ident(name), nil())
}

/// Creates a function literal: `func(params) (results) { body }`
pub fn func_lit(params: Vec<Param>, results: Vec<Param>, body: Vec<Stmt>) -> Expr {
    Expr::FuncLit {
        params,
        results,
        body,
    }
}

/// Creates a keyed composite literal: `Type{key: value, ...}`
pub fn composite_lit(ty: TypeExpr, fields: Vec<(String, Expr)>) -> Expr {
    Expr::CompositeLit { ty, fields }
}

/// Creates an allocation: `new(T)`
pub fn new_of(ty: TypeExpr) -> Expr {
    Expr::New(ty)
}
