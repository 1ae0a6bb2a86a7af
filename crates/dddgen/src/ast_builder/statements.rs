//! Statement AST node factory functions
//!
//! This module provides factory functions for the statements that appear in
//! generated function bodies.

use super::expressions;
use crate::go_ast::{Expr, Stmt, TypeExpr};

/// Creates an expression statement.
///
/// # Arguments
/// * `expr` - The expression to evaluate for its side effects
pub fn expr(expr: Expr) -> Stmt {
    Stmt::Expr(expr)
}

/// Creates a short variable declaration.
///
/// # Arguments
/// * `targets` - The declared names, `_` for discarded values
/// * `value` - The right-hand side
///
/// # Example
/// ```go
/// data, err := json.Marshal(a)
/// ```
pub fn define(targets: &[&str], value: Expr) -> Stmt {
    Stmt::Define {
        targets: targets.iter().map(|t| (*t).to_owned()).collect(),
        value,
    }
}

/// Creates a plain assignment to already declared names.
///
/// # Example
/// ```go
/// innerErr = ErrNotAuthorizedToIncreaseBalance
/// ```
pub fn assign(targets: &[&str], value: Expr) -> Stmt {
    Stmt::Assign {
        targets: targets.iter().map(|t| (*t).to_owned()).collect(),
        value,
    }
}

/// Creates a zero-valued variable declaration: `var name T`
pub fn var(name: &str, ty: TypeExpr) -> Stmt {
    Stmt::Var {
        name: name.to_owned(),
        ty,
    }
}

/// Creates an if statement without init clause.
///
/// # Arguments
/// * `cond` - The condition expression
/// * `body` - The statements executed when the condition holds
pub fn if_stmt(cond: Expr, body: Vec<Stmt>) -> Stmt {
    Stmt::If {
        init: None,
        cond,
        body,
    }
}

/// Creates an if statement with an init clause.
///
/// # Example
/// ```go
/// if err := ib.handle(ctx, a); err != nil {
///     return errwrap.Wrap(ErrIncreaseBalanceFailedInDomain, err)
/// }
/// ```
pub fn if_with_init(init: Stmt, cond: Expr, body: Vec<Stmt>) -> Stmt {
    Stmt::If {
        init: Some(Box::new(init)),
        cond,
        body,
    }
}

/// Creates a return statement; an empty vector yields a bare `return`.
pub fn return_stmt(values: Vec<Expr>) -> Stmt {
    Stmt::Return(values)
}

/// Creates a `// text` comment line
pub fn comment(text: &str) -> Stmt {
    Stmt::Comment(text.to_owned())
}

/// Attaches a trailing `// comment` to a statement
pub fn annotated(stmt: Stmt, comment: &str) -> Stmt {
    Stmt::Annotated {
        stmt: Box::new(stmt),
        comment: comment.to_owned(),
    }
}

/// Creates `panic(value)`
pub fn panic_with(value: Expr) -> Stmt {
    expr(expressions::call(expressions::ident("panic"), vec![value]))
}
