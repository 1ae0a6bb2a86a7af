//! Visitor implementations over the Go declaration tree
//!
//! [`Visitor`] mirrors a source-order visitor: each `visit_*` method defaults
//! to the matching `walk_*` function, so implementors override only the nodes
//! they care about and call back into `walk_*` to keep descending.

mod import_collector;
mod reference_collector;

pub use import_collector::ImportCollector;
pub use reference_collector::ReferenceCollector;

use crate::go_ast::{Declaration, Expr, GeneratedUnit, Param, Stmt, TypeExpr};

pub trait Visitor<'a> {
    fn visit_declaration(&mut self, declaration: &'a Declaration) {
        walk_declaration(self, declaration);
    }

    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        walk_expr(self, expr);
    }

    fn visit_type(&mut self, ty: &'a TypeExpr) {
        walk_type(self, ty);
    }
}

pub fn walk_unit<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, unit: &'a GeneratedUnit) {
    for declaration in &unit.declarations {
        visitor.visit_declaration(declaration);
    }
}

pub fn walk_body<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, body: &'a [Stmt]) {
    for stmt in body {
        visitor.visit_stmt(stmt);
    }
}

fn walk_params<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, params: &'a [Param]) {
    for param in params {
        visitor.visit_type(&param.ty);
    }
}

pub fn walk_declaration<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, declaration: &'a Declaration) {
    match declaration {
        Declaration::Comment(_) => {}
        // Constructors are qualified references, not expressions; visitors
        // that care about them inspect the group directly
        Declaration::ErrorVarGroup(_) => {}
        Declaration::StructType(struct_type) => {
            for field in &struct_type.fields {
                visitor.visit_type(&field.ty);
            }
        }
        Declaration::Function(function) => {
            if let Some(receiver) = &function.receiver {
                visitor.visit_type(&receiver.ty);
            }
            walk_params(visitor, &function.params);
            walk_params(visitor, &function.results);
            walk_body(visitor, &function.body);
        }
        Declaration::InterfaceAssertion(_) => {}
    }
}

pub fn walk_stmt<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, stmt: &'a Stmt) {
    match stmt {
        Stmt::Expr(expr) | Stmt::Define { value: expr, .. } | Stmt::Assign { value: expr, .. } => {
            visitor.visit_expr(expr);
        }
        Stmt::Var { ty, .. } => visitor.visit_type(ty),
        Stmt::If { init, cond, body } => {
            if let Some(init) = init {
                visitor.visit_stmt(init);
            }
            visitor.visit_expr(cond);
            walk_body(visitor, body);
        }
        Stmt::Return(values) => {
            for value in values {
                visitor.visit_expr(value);
            }
        }
        Stmt::Comment(_) => {}
        Stmt::Annotated { stmt, .. } => visitor.visit_stmt(stmt),
    }
}

pub fn walk_expr<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, expr: &'a Expr) {
    match expr {
        Expr::Ident(_) | Expr::Qual(_) | Expr::StringLit(_) => {}
        Expr::Selector { value, .. } => visitor.visit_expr(value),
        Expr::Call { func, args } => {
            visitor.visit_expr(func);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        Expr::Unary { operand, .. } => visitor.visit_expr(operand),
        Expr::Binary { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        Expr::FuncLit {
            params,
            results,
            body,
        } => {
            walk_params(visitor, params);
            walk_params(visitor, results);
            walk_body(visitor, body);
        }
        Expr::CompositeLit { ty, fields } => {
            visitor.visit_type(ty);
            for (_, value) in fields {
                visitor.visit_expr(value);
            }
        }
        Expr::New(ty) => visitor.visit_type(ty),
    }
}

pub fn walk_type<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, ty: &'a TypeExpr) {
    match ty {
        TypeExpr::Named(_) | TypeExpr::Qual(_) => {}
        TypeExpr::Pointer(inner) => visitor.visit_type(inner),
    }
}
