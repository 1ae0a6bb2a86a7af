//! Identifier and receiver-field reference collector
//!
//! Used by the unit consistency check: every sentinel a handler body names
//! must be declared, and every `h.<field>` it reads must exist on the handler
//! struct.

use super::{Visitor, walk_expr, walk_unit};
use crate::{
    go_ast::{Expr, GeneratedUnit},
    types::FxIndexSet,
};

/// Collects bare identifiers and fields selected on one receiver name
#[derive(Debug)]
pub struct ReferenceCollector<'a> {
    receiver: &'a str,
    /// Every bare identifier read anywhere in a function body
    pub identifiers: FxIndexSet<&'a str>,
    /// Fields selected as `<receiver>.<field>`
    pub receiver_fields: FxIndexSet<&'a str>,
}

impl<'a> ReferenceCollector<'a> {
    pub fn new(receiver: &'a str) -> Self {
        Self {
            receiver,
            identifiers: FxIndexSet::default(),
            receiver_fields: FxIndexSet::default(),
        }
    }

    /// Collect references from every declaration of `unit`
    pub fn collect_from_unit(mut self, unit: &'a GeneratedUnit) -> Self {
        walk_unit(&mut self, unit);
        self
    }
}

impl<'a> Visitor<'a> for ReferenceCollector<'a> {
    fn visit_expr(&mut self, expr: &'a Expr) {
        match expr {
            Expr::Ident(name) => {
                self.identifiers.insert(name.as_str());
            }
            Expr::Selector { value, field } => {
                if matches!(value.as_ref(), Expr::Ident(name) if name == self.receiver) {
                    self.receiver_fields.insert(field.as_str());
                }
            }
            _ => {}
        }
        walk_expr(self, expr);
    }
}
