//! Collects the import paths a unit depends on

use super::{Visitor, walk_declaration, walk_expr, walk_type, walk_unit};
use crate::{
    go_ast::{Declaration, Expr, GeneratedUnit, TypeExpr},
    types::{FxIndexSet, QualifiedReference},
};

/// Gathers every non-local [`QualifiedReference`] origin path in first-use order
#[derive(Debug, Default)]
pub struct ImportCollector<'a> {
    pub paths: FxIndexSet<&'a str>,
}

impl<'a> ImportCollector<'a> {
    pub fn collect_from_unit(unit: &'a GeneratedUnit) -> FxIndexSet<&'a str> {
        let mut collector = Self::default();
        walk_unit(&mut collector, unit);
        collector.paths
    }

    fn record(&mut self, reference: &'a QualifiedReference) {
        if !reference.is_local() {
            self.paths.insert(reference.origin_path.as_str());
        }
    }
}

impl<'a> Visitor<'a> for ImportCollector<'a> {
    fn visit_declaration(&mut self, declaration: &'a Declaration) {
        match declaration {
            Declaration::ErrorVarGroup(group) => {
                for var in &group.vars {
                    self.record(&var.constructor);
                }
            }
            Declaration::InterfaceAssertion(assertion) => self.record(&assertion.interface),
            _ => {}
        }
        walk_declaration(self, declaration);
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        if let Expr::Qual(reference) = expr {
            self.record(reference);
        }
        walk_expr(self, expr);
    }

    fn visit_type(&mut self, ty: &'a TypeExpr) {
        if let TypeExpr::Qual(reference) = ty {
            self.record(reference);
        }
        walk_type(self, ty);
    }
}
