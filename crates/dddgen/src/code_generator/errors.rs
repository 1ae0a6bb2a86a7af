//! Error taxonomy builder
//!
//! Emits the grouped sentinel declaration of a generated unit. Each sentinel
//! is built by calling its configured constructor with the sentinel's own
//! name as the message.

use anyhow::Result;

use super::{context::GenerationContext, shape::SentinelKind};
use crate::{ast_builder::declarations, go_ast::Declaration, types::QualifiedReference};

/// Constructors for the four sentinel kinds; absent ones are left out of the group
#[derive(Debug, Clone, Copy, Default)]
pub struct SentinelConstructors<'a> {
    pub authorization: Option<&'a QualifiedReference>,
    pub identification: Option<&'a QualifiedReference>,
    pub repository: Option<&'a QualifiedReference>,
    pub domain: Option<&'a QualifiedReference>,
}

impl<'a> SentinelConstructors<'a> {
    pub fn get(&self, kind: SentinelKind) -> Option<&'a QualifiedReference> {
        match kind {
            SentinelKind::Authorization => self.authorization,
            SentinelKind::Identification => self.identification,
            SentinelKind::Repository => self.repository,
            SentinelKind::Domain => self.domain,
        }
    }

    fn set(&mut self, kind: SentinelKind, constructor: &'a QualifiedReference) {
        let slot = match kind {
            SentinelKind::Authorization => &mut self.authorization,
            SentinelKind::Identification => &mut self.identification,
            SentinelKind::Repository => &mut self.repository,
            SentinelKind::Domain => &mut self.domain,
        };
        *slot = Some(constructor);
    }
}

/// `var ( ... )` with one sentinel per present constructor
pub fn sentinel_group(command: &str, constructors: &SentinelConstructors<'_>) -> Declaration {
    let vars = SentinelKind::ALL
        .into_iter()
        .filter_map(|kind| {
            constructors.get(kind).map(|constructor| {
                declarations::error_var(&kind.name(command), constructor, kind.doc(command))
            })
        })
        .collect();
    declarations::error_var_group(vars)
}

/// The sentinel group for the directive's protocol shape
pub fn build_error_taxonomy(ctx: &GenerationContext<'_>) -> Result<Declaration> {
    let mut constructors = SentinelConstructors::default();
    for kind in ctx.shape.sentinels() {
        constructors.set(kind, ctx.reference(kind.constructor_role())?);
    }
    Ok(sentinel_group(ctx.name(), &constructors))
}
