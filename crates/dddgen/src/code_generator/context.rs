use anyhow::{Context, Result};
use log::debug;

use super::shape::{ProtocolShape, SentinelKind};
use crate::{
    ast_builder::expressions,
    config::{ConfigRole, GenerationConfig},
    directive::CommandDirective,
    go_ast::Expr,
    naming,
    types::QualifiedReference,
};

/// Receiver of generated handler methods
pub const RECEIVER: &str = "h";

/// The `context.Context` parameter
pub const CTX: &str = "ctx";

/// Everything a builder needs to emit declarations for one directive
///
/// Built once per directive; all required configuration references are
/// checked on construction, so builders never see a half-configured
/// context.
#[derive(Debug, Clone)]
pub struct GenerationContext<'a> {
    pub directive: &'a CommandDirective,
    pub config: &'a GenerationConfig,
    pub shape: ProtocolShape,
    pub entity: &'a QualifiedReference,
    /// Local name of the command value
    pub command_binding: String,
    /// Local name of the aggregate inside callbacks and stubs
    pub entity_binding: String,
}

impl<'a> GenerationContext<'a> {
    /// Context for the generated (do not edit) unit
    pub fn new(directive: &'a CommandDirective, config: &'a GenerationConfig) -> Result<Self> {
        let shape = ProtocolShape::of(directive);
        Self::with_roles(directive, config, shape, &shape.required_roles())
    }

    /// Context for the editable stub unit
    pub fn for_stubs(directive: &'a CommandDirective, config: &'a GenerationConfig) -> Result<Self> {
        let shape = ProtocolShape::of(directive);
        let roles = shape.stub_required_roles(directive.with_command_stub);
        Self::with_roles(directive, config, shape, &roles)
    }

    fn with_roles(
        directive: &'a CommandDirective,
        config: &'a GenerationConfig,
        shape: ProtocolShape,
        roles: &[ConfigRole],
    ) -> Result<Self> {
        config
            .require_all(roles)
            .with_context(|| format!("Cannot generate `{}`", directive.name))?;
        let entity = config.require(ConfigRole::Entity)?;

        let mut taken: Vec<&str> = naming::GENERATED_LOCALS.to_vec();
        taken.extend_from_slice(naming::GENERATED_STDLIB_QUALIFIERS);
        taken.extend(
            directive
                .extra_adapters
                .iter()
                .map(|a| a.field_name.as_str()),
        );
        let command_binding = naming::binding_for(&directive.name, &taken);
        taken.push(&command_binding);
        let entity_binding = naming::binding_for(&entity.local_name, &taken);

        debug!(
            "Generating `{}` as {:?} (command binding `{}`, entity binding `{}`)",
            directive.name, shape, command_binding, entity_binding
        );

        Ok(Self {
            directive,
            config,
            shape,
            entity,
            command_binding,
            entity_binding,
        })
    }

    pub fn name(&self) -> &str {
        &self.directive.name
    }

    pub fn handler_name(&self) -> String {
        format!("{}Handler", self.directive.name)
    }

    pub fn constructor_name(&self) -> String {
        format!("New{}Handler", self.directive.name)
    }

    pub fn sentinel_name(&self, kind: SentinelKind) -> String {
        kind.name(&self.directive.name)
    }

    pub fn sentinel(&self, kind: SentinelKind) -> Expr {
        expressions::ident(&self.sentinel_name(kind))
    }

    pub fn reference(&self, role: ConfigRole) -> Result<&'a QualifiedReference> {
        self.config.require(role)
    }
}
