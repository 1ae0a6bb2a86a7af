//! Editable scaffold for a command
//!
//! The stub unit holds everything the generated handler expects the user to
//! provide: the command struct, its `handle` method, and the accessors behind
//! the `Identifiable` and `Policeable` interfaces. It is written once and then
//! owned by the user.

use anyhow::Result;

use super::context::{CTX, GenerationContext};
use crate::{
    ast_builder::{
        declarations, error_type, named_type, param, pointer_to, qual_type, result,
        expressions::{field, nil},
        statements::{comment, return_stmt},
    },
    config::ConfigRole,
    go_ast::Declaration,
    types::QualifiedReference,
};

const UUID_FIELD: &str = "uuid";
const USER_FIELD: &str = "userId";
const ELEVATION_TOKEN_FIELD: &str = "elevationToken";

/// `type {Name} struct { uuid, userId, elevationToken }`
pub fn build_command_struct(ctx: &GenerationContext<'_>) -> Result<Declaration> {
    let fields = vec![
        declarations::field(
            UUID_FIELD,
            qual_type(ctx.reference(ConfigRole::Identifier)?),
        ),
        declarations::field(USER_FIELD, qual_type(ctx.reference(ConfigRole::User)?)),
        declarations::field(
            ELEVATION_TOKEN_FIELD,
            qual_type(ctx.reference(ConfigRole::ElevationToken)?),
        ),
    ];
    Ok(declarations::struct_type(
        Some(format!("{0} represents a {0} command", ctx.name())),
        ctx.name(),
        fields,
        Some("TODO: design command event/message fields (evtl. use protobuf + protoc-gen-go)"),
    ))
}

/// `func (c *{Name}) handle(ctx, e *Entity, <extras>) error`
pub fn build_handle_stub(ctx: &GenerationContext<'_>) -> Declaration {
    let mut params = vec![
        param(CTX, qual_type(&QualifiedReference::new("context", "Context"))),
        param(&ctx.entity_binding, pointer_to(qual_type(ctx.entity))),
    ];
    params.extend(ctx.directive.extra_adapters.iter().map(|adapter| {
        param(
            &adapter.field_name,
            pointer_to(qual_type(&adapter.reference)),
        )
    }));

    declarations::method(
        Some(format!("handle specifically performs {}", ctx.name())),
        param(&ctx.command_binding, pointer_to(named_type(ctx.name()))),
        "handle",
        params,
        vec![result(error_type())],
        vec![comment("TODO: implement app logic"), return_stmt(vec![nil()])],
    )
}

/// A value-receiver accessor returning one field of the command struct
fn accessor(
    ctx: &GenerationContext<'_>,
    doc: String,
    name: &str,
    ty: &QualifiedReference,
    field_name: &str,
) -> Declaration {
    declarations::method(
        Some(doc),
        param(&ctx.command_binding, named_type(ctx.name())),
        name,
        vec![],
        vec![result(qual_type(ty))],
        vec![return_stmt(vec![field(&ctx.command_binding, field_name)])],
    )
}

pub fn build_identifier_accessor(ctx: &GenerationContext<'_>) -> Result<Declaration> {
    Ok(accessor(
        ctx,
        format!(
            "Identifier returns the identifier of the object on which to perform {}",
            ctx.name()
        ),
        "Identifier",
        ctx.reference(ConfigRole::Identifier)?,
        UUID_FIELD,
    ))
}

pub fn build_user_accessor(ctx: &GenerationContext<'_>) -> Result<Declaration> {
    Ok(accessor(
        ctx,
        "User returns the identifier of the caller".to_owned(),
        "User",
        ctx.reference(ConfigRole::User)?,
        USER_FIELD,
    ))
}

pub fn build_elevation_token_accessor(ctx: &GenerationContext<'_>) -> Result<Declaration> {
    Ok(accessor(
        ctx,
        "ElevationToken returns an elevation token in possession of the caller".to_owned(),
        "ElevationToken",
        ctx.reference(ConfigRole::ElevationToken)?,
        ELEVATION_TOKEN_FIELD,
    ))
}

/// `var _ Identifiable = (*{Name})(nil)`
pub fn build_identifiable_assertion(ctx: &GenerationContext<'_>) -> Result<Declaration> {
    Ok(declarations::interface_assertion(
        Some(format!(
            "Assert that {} implements Identifiable interface!",
            ctx.name()
        )),
        ctx.reference(ConfigRole::Identifiable)?,
        ctx.name(),
    ))
}

/// `var _ Policeable = (*{Name})(nil)`
pub fn build_policeable_assertion(ctx: &GenerationContext<'_>) -> Result<Declaration> {
    Ok(declarations::interface_assertion(
        Some(format!(
            "Assert that {} implements Policeable interface!",
            ctx.name()
        )),
        ctx.reference(ConfigRole::Policeable)?,
        ctx.name(),
    ))
}

/// Stub declarations in unit order: command struct, `handle`, accessors,
/// then interface assertions
pub fn build_stubs(ctx: &GenerationContext<'_>) -> Result<Vec<Declaration>> {
    let mut stubs = Vec::new();
    if ctx.directive.with_command_stub {
        stubs.push(build_command_struct(ctx)?);
    }
    stubs.push(build_handle_stub(ctx));

    let mut assertions = Vec::new();
    if ctx.shape.checks_identity() {
        stubs.push(declarations::block_comment(
            "=> Identifiable interface implementation ...",
        ));
        stubs.push(build_identifier_accessor(ctx)?);
        assertions.push(build_identifiable_assertion(ctx)?);
    }
    if ctx.shape.has_policy() {
        stubs.push(declarations::block_comment(
            "=> Policeable interface implementation ...",
        ));
        stubs.push(build_user_accessor(ctx)?);
        stubs.push(build_elevation_token_accessor(ctx)?);
        assertions.push(build_policeable_assertion(ctx)?);
    }
    stubs.extend(assertions);
    Ok(stubs)
}
