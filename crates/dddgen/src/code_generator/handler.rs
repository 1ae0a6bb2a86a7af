//! Handler struct and guarded constructor

use super::context::GenerationContext;
use crate::{
    ast_builder::{
        declarations, named_type, param, pointer_to, qual_type, result,
        expressions::{address_of, call, composite_lit, ident, method_call, qual, string_lit},
        statements::{if_stmt, panic_with, return_stmt},
    },
    go_ast::{Declaration, Stmt},
    types::{NamedAdapterReference, QualifiedReference},
};

fn reflect_value_of() -> QualifiedReference {
    QualifiedReference::new("reflect", "ValueOf")
}

/// `type {Name}Handler struct { <adapter fields> }`
pub fn build_handler_type(ctx: &GenerationContext<'_>) -> Declaration {
    let name = ctx.handler_name();
    let fields = ctx
        .directive
        .adapters
        .iter()
        .map(|adapter| declarations::field(&adapter.field_name, qual_type(&adapter.reference)))
        .collect();
    declarations::struct_type(
        Some(format!("{name} knows how to perform {}", ctx.name())),
        &name,
        fields,
        None,
    )
}

/// `if reflect.ValueOf(x).IsZero() { panic("no 'x' provided!") }`
fn zero_value_guard(adapter: &NamedAdapterReference) -> Stmt {
    let field = &adapter.field_name;
    if_stmt(
        method_call(
            call(qual(&reflect_value_of()), vec![ident(field)]),
            "IsZero",
            vec![],
        ),
        vec![panic_with(string_lit(&format!("no '{field}' provided!")))],
    )
}

/// `func New{Name}Handler(<adapters>) *{Name}Handler`
///
/// Every adapter is checked against its zero value; a constructed handler
/// always holds usable adapters.
pub fn build_constructor(ctx: &GenerationContext<'_>) -> Declaration {
    let handler = ctx.handler_name();
    let adapters = &ctx.directive.adapters;

    let params = adapters
        .iter()
        .map(|adapter| param(&adapter.field_name, qual_type(&adapter.reference)))
        .collect();

    let mut body: Vec<Stmt> = adapters.iter().map(zero_value_guard).collect();
    body.push(return_stmt(vec![address_of(composite_lit(
        named_type(&handler),
        adapters
            .iter()
            .map(|adapter| (adapter.field_name.clone(), ident(&adapter.field_name)))
            .collect(),
    ))]));

    let name = ctx.constructor_name();
    declarations::function(
        Some(format!("{name} returns {handler}")),
        &name,
        params,
        vec![result(pointer_to(named_type(&handler)))],
        body,
    )
}
