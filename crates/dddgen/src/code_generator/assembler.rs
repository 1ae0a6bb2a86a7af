//! Unit assembly and consistency checking

use anyhow::{Result, bail};
use log::debug;

use super::{
    context::{GenerationContext, RECEIVER},
    errors::build_error_taxonomy,
    handle_method::{build_handle_method, build_is_identifiable},
    handler::{build_constructor, build_handler_type},
    shape::SentinelKind,
    stubs::build_stubs,
};
use crate::{
    ast_builder::declarations,
    config::GenerationConfig,
    directive::CommandDirective,
    go_ast::GeneratedUnit,
    types::FxIndexSet,
    unparser::is_stdlib_path,
    visitors::{ImportCollector, ReferenceCollector},
};

fn generated_header(generator: &str) -> String {
    format!("Code generated by '{generator}': DO NOT EDIT.")
}

fn stub_header(generator: &str) -> String {
    format!("Code generated by '{generator}': THESE ARE STUBS, PLEASE EDIT.")
}

/// Assemble the generated (do not edit) unit for `directive`
///
/// Order: topic comment, sentinel group, handler struct, constructor,
/// `Handle`, and `IsIdentifiable` when the command must be identifiable.
pub fn gen_command(directive: &CommandDirective, config: &GenerationConfig) -> Result<GeneratedUnit> {
    let ctx = GenerationContext::new(directive, config)?;

    let mut unit = GeneratedUnit::new(config.package.as_str());
    unit.provenance = Some(generated_header(&config.generator));
    unit.declarations = vec![
        declarations::comment(&format!("Topic: {}", directive.topic)),
        build_error_taxonomy(&ctx)?,
        build_handler_type(&ctx),
        build_constructor(&ctx),
        build_handle_method(&ctx)?,
    ];
    if ctx.shape.checks_identity() {
        unit.declarations.push(build_is_identifiable(&ctx));
    }

    check_consistency(&ctx, &unit)?;
    check_signatures(&unit)?;
    debug!(
        "Assembled `{}`: {} declarations",
        directive.name,
        unit.declarations.len()
    );
    Ok(unit)
}

/// Assemble the editable stub unit for `directive`
pub fn stub_command(
    directive: &CommandDirective,
    config: &GenerationConfig,
) -> Result<GeneratedUnit> {
    let ctx = GenerationContext::for_stubs(directive, config)?;

    let mut unit = GeneratedUnit::new(config.package.as_str());
    unit.provenance = Some(stub_header(&config.generator));
    unit.declarations
        .push(declarations::block_comment(&format!("=== Topic: {} ===", directive.topic)));
    unit.declarations.extend(build_stubs(&ctx)?);
    check_signatures(&unit)?;

    debug!(
        "Assembled stubs for `{}`: {} declarations",
        directive.name,
        unit.declarations.len()
    );
    Ok(unit)
}

/// Package documentation unit
pub fn gen_doc(package: &str) -> GeneratedUnit {
    let mut unit = GeneratedUnit::new(package);
    unit.package_doc = Some(format!(
        "Package {package} implements application layer commands"
    ));
    unit
}

/// Reject units whose declared and referenced names disagree
///
/// - every sentinel referenced in a body is declared, and vice versa
/// - every `h.<field>` read in a body is a field of the handler struct
fn check_consistency(ctx: &GenerationContext<'_>, unit: &GeneratedUnit) -> Result<()> {
    let collector = ReferenceCollector::new(RECEIVER).collect_from_unit(unit);

    let declared: FxIndexSet<&str> = unit.error_vars().map(|var| var.name.as_str()).collect();
    let sentinel_names: Vec<String> = SentinelKind::ALL
        .into_iter()
        .map(|kind| ctx.sentinel_name(kind))
        .collect();
    let referenced: FxIndexSet<&str> = sentinel_names
        .iter()
        .map(String::as_str)
        .filter(|name| collector.identifiers.contains(name))
        .collect();

    if let Some(missing) = referenced.iter().find(|name| !declared.contains(*name)) {
        bail!(
            "Generated unit for `{}` references undeclared sentinel `{missing}`",
            ctx.name()
        );
    }
    if let Some(unused) = declared.iter().find(|name| !referenced.contains(*name)) {
        bail!(
            "Generated unit for `{}` declares unused sentinel `{unused}`",
            ctx.name()
        );
    }

    let handler_name = ctx.handler_name();
    let Some(handler) = unit.struct_type(&handler_name) else {
        bail!("Generated unit for `{}` has no `{handler_name}`", ctx.name());
    };
    for used in &collector.receiver_fields {
        if !handler.fields.iter().any(|field| field.name == *used) {
            bail!(
                "Generated unit for `{}` reads `{RECEIVER}.{used}` but `{handler_name}` has no such field",
                ctx.name()
            );
        }
    }
    Ok(())
}

/// Reject functions whose receiver, parameter and result names repeat or
/// hide a standard-library package the unit imports
fn check_signatures(unit: &GeneratedUnit) -> Result<()> {
    let packages: FxIndexSet<&str> = ImportCollector::collect_from_unit(unit)
        .into_iter()
        .filter(|path| is_stdlib_path(path))
        .filter_map(|path| path.rsplit('/').next())
        .collect();

    for function in unit.functions() {
        let mut seen: FxIndexSet<&str> = FxIndexSet::default();
        let names = function
            .receiver
            .iter()
            .chain(&function.params)
            .chain(&function.results)
            .filter_map(|param| param.name.as_deref());
        for name in names {
            if !seen.insert(name) {
                bail!("`{}` declares `{name}` more than once", function.name);
            }
            if packages.contains(name) {
                bail!(
                    "`{}` declares `{name}`, hiding the imported `{name}` package",
                    function.name
                );
            }
        }
    }
    Ok(())
}
