//! Generation run over a directive manifest
//!
//! Renders every unit first and touches the filesystem only once all
//! directives generated cleanly, so a bad directive never leaves a half
//! written package behind.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::{
    code_generator::{gen_command, gen_doc, stub_command},
    config::GenerationConfig,
    directive::DirectiveManifest,
    naming,
    unparser::unparse,
};

pub const DOC_FILE: &str = "doc.go";

/// Whether an existing file may be replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Generated output, always rewritten
    Overwrite,
    /// User-owned after the first write
    CreateOnly,
}

/// One rendered Go file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedUnit {
    pub file_name: String,
    pub contents: String,
    pub policy: WritePolicy,
}

/// Files touched by [`write_units`]
#[derive(Debug, Default)]
pub struct WriteSummary {
    pub written: Vec<PathBuf>,
    /// Create-only files that already existed
    pub kept: Vec<PathBuf>,
}

/// Render the generated and stub unit of every manifest entry, plus `doc.go`
///
/// A package set in the manifest overrides the configured one.
pub fn render_manifest(
    manifest: &DirectiveManifest,
    config: &GenerationConfig,
) -> Result<Vec<RenderedUnit>> {
    let mut config = config.clone();
    if let Some(package) = &manifest.package {
        config.package.clone_from(package);
    }

    let directives = manifest.directives(&config)?;
    let mut units = Vec::with_capacity(directives.len() * 2 + 1);
    for directive in &directives {
        let stem = naming::snake_case(&directive.name);
        let generated = gen_command(directive, &config)
            .with_context(|| format!("Failed to generate `{}`", directive.name))?;
        let stubs = stub_command(directive, &config)
            .with_context(|| format!("Failed to generate stubs for `{}`", directive.name))?;
        debug!("Rendered `{}` into {stem}_gen.go and {stem}.go", directive.name);

        units.push(RenderedUnit {
            file_name: format!("{stem}_gen.go"),
            contents: unparse(&generated),
            policy: WritePolicy::Overwrite,
        });
        units.push(RenderedUnit {
            file_name: format!("{stem}.go"),
            contents: unparse(&stubs),
            policy: WritePolicy::CreateOnly,
        });
    }
    units.push(RenderedUnit {
        file_name: DOC_FILE.to_owned(),
        contents: unparse(&gen_doc(&config.package)),
        policy: WritePolicy::CreateOnly,
    });
    Ok(units)
}

/// Write `units` into `out_dir`, never replacing create-only files
pub fn write_units(units: &[RenderedUnit], out_dir: &Path) -> Result<WriteSummary> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let mut summary = WriteSummary::default();
    for unit in units {
        let path = out_dir.join(&unit.file_name);
        if unit.policy == WritePolicy::CreateOnly && path.exists() {
            debug!("Keeping existing {}", path.display());
            summary.kept.push(path);
            continue;
        }
        fs::write(&path, &unit.contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        summary.written.push(path);
    }

    info!(
        "Wrote {} file(s), kept {} existing file(s) in {}",
        summary.written.len(),
        summary.kept.len(),
        out_dir.display()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::full_config;

    fn manifest() -> DirectiveManifest {
        DirectiveManifest::parse(
            r#"
            package = "accounts"

            [[command]]
            name = "ArchiveAccount"

            [[command]]
            name = "MakeNewAccountWithoutId"
            annotation = "w/o policy"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_render_manifest_file_names() {
        let units = render_manifest(&manifest(), &full_config()).unwrap();
        let names: Vec<&str> = units.iter().map(|u| u.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "archive_account_gen.go",
                "archive_account.go",
                "make_new_account_without_id_gen.go",
                "make_new_account_without_id.go",
                "doc.go",
            ]
        );
        assert!(units.iter().all(|u| u.contents.contains("package accounts\n")));
        assert_eq!(units[0].policy, WritePolicy::Overwrite);
        assert_eq!(units[1].policy, WritePolicy::CreateOnly);
    }

    #[test]
    fn test_render_manifest_reports_failing_directive() {
        let config = full_config().without_reference(crate::config::ConfigRole::Policer);
        let err = render_manifest(&manifest(), &config).unwrap_err();
        assert!(format!("{err:#}").contains("ArchiveAccount"));
    }

    #[test]
    fn test_render_manifest_rejects_adapters_shadowing_generated_names() {
        for adapter in ["ctx", "reflect"] {
            let manifest = DirectiveManifest::parse(&format!(
                r#"
                [[command]]
                name = "IncreaseBalance"
                annotation = "adapters,{adapter}:github.com/acme/svc.Svc"
                "#
            ))
            .unwrap();
            let err = render_manifest(&manifest, &full_config()).unwrap_err();
            assert!(format!("{err:#}").contains(adapter), "{err:#}");
        }
    }
}
