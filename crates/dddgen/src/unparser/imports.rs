//! Import block and package qualifier assignment

use cow_utils::CowUtils;

use crate::{
    go_ast::{Declaration, GeneratedUnit},
    naming,
    types::{FxIndexMap, FxIndexSet, QualifiedReference},
    visitors::{ImportCollector, ReferenceCollector},
};

/// Standard-library import paths have no dot in their first segment
pub fn is_stdlib_path(path: &str) -> bool {
    path.split('/').next().is_some_and(|first| !first.contains('.'))
}

/// Alias candidate from the last meaningful path segment
///
/// Major-version suffixes (`/v2`) are skipped and the segment is reduced to
/// lower-case ASCII letters and digits.
fn alias_base(path: &str) -> String {
    let mut segments = path.rsplit('/');
    let mut last = segments.next().unwrap_or(path);
    if is_major_version(last)
        && let Some(previous) = segments.next()
    {
        last = previous;
    }
    let lowered = last.cow_to_ascii_lowercase();
    let base: String = lowered
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    if base.is_empty() || base.starts_with(|c: char| c.is_ascii_digit()) {
        format!("pkg{base}")
    } else {
        base
    }
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}

/// Names a unit already uses at top level or inside bodies
fn names_in_use(unit: &GeneratedUnit) -> FxIndexSet<String> {
    let collector = ReferenceCollector::new("").collect_from_unit(unit);
    let mut taken: FxIndexSet<String> = collector
        .identifiers
        .iter()
        .map(|name| (*name).to_owned())
        .collect();
    for declaration in &unit.declarations {
        match declaration {
            Declaration::StructType(struct_type) => {
                taken.insert(struct_type.name.clone());
            }
            Declaration::Function(function) => {
                taken.insert(function.name.clone());
                taken.extend(
                    function
                        .receiver
                        .iter()
                        .chain(&function.params)
                        .filter_map(|param| param.name.clone()),
                );
            }
            Declaration::ErrorVarGroup(group) => {
                taken.extend(group.vars.iter().map(|var| var.name.clone()));
            }
            Declaration::Comment(_) | Declaration::InterfaceAssertion(_) => {}
        }
    }
    taken
}

/// Package qualifiers for one unit, keyed by import path
#[derive(Debug, Default)]
pub struct ImportTable {
    qualifiers: FxIndexMap<String, String>,
}

impl ImportTable {
    /// Assign a qualifier to every package `unit` references
    ///
    /// Standard-library packages keep their own name. Every other package gets
    /// an alias from its last path segment, suffixed with `1`, `2`, ... when
    /// it would clash with a Go keyword, a predeclared identifier, a name the
    /// unit declares, or an earlier qualifier.
    pub fn for_unit(unit: &GeneratedUnit) -> Self {
        let mut paths: Vec<&str> = ImportCollector::collect_from_unit(unit)
            .into_iter()
            .collect();
        paths.sort_unstable();

        let mut taken = names_in_use(unit);
        let mut qualifiers = FxIndexMap::default();
        let (stdlib, others): (Vec<&str>, Vec<&str>) =
            paths.into_iter().partition(|path| is_stdlib_path(path));

        for path in stdlib {
            let name = path.rsplit('/').next().unwrap_or(path).to_owned();
            taken.insert(name.clone());
            qualifiers.insert(path.to_owned(), name);
        }
        for path in others {
            let base = alias_base(path);
            let mut alias = base.clone();
            let mut suffix = 1;
            while naming::is_reserved(&alias) || taken.contains(&alias) {
                alias = format!("{base}{suffix}");
                suffix += 1;
            }
            taken.insert(alias.clone());
            qualifiers.insert(path.to_owned(), alias);
        }

        qualifiers.sort_keys();
        Self { qualifiers }
    }

    pub fn is_empty(&self) -> bool {
        self.qualifiers.is_empty()
    }

    /// `reference` as it appears in code: `alias.Name`, or `Name` when local
    pub fn qualify(&self, reference: &QualifiedReference) -> String {
        match self.qualifiers.get(&reference.origin_path) {
            Some(qualifier) => format!("{qualifier}.{}", reference.local_name),
            None => reference.local_name.clone(),
        }
    }

    /// Import specs in path order: `"context"` or `alias "path"`
    pub fn specs(&self) -> Vec<String> {
        self.qualifiers
            .iter()
            .map(|(path, qualifier)| {
                if is_stdlib_path(path) {
                    format!("\"{path}\"")
                } else {
                    format!("{qualifier} \"{path}\"")
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdlib_detection() {
        assert!(is_stdlib_path("context"));
        assert!(is_stdlib_path("encoding/json"));
        assert!(!is_stdlib_path("github.com/hashicorp/errwrap"));
    }

    #[test]
    fn test_alias_base() {
        assert_eq!(alias_base("github.com/acme/svc/domain/account"), "account");
        assert_eq!(alias_base("github.com/acme/test-svc"), "testsvc");
        assert_eq!(alias_base("github.com/acme/lib/v2"), "lib");
        assert_eq!(alias_base("github.com/acme/3d"), "pkg3d");
    }
}
