//! Shared type definitions for the dddgen crate
//!
//! This module contains the reference types that flow from configuration and
//! directives into the code generator, plus the hash collection aliases used
//! across the crate.

use std::{fmt, hash::BuildHasherDefault};

use anyhow::{Result, bail};
use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHasher;

use crate::naming;

/// Insertion-ordered map with the fast Fx hasher
pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Insertion-ordered set with the fast Fx hasher
pub type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;

/// A symbol declared in another package
///
/// `origin_path` is the Go import path of the declaring package. An empty
/// origin path denotes a symbol of the package being generated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedReference {
    pub local_name: String,
    pub origin_path: String,
}

impl QualifiedReference {
    pub fn new(origin_path: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            origin_path: origin_path.into(),
        }
    }

    /// Reference to a symbol of the package being generated
    #[cfg(test)]
    pub(crate) fn local(local_name: impl Into<String>) -> Self {
        Self::new(String::new(), local_name)
    }

    /// Parse a dotted reference such as `github.com/acme/svc/domain/account.Account`
    ///
    /// The split happens at the last `.`, so dots inside the import path
    /// (host names, versioned modules) are preserved.
    pub fn parse(dotted: &str) -> Result<Self> {
        let dotted = dotted.trim();
        let Some((origin_path, local_name)) = dotted.rsplit_once('.') else {
            bail!("reference `{dotted}` is not of the form `import/path.Name`");
        };
        if origin_path.is_empty() || local_name.is_empty() {
            bail!("reference `{dotted}` is not of the form `import/path.Name`");
        }
        if origin_path.ends_with('/') {
            bail!("reference `{dotted}` has an empty package segment");
        }
        if !naming::is_identifier(local_name) {
            bail!("reference `{dotted}` does not end in `.Name` with `Name` a Go identifier");
        }
        if origin_path.contains(char::is_whitespace) {
            bail!("reference `{dotted}` has whitespace in its import path");
        }
        Ok(Self::new(origin_path, local_name))
    }

    pub fn is_local(&self) -> bool {
        self.origin_path.is_empty()
    }
}

impl fmt::Display for QualifiedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_local() {
            write!(f, "{}", self.local_name)
        } else {
            write!(f, "{}.{}", self.origin_path, self.local_name)
        }
    }
}

/// An adapter embedded into a command handler under `field_name`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedAdapterReference {
    pub field_name: String,
    pub reference: QualifiedReference,
}

impl NamedAdapterReference {
    pub fn new(field_name: impl Into<String>, reference: QualifiedReference) -> Self {
        Self {
            field_name: field_name.into(),
            reference,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_at_last_dot() {
        let reference =
            QualifiedReference::parse("github.com/xoe-labs/svc/domain/account.Account").unwrap();
        assert_eq!(reference.origin_path, "github.com/xoe-labs/svc/domain/account");
        assert_eq!(reference.local_name, "Account");
    }

    #[test]
    fn test_parse_keeps_versioned_paths() {
        let reference = QualifiedReference::parse("gopkg.in/yaml.v3.Node").unwrap();
        assert_eq!(reference.origin_path, "gopkg.in/yaml.v3");
        assert_eq!(reference.local_name, "Node");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(QualifiedReference::parse("Account").is_err());
        assert!(QualifiedReference::parse("github.com/acme/").is_err());
        assert!(QualifiedReference::parse("github.com/acme/.Account").is_err());
        assert!(QualifiedReference::parse(".Account").is_err());
    }

    #[test]
    fn test_parse_rejects_missing_or_invalid_name() {
        // no `.Name`: the last dot sits in the host name
        assert!(QualifiedReference::parse("github.com/acme/svc/app/errors").is_err());
        assert!(QualifiedReference::parse("github.com/acme/svc/app/errors.New Error").is_err());
        assert!(QualifiedReference::parse("github.com/acme/svc/app/errors.9Error").is_err());
        assert!(QualifiedReference::parse("github.com/acme/my svc.Error").is_err());
        assert!(QualifiedReference::parse("github.com/acme/svc/app/errors.NewError").is_ok());
    }

    #[test]
    fn test_display_round_trips_dotted_form() {
        let dotted = "github.com/acme/svc/app/errors.NewDomainError";
        assert_eq!(QualifiedReference::parse(dotted).unwrap().to_string(), dotted);
        assert_eq!(QualifiedReference::local("Thing").to_string(), "Thing");
    }

    #[test]
    fn test_equality_by_pair() {
        let a = QualifiedReference::new("a/b", "X");
        let b = QualifiedReference::new("a/b", "X");
        let c = QualifiedReference::new("a/c", "X");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
