//! Fixtures shared by unit tests

use crate::{
    config::{ConfigRole, GenerationConfig},
    directive::{Annotation, CommandDirective, GenerationKind},
    types::{NamedAdapterReference, QualifiedReference},
};

const SVC: &str = "github.com/xoe-labs/ddd-gen/internal/test-svc";

fn svc(path: &str, name: &str) -> QualifiedReference {
    if path.is_empty() {
        QualifiedReference::new(SVC, name)
    } else {
        QualifiedReference::new(format!("{SVC}/{path}"), name)
    }
}

/// A configuration with every role set
pub(crate) fn full_config() -> GenerationConfig {
    GenerationConfig::default()
        .with_reference(ConfigRole::Entity, svc("domain/account", "Account"))
        .with_reference(ConfigRole::Policeable, svc("app/policy", "Policeable"))
        .with_reference(ConfigRole::Identifiable, svc("app/identity", "Identifiable"))
        .with_reference(ConfigRole::Repository, svc("app/repository", "Repository"))
        .with_reference(ConfigRole::Policer, svc("app/policy", "Policer"))
        .with_reference(ConfigRole::Identifier, svc("domain", "Identifier"))
        .with_reference(ConfigRole::User, svc("domain", "User"))
        .with_reference(ConfigRole::ElevationToken, svc("domain", "ElevationToken"))
        .with_reference(
            ConfigRole::AuthorizationErrorNew,
            svc("app/error", "NewAuthorizationError"),
        )
        .with_reference(
            ConfigRole::IdentificationErrorNew,
            svc("app/error", "NewIdentificationError"),
        )
        .with_reference(
            ConfigRole::RepositoryErrorNew,
            svc("app/error", "NewRepositoryError"),
        )
        .with_reference(
            ConfigRole::StorageSavingErrorNew,
            svc("app/error", "NewStorageSavingError"),
        )
        .with_reference(ConfigRole::DomainErrorNew, svc("app/error", "NewDomainError"))
}

pub(crate) fn balance_service() -> NamedAdapterReference {
    NamedAdapterReference::new("svc", svc("adapter/balancesvc", "Balancer"))
}

/// Directive for `name` with explicit flags
pub(crate) fn directive(
    name: &str,
    kind: GenerationKind,
    with_policy: bool,
    with_identifiable: bool,
    extra_adapters: Vec<NamedAdapterReference>,
) -> CommandDirective {
    let annotation = Annotation {
        without_policy: !with_policy,
        kind: Some(kind),
        without_id: !with_identifiable,
        adapters: extra_adapters,
        ..Annotation::default()
    };
    CommandDirective::from_annotation(name, &annotation, &full_config())
        .expect("fixture directive is valid")
}

/// The 16 distinct directives over kind, policy, identifiable variant and
/// extra adapters
///
/// Identifiability only varies for creation; mutations always check identity.
pub(crate) fn directive_matrix() -> Vec<CommandDirective> {
    let variants = [
        (GenerationKind::Create, true),
        (GenerationKind::Create, false),
        (GenerationKind::Update, false),
        (GenerationKind::Remove, false),
    ];
    let mut directives = Vec::new();
    for (kind, with_identifiable) in variants {
        for with_policy in [true, false] {
            for with_extras in [true, false] {
                let extras = if with_extras {
                    vec![balance_service()]
                } else {
                    vec![]
                };
                directives.push(directive(
                    "IncreaseBalance",
                    kind,
                    with_policy,
                    with_identifiable,
                    extras,
                ));
            }
        }
    }
    directives
}

#[test]
fn test_directive_matrix_is_distinct_and_complete() {
    let directives = directive_matrix();
    assert_eq!(directives.len(), 16);
    for (i, a) in directives.iter().enumerate() {
        assert!(directives[i + 1..].iter().all(|b| a != b), "{a:?} repeats");
    }
    assert!(directives.iter().any(|d| d.kind == GenerationKind::Remove));
}
