//! Tests for the configuration module

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use super::*;

const FULL_CONFIG: &str = r#"
entity = "github.com/acme/svc/domain/account.Account"
policeable = "github.com/acme/svc/app.Policeable"
identifiable = "github.com/acme/svc/app.Identifiable"
repository = "github.com/acme/svc/app/repository.Repository"
policer = "github.com/acme/svc/app/policy.Policer"
identifier = "github.com/acme/svc/domain.Identifier"
user = "github.com/acme/svc/domain.User"
elevationToken = "github.com/acme/svc/domain.ElevationToken"
authorizationErrorNew = "github.com/acme/svc/app/error.NewAuthorizationError"
identificationErrorNew = "github.com/acme/svc/app/error.NewIdentificationError"
repositoryErrorNew = "github.com/acme/svc/app/error.NewRepositoryError"
storageSavingErrorNew = "github.com/acme/svc/app/error.NewStorageSavingError"
domainErrorNew = "github.com/acme/svc/app/error.NewDomainError"
"#;

#[test]
fn test_resolve_full_config() {
    let file = ConfigFile::parse(FULL_CONFIG).unwrap();
    let config = GenerationConfig::resolve(&file).unwrap();

    for role in ConfigRole::ALL {
        assert!(config.reference(role).is_some(), "role {role} should resolve");
    }
    assert_eq!(
        config.require(ConfigRole::Entity).unwrap(),
        &QualifiedReference::new("github.com/acme/svc/domain/account", "Account")
    );
    assert_eq!(config.package, DEFAULT_PACKAGE);
    assert_eq!(config.generator, DEFAULT_GENERATOR);
    assert_eq!(config.error_classification, ErrorClassification::Chain);
}

#[test]
fn test_legacy_key_aliases() {
    let file = ConfigFile::parse(
        r#"
targetIdentificationErrorNew = "github.com/acme/errors.NewTargetIdentificationError"
storageLoadingErrorNew = "github.com/acme/errors.NewStorageLoadingError"
"#,
    )
    .unwrap();
    let config = GenerationConfig::resolve(&file).unwrap();
    assert_eq!(
        config
            .require(ConfigRole::IdentificationErrorNew)
            .unwrap()
            .local_name,
        "NewTargetIdentificationError"
    );
    assert_eq!(
        config
            .require(ConfigRole::RepositoryErrorNew)
            .unwrap()
            .local_name,
        "NewStorageLoadingError"
    );
}

#[test]
fn test_unknown_keys_are_rejected() {
    assert!(ConfigFile::parse("entiy = \"a/b.C\"").is_err());
}

#[test]
fn test_malformed_reference_names_the_key() {
    let file = ConfigFile::parse("policer = \"Policer\"").unwrap();
    let err = GenerationConfig::resolve(&file).unwrap_err();
    assert!(format!("{err:#}").contains("`policer`"));
}

#[test]
fn test_reference_without_name_names_the_key() {
    let file =
        ConfigFile::parse("authorizationErrorNew = \"github.com/acme/svc/app/errors\"").unwrap();
    let err = GenerationConfig::resolve(&file).unwrap_err();
    assert!(format!("{err:#}").contains("`authorizationErrorNew`"));
}

#[test]
fn test_require_reports_missing_role() {
    let config = GenerationConfig::default();
    let err = config.require(ConfigRole::DomainErrorNew).unwrap_err();
    assert_eq!(
        err.to_string(),
        "missing required configuration reference `domainErrorNew`"
    );
}

#[test]
fn test_require_all_lists_every_missing_role() {
    let config = GenerationConfig::default().with_reference(
        ConfigRole::Entity,
        QualifiedReference::new("github.com/acme/account", "Account"),
    );
    let err = config
        .require_all(&[
            ConfigRole::Entity,
            ConfigRole::Repository,
            ConfigRole::DomainErrorNew,
        ])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "missing required configuration references: repository, domainErrorNew"
    );
    assert!(config.require_all(&[ConfigRole::Entity]).is_ok());
}

#[test]
fn test_error_classification_option() {
    let file = ConfigFile::parse("errorClassification = \"outcome\"\npackage = \"cmd\"").unwrap();
    let config = GenerationConfig::resolve(&file).unwrap();
    assert_eq!(config.error_classification, ErrorClassification::Outcome);
    assert_eq!(config.package, "cmd");
}

#[test]
fn test_later_layers_override_earlier_ones() {
    let temp_dir = TempDir::new().unwrap();
    let user_file = temp_dir.path().join("user.toml");
    let project_file = temp_dir.path().join(PROJECT_CONFIG_FILE);

    fs::write(
        &user_file,
        "entity = \"github.com/acme/old.Account\"\ngenerator = \"my-gen\"\n",
    )
    .unwrap();
    fs::write(&project_file, FULL_CONFIG).unwrap();

    let config = GenerationConfig::load_layers(&[user_file, project_file]).unwrap();
    assert_eq!(
        config.require(ConfigRole::Entity).unwrap().origin_path,
        "github.com/acme/svc/domain/account"
    );
    // Keys only the user layer sets survive the merge
    assert_eq!(config.generator, "my-gen");
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.toml");
    let err = GenerationConfig::load_layers(&[missing]).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}
