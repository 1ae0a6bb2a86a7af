//! Generator configuration
//!
//! Configuration is read from TOML files whose values are dotted references
//! (`import/path.Name`). Files are layered: the user-level file is read
//! first, the project file second, and keys set in a later layer override
//! earlier ones. The merged file is then resolved into a
//! [`GenerationConfig`] holding parsed [`QualifiedReference`]s keyed by role.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use etcetera::{BaseStrategy, choose_base_strategy};
use log::debug;
use serde::Deserialize;

use crate::types::{FxIndexMap, QualifiedReference};

/// Project configuration file looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "ddd-config.toml";

/// Tool name written into provenance headers
pub const DEFAULT_GENERATOR: &str = "ddd-gen app command";

pub const DEFAULT_PACKAGE: &str = "command";

/// The role a configured reference plays in generated code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigRole {
    /// Aggregate entity the commands operate on
    Entity,
    Policeable,
    Identifiable,
    Repository,
    Policer,
    Identifier,
    User,
    ElevationToken,
    AuthorizationErrorNew,
    IdentificationErrorNew,
    RepositoryErrorNew,
    StorageSavingErrorNew,
    DomainErrorNew,
}

impl ConfigRole {
    pub const ALL: [Self; 13] = [
        Self::Entity,
        Self::Policeable,
        Self::Identifiable,
        Self::Repository,
        Self::Policer,
        Self::Identifier,
        Self::User,
        Self::ElevationToken,
        Self::AuthorizationErrorNew,
        Self::IdentificationErrorNew,
        Self::RepositoryErrorNew,
        Self::StorageSavingErrorNew,
        Self::DomainErrorNew,
    ];

    /// Key of this role in the configuration file
    pub fn key(self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Policeable => "policeable",
            Self::Identifiable => "identifiable",
            Self::Repository => "repository",
            Self::Policer => "policer",
            Self::Identifier => "identifier",
            Self::User => "user",
            Self::ElevationToken => "elevationToken",
            Self::AuthorizationErrorNew => "authorizationErrorNew",
            Self::IdentificationErrorNew => "identificationErrorNew",
            Self::RepositoryErrorNew => "repositoryErrorNew",
            Self::StorageSavingErrorNew => "storageSavingErrorNew",
            Self::DomainErrorNew => "domainErrorNew",
        }
    }
}

impl fmt::Display for ConfigRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How generated `Handle` methods tell policy, domain and storage failures apart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorClassification {
    /// Inspect the repository's error cause chain for the sentinels
    #[default]
    Chain,
    /// Capture the callback's failure and report success as a `bool`
    Outcome,
}

/// Raw contents of one configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    pub entity: Option<String>,
    pub policeable: Option<String>,
    pub identifiable: Option<String>,
    pub repository: Option<String>,
    pub policer: Option<String>,
    pub identifier: Option<String>,
    pub user: Option<String>,
    pub elevation_token: Option<String>,
    pub authorization_error_new: Option<String>,
    #[serde(alias = "targetIdentificationErrorNew")]
    pub identification_error_new: Option<String>,
    #[serde(alias = "storageLoadingErrorNew")]
    pub repository_error_new: Option<String>,
    pub storage_saving_error_new: Option<String>,
    pub domain_error_new: Option<String>,
    pub package: Option<String>,
    pub generator: Option<String>,
    pub error_classification: Option<ErrorClassification>,
}

impl ConfigFile {
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse configuration")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Overlay the keys set in `other` on top of `self`
    pub fn merge(&mut self, other: Self) {
        macro_rules! overlay {
            ($($field:ident),* $(,)?) => {
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field;
                    }
                )*
            };
        }
        overlay!(
            entity,
            policeable,
            identifiable,
            repository,
            policer,
            identifier,
            user,
            elevation_token,
            authorization_error_new,
            identification_error_new,
            repository_error_new,
            storage_saving_error_new,
            domain_error_new,
            package,
            generator,
            error_classification,
        );
    }

    fn raw(&self, role: ConfigRole) -> Option<&str> {
        let value = match role {
            ConfigRole::Entity => &self.entity,
            ConfigRole::Policeable => &self.policeable,
            ConfigRole::Identifiable => &self.identifiable,
            ConfigRole::Repository => &self.repository,
            ConfigRole::Policer => &self.policer,
            ConfigRole::Identifier => &self.identifier,
            ConfigRole::User => &self.user,
            ConfigRole::ElevationToken => &self.elevation_token,
            ConfigRole::AuthorizationErrorNew => &self.authorization_error_new,
            ConfigRole::IdentificationErrorNew => &self.identification_error_new,
            ConfigRole::RepositoryErrorNew => &self.repository_error_new,
            ConfigRole::StorageSavingErrorNew => &self.storage_saving_error_new,
            ConfigRole::DomainErrorNew => &self.domain_error_new,
        };
        value.as_deref()
    }
}

/// Resolved configuration consumed by the code generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    references: FxIndexMap<ConfigRole, QualifiedReference>,
    pub package: String,
    pub generator: String,
    pub error_classification: ErrorClassification,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            references: FxIndexMap::default(),
            package: DEFAULT_PACKAGE.to_owned(),
            generator: DEFAULT_GENERATOR.to_owned(),
            error_classification: ErrorClassification::default(),
        }
    }
}

impl GenerationConfig {
    /// Parse every reference present in `file`
    pub fn resolve(file: &ConfigFile) -> Result<Self> {
        let mut config = Self::default();
        for role in ConfigRole::ALL {
            if let Some(raw) = file.raw(role) {
                let reference = QualifiedReference::parse(raw)
                    .with_context(|| format!("Invalid value for config key `{role}`"))?;
                config.references.insert(role, reference);
            }
        }
        if let Some(package) = &file.package {
            config.package.clone_from(package);
        }
        if let Some(generator) = &file.generator {
            config.generator.clone_from(generator);
        }
        if let Some(classification) = file.error_classification {
            config.error_classification = classification;
        }
        Ok(config)
    }

    /// Load the user-level file (if any) and the project file
    ///
    /// With `explicit` set, that file must exist and replaces the lookup of
    /// [`PROJECT_CONFIG_FILE`] in the working directory.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut layers = Vec::new();
        if let Some(user_file) = user_config_path()
            && user_file.is_file()
        {
            layers.push(user_file);
        }
        match explicit {
            Some(path) => layers.push(path.to_path_buf()),
            None => {
                let project_file = PathBuf::from(PROJECT_CONFIG_FILE);
                if project_file.is_file() {
                    layers.push(project_file);
                }
            }
        }
        Self::load_layers(&layers)
    }

    /// Merge the given files in order and resolve the result
    pub fn load_layers(paths: &[PathBuf]) -> Result<Self> {
        let mut merged = ConfigFile::default();
        for path in paths {
            debug!("Loading config layer {}", path.display());
            merged.merge(ConfigFile::from_path(path)?);
        }
        Self::resolve(&merged)
    }

    pub fn with_reference(mut self, role: ConfigRole, reference: QualifiedReference) -> Self {
        self.references.insert(role, reference);
        self
    }

    pub fn without_reference(mut self, role: ConfigRole) -> Self {
        self.references.shift_remove(&role);
        self
    }

    pub fn with_error_classification(mut self, classification: ErrorClassification) -> Self {
        self.error_classification = classification;
        self
    }

    pub fn reference(&self, role: ConfigRole) -> Option<&QualifiedReference> {
        self.references.get(&role)
    }

    pub fn require(&self, role: ConfigRole) -> Result<&QualifiedReference> {
        match self.references.get(&role) {
            Some(reference) => Ok(reference),
            None => bail!("missing required configuration reference `{role}`"),
        }
    }

    /// Fail with every missing role listed when any of `roles` is absent
    pub fn require_all(&self, roles: &[ConfigRole]) -> Result<()> {
        let missing: Vec<&str> = roles
            .iter()
            .filter(|role| !self.references.contains_key(*role))
            .map(|role| role.key())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            bail!(
                "missing required configuration references: {}",
                missing.join(", ")
            )
        }
    }
}

/// `<user config dir>/ddd-gen/config.toml`, if a home directory is known
pub fn user_config_path() -> Option<PathBuf> {
    match choose_base_strategy() {
        Ok(strategy) => Some(strategy.config_dir().join("ddd-gen").join("config.toml")),
        Err(err) => {
            debug!("No user config directory: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests;
