//! Command directives
//!
//! A directive describes one command handler to generate. Directives come
//! from annotation text of the form `key,value; key2,value2` attached to a
//! command name, usually listed in a TOML manifest:
//!
//! ```toml
//! [[command]]
//! name = "IncreaseBalanceFromSvc"
//! annotation = "topic,balance; adapters,svc:github.com/acme/svc/adapter/balancesvc.Balancer"
//! ```

use std::{fmt, fs, path::Path};

use anyhow::{Context, Result, anyhow, bail};
use log::trace;
use serde::Deserialize;

use crate::{
    config::{ConfigRole, GenerationConfig},
    naming,
    types::{FxIndexSet, NamedAdapterReference, QualifiedReference},
};

/// Handler field holding the policy adapter
pub const POLICER_FIELD: &str = "pol";

/// Handler field holding the aggregate repository
pub const REPOSITORY_FIELD: &str = "agg";

const CREATE_PREFIXES: &[&str] = &["MakeNew", "Create", "Add", "New"];
const REMOVE_PREFIXES: &[&str] = &["Delete", "Remove"];
const WITHOUT_ID_SUFFIXES: &[&str] = &["WithOutId", "WithoutId"];

/// Which repository protocol a command uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationKind {
    /// Construct a new aggregate
    Create,
    /// Load an aggregate and remove it
    Remove,
    /// Load an aggregate and mutate it in place
    Update,
}

impl GenerationKind {
    /// Name of the repository method implementing this kind
    pub fn repository_method(self) -> &'static str {
        match self {
            Self::Create => "Add",
            Self::Remove => "Remove",
            Self::Update => "Update",
        }
    }

    /// Infer the kind from the command name
    pub fn infer(name: &str) -> Self {
        if CREATE_PREFIXES.iter().any(|p| name.starts_with(p)) {
            Self::Create
        } else if REMOVE_PREFIXES.iter().any(|p| name.starts_with(p)) {
            Self::Remove
        } else {
            Self::Update
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "create" | "add" => Ok(Self::Create),
            "remove" | "delete" => Ok(Self::Remove),
            "update" => Ok(Self::Update),
            other => bail!("unknown generation kind `{other}` (expected create, remove or update)"),
        }
    }
}

impl fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "Create",
            Self::Remove => "Remove",
            Self::Update => "Update",
        };
        f.write_str(name)
    }
}

/// Parsed annotation text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub without_policy: bool,
    pub topic: Option<String>,
    pub adapters: Vec<NamedAdapterReference>,
    pub kind: Option<GenerationKind>,
    pub without_id: bool,
    pub without_command_stub: bool,
}

impl Annotation {
    /// Parse `key,value; key2,value2` annotation text
    ///
    /// Recognized keys: bare `w/o policy`, `w/o id`, `w/o command stub`;
    /// `topic,<name>`; `kind,<create|remove|update>`;
    /// `adapters,<name>:<import/path.Type>,...`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut annotation = Self::default();
        for segment in text.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            match segment.split_once(',') {
                None => match segment {
                    "w/o policy" => annotation.without_policy = true,
                    "w/o id" => annotation.without_id = true,
                    "w/o command stub" => annotation.without_command_stub = true,
                    "topic" | "kind" | "adapters" => {
                        bail!("annotation key `{segment}` requires a value")
                    }
                    other => bail!("unknown annotation key `{other}`"),
                },
                Some((key, value)) => match key.trim() {
                    "topic" => {
                        let topic = value.trim();
                        if topic.is_empty() {
                            bail!("annotation key `topic` requires a value");
                        }
                        annotation.topic = Some(topic.to_owned());
                    }
                    "kind" => annotation.kind = Some(GenerationKind::parse(value)?),
                    "adapters" => {
                        for item in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                            annotation.adapters.push(parse_adapter(item)?);
                        }
                    }
                    other => bail!("unknown annotation key `{other}`"),
                },
            }
        }
        trace!("Parsed annotation `{text}` into {annotation:?}");
        Ok(annotation)
    }
}

fn parse_adapter(item: &str) -> Result<NamedAdapterReference> {
    let (name, reference) = item
        .split_once(':')
        .ok_or_else(|| anyhow!("adapter `{item}` is not of the form `name:import/path.Type`"))?;
    let name = name.trim();
    if !is_go_identifier(name) {
        bail!("adapter name `{name}` is not a valid identifier");
    }
    let reference = QualifiedReference::parse(reference)
        .with_context(|| format!("Invalid type for adapter `{name}`"))?;
    Ok(NamedAdapterReference::new(name, reference))
}

fn is_go_identifier(name: &str) -> bool {
    naming::is_identifier(name) && !naming::is_reserved(name)
}

/// Everything the generator needs to know about one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDirective {
    pub name: String,
    pub topic: String,
    pub kind: GenerationKind,
    pub with_policy: bool,
    /// Only meaningful for [`GenerationKind::Create`]
    pub add_with_identifiable: bool,
    pub with_command_stub: bool,
    /// Handler fields in order: policer, repository, extra adapters
    pub adapters: Vec<NamedAdapterReference>,
    /// Adapters passed on to the command's domain `handle`
    pub extra_adapters: Vec<NamedAdapterReference>,
}

impl CommandDirective {
    /// Build the directive for command `name` from its parsed annotation
    pub fn from_annotation(
        name: &str,
        annotation: &Annotation,
        config: &GenerationConfig,
    ) -> Result<Self> {
        if !name.starts_with(|c: char| c.is_ascii_uppercase()) || !is_go_identifier(name) {
            bail!("command name `{name}` is not an exported identifier");
        }

        let kind = annotation
            .kind
            .unwrap_or_else(|| GenerationKind::infer(name));
        let add_with_identifiable = kind == GenerationKind::Create
            && !annotation.without_id
            && !WITHOUT_ID_SUFFIXES.iter().any(|s| name.ends_with(s));
        let with_policy = !annotation.without_policy;

        let mut seen: FxIndexSet<&str> = FxIndexSet::default();
        for adapter in &annotation.adapters {
            let field = adapter.field_name.as_str();
            if field == POLICER_FIELD || field == REPOSITORY_FIELD {
                bail!("adapter name `{field}` of `{name}` is reserved for the handler");
            }
            if naming::is_generated_name(field) {
                bail!("adapter name `{field}` of `{name}` clashes with a name generated code uses");
            }
            if !seen.insert(field) {
                bail!("adapter name `{field}` is declared twice for `{name}`");
            }
        }

        let mut adapters = Vec::with_capacity(annotation.adapters.len() + 2);
        if with_policy {
            let policer = config
                .require(ConfigRole::Policer)
                .with_context(|| format!("Command `{name}` checks policy"))?;
            adapters.push(NamedAdapterReference::new(POLICER_FIELD, policer.clone()));
        }
        let repository = config
            .require(ConfigRole::Repository)
            .with_context(|| format!("Command `{name}` needs a repository"))?;
        adapters.push(NamedAdapterReference::new(
            REPOSITORY_FIELD,
            repository.clone(),
        ));
        adapters.extend(annotation.adapters.iter().cloned());

        Ok(Self {
            name: name.to_owned(),
            topic: annotation
                .topic
                .clone()
                .unwrap_or_else(|| naming::default_topic(name)),
            kind,
            with_policy,
            add_with_identifiable,
            with_command_stub: !annotation.without_command_stub,
            adapters,
            extra_adapters: annotation.adapters.clone(),
        })
    }

    /// Parse `annotation` and build the directive for command `name`
    pub fn parse(name: &str, annotation: &str, config: &GenerationConfig) -> Result<Self> {
        let parsed = Annotation::parse(annotation)
            .with_context(|| format!("Invalid annotation on command `{name}`"))?;
        Self::from_annotation(name, &parsed, config)
    }
}

/// One `[[command]]` table of a manifest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    pub name: String,
    #[serde(default)]
    pub annotation: String,
}

/// A TOML file listing the commands to generate
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectiveManifest {
    /// Overrides the configured package name
    pub package: Option<String>,
    #[serde(default, rename = "command")]
    pub commands: Vec<ManifestEntry>,
}

impl DirectiveManifest {
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse directive manifest")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Invalid manifest: {}", path.display()))
    }

    /// Build a directive for every listed command, in manifest order
    pub fn directives(&self, config: &GenerationConfig) -> Result<Vec<CommandDirective>> {
        let mut seen: FxIndexSet<&str> = FxIndexSet::default();
        self.commands
            .iter()
            .map(|entry| {
                if !seen.insert(entry.name.as_str()) {
                    bail!("command `{}` is listed twice", entry.name);
                }
                CommandDirective::parse(&entry.name, &entry.annotation, config)
            })
            .collect()
    }
}
