//! Protocol shapes and the sentinel error taxonomy
//!
//! A directive's flags collapse into one [`ProtocolShape`], computed once and
//! matched exhaustively by every builder. Extra adapters are data, not shape:
//! they change argument lists but never which declarations exist.

use crate::{
    config::ConfigRole,
    directive::{CommandDirective, GenerationKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolShape {
    /// Load, authorize, mutate, persist
    MutateWithPolicy,
    /// Load, mutate, persist
    MutateNoPolicy,
    /// Identifiable command; construct, authorize, persist
    CreateIdentifiedWithPolicy,
    /// Identifiable command; construct, persist
    CreateIdentifiedNoPolicy,
    /// Construct, authorize, persist; returns the new identifier
    CreateWithPolicy,
    /// Construct, persist; returns the new identifier
    CreateNoPolicy,
}

impl ProtocolShape {
    pub const ALL: [Self; 6] = [
        Self::MutateWithPolicy,
        Self::MutateNoPolicy,
        Self::CreateIdentifiedWithPolicy,
        Self::CreateIdentifiedNoPolicy,
        Self::CreateWithPolicy,
        Self::CreateNoPolicy,
    ];

    pub fn of(directive: &CommandDirective) -> Self {
        match (
            directive.kind,
            directive.with_policy,
            directive.add_with_identifiable,
        ) {
            (GenerationKind::Remove | GenerationKind::Update, true, _) => Self::MutateWithPolicy,
            (GenerationKind::Remove | GenerationKind::Update, false, _) => Self::MutateNoPolicy,
            (GenerationKind::Create, true, true) => Self::CreateIdentifiedWithPolicy,
            (GenerationKind::Create, false, true) => Self::CreateIdentifiedNoPolicy,
            (GenerationKind::Create, true, false) => Self::CreateWithPolicy,
            (GenerationKind::Create, false, false) => Self::CreateNoPolicy,
        }
    }

    pub fn has_policy(self) -> bool {
        match self {
            Self::MutateWithPolicy | Self::CreateIdentifiedWithPolicy | Self::CreateWithPolicy => {
                true
            }
            Self::MutateNoPolicy | Self::CreateIdentifiedNoPolicy | Self::CreateNoPolicy => false,
        }
    }

    /// Whether the command must be identifiable before anything else happens
    ///
    /// Plain creation has no prior identity to check.
    pub fn checks_identity(self) -> bool {
        match self {
            Self::MutateWithPolicy
            | Self::MutateNoPolicy
            | Self::CreateIdentifiedWithPolicy
            | Self::CreateIdentifiedNoPolicy => true,
            Self::CreateWithPolicy | Self::CreateNoPolicy => false,
        }
    }

    pub fn is_create(self) -> bool {
        match self {
            Self::MutateWithPolicy | Self::MutateNoPolicy => false,
            Self::CreateIdentifiedWithPolicy
            | Self::CreateIdentifiedNoPolicy
            | Self::CreateWithPolicy
            | Self::CreateNoPolicy => true,
        }
    }

    /// Whether `Handle` hands the repository-assigned identifier back
    pub fn returns_identifier(self) -> bool {
        match self {
            Self::CreateWithPolicy | Self::CreateNoPolicy => true,
            Self::MutateWithPolicy
            | Self::MutateNoPolicy
            | Self::CreateIdentifiedWithPolicy
            | Self::CreateIdentifiedNoPolicy => false,
        }
    }

    /// Sentinels the generated unit declares, in declaration order
    pub fn sentinels(self) -> Vec<SentinelKind> {
        SentinelKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                SentinelKind::Authorization => self.has_policy(),
                SentinelKind::Identification => self.checks_identity(),
                SentinelKind::Repository | SentinelKind::Domain => true,
            })
            .collect()
    }

    /// Sentinels that cross the repository callback boundary unchanged
    pub fn passthrough_sentinels(self) -> Vec<SentinelKind> {
        self.sentinels()
            .into_iter()
            .filter(|kind| kind.raised_in_callback() && kind.propagation() == Propagation::Opaque)
            .collect()
    }

    /// References the generated unit cannot do without
    pub fn required_roles(self) -> Vec<ConfigRole> {
        let mut roles = vec![ConfigRole::Entity, ConfigRole::Repository];
        if self.has_policy() {
            roles.push(ConfigRole::Policer);
        }
        if self.returns_identifier() {
            roles.push(ConfigRole::Identifier);
        }
        roles.extend(
            self.sentinels()
                .into_iter()
                .map(SentinelKind::constructor_role),
        );
        roles
    }

    /// References the stub unit cannot do without
    pub fn stub_required_roles(self, with_command_stub: bool) -> Vec<ConfigRole> {
        let mut roles = vec![ConfigRole::Entity];
        if with_command_stub {
            roles.extend([
                ConfigRole::Identifier,
                ConfigRole::User,
                ConfigRole::ElevationToken,
            ]);
        }
        if self.checks_identity() {
            roles.extend([ConfigRole::Identifier, ConfigRole::Identifiable]);
        }
        if self.has_policy() {
            roles.extend([
                ConfigRole::User,
                ConfigRole::ElevationToken,
                ConfigRole::Policeable,
            ]);
        }
        roles.sort();
        roles.dedup();
        roles
    }
}

/// How a failure travels from where it is raised to the caller of `Handle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Propagation {
    /// Returned exactly as raised, so callers can compare identities
    Opaque,
    /// The repository's own error, wrapped with the sentinel as context
    Wrapped,
}

/// The four failure categories of a generated handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentinelKind {
    Authorization,
    Identification,
    Repository,
    Domain,
}

impl SentinelKind {
    pub const ALL: [Self; 4] = [
        Self::Authorization,
        Self::Identification,
        Self::Repository,
        Self::Domain,
    ];

    /// Variable name of this sentinel for `command`
    pub fn name(self, command: &str) -> String {
        match self {
            Self::Authorization => format!("ErrNotAuthorizedTo{command}"),
            Self::Identification => format!("Err{command}NotIdentifiable"),
            Self::Repository => format!("Err{command}FailedInRepository"),
            Self::Domain => format!("Err{command}FailedInDomain"),
        }
    }

    pub fn doc(self, command: &str) -> String {
        let name = self.name(command);
        match self {
            Self::Authorization => format!(
                "{name} signals that the caller is not authorized to perform {command}"
            ),
            Self::Identification => {
                format!("{name} signals that {command}'s command object was not identifiable")
            }
            Self::Repository => {
                format!("{name} signals that {command} failed in the repository layer")
            }
            Self::Domain => format!("{name} signals that {command} failed in the domain layer"),
        }
    }

    /// Configured error constructor that builds this sentinel
    pub fn constructor_role(self) -> ConfigRole {
        match self {
            Self::Authorization => ConfigRole::AuthorizationErrorNew,
            Self::Identification => ConfigRole::IdentificationErrorNew,
            Self::Repository => ConfigRole::RepositoryErrorNew,
            Self::Domain => ConfigRole::DomainErrorNew,
        }
    }

    pub fn propagation(self) -> Propagation {
        match self {
            Self::Authorization | Self::Identification | Self::Domain => Propagation::Opaque,
            Self::Repository => Propagation::Wrapped,
        }
    }

    /// Raised inside the repository callback rather than before or after it
    pub fn raised_in_callback(self) -> bool {
        match self {
            Self::Authorization | Self::Domain => true,
            Self::Identification | Self::Repository => false,
        }
    }
}
