/*!
Operation enum for shoestring invocations.

Variants:
  setup / upgrade / reset-data
  renew-certificates / renew-voting-keys
  import-bootstrap (declared, no command mapping)

Helpers:
  - variants()
  - command_name()
  - requires_ca_key()
  - takes_overrides()
  - is_supported()
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::CommandError;

/// Node-management actions understood by the shoestring tool.
#[derive(
    clap::ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, Eq, PartialEq, Hash,
)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    /// Prepare a fresh node directory
    Setup,
    /// Upgrade an existing node to a new package
    Upgrade,
    /// Wipe chain data, keep configuration
    ResetData,
    /// Regenerate TLS certificates from the CA key
    RenewCertificates,
    /// Regenerate voting keys
    RenewVotingKeys,
    /// Import an existing bootstrap node (no command mapping)
    ImportBootstrap,
}

impl Operation {
    /// All variants, in declaration order.
    pub const fn variants() -> &'static [Operation] {
        &[
            Operation::Setup,
            Operation::Upgrade,
            Operation::ResetData,
            Operation::RenewCertificates,
            Operation::RenewVotingKeys,
            Operation::ImportBootstrap,
        ]
    }

    /// Name of the shoestring subcommand, `None` when the operation has no mapping.
    pub fn command_name(&self) -> Option<&'static str> {
        match self {
            Operation::Setup => Some("setup"),
            Operation::Upgrade => Some("upgrade"),
            Operation::ResetData => Some("reset-data"),
            Operation::RenewCertificates => Some("renew-certificates"),
            Operation::RenewVotingKeys => Some("renew-voting-keys"),
            Operation::ImportBootstrap => None,
        }
    }

    /// Whether completing the operation needs the CA private key.
    pub fn requires_ca_key(&self) -> bool {
        matches!(self, Operation::Setup | Operation::RenewCertificates)
    }

    /// Whether the overrides files and package are passed along.
    pub fn takes_overrides(&self) -> bool {
        matches!(self, Operation::Setup | Operation::Upgrade)
    }

    pub fn is_supported(&self) -> bool {
        self.command_name().is_some()
    }

    /// Stable kebab-case identifier (also the CLI value name).
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Setup => "setup",
            Operation::Upgrade => "upgrade",
            Operation::ResetData => "reset-data",
            Operation::RenewCertificates => "renew-certificates",
            Operation::RenewVotingKeys => "renew-voting-keys",
            Operation::ImportBootstrap => "import-bootstrap",
        }
    }
}

/// Free-function form of [`Operation::requires_ca_key`].
pub fn requires_ca_key(operation: Operation) -> bool {
    operation.requires_ca_key()
}

impl FromStr for Operation {
    type Err = CommandError;

    /// Case-insensitive; accepts `_` in place of `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace('_', "-");
        Operation::variants()
            .iter()
            .copied()
            .find(|op| op.as_str() == norm)
            .ok_or_else(|| CommandError::InvalidOperation(s.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/* --------------------------------- Tests ---------------------------------- */
