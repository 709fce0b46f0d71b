//! CLI argument definitions for certvault.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands.

use std::path::PathBuf;

use certvault_client::{CredentialInputs, VaultOperation};
use clap::{Args, Parser, Subcommand};

/// certvault -- authenticated client for the certvault secret service.
#[derive(Parser)]
#[command(
    name = "certvault",
    version,
    about = "certvault -- store and fetch secrets with certificate-bound credentials",
    long_about = "Every operation sends the client certificate, the policy document and the \
                  unseal passphrase to the vault server along with the operation's own fields."
)]
pub struct Cli {
    /// Vault API base URL. Overrides VAULT_API_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub credentials: CredentialArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Credential material sent with every authenticated operation.
#[derive(Args)]
pub struct CredentialArgs {
    /// Client certificate PEM file.
    #[arg(long, global = true, env = "VAULT_CERT_PATH")]
    pub cert: Option<PathBuf>,

    /// Policy JSON file.
    #[arg(long, global = true, env = "VAULT_POLICIES_PATH")]
    pub policy: Option<PathBuf>,

    /// Unseal passphrase.
    #[arg(long, global = true, env = "VAULT_PASSPHRASE", hide_env_values = true)]
    pub passphrase: Option<String>,
}

impl CredentialArgs {
    /// Convert to client inputs. Missing values stay missing; the client
    /// reports them.
    pub fn to_inputs(&self) -> CredentialInputs {
        CredentialInputs {
            certificate: self.cert.clone(),
            policy: self.policy.clone(),
            passphrase: self.passphrase.clone().unwrap_or_default(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store a secret.
    Put {
        /// Secret path, e.g. `app/db/password`.
        path: String,
        /// Secret value.
        secret: String,
    },

    /// Fetch a secret and print it to stdout.
    Get {
        /// Secret path.
        path: String,
    },

    /// List secret paths under a prefix.
    List {
        /// Path prefix. Empty lists everything the policy allows.
        #[arg(default_value = "")]
        prefix: String,
    },

    /// Delete a secret.
    Delete {
        /// Secret path.
        path: String,
    },

    /// Check that the vault server is up.
    Health,
}

impl Commands {
    /// The authenticated operation for this command, if it is one.
    pub fn operation(&self) -> Option<VaultOperation> {
        match self {
            Self::Put { path, secret } => Some(VaultOperation::Put {
                path: path.clone(),
                secret: secret.clone(),
            }),
            Self::Get { path } => Some(VaultOperation::Get { path: path.clone() }),
            Self::List { prefix } => Some(VaultOperation::List {
                prefix: prefix.clone(),
            }),
            Self::Delete { path } => Some(VaultOperation::Delete { path: path.clone() }),
            Self::Health => None,
        }
    }
}
