pub mod accounts;
pub mod catchall;
pub mod domain;
pub mod domain_alias;
pub mod forwarding;
mod output;

use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::config::{AdminConfig, DatabaseConfig, DEFAULT_DOMAIN_SETTINGS};
use crate::domain::DomainManager;
use crate::entities::{AliasReader, DomainAliasStore, ForwardingStore, MailboxReader};
use crate::store::StoreGateway;

#[derive(Parser)]
#[command(name = "iredmail-admin")]
#[command(about = "Manage domains, aliases and forwardings of an iRedMail server.")]
pub struct CommandLine {
    /// Connection URL of the vmail database (mysql://, postgres:// or sqlite:)
    #[arg(long, env = "IREDMAIL_DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Maximum pooled connections
    #[arg(long, default_value_t = 2)]
    pub max_connections: u32,

    /// Seconds to wait for a free connection
    #[arg(long, default_value_t = 30)]
    pub acquire_timeout: u64,

    /// Settings stored for domains added without explicit settings
    #[arg(long, env = "IREDMAIL_DEFAULT_DOMAIN_SETTINGS", default_value = DEFAULT_DOMAIN_SETTINGS)]
    pub default_domain_settings: String,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn admin_config(&self) -> AdminConfig {
        let database = DatabaseConfig::new(self.database_url.as_str())
            .with_max_connections(self.max_connections)
            .with_acquire_timeout(Duration::from_secs(self.acquire_timeout));
        AdminConfig::new(database)
            .with_default_domain_settings(self.default_domain_settings.as_str())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add, delete and inspect domains
    #[command(subcommand, alias = "d")]
    Domain(DomainCommand),
    /// Add, delete and list domain aliases
    #[command(subcommand, alias = "da")]
    DomainAlias(DomainAliasCommand),
    /// Add and delete catch-all forwardings
    #[command(subcommand, alias = "c")]
    Catchall(CatchallCommand),
    /// Add, delete and list mailbox forwardings
    #[command(subcommand, alias = "f")]
    Forwarding(ForwardingCommand),
    /// List mailboxes
    #[command(subcommand, alias = "m")]
    Mailbox(ListCommand),
    /// List aliases
    #[command(subcommand, alias = "a")]
    Alias(ListCommand),
}

#[derive(Args, Clone, Debug, Default)]
pub struct ListArgs {
    /// Only show entries containing this text (case-sensitive)
    #[arg(short, long, default_value = "")]
    pub filter: String,
    /// Only show entries of this domain
    #[arg(long)]
    pub domain: Option<String>,
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum DomainCommand {
    /// List domains with their aliases and catch-alls
    List(ListArgs),
    /// Show a single domain
    Info {
        domain: String,
        #[arg(long)]
        json: bool,
    },
    /// Add a domain
    Add {
        domain: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long, default_value = "")]
        settings: String,
    },
    /// Delete a domain without mailboxes or aliases
    Delete { domain: String },
}

#[derive(Subcommand)]
pub enum DomainAliasCommand {
    List(ListArgs),
    /// Route an alias domain to an existing domain
    Add { alias: String, domain: String },
    Delete { alias: String },
}

#[derive(Subcommand)]
pub enum CatchallCommand {
    /// Forward otherwise undeliverable mail of a domain
    Add { domain: String, target: String },
    Delete { domain: String, target: String },
}

#[derive(Subcommand)]
pub enum ForwardingCommand {
    List(ListArgs),
    /// Forward mail of a mailbox to another address
    Add { address: String, target: String },
    Delete { address: String, target: String },
}

#[derive(Subcommand)]
pub enum ListCommand {
    List(ListArgs),
}

// ============================================================================
// Services - wired once per invocation
// ============================================================================

pub struct Services {
    pub domains: DomainManager,
    pub domain_aliases: DomainAliasStore,
    pub forwardings: ForwardingStore,
    pub mailboxes: MailboxReader,
    pub aliases: AliasReader,
}

impl Services {
    pub fn new(store: Arc<StoreGateway>, config: &AdminConfig) -> Self {
        Self {
            domains: DomainManager::new(store.clone(), config.default_domain_settings.as_str()),
            domain_aliases: DomainAliasStore::new(store.clone()),
            forwardings: ForwardingStore::new(store.clone()),
            mailboxes: MailboxReader::new(store.clone()),
            aliases: AliasReader::new(store),
        }
    }
}

pub async fn run(command: Commands, services: &Services) -> anyhow::Result<()> {
    match command {
        Commands::Domain(cmd) => domain::run(cmd, services).await,
        Commands::DomainAlias(cmd) => domain_alias::run(cmd, services).await,
        Commands::Catchall(cmd) => catchall::run(cmd, services).await,
        Commands::Forwarding(cmd) => forwarding::run(cmd, services).await,
        Commands::Mailbox(ListCommand::List(args)) => {
            accounts::list_mailboxes(&args, services).await
        }
        Commands::Alias(ListCommand::List(args)) => accounts::list_aliases(&args, services).await,
    }
}
