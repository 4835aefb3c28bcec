// ============================================================================
// Entity Stores - Mailboxes, Aliases, Domain Aliases, Forwardings
// ============================================================================
//
// Each store resolves rows of one table into typed records. Mailboxes and
// aliases are read-only here; domain aliases and forwardings can also be
// added and removed.
//
// ============================================================================

pub mod alias;
pub mod domain_alias;
pub mod forwarding;
pub mod mailbox;

pub use alias::{AliasQuery, AliasReader};
pub use domain_alias::{DomainAliasQuery, DomainAliasStore};
pub use forwarding::{ForwardingQuery, ForwardingStore};
pub use mailbox::{MailboxQuery, MailboxReader};
