use std::sync::Arc;

use crate::error::{AdminError, AdminResult};
use crate::models::{split_address, Forwarding};
use crate::store::gateway::text_column;
use crate::store::{Statement, StoreGateway};

use super::mailbox::MailboxReader;

// ============================================================================
// Forwarding Store
// ============================================================================
//
// All forwarding kinds share the `forwardings` table:
// - mailbox forwarding: address is a mailbox, is_forwarding = 1
// - catch-all:          address is the bare domain, is_forwarding = 1
// - alias member:       address is an alias, is_alias = 1
//
// ============================================================================

const SELECT: &str = "SELECT address, forwarding FROM forwardings";
const ACTIVE_FORWARDING: &str =
    "is_forwarding = 1 AND active = 1 AND is_alias = 0 AND is_maillist = 0";

/// Which forwarding rows to load
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardingQuery {
    /// Every mailbox forwarding, catch-alls excluded
    All,
    /// Mailbox forwardings whose source lives in the domain
    ByDomain(String),
    CatchallByDomain(String),
    AliasMembers(String),
}

impl ForwardingQuery {
    fn statement(&self) -> Statement {
        let order = "ORDER BY address ASC, forwarding ASC";
        match self {
            ForwardingQuery::All => Statement::new(format!(
                "{} WHERE is_forwarding = 1 AND address <> domain {}",
                SELECT, order
            )),
            ForwardingQuery::ByDomain(domain) => Statement::new(format!(
                "{} WHERE domain = ? AND is_forwarding = 1 AND address <> domain {}",
                SELECT, order
            ))
            .bind(domain.as_str()),
            ForwardingQuery::CatchallByDomain(domain) => Statement::new(format!(
                "{} WHERE address = ? AND address = domain AND is_forwarding = 1 {}",
                SELECT, order
            ))
            .bind(domain.as_str()),
            ForwardingQuery::AliasMembers(address) => Statement::new(format!(
                "{} WHERE address = ? AND is_alias = 1 {}",
                SELECT, order
            ))
            .bind(address.as_str()),
        }
    }
}

pub struct ForwardingStore {
    store: Arc<StoreGateway>,
    mailboxes: MailboxReader,
}

impl ForwardingStore {
    pub fn new(store: Arc<StoreGateway>) -> Self {
        Self {
            mailboxes: MailboxReader::new(store.clone()),
            store,
        }
    }

    pub async fn query(&self, query: &ForwardingQuery) -> AdminResult<Vec<Forwarding>> {
        let rows = self.store.query(&query.statement()).await?;

        let mut forwardings = Vec::with_capacity(rows.len());
        for row in &rows {
            forwardings.push(Forwarding {
                address: text_column(row, "address")?,
                forwarding: text_column(row, "forwarding")?,
            });
        }

        Ok(forwardings)
    }

    /// Whether an active, plain (non-alias, non-maillist) forwarding pair exists
    pub async fn exists(&self, address: &str, target: &str) -> AdminResult<bool> {
        let probe = Statement::new(format!(
            "SELECT COUNT(*) FROM forwardings WHERE address = ? AND forwarding = ? AND {}",
            ACTIVE_FORWARDING
        ))
        .bind(address)
        .bind(target);
        Ok(self.store.exists(&probe).await?)
    }

    /// Forward mail of an existing mailbox to `target`
    pub async fn add(&self, address: &str, target: &str) -> AdminResult<()> {
        let domain = domain_of(address)?;
        let dest_domain = domain_of(target)?;

        if !self.mailboxes.exists(address).await? {
            return Err(AdminError::MailboxNotFound(address.to_string()));
        }

        if self.exists(address, target).await? {
            return Err(AdminError::ForwardingExists {
                address: address.to_string(),
                target: target.to_string(),
            });
        }

        self.insert(address, target, domain, dest_domain).await?;

        tracing::info!(address = %address, target = %target, "✅ Added forwarding");
        Ok(())
    }

    pub async fn delete(&self, address: &str, target: &str) -> AdminResult<()> {
        let affected = self
            .store
            .exec(
                &Statement::new(format!(
                    "DELETE FROM forwardings WHERE address = ? AND forwarding = ? AND {}",
                    ACTIVE_FORWARDING
                ))
                .bind(address)
                .bind(target),
            )
            .await?;

        if affected == 0 {
            return Err(AdminError::ForwardingNotFound {
                address: address.to_string(),
                target: target.to_string(),
            });
        }

        tracing::info!(address = %address, target = %target, "Deleted forwarding");
        Ok(())
    }

    /// Catch-all for a domain; the caller has checked the domain exists
    pub async fn add_catchall(&self, domain: &str, target: &str) -> AdminResult<()> {
        let dest_domain = domain_of(target)?;

        if self.exists(domain, target).await? {
            return Err(AdminError::CatchallExists {
                domain: domain.to_string(),
                target: target.to_string(),
            });
        }

        self.insert(domain, target, domain, dest_domain).await?;

        tracing::info!(domain = %domain, target = %target, "✅ Added catch-all");
        Ok(())
    }

    pub async fn delete_catchall(&self, domain: &str, target: &str) -> AdminResult<()> {
        let affected = self
            .store
            .exec(
                &Statement::new(
                    "DELETE FROM forwardings
                     WHERE address = ? AND forwarding = ?
                     AND address = domain AND is_forwarding = 1",
                )
                .bind(domain)
                .bind(target),
            )
            .await?;

        if affected == 0 {
            return Err(AdminError::CatchallNotFound {
                domain: domain.to_string(),
                target: target.to_string(),
            });
        }

        tracing::info!(domain = %domain, target = %target, "Deleted catch-all");
        Ok(())
    }

    pub async fn delete_all_catchalls(&self, domain: &str) -> AdminResult<u64> {
        let affected = self
            .store
            .exec(
                &Statement::new(
                    "DELETE FROM forwardings
                     WHERE address = ? AND address = domain AND is_forwarding = 1",
                )
                .bind(domain),
            )
            .await?;

        tracing::debug!(domain = %domain, count = affected, "Cleared catch-all forwardings");
        Ok(affected)
    }

    async fn insert(
        &self,
        address: &str,
        target: &str,
        domain: &str,
        dest_domain: &str,
    ) -> AdminResult<()> {
        self.store
            .exec(
                &Statement::new(
                    "INSERT INTO forwardings
                     (address, forwarding, domain, dest_domain,
                      is_forwarding, active, is_alias, is_maillist)
                     VALUES (?, ?, ?, ?, 1, 1, 0, 0)",
                )
                .bind(address)
                .bind(target)
                .bind(domain)
                .bind(dest_domain),
            )
            .await?;
        Ok(())
    }
}

/// Domain part of a well-formed `local@domain` address
fn domain_of(address: &str) -> AdminResult<&str> {
    split_address(address)
        .map(|(_, domain)| domain)
        .ok_or_else(|| AdminError::InvalidAddress(address.to_string()))
}

// ============================================================================
// Unit Tests
// ============================================================================
