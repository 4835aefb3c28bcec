use std::sync::Arc;

use crate::error::{AdminError, AdminResult};
use crate::models::{is_valid_domain_name, DomainAlias};
use crate::store::gateway::text_column;
use crate::store::{Statement, StoreGateway};

/// Which domain alias rows to load
#[derive(Debug, Clone, PartialEq)]
pub enum DomainAliasQuery {
    All,
    /// Aliases pointing at a primary domain
    ByDomain(String),
}

impl DomainAliasQuery {
    fn statement(&self) -> Statement {
        let select = "SELECT alias_domain, target_domain FROM alias_domain";
        let order = "ORDER BY alias_domain ASC";
        match self {
            DomainAliasQuery::All => Statement::new(format!("{} {}", select, order)),
            DomainAliasQuery::ByDomain(domain) => {
                Statement::new(format!("{} WHERE target_domain = ? {}", select, order))
                    .bind(domain.as_str())
            }
        }
    }
}

pub struct DomainAliasStore {
    store: Arc<StoreGateway>,
}

impl DomainAliasStore {
    pub fn new(store: Arc<StoreGateway>) -> Self {
        Self { store }
    }

    pub async fn query(&self, query: &DomainAliasQuery) -> AdminResult<Vec<DomainAlias>> {
        let rows = self.store.query(&query.statement()).await?;

        let mut aliases = Vec::with_capacity(rows.len());
        for row in &rows {
            aliases.push(DomainAlias {
                alias: text_column(row, "alias_domain")?,
                domain: text_column(row, "target_domain")?,
            });
        }

        Ok(aliases)
    }

    /// Route `alias` to the existing primary `domain`
    pub async fn add(&self, alias: &str, domain: &str) -> AdminResult<()> {
        if !is_valid_domain_name(alias) {
            return Err(AdminError::InvalidDomain(alias.to_string()));
        }

        let domain_probe =
            |name: &str| Statement::new("SELECT COUNT(*) FROM domain WHERE domain = ?").bind(name);

        if !self.store.exists(&domain_probe(domain)).await? {
            return Err(AdminError::DomainNotFound(domain.to_string()));
        }
        if self.store.exists(&domain_probe(alias)).await? {
            return Err(AdminError::DomainExists(alias.to_string()));
        }

        let alias_probe =
            Statement::new("SELECT COUNT(*) FROM alias_domain WHERE alias_domain = ?").bind(alias);
        if self.store.exists(&alias_probe).await? {
            return Err(AdminError::DomainAliasExists(alias.to_string()));
        }

        self.store
            .exec(
                &Statement::new(
                    "INSERT INTO alias_domain (alias_domain, target_domain, active)
                     VALUES (?, ?, 1)",
                )
                .bind(alias)
                .bind(domain),
            )
            .await?;

        tracing::info!(alias = %alias, domain = %domain, "✅ Added domain alias");
        Ok(())
    }

    pub async fn delete(&self, alias: &str) -> AdminResult<()> {
        let affected = self
            .store
            .exec(&Statement::new("DELETE FROM alias_domain WHERE alias_domain = ?").bind(alias))
            .await?;

        if affected == 0 {
            return Err(AdminError::DomainAliasNotFound(alias.to_string()));
        }

        tracing::info!(alias = %alias, "Deleted domain alias");
        Ok(())
    }

    pub async fn delete_all_by_domain(&self, domain: &str) -> AdminResult<u64> {
        let affected = self
            .store
            .exec(&Statement::new("DELETE FROM alias_domain WHERE target_domain = ?").bind(domain))
            .await?;

        tracing::debug!(domain = %domain, count = affected, "Cleared domain aliases");
        Ok(affected)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
