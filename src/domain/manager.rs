use std::sync::Arc;

use crate::entities::{
    AliasQuery, AliasReader, DomainAliasQuery, DomainAliasStore, ForwardingQuery, ForwardingStore,
    MailboxQuery, MailboxReader,
};
use crate::error::{AdminError, AdminResult, DependentKind};
use crate::models::{is_valid_domain_name, Domain};
use crate::store::gateway::text_column;
use crate::store::{Statement, StoreGateway};

/// Which domain rows to load
#[derive(Debug, Clone, PartialEq)]
enum DomainQuery {
    All,
    ByName(String),
}

impl DomainQuery {
    fn statement(&self) -> Statement {
        let select = "SELECT domain, description, settings FROM domain";
        let order = "ORDER BY domain ASC";
        match self {
            DomainQuery::All => Statement::new(format!("{} {}", select, order)),
            DomainQuery::ByName(name) => {
                Statement::new(format!("{} WHERE domain = ? {}", select, order)).bind(name.as_str())
            }
        }
    }
}

// ============================================================================
// Domain Aggregate Manager
// ============================================================================
//
// Orchestrates: existence probe → dependent checks → cascade → domain row
//
// Nothing here runs inside a transaction. A failure part-way through
// `delete` returns that step's error; earlier steps stay applied.
//
// ============================================================================

pub struct DomainManager {
    store: Arc<StoreGateway>,
    mailboxes: MailboxReader,
    aliases: AliasReader,
    domain_aliases: DomainAliasStore,
    forwardings: ForwardingStore,
    default_settings: String,
}

impl DomainManager {
    pub fn new(store: Arc<StoreGateway>, default_settings: impl Into<String>) -> Self {
        Self {
            mailboxes: MailboxReader::new(store.clone()),
            aliases: AliasReader::new(store.clone()),
            domain_aliases: DomainAliasStore::new(store.clone()),
            forwardings: ForwardingStore::new(store.clone()),
            store,
            default_settings: default_settings.into(),
        }
    }

    /// Every domain with its aliases and catch-alls, sorted by name
    pub async fn list(&self) -> AdminResult<Vec<Domain>> {
        let mut domains = self.load(&DomainQuery::All).await?;
        domains.sort_by(|a, b| a.domain.cmp(&b.domain));
        Ok(domains)
    }

    pub async fn get(&self, name: &str) -> AdminResult<Domain> {
        if !self.exists(name).await? {
            return Err(AdminError::DomainNotFound(name.to_string()));
        }

        let domains = self.load(&DomainQuery::ByName(name.to_string())).await?;
        first_loaded(domains, name)
    }

    /// The named domain as a zero- or one-element list
    pub async fn list_by_name(&self, name: &str) -> AdminResult<Vec<Domain>> {
        self.load(&DomainQuery::ByName(name.to_string())).await
    }

    /// Insert an active domain; empty settings fall back to the configured default
    pub async fn add(&self, domain: Domain) -> AdminResult<()> {
        if !is_valid_domain_name(&domain.domain) {
            return Err(AdminError::InvalidDomain(domain.domain));
        }

        if self.exists(&domain.domain).await? {
            return Err(AdminError::DomainExists(domain.domain));
        }

        let settings = if domain.settings.is_empty() {
            self.default_settings.as_str()
        } else {
            domain.settings.as_str()
        };

        self.store
            .exec(
                &Statement::new(
                    "INSERT INTO domain (domain, description, settings, active)
                     VALUES (?, ?, ?, 1)",
                )
                .bind(domain.domain.as_str())
                .bind(domain.description.as_str())
                .bind(settings),
            )
            .await?;

        tracing::info!(domain = %domain.domain, settings = %settings, "✅ Added domain");
        Ok(())
    }

    /// Remove a domain once no mailboxes or aliases remain, clearing its
    /// domain aliases and catch-alls first
    pub async fn delete(&self, name: &str) -> AdminResult<()> {
        if !self.exists(name).await? {
            return Err(AdminError::DomainNotFound(name.to_string()));
        }

        let mailboxes = self.mailboxes.query(&MailboxQuery::ByDomain(name.to_string())).await?;
        if !mailboxes.is_empty() {
            tracing::warn!(domain = %name, count = mailboxes.len(), "Domain still has mailboxes");
            return Err(AdminError::HasDependents {
                kind: DependentKind::Mailbox,
                domain: name.to_string(),
            });
        }

        let aliases = self.aliases.query(&AliasQuery::ByDomain(name.to_string())).await?;
        if !aliases.is_empty() {
            tracing::warn!(domain = %name, count = aliases.len(), "Domain still has aliases");
            return Err(AdminError::HasDependents {
                kind: DependentKind::Alias,
                domain: name.to_string(),
            });
        }

        let domain_aliases = self
            .domain_aliases
            .query(&DomainAliasQuery::ByDomain(name.to_string()))
            .await?;
        if !domain_aliases.is_empty() {
            self.domain_aliases.delete_all_by_domain(name).await?;
        }

        let catchalls = self
            .forwardings
            .query(&ForwardingQuery::CatchallByDomain(name.to_string()))
            .await?;
        if !catchalls.is_empty() {
            self.forwardings.delete_all_catchalls(name).await?;
        }

        self.store
            .exec(&Statement::new("DELETE FROM domain WHERE domain = ?").bind(name))
            .await?;

        tracing::info!(
            domain = %name,
            domain_aliases = domain_aliases.len(),
            catchalls = catchalls.len(),
            "Deleted domain"
        );
        Ok(())
    }

    /// Catch-all forwarding for an existing domain
    pub async fn add_catchall(&self, name: &str, target: &str) -> AdminResult<()> {
        if !self.exists(name).await? {
            return Err(AdminError::DomainNotFound(name.to_string()));
        }
        self.forwardings.add_catchall(name, target).await
    }

    pub async fn delete_catchall(&self, name: &str, target: &str) -> AdminResult<()> {
        self.forwardings.delete_catchall(name, target).await
    }

    pub async fn exists(&self, name: &str) -> AdminResult<bool> {
        let probe = Statement::new("SELECT COUNT(*) FROM domain WHERE domain = ?").bind(name);
        Ok(self.store.exists(&probe).await?)
    }

    async fn load(&self, query: &DomainQuery) -> AdminResult<Vec<Domain>> {
        let rows = self.store.query(&query.statement()).await?;

        let mut domains = Vec::with_capacity(rows.len());
        for row in &rows {
            let name = text_column(row, "domain")?;

            let aliases = self
                .domain_aliases
                .query(&DomainAliasQuery::ByDomain(name.clone()))
                .await?;
            let catchalls = self
                .forwardings
                .query(&ForwardingQuery::CatchallByDomain(name.clone()))
                .await?;

            domains.push(Domain {
                description: text_column(row, "description")?,
                settings: text_column(row, "settings")?,
                domain: name,
                aliases,
                catchalls,
            });
        }

        tracing::debug!(query = ?query, count = domains.len(), "Loaded domains");
        Ok(domains)
    }
}

/// A positive existence probe followed by an empty load means the row went
/// away between the two statements
fn first_loaded(domains: Vec<Domain>, name: &str) -> AdminResult<Domain> {
    domains
        .into_iter()
        .next()
        .ok_or_else(|| AdminError::DomainVanished(name.to_string()))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DOMAIN_SETTINGS;
    use crate::error::ErrorKind;
    use crate::models::FilterBy;
    use crate::store::test_support::{count_rows, insert_alias, insert_mailbox, memory_store};

    async fn manager() -> (Arc<StoreGateway>, DomainManager) {
        let store = Arc::new(memory_store().await);
        let manager = DomainManager::new(store.clone(), DEFAULT_DOMAIN_SETTINGS);
        (store, manager)
    }

    #[tokio::test]
    async fn test_add_then_get_uses_default_settings() {
        let (_store, manager) = manager().await;

        manager.add(Domain::new("example.com").with_description("Main")).await.unwrap();
        let domain = manager.get("example.com").await.unwrap();

        assert_eq!(domain.domain, "example.com");
        assert_eq!(domain.description, "Main");
        assert_eq!(domain.settings, "default_user_quota:2048");
        assert!(domain.aliases.is_empty());
        assert!(domain.catchalls.is_empty());
    }

    #[tokio::test]
    async fn test_injected_default_settings() {
        let store = Arc::new(memory_store().await);
        let manager = DomainManager::new(store, "default_user_quota:512");

        manager.add(Domain::new("a.com")).await.unwrap();
        manager.add(Domain::new("b.com").with_settings("default_user_quota:10")).await.unwrap();

        assert_eq!(manager.get("a.com").await.unwrap().settings, "default_user_quota:512");
        assert_eq!(manager.get("b.com").await.unwrap().settings, "default_user_quota:10");
    }

    #[tokio::test]
    async fn test_add_twice_is_rejected_and_keeps_one_row() {
        let (store, manager) = manager().await;

        manager.add(Domain::new("example.com")).await.unwrap();
        let err = manager.add(Domain::new("example.com")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(err.to_string(), "Domain example.com already exists");
        assert_eq!(count_rows(&store, "domain", "domain", "example.com").await, 1);
    }

    #[tokio::test]
    async fn test_add_creates_active_domain() {
        let (store, manager) = manager().await;

        manager.add(Domain::new("example.com")).await.unwrap();

        let probe = Statement::new("SELECT COUNT(*) FROM domain WHERE domain = ? AND active = 1")
            .bind("example.com");
        let active = store.exists(&probe).await.unwrap();
        assert!(active);
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_names() {
        let (_store, manager) = manager().await;

        let err = manager.add(Domain::new("")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Invalid);
        assert!(manager.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_domain() {
        let (_store, manager) = manager().await;

        let err = manager.get("missing.com").await.unwrap_err();

        assert!(matches!(err, AdminError::DomainNotFound(_)));
        assert_eq!(err.to_string(), "Domain missing.com doesn't exist");
    }

    #[tokio::test]
    async fn test_delete_missing_domain_is_not_found() {
        let (_store, manager) = manager().await;

        for name in ["missing.com", "", "a b", "post@example.com"] {
            let err = manager.delete(name).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NotFound);
        }
    }

    #[tokio::test]
    async fn test_list_is_sorted_and_populated() {
        let (_store, manager) = manager().await;
        manager.add(Domain::new("zeta.org")).await.unwrap();
        manager.add(Domain::new("alpha.com")).await.unwrap();
        manager.add(Domain::new("Mid.net")).await.unwrap();
        manager.domain_aliases.add("alias.com", "alpha.com").await.unwrap();
        manager.forwardings.add_catchall("zeta.org", "all@alpha.com").await.unwrap();

        let domains = manager.list().await.unwrap();

        let names: Vec<_> = domains.iter().map(|d| d.domain.as_str()).collect();
        assert_eq!(names, vec!["Mid.net", "alpha.com", "zeta.org"]);
        assert_eq!(domains[1].aliases[0].alias, "alias.com");
        assert_eq!(domains[2].catchalls[0].forwarding, "all@alpha.com");
    }

    #[tokio::test]
    async fn test_delete_blocked_by_mailbox() {
        let (store, manager) = manager().await;
        manager.add(Domain::new("example.com")).await.unwrap();
        insert_mailbox(&store, "post@example.com").await;

        let err = manager.delete("example.com").await.unwrap_err();

        assert!(matches!(
            err,
            AdminError::HasDependents { kind: DependentKind::Mailbox, .. }
        ));
        assert_eq!(
            err.to_string(),
            "There are still mailboxes with the domain example.com, you need to delete them before"
        );
        assert!(manager.exists("example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_blocked_by_alias() {
        let (store, manager) = manager().await;
        manager.add(Domain::new("example.com")).await.unwrap();
        insert_alias(&store, "team@example.com").await;

        let err = manager.delete("example.com").await.unwrap_err();

        assert!(matches!(
            err,
            AdminError::HasDependents { kind: DependentKind::Alias, .. }
        ));
        assert!(manager.exists("example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_blocked_delete_does_not_cascade() {
        let (store, manager) = manager().await;
        manager.add(Domain::new("example.com")).await.unwrap();
        manager.domain_aliases.add("alias.com", "example.com").await.unwrap();
        manager.forwardings.add_catchall("example.com", "all@other.net").await.unwrap();
        insert_mailbox(&store, "post@example.com").await;

        manager.delete("example.com").await.unwrap_err();

        let domain = manager.get("example.com").await.unwrap();
        assert_eq!(domain.aliases.len(), 1);
        assert_eq!(domain.catchalls.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_cascades_owned_children() {
        let (_store, manager) = manager().await;
        manager.add(Domain::new("example.com")).await.unwrap();
        manager.add(Domain::new("other.net")).await.unwrap();
        manager.domain_aliases.add("alias-one.com", "example.com").await.unwrap();
        manager.domain_aliases.add("alias-two.com", "example.com").await.unwrap();
        manager.domain_aliases.add("alias-three.com", "other.net").await.unwrap();
        manager.forwardings.add_catchall("example.com", "all@other.net").await.unwrap();

        manager.delete("example.com").await.unwrap();

        let aliases = manager
            .domain_aliases
            .query(&DomainAliasQuery::ByDomain("example.com".to_string()))
            .await
            .unwrap();
        let catchalls = manager
            .forwardings
            .query(&ForwardingQuery::CatchallByDomain("example.com".to_string()))
            .await
            .unwrap();
        assert!(aliases.is_empty());
        assert!(catchalls.is_empty());
        assert_eq!(manager.get("example.com").await.unwrap_err().kind(), ErrorKind::NotFound);

        let other = manager.get("other.net").await.unwrap();
        assert_eq!(other.aliases.len(), 1);
    }

    #[tokio::test]
    async fn test_catchall_requires_existing_domain() {
        let (_store, manager) = manager().await;

        let err = manager.add_catchall("missing.com", "all@other.net").await.unwrap_err();
        assert!(matches!(err, AdminError::DomainNotFound(_)));

        manager.add(Domain::new("example.com")).await.unwrap();
        manager.add_catchall("example.com", "all@other.net").await.unwrap();
        assert_eq!(manager.get("example.com").await.unwrap().catchalls.len(), 1);

        manager.delete_catchall("example.com", "all@other.net").await.unwrap();
        assert!(manager.get("example.com").await.unwrap().catchalls.is_empty());
    }

    #[tokio::test]
    async fn test_filter_listed_domains() {
        let (_store, manager) = manager().await;
        manager.add(Domain::new("a.com")).await.unwrap();
        manager.add(Domain::new("c.org").with_description("customer")).await.unwrap();
        manager.domain_aliases.add("b.com", "a.com").await.unwrap();

        let domains = manager.list().await.unwrap();

        let filtered = domains.filter_by("b");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].domain, "a.com");
        assert_eq!(filtered[0].aliases[0].alias, "b.com");
        assert_eq!(domains.filter_by(""), domains);
    }

    #[tokio::test]
    async fn test_failed_row_delete_keeps_earlier_cascades() {
        let (store, manager) = manager().await;
        manager.add(Domain::new("example.com")).await.unwrap();
        manager.domain_aliases.add("alias.com", "example.com").await.unwrap();
        manager.add_catchall("example.com", "all@other.net").await.unwrap();
        store
            .exec(&Statement::new(
                "CREATE TRIGGER keep_domain BEFORE DELETE ON domain
                 BEGIN SELECT RAISE(ABORT, 'domain row is locked'); END",
            ))
            .await
            .unwrap();

        let err = manager.delete("example.com").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(manager.exists("example.com").await.unwrap());
        let domain = manager.get("example.com").await.unwrap();
        assert!(domain.aliases.is_empty());
        assert!(domain.catchalls.is_empty());
    }

    #[test]
    fn test_empty_load_after_probe_is_inconsistent() {
        let err = first_loaded(Vec::new(), "example.com").unwrap_err();

        assert!(matches!(err, AdminError::DomainVanished(_)));
        assert_eq!(err.kind(), ErrorKind::Inconsistent);

        let domain = first_loaded(vec![Domain::new("example.com")], "example.com").unwrap();
        assert_eq!(domain.domain, "example.com");
    }

    #[tokio::test]
    async fn test_list_by_name_narrows_to_one_domain() {
        let (_store, manager) = manager().await;
        manager.add(Domain::new("a.com")).await.unwrap();
        manager.add(Domain::new("b.com")).await.unwrap();
        manager.domain_aliases.add("alias.com", "b.com").await.unwrap();

        let domains = manager.list_by_name("b.com").await.unwrap();

        assert_eq!(domains.len(), 1);
        assert_eq!(domains[0].domain, "b.com");
        assert_eq!(domains[0].aliases[0].alias, "alias.com");
        assert!(manager.list_by_name("missing.com").await.unwrap().is_empty());
    }
}
