use std::sync::Arc;

use crate::error::AdminResult;
use crate::models::Alias;
use crate::store::gateway::text_column;
use crate::store::{Statement, StoreGateway};

use super::forwarding::{ForwardingQuery, ForwardingStore};

/// Which alias rows to load
#[derive(Debug, Clone, PartialEq)]
pub enum AliasQuery {
    All,
    ByDomain(String),
}

impl AliasQuery {
    fn statement(&self) -> Statement {
        let select = "SELECT address, name, domain FROM alias";
        let order = "ORDER BY address ASC";
        match self {
            AliasQuery::All => Statement::new(format!("{} {}", select, order)),
            AliasQuery::ByDomain(domain) => {
                Statement::new(format!("{} WHERE domain = ? {}", select, order))
                    .bind(domain.as_str())
            }
        }
    }
}

pub struct AliasReader {
    store: Arc<StoreGateway>,
    forwardings: ForwardingStore,
}

impl AliasReader {
    pub fn new(store: Arc<StoreGateway>) -> Self {
        Self {
            forwardings: ForwardingStore::new(store.clone()),
            store,
        }
    }

    /// Aliases with their member forwardings attached
    pub async fn query(&self, query: &AliasQuery) -> AdminResult<Vec<Alias>> {
        let rows = self.store.query(&query.statement()).await?;

        let mut aliases = Vec::with_capacity(rows.len());
        for row in &rows {
            let address = text_column(row, "address")?;
            let forwardings = self
                .forwardings
                .query(&ForwardingQuery::AliasMembers(address.clone()))
                .await?;

            aliases.push(Alias {
                name: text_column(row, "name")?,
                domain: text_column(row, "domain")?,
                address,
                forwardings,
            });
        }

        Ok(aliases)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
