use std::sync::Arc;

use crate::error::AdminResult;
use crate::models::Mailbox;
use crate::store::gateway::text_column;
use crate::store::{Statement, StoreGateway};

/// Which mailbox rows to load
#[derive(Debug, Clone, PartialEq)]
pub enum MailboxQuery {
    All,
    ByDomain(String),
}

impl MailboxQuery {
    fn statement(&self) -> Statement {
        let select = "SELECT username, name, domain, maildir FROM mailbox";
        match self {
            MailboxQuery::All => Statement::new(format!("{} ORDER BY username ASC", select)),
            MailboxQuery::ByDomain(domain) => {
                Statement::new(format!("{} WHERE domain = ? ORDER BY username ASC", select))
                    .bind(domain.as_str())
            }
        }
    }
}

pub struct MailboxReader {
    store: Arc<StoreGateway>,
}

impl MailboxReader {
    pub fn new(store: Arc<StoreGateway>) -> Self {
        Self { store }
    }

    pub async fn query(&self, query: &MailboxQuery) -> AdminResult<Vec<Mailbox>> {
        let rows = self.store.query(&query.statement()).await?;

        let mut mailboxes = Vec::with_capacity(rows.len());
        for row in &rows {
            mailboxes.push(Mailbox {
                email: text_column(row, "username")?,
                name: text_column(row, "name")?,
                domain: text_column(row, "domain")?,
                maildir: text_column(row, "maildir")?,
            });
        }

        Ok(mailboxes)
    }

    pub async fn exists(&self, email: &str) -> AdminResult<bool> {
        let probe = Statement::new("SELECT COUNT(*) FROM mailbox WHERE username = ?").bind(email);
        Ok(self.store.exists(&probe).await?)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
