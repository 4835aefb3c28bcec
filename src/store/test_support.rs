use std::time::Duration;

use super::gateway::StoreGateway;
use super::statement::Statement;
use crate::config::DatabaseConfig;

// ============================================================================
// Test Support - In-Memory iRedMail Schema
// ============================================================================

const SCHEMA: &[&str] = &[
    "CREATE TABLE domain (
        domain VARCHAR(255) NOT NULL PRIMARY KEY,
        description TEXT,
        settings TEXT,
        active INTEGER NOT NULL DEFAULT 1
    )",
    "CREATE TABLE mailbox (
        username VARCHAR(255) NOT NULL PRIMARY KEY,
        password VARCHAR(255) NOT NULL DEFAULT '',
        name VARCHAR(255) NOT NULL DEFAULT '',
        maildir VARCHAR(255) NOT NULL DEFAULT '',
        quota INTEGER NOT NULL DEFAULT 0,
        domain VARCHAR(255) NOT NULL DEFAULT '',
        active INTEGER NOT NULL DEFAULT 1
    )",
    "CREATE TABLE alias (
        address VARCHAR(255) NOT NULL PRIMARY KEY,
        name VARCHAR(255) NOT NULL DEFAULT '',
        domain VARCHAR(255) NOT NULL DEFAULT '',
        active INTEGER NOT NULL DEFAULT 1
    )",
    "CREATE TABLE alias_domain (
        alias_domain VARCHAR(255) NOT NULL PRIMARY KEY,
        target_domain VARCHAR(255) NOT NULL,
        active INTEGER NOT NULL DEFAULT 1
    )",
    "CREATE TABLE forwardings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        address VARCHAR(255) NOT NULL DEFAULT '',
        forwarding VARCHAR(255) NOT NULL DEFAULT '',
        domain VARCHAR(255) NOT NULL DEFAULT '',
        dest_domain VARCHAR(255) NOT NULL DEFAULT '',
        is_maillist INTEGER NOT NULL DEFAULT 0,
        is_list INTEGER NOT NULL DEFAULT 0,
        is_forwarding INTEGER NOT NULL DEFAULT 0,
        is_alias INTEGER NOT NULL DEFAULT 0,
        active INTEGER NOT NULL DEFAULT 1
    )",
];

/// Gateway over a fresh single-connection in-memory database
pub(crate) async fn memory_store() -> StoreGateway {
    let config = DatabaseConfig::new("sqlite::memory:")
        .with_max_connections(1)
        .with_acquire_timeout(Duration::from_secs(5));
    let store = StoreGateway::connect(&config).await.unwrap();

    for ddl in SCHEMA {
        store.exec(&Statement::new(*ddl)).await.unwrap();
    }

    store
}

pub(crate) async fn insert_mailbox(store: &StoreGateway, email: &str) {
    let (local, domain) = email.split_once('@').unwrap();
    store
        .exec(
            &Statement::new(
                "INSERT INTO mailbox (username, name, maildir, domain) VALUES (?, ?, ?, ?)",
            )
            .bind(email)
            .bind(local)
            .bind(format!("{}/{}/", domain, local))
            .bind(domain),
        )
        .await
        .unwrap();
}

pub(crate) async fn insert_alias(store: &StoreGateway, address: &str) {
    let (_, domain) = address.split_once('@').unwrap();
    store
        .exec(
            &Statement::new("INSERT INTO alias (address, domain) VALUES (?, ?)")
                .bind(address)
                .bind(domain),
        )
        .await
        .unwrap();
}

pub(crate) async fn insert_alias_member(store: &StoreGateway, address: &str, member: &str) {
    let (_, domain) = address.split_once('@').unwrap();
    store
        .exec(
            &Statement::new(
                "INSERT INTO forwardings (address, forwarding, domain, is_alias, active)
                 VALUES (?, ?, ?, 1, 1)",
            )
            .bind(address)
            .bind(member)
            .bind(domain),
        )
        .await
        .unwrap();
}

/// Same probe the forwarding round-trip checks against the raw table
pub(crate) async fn active_forwarding_exists(
    store: &StoreGateway,
    address: &str,
    target: &str,
) -> bool {
    store
        .exists(
            &Statement::new(
                "SELECT COUNT(*) FROM forwardings
                 WHERE address = ? AND forwarding = ?
                 AND is_forwarding = 1 AND active = 1 AND is_alias = 0 AND is_maillist = 0",
            )
            .bind(address)
            .bind(target),
        )
        .await
        .unwrap()
}

pub(crate) async fn count_rows(
    store: &StoreGateway,
    table: &str,
    column: &str,
    value: &str,
) -> i64 {
    use sqlx::Row;

    let count = Statement::new(format!("SELECT COUNT(*) FROM {} WHERE {} = ?", table, column));
    let row = store.query_row(&count.bind(value)).await.unwrap().unwrap();
    row.try_get(0usize).unwrap()
}
