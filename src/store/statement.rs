// ============================================================================
// Parameterized Statements
// ============================================================================
//
// SQL is written once with `?` bind markers. Values never enter the SQL text;
// the dialect only decides how markers are spelled on the wire.
//
// ============================================================================

/// SQL backend family, derived from the connection URL scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    MySql,
    Postgres,
    Sqlite,
}

impl Dialect {
    pub fn from_url(url: &str) -> Option<Self> {
        let scheme = url.split(':').next().unwrap_or_default().to_ascii_lowercase();
        match scheme.as_str() {
            "mysql" | "mariadb" => Some(Dialect::MySql),
            "postgres" | "postgresql" => Some(Dialect::Postgres),
            "sqlite" => Some(Dialect::Sqlite),
            _ => None,
        }
    }

    /// Rewrite `?` markers into the backend's placeholder syntax
    pub fn render(&self, sql: &str) -> String {
        match self {
            Dialect::MySql | Dialect::Sqlite => sql.to_string(),
            Dialect::Postgres => {
                let mut rendered = String::with_capacity(sql.len() + 8);
                let mut index = 0;
                for ch in sql.chars() {
                    if ch == '?' {
                        index += 1;
                        rendered.push('$');
                        rendered.push_str(&index.to_string());
                    } else {
                        rendered.push(ch);
                    }
                }
                rendered
            }
        }
    }
}

/// SQL text plus its ordered bind values
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    binds: Vec<String>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            binds: Vec::new(),
        }
    }

    pub fn bind(mut self, value: impl Into<String>) -> Self {
        self.binds.push(value.into());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn binds(&self) -> &[String] {
        &self.binds
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
