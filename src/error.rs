// ============================================================================
// Admin Errors - Business Rule Violations and Storage Failures
// ============================================================================
//
// Display strings are shown verbatim by the command line, so they are part of
// the observable behaviour of every operation.
//
// ============================================================================

/// Kind of dependent row that blocks a domain deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependentKind {
    Mailbox,
    Alias,
}

/// Coarse classification of an `AdminError`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    HasDependents,
    Inconsistent,
    Invalid,
    Storage,
}

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("Domain {0} doesn't exist")]
    DomainNotFound(String),

    #[error("Domain {0} already exists")]
    DomainExists(String),

    #[error("Domain {0} not found")]
    DomainVanished(String),

    #[error("Invalid domain name {0:?}")]
    InvalidDomain(String),

    #[error("{}", dependents_message(.kind, .domain))]
    HasDependents { kind: DependentKind, domain: String },

    #[error("Domain alias {0} doesn't exist")]
    DomainAliasNotFound(String),

    #[error("Domain alias {0} already exists")]
    DomainAliasExists(String),

    #[error("Mailbox {0} doesn't exist")]
    MailboxNotFound(String),

    #[error("Invalid email address {0:?}")]
    InvalidAddress(String),

    #[error("Forwarding {address} -> {target} already exists")]
    ForwardingExists { address: String, target: String },

    #[error("Forwarding {address} -> {target} doesn't exist")]
    ForwardingNotFound { address: String, target: String },

    #[error("Catch-all {domain} -> {target} already exists")]
    CatchallExists { domain: String, target: String },

    #[error("Catch-all {domain} -> {target} doesn't exist")]
    CatchallNotFound { domain: String, target: String },

    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

fn dependents_message(kind: &DependentKind, domain: &str) -> String {
    match kind {
        DependentKind::Mailbox => format!(
            "There are still mailboxes with the domain {}, you need to delete them before",
            domain
        ),
        DependentKind::Alias => format!(
            "There are still aliases from the domain {}, you need to delete them before",
            domain
        ),
    }
}

impl AdminError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdminError::DomainNotFound(_)
            | AdminError::DomainAliasNotFound(_)
            | AdminError::MailboxNotFound(_)
            | AdminError::ForwardingNotFound { .. }
            | AdminError::CatchallNotFound { .. } => ErrorKind::NotFound,
            AdminError::DomainExists(_)
            | AdminError::DomainAliasExists(_)
            | AdminError::ForwardingExists { .. }
            | AdminError::CatchallExists { .. } => ErrorKind::AlreadyExists,
            AdminError::HasDependents { .. } => ErrorKind::HasDependents,
            AdminError::DomainVanished(_) => ErrorKind::Inconsistent,
            AdminError::InvalidDomain(_) | AdminError::InvalidAddress(_) => ErrorKind::Invalid,
            AdminError::Storage(_) => ErrorKind::Storage,
        }
    }
}

pub type AdminResult<T> = Result<T, AdminError>;

// ============================================================================
// Unit Tests
// ============================================================================
