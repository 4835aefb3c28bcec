use serde::{Deserialize, Serialize};

// ============================================================================
// Account Records
// ============================================================================

/// A mail domain with its domain aliases and catch-all forwardings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Domain {
    pub domain: String,
    pub description: String,
    pub settings: String,
    pub aliases: Vec<DomainAlias>,
    pub catchalls: Vec<Forwarding>,
}

impl Domain {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_settings(mut self, settings: impl Into<String>) -> Self {
        self.settings = settings.into();
        self
    }
}

/// An alternate domain name routed to a primary domain
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DomainAlias {
    pub alias: String,
    pub domain: String,
}

/// Address -> target pair; a catch-all when `address` is the bare domain
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Forwarding {
    pub address: String,
    pub forwarding: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Mailbox {
    pub email: String,
    pub name: String,
    pub domain: String,
    pub maildir: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Alias {
    pub address: String,
    pub name: String,
    pub domain: String,
    pub forwardings: Vec<Forwarding>,
}

// ============================================================================
// Substring Filtering
// ============================================================================
//
// Case-sensitive containment over every textual field, recursing into
// children. A parent matches when any child matches.
//
// ============================================================================

pub trait Matches {
    fn matches(&self, needle: &str) -> bool;
}

impl Matches for Domain {
    fn matches(&self, needle: &str) -> bool {
        self.domain.contains(needle)
            || self.description.contains(needle)
            || self.aliases.iter().any(|alias| alias.matches(needle))
            || self.catchalls.iter().any(|catchall| catchall.matches(needle))
    }
}

impl Matches for DomainAlias {
    fn matches(&self, needle: &str) -> bool {
        self.alias.contains(needle) || self.domain.contains(needle)
    }
}

impl Matches for Forwarding {
    fn matches(&self, needle: &str) -> bool {
        self.address.contains(needle) || self.forwarding.contains(needle)
    }
}

impl Matches for Mailbox {
    fn matches(&self, needle: &str) -> bool {
        self.email.contains(needle)
            || self.name.contains(needle)
            || self.domain.contains(needle)
            || self.maildir.contains(needle)
    }
}

impl Matches for Alias {
    fn matches(&self, needle: &str) -> bool {
        self.address.contains(needle)
            || self.name.contains(needle)
            || self.domain.contains(needle)
            || self.forwardings.iter().any(|forwarding| forwarding.matches(needle))
    }
}

/// Order-preserving filter over any collection of matchable records
pub trait FilterBy<T> {
    fn filter_by(&self, needle: &str) -> Vec<T>;
}

impl<T: Matches + Clone> FilterBy<T> for [T] {
    fn filter_by(&self, needle: &str) -> Vec<T> {
        self.iter().filter(|item| item.matches(needle)).cloned().collect()
    }
}

// ============================================================================
// Address Helpers
// ============================================================================

/// Split `local@domain` into its parts; both must be non-empty
pub fn split_address(address: &str) -> Option<(&str, &str)> {
    match address.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Some((local, domain))
        }
        _ => None,
    }
}

pub fn is_valid_domain_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('@') && !name.chars().any(char::is_whitespace)
}

// ============================================================================
// Unit Tests
// ============================================================================
