// ============================================================================
// Domain Layer - Mail Domain Lifecycle
// ============================================================================
//
// The domain aggregate manager composes the entity stores to build fully
// populated `Domain` records and decides whether a domain may be created or
// deleted.
//
// Deletion policy:
// - mailboxes and aliases block deletion (their removal has effects outside
//   this tool, e.g. the mail store)
// - domain aliases and catch-all forwardings are owned and cleared
//   automatically
//
// ============================================================================

pub mod manager;

pub use manager::DomainManager;
