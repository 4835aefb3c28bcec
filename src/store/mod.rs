// ============================================================================
// Store - Relational Persistence Layer
// ============================================================================
//
// Parameterized statement execution against the iRedMail schema.
// Owns no business rules; callers supply fixed SQL and bind values.
//
// ============================================================================

pub mod gateway;
pub mod statement;

#[cfg(test)]
pub(crate) mod test_support;

pub use gateway::StoreGateway;
pub use statement::{Dialect, Statement};
