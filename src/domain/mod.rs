//! Domain layer for Name Warden
//!
//! Architecture: Domain Model - Pure business logic for naming-convention enforcement
//! - Contains the core entities and value objects: entities, kinds, violations, reports
//! - Independent of infrastructure concerns like regex compilation or output formats
//! - Expresses the ubiquitous language of naming conventions and violations

pub mod violations;

// Re-export main domain types for convenience
pub use violations::*;
