//! Role and ownership checks shared by every mutating operation.
//!
//! # Modules
//!
//! - `types` - `Role` and the per-request `Principal`
//! - `policy` - Stateless predicates (`is_admin`, `is_owner`, `is_self`) and
//!   the composed booking/review permissions built from them

pub mod policy;
pub mod types;

pub use policy::AccessPolicy;
pub use types::{Principal, Role};
