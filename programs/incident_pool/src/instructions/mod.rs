// programs/incident_pool/src/instructions/mod.rs

pub mod claims;
pub mod deposits;
pub mod initialize;
pub mod roles;
pub mod views;

pub use claims::*;
pub use deposits::*;
pub use initialize::*;
pub use roles::*;
pub use views::*;
