//! Shared record types for the financial planning workspace.
//!
//! Input records (`ClientFinancialProfile`, `Goal`) are produced by the
//! normalization layer; derived records are produced by `planning_engine`
//! and serialized into reports by `data_pipeline`.

pub mod derived;
pub mod goal;
pub mod policy;
pub mod profile;

pub use derived::*;
pub use goal::*;
pub use policy::*;
pub use profile::*;
