//! 领域层

pub mod policy;
pub mod repositories;

pub use policy::*;
