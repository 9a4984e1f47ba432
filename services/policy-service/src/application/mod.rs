//! 应用层

mod bundle_assembler;
mod policy_service;

pub use bundle_assembler::*;
pub use policy_service::*;
