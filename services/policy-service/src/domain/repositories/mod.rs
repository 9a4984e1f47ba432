mod policy_repository;

pub use policy_repository::*;
