mod migrations;
mod postgres_policy_repository;

pub use migrations::*;
pub use postgres_policy_repository::*;
