//! Domain layer - core business logic and entities

pub mod payload;
pub mod route;
pub mod sizing;
pub mod execution;

#[cfg(test)]
pub mod testing;
