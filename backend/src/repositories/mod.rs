//! Plan repositories
//!
//! Provides the persistence boundary for calculated plans.

pub mod plans;

pub use plans::{InMemoryPlanRepository, PlanRepository, StoredPlan};
