//! Business logic services
//!
//! Services coordinate between the calculation engine, repositories
//! and metrics.

pub mod nutrition;

pub use nutrition::NutritionService;
