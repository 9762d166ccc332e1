//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! # Design Principles
//!
//! 1. **Build once**: the engine validates its configuration at startup
//! 2. **Cheap cloning**: All fields use Arc or are already Clone-cheap
//! 3. **Immutable engine**: only the plan store holds mutable state

use crate::config::AppConfig;
use crate::repositories::{InMemoryPlanRepository, PlanRepository};
use metrics_exporter_prometheus::PrometheusHandle;
use nutriplan_shared::{NutritionEngine, NutritionError};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Calculation engine built from `config.engine`
    pub engine: Arc<NutritionEngine>,
    /// Plan persistence
    pub plans: Arc<dyn PlanRepository>,
    /// Prometheus renderer; `None` when metrics are disabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state with an in-memory plan store
    ///
    /// Fails when the engine section of the configuration is invalid.
    pub fn new(config: AppConfig) -> Result<Self, NutritionError> {
        Self::with_repository(config, Arc::new(InMemoryPlanRepository::new()))
    }

    /// Create a new application state over the given plan store
    pub fn with_repository(
        config: AppConfig,
        plans: Arc<dyn PlanRepository>,
    ) -> Result<Self, NutritionError> {
        let engine = NutritionEngine::new(config.engine.clone())?;
        Ok(Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
            plans,
            metrics: None,
        })
    }

    /// Attach the Prometheus renderer served at `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the engine
    #[inline]
    pub fn engine(&self) -> &NutritionEngine {
        &self.engine
    }

    /// Get a reference to the plan store
    #[inline]
    pub fn plans(&self) -> &dyn PlanRepository {
        self.plans.as_ref()
    }
}
