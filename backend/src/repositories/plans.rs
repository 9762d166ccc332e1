//! Nutrition plan repository
//!
//! Plans are stored per consultation; saving again replaces the previous
//! plan for that consultation.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nutriplan_shared::NutritionPlan;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A calculated plan attached to a consultation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPlan {
    pub id: Uuid,
    pub consultation_id: Uuid,
    pub plan: NutritionPlan,
    pub created_at: DateTime<Utc>,
}

/// Persistence for calculated plans
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Store a plan, replacing any earlier plan of the consultation
    async fn save(&self, consultation_id: Uuid, plan: NutritionPlan) -> Result<StoredPlan>;

    /// Latest plan of a consultation
    async fn find_by_consultation(&self, consultation_id: Uuid) -> Result<Option<StoredPlan>>;

    /// Check that the store can serve requests
    async fn health_check(&self) -> Result<()>;
}

/// Process-local plan store
#[derive(Debug, Default)]
pub struct InMemoryPlanRepository {
    plans: RwLock<HashMap<Uuid, StoredPlan>>,
}

impl InMemoryPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlanRepository for InMemoryPlanRepository {
    async fn save(&self, consultation_id: Uuid, plan: NutritionPlan) -> Result<StoredPlan> {
        let stored = StoredPlan {
            id: Uuid::new_v4(),
            consultation_id,
            plan,
            created_at: Utc::now(),
        };
        self.plans
            .write()
            .await
            .insert(consultation_id, stored.clone());
        Ok(stored)
    }

    async fn find_by_consultation(&self, consultation_id: Uuid) -> Result<Option<StoredPlan>> {
        Ok(self.plans.read().await.get(&consultation_id).cloned())
    }

    async fn health_check(&self) -> Result<()> {
        let _plans = self.plans.read().await;
        Ok(())
    }
}
