//! Values returned across the trait seams.

use nanoslides_core::PresentationPlan;
use serde::{Deserialize, Serialize};

/// A validated plan and the model that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct PlannedDeck {
    /// The plan
    plan: PresentationPlan,
    /// Model that answered, after any fallback
    model: String,
}

impl PlannedDeck {
    /// Pair a plan with the model that produced it.
    pub fn new(plan: PresentationPlan, model: impl Into<String>) -> Self {
        Self {
            plan,
            model: model.into(),
        }
    }

    /// Take the plan out.
    pub fn into_plan(self) -> PresentationPlan {
        self.plan
    }
}
