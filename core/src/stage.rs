//! Pipeline stages.
//!
//! A stage mutates the [`PipelineContext`]. The builder runs its stages in
//! registration order; each built-in stage wraps one provider.

use std::sync::Arc;

use liuyao_types::settings::ChangedKinPalace;

use crate::context::PipelineContext;
use crate::error::DivinationError;
use crate::providers::{
    HiddenDeityProvider, NajiaProvider, PositionProvider, SixKinProvider, SixSpiritProvider,
    SymbolicStarRegistry,
};

pub trait Stage: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn execute(&self, context: &mut PipelineContext) -> Result<(), DivinationError>;
}

/// Stem-branch pairs for the original and changed hexagrams.
pub struct NajiaStage {
    provider: Arc<dyn NajiaProvider>,
}

impl NajiaStage {
    #[must_use]
    pub fn new(provider: Arc<dyn NajiaProvider>) -> Self {
        Self { provider }
    }
}

impl Stage for NajiaStage {
    fn name(&self) -> &'static str {
        "najia"
    }

    fn execute(&self, context: &mut PipelineContext) -> Result<(), DivinationError> {
        self.provider.bind(context.original_mut());
        if let Some(changed) = context.changed_mut() {
            self.provider.bind(changed);
        }
        Ok(())
    }
}

/// World and response on the original hexagram.
pub struct PositionStage {
    provider: Arc<dyn PositionProvider>,
}

impl PositionStage {
    #[must_use]
    pub fn new(provider: Arc<dyn PositionProvider>) -> Self {
        Self { provider }
    }
}

impl Stage for PositionStage {
    fn name(&self) -> &'static str {
        "position"
    }

    fn execute(&self, context: &mut PipelineContext) -> Result<(), DivinationError> {
        self.provider.bind(context.original_mut());
        Ok(())
    }
}

/// Six kins for both hexagrams. The changed hexagram is read against the
/// palace `changed_palace` selects.
pub struct SixKinStage {
    provider: Arc<dyn SixKinProvider>,
    changed_palace: ChangedKinPalace,
}

impl SixKinStage {
    #[must_use]
    pub fn new(provider: Arc<dyn SixKinProvider>, changed_palace: ChangedKinPalace) -> Self {
        Self {
            provider,
            changed_palace,
        }
    }
}

impl Stage for SixKinStage {
    fn name(&self) -> &'static str {
        "six-kin"
    }

    fn execute(&self, context: &mut PipelineContext) -> Result<(), DivinationError> {
        let (original, changed) = context.instances_mut();
        self.provider.bind(original)?;
        if let Some(changed) = changed {
            match self.changed_palace {
                ChangedKinPalace::Original => {
                    self.provider.bind_with_palace(changed, original.palace_phase())?;
                }
                ChangedKinPalace::Own => self.provider.bind(changed)?,
            }
        }
        Ok(())
    }
}

/// Hidden deities on the original hexagram only.
pub struct HiddenDeityStage {
    provider: Arc<dyn HiddenDeityProvider>,
}

impl HiddenDeityStage {
    #[must_use]
    pub fn new(provider: Arc<dyn HiddenDeityProvider>) -> Self {
        Self { provider }
    }
}

impl Stage for HiddenDeityStage {
    fn name(&self) -> &'static str {
        "hidden-deity"
    }

    fn execute(&self, context: &mut PipelineContext) -> Result<(), DivinationError> {
        self.provider.bind(context.original_mut())
    }
}

/// Six spirits on the original hexagram, keyed by the day stem.
pub struct SixSpiritStage {
    provider: Arc<dyn SixSpiritProvider>,
}

impl SixSpiritStage {
    #[must_use]
    pub fn new(provider: Arc<dyn SixSpiritProvider>) -> Self {
        Self { provider }
    }
}

impl Stage for SixSpiritStage {
    fn name(&self) -> &'static str {
        "six-spirit"
    }

    fn execute(&self, context: &mut PipelineContext) -> Result<(), DivinationError> {
        let day_stem = context.inquiry_time().day_stem();
        self.provider.bind(context.original_mut(), day_stem);
        Ok(())
    }
}

/// Evaluates a star registry against the original hexagram.
pub struct SymbolicStarStage {
    registry: SymbolicStarRegistry,
}

impl SymbolicStarStage {
    #[must_use]
    pub fn new(registry: SymbolicStarRegistry) -> Self {
        Self { registry }
    }
}

impl Stage for SymbolicStarStage {
    fn name(&self) -> &'static str {
        "symbolic-stars"
    }

    fn execute(&self, context: &mut PipelineContext) -> Result<(), DivinationError> {
        let stars = self.registry.calculate(context.inquiry_time(), context.original());
        tracing::debug!(count = stars.len(), "Symbolic stars calculated");
        context.set_symbolic_stars(stars);
        Ok(())
    }
}
