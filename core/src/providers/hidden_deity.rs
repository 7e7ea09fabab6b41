//! Hidden deities: kins absent from the visible lines, borrowed from the
//! palace hexagram.

use std::sync::Arc;

use liuyao_types::{Element, SixKin};

use crate::error::DivinationError;
use crate::instance::HexagramInstance;
use crate::line::HiddenDeity;
use crate::providers::najia::NajiaProvider;
use crate::providers::six_kin::SixKinProvider;

pub trait HiddenDeityProvider: Send + Sync {
    /// Attaches hidden deities to the lines of `instance`. Reads six-kin,
    /// so the najia and six-kin stages must run first.
    fn bind(&self, instance: &mut HexagramInstance) -> Result<(), DivinationError>;
}

/// Annotates the palace hexagram with the same najia and six-kin providers
/// the reading uses, then copies across every line whose kin is missing.
#[derive(Clone)]
pub struct DefaultHiddenDeityProvider {
    najia: Arc<dyn NajiaProvider>,
    six_kin: Arc<dyn SixKinProvider>,
}

impl DefaultHiddenDeityProvider {
    #[must_use]
    pub fn new(najia: Arc<dyn NajiaProvider>, six_kin: Arc<dyn SixKinProvider>) -> Self {
        Self { najia, six_kin }
    }
}

impl HiddenDeityProvider for DefaultHiddenDeityProvider {
    fn bind(&self, instance: &mut HexagramInstance) -> Result<(), DivinationError> {
        let mut present = Vec::with_capacity(6);
        for line in instance.lines() {
            present.push(line.six_kin()?);
        }
        let missing: Vec<SixKin> = SixKin::ALL
            .iter()
            .copied()
            .filter(|kin| !present.contains(kin))
            .collect();

        for line in instance.lines_mut() {
            line.set_hidden_deity(None);
        }
        if missing.is_empty() {
            tracing::trace!(hexagram = %instance.hexagram(), "All six kins present");
            return Ok(());
        }

        let mut palace = HexagramInstance::new(instance.hexagram().palace_hexagram());
        self.najia.bind(&mut palace);
        self.six_kin.bind(&mut palace)?;

        for (line, source) in instance.lines_mut().iter_mut().zip(palace.lines()) {
            let six_kin = source.six_kin()?;
            if missing.contains(&six_kin) {
                line.set_hidden_deity(Some(HiddenDeity {
                    stem_branch: source.stem_branch()?,
                    six_kin,
                }));
            }
        }
        tracing::trace!(
            hexagram = %instance.hexagram(),
            palace = %palace.hexagram(),
            ?missing,
            "Hidden deities attached"
        );
        Ok(())
    }
}
