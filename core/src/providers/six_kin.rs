//! Six-kin classification.

use liuyao_types::{FivePhase, SixKin};

use crate::error::DivinationError;
use crate::instance::HexagramInstance;

/// Classifies each line's phase against a palace phase.
///
/// Reads the stem-branch annotation, so the najia stage must run first.
pub trait SixKinProvider: Send + Sync {
    /// First matching rule wins: the line generating the palace is Parent,
    /// the same phase is Sibling, the palace restraining the line is
    /// Wealth, the line restraining the palace is Officer, and what remains
    /// (the palace generating the line) is Offspring.
    fn classify(&self, palace: FivePhase, line: FivePhase) -> SixKin {
        if line.generates(palace) {
            SixKin::Parent
        } else if line == palace {
            SixKin::Sibling
        } else if palace.restrains(line) {
            SixKin::Wealth
        } else if line.restrains(palace) {
            SixKin::Officer
        } else {
            SixKin::Offspring
        }
    }

    /// Classifies against the instance's own palace.
    fn bind(&self, instance: &mut HexagramInstance) -> Result<(), DivinationError> {
        let palace = instance.palace_phase();
        self.bind_with_palace(instance, palace)
    }

    /// Classifies against an explicit palace phase, as when a changed
    /// hexagram is read against the original palace.
    fn bind_with_palace(
        &self,
        instance: &mut HexagramInstance,
        palace: FivePhase,
    ) -> Result<(), DivinationError> {
        for line in instance.lines_mut() {
            let phase = line.stem_branch()?.five_phase();
            line.set_six_kin(self.classify(palace, phase));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSixKinProvider;

impl SixKinProvider for DefaultSixKinProvider {}
