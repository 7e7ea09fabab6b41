use liuyao_types::{FourSymbol, LinePosition, Position, SixKin, SixSpirit, StemBranch, YinYang};
use serde::Serialize;

use crate::error::DivinationError;

/// A line borrowed from the palace hexagram for a kin the visible lines lack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HiddenDeity {
    pub stem_branch: StemBranch,
    pub six_kin: SixKin,
}

/// One line of a hexagram instance and the annotations stages attach to it.
///
/// Stem-branch and six-kin are filled by their stages for every line, so
/// reading them before the stage ran is an error. Role, spirit and hidden
/// deity legitimately stay absent on most lines and read as `Option`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    position: LinePosition,
    yin_yang: YinYang,
    is_changing: bool,
    stem_branch: Option<StemBranch>,
    six_kin: Option<SixKin>,
    role: Option<Position>,
    six_spirit: Option<SixSpirit>,
    hidden_deity: Option<HiddenDeity>,
}

impl Line {
    pub(crate) fn new(position: LinePosition, yin_yang: YinYang) -> Self {
        Self {
            position,
            yin_yang,
            is_changing: false,
            stem_branch: None,
            six_kin: None,
            role: None,
            six_spirit: None,
            hidden_deity: None,
        }
    }

    #[must_use]
    pub fn position(&self) -> LinePosition {
        self.position
    }

    #[must_use]
    pub fn yin_yang(&self) -> YinYang {
        self.yin_yang
    }

    #[must_use]
    pub fn is_changing(&self) -> bool {
        self.is_changing
    }

    #[must_use]
    pub fn four_symbol(&self) -> FourSymbol {
        FourSymbol::from_parts(self.yin_yang, self.is_changing)
    }

    pub fn stem_branch(&self) -> Result<StemBranch, DivinationError> {
        self.stem_branch.ok_or(DivinationError::NotYetComputed {
            position: self.position,
            annotation: "stem-branch",
        })
    }

    pub fn six_kin(&self) -> Result<SixKin, DivinationError> {
        self.six_kin.ok_or(DivinationError::NotYetComputed {
            position: self.position,
            annotation: "six-kin",
        })
    }

    /// World or response, when this line holds one.
    #[must_use]
    pub fn role(&self) -> Option<Position> {
        self.role
    }

    #[must_use]
    pub fn six_spirit(&self) -> Option<SixSpirit> {
        self.six_spirit
    }

    #[must_use]
    pub fn hidden_deity(&self) -> Option<HiddenDeity> {
        self.hidden_deity
    }

    pub(crate) fn set_changing(&mut self, is_changing: bool) {
        self.is_changing = is_changing;
    }

    pub fn set_stem_branch(&mut self, stem_branch: StemBranch) {
        self.stem_branch = Some(stem_branch);
    }

    pub fn set_six_kin(&mut self, six_kin: SixKin) {
        self.six_kin = Some(six_kin);
    }

    pub fn set_role(&mut self, role: Option<Position>) {
        self.role = role;
    }

    pub fn set_six_spirit(&mut self, six_spirit: SixSpirit) {
        self.six_spirit = Some(six_spirit);
    }

    pub fn set_hidden_deity(&mut self, hidden_deity: Option<HiddenDeity>) {
        self.hidden_deity = hidden_deity;
    }
}
