use std::array;

use liuyao_types::{
    EarthlyBranch, Element, FivePhase, Hexagram, LinePosition, Position, YinYang,
};
use serde::Serialize;

use crate::line::Line;

/// A hexagram with its six annotatable lines.
///
/// The hexagram itself never changes; stages only annotate the lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HexagramInstance {
    hexagram: Hexagram,
    lines: [Line; 6],
}

impl HexagramInstance {
    #[must_use]
    pub fn new(hexagram: Hexagram) -> Self {
        let lines = array::from_fn(|index| {
            Line::new(LinePosition::ALL[index], hexagram.line(index))
        });
        Self { hexagram, lines }
    }

    /// Builds an instance and flags the lines set in `changing_mask`.
    pub(crate) fn with_changing(hexagram: Hexagram, changing_mask: u8) -> Self {
        let mut instance = Self::new(hexagram);
        for (index, line) in instance.lines.iter_mut().enumerate() {
            line.set_changing((changing_mask >> index) & 1 == 1);
        }
        instance
    }

    #[must_use]
    pub fn hexagram(&self) -> Hexagram {
        self.hexagram
    }

    /// Lines from the first (bottom) to the sixth.
    #[must_use]
    pub fn lines(&self) -> &[Line; 6] {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut [Line; 6] {
        &mut self.lines
    }

    #[must_use]
    pub fn line(&self, position: LinePosition) -> &Line {
        &self.lines[position.index()]
    }

    pub fn line_mut(&mut self, position: LinePosition) -> &mut Line {
        &mut self.lines[position.index()]
    }

    #[must_use]
    pub fn palace_phase(&self) -> FivePhase {
        self.hexagram.palace().five_phase()
    }

    /// Bit mask of the changing lines, bit 0 being the first line.
    #[must_use]
    pub fn changing_mask(&self) -> u8 {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.is_changing())
            .fold(0, |mask, (index, _)| mask | (1 << index))
    }

    #[must_use]
    pub fn world_line(&self) -> Option<&Line> {
        self.lines
            .iter()
            .find(|line| line.role() == Some(Position::World))
    }

    #[must_use]
    pub fn response_line(&self) -> Option<&Line> {
        self.lines
            .iter()
            .find(|line| line.role() == Some(Position::Response))
    }

    /// The hexagram body (gua shen) branch.
    ///
    /// Counting starts at Zi for a yang world line and at Wu for a yin one,
    /// then steps forward once per line below the world line. `None` until
    /// the world line has been marked.
    #[must_use]
    pub fn hexagram_body(&self) -> Option<EarthlyBranch> {
        let world = self.world_line()?;
        let start = match world.yin_yang() {
            YinYang::Yang => EarthlyBranch::Zi,
            YinYang::Yin => EarthlyBranch::Wu,
        };
        Some(start.offset(world.position().index() as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_follow_hexagram_bits() {
        let instance = HexagramInstance::new(Hexagram::ComingToMeet);
        let polarities: Vec<_> = instance.lines().iter().map(Line::yin_yang).collect();
        assert_eq!(polarities[0], YinYang::Yin);
        assert!(polarities[1..].iter().all(|p| *p == YinYang::Yang));
        assert_eq!(instance.lines()[5].position(), LinePosition::Sixth);
    }

    #[test]
    fn changing_mask_round_trips() {
        let instance = HexagramInstance::with_changing(Hexagram::Peace, 0b100_001);
        assert!(instance.line(LinePosition::First).is_changing());
        assert!(instance.line(LinePosition::Sixth).is_changing());
        assert!(!instance.line(LinePosition::Third).is_changing());
        assert_eq!(instance.changing_mask(), 0b100_001);
    }

    #[test]
    fn hexagram_body_needs_world_line() {
        let instance = HexagramInstance::new(Hexagram::TheCreative);
        assert_eq!(instance.hexagram_body(), None);
    }

    #[test]
    fn hexagram_body_counts_from_zi_or_wu() {
        let mut creative = HexagramInstance::new(Hexagram::TheCreative);
        creative
            .line_mut(LinePosition::Sixth)
            .set_role(Some(Position::World));
        assert_eq!(creative.hexagram_body(), Some(EarthlyBranch::Si));

        let mut meet = HexagramInstance::new(Hexagram::ComingToMeet);
        meet.line_mut(LinePosition::First)
            .set_role(Some(Position::World));
        assert_eq!(meet.hexagram_body(), Some(EarthlyBranch::Wu));
    }
}
