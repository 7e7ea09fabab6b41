//! World and response lines.

use liuyao_types::{Element, Hexagram, Position};

use crate::instance::HexagramInstance;

/// Marks the world and response lines.
pub trait PositionProvider: Send + Sync {
    /// Array index (0..6) of the world line.
    fn world_index(&self, hexagram: Hexagram) -> usize;

    /// Index of the response line, always three lines from the world.
    fn response_index(&self, hexagram: Hexagram) -> usize {
        (self.world_index(hexagram) + 3) % 6
    }

    fn bind(&self, instance: &mut HexagramInstance) {
        let hexagram = instance.hexagram();
        let world = self.world_index(hexagram);
        let response = self.response_index(hexagram);
        for (index, line) in instance.lines_mut().iter_mut().enumerate() {
            let role = if index == world {
                Some(Position::World)
            } else if index == response {
                Some(Position::Response)
            } else {
                None
            };
            line.set_role(role);
        }
    }
}

/// World line index keyed by which trigram line pairs agree: bit 0 set when
/// lines one and four match, bit 1 for two and five, bit 2 for three and six.
/// Covers the pure, first to fifth world, wandering and returning hexagrams
/// without case analysis.
const WORLD_BY_AGREEMENT: [usize; 8] = [2, 3, 3, 4, 1, 2, 0, 5];

/// Eight-palace world/response placement.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPositionProvider;

impl PositionProvider for DefaultPositionProvider {
    fn world_index(&self, hexagram: Hexagram) -> usize {
        let agreement = !(hexagram.lower().value() ^ hexagram.upper().value()) & 0b111;
        WORLD_BY_AGREEMENT[usize::from(agreement)]
    }
}
