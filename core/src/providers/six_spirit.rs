//! Six-spirit assignment.

use liuyao_types::settings::SixSpiritScheme;
use liuyao_types::{Element, HeavenlyStem, SixSpirit};

use crate::instance::HexagramInstance;

/// Walks the spirit cycle up the lines from a start picked by the day stem.
pub trait SixSpiritProvider: Send + Sync {
    /// Offset into [`SixSpirit::ALL`] for the first line.
    fn start_offset(&self, day_stem: HeavenlyStem) -> usize;

    fn bind(&self, instance: &mut HexagramInstance, day_stem: HeavenlyStem) {
        let start = self.start_offset(day_stem);
        let spirits = SixSpirit::ALL;
        for (index, line) in instance.lines_mut().iter_mut().enumerate() {
            line.set_six_spirit(spirits[(start + index) % spirits.len()]);
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSixSpiritProvider {
    scheme: SixSpiritScheme,
}

impl DefaultSixSpiritProvider {
    #[must_use]
    pub fn new(scheme: SixSpiritScheme) -> Self {
        Self { scheme }
    }

    #[must_use]
    pub fn scheme(&self) -> SixSpiritScheme {
        self.scheme
    }
}

impl SixSpiritProvider for DefaultSixSpiritProvider {
    fn start_offset(&self, day_stem: HeavenlyStem) -> usize {
        self.scheme.start_offset(day_stem)
    }
}

#[cfg(test)]
mod tests {
    use liuyao_types::{Hexagram, LinePosition};

    use super::*;

    fn spirits(provider: DefaultSixSpiritProvider, day_stem: HeavenlyStem) -> Vec<SixSpirit> {
        let mut instance = HexagramInstance::new(Hexagram::Peace);
        provider.bind(&mut instance, day_stem);
        instance
            .lines()
            .iter()
            .map(|line| line.six_spirit().unwrap())
            .collect()
    }

    #[test]
    fn jia_day_starts_at_azure_dragon() {
        assert_eq!(
            spirits(DefaultSixSpiritProvider::default(), HeavenlyStem::Jia),
            SixSpirit::ALL
        );
    }

    #[test]
    fn cycle_wraps_past_black_tortoise() {
        let lines = spirits(DefaultSixSpiritProvider::default(), HeavenlyStem::Geng);
        assert_eq!(lines[0], SixSpirit::WhiteTiger);
        assert_eq!(lines[1], SixSpirit::BlackTortoise);
        assert_eq!(lines[2], SixSpirit::AzureDragon);
        assert_eq!(lines[5], SixSpirit::CoiledSnake);
    }

    #[test]
    fn schemes_differ_on_late_stems() {
        let traditional = DefaultSixSpiritProvider::new(SixSpiritScheme::Traditional);
        let paired = DefaultSixSpiritProvider::new(SixSpiritScheme::Paired);

        assert_eq!(spirits(traditional, HeavenlyStem::Gui)[0], SixSpirit::BlackTortoise);
        assert_eq!(spirits(paired, HeavenlyStem::Gui)[0], SixSpirit::WhiteTiger);
        assert_eq!(spirits(traditional, HeavenlyStem::Ji)[0], SixSpirit::CoiledSnake);
        assert_eq!(spirits(paired, HeavenlyStem::Ji)[0], SixSpirit::HookChen);
        for stem in [HeavenlyStem::Jia, HeavenlyStem::Ding, HeavenlyStem::Wu] {
            assert_eq!(spirits(traditional, stem), spirits(paired, stem), "{stem}");
        }
    }

    #[test]
    fn every_line_gets_a_distinct_spirit() {
        for &stem in HeavenlyStem::ALL {
            let mut instance = HexagramInstance::new(Hexagram::TheWell);
            DefaultSixSpiritProvider::default().bind(&mut instance, stem);
            let mut seen: Vec<_> = LinePosition::ALL
                .iter()
                .map(|&position| instance.line(position).six_spirit().unwrap())
                .collect();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), 6, "{stem}");
        }
    }
}
