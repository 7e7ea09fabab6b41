//! Stem-branch (najia) assignment.

use liuyao_types::{EarthlyBranch, HeavenlyStem, StemBranch, Trigram};

use crate::instance::HexagramInstance;

/// Which half of a hexagram a trigram occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrigramSlot {
    /// Lower trigram, lines one to three.
    Inner,
    /// Upper trigram, lines four to six.
    Outer,
}

/// Assigns a stem-branch pair to every line.
pub trait NajiaProvider: Send + Sync {
    /// The three pairs a trigram contributes in the given slot, bottom first.
    fn table(&self, trigram: Trigram, slot: TrigramSlot) -> [StemBranch; 3];

    fn bind(&self, instance: &mut HexagramInstance) {
        let hexagram = instance.hexagram();
        let inner = self.table(hexagram.lower(), TrigramSlot::Inner);
        let outer = self.table(hexagram.upper(), TrigramSlot::Outer);
        for (line, pair) in instance.lines_mut().iter_mut().zip(inner.into_iter().chain(outer)) {
            line.set_stem_branch(pair);
        }
    }
}

type TrigramTables = [[StemBranch; 3]; 2];

/// Splits a trigram's six-branch sequence into its inner and outer halves.
const fn tables(inner: HeavenlyStem, outer: HeavenlyStem, b: [EarthlyBranch; 6]) -> TrigramTables {
    [
        [
            StemBranch::new(inner, b[0]),
            StemBranch::new(inner, b[1]),
            StemBranch::new(inner, b[2]),
        ],
        [
            StemBranch::new(outer, b[3]),
            StemBranch::new(outer, b[4]),
            StemBranch::new(outer, b[5]),
        ],
    ]
}

// Yang trigrams walk the branches forward two at a time, yin trigrams backward.
const QIAN: TrigramTables = {
    use EarthlyBranch::{Chen, Shen, Wu, Xu, Yin, Zi};
    tables(HeavenlyStem::Jia, HeavenlyStem::Ren, [Zi, Yin, Chen, Wu, Shen, Xu])
};
const ZHEN: TrigramTables = {
    use EarthlyBranch::{Chen, Shen, Wu, Xu, Yin, Zi};
    tables(HeavenlyStem::Geng, HeavenlyStem::Geng, [Zi, Yin, Chen, Wu, Shen, Xu])
};
const KAN: TrigramTables = {
    use EarthlyBranch::{Chen, Shen, Wu, Xu, Yin, Zi};
    tables(HeavenlyStem::Wu, HeavenlyStem::Wu, [Yin, Chen, Wu, Shen, Xu, Zi])
};
const GEN: TrigramTables = {
    use EarthlyBranch::{Chen, Shen, Wu, Xu, Yin, Zi};
    tables(HeavenlyStem::Bing, HeavenlyStem::Bing, [Chen, Wu, Shen, Xu, Zi, Yin])
};
const KUN: TrigramTables = {
    use EarthlyBranch::{Chou, Hai, Mao, Si, Wei, You};
    tables(HeavenlyStem::Yi, HeavenlyStem::Gui, [Wei, Si, Mao, Chou, Hai, You])
};
const XUN: TrigramTables = {
    use EarthlyBranch::{Chou, Hai, Mao, Si, Wei, You};
    tables(HeavenlyStem::Xin, HeavenlyStem::Xin, [Chou, Hai, You, Wei, Si, Mao])
};
const LI: TrigramTables = {
    use EarthlyBranch::{Chou, Hai, Mao, Si, Wei, You};
    tables(HeavenlyStem::Ji, HeavenlyStem::Ji, [Mao, Chou, Hai, You, Wei, Si])
};
const DUI: TrigramTables = {
    use EarthlyBranch::{Chou, Hai, Mao, Si, Wei, You};
    tables(HeavenlyStem::Ding, HeavenlyStem::Ding, [Si, Mao, Chou, Hai, You, Wei])
};

/// The Jing Fang najia tables, precomputed for all sixteen trigram slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNajiaProvider;

impl NajiaProvider for DefaultNajiaProvider {
    fn table(&self, trigram: Trigram, slot: TrigramSlot) -> [StemBranch; 3] {
        let tables = match trigram {
            Trigram::Qian => &QIAN,
            Trigram::Dui => &DUI,
            Trigram::Li => &LI,
            Trigram::Zhen => &ZHEN,
            Trigram::Xun => &XUN,
            Trigram::Kan => &KAN,
            Trigram::Gen => &GEN,
            Trigram::Kun => &KUN,
        };
        let half = match slot {
            TrigramSlot::Inner => tables[0],
            TrigramSlot::Outer => tables[1],
        };
        tracing::trace!(%trigram, ?slot, ?half, "Najia lookup");
        half
    }
}
