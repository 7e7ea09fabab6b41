//! Symbolic-star registry and the sixteen traditional calculators.

use std::collections::BTreeMap;
use std::fmt;

use liuyao_calendar::InquiryTime;
use liuyao_types::{
    BranchSet, EarthlyBranch, FivePhase, HeavenlyStem, SymbolicStar, TriangularGroup,
};

use crate::instance::HexagramInstance;
use crate::stars::SymbolicStarCollection;

/// Computes the branches a star falls on, or `None` when it does not apply.
pub type StarCalculator =
    Box<dyn Fn(&InquiryTime, &HexagramInstance) -> Option<BranchSet> + Send + Sync>;

/// Star identifiers mapped to calculators. The first registration of a star
/// wins; later ones are ignored.
pub struct SymbolicStarRegistry {
    calculators: BTreeMap<SymbolicStar, StarCalculator>,
}

impl SymbolicStarRegistry {
    /// A registry with no calculators.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            calculators: BTreeMap::new(),
        }
    }

    /// A registry holding the sixteen built-in stars.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.add_defaults();
        registry
    }

    /// Registers `calculator` for `star` unless the star already has one.
    /// Returns whether it was added.
    pub fn add<F>(&mut self, star: SymbolicStar, calculator: F) -> bool
    where
        F: Fn(&InquiryTime, &HexagramInstance) -> Option<BranchSet> + Send + Sync + 'static,
    {
        if self.calculators.contains_key(&star) {
            tracing::warn!(%star, "Symbolic star already registered; keeping the first calculator");
            return false;
        }
        self.calculators.insert(star, Box::new(calculator));
        true
    }

    /// Detaches the calculator for `star`. Returns whether one existed.
    pub fn remove(&mut self, star: &SymbolicStar) -> bool {
        self.calculators.remove(star).is_some()
    }

    #[must_use]
    pub fn contains(&self, star: &SymbolicStar) -> bool {
        self.calculators.contains_key(star)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.calculators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calculators.is_empty()
    }

    /// Registered stars in identifier order.
    pub fn stars(&self) -> impl Iterator<Item = &SymbolicStar> {
        self.calculators.keys()
    }

    /// Runs every calculator against `instance`, keeping non-empty results.
    #[must_use]
    pub fn calculate(&self, time: &InquiryTime, instance: &HexagramInstance) -> SymbolicStarCollection {
        let results = self.calculators.iter().filter_map(|(star, calculator)| {
            let branches = calculator(time, instance)?;
            tracing::trace!(%star, ?branches, "Symbolic star computed");
            Some((star.clone(), branches))
        });
        SymbolicStarCollection::new(results)
    }

    fn add_defaults(&mut self) {
        let defaults: [(SymbolicStar, fn(&InquiryTime, &HexagramInstance) -> Option<BranchSet>); 16] = [
            // By day stem
            (SymbolicStar::NOBLEMAN, |t, _| Some(nobleman(t.day_stem()))),
            (SymbolicStar::SALARY_SPIRIT, |t, _| Some(salary_spirit(t.day_stem()))),
            (SymbolicStar::CULTURE_FLOURISH, |t, _| Some(culture_flourish(t.day_stem()))),
            (SymbolicStar::YANG_BLADE, |t, _| Some(yang_blade(t.day_stem()))),
            // By the day branch's triangular group
            (SymbolicStar::POST_HORSE, |t, _| Some(by_group(t, POST_HORSE))),
            (SymbolicStar::PEACH_BLOSSOM, |t, _| Some(by_group(t, PEACH_BLOSSOM))),
            (SymbolicStar::GENERALS_STAR, |t, _| Some(by_group(t, GENERALS_STAR))),
            (SymbolicStar::CANOPY, |t, _| Some(by_group(t, CANOPY))),
            (SymbolicStar::STAR_OF_STRATEGY, |t, _| Some(by_group(t, STAR_OF_STRATEGY))),
            (SymbolicStar::DISASTER_MALIGNITY, |t, _| Some(by_group(t, DISASTER_MALIGNITY))),
            (SymbolicStar::ROBBERY_MALIGNITY, |t, _| Some(by_group(t, ROBBERY_MALIGNITY))),
            (SymbolicStar::DEATH_SPIRIT, |t, _| Some(by_group(t, DEATH_SPIRIT))),
            // By month branch
            (SymbolicStar::CELESTIAL_PHYSICIAN, |t, _| {
                Some(BranchSet::of(&[t.month_branch().offset(-1)]))
            }),
            (SymbolicStar::HEAVENLY_JOY, |t, _| Some(heavenly_joy(t.month_branch()))),
            // By hexagram body
            (SymbolicStar::MARRIAGE_BED, |_, h| {
                h.hexagram_body().map(|body| marriage_bed(body.five_phase()))
            }),
            (SymbolicStar::BRIDAL_CHAMBER, |_, h| {
                h.hexagram_body().map(|body| bridal_chamber(body.five_phase()))
            }),
        ];
        for (star, calculator) in defaults {
            self.add(star, calculator);
        }
    }
}

impl Default for SymbolicStarRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for SymbolicStarRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.calculators.keys()).finish()
    }
}

// ============================================================================
// Day-stem tables
// ============================================================================

fn nobleman(stem: HeavenlyStem) -> BranchSet {
    use EarthlyBranch::{Chou, Hai, Mao, Shen, Si, Wei, Wu, Yin, You, Zi};
    match stem {
        HeavenlyStem::Jia | HeavenlyStem::Wu => BranchSet::of(&[Chou, Wei]),
        HeavenlyStem::Yi | HeavenlyStem::Ji => BranchSet::of(&[Zi, Shen]),
        HeavenlyStem::Bing | HeavenlyStem::Ding => BranchSet::of(&[Hai, You]),
        HeavenlyStem::Ren | HeavenlyStem::Gui => BranchSet::of(&[Mao, Si]),
        HeavenlyStem::Geng | HeavenlyStem::Xin => BranchSet::of(&[Wu, Yin]),
    }
}

fn salary_spirit(stem: HeavenlyStem) -> BranchSet {
    use EarthlyBranch::{Hai, Mao, Shen, Si, Wu, Yin, You, Zi};
    let branch = match stem {
        HeavenlyStem::Jia => Yin,
        HeavenlyStem::Yi => Mao,
        HeavenlyStem::Bing | HeavenlyStem::Wu => Si,
        HeavenlyStem::Ding | HeavenlyStem::Ji => Wu,
        HeavenlyStem::Geng => Shen,
        HeavenlyStem::Xin => You,
        HeavenlyStem::Ren => Hai,
        HeavenlyStem::Gui => Zi,
    };
    BranchSet::of(&[branch])
}

fn culture_flourish(stem: HeavenlyStem) -> BranchSet {
    use EarthlyBranch::{Hai, Mao, Shen, Si, Wu, Yin, You, Zi};
    let branch = match stem {
        HeavenlyStem::Jia => Si,
        HeavenlyStem::Yi => Wu,
        HeavenlyStem::Bing | HeavenlyStem::Wu => Shen,
        HeavenlyStem::Ding | HeavenlyStem::Ji => You,
        HeavenlyStem::Geng => Hai,
        HeavenlyStem::Xin => Zi,
        HeavenlyStem::Ren => Yin,
        HeavenlyStem::Gui => Mao,
    };
    BranchSet::of(&[branch])
}

fn yang_blade(stem: HeavenlyStem) -> BranchSet {
    use EarthlyBranch::{Hai, Mao, Shen, Si, Wu, Yin, You, Zi};
    let branch = match stem {
        HeavenlyStem::Jia => Mao,
        HeavenlyStem::Yi => Yin,
        HeavenlyStem::Bing | HeavenlyStem::Wu => Wu,
        HeavenlyStem::Ding | HeavenlyStem::Ji => Si,
        HeavenlyStem::Geng => You,
        HeavenlyStem::Xin => Shen,
        HeavenlyStem::Ren => Zi,
        HeavenlyStem::Gui => Hai,
    };
    BranchSet::of(&[branch])
}

// ============================================================================
// Day-branch tables, one target per triangular group
// ============================================================================

/// Targets for the Yin-Wu-Xu, Hai-Mao-Wei, Si-You-Chou and Shen-Zi-Chen groups.
type GroupTable = [EarthlyBranch; 4];

const POST_HORSE: GroupTable = [EarthlyBranch::Shen, EarthlyBranch::Si, EarthlyBranch::Hai, EarthlyBranch::Yin];
const PEACH_BLOSSOM: GroupTable = [EarthlyBranch::Mao, EarthlyBranch::Chen, EarthlyBranch::Wu, EarthlyBranch::You];
const GENERALS_STAR: GroupTable = [EarthlyBranch::Wu, EarthlyBranch::Mao, EarthlyBranch::You, EarthlyBranch::Zi];
const CANOPY: GroupTable = [EarthlyBranch::Xu, EarthlyBranch::Wei, EarthlyBranch::Chou, EarthlyBranch::Chen];
const STAR_OF_STRATEGY: GroupTable = [EarthlyBranch::Chen, EarthlyBranch::Chou, EarthlyBranch::Wei, EarthlyBranch::Xu];
const DISASTER_MALIGNITY: GroupTable = [EarthlyBranch::Zi, EarthlyBranch::You, EarthlyBranch::Mao, EarthlyBranch::Wu];
const ROBBERY_MALIGNITY: GroupTable = [EarthlyBranch::Hai, EarthlyBranch::Shen, EarthlyBranch::Yin, EarthlyBranch::Si];
const DEATH_SPIRIT: GroupTable = [EarthlyBranch::Si, EarthlyBranch::Yin, EarthlyBranch::Shen, EarthlyBranch::Hai];

fn by_group(time: &InquiryTime, table: GroupTable) -> BranchSet {
    let slot = match time.day_branch().triangular_group() {
        TriangularGroup::YinWuXu => 0,
        TriangularGroup::HaiMaoWei => 1,
        TriangularGroup::SiYouChou => 2,
        TriangularGroup::ShenZiChen => 3,
    };
    BranchSet::of(&[table[slot]])
}

// ============================================================================
// Month-branch and hexagram-body tables
// ============================================================================

/// Spring months to Xu, summer to Chou, autumn to Chen, winter to Wei.
fn heavenly_joy(month: EarthlyBranch) -> BranchSet {
    use EarthlyBranch::{Chen, Chou, Hai, Mao, Shen, Si, Wei, Wu, Xu, Yin, You, Zi};
    let branch = match month {
        Yin | Mao | Chen => Xu,
        Si | Wu | Wei => Chou,
        Shen | You | Xu => Chen,
        Hai | Zi | Chou => Wei,
    };
    BranchSet::of(&[branch])
}

fn marriage_bed(body: FivePhase) -> BranchSet {
    use EarthlyBranch::{Chen, Chou, Hai, Mao, Shen, Si, Wei, Wu, Xu, Yin, You, Zi};
    match body {
        FivePhase::Fire => BranchSet::of(&[Chen, Xu, Chou, Wei]),
        FivePhase::Metal => BranchSet::of(&[Yin, Mao]),
        FivePhase::Water => BranchSet::of(&[Si, Wu]),
        FivePhase::Wood => BranchSet::of(&[Shen, You]),
        FivePhase::Earth => BranchSet::of(&[Hai, Zi]),
    }
}

fn bridal_chamber(body: FivePhase) -> BranchSet {
    use EarthlyBranch::{Chen, Chou, Hai, Mao, Shen, Si, Wei, Wu, Xu, Yin, You, Zi};
    match body {
        FivePhase::Fire => BranchSet::of(&[Shen, You]),
        FivePhase::Metal => BranchSet::of(&[Yin, Mao]),
        FivePhase::Water => BranchSet::of(&[Si, Wu]),
        FivePhase::Wood => BranchSet::of(&[Chen, Xu, Chou, Wei]),
        FivePhase::Earth => BranchSet::of(&[Hai, Zi]),
    }
}
