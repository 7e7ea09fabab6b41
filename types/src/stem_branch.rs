use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Element, FivePhase, YinYang, element};

// ============================================================================
// Heavenly stems
// ============================================================================

element! {
    pub enum HeavenlyStem as "HeavenlyStem" {
        Jia = 1,
        Yi = 2,
        Bing = 3,
        Ding = 4,
        Wu = 5,
        Ji = 6,
        Geng = 7,
        Xin = 8,
        Ren = 9,
        Gui = 10,
    }
}

impl HeavenlyStem {
    /// Zero-based position in the ten-stem cycle.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.value()) - 1
    }

    /// Stem at a cycle position; wraps modulo 10.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    #[must_use]
    pub fn yin_yang(self) -> YinYang {
        YinYang::from_bit(self.value() % 2)
    }

    #[must_use]
    pub fn five_phase(self) -> FivePhase {
        const PHASES: [FivePhase; 5] = [
            FivePhase::Wood,
            FivePhase::Fire,
            FivePhase::Earth,
            FivePhase::Metal,
            FivePhase::Water,
        ];
        PHASES[self.index() / 2]
    }

    /// Five combinations: Jia-Ji, Yi-Geng, Bing-Xin, Ding-Ren, Wu-Gui.
    #[must_use]
    pub fn combines(self, other: Self) -> bool {
        self.value().abs_diff(other.value()) == 5
    }

    /// Four clashes: Jia-Geng, Yi-Xin, Bing-Ren, Ding-Gui. Wu and Ji never clash.
    #[must_use]
    pub fn clashes(self, other: Self) -> bool {
        self.value().abs_diff(other.value()) == 6
    }
}

// ============================================================================
// Earthly branches
// ============================================================================

element! {
    pub enum EarthlyBranch as "EarthlyBranch" {
        Zi = 1,
        Chou = 2,
        Yin = 3,
        Mao = 4,
        Chen = 5,
        Si = 6,
        Wu = 7,
        Wei = 8,
        Shen = 9,
        You = 10,
        Xu = 11,
        Hai = 12,
    }
}

element! {
    /// The four three-branch combinations, named by their members.
    pub enum TriangularGroup as "TriangularGroup" {
        ShenZiChen = 1,
        SiYouChou = 2,
        YinWuXu = 3,
        HaiMaoWei = 4,
    }
}

impl TriangularGroup {
    /// The phase the completed combination forms.
    #[must_use]
    pub fn five_phase(self) -> FivePhase {
        match self {
            Self::ShenZiChen => FivePhase::Water,
            Self::SiYouChou => FivePhase::Metal,
            Self::YinWuXu => FivePhase::Fire,
            Self::HaiMaoWei => FivePhase::Wood,
        }
    }
}

impl EarthlyBranch {
    /// Zero-based position in the twelve-branch cycle.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.value()) - 1
    }

    /// Branch at a cycle position; wraps modulo 12.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Steps forward (or backward, for negative `steps`) around the cycle.
    #[must_use]
    pub fn offset(self, steps: i32) -> Self {
        let index = (self.index() as i32 + steps).rem_euclid(12);
        Self::from_index(index as usize)
    }

    #[must_use]
    pub fn yin_yang(self) -> YinYang {
        YinYang::from_bit(self.value() % 2)
    }

    #[must_use]
    pub fn five_phase(self) -> FivePhase {
        match self {
            Self::Zi | Self::Hai => FivePhase::Water,
            Self::Yin | Self::Mao => FivePhase::Wood,
            Self::Si | Self::Wu => FivePhase::Fire,
            Self::Shen | Self::You => FivePhase::Metal,
            Self::Chou | Self::Chen | Self::Wei | Self::Xu => FivePhase::Earth,
        }
    }

    /// Six clashes: branches six apart.
    #[must_use]
    pub fn clashes(self, other: Self) -> bool {
        self.value().abs_diff(other.value()) == 6
    }

    /// Six harmonies: Zi-Chou, Yin-Hai, Mao-Xu, Chen-You, Si-Shen, Wu-Wei.
    #[must_use]
    pub fn combines(self, other: Self) -> bool {
        matches!(self.value() + other.value(), 3 | 15)
    }

    #[must_use]
    pub fn triangular_group(self) -> TriangularGroup {
        match self.index() % 4 {
            0 => TriangularGroup::ShenZiChen,
            1 => TriangularGroup::SiYouChou,
            2 => TriangularGroup::YinWuXu,
            _ => TriangularGroup::HaiMaoWei,
        }
    }

    /// The phase formed when the three distinct branches complete one
    /// triangular combination.
    ///
    /// ```
    /// use liuyao_types::{EarthlyBranch, FivePhase};
    ///
    /// let (shen, zi, chen) = (EarthlyBranch::Shen, EarthlyBranch::Zi, EarthlyBranch::Chen);
    /// assert_eq!(shen.triangular_combination(zi, chen), Some(FivePhase::Water));
    /// ```
    ///
    /// Stems have no such relation:
    ///
    /// ```compile_fail
    /// use liuyao_types::HeavenlyStem;
    ///
    /// HeavenlyStem::Jia.triangular_combination(HeavenlyStem::Yi, HeavenlyStem::Bing);
    /// ```
    #[must_use]
    pub fn triangular_combination(self, second: Self, third: Self) -> Option<FivePhase> {
        let group = self.triangular_group();
        let distinct = self != second && second != third && self != third;
        (distinct && second.triangular_group() == group && third.triangular_group() == group)
            .then(|| group.five_phase())
    }
}

// ============================================================================
// Stem-branch pairs
// ============================================================================

/// A heavenly stem paired with an earthly branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StemBranch {
    pub stem: HeavenlyStem,
    pub branch: EarthlyBranch,
}

impl StemBranch {
    #[must_use]
    pub const fn new(stem: HeavenlyStem, branch: EarthlyBranch) -> Self {
        Self { stem, branch }
    }

    /// Pair at a position of the sixty-pair cycle, 0 being Jia-Zi. Wraps modulo 60.
    #[must_use]
    pub fn from_cycle_index(index: usize) -> Self {
        Self::new(HeavenlyStem::from_index(index), EarthlyBranch::from_index(index))
    }

    /// Position in the sixty-pair cycle. `None` when stem and branch differ
    /// in polarity, since such a pair never occurs in the cycle.
    #[must_use]
    pub fn cycle_index(self) -> Option<usize> {
        (0..60).find(|&i| Self::from_cycle_index(i) == self)
    }

    /// The two branches left over by the ten-day decade this pair falls in.
    #[must_use]
    pub fn empty_branches(self) -> [EarthlyBranch; 2] {
        let stem = i32::from(self.stem.value()) - 1;
        let branch = i32::from(self.branch.value());
        let head = (branch - stem + 11).rem_euclid(12) + 1;
        [
            EarthlyBranch::from_index(((head + 9) % 12) as usize),
            EarthlyBranch::from_index(((head + 10) % 12) as usize),
        ]
    }

    #[must_use]
    pub fn five_phase(self) -> FivePhase {
        self.branch.five_phase()
    }
}

impl fmt::Display for StemBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

// ============================================================================
// Branch sets
// ============================================================================

/// An ordered set of earthly branches backed by a 12-bit mask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BranchSet(u16);

impl BranchSet {
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub fn of(branches: &[EarthlyBranch]) -> Self {
        branches.iter().copied().collect()
    }

    pub fn insert(&mut self, branch: EarthlyBranch) {
        self.0 |= 1 << branch.index();
    }

    #[must_use]
    pub fn contains(self, branch: EarthlyBranch) -> bool {
        self.0 & (1 << branch.index()) != 0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in branch order.
    pub fn iter(self) -> impl Iterator<Item = EarthlyBranch> {
        EarthlyBranch::ALL
            .iter()
            .copied()
            .filter(move |branch| self.contains(*branch))
    }
}

impl FromIterator<EarthlyBranch> for BranchSet {
    fn from_iter<I: IntoIterator<Item = EarthlyBranch>>(iter: I) -> Self {
        let mut set = Self::empty();
        for branch in iter {
            set.insert(branch);
        }
        set
    }
}

impl fmt::Debug for BranchSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for BranchSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for BranchSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let branches = Vec::<EarthlyBranch>::deserialize(deserializer)?;
        Ok(branches.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_phases_pair_up() {
        assert_eq!(HeavenlyStem::Jia.five_phase(), FivePhase::Wood);
        assert_eq!(HeavenlyStem::Ji.five_phase(), FivePhase::Earth);
        assert_eq!(HeavenlyStem::Gui.five_phase(), FivePhase::Water);
        assert_eq!(HeavenlyStem::Geng.yin_yang(), YinYang::Yang);
        assert_eq!(HeavenlyStem::Xin.yin_yang(), YinYang::Yin);
    }

    #[test]
    fn stem_relations() {
        assert!(HeavenlyStem::Jia.combines(HeavenlyStem::Ji));
        assert!(HeavenlyStem::Gui.combines(HeavenlyStem::Wu));
        assert!(HeavenlyStem::Jia.clashes(HeavenlyStem::Geng));
        assert!(!HeavenlyStem::Wu.clashes(HeavenlyStem::Ji));
        let clashing = HeavenlyStem::ALL
            .iter()
            .filter(|s| HeavenlyStem::ALL.iter().any(|o| s.clashes(*o)))
            .count();
        assert_eq!(clashing, 8);
    }

    #[test]
    fn branch_relations() {
        assert!(EarthlyBranch::Zi.clashes(EarthlyBranch::Wu));
        assert!(EarthlyBranch::Si.clashes(EarthlyBranch::Hai));
        assert!(EarthlyBranch::Yin.combines(EarthlyBranch::Hai));
        assert!(EarthlyBranch::Wu.combines(EarthlyBranch::Wei));
        assert!(!EarthlyBranch::Zi.combines(EarthlyBranch::Hai));
        assert_eq!(EarthlyBranch::Si.yin_yang(), YinYang::Yin);
        assert_eq!(EarthlyBranch::Wu.yin_yang(), YinYang::Yang);
    }

    #[test]
    fn triangular_combinations() {
        assert_eq!(
            EarthlyBranch::Shen.triangular_combination(EarthlyBranch::Zi, EarthlyBranch::Chen),
            Some(FivePhase::Water)
        );
        assert_eq!(
            EarthlyBranch::Wei.triangular_combination(EarthlyBranch::Hai, EarthlyBranch::Mao),
            Some(FivePhase::Wood)
        );
        assert_eq!(
            EarthlyBranch::Yin.triangular_combination(EarthlyBranch::Wu, EarthlyBranch::Wu),
            None
        );
        assert_eq!(
            EarthlyBranch::Yin.triangular_combination(EarthlyBranch::Wu, EarthlyBranch::Hai),
            None
        );
        assert_eq!(EarthlyBranch::Chou.triangular_group(), TriangularGroup::SiYouChou);
    }

    #[test]
    fn branch_offset_wraps_both_ways() {
        assert_eq!(EarthlyBranch::Zi.offset(-1), EarthlyBranch::Hai);
        assert_eq!(EarthlyBranch::Hai.offset(1), EarthlyBranch::Zi);
        assert_eq!(EarthlyBranch::Zi.offset(5), EarthlyBranch::Si);
    }

    #[test]
    fn cycle_index_matches_sexagenary_order() {
        let jia_zi = StemBranch::from_cycle_index(0);
        assert_eq!(jia_zi, StemBranch::new(HeavenlyStem::Jia, EarthlyBranch::Zi));
        let gui_hai = StemBranch::from_cycle_index(59);
        assert_eq!(gui_hai, StemBranch::new(HeavenlyStem::Gui, EarthlyBranch::Hai));
        assert_eq!(gui_hai.cycle_index(), Some(59));
        assert_eq!(
            StemBranch::new(HeavenlyStem::Jia, EarthlyBranch::Chou).cycle_index(),
            None
        );
    }

    #[test]
    fn empty_branches_per_decade() {
        let jia_zi = StemBranch::new(HeavenlyStem::Jia, EarthlyBranch::Zi);
        assert_eq!(jia_zi.empty_branches(), [EarthlyBranch::Xu, EarthlyBranch::Hai]);

        let gui_you = StemBranch::new(HeavenlyStem::Gui, EarthlyBranch::You);
        assert_eq!(gui_you.empty_branches(), [EarthlyBranch::Xu, EarthlyBranch::Hai]);

        let jia_xu = StemBranch::new(HeavenlyStem::Jia, EarthlyBranch::Xu);
        assert_eq!(jia_xu.empty_branches(), [EarthlyBranch::Shen, EarthlyBranch::You]);

        let jia_yin = StemBranch::new(HeavenlyStem::Jia, EarthlyBranch::Yin);
        assert_eq!(jia_yin.empty_branches(), [EarthlyBranch::Zi, EarthlyBranch::Chou]);
    }

    #[test]
    fn branch_set_membership_and_order() {
        let set = BranchSet::of(&[EarthlyBranch::Wei, EarthlyBranch::Chou, EarthlyBranch::Wei]);
        assert_eq!(set.len(), 2);
        assert!(set.contains(EarthlyBranch::Chou));
        assert!(!set.contains(EarthlyBranch::Zi));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![EarthlyBranch::Chou, EarthlyBranch::Wei]
        );
        assert!(BranchSet::empty().is_empty());
    }

    #[test]
    fn branch_set_serializes_as_list() {
        let set = BranchSet::of(&[EarthlyBranch::Zi, EarthlyBranch::Shen]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["Zi","Shen"]"#);
        let back: BranchSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
