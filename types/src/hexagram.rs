use crate::{Element, Trigram, YinYang, element};

element! {
    /// The sixty-four hexagrams. The byte identity is the 6-bit line
    /// pattern `upper << 3 | lower`. Catalog order walks the eight palaces,
    /// each listing its pure hexagram, the first through fifth worlds, the
    /// wandering soul and the returning soul.
    pub enum Hexagram as "Hexagram" {
        // Qian palace
        TheCreative = 0b111_111,
        ComingToMeet = 0b111_110,
        Retreat = 0b111_100,
        Standstill = 0b111_000,
        Contemplation = 0b110_000,
        SplittingApart = 0b100_000,
        Progress = 0b101_000,
        PossessionInGreatMeasure = 0b101_111,
        // Dui palace
        TheJoyous = 0b011_011,
        Oppression = 0b011_010,
        GatheringTogether = 0b011_000,
        Influence = 0b011_100,
        Obstruction = 0b010_100,
        Modesty = 0b000_100,
        PreponderanceOfTheSmall = 0b001_100,
        TheMarryingMaiden = 0b001_011,
        // Li palace
        TheClinging = 0b101_101,
        TheWanderer = 0b101_100,
        TheCauldron = 0b101_110,
        BeforeCompletion = 0b101_010,
        YouthfulFolly = 0b100_010,
        Dispersion = 0b110_010,
        Conflict = 0b111_010,
        FellowshipWithMen = 0b111_101,
        // Zhen palace
        TheArousing = 0b001_001,
        Enthusiasm = 0b001_000,
        Deliverance = 0b001_010,
        Duration = 0b001_110,
        PushingUpward = 0b000_110,
        TheWell = 0b010_110,
        PreponderanceOfTheGreat = 0b011_110,
        Following = 0b011_001,
        // Xun palace
        TheGentle = 0b110_110,
        TheTamingPowerOfTheSmall = 0b110_111,
        TheFamily = 0b110_101,
        Increase = 0b110_001,
        Innocence = 0b111_001,
        BitingThrough = 0b101_001,
        TheCornersOfTheMouth = 0b100_001,
        WorkOnTheDecayed = 0b100_110,
        // Kan palace
        TheAbysmal = 0b010_010,
        Limitation = 0b010_011,
        DifficultyAtTheBeginning = 0b010_001,
        AfterCompletion = 0b010_101,
        Revolution = 0b011_101,
        Abundance = 0b001_101,
        DarkeningOfTheLight = 0b000_101,
        TheArmy = 0b000_010,
        // Gen palace
        KeepingStill = 0b100_100,
        Grace = 0b100_101,
        TheTamingPowerOfTheGreat = 0b100_111,
        Decrease = 0b100_011,
        Opposition = 0b101_011,
        Treading = 0b111_011,
        InnerTruth = 0b110_011,
        Development = 0b110_100,
        // Kun palace
        TheReceptive = 0b000_000,
        Return = 0b000_001,
        Approach = 0b000_011,
        Peace = 0b000_111,
        ThePowerOfTheGreat = 0b001_111,
        BreakThrough = 0b011_111,
        Waiting = 0b010_111,
        HoldingTogether = 0b010_000,
    }
}

element! {
    /// Structural classification a hexagram may carry.
    pub enum HexagramNature as "HexagramNature" {
        SixClashes = 1,
        SixHarmonies = 2,
        WanderingSoul = 3,
        ReturningSoul = 4,
    }
}

const HEXAGRAM_COUNT: usize = 64;

/// Line pattern → hexagram.
const BY_BITS: [Hexagram; HEXAGRAM_COUNT] = {
    let all = <Hexagram as Element>::ALL;
    let mut table = [Hexagram::TheReceptive; HEXAGRAM_COUNT];
    let mut i = 0;
    while i < all.len() {
        table[all[i] as usize] = all[i];
        i += 1;
    }
    table
};

/// Line pattern → position in catalog order.
const CATALOG_INDEX: [u8; HEXAGRAM_COUNT] = {
    let all = <Hexagram as Element>::ALL;
    let mut table = [0u8; HEXAGRAM_COUNT];
    let mut i = 0;
    while i < all.len() {
        table[all[i] as usize] = i as u8;
        i += 1;
    }
    table
};

impl Hexagram {
    /// Decodes a 6-bit line pattern. Bits above the sixth are ignored.
    #[must_use]
    pub fn from_bits(bits: u8) -> Self {
        BY_BITS[usize::from(bits & 0b11_1111)]
    }

    #[must_use]
    pub fn from_trigrams(upper: Trigram, lower: Trigram) -> Self {
        Self::from_bits(upper.value() << 3 | lower.value())
    }

    #[must_use]
    pub fn upper(self) -> Trigram {
        Trigram::from_bits(self.value() >> 3)
    }

    #[must_use]
    pub fn lower(self) -> Trigram {
        Trigram::from_bits(self.value())
    }

    /// Line `index` (0 = first/bottom line).
    ///
    /// # Panics
    ///
    /// When `index` is 6 or more.
    #[must_use]
    pub fn line(self, index: usize) -> YinYang {
        assert!(index < 6, "hexagram line index {index} out of range 0..6");
        YinYang::from_bit(self.value() >> index)
    }

    /// The trigram whose eight-hexagram family this hexagram belongs to.
    #[must_use]
    pub fn palace(self) -> Trigram {
        Trigram::ALL[self.palace_stage_index() / 8]
    }

    /// The pure hexagram formed by doubling this hexagram's palace trigram.
    #[must_use]
    pub fn palace_hexagram(self) -> Self {
        let palace = self.palace();
        Self::from_trigrams(palace, palace)
    }

    /// 0 for the pure hexagram, 1..=5 for the worlds, 6 for the wandering
    /// soul and 7 for the returning soul.
    #[must_use]
    pub fn palace_stage(self) -> u8 {
        (self.palace_stage_index() % 8) as u8
    }

    fn palace_stage_index(self) -> usize {
        usize::from(CATALOG_INDEX[usize::from(self.value())])
    }

    #[must_use]
    pub fn nature(self) -> Option<HexagramNature> {
        match self {
            Self::Innocence | Self::ThePowerOfTheGreat => Some(HexagramNature::SixClashes),
            Self::Standstill
            | Self::Peace
            | Self::Limitation
            | Self::Oppression
            | Self::TheWanderer
            | Self::Grace
            | Self::Enthusiasm
            | Self::Return => Some(HexagramNature::SixHarmonies),
            _ => match self.palace_stage() {
                0 => Some(HexagramNature::SixClashes),
                6 => Some(HexagramNature::WanderingSoul),
                7 => Some(HexagramNature::ReturningSoul),
                _ => None,
            },
        }
    }

    /// Nuclear hexagram: lines 2-4 as the lower trigram, lines 3-5 as the upper.
    #[must_use]
    pub fn nuclear(self) -> Self {
        let bits = self.value();
        let lower = (bits >> 1) & 0b111;
        let upper = (bits >> 2) & 0b111;
        Self::from_bits(upper << 3 | lower)
    }

    /// Every line flipped.
    #[must_use]
    pub fn opposite(self) -> Self {
        Self::from_bits(!self.value())
    }

    /// Line order reversed: the top line becomes the first.
    #[must_use]
    pub fn inverted(self) -> Self {
        Self::from_bits(self.value().reverse_bits() >> 2)
    }
}
