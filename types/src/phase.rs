use crate::element;

element! {
    pub enum YinYang as "YinYang" {
        Yin = 0,
        Yang = 1,
    }
}

impl YinYang {
    #[must_use]
    pub fn from_bit(bit: u8) -> Self {
        if bit & 1 == 1 { Self::Yang } else { Self::Yin }
    }

    #[must_use]
    pub fn bit(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Self::Yin => Self::Yang,
            Self::Yang => Self::Yin,
        }
    }

    #[must_use]
    pub fn is_yang(self) -> bool {
        self == Self::Yang
    }
}

element! {
    /// The five phases (wu xing).
    pub enum FivePhase as "FivePhase" {
        Metal = 1,
        Water = 2,
        Wood = 3,
        Fire = 4,
        Earth = 5,
    }
}

impl FivePhase {
    /// The phase this one generates: Wood → Fire → Earth → Metal → Water → Wood.
    #[must_use]
    pub fn generated(self) -> Self {
        match self {
            Self::Wood => Self::Fire,
            Self::Fire => Self::Earth,
            Self::Earth => Self::Metal,
            Self::Metal => Self::Water,
            Self::Water => Self::Wood,
        }
    }

    /// The phase this one restrains: Wood → Earth → Water → Fire → Metal → Wood.
    #[must_use]
    pub fn restrained(self) -> Self {
        match self {
            Self::Wood => Self::Earth,
            Self::Earth => Self::Water,
            Self::Water => Self::Fire,
            Self::Fire => Self::Metal,
            Self::Metal => Self::Wood,
        }
    }

    #[must_use]
    pub fn generates(self, other: Self) -> bool {
        self.generated() == other
    }

    #[must_use]
    pub fn generated_by(self, other: Self) -> bool {
        other.generates(self)
    }

    #[must_use]
    pub fn restrains(self, other: Self) -> bool {
        self.restrained() == other
    }

    #[must_use]
    pub fn restrained_by(self, other: Self) -> bool {
        other.restrains(self)
    }
}
