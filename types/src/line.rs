use crate::{CatalogError, Element, YinYang, element, expect_len};

element! {
    /// Line state as cast: old lines are changing.
    pub enum FourSymbol as "FourSymbol" {
        OldYin = 6,
        YoungYang = 7,
        YoungYin = 8,
        OldYang = 9,
    }
}

impl FourSymbol {
    #[must_use]
    pub fn from_parts(yin_yang: YinYang, changing: bool) -> Self {
        match (yin_yang, changing) {
            (YinYang::Yin, true) => Self::OldYin,
            (YinYang::Yin, false) => Self::YoungYin,
            (YinYang::Yang, true) => Self::OldYang,
            (YinYang::Yang, false) => Self::YoungYang,
        }
    }

    #[must_use]
    pub fn yin_yang(self) -> YinYang {
        match self {
            Self::YoungYang | Self::OldYang => YinYang::Yang,
            Self::OldYin | Self::YoungYin => YinYang::Yin,
        }
    }

    #[must_use]
    pub fn is_changing(self) -> bool {
        matches!(self, Self::OldYin | Self::OldYang)
    }

    /// Validates six raw line values (each 6..=9).
    pub fn sequence_from_values(values: &[u8]) -> Result<[Self; 6], CatalogError> {
        expect_len(Self::KIND, values, 6)?;
        let mut symbols = [Self::YoungYang; 6];
        for (slot, &value) in symbols.iter_mut().zip(values) {
            *slot = Self::from_value(value)?;
        }
        Ok(symbols)
    }
}

element! {
    pub enum LinePosition as "LinePosition" {
        First = 1,
        Second = 2,
        Third = 3,
        Fourth = 4,
        Fifth = 5,
        Sixth = 6,
    }
}

impl LinePosition {
    /// Array index, 0 for the first line.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.value()) - 1
    }

    pub fn from_index(index: usize) -> Result<Self, CatalogError> {
        let value = u8::try_from(index + 1).unwrap_or(u8::MAX);
        Self::from_value(value)
    }
}

element! {
    /// World and response roles.
    pub enum Position as "Position" {
        World = 1,
        Response = 2,
    }
}

element! {
    /// Kinship of a line's phase relative to the palace phase.
    pub enum SixKin as "SixKin" {
        Parent = 1,
        Sibling = 2,
        Wealth = 3,
        Officer = 4,
        Offspring = 5,
    }
}

element! {
    /// Spirits in their cyclic order.
    pub enum SixSpirit as "SixSpirit" {
        AzureDragon = 1,
        VermilionBird = 2,
        HookChen = 3,
        CoiledSnake = 4,
        WhiteTiger = 5,
        BlackTortoise = 6,
    }
}
