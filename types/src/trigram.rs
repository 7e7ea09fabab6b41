use crate::{Element, FivePhase, YinYang, element};

element! {
    /// The eight trigrams. The byte identity is the 3-bit line pattern,
    /// bit 0 being the bottom line and yang being 1. Catalog order is the
    /// Fuxi sequence used by number-based casting.
    pub enum Trigram as "Trigram" {
        Qian = 0b111,
        Dui = 0b011,
        Li = 0b101,
        Zhen = 0b001,
        Xun = 0b110,
        Kan = 0b010,
        Gen = 0b100,
        Kun = 0b000,
    }
}

impl Trigram {
    /// Decodes a 3-bit pattern. Bits above the third are ignored.
    #[must_use]
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0b111 => Self::Qian,
            0b011 => Self::Dui,
            0b101 => Self::Li,
            0b001 => Self::Zhen,
            0b110 => Self::Xun,
            0b010 => Self::Kan,
            0b100 => Self::Gen,
            _ => Self::Kun,
        }
    }

    /// Maps a casting number onto the Fuxi sequence: remainder 1 is Qian,
    /// 2 is Dui, and so on, with remainder 0 being Kun.
    #[must_use]
    pub fn from_number(number: u32) -> Self {
        match number % 8 {
            0 => Self::Kun,
            rem => Self::ALL[rem as usize - 1],
        }
    }

    #[must_use]
    pub fn five_phase(self) -> FivePhase {
        match self {
            Self::Qian | Self::Dui => FivePhase::Metal,
            Self::Li => FivePhase::Fire,
            Self::Zhen | Self::Xun => FivePhase::Wood,
            Self::Kan => FivePhase::Water,
            Self::Gen | Self::Kun => FivePhase::Earth,
        }
    }

    /// Trigram polarity: an odd count of yang lines makes a yang trigram.
    #[must_use]
    pub fn yin_yang(self) -> YinYang {
        YinYang::from_bit((self.value().count_ones() % 2) as u8)
    }

    /// Line `index` (0 = bottom) of this trigram.
    ///
    /// # Panics
    ///
    /// When `index` is 3 or more.
    #[must_use]
    pub fn line(self, index: usize) -> YinYang {
        assert!(index < 3, "trigram line index {index} out of range 0..3");
        YinYang::from_bit(self.value() >> index)
    }
}
