use chrono::{DateTime, FixedOffset};
use liuyao_calendar::InquiryTime;
use liuyao_types::{FourSymbol, Hexagram};
use serde::Serialize;

use crate::builder::DivinationBuilder;
use crate::error::DivinationError;
use crate::instance::HexagramInstance;
use crate::stars::SymbolicStarCollection;

/// A finished reading. Owns its instances outright; nothing mutates them
/// after the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Divination {
    inquiry_time: InquiryTime,
    original: HexagramInstance,
    changed: Option<HexagramInstance>,
    symbolic_stars: Option<SymbolicStarCollection>,
}

impl Divination {
    pub(crate) fn new(
        inquiry_time: InquiryTime,
        original: HexagramInstance,
        changed: Option<HexagramInstance>,
        symbolic_stars: Option<SymbolicStarCollection>,
    ) -> Self {
        Self {
            inquiry_time,
            original,
            changed,
            symbolic_stars,
        }
    }

    /// Builds from explicit line states with every default stage.
    pub fn from_four_symbols(
        solar: DateTime<FixedOffset>,
        four_symbols: [FourSymbol; 6],
    ) -> Result<Self, DivinationError> {
        DivinationBuilder::new(solar)
            .use_four_symbols(four_symbols)
            .with_default_stages()
            .build()
    }

    /// Builds from raw line values (6 to 9) with every default stage.
    pub fn from_four_symbol_values(
        solar: DateTime<FixedOffset>,
        values: &[u8],
    ) -> Result<Self, DivinationError> {
        DivinationBuilder::new(solar)
            .use_four_symbol_values(values)?
            .with_default_stages()
            .build()
    }

    /// Casts from the inquiry time itself with every default stage.
    pub fn from_time(solar: DateTime<FixedOffset>) -> Result<Self, DivinationError> {
        DivinationBuilder::new(solar)
            .use_time_based()
            .with_default_stages()
            .build()
    }

    /// Casts from two numbers and an optional changing-line number with
    /// every default stage.
    pub fn from_numbers(
        solar: DateTime<FixedOffset>,
        upper: u32,
        lower: u32,
        changing: Option<u32>,
    ) -> Result<Self, DivinationError> {
        DivinationBuilder::new(solar)
            .use_numbers(upper, lower, changing)
            .with_default_stages()
            .build()
    }

    /// Builds from a hexagram pair with every default stage.
    pub fn from_hexagrams(
        solar: DateTime<FixedOffset>,
        original: Hexagram,
        changed: Option<Hexagram>,
    ) -> Result<Self, DivinationError> {
        DivinationBuilder::new(solar)
            .use_hexagrams(original, changed)
            .with_default_stages()
            .build()
    }

    #[must_use]
    pub fn inquiry_time(&self) -> &InquiryTime {
        &self.inquiry_time
    }

    #[must_use]
    pub fn original(&self) -> &HexagramInstance {
        &self.original
    }

    /// Present only when at least one line was changing.
    #[must_use]
    pub fn changed(&self) -> Option<&HexagramInstance> {
        self.changed.as_ref()
    }

    /// Present when the symbolic-star stage ran.
    #[must_use]
    pub fn symbolic_stars(&self) -> Option<&SymbolicStarCollection> {
        self.symbolic_stars.as_ref()
    }
}
