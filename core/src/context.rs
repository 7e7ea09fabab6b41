use chrono::{DateTime, FixedOffset};
use liuyao_calendar::InquiryTime;
use liuyao_types::{Element, Hexagram};

use crate::divination::Divination;
use crate::four_symbols::{self, FourSymbols};
use crate::instance::HexagramInstance;
use crate::stars::SymbolicStarCollection;

/// Mutable state threaded through the stages of one build.
///
/// The original instance exists from construction on. The changed instance
/// exists only when at least one line is changing.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    inquiry_time: InquiryTime,
    four_symbols: FourSymbols,
    original: HexagramInstance,
    changed: Option<HexagramInstance>,
    symbolic_stars: Option<SymbolicStarCollection>,
}

impl PipelineContext {
    /// Derives the original hexagram and its changing lines from
    /// `four_symbols`, plus the changed hexagram when any line moves.
    #[must_use]
    pub fn new(inquiry_time: InquiryTime, four_symbols: FourSymbols) -> Self {
        let hexagram = four_symbols::hexagram_of(&four_symbols);
        let mask = four_symbols::changing_mask(&four_symbols);
        let original = HexagramInstance::with_changing(hexagram, mask);
        let changed =
            (mask != 0).then(|| HexagramInstance::new(Hexagram::from_bits(hexagram.value() ^ mask)));
        tracing::debug!(
            original = %hexagram,
            changed = ?changed.as_ref().map(HexagramInstance::hexagram),
            "Hexagrams derived"
        );
        Self {
            inquiry_time,
            four_symbols,
            original,
            changed,
            symbolic_stars: None,
        }
    }

    #[must_use]
    pub fn solar(&self) -> DateTime<FixedOffset> {
        self.inquiry_time.solar()
    }

    #[must_use]
    pub fn inquiry_time(&self) -> &InquiryTime {
        &self.inquiry_time
    }

    #[must_use]
    pub fn four_symbols(&self) -> &FourSymbols {
        &self.four_symbols
    }

    #[must_use]
    pub fn original(&self) -> &HexagramInstance {
        &self.original
    }

    pub fn original_mut(&mut self) -> &mut HexagramInstance {
        &mut self.original
    }

    #[must_use]
    pub fn changed(&self) -> Option<&HexagramInstance> {
        self.changed.as_ref()
    }

    pub fn changed_mut(&mut self) -> Option<&mut HexagramInstance> {
        self.changed.as_mut()
    }

    /// Both instances at once, for stages that read one while writing the other.
    pub fn instances_mut(&mut self) -> (&mut HexagramInstance, Option<&mut HexagramInstance>) {
        (&mut self.original, self.changed.as_mut())
    }

    #[must_use]
    pub fn symbolic_stars(&self) -> Option<&SymbolicStarCollection> {
        self.symbolic_stars.as_ref()
    }

    pub fn set_symbolic_stars(&mut self, stars: SymbolicStarCollection) {
        self.symbolic_stars = Some(stars);
    }

    pub(crate) fn into_divination(self) -> Divination {
        Divination::new(
            self.inquiry_time,
            self.original,
            self.changed,
            self.symbolic_stars,
        )
    }
}
