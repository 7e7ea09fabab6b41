//! Fluent assembly of a divination.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use liuyao_calendar::{AstronomicalCalendar, Calendar, InquiryTime};
use liuyao_types::settings::{
    ChangedKinPalace, DivinationSettings, SixSpiritScheme, UtcOffsetMinutes,
};
use liuyao_types::{FourSymbol, Hexagram, SymbolicStar};

use crate::context::PipelineContext;
use crate::divination::Divination;
use crate::error::DivinationError;
use crate::four_symbols::{self, FourSymbols};
use crate::providers::{
    DefaultHiddenDeityProvider, DefaultNajiaProvider, DefaultPositionProvider,
    DefaultSixKinProvider, DefaultSixSpiritProvider, HiddenDeityProvider, NajiaProvider,
    PositionProvider, SixKinProvider, SixSpiritProvider, SymbolicStarRegistry,
};
use crate::stage::{
    HiddenDeityStage, NajiaStage, PositionStage, SixKinStage, SixSpiritStage, Stage,
    SymbolicStarStage,
};

/// Where the six line states come from. Time-based and number-based casting
/// need the resolved inquiry time, so they resolve inside `build`.
#[derive(Debug, Clone, Copy)]
enum Source {
    FourSymbols(FourSymbols),
    Time,
    Numbers {
        upper: u32,
        lower: u32,
        changing: Option<u32>,
    },
}

impl Source {
    fn resolve(self, time: &InquiryTime) -> FourSymbols {
        match self {
            Self::FourSymbols(symbols) => symbols,
            Self::Time => four_symbols::from_time(time),
            Self::Numbers {
                upper,
                lower,
                changing,
            } => four_symbols::from_numbers(upper, lower, changing, time.day_branch()),
        }
    }
}

/// Assembles the input, the calendar and the stage list for one reading.
///
/// Stages run in the order they are added. Each `with_*` stage method
/// captures the providers configured at the time it is called, so provider
/// overrides must come before the stages that should use them.
pub struct DivinationBuilder {
    solar: DateTime<FixedOffset>,
    source: Option<Source>,
    calendar: Option<Arc<dyn Calendar>>,
    calendar_offset: UtcOffsetMinutes,
    inquiry_time: Option<InquiryTime>,
    najia: Arc<dyn NajiaProvider>,
    six_kin: Arc<dyn SixKinProvider>,
    changed_kin_palace: ChangedKinPalace,
    six_spirit_scheme: SixSpiritScheme,
    disabled_stars: Vec<SymbolicStar>,
    stages: Vec<Box<dyn Stage>>,
}

impl DivinationBuilder {
    #[must_use]
    pub fn new(solar: DateTime<FixedOffset>) -> Self {
        Self {
            solar,
            source: None,
            calendar: None,
            calendar_offset: UtcOffsetMinutes::default(),
            inquiry_time: None,
            najia: Arc::new(DefaultNajiaProvider),
            six_kin: Arc::new(DefaultSixKinProvider),
            changed_kin_palace: ChangedKinPalace::default(),
            six_spirit_scheme: SixSpiritScheme::default(),
            disabled_stars: Vec::new(),
            stages: Vec::new(),
        }
    }

    // ========================================================================
    // Input modes
    // ========================================================================

    #[must_use]
    pub fn use_four_symbols(mut self, four_symbols: [FourSymbol; 6]) -> Self {
        self.source = Some(Source::FourSymbols(four_symbols));
        self
    }

    /// Raw line values, each 6 to 9, exactly six of them.
    pub fn use_four_symbol_values(mut self, values: &[u8]) -> Result<Self, DivinationError> {
        self.source = Some(Source::FourSymbols(four_symbols::from_values(values)?));
        Ok(self)
    }

    /// Plum-blossom casting from the resolved inquiry time.
    #[must_use]
    pub fn use_time_based(mut self) -> Self {
        self.source = Some(Source::Time);
        self
    }

    /// Casting from two numbers. Without `changing`, the changing line
    /// comes from the numbers plus the day branch.
    #[must_use]
    pub fn use_numbers(mut self, upper: u32, lower: u32, changing: Option<u32>) -> Self {
        self.source = Some(Source::Numbers {
            upper,
            lower,
            changing,
        });
        self
    }

    /// An explicit hexagram pair; lines that differ are changing.
    #[must_use]
    pub fn use_hexagrams(mut self, original: Hexagram, changed: Option<Hexagram>) -> Self {
        self.source = Some(Source::FourSymbols(four_symbols::from_hexagrams(
            original, changed,
        )));
        self
    }

    /// Three-coin casting with the thread-local random generator.
    #[must_use]
    pub fn use_coin_toss(mut self) -> Self {
        self.source = Some(Source::FourSymbols(four_symbols::random()));
        self
    }

    /// Three-coin casting; `heads` decides each toss, first line first.
    #[must_use]
    pub fn use_coin_toss_with(mut self, heads: impl FnMut() -> bool) -> Self {
        self.source = Some(Source::FourSymbols(four_symbols::from_coin_tosses(heads)));
        self
    }

    // ========================================================================
    // Time resolution
    // ========================================================================

    /// Replaces the astronomical calendar. A calendar set here is kept even
    /// when settings are applied later.
    #[must_use]
    pub fn with_calendar(mut self, calendar: Arc<dyn Calendar>) -> Self {
        self.calendar = Some(calendar);
        self
    }

    /// Skips calendar conversion and uses `time` as is.
    #[must_use]
    pub fn with_inquiry_time(mut self, time: InquiryTime) -> Self {
        self.inquiry_time = Some(time);
        self
    }

    // ========================================================================
    // Stages
    // ========================================================================

    #[must_use]
    pub fn with_najia(self) -> Self {
        let stage = NajiaStage::new(Arc::clone(&self.najia));
        self.with_stage(stage)
    }

    /// Replaces the najia provider for this and every later stage that
    /// needs one, then adds the najia stage.
    #[must_use]
    pub fn with_najia_provider(mut self, provider: impl NajiaProvider + 'static) -> Self {
        self.najia = Arc::new(provider);
        self.with_najia()
    }

    #[must_use]
    pub fn with_position(self) -> Self {
        self.with_position_provider(DefaultPositionProvider)
    }

    #[must_use]
    pub fn with_position_provider(self, provider: impl PositionProvider + 'static) -> Self {
        self.with_stage(PositionStage::new(Arc::new(provider)))
    }

    #[must_use]
    pub fn with_six_kin(self) -> Self {
        let stage = SixKinStage::new(Arc::clone(&self.six_kin), self.changed_kin_palace);
        self.with_stage(stage)
    }

    /// Replaces the six-kin provider for this and every later stage that
    /// needs one, then adds the six-kin stage.
    #[must_use]
    pub fn with_six_kin_provider(mut self, provider: impl SixKinProvider + 'static) -> Self {
        self.six_kin = Arc::new(provider);
        self.with_six_kin()
    }

    /// Which palace the changed hexagram's six kins are read against.
    /// Affects six-kin stages added afterwards.
    #[must_use]
    pub fn with_changed_kin_palace(mut self, palace: ChangedKinPalace) -> Self {
        self.changed_kin_palace = palace;
        self
    }

    /// Hidden deities from the current najia and six-kin providers.
    #[must_use]
    pub fn with_hidden_deity(self) -> Self {
        let provider =
            DefaultHiddenDeityProvider::new(Arc::clone(&self.najia), Arc::clone(&self.six_kin));
        self.with_hidden_deity_provider(provider)
    }

    #[must_use]
    pub fn with_hidden_deity_provider(self, provider: impl HiddenDeityProvider + 'static) -> Self {
        self.with_stage(HiddenDeityStage::new(Arc::new(provider)))
    }

    #[must_use]
    pub fn with_six_spirit(self) -> Self {
        let scheme = self.six_spirit_scheme;
        self.with_six_spirit_provider(DefaultSixSpiritProvider::new(scheme))
    }

    /// Switches the day-stem scheme, then adds the six-spirit stage.
    #[must_use]
    pub fn with_six_spirit_scheme(mut self, scheme: SixSpiritScheme) -> Self {
        self.six_spirit_scheme = scheme;
        self.with_six_spirit()
    }

    #[must_use]
    pub fn with_six_spirit_provider(self, provider: impl SixSpiritProvider + 'static) -> Self {
        self.with_stage(SixSpiritStage::new(Arc::new(provider)))
    }

    /// The sixteen built-in stars, less any disabled by settings.
    #[must_use]
    pub fn with_symbolic_stars(self) -> Self {
        self.with_symbolic_stars_configured(|_| {})
    }

    /// The built-in registry (less disabled stars), adjusted by `configure`
    /// before the stage is added.
    #[must_use]
    pub fn with_symbolic_stars_configured(
        self,
        configure: impl FnOnce(&mut SymbolicStarRegistry),
    ) -> Self {
        let mut registry = SymbolicStarRegistry::with_defaults();
        for star in &self.disabled_stars {
            registry.remove(star);
        }
        configure(&mut registry);
        self.with_symbolic_star_registry(registry)
    }

    #[must_use]
    pub fn with_symbolic_star_registry(self, registry: SymbolicStarRegistry) -> Self {
        self.with_stage(SymbolicStarStage::new(registry))
    }

    /// Appends a custom stage.
    #[must_use]
    pub fn with_stage(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Najia, position, six kin, hidden deity, six spirit and symbolic stars,
    /// in that order.
    #[must_use]
    pub fn with_default_stages(self) -> Self {
        self.with_najia()
            .with_position()
            .with_six_kin()
            .with_hidden_deity()
            .with_six_spirit()
            .with_symbolic_stars()
    }

    /// Applies resolved settings: six-spirit scheme, changed-hexagram kin
    /// palace, disabled stars and the calendar's reference offset. Affects
    /// stages added afterwards. The offset only reaches the default
    /// astronomical calendar, never one passed to [`Self::with_calendar`].
    #[must_use]
    pub fn with_settings(mut self, settings: &DivinationSettings) -> Self {
        self.six_spirit_scheme = settings.six_spirit_scheme();
        self.changed_kin_palace = settings.changed_kin_palace();
        self.disabled_stars = settings.disabled_stars().to_vec();
        self.calendar_offset = settings.calendar_offset();
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    pub fn build(self) -> Result<Divination, DivinationError> {
        let source = self.source.ok_or(DivinationError::NoHexagramSelected)?;
        let inquiry_time = match self.inquiry_time {
            Some(time) => time,
            None => match &self.calendar {
                Some(calendar) => calendar.convert(self.solar)?,
                None => AstronomicalCalendar::new(self.calendar_offset).convert(self.solar)?,
            },
        };
        let symbols = source.resolve(&inquiry_time);

        let mut context = PipelineContext::new(inquiry_time, symbols);
        for stage in &self.stages {
            tracing::debug!(stage = stage.name(), "Running stage");
            stage.execute(&mut context)?;
        }
        tracing::debug!(stages = self.stages.len(), "Divination built");
        Ok(context.into_divination())
    }
}

impl fmt::Debug for DivinationBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stages: Vec<_> = self.stages.iter().map(|stage| stage.name()).collect();
        f.debug_struct("DivinationBuilder")
            .field("solar", &self.solar)
            .field("source", &self.source)
            .field("inquiry_time", &self.inquiry_time)
            .field("stages", &stages)
            .finish_non_exhaustive()
    }
}
