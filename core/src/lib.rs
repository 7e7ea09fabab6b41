//! Six-line divination construction pipeline.
//!
//! Takes an inquiry time and a cast or chosen hexagram and annotates every
//! line: stem-branch pairs, world and response, six kins, hidden deities,
//! six spirits, and the symbolic stars of the reading. When lines are
//! changing, a second (changed) hexagram is built alongside the original.
//!
//! # Architecture
//!
//! - [`four_symbols`]: turns each input mode into six line states
//! - [`HexagramInstance`] / [`Line`]: a hexagram plus its annotatable lines
//! - [`providers`]: the calculators (najia tables, position table, six-kin
//!   rules, spirit cycle, hidden deities, star registry)
//! - [`Stage`]: one step over the shared [`PipelineContext`]
//! - [`DivinationBuilder`]: input, calendar and stage list; `build` yields a
//!   [`Divination`]
//!
//! Pure and synchronous: no IO, no async, no shared mutable state between
//! builds.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod builder;
mod context;
mod divination;
mod error;
pub mod four_symbols;
mod instance;
mod line;
pub mod providers;
pub mod stage;
mod stars;

pub use builder::DivinationBuilder;
pub use context::PipelineContext;
pub use divination::Divination;
pub use error::DivinationError;
pub use four_symbols::FourSymbols;
pub use instance::HexagramInstance;
pub use line::{HiddenDeity, Line};
pub use providers::SymbolicStarRegistry;
pub use stage::Stage;
pub use stars::SymbolicStarCollection;
