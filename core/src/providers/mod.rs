//! Stage providers: the calculators each built-in stage delegates to.
//!
//! Every provider is a trait with a default implementation, so a builder can
//! swap one calculator without touching the stage that drives it.

pub mod hidden_deity;
pub mod najia;
pub mod position;
pub mod six_kin;
pub mod six_spirit;
pub mod symbolic_star;

pub use hidden_deity::{DefaultHiddenDeityProvider, HiddenDeityProvider};
pub use najia::{DefaultNajiaProvider, NajiaProvider, TrigramSlot};
pub use position::{DefaultPositionProvider, PositionProvider};
pub use six_kin::{DefaultSixKinProvider, SixKinProvider};
pub use six_spirit::{DefaultSixSpiritProvider, SixSpiritProvider};
pub use symbolic_star::{StarCalculator, SymbolicStarRegistry};
