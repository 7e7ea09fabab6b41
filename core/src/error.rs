//! Errors raised while building a divination.
//!
//! None of these are transient: each one is a contract violation by the
//! caller or a pipeline assembled without a stage it needs.

use liuyao_calendar::CalendarError;
use liuyao_types::{CatalogError, LinePosition};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DivinationError {
    /// `build` ran before any input mode was chosen.
    #[error("no hexagram selected; choose an input mode before building")]
    NoHexagramSelected,

    /// Raw four-symbol input had the wrong arity or an unknown value.
    #[error("invalid four-symbol input: {0}")]
    InvalidFourSymbols(#[from] CatalogError),

    /// A stage read an annotation whose owning stage has not run.
    #[error("{annotation} of the {position} line has not been computed; is its stage missing?")]
    NotYetComputed {
        position: LinePosition,
        annotation: &'static str,
    },

    #[error(transparent)]
    Calendar(#[from] CalendarError),
}
