//! Element catalog for six-line divination.
//!
//! This crate contains the closed sets of named values the divination
//! pipeline works with: yin/yang, the five phases, trigrams, hexagrams,
//! heavenly stems, earthly branches and the per-line classification
//! labels. Every value has a byte identity, equality by identity, an
//! enumerator, and lookup by identity. Pure domain types: no IO, no async.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

use std::fmt;
use std::hash::Hash;

use thiserror::Error;

/// Declares a catalog enum with explicit byte discriminants and wires up
/// `Element` and `Display` for it. Variants are listed in catalog order.
macro_rules! element {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[repr(u8)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value ),+
        }

        impl $crate::Element for $name {
            const KIND: &'static str = $kind;
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn value(self) -> u8 {
                self as u8
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::Element::label(*self))
            }
        }
    };
}

pub(crate) use element;

mod hexagram;
mod line;
mod phase;
pub mod settings;
mod star;
mod stem_branch;
mod trigram;

pub use hexagram::{Hexagram, HexagramNature};
pub use line::{FourSymbol, LinePosition, Position, SixKin, SixSpirit};
pub use phase::{FivePhase, YinYang};
pub use star::SymbolicStar;
pub use stem_branch::{BranchSet, EarthlyBranch, HeavenlyStem, StemBranch, TriangularGroup};
pub use trigram::Trigram;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("{value} is not a valid {kind} value")]
    UnknownValue { kind: &'static str, value: u8 },
    #[error("unknown {kind} label: {label:?}")]
    UnknownLabel { kind: &'static str, label: String },
    #[error("{kind} requires exactly {expected} entries, got {actual}")]
    InvalidLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
}

// ============================================================================
// Element trait
// ============================================================================

/// A closed catalog of named values with a byte identity.
///
/// Ordering is by byte identity; `ALL` is the catalog order, which is not
/// necessarily the same thing (trigrams list in their traditional sequence).
pub trait Element: Copy + Eq + Ord + Hash + fmt::Debug + 'static {
    /// Human-readable catalog name, used in error messages.
    const KIND: &'static str;

    /// Every value of the catalog, in catalog order.
    const ALL: &'static [Self];

    fn value(self) -> u8;

    fn label(self) -> &'static str;

    fn from_value(value: u8) -> Result<Self, CatalogError> {
        Self::ALL
            .iter()
            .copied()
            .find(|element| element.value() == value)
            .ok_or(CatalogError::UnknownValue {
                kind: Self::KIND,
                value,
            })
    }

    fn from_label(label: &str) -> Result<Self, CatalogError> {
        Self::ALL
            .iter()
            .copied()
            .find(|element| element.label().eq_ignore_ascii_case(label))
            .ok_or_else(|| CatalogError::UnknownLabel {
                kind: Self::KIND,
                label: label.to_string(),
            })
    }

    /// Stable key of the form `Kind.Label`.
    fn unique_key(self) -> String {
        format!("{}.{}", Self::KIND, self.label())
    }
}

/// Checks a raw slice length against a fixed arity.
pub fn expect_len<T>(kind: &'static str, items: &[T], expected: usize) -> Result<(), CatalogError> {
    if items.len() == expected {
        Ok(())
    } else {
        Err(CatalogError::InvalidLength {
            kind,
            expected,
            actual: items.len(),
        })
    }
}
