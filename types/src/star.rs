use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};

use serde::{Serialize, Serializer};

use crate::CatalogError;

/// First identifier handed to caller-defined stars.
const FIRST_CUSTOM_ID: u32 = 17;

static NEXT_CUSTOM_ID: AtomicU32 = AtomicU32::new(FIRST_CUSTOM_ID);

/// Identifier of an auxiliary star annotation.
///
/// The sixteen traditional stars are associated constants. Further stars can
/// be minted with [`SymbolicStar::custom`]; each call yields a fresh
/// identifier, so two custom stars with the same label are still distinct.
/// Equality, hashing and ordering consider the identifier only.
#[derive(Debug, Clone)]
pub struct SymbolicStar {
    id: u32,
    label: Cow<'static, str>,
}

impl SymbolicStar {
    // ── By day stem ──
    pub const NOBLEMAN: Self = Self::builtin(1, "Nobleman");
    pub const SALARY_SPIRIT: Self = Self::builtin(2, "SalarySpirit");
    pub const CULTURE_FLOURISH: Self = Self::builtin(3, "CultureFlourish");
    pub const YANG_BLADE: Self = Self::builtin(6, "YangBlade");

    // ── By day branch ──
    pub const POST_HORSE: Self = Self::builtin(4, "PostHorse");
    pub const PEACH_BLOSSOM: Self = Self::builtin(5, "PeachBlossom");
    pub const ROBBERY_MALIGNITY: Self = Self::builtin(7, "RobberyMalignity");
    pub const DISASTER_MALIGNITY: Self = Self::builtin(8, "DisasterMalignity");
    pub const GENERALS_STAR: Self = Self::builtin(9, "GeneralsStar");
    pub const CANOPY: Self = Self::builtin(10, "Canopy");
    pub const STAR_OF_STRATEGY: Self = Self::builtin(11, "StarOfStrategy");
    pub const DEATH_SPIRIT: Self = Self::builtin(12, "DeathSpirit");

    // ── By month branch ──
    pub const CELESTIAL_PHYSICIAN: Self = Self::builtin(13, "CelestialPhysician");
    pub const HEAVENLY_JOY: Self = Self::builtin(14, "HeavenlyJoy");

    // ── By hexagram body ──
    pub const MARRIAGE_BED: Self = Self::builtin(15, "MarriageBed");
    pub const BRIDAL_CHAMBER: Self = Self::builtin(16, "BridalChamber");

    const fn builtin(id: u32, label: &'static str) -> Self {
        Self {
            id,
            label: Cow::Borrowed(label),
        }
    }

    /// Mints a caller-defined star with a process-unique identifier.
    pub fn custom(label: impl Into<String>) -> Self {
        let id = NEXT_CUSTOM_ID.fetch_add(1, AtomicOrdering::Relaxed);
        Self {
            id,
            label: Cow::Owned(label.into()),
        }
    }

    /// The sixteen built-in stars, ordered by identifier.
    #[must_use]
    pub fn builtins() -> &'static [Self] {
        &BUILTINS
    }

    /// Looks up a built-in star by label, ignoring ASCII case.
    pub fn from_label(label: &str) -> Result<Self, CatalogError> {
        BUILTINS
            .iter()
            .find(|star| star.label.eq_ignore_ascii_case(label))
            .cloned()
            .ok_or_else(|| CatalogError::UnknownLabel {
                kind: "SymbolicStar",
                label: label.to_string(),
            })
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn is_builtin(&self) -> bool {
        self.id < FIRST_CUSTOM_ID
    }
}

static BUILTINS: [SymbolicStar; 16] = [
    SymbolicStar::NOBLEMAN,
    SymbolicStar::SALARY_SPIRIT,
    SymbolicStar::CULTURE_FLOURISH,
    SymbolicStar::POST_HORSE,
    SymbolicStar::PEACH_BLOSSOM,
    SymbolicStar::YANG_BLADE,
    SymbolicStar::ROBBERY_MALIGNITY,
    SymbolicStar::DISASTER_MALIGNITY,
    SymbolicStar::GENERALS_STAR,
    SymbolicStar::CANOPY,
    SymbolicStar::STAR_OF_STRATEGY,
    SymbolicStar::DEATH_SPIRIT,
    SymbolicStar::CELESTIAL_PHYSICIAN,
    SymbolicStar::HEAVENLY_JOY,
    SymbolicStar::MARRIAGE_BED,
    SymbolicStar::BRIDAL_CHAMBER,
];

impl PartialEq for SymbolicStar {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SymbolicStar {}

impl Hash for SymbolicStar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for SymbolicStar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SymbolicStar {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for SymbolicStar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl Serialize for SymbolicStar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label)
    }
}
