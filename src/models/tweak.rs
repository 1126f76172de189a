use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Cumulative tweak tiers, ordered from least to most invasive.
///
/// Applying a tier makes every lower tier eligible as well. The derived
/// `Ord` follows declaration order, so `Tier::Basic < Tier::Extreme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Basic,
    Standard,
    Ultimate,
    Extreme,
}

impl Tier {
    /// All tiers in ascending order
    pub const ALL: [Tier; 4] = [Tier::Basic, Tier::Standard, Tier::Ultimate, Tier::Extreme];

    /// Tiers above Basic. "Select all" for a run covers these only.
    pub const ADVANCED: [Tier; 3] = [Tier::Standard, Tier::Ultimate, Tier::Extreme];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Basic => "Basic",
            Tier::Standard => "Standard",
            Tier::Ultimate => "Ultimate",
            Tier::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Tier::Basic),
            "standard" => Ok(Tier::Standard),
            "ultimate" => Ok(Tier::Ultimate),
            "extreme" => Ok(Tier::Extreme),
            other => Err(format!(
                "unknown tier '{}' (expected basic, standard, ultimate or extreme)",
                other
            )),
        }
    }
}

/// A single catalog entry.
///
/// Actions are command templates executed in declared order. Re-running the
/// forward action must converge on the same end state rather than layer
/// changes on top of each other, which is why every registry write uses
/// `reg add ... /f` and every service change sets an absolute start mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweakDefinition {
    /// Stable identifier, unique across the catalog
    pub id: &'static str,

    /// Human readable name shown in reports
    pub name: &'static str,

    /// Owning tier
    pub tier: Tier,

    /// One line description of the effect
    pub summary: &'static str,

    /// Forward action
    pub forward: &'static [&'static str],

    /// Inverse action returning the touched settings to Windows defaults
    pub inverse: Option<&'static [&'static str]>,

    /// The effect is only complete after a reboot
    pub requires_reboot: bool,
}

impl TweakDefinition {
    /// Whether this definition can be reverted individually
    pub fn has_inverse(&self) -> bool {
        self.inverse.is_some_and(|commands| !commands.is_empty())
    }
}

/// Which tweaks the caller wants for a run.
///
/// Individual identifiers and whole-tier "select all" flags are combined:
/// a definition is selected when its identifier was picked or its tier was
/// selected wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: IndexSet<String>,
    select_all: BTreeSet<Tier>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection with every advanced tier selected wholesale.
    ///
    /// Basic tweaks stay opt-in and must still be picked individually.
    pub fn all_advanced() -> Self {
        let mut selection = Self::new();
        for tier in Tier::ADVANCED {
            selection.select_all_in(tier);
        }
        selection
    }

    /// Builder-style variant of [`select`](Self::select)
    pub fn with(mut self, id: impl Into<String>) -> Self {
        self.select(id);
        self
    }

    /// Pick a single tweak by identifier. Picking twice is a no-op.
    pub fn select(&mut self, id: impl Into<String>) {
        self.selected.insert(id.into());
    }

    /// Select every tweak in `tier`
    pub fn select_all_in(&mut self, tier: Tier) {
        self.select_all.insert(tier);
    }

    pub fn is_selected(&self, definition: &TweakDefinition) -> bool {
        self.select_all.contains(&definition.tier) || self.selected.contains(definition.id)
    }

    /// Individually picked identifiers, in the order they were picked
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.select_all.is_empty()
    }
}
