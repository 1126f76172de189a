//! The tweak catalog.
//!
//! [`TweakCatalog`] indexes every [`TweakDefinition`] by identifier while
//! keeping declaration order, which is also the order tweaks run in. The
//! built-in tables live in `tiers`; the defaults re-applied by every restore
//! live in [`baseline`].
//!
//! # Resolution
//!
//! Tiers are cumulative. Resolving tier `T` walks every tier up to and
//! including `T`, lowest first, and keeps each definition the [`Selection`]
//! covers:
//!
//! ```ignore
//! let catalog = TweakCatalog::builtin();
//! let mut selection = Selection::all_advanced().with("disable_transparency");
//! let plan = catalog.resolve(Tier::Extreme, &selection);
//! assert_eq!(plan[0].id, "disable_transparency");
//! ```

pub mod baseline;
pub mod template;
mod tiers;

pub use baseline::{BASELINE_RESET, BaselineGroup};
pub use template::{TemplateVars, uses_placeholder};

use crate::models::{Selection, Tier, TweakDefinition};
use indexmap::{IndexMap, IndexSet};

/// Indexed, immutable collection of tweak definitions
#[derive(Debug, Clone)]
pub struct TweakCatalog {
    definitions: IndexMap<&'static str, TweakDefinition>,
}

impl TweakCatalog {
    /// Build a catalog from `definitions`.
    ///
    /// Definitions are regrouped by tier (stable within a tier). A repeated
    /// identifier keeps its first definition.
    pub fn new(definitions: impl IntoIterator<Item = TweakDefinition>) -> Self {
        let mut all: Vec<TweakDefinition> = definitions.into_iter().collect();
        all.sort_by_key(|def| def.tier);

        let mut indexed = IndexMap::with_capacity(all.len());
        for def in all {
            if indexed.contains_key(def.id) {
                tracing::warn!("Duplicate tweak id '{}' ignored", def.id);
                continue;
            }
            indexed.insert(def.id, def);
        }

        Self {
            definitions: indexed,
        }
    }

    /// The catalog shipped with the optimizer
    pub fn builtin() -> Self {
        Self::new(
            tiers::BASIC
                .iter()
                .chain(tiers::STANDARD)
                .chain(tiers::ULTIMATE)
                .chain(tiers::EXTREME)
                .cloned(),
        )
    }

    pub fn get(&self, id: &str) -> Option<&TweakDefinition> {
        self.definitions.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Every definition in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &TweakDefinition> {
        self.definitions.values()
    }

    /// Definitions belonging strictly to `tier`, in declaration order
    pub fn tier(&self, tier: Tier) -> impl Iterator<Item = &TweakDefinition> {
        self.iter().filter(move |def| def.tier == tier)
    }

    /// Groups re-applied after every restore
    pub fn baseline(&self) -> &'static [BaselineGroup] {
        BASELINE_RESET
    }

    /// Ordered list of definitions a run at `tier` should apply.
    ///
    /// Tiers are concatenated low to high; within a tier declaration order
    /// is kept. Picked identifiers from tiers above `tier` are ignored, and
    /// identifiers the catalog does not know are logged and skipped.
    pub fn resolve(&self, tier: Tier, selection: &Selection) -> Vec<&TweakDefinition> {
        for id in selection.ids() {
            match self.get(id) {
                None => tracing::warn!("Selected tweak '{}' is not in the catalog", id),
                Some(def) if def.tier > tier => tracing::debug!(
                    "Selected tweak '{}' belongs to {} and is outside a {} run",
                    id,
                    def.tier,
                    tier
                ),
                Some(_) => {}
            }
        }

        let mut seen = IndexSet::new();
        let resolved: Vec<&TweakDefinition> = Tier::ALL
            .iter()
            .filter(|&&t| t <= tier)
            .flat_map(|&t| self.tier(t))
            .filter(|def| selection.is_selected(def))
            .filter(|def| seen.insert(def.id))
            .collect();

        tracing::debug!(
            "Resolved {} tweak(s) for a {} run",
            resolved.len(),
            tier
        );
        resolved
    }
}

impl Default for TweakCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_tier_sizes() {
        let catalog = TweakCatalog::builtin();
        assert_eq!(catalog.tier(Tier::Basic).count(), 12);
        assert_eq!(catalog.tier(Tier::Standard).count(), 14);
        assert_eq!(catalog.tier(Tier::Ultimate).count(), 11);
        assert_eq!(catalog.tier(Tier::Extreme).count(), 15);
        assert_eq!(catalog.len(), 52);
    }

    #[test]
    fn test_builtin_ids_unique_and_tiers_consistent() {
        let catalog = TweakCatalog::builtin();
        let ids: HashSet<_> = catalog.iter().map(|def| def.id).collect();
        assert_eq!(ids.len(), catalog.len());

        for tier in Tier::ALL {
            assert!(catalog.tier(tier).all(|def| def.tier == tier));
        }
    }

    #[test]
    fn test_builtin_actions_nonempty() {
        for def in TweakCatalog::builtin().iter() {
            assert!(!def.forward.is_empty(), "{} has no forward action", def.id);
            if let Some(inverse) = def.inverse {
                assert!(!inverse.is_empty(), "{} has an empty inverse", def.id);
            }
        }
    }

    #[test]
    fn test_one_shot_tweaks_have_no_inverse() {
        let catalog = TweakCatalog::builtin();
        for id in [
            "disable_startup_apps",
            "disk_defrag_trim",
            "clear_session_cookies",
            "remove_bloat_apps",
            "cleanup_temp_files",
        ] {
            assert!(!catalog.get(id).unwrap().has_inverse(), "{}", id);
        }
        assert!(catalog.get("disable_transparency").unwrap().has_inverse());
    }

    #[test]
    fn test_only_domain_trust_uses_domain_placeholder() {
        let users: Vec<_> = TweakCatalog::builtin()
            .iter()
            .filter(|def| def.forward.iter().any(|c| uses_placeholder(c, "domain")))
            .map(|def| def.id)
            .collect();
        assert_eq!(users, vec!["fix_domain_trust"]);
    }

    #[test]
    fn test_resolve_basic_is_opt_in() {
        let catalog = TweakCatalog::builtin();
        let plan = catalog.resolve(Tier::Extreme, &Selection::all_advanced());
        assert!(plan.iter().all(|def| def.tier != Tier::Basic));
        assert_eq!(plan.len(), 14 + 11 + 15);
    }

    #[test]
    fn test_resolve_ignores_higher_tier_picks() {
        let catalog = TweakCatalog::builtin();
        let selection = Selection::new()
            .with("disable_transparency")
            .with("disable_defender")
            .with("no_such_tweak");
        let plan = catalog.resolve(Tier::Standard, &selection);
        let ids: Vec<_> = plan.iter().map(|def| def.id).collect();
        assert_eq!(ids, vec!["disable_transparency"]);
    }

    #[test]
    fn test_resolve_dedupes_tier_and_individual_selection() {
        let catalog = TweakCatalog::builtin();
        let mut selection = Selection::new().with("disable_timeline");
        selection.select_all_in(Tier::Standard);
        let plan = catalog.resolve(Tier::Standard, &selection);
        assert_eq!(plan.len(), 14);
        assert_eq!(
            plan.iter().filter(|def| def.id == "disable_timeline").count(),
            1
        );
    }

    #[test]
    fn test_new_keeps_first_duplicate_and_groups_by_tier() {
        let first = TweakDefinition {
            id: "a",
            name: "First",
            tier: Tier::Ultimate,
            summary: "",
            forward: &["echo a"],
            inverse: None,
            requires_reboot: false,
        };
        let dup = TweakDefinition {
            name: "Second",
            ..first.clone()
        };
        let basic = TweakDefinition {
            id: "b",
            tier: Tier::Basic,
            ..first.clone()
        };

        let catalog = TweakCatalog::new([first, dup, basic]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("a").unwrap().name, "First");
        let order: Vec<_> = catalog.iter().map(|def| def.id).collect();
        assert_eq!(order, vec!["b", "a"]);
    }
}
