mod common;

use common::FakeSystem;
use proptest::prelude::*;
use std::collections::HashSet;
use wintweak::catalog::{BASELINE_RESET, TemplateVars};
use wintweak::models::{Selection, Tier, TweakDefinition};
use wintweak::TweakCatalog;

fn run_all(system: &FakeSystem, commands: &[&str]) {
    let vars = TemplateVars::new().with("domain", "CORP");
    for command in commands {
        system.run(&vars.render(command));
    }
}

#[test]
fn test_extreme_select_all_is_tier_concatenation() {
    let catalog = TweakCatalog::builtin();
    let mut selection = Selection::all_advanced();
    selection.select("disable_transparency");
    selection.select("disable_game_bar");

    let resolved: Vec<&str> = catalog
        .resolve(Tier::Extreme, &selection)
        .into_iter()
        .map(|def| def.id)
        .collect();

    let mut expected: Vec<&str> = catalog
        .tier(Tier::Basic)
        .filter(|def| def.id == "disable_transparency" || def.id == "disable_game_bar")
        .map(|def| def.id)
        .collect();
    for tier in Tier::ADVANCED {
        expected.extend(catalog.tier(tier).map(|def| def.id));
    }

    assert_eq!(resolved.len(), 2 + 14 + 11 + 15);
    assert_eq!(resolved, expected);
}

#[test]
fn test_basic_stays_opt_in_at_every_tier() {
    let catalog = TweakCatalog::builtin();
    for tier in Tier::ALL {
        let resolved = catalog.resolve(tier, &Selection::all_advanced());
        assert!(resolved.iter().all(|def| def.tier != Tier::Basic));
    }
}

#[test]
fn test_baseline_reset_groups() {
    let names: Vec<&str> = BASELINE_RESET.iter().map(|group| group.name).collect();
    assert_eq!(names.len(), 13);
    assert_eq!(names.first(), Some(&"Telemetry"));
    assert!(names.contains(&"Service Start Modes"));
    assert!(BASELINE_RESET.iter().all(|group| !group.commands.is_empty()));
}

#[test]
fn test_inverse_returns_touched_keys_to_defaults() {
    let catalog = TweakCatalog::builtin();

    for def in catalog.iter().filter(|def| def.has_inverse()) {
        let inverse = def.inverse.unwrap();

        let applied_then_reverted = FakeSystem::new("CORP");
        run_all(&applied_then_reverted, def.forward);
        run_all(&applied_then_reverted, inverse);

        let defaults_only = FakeSystem::new("CORP");
        run_all(&defaults_only, inverse);

        assert_eq!(
            applied_then_reverted.state(),
            defaults_only.state(),
            "{} leaves keys its inverse does not reset",
            def.id
        );
    }
}

#[test]
fn test_forward_actions_are_idempotent() {
    let catalog = TweakCatalog::builtin();

    for def in catalog.iter() {
        let once = FakeSystem::new("CORP");
        run_all(&once, def.forward);

        let twice = FakeSystem::new("CORP");
        run_all(&twice, def.forward);
        run_all(&twice, def.forward);

        assert_eq!(once.state(), twice.state(), "{} is not idempotent", def.id);
    }
}

fn tier_strategy() -> impl Strategy<Value = Tier> {
    prop::sample::select(Tier::ALL.to_vec())
}

fn selection_strategy() -> impl Strategy<Value = Selection> {
    let ids: Vec<&'static str> = TweakCatalog::builtin().iter().map(|def| def.id).collect();
    (
        prop::collection::vec(prop::sample::select(ids), 0..20),
        prop::collection::vec(tier_strategy(), 0..4),
    )
        .prop_map(|(picked, whole_tiers)| {
            let mut selection = Selection::new();
            for id in picked {
                selection.select(id);
            }
            for tier in whole_tiers {
                selection.select_all_in(tier);
            }
            selection
        })
}

proptest! {
    #[test]
    fn prop_resolve_is_ordered_unique_and_bounded(
        tier in tier_strategy(),
        selection in selection_strategy(),
    ) {
        let catalog = TweakCatalog::builtin();
        let resolved = catalog.resolve(tier, &selection);

        let mut seen = HashSet::new();
        for def in &resolved {
            prop_assert!(seen.insert(def.id), "duplicate {}", def.id);
            prop_assert!(def.tier <= tier);
            prop_assert!(selection.is_selected(def));
        }

        // Catalog order is tier order, so resolved positions must increase
        let positions: Vec<usize> = resolved
            .iter()
            .map(|def| catalog.iter().position(|d| d.id == def.id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn prop_every_eligible_selection_is_resolved(
        tier in tier_strategy(),
        selection in selection_strategy(),
    ) {
        let catalog = TweakCatalog::builtin();
        let resolved: HashSet<&str> = catalog
            .resolve(tier, &selection)
            .into_iter()
            .map(|def| def.id)
            .collect();

        let eligible: Vec<&TweakDefinition> = catalog
            .iter()
            .filter(|def| def.tier <= tier && selection.is_selected(def))
            .collect();
        prop_assert_eq!(resolved.len(), eligible.len());
        for def in eligible {
            prop_assert!(resolved.contains(def.id));
        }
    }
}
