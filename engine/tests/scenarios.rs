//! Campaign scenarios on the standard map.
//!
//! Drives the resolver with scripted dice through full conquests and checks
//! the secret missions at each step.

use conquest::board::{build_initial_map, Faction, TerritoryMap};
use conquest::config::MapConfig;
use conquest::eval::{is_mission_complete, Mission, SecretMission};
use conquest::resolve::{resolve_on_map, CombatOutcome, ScriptedDice};

const ALASKA: usize = 0;
const GROENLANDIA: usize = 1;
const BRASIL: usize = 2;
const AFRICA_DO_SUL: usize = 3;
const SIBERIA: usize = 4;

fn standard_map() -> TerritoryMap {
    build_initial_map(&MapConfig::standard()).unwrap()
}

fn azul() -> Faction {
    Faction::new("Azul")
}

fn verde() -> Faction {
    Faction::new("Verde")
}

#[test]
fn destroying_verde_completes_the_destroy_mission() {
    let mut map = standard_map();
    let owners: Vec<&str> = map.iter().map(|t| t.owner.as_str()).collect();
    assert_eq!(owners, ["Azul", "Vermelho", "Azul", "Vermelho", "Verde"]);

    // Alaska rolls [6, 1] against Siberia's [1, 6]: one loss each side.
    let mut dice = ScriptedDice::new(vec![6, 1, 1, 6]);
    let outcome = resolve_on_map(&mut map, ALASKA, SIBERIA, &mut dice);
    assert!(!outcome.is_conquest());
    assert_eq!(map[SIBERIA].troops, 1);
    assert_eq!(map[ALASKA].troops, 2);
    assert!(!is_mission_complete(&map, Mission::DestroyFaction, &azul(), &verde()));

    // Brasil finishes the job with a winning first die.
    let mut dice = ScriptedDice::new(vec![5, 5, 5, 2]);
    let outcome = resolve_on_map(&mut map, BRASIL, SIBERIA, &mut dice);
    assert!(outcome.is_conquest());
    assert_eq!(map[SIBERIA].owner, azul());
    assert_eq!(map[SIBERIA].troops, 1);
    assert_eq!(map[BRASIL].troops, 3);
    assert!(is_mission_complete(&map, Mission::DestroyFaction, &azul(), &verde()));
}

#[test]
fn repeated_attacks_eventually_conquer_verde() {
    let mut map = standard_map();
    // Brasil trades one-for-one, then loses a tie, then wins the last pair.
    let mut dice = ScriptedDice::new(vec![3, 1]);
    let mut rounds = 0;
    while map[SIBERIA].owner == verde() {
        assert!(!is_mission_complete(&map, Mission::DestroyFaction, &azul(), &verde()));
        let outcome = resolve_on_map(&mut map, BRASIL, SIBERIA, &mut dice);
        assert!(matches!(outcome, CombatOutcome::Resolved(_)), "Brasil ran out of troops");
        rounds += 1;
        assert!(rounds < 10);
    }
    assert_eq!(rounds, 3);
    assert_eq!(map[SIBERIA].owner, azul());
    assert_eq!(map[SIBERIA].troops, 1);
    assert!(map[BRASIL].troops >= 1);
    assert!(is_mission_complete(&map, Mission::DestroyFaction, &azul(), &verde()));
}

#[test]
fn conquering_the_whole_map_completes_the_conquer_mission() {
    let mut map = standard_map();
    let secret = SecretMission::assign(Mission::ConquerCount, &map, azul(), verde());
    assert_eq!(secret.conquer_goal, 5);
    assert!(!secret.is_complete(&map));

    let check = |map: &TerritoryMap| {
        let free = is_mission_complete(map, Mission::ConquerCount, &azul(), &verde());
        assert_eq!(free, secret.is_complete(map));
        free
    };

    // Brasil (4) takes Groenlandia (2): three attack dice, two defense dice.
    let mut dice = ScriptedDice::new(vec![6, 6, 6, 1, 1]);
    assert!(resolve_on_map(&mut map, BRASIL, GROENLANDIA, &mut dice).is_conquest());
    assert_eq!(map[BRASIL].troops, 3);
    assert_eq!(map.count_owned_by(&azul()), 3);
    assert!(!check(&map));

    // Brasil (3) wears Africa do Sul (3) down to one troop, then takes it.
    let mut dice = ScriptedDice::new(vec![6, 6, 1, 1]);
    assert!(!resolve_on_map(&mut map, BRASIL, AFRICA_DO_SUL, &mut dice).is_conquest());
    assert_eq!(map[AFRICA_DO_SUL].troops, 1);
    assert!(!check(&map));
    let mut dice = ScriptedDice::new(vec![6, 6, 1]);
    assert!(resolve_on_map(&mut map, BRASIL, AFRICA_DO_SUL, &mut dice).is_conquest());
    assert_eq!(map[BRASIL].troops, 2);
    assert_eq!(map.count_owned_by(&azul()), 4);
    assert!(!check(&map));

    // Alaska (3) takes Siberia (2).
    let mut dice = ScriptedDice::new(vec![6, 6, 1, 1]);
    assert!(resolve_on_map(&mut map, ALASKA, SIBERIA, &mut dice).is_conquest());
    assert_eq!(map.count_owned_by(&azul()), 5);
    assert!(check(&map));
    assert!(map.iter().all(|t| t.troops >= 1));
}

#[test]
fn attacking_own_faction_still_resolves() {
    // No adjacency or ownership rules: any territory may attack any other.
    let mut map = standard_map();
    let mut dice = ScriptedDice::new(vec![6, 6, 6, 1, 1]);
    let outcome = resolve_on_map(&mut map, BRASIL, ALASKA, &mut dice);
    let report = outcome.report().unwrap();
    assert_eq!(report.defender_losses, 2);
    assert_eq!(map[ALASKA].owner, azul());
    assert_eq!(map[ALASKA].troops, 1);
}
