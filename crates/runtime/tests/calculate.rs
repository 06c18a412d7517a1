//! End-to-end attack calculations through the runtime calculator.

use std::fs;

use rules_core::{
    Attribute, AttackOutcome, Attributes, CalculationRequest, CyberModsState, PcgRng,
    SequenceRng, SerializedCyberMods, StatusContext, TagSelections, WeaponConfig, WeaponFlags,
    WeaponType, serialize_cyber_mods,
};
use runtime::{Calculator, CalculatorConfig, RuntimeError};
use tempfile::tempdir;

fn calculator() -> Calculator {
    Calculator::builtin().expect("embedded catalog should load")
}

fn is_tenth_multiple(value: f64) -> bool {
    ((value * 10.0).round() - value * 10.0).abs() < 1e-6
}

#[test]
fn unarmed_attack_always_hits() {
    let calculator = calculator();
    let attrs = Attributes::default();
    let tags = TagSelections::new();
    let mods = SerializedCyberMods::new();
    let weapon = WeaponConfig::of(WeaponType::UnarmedMelee, 0.0);
    let request = CalculationRequest::new(&attrs, &tags, &mods, &weapon)
        .with_status(StatusContext::new(100.0));

    for seed in 0..200 {
        let result = calculator
            .calculate_with(&request, &mut PcgRng::seeded(seed))
            .unwrap();
        assert_eq!(result.hit_chance, 1.0);
        assert!(result.outcome.is_hit(), "seed {seed} missed");
        assert!(!result.trace.contains("Result: MISS"));
    }

    let trace = calculator
        .compute_damage(&attrs, &tags, &mods, &weapon, StatusContext::default())
        .unwrap();
    assert!(trace.contains("Hit Chance: 100%"));
}

#[test]
fn ranged_base_hit_chance_without_modifiers() {
    let calculator = calculator();
    let attrs = Attributes::default();
    let tags = TagSelections::new();
    let mods = SerializedCyberMods::new();
    let weapon = WeaponConfig::of(WeaponType::RangedAttack, 30.0);
    let request = CalculationRequest::new(&attrs, &tags, &mods, &weapon);

    let result = calculator
        .calculate_with(&request, &mut PcgRng::seeded(11))
        .unwrap();
    assert_eq!(result.hit_chance, 0.57);
    assert!(result.trace.contains("Hit Chance: 57%"));
    assert!(result.trace.starts_with("Attack: RANGED (ranged)"));
}

#[test]
fn body_mod_raises_only_body() {
    let calculator = calculator();
    let attrs = Attributes::default();
    let tags = TagSelections::new();
    let state = calculator
        .empty_installation()
        .with_mod("Arms", "gorilla_arms");
    let mods = serialize_cyber_mods(&state);
    let weapon = WeaponConfig::of(WeaponType::UnarmedMelee, 0.0);
    let request = CalculationRequest::new(&attrs, &tags, &mods, &weapon);

    let result = calculator
        .calculate_with(&request, &mut PcgRng::seeded(3))
        .unwrap();
    for attribute in Attribute::ALL {
        let expected = if attribute == Attribute::Body { 15.0 } else { 10.0 };
        assert_eq!(result.effective_attributes.get(attribute), expected, "{attribute}");
    }
    assert!(result.skipped.is_empty());
}

#[test]
fn operating_system_tier_selects_bonus() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("systems")).unwrap();
    fs::write(
        dir.path().join("systems").join("operating_system.json"),
        r#"{ "system": "Operating System", "mods": [
            { "id": "reflex_os", "name": "Reflex OS",
              "base_effects": { "willpower_add": 1 },
              "tiers": { "3": { "reflex_add": 2 } } }
        ] }"#,
    )
    .unwrap();
    fs::write(dir.path().join("tags.json"), r#"{ "items": {} }"#).unwrap();

    let config = CalculatorConfig::default().with_data_dir(dir.path());
    let calculator = Calculator::from_config(&config).unwrap();

    let attrs = Attributes::default();
    let tags = TagSelections::new();
    let weapon = WeaponConfig::of(WeaponType::UnarmedMelee, 0.0);
    let effective = |tier: &str| {
        let state = calculator
            .empty_installation()
            .with_mod("Operating System", "reflex_os")
            .with_tier("Operating System", tier);
        let mods = serialize_cyber_mods(&state);
        let request = CalculationRequest::new(&attrs, &tags, &mods, &weapon);
        calculator
            .calculate_with(&request, &mut PcgRng::seeded(5))
            .unwrap()
            .effective_attributes
    };

    let tier3 = effective("3");
    assert_eq!(tier3.get(Attribute::Reflexes), 12.0);
    assert_eq!(tier3.get(Attribute::Willpower), 11.0);

    let tier1 = effective("1");
    assert_eq!(tier1.get(Attribute::Reflexes), 10.0);
    assert_eq!(tier1.get(Attribute::Willpower), 11.0);
}

#[test]
fn always_crit_weapon_crits_on_hit() {
    let calculator = calculator();
    let attrs = Attributes::default();
    let tags = TagSelections::new();
    let mods = SerializedCyberMods::new();
    let weapon = WeaponConfig::of(WeaponType::RangedAttack, 20.0).with_flags(WeaponFlags::ALWAYS_CRIT);
    let request = CalculationRequest::new(&attrs, &tags, &mods, &weapon);

    // Skill roll, then a hit roll under 0.57.
    let result = calculator
        .calculate_with(&request, &mut SequenceRng::new(vec![0.0, 0.3]))
        .unwrap();
    assert_eq!(result.outcome, AttackOutcome::Critical);
    assert!(result.trace.contains("Result: CRITICAL HIT - Damage"));

    // A missed hit roll stays a miss.
    let miss = calculator
        .calculate_with(&request, &mut SequenceRng::new(vec![0.0, 0.9]))
        .unwrap();
    assert_eq!(miss.outcome, AttackOutcome::Miss);
    assert_eq!(miss.damage, 0.0);
}

#[test]
fn heal_proc_is_reported_on_critical_hits() {
    let calculator = calculator();
    let attrs = Attributes::default();
    let tags = TagSelections::new();
    let state = calculator
        .empty_installation()
        .with_mod("Hands", "feedback_circuit");
    let mods = serialize_cyber_mods(&state);
    let weapon = WeaponConfig::of(WeaponType::UnarmedMelee, 0.0).with_flags(WeaponFlags::ALWAYS_CRIT);
    let request = CalculationRequest::new(&attrs, &tags, &mods, &weapon);

    let result = calculator
        .calculate_with(&request, &mut PcgRng::seeded(9))
        .unwrap();
    assert_eq!(result.triggered_procs().len(), 1);
    assert!(result.trace.contains("Proc: Feedback Circuit - Heal +5 HP"));
}

#[test]
fn disabled_crit_never_crits() {
    let calculator = calculator();
    let attrs = Attributes::default();
    let tags = TagSelections::new();
    let state = calculator
        .empty_installation()
        .with_mod("Hands", "pacifier_grip");
    let mods = serialize_cyber_mods(&state);
    let weapon = WeaponConfig::of(WeaponType::UnarmedMelee, 0.0);
    let request = CalculationRequest::new(&attrs, &tags, &mods, &weapon);

    for seed in 0..200 {
        let result = calculator
            .calculate_with(&request, &mut PcgRng::seeded(seed))
            .unwrap();
        assert_eq!(result.crit_chance, 0.0);
        assert_eq!(result.outcome, AttackOutcome::Hit, "seed {seed}");
    }
}

#[test]
fn final_damage_is_rounded_to_tenths() {
    let calculator = calculator();
    let attrs = Attributes::default()
        .with(Attribute::Reflexes, 13.0)
        .with(Attribute::Cool, 7.0);
    let tags = TagSelections::new().with_tag("Boxing");
    let state = calculator
        .empty_installation()
        .with_mod("Legs", "reinforced_tendons")
        .with_mod("Nervous System", "kerenzikov");
    let mods = serialize_cyber_mods(&state);

    for weapon in WeaponType::ALL {
        let weapon = WeaponConfig::of(weapon, 37.0);
        let request = CalculationRequest::new(&attrs, &tags, &mods, &weapon)
            .with_status(StatusContext::new(40.0));
        for seed in 0..50 {
            let result = calculator
                .calculate_with(&request, &mut PcgRng::seeded(seed))
                .unwrap();
            assert!((0.0..=1.0).contains(&result.hit_chance));
            assert!((0.0..=1.0).contains(&result.crit_chance));
            assert!(is_tenth_multiple(result.damage), "{} for {weapon:?}", result.damage);
            if result.outcome == AttackOutcome::Miss {
                assert_eq!(result.damage, 0.0);
            }
        }
    }
}

#[test]
fn unknown_installed_entries_are_skipped() {
    let calculator = calculator();
    let attrs = Attributes::default();
    let tags = TagSelections::new();
    let mods = SerializedCyberMods::new()
        .with_entries("Arms", ["laser_fists"])
        .with_entries("Tail", ["prehensile"]);
    let weapon = WeaponConfig::new("railgun", 10.0);
    let request = CalculationRequest::new(&attrs, &tags, &mods, &weapon);

    let result = calculator
        .calculate_with(&request, &mut PcgRng::seeded(1))
        .unwrap();
    assert_eq!(result.skipped.len(), 2);
    assert_eq!(result.effective_attributes, Attributes::default());
}

#[test]
fn rules_file_overrides_constants() {
    let dir = tempdir().unwrap();
    let rules = dir.path().join("rules.toml");
    fs::write(&rules, "ranged_hit_base = 0.5\n").unwrap();

    let config = CalculatorConfig::default().with_rules_path(&rules);
    let calculator = Calculator::from_config(&config).unwrap();
    assert_eq!(calculator.rules().ranged_hit_base, 0.5);

    let attrs = Attributes::default();
    let tags = TagSelections::new();
    let mods = SerializedCyberMods::new();
    let weapon = WeaponConfig::of(WeaponType::RangedAttack, 10.0);
    let request = CalculationRequest::new(&attrs, &tags, &mods, &weapon);
    let result = calculator
        .calculate_with(&request, &mut PcgRng::seeded(2))
        .unwrap();
    assert!((result.hit_chance - 0.6).abs() < 1e-12);
}

#[test]
fn missing_data_dir_is_a_content_error() {
    let config = CalculatorConfig::default().with_data_dir("/definitely/not/a/catalog");
    let err = Calculator::from_config(&config).unwrap_err();
    assert!(matches!(err, RuntimeError::Content(_)));
}

#[test]
fn empty_installation_covers_catalog() {
    let calculator = calculator();
    let state: CyberModsState = calculator.empty_installation();
    assert!(serialize_cyber_mods(&state).is_empty());
    assert_eq!(state.system("Hands").unwrap().slots.len(), 2);
}

#[test]
fn pain_editor_turns_every_low_hp_hit_critical() {
    let calculator = calculator();
    let attrs = Attributes::default();
    let tags = TagSelections::new();
    let state = calculator
        .empty_installation()
        .with_mod("Nervous System", "pain_editor");
    let mods = serialize_cyber_mods(&state);
    let weapon = WeaponConfig::of(WeaponType::UnarmedMelee, 0.0);

    let hurt = CalculationRequest::new(&attrs, &tags, &mods, &weapon)
        .with_status(StatusContext::new(20.0));
    for seed in 0..50 {
        let result = calculator
            .calculate_with(&hurt, &mut PcgRng::seeded(seed))
            .unwrap();
        assert_eq!(result.outcome, AttackOutcome::Critical, "seed {seed}");
    }

    let healthy = CalculationRequest::new(&attrs, &tags, &mods, &weapon)
        .with_status(StatusContext::new(60.0));
    let result = calculator
        .calculate_with(&healthy, &mut SequenceRng::new(vec![0.0, 0.0, 0.99]))
        .unwrap();
    assert_eq!(result.outcome, AttackOutcome::Hit);
}
