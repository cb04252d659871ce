// ==========================================
// Classifier 引擎测试
// ==========================================
// 测试目标: 各类目分级规则与派生标志
// ==========================================


use pc_bundling::config::{ClassifierRules, StaticRulesReader};
use pc_bundling::domain::{Part, Tier, TierSet};
use pc_bundling::engine::Classifier;
use pc_bundling::logging;
use test_helpers::classified_sample_parts;

fn classify_one(category: &str, name: &str, price: f64) -> Part {
    let part = Part::new("T-1", category, name, price, 1);
    Classifier::with_default_rules().unwrap().classify_part(&part)
}

fn find<'a>(parts: &'a [Part], sku: &str) -> &'a Part {
    parts.iter().find(|p| p.sku == sku).unwrap()
}

#[test]
fn test_sample_inventory_tiers() {
    logging::init_test();
    let parts = classified_sample_parts();

    assert_eq!(find(&parts, "CPU-I3").tiers, TierSet::of(&[Tier::Office, Tier::Standard]));
    assert_eq!(find(&parts, "CPU-I5F").tiers, TierSet::all());
    assert!(find(&parts, "CPU-I5F").requires_discrete_gpu);
    assert_eq!(find(&parts, "CPU-I7").tiers, TierSet::of(&[Tier::Advanced]));
    assert!(!find(&parts, "CPU-I7").requires_discrete_gpu);

    assert_eq!(find(&parts, "MB-H610").tiers, TierSet::of(&[Tier::Office]));
    assert_eq!(find(&parts, "MB-B760").tiers, TierSet::of(&[Tier::Standard]));
    assert_eq!(find(&parts, "MB-Z790").tiers, TierSet::of(&[Tier::Advanced]));

    assert_eq!(find(&parts, "RAM-8").tiers, TierSet::of(&[Tier::Office]));
    assert_eq!(find(&parts, "RAM-16").tiers, TierSet::of(&[Tier::Office, Tier::Standard]));
    assert_eq!(find(&parts, "RAM-32").tiers, TierSet::of(&[Tier::Standard, Tier::Advanced]));

    assert_eq!(find(&parts, "VGA-730").tiers, TierSet::of(&[Tier::Office]));
    assert_eq!(find(&parts, "VGA-4060TI").tiers, TierSet::of(&[Tier::Standard, Tier::Advanced]));
    assert_eq!(find(&parts, "VGA-5070").tiers, TierSet::of(&[Tier::Advanced]));

    assert!(find(&parts, "CASE-PSU").has_built_in_psu);
    assert_eq!(find(&parts, "CASE-ATX").tiers, TierSet::of(&[Tier::Standard, Tier::Advanced]));

    assert_eq!(find(&parts, "PSU-450").tiers, TierSet::of(&[Tier::Office]));
    assert_eq!(find(&parts, "PSU-650").tiers, TierSet::of(&[Tier::Standard, Tier::Advanced]));

    // 无库存商品不进入分级
    assert!(parts.iter().all(|p| p.sku != "SSD-1T"));
}

#[test]
fn test_intel_b_price_threshold_boundary() {
    let below = classify_one("Motherboard", "MSI B760M Mortar", 1_999_999.0);
    assert_eq!(below.tiers, TierSet::of(&[Tier::Standard]));

    let at = classify_one("Motherboard", "MSI B760M Mortar", 2_000_000.0);
    assert_eq!(at.tiers, TierSet::of(&[Tier::Advanced]));
}

#[test]
fn test_amd_b_chipset_spans_standard_and_advanced() {
    let part = classify_one("Motherboard", "Gigabyte B650M Gaming X", 2_400_000.0);
    assert_eq!(part.tiers, TierSet::of(&[Tier::Standard, Tier::Advanced]));
}

#[test]
fn test_psu_price_threshold_and_certification() {
    let cheap_gold = classify_one("Power Supply", "Budget 450W 80+ Gold", 499_999.0);
    assert_eq!(cheap_gold.tiers, TierSet::of(&[Tier::Office, Tier::Advanced]));

    let plain = classify_one("Power Supply", "Generic 600W", 500_000.0);
    assert_eq!(plain.tiers, TierSet::of(&[Tier::Standard]));
}

#[test]
fn test_ram_without_capacity_is_unclassified() {
    let part = classify_one("Memory RAM", "DDR4 3200 Desktop (16GB kit)", 500_000.0);
    assert!(part.tiers.is_empty());
    assert!(part.reasons.is_empty());
}

#[test]
fn test_unknown_category_passes_through() {
    let part = classify_one("Monitor", "LG 24MP400 I5 PSU", 1_500_000.0);
    assert!(part.tiers.is_empty());
    assert!(!part.requires_discrete_gpu);
    assert!(!part.has_built_in_psu);
}

#[test]
fn test_reasons_name_the_rule() {
    let part = classify_one("Processor", "Intel Core i5-12400F", 1_900_000.0);
    assert!(part.reasons.iter().any(|r| r.starts_with("OFFICE:") && r.contains("I5")));
    assert!(part.reasons.iter().any(|r| r.starts_with("NEED_VGA:")));
}

#[test]
fn test_custom_rules_from_reader() {
    let mut rules = ClassifierRules::default();
    rules.power_supply.standard_min_price = 300_000.0;
    let classifier = Classifier::from_reader(&StaticRulesReader::new(rules)).unwrap();

    let part = Part::new("PSU-1", "Power Supply", "FSP Hexa 450W", 400_000.0, 1);
    let classified = classifier.classify_part(&part);
    assert_eq!(classified.tiers, TierSet::of(&[Tier::Standard]));
}
