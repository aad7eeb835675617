use std::collections::HashSet;

use super::*;

#[test]
fn every_brand_has_distinct_models() {
    for brand in CATALOG.list_brands() {
        let models = CATALOG.models_of(brand);
        assert!(!models.is_empty(), "{brand} has no models");

        let unique: HashSet<_> = models.iter().collect();
        assert_eq!(unique.len(), models.len(), "{brand} lists a model twice");
    }
}

#[test]
fn brands_keep_declaration_order() {
    let brands: Vec<_> = CATALOG.list_brands().collect();
    assert_eq!(brands.len(), 25);
    assert_eq!(brands.first(), Some(&"audi"));
    assert_eq!(brands.last(), Some(&"volvo"));

    let porche = brands.iter().position(|b| *b == "porche").expect("porche");
    let renault = brands.iter().position(|b| *b == "renault").expect("renault");
    assert!(porche < renault);
}

#[test]
fn models_keep_declared_order() {
    assert_eq!(
        CATALOG.models_of("tesla"),
        &["Model 3", "Model S", "Model X", "Model Y"]
    );
    assert_eq!(CATALOG.models_of("dacia")[4], "Duster");
}

#[test]
fn unknown_or_empty_brand_has_no_models() {
    assert!(CATALOG.models_of("").is_empty());
    assert!(CATALOG.models_of("trabant").is_empty());
    // Keys are case sensitive.
    assert!(CATALOG.models_of("BMW").is_empty());
    assert!(!CATALOG.is_known_brand("porsche"));
}

#[test]
fn model_belongs_to_a_single_brand() {
    let mut owners = std::collections::HashMap::new();
    for brand in CATALOG.list_brands() {
        for model in CATALOG.models_of(brand) {
            if let Some(previous) = owners.insert(*model, brand) {
                panic!("{model} listed under both {previous} and {brand}");
            }
        }
    }
}

#[test]
fn label_overrides_are_exact() {
    let expected = [
        ("bmw", "BMW"),
        ("kia", "Kia"),
        ("tesla", "Tesla"),
        ("volvo", "Volvo"),
        ("volkswagen", "Volkswagen"),
        ("mercedes-benz", "Mercedes-Benz"),
        ("porche", "Porsche"),
    ];
    for (brand, label) in expected {
        assert_eq!(CATALOG.label_of(brand), label);
    }
    assert_eq!(label_overrides().len(), expected.len());
}

#[test]
fn other_brands_use_default_capitalisation() {
    let overridden: HashSet<_> = label_overrides().iter().map(|(key, _)| *key).collect();
    for brand in CATALOG.list_brands().filter(|b| !overridden.contains(b)) {
        let mut chars = brand.chars();
        let first = chars.next().expect("non-empty brand");
        let expected = format!(
            "{}{}",
            first.to_ascii_uppercase(),
            chars.as_str().to_ascii_lowercase()
        );
        assert_eq!(CATALOG.label_of(brand), expected);
    }
    assert_eq!(CATALOG.label_of("citroen"), "Citroen");
    assert_eq!(CATALOG.label_of("mitsubishi"), "Mitsubishi");
}

#[test]
fn default_rule_lowercases_the_tail() {
    assert_eq!(CATALOG.label_of("sKODA"), "Skoda");
    assert_eq!(CATALOG.label_of(""), "");
}
