// File: crates/dash-core/tests/countries.rs
// Purpose: ISO3 <-> name lookups and fallbacks.

use dash_core::CountryResolver;

const TABLE: &str = "\
iso3,country_name
FRA,France
deu,Germany
CIV,Côte d'Ivoire
XXX,
";

#[test]
fn resolves_names_and_codes() {
    let r = CountryResolver::from_reader(TABLE.as_bytes()).unwrap();
    assert_eq!(r.len(), 3);
    assert_eq!(r.name_for("FRA"), "France");
    assert_eq!(r.name_for("DEU"), "Germany");
    assert_eq!(r.name_for("fra"), "France");
    assert_eq!(r.code_for("germany").as_deref(), Some("DEU"));
    assert_eq!(r.code_for("Côte d'Ivoire").as_deref(), Some("CIV"));
    assert_eq!(r.code_for("civ").as_deref(), Some("CIV"));
    assert_eq!(r.label("FRA"), "France (FRA)");
}

#[test]
fn unknown_codes_fall_back() {
    let r = CountryResolver::from_reader(TABLE.as_bytes()).unwrap();
    assert_eq!(r.name_for("ESP"), "ESP");
    assert_eq!(r.code_for("Spain"), None);
    assert_eq!(r.label("ESP"), "ESP");
    assert!(CountryResolver::new().is_empty());
}
