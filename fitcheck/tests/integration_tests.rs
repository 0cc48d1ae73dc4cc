//! Integration tests for FitCheck library

use fitcheck::prelude::*;
use fitcheck::RulesError;
use std::io::Write;
use tempfile::NamedTempFile;

const CUSTOM_RULES: &str = r#"{
    "brands": {
        "Acme": {
            "series": {
                "Volt": { "breaker_families": ["AV", "AVX"] }
            }
        },
        "Square D": {
            "series": {
                "QO": { "breaker_families": ["QO"] }
            }
        }
    },
    "plug_receptacle": {
        "NEMA 6-50": { "voltage": "250V", "amps": 50 }
    },
    "ev_charger_rules": { "note": "custom note" },
    "disclaimer": "custom disclaimer"
}"#;

fn write_rules(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Should create temp file");
    file.write_all(json.as_bytes()).expect("Should write rules");
    file
}

#[test]
fn test_custom_rule_table_drives_brand_priority() {
    let file = write_rules(CUSTOM_RULES);
    let options = CheckOptions {
        rules_path: Some(file.path().to_path_buf()),
        strict_rules: true,
    };
    let core = FitCheckCore::from_options(&options).expect("Should load custom rules");

    // Acme is listed first, so it wins even though Square D appears too
    let specs = core.extract("Acme Volt panel for Square D retrofits");
    assert_eq!(specs.brand, "Acme");
    assert_eq!(specs.product_type, ProductType::Panel);
}

#[test]
fn test_custom_rule_table_in_checks() {
    let file = write_rules(CUSTOM_RULES);
    let core = FitCheckCore::new(RuleStore::load(file.path()).unwrap()).unwrap();

    let panel = core
        .extract("Acme load center")
        .apply(&SpecPatch::from_assignments(&["series=Volt"]).unwrap())
        .unwrap();
    let breaker = core.extract("AVX-20 breaker 20A");

    let report = core.check_pair(&panel, &breaker).expect("Should be a panel/breaker pair");
    assert_eq!(report.kind, CheckKind::PanelBreaker);
    assert!(report.result.compatible);
    assert_eq!(report.disclaimer, "custom disclaimer");

    // 14-50 is not in the custom table
    let plug = core.extract("NEMA 14-50 plug");
    let receptacle = core.extract("receptacle");
    let report = core.check_pair(&plug, &receptacle).unwrap();
    assert!(!report.result.compatible);

    assert_eq!(core.size_evse(40).note, "custom note");
}

#[test]
fn test_invalid_rule_file_strict_vs_lenient() {
    let file = write_rules(r#"{ "brands": { "Acme": { "series": { "Volt": { "breaker_families": [] } } } } }"#);

    let strict = CheckOptions {
        rules_path: Some(file.path().to_path_buf()),
        strict_rules: true,
    };
    assert!(matches!(
        FitCheckCore::from_options(&strict),
        Err(FitCheckError::Rules(RulesError::Invalid(_)))
    ));

    let lenient = CheckOptions {
        strict_rules: false,
        ..strict
    };
    let core = FitCheckCore::from_options(&lenient).expect("Should fall back to builtin");
    assert!(!core.rules().breaker_families("Square D", "QO").is_empty());
}

#[test]
fn test_malformed_json_is_reported() {
    let file = write_rules("{ not json");
    let err = RuleStore::load(file.path()).unwrap_err();
    assert!(matches!(err, RulesError::Json(_)));
    assert!(err.to_string().contains("JSON"));
}

#[test]
fn test_edit_then_check_workflow() {
    let core = FitCheckCore::from_options(&CheckOptions::default()).unwrap();

    // Series missing from the text: not identifiable until edited
    let panel = core.extract("Square D 200A load center 1Ø");
    let breaker = core.extract("HOM120 breaker 1 pole 20A");

    let before = core.check_pair(&panel, &breaker).unwrap();
    assert!(!before.result.compatible);
    assert_eq!(before.result.reasons, vec!["Panel brand/series not identified.".to_string()]);

    let patch = SpecPatch::from_assignments(&["series=Homeline"]).unwrap();
    let edited = panel.apply(&patch).unwrap();
    assert_eq!(panel.series, "");

    let after = core.check_pair(&edited, &breaker).unwrap();
    assert!(after.result.compatible, "{:?}", after.result);
}

#[test]
fn test_report_json_shape() {
    let core = FitCheckCore::new(RuleStore::builtin()).unwrap();
    let spec = core.extract("NEMA 1 indoor enclosure");
    let report = core.check_enclosure(&spec, "4X");

    let json = serde_json::to_value(&report).unwrap();
    let result = json["result"].as_object().unwrap();

    let mut keys: Vec<&str> = result.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["compatible", "reasons", "suggestions"]);
    assert!(json["id"].is_string());
    assert!(json["checked_at"].is_string());
}

#[test]
fn test_parallel_checks_share_core() {
    let core = FitCheckCore::new(RuleStore::builtin()).unwrap();
    let texts = [
        "Square D QO load center 1Ø 120/240V 200A NEMA 3R",
        "Square D QO120 breaker 1P 20A",
        "NEMA 14-50 receptacle",
        "48A EV charger",
    ];

    let serial: Vec<ParsedSpecs> = texts.iter().map(|t| core.extract(t)).collect();
    let parallel: Vec<ParsedSpecs> = std::thread::scope(|s| {
        let handles: Vec<_> = texts
            .iter()
            .map(|t| {
                let core = &core;
                s.spawn(move || core.extract(t))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(serial, parallel);
}
