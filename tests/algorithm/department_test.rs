use facility_registry::algorithm::consolidate::department_composite;
use facility_registry::algorithm::department::{is_missing, normalize_field};
use facility_registry::models::BedAnnotation;
use facility_registry::parse_departments;

#[test]
fn test_composite_field_parses_back_into_mentions() {
    let composite = department_composite(&[
        Some("内科:40"),
        Some("療養　30"),
        Some("*"),
        None,
        Some("内科:40"),
    ]);
    assert_eq!(composite, "内科:40/療養:30");

    let parsed = parse_departments(&composite);
    assert_eq!(parsed.department_tokens, vec!["内科", "療養"]);
    assert_eq!(parsed.bed_total, 70);
    assert_eq!(
        parsed.bed_annotations,
        vec![
            BedAnnotation { label: "内科".to_string(), beds: 40 },
            BedAnnotation { label: "療養".to_string(), beds: 30 },
        ]
    );
}

#[test]
fn test_normalization_maps_every_delimiter() {
    assert_eq!(normalize_field("内科，外科、眼科・歯科/皮膚科"), "内科,外科,眼科,歯科,皮膚科");
    assert_eq!(normalize_field("一般：１２"), "一般:12");
    assert_eq!(normalize_field("{'内科', \"外科\"}"), "内科,外科");
}

#[test]
fn test_parser_never_fails_on_noise() {
    for raw in [",,,", "::", "12", "：：１", "・・・"] {
        let parsed = parse_departments(raw);
        assert!(parsed.department_tokens.is_empty(), "{raw:?}");
    }
    assert_eq!(parse_departments("12").bed_total, 12);
    assert!(is_missing(" nan "));
    assert!(!is_missing("内科"));
}
