use facility_registry::config::ClassifierConfig;
use facility_registry::models::{FacilityRecord, Specialty};
use facility_registry::{Classifier, SimilarityIndex, SpecialtyTaxonomy, similarity};

fn records(departments: &[&str]) -> Vec<FacilityRecord> {
    departments
        .iter()
        .zip(1_i64..)
        .map(|(d, id)| FacilityRecord {
            id,
            departments: (*d).to_string(),
            ..Default::default()
        })
        .collect()
}

fn flagged_codes(classifier: &Classifier, departments: &str) -> Vec<String> {
    let classified = classifier.classify(records(&[departments])).unwrap();
    let taxonomy = classifier.index().taxonomy();
    classified[0]
        .specialties
        .set_indices()
        .filter_map(|k| taxonomy.get(k).map(|e| e.code.clone()))
        .collect()
}

#[test]
fn test_similarity_is_symmetric_for_short_names() {
    for (a, b) in [("内科", "心療内科"), ("眼科", "耳鼻咽喉科"), ("歯科", "小児歯科")] {
        assert_eq!(similarity(a, b), similarity(b, a), "{a} / {b}");
    }
}

#[test]
fn test_custom_taxonomy_ties() {
    let taxonomy = SpecialtyTaxonomy::new([("a", "内科"), ("b", "外科"), ("c", "眼科")]).unwrap();
    let classifier = Classifier::new(taxonomy, ClassifierConfig::default());

    assert_eq!(flagged_codes(&classifier, "科"), vec!["a", "b", "c"]);
    assert_eq!(flagged_codes(&classifier, "外科:10"), vec!["b"]);
    assert!(flagged_codes(&classifier, "一般").is_empty());
}

#[test]
fn test_medical_classification_of_composite_listing() {
    let classifier = Classifier::new(SpecialtyTaxonomy::medical(), ClassifierConfig::default());
    let classified = classifier
        .classify(records(&["内科:20/整形外科/一般:52", "", "*"]))
        .unwrap();

    let first = &classified[0];
    assert_eq!(first.departments.bed_total, 72);
    assert_eq!(first.departments.department_tokens, vec!["内科", "整形外科", "一般"]);
    assert!(first.specialties.is_set(Specialty::InternalMedicine.number() as usize - 1));
    assert!(first.specialties.is_set(Specialty::OrthopedicSurgery.number() as usize - 1));
    assert!(!first.specialties.is_set(Specialty::Surgery.number() as usize - 1));
    assert_eq!(first.specialties.count_set(), 2);

    for empty in &classified[1..] {
        assert!(empty.departments.department_tokens.is_empty());
        assert_eq!(empty.specialties.count_set(), 0);
        assert_eq!(empty.specialties.len(), 63);
    }
}

#[test]
fn test_adding_tokens_never_clears_flags() {
    let index = SimilarityIndex::new(SpecialtyTaxonomy::medical());
    let mut tokens = vec!["小児科"];
    let mut previous = index.classify_tokens(&tokens);

    for extra in ["眼科", "一般", "ﾘﾊﾋﾞﾘ", "歯"] {
        tokens.push(extra);
        let current = index.classify_tokens(&tokens);
        for k in previous.set_indices() {
            assert!(current.is_set(k), "flag {k} cleared by {extra}");
        }
        previous = current;
    }
}

#[test]
fn test_parallel_matches_sequential_on_larger_input() {
    let listings = ["内科/外科", "小児科:10", "歯科/矯正歯科", "一般", "消化器内科/循環器内科"];
    let input: Vec<&str> = (0..200).map(|i| listings[i % listings.len()]).collect();

    let sequential = Classifier::new(
        SpecialtyTaxonomy::medical(),
        ClassifierConfig {
            use_parallel: false,
            ..Default::default()
        },
    );
    let parallel = Classifier::new(
        SpecialtyTaxonomy::medical(),
        ClassifierConfig {
            use_parallel: true,
            parallel_threshold: 10,
            num_threads: 3,
        },
    );

    let a = sequential.classify(records(&input)).unwrap();
    let b = parallel.classify(records(&input)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.iter().map(|c| c.record.id).collect::<Vec<_>>(), (1..=200).collect::<Vec<_>>());
}
