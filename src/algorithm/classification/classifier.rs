//! Department taxonomy classifier
//!
//! Every department token of a facility is scored against every taxonomy
//! name. The taxonomy entries tied for the highest non-zero score are all
//! flagged; a token that shares nothing with any name flags nothing.

use std::time::Instant;

use log::info;
use smallvec::SmallVec;

use crate::algorithm::classification::parallel::classify_parallel;
use crate::algorithm::classification::sequential::classify_sequential;
use crate::algorithm::classification::similarity::PreparedName;
use crate::algorithm::classification::taxonomy::SpecialtyTaxonomy;
use crate::algorithm::department::parse_departments;
use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::models::{ClassifiedFacility, DepartmentList, FacilityRecord, SpecialtyFlags};

/// Best taxonomy matches for one token
#[derive(Debug, Clone, PartialEq)]
pub struct TokenMatch {
    /// Highest similarity seen
    pub score: f64,
    /// Taxonomy positions tied at `score`, in taxonomy order
    pub indices: SmallVec<[usize; 4]>,
}

impl TokenMatch {
    /// Whether the token flags any specialty
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.score > 0.0 && !self.indices.is_empty()
    }
}

/// Taxonomy with every canonical name prepared for scoring
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    taxonomy: SpecialtyTaxonomy,
    names: Vec<PreparedName>,
}

impl SimilarityIndex {
    /// Prepare a taxonomy for scoring
    #[must_use]
    pub fn new(taxonomy: SpecialtyTaxonomy) -> Self {
        let names = taxonomy
            .entries()
            .iter()
            .map(|e| PreparedName::new(&e.name))
            .collect();
        Self { taxonomy, names }
    }

    /// The taxonomy being matched against
    #[must_use]
    pub fn taxonomy(&self) -> &SpecialtyTaxonomy {
        &self.taxonomy
    }

    /// Score a token against the whole taxonomy
    #[must_use]
    pub fn best_match(&self, token: &str) -> TokenMatch {
        let chars: Vec<char> = token.chars().collect();
        let mut best = TokenMatch {
            score: 0.0,
            indices: SmallVec::new(),
        };

        for (k, name) in self.names.iter().enumerate() {
            let score = name.ratio_chars(&chars);
            if score > best.score {
                best.score = score;
                best.indices.clear();
                best.indices.push(k);
            } else if score == best.score && score > 0.0 {
                best.indices.push(k);
            }
        }

        best
    }

    /// Specialty flags for one facility's department tokens
    #[must_use]
    pub fn classify_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> SpecialtyFlags {
        let mut flags = SpecialtyFlags::new(self.taxonomy.len());
        for token in tokens {
            let best = self.best_match(token.as_ref());
            if best.is_match() {
                for &k in &best.indices {
                    flags.set(k);
                }
            }
        }
        flags
    }
}

/// Classifier for consolidated facility records
#[derive(Debug)]
pub struct Classifier {
    index: SimilarityIndex,
    config: ClassifierConfig,
}

impl Classifier {
    /// Create a classifier for the given taxonomy
    #[must_use]
    pub fn new(taxonomy: SpecialtyTaxonomy, config: ClassifierConfig) -> Self {
        Self {
            index: SimilarityIndex::new(taxonomy),
            config,
        }
    }

    /// Prepared taxonomy
    #[must_use]
    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    /// Specialty flags for each department list, in input order
    pub fn classify_all(&self, lists: &[DepartmentList]) -> Result<Vec<SpecialtyFlags>> {
        let use_parallel =
            self.config.use_parallel && lists.len() >= self.config.parallel_threshold;

        if use_parallel {
            classify_parallel(&self.index, lists, self.config.num_threads)
        } else {
            Ok(classify_sequential(&self.index, lists))
        }
    }

    /// Parse and classify every record
    ///
    /// # Arguments
    /// * `records` - Consolidated facility records
    ///
    /// # Returns
    /// One classified facility per record, in input order
    pub fn classify(&self, records: Vec<FacilityRecord>) -> Result<Vec<ClassifiedFacility>> {
        let start = Instant::now();

        let lists: Vec<DepartmentList> = records
            .iter()
            .map(|r| parse_departments(&r.departments))
            .collect();
        let flags = self.classify_all(&lists)?;

        let classified: Vec<ClassifiedFacility> = records
            .into_iter()
            .zip(lists)
            .zip(flags)
            .map(|((record, departments), specialties)| ClassifiedFacility {
                record,
                departments,
                specialties,
            })
            .collect();

        let flagged = classified
            .iter()
            .filter(|c| c.specialties.count_set() > 0)
            .count();
        info!(
            "Classified {} facilities ({} with at least one specialty) in {:?}",
            classified.len(),
            flagged,
            start.elapsed()
        );

        Ok(classified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Specialty;

    fn medical_index() -> SimilarityIndex {
        SimilarityIndex::new(SpecialtyTaxonomy::medical())
    }

    fn position(specialty: Specialty) -> usize {
        specialty.number() as usize - 1
    }

    #[test]
    fn test_identity_match_flags_only_that_code() {
        let index = medical_index();
        let best = index.best_match("整形外科");

        assert_eq!(best.score, 1.0);
        assert_eq!(best.indices.as_slice(), &[position(Specialty::OrthopedicSurgery)]);
    }

    #[test]
    fn test_zero_score_sets_nothing() {
        let index = medical_index();
        let flags = index.classify_tokens(&["一般", "XYZ"]);

        assert_eq!(flags.count_set(), 0);
        assert!(!index.best_match("XYZ").is_match());
    }

    #[test]
    fn test_exact_ties_flag_every_tied_code() {
        let taxonomy = SpecialtyTaxonomy::new([("a", "内科"), ("b", "外科")]).unwrap();
        let index = SimilarityIndex::new(taxonomy);

        // "科" shares one character with both names
        let best = index.best_match("科");
        assert_eq!(best.indices.as_slice(), &[0, 1]);

        let flags = index.classify_tokens(&["科"]);
        assert!(flags.is_set(0));
        assert!(flags.is_set(1));
    }

    #[test]
    fn test_strictly_better_score_resets_ties() {
        let taxonomy =
            SpecialtyTaxonomy::new([("a", "内科"), ("b", "外科"), ("c", "整形外科")]).unwrap();
        let index = SimilarityIndex::new(taxonomy);

        let best = index.best_match("外科");
        assert_eq!(best.score, 1.0);
        assert_eq!(best.indices.as_slice(), &[1]);
    }

    #[test]
    fn test_flags_accumulate_across_tokens() {
        let index = medical_index();
        let flags = index.classify_tokens(&["内科", "眼科", "一般"]);

        assert!(flags.is_set(position(Specialty::InternalMedicine)));
        assert!(flags.is_set(position(Specialty::Ophthalmology)));
        assert_eq!(flags.count_set(), 2);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let index = medical_index();
        let tokens = ["循環器内科", "ﾘﾊﾋﾞﾘ科", "心療内", "歯"];
        let first = index.classify_tokens(&tokens);
        for _ in 0..5 {
            assert_eq!(index.classify_tokens(&tokens), first);
        }
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let records: Vec<FacilityRecord> = (0..50)
            .map(|i| FacilityRecord {
                id: i,
                departments: ["内科:20/外科", "小児科/眼科", "一般:52", "", "歯科/矯正歯科"]
                    [i as usize % 5]
                    .to_string(),
                ..Default::default()
            })
            .collect();

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
                parallel_threshold: 1,
                num_threads: 4,
            },
        );

        let a = sequential.classify(records.clone()).unwrap();
        let b = parallel.classify(records).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0].departments.bed_total, 20);
        assert_eq!(a[3].specialties.count_set(), 0);
    }
}
