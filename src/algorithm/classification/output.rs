//! Classified table layout
//!
//! The classified table is the consolidated table widened with the parsed
//! department columns and one Boolean column per taxonomy code, in taxonomy
//! order.

use arrow::record_batch::RecordBatch;

use crate::algorithm::classification::taxonomy::SpecialtyTaxonomy;
use crate::error::{PipelineError, Result};
use crate::models::{ClassifiedFacility, DepartmentList, FacilityRecord};
use crate::utils::arrow::{append_columns, boolean_column, records_to_batch};

/// Build the classified table
///
/// # Errors
/// Returns an error if the flag width of a facility differs from the
/// taxonomy or the columns cannot be assembled
pub fn classified_batch(
    taxonomy: &SpecialtyTaxonomy,
    classified: &[ClassifiedFacility],
) -> Result<RecordBatch> {
    if let Some(bad) = classified
        .iter()
        .find(|c| c.specialties.len() != taxonomy.len())
    {
        return Err(PipelineError::Validation(format!(
            "facility {} has {} specialty flags, taxonomy has {} entries",
            bad.record.id,
            bad.specialties.len(),
            taxonomy.len()
        )));
    }

    let records: Vec<FacilityRecord> = classified.iter().map(|c| c.record.clone()).collect();
    let departments: Vec<DepartmentList> = classified.iter().map(|c| c.departments.clone()).collect();

    let base = records_to_batch(&records)?;
    let parsed = records_to_batch(&departments)?;

    let mut columns: Vec<_> = parsed
        .schema()
        .fields()
        .iter()
        .map(|f| f.as_ref().clone())
        .zip(parsed.columns().iter().cloned())
        .collect();

    columns.extend(taxonomy.entries().iter().enumerate().map(|(k, entry)| {
        boolean_column(&entry.code, classified.iter().map(|c| c.specialties.is_set(k)))
    }));

    append_columns(&base, columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpecialtyFlags;

    #[test]
    fn test_classified_columns() {
        let taxonomy = SpecialtyTaxonomy::new([("internal", "内科"), ("surgery", "外科")]).unwrap();
        let mut flags = SpecialtyFlags::new(2);
        flags.set(1);
        let classified = vec![ClassifiedFacility {
            record: FacilityRecord {
                id: 1,
                departments: "外科:10".to_string(),
                ..Default::default()
            },
            departments: crate::algorithm::department::parse_departments("外科:10"),
            specialties: flags,
        }];

        let batch = classified_batch(&taxonomy, &classified).unwrap();
        let schema = batch.schema();

        assert_eq!(batch.num_rows(), 1);
        assert!(schema.field_with_name("bed_total").is_ok());
        assert!(schema.field_with_name("department_tokens").is_ok());
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(&names[names.len() - 2..], &["internal", "surgery"]);
    }

    #[test]
    fn test_flag_width_must_match_taxonomy() {
        let taxonomy = SpecialtyTaxonomy::medical();
        let classified = vec![ClassifiedFacility {
            record: FacilityRecord::default(),
            departments: DepartmentList::default(),
            specialties: SpecialtyFlags::new(2),
        }];
        assert!(classified_batch(&taxonomy, &classified).is_err());
    }
}
