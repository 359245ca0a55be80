use arrow::array::{Array, ArrayRef, Int64Array};
use std::sync::Arc;

use facility_registry::algorithm::geo::{LAT_COLUMN, LON_COLUMN};
use facility_registry::config::GeoConfig;
use facility_registry::utils::io::{read_parquet, write_parquet};
use facility_registry::{Pipeline, RecordBatch, Result, join_coordinates, read_coordinates};

use crate::utils::test_config;

fn classified_stub(rows: i64) -> RecordBatch {
    let ids: ArrayRef = Arc::new(Int64Array::from((1..=rows).collect::<Vec<_>>()));
    RecordBatch::try_from_iter([("id", ids)]).unwrap()
}

#[test]
fn test_absent_result_file_gives_null_coordinates() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    write_parquet(&config.classified_file(), &classified_stub(4))?;

    let written = Pipeline::new(&config).geo_join()?;
    assert_eq!(written, 4);

    let table = read_parquet(&config.final_file())?;
    assert_eq!(table.num_rows(), 4);
    for name in [LON_COLUMN, LAT_COLUMN] {
        let column = table.column_by_name(name).unwrap();
        assert_eq!(column.null_count(), 4, "{name}");
    }
    Ok(())
}

#[test]
fn test_positional_result_without_id_column() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("address_out.csv");
    std::fs::write(&path, "\u{feff}fY,fX\n35.0,139.0\nnot-a-number,140.0\n").unwrap();

    let coords = read_coordinates(&path, &GeoConfig::default())?.unwrap();
    assert!(coords.ids.is_none());

    let joined = join_coordinates(&classified_stub(3), Some(&coords))?;
    assert_eq!(joined.num_rows(), 3);
    assert_eq!(joined.column_by_name(LAT_COLUMN).unwrap().null_count(), 2);
    assert_eq!(joined.column_by_name(LON_COLUMN).unwrap().null_count(), 1);
    Ok(())
}
