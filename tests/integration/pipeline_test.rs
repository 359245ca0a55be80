use arrow::array::{Array, BooleanArray, Float64Array, Int64Array, UInt64Array};
use facility_registry::models::EraDate;
use facility_registry::utils::io::read_parquet;
use facility_registry::{Pipeline, RecordBatch, Result};

use crate::utils::{facility_rows, test_config, write_region};

fn bools(batch: &RecordBatch, name: &str) -> Vec<bool> {
    let array = batch
        .column_by_name(name)
        .unwrap_or_else(|| panic!("column {name}"))
        .as_any()
        .downcast_ref::<BooleanArray>()
        .unwrap();
    (0..array.len()).map(|i| array.value(i)).collect()
}

#[test]
fn test_prepare_and_geo_phases() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let mut tokyo = facility_rows("1", "千代田病院", "〒100ー0002 千代田区2", ["内科:20", "外科", "眼科"]);
    tokyo.extend(facility_rows("2", "千代田歯科", "〒100ー0001 千代田区1", ["歯科", "矯正歯科", "*"]));
    write_region(&config, 13, tokyo)?;
    // Secondary Hokkaido submission
    write_region(
        &config,
        48,
        facility_rows("1", "札幌小児科", "〒060ー0001 札幌市", ["小児科", "一般　52", "小児科"]),
    )?;

    let pipeline = Pipeline::new(&config);

    let records = pipeline.consolidate()?;
    assert_eq!(records.len(), 3);
    assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(records[0].pref, 1);
    assert_eq!(records[0].address, "北海道札幌市");
    assert_eq!(records[0].departments, "小児科/一般:52");
    assert_eq!(records[1].post, "100-0001");

    let chiyoda = &records[2];
    assert_eq!(chiyoda.departments, "内科:20/外科/眼科");
    assert_eq!(chiyoda.fulltime_staff, 10);
    assert_eq!(chiyoda.fulltime_doctors, 4);
    assert_eq!(chiyoda.parttime_staff, 2);
    assert!(chiyoda.reason_new);
    assert!(chiyoda.hospital);
    assert_eq!(chiyoda.registered(), EraDate { year: 2023, month: 4, day: 1 });
    assert_eq!(chiyoda.started(), EraDate { year: 2023, month: 5, day: 1 });

    assert_eq!(pipeline.classify()?, 3);
    assert_eq!(pipeline.export_geocoding_request()?, 3);

    let request = std::fs::read_to_string(config.address_export_file()).unwrap();
    let first_line = request.trim_start_matches('\u{feff}').lines().next().unwrap();
    assert_eq!(first_line, "1,060-0001,北海道札幌市");

    std::fs::write(
        config.geocoded_file(),
        "id,post,address,fX,fY\n3,100-0002,東京都千代田区2,139.75,35.68\n1,060-0001,北海道札幌市,141.35,43.06\n",
    )
    .unwrap();
    assert_eq!(pipeline.geo_join()?, 3);

    let table = read_parquet(&config.final_file())?;
    assert_eq!(table.num_rows(), 3);

    let ids = table
        .column_by_name("id")
        .unwrap()
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(ids.values().to_vec(), vec![1, 2, 3]);

    let lon = table
        .column_by_name("lon")
        .unwrap()
        .as_any()
        .downcast_ref::<Float64Array>()
        .unwrap();
    assert_eq!(lon.iter().collect::<Vec<_>>(), vec![Some(141.35), None, Some(139.75)]);

    let beds = table
        .column_by_name("bed_total")
        .unwrap()
        .as_any()
        .downcast_ref::<UInt64Array>()
        .unwrap();
    assert_eq!(beds.values().to_vec(), vec![52, 0, 20]);

    assert_eq!(bools(&table, "pediatrics"), vec![true, false, false]);
    assert_eq!(bools(&table, "dentistry"), vec![false, true, false]);
    assert_eq!(bools(&table, "orthodontics"), vec![false, true, false]);
    assert_eq!(bools(&table, "internalmedicine"), vec![false, false, true]);
    assert_eq!(bools(&table, "surgery"), vec![false, false, true]);
    assert_eq!(bools(&table, "ophthalmology"), vec![false, false, true]);

    Ok(())
}

#[test]
fn test_missing_region_files_are_skipped() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let pipeline = Pipeline::new(&config);

    assert_eq!(pipeline.repair_regions()?, 0);
    assert!(config.proc_dir().is_dir());

    // Only regions written for this cohort are consolidated
    write_region(&config, 13, facility_rows("1", "A", "〒100ー0001 千代田区1", ["内科", "*", "*"]))?;
    std::fs::copy(
        config.region_output_file(13),
        config.proc_dir().join("r0411_13.parquet"),
    )
    .unwrap();
    assert_eq!(pipeline.consolidate()?.len(), 1);

    Ok(())
}

#[test]
fn test_prepare_on_empty_submission() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let pipeline = Pipeline::new(&config);

    pipeline.run_prepare()?;
    pipeline.run_geo()?;

    let table = read_parquet(&config.final_file())?;
    assert_eq!(table.num_rows(), 0);
    assert!(table.column_by_name("lon").is_some());
    assert!(table.column_by_name("internalmedicine").is_some());

    Ok(())
}
