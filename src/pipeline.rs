//! Stage orchestration
//!
//! Each stage reads one complete input table and writes one complete output
//! table, so any stage can be rerun on its own. The stages split into two
//! phases around the manual geocoding step:
//!
//! - prepare: repair regions, consolidate, classify, export the address request
//! - geo: join the geocoding result onto the classified table

use std::path::Path;
use std::time::Instant;

use log::{error, info};
use rayon::prelude::*;

use crate::algorithm::classification::{Classifier, SpecialtyTaxonomy, classified_batch};
use crate::algorithm::consolidate::consolidate;
use crate::algorithm::geo::{export_addresses, join_coordinates, read_coordinates};
use crate::algorithm::repair::repair_region;
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::models::{FacilityRecord, RegionRecord};
use crate::utils::io::{
    find_parquet_files, read_parquet, read_records, read_region_sheet, write_parquet,
    write_records,
};
use crate::utils::logging::{
    add_group_progress_bar, create_multi_progress, create_spinner, finish_progress_bar,
    log_warning,
};

/// Facility registry pipeline bound to one configuration
#[derive(Debug)]
pub struct Pipeline<'a> {
    config: &'a PipelineConfig,
    taxonomy: SpecialtyTaxonomy,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline using the medical specialty taxonomy
    #[must_use]
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self::with_taxonomy(config, SpecialtyTaxonomy::medical())
    }

    /// Create a pipeline classifying against a custom taxonomy
    #[must_use]
    pub fn with_taxonomy(config: &'a PipelineConfig, taxonomy: SpecialtyTaxonomy) -> Self {
        Self { config, taxonomy }
    }

    /// Configuration in use
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        self.config
    }

    /// Whether the working directory exists; logs an error if not
    fn work_dir_ready(&self) -> bool {
        let work_dir = self.config.work_dir();
        if work_dir.is_dir() {
            true
        } else {
            error!(
                "Working directory '{}' not found, check the base directory and working directory name",
                work_dir.display()
            );
            false
        }
    }

    /// Repair every region file that exists and write one table per region
    ///
    /// Missing region files are skipped with a warning.
    ///
    /// # Returns
    /// Number of regions written
    pub fn repair_regions(&self) -> Result<usize> {
        let proc_dir = self.config.proc_dir();
        std::fs::create_dir_all(&proc_dir).map_err(|e| PipelineError::io(&proc_dir, e))?;

        let regions: Vec<u32> = self.config.region.regions().collect();
        let (mp, region_pb) = create_multi_progress(regions.len() as u64, Some("Repairing regions"));
        let rows_pb = add_group_progress_bar(&mp, 0, Some("Facility rows"));

        let written = regions
            .par_iter()
            .map(|&region| -> Result<bool> {
                let raw_file = self.config.region_raw_file(region);
                let Some(table) = read_region_sheet(&raw_file, self.config.region.header_rows)? else {
                    log_warning("Region file not found, skipping", Some(&raw_file));
                    region_pb.inc(1);
                    return Ok(false);
                };

                let records =
                    repair_region(table, region, &self.config.repair, &self.config.region)?;
                rows_pb.inc_length(records.len() as u64);
                rows_pb.inc(records.len() as u64);

                write_records(&self.config.region_output_file(region), &records)?;
                region_pb.inc(1);
                Ok(true)
            })
            .collect::<Result<Vec<bool>>>()?
            .into_iter()
            .filter(|written| *written)
            .count();

        finish_progress_bar(&rows_pb, None);
        finish_progress_bar(&region_pb, Some(&format!("{written} regions repaired")));
        info!("Repaired {written} of {} regions", regions.len());
        Ok(written)
    }

    /// Whether a file in the processed directory belongs to this cohort
    fn is_region_output(&self, path: &Path) -> bool {
        let prefix = format!("{}_", self.config.data_month);
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(&prefix))
    }

    /// Merge the repaired regions into the consolidated table
    ///
    /// # Returns
    /// The consolidated records, as written
    pub fn consolidate(&self) -> Result<Vec<FacilityRecord>> {
        let start = Instant::now();
        let files: Vec<_> = find_parquet_files(&self.config.proc_dir())?
            .into_iter()
            .filter(|p| self.is_region_output(p))
            .collect();

        let spinner = create_spinner(Some("Consolidating regions"));
        let per_region = files
            .par_iter()
            .map(|path| read_records::<RegionRecord>(path))
            .collect::<Result<Vec<_>>>()?;
        let rows: Vec<RegionRecord> = per_region.into_iter().flatten().collect();

        let records = consolidate(rows, &self.config.consolidate);
        finish_progress_bar(&spinner, Some(&format!("{} facilities", records.len())));

        write_records(&self.config.consolidated_file(), &records)?;
        info!(
            "Consolidated {} region files into {} facilities in {:?}",
            files.len(),
            records.len(),
            start.elapsed()
        );
        Ok(records)
    }

    /// Classify the consolidated table and write the classified table
    ///
    /// # Returns
    /// Number of facilities classified
    pub fn classify(&self) -> Result<usize> {
        let records: Vec<FacilityRecord> = read_records(&self.config.consolidated_file())?;
        let classifier = Classifier::new(self.taxonomy.clone(), self.config.classifier.clone());

        let classified = classifier.classify(records)?;
        let batch = classified_batch(&self.taxonomy, &classified)?;
        write_parquet(&self.config.classified_file(), &batch)?;
        Ok(classified.len())
    }

    /// Write the address request for the external geocoding service
    ///
    /// # Returns
    /// Number of addresses written
    pub fn export_geocoding_request(&self) -> Result<usize> {
        let records: Vec<FacilityRecord> = read_records(&self.config.consolidated_file())?;
        export_addresses(&records, &self.config.address_export_file())?;
        Ok(records.len())
    }

    /// Join the geocoding result onto the classified table
    ///
    /// A missing result file leaves every coordinate null.
    ///
    /// # Returns
    /// Number of facilities written
    pub fn geo_join(&self) -> Result<usize> {
        let table = read_parquet(&self.config.classified_file())?;

        let result_file = self.config.geocoded_file();
        let coordinates = read_coordinates(&result_file, &self.config.geo)?;
        if coordinates.is_none() {
            log_warning(
                "Geocoding result not found, coordinates will be null",
                Some(&result_file),
            );
        }

        let joined = join_coordinates(&table, coordinates.as_ref())?;
        write_parquet(&self.config.final_file(), &joined)?;
        Ok(joined.num_rows())
    }

    /// Run every stage up to and including the geocoding request
    pub fn run_prepare(&self) -> Result<()> {
        if !self.work_dir_ready() {
            return Ok(());
        }
        let start = Instant::now();

        self.repair_regions()?;
        self.consolidate()?;
        self.classify()?;
        self.export_geocoding_request()?;

        info!(
            "Prepare phase finished in {:?}; submit {} for geocoding",
            start.elapsed(),
            self.config.address_export_file().display()
        );
        Ok(())
    }

    /// Run the coordinate join
    pub fn run_geo(&self) -> Result<()> {
        if !self.work_dir_ready() {
            return Ok(());
        }
        let start = Instant::now();

        self.geo_join()?;

        info!(
            "Geo phase finished in {:?}; final table at {}",
            start.elapsed(),
            self.config.final_file().display()
        );
        Ok(())
    }

    /// Run both phases back to back
    pub fn run_all(&self) -> Result<()> {
        if !self.work_dir_ready() {
            return Ok(());
        }
        self.run_prepare()?;
        self.run_geo()
    }
}
