//! Reference catalog of valid form choices.
//!
//! The reference table holds historical laptop records. It is only used to
//! enumerate the categorical choices the form offers; prediction never reads
//! it.

use crate::error::{Error, Result};
use crate::features::{RawSpec, Resolution};
use csv::Reader;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::ops::RangeInclusive;
use std::path::Path;

/// RAM sizes offered by the form, in GB.
pub const RAM_CHOICES: [u32; 9] = [2, 4, 6, 8, 12, 16, 24, 32, 64];

/// HDD sizes offered by the form, in GB (0 = no HDD).
pub const HDD_CHOICES: [u32; 6] = [0, 128, 256, 512, 1024, 2048];

/// SSD sizes offered by the form, in GB (0 = no SSD).
pub const SSD_CHOICES: [u32; 6] = [0, 8, 128, 256, 512, 1024];

/// Resolutions offered by the form.
pub const RESOLUTION_CHOICES: [Resolution; 9] = [
    Resolution { width: 1920, height: 1080 },
    Resolution { width: 1366, height: 768 },
    Resolution { width: 1600, height: 900 },
    Resolution { width: 3840, height: 2160 },
    Resolution { width: 3200, height: 1800 },
    Resolution { width: 2880, height: 1800 },
    Resolution { width: 2560, height: 1600 },
    Resolution { width: 2560, height: 1440 },
    Resolution { width: 2304, height: 1440 },
];

/// Weight input bounds in kg.
pub const WEIGHT_RANGE: RangeInclusive<f64> = 0.5..=5.0;
pub const DEFAULT_WEIGHT: f64 = 1.5;

/// Screen size slider bounds in inches.
pub const SCREEN_SIZE_RANGE: RangeInclusive<f64> = 10.0..=18.0;
pub const DEFAULT_SCREEN_SIZE: f64 = 13.0;

/// Reference table columns that populate categorical selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceColumn {
    Company,
    TypeName,
    CpuBrand,
    GpuBrand,
    Os,
}

impl ReferenceColumn {
    pub fn all() -> [ReferenceColumn; 5] {
        [
            ReferenceColumn::Company,
            ReferenceColumn::TypeName,
            ReferenceColumn::CpuBrand,
            ReferenceColumn::GpuBrand,
            ReferenceColumn::Os,
        ]
    }

    /// Header name in the reference table.
    pub fn header(&self) -> &'static str {
        match self {
            ReferenceColumn::Company => "Company",
            ReferenceColumn::TypeName => "TypeName",
            ReferenceColumn::CpuBrand => "Cpu brand",
            ReferenceColumn::GpuBrand => "Gpu brand",
            ReferenceColumn::Os => "os",
        }
    }

    /// Form field label.
    pub fn field(&self) -> &'static str {
        match self {
            ReferenceColumn::Company => "brand",
            ReferenceColumn::TypeName => "type",
            ReferenceColumn::CpuBrand => "cpu",
            ReferenceColumn::GpuBrand => "gpu",
            ReferenceColumn::Os => "os",
        }
    }
}

/// Distinct categorical values from the reference table, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub brands: Vec<String>,
    pub types: Vec<String>,
    pub cpu_brands: Vec<String>,
    pub gpu_brands: Vec<String>,
    pub operating_systems: Vec<String>,

    /// Number of records read
    pub records: usize,
}

impl Catalog {
    /// Load the reference table from a CSV file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file =
            File::open(path).map_err(|e| Error::artifact_load("reference table", path, e))?;
        let catalog = Self::read(file)
            .map_err(|reason| Error::artifact_load("reference table", path, reason))?;

        tracing::info!(
            path = %path.display(),
            records = catalog.records,
            brands = catalog.brands.len(),
            "Loaded reference catalog"
        );
        Ok(catalog)
    }

    /// Load the reference table from any CSV reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::read(reader)
            .map_err(|reason| Error::artifact_load("reference table", "<reader>", reason))
    }

    fn read<R: Read>(reader: R) -> std::result::Result<Self, String> {
        let mut reader = Reader::from_reader(reader);
        let headers = reader.headers().map_err(|e| e.to_string())?.clone();

        let mut indices = Vec::with_capacity(5);
        for column in ReferenceColumn::all() {
            let index = headers
                .iter()
                .position(|h| h.trim() == column.header())
                .ok_or_else(|| format!("missing column {:?}", column.header()))?;
            indices.push((column, index));
        }

        let mut catalog = Catalog::default();
        for result in reader.records() {
            let record = result.map_err(|e| e.to_string())?;
            for &(column, index) in &indices {
                let value = record.get(index).unwrap_or("").trim();
                if value.is_empty() {
                    continue;
                }
                let values = catalog.values_mut(column);
                if !values.iter().any(|v| v == value) {
                    values.push(value.to_string());
                }
            }
            catalog.records += 1;
        }

        if catalog.records == 0 {
            return Err("no records".to_string());
        }
        Ok(catalog)
    }

    /// Valid choices for a categorical selector.
    pub fn values(&self, column: ReferenceColumn) -> &[String] {
        match column {
            ReferenceColumn::Company => &self.brands,
            ReferenceColumn::TypeName => &self.types,
            ReferenceColumn::CpuBrand => &self.cpu_brands,
            ReferenceColumn::GpuBrand => &self.gpu_brands,
            ReferenceColumn::Os => &self.operating_systems,
        }
    }

    fn values_mut(&mut self, column: ReferenceColumn) -> &mut Vec<String> {
        match column {
            ReferenceColumn::Company => &mut self.brands,
            ReferenceColumn::TypeName => &mut self.types,
            ReferenceColumn::CpuBrand => &mut self.cpu_brands,
            ReferenceColumn::GpuBrand => &mut self.gpu_brands,
            ReferenceColumn::Os => &mut self.operating_systems,
        }
    }

    /// Check a spec against the form's widget constraints.
    ///
    /// The predictor does not call this; a caller bypassing the form can still
    /// reach [`Error::UnknownCategory`] at encoding time.
    pub fn check(&self, spec: &RawSpec) -> Result<()> {
        let selections = [
            (ReferenceColumn::Company, &spec.brand),
            (ReferenceColumn::TypeName, &spec.form_factor),
            (ReferenceColumn::CpuBrand, &spec.cpu_brand),
            (ReferenceColumn::GpuBrand, &spec.gpu_brand),
            (ReferenceColumn::Os, &spec.os),
        ];
        for (column, value) in selections {
            if !self.values(column).iter().any(|v| v == value) {
                return Err(invalid(column.field(), value));
            }
        }

        if !RAM_CHOICES.contains(&spec.ram) {
            return Err(invalid("ram", spec.ram));
        }
        if !HDD_CHOICES.contains(&spec.hdd) {
            return Err(invalid("hdd", spec.hdd));
        }
        if !SSD_CHOICES.contains(&spec.ssd) {
            return Err(invalid("ssd", spec.ssd));
        }
        if !RESOLUTION_CHOICES.contains(&spec.resolution) {
            return Err(invalid("resolution", spec.resolution));
        }
        if !WEIGHT_RANGE.contains(&spec.weight) {
            return Err(invalid("weight", spec.weight));
        }
        if !SCREEN_SIZE_RANGE.contains(&spec.screen_size) {
            return Err(invalid("screen size", spec.screen_size));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, value: impl ToString) -> Error {
    Error::InvalidSelection {
        field,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::tests::sample_spec;

    const SAMPLE_REFERENCE: &str = "\
Company,TypeName,Ram,Weight,Price,Touchscreen,Ips,ppi,Cpu brand,HDD,SSD,Gpu brand,os
Apple,Ultrabook,8,1.37,11.17,0,1,226.98,Intel Core i5,0,128,Intel,Mac
HP,Notebook,8,1.86,10.77,0,0,141.21,Intel Core i5,0,256,Intel,Others/No OS/Linux
Dell,Notebook,8,2.2,10.45,0,0,141.21,Intel Core i5,1000,0,AMD,Windows
Dell,Gaming,16,2.65,11.81,0,1,141.21,Intel Core i7,0,256,Nvidia,Windows
Acer,Notebook,4,2.1,10.07,0,0,100.45,AMD Processor,500,0,AMD,Windows
";

    fn sample_catalog() -> Catalog {
        Catalog::from_reader(SAMPLE_REFERENCE.as_bytes()).unwrap()
    }

    #[test]
    fn test_catalog_distinct_first_seen_order() {
        let catalog = sample_catalog();
        assert_eq!(catalog.records, 5);
        assert_eq!(catalog.brands, vec!["Apple", "HP", "Dell", "Acer"]);
        assert_eq!(catalog.types, vec!["Ultrabook", "Notebook", "Gaming"]);
        assert_eq!(
            catalog.cpu_brands,
            vec!["Intel Core i5", "Intel Core i7", "AMD Processor"]
        );
        assert_eq!(catalog.gpu_brands, vec!["Intel", "AMD", "Nvidia"]);
        assert_eq!(
            catalog.operating_systems,
            vec!["Mac", "Others/No OS/Linux", "Windows"]
        );
    }

    #[test]
    fn test_catalog_missing_column() {
        let csv = "Company,TypeName,Cpu brand,Gpu brand\nDell,Notebook,Intel Core i5,Intel\n";
        let err = Catalog::from_reader(csv.as_bytes()).unwrap_err();
        match err {
            Error::ArtifactLoad { reason, .. } => assert!(reason.contains("\"os\"")),
            other => panic!("expected artifact load error, got {other:?}"),
        }
    }

    #[test]
    fn test_catalog_empty_table() {
        let csv = "Company,TypeName,Cpu brand,Gpu brand,os\n";
        assert!(matches!(
            Catalog::from_reader(csv.as_bytes()),
            Err(Error::ArtifactLoad { .. })
        ));
    }

    #[test]
    fn test_catalog_skips_blank_cells() {
        let csv = "Company,TypeName,Cpu brand,Gpu brand,os\n Dell ,Notebook,,Intel,Windows\n";
        let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(catalog.brands, vec!["Dell"]);
        assert!(catalog.cpu_brands.is_empty());
    }

    #[test]
    fn test_check_accepts_form_selection() {
        sample_catalog().check(&sample_spec()).unwrap();
    }

    #[test]
    fn test_check_rejects_unlisted_brand() {
        let mut spec = sample_spec();
        spec.brand = "Nokia".to_string();
        match sample_catalog().check(&spec) {
            Err(Error::InvalidSelection { field, value }) => {
                assert_eq!(field, "brand");
                assert_eq!(value, "Nokia");
            }
            other => panic!("expected invalid selection, got {other:?}"),
        }
    }

    #[test]
    fn test_check_rejects_out_of_bounds() {
        let catalog = sample_catalog();

        let mut spec = sample_spec();
        spec.ram = 3;
        assert!(matches!(
            catalog.check(&spec),
            Err(Error::InvalidSelection { field: "ram", .. })
        ));

        let mut spec = sample_spec();
        spec.screen_size = 9.9;
        assert!(matches!(
            catalog.check(&spec),
            Err(Error::InvalidSelection { field: "screen size", .. })
        ));

        let mut spec = sample_spec();
        spec.weight = 5.1;
        assert!(matches!(
            catalog.check(&spec),
            Err(Error::InvalidSelection { field: "weight", .. })
        ));

        let mut spec = sample_spec();
        spec.resolution = Resolution::new(1280, 800);
        assert!(matches!(
            catalog.check(&spec),
            Err(Error::InvalidSelection { field: "resolution", .. })
        ));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = Catalog::from_path(Path::new("/nonexistent/laptops.csv")).unwrap_err();
        assert!(matches!(
            err,
            Error::ArtifactLoad {
                artifact: "reference table",
                ..
            }
        ));
    }
}
