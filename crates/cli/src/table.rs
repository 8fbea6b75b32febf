//! CSV input/output for village layouts (polars).

use anyhow::{anyhow, Context, Result};
use convexlab::facility::Point2;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

use crate::render::FacilityReport;

/// Read villages from a CSV with numeric `x` and `y` columns.
pub fn read_villages(path: &str) -> Result<Vec<Point2>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {path}"))?
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading x/y columns from {path}"))?;
    tracing::debug!(rows = df.height(), cols = df.width(), "villages_csv_shape");
    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    xs.into_iter()
        .zip(ys.into_iter())
        .enumerate()
        .map(|(i, row)| match row {
            (Some(x), Some(y)) => Ok(Point2::new(x, y)),
            _ => Err(anyhow!("{path}: row {} has a missing coordinate", i + 1)),
        })
        .collect()
}

/// Write one row per village: index, coordinates, distance, active flag.
pub fn write_table(path: &Path, report: &FacilityReport) -> Result<()> {
    let n = report.villages.len() as u32;
    let mut df = df!(
        "village" => (1..=n).collect::<Vec<u32>>(),
        "x" => report.villages.iter().map(|v| v.x).collect::<Vec<f64>>(),
        "y" => report.villages.iter().map(|v| v.y).collect::<Vec<f64>>(),
        "distance" => report.villages.iter().map(|v| v.distance).collect::<Vec<f64>>(),
        "active" => report.villages.iter().map(|v| v.active).collect::<Vec<bool>>(),
    )?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
