//! Average command implementation
//!
//! Loads a case file, averages its cell values onto faces and prints the
//! face values with their derivatives.
//!
//! # Case file
//!
//! ```toml
//! num_cells = 3
//! width = 1
//! values = [[10.0], [20.0], [30.0]]
//! faces = [[1, 2], [2, 3]]    # 1-based cell numbers
//! seeds = [1, 3]              # optional
//! ```
//!
//! The first component of each seeded cell becomes an independent variable;
//! the `k`-th seed owns derivative slot `k`.

use std::path::Path;

use ad_core::AdScalar;
use ad_operators::{face_average, CellField, Connectivity, FaceField};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Mesh and cell data read from a case file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Case {
    /// Number of cells
    pub num_cells: usize,
    /// Components per cell
    pub width: usize,
    /// One row of `width` values per cell
    pub values: Vec<Vec<f64>>,
    /// 1-based `[left, right]` cell numbers per face
    pub faces: Vec<[i64; 2]>,
    /// 1-based cells whose first component is differentiated
    #[serde(default)]
    pub seeds: Vec<i64>,
}

impl Case {
    /// Parses case text.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Builds the AD cell field and validated connectivity.
    pub fn build(&self) -> Result<(CellField<AdScalar>, Connectivity)> {
        if self.values.len() != self.num_cells {
            return Err(CliError::InvalidCase(format!(
                "{} value rows for {} cells",
                self.values.len(),
                self.num_cells
            )));
        }
        if let Some((cell, row)) = self
            .values
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.width)
        {
            return Err(CliError::InvalidCase(format!(
                "cell {} has {} values, expected {}",
                cell + 1,
                row.len(),
                self.width
            )));
        }

        let data = self
            .values
            .iter()
            .flatten()
            .map(|&v| AdScalar::constant(v))
            .collect();
        let mut cells = CellField::new(self.num_cells, self.width, data)?;

        let mut seeded = vec![false; self.num_cells];
        for (slot, &cell) in self.seeds.iter().enumerate() {
            let index = usize::try_from(cell.saturating_sub(1))
                .ok()
                .filter(|&i| i < self.num_cells)
                .ok_or_else(|| {
                    CliError::InvalidCase(format!(
                        "seed cell {} outside 1..={}",
                        cell, self.num_cells
                    ))
                })?;
            if std::mem::replace(&mut seeded[index], true) {
                return Err(CliError::InvalidCase(format!("cell {} seeded twice", cell)));
            }
            cells.row_mut(index)[0].set_derivative(slot, 1.0);
        }

        let pairs: Vec<(i64, i64)> = self.faces.iter().map(|&[l, r]| (l, r)).collect();
        let connectivity = Connectivity::from_one_based(&pairs, self.num_cells)?;
        Ok((cells, connectivity))
    }
}

/// One output row.
#[derive(Debug, Serialize)]
pub struct FaceReport {
    /// 1-based face number
    pub face: usize,
    /// 1-based left cell
    pub left: usize,
    /// 1-based right cell
    pub right: usize,
    /// Averaged components with derivatives
    pub values: Vec<AdScalar>,
}

/// Collects face results into report rows.
pub fn report(connectivity: &Connectivity, faces: &FaceField<AdScalar>) -> Vec<FaceReport> {
    connectivity
        .faces()
        .iter()
        .zip(faces.iter_rows())
        .enumerate()
        .map(|(f, (cells, row))| FaceReport {
            face: f + 1,
            left: cells.left + 1,
            right: cells.right + 1,
            values: row.to_vec(),
        })
        .collect()
}

/// Run the average command
pub fn run(case_path: &str, format: &str, config: &CliConfig) -> anyhow::Result<()> {
    info!("Starting face average...");
    info!("  Case: {}", case_path);
    info!("  Output format: {}", format);

    if format != "table" && format != "json" {
        return Err(CliError::InvalidArgument(format!(
            "Unknown format: {}. Supported: table, json",
            format
        ))
        .into());
    }
    if !Path::new(case_path).exists() {
        return Err(CliError::FileNotFound(case_path.to_string()).into());
    }

    let text = std::fs::read_to_string(case_path)
        .with_context(|| format!("reading case {}", case_path))?;
    let case = Case::parse(&text).with_context(|| format!("parsing case {}", case_path))?;
    let (cells, connectivity) = case.build()?;
    info!(
        "  Mesh: {} cells, {} faces, width {}, {} seeded",
        connectivity.num_cells(),
        connectivity.num_faces(),
        cells.width(),
        case.seeds.len()
    );

    let faces = face_average(&cells, &connectivity, &config.parallel).map_err(CliError::from)?;
    let rows = report(&connectivity, &faces);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&rows)?),
        _ => print_table(&rows),
    }

    info!("Face average complete");
    Ok(())
}

fn print_table(rows: &[FaceReport]) {
    println!(
        "\n{:>6} {:>6} {:>6} {:>4}  {:>14}  derivatives",
        "face", "left", "right", "comp", "value"
    );
    for row in rows {
        for (c, v) in row.values.iter().enumerate() {
            println!(
                "{:>6} {:>6} {:>6} {:>4}  {:>14.6}  {:?}",
                row.face,
                row.left,
                row.right,
                c + 1,
                v.value(),
                v.derivatives()
            );
        }
    }
    if rows.is_empty() {
        println!("(no faces)");
    }
}
