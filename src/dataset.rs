//! Dataset files feeding the visualizer. A dataset is a named list of
//! species, each with one population count per generation; files are parsed
//! by extension (YAML or JSON).

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::table::{PopulationTable, TableError};

#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    pub species: Vec<SpeciesSeries>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesSeries {
    pub name: String,
    pub populations: Vec<f64>,
}

impl Dataset {
    /// The three-species speciation example: the first species declines to
    /// extinction while two newer species arise and take over.
    pub fn sample() -> Self {
        let series = |name: &str, populations: &[f64]| SpeciesSeries {
            name: name.to_string(),
            populations: populations.to_vec(),
        };
        Self {
            name: "neat_speciation".to_string(),
            title: Some("NEAT Speciation Visualization".to_string()),
            species: vec![
                series(
                    "species_1",
                    &[
                        150.0, 140.0, 130.0, 120.0, 100.0, 80.0, 50.0, 30.0, 10.0, 0.0, 0.0, 0.0,
                        0.0,
                    ],
                ),
                series(
                    "species_2",
                    &[
                        0.0, 0.0, 30.0, 50.0, 80.0, 100.0, 120.0, 130.0, 140.0, 150.0, 130.0,
                        110.0, 90.0,
                    ],
                ),
                series(
                    "species_3",
                    &[
                        0.0, 0.0, 0.0, 0.0, 0.0, 20.0, 50.0, 70.0, 90.0, 110.0, 120.0, 140.0,
                        150.0,
                    ],
                ),
            ],
        }
    }

    /// Chart title for this dataset, falling back to its name.
    pub fn title(&self) -> String {
        self.title.clone().unwrap_or_else(|| self.name.clone())
    }

    /// Flattens the series into a population table, surfacing shape and
    /// value violations.
    pub fn to_table(&self) -> Result<PopulationTable, TableError> {
        let rows = self
            .species
            .iter()
            .map(|series| series.populations.clone())
            .collect();
        PopulationTable::from_rows(rows)
    }
}

pub struct DatasetLoader {
    base_dir: PathBuf,
}

impl DatasetLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Dataset> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read dataset file {}", path.display()))?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        let dataset: Dataset = match extension {
            "yaml" | "yml" => serde_yaml::from_str(&data)
                .with_context(|| format!("Failed to parse {}", path.display()))?,
            "json" => serde_json::from_str(&data)
                .with_context(|| format!("Failed to parse {}", path.display()))?,
            other => bail!(
                "unsupported dataset format '{}' for {} (expected yaml, yml, or json)",
                other,
                path.display()
            ),
        };
        Ok(dataset)
    }
}
