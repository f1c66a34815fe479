//! Population tables and global-maximum normalization.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("population table must have at least one species and one generation")]
    EmptyTable,
    #[error("species row {row} has {found} generations but expected {expected}")]
    ShapeMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("species {species} has negative population {value} at generation {generation}")]
    NegativeCell {
        species: usize,
        generation: usize,
        value: f64,
    },
    #[error("species {species} has non-finite population {value} at generation {generation}")]
    NonFiniteCell {
        species: usize,
        generation: usize,
        value: f64,
    },
    #[error("every population in the table is zero; the global maximum cannot be used as a divisor")]
    DivisionByZero,
}

/// An S×G grid of population counts: one row per species, one column per
/// generation. Validated on construction and immutable afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct PopulationTable {
    rows: Vec<Vec<f64>>,
}

impl PopulationTable {
    /// Builds a table from raw rows, rejecting empty, ragged, negative, or
    /// non-finite input before anything downstream can observe it.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, TableError> {
        let Some(first) = rows.first() else {
            return Err(TableError::EmptyTable);
        };
        let expected = first.len();
        if expected == 0 {
            return Err(TableError::EmptyTable);
        }
        for (row, populations) in rows.iter().enumerate() {
            if populations.len() != expected {
                return Err(TableError::ShapeMismatch {
                    row,
                    expected,
                    found: populations.len(),
                });
            }
            for (generation, &value) in populations.iter().enumerate() {
                // NaN compares false against everything, so finiteness has
                // to be checked on its own before the sign.
                if !value.is_finite() {
                    return Err(TableError::NonFiniteCell {
                        species: row,
                        generation,
                        value,
                    });
                }
                if value < 0.0 {
                    return Err(TableError::NegativeCell {
                        species: row,
                        generation,
                        value,
                    });
                }
            }
        }
        Ok(Self { rows })
    }

    pub fn species(&self) -> usize {
        self.rows.len()
    }

    pub fn generations(&self) -> usize {
        self.rows[0].len()
    }

    pub fn value(&self, species: usize, generation: usize) -> f64 {
        self.rows[species][generation]
    }

    /// Maximum over all cells. Zero only for the all-zero table.
    pub fn max_value(&self) -> f64 {
        self.rows
            .iter()
            .flat_map(|row| row.iter().copied())
            .fold(0.0, f64::max)
    }

    /// Scales every cell by the reciprocal of the global maximum so the
    /// largest cell maps to 1.0. The all-zero table has no usable maximum
    /// and is rejected instead of producing NaNs.
    pub fn normalized(&self) -> Result<NormalizedTable, TableError> {
        let max = self.max_value();
        if max == 0.0 {
            return Err(TableError::DivisionByZero);
        }
        let rows = self
            .rows
            .iter()
            .map(|row| row.iter().map(|value| value / max).collect())
            .collect();
        Ok(NormalizedTable { rows })
    }
}

/// A population table scaled into [0, 1]; the cell(s) holding the global
/// maximum equal exactly 1.0.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedTable {
    rows: Vec<Vec<f64>>,
}

impl NormalizedTable {
    pub fn species(&self) -> usize {
        self.rows.len()
    }

    pub fn generations(&self) -> usize {
        self.rows[0].len()
    }

    pub fn value(&self, species: usize, generation: usize) -> f64 {
        self.rows[species][generation]
    }

    /// Half the band width for one species at one generation; the band spans
    /// `[s - half_width, s + half_width]` around the species axis.
    pub fn half_width(&self, species: usize, generation: usize) -> f64 {
        self.value(species, generation) / 2.0
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXACT: f64 = 1e-9;
    // The worked scenario quotes its expectations to three decimal places.
    const ROUNDED: f64 = 1e-3;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn normalizes_against_the_global_maximum() {
        let table =
            PopulationTable::from_rows(vec![vec![150.0, 140.0, 130.0], vec![0.0, 50.0, 100.0]])
                .unwrap();
        assert_close(table.max_value(), 150.0, EXACT);

        let normalized = table.normalized().unwrap();
        assert_close(normalized.value(0, 0), 1.0, EXACT);
        assert_close(normalized.value(0, 1), 0.933, ROUNDED);
        assert_close(normalized.value(0, 2), 0.867, ROUNDED);
        assert_close(normalized.value(1, 0), 0.0, EXACT);
        assert_close(normalized.value(1, 1), 0.333, ROUNDED);
        assert_close(normalized.value(1, 2), 0.667, ROUNDED);
    }

    #[test]
    fn band_half_widths_follow_the_normalized_values() {
        let table =
            PopulationTable::from_rows(vec![vec![150.0, 140.0, 130.0], vec![0.0, 50.0, 100.0]])
                .unwrap();
        let normalized = table.normalized().unwrap();
        assert_close(normalized.half_width(0, 0), 0.5, EXACT);
        assert_close(normalized.half_width(0, 1), 0.467, ROUNDED);
        assert_close(normalized.half_width(0, 2), 0.433, ROUNDED);
    }

    #[test]
    fn normalized_values_stay_within_unit_interval() {
        let table = PopulationTable::from_rows(vec![
            vec![3.0, 7.0, 1.0],
            vec![0.0, 2.0, 9.0],
            vec![4.0, 4.0, 4.0],
        ])
        .unwrap();
        let normalized = table.normalized().unwrap();
        let mut maxima = 0;
        for s in 0..normalized.species() {
            for g in 0..normalized.generations() {
                let value = normalized.value(s, g);
                assert!((0.0..=1.0).contains(&value));
                if (value - 1.0).abs() < EXACT {
                    maxima += 1;
                }
            }
        }
        assert_eq!(maxima, 1);
    }

    #[test]
    fn tied_maxima_all_normalize_to_one() {
        let table =
            PopulationTable::from_rows(vec![vec![5.0, 1.0], vec![1.0, 5.0]]).unwrap();
        let normalized = table.normalized().unwrap();
        assert!((normalized.value(0, 0) - 1.0).abs() < EXACT);
        assert!((normalized.value(1, 1) - 1.0).abs() < EXACT);
    }

    #[test]
    fn normalization_is_idempotent() {
        let table =
            PopulationTable::from_rows(vec![vec![150.0, 140.0, 130.0], vec![0.0, 50.0, 100.0]])
                .unwrap();
        let once = table.normalized().unwrap();
        let again = PopulationTable::from_rows(once.rows().to_vec())
            .unwrap()
            .normalized()
            .unwrap();
        assert_eq!(once, again);
    }

    #[test]
    fn all_zero_table_is_rejected() {
        let table = PopulationTable::from_rows(vec![vec![0.0, 0.0], vec![0.0, 0.0]]).unwrap();
        assert!(matches!(table.normalized(), Err(TableError::DivisionByZero)));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let result = PopulationTable::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(
            result,
            Err(TableError::ShapeMismatch {
                row: 1,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            PopulationTable::from_rows(vec![]),
            Err(TableError::EmptyTable)
        ));
        assert!(matches!(
            PopulationTable::from_rows(vec![vec![]]),
            Err(TableError::EmptyTable)
        ));
    }

    #[test]
    fn nan_cells_are_rejected() {
        let result = PopulationTable::from_rows(vec![vec![f64::NAN, 1.0]]);
        assert!(matches!(
            result,
            Err(TableError::NonFiniteCell {
                species: 0,
                generation: 0,
                ..
            })
        ));
    }

    #[test]
    fn infinite_cells_are_rejected() {
        let result = PopulationTable::from_rows(vec![vec![1.0, f64::INFINITY]]);
        assert!(matches!(
            result,
            Err(TableError::NonFiniteCell {
                species: 0,
                generation: 1,
                ..
            })
        ));
        assert!(PopulationTable::from_rows(vec![vec![f64::NEG_INFINITY]]).is_err());
    }

    #[test]
    fn negative_cells_are_rejected() {
        let result = PopulationTable::from_rows(vec![vec![1.0, -2.0]]);
        assert!(matches!(
            result,
            Err(TableError::NegativeCell {
                species: 0,
                generation: 1,
                ..
            })
        ));
    }
}
