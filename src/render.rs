//! The visualizer: one linear pass from a population table to a presented
//! chart. Any failure aborts the pass; nothing is partially presented.

use thiserror::Error;

use crate::canvas::{AxisLabels, Canvas, CanvasError};
use crate::table::{PopulationTable, TableError};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// Renders a population table as a vertical stacked-band chart: one vertical
/// axis per species, generations progressing top to bottom.
#[derive(Clone, Debug, Default)]
pub struct Visualizer {
    labels: AxisLabels,
}

impl Visualizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.labels.title = title.into();
        self
    }

    pub fn with_axis_labels(
        mut self,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        self.labels.x_label = x_label.into();
        self.labels.y_label = y_label.into();
        self
    }

    /// Normalizes the table and draws one band per cell: species `s` at
    /// generation `g` becomes a horizontal interval centered at `x = s` with
    /// half-width `normalized[s][g] / 2` at vertical position `y = g`.
    pub fn render(
        &self,
        table: &PopulationTable,
        canvas: &mut dyn Canvas,
    ) -> Result<(), RenderError> {
        let normalized = table.normalized()?;
        for species in 0..normalized.species() {
            for generation in 0..normalized.generations() {
                canvas.draw_band(
                    species as f64,
                    normalized.half_width(species, generation),
                    generation as f64,
                )?;
            }
        }
        canvas.set_labels(self.labels.clone());
        canvas.invert_vertical_axis();
        canvas.present()?;
        Ok(())
    }
}
