pub mod canvas;
pub mod dataset;
pub mod render;
pub mod svg;
pub mod table;
pub mod window;

pub use canvas::{AxisLabels, Canvas, CanvasError};
pub use dataset::{Dataset, DatasetLoader};
pub use render::{RenderError, Visualizer};
pub use table::{PopulationTable, TableError};
