//! The rendering capability surface shared by every chart backend, plus the
//! band geometry both concrete backends project through.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("render target unavailable: {reason}")]
    TargetUnavailable { reason: String },
    #[error("failed to write chart output")]
    Io(#[from] std::io::Error),
}

/// Axis labels and chart title.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AxisLabels {
    pub x_label: String,
    pub y_label: String,
    pub title: String,
}

impl Default for AxisLabels {
    fn default() -> Self {
        Self {
            x_label: "Species".to_string(),
            y_label: "Generations".to_string(),
            title: "Speciation".to_string(),
        }
    }
}

/// Minimal capability a rendering backend must provide. Backends buffer the
/// bands handed to `draw_band` and realize the figure once in `present`.
pub trait Canvas {
    fn draw_band(&mut self, x_center: f64, half_width: f64, y: f64) -> Result<(), CanvasError>;
    fn set_labels(&mut self, labels: AxisLabels);
    fn invert_vertical_axis(&mut self);
    fn present(&mut self) -> Result<(), CanvasError>;
}

/// One band in chart coordinates: a horizontal interval centered at
/// `x_center` with the given half-width, at vertical position `y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    pub x_center: f64,
    pub half_width: f64,
    pub y: f64,
}

/// Chart-coordinate bounding box of a band list, padded by half a unit on
/// every side so a band of maximal width exactly touches the plot edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Extent {
    pub fn of(bands: &[Band]) -> Option<Self> {
        let first = bands.first()?;
        let mut extent = Self {
            min_x: first.x_center,
            max_x: first.x_center,
            min_y: first.y,
            max_y: first.y,
        };
        for band in bands {
            extent.min_x = extent.min_x.min(band.x_center);
            extent.max_x = extent.max_x.max(band.x_center);
            extent.min_y = extent.min_y.min(band.y);
            extent.max_y = extent.max_y.max(band.y);
        }
        extent.min_x -= 0.5;
        extent.max_x += 0.5;
        extent.min_y -= 0.5;
        extent.max_y += 0.5;
        Some(extent)
    }

    fn x_span(&self) -> f64 {
        self.max_x - self.min_x
    }

    fn y_span(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Maps chart coordinates into a pixel plot area. When `inverted` is set the
/// smallest y value (generation 0) lands at the top of the area.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    extent: Extent,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    inverted: bool,
}

impl Projection {
    pub fn new(
        extent: Extent,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
        inverted: bool,
    ) -> Self {
        Self {
            extent,
            left,
            top,
            width,
            height,
            inverted,
        }
    }

    pub fn x(&self, x: f64) -> f64 {
        self.left + (x - self.extent.min_x) / self.extent.x_span() * self.width
    }

    pub fn y(&self, y: f64) -> f64 {
        let fraction = (y - self.extent.min_y) / self.extent.y_span();
        if self.inverted {
            self.top + fraction * self.height
        } else {
            self.top + (1.0 - fraction) * self.height
        }
    }

    /// Pixel rectangle `[x, y, width, height]` for one band. A band occupies
    /// one full generation row in height.
    pub fn band_rect(&self, band: &Band) -> [f64; 4] {
        let x = self.x(band.x_center - band.half_width);
        let width = band.half_width * 2.0 / self.extent.x_span() * self.width;
        let top_edge = self.y(band.y - 0.5).min(self.y(band.y + 0.5));
        let height = self.height / self.extent.y_span();
        [x, top_edge, width, height]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bands() -> Vec<Band> {
        vec![
            Band {
                x_center: 0.0,
                half_width: 0.5,
                y: 0.0,
            },
            Band {
                x_center: 1.0,
                half_width: 0.25,
                y: 2.0,
            },
        ]
    }

    #[test]
    fn extent_pads_band_centers_by_half_a_unit() {
        let extent = Extent::of(&sample_bands()).unwrap();
        assert_eq!(extent.min_x, -0.5);
        assert_eq!(extent.max_x, 1.5);
        assert_eq!(extent.min_y, -0.5);
        assert_eq!(extent.max_y, 2.5);
    }

    #[test]
    fn extent_of_no_bands_is_none() {
        assert!(Extent::of(&[]).is_none());
    }

    #[test]
    fn inversion_flips_the_vertical_mapping() {
        let extent = Extent::of(&sample_bands()).unwrap();
        let upright = Projection::new(extent, 0.0, 0.0, 100.0, 300.0, false);
        let inverted = Projection::new(extent, 0.0, 0.0, 100.0, 300.0, true);

        // Generation 0 sits near the bottom upright and near the top inverted.
        assert!(upright.y(0.0) > upright.y(2.0));
        assert!(inverted.y(0.0) < inverted.y(2.0));
        // The x mapping is unaffected.
        assert_eq!(upright.x(1.0), inverted.x(1.0));
    }

    #[test]
    fn band_rect_spans_the_full_interval_and_one_row() {
        let bands = sample_bands();
        let extent = Extent::of(&bands).unwrap();
        let projection = Projection::new(extent, 10.0, 20.0, 200.0, 300.0, true);

        let rect = projection.band_rect(&bands[0]);
        // Full-width band: spans one species slot of the two in the extent.
        assert!((rect[2] - 100.0).abs() < 1e-9);
        // One generation row out of three.
        assert!((rect[3] - 100.0).abs() < 1e-9);
        assert!((rect[0] - projection.x(-0.5)).abs() < 1e-9);
    }
}
