//! Interactive backend: presents the chart in a native window and blocks
//! until the user closes it (Esc also exits).

use piston_window::*;

use crate::canvas::{AxisLabels, Band, Canvas, CanvasError, Extent, Projection};

const MARGIN: f64 = 40.0;
const BACKGROUND: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const BAND_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

pub struct WindowCanvas {
    width: u32,
    height: u32,
    bands: Vec<Band>,
    labels: AxisLabels,
    inverted: bool,
}

impl WindowCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bands: Vec::new(),
            labels: AxisLabels::default(),
            inverted: false,
        }
    }

    fn window_title(&self) -> String {
        format!(
            "{} ({} / {})",
            self.labels.title, self.labels.x_label, self.labels.y_label
        )
    }
}

impl Canvas for WindowCanvas {
    fn draw_band(&mut self, x_center: f64, half_width: f64, y: f64) -> Result<(), CanvasError> {
        self.bands.push(Band {
            x_center,
            half_width,
            y,
        });
        Ok(())
    }

    fn set_labels(&mut self, labels: AxisLabels) {
        self.labels = labels;
    }

    fn invert_vertical_axis(&mut self) {
        self.inverted = true;
    }

    fn present(&mut self) -> Result<(), CanvasError> {
        let mut window: PistonWindow =
            WindowSettings::new(self.window_title(), [self.width, self.height])
                .exit_on_esc(true)
                .build()
                .map_err(|err| CanvasError::TargetUnavailable {
                    reason: err.to_string(),
                })?;

        let projection = Extent::of(&self.bands).map(|extent| {
            Projection::new(
                extent,
                MARGIN,
                MARGIN,
                f64::from(self.width) - 2.0 * MARGIN,
                f64::from(self.height) - 2.0 * MARGIN,
                self.inverted,
            )
        });

        let bands = &self.bands;
        while let Some(event) = window.next() {
            window.draw_2d(&event, |context, graphics, _device| {
                clear(BACKGROUND, graphics);
                let Some(projection) = projection else {
                    return;
                };
                for band in bands {
                    rectangle(
                        BAND_COLOR,
                        projection.band_rect(band),
                        context.transform,
                        graphics,
                    );
                }
            });
        }
        Ok(())
    }
}
