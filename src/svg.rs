//! Headless backend that lays the chart out as an SVG document and writes it
//! to a file on `present`.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::canvas::{AxisLabels, Band, Canvas, CanvasError, Extent, Projection};

const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 44.0;
const MARGIN_BOTTOM: f64 = 52.0;
const BAND_FILL: &str = "#808080";
const BAND_EDGE: &str = "#ffffff";
const FRAME_STROKE: &str = "#333333";

pub struct SvgCanvas {
    path: PathBuf,
    width: u32,
    height: u32,
    bands: Vec<Band>,
    labels: AxisLabels,
    inverted: bool,
}

impl SvgCanvas {
    pub fn new(path: impl AsRef<Path>, width: u32, height: u32) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            width,
            height,
            bands: Vec::new(),
            labels: AxisLabels::default(),
            inverted: false,
        }
    }

    /// Serializes the buffered chart. Deterministic for identical input: no
    /// timestamps, no randomness, fixed-precision coordinates.
    pub fn svg_document(&self) -> String {
        let width = f64::from(self.width);
        let height = f64::from(self.height);
        // Figures smaller than the margins still get a degenerate but valid
        // plot area; rect dimensions must never go negative.
        let plot_width = (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
        let plot_height = (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);

        let mut doc = String::new();
        let _ = writeln!(
            doc,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\">",
            self.width, self.height
        );
        let _ = writeln!(
            doc,
            "  <rect width=\"{}\" height=\"{}\" fill=\"#ffffff\"/>",
            self.width, self.height
        );

        if let Some(extent) = Extent::of(&self.bands) {
            let projection = Projection::new(
                extent,
                MARGIN_LEFT,
                MARGIN_TOP,
                plot_width,
                plot_height,
                self.inverted,
            );
            for band in &self.bands {
                let [x, y, w, h] = projection.band_rect(band);
                let _ = writeln!(
                    doc,
                    "  <rect class=\"band\" x=\"{x:.2}\" y=\"{y:.2}\" width=\"{w:.2}\" \
                     height=\"{h:.2}\" fill=\"{BAND_FILL}\" stroke=\"{BAND_EDGE}\" \
                     stroke-width=\"0.5\"/>"
                );
            }
            self.write_ticks(&mut doc, &projection, plot_height);
        }

        let _ = writeln!(
            doc,
            "  <rect x=\"{MARGIN_LEFT:.2}\" y=\"{MARGIN_TOP:.2}\" width=\"{plot_width:.2}\" \
             height=\"{plot_height:.2}\" fill=\"none\" stroke=\"{FRAME_STROKE}\"/>"
        );

        let center_x = MARGIN_LEFT + plot_width / 2.0;
        let center_y = MARGIN_TOP + plot_height / 2.0;
        let _ = writeln!(
            doc,
            "  <text x=\"{center_x:.2}\" y=\"26\" text-anchor=\"middle\" \
             font-family=\"sans-serif\" font-size=\"16\">{}</text>",
            escape(&self.labels.title)
        );
        let _ = writeln!(
            doc,
            "  <text x=\"{center_x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" \
             font-family=\"sans-serif\" font-size=\"13\">{}</text>",
            height - 12.0,
            escape(&self.labels.x_label)
        );
        let _ = writeln!(
            doc,
            "  <text x=\"16\" y=\"{center_y:.2}\" text-anchor=\"middle\" \
             font-family=\"sans-serif\" font-size=\"13\" \
             transform=\"rotate(-90 16 {center_y:.2})\">{}</text>",
            escape(&self.labels.y_label)
        );

        doc.push_str("</svg>\n");
        doc
    }

    fn write_ticks(&self, doc: &mut String, projection: &Projection, plot_height: f64) {
        let mut species: Vec<i64> = self
            .bands
            .iter()
            .map(|band| band.x_center.round() as i64)
            .collect();
        species.sort_unstable();
        species.dedup();
        let tick_y = MARGIN_TOP + plot_height + 16.0;
        for s in &species {
            let _ = writeln!(
                doc,
                "  <text class=\"tick\" x=\"{:.2}\" y=\"{tick_y:.2}\" text-anchor=\"middle\" \
                 font-family=\"sans-serif\" font-size=\"11\">{s}</text>",
                projection.x(*s as f64)
            );
        }

        let mut generations: Vec<i64> = self
            .bands
            .iter()
            .map(|band| band.y.round() as i64)
            .collect();
        generations.sort_unstable();
        generations.dedup();
        // Thin the generation ticks so tall charts stay readable.
        let step = (generations.len() / 12).max(1);
        for g in generations.iter().step_by(step) {
            let _ = writeln!(
                doc,
                "  <text class=\"tick\" x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" \
                 font-family=\"sans-serif\" font-size=\"11\">{g}</text>",
                MARGIN_LEFT - 8.0,
                projection.y(*g as f64) + 4.0
            );
        }
    }
}

impl Canvas for SvgCanvas {
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
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(CanvasError::TargetUnavailable {
                    reason: format!("output directory {} does not exist", parent.display()),
                });
            }
        }
        fs::write(&self.path, self.svg_document())?;
        Ok(())
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
