//! Node detection geometry.
//!
//! Turns the circles detected on an image of the tree into the two bundled
//! documents. Image decoding and contour extraction happen upstream; this
//! module starts from each contour's minimum enclosing circle and area.

use crate::config::ScannerConfig;
use crate::tree_data::{NodePosition, NodePositionStructure, NodesDescription, TooltipContent};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use tracing::debug;

/// A contour as reported by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    /// Centre of the minimum enclosing circle (pixels)
    pub center_x: f64,
    /// Centre of the minimum enclosing circle (pixels)
    pub center_y: f64,
    /// Radius of the minimum enclosing circle (pixels)
    pub radius: f64,
    /// Contour area (pixels)
    pub area: f64,
}

/// Node size bracket, decided by circle radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Radius 1..=7
    Small,
    /// Radius 8..=10
    Notable,
    /// Radius 11..=14
    Keystone,
}

/// A detected node circle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circle {
    /// Centre x (pixels)
    pub x: u32,
    /// Centre y (pixels)
    pub y: u32,
    /// Radius (pixels)
    pub radius: u32,
}

impl Circle {
    /// Creates a new circle.
    #[must_use]
    pub const fn new(x: u32, y: u32, radius: u32) -> Self {
        Self { x, y, radius }
    }

    /// Classifies the circle by radius.
    pub fn kind(&self) -> Result<NodeKind> {
        match self.radius {
            1..=7 => Ok(NodeKind::Small),
            8..=10 => Ok(NodeKind::Notable),
            11..=14 => Ok(NodeKind::Keystone),
            radius => bail!("Radius out of range for a tree node: {radius}"),
        }
    }

    /// Returns true if the centres are closer than the sum of the radii.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        let distance = dx.hypot(dy);

        distance < f64::from(self.radius) + f64::from(other.radius)
    }
}

/// Node counts produced by a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScanReport {
    /// Small passives (counted, not emitted)
    pub small: usize,
    /// Notables
    pub notables: usize,
    /// Keystones
    pub keystones: usize,
    /// Circles discarded because a larger overlapping circle was kept
    pub removed_overlaps: usize,
}

/// Everything a scan produces.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutput {
    /// Positions document, coordinates normalised to the image size
    pub positions: NodePositionStructure,
    /// Descriptions document primed with one placeholder per node
    pub descriptions: NodesDescription,
    /// Counts per node kind
    pub report: ScanReport,
}

/// Converts detected contours into tree documents.
#[derive(Debug, Clone)]
pub struct Scanner {
    config: ScannerConfig,
}

impl Scanner {
    /// Creates a scanner with the given thresholds.
    #[must_use]
    pub const fn new(config: ScannerConfig) -> Self {
        Self { config }
    }

    /// Drops tiny contours and snaps the rest to integer circles with a
    /// clamped radius.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn circles_from_contours(&self, contours: &[Contour]) -> Vec<Circle> {
        let min = f64::from(self.config.min_radius);
        let max = f64::from(self.config.max_radius);

        contours
            .iter()
            .filter(|contour| contour.area >= self.config.min_contour_area)
            .map(|contour| {
                let radius = contour.radius.clamp(min, max);
                Circle::new(
                    contour.center_x.max(0.0) as u32,
                    contour.center_y.max(0.0) as u32,
                    radius as u32,
                )
            })
            .collect()
    }

    /// Runs the whole pipeline for an image of `width` x `height` pixels.
    pub fn scan(&self, contours: &[Contour], width: u32, height: u32) -> Result<ScanOutput> {
        if width == 0 || height == 0 {
            bail!("Image dimensions must be non-zero, got {width}x{height}");
        }

        let circles = self.circles_from_contours(contours);
        let detected = circles.len();
        let mut kept = remove_overlaps(circles);
        sort_circles(&mut kept);

        let mut small = Vec::new();
        let mut notables = Vec::new();
        let mut keystones = Vec::new();
        for circle in kept {
            match circle.kind()? {
                NodeKind::Small => small.push(circle),
                NodeKind::Notable => notables.push(circle),
                NodeKind::Keystone => keystones.push(circle),
            }
        }

        let report = ScanReport {
            small: small.len(),
            notables: notables.len(),
            keystones: keystones.len(),
            removed_overlaps: detected - (small.len() + notables.len() + keystones.len()),
        };
        debug!(?report, "Scan complete");

        let positions = NodePositionStructure {
            keystones: number_positions(&keystones, 'K', width, height),
            notables: number_positions(&notables, 'N', width, height),
        };
        let descriptions = prime_descriptions(&positions);

        Ok(ScanOutput {
            positions,
            descriptions,
            report,
        })
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(ScannerConfig::default())
    }
}

/// Removes overlapping circles, keeping the larger of each overlapping pair.
///
/// Circles are visited in order. A circle strictly larger than a kept
/// circle it overlaps replaces it; otherwise the new circle is dropped.
#[must_use]
pub fn remove_overlaps(circles: Vec<Circle>) -> Vec<Circle> {
    let mut kept: Vec<Circle> = Vec::with_capacity(circles.len());

    for circle in circles {
        let mut keep_circle = true;
        let mut i = 0;
        while i < kept.len() {
            if kept[i].overlaps(&circle) {
                if circle.radius > kept[i].radius {
                    debug!(?circle, replaced = ?kept[i], "Circle removed");
                    kept.remove(i);
                    continue;
                }
                keep_circle = false;
                break;
            }
            i += 1;
        }
        if keep_circle {
            kept.push(circle);
        }
    }

    kept
}

/// Sorts circles top to bottom, then left to right.
pub fn sort_circles(circles: &mut [Circle]) {
    circles.sort_by_key(|circle| (circle.y, circle.x));
}

/// Assigns 1-based ids (`K1`, `N1`, ...) and normalises coordinates to 0..1.
fn number_positions(circles: &[Circle], prefix: char, width: u32, height: u32) -> Vec<NodePosition> {
    circles
        .iter()
        .enumerate()
        .map(|(index, circle)| NodePosition {
            x: normalise(circle.x, width),
            y: normalise(circle.y, height),
            id: format!("{prefix}{}", index + 1),
        })
        .collect()
}

/// `value / extent` as a JSON number; `extent` is non-zero.
fn normalise(value: u32, extent: u32) -> Number {
    Number::from_f64(f64::from(value) / f64::from(extent)).unwrap_or_else(|| Number::from(0))
}

/// Builds a descriptions document with the id as name and no stats.
#[must_use]
pub fn prime_descriptions(positions: &NodePositionStructure) -> NodesDescription {
    positions
        .keystones
        .iter()
        .chain(&positions.notables)
        .map(|position| {
            (
                position.id.clone(),
                TooltipContent {
                    name: position.id.clone(),
                    stats: Vec::new(),
                },
            )
        })
        .collect()
}
