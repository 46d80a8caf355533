//! Connector geometry between mapped fields.
//!
//! Layout stays with the renderer: it supplies each field's box in container
//! coordinates and gets back one curve per resolvable mapping.

use fieldmap_model::{Mapping, Side};

/// Horizontal distance of each Bézier control point from its endpoint.
pub const CONTROL_OFFSET: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A field's box, relative to the container that hosts the connectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Cubic curve from an existing-side field to its new-side partner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    /// Position of the mapping in the store.
    pub mapping_index: usize,
    pub start: Point,
    pub control_start: Point,
    pub control_end: Point,
    pub end: Point,
}

impl Connector {
    /// SVG path data for the curve.
    pub fn svg_path(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x,
            self.start.y,
            self.control_start.x,
            self.control_start.y,
            self.control_end.x,
            self.control_end.y,
            self.end.x,
            self.end.y
        )
    }
}

/// One connector per mapping whose two fields are both on screen, in mapping order.
pub fn connector_lines<F>(mappings: &[Mapping], mut locate: F) -> Vec<Connector>
where
    F: FnMut(Side, &str) -> Option<Rect>,
{
    mappings
        .iter()
        .enumerate()
        .filter_map(|(mapping_index, mapping)| {
            let from = locate(Side::Existing, &mapping.existing)?;
            let to = locate(Side::New, &mapping.new)?;
            let start = Point {
                x: from.right(),
                y: from.center_y(),
            };
            let end = Point {
                x: to.left,
                y: to.center_y(),
            };
            Some(Connector {
                mapping_index,
                start,
                control_start: Point {
                    x: start.x + CONTROL_OFFSET,
                    y: start.y,
                },
                control_end: Point {
                    x: end.x - CONTROL_OFFSET,
                    y: end.y,
                },
                end,
            })
        })
        .collect()
}
