//! Askama templates for the web frontend.

use askama::Template;

use crate::network::Network;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Live map page.
#[derive(Template)]
#[template(path = "map.html")]
pub struct MapTemplate {
    pub map: MapView,
    /// Milliseconds between position polls
    pub poll_ms: u64,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Margin around the outermost stops, in map units.
const MAP_MARGIN: f64 = 10.0;

/// A stop drawn on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct StopView {
    pub code: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
}

/// A connection drawn as a straight segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentView {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub minutes: u32,
}

/// Everything needed to draw the static part of the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub stops: Vec<StopView>,
    pub segments: Vec<SegmentView>,
    pub lines: Vec<String>,
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl MapView {
    pub fn from_network(network: &Network) -> Self {
        let stops: Vec<StopView> = network
            .stops()
            .iter()
            .map(|(_, stop)| StopView {
                code: stop.code().to_string(),
                name: stop.name().to_string(),
                x: stop.position().x,
                y: stop.position().y,
            })
            .collect();

        let segments = network
            .connections()
            .into_iter()
            .filter_map(|(a, b, minutes)| {
                let from = network.stops().position(a).ok()?;
                let to = network.stops().position(b).ok()?;
                Some(SegmentView {
                    x1: from.x,
                    y1: from.y,
                    x2: to.x,
                    y2: to.y,
                    minutes,
                })
            })
            .collect();

        let lines = network
            .lines()
            .iter()
            .map(|line| line.code().to_string())
            .collect();

        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for stop in &stops {
            min_x = min_x.min(stop.x);
            min_y = min_y.min(stop.y);
            max_x = max_x.max(stop.x);
            max_y = max_y.max(stop.y);
        }
        if stops.is_empty() {
            (min_x, min_y, max_x, max_y) = (0.0, 0.0, 0.0, 0.0);
        }

        Self {
            stops,
            segments,
            lines,
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// SVG `viewBox` covering every stop plus a margin.
    pub fn view_box(&self) -> String {
        format!(
            "{} {} {} {}",
            self.min_x - MAP_MARGIN,
            self.min_y - MAP_MARGIN,
            self.max_x - self.min_x + 2.0 * MAP_MARGIN,
            self.max_y - self.min_y + 2.0 * MAP_MARGIN,
        )
    }
}
