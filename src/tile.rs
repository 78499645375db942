//! The persisted layout model.
//!
//! A [`Tile`] is a rectangle expressed as fractions of its container, so a
//! layout is resolution-independent: the same layout JSON produces sensible
//! previews on a 1366×768 laptop panel and a 4K monitor. [`Layout`] is a
//! named ordered collection of tiles; the JSON wire schema
//! (`[{"id", "tiles": [{"x","y","width","height","groups"}]}]`) is stable
//! and shared with whatever settings backend persists it.

use crate::rect::Rect;
use serde::{Deserialize, Serialize};

/// Slack tolerated on the `x + width <= 1` / `y + height <= 1` invariant.
/// Layout editors routinely produce values like `0.33 + 0.67 = 1.0000000001`.
const NORMALIZED_SLACK: f64 = 1e-4;

/// A normalized rectangle within a layout's container.
///
/// All four geometry fields are fractions in `[0, 1]`. `groups` links tiles
/// that share a draggable divider in the layout editor; the engine carries
/// them through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Ordered group ids this tile belongs to.
    #[serde(default)]
    pub groups: Vec<u32>,
}

impl Tile {
    pub fn new(x: f64, y: f64, width: f64, height: f64, groups: Vec<u32>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            groups,
        }
    }

    /// Whether the tile satisfies the normalization invariant:
    /// non-negative origin and extent, and `x + width`, `y + height` not
    /// exceeding `1` beyond floating-point slack.
    pub fn is_normalized(&self) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.width >= 0.0
            && self.height >= 0.0
            && self.x + self.width <= 1.0 + NORMALIZED_SLACK
            && self.y + self.height <= 1.0 + NORMALIZED_SLACK
    }

    /// Scale this tile into pixel space within `container`.
    ///
    /// Each coordinate is `round(container_extent * fraction + container_origin)`;
    /// extents are rounded the same way without the origin term.
    pub fn apply_to(&self, container: &Rect) -> Rect {
        debug_assert!(
            !container.is_degenerate(),
            "tile applied to degenerate container {container:?}"
        );
        Rect::new(
            (container.width as f64 * self.x + container.x as f64).round() as i32,
            (container.height as f64 * self.y + container.y as f64).round() as i32,
            (container.width as f64 * self.width).round() as i32,
            (container.height as f64 * self.height).round() as i32,
        )
    }

    /// Exact inverse of [`Tile::apply_to`]: express a pixel rectangle as
    /// fractions of `container`. The resulting tile carries no groups.
    pub fn from_rect(rect: &Rect, container: &Rect) -> Self {
        debug_assert!(
            !container.is_degenerate(),
            "tile built from degenerate container {container:?}"
        );
        Self {
            x: (rect.x - container.x) as f64 / container.width as f64,
            y: (rect.y - container.y) as f64 / container.height as f64,
            width: rect.width as f64 / container.width as f64,
            height: rect.height as f64 / container.height as f64,
            groups: Vec::new(),
        }
    }
}

/// A named ordered collection of [`Tile`]s covering a work area.
///
/// Identity is the `id` string: it stays stable across edits unless the
/// layout is explicitly renamed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub id: String,
    pub tiles: Vec<Tile>,
}

impl Layout {
    pub fn new(id: impl Into<String>, tiles: Vec<Tile>) -> Self {
        Self {
            id: id.into(),
            tiles,
        }
    }

    /// Whether every tile in the layout satisfies the normalization invariant.
    pub fn is_normalized(&self) -> bool {
        self.tiles.iter().all(Tile::is_normalized)
    }
}

/// The built-in default layout set.
///
/// Used whenever the persisted layout list is missing, malformed, or empty.
/// Four layouts: side-columns-plus-center, the same with a split left column,
/// and two asymmetric two-column splits.
pub fn default_layouts() -> Vec<Layout> {
    vec![
        Layout::new(
            "1",
            vec![
                Tile::new(0.0, 0.0, 0.22, 1.0, vec![1]),
                Tile::new(0.22, 0.0, 0.56, 1.0, vec![1, 2]),
                Tile::new(0.78, 0.0, 0.22, 1.0, vec![2]),
            ],
        ),
        Layout::new(
            "2",
            vec![
                Tile::new(0.0, 0.0, 0.22, 0.5, vec![1, 2]),
                Tile::new(0.0, 0.5, 0.22, 0.5, vec![1, 2]),
                Tile::new(0.22, 0.0, 0.56, 1.0, vec![2, 3]),
                Tile::new(0.78, 0.0, 0.22, 1.0, vec![3]),
            ],
        ),
        Layout::new(
            "3",
            vec![
                Tile::new(0.0, 0.0, 0.33, 1.0, vec![1]),
                Tile::new(0.33, 0.0, 0.67, 1.0, vec![1]),
            ],
        ),
        Layout::new(
            "4",
            vec![
                Tile::new(0.0, 0.0, 0.67, 1.0, vec![1]),
                Tile::new(0.67, 0.0, 0.33, 1.0, vec![1]),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_schema_round_trips() {
        let json = r#"[{"id":"main","tiles":[
            {"x":0.0,"y":0.0,"width":0.5,"height":1.0,"groups":[1]},
            {"x":0.5,"y":0.0,"width":0.5,"height":1.0,"groups":[1]}
        ]}]"#;
        let layouts: Vec<Layout> = serde_json::from_str(json).unwrap();
        assert_eq!(layouts.len(), 1);
        assert_eq!(layouts[0].id, "main");
        assert_eq!(layouts[0].tiles.len(), 2);
        assert_eq!(layouts[0].tiles[0].groups, vec![1]);

        let reserialized = serde_json::to_string(&layouts).unwrap();
        let reparsed: Vec<Layout> = serde_json::from_str(&reserialized).unwrap();
        assert_eq!(reparsed, layouts);
    }

    #[test]
    fn missing_groups_field_defaults_to_empty() {
        let json = r#"{"x":0.0,"y":0.0,"width":1.0,"height":1.0}"#;
        let tile: Tile = serde_json::from_str(json).unwrap();
        assert!(tile.groups.is_empty());
    }

    #[test]
    fn apply_to_scales_into_container() {
        let tile = Tile::new(0.5, 0.0, 0.5, 1.0, vec![]);
        let container = Rect::new(100, 200, 1000, 800);
        assert_eq!(tile.apply_to(&container), Rect::new(600, 200, 500, 800));
    }

    #[test]
    fn from_rect_is_inverse_of_apply_to() {
        let container = Rect::new(0, 0, 1000, 800);
        let tile = Tile::new(0.22, 0.0, 0.56, 1.0, vec![]);
        let rect = tile.apply_to(&container);
        let back = Tile::from_rect(&rect, &container);
        // Tolerance of one pixel worth of fraction per axis.
        assert!((back.x - tile.x).abs() <= 1.0 / container.width as f64);
        assert!((back.y - tile.y).abs() <= 1.0 / container.height as f64);
        assert!((back.width - tile.width).abs() <= 1.0 / container.width as f64);
        assert!((back.height - tile.height).abs() <= 1.0 / container.height as f64);
    }

    #[test]
    fn fraction_round_trip_over_default_layouts() {
        let containers = [
            Rect::new(0, 0, 1920, 1080),
            Rect::new(1920, 0, 1366, 768),
            Rect::new(-500, 30, 2560, 1411),
        ];
        for container in &containers {
            for layout in default_layouts() {
                for tile in &layout.tiles {
                    let back = Tile::from_rect(&tile.apply_to(container), container);
                    assert!(
                        (back.x - tile.x).abs() <= 1.0 / container.width as f64,
                        "x drifted for {tile:?} in {container:?}"
                    );
                    assert!((back.width - tile.width).abs() <= 1.0 / container.width as f64);
                    assert!((back.y - tile.y).abs() <= 1.0 / container.height as f64);
                    assert!((back.height - tile.height).abs() <= 1.0 / container.height as f64);
                }
            }
        }
    }

    #[test]
    fn default_layouts_are_four_and_normalized() {
        let layouts = default_layouts();
        assert_eq!(layouts.len(), 4);
        for layout in &layouts {
            assert!(layout.is_normalized(), "layout {} not normalized", layout.id);
            assert!(!layout.tiles.is_empty());
        }
    }

    #[test]
    fn default_layout_ids_are_stable() {
        let ids: Vec<String> = default_layouts().into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn slightly_overfull_tile_is_still_normalized() {
        // 0.33 + 0.67 style float residue must not trip the invariant.
        let tile = Tile::new(0.33, 0.0, 0.67000000001, 1.0, vec![]);
        assert!(tile.is_normalized());
    }

    #[test]
    fn clearly_overfull_tile_is_not_normalized() {
        assert!(!Tile::new(0.5, 0.0, 0.6, 1.0, vec![]).is_normalized());
        assert!(!Tile::new(-0.1, 0.0, 0.5, 1.0, vec![]).is_normalized());
    }
}
