//! Screen-edge tiling.
//!
//! Dragging a window against a screen edge or corner snaps it to a quarter,
//! half, or the full work area, independent of the grid layout. The work
//! area is carved into seven activation zones: four corner squares sized by
//! [`EdgeTilingConfig::quarter_pct`], a top-center strip between the top
//! corners, and left/right-center strips between the vertical corners. The
//! pointer is classified against these zones on every drag tick.

use crate::config::EdgeTilingConfig;
use crate::rect::{Point, Rect};
use log::debug;

/// Pixel margin from the left/right/bottom work-area edges within which edge
/// tiling may engage.
const EDGE_MARGIN: i32 = 16;
/// The top edge uses a tighter margin so it does not fight the shell's own
/// top-bar hot corner.
const TOP_EDGE_MARGIN: i32 = 8;

/// One of the seven activation zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeZone {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    TopCenter,
    LeftCenter,
    RightCenter,
}

/// The seven zone rectangles for a given work area and percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Zones {
    top_left: Rect,
    top_right: Rect,
    bottom_left: Rect,
    bottom_right: Rect,
    top_center: Rect,
    left_center: Rect,
    right_center: Rect,
}

impl Zones {
    fn compute(wa: &Rect, pct: f64) -> Self {
        let zw = (wa.width as f64 * pct).round() as i32;
        let zh = (wa.height as f64 * pct).round() as i32;
        Self {
            top_left: Rect::new(wa.x, wa.y, zw, zh),
            top_right: Rect::new(wa.right() - zw, wa.y, zw, zh),
            bottom_left: Rect::new(wa.x, wa.bottom() - zh, zw, zh),
            bottom_right: Rect::new(wa.right() - zw, wa.bottom() - zh, zw, zh),
            top_center: Rect::new(wa.x + zw, wa.y, wa.width - 2 * zw, zh),
            left_center: Rect::new(wa.x, wa.y + zh, zw, wa.height - 2 * zh),
            right_center: Rect::new(wa.right() - zw, wa.y + zh, zw, wa.height - 2 * zh),
        }
    }

    fn rect(&self, zone: EdgeZone) -> Rect {
        match zone {
            EdgeZone::TopLeft => self.top_left,
            EdgeZone::TopRight => self.top_right,
            EdgeZone::BottomLeft => self.bottom_left,
            EdgeZone::BottomRight => self.bottom_right,
            EdgeZone::TopCenter => self.top_center,
            EdgeZone::LeftCenter => self.left_center,
            EdgeZone::RightCenter => self.right_center,
        }
    }
}

/// Result of a [`EdgeTilingManager::start_edge_tiling`] call.
///
/// `changed == false` means the caller should leave its preview widget alone:
/// either the pointer is still inside the active zone, or it matched no zone
/// at all (in which case the previous preview rect is returned unchanged).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeTilingResult {
    pub changed: bool,
    pub rect: Rect,
}

/// Classifies pointer positions against screen-edge activation zones and
/// produces the matching preview rectangle.
#[derive(Debug)]
pub struct EdgeTilingManager {
    work_area: Rect,
    config: EdgeTilingConfig,
    zones: Zones,
    active: Option<EdgeZone>,
    preview: Rect,
}

impl EdgeTilingManager {
    pub fn new(work_area: Rect, config: EdgeTilingConfig) -> Self {
        debug_assert!(
            !work_area.is_degenerate(),
            "edge tiling requires a non-degenerate work area, got {work_area:?}"
        );
        let zones = Zones::compute(&work_area, config.quarter_pct());
        Self {
            work_area,
            config,
            zones,
            active: None,
            preview: Rect::ZERO,
        }
    }

    /// Replace the work area (monitor geometry changed) and recompute zones.
    pub fn set_work_area(&mut self, work_area: Rect) {
        debug_assert!(!work_area.is_degenerate());
        self.work_area = work_area;
        self.zones = Zones::compute(&work_area, self.config.quarter_pct());
    }

    /// Update the activation percentage (settings changed) and recompute
    /// zones.
    pub fn set_config(&mut self, config: EdgeTilingConfig) {
        self.config = config;
        self.zones = Zones::compute(&self.work_area, self.config.quarter_pct());
    }

    /// Whether the pointer is close enough to a work-area edge for edge
    /// tiling to engage: within 16px of the left/right/bottom edges or 8px
    /// of the top edge. Pure distance check, independent of the zones.
    pub fn can_activate(&self, p: Point) -> bool {
        if !self.config.enabled {
            return false;
        }
        let wa = &self.work_area;
        p.x - wa.x <= EDGE_MARGIN
            || wa.right() - p.x <= EDGE_MARGIN
            || wa.bottom() - p.y <= EDGE_MARGIN
            || p.y - wa.y <= TOP_EDGE_MARGIN
    }

    /// Classify the pointer and produce the edge-tiling preview rectangle.
    ///
    /// The pointer is clamped into the work area first. Classification
    /// priority: top-center, left-center, right-center, then the corner of
    /// the horizontal half the pointer falls in. Top-center previews the
    /// full work area (maximize), the side centers preview halves, corners
    /// preview quarters.
    pub fn start_edge_tiling(&mut self, p: Point) -> EdgeTilingResult {
        let p = self.work_area.clamp_point(p);

        // Still inside the active zone: nothing to redraw.
        if let Some(zone) = self.active {
            if self.zones.rect(zone).contains_point(p) {
                return EdgeTilingResult {
                    changed: false,
                    rect: Rect::ZERO,
                };
            }
        }

        let wa = self.work_area;
        let half_w = wa.width / 2;
        let half_h = wa.height / 2;
        let in_left_half = p.x < wa.x + half_w;

        let classified = if self.zones.top_center.contains_point(p) {
            Some((EdgeZone::TopCenter, wa))
        } else if self.zones.left_center.contains_point(p) {
            Some((
                EdgeZone::LeftCenter,
                Rect::new(wa.x, wa.y, half_w, wa.height),
            ))
        } else if self.zones.right_center.contains_point(p) {
            Some((
                EdgeZone::RightCenter,
                Rect::new(wa.x + half_w, wa.y, wa.width - half_w, wa.height),
            ))
        } else if in_left_half && self.zones.top_left.contains_point(p) {
            Some((EdgeZone::TopLeft, Rect::new(wa.x, wa.y, half_w, half_h)))
        } else if in_left_half && self.zones.bottom_left.contains_point(p) {
            Some((
                EdgeZone::BottomLeft,
                Rect::new(wa.x, wa.y + half_h, half_w, wa.height - half_h),
            ))
        } else if !in_left_half && self.zones.top_right.contains_point(p) {
            Some((
                EdgeZone::TopRight,
                Rect::new(wa.x + half_w, wa.y, wa.width - half_w, half_h),
            ))
        } else if !in_left_half && self.zones.bottom_right.contains_point(p) {
            Some((
                EdgeZone::BottomRight,
                Rect::new(
                    wa.x + half_w,
                    wa.y + half_h,
                    wa.width - half_w,
                    wa.height - half_h,
                ),
            ))
        } else {
            None
        };

        match classified {
            Some((zone, rect)) => {
                debug!("edge zone {:?} -> preview {:?}", zone, rect);
                self.active = Some(zone);
                self.preview = rect;
                EdgeTilingResult {
                    changed: true,
                    rect,
                }
            }
            // No zone matched: keep the active zone and previous preview.
            None => EdgeTilingResult {
                changed: false,
                rect: self.preview,
            },
        }
    }

    /// Whether an edge interaction is currently active.
    pub fn is_performing_edge_tiling(&self) -> bool {
        self.active.is_some()
    }

    /// The preview rectangle of the active interaction, if any.
    pub fn current_preview(&self) -> Option<Rect> {
        self.active.map(|_| self.preview)
    }

    /// True only when the active zone is top-center and the
    /// maximize-on-top-edge preference is enabled: top-center visually means
    /// "maximize", not "tile".
    pub fn needs_maximize(&self) -> bool {
        self.active == Some(EdgeZone::TopCenter) && self.config.top_edge_maximize
    }

    /// Abort the interaction, clearing the active zone.
    pub fn abort_edge_tiling(&mut self) {
        self.active = None;
        self.preview = Rect::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> EdgeTilingManager {
        EdgeTilingManager::new(Rect::new(0, 0, 1000, 800), EdgeTilingConfig::default())
    }

    #[test]
    fn corner_zone_geometry_matches_percentage() {
        let m = manager();
        assert_eq!(m.zones.top_left, Rect::new(0, 0, 400, 320));
        assert_eq!(m.zones.top_right, Rect::new(600, 0, 400, 320));
        assert_eq!(m.zones.bottom_left, Rect::new(0, 480, 400, 320));
        assert_eq!(m.zones.bottom_right, Rect::new(600, 480, 400, 320));
        assert_eq!(m.zones.top_center, Rect::new(400, 0, 200, 320));
        assert_eq!(m.zones.left_center, Rect::new(0, 320, 400, 160));
        assert_eq!(m.zones.right_center, Rect::new(600, 320, 400, 160));
    }

    #[test]
    fn top_left_corner_previews_quarter() {
        let mut m = manager();
        let result = m.start_edge_tiling(Point::new(50, 50));
        assert!(result.changed);
        assert_eq!(result.rect, Rect::new(0, 0, 500, 400));
        assert!(m.is_performing_edge_tiling());
    }

    #[test]
    fn bottom_right_corner_previews_quarter() {
        let mut m = manager();
        let result = m.start_edge_tiling(Point::new(950, 750));
        assert!(result.changed);
        assert_eq!(result.rect, Rect::new(500, 400, 500, 400));
    }

    #[test]
    fn top_center_previews_full_work_area() {
        let mut m = manager();
        let result = m.start_edge_tiling(Point::new(500, 10));
        assert!(result.changed);
        assert_eq!(result.rect, Rect::new(0, 0, 1000, 800));
        assert!(m.needs_maximize());
    }

    #[test]
    fn side_centers_preview_halves() {
        let mut m = manager();
        let left = m.start_edge_tiling(Point::new(5, 400));
        assert_eq!(left.rect, Rect::new(0, 0, 500, 800));
        m.abort_edge_tiling();
        let right = m.start_edge_tiling(Point::new(995, 400));
        assert_eq!(right.rect, Rect::new(500, 0, 500, 800));
        assert!(!m.needs_maximize());
    }

    #[test]
    fn repeated_point_in_same_zone_is_suppressed() {
        let mut m = manager();
        assert!(m.start_edge_tiling(Point::new(50, 50)).changed);
        let again = m.start_edge_tiling(Point::new(60, 60));
        assert!(!again.changed, "same-zone re-entry must be a no-op");
        assert_eq!(again.rect, Rect::ZERO);
        // A third call from yet another point in the zone is still a no-op.
        assert!(!m.start_edge_tiling(Point::new(300, 200)).changed);
    }

    #[test]
    fn unmatched_point_preserves_active_state() {
        let mut m = manager();
        let first = m.start_edge_tiling(Point::new(50, 50));
        // Dead center of the screen belongs to no zone.
        let result = m.start_edge_tiling(Point::new(500, 400));
        assert!(!result.changed);
        assert_eq!(result.rect, first.rect, "previous preview must survive");
        assert!(m.is_performing_edge_tiling());
    }

    #[test]
    fn zone_classification_is_a_partition() {
        let m = manager();
        let zones = [
            m.zones.top_left,
            m.zones.top_right,
            m.zones.bottom_left,
            m.zones.bottom_right,
            m.zones.top_center,
            m.zones.left_center,
            m.zones.right_center,
        ];
        // Strict interiors must not overlap; sample a grid of points.
        for x in (1..1000).step_by(37) {
            for y in (1..800).step_by(29) {
                let p = Point::new(x, y);
                let strictly_inside = |r: &Rect| {
                    p.x > r.x && p.x < r.right() && p.y > r.y && p.y < r.bottom()
                };
                let hits = zones.iter().filter(|r| strictly_inside(r)).count();
                assert!(hits <= 1, "point {p:?} is strictly inside {hits} zones");
            }
        }
    }

    #[test]
    fn can_activate_respects_margins() {
        let m = manager();
        assert!(m.can_activate(Point::new(10, 400)), "left margin");
        assert!(m.can_activate(Point::new(990, 400)), "right margin");
        assert!(m.can_activate(Point::new(500, 790)), "bottom margin");
        assert!(m.can_activate(Point::new(500, 5)), "top margin (8px)");
        assert!(!m.can_activate(Point::new(500, 12)), "top margin is tighter");
        assert!(!m.can_activate(Point::new(500, 400)), "center is inert");
    }

    #[test]
    fn can_activate_is_false_when_disabled() {
        let mut config = EdgeTilingConfig::default();
        config.enabled = false;
        let m = EdgeTilingManager::new(Rect::new(0, 0, 1000, 800), config);
        assert!(!m.can_activate(Point::new(0, 400)));
    }

    #[test]
    fn needs_maximize_respects_preference() {
        let mut config = EdgeTilingConfig::default();
        config.top_edge_maximize = false;
        let mut m = EdgeTilingManager::new(Rect::new(0, 0, 1000, 800), config);
        m.start_edge_tiling(Point::new(500, 10));
        assert!(!m.needs_maximize());
    }

    #[test]
    fn abort_clears_active_zone() {
        let mut m = manager();
        m.start_edge_tiling(Point::new(50, 50));
        m.abort_edge_tiling();
        assert!(!m.is_performing_edge_tiling());
        assert!(m.current_preview().is_none());
        // The same zone can fire again after an abort.
        assert!(m.start_edge_tiling(Point::new(50, 50)).changed);
    }

    #[test]
    fn pointer_outside_work_area_is_clamped() {
        let mut m = manager();
        // Far above the top-left corner: clamps onto (0, 0), a corner zone.
        let result = m.start_edge_tiling(Point::new(-100, -100));
        assert!(result.changed);
        assert_eq!(result.rect, Rect::new(0, 0, 500, 400));
    }

    #[test]
    fn work_area_change_recomputes_zones() {
        let mut m = manager();
        m.set_work_area(Rect::new(1000, 0, 2000, 1000));
        assert_eq!(m.zones.top_left, Rect::new(1000, 0, 800, 400));
        let result = m.start_edge_tiling(Point::new(1010, 10));
        assert_eq!(result.rect, Rect::new(1000, 0, 1000, 500));
    }
}
