//! Axis-aligned rectangle algebra.
//!
//! Everything in this module operates on integer pixel-space rectangles.
//! The one non-obvious operation is [`Rect::subtract`], which cuts a hole
//! out of a rectangle and decomposes the remainder into up to four strips.
//! The emission order of those strips (top, left, right, bottom) is part of
//! the contract: [`TilingLayout`](crate::layout_view::TilingLayout) keeps the
//! largest strip as the shrunk preview and spawns children for the rest, so
//! reordering would change which piece "wins" on area ties.

use serde::{Deserialize, Serialize};

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// The zero rectangle (origin, no extent).
    pub const ZERO: Rect = Rect {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the right edge (`x + width`).
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// One past the bottom edge (`y + height`).
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Area in square pixels. Zero for degenerate rectangles.
    pub fn area(&self) -> i64 {
        if self.width <= 0 || self.height <= 0 {
            return 0;
        }
        self.width as i64 * self.height as i64
    }

    /// Whether the rectangle has positive extent on both axes.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Standard AABB intersection. `None` when the rectangles do not overlap
    /// (touching edges do not count as overlap).
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return None;
        }
        Some(Rect::new(x, y, right - x, bottom - y))
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Inclusive containment test: points on the right/bottom edge count.
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Clamp a point into `[x, x+width] × [y, y+height]`.
    pub fn clamp_point(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(self.x, self.right()),
            p.y.clamp(self.y, self.bottom()),
        )
    }

    /// Cut `hole` out of `self`.
    ///
    /// Returns `(intersected, pieces)`:
    ///
    /// * no overlap: `(false, vec![self])`, the caller treats the source as
    ///   unaffected;
    /// * the overlap covers at least 98% of the source area: `(true, vec![])`,
    ///   the source counts as fully consumed (the slack absorbs gap and
    ///   rounding artifacts);
    /// * otherwise `(true, strips)` where `strips` are the up-to-4 leftover
    ///   pieces in cross-pattern order: top (full width), left, right (both
    ///   at overlap height), bottom (full width). Degenerate strips are
    ///   omitted.
    pub fn subtract(&self, hole: &Rect) -> (bool, Vec<Rect>) {
        let inter = match self.intersection(hole) {
            Some(r) => r,
            None => return (false, vec![*self]),
        };

        // "At least 98%" is inclusive: 0.98 == 49/50, kept in integers so the
        // boundary is exact.
        if inter.area() * 50 >= self.area() * 49 {
            return (true, Vec::new());
        }

        let mut pieces = Vec::with_capacity(4);

        let top = Rect::new(self.x, self.y, self.width, inter.y - self.y);
        let left = Rect::new(self.x, inter.y, inter.x - self.x, inter.height);
        let right = Rect::new(
            inter.right(),
            inter.y,
            self.right() - inter.right(),
            inter.height,
        );
        let bottom = Rect::new(
            self.x,
            inter.bottom(),
            self.width,
            self.bottom() - inter.bottom(),
        );

        for piece in [top, left, right, bottom] {
            if !piece.is_degenerate() {
                pieces.push(piece);
            }
        }

        (true, pieces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_of_overlapping_rects() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(50, 50, 100, 100);
        assert_eq!(a.intersection(&b), Some(Rect::new(50, 50, 50, 50)));
    }

    #[test]
    fn intersection_of_disjoint_rects_is_none() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(200, 0, 100, 100);
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(100, 0, 100, 100);
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn union_encloses_both() {
        let a = Rect::new(0, 0, 50, 50);
        let b = Rect::new(100, 100, 50, 50);
        assert_eq!(a.union(&b), Rect::new(0, 0, 150, 150));
    }

    #[test]
    fn contains_point_is_inclusive() {
        let r = Rect::new(10, 10, 80, 80);
        assert!(r.contains_point(Point::new(10, 10)));
        assert!(r.contains_point(Point::new(90, 90)));
        assert!(!r.contains_point(Point::new(91, 90)));
        assert!(!r.contains_point(Point::new(9, 10)));
    }

    #[test]
    fn clamp_point_pulls_outside_points_onto_bounds() {
        let r = Rect::new(0, 0, 100, 100);
        assert_eq!(r.clamp_point(Point::new(-5, 50)), Point::new(0, 50));
        assert_eq!(r.clamp_point(Point::new(150, 150)), Point::new(100, 100));
        assert_eq!(r.clamp_point(Point::new(30, 40)), Point::new(30, 40));
    }

    //  subtract

    #[test]
    fn subtract_disjoint_returns_source_unchanged() {
        let source = Rect::new(0, 0, 100, 100);
        let hole = Rect::new(500, 500, 10, 10);
        let (intersected, pieces) = source.subtract(&hole);
        assert!(!intersected);
        assert_eq!(pieces, vec![source]);
    }

    #[test]
    fn subtract_full_coverage_consumes_source() {
        let source = Rect::new(10, 10, 50, 50);
        let hole = Rect::new(0, 0, 100, 100);
        let (intersected, pieces) = source.subtract(&hole);
        assert!(intersected);
        assert!(pieces.is_empty());
    }

    #[test]
    fn subtract_at_exactly_98_percent_counts_as_full_coverage() {
        // 100×100 source, hole covering a 98×100 slice: exactly 98%.
        let source = Rect::new(0, 0, 100, 100);
        let hole = Rect::new(0, 0, 98, 100);
        let (intersected, pieces) = source.subtract(&hole);
        assert!(intersected);
        assert!(pieces.is_empty(), "98% coverage is inclusive");
    }

    #[test]
    fn subtract_just_below_98_percent_leaves_a_strip() {
        let source = Rect::new(0, 0, 100, 100);
        let hole = Rect::new(0, 0, 97, 100);
        let (intersected, pieces) = source.subtract(&hole);
        assert!(intersected);
        assert_eq!(pieces, vec![Rect::new(97, 0, 3, 100)]);
    }

    #[test]
    fn subtract_centered_hole_yields_four_strips_in_order() {
        let source = Rect::new(0, 0, 100, 100);
        let hole = Rect::new(25, 25, 50, 50);
        let (intersected, pieces) = source.subtract(&hole);
        assert!(intersected);
        assert_eq!(
            pieces,
            vec![
                Rect::new(0, 0, 100, 25),  // top, full width
                Rect::new(0, 25, 25, 50),  // left, hole height
                Rect::new(75, 25, 25, 50), // right, hole height
                Rect::new(0, 75, 100, 25), // bottom, full width
            ]
        );
    }

    #[test]
    fn subtract_corner_hole_yields_two_strips() {
        let source = Rect::new(0, 0, 100, 100);
        let hole = Rect::new(0, 0, 40, 40);
        let (_, pieces) = source.subtract(&hole);
        assert_eq!(
            pieces,
            vec![
                Rect::new(40, 0, 60, 40),  // right of the hole
                Rect::new(0, 40, 100, 60), // below the hole
            ]
        );
    }

    #[test]
    fn subtract_hole_overhanging_source_is_clipped() {
        // Hole sticks out past the right edge; only the overlap matters.
        let source = Rect::new(0, 0, 100, 100);
        let hole = Rect::new(60, 20, 100, 40);
        let (intersected, pieces) = source.subtract(&hole);
        assert!(intersected);
        assert_eq!(
            pieces,
            vec![
                Rect::new(0, 0, 100, 20),  // top
                Rect::new(0, 20, 60, 40),  // left
                Rect::new(0, 60, 100, 40), // bottom
            ]
        );
    }

    #[test]
    fn subtract_piece_count_never_exceeds_four() {
        let source = Rect::new(0, 0, 97, 89);
        let holes = [
            Rect::new(-10, -10, 50, 50),
            Rect::new(10, 10, 20, 20),
            Rect::new(50, 0, 200, 89),
            Rect::new(0, 40, 97, 10),
        ];
        for hole in &holes {
            let (_, pieces) = source.subtract(hole);
            assert!(pieces.len() <= 4, "hole {:?} produced {:?}", hole, pieces);
        }
    }

    #[test]
    fn subtract_conserves_area() {
        // Leftover pieces plus the overlap must tile the source exactly.
        let source = Rect::new(5, 7, 90, 110);
        let holes = [
            Rect::new(20, 20, 30, 30),
            Rect::new(0, 0, 40, 200),
            Rect::new(60, 90, 100, 100),
            Rect::new(5, 7, 45, 110),
        ];
        for hole in &holes {
            let (intersected, pieces) = source.subtract(hole);
            assert!(intersected);
            let inter_area = source.intersection(hole).map(|r| r.area()).unwrap_or(0);
            let piece_area: i64 = pieces.iter().map(Rect::area).sum();
            assert_eq!(
                piece_area + inter_area,
                source.area(),
                "hole {:?} broke area conservation",
                hole
            );
        }
    }

    #[test]
    fn area_of_degenerate_rect_is_zero() {
        assert_eq!(Rect::new(0, 0, 0, 100).area(), 0);
        assert_eq!(Rect::new(0, 0, 100, -5).area(), 0);
        assert_eq!(Rect::ZERO.area(), 0);
    }
}
