//! On-screen preview model for a layout.
//!
//! [`TilingLayout`] scales a [`Layout`](crate::tile::Layout) into pixel-space
//! preview rectangles for one monitor's work area, applies gap insets, and
//! maintains those previews through a drag interaction: the drag rectangle
//! "consumes" whatever it covers, fully covered previews close, and partially
//! covered ones shrink to their largest leftover strip while the other strips
//! survive as separate child previews. Children spawned by splitting cannot
//! restore to a full-size original; the tiles they came from can.

use crate::config::GapConfig;
use crate::rect::{Point, Rect};
use crate::tile::{Layout, Tile};
use crate::traits::Direction;

/// Fraction slack when deciding whether a tile edge touches the container
/// border (layout editors leave float residue on 0.0 / 1.0 edges).
const EDGE_TOUCH_SLACK: f64 = 1e-4;

/// One preview rectangle on screen.
#[derive(Debug, Clone)]
struct PreviewTile {
    /// Currently displayed rectangle (shrinks under a hover).
    rect: Rect,
    /// The full-size rectangle this preview opens at.
    original: Rect,
    /// Whether the preview may reopen at `original` after being hovered
    /// away. False for children spawned by splitting.
    restorable: bool,
    /// Whether the preview is currently visible.
    open: bool,
}

impl PreviewTile {
    fn opened(rect: Rect, restorable: bool) -> Self {
        Self {
            rect,
            original: rect,
            restorable,
            open: true,
        }
    }
}

/// The set of preview rectangles derived from a layout scaled to a work
/// area.
#[derive(Debug)]
pub struct TilingLayout {
    layout: Layout,
    gaps: GapConfig,
    previews: Vec<PreviewTile>,
}

impl TilingLayout {
    /// Build previews for `layout` inside `container` (the monitor work
    /// area), applying the configured gaps.
    pub fn new(layout: Layout, gaps: GapConfig, container: Rect) -> Self {
        let mut this = Self {
            layout,
            gaps,
            previews: Vec::new(),
        };
        this.relayout(container);
        this
    }

    /// Rebuild all previews for a new container, discarding hover state.
    pub fn relayout(&mut self, container: Rect) {
        debug_assert!(
            !container.is_degenerate(),
            "relayout against degenerate container {container:?}"
        );
        let outer = &self.gaps.outer;
        let inset = Rect::new(
            container.x + outer.left,
            container.y + outer.top,
            container.width - outer.left - outer.right,
            container.height - outer.top - outer.bottom,
        );
        self.previews = self
            .layout
            .tiles
            .iter()
            .map(|tile| PreviewTile::opened(self.tile_rect(tile, &inset), true))
            .collect();
    }

    /// Swap in a different layout for the same gaps, rebuilding previews.
    pub fn set_layout(&mut self, layout: Layout, container: Rect) {
        self.layout = layout;
        self.relayout(container);
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Visible preview rectangles, in layout order (split children follow
    /// their parent).
    pub fn preview_rects(&self) -> Vec<Rect> {
        self.previews
            .iter()
            .filter(|p| p.open)
            .map(|p| p.rect)
            .collect()
    }

    /// Scale `tile` into `inset` pixel space and apply inner gaps on every
    /// side that does not touch the container border (adjacent tiles each
    /// give up half the gap, so the full gap appears between them).
    fn tile_rect(&self, tile: &Tile, inset: &Rect) -> Rect {
        let mut rect = tile.apply_to(inset);
        let inner = &self.gaps.inner;
        // The downstream tile takes the odd pixel of an odd gap, so each seam
        // is exactly the configured width.
        if tile.x > EDGE_TOUCH_SLACK {
            let cut = inner.left - inner.left / 2;
            rect.x += cut;
            rect.width -= cut;
        }
        if tile.y > EDGE_TOUCH_SLACK {
            let cut = inner.top - inner.top / 2;
            rect.y += cut;
            rect.height -= cut;
        }
        if tile.x + tile.width < 1.0 - EDGE_TOUCH_SLACK {
            rect.width -= inner.right / 2;
        }
        if tile.y + tile.height < 1.0 - EDGE_TOUCH_SLACK {
            rect.height -= inner.bottom / 2;
        }
        rect
    }

    /// Update every preview against a drag rectangle.
    ///
    /// * Previews untouched by `drag` restore (or are destroyed if they
    ///   cannot) when `reset_if_uncovered` is set; otherwise they are left
    ///   alone so a multi-tile span keeps its earlier splits.
    /// * Previews covered at least 98% close.
    /// * Partially covered previews shrink in place to their largest
    ///   leftover strip; the remaining strips become new, non-restorable
    ///   child previews.
    pub fn hover_tiles_in_rect(&mut self, drag: &Rect, reset_if_uncovered: bool) {
        let old = std::mem::take(&mut self.previews);
        let mut next = Vec::with_capacity(old.len());

        for mut preview in old {
            let (intersected, mut pieces) = preview.rect.subtract(drag);

            if !intersected {
                if reset_if_uncovered {
                    if preview.restorable {
                        preview.rect = preview.original;
                        preview.open = true;
                        next.push(preview);
                    }
                    // Non-restorable previews are destroyed.
                } else {
                    next.push(preview);
                }
                continue;
            }

            if pieces.is_empty() {
                // Fully consumed by the drag rectangle.
                preview.open = false;
                next.push(preview);
                continue;
            }

            // Largest leftover strip becomes the shrunk preview itself; the
            // strip order from subtract() breaks exact-area ties.
            let largest = pieces
                .iter()
                .enumerate()
                .max_by_key(|(i, r)| (r.area(), std::cmp::Reverse(*i)))
                .map(|(i, _)| i)
                .unwrap_or(0);
            let own = pieces.remove(largest);
            preview.rect = own;
            preview.open = true;
            next.push(preview);
            for piece in pieces {
                next.push(PreviewTile::opened(piece, false));
            }
        }

        self.previews = next;
    }

    /// Restore every restorable preview to its original rectangle and
    /// destroy the rest.
    pub fn unhover_all_tiles(&mut self) {
        self.previews.retain(|p| p.restorable);
        for preview in &mut self.previews {
            preview.rect = preview.original;
            preview.open = true;
        }
    }

    /// The first visible preview containing `p`.
    ///
    /// When `reset` is set and no visible preview matches, each preview's
    /// *original* rectangle is tried instead: a preview that shrank away
    /// from the pointer still claims its full footprint.
    pub fn tile_below(&self, p: Point, reset: bool) -> Option<Rect> {
        let below = self
            .previews
            .iter()
            .find(|t| t.open && t.rect.contains_point(p))
            .map(|t| t.rect);
        if below.is_some() || !reset {
            return below;
        }
        self.previews
            .iter()
            .find(|t| t.original.contains_point(p))
            .map(|t| t.original)
    }

    /// The visible preview nearest to `source` strictly in `direction`,
    /// minimizing squared distance between top-left corners. On an exact
    /// distance tie the first preview found wins.
    pub fn nearest_tile(&self, source: &Rect, direction: Direction) -> Option<Rect> {
        let beyond = |r: &Rect| match direction {
            Direction::Right => r.x >= source.right(),
            Direction::Left => r.right() <= source.x,
            Direction::Up => r.bottom() <= source.y,
            Direction::Down => r.y >= source.bottom(),
        };

        let mut best: Option<(i64, Rect)> = None;
        for preview in self.previews.iter().filter(|p| p.open) {
            if !beyond(&preview.rect) {
                continue;
            }
            let dx = (preview.rect.x - source.x) as i64;
            let dy = (preview.rect.y - source.y) as i64;
            let dist = dx * dx + dy * dy;
            if best.map_or(true, |(d, _)| dist < d) {
                best = Some((dist, preview.rect));
            }
        }
        best.map(|(_, r)| r)
    }

    /// The visible preview with the greatest right edge; ties broken by
    /// smallest `y`.
    pub fn rightmost_tile(&self) -> Option<Rect> {
        self.previews
            .iter()
            .filter(|p| p.open)
            .map(|p| p.rect)
            .max_by_key(|r| (r.right(), std::cmp::Reverse(r.y)))
    }

    /// The visible preview with the smallest left edge; ties broken by
    /// smallest `y`.
    pub fn leftmost_tile(&self) -> Option<Rect> {
        self.previews
            .iter()
            .filter(|p| p.open)
            .map(|p| p.rect)
            .min_by_key(|r| (r.x, r.y))
    }
}
