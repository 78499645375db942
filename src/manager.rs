//! The per-monitor drag/resize coordinator.
//!
//! [`TilingManager`] owns one [`TilingLayout`] and one [`EdgeTilingManager`]
//! for a monitor and drives the drag state machine: the host forwards
//! grab-begin/grab-end events and timer fires, the manager samples the
//! pointer, routes each sample to the edge zones or the grid depending on the
//! held activation keys, and on release resolves the final placement and
//! remembers which logical tile the window now occupies.
//!
//! Failure semantics: nothing here returns an error for recoverable
//! conditions. A vanished window, a pointer on another monitor, or a failing
//! compositor call all degrade to "no tiling assistance this tick" via
//! guard-and-return.

use crate::config::Config;
use crate::edge::EdgeTilingManager;
use crate::layout_view::TilingLayout;
use crate::rect::{Point, Rect};
use crate::tile::{Layout, Tile};
use crate::traits::{
    Compositor, Direction, GrabOp, OverlayEvent, PointerState, TimerHandle, TimerService, WindowId,
};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::mpsc;

/// Observable state of the drag state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TilingState {
    Idle,
    /// A moving grab is active but neither the grid nor an edge zone is
    /// engaged.
    Dragging,
    /// The tiling grid is open and tracking the pointer.
    GridHovering,
    /// An edge activation zone is showing a quarter/half/maximize preview.
    EdgeTiling,
}

/// In-flight drag bookkeeping.
#[derive(Debug)]
struct DragState {
    window: WindowId,
    timer: TimerHandle,
    grid_open: bool,
    /// The rectangle the window will snap to on release (grid path).
    selection: Option<Rect>,
    /// Last processed pointer sample, for redundant-tick suppression.
    last_pointer: Option<PointerState>,
}

/// Coordinates tiling for a single monitor.
///
/// Generic over the [`Compositor`] and [`TimerService`] backends, so tests
/// can drive it with recording stubs the same way the host drives it with
/// real IPC.
pub struct TilingManager<C: Compositor, T: TimerService> {
    compositor: C,
    timer: T,
    monitor: String,
    work_area: Rect,
    config: Config,
    layout_view: TilingLayout,
    edge: EdgeTilingManager,
    overlay_tx: Option<mpsc::Sender<OverlayEvent>>,
    drag: Option<DragState>,
    assigned_tiles: HashMap<WindowId, Tile>,
    pre_tiling_rects: HashMap<WindowId, Rect>,
}

impl<C: Compositor, T: TimerService> TilingManager<C, T> {
    /// Create a manager for `monitor` with the given work area and layout.
    ///
    /// The work area must be non-degenerate; geometry is meaningless
    /// otherwise and violating this is a programmer error upstream (the
    /// work-area-changed handler must run before any geometry use).
    pub fn new(
        compositor: C,
        timer: T,
        monitor: impl Into<String>,
        work_area: Rect,
        config: Config,
        layout: Layout,
    ) -> Self {
        debug_assert!(!work_area.is_degenerate());
        let layout_view = TilingLayout::new(layout, config.gaps, work_area);
        let edge = EdgeTilingManager::new(work_area, config.edge_tiling);
        Self {
            compositor,
            timer,
            monitor: monitor.into(),
            work_area,
            config,
            layout_view,
            edge,
            overlay_tx: None,
            drag: None,
            assigned_tiles: HashMap::new(),
            pre_tiling_rects: HashMap::new(),
        }
    }

    /// Attach an overlay event channel. The receiver can be owned by any
    /// independent listener; rendering stays on the host side.
    pub fn set_overlay(&mut self, tx: mpsc::Sender<OverlayEvent>) {
        self.overlay_tx = Some(tx);
    }

    /// Swap the active layout (user picked a different one).
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout_view.set_layout(layout, self.work_area);
    }

    pub fn state(&self) -> TilingState {
        match &self.drag {
            None => TilingState::Idle,
            Some(drag) if drag.grid_open => TilingState::GridHovering,
            Some(_) if self.edge.is_performing_edge_tiling() => TilingState::EdgeTiling,
            Some(_) => TilingState::Dragging,
        }
    }

    /// The tile assignment recorded for `window` after its last placement.
    pub fn assigned_tile(&self, window: WindowId) -> Option<&Tile> {
        self.assigned_tiles.get(&window)
    }

    /// The frame `window` had before it was first tiled, for restoration.
    pub fn pre_tiling_rect(&self, window: WindowId) -> Option<Rect> {
        self.pre_tiling_rects.get(&window).copied()
    }

    /// Forget everything about a window (it was closed or left the monitor).
    pub fn unmanage(&mut self, window: WindowId) {
        self.assigned_tiles.remove(&window);
        self.pre_tiling_rects.remove(&window);
    }

    //  Grab lifecycle

    /// A grab started on `window`. Only moving grabs engage the state
    /// machine; resize grabs pass through.
    pub fn on_grab_begin(&mut self, window: WindowId, op: GrabOp) {
        if !op.is_moving() {
            debug!("[{}] ignoring non-moving grab on {}", self.monitor, window);
            return;
        }
        if self.drag.is_some() {
            return;
        }
        let timer = self.timer.schedule_repeating(self.config.poll_interval_ms);
        debug!("[{}] drag begin on {}", self.monitor, window);
        self.drag = Some(DragState {
            window,
            timer,
            grid_open: false,
            selection: None,
            last_pointer: None,
        });
    }

    /// One tick of the drag-tracking poll. The host calls this each time the
    /// timer scheduled in [`on_grab_begin`](Self::on_grab_begin) fires.
    pub fn poll_tick(&mut self) {
        let Some(mut drag) = self.drag.take() else {
            return;
        };
        self.tick(&mut drag);
        self.drag = Some(drag);
    }

    /// The grab on `window` ended. Cancels the poll, resolves the final
    /// placement if anything was engaged, and always tears down previews.
    pub fn on_grab_end(&mut self, window: WindowId) {
        let Some(mut drag) = self.drag.take() else {
            return;
        };
        // Timer goes first: a fired callback must never observe teardown.
        self.timer.cancel(drag.timer);

        if drag.window != window {
            debug!(
                "[{}] grab end for {} but drag was on {}",
                self.monitor, window, drag.window
            );
            self.reset_previews(&mut drag);
            return;
        }

        if self.edge.needs_maximize() && self.compositor.can_maximize(window).unwrap_or(false) {
            info!("[{}] top-edge maximize for {}", self.monitor, window);
            if self.compositor.maximize(window).is_ok() {
                self.assigned_tiles.remove(&window);
            }
        } else {
            let target = if drag.grid_open {
                drag.selection
            } else {
                self.edge.current_preview()
            };
            if let Some(rect) = target {
                self.place_window(window, rect);
            }
        }

        self.reset_previews(&mut drag);
        debug!("[{}] drag end on {}", self.monitor, window);
    }

    /// Cancel any in-flight drag and hide all previews. Safe to call on an
    /// idle manager; part of the host's teardown path.
    pub fn stop(&mut self) {
        if let Some(mut drag) = self.drag.take() {
            self.timer.cancel(drag.timer);
            self.reset_previews(&mut drag);
        }
    }

    //  Poll tick internals

    fn tick(&mut self, drag: &mut DragState) {
        let pointer = match self.compositor.pointer() {
            Ok(p) => p,
            Err(e) => {
                warn!("[{}] pointer query failed: {}", self.monitor, e);
                return;
            }
        };

        // Window no longer movable or pointer left this monitor: back to the
        // neutral sub-state (still dragging, another monitor may take over).
        let movable = self
            .compositor
            .allows_move_resize(drag.window)
            .unwrap_or(false);
        let p = Point::new(pointer.x, pointer.y);
        if !movable || !self.work_area.contains_point(p) {
            self.reset_previews(drag);
            return;
        }

        // Unchanged pointer and modifier state: nothing to do this tick.
        if drag.last_pointer == Some(pointer) {
            return;
        }
        drag.last_pointer = Some(pointer);

        let grid_engaged = self.config.activation.tiling_system.matches(pointer.mods);
        let spanning = self
            .config
            .activation
            .span_multiple_tiles
            .matches(pointer.mods);

        if !grid_engaged {
            if drag.grid_open {
                self.close_grid(drag);
            }
            self.tick_edge(p);
            return;
        }

        if self.edge.is_performing_edge_tiling() {
            self.edge.abort_edge_tiling();
            self.emit(OverlayEvent::EdgePreviewHidden);
        }
        self.tick_grid(drag, p, spanning);
    }

    /// Edge-tiling branch of a poll tick (grid not engaged).
    fn tick_edge(&mut self, p: Point) {
        if self.edge.can_activate(p) {
            let result = self.edge.start_edge_tiling(p);
            if result.changed {
                self.emit(OverlayEvent::EdgePreviewShown { rect: result.rect });
            }
        } else if self.edge.is_performing_edge_tiling() {
            self.edge.abort_edge_tiling();
            self.emit(OverlayEvent::EdgePreviewHidden);
        }
    }

    /// Grid branch of a poll tick.
    fn tick_grid(&mut self, drag: &mut DragState, p: Point, spanning: bool) {
        if !drag.grid_open {
            drag.grid_open = true;
            self.emit(OverlayEvent::GridOpened {
                previews: self.layout_view.preview_rects(),
            });
        }

        let hovered = self.layout_view.tile_below(p, !spanning);
        match hovered {
            Some(rect) => {
                let selection = if spanning {
                    drag.selection.map_or(rect, |prev| prev.union(&rect))
                } else {
                    rect
                };
                if drag.selection == Some(selection) {
                    return;
                }
                self.layout_view.hover_tiles_in_rect(&selection, !spanning);
                drag.selection = Some(selection);
                self.emit(OverlayEvent::SelectionChanged { rect: selection });
                self.emit(OverlayEvent::GridUpdated {
                    previews: self.layout_view.preview_rects(),
                });
            }
            None if !spanning => {
                if drag.selection.take().is_some() {
                    self.layout_view.unhover_all_tiles();
                    self.emit(OverlayEvent::SelectionCleared);
                    self.emit(OverlayEvent::GridUpdated {
                        previews: self.layout_view.preview_rects(),
                    });
                }
            }
            // Spanning: keep the selection while the pointer crosses gaps.
            None => {}
        }
    }

    //  Keyboard moves

    /// Move `window` one tile in `direction`.
    ///
    /// Returns whether a move occurred, so the caller can forward the intent
    /// to a neighboring monitor's manager when this one has no tile in that
    /// direction.
    pub fn on_keyboard_move(&mut self, window: WindowId, direction: Direction) -> bool {
        if self.compositor.is_maximized(window).unwrap_or(false) {
            return self.keyboard_move_from_maximized(window, direction);
        }

        let source = match self.assigned_tiles.get(&window) {
            Some(tile) => tile.apply_to(&self.work_area),
            None => match self.compositor.frame_rect(window) {
                Ok(Some(frame)) => frame,
                _ => {
                    debug!("[{}] no frame for {}, not moving", self.monitor, window);
                    return false;
                }
            },
        };

        match self.layout_view.nearest_tile(&source, direction) {
            Some(rect) => {
                info!("[{}] keyboard move {} {}", self.monitor, window, direction);
                self.place_window(window, rect);
                true
            }
            None if direction == Direction::Up
                && self.compositor.can_maximize(window).unwrap_or(false) =>
            {
                // Nothing above: up means maximize.
                if self.compositor.maximize(window).is_ok() {
                    self.assigned_tiles.remove(&window);
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }

    fn keyboard_move_from_maximized(&mut self, window: WindowId, direction: Direction) -> bool {
        match direction {
            Direction::Up => false,
            Direction::Down => self.compositor.unmaximize(window).is_ok(),
            Direction::Left | Direction::Right => {
                let target = if direction == Direction::Left {
                    self.layout_view.leftmost_tile()
                } else {
                    self.layout_view.rightmost_tile()
                };
                let Some(rect) = target else {
                    return false;
                };
                if self.compositor.unmaximize(window).is_err() {
                    return false;
                }
                self.place_window(window, rect);
                true
            }
        }
    }

    //  Environment changes

    /// The monitor's usable work area changed: rescale previews and zones.
    ///
    /// Must run before any other geometry use after a monitor change; a
    /// degenerate rect here is a programmer error upstream.
    pub fn on_work_area_changed(&mut self, work_area: Rect) {
        debug_assert!(!work_area.is_degenerate());
        info!("[{}] work area changed to {:?}", self.monitor, work_area);
        self.work_area = work_area;
        self.layout_view.relayout(work_area);
        self.edge.set_work_area(work_area);
    }

    //  Helpers

    /// Tile `window` to `rect` and record the assignment. Guards every
    /// recoverable failure with an early return.
    fn place_window(&mut self, window: WindowId, rect: Rect) {
        if rect.is_degenerate() {
            debug!("[{}] refusing degenerate placement {:?}", self.monitor, rect);
            return;
        }
        match self.compositor.frame_rect(window) {
            Ok(Some(frame)) => {
                // First placement remembers the untiled size for restoration.
                self.pre_tiling_rects.entry(window).or_insert(frame);
            }
            Ok(None) => {
                debug!("[{}] window {} vanished", self.monitor, window);
                return;
            }
            Err(e) => {
                warn!("[{}] frame query failed for {}: {}", self.monitor, window, e);
                return;
            }
        }
        if let Err(e) = self.compositor.move_resize_frame(window, rect, true) {
            warn!("[{}] move_resize failed for {}: {}", self.monitor, window, e);
            return;
        }
        self.assigned_tiles
            .insert(window, Tile::from_rect(&rect, &self.work_area));
        info!("[{}] tiled {} to {:?}", self.monitor, window, rect);
    }

    fn close_grid(&mut self, drag: &mut DragState) {
        self.layout_view.unhover_all_tiles();
        drag.grid_open = false;
        if drag.selection.take().is_some() {
            self.emit(OverlayEvent::SelectionCleared);
        }
        self.emit(OverlayEvent::GridClosed);
    }

    /// Back to the neutral sub-state: everything hidden, drag still alive.
    fn reset_previews(&mut self, drag: &mut DragState) {
        if drag.grid_open {
            self.close_grid(drag);
        }
        if self.edge.is_performing_edge_tiling() {
            self.edge.abort_edge_tiling();
            self.emit(OverlayEvent::EdgePreviewHidden);
        }
        drag.last_pointer = None;
    }

    fn emit(&self, event: OverlayEvent) {
        if let Some(tx) = &self.overlay_tx {
            let _ = tx.send(event);
        }
    }
}

impl<C: Compositor, T: TimerService> Drop for TilingManager<C, T> {
    fn drop(&mut self) {
        // Same ordering requirement as stop(): the timer must die before the
        // rest of the state.
        if let Some(drag) = self.drag.take() {
            self.timer.cancel(drag.timer);
        }
    }
}
