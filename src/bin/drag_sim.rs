//! A scripted drag simulation against a stub compositor.
//!
//! Useful for eyeballing the state machine without a running compositor:
//! replays a pointer path across a fake 1920×1080 monitor, printing every
//! overlay event and placement the engine produces. Run with
//! `RUST_LOG=debug` for the engine's own log lines.

use log::info;
use snaptile::config::Config;
use snaptile::manager::TilingManager;
use snaptile::rect::Rect;
use snaptile::store::{LayoutRegistry, MemoryStore};
use snaptile::traits::{
    Compositor, GrabOp, ModMask, PointerState, TimerHandle, TimerService, WindowId,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;

/// Stub compositor holding one movable window and a scriptable pointer.
#[derive(Clone)]
struct SimCompositor {
    state: Rc<RefCell<SimState>>,
}

struct SimState {
    pointer: PointerState,
    frame: Rect,
}

#[derive(Debug, thiserror::Error)]
#[error("sim error")]
struct SimError;

impl Compositor for SimCompositor {
    type Error = SimError;

    fn pointer(&self) -> Result<PointerState, SimError> {
        Ok(self.state.borrow().pointer)
    }

    fn frame_rect(&self, _window: WindowId) -> Result<Option<Rect>, SimError> {
        Ok(Some(self.state.borrow().frame))
    }

    fn move_resize_frame(
        &self,
        window: WindowId,
        rect: Rect,
        _user_op: bool,
    ) -> Result<(), SimError> {
        info!("compositor: move_resize {} -> {:?}", window, rect);
        self.state.borrow_mut().frame = rect;
        Ok(())
    }

    fn maximize(&self, window: WindowId) -> Result<(), SimError> {
        info!("compositor: maximize {}", window);
        Ok(())
    }

    fn unmaximize(&self, window: WindowId) -> Result<(), SimError> {
        info!("compositor: unmaximize {}", window);
        Ok(())
    }

    fn is_maximized(&self, _window: WindowId) -> Result<bool, SimError> {
        Ok(false)
    }

    fn can_maximize(&self, _window: WindowId) -> Result<bool, SimError> {
        Ok(true)
    }

    fn allows_move_resize(&self, _window: WindowId) -> Result<bool, SimError> {
        Ok(true)
    }
}

/// Timer stub: the simulation drives ticks explicitly, so this only hands
/// out handles.
#[derive(Default)]
struct SimTimer {
    next: u64,
}

impl TimerService for SimTimer {
    fn schedule_repeating(&mut self, interval_ms: u64) -> TimerHandle {
        self.next += 1;
        info!("timer: scheduled every {}ms", interval_ms);
        TimerHandle(self.next)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        info!("timer: cancelled {:?}", handle);
    }
}

fn main() {
    env_logger::init();

    let work_area = Rect::new(0, 0, 1920, 1080);
    let window = WindowId(0x42);

    let mut registry = LayoutRegistry::new(MemoryStore::new());
    let layout = registry
        .selected_layout_for("SIM-1")
        .expect("memory store cannot fail");

    let compositor = SimCompositor {
        state: Rc::new(RefCell::new(SimState {
            pointer: PointerState {
                x: 960,
                y: 540,
                mods: ModMask::default(),
            },
            frame: Rect::new(200, 150, 800, 600),
        })),
    };

    let mut manager = TilingManager::new(
        compositor.clone(),
        SimTimer::default(),
        "SIM-1",
        work_area,
        Config::default(),
        layout,
    );

    let (tx, rx) = mpsc::channel();
    manager.set_overlay(tx);

    // Drag with ctrl held, sweeping across the layout, then release.
    let path: &[(i32, i32, ModMask)] = &[
        (400, 300, ModMask::CTRL),
        (900, 300, ModMask::CTRL),
        (1500, 300, ModMask::CTRL),
        // Let go of ctrl and slam the left edge for a half snap instead.
        (8, 540, ModMask::default()),
    ];

    manager.on_grab_begin(window, GrabOp::Moving);
    for (x, y, mods) in path {
        compositor.state.borrow_mut().pointer = PointerState {
            x: *x,
            y: *y,
            mods: *mods,
        };
        manager.poll_tick();
        for event in rx.try_iter() {
            println!("overlay: {:?}", event);
        }
    }
    manager.on_grab_end(window);
    for event in rx.try_iter() {
        println!("overlay: {:?}", event);
    }

    println!(
        "final frame: {:?}, assigned tile: {:?}",
        compositor.state.borrow().frame,
        manager.assigned_tile(window)
    );
}
