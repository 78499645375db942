//! **snaptile**: a tile-snapping engine for compositor shells.
//!
//! Windows are snapped to layouts of fractional tiles, to screen-edge
//! quarters and halves, or to the full work area, driven by pointer drags
//! and keyboard moves. The engine computes geometry and decides placements;
//! the host compositor renders overlays, dispatches input, and owns the
//! windows.
//!
//! # Architecture
//!
//! The crate is organised around the collaborator traits in [`traits`]:
//!
//! * [`traits::Compositor`] abstracts pointer sampling and window
//!   geometry commands so the engine is not coupled to any specific
//!   compositor.
//! * [`traits::TimerService`] abstracts the host event loop's timers; the
//!   engine schedules its drag poll through it and the host calls back in
//!   on every fire.
//!
//! [`manager::TilingManager`] is the per-monitor coordinator over a
//! [`layout_view::TilingLayout`] (grid previews) and an
//! [`edge::EdgeTilingManager`] (screen-edge zones). Layout persistence lives
//! in [`store`], pure rectangle algebra in [`rect`].

pub mod config;
pub mod edge;
pub mod layout_view;
pub mod manager;
pub mod rect;
pub mod store;
pub mod tile;
pub mod traits;
