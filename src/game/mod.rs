//! Game runtime
//!
//! Everything that runs at the fixed tick rate during a run, plus the
//! renderer that draws it.
//!
//! Key concepts:
//! - Entity: Generational handle, used for collectibles
//! - Component: Plain data structs (health, facing, portal)
//! - Event: Per-tick queues the app reads after each tick
//! - Orchestrator: Phase machine owning the level attempt and camera
//!
//! Tick order is fixed: player, hostiles, contact checks, collectibles and
//! portal, time budget, camera.

pub mod entity;
pub mod component;
pub mod event;
pub mod components;
pub mod actor;
pub mod hostile;
pub mod camera;
pub mod orchestrator;
pub mod runtime;
pub mod renderer;

// Re-export main types
pub use entity::Entity;
pub use event::{CameraCue, DamageSource, DefeatCause, GameEvents, PortalEvent};
pub use camera::Camera;
pub use orchestrator::{LevelOrchestrator, LevelState, Phase, RunState};
pub use runtime::{wait_for_frame, FixedStep, FpsLimit};
pub use renderer::{present, render_level, Viewport};
