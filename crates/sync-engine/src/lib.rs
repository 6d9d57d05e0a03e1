//! Tracksync Sync Engine
//!
//! Keeps a video and a metrics table in lockstep:
//! - **Sync:** Media position ↔ data position under an additive offset
//! - **Media:** The `MediaSource` capability and a simulated player
//! - **Render:** The `Renderer` capability and the frames it receives
//! - **Session:** The context object that owns all state and dispatches
//!   user and media commands
//!
//! Everything runs on the caller's thread. A `Session` is the single owner
//! of rows, timeline, selection, and sync state; each command runs to
//! completion before the next one is handled.

pub mod media;
pub mod render;
pub mod session;
pub mod sync;

pub use media::{MediaSource, SimulatedMedia};
pub use render::{PlotFrame, RecordingRenderer, Renderer, StatusKind, StatusMessage};
pub use session::{KeyInput, Session, SessionCommand, SessionSettings};
pub use sync::{CursorUpdate, StepDirection, SyncController};
