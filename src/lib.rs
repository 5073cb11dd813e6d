//! Topology model and interaction engine for a breadboard circuit sketcher.
//!
//! Users drop schematic components and a perforated prototyping board onto a
//! 2D canvas, wire pins together or push them into board holes, and then move,
//! rotate, multi-select and delete parts. Nothing electrical is computed; the
//! crate only tracks what touches what. The host layer owns the DOM, feeds
//! pointer and keyboard events into [`engine::EngineCore`], and redraws when it
//! receives [`engine::Action::RenderNeeded`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Interaction state machine ([`engine::EngineCore`]) and emitted actions |
//! | [`layout`] | Owning context for components, wires, the board and the selection set |
//! | [`component`] | Component kinds, pin geometry and per-component state |
//! | [`board`] | Hole grid, logical adjacency and hole occupancy |
//! | [`wire`] | Point-to-point wires between component pins |
//! | [`topology`] | Derived connectivity graph over holes and pins |
//! | [`hit`] | Pin and body hit-testing |
//! | [`input`] | Input event types and the gesture state enum |
//! | [`render`] | Scene drawing against an abstract [`render::RenderSurface`] |
//! | [`geom`] | Points, rectangles and the pin rotation transform |
//! | [`config`] | Tunable radii, rotate steps and board dimensions |
//! | [`error`] | [`error::LayoutError`] |
//! | [`consts`] | Shared numeric defaults |
//!
//! With the `web` feature, `web` adds a browser canvas surface and engine wrapper.

pub mod board;
pub mod component;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod geom;
pub mod hit;
pub mod input;
pub mod layout;
pub mod render;
pub mod topology;
#[cfg(feature = "web")]
pub mod web;
pub mod wire;

pub use error::LayoutError;
