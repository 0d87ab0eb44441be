//! Core model – carousel state machine, easing, parallax, project catalog.
//!
//! Nothing in this module depends on any TUI or rendering crate; offsets
//! are plain `f64` in whatever unit the host lays cards out in.

pub mod animator;
pub mod carousel;
pub mod easing;
pub mod hero;
pub mod parallax;
pub mod project;
pub mod tracker;
