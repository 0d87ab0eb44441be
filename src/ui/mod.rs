//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  No file I/O happens here.

pub mod carousel;
pub mod hero;
pub mod layout;
pub mod pages;
pub mod popup;
pub mod spinner;
pub mod theme;
