//! BLOOMSCROLL - Scroll-linked frame-sequence player library
//!
//! Re-exports all modules for use by binary targets.

// Core engine (preloader, player, workers, geometry)
pub mod core;

// App modules
pub mod app;
pub mod cli;
pub mod config;
pub mod entities;

// Re-export commonly used types from core
pub use core::player::{PlayerState, ScrollPlayer};
pub use core::preloader::{PreloadBatch, PreloadPolicy, Preloader};
pub use core::workers::Workers;

// Re-export entities
pub use entities::{Frame, FrameSet, NoteJournal, ThoughtCategory};
