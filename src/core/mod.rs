//! Core engine - the scroll-linked frame-sequence player, independent of UI
//! chrome: path generation, preloading, progress tracking, frame selection,
//! rendering geometry, and resize coordination.

pub mod frame_paths;
pub mod player;
pub mod preloader;
pub mod renderer;
pub mod resize;
pub mod scroll;
pub mod selector;
pub mod surface;
pub mod workers;

// Re-exports for convenience
pub use player::{PlayerState, ScrollPlayer};
pub use preloader::{PreloadBatch, PreloadPolicy, Preloader};
pub use renderer::FrameRenderer;
pub use resize::ResizeCoordinator;
pub use scroll::ScrollSpan;
pub use selector::select;
pub use surface::{CoverFit, Surface, cover_fit};
pub use workers::Workers;
