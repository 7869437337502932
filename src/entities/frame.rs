//! Decoded animation frames and their load states.
//!
//! A preload batch owns a fixed array of `FrameSlot`s, one per declared frame.
//! Slots start `Pending`, and settle to `Loaded` or `Absent` exactly once.
//! An `Absent` slot is a recoverable condition (the batch keeps going and the
//! renderer simply skips it), never an error that propagates upward.

use std::fmt;
use std::path::Path;

use log::debug;

/// Frame loading errors
#[derive(Debug)]
pub enum FrameError {
    Io(String),
    Decode(String),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Io(e) => write!(f, "IO error: {}", e),
            FrameError::Decode(e) => write!(f, "Decode error: {}", e),
        }
    }
}

impl std::error::Error for FrameError {}

/// A decoded still frame: tightly packed RGBA8 pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Frame {
    /// Wrap an existing RGBA8 buffer. `pixels.len()` must be `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height * 4) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Load and decode an image file into an RGBA8 frame.
    pub fn load(path: &Path) -> Result<Self, FrameError> {
        debug!("Loading frame: {}", path.display());

        let reader = image::ImageReader::open(path)
            .map_err(|e| FrameError::Io(format!("{}: {}", path.display(), e)))?;

        let img = reader
            .decode()
            .map_err(|e| FrameError::Decode(format!("{}: {}", path.display(), e)))?;

        let width = img.width();
        let height = img.height();
        let rgba = img.to_rgba8();

        Ok(Self::from_rgba8(width, height, rgba.into_raw()))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Approximate memory footprint in bytes
    pub fn mem(&self) -> usize {
        self.pixels.len()
    }
}

/// Load state of one slot in a preload batch.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameSlot {
    /// Load not settled yet
    Pending,
    /// Decoded successfully
    Loaded(Frame),
    /// Load failed; the slot stays empty for the lifetime of the batch
    Absent,
}

impl FrameSlot {
    /// Success or failure - has this slot settled?
    pub fn is_settled(&self) -> bool {
        !matches!(self, FrameSlot::Pending)
    }

    /// Decoded frame, if the slot settled successfully.
    pub fn frame(&self) -> Option<&Frame> {
        match self {
            FrameSlot::Loaded(frame) => Some(frame),
            _ => None,
        }
    }
}
