//! Domain entities: frames, frame sets, archive content, and the note journal.

pub mod frame;
pub mod frameset;
pub mod notes;
pub mod thought;

pub use frame::{Frame, FrameError, FrameSlot};
pub use frameset::FrameSet;
pub use notes::{NoteJournal, SavedNote};
pub use thought::{ContentSection, ThoughtCategory, ThoughtStat};
