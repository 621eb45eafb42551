//! Domain traits - Abstractions for infrastructure implementations

pub mod channel;
pub mod drive;
pub mod summarizer;

pub use channel::{Channel, ChannelInfo};
pub use drive::DriveStorage;
pub use summarizer::Summarizer;
