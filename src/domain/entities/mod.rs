//! Domain entities - Core business objects with no external dependencies

pub mod command;
pub mod message;
pub mod remote_file;

pub use command::Command;
pub use message::{InboundMessage, MessageContent};
pub use remote_file::RemoteFile;
