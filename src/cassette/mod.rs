//! Cassette format for recording and replaying build tool sessions.

pub mod format;
pub mod recorder;
pub mod replayer;
