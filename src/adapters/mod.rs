//! Adapters implementing the port traits.
//!
//! `live` talks to the real system, `recording` wraps a live adapter and
//! captures its interactions to a cassette, `replaying` serves a cassette.

pub mod live;
pub mod recording;
pub mod replaying;
