//! JSON configuration of the command-line tools.

pub mod reconstruct;
