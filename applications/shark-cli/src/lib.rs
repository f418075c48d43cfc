//! Jelly Shark command-line client
//!
//! Configuration loading and terminal rendering shared by the `jellyshark` binary.

pub mod config;
pub mod output;
