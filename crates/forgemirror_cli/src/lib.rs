//! Forgemirror CLI - shared support for the `forgemirror-repos` and
//! `forgemirror-activity` entrypoints.

pub mod commands;
pub mod config;
pub mod progress;
