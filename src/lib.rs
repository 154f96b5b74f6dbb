//! Turn pasted or dropped URLs into markdown links annotated with the
//! page's title.
//!
//! The host editor, clipboard, and notification surface are modeled as
//! traits in [`editor`]; the rest is the core protocol: classification,
//! placeholder insertion, the layered title fetch, and content-search
//! replacement.

pub mod blacklist;
pub mod config;
pub mod controller;
pub mod editor;
pub mod markdown;
pub mod placeholder;
pub mod resolve;
