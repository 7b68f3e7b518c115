//! Wallpaper selection and composition module
//!
//! This module implements the core of the application: enumerating image
//! candidates under the configured folder, drawing one uniformly at random,
//! letterboxing it to the primary display resolution, and staging the
//! composed bitmap for the native apply call.
//!
//! # Overview
//!
//! - `selector`: recursive candidate enumeration and the uniform random draw
//! - `compositor`: fit-inside scale math, black-canvas composition, staging
//! - `changer`: one change cycle end to end, guarded against overlap
//!
//! # Failure model
//!
//! Every error in a cycle (`NoCandidates`, `Decode`, `Persist`, `Apply`)
//! degrades to "this rotation cycle did nothing". The next timer tick or
//! manual trigger retries independently with a fresh random draw; there is
//! no retry logic inside a cycle.

pub mod changer;
pub mod compositor;
pub mod selector;

pub use changer::WallpaperChanger;
pub use compositor::{FitRect, compose, compose_to_file, fit_rect};
pub use selector::{SUPPORTED_EXTENSIONS, WallpaperSelector, collect_candidates};
