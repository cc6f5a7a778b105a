//! A headless windowing engine for long scrollable lists, inspired by
//! vue-virtual-scroll-list.
//!
//! This crate focuses on the core algorithm needed to keep a huge ordered
//! list cheap: track measured item extents, estimate the rest, locate how
//! many items a scroll offset has passed, and decide the materialized
//! `{start, end}` window plus the spacer extents standing in for everything
//! off screen. Direction-aware hysteresis keeps the window from re-anchoring
//! on every scroll event.
//!
//! It is UI-agnostic. A UI layer is expected to provide:
//! - scroll offsets as they are reported
//! - measured item extents once real elements exist
//! - the re-render driven by the returned range and paddings
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod identity;
mod key;
mod ledger;
mod offsets;
mod options;
mod types;
mod windower;


pub use error::ConfigError;
pub use identity::{FieldSelector, IdentityExtractor, KeyFn, collect_ids};
pub use options::{OnRangeChange, WindowerOptions};
pub use types::{Range, ScrollDirection, Sizing};
pub use windower::Windower;

#[doc(hidden)]
pub use key::ItemIdent;
