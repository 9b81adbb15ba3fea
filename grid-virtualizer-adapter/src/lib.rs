//! Adapter utilities for the `grid-virtualizer` crate.
//!
//! The `grid-virtualizer` crate is UI-agnostic and focuses on the core math and state. This
//! crate provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - A [`Controller`] forwarding host events to a `Grid` and firing host callbacks
//! - Callback memoization, so `on_scroll` / `on_section_rendered` fire only on change
//! - Scroll write-back after programmatic scrolls
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod memo;


pub use controller::{
    Controller, Frame, GridCallbacks, RenderedCell, ScrollCallback, ScrollInfo,
    ScrollbarPresenceCallback, SectionRenderedCallback,
};
pub use memo::CallbackMemoizer;
