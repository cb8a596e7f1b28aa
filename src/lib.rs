//! An amount changer for board game dialogs: an up arrow, the amount and a down arrow. The owner
//! of the widget decides which arrows are usable and what a click does, the widget only shows it.
//!
//! Also contains a small app using it for discarding half of a hand of resource cards.

#![warn(
    clippy::all,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations
)]
pub use app::{
    Amount, AmountChange, AmountChangeWidget, Container, DiscardApp, DiscardPanel, Element,
    InteractiveImage, Label, ResourceList, ResourceType, Shared,
};
mod app;
