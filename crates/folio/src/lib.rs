//! Headless portfolio presentation engine.
//!
//! A [`Page`] owns a parsed [`dom::Document`], a virtual-clock
//! [`timers::TimerQueue`] and the two presentation controllers: one
//! [`carousel::CarouselController`] per `.portfolio` section and a single
//! [`modal::ModalController`] for `#project-modal`.
#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

pub mod carousel;
pub mod classes;
pub mod cli;
pub mod config;
pub mod modal;
pub mod page;
pub mod script;
pub mod timers;

pub use carousel::{CarouselController, SlidePosition, classify};
pub use config::FolioConfig;
pub use modal::{ModalController, StyleMode};
pub use page::{Page, Task};
pub use script::{Step, parse_script};
pub use timers::{TimerId, TimerQueue};
