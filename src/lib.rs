//! Build a PowerPoint deck from a directory of per-person photo folders.
//!
//! Each immediate subfolder of the root is one person. Their `baby.*` and
//! `recent.*` photos become one slide each, labeled in the photo's dominant
//! color with black or white text for contrast.

pub mod category;
pub mod color;
pub mod config;
pub mod constants;
pub mod deck;
pub mod error;
pub mod photo_loader;
pub mod pipeline;
pub mod pptx;
pub mod slide;
pub mod writer;

pub use config::{Cli, Config, LabelPosition, SlideOptions, Variant};
pub use deck::Deck;
pub use error::DeckError;
pub use pipeline::{BuildReport, build_deck, run};
