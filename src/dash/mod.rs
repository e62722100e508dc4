//! # Module: Dataset Dashboard
//!
//! ## Responsibility
//! Terminal dashboard over the character-stat dataset, rendered with Ratatui.
//! Shows a preview table, the total-stat distribution next to an
//! attack-vs-defense scatter, a grid of per-field distributions, the primary
//! type bar chart and the full type-coloured table, one tab each.
//!
//! ## Guarantees
//! - No panics in any rendering or update path
//! - Panel data is computed once per dataset, never per frame
//! - An empty dataset renders only its notice, no panels
//! - Clean terminal restore on exit, including on panic (see `bin/dash.rs`)
//!
//! ## NOT Responsible For
//! - Loading or caching the dataset (see: `dataset`)
//! - Binning and counting (see: `stats`)

pub mod app;
pub mod events;
pub mod ui;
pub mod widgets;
