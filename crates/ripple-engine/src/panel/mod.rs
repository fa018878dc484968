//! Debug parameter panel.
//!
//! `ParamTable` is the command table: named, range-checked setters over an
//! application state. `Panel` lays it out, drives it from input and draws it.

mod params;
mod view;

pub use params::{ParamError, ParamKind, ParamTable};
pub use view::{Panel, PanelStyle};
