//! A chess board view: a fixed grid of tiled cells that is repainted from a
//! game model, with registration points for cell clicks and game controls.

pub use assets::*;
pub use config::*;
pub use dimension::*;
pub use errors::*;
pub use events::*;
pub use grid::*;
pub use model::*;
pub use pane::*;
pub use pieces::*;
pub use view::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod assets;
mod config;
mod dimension;
mod errors;
mod events;
mod grid;
mod model;
mod pane;
mod pieces;
mod view;
mod visualization;
