#![no_std]

extern crate alloc;

pub use config::*;
pub use error::*;
pub use feedback::*;
pub use game::*;
pub use grid::*;
pub use machine::*;
pub use matcher::*;
pub use potion::*;
pub use puzzle::*;
pub use scramble::*;
pub use selection::*;
pub use spirits::*;
pub use types::*;
pub use word_search::*;

mod config;
mod error;
mod feedback;
mod game;
mod grid;
mod machine;
mod matcher;
mod potion;
mod puzzle;
mod scramble;
mod selection;
mod spirits;
mod types;
mod word_search;
