#![allow(non_snake_case)]

mod decoder;
mod error;
mod model;
mod pipeline;
mod util;

pub use decoder::*;
pub use error::*;
pub use model::chart::*;
pub use model::config::*;
pub use model::vocabulary::*;
pub use pipeline::*;
pub use util::*;
