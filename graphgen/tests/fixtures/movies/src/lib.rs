//! Movie catalogue schema used by the scanner integration tests.

#![allow(non_snake_case)]

mod film;
mod location;
mod people;
mod taxonomy;

pub use film::*;
pub use location::*;
pub use people::*;
pub use taxonomy::*;
