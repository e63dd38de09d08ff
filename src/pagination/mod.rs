//! Pagination module
//!
//! Walking sessions over endpoints that page by record id.
//!
//! # Overview
//!
//! A [`Page`] holds one response plus the fetch capability it was produced
//! by. [`Page::older`] takes the extreme record id of the current page as the
//! cursor and asks the bound fetch for the next page. Which extreme is used
//! is declared by the result type through [`Walkable`].

mod types;
mod walker;

pub use types::{Extreme, Walkable, WalkCursor};
pub use walker::{Fetch, Page};
