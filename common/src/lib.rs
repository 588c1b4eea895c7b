#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod led;
mod view;

pub use led::*;
pub use view::*;
