#![allow(missing_docs)]

mod merge;
mod read;
pub(crate) mod util;
mod write;
