//! Low level codecs shared by the frame and tag layers

pub(crate) mod alloc;
pub mod synchsafe;
pub mod text;
