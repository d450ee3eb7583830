#![allow(missing_docs)]

mod ape;
mod derived;
mod flac;
mod mp4;
mod ogg;

pub(crate) mod util;
