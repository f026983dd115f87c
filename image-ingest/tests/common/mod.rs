// Not every utils is used in every test, so we allow dead code
#![allow(unused_imports, dead_code)]

mod image_server;
pub use image_server::*;
mod test_setup;
pub use test_setup::*;
