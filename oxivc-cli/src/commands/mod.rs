//! Command implementations for OxiVC CLI.

pub mod decode;
pub mod detect;
pub mod info;

pub use decode::cmd_decode;
pub use detect::cmd_detect;
pub use info::cmd_info;
pub use test::cmd_test;
