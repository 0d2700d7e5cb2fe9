#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

mod filesystem;

pub use filesystem::FilesystemAssetStore;
