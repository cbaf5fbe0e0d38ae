#![deny(unsafe_code)]

//! Device model metadata from the macOS Launch Services UTI database.
//!
//! macOS ships a catalog of every Apple mobile device it knows about, as
//! exported UTI declarations inside the `MobileDevices` bundle. This crate
//! reads that catalog and resolves model identifiers (such as `"iPhone8,1"`)
//! to display names and color variants.
//!
//! The data source is undocumented, so don't rely on it in production; it's
//! quite useful for making debugging tools prettier, though.

pub mod device;
pub mod uti;
pub mod util;

pub static NAME: &str = "device-info";
