//! Settings store backends.
//!
//! | Store | Durability |
//! |-------|------------|
//! | [`MemorySettingsStore`] | Process lifetime |
//! | [`JsonFileSettingsStore`] | JSON document on disk |

mod json_file;
mod memory;

pub use json_file::JsonFileSettingsStore;
pub use memory::MemorySettingsStore;
