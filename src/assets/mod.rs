//! Read-only resources a reading is rendered from.

pub mod bundle;
pub mod decode;
pub mod load;
pub mod prepare;

pub use bundle::{AssetBundle, AssetCell, FontAsset};
