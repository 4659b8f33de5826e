//! `gw-vision` — local occlusion-blended vision rendering (§4.5).
//!
//! | Module     | Contents        |
//! |------------|------------------|
//! | [`params`] | `VisionParams`   |
//! | [`render`] | `render`         |

pub mod params;
pub mod render;

#[cfg(test)]
mod tests;

pub use params::VisionParams;
pub use render::render;
