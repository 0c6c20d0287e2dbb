//! Minimal truecolor PNG encoder and the app icon artwork drawn with it.
//!
//! - [`encoder`]: PNG chunk framing and the 8-bit RGB encoder
//! - [`canvas`]: an RGB raster with clipped fill primitives
//! - [`icon`]: the "T + sound waves" icon and icon-set writer
//!
//! ```rust
//! use sundry_png::{icon::render_icon, IconStyle};
//!
//! let canvas = render_icon(48, &IconStyle::default());
//! let png = canvas.to_png().unwrap();
//! assert!(png.starts_with(sundry_png::encoder::SIGNATURE));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod canvas;
pub mod encoder;
pub mod error;
pub mod icon;

pub use canvas::{Canvas, Rgb};
pub use encoder::encode_rgb;
pub use error::{Error, Result};
pub use icon::{IconStyle, write_icon_set};
