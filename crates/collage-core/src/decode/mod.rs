//! Image decoding for collage sources.
//!
//! Photos arrive as encoded bytes (PNG, JPEG or WebP). They are decoded once
//! into upright RGBA bitmaps and kept by the caller; the compositor and the
//! export pipeline only ever read them.
//!
//! # Examples
//!
//! ```ignore
//! use collage_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg")?;
//! let image = decode_image(&bytes)?;
//! println!("natural size {}x{}", image.width, image.height);
//! ```

mod reader;
mod resize;
mod types;

pub use reader::{decode_image, read_orientation};
pub use resize::{resize, resize_to_fit};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
