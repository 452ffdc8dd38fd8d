//! Rendering subsystem for custom-painted widgets
//!
//! - Wheel rendering (sectors, labels, pointer)
//! - Slide rendering (carousel track and placeholder tiles)
//! - Text utilities (fitting captions into a width)

pub mod slide_renderer;
pub mod text_utils;
pub mod wheel_renderer;
