//! Canvas2D rendering module
//!
//! The sim knows nothing about drawing; this module turns a `GameState` into
//! rectangle-fill, rectangle-stroke, text, and image-draw calls on a canvas.

pub mod canvas;

pub use canvas::CanvasRenderer;
