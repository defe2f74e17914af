//! Icon rendering and texture baking for the Waymark client.
//!
//! This crate draws the client's named vector icons into a CPU pixel
//! surface and can bake the result into a GPU texture. Icons are painted
//! in a fixed design coordinate space and scale-fit into their target
//! rectangle without distortion; two icons (the scribble glyph and the
//! quality bars) synthesize their appearance from input data instead of
//! fixed path geometry.
//!
//! # Drawing a named icon
//!
//! ```
//! use waymark_icons::{Canvas, Color, IconRegistry, Rect};
//!
//! let registry = IconRegistry::new();
//! let mut canvas = Canvas::new(32, 32)?;
//!
//! // Unknown names draw nothing; they never fail the frame.
//! registry.draw(&mut canvas, "undo", Rect::new(0.0, 0.0, 32.0, 32.0), Color::BLACK)?;
//! # Ok::<(), waymark_icons::IconError>(())
//! ```
//!
//! # Registering content-defined icons
//!
//! Asset loaders can register icons at runtime without touching this
//! crate. Overrides take precedence over built-in icons with the same
//! key, and the last registration wins:
//!
//! ```
//! use waymark_icons::{IconRegistry, VectorAsset};
//!
//! let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24">
//!     <rect width="24" height="24" fill="teal"/></svg>"#;
//!
//! let mut registry = IconRegistry::new();
//! registry.register("guild-crest", VectorAsset::from_bytes(svg)?.into_renderer());
//! # Ok::<(), waymark_icons::IconError>(())
//! ```
//!
//! # Baking textures
//!
//! Initialize the [`GraphicsContext`] once, then bake any renderer into
//! a mip-mapped GPU texture:
//!
//! ```no_run
//! use waymark_icons::{
//!     Color, GraphicsConfig, GraphicsContext, IconRegistry, render_icon_to_texture,
//! };
//!
//! GraphicsContext::init(GraphicsConfig::default())?;
//!
//! let registry = IconRegistry::new();
//! let texture = render_icon_to_texture(&registry, "shield", 64, 64, Color::WHITE)?;
//! assert_eq!(texture.size(), (64, 64));
//! # Ok::<(), waymark_icons::IconError>(())
//! ```

mod blur;
mod canvas;
mod context;
mod error;
mod icons;
mod paint;
mod quality;
mod registry;
mod scribble;
mod svg;
mod texture;
mod transform;
mod types;

// Core infrastructure
pub use context::{GpuResources, GraphicsConfig, GraphicsContext};
pub use error::{IconError, IconResult};

// Drawing surface and dispatch
pub use canvas::Canvas;
pub use registry::{BuiltinIcon, IconRegistry, IconRenderer};
pub use svg::VectorAsset;

// Generators
pub use quality::{BAR_COUNT, bar_rects, draw_quality_bars};
pub use scribble::draw_scribble;

// Texture pipeline
pub use texture::{IconTexture, mip_level_count, render_icon_to_texture, render_to_texture};

// Drawing types
pub use blur::gaussian_blur;
pub use paint::{BlendMode, FillRule, LineCap, LineJoin, Stroke};
pub use transform::Transform2D;
pub use types::{Color, Path, PathCommand, Point, Rect, Size};

// Re-export wgpu types that users commonly need
pub use wgpu;
