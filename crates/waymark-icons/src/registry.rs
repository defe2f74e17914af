//! Named-icon dispatch.
//!
//! Icons are resolved in two tiers: a per-registry override table checked
//! first, then the closed set of built-in icons. Overrides let collaborators
//! (asset loaders, UI layers) add content-defined icons without touching
//! this crate; built-ins are a closed enumeration so the dispatch is
//! exhaustiveness-checked instead of a string switch.
//!
//! Unknown keys draw nothing and succeed. Icon lookups happen every UI
//! frame, and a missing icon is a content problem, not a render failure.

use std::collections::HashMap;

use tracing::debug;

use crate::canvas::Canvas;
use crate::error::IconResult;
use crate::icons;
use crate::quality;
use crate::scribble;
use crate::types::{Color, Rect};

/// A draw callback for one icon.
///
/// Paints into the canvas within the target rectangle using the given
/// tint color. Stateless; the registry never retains anything else.
pub type IconRenderer = Box<dyn Fn(&mut Canvas, Rect, Color) -> IconResult<()> + Send + Sync>;

/// Seed used when the scribble generator is invoked by bare name, with no
/// object identity to derive one from.
const FALLBACK_SEED: u64 = 0x5741_594d_4152_4b00;

/// The closed set of icons built into the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinIcon {
    Undo,
    Redo,
    Close,
    Check,
    Plus,
    Minus,
    ArrowUp,
    ArrowDown,
    Lock,
    Search,
    Star,
    Shield,
    Heart,
    Scribble,
    QualityBars,
}

impl BuiltinIcon {
    /// Every built-in icon, in dispatch-table order.
    pub const ALL: [BuiltinIcon; 15] = [
        BuiltinIcon::Undo,
        BuiltinIcon::Redo,
        BuiltinIcon::Close,
        BuiltinIcon::Check,
        BuiltinIcon::Plus,
        BuiltinIcon::Minus,
        BuiltinIcon::ArrowUp,
        BuiltinIcon::ArrowDown,
        BuiltinIcon::Lock,
        BuiltinIcon::Search,
        BuiltinIcon::Star,
        BuiltinIcon::Shield,
        BuiltinIcon::Heart,
        BuiltinIcon::Scribble,
        BuiltinIcon::QualityBars,
    ];

    /// The registry key for this icon.
    pub fn name(self) -> &'static str {
        match self {
            BuiltinIcon::Undo => "undo",
            BuiltinIcon::Redo => "redo",
            BuiltinIcon::Close => "close",
            BuiltinIcon::Check => "check",
            BuiltinIcon::Plus => "plus",
            BuiltinIcon::Minus => "minus",
            BuiltinIcon::ArrowUp => "arrow-up",
            BuiltinIcon::ArrowDown => "arrow-down",
            BuiltinIcon::Lock => "lock",
            BuiltinIcon::Search => "search",
            BuiltinIcon::Star => "star",
            BuiltinIcon::Shield => "shield",
            BuiltinIcon::Heart => "heart",
            BuiltinIcon::Scribble => "scribble",
            BuiltinIcon::QualityBars => "quality-bars",
        }
    }

    /// Resolve a registry key to a built-in icon.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "undo" => Some(BuiltinIcon::Undo),
            "redo" => Some(BuiltinIcon::Redo),
            "close" => Some(BuiltinIcon::Close),
            "check" => Some(BuiltinIcon::Check),
            "plus" => Some(BuiltinIcon::Plus),
            "minus" => Some(BuiltinIcon::Minus),
            "arrow-up" => Some(BuiltinIcon::ArrowUp),
            "arrow-down" => Some(BuiltinIcon::ArrowDown),
            "lock" => Some(BuiltinIcon::Lock),
            "search" => Some(BuiltinIcon::Search),
            "star" => Some(BuiltinIcon::Star),
            "shield" => Some(BuiltinIcon::Shield),
            "heart" => Some(BuiltinIcon::Heart),
            "scribble" => Some(BuiltinIcon::Scribble),
            "quality-bars" => Some(BuiltinIcon::QualityBars),
            _ => None,
        }
    }

    /// Draw this icon into the target rectangle.
    pub fn draw(self, canvas: &mut Canvas, rect: Rect, color: Color) -> IconResult<()> {
        match self {
            BuiltinIcon::Undo => icons::draw_undo(canvas, rect, color),
            BuiltinIcon::Redo => icons::draw_redo(canvas, rect, color),
            BuiltinIcon::Close => icons::draw_close(canvas, rect, color),
            BuiltinIcon::Check => icons::draw_check(canvas, rect, color),
            BuiltinIcon::Plus => icons::draw_plus(canvas, rect, color),
            BuiltinIcon::Minus => icons::draw_minus(canvas, rect, color),
            BuiltinIcon::ArrowUp => icons::draw_arrow_up(canvas, rect, color),
            BuiltinIcon::ArrowDown => icons::draw_arrow_down(canvas, rect, color),
            BuiltinIcon::Lock => icons::draw_lock(canvas, rect, color),
            BuiltinIcon::Search => icons::draw_search(canvas, rect, color),
            BuiltinIcon::Star => icons::draw_star(canvas, rect, color),
            BuiltinIcon::Shield => icons::draw_shield(canvas, rect, color),
            BuiltinIcon::Heart => icons::draw_heart(canvas, rect, color),
            BuiltinIcon::Scribble => {
                let (x, y, size) = centered_square(rect);
                scribble::draw_scribble(canvas, x, y, size, color, 2.0, FALLBACK_SEED, 0)
            }
            BuiltinIcon::QualityBars => {
                let (x, y, size) = centered_square(rect);
                quality::draw_quality_bars(canvas, x, y, 0, size);
                Ok(())
            }
        }
    }
}

/// Largest square centered inside a rectangle, as (x, y, side).
fn centered_square(rect: Rect) -> (f32, f32, f32) {
    let size = rect.width().min(rect.height());
    (
        rect.left() + (rect.width() - size) / 2.0,
        rect.top() + (rect.height() - size) / 2.0,
        size,
    )
}

/// Resolves icon names to renderers and invokes them.
///
/// Each registry owns its override table; independent registries (one per
/// rendering service, one per test) share no state. Registration is
/// single-writer: synchronize externally if multiple threads register.
#[derive(Default)]
pub struct IconRegistry {
    overrides: HashMap<String, IconRenderer>,
}

impl IconRegistry {
    /// Create a registry with an empty override table.
    pub fn new() -> Self {
        Self {
            overrides: HashMap::new(),
        }
    }

    /// Create a registry seeded with an override table.
    pub fn with_overrides(overrides: HashMap<String, IconRenderer>) -> Self {
        Self { overrides }
    }

    /// Register (or replace) an override renderer for a key.
    ///
    /// Overrides take precedence over built-in icons with the same key;
    /// the last registration for a key wins.
    pub fn register(&mut self, name: impl Into<String>, renderer: IconRenderer) {
        let name = name.into();
        debug!(
            target: "waymark_icons::registry",
            name = %name,
            "registered icon override"
        );
        self.overrides.insert(name, renderer);
    }

    /// Check whether a key resolves to an override or a built-in icon.
    pub fn is_registered(&self, name: &str) -> bool {
        self.overrides.contains_key(name) || BuiltinIcon::from_name(name).is_some()
    }

    /// Number of registered overrides.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// Draw the icon registered under `name` into the target rectangle.
    ///
    /// The override table is consulted first, then the built-in set. An
    /// unknown key draws nothing and returns `Ok(())`; a debug event is
    /// emitted so typo'd names are observable in development.
    pub fn draw(
        &self,
        canvas: &mut Canvas,
        name: &str,
        rect: Rect,
        color: Color,
    ) -> IconResult<()> {
        if let Some(renderer) = self.overrides.get(name) {
            return renderer(canvas, rect, color);
        }

        if let Some(builtin) = BuiltinIcon::from_name(name) {
            return builtin.draw(canvas, rect, color);
        }

        debug!(
            target: "waymark_icons::registry",
            name = %name,
            width = rect.width(),
            height = rect.height(),
            "unknown icon key, nothing drawn"
        );
        Ok(())
    }
}

impl std::fmt::Debug for IconRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IconRegistry")
            .field("overrides", &self.overrides.len())
            .field("builtins", &BuiltinIcon::ALL.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_name_round_trip() {
        for icon in BuiltinIcon::ALL {
            assert_eq!(BuiltinIcon::from_name(icon.name()), Some(icon));
        }
    }

    #[test]
    fn test_unknown_name_resolves_to_none() {
        assert_eq!(BuiltinIcon::from_name("does-not-exist"), None);
        assert_eq!(BuiltinIcon::from_name("Undo"), None);
    }

    #[test]
    fn test_unknown_key_is_silent_noop() {
        let registry = IconRegistry::new();
        let mut canvas = Canvas::new(32, 32).unwrap();

        let result = registry.draw(
            &mut canvas,
            "does-not-exist",
            Rect::new(0.0, 0.0, 32.0, 32.0),
            Color::BLACK,
        );

        assert!(result.is_ok());
        assert!(canvas.is_blank());
    }

    #[test]
    fn test_override_takes_precedence_over_builtin() {
        let mut registry = IconRegistry::new();
        registry.register(
            "undo",
            Box::new(|canvas, rect, _color| {
                canvas.fill_rect(rect, Color::RED);
                Ok(())
            }),
        );

        let mut canvas = Canvas::new(32, 32).unwrap();
        registry
            .draw(&mut canvas, "undo", Rect::new(0.0, 0.0, 32.0, 32.0), Color::BLACK)
            .unwrap();

        // The built-in undo leaves corners empty; the override fills them
        let d = canvas.data();
        assert!(d[3] > 200, "override renderer was not invoked");
        assert!(d[0] > 200);
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = IconRegistry::new();
        registry.register(
            "badge",
            Box::new(|canvas, rect, _| {
                canvas.fill_rect(rect, Color::RED);
                Ok(())
            }),
        );
        registry.register(
            "badge",
            Box::new(|canvas, rect, _| {
                canvas.fill_rect(rect, Color::BLUE);
                Ok(())
            }),
        );
        assert_eq!(registry.override_count(), 1);

        let mut canvas = Canvas::new(8, 8).unwrap();
        registry
            .draw(&mut canvas, "badge", Rect::new(0.0, 0.0, 8.0, 8.0), Color::BLACK)
            .unwrap();
        let d = canvas.data();
        assert!(d[2] > 200, "expected the second registration to win");
    }

    #[test]
    fn test_is_registered() {
        let mut registry = IconRegistry::new();
        assert!(registry.is_registered("undo"));
        assert!(!registry.is_registered("banner"));

        registry.register("banner", Box::new(|_, _, _| Ok(())));
        assert!(registry.is_registered("banner"));
    }

    #[test]
    fn test_every_builtin_draws_non_empty() {
        let registry = IconRegistry::new();
        for icon in BuiltinIcon::ALL {
            let mut canvas = Canvas::new(32, 32).unwrap();
            registry
                .draw(
                    &mut canvas,
                    icon.name(),
                    Rect::new(0.0, 0.0, 32.0, 32.0),
                    Color::from_array([0.0, 0.0, 0.0, 1.0]),
                )
                .unwrap();
            assert!(!canvas.is_blank(), "builtin {} painted nothing", icon.name());
        }
    }

    #[test]
    fn test_independent_registries_share_nothing() {
        let mut a = IconRegistry::new();
        let b = IconRegistry::new();
        a.register("only-in-a", Box::new(|_, _, _| Ok(())));
        assert!(a.is_registered("only-in-a"));
        assert!(!b.is_registered("only-in-a"));
    }
}
