//! Screen rectangle tracking and pointer normalization.

use glam::DVec2;

use super::surface::InputSurface;

/// On-page rectangle of the display surface in page pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenRect {
    /// Left edge in page pixels.
    pub left: f64,
    /// Top edge in page pixels.
    pub top: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl ScreenRect {
    /// Whether the rect has a usable area for normalization.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Both projections of one pointer position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    /// Fraction of the surface, each axis in `[0, 1]` inside the surface.
    pub screen: DVec2,
    /// Aspect-corrected signed trackball coordinate, y up.
    pub circle: DVec2,
}

/// Keeps the [`ScreenRect`] current and converts page positions into
/// [`PointerSample`]s.
#[derive(Debug, Clone, Default)]
pub struct ScreenRectTracker {
    rect: ScreenRect,
}

impl ScreenRectTracker {
    /// Build a tracker and take the first measurement.
    pub fn new<S: InputSurface + ?Sized>(surface: &S) -> Self {
        let mut tracker = Self::default();
        tracker.refresh(surface);
        tracker
    }

    /// Most recent measurement.
    #[must_use]
    pub fn rect(&self) -> ScreenRect {
        self.rect
    }

    /// Re-measure the surface: bounding box plus page scroll minus the
    /// document border.
    pub fn refresh<S: InputSurface + ?Sized>(&mut self, surface: &S) {
        let bounds = surface.bounding_rect();
        let scroll = surface.page_offset();
        let border = surface.client_offset();
        self.rect = ScreenRect {
            left: bounds.left + scroll.x - border.x,
            top: bounds.top + scroll.y - border.y,
            width: bounds.width,
            height: bounds.height,
        };
        if self.rect.is_degenerate() {
            log::warn!(
                "display surface has no area ({}x{}); pointer input is \
                 ignored until the next resize",
                self.rect.width,
                self.rect.height
            );
        } else {
            log::debug!("screen rect updated: {:?}", self.rect);
        }
    }

    /// Position as a fraction of the surface.
    #[must_use]
    pub fn on_screen(&self, x: f64, y: f64) -> DVec2 {
        let r = &self.rect;
        if r.is_degenerate() {
            return DVec2::ZERO;
        }
        DVec2::new((x - r.left) / r.width, (y - r.top) / r.height)
    }

    /// Position on the virtual trackball: x in `[-1, 1]` across the width,
    /// y scaled by the same factor so the circle stays round.
    #[must_use]
    pub fn on_circle(&self, x: f64, y: f64) -> DVec2 {
        let r = &self.rect;
        if r.is_degenerate() {
            return DVec2::ZERO;
        }
        DVec2::new(
            (x - r.width * 0.5 - r.left) / (r.width * 0.5),
            (r.height + 2.0 * (r.top - y)) / r.width,
        )
    }

    /// Both projections at once.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> PointerSample {
        PointerSample {
            screen: self.on_screen(x, y),
            circle: self.on_circle(x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::headless::HeadlessSurface;

    fn tracker(width: f64, height: f64) -> ScreenRectTracker {
        ScreenRectTracker::new(&HeadlessSurface::new(width, height))
    }

    #[test]
    fn center_maps_to_circle_origin() {
        let t = tracker(800.0, 600.0);
        assert_eq!(t.on_circle(400.0, 300.0), DVec2::ZERO);
        assert_eq!(t.on_screen(400.0, 300.0), DVec2::new(0.5, 0.5));
    }

    #[test]
    fn circle_is_aspect_corrected_and_y_up() {
        let t = tracker(800.0, 600.0);
        // right edge is x = 1
        assert_eq!(t.on_circle(800.0, 300.0).x, 1.0);
        // top edge is y = height / width
        assert_eq!(t.on_circle(400.0, 0.0).y, 0.75);
        assert_eq!(t.on_circle(400.0, 600.0).y, -0.75);
    }

    #[test]
    fn rect_accounts_for_scroll_and_border() {
        let mut surface = HeadlessSurface::new(200.0, 100.0);
        surface.set_origin(10.0, 20.0);
        surface.set_page_offset(DVec2::new(0.0, 300.0));
        surface.set_client_offset(DVec2::new(2.0, 2.0));
        let t = ScreenRectTracker::new(&surface);
        assert_eq!(
            t.rect(),
            ScreenRect {
                left: 8.0,
                top: 318.0,
                width: 200.0,
                height: 100.0,
            }
        );
        assert_eq!(t.on_screen(8.0, 318.0), DVec2::ZERO);
    }

    #[test]
    fn refresh_replaces_stale_rect() {
        let mut surface = HeadlessSurface::new(800.0, 600.0);
        let mut t = ScreenRectTracker::new(&surface);
        surface.resize(400.0, 300.0);
        t.refresh(&surface);
        assert_eq!(t.on_screen(400.0, 300.0), DVec2::ONE);
    }

    #[test]
    fn degenerate_rect_yields_zero_samples() {
        let t = tracker(0.0, 0.0);
        assert_eq!(t.sample(5.0, 5.0), PointerSample::default());
    }
}
