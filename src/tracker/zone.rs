use crate::foundation::core::Rgba8;

/// Vertical extent of a zone in viewport coordinates (0 = top of the viewport).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ZoneRect {
    pub top: f64,
    pub bottom: f64,
}

impl ZoneRect {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Inclusive on both edges.
    pub fn straddles(&self, y: f64) -> bool {
        self.top <= y && y <= self.bottom
    }
}

/// Window geometry sampled on every scroll/resize signal.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub height: f64,
    /// Current vertical scroll offset of the document.
    pub scroll_y: f64,
    pub document_height: f64,
}

impl Viewport {
    pub fn new(height: f64, scroll_y: f64, document_height: f64) -> Self {
        Self {
            height,
            scroll_y,
            document_height,
        }
    }

    /// Largest reachable scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.height).max(0.0)
    }
}

/// Request to scroll the document so a zone comes into view.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollRequest {
    pub scroll_y: f64,
    pub smooth: bool,
}

/// Live geometry of the element behind a zone.
pub trait BoundsProvider {
    /// Current rectangle in viewport coordinates; `None` while unmounted or unmeasured.
    fn bounds(&self, viewport: &Viewport) -> Option<ZoneRect>;

    /// Smoothly bring the element's top edge into view.
    fn scroll_into_view(&self, viewport: &Viewport) -> Option<ScrollRequest> {
        let rect = self.bounds(viewport)?;
        Some(ScrollRequest {
            scroll_y: (viewport.scroll_y + rect.top).clamp(0.0, viewport.max_scroll()),
            smooth: true,
        })
    }
}

/// A section at a fixed position in page coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageRegion {
    pub top: f64,
    pub bottom: f64,
}

impl PageRegion {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }
}

impl BoundsProvider for PageRegion {
    fn bounds(&self, viewport: &Viewport) -> Option<ZoneRect> {
        Some(ZoneRect::new(
            self.top - viewport.scroll_y,
            self.bottom - viewport.scroll_y,
        ))
    }
}

/// `None` behaves like an element that is not mounted yet.
impl<T: BoundsProvider> BoundsProvider for Option<T> {
    fn bounds(&self, viewport: &Viewport) -> Option<ZoneRect> {
        self.as_ref()?.bounds(viewport)
    }

    fn scroll_into_view(&self, viewport: &Viewport) -> Option<ScrollRequest> {
        self.as_ref()?.scroll_into_view(viewport)
    }
}

/// A named region of interest on the page.
pub struct Zone {
    pub label: String,
    pub color: Rgba8,
    pub bounds: Box<dyn BoundsProvider>,
}

impl Zone {
    pub fn new(
        label: impl Into<String>,
        color: Rgba8,
        bounds: impl BoundsProvider + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            color,
            bounds: Box::new(bounds),
        }
    }
}

impl std::fmt::Debug for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Zone")
            .field("label", &self.label)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}
