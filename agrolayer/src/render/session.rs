//! Rendering session.
//!
//! An explicit session object in place of an implicit global map: it
//! records what was rendered, in order, and the center directive, so
//! the pipeline's output is observable in tests without any real
//! display. It can wrap an inner surface that does the actual drawing.

use crate::geo::Region;
use crate::render::{LayerImage, RenderError, RenderSurface, VisualizationSpec};

/// A surface that draws nothing. Default inner surface for a
/// recording-only session.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSurface;

impl RenderSurface for NoopSurface {
    fn add_layer(
        &mut self,
        _image: LayerImage,
        _vis: &VisualizationSpec,
        _label: &str,
    ) -> Result<(), RenderError> {
        Ok(())
    }

    fn center(&mut self, _region: &Region, _zoom: u8) {}
}

/// Records every presentation call while delegating to an inner surface.
#[derive(Debug)]
pub struct MapSession<S = NoopSurface> {
    inner: S,
    layers: Vec<String>,
    center: Option<(Region, u8)>,
}

impl MapSession<NoopSurface> {
    /// A recording-only session with no real drawing behind it.
    pub fn new() -> Self {
        MapSession::over(NoopSurface)
    }
}

impl Default for MapSession<NoopSurface> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RenderSurface> MapSession<S> {
    /// Wraps an inner surface; calls are recorded and then forwarded.
    pub fn over(inner: S) -> Self {
        MapSession {
            inner,
            layers: Vec::new(),
            center: None,
        }
    }

    /// Labels of rendered layers, in presentation order.
    pub fn layer_labels(&self) -> &[String] {
        &self.layers
    }

    /// The center-and-zoom directive, if one was issued.
    pub fn center_directive(&self) -> Option<&(Region, u8)> {
        self.center.as_ref()
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: RenderSurface> RenderSurface for MapSession<S> {
    fn add_layer(
        &mut self,
        image: LayerImage,
        vis: &VisualizationSpec,
        label: &str,
    ) -> Result<(), RenderError> {
        self.inner.add_layer(image, vis, label)?;
        // Only successfully drawn layers count as rendered.
        self.layers.push(label.to_string());
        Ok(())
    }

    fn center(&mut self, region: &Region, zoom: u8) {
        self.inner.center(region, zoom);
        self.center = Some((*region, zoom));
    }
}
