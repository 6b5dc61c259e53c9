use std::cell::RefCell;
use std::rc::Rc;

use layers::annotations::{AnnotationLayer, AnnotationSource};
use layers::overlay::OverlayStack;
use layers::raster::RasterLayer;
use layers::wms::WmsLayer;
use layers::{Layer, LayerId, LayerStack};
use viewport::{InputEvent, InputQueue, MapViewport, RenderContext, RenderPass, View};

use crate::draw::{DrawCoordinator, DrawSelection};
use crate::label::{LabelPrompt, create_label_at};
use crate::query::{InfoPanel, apply_query_response, click_query, update_hover_cursor};
use crate::swipe::SwipeClip;

/// The fixed layer set composed at startup, bottom to top: satellite imagery,
/// the swiped line/label base map, user annotations, then the thematic layer.
pub struct SessionLayers {
    pub aerial: RasterLayer,
    pub base: RasterLayer,
    pub annotations: AnnotationLayer,
    pub thematic: WmsLayer,
}

/// One interactive viewer session: the viewport, the immutable layer set, the
/// three coordinators, and the UI sinks they write to.
///
/// Input arrives as recorded events and is routed by `pump`; the host performs
/// the actual feature-info fetches (`take_pending_queries`) and hands results
/// back through `apply_query_response`.
pub struct Session {
    map: MapViewport,
    stack: LayerStack,
    aerial: RasterLayer,
    base: RasterLayer,
    thematic: WmsLayer,
    annotation_source: Rc<RefCell<AnnotationSource>>,
    swipe: SwipeClip,
    draw: DrawCoordinator,
    overlays: OverlayStack,
    panel: InfoPanel,
    queue: InputQueue,
    help_text: String,
    help_requested: bool,
    pending_queries: Vec<String>,
}

impl Session {
    pub fn new(view: View, layers: SessionLayers, help_text: impl Into<String>) -> Self {
        let mut stack = LayerStack::new();
        stack.push(layers.aerial.id());
        stack.push(layers.base.id());
        // Annotations sit below the thematic layer so its styling stays on top.
        stack.push(layers.annotations.id());
        stack.push(layers.thematic.id());

        let annotation_source = Rc::new(RefCell::new(AnnotationSource::new()));
        let swipe = SwipeClip::new(layers.base.id());
        let draw = DrawCoordinator::new(Rc::clone(&annotation_source));

        Self {
            map: MapViewport::new(view),
            stack,
            aerial: layers.aerial,
            base: layers.base,
            thematic: layers.thematic,
            annotation_source,
            swipe,
            draw,
            overlays: OverlayStack::new(),
            panel: InfoPanel::new(),
            queue: InputQueue::new(),
            help_text: help_text.into(),
            help_requested: false,
            pending_queries: Vec::new(),
        }
    }

    pub fn map(&self) -> &MapViewport {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut MapViewport {
        &mut self.map
    }

    pub fn layer_order(&self) -> &[LayerId] {
        self.stack.order()
    }

    pub fn swipe(&self) -> &SwipeClip {
        &self.swipe
    }

    pub fn draw(&self) -> &DrawCoordinator {
        &self.draw
    }

    pub fn panel(&self) -> &InfoPanel {
        &self.panel
    }

    pub fn overlays(&self) -> &OverlayStack {
        &self.overlays
    }

    pub fn annotation_source(&self) -> Rc<RefCell<AnnotationSource>> {
        Rc::clone(&self.annotation_source)
    }

    /// Resolves a raster layer id back to its tile source and visibility.
    pub fn raster(&self, id: LayerId) -> Option<&RasterLayer> {
        [&self.aerial, &self.base]
            .into_iter()
            .find(|layer| layer.id() == id)
    }

    pub fn thematic(&self) -> &WmsLayer {
        &self.thematic
    }

    pub fn thematic_mut(&mut self) -> &mut WmsLayer {
        &mut self.thematic
    }

    /// Records an input event for the next pump.
    pub fn push_input(&mut self, event: InputEvent) {
        self.queue.push(event);
    }

    /// Completes the in-progress line or polygon sketch, if any.
    pub fn finish_sketch(&mut self) {
        self.draw.finish_sketch();
    }

    /// Drains and routes every recorded input event, in arrival order.
    ///
    /// The prompt is consulted only for context-menu events; it blocks the
    /// pump, matching the synchronous modal contract.
    pub fn pump(&mut self, prompt: &mut dyn LabelPrompt) {
        for event in self.queue.drain() {
            match event {
                InputEvent::SingleClick(e) => {
                    // An active draw interaction and the click query coexist:
                    // the click places a vertex and still queries the layer.
                    self.draw.place_vertex(e.coordinate);
                    if let Some(url) = click_query(
                        &self.thematic.source,
                        self.map.view(),
                        e.coordinate,
                        &mut self.panel,
                    ) {
                        self.pending_queries.push(url);
                    }
                }
                InputEvent::PointerMove(e) => {
                    update_hover_cursor(&mut self.map, &self.thematic, &e);
                }
                InputEvent::ContextMenu(e) => {
                    let _ = create_label_at(prompt, e.coordinate, &mut self.overlays);
                }
                InputEvent::SwipeInput(pct) => {
                    self.swipe.set_fraction(pct, &mut self.map);
                }
                InputEvent::DrawTypeSelect(value) => {
                    self.draw
                        .set_active_type(DrawSelection::from_control_value(&value));
                }
                InputEvent::UndoVertex => {
                    self.draw.undo_vertex();
                }
                InputEvent::ShowHelp => {
                    self.help_requested = true;
                }
            }
        }
    }

    /// Feature-info URLs awaiting a fetch, in click order. The host fetches
    /// them without cancellation; racing responses are last-write-wins.
    pub fn take_pending_queries(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_queries)
    }

    /// Hands a completed fetch body to the result panel.
    pub fn apply_query_response(&mut self, html: &str) {
        apply_query_response(&mut self.panel, html);
    }

    /// The static help text, if the help control was activated since the last
    /// call.
    pub fn take_help_request(&mut self) -> Option<&str> {
        if std::mem::take(&mut self.help_requested) {
            Some(self.help_text.as_str())
        } else {
            None
        }
    }

    /// Drives one paint cycle: paints layers bottom to top via `paint`,
    /// bracketing the swiped layer with the clip hooks. Consumes any pending
    /// repaint request.
    pub fn render<F>(&mut self, ctx: &mut dyn RenderContext, mut paint: F)
    where
        F: FnMut(LayerId, &mut RenderPass),
    {
        let _ = self.map.take_render_request();
        let ratio = self.map.pixel_ratio();
        let order: Vec<LayerId> = self.stack.order().to_vec();
        for id in order {
            let mut pass = RenderPass::new(&mut *ctx, ratio);
            let swiped = id == self.swipe.layer();
            if swiped {
                self.swipe.on_prerender(&self.map, &mut pass);
            }
            paint(id, &mut pass);
            if swiped {
                self.swipe.on_postrender(&self.map, &mut pass);
            }
        }
    }
}
