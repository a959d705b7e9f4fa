//! Interactive circuit view: root instance, viewport-edge pins and the
//! loopback wires that follow the root component around during pan/zoom.
//!
//! Document layout:
//!
//! ```text
//! <svg id="circuit">
//!   <defs id="component-definitions"/>   every definition, built once
//!   <g id="root-component"/>             root instance, carries the transform
//!   <g id="view-box"/>                   edge pins + loopback wires
//! </svg>
//! ```
//!
//! Openness changes rebuild only the root instance. Transform changes only
//! recompute loopback wires.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use log::{debug, info};

use crate::circuit::CircuitState;
use crate::config::RenderContext;
use crate::definition::DefinitionCache;
use crate::error::Result;
use crate::geometry::{Point, Transform, fmt_num, path_data};
use crate::instance::Instance;
use crate::openness::{OpennessStorage, OpennessStore};
use crate::pins::{LOOPBACK_PADDING, PinSide, Presentation, open_pin_y, viewbox_pin};
use crate::renderers::render_document;
use crate::scene::Element;
use crate::viewport::Viewport;

/// Placeholder text rendered when there is no circuit.
pub const EMPTY_MESSAGE: &str = "Nothing to show";

// ─── Loopback wires ──────────────────────────────────────────────────────────

/// Connector between a viewport-edge pin and the root component pin it
/// stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopbackWire {
    /// Where the edge glyph's loop ends (viewport space, never moves).
    pub edge: Point,
    /// Root pin in root-group space, before the viewport transform.
    pub root_pin: Point,
    /// Current path, edge end first.
    pub path: Vec<Point>,
}

impl LoopbackWire {
    fn new(edge: Point, root_pin: Point) -> Self {
        Self {
            edge,
            root_pin,
            path: Vec::new(),
        }
    }

    /// Root-facing endpoint under `t`.
    pub fn moving_end(&self, t: &Transform) -> Point {
        t.apply(self.root_pin)
    }

    fn update(&mut self, t: &Transform) {
        let target = self.moving_end(t);
        self.path = if (target.y - self.edge.y).abs() < f64::EPSILON {
            vec![self.edge, target]
        } else {
            vec![self.edge, Point::new(self.edge.x, target.y), target]
        };
    }
}

/// Every loopback wire of the current root render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoopbackWires {
    pub inputs: Vec<LoopbackWire>,
    pub outputs: Vec<LoopbackWire>,
    /// Stroke width; follows the zoom scale.
    pub stroke_width: f64,
}

impl LoopbackWires {
    /// Recompute every path for transform `t`.
    pub fn update(&mut self, t: &Transform) {
        for wire in self.inputs.iter_mut().chain(self.outputs.iter_mut()) {
            wire.update(t);
        }
        self.stroke_width = t.k;
    }

    fn group(wires: &[LoopbackWire], id: &str, stroke_width: f64) -> Element {
        let mut group = Element::group().id(id).class("wires");
        for wire in wires {
            group.children.push(
                Element::new("path")
                    .class("wire")
                    .attr("d", path_data(&wire.path))
                    .attr("stroke-width", fmt_num(stroke_width)),
            );
        }
        group
    }
}

// ─── View ────────────────────────────────────────────────────────────────────

/// A mounted circuit view.
pub struct CircuitView {
    ctx: RenderContext,
    state: Option<CircuitState>,
    cache: DefinitionCache,
    openness: OpennessStore,
    storage: Box<dyn OpennessStorage>,
    storage_key: String,
    viewport: Viewport,
    root: Option<Instance>,
    /// Top-left of the centred root instance inside the root group.
    root_offset: Point,
    loopback: Rc<RefCell<LoopbackWires>>,
}

impl CircuitView {
    /// Load the persisted open set, wire the viewport to the loopback wires
    /// and render `state` (if any).
    pub fn mount(
        state: Option<CircuitState>,
        storage: Box<dyn OpennessStorage>,
        storage_key: &str,
        ctx: RenderContext,
    ) -> Result<Self> {
        let openness = OpennessStore::load_from(storage.as_ref(), storage_key)?;
        debug!("mounted with {} open ids", openness.len());

        let mut viewport = Viewport::new(&ctx.config);
        let loopback = Rc::new(RefCell::new(LoopbackWires::default()));
        let listener_wires = Rc::clone(&loopback);
        viewport.on_zoom(move |t| listener_wires.borrow_mut().update(t));

        let mut view = Self {
            ctx,
            state: None,
            cache: DefinitionCache::default(),
            openness,
            storage,
            storage_key: storage_key.to_string(),
            viewport,
            root: None,
            root_offset: Point::default(),
            loopback,
        };
        if let Some(state) = state {
            view.load(state)?;
        }
        Ok(view)
    }

    /// Replace the circuit: full teardown and rebuild. The pruned open set
    /// is written to storage before the new circuit is committed. On error
    /// the previous circuit stays mounted.
    pub fn load(&mut self, state: CircuitState) -> Result<()> {
        let cache = DefinitionCache::build(&state, &self.ctx)?;
        let mut openness = self.openness.clone();
        openness.prune(&state);
        let root = self.build_root(&state, &cache, &openness)?;
        openness.flush(self.storage.as_mut(), &self.storage_key)?;

        info!(
            "loaded circuit: root {}, {} definitions, {} instances",
            state.root_component,
            cache.len(),
            root.count()
        );
        self.cache = cache;
        self.openness = openness;
        self.state = Some(state);
        self.commit_root(root);
        Ok(())
    }

    /// Drop the circuit and show the empty placeholder.
    pub fn clear(&mut self) {
        self.state = None;
        self.cache = DefinitionCache::default();
        self.root = None;
        *self.loopback.borrow_mut() = LoopbackWires::default();
    }

    // ── Openness ──────────────────────────────────────────────────────────

    /// Flip one chip occurrence; returns whether it is open afterwards.
    pub fn toggle(&mut self, path_id: &str) -> Result<bool> {
        let mut next = self.openness.clone();
        let open = next.toggle(path_id);
        self.apply_openness(next)?;
        Ok(open)
    }

    pub fn open(&mut self, path_id: &str) -> Result<()> {
        let mut next = self.openness.clone();
        if next.open(path_id) {
            self.apply_openness(next)?;
        }
        Ok(())
    }

    pub fn close(&mut self, path_id: &str) -> Result<()> {
        let mut next = self.openness.clone();
        if next.close(path_id) {
            self.apply_openness(next)?;
        }
        Ok(())
    }

    /// Toggle the deepest chip under a screen point. Returns the toggled
    /// path-id, or `None` if the click missed every chip.
    pub fn click_at(&mut self, screen: Point) -> Result<Option<String>> {
        let Some(root) = &self.root else {
            return Ok(None);
        };
        let world = self.viewport.transform().invert(screen);
        let local = Point::new(world.x - self.root_offset.x, world.y - self.root_offset.y);
        let Some(target) = root.toggle_target(local).map(str::to_string) else {
            return Ok(None);
        };
        self.toggle(&target)?;
        Ok(Some(target))
    }

    fn apply_openness(&mut self, next: OpennessStore) -> Result<()> {
        if let Some(state) = &self.state {
            let root = self.build_root(state, &self.cache, &next)?;
            self.openness = next;
            self.commit_root(root);
        } else {
            self.openness = next;
        }
        Ok(())
    }

    // ── Viewport ──────────────────────────────────────────────────────────

    pub fn drag(&mut self, dx: f64, dy: f64) {
        self.viewport.drag(dx, dy);
    }

    pub fn wheel(&mut self, delta: f64, pointer: Point) {
        self.viewport.wheel(delta, pointer);
    }

    pub fn pinch(&mut self, factor: f64, centre: Point) {
        self.viewport.pinch(factor, centre);
    }

    pub fn zoom_to(&mut self, k: f64, anchor: Point) {
        self.viewport.zoom_to(k, anchor);
    }

    pub fn set_transform(&mut self, t: Transform) {
        self.viewport.set_transform(t);
    }

    pub fn reset_zoom(&mut self) {
        self.viewport.reset();
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn transform(&self) -> Transform {
        self.viewport.transform()
    }

    pub fn openness(&self) -> &OpennessStore {
        &self.openness
    }

    pub fn state(&self) -> Option<&CircuitState> {
        self.state.as_ref()
    }

    pub fn definitions(&self) -> &DefinitionCache {
        &self.cache
    }

    pub fn root(&self) -> Option<&Instance> {
        self.root.as_ref()
    }

    pub fn root_offset(&self) -> Point {
        self.root_offset
    }

    pub fn storage(&self) -> &dyn OpennessStorage {
        self.storage.as_ref()
    }

    pub fn loopback_wires(&self) -> Ref<'_, LoopbackWires> {
        self.loopback.borrow()
    }

    // ── Root render ───────────────────────────────────────────────────────

    fn build_root(
        &self,
        state: &CircuitState,
        cache: &DefinitionCache,
        openness: &OpennessStore,
    ) -> Result<Instance> {
        let presentation = if state
            .component(state.root_component)
            .is_some_and(|c| c.is_chip())
        {
            Presentation::Open
        } else {
            Presentation::Closed
        };
        Instance::build(
            cache,
            state,
            openness,
            &self.ctx.config.display.graphics,
            state.root_component,
            presentation,
            "",
        )
    }

    /// Swap in a new root instance, rebuild the loopback wires for it and
    /// reapply the current transform.
    fn commit_root(&mut self, root: Instance) {
        let (width, height) = self.viewport.size();
        self.root_offset = Point::new(
            (width - root.size.width) / 2.0,
            (height - root.size.height) / 2.0,
        );

        let mut wires = LoopbackWires::default();
        for (side, edge_x) in [(PinSide::Input, 0.0), (PinSide::Output, width)] {
            let root_pins = root.pin_positions(side);
            let n = root_pins.len();
            let list: Vec<LoopbackWire> = root_pins
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let edge = Point::new(edge_x, open_pin_y(i, n, 0.0, height) + LOOPBACK_PADDING);
                    let root_pin = Point::new(p.x + self.root_offset.x, p.y + self.root_offset.y);
                    LoopbackWire::new(edge, root_pin)
                })
                .collect();
            match side {
                PinSide::Input => wires.inputs = list,
                PinSide::Output => wires.outputs = list,
            }
        }
        *self.loopback.borrow_mut() = wires;
        self.root = Some(root);
        self.viewport.notify();
    }

    // ── Output ────────────────────────────────────────────────────────────

    fn root_group(&self) -> Result<Element> {
        let mut group = Element::group()
            .id("root-component")
            .attr("transform", self.viewport.transform());
        let Some(root) = &self.root else {
            return Ok(group);
        };
        let mut el = root.render(&self.cache)?;
        el.set_attr(
            "transform",
            Transform::translation(self.root_offset.x, self.root_offset.y),
        );
        if let Some(body) = el.child_by_class_mut("body") {
            body.set_attr("fill", "rgba(0,0,0,0)");
        }
        el.remove_children_by_class("input-pins");
        el.remove_children_by_class("output-pins");
        group.children.push(el);
        Ok(group)
    }

    fn view_box_group(&self) -> Element {
        let mut group = Element::group().id("view-box");
        let Some(root) = &self.root else {
            return group;
        };
        let (width, height) = self.viewport.size();
        for (side, edge_x) in [(PinSide::Input, 0.0), (PinSide::Output, width)] {
            let n = match side {
                PinSide::Input => root.n_inputs,
                PinSide::Output => root.n_outputs,
            };
            let mut pins = Element::group().class(&format!("{}-pins", side.as_str()));
            for i in 0..n {
                let y = open_pin_y(i, n, 0.0, height);
                pins.children.push(
                    viewbox_pin(i, side).attr("transform", Transform::translation(edge_x, y)),
                );
            }
            group.children.push(pins);
        }
        let wires = self.loopback.borrow();
        group.children.push(LoopbackWires::group(
            &wires.inputs,
            "input-to-input-wires",
            wires.stroke_width,
        ));
        group.children.push(LoopbackWires::group(
            &wires.outputs,
            "output-to-output-wires",
            wires.stroke_width,
        ));
        group
    }

    /// The whole view as an SVG document.
    pub fn render_svg(&self) -> Result<String> {
        let (width, height) = self.viewport.size();
        if self.state.is_none() {
            let placeholder = Element::new("text")
                .class("empty")
                .attr("x", fmt_num(width / 2.0))
                .attr("y", fmt_num(height / 2.0))
                .text(EMPTY_MESSAGE);
            return Ok(render_document(
                "circuit",
                width,
                height,
                &[
                    Element::new("defs").id("component-definitions"),
                    Element::group().id("root-component"),
                    Element::group().id("view-box").child(placeholder),
                ],
            ));
        }
        Ok(render_document(
            "circuit",
            width,
            height,
            &[
                self.cache.defs_element(),
                self.root_group()?,
                self.view_box_group(),
            ],
        ))
    }

    // ── Teardown ──────────────────────────────────────────────────────────

    /// Write the open set back to storage.
    pub fn flush(&mut self) -> Result<()> {
        self.openness
            .flush(self.storage.as_mut(), &self.storage_key)?;
        Ok(())
    }

    /// Flush and hand the storage backend back.
    pub fn unmount(mut self) -> Result<Box<dyn OpennessStorage>> {
        self.flush()?;
        debug!("unmounted, saved {} open ids", self.openness.len());
        Ok(self.storage)
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_view.rs"]
mod tests;
