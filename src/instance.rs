//! Instances: placed occurrences of cached definitions.
//!
//! An instance carries only what its definition cannot know: where it sits
//! in its parent, its path-id, and for an open chip the recursively built
//! interior. Geometry already in a definition is reused, never recomputed.

use crate::circuit::{CircuitState, ComponentId};
use crate::definition::{DefinitionCache, subcomponent_path_id};
use crate::config::Graphics;
use crate::error::{CircuitError, Result};
use crate::geometry::{Point, Rect, Size, Transform, fmt_num, path_data};
use crate::layout::{SubcomponentSummary, layout_interior};
use crate::openness::OpennessStore;
use crate::pins::{PinSide, Presentation, pin_positions, reposition_pins};
use crate::scene::Element;

#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub component: ComponentId,
    pub presentation: Presentation,
    pub is_chip: bool,
    /// Path-id of this occurrence; empty for the root.
    pub path_id: String,
    /// Top-left corner inside the parent interior.
    pub position: Point,
    pub size: Size,
    pub n_inputs: usize,
    pub n_outputs: usize,
    /// Interior occurrences, open chips only.
    pub children: Vec<Instance>,
    /// One point sequence per connection, open chips only.
    pub wires: Vec<Vec<Point>>,
}

impl Instance {
    /// Build the occurrence of `id` at `path_id`, recursing into open chips.
    pub fn build(
        cache: &DefinitionCache,
        state: &CircuitState,
        openness: &OpennessStore,
        graphics: &Graphics,
        id: ComponentId,
        presentation: Presentation,
        path_id: &str,
    ) -> Result<Self> {
        let def = cache.definition(id, presentation)?;
        let mut instance = Instance {
            component: id,
            presentation,
            is_chip: def.is_chip,
            path_id: path_id.to_string(),
            position: Point::default(),
            size: def.size,
            n_inputs: def.n_inputs,
            n_outputs: def.n_outputs,
            children: Vec::new(),
            wires: Vec::new(),
        };

        let (Some(interior), Some(stored)) = (
            state.component(id).and_then(|c| c.interior()),
            def.interior.as_ref(),
        ) else {
            return Ok(instance);
        };

        for (idx, &sub_id) in interior.subcomponents.iter().enumerate() {
            let sub_path = subcomponent_path_id(path_id, idx);
            let sub_is_chip = state
                .component(sub_id)
                .ok_or(CircuitError::UnknownComponent {
                    chip: id,
                    missing: sub_id,
                })?
                .is_chip();
            let sub_presentation = if sub_is_chip && openness.is_open(&sub_path) {
                Presentation::Open
            } else {
                Presentation::Closed
            };
            instance.children.push(Self::build(
                cache,
                state,
                openness,
                graphics,
                sub_id,
                sub_presentation,
                &sub_path,
            )?);
        }

        if instance.children.iter().all(|c| c.presentation == Presentation::Closed) {
            // Same inputs as the definition's layout.
            for (child, p) in instance.children.iter_mut().zip(&stored.positions) {
                child.position = *p;
            }
            instance.wires = stored.wires.clone();
            return Ok(instance);
        }

        let summaries: Vec<SubcomponentSummary> =
            instance.children.iter().map(Instance::summary).collect();
        let layout = layout_interior(
            &summaries,
            &interior.connections,
            instance.n_inputs,
            instance.n_outputs,
            graphics,
        )
        .map_err(|source| CircuitError::Layout { chip: id, source })?;
        for (child, p) in instance.children.iter_mut().zip(&layout.positions) {
            child.position = *p;
        }
        instance.size = layout.size;
        instance.wires = layout.wires;
        Ok(instance)
    }

    pub fn summary(&self) -> SubcomponentSummary {
        SubcomponentSummary {
            width: self.size.width,
            height: self.size.height,
            n_inputs: self.n_inputs,
            n_outputs: self.n_outputs,
            is_open: self.presentation == Presentation::Open,
        }
    }

    pub fn id_attr(&self) -> String {
        crate::definition::component_id_attr(
            self.component,
            self.is_chip.then_some(self.presentation),
            false,
        )
    }

    /// Pin centres along one edge, relative to this instance's top-left.
    pub fn pin_positions(&self, side: PinSide) -> Vec<Point> {
        let (n, x) = match side {
            PinSide::Input => (self.n_inputs, 0.0),
            PinSide::Output => (self.n_outputs, self.size.width),
        };
        pin_positions(self.presentation, n, x, 0.0, self.size.height)
    }

    /// Number of instances in this subtree.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Instance::count).sum::<usize>()
    }

    /// Deepest chip occurrence under `p` (local coordinates), as a path-id.
    pub fn toggle_target(&self, p: Point) -> Option<&str> {
        for child in &self.children {
            let local = Point::new(p.x - child.position.x, p.y - child.position.y);
            if !Rect::new(Point::default(), child.size).contains_point(local) {
                continue;
            }
            if let Some(deeper) = child.toggle_target(local) {
                return Some(deeper);
            }
            return child.is_chip.then_some(child.path_id.as_str());
        }
        None
    }

    // ── Rendering ─────────────────────────────────────────────────────────

    /// Clone the definition's tree and fill in this occurrence's geometry.
    pub fn render(&self, cache: &DefinitionCache) -> Result<Element> {
        let def = cache.definition(self.component, self.presentation)?;
        let mut el = def.element.clone();
        el.set_attr("id", self.id_attr());
        if self.children.is_empty() && self.wires.is_empty() {
            return Ok(el);
        }

        el.set_attr("data-width", fmt_num(self.size.width));
        el.set_attr("data-height", fmt_num(self.size.height));
        if let Some(body) = el.child_by_class_mut("body") {
            body.set_attr("width", fmt_num(self.size.width));
            body.set_attr("height", fmt_num(self.size.height));
        }
        for side in [PinSide::Input, PinSide::Output] {
            let positions = self.pin_positions(side);
            if let Some(row) = el.child_by_class_mut(&format!("{}-pins", side.as_str())) {
                reposition_pins(row, &positions);
            }
        }

        if let Some(slots) = el.child_by_class_mut("subcomponents") {
            for (slot, child) in slots.children.iter_mut().zip(&self.children) {
                slot.set_attr("id", &child.path_id);
                slot.set_attr(
                    "transform",
                    Transform::translation(child.position.x, child.position.y),
                );
                if child.is_chip {
                    slot.set_attr("class", "subcomponent toggle");
                    slot.set_attr("data-toggle", &child.path_id);
                }
                slot.children = vec![child.render(cache)?];
            }
        }
        if let Some(wires) = el.child_by_class_mut("wires") {
            for (path, points) in wires.children.iter_mut().zip(&self.wires) {
                path.set_attr("d", path_data(points));
            }
        }
        Ok(el)
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_instance.rs"]
mod tests;
