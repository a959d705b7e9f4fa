//! Component definitions: one laid-out render tree per
//! `(component id, presentation)`, built once per circuit load.
//!
//! Gates and closed chips are labelled boxes sized from their label and pin
//! counts. An open chip definition holds the interior laid out with every
//! subcomponent closed: positioned subcomponent slots, routed wire paths and
//! the chip's own boundary pin rows. Instances clone these trees instead of
//! rebuilding them.

use std::collections::BTreeMap;

use log::{debug, info};

use crate::circuit::{CircuitState, Component, ComponentId, ComponentKind, validate};
use crate::config::RenderContext;
use crate::error::{CircuitError, Result};
use crate::geometry::{Size, Transform, fmt_num, path_data};
use crate::layout::{InteriorLayout, SubcomponentSummary, layout_interior};
use crate::pins::{CLOSED_PIN_PITCH, PinSide, Presentation, render_pins};
use crate::scene::Element;

/// Horizontal and vertical padding inside a labelled box.
pub const GATE_PADDING: f64 = 5.0;

/// Opacity of an open chip's body, so the interior stays readable.
pub const OPEN_CHIP_FILL_OPACITY: f64 = 0.5;

// ─── Id attributes ───────────────────────────────────────────────────────────

/// `c-{id}[-open|-closed][-definition]`. Gates have no presentation part.
pub fn component_id_attr(
    id: ComponentId,
    presentation: Option<Presentation>,
    definition: bool,
) -> String {
    let mut attr = format!("c-{id}");
    if let Some(p) = presentation {
        attr.push('-');
        attr.push_str(p.as_str());
    }
    if definition {
        attr.push_str("-definition");
    }
    attr
}

pub fn wire_id_attr(connection: usize) -> String {
    format!("w-{connection}")
}

/// Path-id of subcomponent `idx` inside the occurrence named `prefix`
/// (empty for the root).
pub fn subcomponent_path_id(prefix: &str, idx: usize) -> String {
    if prefix.is_empty() {
        idx.to_string()
    } else {
        format!("{prefix}.{idx}")
    }
}

/// Inverse of [`subcomponent_path_id`]: the subcomponent indices from the
/// root outward. `None` if any part is not an index.
pub fn parse_path_id(path_id: &str) -> Option<Vec<usize>> {
    if path_id.is_empty() {
        return Some(Vec::new());
    }
    path_id.split('.').map(|part| part.parse().ok()).collect()
}

// ─── Definition ──────────────────────────────────────────────────────────────

/// Immutable, once-built representation of one component presentation.
#[derive(Debug, Clone)]
pub struct Definition {
    pub component: ComponentId,
    pub presentation: Presentation,
    pub is_chip: bool,
    pub element: Element,
    pub size: Size,
    pub n_inputs: usize,
    pub n_outputs: usize,
    /// All-closed interior layout; open chips only.
    pub interior: Option<InteriorLayout>,
}

impl Definition {
    pub fn id_attr(&self) -> String {
        component_id_attr(self.component, self.state_part(), true)
    }

    /// Id of a placed occurrence of this definition.
    pub fn instance_id_attr(&self) -> String {
        component_id_attr(self.component, self.state_part(), false)
    }

    fn state_part(&self) -> Option<Presentation> {
        self.is_chip.then_some(self.presentation)
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
}

// ─── Cache ───────────────────────────────────────────────────────────────────

/// Every definition of one circuit, keyed by `(id, presentation)`.
/// Gates are stored under `Presentation::Closed` only.
#[derive(Debug, Clone, Default)]
pub struct DefinitionCache {
    definitions: BTreeMap<(ComponentId, Presentation), Definition>,
}

impl DefinitionCache {
    /// Validate `state` and build every definition in ascending id order.
    pub fn build(state: &CircuitState, ctx: &RenderContext) -> Result<Self> {
        validate(state)?;

        let mut cache = Self::default();
        for (&id, component) in &state.component_registry {
            match &component.kind {
                ComponentKind::Gate(name) => {
                    let label = component.style.name.as_deref().unwrap_or(name.as_str());
                    let def = build_labelled(id, component, label, false, ctx);
                    cache.insert(def);
                }
                ComponentKind::Chip(_) => {
                    let fallback = format!("Chip{id}");
                    let label = component.style.name.as_deref().unwrap_or(fallback.as_str());
                    let closed = build_labelled(id, component, label, true, ctx);
                    cache.insert(closed);
                    let open = cache.build_open_chip(state, id, component, ctx)?;
                    cache.insert(open);
                }
            }
        }

        info!(
            "built {} definitions for {} components",
            cache.definitions.len(),
            state.component_registry.len()
        );
        Ok(cache)
    }

    fn insert(&mut self, def: Definition) {
        debug!(
            "defined {} ({} x {})",
            def.id_attr(),
            fmt_num(def.size.width),
            fmt_num(def.size.height)
        );
        self.definitions.insert((def.component, def.presentation), def);
    }

    pub fn get(&self, id: ComponentId, presentation: Presentation) -> Option<&Definition> {
        self.definitions.get(&(id, presentation))
    }

    /// Like [`get`](Self::get) but a missing entry is an error.
    pub fn definition(&self, id: ComponentId, presentation: Presentation) -> Result<&Definition> {
        self.get(id, presentation)
            .ok_or(CircuitError::MissingDefinition(id))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definitions in `(id, presentation)` order.
    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.values()
    }

    /// The `<defs id="component-definitions">` block.
    pub fn defs_element(&self) -> Element {
        let mut defs = Element::new("defs").id("component-definitions");
        defs.children = self.iter().map(|d| d.element.clone()).collect();
        defs
    }

    fn build_open_chip(
        &self,
        state: &CircuitState,
        id: ComponentId,
        chip: &Component,
        ctx: &RenderContext,
    ) -> Result<Definition> {
        let Some(interior) = chip.interior() else {
            return Err(CircuitError::MissingDefinition(id));
        };

        let mut summaries = Vec::with_capacity(interior.subcomponents.len());
        for &sub_id in &interior.subcomponents {
            let sub = self.definition(sub_id, Presentation::Closed)?;
            summaries.push(sub.summary());
        }

        let layout = layout_interior(
            &summaries,
            &interior.connections,
            chip.n_inputs,
            chip.n_outputs,
            &ctx.config.display.graphics,
        )
        .map_err(|source| CircuitError::Layout { chip: id, source })?;

        let color = ctx.component_color(chip.style.color.as_deref());
        let size = layout.size;
        let input_names: Vec<Option<&str>> =
            (0..chip.n_inputs).map(|i| chip.style.input_name(i)).collect();
        let output_names: Vec<Option<&str>> =
            (0..chip.n_outputs).map(|i| chip.style.output_name(i)).collect();

        let mut subcomponents = Element::group().class("subcomponents");
        for (idx, (&sub_id, position)) in interior
            .subcomponents
            .iter()
            .zip(&layout.positions)
            .enumerate()
        {
            let sub_is_chip = state.component(sub_id).is_some_and(Component::is_chip);
            subcomponents.children.push(
                Element::group()
                    .class("subcomponent")
                    .attr("data-subcomponent-idx", idx)
                    .attr("data-component", sub_id)
                    .attr("data-chip", sub_is_chip)
                    .attr("transform", Transform::translation(position.x, position.y)),
            );
        }

        let mut wires = Element::group().class("wires");
        for (idx, points) in layout.wires.iter().enumerate() {
            wires.children.push(
                Element::new("path")
                    .id(wire_id_attr(idx))
                    .class("wire")
                    .attr("d", path_data(points)),
            );
        }

        let element = Element::group()
            .id(component_id_attr(id, Some(Presentation::Open), true))
            .class("component chip open")
            .attr("data-width", fmt_num(size.width))
            .attr("data-height", fmt_num(size.height))
            .attr("data-n-inputs", chip.n_inputs)
            .attr("data-n-outputs", chip.n_outputs)
            .child(
                Element::new("rect")
                    .class("body")
                    .attr("x", 0)
                    .attr("y", 0)
                    .attr("width", fmt_num(size.width))
                    .attr("height", fmt_num(size.height))
                    .attr("fill", color)
                    .attr("fill-opacity", OPEN_CHIP_FILL_OPACITY),
            )
            .child(render_pins(
                PinSide::Input,
                Presentation::Open,
                &input_names,
                0.0,
                (0.0, size.height),
            ))
            .child(render_pins(
                PinSide::Output,
                Presentation::Open,
                &output_names,
                size.width,
                (0.0, size.height),
            ))
            .child(subcomponents)
            .child(wires);

        Ok(Definition {
            component: id,
            presentation: Presentation::Open,
            is_chip: true,
            element,
            size,
            n_inputs: chip.n_inputs,
            n_outputs: chip.n_outputs,
            interior: Some(layout),
        })
    }
}

// ─── Labelled boxes ──────────────────────────────────────────────────────────

/// Box size for a label: one uppercased word per line, wide enough for the
/// widest word and tall enough for every line and every pin.
pub fn labelled_box_size(
    words: &[String],
    n_inputs: usize,
    n_outputs: usize,
    ctx: &RenderContext,
) -> Size {
    let font_size = ctx.config.font_size;
    let text_width = words
        .iter()
        .map(|w| ctx.metrics.text_width(w, font_size))
        .fold(0.0, f64::max);
    let width = text_width + 2.0 * GATE_PADDING;
    let height = (font_size * words.len() as f64 + 2.0 * GATE_PADDING)
        .max(n_inputs as f64 * CLOSED_PIN_PITCH)
        .max(n_outputs as f64 * CLOSED_PIN_PITCH);
    Size::new(width, height)
}

pub fn label_words(label: &str) -> Vec<String> {
    label.to_uppercase().split_whitespace().map(str::to_string).collect()
}

/// Gate or closed-chip definition.
fn build_labelled(
    id: ComponentId,
    component: &Component,
    label: &str,
    is_chip: bool,
    ctx: &RenderContext,
) -> Definition {
    let words = label_words(label);
    let size = labelled_box_size(&words, component.n_inputs, component.n_outputs, ctx);
    let state_part = is_chip.then_some(Presentation::Closed);

    let input_names: Vec<Option<&str>> = (0..component.n_inputs)
        .map(|i| component.style.input_name(i))
        .collect();
    let output_names: Vec<Option<&str>> = (0..component.n_outputs)
        .map(|i| component.style.output_name(i))
        .collect();

    let font_size = ctx.config.font_size;
    let centre_x = size.width / 2.0;
    let mut text = Element::new("text")
        .class("label")
        .attr("x", fmt_num(centre_x))
        .attr("y", fmt_num(size.height / 2.0))
        .attr("font-size", fmt_num(font_size));
    let mid_line = (words.len() as f64 - 1.0) / 2.0;
    for (line, word) in words.iter().enumerate() {
        let y = size.height / 2.0 + (line as f64 - mid_line) * font_size;
        text.children.push(
            Element::new("tspan")
                .attr("x", fmt_num(centre_x))
                .attr("y", fmt_num(y))
                .text(word.as_str()),
        );
    }

    let class = if is_chip {
        "component chip closed"
    } else {
        "component gate"
    };
    let element = Element::group()
        .id(component_id_attr(id, state_part, true))
        .class(class)
        .attr("data-width", fmt_num(size.width))
        .attr("data-height", fmt_num(size.height))
        .attr("data-n-inputs", component.n_inputs)
        .attr("data-n-outputs", component.n_outputs)
        .child(render_pins(
            PinSide::Input,
            Presentation::Closed,
            &input_names,
            0.0,
            (0.0, size.height),
        ))
        .child(render_pins(
            PinSide::Output,
            Presentation::Closed,
            &output_names,
            size.width,
            (0.0, size.height),
        ))
        .child(
            Element::new("rect")
                .class("body")
                .attr("x", 0)
                .attr("y", 0)
                .attr("width", fmt_num(size.width))
                .attr("height", fmt_num(size.height))
                .attr("fill", ctx.component_color(component.style.color.as_deref())),
        )
        .child(text);

    Definition {
        component: id,
        presentation: Presentation::Closed,
        is_chip,
        element,
        size,
        n_inputs: component.n_inputs,
        n_outputs: component.n_outputs,
        interior: None,
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_definition.rs"]
mod tests;
