//! In-memory SVG element tree: the rendering surface.
//!
//! Definitions, instances and the viewport all build `Element`s; ids follow
//! the stable addressing scheme (`c-3-open`, `input-0`, `w-2`, …) so external
//! tooling can look elements up without re-walking the circuit.

/// One SVG element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: Option<String>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    pub fn group() -> Self {
        Self::new("g")
    }

    // ── Builders ──────────────────────────────────────────────────────────

    pub fn attr(mut self, name: &str, value: impl ToString) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn id(self, id: impl ToString) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    // ── Attributes ────────────────────────────────────────────────────────

    pub fn set_attr(&mut self, name: &str, value: impl ToString) {
        let value = value.to_string();
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn element_id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|c| c.split_whitespace().any(|part| part == class))
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Depth-first search for the first element with this id.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.element_id() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_id(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.element_id() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_by_id_mut(id))
    }

    /// Follow a chain of ids, each searched inside the previous match.
    /// Pin and wire ids are only unique within their component, so scoped
    /// lookups go through here.
    pub fn find_scoped(&self, ids: &[&str]) -> Option<&Element> {
        ids.iter().try_fold(self, |el, id| el.find_by_id(id))
    }

    pub fn child_by_class(&self, class: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.has_class(class))
    }

    pub fn child_by_class_mut(&mut self, class: &str) -> Option<&mut Element> {
        self.children.iter_mut().find(|c| c.has_class(class))
    }

    pub fn remove_children_by_class(&mut self, class: &str) {
        self.children.retain(|c| !c.has_class(class));
    }

    /// Total number of elements in this subtree (including self).
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Element::count).sum::<usize>()
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_scene.rs"]
mod tests;
