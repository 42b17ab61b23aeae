//! Descriptions of the screen elements generated for a workflow.
//!
//! Nothing here draws anything. A [`Renderer`] turns the descriptions into
//! whatever the front end uses.

use serde::Serialize;

use crate::widgets::{CompoundWidget, WidgetSpec};

/// Suffix of the address given to a field's label.
pub const LABEL_SUFFIX: &str = "label";
/// Suffix of the address given to a field's input widget.
pub const WIDGET_SUFFIX: &str = "widget";

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum Element {
    Label { id: String, text: String },
    Widget { id: String, spec: WidgetSpec },
    Compound { id: String, widget: CompoundWidget },
    Container { id: String, children: Vec<Element> },
}

impl Element {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Element::Label { id, .. }
            | Element::Widget { id, .. }
            | Element::Compound { id, .. }
            | Element::Container { id, .. } => id,
        }
    }

    /// Hands this element to `renderer`.
    pub fn render<R: Renderer>(&self, renderer: &mut R) -> R::Output {
        match self {
            Element::Label { id, text } => renderer.label(id, text),
            Element::Widget { id, spec } => renderer.widget(id, spec),
            Element::Compound { id, widget } => renderer.compound(id, widget),
            Element::Container { id, children } => renderer.container(id, children),
        }
    }
}

/// A front end able to draw element descriptions.
///
/// Containers receive their children undrawn so the renderer controls the
/// order and nesting; call [`Element::render`] on each child to recurse.
pub trait Renderer {
    type Output;

    fn label(&mut self, id: &str, text: &str) -> Self::Output;
    fn widget(&mut self, id: &str, spec: &WidgetSpec) -> Self::Output;
    fn compound(&mut self, id: &str, widget: &CompoundWidget) -> Self::Output;
    fn container(&mut self, id: &str, children: &[Element]) -> Self::Output;
}
