//! Terminal preview of a workflow's form.
//!
//! Every field is printed on its own line as `name: widget`, with the element
//! id dimmed at the end so the generated addresses can be checked.

use std::io::Write;

use crossterm::queue;
use crossterm::style::Color::{DarkCyan, DarkGreen, DarkGrey, Reset, Yellow};
use crossterm::style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use itertools::Itertools;
use serde_yaml::Value;

use argui_core::element::{Element, Renderer};
use argui_core::error::Result;
use argui_core::model::{Workflow, OPTIONS_PARAMETER};
use argui_core::registry::Registry;
use argui_core::widgets::{CompoundWidget, WidgetSpec};

const INDENT: &str = "  ";

/// Draws elements as coloured lines of text.
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn print_id(&mut self, id: &str) -> Result<()> {
        queue!(
            self.out,
            SetForegroundColor(DarkGrey),
            Print(format!("  [{id}]")),
            SetForegroundColor(Reset),
        )?;
        Ok(())
    }
}

fn option_label(option: &Value) -> String {
    match option {
        Value::Sequence(pair) => pair.first().map_or_else(String::new, yaml_text),
        other => yaml_text(other),
    }
}

fn yaml_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        other => serde_yaml::to_string(other)
            .map(|text| text.trim_end().to_string())
            .unwrap_or_default(),
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    type Output = Result<()>;

    fn label(&mut self, _id: &str, text: &str) -> Result<()> {
        queue!(
            self.out,
            Print(INDENT),
            SetAttribute(Attribute::Bold),
            Print(text),
            SetAttribute(Attribute::Reset),
            Print(": "),
        )?;
        Ok(())
    }

    fn widget(&mut self, id: &str, spec: &WidgetSpec) -> Result<()> {
        queue!(self.out, SetForegroundColor(DarkGreen), Print(spec))?;

        if let Some(Value::Sequence(options)) = spec.parameters.get(OPTIONS_PARAMETER) {
            let options = options.iter().map(option_label).join(" | ");
            queue!(self.out, Print(format!(" {{{options}}}")))?;
        }

        queue!(self.out, SetForegroundColor(Reset))?;
        self.print_id(id)
    }

    fn compound(&mut self, id: &str, widget: &CompoundWidget) -> Result<()> {
        let hint = widget.hint.as_deref().unwrap_or("compound");
        queue!(
            self.out,
            SetForegroundColor(Yellow),
            Print(format!("<{hint}>")),
            SetForegroundColor(Reset),
        )?;
        self.print_id(id)
    }

    fn container(&mut self, _id: &str, children: &[Element]) -> Result<()> {
        for child in children {
            child.render(self)?;
        }
        queue!(self.out, Print("\n"))?;
        Ok(())
    }
}

/// Prints the form of `workflow`, headed by its title and the command path
/// it was reached through.
///
/// # Errors
///
/// Returns errors from building the elements, and IO errors from writing.
pub fn print_workflow<W: Write>(
    out: W,
    path: Option<&str>,
    workflow: &Workflow,
    registry: &Registry,
) -> Result<W> {
    let elements = workflow.build_elements(registry)?;
    let mut renderer = TerminalRenderer::new(out);

    let header = match path {
        Some(path) => format!(" {workflow} ({path}) "),
        None => format!(" {workflow} "),
    };
    queue!(
        renderer.out,
        SetBackgroundColor(DarkGreen),
        Print(header),
        SetBackgroundColor(Reset),
        Print("\n"),
    )?;

    for (field, element) in workflow.fields().iter().zip(&elements) {
        element.render(&mut renderer)?;

        if let Some(help) = &field.help {
            queue!(
                renderer.out,
                Print(INDENT),
                Print(INDENT),
                SetForegroundColor(DarkGrey),
                Print(help),
                SetForegroundColor(Reset),
                Print("\n"),
            )?;
        }
    }

    if !workflow.subworkflows().is_empty() {
        let tokens = workflow.subworkflows().keys().join(", ");
        queue!(
            renderer.out,
            SetForegroundColor(DarkCyan),
            Print(format!("{INDENT}Sub-commands: {tokens}\n")),
            SetForegroundColor(Reset),
        )?;
    }

    if let Some(epilog) = &workflow.epilog {
        queue!(renderer.out, Print(format!("{epilog}\n")))?;
    }

    let mut out = renderer.into_inner();
    out.flush()?;
    Ok(out)
}
