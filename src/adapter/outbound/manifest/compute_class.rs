//! GKE `ComputeClass` YAML rendering.

use std::fmt::Write;

use super::{cheapest, relative_cost, ManifestContext, PriorityEntry};
use crate::domain::money::format_usd;

/// Render a `ComputeClass` whose priorities follow `entries` in order.
#[must_use]
pub fn render_compute_class(context: &ManifestContext, entries: &[PriorityEntry]) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_compute_class(&mut out, context, entries);
    out
}

fn write_compute_class(
    out: &mut String,
    context: &ManifestContext,
    entries: &[PriorityEntry],
) -> std::fmt::Result {
    writeln!(out, "apiVersion: cloud.google.com/v1")?;
    writeln!(out, "kind: ComputeClass")?;
    writeln!(out, "metadata:")?;
    writeln!(out, "  name: {}", context.name)?;
    writeln!(out, "spec:")?;
    writeln!(out, "  description: {}", quote(&description(context)))?;
    writeln!(out, "  whenUnsatisfiable: ScaleUpAnyway")?;
    writeln!(out, "  nodePoolAutoCreation:")?;
    writeln!(out, "    enabled: true")?;

    if !context.node_labels.is_empty() {
        writeln!(out, "  nodePoolConfig:")?;
        writeln!(out, "    nodeLabels:")?;
        for (key, value) in &context.node_labels {
            writeln!(out, "      {key}: {}", quote(value))?;
        }
    }

    writeln!(out, "  priorities:")?;
    let cheapest = cheapest(entries);
    for entry in entries {
        writeln!(
            out,
            "  - machineFamily: {}  # {}/day ({}, {})",
            entry.family,
            format_usd(entry.total_daily_cost),
            entry.tier_label(),
            relative_cost(entry.total_daily_cost, cheapest)
        )?;
        writeln!(out, "    spot: {}", entry.spot)?;
    }
    Ok(())
}

fn description(context: &ManifestContext) -> String {
    let mut text = format!(
        "Cost-optimised {} for {} prioritising cheapest total cost ({}), interleaving spot and on-demand",
        context.architecture.label(),
        context.region,
        context.shape
    );
    if !context.categories.is_empty() {
        let names: Vec<&str> = context.categories.iter().map(|c| c.as_str()).collect();
        let _ = write!(text, ", categories: {}", names.join("+"));
    }
    if let Some(max) = context.max_daily_cost {
        let _ = write!(text, ", max ${max}/day");
    }
    text
}

/// Double-quoted YAML scalar.
fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
