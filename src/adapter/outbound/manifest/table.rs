//! Cost table rendering.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{cheapest, comparison, PriorityEntry};
use crate::domain::money::format_usd;

#[derive(Tabled)]
struct PriorityRow {
    #[tabled(rename = "Family")]
    family: String,
    #[tabled(rename = "Type")]
    tier: &'static str,
    #[tabled(rename = "Daily Cost")]
    daily_cost: String,
    #[tabled(rename = "Comparison")]
    comparison: String,
}

/// Render entries as a table, cheapest first.
#[must_use]
pub fn render_table(entries: &[PriorityEntry]) -> String {
    let cheapest = cheapest(entries);
    let rows = entries.iter().map(|entry| PriorityRow {
        family: entry.family.clone(),
        tier: entry.tier_label(),
        daily_cost: format_usd(entry.total_daily_cost),
        comparison: comparison(entry.total_daily_cost, cheapest),
    });

    let mut table = Table::new(rows);
    table.with(Style::markdown());
    let mut out = table.to_string();
    out.push('\n');
    out
}
