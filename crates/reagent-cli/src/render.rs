//! Plain-text output for resolution trees, shopping lists, and method
//! comparisons.

use reagent_core::{MethodCost, ResultNode, ShoppingEntry, Silver, Summary};
use std::fmt::Write;

/// Whole silver with thousands separators, e.g. `12,345,600`.
pub fn format_silver(value: Silver) -> String {
    let whole: u64 = value.saturating_round().to_num();
    group_digits(whole)
}

fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// One line per node, indented by depth.
pub fn render_tree(root: &ResultNode) -> String {
    let mut out = String::new();
    for node in root.walk() {
        let indent = "  ".repeat(node.depth);
        let status = if node.is_complete { "ok" } else { "  " };
        let _ = write!(
            out,
            "{indent}[{status}] {} x{} (owned {}, missing {})",
            node.name, node.quantity_needed, node.quantity_owned, node.quantity_missing
        );
        match &node.recipe {
            Some(choice) => {
                if let Some(method) = &choice.method {
                    let _ = write!(out, " via {method}");
                }
            }
            None if node.quantity_missing > 0 => {
                let _ = write!(out, " {} @ {}", node.acquisition_method.as_str(), format_silver(node.unit_price));
            }
            None => {}
        }
        if node.total_cost > Silver::ZERO {
            let _ = write!(out, " = {}", format_silver(node.total_cost));
        }
        out.push('\n');
    }
    out
}

pub fn render_shopping_list(entries: &[ShoppingEntry]) -> String {
    if entries.is_empty() {
        return "Nothing left to acquire.\n".to_string();
    }
    let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    let mut out = String::from("Shopping list:\n");
    for entry in entries {
        let _ = writeln!(
            out,
            "  {:<width$}  {:>8}  {:>16}",
            entry.name,
            entry.quantity,
            format_silver(entry.cost)
        );
    }
    out
}

pub fn render_summary(summary: &Summary) -> String {
    let mut out = String::new();
    let Some(root) = &summary.root else {
        return "Unknown item.\n".to_string();
    };
    out.push_str(&render_tree(root));
    out.push('\n');
    out.push_str(&render_shopping_list(&summary.shopping_list()));
    let _ = writeln!(out, "\nTotal cost: {}", format_silver(summary.total_cost));
    if summary.saved_by_inventory > Silver::ZERO {
        let _ = writeln!(out, "Saved by inventory: {}", format_silver(summary.saved_by_inventory));
    }
    out
}

/// Methods cheapest first.
pub fn render_methods(costs: &[MethodCost]) -> String {
    if costs.is_empty() {
        return "No alternative crafting methods.\n".to_string();
    }
    let mut sorted: Vec<&MethodCost> = costs.iter().collect();
    sorted.sort_by(|a, b| a.total_cost.cmp(&b.total_cost));
    let mut out = String::new();
    for cost in sorted {
        let _ = writeln!(out, "{:<12} {:>16}", cost.method, format_silver(cost.total_cost));
    }
    out
}
