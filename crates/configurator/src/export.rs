//! Quotation hand-off: JSON for the template renderer and a plain-text summary.

use std::path::Path;

use shared::QuotationExport;

use crate::state::scene::PersistenceError;

/// Pretty-printed quotation JSON
pub fn quotation_json(export: &QuotationExport) -> Result<String, PersistenceError> {
    serde_json::to_string_pretty(export).map_err(|e| PersistenceError::Serialize(e.to_string()))
}

/// Write the quotation JSON to `path`, creating parent directories
pub fn write_quotation(path: &Path, export: &QuotationExport) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| PersistenceError::Io(e.to_string()))?;
        }
    }
    let json = quotation_json(export)?;
    std::fs::write(path, json).map_err(|e| PersistenceError::Io(e.to_string()))?;
    tracing::info!("Quotation written to {}", path.display());
    Ok(())
}

/// Plain-text quotation: one row per line item, then subtotal, tax and total
pub fn render_text(export: &QuotationExport) -> String {
    let q = &export.quotation;
    let mut out = String::new();
    if !export.description.is_empty() {
        out.push_str(&export.description);
        out.push_str("\n\n");
    }
    for (i, item) in q.items.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {:<40} {:>4} × {:>10} = {:>12}\n",
            i + 1,
            item.description,
            item.quantity,
            item.unit_price,
            item.amount
        ));
    }
    out.push_str(&format!("{:>60} {:>12}\n", "Subtotal", q.subtotal));
    out.push_str(&format!("{:>60} {:>12.2}\n", "Tax", q.tax));
    out.push_str(&format!("{:>60} {:>12.2}\n", "Total", q.total));
    if !export.terms.is_empty() {
        out.push('\n');
        out.push_str(&export.terms);
        out.push('\n');
    }
    out
}
