//! Quotation assembly from the live scene
//!
//! One line item per visible, known-category object in registry order. Items
//! are never sorted or merged.

use shared::{Quotation, QuotationExport, QuotationLineItem};

use crate::state::scene::{line_item_description, SceneState};

/// Line items for every quotable object
pub fn collect(scene: &SceneState) -> Vec<QuotationLineItem> {
    scene
        .objects()
        .filter(|o| o.visible && o.category.is_known())
        .map(|o| {
            let quantity = 1;
            let unit_price = scene.rates().price(o.category, &o.properties);
            QuotationLineItem {
                id: o.id.clone(),
                description: line_item_description(o),
                quantity,
                unit_price,
                amount: unit_price.saturating_mul(i64::from(quantity)),
            }
        })
        .collect()
}

/// Totals for a list of line items. The tax-inclusive total is a plain float
/// multiply of the subtotal. The subtotal saturates at `i64::MAX`.
pub fn assemble(items: Vec<QuotationLineItem>, tax_rate: f64) -> Quotation {
    let subtotal = items
        .iter()
        .fold(0i64, |acc, i| acc.saturating_add(i.amount));
    let tax = subtotal as f64 * tax_rate;
    let total = subtotal as f64 * (1.0 + tax_rate);
    Quotation {
        items,
        subtotal,
        tax,
        total,
    }
}

/// Collect and total the scene in one step
pub fn quote(scene: &SceneState, tax_rate: f64) -> Quotation {
    let quotation = assemble(collect(scene), tax_rate);
    tracing::debug!(
        items = quotation.items.len(),
        subtotal = quotation.subtotal,
        "quotation assembled"
    );
    quotation
}

/// Quotation plus the free-text fields the template renderer fills in
pub fn export(
    scene: &SceneState,
    tax_rate: f64,
    description: impl Into<String>,
    terms: impl Into<String>,
) -> QuotationExport {
    QuotationExport {
        quotation: quote(scene, tax_rate),
        description: description.into(),
        terms: terms.into(),
    }
}
