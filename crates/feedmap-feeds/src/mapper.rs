//! Mapping from [`NormalizedRow`] to [`CanonicalProductUpdate`].

use feedmap_core::{CanonicalProductUpdate, NormalizedRow};

use crate::price::normalize_price;

/// Maps a row that carries both required fields into a catalog update.
///
/// Callers filter with [`NormalizedRow::has_required_fields`] first;
/// [`map_rows`] does that for a whole feed.
#[must_use]
pub fn map_row(row: &NormalizedRow) -> CanonicalProductUpdate {
    debug_assert!(row.has_required_fields(), "map_row called on {row:?}");
    CanonicalProductUpdate::new(
        row.product_id.as_deref().unwrap_or_default(),
        row.product_name.as_deref().unwrap_or_default(),
        normalize_price(row.list_price.as_ref()),
        normalize_price(row.sales_price.as_ref()),
    )
}

/// Result of mapping one feed's rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedRows {
    /// Updates in input order.
    pub updates: Vec<CanonicalProductUpdate>,
    /// Rows dropped for lacking a product id or name.
    pub skipped: usize,
}

/// Drops rows without a product id or name and maps the rest, keeping
/// input order.
#[must_use]
pub fn map_rows<I>(rows: I) -> MappedRows
where
    I: IntoIterator<Item = NormalizedRow>,
{
    let mut mapped = MappedRows::default();
    for (index, row) in rows.into_iter().enumerate() {
        if row.has_required_fields() {
            mapped.updates.push(map_row(&row));
        } else {
            tracing::debug!(
                index,
                product_id = ?row.product_id,
                "dropping feed row without product id or name"
            );
            mapped.skipped += 1;
        }
    }
    mapped
}
