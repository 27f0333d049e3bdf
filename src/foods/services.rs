use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use super::scan_guard::{ScanGuard, ScanTicket};
use crate::error::AppError;
use crate::openfoodfacts::{validate_barcode, Product, ProductSource};

/// Fetches a product for `raw_barcode` while holding the user's scan slot.
///
/// On success the ticket is handed back so the caller can settle it once the
/// product is stored. Lookup failures reset the slot before returning.
pub async fn lookup_barcode(
    source: &dyn ProductSource,
    guard: &Arc<ScanGuard>,
    user_id: Uuid,
    raw_barcode: &str,
) -> Result<(Product, ScanTicket), AppError> {
    let barcode = validate_barcode(raw_barcode)?;
    let ticket = guard.begin(user_id)?;

    match source.fetch_product(barcode).await {
        Ok(product) => {
            info!(%user_id, %barcode, name = %product.name, "product found");
            Ok((product, ticket))
        }
        Err(e) => {
            warn!(%user_id, %barcode, error = %e, "product lookup failed");
            ticket.reset();
            Err(e.into())
        }
    }
}
