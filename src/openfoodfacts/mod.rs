//! Open Food Facts product lookups.
//!
//! The upstream JSON is loose; [`decode::decode_product`] is the only place
//! that looks at its shape. The rest of the crate sees [`Product`].

mod client;
pub mod decode;

pub use client::{OpenFoodFactsClient, ProductSource};
pub use decode::{decode_product, Product};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("invalid barcode: {0}")]
    InvalidBarcode(String),
    #[error("product not found")]
    NotFound,
    #[error("unparseable product response: {0}")]
    Unparseable(String),
    #[error("product lookup failed: {0}")]
    Transport(String),
    #[error("product service returned status {0}")]
    Upstream(u16),
}

/// EAN-8, UPC-A, EAN-13 and GTIN-14 are all 8 to 14 ASCII digits.
pub fn validate_barcode(raw: &str) -> Result<&str, LookupError> {
    let code = raw.trim();
    if (8..=14).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(code)
    } else {
        Err(LookupError::InvalidBarcode(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_barcode_lengths() {
        assert_eq!(validate_barcode("3017620422003"), Ok("3017620422003"));
        assert_eq!(validate_barcode(" 96385074 "), Ok("96385074"));
    }

    #[test]
    fn rejects_bad_barcodes() {
        for raw in ["", "1234567", "123456789012345", "30176204220a3", "../etc"] {
            assert!(matches!(
                validate_barcode(raw),
                Err(LookupError::InvalidBarcode(_))
            ));
        }
    }
}
