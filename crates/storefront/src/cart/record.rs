//! Persisted cart record codec.
//!
//! The record is a JSON envelope holding only the line items:
//!
//! ```json
//! {"state":{"items":[...]},"version":0}
//! ```
//!
//! Transient UI state (whether the cart panel is open) is never written.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::item::CartItem;

/// Storage key the cart record lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "pinaka-cart-storage";

/// Schema version written into every record.
pub const RECORD_VERSION: u32 = 0;

/// Errors encoding or decoding a cart record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed cart record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cart record version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

#[derive(Serialize)]
struct RecordRef<'a> {
    state: StateRef<'a>,
    version: u32,
}

#[derive(Serialize)]
struct StateRef<'a> {
    items: &'a [CartItem],
}

#[derive(Deserialize)]
struct Record {
    state: State,
    #[serde(default)]
    version: u32,
}

#[derive(Deserialize)]
struct State {
    #[serde(default)]
    items: Vec<CartItem>,
}

/// Serialize line items into a record.
///
/// # Errors
///
/// Returns `RecordError::Json` if serialization fails.
pub fn encode(items: &[CartItem]) -> Result<Vec<u8>, RecordError> {
    let record = RecordRef {
        state: StateRef { items },
        version: RECORD_VERSION,
    };
    Ok(serde_json::to_vec(&record)?)
}

/// Deserialize line items from a record.
///
/// # Errors
///
/// Returns `RecordError` if the bytes are not a cart record or were written by
/// a newer schema version.
pub fn decode(bytes: &[u8]) -> Result<Vec<CartItem>, RecordError> {
    let record: Record = serde_json::from_slice(bytes)?;
    if record.version > RECORD_VERSION {
        return Err(RecordError::UnsupportedVersion {
            found: record.version,
            supported: RECORD_VERSION,
        });
    }
    Ok(record.state.items)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pinaka_core::{LineItemId, ProductId};
    use rust_decimal::Decimal;

    use super::*;

    fn item(id: &str, product: &str, price: &str) -> CartItem {
        CartItem {
            id: LineItemId::new(id),
            product_id: ProductId::new(product),
            name: format!("Product {product}"),
            price: price.parse().unwrap(),
            quantity: 2,
            image: None,
            sku: format!("SKU-{product}"),
            stock_quantity: 5,
        }
    }

    #[test]
    fn test_encode_layout() {
        let bytes = encode(&[item("l1", "p1", "100")]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["version"], 0);
        let line = &value["state"]["items"][0];
        assert_eq!(line["id"], "l1");
        assert_eq!(line["productId"], "p1");
        assert_eq!(line["stockQuantity"], 5);
        assert!(line.get("image").is_none());
        assert!(value["state"].get("isOpen").is_none());
    }

    #[test]
    fn test_decode_preserves_order_and_precision() {
        let items = vec![
            item("l1", "p1", "19.99"),
            item("l2", "p2", "0.10"),
            item("l3", "p3", "1250000"),
        ];
        let decoded = decode(&encode(&items).unwrap()).unwrap();
        assert_eq!(decoded, items);
    }

    #[test]
    fn test_decode_numeric_prices() {
        let json = r#"{"state":{"items":[{"id":"p1-1700000000000","productId":"p1","name":"Mug","price":150000,"quantity":3,"sku":"MUG","stockQuantity":12,"image":"/mug.png"}]},"version":0}"#;
        let decoded = decode(json.as_bytes()).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].price, Decimal::from(150_000));
        assert_eq!(decoded[0].quantity, 3);
        assert_eq!(decoded[0].image.as_deref(), Some("/mug.png"));
    }

    #[test]
    fn test_decode_missing_items_is_empty() {
        let decoded = decode(br#"{"state":{}}"#).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_decode_rejects_newer_version() {
        let err = decode(br#"{"state":{"items":[]},"version":3}"#).unwrap_err();
        assert!(matches!(
            err,
            RecordError::UnsupportedVersion {
                found: 3,
                supported: 0
            }
        ));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode(b"not json"), Err(RecordError::Json(_))));
    }
}
