//! Incoming transaction model

use serde::Deserialize;
use serde_json::json;

use super::record::{bins, Bins};
use crate::store::RecordKey;

/// Transaction as posted by a caller.
///
/// Absent fields take their zero value. Keys match the canonical name or its
/// lowercase, camelCase and snake_case spellings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct IncomingTransaction {
    #[serde(rename = "Timestamp", alias = "timestamp", alias = "TIMESTAMP")]
    pub timestamp: String,
    #[serde(rename = "Amount", alias = "amount", alias = "AMOUNT")]
    pub amount: f64,
    #[serde(rename = "UserID", alias = "userid", alias = "userId", alias = "UserId", alias = "user_id", alias = "USERID")]
    pub user_id: String,
    #[serde(rename = "CCNumHash", alias = "ccnumhash", alias = "ccNumHash", alias = "CcNumHash", alias = "cc_num_hash", alias = "CCNUMHASH")]
    pub cc_num_hash: String,
    #[serde(rename = "SellerID", alias = "sellerid", alias = "sellerId", alias = "SellerId", alias = "seller_id", alias = "SELLERID")]
    pub seller_id: i64,
    #[serde(rename = "ItemID", alias = "itemid", alias = "itemId", alias = "ItemId", alias = "item_id", alias = "ITEMID")]
    pub item_id: i64,
}

impl IncomingTransaction {
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Key the raw transaction is written under
    pub fn seller_key(&self) -> RecordKey {
        RecordKey::Int(self.seller_id)
    }

    /// Key the user's feature record is read from
    pub fn user_key(&self) -> RecordKey {
        RecordKey::Str(self.user_id.clone())
    }

    /// Subset of fields persisted for the transaction
    pub fn to_bins(&self, set_name: &str) -> Bins {
        let mut out = Bins::new();
        out.insert(bins::USER_ID.to_string(), json!(self.user_id));
        out.insert(bins::SET_NAME.to_string(), json!(set_name));
        out.insert(bins::AMOUNT.to_string(), json!(self.amount));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "Timestamp": "2019-05-01T10:00:00Z",
        "Amount": 100.5,
        "UserID": "u1",
        "CCNumHash": "abc123",
        "SellerID": 42,
        "ItemID": 7
    }"#;

    #[test]
    fn test_decode_wire_names() {
        let txn = IncomingTransaction::from_slice(BODY.as_bytes()).unwrap();
        assert_eq!(txn.user_id, "u1");
        assert_eq!(txn.seller_id, 42);
        assert_eq!(txn.item_id, 7);
        assert_eq!(txn.amount, 100.5);
    }

    #[test]
    fn test_decode_missing_fields_take_zero_value() {
        let body = r#"{"UserID": "u1", "Amount": 100, "SellerID": 42}"#;
        let txn = IncomingTransaction::from_slice(body.as_bytes()).unwrap();

        assert_eq!(txn.user_id, "u1");
        assert_eq!(txn.amount, 100.0);
        assert_eq!(txn.seller_id, 42);
        assert_eq!(txn.timestamp, "");
        assert_eq!(txn.cc_num_hash, "");
        assert_eq!(txn.item_id, 0);

        let empty = IncomingTransaction::from_slice(b"{}").unwrap();
        assert_eq!(empty, IncomingTransaction::default());
    }

    #[test]
    fn test_decode_case_variants() {
        let body = r#"{
            "timestamp": "t",
            "amount": 3.5,
            "userid": "u1",
            "ccNumHash": "abc",
            "seller_id": 42,
            "ItemId": 7
        }"#;
        let txn = IncomingTransaction::from_slice(body.as_bytes()).unwrap();

        assert_eq!(txn.timestamp, "t");
        assert_eq!(txn.amount, 3.5);
        assert_eq!(txn.user_id, "u1");
        assert_eq!(txn.cc_num_hash, "abc");
        assert_eq!(txn.seller_id, 42);
        assert_eq!(txn.item_id, 7);
    }

    #[test]
    fn test_decode_rejects_non_object() {
        for body in ["not json", "", "[]", "42"] {
            assert!(IncomingTransaction::from_slice(body.as_bytes()).is_err(), "{}", body);
        }
    }

    #[test]
    fn test_decode_rejects_wrong_type() {
        let body = BODY.replace("\"SellerID\": 42", "\"SellerID\": \"forty-two\"");
        assert!(IncomingTransaction::from_slice(body.as_bytes()).is_err());
    }

    #[test]
    fn test_persisted_subset() {
        let txn = IncomingTransaction::from_slice(BODY.as_bytes()).unwrap();
        let out = txn.to_bins("creditcard");

        assert_eq!(out.len(), 3);
        assert_eq!(out.get("UserID"), Some(&json!("u1")));
        assert_eq!(out.get("set_name"), Some(&json!("creditcard")));
        assert_eq!(out.get("AmountBin"), Some(&json!(100.5)));
    }

    #[test]
    fn test_write_and_read_keys_use_different_dimensions() {
        let txn = IncomingTransaction::from_slice(BODY.as_bytes()).unwrap();
        assert_eq!(txn.seller_key(), RecordKey::Int(42));
        assert_eq!(txn.user_key(), RecordKey::Str("u1".to_string()));
    }
}
