use serde::{Deserialize, Serialize};

/// One sale row as stored in the `sales_data` table.
///
/// Every field has a neutral default: missing text is an empty string and
/// missing amounts are `0.0`, so a source object is never rejected just for
/// lacking keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// "Receipt number"
    #[serde(rename = "receiptNumber")]
    pub receipt_number: String,

    /// Raw "Receipt Date" value, kept exactly as the API sent it
    #[serde(rename = "saleDate")]
    pub sale_date: String,

    #[serde(rename = "transactionTime")]
    pub transaction_time: String,

    /// "Invoice amount"
    #[serde(rename = "saleAmount")]
    pub sale_amount: f64,

    #[serde(rename = "taxAmount")]
    pub tax_amount: f64,

    #[serde(rename = "discountAmount")]
    pub discount_amount: f64,

    /// Explicit round-off from the API, or derived from the other amounts
    #[serde(rename = "roundOff")]
    pub round_off: f64,

    /// "Net sale"
    #[serde(rename = "netSale")]
    pub net_sale: f64,

    #[serde(rename = "paymentMode")]
    pub payment_mode: String,

    #[serde(rename = "orderType")]
    pub order_type: String,

    /// SALE / RETURN etc.
    #[serde(rename = "transactionStatus")]
    pub transaction_status: String,
}

impl SalesRecord {
    /// Amount fields in column order, used to validate a record before insert
    pub fn amounts(&self) -> [(&'static str, f64); 5] {
        [
            ("sale_amount", self.sale_amount),
            ("tax_amount", self.tax_amount),
            ("discount_amount", self.discount_amount),
            ("round_off", self.round_off),
            ("net_sale", self.net_sale),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_blank() {
        let record = SalesRecord::default();
        assert!(record.receipt_number.is_empty());
        assert!(record.transaction_status.is_empty());
        assert!(record.amounts().iter().all(|(_, v)| *v == 0.0));
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let record = SalesRecord {
            receipt_number: "R1".to_string(),
            net_sale: 95.0,
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["receiptNumber"], "R1");
        assert_eq!(json["netSale"].as_f64(), Some(95.0));
        assert!(json.get("receipt_number").is_none());

        let back: SalesRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_amounts_follow_column_order() {
        let record = SalesRecord {
            sale_amount: 1.0,
            tax_amount: 2.0,
            discount_amount: 3.0,
            round_off: 4.0,
            net_sale: 5.0,
            ..Default::default()
        };
        let names: Vec<_> = record.amounts().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec!["sale_amount", "tax_amount", "discount_amount", "round_off", "net_sale"]
        );
        assert_eq!(record.amounts()[3].1, 4.0);
    }
}
