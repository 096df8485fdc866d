//! # Resource Quantities
//!
//! Validation of Kubernetes quantity strings ("1Gi", "500M", "1e3").

use crate::error::{ConfigError, Result};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // sign, number, then one of binarySI, decimalSI or a decimal exponent
    static ref QUANTITY: Regex = Regex::new(
        r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[KMGTPE]i|[numkMGTPE]|[eE][+-]?[0-9]+)?$"
    )
    .unwrap();
}

/// Parse a quantity string, rejecting anything the API server would refuse
pub fn parse_quantity(value: &str) -> Result<Quantity> {
    if value.is_empty() {
        return Err(malformed(value, "quantity is empty"));
    }

    if !QUANTITY.is_match(value) {
        return Err(malformed(value, "expected a number with an optional SI suffix or exponent"));
    }

    Ok(Quantity(value.to_string()))
}

fn malformed(value: &str, reason: &str) -> ConfigError {
    ConfigError::MalformedQuantity {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_quantities() {
        for value in ["1Gi", "500Mi", "10G", "1", "0.5", ".5Ki", "100m", "1e3", "2E-2", "+3Ti", "1.Pi"] {
            assert_eq!(parse_quantity(value).unwrap(), Quantity(value.to_string()), "{}", value);
        }
    }

    #[test]
    fn test_parse_malformed_quantities() {
        for value in ["", "not-a-quantity", "Gi", "1 Gi", " 1Gi", "1GB", "1gi", "1Ki5", "1e", "."] {
            assert!(
                matches!(parse_quantity(value), Err(ConfigError::MalformedQuantity { .. })),
                "{:?} should be rejected",
                value
            );
        }
    }

    #[test]
    fn test_malformed_quantity_keeps_input() {
        match parse_quantity("ten") {
            Err(ConfigError::MalformedQuantity { value, .. }) => assert_eq!(value, "ten"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
