//! Pre-flight validation of the negotiation form.

use shared::{domain::NegotiationRequest, error::ValidationError};

/// Raw form contents, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NegotiationForm {
    pub item: String,
    pub buyer_max: String,
    pub seller_min: String,
}

impl NegotiationForm {
    pub fn new(
        item: impl Into<String>,
        buyer_max: impl Into<String>,
        seller_min: impl Into<String>,
    ) -> Self {
        Self {
            item: item.into(),
            buyer_max: buyer_max.into(),
            seller_min: seller_min.into(),
        }
    }
}

pub fn validate_form(form: &NegotiationForm) -> Result<NegotiationRequest, ValidationError> {
    let item = form.item.trim();
    if item.is_empty() {
        return Err(ValidationError::EmptyItem);
    }

    let (Some(buyer_max), Some(seller_min)) =
        (parse_price(&form.buyer_max), parse_price(&form.seller_min))
    else {
        return Err(ValidationError::InvalidPrice);
    };

    if seller_min > buyer_max {
        return Err(ValidationError::SellerAboveBuyer);
    }

    if buyer_max <= 0.0 || seller_min <= 0.0 {
        return Err(ValidationError::NonPositivePrice);
    }

    Ok(NegotiationRequest {
        item: item.to_string(),
        buyer_max,
        seller_min,
    })
}

/// Inline hint for a price field while the user is still typing.
pub fn price_field_hint(raw: &str) -> Option<&'static str> {
    match parse_price(raw) {
        Some(value) if value < 0.0 => Some("Price cannot be negative"),
        _ => None,
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_trimmed_item_and_prices() {
        let request = validate_form(&NegotiationForm::new("  Laptop ", "1000", " 800.5 "))
            .expect("valid form");
        assert_eq!(request.item, "Laptop");
        assert_eq!(request.buyer_max, 1000.0);
        assert_eq!(request.seller_min, 800.5);
    }

    #[test]
    fn rejects_blank_item() {
        assert_eq!(
            validate_form(&NegotiationForm::new("   ", "10", "5")),
            Err(ValidationError::EmptyItem)
        );
    }

    #[test]
    fn rejects_unparsable_and_non_finite_prices() {
        for (buyer, seller) in [("abc", "5"), ("10", ""), ("inf", "5"), ("10", "NaN")] {
            assert_eq!(
                validate_form(&NegotiationForm::new("Bike", buyer, seller)),
                Err(ValidationError::InvalidPrice),
                "buyer={buyer} seller={seller}"
            );
        }
    }

    #[test]
    fn rejects_seller_minimum_above_buyer_maximum() {
        let err = validate_form(&NegotiationForm::new("Bike", "100", "150")).unwrap_err();
        assert_eq!(err, ValidationError::SellerAboveBuyer);
        assert_eq!(
            err.to_string(),
            "Seller minimum price cannot be higher than buyer maximum price!"
        );
    }

    #[test]
    fn rejects_zero_and_negative_prices() {
        for (buyer, seller) in [("0", "0"), ("100", "0"), ("100", "-5"), ("-1", "-2")] {
            assert_eq!(
                validate_form(&NegotiationForm::new("Bike", buyer, seller)),
                Err(ValidationError::NonPositivePrice),
                "buyer={buyer} seller={seller}"
            );
        }
    }

    #[test]
    fn hints_only_on_negative_values() {
        assert_eq!(price_field_hint("-3"), Some("Price cannot be negative"));
        assert_eq!(price_field_hint("3"), None);
        assert_eq!(price_field_hint(""), None);
        assert_eq!(price_field_hint("abc"), None);
    }
}
