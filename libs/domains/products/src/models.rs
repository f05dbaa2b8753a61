use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Product entity, one document per product in the `product` collection.
///
/// The price is stored as a plain decimal string so no precision is lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Primary key (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "price")]
    pub price: BigDecimal,
}

/// Payload of `POST /api/product`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductRequest {
    /// Client-chosen id; a UUIDv7 is assigned when absent or blank
    #[serde(default)]
    #[schema(example = "p1")]
    pub id: Option<String>,
    #[validate(length(min = 1, max = 200))]
    #[schema(example = "Pen")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "ball")]
    pub description: String,
    /// Decimal as a string; plain JSON numbers are accepted too
    #[serde(with = "price")]
    #[schema(value_type = String, example = "1.25")]
    pub price: BigDecimal,
}

/// Product as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    #[schema(example = "p1")]
    pub id: String,
    #[schema(example = "Pen")]
    pub name: String,
    #[schema(example = "ball")]
    pub description: String,
    #[serde(with = "price")]
    #[schema(value_type = String, example = "1.25")]
    pub price: BigDecimal,
}

impl Product {
    /// Build the entity from a request, under the already-resolved `id`.
    pub fn from_request(id: String, request: ProductRequest) -> Self {
        Self {
            id,
            name: request.name,
            description: request.description,
            price: request.price,
        }
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
        }
    }
}

/// Serde adapter for prices.
///
/// Accepts only canonical plain decimals (`-?(0|[1-9][0-9]*)(\.[0-9]+)?`,
/// at most [`MAX_DIGITS`](price::MAX_DIGITS) digits, no negative zero), so the
/// text written back is exactly the text received. JSON numbers are accepted
/// under the same rules, integers exactly and fractions via their shortest
/// `f64` form.
pub mod price {
    use bigdecimal::BigDecimal;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;
    use std::str::FromStr;

    /// Significant digits of an IEEE 754 decimal128
    pub const MAX_DIGITS: usize = 34;

    pub fn serialize<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_plain_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PriceVisitor)
    }

    /// Parse `text` if it is a canonical plain decimal.
    pub fn parse(text: &str) -> Result<BigDecimal, String> {
        let unsigned = text.strip_prefix('-').unwrap_or(text);
        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (unsigned, None),
        };

        let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        let canonical = all_digits(int_part)
            && (int_part == "0" || !int_part.starts_with('0'))
            && frac_part.is_none_or(all_digits);
        if !canonical {
            return Err(format!(
                "invalid price {:?}: expected a plain decimal such as \"12.50\"",
                text
            ));
        }

        let digits = int_part.len() + frac_part.map_or(0, str::len);
        if digits > MAX_DIGITS {
            return Err(format!(
                "invalid price {:?}: more than {} digits",
                text, MAX_DIGITS
            ));
        }

        if text.starts_with('-') && unsigned.bytes().all(|b| b == b'0' || b == b'.') {
            return Err(format!("invalid price {:?}: negative zero", text));
        }

        BigDecimal::from_str(text).map_err(|e| format!("invalid price {:?}: {}", text, e))
    }

    struct PriceVisitor;

    impl Visitor<'_> for PriceVisitor {
        type Value = BigDecimal;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a plain decimal number or a string holding one")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<BigDecimal, E> {
            parse(v).map_err(E::custom)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<BigDecimal, E> {
            Ok(BigDecimal::from(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<BigDecimal, E> {
            Ok(BigDecimal::from(v))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<BigDecimal, E> {
            if !v.is_finite() {
                return Err(E::custom("price must be finite"));
            }
            // f64's Display never uses exponent notation
            parse(&v.to_string()).map_err(E::custom)
        }
    }
}
