//! Pricing schemes supported by the catalog and the display helpers derived
//! from them.
//!
//! Amounts are integers in the smallest currency unit (Argentine pesos, no
//! decimals). Every string shown to shoppers is computed here so that the
//! public catalog, the admin panel and the exports agree on formatting.

use serde::{Deserialize, Serialize};

/// Fallback shown for price documents whose `type` is not recognised.
pub const UNKNOWN_PRICE_DISPLAY: &str = "Consultar";

/// Flat price for a discrete sellable unit (item, package, liter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitPrice {
    /// Price of one unit.
    pub price: i64,
    /// Label of the unit, e.g. "litro" or "paquete 250g".
    pub unit_label: String,
}

/// Price quoted per kilogram with common purchasable weights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightPrice {
    /// Price of one kilogram.
    pub price_per_kg: i64,
    /// Gram break-points offered to shoppers, conventionally ascending.
    #[serde(default)]
    pub available_weights: Vec<u32>,
}

/// Amounts for each fraction of a whole piece. `whole` is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FractionAmounts {
    pub whole: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter: Option<i64>,
}

/// Price for goods sold whole or in halves/quarters (e.g. a cheese wheel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FractionPrice {
    pub prices: FractionAmounts,
    /// Name of the whole piece, e.g. "horma".
    pub fraction_label: String,
}

/// Tagged union of the supported pricing schemes, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Price {
    Unit(UnitPrice),
    Weight(WeightPrice),
    Fraction(FractionPrice),
    /// A document with an unrecognised `type`, kept for forward compatibility.
    #[serde(other)]
    Unknown,
}

/// The three fractions a [`FractionPrice`] can be sold in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fraction {
    Whole,
    Half,
    Quarter,
}

/// A purchasable weight and its derived price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightOption {
    /// Weight in grams.
    pub weight: u32,
    /// Human readable weight, see [`format_weight`].
    pub label: String,
    /// Price of the package.
    pub amount: i64,
}

/// A purchasable fraction and its price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FractionOption {
    pub fraction: Fraction,
    pub label: String,
    pub amount: i64,
}

/// A single row of a full price breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedPrice {
    pub display: String,
    pub value: i64,
    pub unit: String,
}

impl Price {
    pub fn is_unit(&self) -> bool {
        matches!(self, Price::Unit(_))
    }

    pub fn is_weight(&self) -> bool {
        matches!(self, Price::Weight(_))
    }

    pub fn is_fraction(&self) -> bool {
        matches!(self, Price::Fraction(_))
    }

    pub fn as_unit(&self) -> Option<&UnitPrice> {
        match self {
            Price::Unit(price) => Some(price),
            _ => None,
        }
    }

    pub fn as_weight(&self) -> Option<&WeightPrice> {
        match self {
            Price::Weight(price) => Some(price),
            _ => None,
        }
    }

    pub fn as_fraction(&self) -> Option<&FractionPrice> {
        match self {
            Price::Fraction(price) => Some(price),
            _ => None,
        }
    }

    /// Wire name of the variant, `None` for unknown documents.
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            Price::Unit(_) => Some("unit"),
            Price::Weight(_) => Some("weight"),
            Price::Fraction(_) => Some("fraction"),
            Price::Unknown => None,
        }
    }

    /// Spanish label for the pricing scheme.
    pub fn type_label(&self) -> &'static str {
        match self {
            Price::Unit(_) => "Por unidad",
            Price::Weight(_) => "Por peso",
            Price::Fraction(_) => "Por fracción",
            Price::Unknown => UNKNOWN_PRICE_DISPLAY,
        }
    }
}

/// Formats an amount as pesos with `.` thousands separators and no decimals.
///
/// ```
/// use price_catalog::domain::price::format_currency;
/// assert_eq!(format_currency(25000), "$25.000");
/// ```
pub fn format_currency(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    if amount < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Formats a weight in grams: `"250 g"` below a kilogram, `"1 kg"` or
/// `"1.5 kg"` from there on.
///
/// Non-integral kilograms keep exactly one decimal, rounded half-up.
pub fn format_weight(grams: u32) -> String {
    if grams < 1000 {
        return format!("{grams} g");
    }

    if grams % 1000 == 0 {
        return format!("{} kg", grams / 1000);
    }

    let tenths = (u64::from(grams) + 50) / 100;
    if tenths % 10 == 0 {
        return format!("{} kg", tenths / 10);
    }
    format!("{}.{} kg", tenths / 10, tenths % 10)
}

/// Price of `grams` of a product sold at `price_per_kg`.
///
/// Computes `round(price_per_kg * grams / 1000)` exactly in integer
/// arithmetic. Ties round towards positive infinity.
pub fn calculate_weight_price(price_per_kg: i64, grams: u32) -> i64 {
    let scaled = i128::from(price_per_kg) * i128::from(grams) + 500;
    let rounded = scaled.div_euclid(1000);
    i64::try_from(rounded).unwrap_or(if rounded > 0 { i64::MAX } else { i64::MIN })
}

/// Single-line summary of a price as shown on product cards.
pub fn get_price_display(price: &Price) -> String {
    match price {
        Price::Unit(unit) => format!("{} / {}", format_currency(unit.price), unit.unit_label),
        Price::Weight(weight) => format!("{} / kg", format_currency(weight.price_per_kg)),
        Price::Fraction(fraction) => {
            let amounts = &fraction.prices;
            [
                ("Entera", Some(amounts.whole)),
                ("½", amounts.half),
                ("¼", amounts.quarter),
            ]
            .into_iter()
            .filter_map(|(label, amount)| match amount {
                Some(amount) if amount != 0 => {
                    Some(format!("{label}: {}", format_currency(amount)))
                }
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(" • ")
        }
        Price::Unknown => UNKNOWN_PRICE_DISPLAY.to_string(),
    }
}

/// One option per configured weight, in the order they were stored.
pub fn get_weight_options(price: &WeightPrice) -> Vec<WeightOption> {
    price
        .available_weights
        .iter()
        .map(|&grams| WeightOption {
            weight: grams,
            label: format_weight(grams),
            amount: calculate_weight_price(price.price_per_kg, grams),
        })
        .collect()
}

/// Whole piece first, then the half and quarter when they are sold.
pub fn get_fraction_options(price: &FractionPrice) -> Vec<FractionOption> {
    let label = &price.fraction_label;
    let mut options = vec![FractionOption {
        fraction: Fraction::Whole,
        label: format!("{label} entera"),
        amount: price.prices.whole,
    }];

    if let Some(half) = price.prices.half.filter(|amount| *amount != 0) {
        options.push(FractionOption {
            fraction: Fraction::Half,
            label: format!("½ {label}"),
            amount: half,
        });
    }

    if let Some(quarter) = price.prices.quarter.filter(|amount| *amount != 0) {
        options.push(FractionOption {
            fraction: Fraction::Quarter,
            label: format!("¼ {label}"),
            amount: quarter,
        });
    }

    options
}

/// Full breakdown of a price, one row per purchasable option.
pub fn formatted_prices(price: &Price) -> Vec<FormattedPrice> {
    match price {
        Price::Unit(unit) => vec![FormattedPrice {
            display: format_currency(unit.price),
            value: unit.price,
            unit: unit.unit_label.clone(),
        }],
        Price::Weight(weight) => {
            let mut rows = vec![FormattedPrice {
                display: format_currency(weight.price_per_kg),
                value: weight.price_per_kg,
                unit: "kg".to_string(),
            }];
            rows.extend(get_weight_options(weight).into_iter().map(|option| {
                FormattedPrice {
                    display: format_currency(option.amount),
                    value: option.amount,
                    unit: option.label,
                }
            }));
            rows
        }
        Price::Fraction(fraction) => get_fraction_options(fraction)
            .into_iter()
            .map(|option| FormattedPrice {
                display: format_currency(option.amount),
                value: option.amount,
                unit: option.label,
            })
            .collect(),
        Price::Unknown => Vec::new(),
    }
}

/// The authoritative price of a product, i.e. the first entry.
pub fn primary_price(prices: &[Price]) -> Option<&Price> {
    prices.first()
}

/// Whether two price lists differ once serialized.
pub fn prices_differ(previous: &[Price], next: &[Price]) -> bool {
    match (serde_json::to_string(previous), serde_json::to_string(next)) {
        (Ok(previous), Ok(next)) => previous != next,
        _ => previous != next,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queso_sardo() -> Price {
        Price::Fraction(FractionPrice {
            prices: FractionAmounts {
                whole: 25000,
                half: Some(13000),
                quarter: Some(7000),
            },
            fraction_label: "horma".to_string(),
        })
    }

    fn weight_price(price_per_kg: i64, weights: &[u32]) -> WeightPrice {
        WeightPrice {
            price_per_kg,
            available_weights: weights.to_vec(),
        }
    }

    #[test]
    fn format_currency_groups_thousands() {
        assert_eq!(format_currency(0), "$0");
        assert_eq!(format_currency(999), "$999");
        assert_eq!(format_currency(1000), "$1.000");
        assert_eq!(format_currency(25000), "$25.000");
        assert_eq!(format_currency(1234567), "$1.234.567");
        assert_eq!(format_currency(-4500), "-$4.500");
    }

    #[test]
    fn format_weight_switches_to_kilograms() {
        assert_eq!(format_weight(250), "250 g");
        assert_eq!(format_weight(999), "999 g");
        assert_eq!(format_weight(1000), "1 kg");
        assert_eq!(format_weight(1500), "1.5 kg");
        assert_eq!(format_weight(2000), "2 kg");
        assert_eq!(format_weight(1250), "1.3 kg");
        assert_eq!(format_weight(1960), "2 kg");
    }

    #[test]
    fn format_weight_handles_largest_weights() {
        assert_eq!(format_weight(u32::MAX - 10), "4294967.3 kg");
        assert_eq!(format_weight(u32::MAX), "4294967.3 kg");
        assert_eq!(format_weight(4_294_967_000), "4294967 kg");
    }

    #[test]
    fn calculate_weight_price_matches_rounded_division() {
        let cases: &[(i64, u32)] = &[
            (0, 100),
            (1, 500),
            (1, 499),
            (8500, 250),
            (12345, 333),
            (9999, 1),
            (18000, 1000),
        ];

        for &(price_per_kg, grams) in cases {
            let exact = (price_per_kg as f64 * grams as f64) / 1000.0;
            let expected = (exact + 0.5).floor() as i64;
            assert_eq!(
                calculate_weight_price(price_per_kg, grams),
                expected,
                "price {price_per_kg} grams {grams}"
            );
        }
    }

    #[test]
    fn calculate_weight_price_rounds_ties_up() {
        assert_eq!(calculate_weight_price(1, 500), 1);
        assert_eq!(calculate_weight_price(3, 500), 2);
        assert_eq!(calculate_weight_price(-1, 500), 0);
    }

    #[test]
    fn price_display_for_fraction_lists_parts_in_order() {
        assert_eq!(
            get_price_display(&queso_sardo()),
            "Entera: $25.000 • ½: $13.000 • ¼: $7.000"
        );
    }

    #[test]
    fn price_display_omits_missing_fractions() {
        let price = Price::Fraction(FractionPrice {
            prices: FractionAmounts {
                whole: 18000,
                half: None,
                quarter: Some(0),
            },
            fraction_label: "pieza".to_string(),
        });

        assert_eq!(get_price_display(&price), "Entera: $18.000");
    }

    #[test]
    fn price_display_for_unit_and_weight() {
        let unit = Price::Unit(UnitPrice {
            price: 1850,
            unit_label: "litro".to_string(),
        });
        let weight = Price::Weight(weight_price(12000, &[100, 250]));

        assert_eq!(get_price_display(&unit), "$1.850 / litro");
        assert_eq!(get_price_display(&weight), "$12.000 / kg");
    }

    #[test]
    fn unknown_price_type_falls_back_to_consultar() {
        let price: Price = serde_json::from_str(r#"{"type":"bundle","items":3}"#)
            .expect("unknown types should deserialize");

        assert_eq!(price, Price::Unknown);
        assert_eq!(get_price_display(&price), "Consultar");
        assert!(formatted_prices(&price).is_empty());
    }

    #[test]
    fn price_documents_use_camel_case_fields() {
        let json = r#"[
            {"type":"unit","price":900,"unitLabel":"paquete 250g"},
            {"type":"weight","pricePerKg":8000,"availableWeights":[100,250]},
            {"type":"fraction","prices":{"whole":25000,"half":13000},"fractionLabel":"horma"}
        ]"#;

        let prices: Vec<Price> = serde_json::from_str(json).expect("valid price documents");

        assert!(prices[0].is_unit());
        assert!(prices[1].is_weight());
        assert!(prices[2].is_fraction());
        assert_eq!(
            prices[2].as_fraction().map(|price| price.prices.quarter),
            Some(None)
        );

        let encoded = serde_json::to_value(&prices[1]).expect("serializable");
        assert_eq!(encoded["type"], "weight");
        assert_eq!(encoded["pricePerKg"], 8000);
    }

    #[test]
    fn weight_options_follow_input_order() {
        let price = weight_price(10000, &[500, 100, 1000]);

        let options = get_weight_options(&price);

        let weights: Vec<u32> = options.iter().map(|option| option.weight).collect();
        assert_eq!(weights, vec![500, 100, 1000]);
        assert_eq!(options[0].label, "500 g");
        assert_eq!(options[0].amount, 5000);
        assert_eq!(options[2].label, "1 kg");
        assert_eq!(options[2].amount, 10000);
    }

    #[test]
    fn fraction_options_always_include_whole() {
        let price = FractionPrice {
            prices: FractionAmounts {
                whole: 30000,
                half: None,
                quarter: Some(8000),
            },
            fraction_label: "horma".to_string(),
        };

        let options = get_fraction_options(&price);

        assert_eq!(options.len(), 2);
        assert_eq!(options[0].fraction, Fraction::Whole);
        assert_eq!(options[0].label, "horma entera");
        assert_eq!(options[1].fraction, Fraction::Quarter);
        assert_eq!(options[1].label, "¼ horma");
        assert_eq!(options[1].amount, 8000);
    }

    #[test]
    fn formatted_prices_for_weight_include_options() {
        let rows = formatted_prices(&Price::Weight(weight_price(9000, &[250, 1500])));

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].unit, "kg");
        assert_eq!(rows[1].display, "$2.250");
        assert_eq!(rows[1].unit, "250 g");
        assert_eq!(rows[2].value, 13500);
        assert_eq!(rows[2].unit, "1.5 kg");
    }

    #[test]
    fn type_guards_and_labels() {
        let price = queso_sardo();

        assert!(price.is_fraction());
        assert!(!price.is_unit());
        assert!(price.as_weight().is_none());
        assert_eq!(price.type_name(), Some("fraction"));
        assert_eq!(price.type_label(), "Por fracción");
        assert_eq!(Price::Unknown.type_name(), None);
    }

    #[test]
    fn primary_price_is_first_entry() {
        let prices = vec![
            queso_sardo(),
            Price::Weight(weight_price(26000, &[250])),
        ];

        assert_eq!(primary_price(&prices), Some(&prices[0]));
        assert_eq!(primary_price(&[]), None);
    }

    #[test]
    fn prices_differ_compares_serialized_form() {
        let before = vec![queso_sardo()];
        let mut after = before.clone();

        assert!(!prices_differ(&before, &after));

        if let Price::Fraction(fraction) = &mut after[0] {
            fraction.prices.half = Some(14000);
        }

        assert!(prices_differ(&before, &after));
    }
}
