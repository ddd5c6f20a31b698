//! Builders for raw pricing fixtures.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{RawPayload, RawSku};

/// Region every fixture is priced in.
pub const REGION: &str = "europe-north1";

/// A raw SKU in [`REGION`].
pub fn sku(description: &str, price: Decimal) -> RawSku {
    RawSku {
        sku_id: description.to_ascii_lowercase().replace(' ', "-"),
        description: description.to_string(),
        regions: vec![REGION.to_string()],
        usage_unit: Some("h".to_string()),
        unit_price: Some(price),
    }
}

/// The four running-rate SKUs for one family.
pub fn family_skus(
    family: &str,
    spot_core: Decimal,
    spot_ram: Decimal,
    on_demand_core: Decimal,
    on_demand_ram: Decimal,
) -> Vec<RawSku> {
    let upper = family.to_ascii_uppercase();
    vec![
        sku(
            &format!("Spot Preemptible {upper} Instance Core running in Finland"),
            spot_core,
        ),
        sku(
            &format!("Spot Preemptible {upper} Instance Ram running in Finland"),
            spot_ram,
        ),
        sku(
            &format!("{upper} Instance Core running in Finland"),
            on_demand_core,
        ),
        sku(
            &format!("{upper} Instance Ram running in Finland"),
            on_demand_ram,
        ),
    ]
}

/// e2 and c2d spot rates plus on-demand rates, with one ARM family.
///
/// For 4 vCPU + 16 GB the spot totals are e2 $0.77856/day and
/// c2d $0.9888/day.
pub fn reference_payload() -> RawPayload {
    let mut skus = Vec::new();
    skus.extend(family_skus(
        "e2",
        dec!(0.00527),
        dec!(0.00071),
        dec!(0.02181),
        dec!(0.00292),
    ));
    skus.extend(family_skus(
        "c2d",
        dec!(0.0067),
        dec!(0.0009),
        dec!(0.0297),
        dec!(0.00398),
    ));
    skus.extend(family_skus(
        "t2a",
        dec!(0.0031),
        dec!(0.0004),
        dec!(0.0154),
        dec!(0.0019),
    ));
    skus.push(sku("Storage PD Capacity in Finland", dec!(0.044)));
    RawPayload::new(skus)
}
