//! Wire types for the Cloud Billing Catalog `services.skus.list` response
//! and the Compute Engine `machineTypes.aggregatedList` response.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{MachineType, RawSku};

/// One page of `services.skus.list`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSkusResponse {
    #[serde(default)]
    pub skus: Vec<SkuDto>,
    /// Empty or absent on the last page.
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl ListSkusResponse {
    /// The continuation token, if another page exists.
    pub fn next_page(&self) -> Option<&str> {
        self.next_page_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}

/// A billing SKU as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuDto {
    pub sku_id: String,
    #[serde(default)]
    pub description: String,
    /// Regions the SKU is offered in, or `global`.
    #[serde(default)]
    pub service_regions: Vec<String>,
    #[serde(default)]
    pub pricing_info: Vec<PricingInfoDto>,
}

/// A dated pricing entry of a SKU.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingInfoDto {
    #[serde(default)]
    pub pricing_expression: Option<PricingExpressionDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingExpressionDto {
    #[serde(default)]
    pub usage_unit: Option<String>,
    #[serde(default)]
    pub tiered_rates: Vec<TierRateDto>,
}

/// Rate applying from a usage threshold.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierRateDto {
    #[serde(default)]
    pub unit_price: Option<MoneyDto>,
}

/// `google.type.Money`: int64 `units` are encoded as JSON strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyDto {
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub units: Option<String>,
    /// Fractional part in units of 10^-9.
    #[serde(default)]
    pub nanos: i64,
}

impl MoneyDto {
    /// `units + nanos / 1e9`, or `None` if `units` is not an integer.
    pub fn amount(&self) -> Option<Decimal> {
        let units = match self.units.as_deref() {
            None | Some("") => Decimal::ZERO,
            Some(units) => Decimal::from_str(units).ok()?,
        };
        Some(units + Decimal::new(self.nanos, 9))
    }
}

impl SkuDto {
    /// Whether the SKU is offered in `region`.
    pub fn serves(&self, region: &str) -> bool {
        self.service_regions
            .iter()
            .any(|served| served.eq_ignore_ascii_case(region))
    }

    /// First tiered rate of the first pricing expression that has one.
    fn first_rate(&self) -> Option<(&PricingExpressionDto, &MoneyDto)> {
        self.pricing_info.iter().find_map(|info| {
            let expression = info.pricing_expression.as_ref()?;
            let price = expression
                .tiered_rates
                .iter()
                .find_map(|rate| rate.unit_price.as_ref())?;
            Some((expression, price))
        })
    }
}

impl From<SkuDto> for RawSku {
    fn from(sku: SkuDto) -> Self {
        let (usage_unit, unit_price) = match sku.first_rate() {
            Some((expression, price)) => (expression.usage_unit.clone(), price.amount()),
            None => (None, None),
        };

        RawSku {
            sku_id: sku.sku_id,
            description: sku.description,
            regions: sku.service_regions,
            usage_unit,
            unit_price,
        }
    }
}

/// One page of `machineTypes.aggregatedList`, keyed by `zones/<zone>`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineTypeAggregatedList {
    #[serde(default)]
    pub items: BTreeMap<String, MachineTypesScopedList>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl MachineTypeAggregatedList {
    /// The continuation token, if another page exists.
    pub fn next_page(&self) -> Option<&str> {
        self.next_page_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }

    /// Machine types listed for zones of `region`.
    pub fn in_region<'a>(&'a self, region: &'a str) -> impl Iterator<Item = &'a MachineTypeDto> {
        self.items
            .iter()
            .filter(move |(scope, _)| zone_in_region(scope, region))
            .flat_map(|(_, scoped)| scoped.machine_types.iter())
    }
}

/// Zones without machine types carry a warning instead of a list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineTypesScopedList {
    #[serde(default)]
    pub machine_types: Vec<MachineTypeDto>,
}

/// A machine type entry; other fields are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineTypeDto {
    pub name: String,
    /// vCPUs visible to the guest.
    #[serde(default)]
    pub guest_cpus: u32,
    /// Memory in MB (1 GB = 1024 MB).
    #[serde(default)]
    pub memory_mb: u64,
}

impl From<&MachineTypeDto> for MachineType {
    fn from(dto: &MachineTypeDto) -> Self {
        MachineType::new(dto.name.clone(), dto.guest_cpus, dto.memory_mb)
    }
}

/// `zones/europe-north1-a` belongs to `europe-north1`.
fn zone_in_region(scope: &str, region: &str) -> bool {
    scope
        .strip_prefix("zones/")
        .and_then(|zone| zone.strip_prefix(region))
        .is_some_and(|suffix| suffix.starts_with('-'))
}
