//! Typed view of the extracted pricing features table.

use serde::Serialize;

use crate::warehouse::StatementResult;

/// One row of the pricing features table.
///
/// Every field is optional: the model may omit fields it could not find
/// in the brochure, and older table rows may predate newer columns.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PricingFeatures {
    pub issuing_company: Option<String>,
    pub minimum_premium: Option<String>,
    pub withdrawal_options: Option<String>,
    pub interest_crediting: Option<String>,
    pub surrender_charge_schedule: Option<String>,
    pub surrender_charge_percentage: Option<String>,
    pub death_benefit: Option<String>,
    pub available_riders: Option<String>,
    pub issue_ages: Option<String>,
    pub guarantee_period: Option<String>,
    pub guaranteed_minimum_interest_rate: Option<String>,
}

impl PricingFeatures {
    /// Build from the first row of a statement result, matching by
    /// column name so projection order does not matter.
    pub fn from_result(result: &StatementResult) -> Option<Self> {
        if result.is_empty() {
            return None;
        }
        let get = |name: &str| result.value(0, name).map(str::to_string);
        Some(Self {
            issuing_company: get("issuing_company"),
            minimum_premium: get("minimum_premium"),
            withdrawal_options: get("withdrawal_options"),
            interest_crediting: get("interest_crediting"),
            surrender_charge_schedule: get("surrender_charge_schedule"),
            surrender_charge_percentage: get("surrender_charge_percentage"),
            death_benefit: get("death_benefit"),
            available_riders: get("available_riders"),
            issue_ages: get("issue_ages"),
            guarantee_period: get("guarantee_period"),
            guaranteed_minimum_interest_rate: get("guaranteed_minimum_interest_rate"),
        })
    }
}
