//! Per-week ledger results and the pure settlement step

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::aggregate::WeekTotals;
use crate::types::*;

/// Running ledger state: the carry balance per catalog material.
pub type CarryMap = HashMap<Material, CarryBalance>;

/// A carry map with every catalog material at zero.
pub fn zero_carry() -> CarryMap {
    Material::ALL
        .iter()
        .map(|&m| (m, CarryBalance::zero()))
        .collect()
}

/// Sum prior-year balance snapshots into an opening carry map.
///
/// Kgs and amounts are summed independently per material; materials without
/// a snapshot open at zero.
pub fn seed_carry_from_snapshots(snapshots: &[PriorBalanceSnapshot]) -> CarryMap {
    let mut carry = zero_carry();
    for snap in snapshots {
        if let Some(balance) = carry.get_mut(&snap.material) {
            balance.kgs = &balance.kgs + &snap.kgs;
            balance.amount = &balance.amount + &snap.amount;
        }
    }
    carry
}

/// The five ledger lines of one material for one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialWeek {
    /// "Semana anterior": the opening carry, negated for display.
    pub previous_week: CarryBalance,
    /// "Compras semana"
    pub purchases: MaterialTotals,
    /// "Ventas patio"
    pub patio_sales: MaterialTotals,
    /// "Ventas general"
    pub general_sales: MaterialTotals,
    /// "TOTAL": the closing balance, carried into the next week.
    pub closing: CarryBalance,
}

/// One settled week of the reconciliation walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekLedger {
    /// Calendar month (1-12) the week belongs to.
    pub month: u32,
    /// 1-based position of the week within its month.
    pub index: u32,
    pub range: WeekRange,
    pub materials: HashMap<Material, MaterialWeek>,
}

impl WeekLedger {
    /// Per-material lines; every catalog material is present.
    pub fn material(&self, material: Material) -> &MaterialWeek {
        &self.materials[&material]
    }

    /// True when any material saw purchases or sales this week.
    pub fn has_activity(&self) -> bool {
        self.materials.values().any(|m| {
            !m.purchases.is_zero() || !m.patio_sales.is_zero() || !m.general_sales.is_zero()
        })
    }
}

/// Settle one week: fold the week's aggregates into the carry state.
///
/// Pure function; callers drive it strictly in week order and thread the
/// returned carry into the next call.
///
/// Sign convention, preserved from the production report exactly: the
/// opening carry appears as a negated "Semana anterior" line, and
///
/// ```text
/// closing = (patio + general) - (previous_week + purchases)
///         = sales - (-carry + purchases)
/// ```
///
/// Purchases therefore move the closing total in the same direction as the
/// negated carry. Downstream conditional coloring and every rendered TOTAL
/// formula assume this exact formula; do not "correct" it here.
pub fn settle_week(
    month: u32,
    index: u32,
    range: WeekRange,
    carry: &CarryMap,
    purchases: &WeekTotals,
    patio: &WeekTotals,
    general: &WeekTotals,
) -> (WeekLedger, CarryMap) {
    let mut materials = HashMap::with_capacity(Material::ALL.len());
    let mut next_carry = CarryMap::with_capacity(Material::ALL.len());

    for material in Material::ALL {
        let opening = carry.get(&material).cloned().unwrap_or_default();
        let previous_week = opening.negated();
        let bought = purchases.get(material);
        let patio_sold = patio.get(material);
        let general_sold = general.get(material);

        let closing = CarryBalance {
            kgs: (&patio_sold.kgs + &general_sold.kgs) - (&previous_week.kgs + &bought.kgs),
            amount: (&patio_sold.amount + &general_sold.amount)
                - (&previous_week.amount + &bought.amount),
        };

        next_carry.insert(material, closing.clone());
        materials.insert(
            material,
            MaterialWeek {
                previous_week,
                purchases: bought,
                patio_sales: patio_sold,
                general_sales: general_sold,
                closing,
            },
        );
    }

    (
        WeekLedger {
            month,
            index,
            range,
            materials,
        },
        next_carry,
    )
}
