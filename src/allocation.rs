use crate::{
    bill::{count_occurrences, Bill},
    period::Period,
};
use log::{debug, error, trace};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A bill that falls due one or more times inside a period
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatedBillLine {
    pub bill: Bill,
    pub occurrence_count: u32,
    pub amount_per_occurrence: Decimal,
    pub total: Decimal,
}

/// The outcome of allocating bills into a single period.
///
/// `leftover` is `income_total + carry_in - bills_total` and may be negative. It is
/// also the `carry_out` offered to the next period.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBreakdown {
    pub period: Period,
    pub lines: Vec<AllocatedBillLine>,
    pub carry_in: Decimal,
    pub income_total: Decimal,
    pub bills_total: Decimal,
    pub leftover: Decimal,
    pub carry_out: Decimal,
}

impl AllocatedBillLine {
    pub fn new(bill: &Bill, occurrence_count: u32) -> Self {
        let amount_per_occurrence = bill.amount();
        AllocatedBillLine {
            bill: bill.clone(),
            occurrence_count,
            amount_per_occurrence,
            total: amount_per_occurrence * Decimal::from(occurrence_count),
        }
    }
}

impl PeriodBreakdown {
    /// Sum of line totals keyed by bill category
    pub fn totals_by_category(&self) -> BTreeMap<String, Decimal> {
        let mut totals = BTreeMap::new();
        for line in self.lines.iter() {
            *totals
                .entry(line.bill.category().to_owned())
                .or_insert(Decimal::ZERO) += line.total;
        }
        totals
    }

    pub fn is_deficit(&self) -> bool {
        self.leftover < Decimal::ZERO
    }
}

/// Allocate `bills` into `periods` and thread the running balance between them.
///
/// Periods are processed in ascending order of their start date. With carry-over
/// enabled each period starts with the previous period's leftover (surplus or debt);
/// otherwise every period stands alone. Inactive bills are never allocated. Periods
/// where `end <= start` are skipped.
pub fn allocate(bills: &[Bill], periods: &[Period], carry_over_enabled: bool) -> Vec<PeriodBreakdown> {
    let mut ordered: Vec<&Period> = periods.iter().collect();
    ordered.sort_by_key(|p| p.start());

    let mut running_carry = Decimal::ZERO;
    let mut breakdowns = Vec::with_capacity(ordered.len());

    for period in ordered {
        if !period.is_well_formed() {
            error!(
                "skipping malformed period {} - {}: end must fall after start",
                period.start(),
                period.end()
            );
            continue;
        }

        let lines: Vec<AllocatedBillLine> = bills
            .iter()
            .filter(|b| b.is_active())
            .filter_map(|b| {
                let n = count_occurrences(b, period.start(), period.end());
                if n > 0 {
                    trace!("'{}' due {} time(s) from {}", b.name(), n, period.start());
                    Some(AllocatedBillLine::new(b, n))
                } else {
                    None
                }
            })
            .collect();

        let bills_total: Decimal = lines.iter().map(|l| l.total).sum();
        let carry_in = if carry_over_enabled {
            running_carry
        } else {
            Decimal::ZERO
        };
        let income_total = period.income_total();
        let leftover = income_total + carry_in - bills_total;

        debug!(
            "period {} - {}: income {} + carry {} - bills {} = {}",
            period.start(),
            period.end(),
            income_total,
            carry_in,
            bills_total,
            leftover
        );

        breakdowns.push(PeriodBreakdown {
            period: period.clone(),
            lines,
            carry_in,
            income_total,
            bills_total,
            leftover,
            carry_out: leftover,
        });

        running_carry = if carry_over_enabled {
            leftover
        } else {
            Decimal::ZERO
        };
    }

    breakdowns
}
