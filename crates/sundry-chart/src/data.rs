//! Ownership data.

use std::fmt;

use crate::error::{Error, Result};

/// Default market size in trillions of dollars.
pub const DEFAULT_TOTAL: f64 = 36.0;

/// Label for the period the default estimates describe.
pub const DEFAULT_AS_OF: &str = "December 2025";

/// Coarse grouping of holders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Group {
    /// Federal Reserve and government trust funds.
    Government,
    /// U.S. private investors.
    Domestic,
    /// Foreign official and private holders.
    Foreign,
}

impl Group {
    /// All groups in display order.
    pub const ALL: [Group; 3] = [Group::Government, Group::Domestic, Group::Foreign];

    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Government => "Government",
            Self::Domestic => "Domestic",
            Self::Foreign => "Foreign",
        }
    }

    /// Solid colour for nodes.
    pub fn color(self) -> &'static str {
        match self {
            Self::Government => "#2E5090",
            Self::Domestic => "#2E7D32",
            Self::Foreign => "#E65100",
        }
    }

    /// Translucent colour for flows.
    pub fn flow_color(self) -> &'static str {
        match self {
            Self::Government => "rgba(46,80,144,0.4)",
            Self::Domestic => "rgba(46,125,50,0.4)",
            Self::Foreign => "rgba(230,81,0,0.4)",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One class of holder.
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    /// Full name
    pub name: String,
    /// Short label for small tiles
    pub short: String,
    /// Trillions of dollars
    pub amount: f64,
    /// Fill colour
    pub color: String,
    /// Group for the sankey and donut inner ring
    pub group: Group,
}

impl Holding {
    fn new(name: &str, short: &str, amount: f64, color: &str, group: Group) -> Self {
        Self {
            name: name.to_string(),
            short: short.to_string(),
            amount,
            color: color.to_string(),
            group,
        }
    }
}

/// A dataset of holders.
#[derive(Debug, Clone, PartialEq)]
pub struct Holdings {
    /// Period label
    pub as_of: String,
    /// Market size the amounts are meant to add up to
    pub target_total: f64,
    /// Holders in source order
    pub items: Vec<Holding>,
}

impl Holdings {
    /// The raw December 2025 estimates, before normalization.
    pub fn raw() -> Self {
        let items = vec![
            Holding::new("Federal Reserve", "Fed", 6.5, "#2E5090", Group::Government),
            Holding::new(
                "Intragovernmental Holdings",
                "Intragov",
                6.8,
                "#4A6FA5",
                Group::Government,
            ),
            Holding::new(
                "Foreign Official Holders",
                "Foreign",
                8.5,
                "#E65100",
                Group::Foreign,
            ),
            Holding::new(
                "U.S. Mutual Funds & ETFs",
                "Funds/ETFs",
                6.8,
                "#2E7D32",
                Group::Domestic,
            ),
            Holding::new(
                "U.S. Banks & Depositories",
                "Banks",
                4.5,
                "#43A047",
                Group::Domestic,
            ),
            Holding::new("Pension Funds", "Pensions", 2.5, "#66BB6A", Group::Domestic),
            Holding::new(
                "Insurance/State/Local/Other",
                "Other",
                2.0,
                "#9E9E9E",
                Group::Domestic,
            ),
        ];
        let target_total = items.iter().map(|h| h.amount).sum();
        Self {
            as_of: DEFAULT_AS_OF.to_string(),
            target_total,
            items,
        }
    }

    /// Sum of the amounts.
    pub fn total(&self) -> f64 {
        self.items.iter().map(|h| h.amount).sum()
    }

    /// Scale every amount so they sum to `target`.
    pub fn normalized(&self, target: f64) -> Result<Self> {
        if !target.is_finite() || target <= 0.0 {
            return Err(Error::InvalidTotal(target));
        }
        let total = self.total();
        if total <= 0.0 || !total.is_finite() {
            return Err(Error::EmptyData { total });
        }
        let factor = target / total;
        let items = self
            .items
            .iter()
            .map(|h| Holding {
                amount: h.amount * factor,
                ..h.clone()
            })
            .collect();
        log::debug!("Normalized holdings from {total:.2} to {target:.2} (x{factor:.4})");
        Ok(Self {
            as_of: self.as_of.clone(),
            target_total: target,
            items,
        })
    }

    /// Each holder's share of the total, in percent, in source order.
    pub fn percentages(&self) -> Vec<f64> {
        let total = self.total();
        self.items
            .iter()
            .map(|h| if total > 0.0 { h.amount / total * 100.0 } else { 0.0 })
            .collect()
    }

    /// Share of one amount, in percent.
    pub fn share(&self, amount: f64) -> f64 {
        let total = self.total();
        if total > 0.0 { amount / total * 100.0 } else { 0.0 }
    }

    /// Holders by amount, largest first. Ties keep source order.
    pub fn sorted_desc(&self) -> Vec<&Holding> {
        let mut sorted: Vec<&Holding> = self.items.iter().collect();
        sorted.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        sorted
    }

    /// Totals per group, in [`Group::ALL`] order.
    pub fn group_totals(&self) -> Vec<(Group, f64)> {
        Group::ALL
            .iter()
            .map(|&g| {
                let sum = self
                    .items
                    .iter()
                    .filter(|h| h.group == g)
                    .map(|h| h.amount)
                    .sum();
                (g, sum)
            })
            .collect()
    }

    /// Holders belonging to `group`, in source order.
    pub fn in_group(&self, group: Group) -> impl Iterator<Item = &Holding> {
        self.items.iter().filter(move |h| h.group == group)
    }
}

impl Default for Holdings {
    /// The default estimates normalized to [`DEFAULT_TOTAL`].
    fn default() -> Self {
        let raw = Self::raw();
        let factor = DEFAULT_TOTAL / raw.total();
        Self {
            as_of: raw.as_of,
            target_total: DEFAULT_TOTAL,
            items: raw
                .items
                .into_iter()
                .map(|h| Holding {
                    amount: h.amount * factor,
                    ..h
                })
                .collect(),
        }
    }
}

/// `$x.xT`
pub fn money(amount: f64) -> String {
    format!("${amount:.1}T")
}
