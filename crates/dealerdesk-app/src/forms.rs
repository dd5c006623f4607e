// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::money::format_cents;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PayoffField {
    Reserve,
    Discount,
    LoanFees,
    ServiceContractWithholding,
    GapWithholding,
    VsiWithholding,
    MiscWithholding,
    MiscProfitCommission,
}

impl PayoffField {
    /// Screen order.
    pub const ALL: [Self; 8] = [
        Self::Reserve,
        Self::Discount,
        Self::LoanFees,
        Self::ServiceContractWithholding,
        Self::GapWithholding,
        Self::VsiWithholding,
        Self::MiscWithholding,
        Self::MiscProfitCommission,
    ];

    /// Key used by the accounts service for this amount.
    pub const fn store_key(self) -> &'static str {
        match self {
            Self::Reserve => "PayoffReserve",
            Self::Discount => "PayoffDiscount",
            Self::LoanFees => "PayoffLoanFees",
            Self::ServiceContractWithholding => "PayoffServiceContractWithholding",
            Self::GapWithholding => "PayoffGAPWithholding",
            Self::VsiWithholding => "PayoffVSIWithholding",
            Self::MiscWithholding => "PayoffMiscWithholding",
            Self::MiscProfitCommission => "PayoffMiscProfitComission",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.store_key() == value)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Reserve => "Reserve",
            Self::Discount => "Discount",
            Self::LoanFees => "Loan Fees",
            Self::ServiceContractWithholding => "Service Contract Withholding",
            Self::GapWithholding => "GAP Withholding",
            Self::VsiWithholding => "VSI Withholding",
            Self::MiscWithholding => "Miscellaneous Withholding",
            Self::MiscProfitCommission => "Miscellaneous Profit/Commission",
        }
    }

    pub const fn sign(self) -> LineSign {
        match self {
            Self::MiscProfitCommission => LineSign::Plus,
            _ => LineSign::Minus,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineSign {
    Plus,
    Minus,
    Equals,
}

impl LineSign {
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Equals => "=",
        }
    }
}

/// Payoff amounts entered on the take-payment screen, in cents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TakePaymentForm {
    amounts: BTreeMap<PayoffField, i64>,
}

impl TakePaymentForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cleared input stores zero.
    pub fn change(&mut self, field: PayoffField, value: Option<i64>) {
        self.amounts.insert(field, value.unwrap_or(0));
    }

    pub fn value(&self, field: PayoffField) -> i64 {
        self.amounts.get(&field).copied().unwrap_or(0)
    }

    /// Amounts keyed by store key, every field present.
    pub fn to_store(&self) -> BTreeMap<&'static str, i64> {
        PayoffField::ALL
            .into_iter()
            .map(|field| (field.store_key(), self.value(field)))
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        for field in PayoffField::ALL {
            if self.value(field) < 0 {
                bail!(
                    "{} cannot be negative -- enter zero or a positive amount",
                    field.label().to_lowercase()
                );
            }
        }
        Ok(())
    }
}

/// Balances computed by the accounts service for a cash deal, in cents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CashDealPayoff {
    #[serde(default)]
    pub down_payment_balance: Option<i64>,
    #[serde(default)]
    pub amount_financed_balance: Option<i64>,
    #[serde(default)]
    pub unearned_interest: Option<i64>,
}

impl CashDealPayoff {
    /// The screen shows the service's unearned-interest figure here; it is
    /// not derived from the entered amounts.
    pub fn net_check_from_lender(&self) -> Option<i64> {
        self.unearned_interest
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoffLine {
    pub label: &'static str,
    pub sign: Option<LineSign>,
    pub amount: String,
    pub field: Option<PayoffField>,
}

impl PayoffLine {
    pub fn render(&self) -> String {
        match self.sign {
            Some(sign) => format!("({}) {}: {}", sign.symbol(), self.label, self.amount),
            None => format!("{}: {}", self.label, self.amount),
        }
    }
}

fn display_amount(cents: Option<i64>) -> String {
    cents.map_or_else(String::new, format_cents)
}

/// The cash-deal payoff card, top to bottom.
pub fn cash_deal_lines(payoff: &CashDealPayoff, form: &TakePaymentForm) -> Vec<PayoffLine> {
    let mut lines = vec![
        PayoffLine {
            label: "Down Payment Balance",
            sign: None,
            amount: display_amount(payoff.down_payment_balance),
            field: None,
        },
        PayoffLine {
            label: "Amount Financed/Balance",
            sign: None,
            amount: display_amount(payoff.amount_financed_balance),
            field: None,
        },
    ];
    lines.extend(PayoffField::ALL.into_iter().map(|field| PayoffLine {
        label: field.label(),
        sign: Some(field.sign()),
        amount: format_cents(form.value(field)),
        field: Some(field),
    }));
    lines.push(PayoffLine {
        label: "Net Check from Lender",
        sign: Some(LineSign::Equals),
        amount: display_amount(payoff.net_check_from_lender()),
        field: None,
    });
    lines
}
