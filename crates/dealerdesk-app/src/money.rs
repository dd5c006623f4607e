// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Dollar amounts held as integer cents.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("invalid money value")]
    Invalid,
    #[error("negative money value")]
    Negative,
}

/// Parses `1234.5`, `$1,234.50` or `.75`; blank input is `None`.
pub fn parse_optional_cents(input: &str) -> Result<Option<i64>, MoneyError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse_cents(trimmed).map(Some)
}

pub fn parse_cents(input: &str) -> Result<i64, MoneyError> {
    let clean = input.trim().replace(',', "");
    if clean.starts_with('-') {
        return Err(MoneyError::Negative);
    }
    let clean = clean.strip_prefix('$').unwrap_or(&clean);
    if clean.is_empty() || clean == "." {
        return Err(MoneyError::Invalid);
    }

    let (whole, frac) = clean.split_once('.').unwrap_or((clean, ""));
    if frac.len() > 2 || frac.contains('.') {
        return Err(MoneyError::Invalid);
    }
    let dollars = digits(whole)?;
    let cents = match frac.len() {
        0 => 0,
        1 => digits(frac)? * 10,
        _ => digits(frac)?,
    };

    dollars
        .checked_mul(100)
        .and_then(|value| value.checked_add(cents))
        .ok_or(MoneyError::Invalid)
}

/// Renders `-$1,234.56` style amounts.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    format!(
        "{sign}${}.{:02}",
        group_thousands(magnitude / 100),
        magnitude % 100
    )
}

fn digits(input: &str) -> Result<i64, MoneyError> {
    if input.is_empty() {
        return Ok(0);
    }
    if !input.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(MoneyError::Invalid);
    }
    input.parse::<i64>().map_err(|_| MoneyError::Invalid)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
