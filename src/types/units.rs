//! Ether denominations and token amounts.

use std::{cmp::Ordering, fmt, ops::Add};

use alloy::primitives::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Named Ether denominations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Denomination {
    Wei,
    KWei,
    MWei,
    GWei,
    Szabo,
    Finney,
    Ether,
    KEther,
    MEther,
    GEther,
    TEther,
}

impl Denomination {
    /// All denominations, smallest first.
    pub const ALL: [Denomination; 11] = [
        Denomination::Wei,
        Denomination::KWei,
        Denomination::MWei,
        Denomination::GWei,
        Denomination::Szabo,
        Denomination::Finney,
        Denomination::Ether,
        Denomination::KEther,
        Denomination::MEther,
        Denomination::GEther,
        Denomination::TEther,
    ];

    /// Number of decimals relative to wei.
    pub const fn decimals(self) -> u8 {
        match self {
            Denomination::Wei => 0,
            Denomination::KWei => 3,
            Denomination::MWei => 6,
            Denomination::GWei => 9,
            Denomination::Szabo => 12,
            Denomination::Finney => 15,
            Denomination::Ether => 18,
            Denomination::KEther => 21,
            Denomination::MEther => 24,
            Denomination::GEther => 27,
            Denomination::TEther => 30,
        }
    }

    /// Lowercase name, as used by web3 tooling.
    pub const fn name(self) -> &'static str {
        match self {
            Denomination::Wei => "wei",
            Denomination::KWei => "kwei",
            Denomination::MWei => "mwei",
            Denomination::GWei => "gwei",
            Denomination::Szabo => "szabo",
            Denomination::Finney => "finney",
            Denomination::Ether => "ether",
            Denomination::KEther => "kether",
            Denomination::MEther => "mether",
            Denomination::GEther => "gether",
            Denomination::TEther => "tether",
        }
    }
}

impl std::str::FromStr for Denomination {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Denomination::ALL
            .into_iter()
            .find(|d| d.name() == lower)
            .ok_or_else(|| format!("Invalid denomination: {}", s))
    }
}

/// An amount of the native coin, stored exactly in wei.
///
/// The denomination only records how the amount was created and how it is
/// displayed; equality and ordering compare wei.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Unit {
    wei: U256,
    denomination: Denomination,
}

impl Unit {
    /// Parse a human-readable amount in the given denomination.
    pub fn parse(amount: &str, denomination: Denomination) -> Result<Self> {
        let wei = parse_units(amount, denomination.decimals()).map_err(AppError::Parse)?;
        Ok(Self { wei, denomination })
    }

    /// Build from a decimal amount in the given denomination.
    pub fn from_decimal(amount: Decimal, denomination: Denomination) -> Result<Self> {
        Self::parse(&amount.to_string(), denomination)
    }

    /// Build from an exact wei amount.
    pub fn from_wei(wei: U256) -> Self {
        Self { wei, denomination: Denomination::Wei }
    }

    /// Build from a decimal GWei amount.
    pub fn from_gwei(amount: Decimal) -> Result<Self> {
        Self::from_decimal(amount, Denomination::GWei)
    }

    /// Build from a decimal Ether amount.
    pub fn from_ether(amount: Decimal) -> Result<Self> {
        Self::from_decimal(amount, Denomination::Ether)
    }

    /// The exact amount in wei.
    pub fn wei(&self) -> U256 {
        self.wei
    }

    /// The denomination this amount was created in.
    pub fn denomination(&self) -> Denomination {
        self.denomination
    }

    /// The amount expressed in `denomination`.
    ///
    /// Fails with `NumericOverflow` when the amount does not fit a `Decimal`.
    pub fn in_denomination(&self, denomination: Denomination) -> Result<Decimal> {
        u256_to_decimal(self.wei, denomination.decimals())
    }

    pub fn kwei(&self) -> Result<Decimal> {
        self.in_denomination(Denomination::KWei)
    }

    pub fn mwei(&self) -> Result<Decimal> {
        self.in_denomination(Denomination::MWei)
    }

    pub fn gwei(&self) -> Result<Decimal> {
        self.in_denomination(Denomination::GWei)
    }

    pub fn szabo(&self) -> Result<Decimal> {
        self.in_denomination(Denomination::Szabo)
    }

    pub fn finney(&self) -> Result<Decimal> {
        self.in_denomination(Denomination::Finney)
    }

    pub fn ether(&self) -> Result<Decimal> {
        self.in_denomination(Denomination::Ether)
    }

    pub fn kether(&self) -> Result<Decimal> {
        self.in_denomination(Denomination::KEther)
    }

    pub fn mether(&self) -> Result<Decimal> {
        self.in_denomination(Denomination::MEther)
    }

    pub fn gether(&self) -> Result<Decimal> {
        self.in_denomination(Denomination::GEther)
    }

    pub fn tether(&self) -> Result<Decimal> {
        self.in_denomination(Denomination::TEther)
    }

    /// Subtract, failing instead of going below zero.
    pub fn checked_sub(&self, other: Unit) -> Result<Unit> {
        self.wei.checked_sub(other.wei).map(Unit::from_wei).ok_or_else(|| {
            AppError::Arithmetic(format!("{} wei is less than {} wei", self.wei, other.wei))
        })
    }

    /// Multiply the wei amount by a decimal factor, truncating to whole wei.
    pub fn scale(&self, factor: Decimal) -> Result<Unit> {
        if factor.is_sign_negative() {
            return Err(AppError::Arithmetic("Scale factor cannot be negative".to_string()));
        }
        let wei: u128 = self.wei.try_into().map_err(|_| {
            AppError::NumericOverflow(format!("{} wei exceeds u128 range", self.wei))
        })?;
        let scaled = Decimal::from(wei)
            .checked_mul(factor)
            .ok_or_else(|| AppError::NumericOverflow(format!("{} wei * {}", wei, factor)))?;
        let scaled: u128 = scaled
            .trunc()
            .try_into()
            .map_err(|_| AppError::NumericOverflow(format!("{} wei * {}", wei, factor)))?;
        Ok(Unit::from_wei(U256::from(scaled)))
    }
}

impl Add for Unit {
    type Output = Unit;

    fn add(self, rhs: Unit) -> Unit {
        Unit::from_wei(self.wei.saturating_add(rhs.wei))
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.wei == other.wei
    }
}

impl Eq for Unit {}

impl PartialOrd for Unit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Unit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.wei.cmp(&other.wei)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            format_units(self.wei, self.denomination.decimals()),
            self.denomination.name()
        )
    }
}

/// An amount of a token with a fixed number of decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAmount {
    wei: U256,
    decimals: u8,
}

impl TokenAmount {
    /// Parse a human-readable amount (e.g. "1.5") for a token with `decimals`.
    pub fn parse(amount: &str, decimals: u8) -> Result<Self> {
        let wei = parse_units(amount, decimals).map_err(AppError::Parse)?;
        Ok(Self { wei, decimals })
    }

    /// Build from a human-readable decimal amount.
    pub fn from_decimal(amount: Decimal, decimals: u8) -> Result<Self> {
        Self::parse(&amount.to_string(), decimals)
    }

    /// Build from an amount in the token's smallest unit.
    pub fn from_wei(wei: U256, decimals: u8) -> Self {
        Self { wei, decimals }
    }

    /// Amount in the smallest unit.
    pub fn wei(&self) -> U256 {
        self.wei
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Human-readable amount; fails when it does not fit a `Decimal`.
    pub fn amount(&self) -> Result<Decimal> {
        u256_to_decimal(self.wei, self.decimals)
    }

    /// Human-readable amount as an exact string.
    pub fn formatted(&self) -> String {
        format_units(self.wei, self.decimals)
    }

    /// Keep the human amount and recompute wei for `new_decimals`.
    ///
    /// Digits beyond `new_decimals` are truncated.
    pub fn change_decimals(&mut self, new_decimals: u8) -> Result<U256> {
        self.wei = parse_units(&self.formatted(), new_decimals).map_err(AppError::Parse)?;
        self.decimals = new_decimals;
        Ok(self.wei)
    }

    fn ensure_same_decimals(&self, other: &TokenAmount) -> Result<()> {
        if self.decimals != other.decimals {
            return Err(AppError::Arithmetic(format!(
                "The values have different decimals: {} and {}",
                self.decimals, other.decimals
            )));
        }
        Ok(())
    }

    pub fn checked_add(&self, other: &TokenAmount) -> Result<TokenAmount> {
        self.ensure_same_decimals(other)?;
        let wei = self
            .wei
            .checked_add(other.wei)
            .ok_or_else(|| AppError::NumericOverflow("token amount addition".to_string()))?;
        Ok(TokenAmount::from_wei(wei, self.decimals))
    }

    pub fn checked_sub(&self, other: &TokenAmount) -> Result<TokenAmount> {
        self.ensure_same_decimals(other)?;
        let wei = self.wei.checked_sub(other.wei).ok_or_else(|| {
            AppError::Arithmetic(format!("{} is less than {}", self.formatted(), other.formatted()))
        })?;
        Ok(TokenAmount::from_wei(wei, self.decimals))
    }

    /// Multiply human amounts.
    pub fn checked_mul(&self, other: &TokenAmount) -> Result<TokenAmount> {
        self.ensure_same_decimals(other)?;
        let product = self
            .amount()?
            .checked_mul(other.amount()?)
            .ok_or_else(|| AppError::NumericOverflow("token amount multiplication".to_string()))?;
        TokenAmount::from_decimal(product, self.decimals)
    }

    /// Divide human amounts.
    pub fn checked_div(&self, other: &TokenAmount) -> Result<TokenAmount> {
        self.ensure_same_decimals(other)?;
        if other.wei.is_zero() {
            return Err(AppError::Arithmetic("Division by zero".to_string()));
        }
        let quotient = self
            .amount()?
            .checked_div(other.amount()?)
            .ok_or_else(|| AppError::NumericOverflow("token amount division".to_string()))?;
        TokenAmount::from_decimal(quotient, self.decimals)
    }
}

impl PartialOrd for TokenAmount {
    /// Amounts with different decimals are not comparable.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.decimals != other.decimals {
            return None;
        }
        Some(self.wei.cmp(&other.wei))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

/// Format a U256 value with decimals to a human-readable string.
pub fn format_units(value: U256, decimals: u8) -> String {
    if value == U256::ZERO {
        return "0".to_string();
    }

    let value_str = value.to_string();
    let decimals = decimals as usize;

    if decimals == 0 {
        return value_str;
    }

    let len = value_str.len();
    if len <= decimals {
        let zeros = decimals - len;
        let decimal_part = value_str.trim_end_matches('0');
        format!("0.{}{}", "0".repeat(zeros), decimal_part)
    } else {
        let (integer, decimal) = value_str.split_at(len - decimals);
        let decimal = decimal.trim_end_matches('0');
        if decimal.is_empty() {
            integer.to_string()
        } else {
            format!("{}.{}", integer, decimal)
        }
    }
}

/// Parse a human-readable amount string to U256 with decimals.
pub fn parse_units(amount: &str, decimals: u8) -> std::result::Result<U256, String> {
    let amount = amount.trim();

    if amount.is_empty() {
        return Err("Amount cannot be empty".to_string());
    }

    if amount.starts_with('-') {
        return Err("Amount cannot be negative".to_string());
    }

    let decimals = decimals as usize;
    let multiplier = U256::from(10).pow(U256::from(decimals));
    let parts: Vec<&str> = amount.split('.').collect();

    match parts.as_slice() {
        [integer] => {
            let value = integer.parse::<U256>().map_err(|e| format!("Invalid amount: {}", e))?;
            value.checked_mul(multiplier).ok_or_else(|| "Amount is too large".to_string())
        }
        [integer, fraction] => {
            let mut fraction = fraction.to_string();

            // Truncate or pad the fraction to exactly `decimals` digits.
            if fraction.len() > decimals {
                fraction.truncate(decimals);
            } else {
                fraction.push_str(&"0".repeat(decimals - fraction.len()));
            }

            let integer_value = if integer.is_empty() {
                U256::ZERO
            } else {
                integer.parse::<U256>().map_err(|e| format!("Invalid integer part: {}", e))?
            };

            let fraction_value = if fraction.is_empty() {
                U256::ZERO
            } else {
                fraction.parse::<U256>().map_err(|e| format!("Invalid fraction part: {}", e))?
            };

            integer_value
                .checked_mul(multiplier)
                .and_then(|v| v.checked_add(fraction_value))
                .ok_or_else(|| "Amount is too large".to_string())
        }
        _ => Err("Invalid amount format".to_string()),
    }
}

/// Convert U256 to Decimal with proper scaling.
pub fn u256_to_decimal(value: U256, decimals: u8) -> Result<Decimal> {
    let formatted = format_units(value, decimals);
    formatted.parse::<Decimal>().map_err(|_| {
        AppError::NumericOverflow(format!("{} does not fit a decimal", formatted))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const ONE_ETHER: u64 = 1_000_000_000_000_000_000;

    // ============================================================================
    // Denomination Tests
    // ============================================================================

    #[test]
    fn test_denomination_decimals_step_by_three() {
        for (i, denomination) in Denomination::ALL.iter().enumerate() {
            assert_eq!(denomination.decimals() as usize, i * 3);
        }
    }

    #[test]
    fn test_denomination_from_str() {
        assert_eq!("gwei".parse::<Denomination>().unwrap(), Denomination::GWei);
        assert_eq!("Ether".parse::<Denomination>().unwrap(), Denomination::Ether);
        assert!("satoshi".parse::<Denomination>().is_err());
    }

    // ============================================================================
    // Unit Tests
    // ============================================================================

    #[test]
    fn test_unit_ether_conversions() {
        let unit = Unit::parse("1.5", Denomination::Ether).unwrap();
        assert_eq!(unit.wei(), U256::from(1_500_000_000_000_000_000u64));
        assert_eq!(unit.ether().unwrap(), Decimal::from_str("1.5").unwrap());
        assert_eq!(unit.gwei().unwrap(), Decimal::from(1_500_000_000u64));
        assert_eq!(unit.finney().unwrap(), Decimal::from(1500));
    }

    #[test]
    fn test_unit_from_gwei() {
        let unit = Unit::from_gwei(Decimal::from(25)).unwrap();
        assert_eq!(unit.wei(), U256::from(25_000_000_000u64));
        assert_eq!(unit.denomination(), Denomination::GWei);
        assert_eq!(unit.to_string(), "25 gwei");
    }

    #[test]
    fn test_unit_equality_ignores_denomination() {
        let a = Unit::from_wei(U256::from(ONE_ETHER));
        let b = Unit::from_ether(Decimal::ONE).unwrap();
        assert_eq!(a, b);
        assert!(Unit::from_gwei(Decimal::ONE).unwrap() < b);
    }

    #[test]
    fn test_unit_add_and_checked_sub() {
        let a = Unit::from_ether(Decimal::ONE).unwrap();
        let b = Unit::from_gwei(Decimal::from(1_000_000_000u64)).unwrap();

        let sum = a + b;
        assert_eq!(sum.wei(), U256::from(2 * ONE_ETHER));
        assert_eq!(sum.denomination(), Denomination::Wei);

        assert!(a.checked_sub(sum).is_err());
        assert_eq!(sum.checked_sub(a).unwrap(), b);
    }

    #[test]
    fn test_unit_scale_truncates() {
        let price = Unit::from_wei(U256::from(100u64));
        let bumped = price.scale(Decimal::from_str("1.11").unwrap()).unwrap();
        assert_eq!(bumped.wei(), U256::from(111u64));
        let truncated = price.scale(Decimal::from_str("1.005").unwrap()).unwrap();
        assert_eq!(truncated.wei(), U256::from(100u64));
        assert!(price.scale(Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_unit_negative_rejected() {
        assert!(Unit::parse("-1", Denomination::Ether).is_err());
    }

    // ============================================================================
    // TokenAmount Tests
    // ============================================================================

    #[test]
    fn test_token_amount_parse() {
        let amount = TokenAmount::parse("1.5", 6).unwrap();
        assert_eq!(amount.wei(), U256::from(1_500_000u64));
        assert_eq!(amount.amount().unwrap(), Decimal::from_str("1.5").unwrap());
        assert_eq!(amount.to_string(), "1.5");
    }

    #[test]
    fn test_token_amount_change_decimals() {
        let mut amount = TokenAmount::parse("2.123456789", 18).unwrap();
        let wei = amount.change_decimals(6).unwrap();
        assert_eq!(wei, U256::from(2_123_456u64));
        assert_eq!(amount.decimals(), 6);
    }

    #[test]
    fn test_token_amount_mismatched_decimals() {
        let a = TokenAmount::parse("1", 6).unwrap();
        let b = TokenAmount::parse("1", 18).unwrap();

        assert!(matches!(a.checked_add(&b), Err(AppError::Arithmetic(_))));
        assert!(matches!(a.checked_sub(&b), Err(AppError::Arithmetic(_))));
        assert!(a.partial_cmp(&b).is_none());
    }

    #[test]
    fn test_token_amount_arithmetic() {
        let a = TokenAmount::parse("3", 6).unwrap();
        let b = TokenAmount::parse("1.5", 6).unwrap();

        assert_eq!(a.checked_add(&b).unwrap().formatted(), "4.5");
        assert_eq!(a.checked_sub(&b).unwrap().formatted(), "1.5");
        assert_eq!(a.checked_mul(&b).unwrap().formatted(), "4.5");
        assert_eq!(a.checked_div(&b).unwrap().formatted(), "2");
        assert!(b.checked_sub(&a).is_err());
        assert!(a > b);
    }

    #[test]
    fn test_token_amount_div_by_zero() {
        let a = TokenAmount::parse("3", 6).unwrap();
        let zero = TokenAmount::from_wei(U256::ZERO, 6);
        assert!(a.checked_div(&zero).is_err());
    }

    // ============================================================================
    // format_units / parse_units Tests
    // ============================================================================

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(U256::from(ONE_ETHER), 18), "1");
        assert_eq!(format_units(U256::from(500_000_000_000_000_000u64), 18), "0.5");
        assert_eq!(format_units(U256::from(1_000_000u64), 6), "1");
        assert_eq!(format_units(U256::ZERO, 18), "0");
        assert_eq!(format_units(U256::from(12345u64), 0), "12345");
    }

    #[test]
    fn test_format_units_small_values() {
        assert_eq!(format_units(U256::from(1u64), 18), "0.000000000000000001");
        assert_eq!(format_units(U256::from(100u64), 18), "0.0000000000000001");
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_units("1", 18).unwrap(), U256::from(ONE_ETHER));
        assert_eq!(parse_units(".5", 18).unwrap(), U256::from(500_000_000_000_000_000u64));
        assert_eq!(parse_units("  1.5  ", 6).unwrap(), U256::from(1_500_000u64));
        assert_eq!(parse_units("1.1234567", 6).unwrap(), U256::from(1_123_456u64));
        assert_eq!(parse_units("100", 0).unwrap(), U256::from(100u64));
    }

    #[test]
    fn test_parse_units_errors() {
        assert_eq!(parse_units("-1", 18).unwrap_err(), "Amount cannot be negative");
        assert_eq!(parse_units("   ", 18).unwrap_err(), "Amount cannot be empty");
        assert!(parse_units("1.2.3", 18).is_err());
        assert!(parse_units("1.5abc", 18).is_err());
    }

    #[test]
    fn test_u256_to_decimal() {
        let wei = U256::from(1_500_000_000_000_000_000u64);
        assert_eq!(u256_to_decimal(wei, 18).unwrap(), Decimal::new(15, 1));
        assert_eq!(u256_to_decimal(U256::ZERO, 18).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_decimal_overflow_is_an_error() {
        assert!(matches!(u256_to_decimal(U256::MAX, 0), Err(AppError::NumericOverflow(_))));

        let unit = Unit::from_wei(U256::MAX);
        assert!(matches!(unit.gwei(), Err(AppError::NumericOverflow(_))));
        assert_eq!(unit.wei(), U256::MAX);

        let huge = TokenAmount::from_wei(U256::MAX, 0);
        let two = TokenAmount::from_wei(U256::from(2u64), 0);
        assert!(matches!(huge.amount(), Err(AppError::NumericOverflow(_))));
        assert!(matches!(huge.checked_mul(&two), Err(AppError::NumericOverflow(_))));
        assert!(matches!(huge.checked_div(&two), Err(AppError::NumericOverflow(_))));
        assert_eq!(huge.formatted(), U256::MAX.to_string());
    }
}
