//! Ether <-> wei conversion for amounts typed by the user and balances
//! returned by the contract.

use alloy_primitives::U256;

use crate::error::AtmError;

/// Decimal places of one ether.
pub const ETHER_DECIMALS: usize = 18;

fn wei_per_ether() -> U256 {
    U256::from(10u64).pow(U256::from(ETHER_DECIMALS))
}

/// Parse a decimal ether string ("1", "0.25", ".5") into wei.
///
/// Rejects signs, exponents, more than 18 fractional digits and values that
/// do not fit in 256 bits.
pub fn parse_ether(input: &str) -> Result<U256, AtmError> {
    let invalid = || AtmError::InvalidAmount(input.to_string());
    let trimmed = input.trim();
    let (whole, frac) = match trimmed.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (trimmed, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if frac.len() > ETHER_DECIMALS {
        return Err(invalid());
    }

    let whole_wei = if whole.is_empty() {
        U256::ZERO
    } else {
        let units = U256::from_str_radix(whole, 10).map_err(|_| invalid())?;
        units.checked_mul(wei_per_ether()).ok_or_else(invalid)?
    };

    let frac_wei = if frac.is_empty() {
        U256::ZERO
    } else {
        let padded = format!("{frac:0<width$}", width = ETHER_DECIMALS);
        U256::from_str_radix(&padded, 10).map_err(|_| invalid())?
    };

    whole_wei.checked_add(frac_wei).ok_or_else(invalid)
}

/// Format wei as a decimal ether string, e.g. `1.5` or `0.0`.
///
/// Trailing fractional zeros are dropped but one fractional digit is
/// always kept.
pub fn format_ether(wei: U256) -> String {
    let whole = wei / wei_per_ether();
    let frac = wei % wei_per_ether();
    let digits = format!("{:0>width$}", frac.to_string(), width = ETHER_DECIMALS);
    let digits = digits.trim_end_matches('0');
    if digits.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{digits}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ether(n: u64) -> U256 {
        U256::from(n) * wei_per_ether()
    }

    #[test]
    fn parse_whole_and_fractional() {
        assert_eq!(parse_ether("1").unwrap(), ether(1));
        assert_eq!(parse_ether(" 2 ").unwrap(), ether(2));
        assert_eq!(
            parse_ether("0.5").unwrap(),
            U256::from(500_000_000_000_000_000u64)
        );
        assert_eq!(
            parse_ether(".25").unwrap(),
            U256::from(250_000_000_000_000_000u64)
        );
        assert_eq!(
            parse_ether("0.000000000000000001").unwrap(),
            U256::from(1u64)
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in ["", ".", "abc", "-1", "1e18", "1.2.3", "0.0000000000000000001"] {
            assert!(
                matches!(parse_ether(bad), Err(AtmError::InvalidAmount(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn format_trims_zeros() {
        assert_eq!(format_ether(U256::ZERO), "0.0");
        assert_eq!(format_ether(ether(1)), "1.0");
        assert_eq!(format_ether(ether(12)), "12.0");
        assert_eq!(
            format_ether(U256::from(1_500_000_000_000_000_000u64)),
            "1.5"
        );
        assert_eq!(format_ether(U256::from(1u64)), "0.000000000000000001");
    }

    #[test]
    fn user_amount_survives_display() {
        let wei = parse_ether("3.14").unwrap();
        assert_eq!(format_ether(wei), "3.14");
    }
}
