//! Fixed-decimals conversion between whole tokens and ledger base units.

use alloy_primitives::utils::{format_units, parse_units, UnitsError};
use alloy_primitives::U256;

/// Decimals of the CookShare ledger token
pub const TOKEN_DECIMALS: u8 = 18;

/// Scale a whole-token amount to base units (250 -> 250 * 10^18)
pub fn to_base_units(tokens: u64) -> Result<U256, UnitsError> {
    parse_tokens(&tokens.to_string())
}

/// Parse a decimal token amount ("1.5", "100") into base units
pub fn parse_tokens(input: &str) -> Result<U256, UnitsError> {
    Ok(parse_units(input.trim(), TOKEN_DECIMALS)?.get_absolute())
}

/// Render base units as a token amount, trimming trailing zeros
pub fn format_tokens(amount: U256) -> Result<String, UnitsError> {
    let formatted = format_units(amount, TOKEN_DECIMALS)?;
    if !formatted.contains('.') {
        return Ok(formatted);
    }
    Ok(formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_cost_scaling() {
        assert_eq!(to_base_units(250).unwrap().to_string(), "250000000000000000000");
        assert_eq!(to_base_units(0).unwrap(), U256::ZERO);
    }

    #[test]
    fn test_max_tokens_fit() {
        let expected = U256::from(u64::MAX) * U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(to_base_units(u64::MAX).unwrap(), expected);
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!(parse_tokens("100").unwrap().to_string(), "100000000000000000000");
        assert_eq!(parse_tokens(" 1.5 ").unwrap().to_string(), "1500000000000000000");
        assert!(parse_tokens("lots").is_err());
    }

    #[test]
    fn test_format_tokens() {
        assert_eq!(format_tokens(to_base_units(250).unwrap()).unwrap(), "250");
        assert_eq!(format_tokens(parse_tokens("1.5").unwrap()).unwrap(), "1.5");
        assert_eq!(format_tokens(U256::from(1u64)).unwrap(), "0.000000000000000001");
        assert_eq!(format_tokens(U256::ZERO).unwrap(), "0");
    }

    #[test]
    fn test_format_beyond_u128() {
        let big = U256::from(1u64) << 128;
        assert_eq!(format_tokens(big).unwrap(), "340282366920938463463.374607431768211456");
    }
}
