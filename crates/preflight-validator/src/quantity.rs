// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Parsing of K8s resource quantities (`"8"`, `"1500m"`, `"24Gi"`, `"1e9"`).
//!
//! Values are kept as an exact fraction so that truncation happens once, at
//! the unit the caller asks for.

use thiserror::Error;

const GIB: i128 = 1 << 30;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
	#[error("empty quantity")]
	Empty,

	#[error("no digits in quantity")]
	MissingDigits,

	#[error("unknown suffix '{0}'")]
	UnknownSuffix(String),

	#[error("quantity out of range")]
	Overflow,
}

/// An exact quantity, `numerator / denominator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedQuantity {
	numerator: i128,
	denominator: i128,
}

impl ParsedQuantity {
	/// Whole units, truncated toward zero.
	pub fn whole(&self) -> i128 {
		self.numerator / self.denominator
	}

	/// Whole multiples of `unit`, truncated toward zero.
	pub fn whole_units_of(&self, unit: i128) -> i128 {
		match self.denominator.checked_mul(unit) {
			Some(den) => self.numerator / den,
			None => 0,
		}
	}

	/// Whole gibibytes (`bytes / 2^30`, floored for non-negative values).
	pub fn whole_gib(&self) -> i128 {
		self.whole_units_of(GIB)
	}
}

enum Scale {
	Decimal(i32),
	Binary(u32),
}

fn suffix_scale(suffix: &str) -> Result<Scale, QuantityError> {
	let scale = match suffix {
		"" => Scale::Decimal(0),
		"n" => Scale::Decimal(-9),
		"u" => Scale::Decimal(-6),
		"m" => Scale::Decimal(-3),
		"k" => Scale::Decimal(3),
		"M" => Scale::Decimal(6),
		"G" => Scale::Decimal(9),
		"T" => Scale::Decimal(12),
		"P" => Scale::Decimal(15),
		"E" => Scale::Decimal(18),
		"Ki" => Scale::Binary(1),
		"Mi" => Scale::Binary(2),
		"Gi" => Scale::Binary(3),
		"Ti" => Scale::Binary(4),
		"Pi" => Scale::Binary(5),
		"Ei" => Scale::Binary(6),
		_ => {
			// "1e3" / "1E-2": decimal exponent. A bare "E" is exa, handled above.
			let exponent = suffix
				.strip_prefix('e')
				.or_else(|| suffix.strip_prefix('E'))
				.filter(|rest| !rest.is_empty())
				.and_then(|rest| rest.parse::<i32>().ok())
				.ok_or_else(|| QuantityError::UnknownSuffix(suffix.to_string()))?;
			Scale::Decimal(exponent)
		}
	};
	Ok(scale)
}

fn pow10(exp: u32) -> Result<i128, QuantityError> {
	10i128.checked_pow(exp).ok_or(QuantityError::Overflow)
}

/// Parse a K8s quantity string.
pub fn parse_quantity(input: &str) -> Result<ParsedQuantity, QuantityError> {
	let s = input.trim();
	if s.is_empty() {
		return Err(QuantityError::Empty);
	}

	let (negative, rest) = match s.as_bytes()[0] {
		b'-' => (true, &s[1..]),
		b'+' => (false, &s[1..]),
		_ => (false, s),
	};

	let number_len = rest
		.find(|c: char| !(c.is_ascii_digit() || c == '.'))
		.unwrap_or(rest.len());
	let (number, suffix) = rest.split_at(number_len);

	let (int_part, frac_part) = match number.split_once('.') {
		Some((i, f)) => (i, f),
		None => (number, ""),
	};
	if frac_part.contains('.') {
		return Err(QuantityError::UnknownSuffix(suffix.to_string()));
	}
	if int_part.is_empty() && frac_part.is_empty() {
		return Err(QuantityError::MissingDigits);
	}

	let mut numerator: i128 = 0;
	for digit in int_part.bytes().chain(frac_part.bytes()) {
		numerator = numerator
			.checked_mul(10)
			.and_then(|n| n.checked_add(i128::from(digit - b'0')))
			.ok_or(QuantityError::Overflow)?;
	}
	let frac_len = u32::try_from(frac_part.len()).map_err(|_| QuantityError::Overflow)?;
	let mut denominator = pow10(frac_len)?;

	match suffix_scale(suffix)? {
		Scale::Decimal(exp) if exp >= 0 => {
			numerator = numerator
				.checked_mul(pow10(exp.unsigned_abs())?)
				.ok_or(QuantityError::Overflow)?;
		}
		Scale::Decimal(exp) => {
			denominator = denominator
				.checked_mul(pow10(exp.unsigned_abs())?)
				.ok_or(QuantityError::Overflow)?;
		}
		Scale::Binary(power) => {
			let factor = 1024i128.checked_pow(power).ok_or(QuantityError::Overflow)?;
			numerator = numerator
				.checked_mul(factor)
				.ok_or(QuantityError::Overflow)?;
		}
	}

	if negative {
		numerator = -numerator;
	}

	Ok(ParsedQuantity {
		numerator,
		denominator,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn whole(s: &str) -> i128 {
		parse_quantity(s).unwrap().whole()
	}

	#[test]
	fn plain_integers() {
		assert_eq!(whole("8"), 8);
		assert_eq!(whole("0"), 0);
		assert_eq!(whole("+3"), 3);
		assert_eq!(whole("-3"), -3);
	}

	#[test]
	fn millicores_truncate_toward_zero() {
		assert_eq!(whole("1500m"), 1);
		assert_eq!(whole("500m"), 0);
		assert_eq!(whole("2000m"), 2);
		assert_eq!(whole("-1500m"), -1);
	}

	#[test]
	fn fractional_values_truncate() {
		assert_eq!(whole("1.5"), 1);
		assert_eq!(whole(".5"), 0);
		assert_eq!(whole("3."), 3);
	}

	#[test]
	fn binary_suffixes() {
		assert_eq!(whole("1Ki"), 1024);
		assert_eq!(whole("24Gi"), 24 * (1 << 30));
		assert_eq!(parse_quantity("24Gi").unwrap().whole_gib(), 24);
		assert_eq!(parse_quantity("1.5Gi").unwrap().whole_gib(), 1);
		assert_eq!(parse_quantity("1Ti").unwrap().whole_gib(), 1024);
	}

	#[test]
	fn decimal_suffixes_and_exponents() {
		assert_eq!(whole("1k"), 1_000);
		assert_eq!(whole("2M"), 2_000_000);
		assert_eq!(whole("1E"), 1_000_000_000_000_000_000);
		assert_eq!(whole("1e3"), 1_000);
		assert_eq!(whole("15E-1"), 1);
		// 64G is 64e9 bytes, just under 60 GiB.
		assert_eq!(parse_quantity("64G").unwrap().whole_gib(), 59);
	}

	#[test]
	fn kubelet_style_memory_in_kib() {
		// A typical node reports capacity in Ki.
		assert_eq!(parse_quantity("32778020Ki").unwrap().whole_gib(), 31);
	}

	#[test]
	fn rejects_garbage() {
		assert_eq!(parse_quantity(""), Err(QuantityError::Empty));
		assert_eq!(parse_quantity("Gi"), Err(QuantityError::MissingDigits));
		assert_eq!(parse_quantity("."), Err(QuantityError::MissingDigits));
		assert!(matches!(
			parse_quantity("12 cores"),
			Err(QuantityError::UnknownSuffix(_))
		));
		assert!(matches!(
			parse_quantity("1.2.3"),
			Err(QuantityError::UnknownSuffix(_))
		));
		assert!(matches!(
			parse_quantity("1e"),
			Err(QuantityError::UnknownSuffix(_))
		));
	}

	#[test]
	fn rejects_overflow() {
		assert_eq!(
			parse_quantity("99999999999999999999999999999999999999999"),
			Err(QuantityError::Overflow)
		);
		assert_eq!(parse_quantity("1e400"), Err(QuantityError::Overflow));
	}

	proptest! {
		#[test]
		fn integer_strings_parse_to_themselves(n in 0i64..i64::MAX) {
			prop_assert_eq!(whole(&n.to_string()), i128::from(n));
		}

		#[test]
		fn millis_truncate_like_integer_division(m in 0u64..10_000_000) {
			prop_assert_eq!(whole(&format!("{m}m")), i128::from(m / 1000));
		}

		#[test]
		fn gib_suffix_round_trips_whole_gib(g in 0u32..1_000_000) {
			prop_assert_eq!(parse_quantity(&format!("{g}Gi")).unwrap().whole_gib(), i128::from(g));
		}
	}
}
