//! Responsive image attribute helpers.

/// URL of the first candidate in a `srcset` list: the token before the
/// first descriptor of the first comma-separated entry.
pub fn first_candidate(srcset: &str) -> Option<&str> {
	srcset.split(',').next()?.split_whitespace().next()
}

/// Largest numeric token in a `sizes` attribute.
///
/// The attribute is split on commas and closing parentheses and each piece is
/// read as a leading float, so `(max-width: 800px) 800px` yields `800`. Media
/// conditions are not evaluated. Zero and unparsable pieces are ignored; with
/// nothing left the result is negative infinity, ranking the source last.
pub fn max_declared_size(sizes: &str) -> f64 {
	sizes
		.split([',', ')'])
		.filter_map(|piece| parse_float_prefix(piece.trim()))
		.filter(|value| *value != 0.0)
		.fold(f64::NEG_INFINITY, f64::max)
}

/// Longest leading decimal number of `input`, if any.
fn parse_float_prefix(input: &str) -> Option<f64> {
	let bytes = input.as_bytes();
	let mut end = 0;

	if matches!(bytes.first(), Some(b'+' | b'-')) {
		end += 1;
	}
	let int_start = end;
	while bytes.get(end).is_some_and(u8::is_ascii_digit) {
		end += 1;
	}
	let mut digits = end - int_start;
	if bytes.get(end) == Some(&b'.') {
		let frac_start = end + 1;
		let mut frac_end = frac_start;
		while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
			frac_end += 1;
		}
		if digits > 0 || frac_end > frac_start {
			digits += frac_end - frac_start;
			end = frac_end;
		}
	}
	if digits == 0 {
		return None;
	}
	if matches!(bytes.get(end), Some(b'e' | b'E')) {
		let mut exp_end = end + 1;
		if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
			exp_end += 1;
		}
		let exp_digits_start = exp_end;
		while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
			exp_end += 1;
		}
		if exp_end > exp_digits_start {
			end = exp_end;
		}
	}

	input[..end].parse().ok()
}
