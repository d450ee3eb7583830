//! Pure value sanitizers
//!
//! These normalize raw scalar input into the canonical typed values the tag maps declare.
//! They are applied both before a value is stored and, on reads, before a value reaches
//! the caller. A sanitizer never fails for well-formed input already of its target type,
//! and fails with [`ErrorKind::Coercion`](crate::error::ErrorKind::Coercion) otherwise.

use crate::error::{ErrorKind, Result, TagnormError};
use crate::item::{Value, ValueType};
use crate::macros::coerce_err;

/// Coerce a raw value into an integer
///
/// Accepts integers, booleans (`0`/`1`), floats (truncated), and numeric strings with
/// surrounding whitespace.
///
/// # Examples
///
/// ```rust
/// use tagnorm::coerce::sanitize_int;
/// use tagnorm::item::Value;
///
/// assert_eq!(sanitize_int(&Value::Str(String::from("7")))?, 7);
/// assert!(sanitize_int(&Value::Str(String::from("seven"))).is_err());
/// # Ok::<(), tagnorm::error::TagnormError>(())
/// ```
///
/// # Errors
///
/// Non-numeric input fails with a coercion error.
pub fn sanitize_int(value: &Value) -> Result<i64> {
	match value {
		Value::Int(int) => Ok(*int),
		Value::Bool(flag) => Ok(i64::from(*flag)),
		Value::Float(float) => Ok(*float as i64),
		Value::Str(s) => match s.trim().parse::<i64>() {
			Ok(int) => Ok(int),
			Err(_) => Err(coerce_err!("integer", s.as_str())),
		},
		Value::Artwork(_) => Err(coerce_err!("integer", value.to_string())),
	}
}

/// Coerce a raw value into a year
///
/// Accepts integers and date-like strings (`YYYY`, `YYYY-MM-DD`, and similar), extracting
/// the leading year component.
///
/// # Examples
///
/// ```rust
/// use tagnorm::coerce::sanitize_year;
/// use tagnorm::item::Value;
///
/// assert_eq!(sanitize_year(&Value::Str(String::from("2001-05-03")))?, 2001);
/// assert!(sanitize_year(&Value::Str(String::from("abc"))).is_err());
/// # Ok::<(), tagnorm::error::TagnormError>(())
/// ```
///
/// # Errors
///
/// Input without a parsable year component fails with a coercion error.
pub fn sanitize_year(value: &Value) -> Result<i64> {
	match value {
		Value::Int(int) => Ok(*int),
		Value::Float(float) => Ok(*float as i64),
		Value::Str(s) => {
			let trimmed = s.trim();
			if let Ok(year) = trimmed.parse::<i64>() {
				return Ok(year);
			}

			// Date-like forms carry the year up front
			let digits = trimmed
				.bytes()
				.take_while(u8::is_ascii_digit)
				.count();
			if digits >= 4 {
				if let Ok(year) = trimmed[..4].parse::<i64>() {
					return Ok(year);
				}
			}

			Err(coerce_err!("year", s.as_str()))
		},
		_ => Err(coerce_err!("year", value.to_string())),
	}
}

/// Coerce a raw value into a boolean
///
/// Accepts booleans, the integers `0`/`1`, and the tokens `"0"`/`"1"`/`"false"`/`"true"`
/// (ASCII case-insensitive).
///
/// # Examples
///
/// ```rust
/// use tagnorm::coerce::sanitize_bool;
/// use tagnorm::item::Value;
///
/// assert!(sanitize_bool(&Value::Str(String::from("1")))?);
/// assert!(!sanitize_bool(&Value::Str(String::from("0")))?);
/// assert!(sanitize_bool(&Value::Str(String::from("maybe"))).is_err());
/// # Ok::<(), tagnorm::error::TagnormError>(())
/// ```
///
/// # Errors
///
/// Anything else fails with a coercion error.
pub fn sanitize_bool(value: &Value) -> Result<bool> {
	match value {
		Value::Bool(flag) => Ok(*flag),
		Value::Int(0) => Ok(false),
		Value::Int(1) => Ok(true),
		Value::Str(s) => match s.trim() {
			t if t.eq_ignore_ascii_case("1") || t.eq_ignore_ascii_case("true") => Ok(true),
			t if t.eq_ignore_ascii_case("0") || t.eq_ignore_ascii_case("false") => Ok(false),
			_ => Err(coerce_err!("boolean", s.as_str())),
		},
		_ => Err(coerce_err!("boolean", value.to_string())),
	}
}

/// Normalize a ReplayGain gain value to its canonical `"<float> dB"` form
///
/// # Examples
///
/// ```rust
/// use tagnorm::coerce::sanitize_replaygain_gain;
/// use tagnorm::item::Value;
///
/// assert_eq!(
/// 	sanitize_replaygain_gain(&Value::Str(String::from("-6.25")))?,
/// 	"-6.25 dB"
/// );
/// assert_eq!(
/// 	sanitize_replaygain_gain(&Value::Str(String::from("-6.25 dB")))?,
/// 	"-6.25 dB"
/// );
/// # Ok::<(), tagnorm::error::TagnormError>(())
/// ```
///
/// # Errors
///
/// Input without a numeric prefix fails with a coercion error.
pub fn sanitize_replaygain_gain(value: &Value) -> Result<String> {
	let raw = match value {
		Value::Str(s) => s.clone(),
		Value::Int(int) => int.to_string(),
		Value::Float(float) => float.to_string(),
		_ => return Err(coerce_err!("replaygain gain", value.to_string())),
	};

	let trimmed = raw.trim();
	let number = match trimmed.len().checked_sub(2) {
		Some(split) if trimmed.is_char_boundary(split) && trimmed[split..].eq_ignore_ascii_case("db") => {
			trimmed[..split].trim_end()
		},
		_ => trimmed,
	};

	match number.parse::<f64>() {
		Ok(gain) => Ok(format!("{gain} dB")),
		Err(_) => Err(coerce_err!("replaygain gain", raw)),
	}
}

/// Coerce a raw value into a ReplayGain peak
///
/// # Errors
///
/// Non-numeric input fails with a coercion error.
pub fn sanitize_replaygain_peak(value: &Value) -> Result<f64> {
	match value {
		Value::Float(float) => Ok(*float),
		Value::Int(int) => Ok(*int as f64),
		Value::Str(s) => match s.trim().parse::<f64>() {
			Ok(peak) => Ok(peak),
			Err(_) => Err(coerce_err!("replaygain peak", s.as_str())),
		},
		_ => Err(coerce_err!("replaygain peak", value.to_string())),
	}
}

// Converts a sanitized value into an entry's declared type. Scalars convert between one
// another with the same rules the sanitizers use; artwork never converts to or from a
// scalar.
pub(crate) fn cast_value(value: Value, target: ValueType) -> Result<Value> {
	let found = value.value_type();
	if found == target {
		return Ok(value);
	}

	if target == ValueType::Artwork || found == ValueType::Artwork {
		return Err(TagnormError::new(ErrorKind::TypeMismatch {
			expected: target,
			found,
		}));
	}

	match target {
		ValueType::Str => match value.to_native_string() {
			Some(text) => Ok(Value::Str(text)),
			None => Err(TagnormError::new(ErrorKind::TypeMismatch {
				expected: target,
				found,
			})),
		},
		ValueType::Int => sanitize_int(&value).map(Value::Int),
		ValueType::Bool => sanitize_bool(&value).map(Value::Bool),
		ValueType::Float => cast_float(&value).map(Value::Float),
		ValueType::Artwork => Err(TagnormError::new(ErrorKind::TypeMismatch {
			expected: target,
			found,
		})),
	}
}

fn cast_float(value: &Value) -> Result<f64> {
	match value {
		Value::Float(float) => Ok(*float),
		Value::Int(int) => Ok(*int as f64),
		Value::Bool(flag) => Ok(f64::from(u8::from(*flag))),
		Value::Str(s) => match s.trim().parse::<f64>() {
			Ok(float) => Ok(float),
			Err(_) => Err(coerce_err!("float", s.as_str())),
		},
		Value::Artwork(_) => Err(coerce_err!("float", value.to_string())),
	}
}
