//! Compound `"N/M"` number pair handling
//!
//! The APE family stores track/disc number and total as one compound text value under
//! `Track`/`Disc`. Both halves are addressed independently: setting one half preserves
//! the other half's last-known text, clearing one half empties it, and the native entry
//! is only deleted once both halves are absent or zero.
//!
//! MP4 keeps native number/total tuples instead and reuses only the [`PairHalf`]
//! addressing.

use crate::dict::{NativeValue, TagDict};

/// Which half of a compound number pair is addressed
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum PairHalf {
	/// The number before the separator
	Number,
	/// The total after the separator
	Total,
}

fn split_pair(text: &str) -> (&str, &str) {
	match text.split_once('/') {
		Some((number, total)) => (number.trim(), total.trim()),
		None => (text.trim(), ""),
	}
}

fn is_zero(half: &str) -> bool {
	half.is_empty() || half.parse::<u64>() == Ok(0)
}

/// Read one half of a compound pair, `None` when absent or empty
pub(crate) fn pair_half(dict: &TagDict, name: &str, half: PairHalf) -> Option<String> {
	let text = dict.get_first(name).and_then(NativeValue::text)?;
	let (number, total) = split_pair(text);

	let addressed = match half {
		PairHalf::Number => number,
		PairHalf::Total => total,
	};

	if addressed.is_empty() {
		return None;
	}

	Some(addressed.to_owned())
}

/// Write one half of a compound pair, preserving the other half's text
///
/// An absent entry is created with the unaddressed half left empty (`"3/"`, `"/12"`).
pub(crate) fn set_pair_half(dict: &mut TagDict, name: &str, half: PairHalf, value: i64) {
	let current = dict
		.get_first(name)
		.and_then(NativeValue::text)
		.unwrap_or_default()
		.to_owned();
	let (number, total) = split_pair(&current);

	let text = match half {
		PairHalf::Number => format!("{value}/{total}"),
		PairHalf::Total => format!("{number}/{value}"),
	};

	dict.set_one(name.to_owned(), NativeValue::Text(text));
}

/// Clear one half of a compound pair
///
/// The entry itself is deleted once the other half is absent or zero; clearing an
/// absent entry is a no-op.
pub(crate) fn clear_pair_half(dict: &mut TagDict, name: &str, half: PairHalf) {
	let Some(current) = dict.get_first(name).and_then(NativeValue::text) else {
		return;
	};
	let current = current.to_owned();
	let (number, total) = split_pair(&current);

	let kept = match half {
		PairHalf::Number => total,
		PairHalf::Total => number,
	};

	if is_zero(kept) {
		dict.remove(name);
		return;
	}

	let text = match half {
		PairHalf::Number => format!("/{total}"),
		PairHalf::Total => format!("{number}/"),
	};

	dict.set_one(name.to_owned(), NativeValue::Text(text));
}
