//! Table-driven canonical ↔ native key mapping
//!
//! Every format adapter is described by a [`TagMap`]: one [`MapEntry`] per canonical key
//! the format supports. An entry names the native tag(s) backing the key, the type its
//! values are stored as, and an optional sanitizer applied before the type cast. Keys a
//! format cannot express in a simple name carry custom accessor functions instead.
//!
//! Maps are built in layers. A family declares a base table, and each codec within the
//! family overlays only the entries that differ, with later layers winning.

use crate::adapter::TagState;
use crate::coerce::{
	cast_value, sanitize_bool, sanitize_int, sanitize_replaygain_gain, sanitize_replaygain_peak,
	sanitize_year,
};
use crate::error::Result;
use crate::item::{MetadataItem, NormKey, Value, ValueType};

use std::collections::HashMap;

/// A custom read accessor
pub(crate) type GetterFn = fn(&TagState, NormKey) -> Result<MetadataItem>;
/// A custom write accessor
pub(crate) type SetterFn = fn(&mut TagState, NormKey, &MetadataItem) -> Result<()>;
/// A custom delete accessor
pub(crate) type RemoverFn = fn(&mut TagState, NormKey) -> Result<()>;

/// How a canonical key is read out of a native tag
#[derive(Copy, Clone, Debug)]
pub(crate) enum Getter {
	/// Read the values stored under one native name
	Name(&'static str),
	/// Try each native name in order, the first one holding a non-empty value wins
	Names(&'static [&'static str]),
	/// Always read this fixed text, ignoring the tag contents
	Literal(&'static str),
	/// Always read an empty item of the key's canonical type
	///
	/// Masking hides an inherited entry in a codec whose streams cannot carry it.
	Masked,
	/// Read through a format-specific function
	Custom(GetterFn),
}

/// How a canonical key is written into a native tag
#[derive(Copy, Clone, Debug)]
pub(crate) enum Setter {
	/// Replace the values stored under one native name
	Name(&'static str),
	/// Write through a format-specific function
	Custom(SetterFn),
}

/// A value sanitizer, applied before a value is cast to an entry's declared type
///
/// Sanitizers run on both reads and writes, so a caller always sees canonical values no
/// matter how loosely the native tag spells them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Sanitizer {
	Int,
	Year,
	Bool,
	ReplayGainGain,
	ReplayGainPeak,
}

impl Sanitizer {
	pub(crate) fn apply(self, value: &Value) -> Result<Value> {
		match self {
			Sanitizer::Int => sanitize_int(value).map(Value::Int),
			Sanitizer::Year => sanitize_year(value).map(Value::Int),
			Sanitizer::Bool => sanitize_bool(value).map(Value::Bool),
			Sanitizer::ReplayGainGain => sanitize_replaygain_gain(value).map(Value::Str),
			Sanitizer::ReplayGainPeak => sanitize_replaygain_peak(value).map(Value::Float),
		}
	}
}

/// One canonical key's mapping onto a native tag
///
/// Entries without an explicit remover are deleted through the getter's native names, so a
/// fallback-chain getter deletes every name it reads.
#[derive(Copy, Clone, Debug)]
pub(crate) struct MapEntry {
	pub(crate) getter: Getter,
	pub(crate) setter: Option<Setter>,
	pub(crate) remover: Option<RemoverFn>,
	pub(crate) value_type: ValueType,
	pub(crate) sanitizer: Option<Sanitizer>,
}

impl MapEntry {
	const fn named(name: &'static str, value_type: ValueType) -> Self {
		Self {
			getter: Getter::Name(name),
			setter: Some(Setter::Name(name)),
			remover: None,
			value_type,
			sanitizer: None,
		}
	}

	/// A plain text entry
	pub(crate) const fn text(name: &'static str) -> Self {
		Self::named(name, ValueType::Str)
	}

	/// An integer entry
	pub(crate) const fn int(name: &'static str) -> Self {
		Self::named(name, ValueType::Int).sanitized(Sanitizer::Int)
	}

	/// A year entry, extracting the year from date-like native values
	pub(crate) const fn year(name: &'static str) -> Self {
		Self::named(name, ValueType::Int).sanitized(Sanitizer::Year)
	}

	/// A boolean entry
	pub(crate) const fn boolean(name: &'static str) -> Self {
		Self::named(name, ValueType::Bool).sanitized(Sanitizer::Bool)
	}

	/// A ReplayGain gain entry, normalized to `"<float> dB"` text
	pub(crate) const fn gain(name: &'static str) -> Self {
		Self::named(name, ValueType::Str).sanitized(Sanitizer::ReplayGainGain)
	}

	/// A ReplayGain peak entry
	pub(crate) const fn peak(name: &'static str) -> Self {
		Self::named(name, ValueType::Float).sanitized(Sanitizer::ReplayGainPeak)
	}

	/// An entry handled entirely by format-specific functions
	pub(crate) const fn custom(
		getter: GetterFn,
		setter: SetterFn,
		remover: RemoverFn,
		value_type: ValueType,
	) -> Self {
		Self {
			getter: Getter::Custom(getter),
			setter: Some(Setter::Custom(setter)),
			remover: Some(remover),
			value_type,
			sanitizer: None,
		}
	}

	/// A read-only entry backed by the audio stream rather than the tag
	pub(crate) const fn derived(getter: GetterFn, value_type: ValueType) -> Self {
		Self {
			getter: Getter::Custom(getter),
			setter: None,
			remover: None,
			value_type,
			sanitizer: None,
		}
	}

	/// A read-only entry with a fixed text value
	pub(crate) const fn literal(text: &'static str) -> Self {
		Self {
			getter: Getter::Literal(text),
			setter: None,
			remover: None,
			value_type: ValueType::Str,
			sanitizer: None,
		}
	}

	/// An entry hiding an inherited mapping
	pub(crate) const fn masked() -> Self {
		Self {
			getter: Getter::Masked,
			setter: None,
			remover: None,
			value_type: ValueType::Str,
			sanitizer: None,
		}
	}

	/// Replaces the sanitizer
	pub(crate) const fn sanitized(mut self, sanitizer: Sanitizer) -> Self {
		self.sanitizer = Some(sanitizer);
		self
	}

	/// Reads through a fallback chain of native names
	pub(crate) const fn reading(mut self, names: &'static [&'static str]) -> Self {
		self.getter = Getter::Names(names);
		self
	}

	/// Writes to a different native name than the getter reads
	pub(crate) const fn writing(mut self, name: &'static str) -> Self {
		self.setter = Some(Setter::Name(name));
		self
	}

	/// Runs a value through the entry's sanitizer, then casts it to the entry's type
	pub(crate) fn normalize(&self, value: &Value) -> Result<Value> {
		let sanitized = match self.sanitizer {
			Some(sanitizer) => sanitizer.apply(value)?,
			None => value.clone(),
		};

		cast_value(sanitized, self.value_type)
	}
}

/// A format's full canonical key mapping
pub(crate) struct TagMap {
	entries: HashMap<NormKey, MapEntry>,
}

impl TagMap {
	/// Build a map from layered entry tables, later layers overriding earlier ones
	pub(crate) fn merged(layers: &[&[(NormKey, MapEntry)]]) -> Self {
		let mut entries = HashMap::new();
		for layer in layers {
			for (key, entry) in *layer {
				entries.insert(*key, *entry);
			}
		}

		Self { entries }
	}

	pub(crate) fn get(&self, key: NormKey) -> Option<&MapEntry> {
		self.entries.get(&key)
	}
}

fn get_codec(state: &TagState, _key: NormKey) -> Result<MetadataItem> {
	Ok(match state.properties.codec() {
		Some(codec) => MetadataItem::from(Value::Str(codec.to_owned())),
		None => MetadataItem::new(ValueType::Str),
	})
}

fn get_length(state: &TagState, _key: NormKey) -> Result<MetadataItem> {
	Ok(match state.properties.duration() {
		Some(duration) => MetadataItem::from(Value::Float(duration.as_secs_f64())),
		None => MetadataItem::new(ValueType::Float),
	})
}

fn get_channels(state: &TagState, _key: NormKey) -> Result<MetadataItem> {
	Ok(match state.properties.channels() {
		Some(channels) => MetadataItem::from(Value::Int(i64::from(channels))),
		None => MetadataItem::new(ValueType::Int),
	})
}

fn get_bitrate(state: &TagState, _key: NormKey) -> Result<MetadataItem> {
	Ok(match state.properties.bitrate() {
		Some(bitrate) => MetadataItem::from(Value::Int(i64::from(bitrate))),
		None => MetadataItem::new(ValueType::Int),
	})
}

fn get_sample_rate(state: &TagState, _key: NormKey) -> Result<MetadataItem> {
	Ok(match state.properties.sample_rate() {
		Some(rate) => MetadataItem::from(Value::Int(i64::from(rate))),
		None => MetadataItem::new(ValueType::Int),
	})
}

fn get_bit_depth(state: &TagState, _key: NormKey) -> Result<MetadataItem> {
	Ok(match state.properties.bit_depth() {
		Some(depth) => MetadataItem::from(Value::Int(i64::from(depth))),
		None => MetadataItem::new(ValueType::Int),
	})
}

/// The derived `#`-prefixed entries shared by every format
pub(crate) static DERIVED_ENTRIES: &[(NormKey, MapEntry)] = &[
	(NormKey::Codec, MapEntry::derived(get_codec, ValueType::Str)),
	(NormKey::Length, MapEntry::derived(get_length, ValueType::Float)),
	(NormKey::Channels, MapEntry::derived(get_channels, ValueType::Int)),
	(NormKey::Bitrate, MapEntry::derived(get_bitrate, ValueType::Int)),
	(
		NormKey::SampleRate,
		MapEntry::derived(get_sample_rate, ValueType::Int),
	),
	(
		NormKey::BitsPerSample,
		MapEntry::derived(get_bit_depth, ValueType::Int),
	),
];

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn later_layers_override_earlier_ones() {
		static BASE: &[(NormKey, MapEntry)] = &[
			(NormKey::Artist, MapEntry::text("artist")),
			(NormKey::Codec, MapEntry::literal("flac")),
		];
		static OVERRIDE: &[(NormKey, MapEntry)] = &[(NormKey::Codec, MapEntry::masked())];

		let map = TagMap::merged(&[BASE, OVERRIDE]);

		assert!(matches!(
			map.get(NormKey::Artist).unwrap().getter,
			Getter::Name("artist")
		));
		assert!(matches!(map.get(NormKey::Codec).unwrap().getter, Getter::Masked));
		assert!(map.get(NormKey::Album).is_none());
	}

	#[test]
	fn sanitizer_dispatch() {
		assert_eq!(
			Sanitizer::Year
				.apply(&Value::Str(String::from("2001-05-03")))
				.unwrap(),
			Value::Int(2001)
		);
		assert_eq!(
			Sanitizer::Bool.apply(&Value::Str(String::from("true"))).unwrap(),
			Value::Bool(true)
		);
		assert_eq!(
			Sanitizer::ReplayGainGain
				.apply(&Value::Str(String::from("-6.25")))
				.unwrap(),
			Value::Str(String::from("-6.25 dB"))
		);
	}

	#[test]
	fn normalize_sanitizes_then_casts() {
		let entry = MapEntry::int("Track");
		assert_eq!(entry.normalize(&Value::Str(String::from(" 7 "))).unwrap(), Value::Int(7));

		// A flag stored as an integer, the way APE tags spell booleans
		let flag = MapEntry::int("Compilation").sanitized(Sanitizer::Bool);
		assert_eq!(flag.normalize(&Value::Bool(true)).unwrap(), Value::Int(1));
		assert_eq!(
			flag.normalize(&Value::Str(String::from("false"))).unwrap(),
			Value::Int(0)
		);
		assert!(flag.normalize(&Value::Str(String::from("maybe"))).is_err());
	}

	#[test]
	fn entry_overrides_compose() {
		let entry = MapEntry::year("date").reading(&["date", "originaldate"]);
		assert!(matches!(entry.getter, Getter::Names(names) if names.len() == 2));
		assert!(matches!(entry.setter, Some(Setter::Name("date"))));
		assert_eq!(entry.sanitizer, Some(Sanitizer::Year));

		let quirk = MapEntry::text("MUSICBRAINZ_ORIGINALALBUMID").writing("musicbrainz_originalalbumid");
		assert!(matches!(quirk.getter, Getter::Name("MUSICBRAINZ_ORIGINALALBUMID")));
		assert!(matches!(quirk.setter, Some(Setter::Name("musicbrainz_originalalbumid"))));
	}
}
