//! MP4 format adapter
//!
//! Atoms are single-valued here, so multi-value writes keep only the first value. The
//! native dictionary mixes value shapes: text atoms, integer atoms (`mvc`/`mvi`), flag
//! atoms (`cpil`/`shwm`), number/total tuples (`trkn`/`disk`), cover atoms, and
//! freeform `----:` atoms whose payloads are UTF-8 byte blobs.

mod map;

use crate::adapter::{self, FormatAdapter, NativeAccess, TagState};
use crate::config::NormOptions;
use crate::dict::{NativeValue, TagDict};
use crate::error::{ErrorKind, Result, TagnormError};
use crate::item::{MetadataItem, NormKey, Value, ValueType};
use crate::macros::coerce_err;
use crate::map::TagMap;
use crate::properties::AudioProperties;

const FREEFORM_PREFIX: &str = "----:";

fn type_mismatch(expected: ValueType, value: &Value) -> TagnormError {
	TagnormError::new(ErrorKind::TypeMismatch {
		expected,
		found: value.value_type(),
	})
}

fn native_value(name: &str, value: &Value) -> Result<NativeValue> {
	if name.starts_with(FREEFORM_PREFIX) {
		return match value.to_native_string() {
			Some(text) => Ok(NativeValue::Binary(text.into_bytes())),
			None => Err(type_mismatch(ValueType::Str, value)),
		};
	}

	match name {
		"cpil" | "shwm" => match value {
			Value::Bool(flag) => Ok(NativeValue::Bool(*flag)),
			_ => Err(type_mismatch(ValueType::Bool, value)),
		},
		"mvc" | "mvi" => match value {
			Value::Int(int) => Ok(NativeValue::Int(*int)),
			_ => Err(type_mismatch(ValueType::Int, value)),
		},
		_ => match value.to_native_string() {
			Some(text) => Ok(NativeValue::Text(text)),
			None => Err(type_mismatch(ValueType::Str, value)),
		},
	}
}

struct Mp4Native;

impl NativeAccess for Mp4Native {
	fn read_values(state: &TagState, name: &str) -> Result<Vec<Value>> {
		let Some(native) = state.dict.get(name) else {
			return Ok(Vec::new());
		};

		let mut values = Vec::with_capacity(native.len());
		for value in native {
			match value {
				NativeValue::Text(text) => values.push(Value::from(text.as_str())),
				NativeValue::Int(int) => values.push(Value::Int(*int)),
				NativeValue::Bool(flag) => values.push(Value::Bool(*flag)),
				NativeValue::Pair(number, total) => {
					values.push(Value::Str(format!("{number}/{total}")));
				},
				NativeValue::Binary(data) => match std::str::from_utf8(data) {
					Ok(text) => values.push(Value::from(text)),
					Err(_) => {
						return Err(coerce_err!(
							"utf-8 text",
							String::from_utf8_lossy(data).into_owned()
						));
					},
				},
				NativeValue::Cover(..) => {},
			}
		}

		Ok(values)
	}

	fn write_values(state: &mut TagState, name: &str, values: &[Value]) -> Result<()> {
		let mut native = Vec::with_capacity(values.len());
		for value in values {
			native.push(native_value(name, value)?);
		}

		if !state.effective_appendable() {
			native.truncate(1);
		}

		state.dict.set(name.to_owned(), native);
		Ok(())
	}
}

/// A format adapter over an MP4 `ilst` atom dictionary
///
/// # Examples
///
/// ```rust
/// use tagnorm::adapter::FormatAdapter;
/// use tagnorm::dict::{NativeValue, TagDict};
/// use tagnorm::item::{NormKey, Value};
/// use tagnorm::mp4::Mp4Adapter;
/// use tagnorm::properties::AudioProperties;
///
/// let mut mp4 = Mp4Adapter::new(TagDict::new(), AudioProperties::default());
///
/// // Setting one tuple half writes the whole tuple, the other half defaulting to 0
/// mp4.set(NormKey::TrackNumber, Value::Int(7))?;
/// assert_eq!(mp4.dict().get_first("trkn"), Some(&NativeValue::Pair(7, 0)));
///
/// // Freeform atoms hold UTF-8 payloads
/// mp4.set(NormKey::Isrc, Value::from("USRC17607839"))?;
/// assert_eq!(mp4.get(NormKey::Isrc)?.first_str(), Some("USRC17607839"));
/// # Ok::<(), tagnorm::error::TagnormError>(())
/// ```
pub struct Mp4Adapter {
	state: TagState,
	map: &'static TagMap,
}

impl Mp4Adapter {
	/// Create an adapter with default options
	pub fn new(dict: TagDict, properties: AudioProperties) -> Self {
		Self::with_options(dict, properties, NormOptions::default())
	}

	/// Create an adapter with explicit options
	pub fn with_options(dict: TagDict, properties: AudioProperties, options: NormOptions) -> Self {
		Self {
			state: TagState::new(dict, properties, options, false),
			map: map::tag_map(),
		}
	}

	/// The native tag dictionary
	pub fn dict(&self) -> &TagDict {
		&self.state.dict
	}

	/// Mutable access to the native tag dictionary
	pub fn dict_mut(&mut self) -> &mut TagDict {
		&mut self.state.dict
	}

	/// Consumes the adapter, returning the native tag dictionary
	pub fn into_dict(self) -> TagDict {
		self.state.dict
	}
}

impl FormatAdapter for Mp4Adapter {
	fn tag_format(&self) -> &'static str {
		"mp4"
	}

	fn properties(&self) -> &AudioProperties {
		&self.state.properties
	}

	fn get(&self, key: NormKey) -> Result<MetadataItem> {
		adapter::get_key::<Mp4Native>(&self.state, self.map, key)
	}

	fn set_all(&mut self, key: NormKey, item: &MetadataItem) -> Result<()> {
		adapter::set_key::<Mp4Native>(&mut self.state, self.map, key, item)
	}

	fn remove(&mut self, key: NormKey) -> Result<()> {
		adapter::remove_key(&mut self.state, self.map, key)
	}
}
