//! APEv2-family format adapter
//!
//! Covers bare APEv2 tags and the codecs that carry them: WavPack, Musepack, Monkey's
//! Audio, and OptimFROG. APE items are single-valued here, so multi-value writes keep
//! only the first value. Track and disc numbering live in one compound `"N/M"` text
//! item each, and cover art is keyed by role (`Cover Art (Front)`, `Cover Art (Back)`)
//! with a filename prefix inside the binary payload.

mod map;

use crate::adapter::{self, FormatAdapter, NativeAccess, TagState};
use crate::config::NormOptions;
use crate::dict::TagDict;
use crate::error::Result;
use crate::item::{MetadataItem, NormKey, Value};
use crate::map::TagMap;
use crate::properties::AudioProperties;

/// The codecs that carry an APEv2 tag
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ApeCodec {
	/// A bare APEv2 tag, container unknown
	Ape,
	/// WavPack
	WavPack,
	/// Musepack
	Musepack,
	/// Monkey's Audio
	MonkeysAudio,
	/// OptimFROG
	OptimFrog,
}

impl ApeCodec {
	/// The native tag format's display name
	pub const fn tag_format(self) -> &'static str {
		match self {
			ApeCodec::Ape => "APEv2",
			ApeCodec::WavPack => "WavPack",
			ApeCodec::Musepack => "Musepack",
			ApeCodec::MonkeysAudio => "MonkeysAudio",
			ApeCodec::OptimFrog => "OptimFROG",
		}
	}
}

struct ApeNative;

impl NativeAccess for ApeNative {
	fn read_values(state: &TagState, name: &str) -> Result<Vec<Value>> {
		Ok(adapter::read_text_values(state, name))
	}

	fn write_values(state: &mut TagState, name: &str, values: &[Value]) -> Result<()> {
		adapter::write_text_values(state, name, values)
	}
}

/// A format adapter over an APEv2 tag dictionary
///
/// # Examples
///
/// ```rust
/// use tagnorm::adapter::FormatAdapter;
/// use tagnorm::ape::{ApeAdapter, ApeCodec};
/// use tagnorm::dict::TagDict;
/// use tagnorm::item::{NormKey, Value};
/// use tagnorm::properties::AudioProperties;
///
/// let mut ape = ApeAdapter::new(ApeCodec::Ape, TagDict::new(), AudioProperties::default());
///
/// ape.set(NormKey::TrackNumber, Value::Int(3))?;
/// ape.set(NormKey::TotalTracks, Value::Int(12))?;
///
/// // Both halves share one compound native value
/// assert_eq!(ape.dict().get_first("Track").and_then(|v| v.text()), Some("3/12"));
/// assert_eq!(ape.get(NormKey::TotalTracks)?.first_int(), Some(12));
/// # Ok::<(), tagnorm::error::TagnormError>(())
/// ```
pub struct ApeAdapter {
	codec: ApeCodec,
	state: TagState,
	map: &'static TagMap,
}

impl ApeAdapter {
	/// Create an adapter with default options
	pub fn new(codec: ApeCodec, dict: TagDict, properties: AudioProperties) -> Self {
		Self::with_options(codec, dict, properties, NormOptions::default())
	}

	/// Create an adapter with explicit options
	pub fn with_options(
		codec: ApeCodec,
		dict: TagDict,
		properties: AudioProperties,
		options: NormOptions,
	) -> Self {
		Self {
			codec,
			state: TagState::new(dict, properties, options, false),
			map: map::tag_map(codec),
		}
	}

	/// The codec this adapter was created for
	pub fn codec(&self) -> ApeCodec {
		self.codec
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

impl FormatAdapter for ApeAdapter {
	fn tag_format(&self) -> &'static str {
		self.codec.tag_format()
	}

	fn properties(&self) -> &AudioProperties {
		&self.state.properties
	}

	fn get(&self, key: NormKey) -> Result<MetadataItem> {
		adapter::get_key::<ApeNative>(&self.state, self.map, key)
	}

	fn set_all(&mut self, key: NormKey, item: &MetadataItem) -> Result<()> {
		adapter::set_key::<ApeNative>(&mut self.state, self.map, key, item)
	}

	fn remove(&mut self, key: NormKey) -> Result<()> {
		adapter::remove_key(&mut self.state, self.map, key)
	}
}
