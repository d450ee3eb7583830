//! Ogg-family format adapter
//!
//! Covers the Vorbis-comment-tagged Ogg codecs: Vorbis, Opus, FLAC-in-Ogg, Speex, and
//! Theora. Comments are list-valued, so writes keep full value lists. Artwork reads
//! understand both the legacy `coverart` encoding and `metadata_block_picture`; writes
//! only ever produce the latter.

mod map;

use crate::adapter::{self, FormatAdapter, NativeAccess, TagState};
use crate::config::NormOptions;
use crate::dict::TagDict;
use crate::error::Result;
use crate::item::{MetadataItem, NormKey, Value};
use crate::map::TagMap;
use crate::properties::AudioProperties;

/// The codecs that carry Vorbis comments in an Ogg container
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum OggCodec {
	/// Vorbis
	Vorbis,
	/// Opus
	Opus,
	/// FLAC in an Ogg container
	Flac,
	/// Speex
	Speex,
	/// Theora
	Theora,
}

impl OggCodec {
	/// The native tag format's display name
	pub const fn tag_format(self) -> &'static str {
		match self {
			OggCodec::Vorbis => "OggVorbis",
			OggCodec::Opus => "OggOpus",
			OggCodec::Flac => "OggFlac",
			OggCodec::Speex => "OggSpeex",
			OggCodec::Theora => "OggTheora",
		}
	}
}

struct OggNative;

impl NativeAccess for OggNative {
	fn read_values(state: &TagState, name: &str) -> Result<Vec<Value>> {
		Ok(adapter::read_text_values(state, name))
	}

	fn write_values(state: &mut TagState, name: &str, values: &[Value]) -> Result<()> {
		adapter::write_text_values(state, name, values)
	}
}

/// A format adapter over an Ogg Vorbis comment dictionary
///
/// # Examples
///
/// ```rust
/// use tagnorm::adapter::FormatAdapter;
/// use tagnorm::dict::TagDict;
/// use tagnorm::item::{MetadataItem, NormKey, Value, ValueType};
/// use tagnorm::ogg::{OggAdapter, OggCodec};
/// use tagnorm::properties::AudioProperties;
///
/// let mut ogg = OggAdapter::new(OggCodec::Vorbis, TagDict::new(), AudioProperties::default());
///
/// // Comments are list-valued
/// let artists = MetadataItem::from_parts(
/// 	ValueType::Str,
/// 	vec![Value::from("Simon"), Value::from("Garfunkel")],
/// );
/// ogg.set_all(NormKey::Artist, &artists)?;
///
/// assert_eq!(ogg.dict().get("artist").map(<[_]>::len), Some(2));
/// assert_eq!(ogg.get(NormKey::Artist)?.values().len(), 2);
/// # Ok::<(), tagnorm::error::TagnormError>(())
/// ```
pub struct OggAdapter {
	codec: OggCodec,
	state: TagState,
	map: &'static TagMap,
}

impl OggAdapter {
	/// Create an adapter with default options
	pub fn new(codec: OggCodec, dict: TagDict, properties: AudioProperties) -> Self {
		Self::with_options(codec, dict, properties, NormOptions::default())
	}

	/// Create an adapter with explicit options
	pub fn with_options(
		codec: OggCodec,
		dict: TagDict,
		properties: AudioProperties,
		options: NormOptions,
	) -> Self {
		Self {
			codec,
			state: TagState::new(dict, properties, options, true),
			map: map::tag_map(codec),
		}
	}

	/// The codec this adapter was created for
	pub fn codec(&self) -> OggCodec {
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

impl FormatAdapter for OggAdapter {
	fn tag_format(&self) -> &'static str {
		self.codec.tag_format()
	}

	fn properties(&self) -> &AudioProperties {
		&self.state.properties
	}

	fn get(&self, key: NormKey) -> Result<MetadataItem> {
		adapter::get_key::<OggNative>(&self.state, self.map, key)
	}

	fn set_all(&mut self, key: NormKey, item: &MetadataItem) -> Result<()> {
		adapter::set_key::<OggNative>(&mut self.state, self.map, key, item)
	}

	fn remove(&mut self, key: NormKey) -> Result<()> {
		adapter::remove_key(&mut self.state, self.map, key)
	}
}
