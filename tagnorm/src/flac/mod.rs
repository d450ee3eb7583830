//! FLAC format adapter
//!
//! Vorbis comments hold the text fields and are list-valued, so writes keep full value
//! lists. Artwork does not live in the comment dictionary at all; it maps to the
//! container's picture blocks, carried here as a separate [`Artwork`] list.

mod map;

use crate::adapter::{self, FormatAdapter, NativeAccess, TagState};
use crate::artwork::Artwork;
use crate::config::NormOptions;
use crate::dict::TagDict;
use crate::error::Result;
use crate::item::{MetadataItem, NormKey, Value};
use crate::map::TagMap;
use crate::properties::AudioProperties;

struct FlacNative;

impl NativeAccess for FlacNative {
	fn read_values(state: &TagState, name: &str) -> Result<Vec<Value>> {
		Ok(adapter::read_text_values(state, name))
	}

	fn write_values(state: &mut TagState, name: &str, values: &[Value]) -> Result<()> {
		adapter::write_text_values(state, name, values)
	}
}

/// A format adapter over a FLAC Vorbis comment dictionary and picture list
///
/// # Examples
///
/// ```rust
/// use tagnorm::adapter::FormatAdapter;
/// use tagnorm::dict::TagDict;
/// use tagnorm::flac::FlacAdapter;
/// use tagnorm::item::{NormKey, Value};
/// use tagnorm::properties::AudioProperties;
///
/// let mut dict = TagDict::new();
/// dict.set_one(String::from("originaldate"), "1977".into());
///
/// let mut flac = FlacAdapter::new(dict, Vec::new(), AudioProperties::default());
///
/// // `date` is empty, so the year falls back to `originaldate`
/// assert_eq!(flac.get(NormKey::Year)?.first_int(), Some(1977));
///
/// // Writing goes to `date`
/// flac.set(NormKey::Year, Value::Int(1982))?;
/// assert_eq!(flac.dict().get_first("date").and_then(|v| v.text()), Some("1982"));
/// # Ok::<(), tagnorm::error::TagnormError>(())
/// ```
pub struct FlacAdapter {
	state: TagState,
	map: &'static TagMap,
}

impl FlacAdapter {
	/// Create an adapter with default options
	pub fn new(dict: TagDict, pictures: Vec<Artwork>, properties: AudioProperties) -> Self {
		Self::with_options(dict, pictures, properties, NormOptions::default())
	}

	/// Create an adapter with explicit options
	pub fn with_options(
		dict: TagDict,
		pictures: Vec<Artwork>,
		properties: AudioProperties,
		options: NormOptions,
	) -> Self {
		let mut state = TagState::new(dict, properties, options, true);
		state.pictures = pictures;

		Self {
			state,
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

	/// The native picture blocks
	pub fn pictures(&self) -> &[Artwork] {
		&self.state.pictures
	}

	/// Mutable access to the native picture blocks
	pub fn pictures_mut(&mut self) -> &mut Vec<Artwork> {
		&mut self.state.pictures
	}

	/// Consumes the adapter, returning the native tag dictionary and picture blocks
	pub fn into_parts(self) -> (TagDict, Vec<Artwork>) {
		(self.state.dict, self.state.pictures)
	}
}

impl FormatAdapter for FlacAdapter {
	fn tag_format(&self) -> &'static str {
		"FLAC"
	}

	fn properties(&self) -> &AudioProperties {
		&self.state.properties
	}

	fn get(&self, key: NormKey) -> Result<MetadataItem> {
		adapter::get_key::<FlacNative>(&self.state, self.map, key)
	}

	fn set_all(&mut self, key: NormKey, item: &MetadataItem) -> Result<()> {
		adapter::set_key::<FlacNative>(&mut self.state, self.map, key, item)
	}

	fn remove(&mut self, key: NormKey) -> Result<()> {
		adapter::remove_key(&mut self.state, self.map, key)
	}
}
