//! Canonical keys, values, and the items that carry them
//!
//! The canonical key space is the fixed, format-independent namespace exposed by every
//! format adapter. A [`MetadataItem`] is what an adapter hands back for one key: zero or
//! more [`Value`]s of the key's declared [`ValueType`].

use crate::artwork::Artwork;
use crate::error::{ErrorKind, Result, TagnormError};

use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The declared type of a canonical key's values
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
	/// A UTF-8 string
	Str,
	/// A signed integer
	Int,
	/// A boolean flag
	Bool,
	/// A floating point number
	Float,
	/// An embedded picture
	Artwork,
}

/// A single metadata value
///
/// Values are stored in the canonical typed form a key's sanitizer produces. When written
/// into a text-backed container, scalar values are rendered through
/// [`Value::to_native_string`] (booleans become `"1"`/`"0"`).
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
	/// A UTF-8 string
	Str(String),
	/// A signed integer
	Int(i64),
	/// A boolean flag
	Bool(bool),
	/// A floating point number
	Float(f64),
	/// An embedded picture
	Artwork(Artwork),
}

impl Value {
	/// Returns the [`ValueType`] of this value
	pub fn value_type(&self) -> ValueType {
		match self {
			Value::Str(_) => ValueType::Str,
			Value::Int(_) => ValueType::Int,
			Value::Bool(_) => ValueType::Bool,
			Value::Float(_) => ValueType::Float,
			Value::Artwork(_) => ValueType::Artwork,
		}
	}

	/// Returns the value as a string slice, if it is a [`Value::Str`]
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Str(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the value as an integer, if it is a [`Value::Int`]
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Value::Int(i) => Some(*i),
			_ => None,
		}
	}

	/// Returns the value as a boolean, if it is a [`Value::Bool`]
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(b) => Some(*b),
			_ => None,
		}
	}

	/// Returns the value as a float, if it is a [`Value::Float`]
	pub fn as_float(&self) -> Option<f64> {
		match self {
			Value::Float(f) => Some(*f),
			_ => None,
		}
	}

	/// Returns a reference to the [`Artwork`], if the value holds one
	pub fn as_artwork(&self) -> Option<&Artwork> {
		match self {
			Value::Artwork(art) => Some(art),
			_ => None,
		}
	}

	/// Consumes the value, returning the [`Artwork`] if it holds one
	pub fn into_artwork(self) -> Option<Artwork> {
		match self {
			Value::Artwork(art) => Some(art),
			_ => None,
		}
	}

	/// The string form used when storing the value in a text-backed native tag
	///
	/// Returns `None` for [`Value::Artwork`], which never has a text representation.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagnorm::item::Value;
	///
	/// assert_eq!(Value::Int(7).to_native_string().as_deref(), Some("7"));
	/// assert_eq!(Value::Bool(true).to_native_string().as_deref(), Some("1"));
	/// ```
	pub fn to_native_string(&self) -> Option<String> {
		match self {
			Value::Str(s) => Some(s.clone()),
			Value::Int(i) => Some(i.to_string()),
			Value::Bool(b) => Some(if *b { String::from("1") } else { String::from("0") }),
			Value::Float(f) => Some(f.to_string()),
			Value::Artwork(_) => None,
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Str(s) => write!(f, "{s}"),
			Value::Int(i) => write!(f, "{i}"),
			Value::Bool(b) => write!(f, "{b}"),
			Value::Float(fl) => write!(f, "{fl}"),
			Value::Artwork(art) => write!(f, "{art}"),
		}
	}
}

impl From<String> for Value {
	fn from(input: String) -> Self {
		Value::Str(input)
	}
}

impl From<&str> for Value {
	fn from(input: &str) -> Self {
		Value::Str(input.to_owned())
	}
}

impl From<i64> for Value {
	fn from(input: i64) -> Self {
		Value::Int(input)
	}
}

impl From<bool> for Value {
	fn from(input: bool) -> Self {
		Value::Bool(input)
	}
}

impl From<f64> for Value {
	fn from(input: f64) -> Self {
		Value::Float(input)
	}
}

impl From<Artwork> for Value {
	fn from(input: Artwork) -> Self {
		Value::Artwork(input)
	}
}

/// The values an adapter holds for one canonical key
///
/// An item distinguishes absent (empty), single, and multiple values. Multi-value order is
/// preserved exactly as the native tag reported it and is significant for round-tripping.
/// An empty item and an absent key are equivalent on read.
#[derive(Clone, Debug, PartialEq)]
pub struct MetadataItem {
	value_type: ValueType,
	values: Vec<Value>,
}

impl MetadataItem {
	/// Create an empty item of the given type
	///
	/// # Examples
	///
	/// ```rust
	/// use tagnorm::item::{MetadataItem, ValueType};
	///
	/// let item = MetadataItem::new(ValueType::Str);
	/// assert!(item.is_empty());
	/// ```
	#[must_use]
	pub const fn new(value_type: ValueType) -> Self {
		Self {
			value_type,
			values: Vec::new(),
		}
	}

	/// Create an item of the given type from a list of values
	///
	/// # Errors
	///
	/// Any value whose type differs from `value_type` fails with [`ErrorKind::TypeMismatch`].
	pub fn with_values(value_type: ValueType, values: Vec<Value>) -> Result<Self> {
		for value in &values {
			if value.value_type() != value_type {
				return Err(TagnormError::new(ErrorKind::TypeMismatch {
					expected: value_type,
					found: value.value_type(),
				}));
			}
		}

		Ok(Self { value_type, values })
	}

	/// Create an item from already-sanitized parts, without type checking
	///
	/// Unlike [`MetadataItem::with_values`], the values are not checked against
	/// `value_type`; adapters use this to build items from already-sanitized native data.
	pub fn from_parts(value_type: ValueType, values: Vec<Value>) -> Self {
		Self { value_type, values }
	}

	/// The declared type of this item's values
	pub fn value_type(&self) -> ValueType {
		self.value_type
	}

	/// The stored values, in native order
	pub fn values(&self) -> &[Value] {
		&self.values
	}

	/// Consumes the item, returning its values
	pub fn into_values(self) -> Vec<Value> {
		self.values
	}

	/// The first value, if any
	pub fn first(&self) -> Option<&Value> {
		self.values.first()
	}

	/// Whether the item holds no values
	///
	/// An empty item is how an adapter reports an absent key.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// The number of stored values
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Appends a value
	///
	/// # Errors
	///
	/// Fails with [`ErrorKind::TypeMismatch`] if the value's type differs from the item's.
	pub fn push(&mut self, value: Value) -> Result<()> {
		if value.value_type() != self.value_type {
			return Err(TagnormError::new(ErrorKind::TypeMismatch {
				expected: self.value_type,
				found: value.value_type(),
			}));
		}

		self.values.push(value);
		Ok(())
	}

	/// The first value as a string slice, if present and of string type
	pub fn first_str(&self) -> Option<&str> {
		self.values.first().and_then(Value::as_str)
	}

	/// The first value as an integer, if present and of integer type
	pub fn first_int(&self) -> Option<i64> {
		self.values.first().and_then(Value::as_int)
	}

	/// The first value as a boolean, if present and of boolean type
	pub fn first_bool(&self) -> Option<bool> {
		self.values.first().and_then(Value::as_bool)
	}

	/// The first value as a float, if present and of float type
	pub fn first_float(&self) -> Option<f64> {
		self.values.first().and_then(Value::as_float)
	}

	/// The first value as an [`Artwork`], if present and of artwork type
	pub fn first_artwork(&self) -> Option<&Artwork> {
		self.values.first().and_then(Value::as_artwork)
	}
}

impl Display for MetadataItem {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let mut first = true;
		for value in &self.values {
			if !first {
				write!(f, ", ")?;
			}
			write!(f, "{value}")?;
			first = false;
		}

		Ok(())
	}
}

impl From<Value> for MetadataItem {
	fn from(input: Value) -> Self {
		Self {
			value_type: input.value_type(),
			values: vec![input],
		}
	}
}

macro_rules! gen_norm_keys {
	(
		$(
			$(#[$variant_meta:meta])*
			$variant_ident:ident => ($key_str:literal, $value_ty:ident)
		),+
		$(,)?
	) => {
		/// A canonical metadata key
		///
		/// The key set is identical across every format adapter; a format that does not map a
		/// key reports it as always-absent and rejects writes to it. Keys prefixed `#` are
		/// derived from the audio stream and are read-only.
		#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
		#[allow(missing_docs)]
		#[non_exhaustive]
		pub enum NormKey {
			$(
				$(#[$variant_meta])*
				$variant_ident,
			)+
		}

		impl NormKey {
			/// Every canonical key, in namespace order
			pub const ALL: &'static [NormKey] = &[
				$(
					NormKey::$variant_ident,
				)+
			];

			/// The canonical string form of the key
			///
			/// # Examples
			///
			/// ```rust
			/// use tagnorm::item::NormKey;
			///
			/// assert_eq!(NormKey::TrackTitle.as_str(), "tracktitle");
			/// assert_eq!(NormKey::Codec.as_str(), "#codec");
			/// ```
			pub const fn as_str(self) -> &'static str {
				match self {
					$(
						NormKey::$variant_ident => $key_str,
					)+
				}
			}

			/// The declared type of the key's values
			pub const fn value_type(self) -> ValueType {
				match self {
					$(
						NormKey::$variant_ident => ValueType::$value_ty,
					)+
				}
			}
		}
	}
}

gen_norm_keys!(
	// Titles
	TrackTitle => ("tracktitle", Str),
	Artist => ("artist", Str),
	Album => ("album", Str),
	AlbumArtist => ("albumartist", Str),
	Composer => ("composer", Str),

	// Numbering
	TrackNumber => ("tracknumber", Int),
	TotalTracks => ("totaltracks", Int),
	DiscNumber => ("discnumber", Int),
	TotalDiscs => ("totaldiscs", Int),

	Genre => ("genre", Str),
	Year => ("year", Int),
	Comment => ("comment", Str),
	Label => ("label", Str),
	Lyrics => ("lyrics", Str),
	Isrc => ("isrc", Str),
	Compilation => ("compilation", Bool),
	Artwork => ("artwork", Artwork),

	// Sorting
	AlbumArtistSort => ("albumartistsort", Str),
	AlbumSort => ("albumsort", Str),
	ArtistSort => ("artistsort", Str),
	ComposerSort => ("composersort", Str),
	TitleSort => ("titlesort", Str),

	// Classical
	Work => ("work", Str),
	MovementName => ("movementname", Str),
	MovementNumber => ("movementnumber", Int),
	MovementTotal => ("movementtotal", Int),
	ShowMovement => ("showmovement", Bool),
	Conductor => ("conductor", Str),

	InitialKey => ("key", Str),
	Media => ("media", Str),
	SpotId => ("spotid", Str),
	Subtitle => ("subtitle", Str),
	DiscSubtitle => ("discsubtitle", Str),

	// Identifiers
	MusicBrainzArtistId => ("musicbrainzartistid", Str),
	MusicBrainzDiscId => ("musicbrainzdiscid", Str),
	MusicBrainzOriginalArtistId => ("musicbrainzoriginalartistid", Str),
	MusicBrainzOriginalAlbumId => ("musicbrainzoriginalalbumid", Str),
	MusicBrainzRecordingId => ("musicbrainzrecordingid", Str),
	MusicBrainzAlbumArtistId => ("musicbrainzalbumartistid", Str),
	MusicBrainzReleaseGroupId => ("musicbrainzreleasegroupid", Str),
	MusicBrainzAlbumId => ("musicbrainzalbumid", Str),
	MusicBrainzTrackId => ("musicbrainztrackid", Str),
	MusicBrainzWorkId => ("musicbrainzworkid", Str),
	MusicIpFingerprint => ("musicipfingerprint", Str),
	MusicIpPuid => ("musicippuid", Str),
	AcoustId => ("acoustidid", Str),
	AcoustIdFingerprint => ("acoustidfingerprint", Str),

	// ReplayGain
	ReplayGainTrackGain => ("replaygaintrackgain", Str),
	ReplayGainTrackPeak => ("replaygaintrackpeak", Float),
	ReplayGainAlbumGain => ("replaygainalbumgain", Str),
	ReplayGainAlbumPeak => ("replaygainalbumpeak", Float),

	// Derived from the audio stream, read-only
	Codec => ("#codec", Str),
	Length => ("#length", Float),
	Channels => ("#channels", Int),
	Bitrate => ("#bitrate", Int),
	SampleRate => ("#samplerate", Int),
	BitsPerSample => ("#bitspersample", Int),
);

impl NormKey {
	/// Whether the key is a derived (`#`-prefixed) read-only property
	///
	/// # Examples
	///
	/// ```rust
	/// use tagnorm::item::NormKey;
	///
	/// assert!(NormKey::Codec.is_derived());
	/// assert!(!NormKey::Artist.is_derived());
	/// ```
	pub fn is_derived(self) -> bool {
		self.as_str().starts_with('#')
	}
}

impl FromStr for NormKey {
	type Err = TagnormError;

	/// Parse a canonical key from its string form, ASCII case-insensitively
	///
	/// # Examples
	///
	/// ```rust
	/// use tagnorm::item::NormKey;
	///
	/// assert_eq!("Artist".parse::<NormKey>()?, NormKey::Artist);
	/// assert!("no-such-key".parse::<NormKey>().is_err());
	/// # Ok::<(), tagnorm::error::TagnormError>(())
	/// ```
	fn from_str(key: &str) -> Result<Self> {
		for norm_key in Self::ALL {
			if norm_key.as_str().eq_ignore_ascii_case(key) {
				return Ok(*norm_key);
			}
		}

		Err(TagnormError::new(ErrorKind::UnknownKey(key.to_owned())))
	}
}

impl Display for NormKey {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}
