//! The format adapter contract and common accessors
//!
//! A [`FormatAdapter`] answers the generic get/set/remove contract for one container
//! family, resolving canonical keys through the family's tag map against the native
//! dictionary a codec collaborator materialized. [`Accessor`] layers typed shorthands for
//! the most common keys on top.

use crate::artwork::Artwork;
use crate::config::NormOptions;
use crate::dict::{NativeValue, TagDict};
use crate::error::{ErrorKind, Result, TagnormError};
use crate::item::{MetadataItem, NormKey, Value, ValueType};
use crate::macros::err;
use crate::map::{Getter, MapEntry, Setter, TagMap};
use crate::properties::AudioProperties;

// The mutable native state an adapter operates on: the parsed tag dictionary, any
// out-of-dictionary picture storage (FLAC), the stream properties backing the derived
// keys, and the adapter's options.
pub(crate) struct TagState {
	pub(crate) dict: TagDict,
	pub(crate) pictures: Vec<Artwork>,
	pub(crate) properties: AudioProperties,
	pub(crate) options: NormOptions,
	appendable: bool,
}

impl TagState {
	pub(crate) fn new(
		dict: TagDict,
		properties: AudioProperties,
		options: NormOptions,
		appendable: bool,
	) -> Self {
		Self {
			dict,
			pictures: Vec::new(),
			properties,
			options,
			appendable,
		}
	}

	// The family default, unless the options force single-value mode. Forcing list mode
	// on a single-valued family has no effect.
	pub(crate) fn effective_appendable(&self) -> bool {
		self.appendable && self.options.appendable.unwrap_or(true)
	}
}

// How a family spells canonical values in its native dictionary. Every name-mapped read
// and write funnels through here; custom procedures bypass it.
pub(crate) trait NativeAccess {
	/// Read the values stored under `name`, converted to canonical values
	fn read_values(state: &TagState, name: &str) -> Result<Vec<Value>>;

	/// Replace the values stored under `name`; an empty list deletes it
	fn write_values(state: &mut TagState, name: &str, values: &[Value]) -> Result<()>;
}

fn has_content(values: &[Value]) -> bool {
	values.iter().any(|value| match value {
		Value::Str(s) => !s.is_empty(),
		_ => true,
	})
}

// The text-backed families (APE, FLAC, Ogg) spell every name-mapped value as plain text;
// only their list behavior differs, and that is settled by `effective_appendable`.
pub(crate) fn read_text_values(state: &TagState, name: &str) -> Vec<Value> {
	let Some(values) = state.dict.get(name) else {
		return Vec::new();
	};

	values
		.iter()
		.filter_map(NativeValue::text)
		.map(Value::from)
		.collect()
}

pub(crate) fn write_text_values(
	state: &mut TagState,
	name: &str,
	values: &[Value],
) -> Result<()> {
	let mut native = Vec::with_capacity(values.len());
	for value in values {
		match value.to_native_string() {
			Some(text) => native.push(NativeValue::Text(text)),
			None => {
				return Err(TagnormError::new(ErrorKind::TypeMismatch {
					expected: ValueType::Str,
					found: value.value_type(),
				}))
			},
		}
	}

	if !state.effective_appendable() {
		native.truncate(1);
	}

	state.dict.set(name.to_owned(), native);
	Ok(())
}

fn read_named<A: NativeAccess>(
	state: &TagState,
	entry: &MapEntry,
	names: &[&str],
) -> Result<MetadataItem> {
	for name in names {
		let raw = A::read_values(state, name)?;
		if !has_content(&raw) {
			continue;
		}

		let mut values = Vec::with_capacity(raw.len());
		for value in &raw {
			values.push(entry.normalize(value)?);
		}

		return Ok(MetadataItem::from_parts(entry.value_type, values));
	}

	Ok(MetadataItem::new(entry.value_type))
}

pub(crate) fn get_key<A: NativeAccess>(
	state: &TagState,
	map: &TagMap,
	key: NormKey,
) -> Result<MetadataItem> {
	let Some(entry) = map.get(key) else {
		return Ok(MetadataItem::new(key.value_type()));
	};

	match entry.getter {
		Getter::Masked => Ok(MetadataItem::new(key.value_type())),
		Getter::Literal(text) => Ok(MetadataItem::from(Value::Str(text.to_owned()))),
		Getter::Custom(getter) => getter(state, key),
		Getter::Name(name) => read_named::<A>(state, entry, &[name]),
		Getter::Names(names) => read_named::<A>(state, entry, names),
	}
}

pub(crate) fn set_key<A: NativeAccess>(
	state: &mut TagState,
	map: &TagMap,
	key: NormKey,
	item: &MetadataItem,
) -> Result<()> {
	if key.is_derived() {
		err!(Readonly(key));
	}

	let Some(entry) = map.get(key) else {
		err!(UnsupportedKey(key));
	};

	let Some(setter) = entry.setter else {
		err!(Readonly(key));
	};

	// The full value list normalizes up front, so a failing value aborts the write with
	// the native tag untouched
	let mut values = Vec::with_capacity(item.len());
	for value in item.values() {
		values.push(entry.normalize(value)?);
	}

	match setter {
		Setter::Name(name) => A::write_values(state, name, &values),
		Setter::Custom(setter) => {
			let normalized = MetadataItem::from_parts(entry.value_type, values);
			setter(state, key, &normalized)
		},
	}
}

pub(crate) fn remove_key(state: &mut TagState, map: &TagMap, key: NormKey) -> Result<()> {
	if key.is_derived() {
		err!(Readonly(key));
	}

	let Some(entry) = map.get(key) else {
		err!(UnsupportedKey(key));
	};

	if let Some(remover) = entry.remover {
		return remover(state, key);
	}

	match entry.getter {
		Getter::Name(name) => {
			state.dict.remove(name);
			Ok(())
		},
		Getter::Names(names) => {
			for name in names {
				state.dict.remove(name);
			}
			Ok(())
		},
		Getter::Literal(_) | Getter::Masked | Getter::Custom(_) => {
			err!(Readonly(key))
		},
	}
}

/// The generic get/set/remove contract every container family implements
///
/// An adapter owns one file's native tag state and resolves every operation through its
/// format's tag map. The canonical key namespace is identical across adapters; keys a
/// format cannot express read as empty and reject writes.
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
/// let mut flac = FlacAdapter::new(TagDict::new(), Vec::new(), AudioProperties::default());
///
/// flac.set(NormKey::Artist, Value::from("Queen"))?;
/// assert_eq!(flac.get(NormKey::Artist)?.first_str(), Some("Queen"));
///
/// flac.remove(NormKey::Artist)?;
/// assert!(flac.get(NormKey::Artist)?.is_empty());
/// # Ok::<(), tagnorm::error::TagnormError>(())
/// ```
pub trait FormatAdapter {
	/// The native tag format's display name
	fn tag_format(&self) -> &'static str;

	/// The audio stream properties backing the `#`-prefixed derived keys
	fn properties(&self) -> &AudioProperties;

	/// Returns the values stored for a canonical key
	///
	/// Keys outside this format's tag map read as an empty item of the key's declared
	/// type, as do mapped keys with no native value.
	///
	/// # Errors
	///
	/// Fails with [`ErrorKind::Coercion`](crate::error::ErrorKind::Coercion) when a
	/// native value cannot be normalized to the key's declared type.
	fn get(&self, key: NormKey) -> Result<MetadataItem>;

	/// Replaces a canonical key's values with `item`'s full value list
	///
	/// Every value is sanitized and type-cast before anything is written; a failing
	/// value aborts the write with the native tag untouched. Formats that cannot hold
	/// multiple values collapse the list to its first value. An empty item deletes the
	/// native tag.
	///
	/// # Errors
	///
	/// Fails with [`ErrorKind::Readonly`](crate::error::ErrorKind::Readonly) for derived
	/// keys, [`ErrorKind::UnsupportedKey`](crate::error::ErrorKind::UnsupportedKey) for
	/// keys outside the format's map, and
	/// [`ErrorKind::Coercion`](crate::error::ErrorKind::Coercion) or
	/// [`ErrorKind::TypeMismatch`](crate::error::ErrorKind::TypeMismatch) when a value
	/// cannot be normalized.
	fn set_all(&mut self, key: NormKey, item: &MetadataItem) -> Result<()>;

	/// Replaces a canonical key's values with one value
	///
	/// # Errors
	///
	/// Same as [`FormatAdapter::set_all`].
	fn set(&mut self, key: NormKey, value: Value) -> Result<()> {
		self.set_all(key, &MetadataItem::from(value))
	}

	/// Appends a value to a canonical key's current values
	///
	/// On formats that cannot hold multiple values the existing first value wins.
	///
	/// # Errors
	///
	/// Same as [`FormatAdapter::set_all`].
	fn append(&mut self, key: NormKey, value: Value) -> Result<()> {
		let current = self.get(key)?;
		let value_type = current.value_type();
		let mut values = current.into_values();
		values.push(value);
		self.set_all(key, &MetadataItem::from_parts(value_type, values))
	}

	/// Deletes a canonical key from the native tag
	///
	/// Deleting a key with no native value is a no-op.
	///
	/// # Errors
	///
	/// Fails with [`ErrorKind::Readonly`](crate::error::ErrorKind::Readonly) for derived
	/// keys and [`ErrorKind::UnsupportedKey`](crate::error::ErrorKind::UnsupportedKey)
	/// for keys outside the format's map.
	fn remove(&mut self, key: NormKey) -> Result<()>;
}

// This defines the `Accessor` trait, providing unified typed getters/setters for commonly
// accessed keys on top of any `FormatAdapter`.
//
// Usage:
//
// accessor_trait! {
//     [field name]<kind>(NormKeyVariant)
// }
//
// * `field name` segments become the method name joined by underscores, so
//   [track number] yields `track_number`/`set_track_number`/`remove_track_number`.
//
// * `kind` is one of `str`/`int`/`bool` and fixes the getter return and setter argument
//   types (`String`/`i64`/`bool`).
macro_rules! accessor_trait {
	($([$($name:tt)+] < $kind:ident > ($key:ident)),+ $(,)?) => {
		/// Typed accessors for the most common canonical keys
		///
		/// Every [`FormatAdapter`] gets these through a blanket implementation. Getters
		/// return the first stored value; setters **overwrite**, they do not append. For
		/// multi-value access use [`FormatAdapter::get`] and [`FormatAdapter::append`].
		///
		/// # Examples
		///
		/// ```rust
		/// use tagnorm::adapter::Accessor;
		/// use tagnorm::dict::TagDict;
		/// use tagnorm::flac::FlacAdapter;
		/// use tagnorm::properties::AudioProperties;
		///
		/// let mut flac = FlacAdapter::new(TagDict::new(), Vec::new(), AudioProperties::default());
		///
		/// flac.set_album(String::from("A Night at the Opera"))?;
		/// flac.set_track_number(9)?;
		///
		/// assert_eq!(flac.album()?.as_deref(), Some("A Night at the Opera"));
		/// assert_eq!(flac.track_number()?, Some(9));
		/// # Ok::<(), tagnorm::error::TagnormError>(())
		/// ```
		pub trait Accessor: FormatAdapter {
			$(
				accessor_trait! { @GETTER [$($name)+] $kind $key }

				accessor_trait! { @SETTER [$($name)+] $kind $key }

				accessor_trait! { @REMOVER [$($name)+] $key }
			)+
		}
	};
	(@GETTER [$name:tt $($other:tt)*] str $key:ident) => {
		paste::paste! {
			#[doc = "Returns the " $name $(" " $other)* "."]
			///
			/// # Errors
			///
			/// Propagates any [`FormatAdapter::get`] failure.
			fn [<
				$name $(_ $other)*
			>] (&self) -> Result<Option<String>> {
				Ok(self.get(NormKey::$key)?.first_str().map(ToOwned::to_owned))
			}
		}
	};
	(@GETTER [$name:tt $($other:tt)*] int $key:ident) => {
		paste::paste! {
			#[doc = "Returns the " $name $(" " $other)* "."]
			///
			/// # Errors
			///
			/// Propagates any [`FormatAdapter::get`] failure.
			fn [<
				$name $(_ $other)*
			>] (&self) -> Result<Option<i64>> {
				Ok(self.get(NormKey::$key)?.first_int())
			}
		}
	};
	(@GETTER [$name:tt $($other:tt)*] bool $key:ident) => {
		paste::paste! {
			#[doc = "Returns the " $name $(" " $other)* " flag."]
			///
			/// # Errors
			///
			/// Propagates any [`FormatAdapter::get`] failure.
			fn [<
				$name $(_ $other)*
			>] (&self) -> Result<Option<bool>> {
				Ok(self.get(NormKey::$key)?.first_bool())
			}
		}
	};
	(@SETTER [$name:tt $($other:tt)*] str $key:ident) => {
		accessor_trait! { @SET_METHOD [$name $($other)*] $key String }
	};
	(@SETTER [$name:tt $($other:tt)*] int $key:ident) => {
		accessor_trait! { @SET_METHOD [$name $($other)*] $key i64 }
	};
	(@SETTER [$name:tt $($other:tt)*] bool $key:ident) => {
		accessor_trait! { @SET_METHOD [$name $($other)*] $key bool }
	};
	(@SET_METHOD [$name:tt $($other:tt)*] $key:ident $ty:ty) => {
		paste::paste! {
			#[doc = "Sets the " $name $(" " $other)* ", replacing any existing values."]
			///
			/// # Errors
			///
			/// Propagates any [`FormatAdapter::set`] failure.
			fn [<
				set_ $name $(_ $other)*
			>] (&mut self, value: $ty) -> Result<()> {
				self.set(NormKey::$key, Value::from(value))
			}
		}
	};
	(@REMOVER [$name:tt $($other:tt)*] $key:ident) => {
		paste::paste! {
			#[doc = "Removes the " $name $(" " $other)* "."]
			///
			/// # Errors
			///
			/// Propagates any [`FormatAdapter::remove`] failure.
			fn [<
				remove_ $name $(_ $other)*
			>] (&mut self) -> Result<()> {
				self.remove(NormKey::$key)
			}
		}
	};
}

accessor_trait! {
	[track title ]<str> (TrackTitle),   [artist      ]<str> (Artist),
	[album       ]<str> (Album),        [album artist]<str> (AlbumArtist),
	[composer    ]<str> (Composer),     [genre       ]<str> (Genre),
	[comment     ]<str> (Comment),      [year        ]<int> (Year),
	[track number]<int> (TrackNumber),  [total tracks]<int> (TotalTracks),
	[disc number ]<int> (DiscNumber),   [total discs ]<int> (TotalDiscs),
	[compilation ]<bool>(Compilation),
}

impl<T: FormatAdapter> Accessor for T {}
