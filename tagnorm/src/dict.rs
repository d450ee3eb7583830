//! The in-memory native tag dictionary
//!
//! This is the narrow interface between the normalization layer and the container codec:
//! the codec parses its binary layout into a [`TagDict`] (plus
//! [`AudioProperties`](crate::properties::AudioProperties) and, for FLAC, a native picture
//! list), hands it to an adapter, and serializes the mutated dictionary back out.

/// The image format a native MP4 cover declares
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CoverFormat {
	/// JPEG
	Jpeg,
	/// PNG
	Png,
}

/// A single native tag value
///
/// Containers store different shapes under their native names; the variants cover every
/// shape the supported families produce.
#[derive(Clone, Debug, PartialEq)]
pub enum NativeValue {
	/// A text value (APE text items, Vorbis comments, MP4 text atoms)
	Text(String),
	/// An integer value (MP4 integer atoms such as `mvc`/`mvi`)
	Int(i64),
	/// A boolean value (MP4 flag atoms such as `cpil`/`shwm`)
	Bool(bool),
	/// A number/total tuple (MP4 `trkn`/`disk`)
	Pair(u32, u32),
	/// An opaque byte value (APE binary items, MP4 freeform payloads)
	Binary(Vec<u8>),
	/// A cover image with its declared format (MP4 `covr`)
	Cover(CoverFormat, Vec<u8>),
}

impl NativeValue {
	/// Returns the value as text, if it is a [`NativeValue::Text`]
	pub fn text(&self) -> Option<&str> {
		match self {
			NativeValue::Text(text) => Some(text),
			_ => None,
		}
	}

	/// Returns the value as a number/total tuple, if it is a [`NativeValue::Pair`]
	pub fn pair(&self) -> Option<(u32, u32)> {
		match self {
			NativeValue::Pair(num, total) => Some((*num, *total)),
			_ => None,
		}
	}

	/// Returns the value's bytes, if it is a [`NativeValue::Binary`]
	pub fn binary(&self) -> Option<&[u8]> {
		match self {
			NativeValue::Binary(data) => Some(data),
			_ => None,
		}
	}

	/// Whether the value is empty for lookup purposes
	///
	/// Fallback name resolution skips entries whose value is empty text.
	pub fn is_empty(&self) -> bool {
		match self {
			NativeValue::Text(text) => text.is_empty(),
			NativeValue::Binary(data) => data.is_empty(),
			_ => false,
		}
	}
}

impl From<String> for NativeValue {
	fn from(input: String) -> Self {
		NativeValue::Text(input)
	}
}

impl From<&str> for NativeValue {
	fn from(input: &str) -> Self {
		NativeValue::Text(input.to_owned())
	}
}

/// An insertion-ordered mapping from native tag name to its values
///
/// Names compare ASCII case-insensitively, matching APE and Vorbis comment semantics; a
/// native tag may hold several values (Vorbis allows repeated fields, MP4 atoms hold
/// lists).
///
/// # Examples
///
/// ```rust
/// use tagnorm::dict::{NativeValue, TagDict};
///
/// let mut dict = TagDict::new();
/// dict.push(String::from("artist"), NativeValue::from("Foo"));
/// dict.push(String::from("ARTIST"), NativeValue::from("Bar"));
///
/// assert_eq!(dict.get("Artist").map(<[NativeValue]>::len), Some(2));
/// ```
#[derive(Default, Clone, Debug, PartialEq)]
pub struct TagDict {
	items: Vec<(String, Vec<NativeValue>)>,
}

impl TagDict {
	/// Create a new empty `TagDict`
	pub fn new() -> Self {
		Self::default()
	}

	/// The number of distinct native names
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether the dictionary holds no entries
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Whether a native name is present
	pub fn contains(&self, name: &str) -> bool {
		self.items.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
	}

	/// The values stored under a native name
	pub fn get(&self, name: &str) -> Option<&[NativeValue]> {
		self.items
			.iter()
			.find(|(k, _)| k.eq_ignore_ascii_case(name))
			.map(|(_, v)| v.as_slice())
	}

	/// The first value stored under a native name
	pub fn get_first(&self, name: &str) -> Option<&NativeValue> {
		self.get(name).and_then(<[NativeValue]>::first)
	}

	/// Replaces the values stored under a native name
	///
	/// An empty `values` list removes the entry instead.
	pub fn set(&mut self, name: String, values: Vec<NativeValue>) {
		self.items.retain(|(k, _)| !k.eq_ignore_ascii_case(&name));
		if !values.is_empty() {
			self.items.push((name, values));
		}
	}

	/// Replaces the entry under a native name with a single value
	pub fn set_one(&mut self, name: String, value: NativeValue) {
		self.set(name, vec![value]);
	}

	/// Appends a value to a native name, creating the entry if needed
	pub fn push(&mut self, name: String, value: NativeValue) {
		if let Some((_, values)) = self
			.items
			.iter_mut()
			.find(|(k, _)| k.eq_ignore_ascii_case(&name))
		{
			values.push(value);
			return;
		}

		self.items.push((name, vec![value]));
	}

	/// Removes a native name, returning its values
	///
	/// Removing an absent name is a no-op.
	pub fn remove(&mut self, name: &str) -> Option<Vec<NativeValue>> {
		let idx = self
			.items
			.iter()
			.position(|(k, _)| k.eq_ignore_ascii_case(name))?;
		Some(self.items.remove(idx).1)
	}

	/// All entries, in insertion order
	pub fn items(&self) -> impl Iterator<Item = (&str, &[NativeValue])> {
		self.items.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lookups_ignore_case() {
		let mut dict = TagDict::new();
		dict.set_one(String::from("Title"), NativeValue::from("See You"));

		assert!(dict.contains("TITLE"));
		assert_eq!(
			dict.get_first("title").and_then(NativeValue::text),
			Some("See You")
		);
	}

	#[test]
	fn set_replaces_push_appends() {
		let mut dict = TagDict::new();
		dict.push(String::from("artist"), NativeValue::from("A"));
		dict.push(String::from("artist"), NativeValue::from("B"));
		assert_eq!(dict.get("artist").map(<[NativeValue]>::len), Some(2));

		dict.set_one(String::from("artist"), NativeValue::from("C"));
		assert_eq!(
			dict.get("artist"),
			Some(&[NativeValue::from("C")][..])
		);
	}

	#[test]
	fn removing_absent_names_is_a_noop() {
		let mut dict = TagDict::new();
		assert!(dict.remove("nothing").is_none());
	}

	#[test]
	fn empty_set_clears() {
		let mut dict = TagDict::new();
		dict.set_one(String::from("date"), NativeValue::from("2001"));
		dict.set(String::from("date"), Vec::new());
		assert!(!dict.contains("date"));
	}
}
