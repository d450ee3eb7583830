//! Contains the errors that can arise within tagnorm
//!
//! The primary error is [`TagnormError`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.

use crate::artwork::{MimeType, PictureType};
use crate::item::{NormKey, ValueType};

use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, TagnormError>`
pub type Result<T> = std::result::Result<T, TagnormError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Key related errors
	/// A string key outside the canonical namespace
	UnknownKey(String),
	/// Attempted to write or remove a key the format has no mapping for
	UnsupportedKey(NormKey),
	/// Attempted to write or remove a derived (`#`-prefixed) key
	Readonly(NormKey),

	// Value related errors
	/// A sanitizer rejected a value on read or write
	Coercion(CoercionError),
	/// Provided a value that does not match the key's declared type
	TypeMismatch {
		/// The declared type of the key being written
		expected: ValueType,
		/// The type of the supplied value
		found: ValueType,
	},

	// Picture related errors
	/// Provided an invalid picture
	NotAPicture,
	/// Attempted to write a picture role the format has no native tag for
	UnsupportedPictureType(PictureType),
	/// Attempted to write a cover in a format the container rejects
	PictureFormat(MimeType),
	/// A picture write required image information that could not be derived
	MissingImageInfo,

	// Processing related errors
	/// Represents all cases of [`std::io::Error`]
	Io(std::io::Error),
}

/// An error that arises when a sanitizer rejects a raw value
pub struct CoercionError {
	target: &'static str,
	value: String,
}

impl CoercionError {
	/// Create a new `CoercionError` from the coercion target and the offending value
	#[must_use]
	pub fn new(target: &'static str, value: impl Into<String>) -> Self {
		Self {
			target,
			value: value.into(),
		}
	}

	/// Returns a description of the coercion target
	pub fn target(&self) -> &str {
		self.target
	}

	/// Returns the value that failed to coerce
	pub fn value(&self) -> &str {
		&self.value
	}
}

impl Debug for CoercionError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}: {:?}", self.target, self.value)
	}
}

impl Display for CoercionError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "Cannot coerce {:?} into a {}", self.value, self.target)
	}
}

/// Errors that could occur within tagnorm
pub struct TagnormError {
	pub(crate) kind: ErrorKind,
}

impl TagnormError {
	/// Create a `TagnormError` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagnorm::error::{ErrorKind, TagnormError};
	///
	/// let not_a_picture = TagnormError::new(ErrorKind::NotAPicture);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagnorm::error::{ErrorKind, TagnormError};
	///
	/// let not_a_picture = TagnormError::new(ErrorKind::NotAPicture);
	/// if let ErrorKind::NotAPicture = not_a_picture.kind() {
	/// 	println!("Where's the picture?");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}
}

impl std::error::Error for TagnormError {}

impl Debug for TagnormError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<ErrorKind> for TagnormError {
	fn from(input: ErrorKind) -> Self {
		Self { kind: input }
	}
}

impl From<CoercionError> for TagnormError {
	fn from(input: CoercionError) -> Self {
		Self {
			kind: ErrorKind::Coercion(input),
		}
	}
}

impl From<std::io::Error> for TagnormError {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl Display for TagnormError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match &self.kind {
			ErrorKind::UnknownKey(key) => write!(f, "Unknown canonical key: {key:?}"),
			ErrorKind::UnsupportedKey(key) => {
				write!(f, "Key `{}` has no mapping for this format", key.as_str())
			},
			ErrorKind::Readonly(key) => write!(f, "Key `{}` is read-only", key.as_str()),
			ErrorKind::Coercion(err) => write!(f, "{err}"),
			ErrorKind::TypeMismatch { expected, found } => write!(
				f,
				"Expected a value of type {expected:?}, found {found:?}"
			),
			ErrorKind::NotAPicture => write!(f, "Provided an invalid picture"),
			ErrorKind::UnsupportedPictureType(pic_type) => write!(
				f,
				"Picture type {pic_type:?} has no native tag in this format"
			),
			ErrorKind::PictureFormat(mime) => {
				write!(f, "Cover art must be JPEG or PNG (found {})", mime.as_str())
			},
			ErrorKind::MissingImageInfo => write!(
				f,
				"Artwork is missing image information (MIME type, dimensions, color depth)"
			),
			ErrorKind::Io(err) => write!(f, "{err}"),
		}
	}
}
