//! Options to control how tags are normalized

/// Options to control how an adapter maps values onto native tags
///
/// # Examples
///
/// ```rust
/// use tagnorm::config::NormOptions;
///
/// let options = NormOptions::new().probe_artwork(false);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct NormOptions {
	pub(crate) appendable: Option<bool>,
	pub(crate) probe_artwork: bool,
}

impl Default for NormOptions {
	/// The default implementation for `NormOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// NormOptions {
	/// 	appendable: None,
	/// 	probe_artwork: true,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl NormOptions {
	/// Creates a new `NormOptions`, alias for `Default` implementation
	///
	/// See also: [`NormOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagnorm::config::NormOptions;
	///
	/// let options = NormOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			appendable: None,
			probe_artwork: true,
		}
	}

	/// Whether multi-valued native text tags hold every supplied value
	///
	/// `None` keeps the format family's default: FLAC and the Ogg family append, the
	/// APE family and MP4 collapse writes to the first value. Forcing `false` on an
	/// appendable format collapses its writes too; forcing `true` on a format whose
	/// native tags are single-valued has no effect.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagnorm::config::NormOptions;
	///
	/// // By default, the format family decides. Here, we always want one value per tag.
	/// let options = NormOptions::new().appendable(false);
	/// ```
	pub fn appendable(&mut self, appendable: bool) -> Self {
		self.appendable = Some(appendable);
		*self
	}

	/// Whether or not to run the image header probe when artwork is constructed
	///
	/// The probe derives MIME type, dimensions, and color depth from PNG/JPEG headers
	/// on the artwork read paths. With it disabled, artwork only carries fields the
	/// native format declares explicitly, and writes that require more image
	/// information fail with
	/// [`MissingImageInfo`](crate::error::ErrorKind::MissingImageInfo).
	///
	/// # Examples
	///
	/// ```rust
	/// use tagnorm::config::NormOptions;
	///
	/// // By default, `probe_artwork` is enabled. Here, raw bytes are all we need.
	/// let options = NormOptions::new().probe_artwork(false);
	/// ```
	pub fn probe_artwork(&mut self, probe_artwork: bool) -> Self {
		self.probe_artwork = probe_artwork;
		*self
	}
}
