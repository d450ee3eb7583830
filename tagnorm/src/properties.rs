//! Decoder-reported audio stream properties
//!
//! These back the read-only `#`-prefixed keys; the container codec fills in whatever its
//! stream headers expose and leaves the rest unset.

use std::time::Duration;

/// The audio properties reported by the container codec
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
///
/// use tagnorm::properties::AudioProperties;
///
/// let properties = AudioProperties::new(
/// 	Some(String::from("flac")),
/// 	Some(Duration::from_secs(237)),
/// 	Some(1411),
/// 	Some(44_100),
/// 	Some(16),
/// 	Some(2),
/// );
///
/// assert_eq!(properties.sample_rate(), Some(44_100));
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct AudioProperties {
	codec: Option<String>,
	duration: Option<Duration>,
	bitrate: Option<u32>,
	sample_rate: Option<u32>,
	bit_depth: Option<u8>,
	channels: Option<u8>,
}

impl AudioProperties {
	/// Create a new `AudioProperties`
	pub const fn new(
		codec: Option<String>,
		duration: Option<Duration>,
		bitrate: Option<u32>,
		sample_rate: Option<u32>,
		bit_depth: Option<u8>,
		channels: Option<u8>,
	) -> Self {
		Self {
			codec,
			duration,
			bitrate,
			sample_rate,
			bit_depth,
			channels,
		}
	}

	/// The codec name the decoder reported
	pub fn codec(&self) -> Option<&str> {
		self.codec.as_deref()
	}

	/// Duration of the stream
	pub fn duration(&self) -> Option<Duration> {
		self.duration
	}

	/// Audio bitrate (kbps)
	pub fn bitrate(&self) -> Option<u32> {
		self.bitrate
	}

	/// Sample rate (Hz)
	pub fn sample_rate(&self) -> Option<u32> {
		self.sample_rate
	}

	/// Bits per sample
	pub fn bit_depth(&self) -> Option<u8> {
		self.bit_depth
	}

	/// Channel count
	pub fn channels(&self) -> Option<u8> {
		self.channels
	}
}
