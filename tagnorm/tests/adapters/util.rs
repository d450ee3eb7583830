use std::time::Duration;

use tagnorm::artwork::Artwork;
use tagnorm::dict::{NativeValue, TagDict};
use tagnorm::properties::AudioProperties;

/// A minimal PNG header that probes as 1200x630, 24-bit
pub(crate) fn png_bytes() -> Vec<u8> {
	let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
	data.extend(13u32.to_be_bytes());
	data.extend(b"IHDR");
	data.extend(1200u32.to_be_bytes());
	data.extend(630u32.to_be_bytes());
	data.extend([8, 2, 0, 0, 0]);
	data
}

/// A minimal JPEG header that probes as 1200x630, 24-bit
pub(crate) fn jpeg_bytes() -> Vec<u8> {
	let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
	data.extend(16u16.to_be_bytes());
	data.extend([0; 14]);
	data.extend([0xFF, 0xC0]);
	data.extend(17u16.to_be_bytes());
	data.push(8);
	data.extend(630u16.to_be_bytes());
	data.extend(1200u16.to_be_bytes());
	data.push(3);
	data
}

pub(crate) fn png_artwork() -> Artwork {
	Artwork::new(png_bytes())
}

pub(crate) fn jpeg_artwork() -> Artwork {
	Artwork::new(jpeg_bytes())
}

pub(crate) fn text_dict(entries: &[(&str, &str)]) -> TagDict {
	let mut dict = TagDict::new();
	for (name, value) in entries {
		dict.push((*name).to_owned(), NativeValue::Text((*value).to_owned()));
	}
	dict
}

pub(crate) fn stream_properties() -> AudioProperties {
	AudioProperties::new(
		Some(String::from("flac")),
		Some(Duration::from_millis(183_500)),
		Some(320),
		Some(44_100),
		Some(16),
		Some(2),
	)
}
