use std::time::Duration;

use crate::util;

use tagnorm::adapter::FormatAdapter;
use tagnorm::dict::TagDict;
use tagnorm::error::ErrorKind;
use tagnorm::flac::FlacAdapter;
use tagnorm::item::{NormKey, Value};
use tagnorm::mp4::Mp4Adapter;
use tagnorm::properties::AudioProperties;

#[test_log::test]
fn stream_properties_surface_as_derived_keys() {
	let adapter = FlacAdapter::new(TagDict::new(), Vec::new(), util::stream_properties());

	assert_eq!(adapter.get(NormKey::Length).unwrap().first_float(), Some(183.5));
	assert_eq!(adapter.get(NormKey::Channels).unwrap().first_int(), Some(2));
	assert_eq!(adapter.get(NormKey::Bitrate).unwrap().first_int(), Some(320));
	assert_eq!(
		adapter.get(NormKey::SampleRate).unwrap().first_int(),
		Some(44_100)
	);
	assert_eq!(
		adapter.get(NormKey::BitsPerSample).unwrap().first_int(),
		Some(16)
	);
}

#[test_log::test]
fn absent_properties_read_as_empty_items() {
	let adapter = FlacAdapter::new(TagDict::new(), Vec::new(), AudioProperties::default());

	assert!(adapter.get(NormKey::Length).unwrap().is_empty());
	assert!(adapter.get(NormKey::Channels).unwrap().is_empty());
}

#[test_log::test]
fn codec_falls_through_to_the_decoder_name() {
	let properties = AudioProperties::new(
		Some(String::from("alac")),
		Some(Duration::from_secs(10)),
		None,
		None,
		None,
		None,
	);
	let adapter = Mp4Adapter::new(TagDict::new(), properties);

	assert_eq!(adapter.get(NormKey::Codec).unwrap().first_str(), Some("alac"));
}

#[test_log::test]
fn derived_keys_reject_writes_and_removal() {
	let mut adapter = FlacAdapter::new(TagDict::new(), Vec::new(), util::stream_properties());

	let err = adapter.set(NormKey::Length, Value::Float(1.0)).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::Readonly(NormKey::Length)));

	let err = adapter.remove(NormKey::Codec).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::Readonly(NormKey::Codec)));

	assert!(adapter.dict().is_empty());
}

#[test_log::test]
fn derived_keys_are_flagged_in_the_namespace() {
	for key in NormKey::ALL {
		assert_eq!(key.is_derived(), key.as_str().starts_with('#'));
	}
}
