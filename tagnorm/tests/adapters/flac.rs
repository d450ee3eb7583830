use crate::util;

use tagnorm::adapter::FormatAdapter;
use tagnorm::artwork::Artwork;
use tagnorm::config::NormOptions;
use tagnorm::dict::{NativeValue, TagDict};
use tagnorm::error::ErrorKind;
use tagnorm::flac::FlacAdapter;
use tagnorm::item::{MetadataItem, NormKey, Value, ValueType};
use tagnorm::properties::AudioProperties;

fn flac_adapter(dict: TagDict) -> FlacAdapter {
	FlacAdapter::new(dict, Vec::new(), AudioProperties::default())
}

#[test_log::test]
fn year_prefers_date_over_originaldate() {
	let dict = util::text_dict(&[("originaldate", "1977-10-14")]);
	let adapter = flac_adapter(dict);
	assert_eq!(adapter.get(NormKey::Year).unwrap().first_int(), Some(1977));

	let dict = util::text_dict(&[("date", "1982"), ("originaldate", "1977-10-14")]);
	let adapter = flac_adapter(dict);
	assert_eq!(adapter.get(NormKey::Year).unwrap().first_int(), Some(1982));
}

#[test_log::test]
fn year_writes_the_date_tag() {
	let mut adapter = flac_adapter(TagDict::new());

	adapter.set(NormKey::Year, Value::Int(1990)).unwrap();

	assert_eq!(
		adapter.dict().get_first("date").and_then(NativeValue::text),
		Some("1990")
	);
	assert!(!adapter.dict().contains("originaldate"));
}

#[test_log::test]
fn multiple_values_are_kept_in_order() {
	let mut adapter = flac_adapter(TagDict::new());

	let item = MetadataItem::from_parts(
		ValueType::Str,
		vec![Value::from("Anneke"), Value::from("Danny")],
	);
	adapter.set_all(NormKey::Artist, &item).unwrap();
	adapter.append(NormKey::Artist, Value::from("Hans")).unwrap();

	let values: Vec<_> = adapter
		.dict()
		.get("artist")
		.unwrap()
		.iter()
		.filter_map(NativeValue::text)
		.collect();
	assert_eq!(values, ["Anneke", "Danny", "Hans"]);

	let read = adapter.get(NormKey::Artist).unwrap();
	assert_eq!(read.len(), 3);
}

#[test_log::test]
fn append_collapses_when_lists_are_disabled() {
	let options = NormOptions::new().appendable(false);
	let mut adapter =
		FlacAdapter::with_options(TagDict::new(), Vec::new(), AudioProperties::default(), options);

	adapter.set(NormKey::Artist, Value::from("Anneke")).unwrap();
	adapter.append(NormKey::Artist, Value::from("Danny")).unwrap();

	assert_eq!(adapter.dict().get("artist").map(<[_]>::len), Some(1));
}

#[test_log::test]
fn seeded_pictures_are_probed_on_read() {
	let bare = Artwork::unchecked(util::png_bytes()).build();
	assert_eq!(bare.width(), None);

	let adapter = FlacAdapter::new(TagDict::new(), vec![bare], AudioProperties::default());

	let read = adapter.get(NormKey::Artwork).unwrap();
	let artwork = read.first_artwork().unwrap();
	assert_eq!(artwork.width(), Some(1200));
	assert_eq!(artwork.height(), Some(630));
	assert_eq!(artwork.depth(), Some(24));
}

#[test_log::test]
fn setting_artwork_replaces_the_picture_list() {
	let mut adapter = flac_adapter(TagDict::new());

	adapter
		.set(NormKey::Artwork, Value::Artwork(util::png_artwork()))
		.unwrap();
	assert_eq!(adapter.pictures().len(), 1);

	adapter
		.set(NormKey::Artwork, Value::Artwork(util::jpeg_artwork()))
		.unwrap();
	assert_eq!(adapter.pictures().len(), 1);
	assert_eq!(adapter.pictures()[0].data(), util::jpeg_bytes());

	adapter.remove(NormKey::Artwork).unwrap();
	assert!(adapter.pictures().is_empty());
}

#[test_log::test]
fn artwork_without_image_info_is_rejected() {
	let mut adapter = flac_adapter(TagDict::new());

	let bare = Artwork::unchecked(util::png_bytes()).build();
	let err = adapter
		.set(NormKey::Artwork, Value::Artwork(bare))
		.unwrap_err();

	assert!(matches!(err.kind(), ErrorKind::MissingImageInfo));
	assert!(adapter.pictures().is_empty());
}

#[test_log::test]
fn movement_tags_use_vorbis_spellings() {
	let mut adapter = flac_adapter(TagDict::new());

	adapter
		.set(NormKey::MovementName, Value::from("Allegro"))
		.unwrap();
	adapter.set(NormKey::MovementNumber, Value::Int(2)).unwrap();

	assert_eq!(
		adapter
			.dict()
			.get_first("movementname")
			.and_then(NativeValue::text),
		Some("Allegro")
	);
	assert_eq!(
		adapter
			.dict()
			.get_first("movement")
			.and_then(NativeValue::text),
		Some("2")
	);
}

#[test_log::test]
fn codec_is_reported_without_properties() {
	let adapter = flac_adapter(TagDict::new());
	assert_eq!(adapter.get(NormKey::Codec).unwrap().first_str(), Some("flac"));
}

#[test_log::test]
fn into_parts_returns_dict_and_pictures() {
	let mut adapter = flac_adapter(TagDict::new());
	adapter.set(NormKey::TrackTitle, Value::from("Shallow")).unwrap();
	adapter
		.set(NormKey::Artwork, Value::Artwork(util::png_artwork()))
		.unwrap();

	let (dict, pictures) = adapter.into_parts();
	assert!(dict.contains("title"));
	assert_eq!(pictures.len(), 1);
}
