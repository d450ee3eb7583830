use crate::util;

use tagnorm::adapter::FormatAdapter;
use tagnorm::ape::{ApeAdapter, ApeCodec};
use tagnorm::artwork::PictureType;
use tagnorm::dict::{NativeValue, TagDict};
use tagnorm::error::ErrorKind;
use tagnorm::item::{MetadataItem, NormKey, Value, ValueType};
use tagnorm::properties::AudioProperties;

fn ape_adapter(dict: TagDict) -> ApeAdapter {
	ApeAdapter::new(ApeCodec::Ape, dict, AudioProperties::default())
}

#[test_log::test]
fn text_round_trip() {
	let mut adapter = ape_adapter(TagDict::new());

	adapter.set(NormKey::Artist, Value::from("Leprous")).unwrap();

	assert_eq!(
		adapter.dict().get_first("Artist").and_then(NativeValue::text),
		Some("Leprous")
	);
	assert_eq!(
		adapter.get(NormKey::Artist).unwrap().first_str(),
		Some("Leprous")
	);
}

#[test_log::test]
fn year_coerces_dated_text_on_read() {
	let dict = util::text_dict(&[("Year", "2003-04-05")]);
	let mut adapter = ape_adapter(dict);

	assert_eq!(adapter.get(NormKey::Year).unwrap().first_int(), Some(2003));

	adapter.set(NormKey::Year, Value::Int(1982)).unwrap();
	assert_eq!(
		adapter.dict().get_first("Year").and_then(NativeValue::text),
		Some("1982")
	);
}

#[test_log::test]
fn compilation_flag_stores_numeric_text() {
	let mut adapter = ape_adapter(TagDict::new());

	adapter
		.set(NormKey::Compilation, Value::Bool(true))
		.unwrap();
	assert_eq!(
		adapter
			.dict()
			.get_first("Compilation")
			.and_then(NativeValue::text),
		Some("1")
	);

	let adapter = ape_adapter(util::text_dict(&[("Compilation", "0")]));
	assert_eq!(
		adapter.get(NormKey::Compilation).unwrap().first_bool(),
		Some(false)
	);
}

#[test_log::test]
fn track_halves_share_one_native_tag() {
	let mut adapter = ape_adapter(TagDict::new());

	adapter.set(NormKey::TrackNumber, Value::Int(3)).unwrap();
	adapter.set(NormKey::TotalTracks, Value::Int(12)).unwrap();

	assert_eq!(
		adapter.dict().get_first("Track").and_then(NativeValue::text),
		Some("3/12")
	);
	assert_eq!(adapter.get(NormKey::TrackNumber).unwrap().first_int(), Some(3));
	assert_eq!(adapter.get(NormKey::TotalTracks).unwrap().first_int(), Some(12));

	adapter.remove(NormKey::TrackNumber).unwrap();
	assert_eq!(
		adapter.dict().get_first("Track").and_then(NativeValue::text),
		Some("/12")
	);
	assert!(adapter.get(NormKey::TrackNumber).unwrap().is_empty());

	adapter.remove(NormKey::TotalTracks).unwrap();
	assert!(!adapter.dict().contains("Track"));
}

#[test_log::test]
fn setting_an_empty_item_clears_a_pair_half() {
	let mut adapter = ape_adapter(util::text_dict(&[("Disc", "1/2")]));

	adapter
		.set_all(NormKey::TotalDiscs, &MetadataItem::new(ValueType::Int))
		.unwrap();

	assert_eq!(
		adapter.dict().get_first("Disc").and_then(NativeValue::text),
		Some("1/")
	);
}

#[test_log::test]
fn pair_halves_reject_unparsable_text() {
	let adapter = ape_adapter(util::text_dict(&[("Track", "three/12")]));

	let err = adapter.get(NormKey::TrackNumber).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::Coercion(_)));

	assert_eq!(adapter.get(NormKey::TotalTracks).unwrap().first_int(), Some(12));
}

#[test_log::test]
fn musicbrainz_setter_spelling_converges() {
	let mut adapter = ape_adapter(TagDict::new());

	adapter
		.set(NormKey::MusicBrainzOriginalAlbumId, Value::from("0c6d-4a3f"))
		.unwrap();

	let stored: Vec<&str> = adapter.dict().items().map(|(name, _)| name).collect();
	assert_eq!(stored, ["musicbrainz_originalalbumid"]);
	assert_eq!(
		adapter
			.get(NormKey::MusicBrainzOriginalAlbumId)
			.unwrap()
			.first_str(),
		Some("0c6d-4a3f")
	);
}

#[test_log::test]
fn extra_values_collapse_to_the_first() {
	let mut adapter = ape_adapter(TagDict::new());

	let item = MetadataItem::from_parts(
		ValueType::Str,
		vec![Value::from("Ihsahn"), Value::from("Leprous")],
	);
	adapter.set_all(NormKey::Artist, &item).unwrap();

	assert_eq!(adapter.dict().get("Artist").map(<[_]>::len), Some(1));
	assert_eq!(
		adapter.dict().get_first("Artist").and_then(NativeValue::text),
		Some("Ihsahn")
	);
}

#[test_log::test]
fn replaygain_text_is_canonicalized() {
	let dict = util::text_dict(&[("REPLAYGAIN_TRACK_GAIN", "-8.97 dB")]);
	let mut adapter = ape_adapter(dict);

	assert_eq!(
		adapter.get(NormKey::ReplayGainTrackGain).unwrap().first_str(),
		Some("-8.97 dB")
	);

	adapter
		.set(NormKey::ReplayGainTrackPeak, Value::Float(0.988))
		.unwrap();
	assert_eq!(
		adapter
			.dict()
			.get_first("REPLAYGAIN_TRACK_PEAK")
			.and_then(NativeValue::text),
		Some("0.988")
	);
	assert_eq!(
		adapter.get(NormKey::ReplayGainTrackPeak).unwrap().first_float(),
		Some(0.988)
	);
}

#[test_log::test]
fn artwork_round_trips_through_cover_keys() {
	let mut adapter = ape_adapter(TagDict::new());

	let front = util::png_artwork();
	let mut back = util::jpeg_artwork();
	back.set_pic_type(PictureType::CoverBack);

	let item = MetadataItem::from_parts(
		ValueType::Artwork,
		vec![Value::Artwork(front.clone()), Value::Artwork(back.clone())],
	);
	adapter.set_all(NormKey::Artwork, &item).unwrap();

	assert!(adapter.dict().contains("Cover Art (Front)"));
	assert!(adapter.dict().contains("Cover Art (Back)"));

	let read = adapter.get(NormKey::Artwork).unwrap();
	let artworks: Vec<_> = read
		.values()
		.iter()
		.filter_map(|value| value.as_artwork())
		.collect();

	assert_eq!(artworks.len(), 2);
	assert_eq!(artworks[0].pic_type(), PictureType::CoverFront);
	assert_eq!(artworks[0].data(), front.data());
	assert_eq!(artworks[1].pic_type(), PictureType::CoverBack);
	assert_eq!(artworks[1].data(), back.data());
}

#[test_log::test]
fn unsupported_picture_role_leaves_the_dict_untouched() {
	let mut adapter = ape_adapter(TagDict::new());

	let front = util::png_artwork();
	let mut media = util::jpeg_artwork();
	media.set_pic_type(PictureType::Media);

	let item = MetadataItem::from_parts(
		ValueType::Artwork,
		vec![Value::Artwork(front), Value::Artwork(media)],
	);
	let err = adapter.set_all(NormKey::Artwork, &item).unwrap_err();

	assert!(matches!(
		err.kind(),
		ErrorKind::UnsupportedPictureType(PictureType::Media)
	));
	assert!(adapter.dict().is_empty());
}

#[test_log::test]
fn removing_artwork_deletes_both_cover_keys() {
	let mut adapter = ape_adapter(TagDict::new());

	adapter
		.set(NormKey::Artwork, Value::Artwork(util::png_artwork()))
		.unwrap();
	assert!(adapter.dict().contains("Cover Art (Front)"));

	adapter.remove(NormKey::Artwork).unwrap();
	assert!(adapter.dict().is_empty());
}

#[test_log::test]
fn wavpack_reports_its_codec_literal() {
	let adapter = ApeAdapter::new(
		ApeCodec::WavPack,
		TagDict::new(),
		util::stream_properties(),
	);

	assert_eq!(adapter.get(NormKey::Codec).unwrap().first_str(), Some("WavePack"));
	assert!(adapter.get(NormKey::Bitrate).unwrap().is_empty());
}

#[test_log::test]
fn masked_properties_read_empty_and_reject_writes() {
	let mut adapter = ApeAdapter::new(ApeCodec::Ape, TagDict::new(), util::stream_properties());

	assert!(adapter.get(NormKey::Codec).unwrap().is_empty());
	assert!(adapter.get(NormKey::Channels).unwrap().is_empty());
	assert_eq!(adapter.get(NormKey::Bitrate).unwrap().first_int(), Some(320));

	let err = adapter.set(NormKey::Channels, Value::Int(2)).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::Readonly(NormKey::Channels)));
}
