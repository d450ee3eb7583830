use crate::util;

use tagnorm::adapter::FormatAdapter;
use tagnorm::artwork::{Artwork, MimeType, PictureType};
use tagnorm::dict::{CoverFormat, NativeValue, TagDict};
use tagnorm::error::ErrorKind;
use tagnorm::item::{MetadataItem, NormKey, Value, ValueType};
use tagnorm::mp4::Mp4Adapter;
use tagnorm::properties::AudioProperties;

const ISRC_ATOM: &str = "----:com.apple.iTunes:ISRC";

fn mp4_adapter(dict: TagDict) -> Mp4Adapter {
	Mp4Adapter::new(dict, AudioProperties::default())
}

#[test_log::test]
fn track_tuple_lifecycle() {
	let mut adapter = mp4_adapter(TagDict::new());

	assert!(adapter.get(NormKey::TrackNumber).unwrap().is_empty());

	adapter.set(NormKey::TrackNumber, Value::Int(7)).unwrap();
	assert_eq!(
		adapter.dict().get_first("trkn"),
		Some(&NativeValue::Pair(7, 0))
	);

	adapter.set(NormKey::TotalTracks, Value::Int(12)).unwrap();
	assert_eq!(
		adapter.dict().get_first("trkn"),
		Some(&NativeValue::Pair(7, 12))
	);
	assert_eq!(adapter.get(NormKey::TrackNumber).unwrap().first_int(), Some(7));
	assert_eq!(adapter.get(NormKey::TotalTracks).unwrap().first_int(), Some(12));

	adapter.remove(NormKey::TrackNumber).unwrap();
	assert_eq!(
		adapter.dict().get_first("trkn"),
		Some(&NativeValue::Pair(0, 12))
	);
	assert_eq!(adapter.get(NormKey::TrackNumber).unwrap().first_int(), Some(0));

	adapter.remove(NormKey::TotalTracks).unwrap();
	assert!(!adapter.dict().contains("trkn"));
}

#[test_log::test]
fn tuple_halves_ignore_non_pair_atoms() {
	let mut dict = TagDict::new();
	dict.set_one(String::from("disk"), NativeValue::from("1/2"));
	let adapter = mp4_adapter(dict);

	assert!(adapter.get(NormKey::DiscNumber).unwrap().is_empty());
}

#[test_log::test]
fn freeform_text_round_trips_as_binary() {
	let mut adapter = mp4_adapter(TagDict::new());

	adapter
		.set(NormKey::Isrc, Value::from("GBAYE0601498"))
		.unwrap();

	assert_eq!(
		adapter.dict().get_first(ISRC_ATOM),
		Some(&NativeValue::Binary(b"GBAYE0601498".to_vec()))
	);
	assert_eq!(
		adapter.get(NormKey::Isrc).unwrap().first_str(),
		Some("GBAYE0601498")
	);
}

#[test_log::test]
fn non_utf8_freeform_bytes_fail_coercion() {
	let mut dict = TagDict::new();
	dict.set_one(
		ISRC_ATOM.to_owned(),
		NativeValue::Binary(vec![0xFF, 0xFE, 0x80]),
	);
	let adapter = mp4_adapter(dict);

	let err = adapter.get(NormKey::Isrc).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::Coercion(_)));
}

#[test_log::test]
fn compilation_stores_a_native_bool() {
	let mut adapter = mp4_adapter(TagDict::new());

	adapter
		.set(NormKey::Compilation, Value::Bool(true))
		.unwrap();
	assert_eq!(
		adapter.dict().get_first("cpil"),
		Some(&NativeValue::Bool(true))
	);

	adapter.set(NormKey::ShowMovement, Value::Bool(false)).unwrap();
	assert_eq!(
		adapter.get(NormKey::ShowMovement).unwrap().first_bool(),
		Some(false)
	);
}

#[test_log::test]
fn year_reads_the_day_atom() {
	let mut dict = TagDict::new();
	dict.set_one(String::from("©day"), NativeValue::from("1982-06-11"));
	let adapter = mp4_adapter(dict);

	assert_eq!(adapter.get(NormKey::Year).unwrap().first_int(), Some(1982));
}

#[test_log::test]
fn covers_carry_their_native_format() {
	let mut adapter = mp4_adapter(TagDict::new());

	let item = MetadataItem::from_parts(
		ValueType::Artwork,
		vec![
			Value::Artwork(util::png_artwork()),
			Value::Artwork(util::jpeg_artwork()),
		],
	);
	adapter.set_all(NormKey::Artwork, &item).unwrap();

	let covers = adapter.dict().get("covr").unwrap();
	assert_eq!(covers[0], NativeValue::Cover(CoverFormat::Png, util::png_bytes()));
	assert_eq!(
		covers[1],
		NativeValue::Cover(CoverFormat::Jpeg, util::jpeg_bytes())
	);
}

#[test_log::test]
fn cover_reads_probe_the_image_header() {
	let mut dict = TagDict::new();
	dict.set_one(
		String::from("covr"),
		NativeValue::Cover(CoverFormat::Jpeg, util::jpeg_bytes()),
	);
	let adapter = mp4_adapter(dict);

	let read = adapter.get(NormKey::Artwork).unwrap();
	let artwork = read.first_artwork().unwrap();
	assert_eq!(artwork.pic_type(), PictureType::CoverFront);
	assert_eq!(artwork.mime_type(), Some(&MimeType::Jpeg));
	assert_eq!(artwork.width(), Some(1200));
}

#[test_log::test]
fn unsupported_cover_formats_are_rejected() {
	let mut adapter = mp4_adapter(TagDict::new());

	let gif = Artwork::unchecked(vec![0x47, 0x49, 0x46])
		.mime_type(MimeType::Gif)
		.build();
	let err = adapter
		.set(NormKey::Artwork, Value::Artwork(gif))
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::PictureFormat(MimeType::Gif)));

	let unknown = Artwork::unchecked(vec![0xAA; 8]).build();
	let err = adapter
		.set(NormKey::Artwork, Value::Artwork(unknown))
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::MissingImageInfo));

	assert!(adapter.dict().is_empty());
}

#[test_log::test]
fn removing_artwork_drops_the_cover_atom() {
	let mut adapter = mp4_adapter(TagDict::new());

	adapter
		.set(NormKey::Artwork, Value::Artwork(util::png_artwork()))
		.unwrap();
	assert!(adapter.dict().contains("covr"));

	adapter.remove(NormKey::Artwork).unwrap();
	assert!(adapter.dict().is_empty());
}

#[test_log::test]
fn musicbrainz_recording_and_track_ids_cross_map() {
	let mut adapter = mp4_adapter(TagDict::new());

	adapter
		.set(NormKey::MusicBrainzRecordingId, Value::from("rec-1"))
		.unwrap();
	adapter
		.set(NormKey::MusicBrainzTrackId, Value::from("trk-2"))
		.unwrap();

	assert_eq!(
		adapter
			.dict()
			.get_first("----:com.apple.iTunes:MusicBrainz Track Id"),
		Some(&NativeValue::Binary(b"rec-1".to_vec()))
	);
	assert_eq!(
		adapter
			.dict()
			.get_first("----:com.apple.iTunes:MusicBrainz Release Track Id"),
		Some(&NativeValue::Binary(b"trk-2".to_vec()))
	);
}

#[test_log::test]
fn spotify_id_and_conductor_use_plain_atoms() {
	let mut adapter = mp4_adapter(TagDict::new());

	adapter
		.set(NormKey::SpotId, Value::from("6rqhFgbbKwnb9MLmUQDhG6"))
		.unwrap();
	adapter
		.set(NormKey::Conductor, Value::from("Jansons"))
		.unwrap();

	assert_eq!(
		adapter.dict().get_first("spotid"),
		Some(&NativeValue::Text(String::from("6rqhFgbbKwnb9MLmUQDhG6")))
	);
	assert_eq!(
		adapter.dict().get_first("@con"),
		Some(&NativeValue::Text(String::from("Jansons")))
	);
}

#[test_log::test]
fn replaygain_freeform_text_is_not_sanitized() {
	let mut dict = TagDict::new();
	dict.set_one(
		String::from("----:com.apple.iTunes:ReplayGain Track Gain"),
		NativeValue::Binary(b"loud".to_vec()),
	);
	let mut adapter = mp4_adapter(dict);

	assert_eq!(
		adapter.get(NormKey::ReplayGainTrackGain).unwrap().first_str(),
		Some("loud")
	);

	adapter
		.set(NormKey::ReplayGainTrackPeak, Value::Float(0.988))
		.unwrap();
	assert_eq!(
		adapter
			.dict()
			.get_first("----:com.apple.iTunes:ReplayGain Track Peak"),
		Some(&NativeValue::Binary(b"0.988".to_vec()))
	);
}

#[test_log::test]
fn extra_values_collapse_to_the_first() {
	let mut adapter = mp4_adapter(TagDict::new());

	let item = MetadataItem::from_parts(
		ValueType::Str,
		vec![Value::from("Firth of Fifth"), Value::from("Ripples")],
	);
	adapter.set_all(NormKey::TrackTitle, &item).unwrap();

	assert_eq!(adapter.dict().get("©nam").map(<[_]>::len), Some(1));
	assert_eq!(
		adapter.dict().get_first("©nam"),
		Some(&NativeValue::Text(String::from("Firth of Fifth")))
	);
}
