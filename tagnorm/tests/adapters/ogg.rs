use crate::util;

use data_encoding::BASE64;
use tagnorm::adapter::FormatAdapter;
use tagnorm::artwork::{Artwork, PictureType};
use tagnorm::dict::{NativeValue, TagDict};
use tagnorm::error::ErrorKind;
use tagnorm::item::{NormKey, Value};
use tagnorm::ogg::{OggAdapter, OggCodec};
use tagnorm::properties::AudioProperties;

fn vorbis_adapter(dict: TagDict) -> OggAdapter {
	OggAdapter::new(OggCodec::Vorbis, dict, AudioProperties::default())
}

fn block_text(artwork: &Artwork) -> String {
	String::from_utf8(artwork.as_flac_bytes(true)).unwrap()
}

#[test_log::test]
fn comments_are_appendable() {
	let mut adapter = vorbis_adapter(TagDict::new());

	adapter.set(NormKey::Artist, Value::from("Anneke")).unwrap();
	adapter.append(NormKey::Artist, Value::from("Danny")).unwrap();

	assert_eq!(adapter.dict().get("artist").map(<[_]>::len), Some(2));
}

#[test_log::test]
fn legacy_coverart_reads_before_picture_blocks() {
	let legacy = BASE64.encode(&util::jpeg_bytes());
	let block = block_text(&util::png_artwork());
	let dict = util::text_dict(&[
		("metadata_block_picture", &block),
		("coverart", &legacy),
		("coverartmime", "image/jpeg"),
	]);
	let adapter = vorbis_adapter(dict);

	let read = adapter.get(NormKey::Artwork).unwrap();
	let artworks: Vec<_> = read
		.values()
		.iter()
		.filter_map(|value| value.as_artwork())
		.collect();

	assert_eq!(artworks.len(), 2);
	assert_eq!(artworks[0].data(), util::jpeg_bytes());
	assert_eq!(artworks[1].data(), util::png_bytes());
}

#[test_log::test]
fn undecodable_legacy_coverart_is_skipped() {
	let good = BASE64.encode(&util::png_bytes());
	let dict = util::text_dict(&[("coverart", "not!base64@"), ("coverart", &good)]);
	let adapter = vorbis_adapter(dict);

	let read = adapter.get(NormKey::Artwork).unwrap();
	assert_eq!(read.len(), 1);
	assert_eq!(read.first_artwork().unwrap().data(), util::png_bytes());
}

#[test_log::test]
fn block_picture_type_is_not_carried_over() {
	let mut source = util::png_artwork();
	source.set_pic_type(PictureType::Media);
	let dict = util::text_dict(&[("metadata_block_picture", &block_text(&source))]);
	let adapter = vorbis_adapter(dict);

	let read = adapter.get(NormKey::Artwork).unwrap();
	let artwork = read.first_artwork().unwrap();
	assert_eq!(artwork.pic_type(), PictureType::CoverFront);
	assert_eq!(artwork.width(), Some(1200));
}

#[test_log::test]
fn setting_artwork_rewrites_blocks_and_keeps_legacy_keys() {
	let legacy = BASE64.encode(&util::jpeg_bytes());
	let dict = util::text_dict(&[("coverart", &legacy), ("coverartmime", "image/jpeg")]);
	let mut adapter = vorbis_adapter(dict);

	let artwork = util::png_artwork();
	adapter
		.set(NormKey::Artwork, Value::Artwork(artwork.clone()))
		.unwrap();

	assert_eq!(
		adapter
			.dict()
			.get_first("metadata_block_picture")
			.and_then(NativeValue::text),
		Some(block_text(&artwork).as_str())
	);
	assert!(adapter.dict().contains("coverart"));
	assert!(adapter.dict().contains("coverartmime"));
}

#[test_log::test]
fn removing_artwork_deletes_legacy_keys_too() {
	let legacy = BASE64.encode(&util::jpeg_bytes());
	let block = block_text(&util::png_artwork());
	let dict = util::text_dict(&[
		("coverart", &legacy),
		("coverartmime", "image/jpeg"),
		("metadata_block_picture", &block),
	]);
	let mut adapter = vorbis_adapter(dict);

	adapter.remove(NormKey::Artwork).unwrap();
	assert!(adapter.dict().is_empty());
}

#[test_log::test]
fn incomplete_artwork_is_rejected_before_encoding() {
	let mut adapter = vorbis_adapter(TagDict::new());

	let bare = Artwork::unchecked(util::png_bytes()).build();
	let err = adapter
		.set(NormKey::Artwork, Value::Artwork(bare))
		.unwrap_err();

	assert!(matches!(err.kind(), ErrorKind::MissingImageInfo));
	assert!(adapter.dict().is_empty());
}

#[test_log::test]
fn movement_name_maps_to_the_bare_movement_tag() {
	let mut adapter = vorbis_adapter(TagDict::new());

	adapter
		.set(NormKey::MovementName, Value::from("Allegro"))
		.unwrap();
	adapter.set(NormKey::MovementNumber, Value::Int(2)).unwrap();

	assert_eq!(
		adapter
			.dict()
			.get_first("movement")
			.and_then(NativeValue::text),
		Some("Allegro")
	);
	assert_eq!(
		adapter
			.dict()
			.get_first("movementnumber")
			.and_then(NativeValue::text),
		Some("2")
	);
}

#[test_log::test]
fn unmapped_keys_read_empty_and_reject_writes() {
	let mut adapter = vorbis_adapter(TagDict::new());

	assert!(adapter.get(NormKey::Label).unwrap().is_empty());
	assert!(adapter.get(NormKey::ShowMovement).unwrap().is_empty());

	let err = adapter
		.set(NormKey::ShowMovement, Value::Bool(true))
		.unwrap_err();
	assert!(matches!(
		err.kind(),
		ErrorKind::UnsupportedKey(NormKey::ShowMovement)
	));

	let err = adapter.remove(NormKey::Label).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::UnsupportedKey(NormKey::Label)));
}

#[test_log::test]
fn opus_masks_the_sample_rate() {
	let adapter = OggAdapter::new(OggCodec::Opus, TagDict::new(), util::stream_properties());

	assert_eq!(
		adapter.get(NormKey::Codec).unwrap().first_str(),
		Some("Ogg Opus")
	);
	assert!(adapter.get(NormKey::SampleRate).unwrap().is_empty());
	assert!(adapter.get(NormKey::Bitrate).unwrap().is_empty());

	let vorbis = OggAdapter::new(OggCodec::Vorbis, TagDict::new(), util::stream_properties());
	assert_eq!(
		vorbis.get(NormKey::SampleRate).unwrap().first_int(),
		Some(44_100)
	);
}

#[test_log::test]
fn tag_format_names_follow_the_codec() {
	let vorbis = vorbis_adapter(TagDict::new());
	assert_eq!(vorbis.tag_format(), "OggVorbis");

	let speex = OggAdapter::new(OggCodec::Speex, TagDict::new(), AudioProperties::default());
	assert_eq!(speex.tag_format(), "OggSpeex");
}
