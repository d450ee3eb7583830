//! Ogg-family tag tables
//!
//! One base table serves every codec in the family; Vorbis and Opus overlay their own
//! codec literals and mask the stream fields their headers do not report.

use super::OggCodec;
use crate::adapter::TagState;
use crate::artwork::{Artwork, PictureType};
use crate::dict::NativeValue;
use crate::error::Result;
use crate::item::{MetadataItem, NormKey, Value, ValueType};
use crate::macros::err;
use crate::map::{DERIVED_ENTRIES, MapEntry, TagMap};

use std::sync::OnceLock;

use data_encoding::BASE64;
use log::warn;

const LEGACY_COVERART: &str = "coverart";
const LEGACY_COVERART_MIME: &str = "coverartmime";
const PICTURE_BLOCK: &str = "metadata_block_picture";

// Artwork reads consume two encodings: the legacy `coverart` values (bare base64 image
// bytes, read-only) first, then the standard `metadata_block_picture` list. The legacy
// mime hint in `coverartmime` carries no information the image header does not, and is
// ignored.
fn artwork_get(state: &TagState, _key: NormKey) -> Result<MetadataItem> {
	let mut artworks = Vec::new();

	if let Some(values) = state.dict.get(LEGACY_COVERART) {
		for value in values {
			let Some(text) = value.text() else {
				continue;
			};

			let Ok(data) = BASE64.decode(text.as_bytes()) else {
				warn!("discarding a legacy coverart value that does not decode as base64");
				continue;
			};

			let artwork = if state.options.probe_artwork {
				Artwork::new(data)
			} else {
				Artwork::unchecked(data).build()
			};

			artworks.push(Value::Artwork(artwork));
		}
	}

	if let Some(values) = state.dict.get(PICTURE_BLOCK) {
		for value in values {
			let Some(text) = value.text() else {
				continue;
			};

			let mut artwork = Artwork::from_flac_bytes(text.as_bytes(), true)?;
			// The block's picture type is not carried over
			artwork.set_pic_type(PictureType::CoverFront);
			if state.options.probe_artwork {
				artwork.probe_fill();
			}

			artworks.push(Value::Artwork(artwork));
		}
	}

	Ok(MetadataItem::from_parts(ValueType::Artwork, artworks))
}

// Writes replace the `metadata_block_picture` list and leave the legacy keys alone
fn artwork_set(state: &mut TagState, _key: NormKey, item: &MetadataItem) -> Result<()> {
	let mut blocks = Vec::with_capacity(item.len());
	for value in item.values() {
		let Some(artwork) = value.as_artwork() else {
			continue;
		};

		if !artwork.has_image_info() {
			err!(MissingImageInfo);
		}

		blocks.push(NativeValue::Text(BASE64.encode(&artwork.as_flac_bytes(false))));
	}

	state.dict.set(PICTURE_BLOCK.to_owned(), blocks);
	Ok(())
}

fn artwork_rm(state: &mut TagState, _key: NormKey) -> Result<()> {
	for name in [LEGACY_COVERART, LEGACY_COVERART_MIME, PICTURE_BLOCK] {
		state.dict.remove(name);
	}

	Ok(())
}

static BASE_ENTRIES: &[(NormKey, MapEntry)] = &[
	(NormKey::TrackTitle, MapEntry::text("title")),
	(NormKey::Artist, MapEntry::text("artist")),
	(NormKey::Album, MapEntry::text("album")),
	(NormKey::AlbumArtist, MapEntry::text("albumartist")),
	(NormKey::Composer, MapEntry::text("composer")),
	(NormKey::TrackNumber, MapEntry::int("tracknumber")),
	(NormKey::TotalTracks, MapEntry::int("tracktotal")),
	(NormKey::DiscNumber, MapEntry::int("discnumber")),
	(NormKey::TotalDiscs, MapEntry::int("disctotal")),
	(NormKey::Genre, MapEntry::text("genre")),
	(
		NormKey::Year,
		MapEntry::year("date").reading(&["date", "originaldate"]),
	),
	(NormKey::Lyrics, MapEntry::text("lyrics")),
	(NormKey::Isrc, MapEntry::text("isrc")),
	(NormKey::Comment, MapEntry::text("comment")),
	(NormKey::Compilation, MapEntry::boolean("compilation")),
	(
		NormKey::Artwork,
		MapEntry::custom(artwork_get, artwork_set, artwork_rm, ValueType::Artwork),
	),
	(NormKey::AlbumArtistSort, MapEntry::text("albumartistsort")),
	(NormKey::AlbumSort, MapEntry::text("albumsort")),
	(NormKey::ArtistSort, MapEntry::text("artistsort")),
	(NormKey::ComposerSort, MapEntry::text("composersort")),
	(NormKey::TitleSort, MapEntry::text("titlesort")),
	(NormKey::Work, MapEntry::text("work")),
	(NormKey::MovementName, MapEntry::text("movement")),
	(NormKey::MovementTotal, MapEntry::int("movementtotal")),
	(NormKey::MovementNumber, MapEntry::int("movementnumber")),
	(NormKey::InitialKey, MapEntry::text("key")),
	(NormKey::Media, MapEntry::text("media")),
	(
		NormKey::MusicBrainzArtistId,
		MapEntry::text("musicbrainz_artistid"),
	),
	(NormKey::MusicBrainzDiscId, MapEntry::text("musicbrainz_discid")),
	(
		NormKey::MusicBrainzOriginalArtistId,
		MapEntry::text("musicbrainz_originalartistid"),
	),
	(
		NormKey::MusicBrainzOriginalAlbumId,
		MapEntry::text("musicbrainz_originalalbumid"),
	),
	(
		NormKey::MusicBrainzRecordingId,
		MapEntry::text("musicbrainz_recordingid"),
	),
	(
		NormKey::MusicBrainzAlbumArtistId,
		MapEntry::text("musicbrainz_albumartistid"),
	),
	(
		NormKey::MusicBrainzReleaseGroupId,
		MapEntry::text("musicbrainz_releasegroupid"),
	),
	(NormKey::MusicBrainzAlbumId, MapEntry::text("musicbrainz_albumid")),
	(NormKey::MusicBrainzTrackId, MapEntry::text("musicbrainz_trackid")),
	(NormKey::MusicBrainzWorkId, MapEntry::text("musicbrainz_workid")),
	(
		NormKey::MusicIpFingerprint,
		MapEntry::text("musicip_fingerprint"),
	),
	(NormKey::MusicIpPuid, MapEntry::text("musicip_puid")),
	(NormKey::AcoustId, MapEntry::text("acoustid_id")),
	(
		NormKey::AcoustIdFingerprint,
		MapEntry::text("acoustid_fingerprint"),
	),
	(NormKey::Subtitle, MapEntry::text("subtitle")),
	(NormKey::DiscSubtitle, MapEntry::text("discsubtitle")),
];

static VORBIS_OVERRIDES: &[(NormKey, MapEntry)] = &[
	(NormKey::Codec, MapEntry::literal("Ogg Vorbis")),
	(NormKey::BitsPerSample, MapEntry::masked()),
];

static OPUS_OVERRIDES: &[(NormKey, MapEntry)] = &[
	(NormKey::Codec, MapEntry::literal("Ogg Opus")),
	(NormKey::BitsPerSample, MapEntry::masked()),
	(NormKey::SampleRate, MapEntry::masked()),
	(NormKey::Bitrate, MapEntry::masked()),
];

pub(crate) fn tag_map(codec: OggCodec) -> &'static TagMap {
	match codec {
		OggCodec::Vorbis => {
			static INSTANCE: OnceLock<TagMap> = OnceLock::new();
			INSTANCE.get_or_init(|| {
				TagMap::merged(&[DERIVED_ENTRIES, BASE_ENTRIES, VORBIS_OVERRIDES])
			})
		},
		OggCodec::Opus => {
			static INSTANCE: OnceLock<TagMap> = OnceLock::new();
			INSTANCE
				.get_or_init(|| TagMap::merged(&[DERIVED_ENTRIES, BASE_ENTRIES, OPUS_OVERRIDES]))
		},
		OggCodec::Flac | OggCodec::Speex | OggCodec::Theora => {
			static INSTANCE: OnceLock<TagMap> = OnceLock::new();
			INSTANCE.get_or_init(|| TagMap::merged(&[DERIVED_ENTRIES, BASE_ENTRIES]))
		},
	}
}
