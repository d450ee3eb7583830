//! APEv2-family tag tables
//!
//! One base table serves every codec in the family; WavPack overlays its own codec
//! literal and masks the stream fields it does not report.

use super::ApeCodec;
use crate::adapter::TagState;
use crate::artwork::{APE_PICTURE_KEYS, Artwork};
use crate::coerce::sanitize_int;
use crate::dict::NativeValue;
use crate::error::Result;
use crate::item::{MetadataItem, NormKey, Value, ValueType};
use crate::macros::err;
use crate::map::{DERIVED_ENTRIES, MapEntry, Sanitizer, TagMap};
use crate::pairs::{self, PairHalf};

use std::sync::OnceLock;

const TRACK_TAG: &str = "Track";
const DISC_TAG: &str = "Disc";

fn pair_target(key: NormKey) -> Option<(&'static str, PairHalf)> {
	match key {
		NormKey::TrackNumber => Some((TRACK_TAG, PairHalf::Number)),
		NormKey::TotalTracks => Some((TRACK_TAG, PairHalf::Total)),
		NormKey::DiscNumber => Some((DISC_TAG, PairHalf::Number)),
		NormKey::TotalDiscs => Some((DISC_TAG, PairHalf::Total)),
		_ => None,
	}
}

fn pair_get(state: &TagState, key: NormKey) -> Result<MetadataItem> {
	let Some((name, half)) = pair_target(key) else {
		return Ok(MetadataItem::new(ValueType::Int));
	};

	match pairs::pair_half(&state.dict, name, half) {
		Some(text) => {
			let number = sanitize_int(&Value::Str(text))?;
			Ok(MetadataItem::from(Value::Int(number)))
		},
		None => Ok(MetadataItem::new(ValueType::Int)),
	}
}

fn pair_set(state: &mut TagState, key: NormKey, item: &MetadataItem) -> Result<()> {
	let Some((name, half)) = pair_target(key) else {
		return Ok(());
	};

	match item.first_int() {
		Some(number) => pairs::set_pair_half(&mut state.dict, name, half, number),
		None => pairs::clear_pair_half(&mut state.dict, name, half),
	}

	Ok(())
}

fn pair_rm(state: &mut TagState, key: NormKey) -> Result<()> {
	let Some((name, half)) = pair_target(key) else {
		return Ok(());
	};

	pairs::clear_pair_half(&mut state.dict, name, half);
	Ok(())
}

fn artwork_get(state: &TagState, _key: NormKey) -> Result<MetadataItem> {
	let mut artworks = Vec::new();
	for ape_key in APE_PICTURE_KEYS {
		let Some(values) = state.dict.get(ape_key) else {
			continue;
		};
		let Some(raw) = values.iter().find_map(NativeValue::binary) else {
			continue;
		};

		let artwork = Artwork::from_ape_bytes(ape_key, raw, state.options.probe_artwork);
		artworks.push(Value::Artwork(artwork));
	}

	Ok(MetadataItem::from_parts(ValueType::Artwork, artworks))
}

fn artwork_set(state: &mut TagState, _key: NormKey, item: &MetadataItem) -> Result<()> {
	// Every role resolves before anything is written, so an unsupported type cannot
	// leave a half-written set of covers behind
	let mut pending = Vec::with_capacity(item.len());
	for value in item.values() {
		let Some(artwork) = value.as_artwork() else {
			continue;
		};

		match artwork.pic_type().as_ape_key() {
			Some(ape_key) => pending.push((ape_key, artwork)),
			None => err!(UnsupportedPictureType(artwork.pic_type())),
		}
	}

	for (ape_key, artwork) in pending {
		state.dict.set_one(
			ape_key.to_owned(),
			NativeValue::Binary(artwork.as_ape_bytes(ape_key)),
		);
	}

	Ok(())
}

fn artwork_rm(state: &mut TagState, _key: NormKey) -> Result<()> {
	for ape_key in APE_PICTURE_KEYS {
		state.dict.remove(ape_key);
	}

	Ok(())
}

static BASE_ENTRIES: &[(NormKey, MapEntry)] = &[
	(NormKey::TrackTitle, MapEntry::text("Title")),
	(NormKey::Artist, MapEntry::text("Artist")),
	(NormKey::Album, MapEntry::text("Album")),
	(NormKey::AlbumArtist, MapEntry::text("Album Artist")),
	(NormKey::Composer, MapEntry::text("Composer")),
	(
		NormKey::TrackNumber,
		MapEntry::custom(pair_get, pair_set, pair_rm, ValueType::Int).sanitized(Sanitizer::Int),
	),
	(
		NormKey::TotalTracks,
		MapEntry::custom(pair_get, pair_set, pair_rm, ValueType::Int).sanitized(Sanitizer::Int),
	),
	(
		NormKey::DiscNumber,
		MapEntry::custom(pair_get, pair_set, pair_rm, ValueType::Int).sanitized(Sanitizer::Int),
	),
	(
		NormKey::TotalDiscs,
		MapEntry::custom(pair_get, pair_set, pair_rm, ValueType::Int).sanitized(Sanitizer::Int),
	),
	(NormKey::Genre, MapEntry::text("Genre")),
	(NormKey::Year, MapEntry::year("Year")),
	(NormKey::Comment, MapEntry::text("Comment")),
	(NormKey::Label, MapEntry::text("Label")),
	(NormKey::Lyrics, MapEntry::text("Lyrics")),
	(NormKey::Isrc, MapEntry::text("ISRC")),
	(NormKey::Compilation, MapEntry::boolean("Compilation")),
	(
		NormKey::Artwork,
		MapEntry::custom(artwork_get, artwork_set, artwork_rm, ValueType::Artwork),
	),
	(NormKey::AlbumArtistSort, MapEntry::text("ALBUMARTISTSORT")),
	(NormKey::AlbumSort, MapEntry::text("ALBUMSORT")),
	(NormKey::ArtistSort, MapEntry::text("ARTISTSORT")),
	(NormKey::ComposerSort, MapEntry::text("COMPOSERSORT")),
	(NormKey::TitleSort, MapEntry::text("TITLESORT")),
	(NormKey::Work, MapEntry::text("WORK")),
	(NormKey::MovementName, MapEntry::text("MOVEMENTNAME")),
	(NormKey::MovementNumber, MapEntry::int("MOVEMENT")),
	(NormKey::MovementTotal, MapEntry::int("MOVEMENTTOTAL")),
	(NormKey::ShowMovement, MapEntry::boolean("SHOWMOVEMENT")),
	(NormKey::InitialKey, MapEntry::text("KEY")),
	(NormKey::Media, MapEntry::text("Media")),
	(
		NormKey::MusicBrainzArtistId,
		MapEntry::text("MUSICBRAINZ_ARTISTID"),
	),
	(NormKey::MusicBrainzDiscId, MapEntry::text("MUSICBRAINZ_DISCID")),
	(
		NormKey::MusicBrainzOriginalArtistId,
		MapEntry::text("MUSICBRAINZ_ORIGINALARTISTID"),
	),
	// The lowercase setter spelling is long-standing in the wild; the dictionary's
	// case-insensitive names make the two converge
	(
		NormKey::MusicBrainzOriginalAlbumId,
		MapEntry::text("MUSICBRAINZ_ORIGINALALBUMID").writing("musicbrainz_originalalbumid"),
	),
	(
		NormKey::MusicBrainzRecordingId,
		MapEntry::text("MUSICBRAINZ_RECORDINGID"),
	),
	(
		NormKey::MusicBrainzAlbumArtistId,
		MapEntry::text("MUSICBRAINZ_ALBUMARTISTID"),
	),
	(
		NormKey::MusicBrainzReleaseGroupId,
		MapEntry::text("MUSICBRAINZ_RELEASEGROUPID"),
	),
	(NormKey::MusicBrainzAlbumId, MapEntry::text("MUSICBRAINZ_ALBUMID")),
	(NormKey::MusicBrainzTrackId, MapEntry::text("MUSICBRAINZ_TRACKID")),
	(NormKey::MusicBrainzWorkId, MapEntry::text("MUSICBRAINZ_WORKID")),
	(
		NormKey::MusicIpFingerprint,
		MapEntry::text("MUSICIP_FINGERPRINT"),
	),
	(NormKey::MusicIpPuid, MapEntry::text("MUSICIP_PUID")),
	(NormKey::AcoustId, MapEntry::text("ACOUSTID_ID")),
	(
		NormKey::AcoustIdFingerprint,
		MapEntry::text("ACOUSTID_FINGERPRINT"),
	),
	(NormKey::Subtitle, MapEntry::text("Subtitle")),
	(NormKey::DiscSubtitle, MapEntry::text("DiscSubtitle")),
	(
		NormKey::ReplayGainTrackGain,
		MapEntry::gain("REPLAYGAIN_TRACK_GAIN"),
	),
	(
		NormKey::ReplayGainTrackPeak,
		MapEntry::peak("REPLAYGAIN_TRACK_PEAK"),
	),
	(
		NormKey::ReplayGainAlbumGain,
		MapEntry::gain("REPLAYGAIN_ALBUM_GAIN"),
	),
	(
		NormKey::ReplayGainAlbumPeak,
		MapEntry::peak("REPLAYGAIN_ALBUM_PEAK"),
	),
];

// APE streams report length and bitrate only
static FAMILY_MASKS: &[(NormKey, MapEntry)] = &[
	(NormKey::Codec, MapEntry::masked()),
	(NormKey::Channels, MapEntry::masked()),
	(NormKey::BitsPerSample, MapEntry::masked()),
	(NormKey::SampleRate, MapEntry::masked()),
];

static WAVPACK_OVERRIDES: &[(NormKey, MapEntry)] = &[
	(NormKey::Codec, MapEntry::literal("WavePack")),
	(NormKey::Bitrate, MapEntry::masked()),
	(NormKey::BitsPerSample, MapEntry::masked()),
];

pub(crate) fn tag_map(codec: ApeCodec) -> &'static TagMap {
	match codec {
		ApeCodec::WavPack => {
			static INSTANCE: OnceLock<TagMap> = OnceLock::new();
			INSTANCE.get_or_init(|| {
				TagMap::merged(&[DERIVED_ENTRIES, BASE_ENTRIES, FAMILY_MASKS, WAVPACK_OVERRIDES])
			})
		},
		ApeCodec::Ape | ApeCodec::Musepack | ApeCodec::MonkeysAudio | ApeCodec::OptimFrog => {
			static INSTANCE: OnceLock<TagMap> = OnceLock::new();
			INSTANCE
				.get_or_init(|| TagMap::merged(&[DERIVED_ENTRIES, BASE_ENTRIES, FAMILY_MASKS]))
		},
	}
}
