//! FLAC tag table
//!
//! Vorbis comment names for text, the container's first-class picture blocks for
//! artwork.

use crate::adapter::TagState;
use crate::error::Result;
use crate::item::{MetadataItem, NormKey, Value, ValueType};
use crate::macros::err;
use crate::map::{DERIVED_ENTRIES, MapEntry, TagMap};

use std::sync::OnceLock;

fn artwork_get(state: &TagState, _key: NormKey) -> Result<MetadataItem> {
	let mut artworks = Vec::with_capacity(state.pictures.len());
	for picture in &state.pictures {
		let mut artwork = picture.clone();
		if state.options.probe_artwork {
			artwork.probe_fill();
		}

		artworks.push(Value::Artwork(artwork));
	}

	Ok(MetadataItem::from_parts(ValueType::Artwork, artworks))
}

fn artwork_set(state: &mut TagState, _key: NormKey, item: &MetadataItem) -> Result<()> {
	for value in item.values() {
		if let Some(artwork) = value.as_artwork() {
			if !artwork.has_image_info() {
				err!(MissingImageInfo);
			}
		}
	}

	state.pictures = item
		.values()
		.iter()
		.filter_map(|value| value.as_artwork().cloned())
		.collect();

	Ok(())
}

fn artwork_rm(state: &mut TagState, _key: NormKey) -> Result<()> {
	state.pictures.clear();
	Ok(())
}

static ENTRIES: &[(NormKey, MapEntry)] = &[
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
	(NormKey::Label, MapEntry::text("label")),
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
	(NormKey::MovementName, MapEntry::text("movementname")),
	(NormKey::MovementTotal, MapEntry::int("movementtotal")),
	(NormKey::MovementNumber, MapEntry::int("movement")),
	(NormKey::InitialKey, MapEntry::text("key")),
	(NormKey::Media, MapEntry::text("media")),
	(NormKey::ShowMovement, MapEntry::boolean("showmovement")),
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
	(NormKey::Codec, MapEntry::literal("flac")),
];

pub(crate) fn tag_map() -> &'static TagMap {
	static INSTANCE: OnceLock<TagMap> = OnceLock::new();
	INSTANCE.get_or_init(|| TagMap::merged(&[DERIVED_ENTRIES, ENTRIES]))
}
