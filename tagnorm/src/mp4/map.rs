//! MP4 tag table
//!
//! iTunes-style atom names for the first-class fields, with everything else routed
//! through `----:com.apple.iTunes:`-prefixed freeform atoms. Track and disc numbering
//! are native number/total tuples addressed half-at-a-time.

use crate::adapter::TagState;
use crate::artwork::{Artwork, MimeType};
use crate::dict::{CoverFormat, NativeValue};
use crate::error::Result;
use crate::item::{MetadataItem, NormKey, Value, ValueType};
use crate::macros::{coerce_err, err};
use crate::map::{DERIVED_ENTRIES, MapEntry, Sanitizer, TagMap};
use crate::pairs::PairHalf;

use std::sync::OnceLock;

const TRACK_ATOM: &str = "trkn";
const DISC_ATOM: &str = "disk";
const COVER_ATOM: &str = "covr";

fn pair_atom(key: NormKey) -> Option<(&'static str, PairHalf)> {
	match key {
		NormKey::TrackNumber => Some((TRACK_ATOM, PairHalf::Number)),
		NormKey::TotalTracks => Some((TRACK_ATOM, PairHalf::Total)),
		NormKey::DiscNumber => Some((DISC_ATOM, PairHalf::Number)),
		NormKey::TotalDiscs => Some((DISC_ATOM, PairHalf::Total)),
		_ => None,
	}
}

fn pair_get(state: &TagState, key: NormKey) -> Result<MetadataItem> {
	let Some((name, half)) = pair_atom(key) else {
		return Ok(MetadataItem::new(ValueType::Int));
	};

	let Some((number, total)) = state.dict.get_first(name).and_then(NativeValue::pair) else {
		return Ok(MetadataItem::new(ValueType::Int));
	};

	let value = match half {
		PairHalf::Number => number,
		PairHalf::Total => total,
	};

	Ok(MetadataItem::from(Value::Int(i64::from(value))))
}

// The untouched half keeps its last-known value, defaulting to 0 when the atom is
// newly created; the full tuple is always written back
fn pair_set(state: &mut TagState, key: NormKey, item: &MetadataItem) -> Result<()> {
	let Some((name, half)) = pair_atom(key) else {
		return Ok(());
	};

	let (mut number, mut total) = state
		.dict
		.get_first(name)
		.and_then(NativeValue::pair)
		.unwrap_or((0, 0));

	let new = match item.first_int() {
		Some(value) => u32::try_from(value)
			.map_err(|_| coerce_err!("number/total tuple half", value.to_string()))?,
		None => 0,
	};

	match half {
		PairHalf::Number => number = new,
		PairHalf::Total => total = new,
	}

	state
		.dict
		.set_one(name.to_owned(), NativeValue::Pair(number, total));
	Ok(())
}

// Zero the addressed half; once the other half is also zero the atom goes away
fn pair_rm(state: &mut TagState, key: NormKey) -> Result<()> {
	let Some((name, half)) = pair_atom(key) else {
		return Ok(());
	};

	let (number, total) = state
		.dict
		.get_first(name)
		.and_then(NativeValue::pair)
		.unwrap_or((0, 0));

	let other = match half {
		PairHalf::Number => total,
		PairHalf::Total => number,
	};

	if other == 0 {
		state.dict.remove(name);
		return Ok(());
	}

	let pair = match half {
		PairHalf::Number => NativeValue::Pair(0, total),
		PairHalf::Total => NativeValue::Pair(number, 0),
	};

	state.dict.set_one(name.to_owned(), pair);
	Ok(())
}

// The native format flag carries nothing the image header does not; reads go by the
// bytes alone
fn artwork_get(state: &TagState, _key: NormKey) -> Result<MetadataItem> {
	let Some(values) = state.dict.get(COVER_ATOM) else {
		return Ok(MetadataItem::new(ValueType::Artwork));
	};

	let mut artworks = Vec::with_capacity(values.len());
	for value in values {
		let NativeValue::Cover(_, data) = value else {
			continue;
		};

		let artwork = if state.options.probe_artwork {
			Artwork::new(data.clone())
		} else {
			Artwork::unchecked(data.clone()).build()
		};

		artworks.push(Value::Artwork(artwork));
	}

	Ok(MetadataItem::from_parts(ValueType::Artwork, artworks))
}

fn artwork_set(state: &mut TagState, _key: NormKey, item: &MetadataItem) -> Result<()> {
	let mut covers = Vec::with_capacity(item.len());
	for value in item.values() {
		let Some(artwork) = value.as_artwork() else {
			continue;
		};

		let Some(mime_type) = artwork.mime_type() else {
			err!(MissingImageInfo);
		};

		let format = match mime_type {
			MimeType::Jpeg => CoverFormat::Jpeg,
			MimeType::Png => CoverFormat::Png,
			other => err!(PictureFormat(other.clone())),
		};

		covers.push(NativeValue::Cover(format, artwork.data().to_vec()));
	}

	state.dict.set(COVER_ATOM.to_owned(), covers);
	Ok(())
}

fn artwork_rm(state: &mut TagState, _key: NormKey) -> Result<()> {
	state.dict.remove(COVER_ATOM);
	Ok(())
}

static ENTRIES: &[(NormKey, MapEntry)] = &[
	(NormKey::TrackTitle, MapEntry::text("©nam")),
	(NormKey::Artist, MapEntry::text("©ART")),
	(NormKey::Album, MapEntry::text("©alb")),
	(NormKey::AlbumArtist, MapEntry::text("aART")),
	(NormKey::Composer, MapEntry::text("©wrt")),
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
	(NormKey::Genre, MapEntry::text("©gen")),
	(NormKey::Year, MapEntry::year("©day")),
	(NormKey::Label, MapEntry::text("©pub")),
	(NormKey::Lyrics, MapEntry::text("©lyr")),
	(NormKey::Isrc, MapEntry::text("----:com.apple.iTunes:ISRC")),
	(NormKey::Comment, MapEntry::text("©cmt")),
	(NormKey::Compilation, MapEntry::boolean("cpil")),
	(
		NormKey::Artwork,
		MapEntry::custom(artwork_get, artwork_set, artwork_rm, ValueType::Artwork),
	),
	(NormKey::AlbumArtistSort, MapEntry::text("soaa")),
	(NormKey::AlbumSort, MapEntry::text("soal")),
	(NormKey::ArtistSort, MapEntry::text("soar")),
	(NormKey::ComposerSort, MapEntry::text("soco")),
	(NormKey::TitleSort, MapEntry::text("sonm")),
	(NormKey::Work, MapEntry::text("©wrk")),
	(NormKey::MovementName, MapEntry::text("©mvn")),
	(NormKey::MovementTotal, MapEntry::int("mvc")),
	(NormKey::MovementNumber, MapEntry::int("mvi")),
	(NormKey::Conductor, MapEntry::text("@con")),
	(NormKey::ShowMovement, MapEntry::boolean("shwm")),
	(
		NormKey::InitialKey,
		MapEntry::text("----:com.apple.iTunes:initialkey"),
	),
	(NormKey::Media, MapEntry::text("----:com.apple.iTunes:MEDIA")),
	(NormKey::SpotId, MapEntry::text("spotid")),
	(
		NormKey::MusicBrainzArtistId,
		MapEntry::text("----:com.apple.iTunes:MusicBrainz Artist Id"),
	),
	(
		NormKey::MusicBrainzDiscId,
		MapEntry::text("----:com.apple.iTunes:MusicBrainz Disc Id"),
	),
	(
		NormKey::MusicBrainzOriginalArtistId,
		MapEntry::text("----:com.apple.iTunes:MusicBrainz Original Artist Id"),
	),
	(
		NormKey::MusicBrainzOriginalAlbumId,
		MapEntry::text("----:com.apple.iTunes:MusicBrainz Original Album Id"),
	),
	// iTunes predates the recording/track split, so its "Track Id" carries the
	// recording id and "Release Track Id" the track id
	(
		NormKey::MusicBrainzRecordingId,
		MapEntry::text("----:com.apple.iTunes:MusicBrainz Track Id"),
	),
	(
		NormKey::MusicBrainzAlbumArtistId,
		MapEntry::text("----:com.apple.iTunes:MusicBrainz Album Artist Id"),
	),
	(
		NormKey::MusicBrainzReleaseGroupId,
		MapEntry::text("----:com.apple.iTunes:MusicBrainz Release Group Id"),
	),
	(
		NormKey::MusicBrainzAlbumId,
		MapEntry::text("----:com.apple.iTunes:MusicBrainz Album Id"),
	),
	(
		NormKey::MusicBrainzTrackId,
		MapEntry::text("----:com.apple.iTunes:MusicBrainz Release Track Id"),
	),
	(
		NormKey::MusicBrainzWorkId,
		MapEntry::text("----:com.apple.iTunes:MusicBrainz Work Id"),
	),
	(
		NormKey::MusicIpFingerprint,
		MapEntry::text("----:com.apple.iTunes:fingerprint"),
	),
	(
		NormKey::MusicIpPuid,
		MapEntry::text("----:com.apple.iTunes:MusicIP PUID"),
	),
	(NormKey::AcoustId, MapEntry::text("----:com.apple.iTunes:Acoustid Id")),
	(
		NormKey::AcoustIdFingerprint,
		MapEntry::text("----:com.apple.iTunes:Acoustid Fingerprint"),
	),
	(NormKey::Subtitle, MapEntry::text("----:com.apple.iTunes:SUBTITLE")),
	(
		NormKey::DiscSubtitle,
		MapEntry::text("----:com.apple.iTunes:DISCSUBTITLE"),
	),
	(
		NormKey::ReplayGainTrackGain,
		MapEntry::text("----:com.apple.iTunes:ReplayGain Track Gain"),
	),
	(
		NormKey::ReplayGainTrackPeak,
		MapEntry::text("----:com.apple.iTunes:ReplayGain Track Peak"),
	),
	(
		NormKey::ReplayGainAlbumGain,
		MapEntry::text("----:com.apple.iTunes:ReplayGain Album Gain"),
	),
	(
		NormKey::ReplayGainAlbumPeak,
		MapEntry::text("----:com.apple.iTunes:ReplayGain Album Peak"),
	),
];

pub(crate) fn tag_map() -> &'static TagMap {
	static INSTANCE: OnceLock<TagMap> = OnceLock::new();
	INSTANCE.get_or_init(|| TagMap::merged(&[DERIVED_ENTRIES, ENTRIES]))
}
