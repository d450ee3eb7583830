//! Canonical tag access over container-native metadata dictionaries.
//!
//! Audio containers disagree about nearly everything: how a tag name is spelled and
//! cased, whether a field may repeat, how track and disc numbering are stored, and
//! where cover art lives. This crate maps one fixed canonical key namespace onto each
//! container's native conventions, so [`NormKey::TrackNumber`](item::NormKey) means the
//! same thing whether it resolves to an APEv2 `Track` compound, an MP4 `trkn` tuple, or
//! a Vorbis `tracknumber` comment.
//!
//! The crate does not read or write files. A codec collaborator parses a container into
//! a [`TagDict`](dict::TagDict) (plus [`AudioProperties`](properties::AudioProperties)
//! and, for FLAC, a picture list), hands it to the matching format adapter, and
//! serializes the mutated dictionary back out.
//!
//! # Supported formats
//!
//! * **APEv2 family** ([`ape`]): bare APE tags and the WavPack, Musepack, Monkey's
//!   Audio, and OptimFROG codecs
//! * **FLAC** ([`flac`]): Vorbis comments plus first-class picture blocks
//! * **MP4** ([`mp4`]): iTunes-style atoms, including freeform `----:` atoms
//! * **Ogg family** ([`ogg`]): Vorbis, Opus, FLAC-in-Ogg, Speex, and Theora
//!
//! # Examples
//!
//! ## Reading and writing canonical keys
//!
//! ```rust
//! use tagnorm::dict::TagDict;
//! use tagnorm::item::{NormKey, Value};
//! use tagnorm::mp4::Mp4Adapter;
//! use tagnorm::prelude::*;
//! use tagnorm::properties::AudioProperties;
//!
//! let mut mp4 = Mp4Adapter::new(TagDict::new(), AudioProperties::default());
//!
//! mp4.set(NormKey::TrackTitle, Value::from("Paranoid Android"))?;
//! mp4.set(NormKey::TrackNumber, Value::Int(2))?;
//!
//! // Values normalize on the way in; a numeric string is fine for an integer key
//! mp4.set(NormKey::TotalTracks, Value::from(" 12 "))?;
//!
//! assert_eq!(mp4.get(NormKey::TrackTitle)?.first_str(), Some("Paranoid Android"));
//! assert_eq!(mp4.get(NormKey::TotalTracks)?.first_int(), Some(12));
//! # Ok::<(), tagnorm::error::TagnormError>(())
//! ```
//!
//! ## Typed accessors
//!
//! ```rust
//! use tagnorm::ape::{ApeAdapter, ApeCodec};
//! use tagnorm::dict::TagDict;
//! use tagnorm::prelude::*;
//! use tagnorm::properties::AudioProperties;
//!
//! let mut ape = ApeAdapter::new(ApeCodec::WavPack, TagDict::new(), AudioProperties::default());
//!
//! ape.set_artist(String::from("Boards of Canada"))?;
//! ape.set_year(1998)?;
//!
//! assert_eq!(ape.artist()?.as_deref(), Some("Boards of Canada"));
//! assert_eq!(ape.year()?, Some(1998));
//! # Ok::<(), tagnorm::error::TagnormError>(())
//! ```
//!
//! # Format-specific notes
//!
//! Containers keep their quirks; the module documentation of each family lists them.
//! The short version: APE and MP4 are single-valued and collapse multi-value writes,
//! FLAC and Ogg are list-valued; artwork storage differs per family; `#`-prefixed keys
//! are derived from the audio stream and reject writes.

pub mod adapter;
pub mod ape;
pub mod artwork;
pub mod coerce;
pub mod config;
pub mod dict;
pub mod error;
pub mod flac;
pub mod item;
pub(crate) mod macros;
pub(crate) mod map;
pub mod mp4;
pub mod ogg;
pub(crate) mod pairs;
pub mod properties;

pub mod prelude {
	//! A prelude for commonly used items in the library.
	//!
	//! This module is intended to be wildcard imported.
	//!
	//! ```rust
	//! use tagnorm::prelude::*;
	//! ```

	pub use crate::adapter::{Accessor, FormatAdapter};
	pub use crate::item::{NormKey, Value};
}
