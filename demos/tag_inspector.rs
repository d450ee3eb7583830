#![allow(missing_docs)]

use tagnorm::adapter::FormatAdapter;
use tagnorm::ape::{ApeAdapter, ApeCodec};
use tagnorm::dict::TagDict;
use tagnorm::flac::FlacAdapter;
use tagnorm::item::{NormKey, Value};
use tagnorm::mp4::Mp4Adapter;
use tagnorm::ogg::{OggAdapter, OggCodec};
use tagnorm::properties::AudioProperties;

use structopt::StructOpt;

use std::time::Duration;

#[derive(Debug, StructOpt)]
#[structopt(
	name = "tag_inspector",
	about = "Applies canonical key=value pairs to an empty tag and prints both views"
)]
struct Opt {
	/// Tag family: ape, wavpack, flac, mp4, vorbis or opus
	#[structopt(short, long, default_value = "flac")]
	format: String,

	/// Canonical assignments, e.g. artist=Queen year=1975 tracknumber=9
	assignments: Vec<String>,
}

fn sample_properties() -> AudioProperties {
	AudioProperties::new(
		Some(String::from("pcm")),
		Some(Duration::from_secs(245)),
		Some(1411),
		Some(44_100),
		Some(16),
		Some(2),
	)
}

fn apply<A: FormatAdapter>(adapter: &mut A, assignments: &[String]) {
	for assignment in assignments {
		let Some((name, value)) = assignment.split_once('=') else {
			eprintln!("ERROR: `{assignment}` is not a key=value assignment!");
			std::process::exit(1);
		};

		let Some(key) = NormKey::ALL.iter().find(|key| key.as_str() == name) else {
			eprintln!("ERROR: `{name}` is not a canonical key!");
			std::process::exit(1);
		};

		if let Err(err) = adapter.set(*key, Value::from(value)) {
			eprintln!("ERROR: Cannot set `{name}`: {err}");
			std::process::exit(1);
		}
	}
}

fn print_canonical<A: FormatAdapter>(adapter: &A) {
	println!("--- Canonical view ({}) ---", adapter.tag_format());

	for &key in NormKey::ALL {
		let item = match adapter.get(key) {
			Ok(item) => item,
			Err(err) => {
				println!("{}: <{err}>", key.as_str());
				continue;
			},
		};

		if item.is_empty() {
			continue;
		}

		let values: Vec<String> = item.values().iter().map(ToString::to_string).collect();
		println!("{}: {}", key.as_str(), values.join(", "));
	}
}

fn print_native(dict: &TagDict) {
	println!("--- Native view ---");

	for (name, values) in dict.items() {
		println!("{name}: {values:?}");
	}
}

macro_rules! inspect {
	($adapter:expr, $opt:expr) => {{
		let mut adapter = $adapter;
		apply(&mut adapter, &$opt.assignments);
		print_canonical(&adapter);
		print_native(adapter.dict());
	}};
}

fn main() {
	let opt = Opt::from_args();
	let properties = sample_properties();

	match opt.format.as_str() {
		"ape" => inspect!(ApeAdapter::new(ApeCodec::Ape, TagDict::new(), properties), opt),
		"wavpack" => inspect!(
			ApeAdapter::new(ApeCodec::WavPack, TagDict::new(), properties),
			opt
		),
		"flac" => inspect!(
			FlacAdapter::new(TagDict::new(), Vec::new(), properties),
			opt
		),
		"mp4" => inspect!(Mp4Adapter::new(TagDict::new(), properties), opt),
		"vorbis" => inspect!(
			OggAdapter::new(OggCodec::Vorbis, TagDict::new(), properties),
			opt
		),
		"opus" => inspect!(
			OggAdapter::new(OggCodec::Opus, TagDict::new(), properties),
			opt
		),
		other => {
			eprintln!("ERROR: `{other}` is not a supported tag family!");
			std::process::exit(1);
		},
	}
}
