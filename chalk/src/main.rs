/*!
# Chalk

Shrink school-site images into inline `data:` URIs, printing them or
attaching them to records in a local content store.
*/

#![warn(clippy::filetype_is_file)]
#![warn(clippy::integer_division)]
#![warn(clippy::needless_borrow)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::suboptimal_flops)]
#![warn(clippy::unneeded_field_pattern)]
#![warn(macro_use_extern_crate)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(non_ascii_idents)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_crate_dependencies)]
#![warn(unused_extern_crates)]
#![warn(unused_import_braces)]

#![allow(clippy::module_name_repetitions)]



mod cli;
mod img;

use argyle::Argument;
use chalk_core::{
	ChalkError,
	Collection,
	ContentStore,
	DirStore,
	Source,
};
use dowser::Dowser;
use fyi_msg::Msg;
use std::{
	io::Write,
	path::{
		Path,
		PathBuf,
	},
	time::Instant,
};



/// # Main.
///
/// This lets us bubble up startup errors so they can be pretty-printed.
fn main() {
	match _main() {
		Ok(true) => {},
		Ok(false) => { std::process::exit(1); },
		Err(e @ (ChalkError::PrintHelp | ChalkError::PrintVersion)) => {
			println!("{e}");
		},
		Err(e) => {
			Msg::error(e.as_str()).eprint();
			std::process::exit(1);
		},
	}
}

#[inline]
/// # Actual Main.
///
/// Parse the arguments, then crunch each image in turn. Individual image
/// failures are reported and skipped; the return value is `false` if there
/// were any.
fn _main() -> Result<bool, ChalkError> {
	let settings = Settings::new()?;

	env_logger::Builder::from_env(
		env_logger::Env::default()
			.default_filter_or(if settings.verbose { "debug" } else { "warn" })
	).init();

	let mut paths: Vec<PathBuf> = settings.paths.filter(|p| img::is_image(p)).collect();
	if paths.is_empty() { return Err(ChalkError::NoImages); }
	paths.sort_unstable();

	match settings.target {
		Some((collection, id)) => {
			let fixed = id.as_deref().or_else(|| collection.default_id());
			if fixed.is_some() && 1 < paths.len() { return Err(ChalkError::IdMulti); }
			if fixed.is_none() && ! collection.auto_create() {
				return Err(ChalkError::NoId);
			}

			let mut store = DirStore::new(&settings.store);
			Ok(crunch(&paths, |path, src| {
				let id = match fixed {
					Some(id) => id.to_owned(),
					None => path.file_stem()
						.and_then(|s| chalk_core::slug(&s.to_string_lossy()))
						.ok_or(ChalkError::Id)?,
				};

				let output = chalk_core::compress(src)?;
				store.attach_image(collection, &id, &output)?;
				cli::print_attached(path, &output, collection, &id);
				Ok(())
			}))
		},
		None => {
			let mut stdout = std::io::stdout().lock();
			Ok(crunch(&paths, |path, src| {
				let output = chalk_core::compress(src)?;
				writeln!(&mut stdout, "{output}")
					.and_then(|()| stdout.flush())
					.map_err(|_| ChalkError::Write)?;
				cli::print_encoded(path, &output);
				Ok(())
			}))
		},
	}
}

/// # Crunch Paths.
///
/// Load each path and pass it to the callback, printing any errors along the
/// way. Returns `true` if everything went fine.
fn crunch<F>(paths: &[PathBuf], mut cb: F) -> bool
where F: FnMut(&Path, &Source) -> Result<(), ChalkError> {
	let now = Instant::now();
	let mut failed = 0_u64;

	for path in paths {
		if let Err(e) = Source::try_from(path.as_path()).and_then(|src| cb(path.as_path(), &src)) {
			log::info!("{}: {e:?}", path.to_string_lossy());
			cli::print_error(path, e);
			failed += 1;
		}
	}

	cli::print_summary(paths.len() as u64 - failed, failed, now.elapsed());
	failed == 0
}



/// # Read Path List.
///
/// Add the paths listed (one per line) in `file`. An unreadable list is a
/// [`ChalkError::Read`].
fn read_list(paths: &mut Dowser, file: &str) -> Result<(), ChalkError> {
	paths.read_paths_from_file(file).map_err(|_| ChalkError::Read)
}



/// # Settings.
///
/// The parsed command line.
struct Settings {
	/// # Image Paths.
	paths: Dowser,

	/// # Collection and ID.
	target: Option<(Collection, Option<String>)>,

	/// # Store Directory.
	store: PathBuf,

	/// # Verbose?
	verbose: bool,
}

impl Settings {
	/// # New.
	///
	/// Parse the CLI arguments, unless `--help` or `--version` were requested
	/// instead.
	fn new() -> Result<Self, ChalkError> {
		let mut paths = Dowser::default();
		let mut collection = None;
		let mut id = None;
		let mut store = PathBuf::from("./content");
		let mut verbose = false;

		let args = argyle::args()
			.with_keywords(include!(concat!(env!("OUT_DIR"), "/argyle.rs")));
		for arg in args {
			match arg {
				Argument::Key("-h" | "--help") => return Err(ChalkError::PrintHelp),
				Argument::Key("-v" | "--verbose") => { verbose = true; },
				Argument::Key("-V" | "--version") => return Err(ChalkError::PrintVersion),

				Argument::KeyWithValue("-c" | "--collection", s) => {
					collection.replace(s.parse::<Collection>()?);
				},
				Argument::KeyWithValue("-i" | "--id", s) => {
					chalk_core::validate_id(&s)?;
					id.replace(s);
				},
				Argument::KeyWithValue("-l" | "--list", s) => { read_list(&mut paths, &s)?; },
				Argument::KeyWithValue("-s" | "--store", s) => { store = PathBuf::from(s); },

				// Assume paths.
				Argument::Other(s) => { paths = paths.with_path(s); },
				Argument::InvalidUtf8(s) => { paths = paths.with_path(s); },

				// Nothing else is relevant.
				_ => {},
			}
		}

		let target = match collection {
			Some(c) if ! c.has_image() => return Err(ChalkError::NoImageField),
			Some(c) => Some((c, id)),
			// An ID without a collection is meaningless.
			None if id.is_some() => return Err(ChalkError::Collection),
			None => None,
		};

		Ok(Self { paths, target, store, verbose })
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_read_list() {
		let dir = std::env::temp_dir().join(format!("chalk-list-{}", std::process::id()));
		std::fs::create_dir_all(&dir).expect("Temp dir failed.");

		let mut paths = Dowser::default();
		let missing = dir.join("missing.txt");
		assert_eq!(
			read_list(&mut paths, &missing.to_string_lossy()),
			Err(ChalkError::Read),
		);

		let list = dir.join("list.txt");
		std::fs::write(&list, format!("{}\n", dir.display())).expect("Write failed.");
		assert_eq!(read_list(&mut paths, &list.to_string_lossy()), Ok(()));

		let _res = std::fs::remove_dir_all(&dir);
	}
}
