/*!
# Chalk: CLI Output
*/

use chalk_core::{
	ChalkError,
	Collection,
	Output,
};
use dactyl::{
	NiceElapsed,
	NiceU64,
};
use fyi_msg::Msg;
use std::{
	path::Path,
	time::Duration,
};



/// # Print Error.
pub(super) fn print_error(path: &Path, err: ChalkError) {
	Msg::warning(format!("{}: {}", path.to_string_lossy(), err.as_str()))
		.eprint();
}

/// # Print Success (Attached).
pub(super) fn print_attached(path: &Path, output: &Output, collection: Collection, id: &str) {
	Msg::success(format!(
		"{} \x1b[2m→\x1b[0m \x1b[1m{collection}/{id}\x1b[0m",
		path.to_string_lossy(),
	))
		.with_suffix(suffix(output))
		.eprint();
}

/// # Print Success (Printed).
pub(super) fn print_encoded(path: &Path, output: &Output) {
	Msg::success(path.to_string_lossy())
		.with_suffix(suffix(output))
		.eprint();
}

/// # Print Summary.
pub(super) fn print_summary(ok: u64, failed: u64, time: Duration) {
	let msg = format!(
		"{} of {} image(s) in {}.",
		NiceU64::from(ok).as_str(),
		NiceU64::from(ok + failed).as_str(),
		NiceElapsed::from(time).as_str(),
	);

	if failed == 0 { Msg::done(msg).eprint(); }
	else { Msg::warning(msg).eprint(); }
}

/// # Result Details.
///
/// This formats the output particulars, like:
///
/// ```ignore
///  (WebP, 800x400, quality 0.7, 123,456 characters)
/// ```
fn suffix(output: &Output) -> String {
	format!(
		" \x1b[2m({}, {}x{}, quality {}, {} characters)\x1b[0m",
		output.kind(),
		output.width(),
		output.height(),
		output.quality(),
		NiceU64::from(output.len() as u64).as_str(),
	)
}
