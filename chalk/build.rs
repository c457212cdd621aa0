/*!
# Chalk - Build
*/

use argyle::KeyWordsBuilder;
use dowser::Extension;
use std::{
	fs::File,
	io::Write,
	path::PathBuf,
};



/// # Build!
pub fn main() {
	println!("cargo:rerun-if-env-changed=CARGO_PKG_VERSION");
	println!("cargo:rerun-if-changed=Cargo.toml");

	build_cli();
	build_exts();
}

/// # Build CLI Keys.
fn build_cli() {
	let mut builder = KeyWordsBuilder::default();
	builder.push_keys([
		"-h", "--help",
		"-v", "--verbose",
		"-V", "--version",
	]);
	builder.push_keys_with_values([
		"-c", "--collection",
		"-i", "--id",
		"-l", "--list",
		"-s", "--store",
	]);
	builder.save(out_path("argyle.rs").expect("Missing OUT_DIR."));
}

/// # Build Extensions.
///
/// Pre-compute the image extension constants used when crawling.
fn build_exts() {
	let out = format!(
		r"
/// # Extension: BMP.
const E_BMP: Extension = {};
/// # Extension: GIF.
const E_GIF: Extension = {};
/// # Extension: JPE.
const E_JPE: Extension = {};
/// # Extension: JPEG.
const E_JPEG: Extension = {};
/// # Extension: JPG.
const E_JPG: Extension = {};
/// # Extension: PNG.
const E_PNG: Extension = {};
/// # Extension: WEBP.
const E_WEBP: Extension = {};
",
		Extension::codegen(b"bmp"),
		Extension::codegen(b"gif"),
		Extension::codegen(b"jpe"),
		Extension::codegen(b"jpeg"),
		Extension::codegen(b"jpg"),
		Extension::codegen(b"png"),
		Extension::codegen(b"webp"),
	);

	let mut file = out_path("chalk-extensions.rs")
		.and_then(|p| File::create(p).ok())
		.expect("Missing OUT_DIR.");

	file.write_all(out.as_bytes())
		.and_then(|()| file.flush())
		.expect("Unable to save extensions.");
}

/// # Output Path.
///
/// Return a path relative to the output directory.
fn out_path(file: &str) -> Option<PathBuf> {
	let mut dir = std::fs::canonicalize(std::env::var("OUT_DIR").ok()?).ok()?;
	dir.push(file);
	Some(dir)
}
