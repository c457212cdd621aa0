/*!
# `Chalk` - Library

This crate shrinks school-site images into self-contained `data:` URIs small
enough to live inline in a document database field, and provides the typed
content records those URIs end up in.

## Examples

```no_run
use chalk_core::Source;
use std::path::Path;

let src = Source::try_from(Path::new("/path/to/photo.png")).unwrap();
let out = chalk_core::compress(&src).unwrap();
assert!(out.len() <= chalk_core::MAX_ENCODED_LEN);
```
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
#![warn(unused_extern_crates)]
#![warn(unused_import_braces)]

#![allow(clippy::module_name_repetitions)]



mod content;
mod enc;
mod error;
mod kind;
mod raster;
mod source;
pub(crate) mod traits;

pub use content::{
	Collection,
	ContentStore,
	DirStore,
	GalleryItem,
	MemoryStore,
	NewsArticle,
	PROFILE_ID,
	Record,
	SchoolProfile,
	Suggestion,
	Teacher,
	slug,
	validate_id,
};
pub use enc::{
	compress,
	iter::{
		Attempt,
		EncodeIter,
	},
	output::Output,
	quality::Quality,
};
pub use error::ChalkError;
pub use kind::{
	image::{
		ImageKind,
		OutputKind,
	},
	media::MediaType,
};
pub use raster::{
	Bitmap,
	Raster,
	fit_dimensions,
};
pub use source::Source;

pub(crate) use kind::{
	jpeg::ImageJpeg,
	legacy::{
		ImageBmp,
		ImageGif,
	},
	png::ImagePng,
	webp::ImageWebp,
};



/// # Maximum Raster Dimension.
///
/// Neither side of an encoded image may exceed this many pixels.
pub const MAX_DIMENSION: u32 = 800;

/// # Maximum Encoded Length.
///
/// The largest acceptable data URI, in characters. This is a text budget, not
/// a byte budget; base64 costs about a third on top of the binary.
pub const MAX_ENCODED_LEN: usize = 1_000_000;
