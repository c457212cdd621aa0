/*!
# `Chalk` - Error
*/

use std::{
	error::Error,
	fmt,
};



/// # Help Text.
const HELP: &str = concat!(r"
    .-----------------.
    |  A  B  C        |
    |      ~ ~ ~      |   ", "\x1b[38;5;199mChalk\x1b[0;38;5;69m v", env!("CARGO_PKG_VERSION"), "\x1b[0m", r#"
    |   1 + 2 = 3     |   Shrink school-site images into
    '-----------------'   inline data URIs.
          |     |

USAGE:
    chalk [FLAGS] [OPTIONS] <PATH(S)>...

FLAGS:
    -h, --help              Print help information and exit.
    -v, --verbose           Log each encoding attempt to STDERR.
    -V, --version           Print version information and exit.

OPTIONS:
    -c, --collection <NAME> Attach results to records in this collection
                            (news, teachers, gallery, school_profile)
                            instead of printing data URIs to STDOUT.
    -i, --id <ID>           The record ID to attach to. Defaults to "main"
                            for school_profile and the file stem for
                            gallery.
    -l, --list <FILE>       Read image and/or directory paths from this text
                            file, one path per line.
    -s, --store <DIR>       The content store directory. [default: ./content]

TRAILING ARGS:
    <PATH(S)>...            Image and/or directory paths to compress.
                            Directories will be crawled recursively.
"#);



#[derive(Debug, Copy, Clone, Eq, PartialEq)]
/// # Errors.
pub enum ChalkError {
	/// # Unknown collection, or a record/collection mismatch.
	Collection,

	/// # Decoding failed.
	Decode,

	/// # Encoding failed.
	Encode,

	/// # Invalid record ID.
	Id,

	/// # One record ID for several images.
	IdMulti,

	/// # No record ID given or implied.
	NoId,

	/// # The record has no image field.
	NoImageField,

	/// # No images were found.
	NoImages,

	/// # The record does not exist.
	NoRecord,

	/// # Image dimensions are too big.
	Overflow,

	/// # I/O read error.
	Read,

	/// # Malformed store data.
	Store,

	/// # The raster could not be allocated.
	Surface,

	/// # The encoded image is too big, even at the lowest quality.
	TooBig,

	/// # I/O write error.
	Write,

	/// # Print Help (Not an Error).
	PrintHelp,

	/// # Print Version (Not an Error).
	PrintVersion,
}

impl AsRef<str> for ChalkError {
	#[inline]
	fn as_ref(&self) -> &str { self.as_str() }
}

impl Error for ChalkError {}

impl fmt::Display for ChalkError {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl ChalkError {
	#[must_use]
	/// # As Str.
	///
	/// Return the error as an English string slice.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Collection => "Invalid content collection.",
			Self::Decode => "Cannot process image.",
			Self::Encode => "The image could not be encoded.",
			Self::Id => "Record IDs may only contain letters, numbers, dashes, and underscores.",
			Self::IdMulti => "A record ID can only be paired with a single image.",
			Self::NoId => "This collection requires a record ID (-i/--id).",
			Self::NoImageField => "This kind of record has no image field.",
			Self::NoImages => "No images were found.",
			Self::NoRecord => "The record does not exist.",
			Self::Overflow => "The image dimensions are out of range.",
			Self::Read => "Unable to read the source file.",
			Self::Store => "The content store data is malformed.",
			Self::Surface => "The drawing surface could not be allocated.",
			Self::TooBig => "Image too large. Try a smaller or simpler picture.",
			Self::Write => "Unable to save the file.",
			Self::PrintHelp => HELP,
			Self::PrintVersion => concat!("Chalk v", env!("CARGO_PKG_VERSION")),
		}
	}

	#[must_use]
	/// # Is Pipeline Failure?
	///
	/// Returns `true` for the errors an image can fail compression with, as
	/// opposed to store or CLI problems.
	pub const fn is_image(self) -> bool {
		matches!(
			self,
			Self::Decode | Self::Encode | Self::Overflow |
			Self::Read | Self::Surface | Self::TooBig
		)
	}
}
