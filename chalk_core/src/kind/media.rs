/*!
# `Chalk` - Declared Media Type
*/

use std::{
	convert::Infallible,
	fmt,
	path::Path,
	str::FromStr,
};



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Media Type.
///
/// This is the image subtype a source _claims_ to be, e.g. the `type` of an
/// uploaded file. It only decides the output format; decoding always goes by
/// the payload's actual magic headers.
///
/// Declarations are never rejected. Anything unrecognized (including an
/// empty string or a missing extension) is [`MediaType::Other`], and whether
/// or not the bytes are usable is left to the decoder.
pub enum MediaType {
	/// # `image/bmp`.
	Bmp,

	/// # `image/gif`.
	Gif,

	/// # `image/jpeg`.
	Jpeg,

	/// # `image/png`.
	Png,

	/// # `image/webp`.
	Webp,

	/// # Anything Else.
	Other,
}

impl AsRef<str> for MediaType {
	#[inline]
	fn as_ref(&self) -> &str { self.as_str() }
}

impl fmt::Display for MediaType {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<&str> for MediaType {
	/// # From MIME String.
	///
	/// Parameters (`;charset=…`) are ignored, as is case.
	fn from(src: &str) -> Self {
		let src = src.split(';').next().unwrap_or_default().trim();
		let Some((top, sub)) = src.split_once('/') else { return Self::Other; };
		if ! top.trim().eq_ignore_ascii_case("image") { return Self::Other; }

		match sub.trim().to_ascii_lowercase().as_str() {
			"bmp" | "x-ms-bmp" => Self::Bmp,
			"gif" => Self::Gif,
			"jpeg" | "jpg" | "pjpeg" => Self::Jpeg,
			"png" | "x-png" => Self::Png,
			"webp" => Self::Webp,
			_ => Self::Other,
		}
	}
}

impl From<&Path> for MediaType {
	/// # From Path.
	///
	/// This guesses the declared type from the file extension, the same way
	/// a browser fills in `File.type` for a selected upload.
	fn from(src: &Path) -> Self {
		let Some(ext) = src.extension().and_then(std::ffi::OsStr::to_str) else {
			return Self::Other;
		};

		match ext.to_ascii_lowercase().as_str() {
			"bmp" => Self::Bmp,
			"gif" => Self::Gif,
			"jpe" | "jpeg" | "jpg" => Self::Jpeg,
			"png" => Self::Png,
			"webp" => Self::Webp,
			_ => Self::Other,
		}
	}
}

impl FromStr for MediaType {
	type Err = Infallible;

	#[inline]
	fn from_str(src: &str) -> Result<Self, Self::Err> { Ok(Self::from(src)) }
}

impl MediaType {
	#[must_use]
	/// # As Str.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Bmp => "image/bmp",
			Self::Gif => "image/gif",
			Self::Jpeg => "image/jpeg",
			Self::Png => "image/png",
			Self::Webp => "image/webp",
			Self::Other => "application/octet-stream",
		}
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_from_str() {
		assert_eq!(MediaType::from("image/png"), MediaType::Png);
		assert_eq!(MediaType::from("IMAGE/WebP"), MediaType::Webp);
		assert_eq!(MediaType::from("image/jpeg; q=1"), MediaType::Jpeg);
		assert_eq!("image/pjpeg".parse::<MediaType>(), Ok(MediaType::Jpeg));

		// Unknown declarations are kept, not refused.
		for s in ["text/plain", "image/svg+xml", "image/jfif", "image/avif", "application/octet-stream", "png", ""] {
			assert_eq!(MediaType::from(s), MediaType::Other, "{s:?}");
		}

		for m in [MediaType::Bmp, MediaType::Gif, MediaType::Jpeg, MediaType::Png, MediaType::Webp, MediaType::Other] {
			assert_eq!(MediaType::from(m.as_str()), m);
		}
	}

	#[test]
	fn t_from_path() {
		assert_eq!(MediaType::from(Path::new("/a/b.JPG")), MediaType::Jpeg);
		assert_eq!(MediaType::from(Path::new("hero.png")), MediaType::Png);
		assert_eq!(MediaType::from(Path::new("hero.webp")), MediaType::Webp);
		assert_eq!(MediaType::from(Path::new("hero.tiff")), MediaType::Other);
		assert_eq!(MediaType::from(Path::new("hero.jfif")), MediaType::Other);
		assert_eq!(MediaType::from(Path::new("hero")), MediaType::Other);
	}
}
