/*!
# `Chalk` - Image Kind
*/

use crate::{
	ChalkError,
	ImageBmp,
	ImageGif,
	ImageJpeg,
	ImagePng,
	ImageWebp,
	MediaType,
	Quality,
	Raster,
	traits::{
		Decoder,
		DecoderResult,
		Encoder,
	},
};
use std::fmt;



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Image Kind.
///
/// This is the format of a raw image payload, as determined by its magic
/// headers rather than whatever the file claims to be.
pub enum ImageKind {
	/// # BMP.
	Bmp,

	/// # GIF.
	Gif,

	/// # JPEG.
	Jpeg,

	/// # PNG.
	Png,

	/// # WebP.
	Webp,
}

impl AsRef<str> for ImageKind {
	#[inline]
	fn as_ref(&self) -> &str { self.as_str() }
}

impl fmt::Display for ImageKind {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl TryFrom<&[u8]> for ImageKind {
	type Error = ChalkError;

	/// # From Raw Bytes.
	///
	/// This examines the first 12 bytes of the raw image file to see what
	/// magic its headers contain.
	///
	/// ## Errors
	///
	/// Unrecognized (or truncated) data is treated as a decoding failure.
	fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
		// We need at least twelve bytes to hold header info!
		if src.len() > 12 {
			// PNG has just one way to be!
			if src[..8] == [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'] {
				return Ok(Self::Png);
			}

			// WebP is fairly straightforward.
			if src[..4] == *b"RIFF" && src[8..12] == *b"WEBP" {
				return Ok(Self::Webp);
			}

			// Browsers only care about the start-of-image marker, so we won't
			// be pickier than they are.
			if src[..3] == [0xFF, 0xD8, 0xFF] {
				return Ok(Self::Jpeg);
			}

			if src[..6] == *b"GIF87a" || src[..6] == *b"GIF89a" {
				return Ok(Self::Gif);
			}

			if src[..2] == *b"BM" {
				return Ok(Self::Bmp);
			}
		}

		Err(ChalkError::Decode)
	}
}

/// ## Getters.
impl ImageKind {
	#[must_use]
	/// # As Str.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Bmp => "BMP",
			Self::Gif => "GIF",
			Self::Jpeg => "JPEG",
			Self::Png => "PNG",
			Self::Webp => "WebP",
		}
	}
}

/// ## Decoding.
impl ImageKind {
	/// # Decode.
	///
	/// Sniff the raw file bytes and decode them with the matching decoder.
	///
	/// ## Errors
	///
	/// This will return an error if the format is not recognized or the
	/// data is corrupt.
	pub(crate) fn decode(raw: &[u8]) -> Result<(Self, DecoderResult), ChalkError> {
		let kind = Self::try_from(raw)?;
		let res = match kind {
			Self::Bmp => ImageBmp::decode(raw),
			Self::Gif => ImageGif::decode(raw),
			Self::Jpeg => ImageJpeg::decode(raw),
			Self::Png => ImagePng::decode(raw),
			Self::Webp => ImageWebp::decode(raw),
		}?;

		Ok((kind, res))
	}
}



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Output Kind.
///
/// The formats encoded images can be written as.
pub enum OutputKind {
	/// # JPEG.
	Jpeg,

	/// # WebP.
	Webp,
}

impl AsRef<str> for OutputKind {
	#[inline]
	fn as_ref(&self) -> &str { self.as_str() }
}

impl fmt::Display for OutputKind {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<MediaType> for OutputKind {
	/// # From Declared Type.
	///
	/// PNG and WebP sources become WebP so that transparency survives;
	/// everything else, including unrecognized declarations, becomes JPEG.
	/// This is not configurable.
	fn from(src: MediaType) -> Self {
		match src {
			MediaType::Png | MediaType::Webp => Self::Webp,
			MediaType::Bmp | MediaType::Gif | MediaType::Jpeg | MediaType::Other => Self::Jpeg,
		}
	}
}

/// ## Getters.
impl OutputKind {
	#[must_use]
	/// # As Str.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Jpeg => "JPEG",
			Self::Webp => "WebP",
		}
	}

	#[must_use]
	/// # Image Kind.
	///
	/// Return the equivalent payload kind, used to verify encoder output.
	pub const fn image_kind(self) -> ImageKind {
		match self {
			Self::Jpeg => ImageKind::Jpeg,
			Self::Webp => ImageKind::Webp,
		}
	}

	#[must_use]
	/// # Media Type.
	pub const fn mime(self) -> &'static str {
		match self {
			Self::Jpeg => "image/jpeg",
			Self::Webp => "image/webp",
		}
	}
}

/// ## Encoding.
impl OutputKind {
	/// # Encode.
	///
	/// Encode the raster in this format at the given quality.
	///
	/// ## Errors
	///
	/// Encoder failures are passed through.
	pub(crate) fn encode(self, img: &Raster, quality: Quality) -> Result<Vec<u8>, ChalkError> {
		match self {
			Self::Jpeg => ImageJpeg::encode(img, quality),
			Self::Webp => ImageWebp::encode(img, quality),
		}
	}
}
