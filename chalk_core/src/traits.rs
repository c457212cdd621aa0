/*!
# `Chalk` - Traits.
*/

use crate::{
	ChalkError,
	Quality,
	Raster,
};



/// # The result type for `Decoder::decode`.
///
/// This is an RGBA buffer, width, and height.
pub(crate) type DecoderResult = (Vec<u8>, u32, u32);

/// # Decoder.
///
/// This is implemented for image formats capable of decoding raw image data
/// into RGBA pixels.
pub(crate) trait Decoder {
	/// # Decode.
	///
	/// Decode the bytes from a raw image file into a contiguous `u8` buffer
	/// using 4 bytes (RGBA) per pixel.
	///
	/// RGB, greyscale, etc., should be upscaled accordingly.
	///
	/// ## Errors
	///
	/// Return any errors encountered during decoding.
	fn decode(raw: &[u8]) -> Result<DecoderResult, ChalkError>;
}

/// # Encoder.
///
/// This is implemented for image formats capable of encoding from RGBA pixels
/// into a raw image.
pub(crate) trait Encoder {
	/// # Encode Lossy.
	///
	/// Encode the raster into a complete image file at the specified
	/// quality.
	///
	/// ## Errors
	///
	/// Return any errors encountered during encoding.
	fn encode(img: &Raster, quality: Quality) -> Result<Vec<u8>, ChalkError>;
}
