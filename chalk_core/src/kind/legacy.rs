/*!
# `Chalk` - GIF and BMP Images.

These older formats are only ever decoded, never written, so they share the
[`image`](https://crates.io/crates/image) crate's readers rather than getting
dedicated bindings. Animated GIFs contribute their first frame.
*/

use crate::{
	ChalkError,
	traits::{
		Decoder,
		DecoderResult,
	},
};
use image::ImageFormat;



/// # GIF Image.
pub(crate) struct ImageGif;

impl Decoder for ImageGif {
	#[inline]
	fn decode(raw: &[u8]) -> Result<DecoderResult, ChalkError> {
		decode(raw, ImageFormat::Gif)
	}
}



/// # BMP Image.
pub(crate) struct ImageBmp;

impl Decoder for ImageBmp {
	#[inline]
	fn decode(raw: &[u8]) -> Result<DecoderResult, ChalkError> {
		decode(raw, ImageFormat::Bmp)
	}
}



/// # Decode.
///
/// Parse the raw file with the named format and normalize it to 8-bit RGBA.
fn decode(raw: &[u8], format: ImageFormat) -> Result<DecoderResult, ChalkError> {
	let img = image::load_from_memory_with_format(raw, format)
		.map_err(|_| ChalkError::Decode)?
		.into_rgba8();

	let (width, height) = img.dimensions();
	let size = usize::try_from(width).ok()
		.zip(usize::try_from(height).ok())
		.and_then(|(w, h)| w.checked_mul(h))
		.and_then(|x| x.checked_mul(4))
		.ok_or(ChalkError::Overflow)?;

	let out = img.into_raw();
	if out.len() == size && size != 0 { Ok((out, width, height)) }
	else { Err(ChalkError::Decode) }
}



#[cfg(test)]
mod tests {
	use super::*;
	use image::{
		Rgba,
		RgbaImage,
	};
	use std::io::Cursor;

	/// # Encode a Test Image.
	fn sample(format: ImageFormat) -> Vec<u8> {
		let img = RgbaImage::from_fn(5, 3, |x, y|
			if (x + y) % 2 == 0 { Rgba([200, 40, 40, 255]) }
			else { Rgba([10, 10, 220, 255]) }
		);

		let mut out = Cursor::new(Vec::new());
		img.write_to(&mut out, format).expect("Encode failed.");
		out.into_inner()
	}

	#[test]
	fn t_gif() {
		let raw = sample(ImageFormat::Gif);
		assert_eq!(&raw[..3], b"GIF");
		let (pixels, width, height) = ImageGif::decode(&raw).expect("Decode failed.");
		assert_eq!((width, height), (5, 3));
		assert_eq!(pixels.len(), 5 * 3 * 4);
	}

	#[test]
	fn t_bmp() {
		let raw = sample(ImageFormat::Bmp);
		assert_eq!(&raw[..2], b"BM");
		let (pixels, width, height) = ImageBmp::decode(&raw).expect("Decode failed.");
		assert_eq!((width, height), (5, 3));
		assert_eq!(&pixels[..4], &[200, 40, 40, 255]);
	}

	#[test]
	fn t_corrupt() {
		let mut raw = b"GIF89a".to_vec();
		raw.extend_from_slice(&[0xEE; 20]);
		assert_eq!(ImageGif::decode(&raw), Err(ChalkError::Decode));
		assert_eq!(ImageBmp::decode(b"BM not really a bitmap"), Err(ChalkError::Decode));
	}
}
