/*!
# `Chalk` - PNG Images.
*/

use crate::{
	ChalkError,
	traits::{
		Decoder,
		DecoderResult,
	},
};



/// # PNG Image.
pub(crate) struct ImagePng;

impl Decoder for ImagePng {
	/// # Decode.
	fn decode(raw: &[u8]) -> Result<DecoderResult, ChalkError> {
		// Parse the file. Palettes, greyscale, and 16-bit depths all get
		// normalized to 8-bit RGBA by the decoder.
		let img = lodepng::decode32(raw)
			.map_err(|_| ChalkError::Decode)?;

		let width = u32::try_from(img.width).map_err(|_| ChalkError::Overflow)?;
		let height = u32::try_from(img.height).map_err(|_| ChalkError::Overflow)?;
		let size = img.width.checked_mul(img.height)
			.and_then(|x| x.checked_mul(4))
			.ok_or(ChalkError::Overflow)?;

		let out: Vec<u8> = img.buffer.iter()
			.fold(Vec::with_capacity(size), |mut acc, px| {
				acc.extend_from_slice(&[px.r, px.g, px.b, px.a]);
				acc
			});

		// Make sure the buffer was actually filled to the right size.
		if out.len() == size { Ok((out, width, height)) }
		else { Err(ChalkError::Decode) }
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_decode() {
		// A 3x2 image with a transparent corner.
		let src: Vec<u8> = vec![
			255, 0, 0, 255,   0, 255, 0, 255,   0, 0, 255, 255,
			9, 9, 9, 255,     50, 60, 70, 255,  0, 0, 0, 0,
		];
		let png = lodepng::encode_memory(&src, 3, 2, lodepng::ColorType::RGBA, 8)
			.expect("PNG encoding failed.");

		let (out, width, height) = ImagePng::decode(&png).expect("Decode failed.");
		assert_eq!((width, height), (3, 2));
		assert_eq!(out, src);
	}

	#[test]
	fn t_corrupt() {
		let mut raw = vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];
		raw.extend_from_slice(&[0; 32]);
		assert_eq!(ImagePng::decode(&raw), Err(ChalkError::Decode));
	}
}
