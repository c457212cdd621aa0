/*!
# `Chalk` - Kinds
*/

pub(super) mod image;
pub(super) mod jpeg;
pub(super) mod legacy;
pub(super) mod media;
pub(super) mod png;
pub(super) mod webp;
