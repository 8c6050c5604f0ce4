pub(crate) mod swatch_strip;
