pub mod annulus;
pub mod convolve;
