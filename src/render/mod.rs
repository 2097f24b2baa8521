pub mod colormap;
pub mod geotiff;
pub mod preview;
pub mod quantize;
