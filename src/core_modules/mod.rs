pub mod annotator;
pub mod blob;
pub mod blob_detector;
pub mod compositor;
pub mod hsv;
pub mod thresholder;
