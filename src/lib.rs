// THEORY:
// This file is the main entry point for the `laser_vision` library crate.
// It follows the standard Rust convention of using `lib.rs` to define the
// public API exposed to external consumers (capture loops, display shells).
//
// The primary goal is to export the `LaserPipeline` and its associated data
// structures (`PipelineConfig`, `DetectionResult`, `Detection`) as the
// high-level interface for the detection engine, with the internal stages
// encapsulated under `core_modules`.

pub mod core_modules;
pub mod pipeline;
pub mod parallel_pipeline;
