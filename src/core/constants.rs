//! Constants describing the packaged model's input/output contract.

/// Side length of the square model input, in pixels. Every image is resized
/// to `MODEL_INPUT_SIZE x MODEL_INPUT_SIZE` before tensor construction.
pub const MODEL_INPUT_SIZE: u32 = 128;

/// Number of color channels the model consumes (RGB, interleaved).
pub const MODEL_INPUT_CHANNELS: usize = 3;

/// Number of plant categories the packaged model scores.
pub const NUM_PLANT_CLASSES: usize = 30;

/// File name of the model asset bundled with the application.
pub const DEFAULT_MODEL_ASSET: &str = "plant_model.onnx";
