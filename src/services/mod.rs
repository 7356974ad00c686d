pub mod batch;
pub mod cancel;
pub mod image_io;
pub mod listing;
pub mod pipeline;
pub mod recolor;
pub mod scramble;

pub use batch::for_each_image;
pub use cancel::CancelToken;
pub use listing::{list_images, natural_cmp};
pub use pipeline::{run_pipeline, PipelineDirs};
pub use recolor::{BatchOrchestrator, Inverter};
pub use scramble::ScrambleService;
