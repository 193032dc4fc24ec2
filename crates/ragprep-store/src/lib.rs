#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod checkpoint;
pub mod chunk_store;
pub mod ndjson;
pub mod pipeline;

pub use checkpoint::Checkpoint;
pub use chunk_store::ChunkStore;
pub use ndjson::EmbeddingWriter;
pub use pipeline::{EmbeddingPipeline, PipelineOptions, PipelineReport};
