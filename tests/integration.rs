#[path = "integration/common.rs"]
mod common;
#[path = "integration/diagnostics.rs"]
mod diagnostics;
#[path = "integration/pipeline.rs"]
mod pipeline;
