pub mod report;
pub mod runner;
pub mod scenario;

pub use report::{FlowArtifacts, FlowReport};
pub use runner::{Probe, IMAGE_FIXTURE_NAME, PDF_FIXTURE_NAME, RASTER_PREFIX};
pub use scenario::{FlowKind, Scenario};
