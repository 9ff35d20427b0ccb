pub mod analyzer;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod links;
pub mod logging;
pub mod render;
pub mod service;
pub mod session;

pub use analyzer::AnalysisClient;
pub use codec::{EncodedImage, SelectedFile};
pub use session::{AnalysisSession, AnalysisState};
