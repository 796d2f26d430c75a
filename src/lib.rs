pub mod analysis;
pub mod grammar;
pub mod host;
pub mod symbol_table;
pub mod types;
pub mod utils;

pub use analysis::{
    AnalysisConfig,
    InferredCall,
    TypeInference,
};
pub use grammar::parse_module;
pub use host::MemoryHost;
