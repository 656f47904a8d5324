use thiserror::Error;

/// Failures of the genealogy pipeline, one variant per stage.
#[derive(Error, Debug)]
pub enum GenealogyError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// `line` is the 0-based count of lines accepted before the failure;
    /// `content` is the offending raw line, empty when input ran out.
    #[error("Error on line {line}: {content}")]
    InvalidPopulation { line: usize, content: String },

    #[error("Cannot relate entire population.")]
    Disconnected,

    #[error("The genealogy did not converge.")]
    DidNotConverge,

    #[error("Newick export error: {0}")]
    Newick(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GenealogyError>;
