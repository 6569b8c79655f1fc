use serde::{Deserialize, Serialize};

/// Terminal outcome of the CI job being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Cancelled,
    Failure,
}

impl Status {
    /// Hex colour used for the status label in the card header.
    pub fn color(self) -> &'static str {
        match self {
            Status::Success => "#2cbe4e",
            Status::Cancelled => "#ffc107",
            Status::Failure => "#ff0000",
        }
    }

    /// Human readable status shown next to the name in the card header.
    pub fn label(self) -> &'static str {
        match self {
            Status::Success => "Succeeded",
            Status::Cancelled => "Cancelled",
            Status::Failure => "Failed",
        }
    }
}
