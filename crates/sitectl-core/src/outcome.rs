//! User-facing operation outcomes.

/// Result of a supervisor operation folded into a display pair.
///
/// The CLI prints `message` and derives its exit status from `success`;
/// nothing machine-readable crosses this boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
}

impl Outcome {
    /// A successful outcome with a display message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A failed outcome with a display message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
