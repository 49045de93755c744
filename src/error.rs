use reqwest::StatusCode;

#[derive(thiserror::Error)]
pub enum AgentError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl AgentError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, AgentError::InvalidInput(_))
    }

    /// HTTP status returned by the remote API, when the failure carries one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AgentError::Transport(err) => err.status(),
            AgentError::InvalidInput(_) => None,
        }
    }
}

impl std::fmt::Debug for AgentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;

        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            write!(f, "\nCaused by:\n\t{}", cause)?;
            source = cause.source();
        }

        Ok(())
    }
}
