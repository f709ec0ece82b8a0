/// Three-state result of a remote fetch, threaded through to the views.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus<T> {
    /// Fetch has not completed yet.
    Pending,
    Ready(T),
    /// Fetch failed; the message is meant for display.
    Failed(String),
}

impl<T> LoadStatus<T> {
    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => Self::Failed(e.to_string()),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadStatus<U> {
        match self {
            Self::Pending => LoadStatus::Pending,
            Self::Ready(value) => LoadStatus::Ready(f(value)),
            Self::Failed(msg) => LoadStatus::Failed(msg),
        }
    }
}

impl<T> Default for LoadStatus<T> {
    fn default() -> Self {
        Self::Pending
    }
}
