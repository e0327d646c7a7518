use std::fmt;

/// Lifecycle states reported by entities, object collection rules and scheduled tasks.
///
/// Not every resource uses every state. Snapshots keep the raw string, so
/// states introduced by the service later still compare correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    Creating,
    Active,
    Updating,
    Inactive,
    Paused,
    Deleted,
    Failed,
}

impl LifecycleState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Creating => "CREATING",
            Self::Active => "ACTIVE",
            Self::Updating => "UPDATING",
            Self::Inactive => "INACTIVE",
            Self::Paused => "PAUSED",
            Self::Deleted => "DELETED",
            Self::Failed => "FAILED",
        }
    }
}

impl AsRef<str> for LifecycleState {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a work request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkRequestStatus {
    Accepted,
    InProgress,
    Succeeded,
    Failed,
    Canceled,
}

impl WorkRequestStatus {
    pub const TERMINAL: [Self; 3] = [Self::Succeeded, Self::Failed, Self::Canceled];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "ACCEPTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
            Self::Canceled => "CANCELED",
        }
    }

    /// Case-insensitive parse; `None` for statuses this crate does not know.
    pub fn parse(status: &str) -> Option<Self> {
        [
            Self::Accepted,
            Self::InProgress,
            Self::Succeeded,
            Self::Failed,
            Self::Canceled,
        ]
        .into_iter()
        .find(|candidate| candidate.as_str().eq_ignore_ascii_case(status))
    }

    pub fn is_terminal(self) -> bool {
        Self::TERMINAL.contains(&self)
    }
}

impl AsRef<str> for WorkRequestStatus {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for WorkRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_work_request_status() {
        assert_eq!(
            WorkRequestStatus::parse("in_progress"),
            Some(WorkRequestStatus::InProgress)
        );
        assert_eq!(
            WorkRequestStatus::parse("SUCCEEDED"),
            Some(WorkRequestStatus::Succeeded)
        );
        assert_eq!(WorkRequestStatus::parse("SUSPENDED"), None);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(WorkRequestStatus::Succeeded.is_terminal());
        assert!(WorkRequestStatus::Failed.is_terminal());
        assert!(WorkRequestStatus::Canceled.is_terminal());
        assert!(!WorkRequestStatus::Accepted.is_terminal());
        assert!(!WorkRequestStatus::InProgress.is_terminal());
    }

    #[test]
    fn test_display_matches_wire_names() {
        assert_eq!(LifecycleState::Active.to_string(), "ACTIVE");
        assert_eq!(WorkRequestStatus::InProgress.to_string(), "IN_PROGRESS");
    }
}
