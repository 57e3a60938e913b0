/// Whether a tracking session is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingStatus {
    Idle,
    Tracking,
}

impl TrackingStatus {
    /// Short label for status lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Not working",
            Self::Tracking => "Working",
        }
    }
}

/// What a single "primary" key press does in the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAction {
    Start,
    Stop,
    /// Neither start nor stop is possible: ask the user for labels
    OpenDialog,
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    EditingLabels,
    EditingInterval,
    ConfirmDelete,
    FilterTasks,
    FilterClients,
    IdleCheck,
}

/// Which pane receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tracker,
    History,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Self::Tracker => Self::History,
            Self::History => Self::Tracker,
        }
    }
}

/// Answer to the "you have been idle" prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleDisposition {
    /// Keep tracking, idle time included
    Continue,
    /// Close the interval at the idle start and resume right away
    ContinueButDiscard,
    /// Close the interval at the idle start
    StopAndDiscard,
    /// Close the interval now, idle time included
    StopAndSave,
}

impl IdleDisposition {
    pub fn all() -> &'static [IdleDisposition] {
        &[
            IdleDisposition::Continue,
            IdleDisposition::ContinueButDiscard,
            IdleDisposition::StopAndDiscard,
            IdleDisposition::StopAndSave,
        ]
    }

    pub fn key(&self) -> char {
        match self {
            Self::Continue => 'c',
            Self::ContinueButDiscard => 'd',
            Self::StopAndDiscard => 'x',
            Self::StopAndSave => 's',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Continue => "Continue",
            Self::ContinueButDiscard => "Continue but discard idle time",
            Self::StopAndDiscard => "Stop and discard idle time",
            Self::StopAndSave => "Stop and save",
        }
    }

    pub fn from_key(c: char) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|d| d.key() == c.to_ascii_lowercase())
    }

    /// Whether this answer closes an interval (needs both labels)
    pub fn closes_interval(&self) -> bool {
        !matches!(self, Self::Continue)
    }
}
