use serde::Serialize;
use strum::{Display, EnumIter};

/// Counters and branch fields extracted from one `git status` run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Porcelain {
    pub modified: u32,
    pub conflicted: u32,
    pub untracked: u32,
    pub staged: u32,
    pub is_detached: bool,
    /// No commit has been made yet on the current branch.
    pub is_initial: bool,
    pub local_branch: String,
    pub remote_branch: String,
    pub ahead_count: u32,
    pub behind_count: u32,
    /// The upstream branch is configured but no longer exists.
    pub is_upstream_gone: bool,
}

/// Multi-step operation in progress in the working tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OperationState {
    #[default]
    Default,
    Rebasing,
    /// Applying patches from a mailbox (`git am`).
    MailboxApply,
    /// `git am` style rebase.
    MailboxApplyRebase,
    Merging,
    CherryPicking,
    Reverting,
    Bisecting,
}

/// Fields gathered by the queries that follow the status query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Details {
    pub stashed: u32,
    pub head_commit: String,
    pub operation_state: OperationState,
    pub insertions: u32,
    pub deletions: u32,
}

/// Status of a working tree at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(flatten)]
    porcelain: Porcelain,
    stashed: u32,
    head_commit: String,
    operation_state: OperationState,
    is_clean: bool,
    insertions: u32,
    deletions: u32,
}

impl Snapshot {
    pub fn new(porcelain: Porcelain, details: Details) -> Self {
        let is_clean = porcelain.staged == 0
            && porcelain.conflicted == 0
            && porcelain.modified == 0
            && porcelain.untracked == 0
            && details.stashed == 0;

        Self {
            porcelain,
            stashed: details.stashed,
            head_commit: details.head_commit,
            operation_state: details.operation_state,
            is_clean,
            insertions: details.insertions,
            deletions: details.deletions,
        }
    }

    pub fn modified(&self) -> u32 {
        self.porcelain.modified
    }

    pub fn conflicted(&self) -> u32 {
        self.porcelain.conflicted
    }

    pub fn untracked(&self) -> u32 {
        self.porcelain.untracked
    }

    pub fn staged(&self) -> u32 {
        self.porcelain.staged
    }

    pub fn stashed(&self) -> u32 {
        self.stashed
    }

    /// Short hash of the current commit, empty before the first commit.
    pub fn head_commit(&self) -> &str {
        &self.head_commit
    }

    pub fn local_branch(&self) -> &str {
        &self.porcelain.local_branch
    }

    pub fn remote_branch(&self) -> &str {
        &self.porcelain.remote_branch
    }

    pub fn ahead_count(&self) -> u32 {
        self.porcelain.ahead_count
    }

    pub fn behind_count(&self) -> u32 {
        self.porcelain.behind_count
    }

    pub fn is_initial(&self) -> bool {
        self.porcelain.is_initial
    }

    pub fn is_detached(&self) -> bool {
        self.porcelain.is_detached
    }

    pub fn is_upstream_gone(&self) -> bool {
        self.porcelain.is_upstream_gone
    }

    pub fn is_clean(&self) -> bool {
        self.is_clean
    }

    pub fn operation_state(&self) -> OperationState {
        self.operation_state
    }

    pub fn insertions(&self) -> u32 {
        self.insertions
    }

    pub fn deletions(&self) -> u32 {
        self.deletions
    }
}
