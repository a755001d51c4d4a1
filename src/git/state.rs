use std::{fs, path::Path};

use super::status::OperationState;

impl OperationState {
    /// Resolves the operation in progress from the marker files git leaves in
    /// its metadata directory.
    ///
    /// Markers are checked in the same order as git's own prompt script, the
    /// first one found wins. A marker that can't be accessed counts as absent.
    pub fn from_git_dir(git_dir: &Path) -> Self {
        let exists = |marker: &str| fs::metadata(git_dir.join(marker)).is_ok();

        if exists("rebase-merge") {
            OperationState::Rebasing
        } else if exists("rebase-apply") {
            if exists("rebase-apply/rebasing") {
                OperationState::Rebasing
            } else if exists("rebase-apply/applying") {
                OperationState::MailboxApply
            } else {
                OperationState::MailboxApplyRebase
            }
        } else if exists("MERGE_HEAD") {
            OperationState::Merging
        } else if exists("CHERRY_PICK_HEAD") {
            OperationState::CherryPicking
        } else if exists("REVERT_HEAD") {
            OperationState::Reverting
        } else if exists("BISECT_LOG") {
            OperationState::Bisecting
        } else {
            OperationState::Default
        }
    }
}
