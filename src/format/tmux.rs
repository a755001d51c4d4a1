use std::fmt::Write;

use itertools::Itertools;

use super::Formatter;
use crate::{
    Res,
    config::TmuxConfig,
    git::status::{OperationState, Snapshot},
};

/// One line for a tmux status bar, using tmux `#[...]` style strings.
pub struct Tmux<'a> {
    config: &'a TmuxConfig,
}

impl<'a> Tmux<'a> {
    pub fn new(config: &'a TmuxConfig) -> Self {
        Self { config }
    }

    fn styled(&self, style: &str, text: &str) -> String {
        format!("{}{}{}", style, text, self.config.styles.clear)
    }

    fn current_ref(&self, snapshot: &Snapshot) -> String {
        let (symbols, styles) = (&self.config.symbols, &self.config.styles);

        if snapshot.is_detached() {
            self.styled(
                &styles.hash_prefix,
                &format!("{}{}", symbols.hash_prefix, snapshot.head_commit()),
            )
        } else {
            self.styled(&styles.branch, snapshot.local_branch())
        }
    }

    fn upstream(&self, snapshot: &Snapshot) -> String {
        let (symbols, styles) = (&self.config.symbols, &self.config.styles);
        let mut out = format!("..{}", self.styled(&styles.remote, snapshot.remote_branch()));

        if snapshot.is_upstream_gone() {
            let _ = write!(out, " {}", self.styled(&styles.gone, &symbols.gone));
            return out;
        }

        let divergence = [
            (snapshot.behind_count(), &styles.behind, &symbols.behind),
            (snapshot.ahead_count(), &styles.ahead, &symbols.ahead),
        ]
        .into_iter()
        .filter(|(count, _, _)| *count != 0)
        .map(|(count, style, symbol)| self.styled(style, &format!("{}{}", symbol, count)))
        .join("");

        if !divergence.is_empty() {
            let _ = write!(out, " {}{}", styles.divergence, divergence);
        }
        out
    }

    fn files(&self, snapshot: &Snapshot) -> String {
        let (symbols, styles) = (&self.config.symbols, &self.config.styles);

        if snapshot.is_clean() {
            return self.styled(&styles.clean, &symbols.clean);
        }

        [
            (snapshot.staged(), &styles.staged, &symbols.staged),
            (snapshot.conflicted(), &styles.conflict, &symbols.conflict),
            (snapshot.modified(), &styles.modified, &symbols.modified),
            (snapshot.stashed(), &styles.stashed, &symbols.stashed),
            (snapshot.untracked(), &styles.untracked, &symbols.untracked),
        ]
        .into_iter()
        .filter(|(count, _, _)| *count != 0)
        .map(|(count, style, symbol)| self.styled(style, &format!("{}{}", symbol, count)))
        .join(" ")
    }
}

fn state_label(state: OperationState) -> Option<&'static str> {
    match state {
        OperationState::Default => None,
        OperationState::Rebasing => Some("[rebase]"),
        OperationState::MailboxApply => Some("[am]"),
        OperationState::MailboxApplyRebase => Some("[am-rebase]"),
        OperationState::Merging => Some("[merge]"),
        OperationState::CherryPicking => Some("[cherry-pick]"),
        OperationState::Reverting => Some("[revert]"),
        OperationState::Bisecting => Some("[bisect]"),
    }
}

impl Formatter for Tmux<'_> {
    fn format(&self, snapshot: &Snapshot) -> Res<String> {
        let (symbols, styles) = (&self.config.symbols, &self.config.styles);
        let mut out = String::new();

        if snapshot.is_initial() {
            let _ = write!(
                out,
                "{} [no commits yet]",
                self.styled(&styles.branch, snapshot.local_branch())
            );
        } else {
            match state_label(snapshot.operation_state()) {
                Some(label) => {
                    let _ = write!(
                        out,
                        "{} {}",
                        self.styled(&styles.state, label),
                        self.current_ref(snapshot)
                    );
                }
                None => {
                    let _ = write!(
                        out,
                        "{}{}",
                        self.styled(&styles.branch, &symbols.branch),
                        self.current_ref(snapshot)
                    );
                }
            }

            if !snapshot.remote_branch().is_empty() {
                out.push_str(&self.upstream(snapshot));
            }
        }

        let _ = write!(out, " - {}", self.files(snapshot));
        Ok(out)
    }
}
