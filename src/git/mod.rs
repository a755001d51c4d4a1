use std::path::PathBuf;

use crate::{
    Res,
    context::Context,
    error::Error,
    process::Runner,
};
use parse::{PorcelainFormat, count_lines, diff_stat::DiffStat, lines};
use status::{Details, OperationState, Snapshot};

pub(crate) mod parse;
mod state;
pub mod status;

pub use parse::FormatVersion;

const DIFF_STAT_ARGS: &[&str] = &["diff", "--shortstat"];
const STASH_LIST_ARGS: &[&str] = &["stash", "list"];
const IDENTITY_ARGS: &[&str] = &["rev-parse", "--git-dir", "--short", "HEAD"];

/// Builds [`Snapshot`]s by running a fixed sequence of git queries.
///
/// Queries run one after another: the status query decides whether the
/// others are needed at all.
pub struct Collector<R> {
    runner: R,
    format: Box<dyn PorcelainFormat>,
}

impl<R: Runner> Collector<R> {
    pub fn new(runner: R, version: FormatVersion) -> Self {
        Self {
            runner,
            format: version.parser(),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn collect(&self, ctx: &Context) -> Res<Snapshot> {
        let porcelain = self
            .format
            .parse(&self.query(ctx, self.format.status_args())?)?;

        // Everything below needs at least one commit
        if porcelain.is_initial {
            log::debug!("No commits yet on {:?}", porcelain.local_branch);
            return Ok(Snapshot::new(porcelain, Details::default()));
        }

        let diff_stat =
            DiffStat::parse(&String::from_utf8_lossy(&self.query(ctx, DIFF_STAT_ARGS)?))?;
        let stashed = count_lines(&self.query(ctx, STASH_LIST_ARGS)?);
        let (git_dir, head_commit) = self.identity(ctx)?;

        Ok(Snapshot::new(
            porcelain,
            Details {
                stashed,
                head_commit,
                operation_state: OperationState::from_git_dir(&git_dir),
                insertions: diff_stat.insertions,
                deletions: diff_stat.deletions,
            },
        ))
    }

    fn query(&self, ctx: &Context, args: &[&str]) -> Res<Vec<u8>> {
        ctx.check()?;
        self.runner.run(ctx, args)
    }

    /// Metadata directory and short hash of HEAD.
    fn identity(&self, ctx: &Context) -> Res<(PathBuf, String)> {
        let output = lines(&self.query(ctx, IDENTITY_ARGS)?);

        let [git_dir, head] = output.as_slice() else {
            return Err(Error::UnexpectedOutput {
                command: format!("git {}", IDENTITY_ARGS.join(" ")),
                reason: format!("expected 2 lines, got {}", output.len()),
            });
        };

        let git_dir = PathBuf::from(git_dir.trim());
        let git_dir = if git_dir.is_relative() {
            self.runner.dir().join(git_dir)
        } else {
            git_dir
        };

        Ok((git_dir, head.trim().to_string()))
    }
}
