use crate::{
    Res,
    git::{parse::nul_records, status::Porcelain},
};

mod header;
pub(crate) mod v2;

pub(crate) use header::parse_header;

/// How a file record's two-letter status code is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Effect {
    Conflicted,
    /// Changes both in the index and in the working tree.
    ModifiedAndStaged,
    Modified,
    Untracked,
    Staged,
}

#[derive(Debug, Clone, Copy)]
enum Code {
    Any,
    Is(u8),
}

impl Code {
    fn matches(self, code: u8) -> bool {
        match self {
            Code::Any => true,
            Code::Is(expected) => expected == code,
        }
    }
}

use Code::{Any, Is};

/// Ordered (index, worktree) → effect table, the first matching row wins.
const CLASSIFICATION: &[(Code, Code, Effect)] = &[
    (Is(b'U'), Any, Effect::Conflicted),
    (Any, Is(b'U'), Effect::Conflicted),
    (Is(b'A'), Is(b'A'), Effect::Conflicted),
    (Is(b'A'), Is(b'M'), Effect::ModifiedAndStaged),
    (Is(b'M'), Is(b'M'), Effect::ModifiedAndStaged),
    (Is(b'M'), Is(b'D'), Effect::ModifiedAndStaged),
    (Is(b'R'), Is(b'M'), Effect::ModifiedAndStaged),
    (Is(b'R'), Is(b'D'), Effect::ModifiedAndStaged),
    (Is(b'A'), Is(b'T'), Effect::ModifiedAndStaged),
    (Any, Is(b'M'), Effect::Modified),
    (Any, Is(b'D'), Effect::Modified),
    (Is(b'?'), Is(b'?'), Effect::Untracked),
    (Any, Any, Effect::Staged),
];

pub(crate) fn classify(index: u8, worktree: u8) -> Effect {
    CLASSIFICATION
        .iter()
        .find(|(x, y, _)| x.matches(index) && y.matches(worktree))
        .map(|&(_, _, effect)| effect)
        .unwrap_or(Effect::Staged)
}

impl Porcelain {
    pub(crate) fn count(&mut self, effect: Effect) {
        match effect {
            Effect::Conflicted => self.conflicted += 1,
            Effect::ModifiedAndStaged => {
                self.modified += 1;
                self.staged += 1;
            }
            Effect::Modified => self.modified += 1,
            Effect::Untracked => self.untracked += 1,
            Effect::Staged => self.staged += 1,
        }
    }
}

const HEADER_MARKER: &[u8] = b"##";
const STATUS_CODES: &[u8] = b" MADRCUT?!";

/// `git status --porcelain=v1 --branch -z`
pub(crate) struct V1;

impl super::PorcelainFormat for V1 {
    fn status_args(&self) -> &'static [&'static str] {
        &["status", "--porcelain=v1", "--branch", "-z"]
    }

    fn parse(&self, output: &[u8]) -> Res<Porcelain> {
        let mut porcelain = Porcelain::default();

        let mut records = nul_records(output)?.into_iter();

        while let Some(record) = records.next() {
            if !is_v1_record(record) {
                log::warn!(
                    "Skipping unexpected status record {:?}",
                    String::from_utf8_lossy(record)
                );
                continue;
            }

            if &record[..2] == HEADER_MARKER {
                parse_header(&String::from_utf8_lossy(record), &mut porcelain)?;
            } else {
                porcelain.count(classify(record[0], record[1]));
                if has_origin_path(record) {
                    // Path the file was renamed or copied from
                    records.next();
                }
            }
        }

        Ok(porcelain)
    }
}

fn is_v1_record(record: &[u8]) -> bool {
    match record {
        [b'#', b'#', b' ', ..] => true,
        [x, y, b' ', ..] => STATUS_CODES.contains(x) && STATUS_CODES.contains(y),
        _ => false,
    }
}

/// Renames and copies are followed by a record holding the origin path.
fn has_origin_path(record: &[u8]) -> bool {
    record[..2].iter().any(|code| matches!(code, b'R' | b'C'))
}
