use crate::{Res, error::Error};

/// Line totals from `git diff --shortstat`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct DiffStat {
    pub insertions: u32,
    pub deletions: u32,
}

impl DiffStat {
    /// Parses `N file(s) changed[, N insertion(s)(+)][, N deletion(s)(-)]`.
    ///
    /// Empty output is an empty diff. Segments that mention neither
    /// insertions nor deletions are ignored.
    pub(crate) fn parse(output: &str) -> Res<Self> {
        let mut stat = DiffStat::default();

        for segment in output.split(',').map(str::trim) {
            if let Some(pos) = segment.find("insertion") {
                stat.insertions = leading_count(segment, pos)?;
            } else if let Some(pos) = segment.find("deletion") {
                stat.deletions = leading_count(segment, pos)?;
            }
        }

        Ok(stat)
    }
}

fn leading_count(segment: &str, pos: usize) -> Res<u32> {
    segment[..pos]
        .trim()
        .parse()
        .map_err(|_| Error::MalformedDiffStat(segment.to_string()))
}
