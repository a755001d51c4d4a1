use serde::Deserialize;

use crate::{Res, error::Error, git::status::Porcelain};

pub(crate) mod diff_stat;
pub(crate) mod status;

/// Porcelain output flavour `git status` is asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FormatVersion {
    #[default]
    V1,
    V2,
}

impl FormatVersion {
    pub(crate) fn parser(self) -> Box<dyn PorcelainFormat> {
        match self {
            FormatVersion::V1 => Box::new(status::V1),
            FormatVersion::V2 => Box::new(status::v2::V2),
        }
    }

    /// Arguments of the status query for this format.
    pub fn status_args(self) -> &'static [&'static str] {
        self.parser().status_args()
    }

    /// Parses the output of [`FormatVersion::status_args`].
    pub fn parse(self, output: &[u8]) -> Res<Porcelain> {
        self.parser().parse(output)
    }
}

/// One way of querying and reading `git status`.
pub(crate) trait PorcelainFormat: Send + Sync {
    fn status_args(&self) -> &'static [&'static str];

    fn parse(&self, output: &[u8]) -> Res<Porcelain>;
}

/// Splits NUL-terminated records.
///
/// Every record, including the last one, must be terminated.
pub(crate) fn nul_records(output: &[u8]) -> Res<Vec<&[u8]>> {
    match output.split_last() {
        None => Ok(vec![]),
        Some((0, body)) => Ok(body.split(|&byte| byte == 0).collect()),
        Some(_) => Err(Error::MalformedRecord),
    }
}

/// Counts lines, a final line without a terminator included.
pub(crate) fn count_lines(output: &[u8]) -> u32 {
    let terminated = output.iter().filter(|&&byte| byte == b'\n').count();
    let trailing = usize::from(output.last().is_some_and(|&byte| byte != b'\n'));
    (terminated + trailing) as u32
}

/// Splits output into lines with their terminators (`\n` or `\r\n`) removed.
pub(crate) fn lines(output: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(output)
        .lines()
        .map(|line| line.to_string())
        .collect()
}
