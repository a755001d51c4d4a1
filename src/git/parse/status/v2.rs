use crate::{
    Res,
    error::Error,
    git::{
        parse::{PorcelainFormat, nul_records},
        status::Porcelain,
    },
};

use super::{Effect, classify};

/// `git status --porcelain=v2 --branch -z`
///
/// Headers are `# <key> <value>` records, file entries start with a one
/// character kind: `1` ordinary, `2` renamed or copied, `u` unmerged,
/// `?` untracked and `!` ignored.
pub(crate) struct V2;

impl PorcelainFormat for V2 {
    fn status_args(&self) -> &'static [&'static str] {
        &["status", "--porcelain=v2", "--branch", "-z"]
    }

    fn parse(&self, output: &[u8]) -> Res<Porcelain> {
        let mut porcelain = Porcelain::default();
        let mut records = nul_records(output)?.into_iter();

        while let Some(record) = records.next() {
            match record {
                [b'#', b' ', header @ ..] => {
                    parse_header(&String::from_utf8_lossy(header), &mut porcelain)?
                }
                [b'1', b' ', x, y, b' ', ..] => porcelain.count(classify(code(*x), code(*y))),
                [b'2', b' ', x, y, b' ', ..] => {
                    porcelain.count(classify(code(*x), code(*y)));
                    // Origin path of the rename or copy
                    records.next();
                }
                [b'u', b' ', ..] => porcelain.count(Effect::Conflicted),
                [b'?', b' ', ..] => porcelain.count(Effect::Untracked),
                [b'!', b' ', ..] => (),
                _ => log::warn!(
                    "Skipping unexpected status record {:?}",
                    String::from_utf8_lossy(record)
                ),
            }
        }

        Ok(porcelain)
    }
}

/// v2 uses `.` for an unmodified side where v1 uses a space.
fn code(c: u8) -> u8 {
    if c == b'.' { b' ' } else { c }
}

fn parse_header(header: &str, porcelain: &mut Porcelain) -> Res<()> {
    let (key, value) = header.split_once(' ').unwrap_or((header, ""));

    match key {
        "branch.oid" => porcelain.is_initial = value == "(initial)",
        "branch.head" if value == "(detached)" => {
            porcelain.is_detached = true;
            porcelain.local_branch.clear();
        }
        "branch.head" if value.is_empty() => {
            return Err(Error::MalformedHeader(format!("# {}", header)));
        }
        "branch.head" => porcelain.local_branch = value.to_string(),
        "branch.upstream" if value.is_empty() => {
            return Err(Error::MalformedHeader(format!("# {}", header)));
        }
        "branch.upstream" => porcelain.remote_branch = value.to_string(),
        "branch.ab" => {
            let (ahead, behind) =
                parse_ab(value).ok_or_else(|| Error::AheadBehindParse(value.to_string()))?;
            porcelain.ahead_count = ahead;
            porcelain.behind_count = behind;
        }
        _ => log::debug!("Ignoring status header {:?}", header),
    }

    Ok(())
}

/// `+<ahead> -<behind>`
fn parse_ab(value: &str) -> Option<(u32, u32)> {
    let (ahead, behind) = value.split_once(' ')?;
    Some((
        ahead.strip_prefix('+')?.parse().ok()?,
        behind.strip_prefix('-')?.parse().ok()?,
    ))
}
