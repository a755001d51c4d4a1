use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::u32 as count,
    combinator::{all_consuming, map},
    sequence::{preceded, separated_pair},
};

use crate::{Res, error::Error, git::status::Porcelain};

const DETACHED: &str = "## HEAD (no branch)";
const INITIAL_PREFIXES: [&str; 2] = ["## No commits yet on ", "## Initial commit on "];
const BRANCH_PREFIX: &str = "## ";
const UPSTREAM_SEPARATOR: &str = "...";
const GONE: &str = "gone";
/// Marker, separating space and a one character branch name.
const MIN_HEADER_LEN: usize = 4;

/// Parses the `## ...` branch header of `git status --porcelain=v1 --branch`.
pub(crate) fn parse_header(line: &str, porcelain: &mut Porcelain) -> Res<()> {
    if line == DETACHED {
        porcelain.is_detached = true;
        return Ok(());
    }

    if let Some(branch) = INITIAL_PREFIXES
        .iter()
        .find_map(|prefix| line.strip_prefix(prefix))
    {
        porcelain.is_initial = true;
        porcelain.local_branch = branch.to_string();
        return Ok(());
    }

    if line.len() < MIN_HEADER_LEN {
        return Err(Error::malformed_header(line));
    }

    let rest = line
        .strip_prefix(BRANCH_PREFIX)
        .ok_or_else(|| Error::malformed_header(line))?;

    match rest.split_once(UPSTREAM_SEPARATOR) {
        None => {
            if rest.contains(' ') {
                return Err(Error::malformed_header(line));
            }
            porcelain.local_branch = rest.to_string();
        }
        Some((local, upstream)) => {
            if local.is_empty() || local.contains(' ') {
                return Err(Error::malformed_header(line));
            }
            porcelain.local_branch = local.to_string();
            parse_upstream(line, upstream, porcelain)?;
        }
    }

    Ok(())
}

/// Parses `<remote>[ [<divergence>]]`.
fn parse_upstream(line: &str, upstream: &str, porcelain: &mut Porcelain) -> Res<()> {
    let (remote, annotation) = match upstream.split_once(' ') {
        Some((remote, annotation)) => (remote, Some(annotation)),
        None => (upstream, None),
    };

    if remote.is_empty() {
        return Err(Error::malformed_header(line));
    }
    porcelain.remote_branch = remote.to_string();

    let Some(annotation) = annotation else {
        return Ok(());
    };

    let inner = annotation
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| Error::malformed_header(line))?;

    if inner == GONE {
        porcelain.is_upstream_gone = true;
        return Ok(());
    }

    if !inner.starts_with("ahead") && !inner.starts_with("behind") {
        return Err(Error::malformed_header(line));
    }

    let (_, (ahead, behind)) = all_consuming(divergence)
        .parse(inner)
        .map_err(|_| Error::AheadBehindParse(inner.to_string()))?;

    porcelain.ahead_count = ahead;
    porcelain.behind_count = behind;
    Ok(())
}

/// `ahead N`, `behind N` or `ahead N, behind M`.
fn divergence(input: &str) -> IResult<&str, (u32, u32)> {
    alt((
        separated_pair(
            preceded(tag("ahead "), count),
            tag(", "),
            preceded(tag("behind "), count),
        ),
        map(preceded(tag("ahead "), count), |ahead| (ahead, 0)),
        map(preceded(tag("behind "), count), |behind| (0, behind)),
    ))
    .parse(input)
}
