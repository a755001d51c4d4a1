use crate::{Res, error::Error, git::status::Snapshot};

mod tmux;

pub use tmux::Tmux;

/// Renders a [`Snapshot`] for a consumer.
pub trait Formatter {
    fn format(&self, snapshot: &Snapshot) -> Res<String>;
}

/// Pretty printed JSON with camelCase keys.
pub struct Json;

impl Formatter for Json {
    fn format(&self, snapshot: &Snapshot) -> Res<String> {
        serde_json::to_string_pretty(snapshot).map_err(Error::Serialize)
    }
}
