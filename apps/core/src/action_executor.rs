use serde::{Deserialize, Serialize};

use crate::model::{ResultKind, SearchResult};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LaunchError {
    #[error("empty launch target")]
    EmptyTarget,
    #[error("result kind {0:?} cannot be launched by the core")]
    Unsupported(ResultKind),
}

/// What the host should do with a chosen result. Plain data so it can be
/// sent to whichever process owns the platform shell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", content = "target", rename_all = "snake_case")]
pub enum LaunchPlan {
    /// A URI scheme target such as `ms-settings:`.
    OpenUri(String),
    /// Shortcuts, documents and folders go through the shell's default opener.
    OpenPath(String),
    /// A bare executable name or path.
    Spawn(String),
    CopyText(String),
}

pub fn plan_launch(result: &SearchResult) -> Result<LaunchPlan, LaunchError> {
    if result.kind == ResultKind::Clipboard {
        if result.path.is_empty() {
            return Err(LaunchError::EmptyTarget);
        }
        return Ok(LaunchPlan::CopyText(result.path.clone()));
    }

    let target = result.path.trim();
    if target.is_empty() {
        return Err(LaunchError::EmptyTarget);
    }

    match result.kind {
        ResultKind::App if is_uri(target) => Ok(LaunchPlan::OpenUri(target.to_string())),
        ResultKind::App if is_shortcut(target) => Ok(LaunchPlan::OpenPath(target.to_string())),
        ResultKind::App => Ok(LaunchPlan::Spawn(target.to_string())),
        ResultKind::File => Ok(LaunchPlan::OpenPath(target.to_string())),
        kind => Err(LaunchError::Unsupported(kind)),
    }
}

// `C:\...` is a drive letter, not a scheme.
fn is_uri(target: &str) -> bool {
    let Some((scheme, _)) = target.split_once(':') else {
        return false;
    };
    scheme.len() > 1
        && scheme
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn is_shortcut(target: &str) -> bool {
    target
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("lnk") || ext.eq_ignore_ascii_case("desktop"))
}
