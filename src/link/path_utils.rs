// src/link/path_utils.rs

//! Lexical path helpers. Nothing here touches the filesystem, so targets that
//! do not exist (yet) normalise the same way as ones that do.

use std::path::{Component, Path, PathBuf};

/// Clean a path without consulting the filesystem.
///
/// - `.` components are dropped.
/// - `..` removes the preceding normal component; at the root it is a no-op,
///   and at the start of a relative path it is kept.
/// - An empty result becomes `.`.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(name) => out.push(name),
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Make `path` absolute against `base` and normalise the result.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}
