use std::path::Path;

pub const SAVE_EXTENSION: &str = "csav";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropDecision {
    Accept,
    Reject,
}

impl DropDecision {
    pub fn is_accept(self) -> bool {
        matches!(self, DropDecision::Accept)
    }
}

/// Decides whether a drop may land on a slot.
///
/// Exactly one path is accepted, and only when it names an existing file
/// whose extension is `csav` (compared case-sensitively). Directories never
/// count as existing saves.
pub fn validate<P>(dropped: &[P]) -> DropDecision
where
    P: AsRef<Path>,
{
    let [path] = dropped else {
        tracing::debug!(count = dropped.len(), "rejecting multi-path drop");
        return DropDecision::Reject;
    };
    let path = path.as_ref();

    if !path.is_file() {
        tracing::debug!(path = %path.display(), "rejecting drop of missing path");
        return DropDecision::Reject;
    }

    if !has_save_extension(path) {
        tracing::debug!(path = %path.display(), "rejecting drop with wrong extension");
        return DropDecision::Reject;
    }

    DropDecision::Accept
}

pub fn has_save_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == SAVE_EXTENSION)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn empty_and_multi_drops_are_rejected() {
        let dir = tempdir().expect("temp dir");
        let a = dir.path().join("a.csav");
        let b = dir.path().join("b.csav");
        fs::write(&a, b"a").expect("write a");
        fs::write(&b, b"b").expect("write b");

        let none: [PathBuf; 0] = [];
        assert_eq!(validate(&none), DropDecision::Reject);
        assert_eq!(validate(&[a, b]), DropDecision::Reject);
    }

    #[test]
    fn missing_path_is_rejected() {
        let dir = tempdir().expect("temp dir");
        let missing = dir.path().join("gone.csav");
        assert_eq!(validate(&[missing]), DropDecision::Reject);
    }

    #[test]
    fn directory_named_like_a_save_is_rejected() {
        let dir = tempdir().expect("temp dir");
        let folder = dir.path().join("folder.csav");
        fs::create_dir(&folder).expect("create dir");
        assert_eq!(validate(&[folder]), DropDecision::Reject);
    }

    #[test]
    fn wrong_extension_is_rejected() {
        let dir = tempdir().expect("temp dir");
        let txt = dir.path().join("notes.txt");
        let upper = dir.path().join("SAVE.CSAV");
        let bare = dir.path().join("csav");
        fs::write(&txt, b"x").expect("write txt");
        fs::write(&upper, b"x").expect("write upper");
        fs::write(&bare, b"x").expect("write bare");

        assert_eq!(validate(&[txt]), DropDecision::Reject);
        assert_eq!(validate(&[upper]), DropDecision::Reject);
        assert_eq!(validate(&[bare]), DropDecision::Reject);
    }

    #[test]
    fn existing_save_is_accepted() {
        let dir = tempdir().expect("temp dir");
        let save = dir.path().join("with space.csav");
        fs::write(&save, b"save").expect("write save");
        assert!(validate(&[save]).is_accept());
    }
}
