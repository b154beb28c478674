/// Literal part of a backup branch suffix.
const BACKUP_SUFFIX: &str = "-backup";

/// Return the parent of a backup branch name.
///
/// `feature-backup` and `feature-backup12` both name `feature`. Exactly one
/// suffix is stripped, so `feature-backup-backup` names `feature-backup`.
/// Returns `None` when `name` is not a backup name or the parent would be empty.
pub fn backup_parent(name: &str) -> Option<&str> {
    let stem = name.trim_end_matches(|c: char| c.is_ascii_digit());
    let parent = stem.strip_suffix(BACKUP_SUFFIX)?;
    (!parent.is_empty()).then_some(parent)
}
