use std::path::Path;

use git2::{ErrorCode, Oid, Repository};

/// Commit currently checked out at `repo_root`, or `None` for an unborn branch.
pub fn head_commit(repo_root: &Path) -> Result<Option<Oid>, git2::Error> {
    let repo = Repository::open(repo_root)?;
    let head = match repo.head() {
        Ok(head) => head,
        Err(err) if matches!(err.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    Ok(Some(head.peel_to_commit()?.id()))
}

pub fn short_id(oid: Oid) -> String {
    let mut id = oid.to_string();
    id.truncate(7);
    id
}
