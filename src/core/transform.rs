use crate::domain::model::{FetchResult, PostStats, ProjectionOutcome, ProjectionResult};
use crate::utils::error::EtlError;
use serde_json::Value;

/// Projects every post of a fetched document into its reaction and view counts.
///
/// Fetch errors pass through untouched. A document without a `posts` array is
/// an [`EtlError::InvalidShape`], an empty array is [`ProjectionOutcome::Empty`].
pub fn project(result: FetchResult) -> ProjectionResult {
    let document = result?;

    let posts = document
        .get("posts")
        .ok_or_else(|| EtlError::invalid_shape("missing `posts` field"))?
        .as_array()
        .ok_or_else(|| EtlError::invalid_shape("`posts` is not an array"))?;

    if posts.is_empty() {
        return Ok(ProjectionOutcome::Empty);
    }

    Ok(ProjectionOutcome::Posts(posts.iter().map(post_stats).collect()))
}

/// Absent or non-numeric counts become 0 so the record is never dropped.
pub fn post_stats(post: &Value) -> PostStats {
    let reactions = post.get("reactions");

    PostStats {
        likes: count(reactions.and_then(|r| r.get("likes"))),
        dislikes: count(reactions.and_then(|r| r.get("dislikes"))),
        views: count(post.get("views")),
    }
}

fn count(value: Option<&Value>) -> i64 {
    value
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
        .unwrap_or(0)
}
