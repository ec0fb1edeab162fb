use crate::utils::error::{EtlError, Result};
use serde::{Deserialize, Serialize};

/// The untouched JSON body returned by the posts endpoint.
pub type RawDocument = serde_json::Value;

pub type FetchResult = std::result::Result<RawDocument, EtlError>;

/// Reaction and view counts of a single post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostStats {
    pub likes: i64,
    pub dislikes: i64,
    pub views: i64,
}

impl PostStats {
    pub fn new(likes: i64, dislikes: i64, views: i64) -> Self {
        Self {
            likes,
            dislikes,
            views,
        }
    }
}

/// Per-post stats, index-aligned with the source `posts` array.
pub type Projection = Vec<PostStats>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionOutcome {
    Posts(Projection),
    /// The request succeeded but the user has no posts.
    Empty,
}

impl ProjectionOutcome {
    pub fn len(&self) -> usize {
        match self {
            ProjectionOutcome::Posts(posts) => posts.len(),
            ProjectionOutcome::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub type ProjectionResult = Result<ProjectionOutcome>;

/// Column-oriented form of a projection, the document stored per user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnarStats {
    #[serde(rename = "Likes")]
    pub likes: Vec<i64>,
    #[serde(rename = "Dislikes")]
    pub dislikes: Vec<i64>,
    #[serde(rename = "Views")]
    pub views: Vec<i64>,
}

impl From<&[PostStats]> for ColumnarStats {
    fn from(stats: &[PostStats]) -> Self {
        let mut columns = ColumnarStats {
            likes: Vec::with_capacity(stats.len()),
            dislikes: Vec::with_capacity(stats.len()),
            views: Vec::with_capacity(stats.len()),
        };
        for post in stats {
            columns.likes.push(post.likes);
            columns.dislikes.push(post.dislikes);
            columns.views.push(post.views);
        }
        columns
    }
}

/// Summary of one engine run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub user_id: String,
    pub posts: usize,
    pub outputs: Vec<String>,
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

impl RunReport {
    pub fn has_data(&self) -> bool {
        self.posts > 0
    }
}
