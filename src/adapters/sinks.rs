use crate::domain::model::{ColumnarStats, PostStats, ProjectionOutcome, ProjectionResult};
use crate::domain::ports::{Sink, Storage};
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;

/// Object key of the stored JSON document for one user.
pub fn json_object_key(user_id: &str) -> String {
    format!("{}_posts_data.json", user_id)
}

pub fn csv_object_key(user_id: &str) -> String {
    format!("{}_reactions.csv", user_id)
}

const TABLE_HEADER: &str = " Post    Likes  Dislikes    Views";

pub fn no_data_message(user_id: &str) -> String {
    format!("No data found for user {}", user_id)
}

/// Renders a projection result as plain text for a terminal.
pub fn render_console(user_id: &str, result: &ProjectionResult) -> String {
    match result {
        Ok(ProjectionOutcome::Posts(posts)) => {
            let mut lines = vec![
                format!("Reactions for user {} ({} posts)", user_id, posts.len()),
                TABLE_HEADER.to_string(),
            ];
            for (index, post) in posts.iter().enumerate() {
                lines.push(format!(
                    "{:>5} {:>8} {:>9} {:>8}",
                    index + 1,
                    post.likes,
                    post.dislikes,
                    post.views
                ));
            }
            lines.join("\n")
        }
        Ok(ProjectionOutcome::Empty) => no_data_message(user_id),
        Err(e @ EtlError::InvalidShape { .. }) => format!("Error: unexpected response: {}", e),
        Err(e) => format!("Error: {}", e),
    }
}

/// Serializes a projection as `likes,dislikes,views` rows with a header.
pub fn render_csv(posts: &[PostStats]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for post in posts {
        writer.serialize(post)?;
    }
    writer.into_inner().map_err(|e| EtlError::IoError(e.into_error()))
}

pub fn render_json(posts: &[PostStats]) -> Result<Vec<u8>> {
    let document = ColumnarStats::from(posts);
    Ok(serde_json::to_vec(&document)?)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

#[async_trait]
impl Sink for ConsoleSink {
    fn name(&self) -> &'static str {
        "console"
    }

    async fn emit(&self, user_id: &str, result: &ProjectionResult) -> Result<Option<String>> {
        println!("{}", render_console(user_id, result));
        Ok(None)
    }
}

/// Writes the columnar JSON document to storage.
pub struct JsonSink<S: Storage> {
    storage: S,
}

impl<S: Storage> JsonSink<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S: Storage> Sink for JsonSink<S> {
    fn name(&self) -> &'static str {
        "json"
    }

    async fn emit(&self, user_id: &str, result: &ProjectionResult) -> Result<Option<String>> {
        let Ok(ProjectionOutcome::Posts(posts)) = result else {
            tracing::debug!("Skipping JSON output for user {}: nothing to store", user_id);
            return Ok(None);
        };

        let key = json_object_key(user_id);
        let data = render_json(posts)?;
        tracing::debug!("Writing {} bytes to {}", data.len(), key);
        self.storage.write_file(&key, &data).await?;
        Ok(Some(key))
    }
}

/// Writes one CSV row per post, the series a reactions chart would plot.
pub struct CsvSink<S: Storage> {
    storage: S,
}

impl<S: Storage> CsvSink<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S: Storage> Sink for CsvSink<S> {
    fn name(&self) -> &'static str {
        "csv"
    }

    async fn emit(&self, user_id: &str, result: &ProjectionResult) -> Result<Option<String>> {
        let Ok(ProjectionOutcome::Posts(posts)) = result else {
            tracing::debug!("Skipping CSV output for user {}: nothing to store", user_id);
            return Ok(None);
        };

        let key = csv_object_key(user_id);
        let data = render_csv(posts)?;
        self.storage.write_file(&key, &data).await?;
        Ok(Some(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }

        async fn file_count(&self) -> usize {
            self.files.lock().await.len()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn two_posts() -> ProjectionResult {
        Ok(ProjectionOutcome::Posts(vec![PostStats::new(1, 2, 3), PostStats::new(4, 5, 6)]))
    }

    #[test]
    fn test_render_console_table() {
        let output = render_console("5", &two_posts());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Reactions for user 5 (2 posts)");
        let header: Vec<&str> = lines[1].split_whitespace().collect();
        assert_eq!(header, ["Post", "Likes", "Dislikes", "Views"]);
        assert_eq!(lines[1].len(), lines[2].len());
        assert_eq!(lines.len(), 4);
        assert!(lines[2].trim_start().starts_with("1 "));
        assert!(lines[3].ends_with('6'));
    }

    #[test]
    fn test_render_console_distinguishes_outcomes() {
        let empty = render_console("5", &Ok(ProjectionOutcome::Empty));
        let shape = render_console(
            "5",
            &Err(EtlError::invalid_shape("missing `posts` field")),
        );
        let transport = render_console("5", &Err(EtlError::transport("timed out")));

        assert_eq!(empty, "No data found for user 5");
        assert!(shape.starts_with("Error: unexpected response"));
        assert_eq!(transport, "Error: Error fetching data: timed out");
    }

    #[test]
    fn test_render_csv_rows_in_order() {
        let csv = render_csv(&[PostStats::new(1, 2, 3), PostStats::new(4, 5, 6)]).unwrap();
        assert_eq!(
            String::from_utf8(csv).unwrap(),
            "likes,dislikes,views\n1,2,3\n4,5,6\n"
        );
    }

    #[tokio::test]
    async fn test_json_sink_writes_columnar_document() {
        let storage = MockStorage::new();
        let sink = JsonSink::new(storage.clone());

        let location = sink.emit("5", &two_posts()).await.unwrap();
        assert_eq!(location.as_deref(), Some("5_posts_data.json"));

        let data = storage.get_file("5_posts_data.json").await.unwrap();
        let document: ColumnarStats = serde_json::from_slice(&data).unwrap();
        assert_eq!(document.likes, vec![1, 4]);
        assert_eq!(document.views, vec![3, 6]);
    }

    #[tokio::test]
    async fn test_file_sinks_skip_empty_and_errors() {
        let storage = MockStorage::new();
        let json = JsonSink::new(storage.clone());
        let csv = CsvSink::new(storage.clone());

        for result in [
            Ok(ProjectionOutcome::Empty),
            Err(EtlError::transport("boom")),
        ] {
            assert_eq!(json.emit("5", &result).await.unwrap(), None);
            assert_eq!(csv.emit("5", &result).await.unwrap(), None);
        }

        assert_eq!(storage.file_count().await, 0);
    }

    #[tokio::test]
    async fn test_csv_sink_writes_table() {
        let storage = MockStorage::new();
        let sink = CsvSink::new(storage.clone());

        let location = sink.emit("9", &two_posts()).await.unwrap();
        assert_eq!(location.as_deref(), Some("9_reactions.csv"));
        assert!(storage.get_file("9_reactions.csv").await.is_some());
    }
}
