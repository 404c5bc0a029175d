//! `upload` subcommand.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Args;
use serde::{Deserialize, Serialize};
use tpuf_core::Document;
use tpuf_core::emb::Embedding;
use tpuf_vector::{AddOptions, TurbopufferStore};

use super::print_json;
use crate::TRACING_TARGET_COMMAND;

/// Arguments for `upload`.
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// JSON file holding an array of `{id?, vector, document}` records
    #[arg(long, short = 'i')]
    pub input: PathBuf,
}

/// One record of the upload file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadRecord {
    #[serde(default)]
    pub id: Option<u64>,
    pub vector: Embedding,
    pub document: Document,
}

#[derive(Debug, Serialize)]
struct UploadSummary<'a> {
    namespace: &'a str,
    uploaded: usize,
}

impl UploadArgs {
    pub async fn execute(self, store: &TurbopufferStore) -> anyhow::Result<()> {
        let records = read_records(&self.input)?;
        let count = records.len();

        tracing::info!(
            target: TRACING_TARGET_COMMAND,
            input = %self.input.display(),
            namespace = %store.namespace(),
            count,
            "Uploading records"
        );

        let (vectors, documents, options) = split_records(records)?;
        store
            .add_vectors(vectors, &documents, options)
            .await
            .context("failed to upload vectors")?;

        print_json(&UploadSummary {
            namespace: store.namespace(),
            uploaded: count,
        })
    }
}

fn read_records(path: &Path) -> anyhow::Result<Vec<UploadRecord>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse records from {}", path.display()))
}

/// Splits records into the store's parallel inputs.
///
/// Ids must be given for every record or for none.
fn split_records(
    records: Vec<UploadRecord>,
) -> anyhow::Result<(Vec<Embedding>, Vec<Document>, AddOptions)> {
    let with_ids = records.iter().filter(|r| r.id.is_some()).count();
    if with_ids != 0 && with_ids != records.len() {
        bail!(
            "{with_ids} of {} records have an id; give an id for every record or for none",
            records.len()
        );
    }

    let mut ids = Vec::with_capacity(with_ids);
    let mut vectors = Vec::with_capacity(records.len());
    let mut documents = Vec::with_capacity(records.len());

    for record in records {
        ids.extend(record.id);
        vectors.push(record.vector);
        documents.push(record.document);
    }

    let options = if with_ids == 0 {
        AddOptions::default()
    } else {
        AddOptions::default().with_ids(ids)
    };

    Ok((vectors, documents, options))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::*;

    fn record(id: Option<u64>, text: &str) -> UploadRecord {
        UploadRecord {
            id,
            vector: vec![1.0, 2.0],
            document: Document::new(text, format!("{text}.md")),
        }
    }

    #[test]
    fn test_split_without_ids() {
        let (vectors, documents, options) =
            split_records(vec![record(None, "a"), record(None, "b")]).unwrap();

        assert_eq!(vectors.len(), 2);
        assert_eq!(documents[1].page_content(), "b");
        assert_eq!(options, AddOptions::default());
    }

    #[test]
    fn test_split_with_ids() {
        let (_, _, options) = split_records(vec![record(Some(5), "a"), record(Some(9), "b")]).unwrap();
        assert_eq!(options.ids, Some(vec![5, 9]));
    }

    #[test]
    fn test_split_rejects_partial_ids() {
        let err = split_records(vec![record(Some(5), "a"), record(None, "b")]).unwrap_err();
        assert!(err.to_string().contains("1 of 2 records"));
    }

    #[test]
    fn test_read_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let body = json!([
            { "vector": [0.5], "document": { "pageContent": "hi", "metadata": { "source": "a.md" } } }
        ]);
        write!(file, "{body}").unwrap();

        let records = read_records(file.path()).unwrap();
        assert_eq!(records, vec![UploadRecord {
            id: None,
            vector: vec![0.5],
            document: Document::new("hi", "a.md"),
        }]);
    }

    #[test]
    fn test_read_records_missing_file() {
        let err = read_records(Path::new("/nonexistent/records.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
