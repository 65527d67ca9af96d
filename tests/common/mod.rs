/*!
 * Common test utilities for the leengua test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use leengua::translation::{CancellationFlag, EventSink, JobEvent, JobOutcome, TranslationJob, TranslationOrchestrator};
use leengua::Translator;

/// Short English text used across tests
pub const SAMPLE_TEXT: &str = "The cat sat on the mat. It was happy! Was the dog there?";

/// Route library logs through env_logger, honoring RUST_LOG
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// `count` numbered sentences separated by spaces
pub fn numbered_sentences(count: usize) -> String {
    (1..=count)
        .map(|i| format!("Sentence number {}.", i))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Number of sentence pair blocks in rendered output
pub fn count_pairs(html: &str) -> usize {
    html.matches("<div class=\"sentence-pair").count()
}

/// Run a job to its end and collect every event it emitted
pub async fn run_collecting(
    orchestrator: &TranslationOrchestrator,
    job: &TranslationJob,
    translator: &dyn Translator,
) -> (JobOutcome, Vec<JobEvent>) {
    let cancel = CancellationFlag::new();
    let (sink, mut receiver) = EventSink::channel(cancel.clone());
    let outcome = orchestrator.run(job, translator, &sink, &cancel).await;
    drop(sink);

    let mut events = Vec::new();
    while let Some(event) = receiver.recv().await {
        events.push(event);
    }
    (outcome, events)
}

/// Serve canned HTTP responses on a local port, one per connection
///
/// Returns the endpoint URL and a handle yielding the request bodies received.
pub async fn serve_responses(
    responses: Vec<(u16, String)>,
) -> Result<(String, tokio::task::JoinHandle<Vec<String>>)> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let url = format!("http://{}/translate", listener.local_addr()?);

    let handle = tokio::spawn(async move {
        let mut bodies = Vec::new();
        for (status, body) in responses {
            let Ok((mut socket, _)) = listener.accept().await else { break };

            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap_or(0);
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + content_length {
                        bodies.push(text[header_end + 4..].to_string());
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
        bodies
    });

    Ok((url, handle))
}
