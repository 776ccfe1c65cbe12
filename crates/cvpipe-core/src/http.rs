//! HTTP plumbing: shared client, shared runtime, sync facade
//!
//! Uses async reqwest internally but presents a blocking interface so
//! the rayon worker pool can drive network calls directly. Stall
//! detection wraps each body read in a timeout rather than bounding the
//! whole transfer, so large slow downloads are not cut off.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use futures_util::StreamExt;

use crate::error::UnitError;

/// Connect timeout applied to every request
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared async HTTP client with connection pooling.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .pool_max_idle_per_host(8)
        .build()
        .expect("failed to build HTTP client")
});

/// Shared tokio runtime backing the sync facade.
static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// Get the shared HTTP client.
pub fn http_client() -> &'static reqwest::Client {
    &SHARED_CLIENT
}

/// GET `url` and stream the body to `path`, returning bytes written.
///
/// `timeout` bounds the wait for the response headers and each
/// subsequent body chunk (stall detection), not the total transfer.
/// The destination is overwritten silently; the identity-derived path
/// scheme makes collisions across units impossible by construction.
pub fn get_to_file(url: &str, path: &Path, timeout: Duration) -> Result<u64, UnitError> {
    let handle = SHARED_RUNTIME.handle();

    let response = handle.block_on(async {
        let send = SHARED_CLIENT.get(url).send();
        match tokio::time::timeout(timeout, send).await {
            Ok(result) => result
                .and_then(|r| r.error_for_status())
                .map_err(|e| UnitError::from_reqwest(&e)),
            Err(_) => Err(timeout_error(timeout)),
        }
    })?;

    let mut stream = Box::pin(response.bytes_stream());
    let mut file = File::create(path)?;
    let mut written = 0u64;

    loop {
        let next = handle.block_on(async {
            match tokio::time::timeout(timeout, stream.next()).await {
                Ok(chunk) => Ok(chunk),
                Err(_) => Err(timeout_error(timeout)),
            }
        })?;
        match next {
            Some(chunk) => {
                let bytes = chunk.map_err(|e| UnitError::from_reqwest(&e))?;
                file.write_all(&bytes)?;
                written += bytes.len() as u64;
            }
            None => break,
        }
    }

    file.flush()?;
    Ok(written)
}

/// POST a JSON body and parse the JSON response.
///
/// `bearer` attaches an `Authorization: Bearer` header for the hosted
/// backend; the local backend passes `None`.
pub fn post_json(
    url: &str,
    body: &serde_json::Value,
    bearer: Option<&str>,
    timeout: Duration,
) -> Result<serde_json::Value, UnitError> {
    SHARED_RUNTIME.handle().block_on(async {
        let mut request = SHARED_CLIENT.post(url).json(body).timeout(timeout);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| UnitError::from_reqwest(&e))?;
        response
            .json()
            .await
            .map_err(|e| UnitError::from_reqwest(&e))
    })
}

fn timeout_error(timeout: Duration) -> UnitError {
    UnitError::Network {
        status: None,
        message: format!("no data within {}s", timeout.as_secs()),
    }
}
