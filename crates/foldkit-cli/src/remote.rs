use crate::error::{CliError, Result};
use foldkit::core::io::pdb::PdbFile;
use foldkit::core::io::traits::StructureFile;
use foldkit::core::models::sequence::Sequence;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

pub const PREDICT_URL_ENV: &str = "FOLDKIT_PREDICT_URL";
pub const PREDICT_TOKEN_ENV: &str = "FOLDKIT_PREDICT_TOKEN";

const RCSB_DOWNLOAD_URL: &str = "https://files.rcsb.org/download/";

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    sequence: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

/// Single request/response HTTP client for structure downloads and remote predictions.
#[derive(Debug)]
pub struct RemoteClient {
    client: reqwest::Client,
    download_url: String,
    predict_url: Option<String>,
    token: Option<String>,
}

impl RemoteClient {
    /// Reads the prediction endpoint and token from the environment.
    pub fn from_env(timeout: Duration) -> Result<Self> {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self::new(timeout, non_empty(PREDICT_URL_ENV), non_empty(PREDICT_TOKEN_ENV))
    }

    pub fn new(timeout: Duration, predict_url: Option<String>, token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("foldkit/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            download_url: RCSB_DOWNLOAD_URL.to_string(),
            predict_url,
            token,
        })
    }

    /// Downloads the PDB text of an existing entry and returns it unchanged.
    pub async fn fetch_entry(&self, id: &str) -> Result<String> {
        let url = entry_url(&self.download_url, id);
        info!("Sending request to {}", url);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!(bytes = body.len(), "Received structure entry");
        Ok(body)
    }

    /// Posts `sequence` to the prediction endpoint and returns the structure text from its
    /// `pdb` field, after checking that it parses and contains atoms.
    pub async fn predict(&self, sequence: &Sequence, seed: Option<u64>) -> Result<String> {
        let url = self.predict_url.as_deref().ok_or_else(|| {
            CliError::Config(format!(
                "No prediction endpoint configured. Set {} to the service URL.",
                PREDICT_URL_ENV
            ))
        })?;

        let body = PredictRequest {
            sequence: sequence.as_str(),
            seed,
        };
        let mut request = self.client.post(url).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        info!("Requesting prediction for {} residues from {}", sequence.len(), url);
        let response = request.send().await?.error_for_status()?;
        let payload: Value = response
            .json()
            .await
            .map_err(|e| CliError::Remote(format!("Response is not valid JSON: {}", e)))?;

        let pdb = extract_pdb(&payload)?;
        check_structure(&pdb)?;
        Ok(pdb)
    }
}

fn entry_url(base: &str, id: &str) -> String {
    format!("{}{}.pdb", base, id.trim().to_uppercase())
}

fn extract_pdb(payload: &Value) -> Result<String> {
    payload
        .get("pdb")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| CliError::Remote("Response is missing the 'pdb' field".to_string()))
}

fn check_structure(pdb: &str) -> Result<()> {
    let (model, _) = PdbFile::read_from_str(pdb)
        .map_err(|e| CliError::Remote(format!("Returned structure is unreadable: {}", e)))?;
    debug!(atoms = model.len(), "Returned structure parsed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    const MINIMAL_PDB: &str = "HEADER    PREDICTED\nATOM      1  CA  ALA A   1       1.500   0.000   0.000  1.00  0.00           C\nEND\n";

    fn sequence() -> Sequence {
        Sequence::new("ACDEFGHIKL").unwrap()
    }

    /// Reads one HTTP request (headers plus `Content-Length` body) and returns it as text.
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut data = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&chunk[..n]);
            if let Some(end) = data.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&data[..end]).to_ascii_lowercase();
                let body_len = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if data.len() >= end + 4 + body_len {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&data).into_owned()
    }

    /// Serves a single canned response on a local port and hands back the base URL
    /// together with the request it received.
    async fn serve_once(
        status: &'static str,
        body: String,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });
        (format!("http://{}", addr), handle)
    }

    fn client_for(base: &str, token: Option<&str>) -> RemoteClient {
        let mut client = RemoteClient::new(
            Duration::from_secs(5),
            Some(format!("{}/predict", base)),
            token.map(str::to_string),
        )
        .unwrap();
        client.download_url = format!("{}/download/", base);
        client
    }

    #[test]
    fn entry_url_upper_cases_the_identifier() {
        assert_eq!(
            entry_url(RCSB_DOWNLOAD_URL, "1crn"),
            "https://files.rcsb.org/download/1CRN.pdb"
        );
        assert_eq!(
            entry_url(RCSB_DOWNLOAD_URL, " 4hhb "),
            "https://files.rcsb.org/download/4HHB.pdb"
        );
    }

    #[test]
    fn request_body_omits_absent_seed() {
        let seq = sequence();
        let with_seed = serde_json::to_value(PredictRequest {
            sequence: seq.as_str(),
            seed: Some(42),
        })
        .unwrap();
        assert_eq!(with_seed, json!({ "sequence": "ACDEFGHIKL", "seed": 42 }));

        let without_seed = serde_json::to_value(PredictRequest {
            sequence: seq.as_str(),
            seed: None,
        })
        .unwrap();
        assert_eq!(without_seed, json!({ "sequence": "ACDEFGHIKL" }));
    }

    #[test]
    fn pdb_field_is_extracted() {
        let payload = json!({ "pdb": MINIMAL_PDB, "model": "mock" });
        assert_eq!(extract_pdb(&payload).unwrap(), MINIMAL_PDB);
    }

    #[test]
    fn missing_or_non_string_pdb_field_is_a_remote_error() {
        assert!(matches!(
            extract_pdb(&json!({ "structure": "..." })),
            Err(CliError::Remote(_))
        ));
        assert!(matches!(
            extract_pdb(&json!({ "pdb": 12 })),
            Err(CliError::Remote(_))
        ));
    }

    #[test]
    fn payload_without_atoms_is_rejected() {
        assert!(check_structure(MINIMAL_PDB).is_ok());
        assert!(matches!(
            check_structure("HEADER    EMPTY\nEND\n"),
            Err(CliError::Remote(_))
        ));
    }

    #[tokio::test]
    async fn predict_without_endpoint_is_a_config_error() {
        let client = RemoteClient::new(Duration::from_secs(1), None, None).unwrap();
        let result = client.predict(&sequence(), None).await;
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains(PREDICT_URL_ENV)));
    }

    #[tokio::test]
    async fn predict_posts_sequence_and_returns_checked_structure() {
        let (base, server) = serve_once("200 OK", json!({ "pdb": MINIMAL_PDB }).to_string()).await;
        let client = client_for(&base, Some("secret"));

        let pdb = client.predict(&sequence(), Some(7)).await.unwrap();
        assert_eq!(pdb, MINIMAL_PDB);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /predict "));
        assert!(request.to_ascii_lowercase().contains("authorization: bearer secret"));
        assert!(request.ends_with(r#"{"sequence":"ACDEFGHIKL","seed":7}"#));
    }

    #[tokio::test]
    async fn predict_server_error_is_a_network_error() {
        let (base, _server) = serve_once("500 Internal Server Error", "{}".to_string()).await;
        let result = client_for(&base, None).predict(&sequence(), None).await;
        assert!(matches!(result, Err(CliError::Network(e)) if e.status().map(|s| s.as_u16()) == Some(500)));
    }

    #[tokio::test]
    async fn predict_non_json_body_is_a_remote_error() {
        let (base, _server) = serve_once("200 OK", "<html>busy</html>".to_string()).await;
        let result = client_for(&base, None).predict(&sequence(), None).await;
        assert!(matches!(result, Err(CliError::Remote(msg)) if msg.contains("not valid JSON")));
    }

    #[tokio::test]
    async fn predict_payload_without_atoms_is_a_remote_error() {
        let body = json!({ "pdb": "HEADER X\nEND\n" }).to_string();
        let (base, _server) = serve_once("200 OK", body).await;
        let result = client_for(&base, None).predict(&sequence(), None).await;
        assert!(matches!(result, Err(CliError::Remote(msg)) if msg.contains("unreadable")));
    }

    #[tokio::test]
    async fn fetch_entry_returns_body_unchanged() {
        let (base, server) = serve_once("200 OK", MINIMAL_PDB.to_string()).await;
        let body = client_for(&base, None).fetch_entry("1crn").await.unwrap();
        assert_eq!(body, MINIMAL_PDB);
        assert!(server.await.unwrap().starts_with("GET /download/1CRN.pdb "));
    }

    #[tokio::test]
    async fn fetch_entry_not_found_is_a_network_error() {
        let (base, _server) = serve_once("404 Not Found", String::new()).await;
        let result = client_for(&base, None).fetch_entry("9zzz").await;
        assert!(matches!(result, Err(CliError::Network(e)) if e.status().map(|s| s.as_u16()) == Some(404)));
    }
}
