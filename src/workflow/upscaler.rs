use crate::error::UpscaleError;
use crate::workflow::types::{AnalysisReport, UpscaleResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The hosted upscale service. One POST per attempt.
pub const UPSCALE_ENDPOINT: &str = "https://raflyrd123-purevision-backend.hf.space/upscale";

/// Model inference plus a 4x re-encode can take a while on shared hardware.
const UPSCALE_TIMEOUT: Duration = Duration::from_secs(180);

#[derive(Serialize)]
struct UpscaleRequest<'a> {
    image_url: &'a str,
    file_name: &'a str,
}

#[derive(Deserialize)]
struct UpscaleResponse {
    #[serde(default)]
    upscaled_url: Option<String>,
    #[serde(default)]
    analysis: Option<AnalysisReport>,
}

/// Asks the service to upscale the image behind `image_url`. The HTTP
/// status is deliberately ignored; the service signals success only through
/// a non-empty `upscaled_url` in the body.
pub async fn request_upscale(
    image_url: &str,
    file_name: &str,
) -> Result<UpscaleResult, UpscaleError> {
    let payload = UpscaleRequest {
        image_url,
        file_name,
    };

    let client = reqwest::Client::new();
    let response = client
        .post(UPSCALE_ENDPOINT)
        .timeout(UPSCALE_TIMEOUT)
        .json(&payload)
        .send()
        .await?;

    let body = response.text().await?;
    parse_upscale_response(&body)
}

fn parse_upscale_response(body: &str) -> Result<UpscaleResult, UpscaleError> {
    let parsed: UpscaleResponse = serde_json::from_str(body)?;
    match parsed.upscaled_url {
        Some(url) if !url.is_empty() => Ok(UpscaleResult {
            upscaled_url: url,
            analysis: parsed.analysis,
        }),
        _ => Err(UpscaleError::MissingResultUrl),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let body = r#"{
            "upscaled_url": "https://cdn.example/upscaled/AI-1700000000000-photo.png",
            "analysis": {"duration": "2.31s", "psnr": "28.40 dB"}
        }"#;
        let result = parse_upscale_response(body).unwrap();
        assert_eq!(
            result.upscaled_url,
            "https://cdn.example/upscaled/AI-1700000000000-photo.png"
        );
        let analysis = result.analysis.unwrap();
        assert_eq!(analysis.duration, "2.31s");
        assert_eq!(analysis.psnr, "28.40 dB");
        assert_eq!(analysis.improvement, None);
    }

    #[test]
    fn test_parse_keeps_improvement_label() {
        let body = r#"{
            "upscaled_url": "https://cdn.example/u.jpg",
            "analysis": {
                "duration": "1.08s",
                "psnr": "31.22 dB",
                "improvement": "4x Resolution Enhancement"
            }
        }"#;
        let result = parse_upscale_response(body).unwrap();
        assert_eq!(
            result.analysis.unwrap().improvement.as_deref(),
            Some("4x Resolution Enhancement")
        );
    }

    #[test]
    fn test_analysis_is_optional() {
        let body = r#"{"upscaled_url": "https://cdn.example/u.jpg"}"#;
        let result = parse_upscale_response(body).unwrap();
        assert!(result.analysis.is_none());
    }

    #[test]
    fn test_missing_url_is_failure() {
        let body = r#"{"detail": "GPU quota exceeded"}"#;
        assert!(matches!(
            parse_upscale_response(body),
            Err(UpscaleError::MissingResultUrl)
        ));
    }

    #[test]
    fn test_empty_url_is_failure() {
        let body = r#"{"upscaled_url": ""}"#;
        assert!(matches!(
            parse_upscale_response(body),
            Err(UpscaleError::MissingResultUrl)
        ));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        assert!(matches!(
            parse_upscale_response("<html>backend asleep</html>"),
            Err(UpscaleError::MalformedResponse(_))
        ));
    }
}
