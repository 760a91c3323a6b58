//! Roast Generator — text generation with credential failover.
//!
//! The generator holds an ordered list of interchangeable API keys and
//! tries them front to back, exactly one attempt per key. Empty
//! returned text counts as a failure. Adding another key is a config
//! change, not a code change.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use instacook_core::{GeneratorConfig, ServiceError};

use crate::model::ProfileRecord;

/// One generation attempt against one credential.
#[async_trait::async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, ServiceError>;
}

/// Gemini `generateContent` backend.
pub struct GeminiBackend {
    http: reqwest::Client,
    config: GeneratorConfig,
}

impl GeminiBackend {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: config.clone(),
        }
    }
}

#[async_trait::async_trait]
impl GenerationBackend for GeminiBackend {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, ServiceError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, api_key
        );

        let body = serde_json::json!({
            "contents": [{"role": "user", "parts": [{"text": prompt}]}],
            "generationConfig": {
                "temperature": self.config.temperature,
                "topP": self.config.top_p,
                "topK": self.config.top_k,
                "maxOutputTokens": self.config.max_output_tokens,
            },
        });

        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::Provider(format!("generation request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::Provider(format!(
                "generation provider returned {}: {}",
                status, body
            )));
        }

        let json: Value = resp.json().await.map_err(|e| {
            ServiceError::Provider(format!("generation response parse failed: {}", e))
        })?;

        let text = json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| ServiceError::Provider("no text in generation response".into()))?;

        Ok(text.to_string())
    }
}

/// The Roast Generator: ProfileRecord in, roast text out.
#[derive(Clone)]
pub struct RoastGenerator {
    backend: Arc<dyn GenerationBackend>,
    api_keys: Vec<String>,
}

impl RoastGenerator {
    /// At least one credential is required; the module refuses to
    /// start without one.
    pub fn new(
        backend: Arc<dyn GenerationBackend>,
        api_keys: Vec<String>,
    ) -> Result<Self, ServiceError> {
        if api_keys.is_empty() {
            return Err(ServiceError::Internal(
                "generator requires at least one API key".into(),
            ));
        }
        Ok(Self { backend, api_keys })
    }

    /// Generate a roast, failing over across credentials in order.
    ///
    /// Output is intentionally non-deterministic; callers may only rely
    /// on it being non-empty. On exhaustion fails with
    /// `GenerationExhausted` carrying the last underlying error.
    pub async fn generate_roast(&self, profile: &ProfileRecord) -> Result<String, ServiceError> {
        let prompt = build_prompt(profile);
        let mut last_err: Option<ServiceError> = None;

        for (i, key) in self.api_keys.iter().enumerate() {
            match self.backend.generate(key, &prompt).await {
                Ok(text) if !text.trim().is_empty() => {
                    debug!("roast generated with credential {}", i + 1);
                    return Ok(text);
                }
                Ok(_) => {
                    warn!("generation credential {} returned empty text", i + 1);
                    last_err = Some(ServiceError::Provider("provider returned empty text".into()));
                }
                Err(e) => {
                    warn!("generation credential {} failed: {}", i + 1, e);
                    last_err = Some(e);
                }
            }
        }

        Err(ServiceError::GenerationExhausted(match last_err {
            Some(e) => format!("all generation credentials failed: {}", e),
            None => "all generation credentials failed".into(),
        }))
    }
}

/// Build the generation instruction: the serialized profile plus the
/// fixed style directive (tone, Indonesian register, 150-word ceiling,
/// safety constraints). Constraints are provider-level instructions,
/// not enforced server-side.
pub fn build_prompt(profile: &ProfileRecord) -> String {
    let profile_json =
        serde_json::to_string_pretty(profile).unwrap_or_else(|_| "{}".to_string());

    format!(
        "Bertindak sebagai roast master dan selalu kreatif tidak sama dengan jawaban \
sebelumnya dan jangan pernah baik dan jadilah seperti villain agar sangat pedas dan \
sarkastik dalam Bahasa Indonesia. Berdasarkan data profil Instagram ini, buat roasting \
yang lucu, pedas, dan sarkastik yang menghibur dan sangat kejam tapi tetap sopan:
    {profile_json}

    Fokus pada hal-hal seperti:
    - Isi bio mereka (jika ada)
    - Jumlah postingan
    - Jumlah followers dan following
    - Deskripsi profil
    - Tipe akun (personal, bisnis, dll)

    Buat roasting yang cerdas dan kreatif, dengan nada yang pedas.
    Gunakan bahasa gaul/slang Indonesia yang populer.
    Tambahkan sedikit kata-kata khas anak muda Indonesia.
    Jangan terlalu formal, buat seperti roasting antar teman.
    Maksimal 150 kata dan buat menghibur.
    Tanpa hinaan SARA, tanpa pelecehan, tanpa body-shaming.

    Contoh gaya bahasa yang bisa digunakan:
    - \"Njir followers lu...\"
    - \"Astagaa bio lu tuh...\"
    - \"Duh postingan lu...\"
    - \"Yaelah following sampe...\"

    Buat lebih pedas tanpa toleran tetap sopan."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn profile() -> ProfileRecord {
        serde_json::from_str(r#"{"username":"foo","followersCount":100}"#).unwrap()
    }

    /// Scripted backend: one canned response per credential, in call
    /// order. Records which keys were attempted.
    struct ScriptedBackend {
        responses: Mutex<Vec<Result<String, ServiceError>>>,
        attempts: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new(responses: Vec<Result<String, ServiceError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                attempts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl GenerationBackend for ScriptedBackend {
        async fn generate(&self, api_key: &str, _prompt: &str) -> Result<String, ServiceError> {
            self.attempts.lock().unwrap().push(api_key.to_string());
            self.responses.lock().unwrap().remove(0)
        }
    }

    #[test]
    fn refuses_to_build_without_keys() {
        let backend = Arc::new(ScriptedBackend::new(vec![]));
        let err = RoastGenerator::new(backend, vec![]).err().unwrap();
        assert!(matches!(err, ServiceError::Internal(_)));
    }

    #[tokio::test]
    async fn second_credential_succeeds() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Err(ServiceError::Provider("quota exceeded".into())),
            Ok("ok".into()),
        ]));
        let generator = RoastGenerator::new(
            Arc::clone(&backend) as Arc<dyn GenerationBackend>,
            vec!["key1".into(), "key2".into()],
        )
        .unwrap();

        let roast = generator.generate_roast(&profile()).await.unwrap();
        assert_eq!(roast, "ok");
        assert_eq!(*backend.attempts.lock().unwrap(), vec!["key1", "key2"]);
    }

    #[tokio::test]
    async fn exhaustion_carries_last_error() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Err(ServiceError::Provider("quota exceeded".into())),
            Err(ServiceError::Provider("bad key".into())),
        ]));
        let generator =
            RoastGenerator::new(backend, vec!["key1".into(), "key2".into()]).unwrap();

        let err = generator.generate_roast(&profile()).await.unwrap_err();
        match err {
            ServiceError::GenerationExhausted(msg) => assert!(msg.contains("bad key")),
            other => panic!("expected GenerationExhausted, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_text_triggers_failover() {
        let backend = Arc::new(ScriptedBackend::new(vec![Ok("".into()), Ok("ok".into())]));
        let generator =
            RoastGenerator::new(backend, vec!["key1".into(), "key2".into()]).unwrap();

        let roast = generator.generate_roast(&profile()).await.unwrap();
        assert_eq!(roast, "ok");
    }

    #[tokio::test]
    async fn empty_text_everywhere_exhausts() {
        let backend = Arc::new(ScriptedBackend::new(vec![Ok("".into()), Ok("  ".into())]));
        let generator =
            RoastGenerator::new(backend, vec!["key1".into(), "key2".into()]).unwrap();

        let err = generator.generate_roast(&profile()).await.unwrap_err();
        assert!(matches!(err, ServiceError::GenerationExhausted(_)));
    }

    #[tokio::test]
    async fn one_attempt_per_credential() {
        let backend = Arc::new(ScriptedBackend::new(vec![Err(ServiceError::Provider(
            "down".into(),
        ))]));
        let generator = RoastGenerator::new(
            Arc::clone(&backend) as Arc<dyn GenerationBackend>,
            vec!["key1".into()],
        )
        .unwrap();

        let _ = generator.generate_roast(&profile()).await;
        assert_eq!(backend.attempts.lock().unwrap().len(), 1);
    }

    #[test]
    fn prompt_embeds_profile() {
        let prompt = build_prompt(&profile());
        assert!(prompt.contains("\"username\": \"foo\""));
        assert!(prompt.contains("Maksimal 150 kata"));
    }
}
