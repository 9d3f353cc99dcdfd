use std::sync::{Arc, Mutex};
use std::time::Duration;

use pprovider::{
    GeminiGenerator, GeminiTransport, GenerateContentRequest, GeneratorFuture, ProviderError,
    TextGenerator,
};

#[derive(Debug)]
struct FakeTransport {
    requests: Mutex<Vec<(String, GenerateContentRequest)>>,
    outcome: Result<String, ProviderError>,
    delay: Option<Duration>,
}

impl FakeTransport {
    fn returning(body: impl Into<String>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            outcome: Ok(body.into()),
            delay: None,
        }
    }

    fn failing(error: ProviderError) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            outcome: Err(error),
            delay: None,
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl GeminiTransport for FakeTransport {
    fn generate<'a>(
        &'a self,
        model: &'a str,
        request: GenerateContentRequest,
    ) -> GeneratorFuture<'a, Result<String, ProviderError>> {
        Box::pin(async move {
            self.requests
                .lock()
                .expect("requests lock")
                .push((model.to_string(), request));

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            self.outcome.clone()
        })
    }
}

#[tokio::test]
async fn generate_extracts_candidate_text_and_measures_latency() {
    let body = r#"{"candidates":[{"content":{"parts":[{"text":"Hi there"}]}}]}"#;
    let transport = Arc::new(FakeTransport::returning(body).with_delay(Duration::from_millis(20)));
    let generator = GeminiGenerator::new(transport.clone()).with_model("gemini-1.5-flash");

    let generation = generator
        .generate("User: Hello\nAssistant:".to_string())
        .await
        .expect("generation should succeed");

    assert_eq!(generation.text, "Hi there");
    assert!(generation.elapsed >= Duration::from_millis(20));

    let requests = transport.requests.lock().expect("requests lock");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, "gemini-1.5-flash");
}

#[tokio::test]
async fn generate_falls_back_to_raw_body_when_no_text_is_present() {
    let body = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
    let transport = Arc::new(FakeTransport::returning(body));
    let generator = GeminiGenerator::new(transport);

    let generation = generator
        .generate("User: Hello\nAssistant:".to_string())
        .await
        .expect("generation should succeed");

    assert_eq!(generation.text, body);
}

#[tokio::test]
async fn generate_forwards_transport_errors_without_interpreting_them() {
    let error = ProviderError::authentication("http 401 Unauthorized: API key invalid");
    let transport = Arc::new(FakeTransport::failing(error.clone()));
    let generator = GeminiGenerator::new(transport.clone());

    let failure = generator
        .generate("User: Hello\nAssistant:".to_string())
        .await
        .expect_err("generation should fail");

    assert_eq!(failure, error);

    // exactly one attempt, no internal retry
    let requests = transport.requests.lock().expect("requests lock");
    assert_eq!(requests.len(), 1);
}
