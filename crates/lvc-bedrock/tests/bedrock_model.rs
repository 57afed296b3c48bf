//! Failure reporting of the Bedrock-backed model without AWS access.

use aws_sdk_bedrockruntime::config::retry::RetryConfig;
use aws_sdk_bedrockruntime::config::{BehaviorVersion, Credentials, Region};
use lvc_bedrock::error::BedrockError;
use lvc_bedrock::{BedrockReportModel, ReportModel};

/// Client that signs requests with dummy credentials and sends them to a
/// port nobody listens on.
fn unreachable_client() -> aws_sdk_bedrockruntime::Client {
    let config = aws_sdk_bedrockruntime::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::new("AKIDTEST", "secret", None, None, "test"))
        .endpoint_url("http://127.0.0.1:1")
        .retry_config(RetryConfig::disabled())
        .build();
    aws_sdk_bedrockruntime::Client::from_conf(config)
}

#[tokio::test]
async fn unreachable_endpoint_keeps_transport_detail() {
    let model = BedrockReportModel::with_client(unreachable_client(), "test-model", 64);

    let err = model.complete("system", "prompt").await.unwrap_err();

    let BedrockError::Invocation(detail) = &err else {
        panic!("expected an invocation error, got {err:?}");
    };
    assert!(detail.contains("dispatch failure"), "detail was: {detail}");
    assert_ne!(err.to_string(), "model invocation failed: unhandled error");
}
