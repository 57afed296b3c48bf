//! Behavior of the S3 backend that does not need AWS access.

use aws_sdk_s3::config::{BehaviorVersion, Region};
use lvc_core::error::ProviderError;
use lvc_core::models::document::DocumentRef;
use lvc_core::models::term::SearchTerm;
use lvc_core::provider::DocumentProvider;
use lvc_storage::S3Provider;

fn offline_client() -> aws_sdk_s3::Client {
    let config = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .build();
    aws_sdk_s3::Client::from_conf(config)
}

#[tokio::test]
async fn unconfigured_bucket_is_unavailable_not_empty() {
    let provider = S3Provider::with_client(offline_client(), None);
    let term = SearchTerm::parse("BR101").unwrap();

    let set = provider.find(&term).await;
    assert!(set.is_empty());
    assert!(!set.is_ready());
}

#[tokio::test]
async fn blank_bucket_counts_as_unconfigured() {
    let provider = S3Provider::with_client(offline_client(), Some("  ".to_string()));
    let doc = DocumentRef::from_key("relatorios/trecho1.pdf");

    assert!(matches!(
        provider.fetch(&doc).await,
        Err(ProviderError::Unavailable(_))
    ));
    assert!(matches!(
        provider.retrieval(&doc).await,
        Err(ProviderError::Unavailable(_))
    ));
}
