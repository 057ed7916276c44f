use std::fs;

use url::Url;

use crate::fetcher::{FetchError, FetchResult, MockFetcher};
use crate::metadata::{Source, SourcePriority};
use crate::preview::{ErrorKind, PreviewError, Previewer};

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/preview/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

/// Mock that serves `body` once from `final_url`, whatever was requested.
fn serving(body: impl Into<Vec<u8>>, final_url: &str) -> MockFetcher {
    let body = body.into();
    let final_url = Url::parse(final_url).unwrap();
    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_fetch()
        .times(1)
        .returning(move |_| Ok(FetchResult::html(final_url.clone(), body.clone())));
    fetcher
}

fn previewer(fetcher: MockFetcher) -> Previewer<MockFetcher> {
    Previewer::new(fetcher, SourcePriority::default())
}

#[tokio::test]
async fn test_preview_article() {
    let fetcher = serving(fixture("article.html"), "https://example.com/article");
    let preview = previewer(fetcher)
        .preview("Have you seen https://example.com/article? Wild stuff.")
        .await
        .unwrap();

    assert_eq!(preview.title.as_deref(), Some("Sample Article"));
    assert_eq!(
        preview.description.as_deref(),
        Some("A short summary of the sample article & its findings.")
    );
    assert_eq!(
        preview.image.unwrap().as_str(),
        "https://example.com/images/sample.jpg"
    );
    assert_eq!(preview.url.as_str(), "https://news.example.com/articles/sample");
    assert_eq!(preview.kind.as_deref(), Some("article"));
    assert_eq!(preview.site_name.as_deref(), Some("News Site"));
}

#[tokio::test]
async fn test_preview_twitter_card_only() {
    let fetcher = serving(fixture("twitter.html"), "https://blog.example.com/post");
    let preview = previewer(fetcher)
        .preview("https://blog.example.com/post")
        .await
        .unwrap();

    assert_eq!(preview.title.as_deref(), Some("Card Title"));
    assert_eq!(
        preview.description.as_deref(),
        Some("Card description spread over several lines")
    );
    assert_eq!(
        preview.image.unwrap().as_str(),
        "https://cdn.example.net/card.png"
    );
    assert_eq!(preview.url.as_str(), "https://blog.example.com/post");
    assert_eq!(preview.kind, None);
    assert_eq!(preview.site_name, None);
}

#[tokio::test]
async fn test_preview_title_only() {
    let fetcher = serving(fixture("minimal.html"), "https://example.com/minimal");
    let preview = previewer(fetcher)
        .preview("look: https://example.com/minimal")
        .await
        .unwrap();

    assert_eq!(preview.title.as_deref(), Some("Foo"));
    assert_eq!(preview.description, None);
    assert_eq!(preview.image, None);
}

#[tokio::test]
async fn test_preview_malformed_document() {
    let fetcher = serving(fixture("broken.html"), "https://example.com/docs/broken");
    let preview = previewer(fetcher)
        .preview("https://example.com/docs/broken")
        .await
        .unwrap();

    assert_eq!(preview.title.as_deref(), Some("Unquoted Title"));
    assert_eq!(
        preview.description.as_deref(),
        Some("This page never closes its tags and has a paragraph long enough to count")
    );
    assert_eq!(
        preview.image.unwrap().as_str(),
        "https://example.com/docs/images/photo.jpg"
    );
}

#[tokio::test]
async fn test_plain_text_body_is_parse_error() {
    let fetcher = serving(fixture("plain.txt"), "https://example.com/readme.txt");
    let err = previewer(fetcher)
        .preview("https://example.com/readme.txt")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ParseError);
}

#[tokio::test]
async fn test_empty_body_is_parse_error() {
    let fetcher = serving(Vec::<u8>::new(), "https://example.com/empty");
    let err = previewer(fetcher)
        .preview("https://example.com/empty")
        .await
        .unwrap_err();

    assert!(matches!(err, PreviewError::Parse(_)));
}

#[tokio::test]
async fn test_no_url_skips_fetch() {
    let mut fetcher = MockFetcher::new();
    fetcher.expect_fetch().never();

    let err = previewer(fetcher)
        .preview("nothing linkable in here, not even example.com")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NoUrlFound);
}

#[tokio::test]
async fn test_fetches_first_candidate() {
    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_fetch()
        .withf(|url| url.as_str() == "https://first.example.com/a")
        .times(1)
        .returning(|url| Ok(FetchResult::html(url.clone(), "<title>First</title>")));

    let preview = previewer(fetcher)
        .preview("(https://first.example.com/a), then https://second.example.com/b.")
        .await
        .unwrap();

    assert_eq!(preview.title.as_deref(), Some("First"));
}

#[tokio::test]
async fn test_fetch_failure_is_parse_error() {
    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_fetch()
        .times(1)
        .returning(|_| Err(FetchError::ConnectTimeout));

    let err = previewer(fetcher)
        .preview("https://unreachable.example.com/")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ParseError);
    assert_eq!(err.description(), "connect timeout");
}

#[tokio::test]
async fn test_cancelled_fetch_is_parse_error() {
    let mut fetcher = MockFetcher::new();
    fetcher
        .expect_fetch()
        .returning(|_| Err(FetchError::Cancelled));

    let err = previewer(fetcher)
        .preview("https://example.com/slow")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ParseError);
}

#[tokio::test]
async fn test_declared_charset_is_used() {
    let final_url = Url::parse("https://example.fr/").unwrap();
    let mut fetcher = MockFetcher::new();
    fetcher.expect_fetch().returning(move |_| {
        Ok(FetchResult::html(final_url.clone(), &b"<title>Caf\xe9 cr\xe8me</title>"[..])
            .with_charset("windows-1252"))
    });

    let preview = previewer(fetcher)
        .preview("https://example.fr/")
        .await
        .unwrap();

    assert_eq!(preview.title.as_deref(), Some("Café crème"));
}

#[tokio::test]
async fn test_custom_priority_prefers_twitter() {
    let fetcher = serving(fixture("article.html"), "https://example.com/article");
    let previewer = Previewer::new(
        fetcher,
        SourcePriority::new(vec![Source::TwitterCard, Source::OpenGraph, Source::Html]),
    );

    let preview = previewer
        .preview("https://example.com/article")
        .await
        .unwrap();

    assert_eq!(preview.title.as_deref(), Some("Sample Article on Twitter"));
    assert_eq!(preview.site_name.as_deref(), Some("News Site"));
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use crate::markup::Tokenizer;
    use crate::metadata::{SourcePriority, aggregate};
    use crate::preview::assembler::assemble;
    use proptest::prelude::*;
    use url::Url;

    proptest! {
        #[test]
        fn test_pipeline_never_panics(html in ".*") {
            let record = aggregate(Tokenizer::new(&html), &SourcePriority::default());
            let base = Url::parse("https://example.com/base/page").unwrap();
            let _ = assemble(record, &base);
        }

        #[test]
        fn test_tokenizer_terminates_on_tag_soup(
            html in r#"(<[a-z!/?]{0,3}|[ "'=>a-z]|&#?[a-z0-9]{0,4};?){0,64}"#
        ) {
            let count = Tokenizer::new(&html).count();
            prop_assert!(count <= html.len());
        }

        #[test]
        fn test_record_values_are_normalized(html in ".*") {
            let record = aggregate(Tokenizer::new(&html), &SourcePriority::default());
            for value in [&record.title, &record.description, &record.kind, &record.site_name]
                .into_iter()
                .flatten()
            {
                prop_assert!(!value.is_empty());
                prop_assert_eq!(value.trim(), value.as_str());
                prop_assert!(!value.contains("  "));
            }
        }
    }
}
