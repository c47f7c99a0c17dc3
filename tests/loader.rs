use kms_trail_alert::*;
use pretty_assertions::assert_eq;
use test_log::test;

const BUCKETS: &str = "test_resources/fixtures/buckets";
const BUCKET: &str = "trail_bucket";

fn loader() -> RecordLoader<LocalStore> {
    RecordLoader::new(LocalStore::new(BUCKETS))
}

fn times(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.event_time.as_str()).collect()
}

#[test(tokio::test)]
async fn kms_events_in_time_order() {
    let records = loader()
        .load(&Location::new(BUCKET, "kms_events.json.gz"))
        .await
        .unwrap();

    assert_eq!(
        times(&records),
        vec![
            "2019-11-03T19:21:40Z",
            "2019-11-03T19:25:18Z",
            "2019-11-03T19:27:33Z",
            "2019-11-03T19:30:05Z",
            "2019-11-03T19:33:00Z",
            "2019-11-03T19:35:12Z",
            "2019-11-03T19:36:30Z",
        ]
    );
    let names: Vec<_> = records.iter().map(|r| r.event_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Encrypt",
            "ListAliases",
            "ReEncrypt",
            "GenerateDataKey",
            "Decrypt",
            "Decrypt",
            "DescribeKey"
        ]
    );
    assert!(records.iter().all(|r| r.is_kms_event()));
}

#[test(tokio::test)]
async fn loading_is_repeatable() {
    let loader = loader();
    let location = Location::new(BUCKET, "kms_events.json.gz");
    let first = loader.load(&location).await.unwrap();
    let second = loader.load(&location).await.unwrap();
    assert_eq!(first, second);
}

#[test(tokio::test)]
async fn loaded_records_match_source_document() {
    let source: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string("test_resources/fixtures/cloudtrail_events/kms_events.json")
            .unwrap(),
    )
    .unwrap();
    let mut expected: Vec<serde_json::Value> = source["Records"].as_array().unwrap().clone();
    expected.sort_by(|a, b| a["eventTime"].as_str().cmp(&b["eventTime"].as_str()));

    let records = loader()
        .load(&Location::new(BUCKET, "kms_events.json.gz"))
        .await
        .unwrap();
    let loaded = serde_json::to_value(&records).unwrap();
    assert_eq!(loaded, serde_json::Value::Array(expected));

    let describe = &loaded[6];
    assert_eq!(describe["eventName"], "DescribeKey");
    assert_eq!(describe["userIdentity"]["sessionContext"], serde_json::Value::Null);
    assert_eq!(describe["resources"], serde_json::Value::Null);
    assert!(describe["userIdentity"]
        .as_object()
        .unwrap()
        .contains_key("sessionContext"));
}

#[test(tokio::test)]
async fn missing_object_is_a_retrieval_error() {
    let location = Location::new(BUCKET, "missing.json.gz");
    let err = loader().load(&location).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Retrieval);
    match err {
        Error::Retrieval { location: l, .. } => assert_eq!(l, location),
        e => panic!("unexpected error {e}"),
    }
}

#[test(tokio::test)]
async fn corrupt_objects_are_format_errors() {
    let err = loader()
        .load(&Location::new(BUCKET, "not_gzip.json.gz"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decompress(_)));
    assert_eq!(err.kind(), ErrorKind::Format);

    let err = loader()
        .load(&Location::new(BUCKET, "bad_document.json.gz"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn decode_local_file() {
    let content = std::fs::read(format!("{BUCKETS}/{BUCKET}/other_events.json.gz")).unwrap();
    let records = decode_log_file(&content).unwrap();
    assert_eq!(
        times(&records),
        vec!["2019-11-03T19:29:00Z", "2019-11-03T19:31:00Z"]
    );
    assert!(records.iter().all(|r| !r.is_kms_event()));
}
