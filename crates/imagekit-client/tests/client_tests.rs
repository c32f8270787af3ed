//! HTTP-level tests for the ImageKit client against a mock API server.

use imagekit_client::{
    ClientError, CancellationToken, Config, FileOptions, ImageKitClient, JobStatus,
    ListFilesParams, ListType, SortOrder,
};
use serde_json::json;
use std::time::{Duration, Instant};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PRIVATE_KEY: &str = "private_key_test";
const AUTH_HEADER: &str = "Basic cHJpdmF0ZV9rZXlfdGVzdDo=";

fn config_for(server: &MockServer) -> Config {
    Config::new(PRIVATE_KEY)
        .with_api_base_url(server.uri())
        .with_upload_url(format!("{}/api/v1/files/upload", server.uri()))
}

fn client_for(server: &MockServer) -> ImageKitClient {
    ImageKitClient::new(config_for(server)).unwrap()
}

fn file_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "fileId": id,
        "type": "file",
        "name": name,
        "filePath": format!("/products/{}", name),
        "tags": ["summer"],
        "AITags": null,
        "isPrivateFile": false,
        "customCoordinates": null,
        "url": format!("https://ik.imagekit.io/demo/products/{}", name),
        "fileType": "image",
        "mime": "image/png",
        "height": 100,
        "width": 200,
        "size": 1024,
        "hasAlpha": true,
        "createdAt": "2024-03-01T10:00:00.000Z",
        "updatedAt": "2024-03-01T10:00:00.000Z"
    })
}

// ==================== Request Executor ====================

#[tokio::test]
async fn test_list_files_sends_auth_and_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/files"))
        .and(header("Authorization", AUTH_HEADER))
        .and(query_param("type", "file"))
        .and(query_param("sort", "ASC_NAME"))
        .and(query_param("path", "/products"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            file_json("f1", "a.png"),
            file_json("f2", "b.png"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let params = ListFilesParams::new()
        .with_type(ListType::File)
        .with_sort(SortOrder::AscName)
        .with_path("/products")
        .with_limit(2);

    let files = client_for(&server).list_files(Some(&params)).await.unwrap();

    assert_eq!(files.len(), 2);
    assert_eq!(files[0].file_id.as_deref(), Some("f1"));
    assert_eq!(files[1].file_path.as_deref(), Some("/products/b.png"));
    assert_eq!(files[1].width, 200);
}

#[tokio::test]
async fn test_rate_limited_request_is_replayed_after_reset() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/files/addTags"))
        .respond_with(ResponseTemplate::new(429).insert_header("X-RateLimit-Reset", "150"))
        .up_to_n_times(1)
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/files/addTags"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"successfullyUpdatedFileIds": ["f1", "f2"]})),
        )
        .with_priority(2)
        .expect(1)
        .mount(&server)
        .await;

    let ids = vec!["f1".to_string(), "f2".to_string()];
    let tags = vec!["summer".to_string()];

    let started = Instant::now();
    let updated = client_for(&server).add_tags(&ids, &tags).await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(150));
    assert_eq!(updated, ids);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, requests[1].method);
    assert_eq!(requests[0].url, requests[1].url);
    assert_eq!(requests[0].body, requests[1].body);
    assert_eq!(requests[1].headers.get("authorization").unwrap(), AUTH_HEADER);
}

#[tokio::test]
async fn test_malformed_reset_header_fails_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/files/f1/details"))
        .respond_with(ResponseTemplate::new(429).insert_header("X-RateLimit-Reset", "later"))
        .expect(1)
        .mount(&server)
        .await;

    let started = Instant::now();
    let err = client_for(&server).file_details("f1").await.unwrap_err();

    assert!(matches!(err, ClientError::RateLimitReset(ref v) if v == "later"));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_retry_cap_stops_the_loop() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bulkJobs/job1"))
        .respond_with(ResponseTemplate::new(429).insert_header("X-RateLimit-Reset", "0"))
        .expect(3)
        .mount(&server)
        .await;

    let client = ImageKitClient::new(config_for(&server).with_max_rate_limit_retries(2)).unwrap();
    let err = client.bulk_job_status("job1").await.unwrap_err();

    assert!(matches!(err, ClientError::RateLimited { retries: 2 }));
    assert!(err.is_rate_limited());
}

#[tokio::test]
async fn test_cancellation_interrupts_rate_limit_wait() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/files/f1/details"))
        .respond_with(ResponseTemplate::new(429).insert_header("X-RateLimit-Reset", "60000"))
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    let client = client_for(&server).with_cancellation(token.clone());

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });

    let started = Instant::now();
    let err = client.file_details("f1").await.unwrap_err();
    canceller.await.unwrap();

    assert!(matches!(err, ClientError::Cancelled));
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn test_api_error_carries_raw_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/files/missing/details"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"not found"}"#))
        .mount(&server)
        .await;

    let err = client_for(&server).file_details("missing").await.unwrap_err();

    match err {
        ClientError::Api { status, ref message } => {
            assert_eq!(status, 404);
            assert_eq!(message, r#"{"message":"not found"}"#);
        }
        ref other => panic!("Expected Api error, got {:?}", other),
    }
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_transport_failure_is_not_retried() {
    let config = Config::new(PRIVATE_KEY)
        .with_api_base_url("http://127.0.0.1:1")
        .with_timeout(Duration::from_secs(5));
    let client = ImageKitClient::new(config).unwrap();

    let err = client.delete_file("f1").await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}

#[tokio::test]
async fn test_invalid_params_fail_before_request() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let err = client
        .list_files(Some(&ListFilesParams::new().with_limit(1001)))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::LimitOutOfBounds(1001)));

    let err = client
        .list_files(Some(&ListFilesParams::new().with_skip(-1)))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::SkipOutOfBounds(-1)));

    assert!(server.received_requests().await.unwrap().is_empty());
}

// ==================== Files ====================

#[tokio::test]
async fn test_update_file_details_sends_json() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/files/f1/details"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "tags": ["summer", "sale"],
            "customCoordinates": "10,10,100,100",
            "customMetadata": {"brand": "Nike"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(file_json("f1", "a.png")))
        .expect(1)
        .mount(&server)
        .await;

    let options = FileOptions::new()
        .with_tags(["summer", "sale"])
        .with_custom_coordinates("10,10,100,100")
        .with_custom_metadata(&json!({"brand": "Nike"}))
        .unwrap();

    let details = client_for(&server)
        .update_file_details("f1", &options)
        .await
        .unwrap();
    assert_eq!(details.name.as_deref(), Some("a.png"));
}

#[tokio::test]
async fn test_copy_move_and_rename() {
    let server = MockServer::start().await;
    let transfer = json!({
        "sourceFilePath": "/products/a.png",
        "destinationPath": "/archive"
    });

    Mock::given(method("POST"))
        .and(path("/files/copy"))
        .and(body_json(transfer.clone()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/files/move"))
        .and(body_json(transfer))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/files/rename"))
        .and(body_json(json!({
            "filePath": "/products/a.png",
            "newFileName": "b.png",
            "purgeCache": true
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"purgeRequestId": "purge-123"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.copy_file("/products/a.png", "/archive").await.unwrap();
    client.move_file("/products/a.png", "/archive").await.unwrap();

    let purge = client
        .rename_file("/products/a.png", "b.png", true)
        .await
        .unwrap();
    assert_eq!(purge.as_deref(), Some("purge-123"));
}

#[tokio::test]
async fn test_rename_without_purge_returns_none() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/files/rename"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let purge = client_for(&server)
        .rename_file("/a.png", "b.png", false)
        .await
        .unwrap();
    assert!(purge.is_none());
}

#[tokio::test]
async fn test_bulk_tag_operations() {
    let server = MockServer::start().await;
    let ids = vec!["f1".to_string(), "f2".to_string()];

    Mock::given(method("POST"))
        .and(path("/files/removeTags"))
        .and(body_json(json!({"fileIds": ["f1", "f2"], "tags": ["old"]})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"successfullyUpdatedFileIds": ["f1"]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/files/removeAITags"))
        .and(body_json(json!({"fileIds": ["f1", "f2"], "AITags": ["Shirt"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["f1", "f2"])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/files/batch/deleteByFileIds"))
        .and(body_json(json!({"fileIds": ["f1", "f2"]})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"successfullyDeletedFileIds": ["f1", "f2"]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let updated = client.remove_tags(&ids, &["old".to_string()]).await.unwrap();
    assert_eq!(updated, vec!["f1"]);

    let updated = client.remove_ai_tags(&ids, &["Shirt".to_string()]).await.unwrap();
    assert_eq!(updated, ids);

    let deleted = client.delete_files(&ids).await.unwrap();
    assert_eq!(deleted, ids);
}

// ==================== Folders & Jobs ====================

#[tokio::test]
async fn test_folder_lifecycle() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/folder"))
        .and(body_json(json!({"folderName": "summer", "parentFolderPath": "/products"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/folder"))
        .and(body_json(json!({"folderPath": "/products/summer"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/bulkJobs/copyFolder"))
        .and(body_json(json!({
            "sourceFolderPath": "/products/summer",
            "destinationPath": "/archive"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jobId": "job-copy"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/bulkJobs/moveFolder"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jobId": "job-move"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/bulkJobs/job-move"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobId": "job-move",
            "type": "MOVE_FOLDER",
            "status": "Pending"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.create_folder("summer", "/products").await.unwrap();

    let copy_job = client.copy_folder("/products/summer", "/archive").await.unwrap();
    assert_eq!(copy_job, "job-copy");

    let move_job = client.move_folder("/products/summer", "/archive").await.unwrap();
    let status = client.bulk_job_status(&move_job).await.unwrap();
    assert_eq!(status.kind, "MOVE_FOLDER");
    assert_eq!(status.status, JobStatus::Pending);
    assert!(!status.is_completed());

    client.delete_folder("/products/summer").await.unwrap();
}

// ==================== Upload ====================

#[tokio::test]
async fn test_upload_sends_multipart_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/files/upload"))
        .and(header("Authorization", AUTH_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(file_json("f9", "remote.jpg")))
        .expect(1)
        .mount(&server)
        .await;

    let options = FileOptions::new()
        .with_folder("/products")
        .with_tags(["a", "b"])
        .with_unique_file_name(false);

    let details = client_for(&server)
        .upload(
            "https://example.com/images/remote.jpg",
            "remote.jpg",
            Some(&options),
        )
        .await
        .unwrap();
    assert_eq!(details.file_id.as_deref(), Some("f9"));

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];

    let content_type = request.headers.get("content-type").unwrap().to_str().unwrap();
    let boundary = content_type
        .strip_prefix("multipart/form-data; boundary=")
        .unwrap()
        .to_string();
    assert_eq!(boundary.len(), 47);

    let body = String::from_utf8(request.body.clone()).unwrap();
    assert!(body.starts_with(&format!("--{}\r\n", boundary)));
    assert!(body.ends_with(&format!("false\r\n--{}--", boundary)));
    assert_eq!(body.matches("Content-Disposition: form-data;").count(), 5);
    assert!(body.contains("name=\"file\"\r\nContent-Type: text/plain\r\n\r\nhttps://example.com/images/remote.jpg\r\n"));
    assert!(body.contains("name=\"tags\"\r\nContent-Type: text/plain\r\n\r\na,b\r\n"));
    assert!(body.contains("name=\"useUniqueFileName\"\r\nContent-Type: text/plain\r\n\r\nfalse\r\n"));
}

#[tokio::test]
async fn test_upload_rejects_empty_inputs_without_network() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let err = client.upload("", "a.png", None).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidFile(_)));

    let err = client.upload("aGVsbG8", " ", None).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidFile(_)));

    let err = client.upload("not a file!", "a.png", None).await.unwrap_err();
    assert!(err.is_validation());

    assert!(server.received_requests().await.unwrap().is_empty());
}
