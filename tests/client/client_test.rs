use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use vizexec::client::{
    annotate_headers, execute, executions_path, with_original_formats, ClientError, ClientResult,
    ExecuteOptions, ExecutionClient, ResultHeader, Transport, TransportResponse,
};
use vizexec::compile::{compile, CompileOptions};
use vizexec::execution::MetricMapping;
use vizexec::model::{
    AttributeFilter, Category, Measure, MeasureType, MetadataObject, VisualizationType,
};

const PROJECT: &str = "p1";
const REVENUE_URI: &str = "/gdc/md/p1/obj/5";
const RESULT_URL: &str = "/gdc/internal/projects/p1/experimental/executions/results/1";
const EXTENDED_URL: &str = "/gdc/internal/projects/p1/experimental/executions/extended/1";

/// In-memory transport answering from a fixed table and recording every call.
#[derive(Default)]
struct MockTransport {
    responses: HashMap<String, TransportResponse>,
    calls: Mutex<Vec<(String, String, Option<Value>)>>,
}

impl MockTransport {
    fn with_response(mut self, path: &str, response: TransportResponse) -> Self {
        self.responses.insert(path.to_string(), response);
        self
    }

    fn respond(&self, method: &str, path: &str, body: Option<Value>) -> ClientResult<TransportResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), path.to_string(), body));
        Ok(self
            .responses
            .get(path)
            .cloned()
            .unwrap_or_else(|| TransportResponse::new(404, None)))
    }

    fn calls(&self) -> Vec<(String, String, Option<Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_json(&self, path: &str, body: &Value) -> ClientResult<TransportResponse> {
        self.respond("POST", path, Some(body.clone()))
    }

    async fn get_json(&self, path: &str) -> ClientResult<TransportResponse> {
        self.respond("GET", path, None)
    }

    async fn poll_resource(&self, url: &str) -> ClientResult<TransportResponse> {
        self.respond("POLL", url, None)
    }
}

fn start_response(headers: Value) -> TransportResponse {
    TransportResponse::new(
        201,
        Some(json!({
            "executionResult": {
                "headers": headers,
                "tabularDataResult": RESULT_URL,
                "extendedTabularDataResult": EXTENDED_URL
            }
        })),
    )
}

fn revenue() -> Measure {
    Measure::new(REVENUE_URI, MeasureType::Metric, "Revenue", "#,##0")
}

fn pop_visualization() -> MetadataObject {
    MetadataObject::new(VisualizationType::Table)
        .with_measure(revenue().with_pop())
        .with_category(Category::date("/gdc/md/p1/obj/21", "/gdc/md/p1/obj/20"))
}

#[tokio::test]
async fn test_execute_reads_result_and_annotates_headers() {
    let config = compile(&pop_visualization(), &CompileOptions::default()).unwrap();
    let pop_id = config.columns[1].clone();

    let transport = MockTransport::default()
        .with_response(
            &executions_path(PROJECT),
            start_response(json!([
                { "type": "attrLabel", "id": "date.year", "uri": "/gdc/md/p1/obj/21", "title": "Year" },
                { "type": "metric", "id": pop_id, "title": "Revenue - previous year" },
                { "type": "metric", "uri": REVENUE_URI, "title": "Revenue" }
            ])),
        )
        .with_response(
            RESULT_URL,
            TransportResponse::ok(json!({
                "tabularDataResult": {
                    "values": [["2020", "10", "12"], ["2021", "12", "15"]],
                    "warnings": []
                }
            })),
        );

    let result = execute(&transport, PROJECT, &config, &ExecuteOptions::default())
        .await
        .unwrap();

    assert!(result.is_loaded);
    assert!(!result.is_empty);
    assert_eq!(result.raw_data.len(), 2);
    assert_eq!(result.raw_data[1][2], json!("15"));

    assert_eq!(result.headers[0].measure_index, None);
    assert_eq!(result.headers[1].measure_index, Some(0));
    assert_eq!(result.headers[1].is_pop, Some(true));
    assert_eq!(result.headers[2].measure_index, Some(0));
    assert_eq!(result.headers[2].is_pop, None);

    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, "POST");
    assert_eq!(calls[1], ("POLL".to_string(), RESULT_URL.to_string(), None));

    let body = calls[0].2.as_ref().unwrap();
    assert_eq!(body["execution"]["columns"], json!(config.columns));
    assert_eq!(body["execution"]["definitions"][0]["metricDefinition"]["identifier"], json!(pop_id));
    assert!(body["execution"].get("where").is_none());
    assert!(body["execution"].get("orderBy").is_none());
}

#[tokio::test]
async fn test_no_content_is_empty_result() {
    let config = compile(
        &MetadataObject::new(VisualizationType::Table).with_measure(revenue()),
        &CompileOptions::default(),
    )
    .unwrap();

    let transport = MockTransport::default()
        .with_response(&executions_path(PROJECT), start_response(json!([])))
        .with_response(RESULT_URL, TransportResponse::no_content());

    let result = execute(&transport, PROJECT, &config, &ExecuteOptions::default())
        .await
        .unwrap();

    assert!(result.is_loaded);
    assert!(result.is_empty);
    assert!(result.raw_data.is_empty());
    assert!(result.warnings.is_empty());
}

#[tokio::test]
async fn test_extended_result() {
    let config = compile(
        &MetadataObject::new(VisualizationType::Table).with_measure(revenue()),
        &CompileOptions::default(),
    )
    .unwrap();

    let transport = MockTransport::default()
        .with_response(&executions_path(PROJECT), start_response(json!([])))
        .with_response(
            EXTENDED_URL,
            TransportResponse::ok(json!({
                "extendedTabularDataResult": {
                    "values": [[{ "id": "1", "name": "a" }]],
                    "warnings": [{ "message": "truncated" }]
                }
            })),
        );

    let options = ExecuteOptions::default().with_extended(true);
    let result = execute(&transport, PROJECT, &config, &options).await.unwrap();

    assert_eq!(result.raw_data, vec![vec![json!({ "id": "1", "name": "a" })]]);
    assert_eq!(result.warnings, vec![json!({ "message": "truncated" })]);
}

#[tokio::test]
async fn test_failed_start_propagates() {
    let config = compile(
        &MetadataObject::new(VisualizationType::Table).with_measure(revenue()),
        &CompileOptions::default(),
    )
    .unwrap();

    let transport = MockTransport::default()
        .with_response(&executions_path(PROJECT), TransportResponse::new(500, None));

    let err = execute(&transport, PROJECT, &config, &ExecuteOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 500, .. }));
    assert!(err.is_server_error());
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test]
async fn test_original_formats() {
    let filter = AttributeFilter {
        attribute: "/gdc/md/p1/obj/10".to_string(),
        display_form: "/gdc/md/p1/obj/11".to_string(),
        elements: vec![],
        negative_selection: false,
    };
    let md = MetadataObject::new(VisualizationType::Table)
        .with_measure(revenue().with_pop())
        .with_measure(Measure::new("/gdc/md/p1/obj/6", MeasureType::Metric, "Cost", "#,##0"))
        .with_measure(
            Measure::new("/gdc/md/p1/obj/7", MeasureType::Fact, "Amount", "#,##0").with_filter(filter),
        );

    let transport = MockTransport::default()
        .with_response(
            REVENUE_URI,
            TransportResponse::ok(json!({ "metric": { "content": { "format": "$#,##0.00" } } })),
        )
        .with_response("/gdc/md/p1/obj/7", TransportResponse::ok(json!({ "fact": {} })));

    let resolved = with_original_formats(&transport, &md).await.unwrap();

    assert_eq!(resolved.buckets.measures[0].format, "$#,##0.00");
    assert_eq!(resolved.buckets.measures[1].format, "#,##0");
    assert_eq!(resolved.buckets.measures[2].format, "#,##0");
    // Input is not modified.
    assert_eq!(md.buckets.measures[0].format, "#,##0");

    let mut paths: Vec<String> = transport.calls().into_iter().map(|(_, path, _)| path).collect();
    paths.sort();
    assert_eq!(paths, vec![REVENUE_URI.to_string(), "/gdc/md/p1/obj/7".to_string()]);
}

#[tokio::test]
async fn test_execute_visualization_uses_original_format() {
    let transport = MockTransport::default()
        .with_response(
            REVENUE_URI,
            TransportResponse::ok(json!({ "metric": { "content": { "format": "$#,##0.00" } } })),
        )
        .with_response(&executions_path(PROJECT), start_response(json!([])))
        .with_response(RESULT_URL, TransportResponse::no_content());

    let client = ExecutionClient::new(transport, PROJECT);
    let result = client.execute_visualization(&pop_visualization()).await.unwrap();
    assert!(result.is_empty);

    let calls = client.transport().calls();
    let post = calls.iter().find(|(method, _, _)| method == "POST").unwrap();
    let definition = &post.2.as_ref().unwrap()["execution"]["definitions"][0]["metricDefinition"];
    assert_eq!(definition["format"], "$#,##0.00");
}

#[tokio::test]
async fn test_format_lookup_failure_propagates() {
    let transport = MockTransport::default();
    let err = with_original_formats(&transport, &pop_visualization())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 404, .. }));
}

#[test]
fn test_annotate_headers_builds_new_values() {
    let headers = vec![
        ResultHeader {
            uri: Some(REVENUE_URI.to_string()),
            ..Default::default()
        },
        ResultHeader {
            uri: Some(REVENUE_URI.to_string()),
            ..Default::default()
        },
    ];
    let mappings = vec![
        MetricMapping {
            element: REVENUE_URI.to_string(),
            measure_index: 0,
            is_pop: None,
        },
        MetricMapping {
            element: REVENUE_URI.to_string(),
            measure_index: 1,
            is_pop: None,
        },
    ];

    let annotated = annotate_headers(&headers, &mappings);

    assert_eq!(annotated[0].measure_index, Some(0));
    assert_eq!(annotated[1].measure_index, Some(1));
    assert!(headers.iter().all(|h| h.measure_index.is_none()));
}

#[test]
fn test_header_keeps_unknown_fields() {
    let header: ResultHeader = serde_json::from_value(json!({
        "type": "metric",
        "id": "m1",
        "title": "Revenue",
        "format": "#,##0",
        "localIdentifier": "abc"
    }))
    .unwrap();

    assert_eq!(header.header_type.as_deref(), Some("metric"));
    assert_eq!(header.extra["localIdentifier"], json!("abc"));

    let value = serde_json::to_value(&header).unwrap();
    assert_eq!(value["localIdentifier"], "abc");
    assert!(value.get("measureIndex").is_none());
}
