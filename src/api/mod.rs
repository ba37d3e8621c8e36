mod report;

use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    Allocation, AllocationError, AllocationResult, ShareShift, allocate, compare_shares,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

const MIN_BUDGET: f64 = 500_000.0;
const MAX_BUDGET: f64 = 5_000_000.0;
const MIN_PROPERTIES: usize = 3;
const MAX_PROPERTIES: usize = 10;
const DEFAULT_PROPERTIES: usize = 5;
const MIN_PROPERTY_VALUE: f64 = 100_000.0;
const DEFAULT_FIRST_VALUE: f64 = 200_000.0;
const DEFAULT_VALUE_STEP: f64 = 50_000.0;
const DEFAULT_REVALUATION_UPLIFT: f64 = 40_000.0;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "reval",
    about = "Property tax revaluation simulator (fixed levy, redistributed shares)"
)]
struct Cli {
    #[arg(
        long,
        default_value_t = 1_000_000.0,
        help = "Total municipal budget (levy) to collect"
    )]
    budget: f64,
    #[arg(
        long,
        help = "Number of properties on the grand list; defaults to the number of values given, or 5"
    )]
    properties: Option<usize>,
    #[arg(
        long = "pre-value",
        help = "Pre-revaluation assessed value; repeat once per property"
    )]
    pre_values: Vec<f64>,
    #[arg(
        long = "post-value",
        help = "Post-revaluation assessed value; repeat once per property, defaults to pre + 40000"
    )]
    post_values: Vec<f64>,
    #[arg(long = "label", help = "Property label; repeat once per property, defaults to A, B, ...")]
    labels: Vec<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AllocatePayload {
    budget: Option<f64>,
    properties: Option<usize>,
    pre_values: Option<Vec<f64>>,
    post_values: Option<Vec<f64>>,
    labels: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AllocateQuery {
    budget: Option<f64>,
    properties: Option<usize>,
    pre_values: Option<String>,
    post_values: Option<String>,
    labels: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
struct ScenarioInputs {
    budget: f64,
    labels: Vec<String>,
    pre_values: Vec<f64>,
    post_values: Vec<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AllocateResponse {
    budget: f64,
    pre_grand_list: f64,
    post_grand_list: f64,
    mill_rate_pre: f64,
    mill_rate_post: f64,
    pre_tax_total: i64,
    post_tax_total: i64,
    grand_list_growth_percent: f64,
    rows: Vec<RowResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RowResponse {
    #[serde(flatten)]
    result: AllocationResult,
    percent_change_label: String,
    value_growth_percent: f64,
    share_shift: ShareShift,
    break_even_post_value: Option<i64>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn run_cli<I, T>(args: I) -> Result<String, String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    let format = cli.format;
    let inputs = build_inputs(cli)?;
    let allocation = run_scenario(&inputs).map_err(|e| e.to_string())?;

    match format {
        OutputFormat::Table => Ok(report::render_report(
            &allocation,
            &compare_shares(&allocation),
        )),
        OutputFormat::Json => serde_json::to_string_pretty(&build_allocate_response(&allocation))
            .map_err(|e| format!("Failed to serialize allocation: {e}")),
    }
}

fn build_inputs(cli: Cli) -> Result<ScenarioInputs, String> {
    if !cli.budget.is_finite() || !(MIN_BUDGET..=MAX_BUDGET).contains(&cli.budget) {
        return Err(format!(
            "--budget must be between {MIN_BUDGET} and {MAX_BUDGET}"
        ));
    }

    let count = cli
        .properties
        .or_else(|| {
            [cli.pre_values.len(), cli.post_values.len(), cli.labels.len()]
                .into_iter()
                .find(|&len| len > 0)
        })
        .unwrap_or(DEFAULT_PROPERTIES);

    if !(MIN_PROPERTIES..=MAX_PROPERTIES).contains(&count) {
        return Err(format!(
            "--properties must be between {MIN_PROPERTIES} and {MAX_PROPERTIES}"
        ));
    }

    let labels = if cli.labels.is_empty() {
        (0..count).map(default_label).collect()
    } else {
        expect_per_property("--label", cli.labels.len(), count)?;
        if let Some(blank) = cli.labels.iter().position(|l| l.trim().is_empty()) {
            return Err(format!("--label #{} must not be blank", blank + 1));
        }
        cli.labels
    };

    let pre_values = if cli.pre_values.is_empty() {
        (0..count)
            .map(|i| DEFAULT_FIRST_VALUE + DEFAULT_VALUE_STEP * i as f64)
            .collect()
    } else {
        expect_per_property("--pre-value", cli.pre_values.len(), count)?;
        cli.pre_values
    };

    let post_values = if cli.post_values.is_empty() {
        pre_values
            .iter()
            .map(|v| v + DEFAULT_REVALUATION_UPLIFT)
            .collect()
    } else {
        expect_per_property("--post-value", cli.post_values.len(), count)?;
        cli.post_values
    };

    for (name, values) in [("--pre-value", &pre_values), ("--post-value", &post_values)] {
        for (label, value) in labels.iter().zip(values) {
            if !value.is_finite() || *value < MIN_PROPERTY_VALUE {
                return Err(format!(
                    "{name} for property {label} must be >= {MIN_PROPERTY_VALUE}"
                ));
            }
        }
    }

    Ok(ScenarioInputs {
        budget: cli.budget,
        labels,
        pre_values,
        post_values,
    })
}

fn expect_per_property(name: &str, given: usize, count: usize) -> Result<(), String> {
    if given != count {
        return Err(format!(
            "{name} must be given once per property (expected {count}, got {given})"
        ));
    }
    Ok(())
}

fn default_label(index: usize) -> String {
    char::from(b'A' + (index % 26) as u8).to_string()
}

fn run_scenario(inputs: &ScenarioInputs) -> Result<Allocation, AllocationError> {
    allocate(
        &inputs.labels,
        &inputs.pre_values,
        &inputs.post_values,
        inputs.budget,
    )
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/allocate",
            get(allocate_get_handler).post(allocate_post_handler),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "revaluation HTTP API listening");
    tracing::info!("local access: http://127.0.0.1:{port}/");

    axum::serve(listener, router()).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn allocate_get_handler(Query(query): Query<AllocateQuery>) -> Response {
    match payload_from_query(query) {
        Ok(payload) => allocate_handler_impl(payload).await,
        Err(msg) => reject_request(StatusCode::BAD_REQUEST, &msg),
    }
}

async fn allocate_post_handler(Json(payload): Json<AllocatePayload>) -> Response {
    allocate_handler_impl(payload).await
}

async fn allocate_handler_impl(payload: AllocatePayload) -> Response {
    let inputs = match api_request_from_payload(payload) {
        Ok(inputs) => inputs,
        Err(msg) => return reject_request(StatusCode::BAD_REQUEST, &msg),
    };

    match run_scenario(&inputs) {
        Ok(allocation) => {
            tracing::debug!(
                properties = allocation.results.len(),
                mill_rate_pre = allocation.mill_rate_pre,
                mill_rate_post = allocation.mill_rate_post,
                "allocation computed"
            );
            json_response(StatusCode::OK, build_allocate_response(&allocation))
        }
        Err(err) => reject_request(StatusCode::UNPROCESSABLE_ENTITY, &err.to_string()),
    }
}

fn reject_request(status: StatusCode, msg: &str) -> Response {
    tracing::warn!(status = status.as_u16(), error = msg, "allocation request rejected");
    error_response(status, msg)
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

fn payload_from_query(query: AllocateQuery) -> Result<AllocatePayload, String> {
    Ok(AllocatePayload {
        budget: query.budget,
        properties: query.properties,
        pre_values: query
            .pre_values
            .as_deref()
            .map(|raw| parse_value_list("preValues", raw))
            .transpose()?,
        post_values: query
            .post_values
            .as_deref()
            .map(|raw| parse_value_list("postValues", raw))
            .transpose()?,
        labels: query.labels.as_deref().map(|raw| {
            raw.split(',')
                .map(|label| label.trim().to_string())
                .collect()
        }),
    })
}

fn parse_value_list(name: &str, raw: &str) -> Result<Vec<f64>, String> {
    raw.split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<f64>()
                .map_err(|_| format!("{name} contains a non-numeric entry: {part:?}"))
        })
        .collect()
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ScenarioInputs, String> {
    let payload = serde_json::from_str::<AllocatePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload)
}

fn api_request_from_payload(payload: AllocatePayload) -> Result<ScenarioInputs, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.budget {
        cli.budget = v;
    }
    if let Some(v) = payload.properties {
        cli.properties = Some(v);
    }
    if let Some(v) = payload.pre_values {
        cli.pre_values = v;
    }
    if let Some(v) = payload.post_values {
        cli.post_values = v;
    }
    if let Some(v) = payload.labels {
        cli.labels = v;
    }

    build_inputs(cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        budget: 1_000_000.0,
        properties: None,
        pre_values: Vec::new(),
        post_values: Vec::new(),
        labels: Vec::new(),
        format: OutputFormat::Json,
    }
}

fn build_allocate_response(allocation: &Allocation) -> AllocateResponse {
    let comparisons = compare_shares(allocation);
    let grand_list_growth_percent = comparisons
        .first()
        .map(|c| c.grand_list_growth_percent)
        .unwrap_or(0.0);

    let rows = allocation
        .results
        .iter()
        .zip(comparisons)
        .map(|(result, comparison)| RowResponse {
            result: result.clone(),
            percent_change_label: format!("{}%", result.percent_change),
            value_growth_percent: comparison.value_growth_percent,
            share_shift: comparison.shift,
            break_even_post_value: comparison.break_even_post_value,
        })
        .collect();

    AllocateResponse {
        budget: allocation.levy,
        pre_grand_list: allocation.pre_total,
        post_grand_list: allocation.post_total,
        mill_rate_pre: allocation.mill_rate_pre,
        mill_rate_post: allocation.mill_rate_post,
        pre_tax_total: allocation.pre_tax_total(),
        post_tax_total: allocation.post_tax_total(),
        grand_list_growth_percent,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use std::fs;
    use std::path::Path;
    use tower::ServiceExt;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_cli() -> Cli {
        default_cli_for_api()
    }

    fn assert_golden_snapshot(path: &str, actual: &str) {
        let update = matches!(
            std::env::var("UPDATE_GOLDEN").as_deref(),
            Ok("1") | Ok("true") | Ok("TRUE")
        );
        let snapshot_path = Path::new(path);

        if update {
            if let Some(parent) = snapshot_path.parent() {
                fs::create_dir_all(parent).expect("failed to create snapshot directory");
            }
            fs::write(snapshot_path, actual).expect("failed to write golden snapshot");
            return;
        }

        let expected = fs::read_to_string(snapshot_path).unwrap_or_else(|_| {
            panic!("missing golden snapshot at {path}; run with UPDATE_GOLDEN=1 to generate")
        });
        assert_eq!(
            actual, expected,
            "snapshot mismatch for {path}; run with UPDATE_GOLDEN=1 to refresh if expected"
        );
    }

    async fn send(request: Request<Body>) -> (StatusCode, Option<String>, serde_json::Value) {
        let response = router().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let cache_control = response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let body = serde_json::from_slice(&bytes).expect("body should be JSON");
        (status, cache_control, body)
    }

    #[test]
    fn build_inputs_defaults_match_simulator_homes() {
        let inputs = build_inputs(sample_cli()).expect("valid defaults");

        assert_approx(inputs.budget, 1_000_000.0);
        assert_eq!(inputs.labels, vec!["A", "B", "C", "D", "E"]);
        assert_eq!(
            inputs.pre_values,
            vec![200_000.0, 250_000.0, 300_000.0, 350_000.0, 400_000.0]
        );
        assert_eq!(
            inputs.post_values,
            vec![240_000.0, 290_000.0, 340_000.0, 390_000.0, 440_000.0]
        );
    }

    #[test]
    fn build_inputs_infers_property_count_from_values() {
        let mut cli = sample_cli();
        cli.pre_values = vec![200_000.0, 250_000.0, 300_000.0];
        cli.post_values = vec![240_000.0, 290_000.0, 300_000.0];

        let inputs = build_inputs(cli).expect("valid inputs");
        assert_eq!(inputs.labels, vec!["A", "B", "C"]);
        assert_eq!(inputs.post_values[2], 300_000.0);
    }

    #[test]
    fn build_inputs_rejects_budget_outside_slider_range() {
        for budget in [499_999.0, 5_000_001.0, f64::NAN] {
            let mut cli = sample_cli();
            cli.budget = budget;
            let err = build_inputs(cli).expect_err("must reject budget");
            assert!(err.contains("--budget"), "{err}");
        }
    }

    #[test]
    fn build_inputs_rejects_property_count_outside_range() {
        for count in [2, 11] {
            let mut cli = sample_cli();
            cli.properties = Some(count);
            let err = build_inputs(cli).expect_err("must reject count");
            assert!(err.contains("--properties"), "{err}");
        }
    }

    #[test]
    fn build_inputs_rejects_value_list_of_wrong_length() {
        let mut cli = sample_cli();
        cli.properties = Some(4);
        cli.pre_values = vec![200_000.0, 250_000.0, 300_000.0];

        let err = build_inputs(cli).expect_err("must reject short value list");
        assert!(err.contains("--pre-value"), "{err}");
        assert!(err.contains("expected 4, got 3"), "{err}");
    }

    #[test]
    fn build_inputs_rejects_values_below_minimum() {
        let mut cli = sample_cli();
        cli.pre_values = vec![200_000.0, 99_999.0, 300_000.0];

        let err = build_inputs(cli).expect_err("must reject low value");
        assert!(err.contains("--pre-value for property B"), "{err}");
    }

    #[test]
    fn build_inputs_rejects_blank_labels() {
        let mut cli = sample_cli();
        cli.labels = vec!["North".into(), " ".into(), "South".into()];

        let err = build_inputs(cli).expect_err("must reject blank label");
        assert!(err.contains("--label #2"), "{err}");
    }

    #[test]
    fn cli_parses_repeated_value_flags() {
        let cli = Cli::parse_from([
            "reval",
            "--budget",
            "2000000",
            "--pre-value",
            "100000",
            "--pre-value",
            "150000",
            "--pre-value",
            "250000",
            "--label",
            "Mill",
            "--label",
            "Farm",
            "--label",
            "Shop",
            "--format",
            "json",
        ]);
        assert_eq!(cli.format, OutputFormat::Json);

        let inputs = build_inputs(cli).expect("valid inputs");
        assert_approx(inputs.budget, 2_000_000.0);
        assert_eq!(inputs.labels, vec!["Mill", "Farm", "Shop"]);
        assert_eq!(inputs.post_values, vec![140_000.0, 190_000.0, 290_000.0]);
    }

    #[test]
    fn run_cli_renders_table_for_three_home_scenario() {
        let output = run_cli([
            "reval",
            "--pre-value",
            "200000",
            "--pre-value",
            "250000",
            "--pre-value",
            "300000",
            "--post-value",
            "240000",
            "--post-value",
            "290000",
            "--post-value",
            "300000",
        ])
        .expect("valid scenario");

        assert!(output.contains("266667"), "{output}");
        assert!(output.contains("361446"), "{output}");
        assert!(output.contains("1333.33"), "{output}");
        assert!(output.contains("1204.82"), "{output}");
    }

    #[test]
    fn api_request_from_json_parses_web_keys() {
        let json = r#"{
          "budget": 2500000,
          "properties": 3,
          "preValues": [150000, 300000, 450000],
          "postValues": [180000, 310000, 600000],
          "labels": ["Elm", "Oak", "Pine"]
        }"#;
        let inputs = api_request_from_json(json).expect("json should parse");

        assert_approx(inputs.budget, 2_500_000.0);
        assert_eq!(inputs.labels, vec!["Elm", "Oak", "Pine"]);
        assert_eq!(inputs.pre_values, vec![150_000.0, 300_000.0, 450_000.0]);
        assert_eq!(inputs.post_values, vec![180_000.0, 310_000.0, 600_000.0]);
    }

    #[test]
    fn api_request_from_json_rejects_malformed_payload() {
        let err = api_request_from_json(r#"{"preValues": "lots"}"#).expect_err("bad payload");
        assert!(err.starts_with("Invalid API JSON payload"), "{err}");
    }

    #[test]
    fn payload_from_query_splits_comma_lists() {
        let query = AllocateQuery {
            budget: Some(750_000.0),
            properties: None,
            pre_values: Some("100000, 200000,300000".to_string()),
            post_values: None,
            labels: Some("X,Y,Z".to_string()),
        };
        let payload = payload_from_query(query).expect("valid query");
        assert_eq!(payload.pre_values, Some(vec![100_000.0, 200_000.0, 300_000.0]));
        assert_eq!(payload.labels, Some(vec!["X".into(), "Y".into(), "Z".into()]));

        let bad = AllocateQuery {
            post_values: Some("1,two".to_string()),
            ..AllocateQuery::default()
        };
        let err = payload_from_query(bad).expect_err("non-numeric entry");
        assert!(err.contains("postValues"), "{err}");
    }

    #[test]
    fn allocate_response_serialization_contains_expected_fields() {
        let inputs = build_inputs(sample_cli()).expect("valid defaults");
        let allocation = run_scenario(&inputs).expect("valid allocation");
        let json = serde_json::to_string(&build_allocate_response(&allocation))
            .expect("response should serialize");

        for key in [
            "\"millRatePre\"",
            "\"millRatePost\"",
            "\"preGrandList\"",
            "\"rows\"",
            "\"preTax\"",
            "\"postTax\"",
            "\"taxChange\"",
            "\"percentChange\"",
            "\"percentChangeLabel\"",
            "\"shareShift\"",
            "\"breakEvenPostValue\"",
        ] {
            assert!(json.contains(key), "missing {key} in {json}");
        }
    }

    #[test]
    fn golden_snapshot_default_scenario_json() {
        let inputs = build_inputs(sample_cli()).expect("valid defaults");
        let allocation = run_scenario(&inputs).expect("valid allocation");
        let json = format!(
            "{}\n",
            serde_json::to_string(&build_allocate_response(&allocation))
                .expect("response should serialize")
        );

        assert_golden_snapshot("tests/golden/default_scenario.json", &json);
    }

    #[tokio::test]
    async fn get_allocate_serves_default_scenario() {
        let request = Request::builder()
            .uri("/api/allocate")
            .body(Body::empty())
            .expect("valid request");
        let (status, cache_control, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert_eq!(body["rows"].as_array().map(Vec::len), Some(5));
        assert_eq!(body["preTaxTotal"], 1_000_000);
        assert_eq!(body["rows"][0]["percentChangeLabel"], "6%");
    }

    #[tokio::test]
    async fn get_allocate_accepts_comma_separated_values() {
        let request = Request::builder()
            .uri("/api/allocate?budget=1000000&preValues=200000,250000,300000&postValues=240000,290000,300000")
            .body(Body::empty())
            .expect("valid request");
        let (status, _, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rows"][2]["postTax"], 361_446);
        assert_eq!(body["millRatePost"], 1204.82);
    }

    #[tokio::test]
    async fn post_allocate_rejects_out_of_range_inputs() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/allocate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"properties": 2}"#))
            .expect("valid request");
        let (status, _, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            body["error"]
                .as_str()
                .is_some_and(|msg| msg.contains("--properties"))
        );
    }

    #[tokio::test]
    async fn post_allocate_reports_allocator_failure_as_unprocessable() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/allocate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{
                  "budget": 500000,
                  "preValues": [100000, 1000000000000, 1000000000000],
                  "postValues": [100000, 1000000000000, 1000000000000]
                }"#,
            ))
            .expect("valid request");
        let (status, cache_control, body) = send(request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        let error = body["error"].as_str().expect("error message");
        assert!(error.contains("'A'"), "{error}");
        assert!(error.contains("percent change undefined"), "{error}");
    }

    #[test]
    fn app_js_escapes_labels_before_inserting_markup() {
        assert!(APP_JS.contains("escapeHtml(row.label)"));
        assert!(!APP_JS.contains("${row.label}"));
    }

    #[tokio::test]
    async fn unknown_route_returns_json_not_found() {
        let request = Request::builder()
            .uri("/nope")
            .body(Body::empty())
            .expect("valid request");
        let (status, _, body) = send(request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found");
    }
}
