//! Execution of a compiled configuration and interpretation of its result.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use super::error::{ClientError, ClientResult};
use super::formats::with_original_formats;
use super::transport::Transport;
use crate::compile::CompileOptions;
use crate::execution::{ExecutionAssembler, ExecutionConfiguration, MetricMapping, OrderBy};
use crate::filter::WhereClause;
use crate::metric::Definition;
use crate::model::MetadataObject;

/// Options of the execution step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecuteOptions {
    /// Read `extendedTabularDataResult` instead of `tabularDataResult`.
    pub extended: bool,
}

impl ExecuteOptions {
    pub fn with_extended(mut self, extended: bool) -> Self {
        self.extended = extended;
        self
    }

    /// Key of the result url in the start response and of the data in the result.
    pub fn result_key(&self) -> &'static str {
        if self.extended {
            "extendedTabularDataResult"
        } else {
            "tabularDataResult"
        }
    }
}

/// Path starting an execution in `project_id`.
pub fn executions_path(project_id: &str) -> String {
    format!("/gdc/internal/projects/{project_id}/experimental/executions")
}

/// Body of the start-execution request.
#[derive(Debug, Serialize)]
pub struct ExecutionRequest<'a> {
    pub execution: ExecutionBody<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionBody<'a> {
    pub columns: &'a [String],
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<&'a WhereClause>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<&'a [OrderBy]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definitions: Option<&'a [Definition]>,
}

impl<'a> ExecutionRequest<'a> {
    /// Request for `config`; empty `where`, `orderBy` and `definitions` are left out.
    pub fn new(config: &'a ExecutionConfiguration) -> Self {
        Self {
            execution: ExecutionBody {
                columns: &config.columns,
                where_clause: (!config.where_clause.is_empty()).then_some(&config.where_clause),
                order_by: (!config.order_by.is_empty()).then_some(config.order_by.as_slice()),
                definitions: (!config.definitions.is_empty())
                    .then_some(config.definitions.as_slice()),
            },
        }
    }
}

/// Header of a result column as returned by the server, plus the measure it
/// was generated for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultHeader {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub header_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measure_index: Option<usize>,
    #[serde(default, rename = "isPoP", skip_serializing_if = "Option::is_none")]
    pub is_pop: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResultHeader {
    fn refers_to(&self, element: &str) -> bool {
        self.id.as_deref() == Some(element) || self.uri.as_deref() == Some(element)
    }
}

/// Headers annotated with the measure index of their metric mapping.
///
/// Each mapping annotates the first header with a matching id or uri that is
/// not annotated yet. The input headers are left untouched.
pub fn annotate_headers(headers: &[ResultHeader], mappings: &[MetricMapping]) -> Vec<ResultHeader> {
    let mut annotated = headers.to_vec();

    for mapping in mappings {
        if let Some(header) = annotated
            .iter_mut()
            .find(|h| h.measure_index.is_none() && h.refers_to(&mapping.element))
        {
            header.measure_index = Some(mapping.measure_index);
            header.is_pop = mapping.is_pop;
        }
    }

    annotated
}

/// Data of an executed visualization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub is_loaded: bool,
    pub headers: Vec<ResultHeader>,
    pub raw_data: Vec<Vec<Value>>,
    pub warnings: Vec<Value>,
    pub is_empty: bool,
}

fn field_or_default<T: serde::de::DeserializeOwned + Default>(
    object: &Value,
    field: &str,
) -> ClientResult<T> {
    match object.get(field) {
        Some(value) if !value.is_null() => Ok(serde_json::from_value(value.clone())?),
        _ => Ok(T::default()),
    }
}

/// Start the execution of `config` and read its result.
pub async fn execute<T: Transport + ?Sized>(
    transport: &T,
    project_id: &str,
    config: &ExecutionConfiguration,
    options: &ExecuteOptions,
) -> ClientResult<ExecutionResult> {
    let path = executions_path(project_id);
    let request = serde_json::to_value(ExecutionRequest::new(config))?;
    info!(project_id, columns = config.columns.len(), "starting execution");

    let started = transport.post_json(&path, &request).await?.into_json(&path)?;
    let execution_result = started
        .get("executionResult")
        .ok_or_else(|| ClientError::missing(&path, "executionResult"))?;

    let headers: Vec<ResultHeader> = field_or_default(execution_result, "headers")?;
    let headers = annotate_headers(&headers, &config.metric_mappings);

    let result_key = options.result_key();
    let result_url = execution_result
        .get(result_key)
        .and_then(Value::as_str)
        .ok_or_else(|| ClientError::missing(&path, result_key))?;

    let polled = transport.poll_resource(result_url).await?;
    if polled.is_no_content() {
        info!(project_id, "execution returned no data");
        return Ok(ExecutionResult {
            is_loaded: true,
            headers,
            raw_data: Vec::new(),
            warnings: Vec::new(),
            is_empty: true,
        });
    }

    let body = polled.into_json(result_url)?;
    let (raw_data, warnings): (Vec<Vec<Value>>, Vec<Value>) = match body.get(result_key) {
        Some(data) => (field_or_default(data, "values")?, field_or_default(data, "warnings")?),
        None => (Vec::new(), Vec::new()),
    };

    info!(project_id, rows = raw_data.len(), "execution finished");
    Ok(ExecutionResult {
        is_loaded: true,
        headers,
        raw_data,
        warnings,
        is_empty: false,
    })
}

/// Executes visualizations in one project.
///
/// # Example
///
/// ```ignore
/// use vizexec::client::{ExecutionClient, HttpTransport};
/// use vizexec::config::Settings;
///
/// let settings = Settings::load()?;
/// let client = ExecutionClient::new(HttpTransport::from_settings(&settings)?, "p1");
/// let result = client.execute_visualization(&md).await?;
/// ```
pub struct ExecutionClient<T: Transport> {
    transport: T,
    project_id: String,
    assembler: ExecutionAssembler,
    compile_options: CompileOptions,
    execute_options: ExecuteOptions,
}

impl<T: Transport> ExecutionClient<T> {
    pub fn new(transport: T, project_id: impl Into<String>) -> Self {
        Self {
            transport,
            project_id: project_id.into(),
            assembler: ExecutionAssembler::new(),
            compile_options: CompileOptions::default(),
            execute_options: ExecuteOptions::default(),
        }
    }

    pub fn with_assembler(mut self, assembler: ExecutionAssembler) -> Self {
        self.assembler = assembler;
        self
    }

    pub fn with_compile_options(mut self, options: CompileOptions) -> Self {
        self.compile_options = options;
        self
    }

    pub fn with_execute_options(mut self, options: ExecuteOptions) -> Self {
        self.execute_options = options;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute an already compiled configuration.
    pub async fn execute(&self, config: &ExecutionConfiguration) -> ClientResult<ExecutionResult> {
        execute(&self.transport, &self.project_id, config, &self.execute_options).await
    }

    /// Resolve original formats, compile `md` and execute it.
    pub async fn execute_visualization(&self, md: &MetadataObject) -> ClientResult<ExecutionResult> {
        let md = with_original_formats(&self.transport, md).await?;
        let config = self.assembler.assemble(&md, &self.compile_options)?;
        self.execute(&config).await
    }
}
