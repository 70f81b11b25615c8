//! Gauge runner messages (`spec.proto` / `messages.proto`)
//!
//! Only the fields the report reads are declared; prost skips the rest, so
//! newer runner versions still decode.

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProtoSuiteResult {
    #[prost(message, repeated, tag = "1")]
    pub spec_results: Vec<ProtoSpecResult>,
    #[prost(message, optional, tag = "2")]
    pub pre_hook_failure: Option<ProtoHookFailure>,
    #[prost(message, optional, tag = "3")]
    pub post_hook_failure: Option<ProtoHookFailure>,
    #[prost(bool, tag = "4")]
    pub failed: bool,
    #[prost(int32, tag = "5")]
    pub specs_failed_count: i32,
    #[prost(int64, tag = "6")]
    pub execution_time: i64,
    #[prost(float, tag = "7")]
    pub success_rate: f32,
    #[prost(string, tag = "8")]
    pub environment: String,
    #[prost(string, tag = "9")]
    pub tags: String,
    #[prost(string, tag = "10")]
    pub project_name: String,
    #[prost(string, tag = "11")]
    pub timestamp: String,
    #[prost(int32, tag = "12")]
    pub specs_skipped_count: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProtoSpecResult {
    #[prost(message, optional, tag = "1")]
    pub proto_spec: Option<ProtoSpec>,
    #[prost(int32, tag = "2")]
    pub scenario_count: i32,
    #[prost(int32, tag = "3")]
    pub scenario_failed_count: i32,
    #[prost(bool, tag = "4")]
    pub failed: bool,
    #[prost(int32, repeated, tag = "5")]
    pub failed_data_table_rows: Vec<i32>,
    #[prost(int64, tag = "6")]
    pub execution_time: i64,
    #[prost(bool, tag = "7")]
    pub skipped: bool,
    #[prost(int32, tag = "8")]
    pub scenario_skipped_count: i32,
    #[prost(int32, repeated, tag = "9")]
    pub skipped_data_table_rows: Vec<i32>,
    #[prost(message, repeated, tag = "10")]
    pub errors: Vec<Error>,
    #[prost(int64, tag = "11")]
    pub timestamp: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProtoSpec {
    #[prost(string, tag = "1")]
    pub spec_heading: String,
    #[prost(message, repeated, tag = "2")]
    pub items: Vec<ProtoItem>,
    #[prost(bool, tag = "3")]
    pub is_table_driven: bool,
    #[prost(message, repeated, tag = "4")]
    pub pre_hook_failures: Vec<ProtoHookFailure>,
    #[prost(message, repeated, tag = "5")]
    pub post_hook_failures: Vec<ProtoHookFailure>,
    #[prost(string, tag = "6")]
    pub file_name: String,
    #[prost(string, repeated, tag = "7")]
    pub tags: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ItemType {
    Step = 0,
    Comment = 1,
    Concept = 2,
    Scenario = 3,
    TableDrivenScenario = 4,
    Table = 5,
    Tags = 6,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProtoItem {
    #[prost(enumeration = "ItemType", tag = "1")]
    pub item_type: i32,
    #[prost(message, optional, tag = "2")]
    pub step: Option<ProtoStep>,
    #[prost(message, optional, tag = "3")]
    pub concept: Option<ProtoConcept>,
    #[prost(message, optional, tag = "4")]
    pub scenario: Option<ProtoScenario>,
    #[prost(message, optional, tag = "5")]
    pub table_driven_scenario: Option<ProtoTableDrivenScenario>,
    #[prost(message, optional, tag = "6")]
    pub comment: Option<ProtoComment>,
    #[prost(message, optional, tag = "7")]
    pub table: Option<ProtoTable>,
    #[prost(message, optional, tag = "8")]
    pub tags: Option<ProtoTags>,
    #[prost(string, tag = "9")]
    pub file_name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ExecutionStatus {
    NotExecuted = 0,
    Passed = 1,
    Failed = 2,
    Skipped = 3,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProtoScenario {
    #[prost(string, tag = "1")]
    pub scenario_heading: String,
    #[prost(bool, tag = "2")]
    pub failed: bool,
    #[prost(message, repeated, tag = "3")]
    pub contexts: Vec<ProtoItem>,
    #[prost(message, repeated, tag = "4")]
    pub scenario_items: Vec<ProtoItem>,
    #[prost(message, optional, tag = "5")]
    pub pre_hook_failure: Option<ProtoHookFailure>,
    #[prost(message, optional, tag = "6")]
    pub post_hook_failure: Option<ProtoHookFailure>,
    #[prost(string, repeated, tag = "7")]
    pub tags: Vec<String>,
    #[prost(int64, tag = "8")]
    pub execution_time: i64,
    #[prost(bool, tag = "9")]
    pub skipped: bool,
    #[prost(string, repeated, tag = "10")]
    pub skip_errors: Vec<String>,
    #[prost(string, tag = "11")]
    pub id: String,
    #[prost(message, repeated, tag = "12")]
    pub tear_down_steps: Vec<ProtoItem>,
    #[prost(enumeration = "ExecutionStatus", tag = "14")]
    pub execution_status: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProtoTableDrivenScenario {
    #[prost(message, optional, tag = "1")]
    pub scenario: Option<ProtoScenario>,
    #[prost(int32, tag = "2")]
    pub table_row_index: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProtoStep {
    #[prost(string, tag = "1")]
    pub actual_text: String,
    #[prost(string, tag = "2")]
    pub parsed_text: String,
    #[prost(message, repeated, tag = "3")]
    pub fragments: Vec<Fragment>,
    #[prost(message, optional, tag = "4")]
    pub step_execution_result: Option<ProtoStepExecutionResult>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProtoConcept {
    #[prost(message, optional, tag = "1")]
    pub concept_step: Option<ProtoStep>,
    #[prost(message, repeated, tag = "2")]
    pub steps: Vec<ProtoItem>,
    #[prost(message, optional, tag = "3")]
    pub concept_execution_result: Option<ProtoStepExecutionResult>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProtoTags {
    #[prost(string, repeated, tag = "1")]
    pub tags: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum FragmentType {
    Text = 0,
    Parameter = 1,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Fragment {
    #[prost(enumeration = "FragmentType", tag = "1")]
    pub fragment_type: i32,
    #[prost(string, tag = "2")]
    pub text: String,
    #[prost(message, optional, tag = "3")]
    pub parameter: Option<Parameter>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ParameterType {
    Static = 0,
    Dynamic = 1,
    SpecialString = 2,
    SpecialTable = 3,
    Table = 4,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Parameter {
    #[prost(enumeration = "ParameterType", tag = "1")]
    pub parameter_type: i32,
    #[prost(string, tag = "2")]
    pub value: String,
    #[prost(string, tag = "3")]
    pub name: String,
    #[prost(message, optional, tag = "4")]
    pub table: Option<ProtoTable>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProtoComment {
    #[prost(string, tag = "1")]
    pub text: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProtoTable {
    #[prost(message, optional, tag = "1")]
    pub headers: Option<ProtoTableRow>,
    #[prost(message, repeated, tag = "2")]
    pub rows: Vec<ProtoTableRow>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProtoTableRow {
    #[prost(string, repeated, tag = "1")]
    pub cells: Vec<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProtoStepExecutionResult {
    #[prost(message, optional, tag = "1")]
    pub execution_result: Option<ProtoExecutionResult>,
    #[prost(message, optional, tag = "2")]
    pub pre_hook_failure: Option<ProtoHookFailure>,
    #[prost(message, optional, tag = "3")]
    pub post_hook_failure: Option<ProtoHookFailure>,
    #[prost(bool, tag = "4")]
    pub skipped: bool,
    #[prost(string, tag = "5")]
    pub skipped_reason: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProtoExecutionResult {
    #[prost(bool, tag = "1")]
    pub failed: bool,
    #[prost(bool, tag = "2")]
    pub recoverable_error: bool,
    #[prost(string, tag = "3")]
    pub error_message: String,
    #[prost(string, tag = "4")]
    pub stack_trace: String,
    #[prost(bytes = "vec", tag = "5")]
    pub screen_shot: Vec<u8>,
    #[prost(int64, tag = "6")]
    pub execution_time: i64,
    #[prost(string, repeated, tag = "7")]
    pub message: Vec<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProtoHookFailure {
    #[prost(string, tag = "1")]
    pub stack_trace: String,
    #[prost(string, tag = "2")]
    pub error_message: String,
    #[prost(bytes = "vec", tag = "3")]
    pub screen_shot: Vec<u8>,
    #[prost(int32, tag = "4")]
    pub table_row_index: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ErrorType {
    ParseError = 0,
    ValidationError = 1,
}

/// Parse or validation error attached to a spec result
#[derive(Clone, PartialEq, prost::Message)]
pub struct Error {
    #[prost(enumeration = "ErrorType", tag = "1")]
    pub error_type: i32,
    #[prost(string, tag = "2")]
    pub filename: String,
    #[prost(int32, tag = "3")]
    pub line_number: i32,
    #[prost(string, tag = "4")]
    pub message: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SuiteExecutionResult {
    #[prost(message, optional, tag = "1")]
    pub suite_result: Option<ProtoSuiteResult>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct KillProcessRequest {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum MessageType {
    ExecutionStarting = 0,
    SpecExecutionStarting = 1,
    SpecExecutionEnding = 2,
    ScenarioExecutionStarting = 3,
    ScenarioExecutionEnding = 4,
    StepExecutionStarting = 5,
    StepExecutionEnding = 6,
    ExecuteStep = 7,
    ExecutionEnding = 8,
    StepValidateRequest = 9,
    StepValidateResponse = 10,
    ExecutionStatusResponse = 11,
    StepNamesRequest = 12,
    StepNamesResponse = 13,
    KillProcessRequest = 14,
    SuiteExecutionResult = 15,
}

/// Envelope sent by the runner over the plugin connection
#[derive(Clone, PartialEq, prost::Message)]
pub struct Message {
    #[prost(enumeration = "MessageType", tag = "1")]
    pub message_type: i32,
    #[prost(int64, tag = "2")]
    pub message_id: i64,
    #[prost(message, optional, tag = "17")]
    pub suite_execution_result: Option<SuiteExecutionResult>,
    #[prost(message, optional, tag = "18")]
    pub kill_process_request: Option<KillProcessRequest>,
}
