use crate::{
    schemas::{validation::validate_json, Validator},
    Result, TripError,
};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

/// A tool call that the agents or the orchestrator can invoke
pub trait Tool: Send + Sync + std::fmt::Debug {
    /// The name of the tool (used in tool calls)
    fn name(&self) -> &'static str;

    /// A description of what the tool does
    fn description(&self) -> &'static str;

    /// JSON Schema for the tool's parameters
    fn parameters_schema(&self) -> Value;

    /// Execute the tool with given parameters
    fn execute(
        &self,
        parameters: Value,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Value>> + Send + '_>>;
}

/// Registry for available tools
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
    validator: Validator,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with every normalizer tool
    pub fn with_normalizers() -> Self {
        let mut registry = Self::new();
        super::normalizers::register_all(&mut registry);
        registry
    }

    /// Check parameters against each tool's schema before executing
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        if self
            .tools
            .insert(tool.name().to_string(), Box::new(tool))
            .is_some()
        {
            warn!(target: "trip_office::tools", "replaced an already registered tool");
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// All registered tools, ordered by name
    pub fn list(&self) -> Vec<&dyn Tool> {
        let mut tools: Vec<&dyn Tool> = self.tools.values().map(|tool| tool.as_ref()).collect();
        tools.sort_by_key(|tool| tool.name());
        tools
    }

    /// Tool definitions in function-calling form
    pub fn to_tool_definitions(&self) -> Vec<Value> {
        self.list()
            .into_iter()
            .map(|tool| {
                serde_json::json!({
                    "type": "function",
                    "function": {
                        "name": tool.name(),
                        "description": tool.description(),
                        "parameters": tool.parameters_schema()
                    }
                })
            })
            .collect()
    }

    /// Execute a tool call by name
    pub async fn execute(&self, name: &str, parameters: Value) -> Result<Value> {
        let tool = self
            .get(name)
            .ok_or_else(|| TripError::ToolNotFound(name.to_string()))?;

        if self.validator == Validator::Strict {
            let schema = tool.parameters_schema();
            validate_json(name, &schema, &parameters)?;
        }

        debug!(target: "trip_office::tools", tool = name, "executing tool");
        tool.execute(parameters).await
    }

    /// Execute a tool call, folding any error into a structured payload
    pub async fn execute_to_payload(&self, name: &str, parameters: Value) -> Value {
        match self.execute(name, parameters).await {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    target: "trip_office::tools",
                    tool = name,
                    code = err.error_code(),
                    "tool call failed: {err}"
                );
                err.to_error_payload()
            }
        }
    }
}
