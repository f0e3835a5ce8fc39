//! Tool trait — the abstraction over agent capabilities.
//!
//! Tools are what give the agent the ability to act in the world:
//! look up weather, recommend attractions, suggest hotels. A tool takes
//! string-keyed, string-valued arguments (the action dispatcher's
//! best-effort scanner produces nothing richer) and returns a string
//! observation.

use crate::error::ToolError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Keyword arguments extracted from an action string. All values are strings.
pub type ToolArgs = HashMap<String, String>;

/// The core Tool trait.
///
/// Each tool (get_weather, get_attraction, get_hotels, ...) implements
/// this trait. Tools are registered in the ToolRegistry and invoked by
/// the action dispatcher.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "get_weather").
    fn name(&self) -> &str;

    /// A description of what this tool does (for the system prompt).
    fn description(&self) -> &str;

    /// Invoke the tool with the given keyword arguments.
    async fn invoke(&self, args: &ToolArgs) -> std::result::Result<String, ToolError>;
}

/// Adapter that turns a plain function or closure into a [`Tool`].
///
/// Lets callers register function values directly without writing a
/// trait impl.
pub struct FnTool<F> {
    name: String,
    description: String,
    func: F,
}

impl<F> FnTool<F>
where
    F: Fn(&ToolArgs) -> std::result::Result<String, ToolError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, description: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            func,
        }
    }
}

#[async_trait]
impl<F> Tool for FnTool<F>
where
    F: Fn(&ToolArgs) -> std::result::Result<String, ToolError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn invoke(&self, args: &ToolArgs) -> std::result::Result<String, ToolError> {
        (self.func)(args)
    }
}

/// A registry of available tools.
///
/// The action dispatcher uses this to look up tools by name when the
/// model requests them. Entries can be added at any time, including
/// through a shared handle while an agent already holds the registry;
/// there is no removal operation. Lookups hand out `Arc` clones so no
/// lock is held while a tool runs.
pub struct ToolRegistry {
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: RwLock::new(HashMap::new()),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.write().insert(name, Arc::from(tool));
    }

    /// Register a plain function or closure as a tool.
    pub fn register_fn<F>(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
        func: F,
    ) where
        F: Fn(&ToolArgs) -> std::result::Result<String, ToolError> + Send + Sync + 'static,
    {
        self.register(Box::new(FnTool::new(name, description, func)));
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.read().get(name).cloned()
    }

    /// List all registered tool names.
    pub fn names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<dyn Tool>>> {
        self.tools.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<dyn Tool>>> {
        self.tools.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A simple test tool for unit tests.
    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "Echoes back the 'text' argument"
        }
        async fn invoke(&self, args: &ToolArgs) -> std::result::Result<String, ToolError> {
            Ok(args.get("text").cloned().unwrap_or_default())
        }
    }

    #[test]
    fn registry_register_and_lookup() {
        let registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));
        assert!(registry.get("echo").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn registry_accepts_entries_through_shared_handle() {
        let registry = Arc::new(ToolRegistry::new());
        let handle = registry.clone();

        handle.register_fn("late_addition", "registered via a clone", |_| Ok("ok".into()));

        assert!(registry.get("late_addition").is_some());
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn registry_invoke_tool() {
        let registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        let mut args = ToolArgs::new();
        args.insert("text".into(), "hello world".into());

        let output = registry.get("echo").unwrap().invoke(&args).await.unwrap();
        assert_eq!(output, "hello world");
    }

    #[tokio::test]
    async fn register_fn_closure() {
        let registry = ToolRegistry::new();
        registry.register_fn("greet", "Greets a city", |args| {
            let city = args
                .get("city")
                .ok_or_else(|| ToolError::InvalidArguments("missing 'city'".into()))?;
            Ok(format!("hello {city}"))
        });

        let mut args = ToolArgs::new();
        args.insert("city".into(), "北京".into());

        let output = registry.get("greet").unwrap().invoke(&args).await.unwrap();
        assert_eq!(output, "hello 北京");
    }

    #[tokio::test]
    async fn register_fn_error_propagates() {
        let registry = ToolRegistry::new();
        registry.register_fn("broken", "Always fails", |_| {
            Err(ToolError::ExecutionFailed {
                tool_name: "broken".into(),
                reason: "boom".into(),
            })
        });

        let err = registry
            .get("broken")
            .unwrap()
            .invoke(&ToolArgs::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn register_replaces_same_name() {
        let registry = ToolRegistry::new();
        registry.register_fn("t", "first", |_| Ok("one".into()));
        registry.register_fn("t", "second", |_| Ok("two".into()));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("t").unwrap().description(), "second");
    }
}
