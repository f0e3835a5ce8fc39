//! Action dispatcher — turns a parsed action string into an observation.
//!
//! Dispatch never fails: every outcome, including unknown tools and
//! tool errors, is rendered as an observation string so the loop can
//! feed it back to the model. The model sees its own mistakes and can
//! correct course on the next iteration.

use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};
use wayfinder_core::tool::{ToolArgs, ToolRegistry};

/// Prefix marking a terminal observation. The loop strips it to obtain
/// the final answer.
pub const FINISH_MARKER: &str = "FINISH: ";

static FINISH_DOUBLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?is)finish\(answer="(.*)"\)"#).expect("finish pattern"));
static FINISH_SINGLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)finish\(answer='(.*)'\)").expect("finish pattern"));
static TOOL_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)\((.*)\)$").expect("call pattern"));
static KWARG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+)=["']?([^"',]+)["']?"#).expect("kwarg pattern"));

/// Routes action strings to registered tools.
pub struct ActionDispatcher {
    registry: Arc<ToolRegistry>,
}

impl ActionDispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Execute one action and return its observation.
    ///
    /// A terminal action yields an observation starting with
    /// [`FINISH_MARKER`]; everything else, including failures, yields a
    /// plain observation for the transcript.
    pub async fn dispatch(&self, action: &str) -> String {
        let action = action.trim();

        if action.to_lowercase().starts_with("finish") {
            return finish_observation(action);
        }

        let Some(call) = TOOL_CALL.captures(action) else {
            warn!(action, "unrecognized action shape");
            return format!("error: could not parse action '{action}'");
        };
        let name = &call[1];
        let args = parse_kwargs(call.get(2).map_or("", |m| m.as_str()));
        debug!(tool = name, ?args, "dispatching tool call");

        match self.registry.get(name) {
            Some(tool) => match tool.invoke(&args).await {
                Ok(observation) => observation,
                Err(e) => {
                    warn!(tool = name, error = %e, "tool invocation failed");
                    format!("error: tool execution failed - {e}")
                }
            },
            None => format!("error: undefined tool '{name}'"),
        }
    }
}

/// Extract the final answer from a `finish(...)` action.
///
/// Tries double-quoted then single-quoted `answer=` forms, then falls
/// back to stripping the call syntax from whatever is left. Only a
/// finish with no recoverable answer text is reported as malformed.
fn finish_observation(action: &str) -> String {
    if let Some(caps) = FINISH_DOUBLE_QUOTED.captures(action) {
        return format!("{FINISH_MARKER}{}", &caps[1]);
    }
    if let Some(caps) = FINISH_SINGLE_QUOTED.captures(action) {
        return format!("{FINISH_MARKER}{}", &caps[1]);
    }

    let salvaged = action["finish".len()..]
        .trim()
        .trim_matches(|c| matches!(c, '(' | ')' | '"' | '\''))
        .trim();
    if salvaged.is_empty() {
        return "error: malformed finish action".to_string();
    }
    let salvaged = salvaged.strip_prefix("answer=").unwrap_or(salvaged).trim();
    format!("{FINISH_MARKER}{salvaged}")
}

/// Scan `key=value` pairs out of a call's argument text.
///
/// Values are taken up to the next comma or quote, so quoted values
/// containing commas are split. Tools that need such values have to
/// tolerate the truncation.
fn parse_kwargs(args_text: &str) -> ToolArgs {
    let mut kwargs = ToolArgs::new();
    for caps in KWARG.captures_iter(args_text) {
        let value = caps[2].trim_matches(|c| matches!(c, ' ' | '"' | '\''));
        kwargs.insert(caps[1].to_string(), value.to_string());
    }
    kwargs
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfinder_core::error::ToolError;

    fn dispatcher() -> ActionDispatcher {
        let registry = ToolRegistry::new();
        registry.register_fn("echo_city", "echoes the city argument", |args| {
            let city = args.get("city").cloned().unwrap_or_default();
            Ok(format!("city was {city}"))
        });
        registry.register_fn("always_fails", "fails on every call", |_| {
            Err(ToolError::ExecutionFailed {
                tool_name: "always_fails".into(),
                reason: "backend unreachable".into(),
            })
        });
        ActionDispatcher::new(Arc::new(registry))
    }

    #[test]
    fn kwargs_basic() {
        let args = parse_kwargs(r#"city="Beijing", budget="luxury""#);
        assert_eq!(args["city"], "Beijing");
        assert_eq!(args["budget"], "luxury");
    }

    #[test]
    fn kwargs_quote_styles_and_bare_values() {
        let args = parse_kwargs(r#"city='上海', days=3, q=test"#);
        assert_eq!(args["city"], "上海");
        assert_eq!(args["days"], "3");
        assert_eq!(args["q"], "test");
    }

    #[test]
    fn kwargs_empty_text() {
        assert!(parse_kwargs("").is_empty());
    }

    #[test]
    fn kwargs_value_truncates_at_comma() {
        // The scanner stops at commas even inside quotes.
        let args = parse_kwargs(r#"note="hello, world""#);
        assert_eq!(args["note"], "hello");
    }

    #[tokio::test]
    async fn finish_double_quoted() {
        let d = dispatcher();
        let obs = d.dispatch(r#"finish(answer="Pack an umbrella.")"#).await;
        assert_eq!(obs, "FINISH: Pack an umbrella.");
    }

    #[tokio::test]
    async fn finish_single_quoted() {
        let d = dispatcher();
        let obs = d.dispatch("finish(answer='all set')").await;
        assert_eq!(obs, "FINISH: all set");
    }

    #[tokio::test]
    async fn finish_multiline_answer() {
        let d = dispatcher();
        let obs = d
            .dispatch("finish(answer=\"line one\nline two\")")
            .await;
        assert_eq!(obs, "FINISH: line one\nline two");
    }

    #[tokio::test]
    async fn finish_case_insensitive() {
        let d = dispatcher();
        let obs = d.dispatch(r#"Finish(answer="done")"#).await;
        assert_eq!(obs, "FINISH: done");
    }

    #[tokio::test]
    async fn finish_salvages_unquoted_answer() {
        let d = dispatcher();
        let obs = d.dispatch("finish(answer=take the train)").await;
        assert_eq!(obs, "FINISH: take the train");
    }

    #[tokio::test]
    async fn finish_without_answer_text_is_malformed() {
        let d = dispatcher();
        let obs = d.dispatch("finish()").await;
        assert_eq!(obs, "error: malformed finish action");
    }

    #[tokio::test]
    async fn known_tool_returns_its_output() {
        let d = dispatcher();
        let obs = d.dispatch(r#"echo_city(city="北京")"#).await;
        assert_eq!(obs, "city was 北京");
    }

    #[tokio::test]
    async fn unknown_tool_becomes_observation() {
        let d = dispatcher();
        let obs = d.dispatch(r#"book_flight(to="Tokyo")"#).await;
        assert_eq!(obs, "error: undefined tool 'book_flight'");
    }

    #[tokio::test]
    async fn tool_error_becomes_observation() {
        let d = dispatcher();
        let obs = d.dispatch("always_fails()").await;
        assert!(obs.starts_with("error: tool execution failed - "));
        assert!(obs.contains("backend unreachable"));
    }

    #[tokio::test]
    async fn non_call_text_becomes_parse_observation() {
        let d = dispatcher();
        let obs = d.dispatch("just thinking out loud").await;
        assert_eq!(obs, "error: could not parse action 'just thinking out loud'");
    }

    #[tokio::test]
    async fn surrounding_whitespace_is_ignored() {
        let d = dispatcher();
        let obs = d.dispatch("  echo_city(city=\"Xi'an\")  ").await;
        assert!(obs.starts_with("city was Xi"));
    }
}
