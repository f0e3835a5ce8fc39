//! The ReAct agent loop.
//!
//! Drives iterations of think -> act -> observe: ask the model for the
//! next step given the transcript so far, parse its Thought/Action
//! output, dispatch the action, and feed the observation back in. The
//! run ends on a finish action, on unparseable model output, or when
//! the iteration budget runs out.
//!
//! Tool failures become observations and stay inside the loop; provider
//! failures (timeout, network, API) propagate out of [`ReactAgent::run`].

use crate::dispatch::{ActionDispatcher, FINISH_MARKER};
use crate::parser::OutputParser;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};
use wayfinder_core::message::ChatMessage;
use wayfinder_core::provider::{ChatProvider, ChatRequest};
use wayfinder_core::tool::{Tool, ToolRegistry};
use wayfinder_core::Result;

/// Iteration budget used when none is configured.
pub const DEFAULT_MAX_ITERATIONS: usize = 5;

/// Returned when a run ends without a final answer and nothing can be
/// salvaged from the transcript.
pub const INCOMPLETE_ANSWER: &str = "task not completed";

const PARSE_FAILURE_ENTRY: &str = "error: unable to parse model output";
const OBSERVATION_PREFIX: &str = "Observation: ";

/// How the most recent run ended (or that one is in flight).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// A run is in progress (also the initial state).
    Running,
    /// The model issued a finish action; a final answer was returned.
    Finished,
    /// Model output had no recognizable Thought/Action labels; the run
    /// was abandoned without retry.
    AbortedParseError,
    /// The iteration budget ran out before a finish action.
    Exhausted,
}

/// A single-conversation ReAct agent.
///
/// Holds one transcript; each [`run`](Self::run) starts it fresh.
pub struct ReactAgent {
    provider: Arc<dyn ChatProvider>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    parser: OutputParser,
    tools: Arc<ToolRegistry>,
    dispatcher: ActionDispatcher,
    system_prompt: String,
    max_iterations: usize,
    streaming: bool,
    transcript: Vec<String>,
    state: RunState,
}

impl ReactAgent {
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        model: impl Into<String>,
        temperature: f32,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        let system_prompt = build_system_prompt(&tools);
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
            parser: OutputParser::new(),
            dispatcher: ActionDispatcher::new(tools.clone()),
            tools,
            system_prompt,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            streaming: false,
            transcript: Vec::new(),
            state: RunState::Running,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Drain the model response through the provider's fragment stream
    /// instead of a single completion call.
    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Replace the output parser, e.g. to add label conventions.
    pub fn with_parser(mut self, parser: OutputParser) -> Self {
        self.parser = parser;
        self
    }

    /// Register an additional tool on the live agent; the next dispatch
    /// can already reach it. The default system prompt is built at
    /// construction and does not mention later additions; use
    /// [`with_system_prompt`](Self::with_system_prompt) if the model
    /// should see them.
    pub fn add_tool(&self, tool: Box<dyn Tool>) {
        self.tools.register(tool);
    }

    /// Run the loop for one user query and return the final answer.
    ///
    /// The transcript is reset at the start; a previous run's history
    /// does not leak into this one. Provider errors abort the run and
    /// propagate to the caller.
    pub async fn run(&mut self, query: &str) -> Result<String> {
        self.transcript.clear();
        self.transcript.push(format!("User request: {query}"));
        self.state = RunState::Running;
        info!(query, max_iterations = self.max_iterations, "starting run");

        for iteration in 1..=self.max_iterations {
            debug!(iteration, "requesting next step");
            let raw = self.next_completion().await?;
            trace!(output = %raw, "model output");

            let Some(step) = self.parser.parse(&raw) else {
                warn!(iteration, "no thought/action labels in model output");
                self.transcript.push(PARSE_FAILURE_ENTRY.to_string());
                self.state = RunState::AbortedParseError;
                return Ok(INCOMPLETE_ANSWER.to_string());
            };
            debug!(thought = %step.thought, action = %step.action, "parsed step");
            self.transcript.push(format!("Thought: {}", step.thought));
            self.transcript.push(format!("Action: {}", step.action));

            let observation = self.dispatcher.dispatch(&step.action).await;
            if let Some(answer) = observation.strip_prefix(FINISH_MARKER) {
                let answer = answer.trim().to_string();
                self.state = RunState::Finished;
                info!(iteration, "run finished");
                return Ok(answer);
            }

            trace!(observation = %observation, "observation");
            self.transcript
                .push(format!("{OBSERVATION_PREFIX}{observation}"));
        }

        self.state = RunState::Exhausted;
        warn!(
            max_iterations = self.max_iterations,
            "iteration budget exhausted before a finish action"
        );
        Ok(self.salvaged_answer())
    }

    /// A copy of the current transcript.
    pub fn history(&self) -> Vec<String> {
        self.transcript.clone()
    }

    pub fn clear_history(&mut self) {
        self.transcript.clear();
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Fetch the model's next step for the current transcript.
    async fn next_completion(&self) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(&self.system_prompt),
                ChatMessage::user(self.transcript.join("\n")),
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stream: self.streaming,
        };

        if self.streaming {
            let mut fragments = self.provider.stream(request).await?;
            let mut text = String::new();
            while let Some(fragment) = fragments.recv().await {
                let fragment = fragment?;
                trace!(%fragment, "stream fragment");
                text.push_str(&fragment);
            }
            Ok(text)
        } else {
            Ok(self.provider.complete(request).await?)
        }
    }

    /// Best answer available after exhaustion: the latest observation,
    /// or the incomplete sentinel if there never was one.
    fn salvaged_answer(&self) -> String {
        self.transcript
            .iter()
            .rev()
            .find_map(|entry| entry.strip_prefix(OBSERVATION_PREFIX))
            .map_or_else(|| INCOMPLETE_ANSWER.to_string(), str::to_string)
    }
}

/// Default system prompt: the Thought/Action protocol plus the
/// registered tools and their descriptions.
fn build_system_prompt(tools: &ToolRegistry) -> String {
    let mut names = tools.names();
    names.sort_unstable();

    let mut prompt = String::from(
        "You are a travel planning assistant. Work step by step: reason \
         about what information you still need, then call exactly one tool.\n\n\
         Available tools:\n",
    );
    for name in names {
        if let Some(tool) = tools.get(&name) {
            prompt.push_str(&format!(
                "- {name}(key=\"value\", ...): {}\n",
                tool.description()
            ));
        }
    }
    prompt.push_str(
        "\nRespond in exactly this format:\n\
         Thought: <your reasoning about the next step>\n\
         Action: <one tool call, e.g. get_weather(city=\"Beijing\")>\n\n\
         When you have enough information to answer the user, respond with:\n\
         Thought: <why the task is complete>\n\
         Action: finish(answer=\"<your final answer>\")\n",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{FailingProvider, SequentialMockProvider};
    use wayfinder_core::error::{Error, ProviderError, ToolError};
    use wayfinder_core::tool::FnTool;

    fn registry() -> Arc<ToolRegistry> {
        let registry = ToolRegistry::new();
        registry.register_fn("get_weather", "Current weather for a city", |args| {
            let city = args
                .get("city")
                .ok_or_else(|| ToolError::InvalidArguments("missing 'city'".into()))?;
            Ok(format!("Weather in {city}: Sunny, 22C"))
        });
        registry.register_fn("broken_tool", "Always fails", |_| {
            Err(ToolError::ExecutionFailed {
                tool_name: "broken_tool".into(),
                reason: "upstream offline".into(),
            })
        });
        Arc::new(registry)
    }

    fn agent(provider: SequentialMockProvider) -> (ReactAgent, Arc<SequentialMockProvider>) {
        let provider = Arc::new(provider);
        let agent = ReactAgent::new(provider.clone(), "test-model", 0.0, registry());
        (agent, provider)
    }

    #[tokio::test]
    async fn finishes_on_first_iteration() {
        let (mut agent, provider) = agent(SequentialMockProvider::new(vec![
            "Thought: nothing to look up\nAction: finish(answer=\"done\")".into(),
        ]));

        let answer = agent.run("trivial request").await.unwrap();
        assert_eq!(answer, "done");
        assert_eq!(agent.state(), RunState::Finished);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn tool_round_trip_then_finish() {
        let (mut agent, provider) = agent(SequentialMockProvider::new(vec![
            "Thought: check the weather first\nAction: get_weather(city=\"Beijing\")".into(),
            "Thought: I have what I need\nAction: finish(answer=\"Sunny, pack light\")".into(),
        ]));

        let answer = agent.run("what to pack for Beijing?").await.unwrap();
        assert_eq!(answer, "Sunny, pack light");
        assert_eq!(provider.call_count(), 2);

        // The transcript ends at the finish action; the answer is only
        // the return value
        let history = agent.history();
        assert_eq!(history[0], "User request: what to pack for Beijing?");
        assert_eq!(history[1], "Thought: check the weather first");
        assert_eq!(history[2], "Action: get_weather(city=\"Beijing\")");
        assert_eq!(history[3], "Observation: Weather in Beijing: Sunny, 22C");
        assert_eq!(
            history.last().map(String::as_str),
            Some("Action: finish(answer=\"Sunny, pack light\")")
        );
        assert_eq!(history.len(), 6);
    }

    #[tokio::test]
    async fn exhaustion_uses_iteration_budget_exactly() {
        let step = "Thought: still looking\nAction: get_weather(city=\"Shanghai\")";
        let (agent, provider) = agent(SequentialMockProvider::new(vec![
            step.into(),
            step.into(),
            step.into(),
            step.into(), // must never be requested
        ]));
        let mut agent = agent.with_max_iterations(3);

        let answer = agent.run("never finishes").await.unwrap();
        assert_eq!(agent.state(), RunState::Exhausted);
        assert_eq!(provider.call_count(), 3);
        // Salvages the last observation instead of giving up entirely
        assert_eq!(answer, "Weather in Shanghai: Sunny, 22C");
    }

    #[tokio::test]
    async fn malformed_finish_is_not_terminal() {
        let (agent, _provider) = agent(SequentialMockProvider::new(vec![
            "Thought: wrapping up\nAction: finish()".into(),
        ]));
        let mut agent = agent.with_max_iterations(1);

        let answer = agent.run("q").await.unwrap();
        assert_eq!(agent.state(), RunState::Exhausted);
        assert_eq!(answer, "error: malformed finish action");
    }

    #[tokio::test]
    async fn unparseable_output_aborts_without_retry() {
        let (mut agent, provider) = agent(SequentialMockProvider::new(vec![
            "I would just like to chat about the weather.".into(),
            "Thought: t\nAction: finish(answer=\"never reached\")".into(),
        ]));

        let answer = agent.run("q").await.unwrap();
        assert_eq!(answer, INCOMPLETE_ANSWER);
        assert_eq!(agent.state(), RunState::AbortedParseError);
        assert_eq!(provider.call_count(), 1);
        assert_eq!(
            agent.history().last().map(String::as_str),
            Some("error: unable to parse model output")
        );
    }

    #[tokio::test]
    async fn tool_failure_stays_inside_the_loop() {
        let (mut agent, _provider) = agent(SequentialMockProvider::new(vec![
            "Thought: try the flaky one\nAction: broken_tool()".into(),
            "Thought: fall back\nAction: finish(answer=\"sorry, no data\")".into(),
        ]));

        let answer = agent.run("q").await.unwrap();
        assert_eq!(answer, "sorry, no data");
        assert!(agent
            .history()
            .iter()
            .any(|e| e.starts_with("Observation: error: tool execution failed - ")));
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let provider = Arc::new(FailingProvider);
        let mut agent = ReactAgent::new(provider, "test-model", 0.0, registry());

        let err = agent.run("q").await.unwrap_err();
        assert!(matches!(err, Error::Provider(ProviderError::Timeout(_))));
    }

    #[tokio::test]
    async fn rerun_resets_the_transcript() {
        let (mut agent, _provider) = agent(SequentialMockProvider::new(vec![
            "Thought: a\nAction: finish(answer=\"first\")".into(),
            "Thought: b\nAction: finish(answer=\"second\")".into(),
        ]));

        agent.run("first query").await.unwrap();
        agent.run("second query").await.unwrap();

        let history = agent.history();
        assert_eq!(history[0], "User request: second query");
        assert!(!history.iter().any(|e| e.contains("first query")));
    }

    #[tokio::test]
    async fn clear_history_empties_the_transcript() {
        let (mut agent, _provider) = agent(SequentialMockProvider::new(vec![
            "Thought: a\nAction: finish(answer=\"x\")".into(),
        ]));

        agent.run("q").await.unwrap();
        assert!(!agent.history().is_empty());
        agent.clear_history();
        assert!(agent.history().is_empty());
    }

    #[tokio::test]
    async fn streaming_run_concatenates_fragments_before_parsing() {
        // The mock's default stream yields the scripted response as a
        // single fragment; the loop must still parse the drained text.
        let (agent, provider) = agent(SequentialMockProvider::new(vec![
            "Thought: done thinking\nAction: finish(answer=\"streamed\")".into(),
        ]));
        let mut agent = agent.with_streaming(true);

        let answer = agent.run("q").await.unwrap();
        assert_eq!(answer, "streamed");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn localized_labels_work_end_to_end() {
        let (mut agent, _provider) = agent(SequentialMockProvider::new(vec![
            "思考: 先查天气\n行动: get_weather(city=\"Beijing\")".into(),
            "思考: 够了\n行动: finish(answer=\"带伞\")".into(),
        ]));

        let answer = agent.run("北京怎么玩").await.unwrap();
        assert_eq!(answer, "带伞");
    }

    #[tokio::test]
    async fn tools_added_after_construction_are_dispatchable() {
        let (mut agent, _provider) = agent(SequentialMockProvider::new(vec![
            "Thought: use the new capability\nAction: currency(amount=\"100\")".into(),
            "Thought: converted\nAction: finish(answer=\"about 13 euros\")".into(),
        ]));
        agent.add_tool(Box::new(FnTool::new(
            "currency",
            "Convert an amount to euros",
            |args| {
                let amount = args.get("amount").cloned().unwrap_or_default();
                Ok(format!("{amount} CNY is about 13 EUR"))
            },
        )));

        let answer = agent.run("how much is 100 CNY?").await.unwrap();
        assert_eq!(answer, "about 13 euros");
        assert!(agent
            .history()
            .iter()
            .any(|e| e == "Observation: 100 CNY is about 13 EUR"));
    }

    #[test]
    fn system_prompt_lists_registered_tools() {
        let provider = Arc::new(SequentialMockProvider::new(vec![]));
        let agent = ReactAgent::new(provider, "test-model", 0.0, registry());
        assert!(agent.system_prompt.contains("get_weather"));
        assert!(agent.system_prompt.contains("Current weather for a city"));
        assert!(agent.system_prompt.contains("finish(answer="));
    }
}
