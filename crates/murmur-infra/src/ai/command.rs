//! Subprocess-backed [`TextGenerator`].
//!
//! Runs `<program> <args...> <model tag> <prompt>` (by default
//! `ollama run deepseek-r1:1.5b "<prompt>"`), with stdin closed, and returns
//! its standard output with lines joined by single spaces.

use std::process::Stdio;
use std::time::Duration;

use murmur_core::ai::TextGenerator;
use murmur_types::config::AiConfig;
use murmur_types::error::ExecutionError;
use murmur_types::intent::AiModel;
use tracing::debug;

/// Invokes a local model CLI once per query.
#[derive(Debug, Clone)]
pub struct CommandTextGenerator {
    program: String,
    args: Vec<String>,
    general_model: String,
    math_model: String,
    timeout: Option<Duration>,
}

impl CommandTextGenerator {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            general_model: config.model_tag(AiModel::DeepseekR1).to_string(),
            math_model: config.model_tag(AiModel::Qwen2Math).to_string(),
            timeout: config.timeout(),
        }
    }

    fn model_tag(&self, model: AiModel) -> &str {
        match model {
            AiModel::DeepseekR1 => &self.general_model,
            AiModel::Qwen2Math => &self.math_model,
        }
    }

    async fn run(&self, model: AiModel, prompt: &str) -> Result<String, ExecutionError> {
        let tag = self.model_tag(model);
        debug!(program = %self.program, model = tag, "spawning model process");

        let child = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .arg(tag)
            .arg(prompt)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ExecutionError::Launch {
                program: self.program.clone(),
                source,
            })?;

        let output = child
            .wait_with_output()
            .await
            .map_err(ExecutionError::Output)?;

        if !output.status.success() {
            return Err(ExecutionError::NonZeroExit {
                status: output.status.to_string(),
            });
        }

        Ok(join_output_lines(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl TextGenerator for CommandTextGenerator {
    async fn invoke(&self, model: AiModel, prompt: &str) -> Result<String, ExecutionError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.run(model, prompt))
                .await
                .map_err(|_| ExecutionError::TimedOut(limit))?,
            None => self.run(model, prompt).await,
        }
    }
}

/// Collapse multi-line model output into one chat line.
pub fn join_output_lines(output: &str) -> String {
    output.lines().collect::<Vec<_>>().join(" ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_output_lines() {
        assert_eq!(join_output_lines("hello\nworld\n"), "hello world");
        assert_eq!(join_output_lines("  one line  \n"), "one line");
        assert_eq!(join_output_lines(""), "");
        assert_eq!(join_output_lines("a\r\nb"), "a b");
        // Inner whitespace survives; only the ends are trimmed.
        assert_eq!(join_output_lines("x = 4 \nso 4\n"), "x = 4  so 4");
    }

    #[test]
    fn test_default_tags() {
        let generator = CommandTextGenerator::new(&AiConfig::default());
        assert_eq!(generator.model_tag(AiModel::DeepseekR1), "deepseek-r1:1.5b");
        assert_eq!(generator.model_tag(AiModel::Qwen2Math), "qwen2-math:1.5b");
    }

    #[tokio::test]
    async fn test_missing_program_is_launch_error() {
        let config = AiConfig {
            program: "/nonexistent/murmur-model-binary".to_string(),
            ..Default::default()
        };
        let result = CommandTextGenerator::new(&config)
            .invoke(AiModel::DeepseekR1, "hi")
            .await;
        assert!(matches!(result, Err(ExecutionError::Launch { .. })));
    }

    #[cfg(unix)]
    fn shell(script: &str, timeout_secs: Option<u64>) -> CommandTextGenerator {
        // `sh -c <script> <tag> <prompt>` binds the tag to $0 and the prompt to $1.
        CommandTextGenerator::new(&AiConfig {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
            timeout_secs,
            ..Default::default()
        })
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_passes_tag_and_prompt_and_joins_lines() {
        let generator = shell(r#"printf '%s\nsays\n%s\n' "$0" "$1""#, None);
        let reply = generator.invoke(AiModel::Qwen2Math, "2+2").await.unwrap();
        assert_eq!(reply, "qwen2-math:1.5b says 2+2");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stdin_is_closed() {
        let generator = shell("cat; echo done", None);
        let reply = generator.invoke(AiModel::DeepseekR1, "x").await.unwrap();
        assert_eq!(reply, "done");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_error() {
        let generator = shell("echo partial; exit 3", None);
        let result = generator.invoke(AiModel::DeepseekR1, "x").await;
        assert!(matches!(result, Err(ExecutionError::NonZeroExit { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_kills_slow_model() {
        let generator = shell("sleep 5", Some(1));
        let result = generator.invoke(AiModel::DeepseekR1, "x").await;
        assert!(matches!(result, Err(ExecutionError::TimedOut(_))));
    }
}
