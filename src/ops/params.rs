//! Parameter gate.
//!
//! Some dependencies need values from the user (API keys, deployment
//! tokens) before they can be registered. A [`ParamSession`] resolves every
//! parameter a dependency declares before any platform registration runs,
//! and remembers answers by name so nothing is asked twice in one run.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::{Param, Params};

/// Error while resolving a parameter.
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("parameter `{name}` has no value and no default")]
    Missing { name: String },

    #[error("failed to read parameter `{name}`")]
    Prompt {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Source of answers for parameters without a preset.
pub trait Prompter {
    fn ask(&mut self, param: &Param) -> Result<String, ParamError>;
}

/// Asks on the terminal.
#[derive(Debug, Default)]
pub struct InteractivePrompter;

impl Prompter for InteractivePrompter {
    fn ask(&mut self, param: &Param) -> Result<String, ParamError> {
        let mut input = cliclack::input(param.prompt());
        if let Some(default) = &param.default {
            input = input.placeholder(default).default_input(default);
        }
        input.interact().map_err(|source| ParamError::Prompt {
            name: param.name.clone(),
            source,
        })
    }
}

/// Answers with defaults and fails for parameters without one.
#[derive(Debug, Default)]
pub struct NonInteractivePrompter;

impl Prompter for NonInteractivePrompter {
    fn ask(&mut self, param: &Param) -> Result<String, ParamError> {
        param.default.clone().ok_or_else(|| ParamError::Missing {
            name: param.name.clone(),
        })
    }
}

/// Run-wide parameter cache.
pub struct ParamSession {
    answers: BTreeMap<String, String>,
    prompter: Box<dyn Prompter>,
}

impl ParamSession {
    /// Start a session. `presets` answer parameters without asking.
    pub fn new(presets: BTreeMap<String, String>, prompter: Box<dyn Prompter>) -> Self {
        ParamSession {
            answers: presets,
            prompter,
        }
    }

    /// A session that never prompts.
    pub fn non_interactive(presets: BTreeMap<String, String>) -> Self {
        Self::new(presets, Box::new(NonInteractivePrompter))
    }

    /// Resolve every parameter in `params`, asking only for names not seen
    /// before in this session.
    pub fn resolve(&mut self, params: &[Param]) -> Result<Params, ParamError> {
        let mut resolved = Params::new();
        for param in params {
            let value = match self.answers.get(&param.name) {
                Some(value) => value.clone(),
                None => {
                    tracing::debug!("asking for parameter `{}`", param.name);
                    let value = self.prompter.ask(param)?;
                    self.answers.insert(param.name.clone(), value.clone());
                    value
                }
            };
            resolved.insert(param.name.clone(), value);
        }
        Ok(resolved)
    }
}

impl std::fmt::Debug for ParamSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParamSession")
            .field("answered", &self.answers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Parse a `name=value` flag.
pub fn parse_preset(flag: &str) -> Result<(String, String), String> {
    match flag.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected `name=value`, got `{}`", flag)),
    }
}
