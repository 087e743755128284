//! pipeline/engine.rs
//! Round-trip pipeline engine.
//!
//! Runs one codec's action list against one input file, strictly in order.
//! Later steps read artifacts written by earlier ones, so the first failing
//! step ends the pipeline. Every decompress output is gated by the oracle.
use std::fs;

use crate::compression::{CodecId, CodecRegistry, CodecSpec, ContainerReport, ReferenceAdapter};
use crate::logger::Logger;
use crate::pipeline::oracle::ensure_identical;
use crate::pipeline::plan::plan;
use crate::pipeline::types::{Action, ActionKind, Actor, InputFile, PipelineReport, PipelineState, StepFailure};
use crate::process::{Subject, SubjectRequest};
use crate::runner::workspace::{remove_if_exists, Workspace};
use crate::types::HarnessError;

pub struct PipelineEngine<'a> {
    registry: &'a CodecRegistry,
    subject: &'a dyn Subject,
    logger: &'a dyn Logger,
    level_override: Option<i32>,
}

impl<'a> PipelineEngine<'a> {
    pub fn new(registry: &'a CodecRegistry, subject: &'a dyn Subject, logger: &'a dyn Logger) -> Self {
        Self { registry, subject, logger, level_override: None }
    }

    /// Replace every reference-compress level with `level`.
    pub fn with_level_override(mut self, level: Option<i32>) -> Self {
        self.level_override = level;
        self
    }

    /// Run the standard plan for `codec`.
    pub fn run(&self, input: &InputFile, codec: CodecId, workspace: &Workspace) -> Result<PipelineReport, StepFailure> {
        let actions = plan(codec, self.level_override);
        self.run_actions(input, codec, &actions, workspace)
    }

    /// Run an explicit action list for `codec`.
    pub fn run_actions(
        &self,
        input: &InputFile,
        codec: CodecId,
        actions: &[Action],
        workspace: &Workspace,
    ) -> Result<PipelineReport, StepFailure> {
        let fail = |action_index: usize, action: Action, error: HarnessError| StepFailure {
            file: input.path.clone(),
            codec,
            action_index,
            action,
            error,
        };

        let registered = self
            .registry
            .get(codec)
            .map_err(|e| fail(0, actions.first().copied().unwrap_or(Action::validate_container()), e.into()))?;
        let spec = &registered.spec;

        let mut state = PipelineState::new(
            input,
            workspace.working_path(),
            workspace.artifact_path(spec.suffix),
        );
        // Fresh working copy: a previous pipeline may have failed halfway.
        if let Err(e) = workspace.stage(input) {
            return Err(fail(0, actions.first().copied().unwrap_or(Action::validate_container()), e));
        }

        let mut report = PipelineReport { codec, actions_run: 0, container: None };
        for (index, action) in actions.iter().enumerate() {
            self.logger.verbose(&format!(
                "[PIPELINE] {} {} step {}/{}: {}",
                input.path.display(),
                codec,
                index + 1,
                actions.len(),
                action
            ));

            match self.execute(action, spec, registered.adapter(), &mut state, input) {
                Ok(Some(container)) => report.container = Some(container),
                Ok(None) => {}
                Err(e) => return Err(fail(index, *action, e)),
            }
            report.actions_run += 1;
        }
        Ok(report)
    }

    fn execute(
        &self,
        action: &Action,
        spec: &CodecSpec,
        adapter: &dyn ReferenceAdapter,
        state: &mut PipelineState,
        input: &InputFile,
    ) -> Result<Option<ContainerReport>, HarnessError> {
        match (action.kind, action.actor) {
            (ActionKind::Compress, Actor::Reference) => {
                let level = action.level.unwrap_or(spec.default_level);
                remove_if_exists(&state.artifact_path)?;
                let artifact = adapter.compress(&state.current_plain, level)?;
                self.logger.verbose(&format!(
                    "[REFERENCE] {} compress level {} -> {} ({} bytes)",
                    spec.name(),
                    level,
                    state.artifact_path.display(),
                    artifact.len()
                ));
                fs::write(&state.artifact_path, &artifact)
                    .map_err(|e| HarnessError::io(&state.artifact_path, e))?;
                Ok(None)
            }

            (ActionKind::Compress, Actor::Subject) => {
                remove_if_exists(&state.artifact_path)?;
                let request = SubjectRequest::compress(
                    spec.subject_codec,
                    spec.container,
                    &state.plain_path,
                    &state.artifact_path,
                );
                self.subject.invoke(&request)?;
                Ok(None)
            }

            (ActionKind::Decompress, Actor::Reference) => {
                let artifact = fs::read(&state.artifact_path)
                    .map_err(|e| HarnessError::io(&state.artifact_path, e))?;
                let plain = adapter.decompress(&artifact)?;
                self.logger.verbose(&format!(
                    "[REFERENCE] {} decompress {} -> {} ({} bytes)",
                    spec.name(),
                    state.artifact_path.display(),
                    state.plain_path.display(),
                    plain.len()
                ));
                fs::write(&state.plain_path, &plain)
                    .map_err(|e| HarnessError::io(&state.plain_path, e))?;
                state.current_plain = plain;
                ensure_identical(&input.bytes, &state.current_plain)?;
                Ok(None)
            }

            (ActionKind::Decompress, Actor::Subject) => {
                remove_if_exists(&state.plain_path)?;
                let request = SubjectRequest::decompress(spec.subject_codec, &state.artifact_path, &state.plain_path);
                self.subject.invoke(&request)?;
                state.current_plain = fs::read(&state.plain_path)
                    .map_err(|e| HarnessError::io(&state.plain_path, e))?;
                ensure_identical(&input.bytes, &state.current_plain)?;
                Ok(None)
            }

            (ActionKind::ValidateContainer, _) => {
                let artifact = fs::read(&state.artifact_path)
                    .map_err(|e| HarnessError::io(&state.artifact_path, e))?;
                let report = adapter.validate_container(&artifact)?;
                self.logger.verbose(&format!(
                    "[REFERENCE] {} container ok: {} entr{}",
                    state.artifact_path.display(),
                    report.entries.len(),
                    if report.entries.len() == 1 { "y" } else { "ies" }
                ));
                Ok(Some(report))
            }
        }
    }
}
