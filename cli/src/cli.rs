//! CLI argument parsing for the conformance harness.
//!
//! Flags override the config file, which overrides the built-in defaults.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{ArgAction, Parser, ValueEnum};
use conformance_core::compression::{CodecId, LzmaDecodeBackend};
use conformance_core::logger::Verbosity;
use conformance_core::runner::{CommandConfig, HarnessConfig};
use thiserror::Error;

/// Errors from CLI argument validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("missing corpus directory (pass it as the first argument or set corpus_dir in the config)")]
    MissingCorpus,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DecoderArg {
    /// Shell out to the external lzma tool.
    Tool,
    /// Decode in-process.
    Library,
}

impl From<DecoderArg> for LzmaDecodeBackend {
    fn from(arg: DecoderArg) -> Self {
        match arg {
            DecoderArg::Tool => LzmaDecodeBackend::Tool,
            DecoderArg::Library => LzmaDecodeBackend::Library,
        }
    }
}

/// Round-trip every file of a corpus through an external codec and a set of
/// reference codecs, failing on the first byte that differs.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "conformance")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory of sample inputs.
    pub corpus_dir: Option<PathBuf>,

    /// Reference compression level for every codec. Non-numeric values are ignored.
    #[arg(allow_negative_numbers = true)]
    pub level: Option<String>,

    /// JSON config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Codec under test.
    #[arg(long)]
    pub subject: Option<PathBuf>,

    /// Argument placed before the generated ones, e.g. a script for a wrapper program.
    #[arg(long = "subject-arg", allow_hyphen_values = true)]
    pub subject_args: Vec<String>,

    #[arg(long)]
    pub lzma_tool: Option<PathBuf>,

    #[arg(long)]
    pub lpaq8_tool: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub lzma_decoder: Option<DecoderArg>,

    /// Scratch directory, wiped at the start of every run.
    #[arg(long)]
    pub workspace: Option<PathBuf>,

    #[arg(long)]
    pub working_name: Option<String>,

    /// Restrict the run to these codecs (repeatable).
    #[arg(long = "codec", value_parser = CodecId::from_str)]
    pub codecs: Vec<CodecId>,

    /// Record failures and keep running instead of stopping at the first.
    #[arg(long)]
    pub keep_going: bool,

    /// -v shows every step, -vv adds subject output.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_count(self.verbose)
    }

    pub fn level_override(&self) -> Option<i32> {
        self.level.as_deref().and_then(parse_level)
    }

    /// Layer the flags over `base`.
    pub fn apply(&self, mut base: HarnessConfig) -> Result<HarnessConfig, CliError> {
        if let Some(dir) = &self.corpus_dir {
            base.corpus_dir = dir.clone();
        }
        if base.corpus_dir.as_os_str().is_empty() {
            return Err(CliError::MissingCorpus);
        }

        if let Some(level) = self.level_override() {
            base.level = Some(level);
        }
        if let Some(program) = &self.subject {
            base.subject = CommandConfig::new(program).with_args(self.subject_args.clone());
        } else if !self.subject_args.is_empty() {
            base.subject.args = self.subject_args.clone();
        }
        if let Some(program) = &self.lzma_tool {
            base.lzma_tool = CommandConfig::new(program);
        }
        if let Some(program) = &self.lpaq8_tool {
            base.lpaq8_tool = CommandConfig::new(program);
        }
        if let Some(decoder) = self.lzma_decoder {
            base.lzma_decoder = decoder.into();
        }
        if let Some(dir) = &self.workspace {
            base.workspace_dir = dir.clone();
        }
        if let Some(name) = &self.working_name {
            base.working_name = name.clone();
        }
        if !self.codecs.is_empty() {
            base.codecs = self.codecs.clone();
        }
        if self.keep_going {
            base.keep_going = true;
        }
        Ok(base)
    }
}

fn parse_level(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["conformance"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_positional_corpus_and_level() {
        let cli = parse(&["samples", "7"]);
        assert_eq!(cli.corpus_dir, Some(PathBuf::from("samples")));
        assert_eq!(cli.level_override(), Some(7));
    }

    #[test]
    fn test_non_numeric_level_is_ignored() {
        let cli = parse(&["samples", "fast"]);
        assert_eq!(cli.level_override(), None);
        let config = cli.apply(HarnessConfig::default()).unwrap();
        assert_eq!(config.level, None);
    }

    #[test]
    fn test_negative_level_is_a_level_not_a_flag() {
        let cli = parse(&["samples", "-1"]);
        assert_eq!(cli.level.as_deref(), Some("-1"));
        assert_eq!(cli.level_override(), Some(-1));
        assert_eq!(cli.apply(HarnessConfig::default()).unwrap().level, Some(-1));
    }

    #[test]
    fn test_missing_corpus() {
        let cli = parse(&[]);
        assert_eq!(cli.apply(HarnessConfig::default()), Err(CliError::MissingCorpus));
    }

    #[test]
    fn test_corpus_from_config_is_enough() {
        let cli = parse(&["--keep-going"]);
        let config = cli.apply(HarnessConfig::new("from-config")).unwrap();
        assert_eq!(config.corpus_dir, PathBuf::from("from-config"));
        assert!(config.keep_going);
    }

    #[test]
    fn test_flags_override_config() {
        let base = HarnessConfig::new("a")
            .with_workspace_dir("ws-from-config")
            .with_level(Some(2))
            .with_codecs(vec![CodecId::Gzip]);
        let cli = parse(&[
            "b",
            "6",
            "--workspace",
            "ws",
            "--working-name",
            "w.bin",
            "--codec",
            "lz4",
            "--codec",
            "ZIP-DEFLATE",
            "--lzma-decoder",
            "library",
        ]);
        let config = cli.apply(base).unwrap();
        assert_eq!(config.corpus_dir, PathBuf::from("b"));
        assert_eq!(config.level, Some(6));
        assert_eq!(config.workspace_dir, PathBuf::from("ws"));
        assert_eq!(config.working_name, "w.bin");
        assert_eq!(config.codecs, vec![CodecId::Lz4, CodecId::ZipDeflate]);
        assert_eq!(config.lzma_decoder, LzmaDecodeBackend::Library);
    }

    #[test]
    fn test_unset_flags_keep_config_values() {
        let base = HarnessConfig::new("a").with_level(Some(2)).with_workspace_dir("ws");
        let config = parse(&[]).apply(base).unwrap();
        assert_eq!(config.level, Some(2));
        assert_eq!(config.workspace_dir, PathBuf::from("ws"));
    }

    #[test]
    fn test_subject_wrapper_args() {
        let cli = parse(&["c", "--subject", "wine", "--subject-arg", "tinyZZZ.exe", "--subject-arg", "--quiet"]);
        let config = cli.apply(HarnessConfig::default()).unwrap();
        assert_eq!(config.subject.program, PathBuf::from("wine"));
        assert_eq!(config.subject.args, vec!["tinyZZZ.exe".to_string(), "--quiet".to_string()]);
    }

    #[test]
    fn test_unknown_codec_is_rejected() {
        assert!(Cli::try_parse_from(["conformance", "c", "--codec", "brotli"]).is_err());
    }

    #[test]
    fn test_verbosity_count() {
        assert_eq!(parse(&["c"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["c", "-v"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["c", "-vv"]).verbosity(), Verbosity::Debug);
    }
}
