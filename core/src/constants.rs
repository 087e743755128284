//! Defaults used when neither a config file nor a flag says otherwise.

/// Subject executable.
pub const DEFAULT_SUBJECT: &str = "tinyZZZ";

/// Official LZMA command-line coder (reference decoder).
pub const DEFAULT_LZMA_TOOL: &str = "lzma";

/// Official LPAQ8 command-line coder (reference encoder and decoder).
pub const DEFAULT_LPAQ8_TOOL: &str = "lpaq8";

/// Workspace directory, recreated at the start of every run.
pub const DEFAULT_WORKSPACE_DIR: &str = "verify_tmp";

/// Name of the working copy of the current corpus file inside the workspace.
/// Artifacts are named `<working name><codec suffix>`.
pub const DEFAULT_WORKING_NAME: &str = "testfile.hex";
