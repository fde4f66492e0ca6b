use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    /// The Java package of generated classes, also the name of the output subdirectory.
    pub package: String,
    pub target_dir: PathBuf,
    /// Whether comments in procedure bodies are carried over into the generated code.
    pub preserve_comments: bool,
    /// Number of worker threads translating procedures.
    pub num_threads: usize,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            package: "my_pkg".to_string(),
            target_dir: PathBuf::from("."),
            preserve_comments: true,
            num_threads: 1,
        }
    }
}
