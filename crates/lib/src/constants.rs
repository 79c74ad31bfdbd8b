//! Fixed limits shared by the pipeline stages.

/// Longest accepted source URL, in characters.
pub const MAX_URL_LENGTH: usize = 2048;

/// Minimum trimmed length of manual or extracted content, in characters.
pub const MIN_CONTENT_CHARS: usize = 200;

/// Number of leading lines scanned for title, author, date and image.
pub const METADATA_SCAN_LINES: usize = 30;

/// Words per minute used to estimate reading time.
pub const WORDS_PER_MINUTE: u64 = 250;

/// Upper bound on the preview text, in characters.
pub const MAX_PREVIEW_CHARS: usize = 1200;

/// Content beyond this many characters is not sent to the AI collaborator.
pub const MAX_PROMPT_CONTENT_CHARS: usize = 8000;

/// Title used when neither the content nor the URL yields one.
pub const UNTITLED_POST: &str = "Untitled Blog Post";

/// Name of the single function the AI collaborator is forced to call.
pub const REPURPOSE_TOOL_NAME: &str = "return_repurposed_content";

/// Default number of entries kept by history stores.
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;
