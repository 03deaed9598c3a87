//! System-wide default constants.
//!
//! Grouped by subsystem for easy discovery. Every value here can be
//! overridden from `vectorino.toml` except where noted.

// ============================================================================
// Server
// ============================================================================

/// HTTP bind address when neither the config file, `VECTORINO_SERVER_ADDR`
/// nor `--addr` provide one.
pub const SERVER_ADDR: &str = "0.0.0.0:8080";

/// Environment variable overriding the bind address.
pub const SERVER_ADDR_ENV: &str = "VECTORINO_SERVER_ADDR";

/// Environment variable pointing at a TOML config file.
pub const CONFIG_PATH_ENV: &str = "VECTORINO_CONFIG";

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "vectorino.toml";

// ============================================================================
// Vector Store
// ============================================================================

/// Collection shared by the seed routine and the query path.
pub const COLLECTION_NAME: &str = "Question";

/// Maximum number of records returned by a nearText query.
pub const RESULT_LIMIT: usize = 4;

/// Vectorizer module configured on the collection.
pub const VECTORIZER: &str = "text2vec-openai";

/// Generative module configured on the collection.
pub const GENERATIVE: &str = "generative-openai";

/// Properties requested from the store and written by the seed routine.
pub const QUESTION_PROPERTIES: [&str; 3] = ["category", "question", "answer"];

/// Environment variable holding the Weaviate Cloud endpoint. Not configurable.
pub const ENDPOINT_ENV: &str = "WCD_URL";

/// Environment variable holding the Weaviate Cloud API key. Not configurable.
pub const API_KEY_ENV: &str = "WCD_API_KEY";

/// Environment variable holding the embedding/generation API key. Not configurable.
pub const OPENAI_KEY_ENV: &str = "OPENAI_APIKEY";

/// Header the store forwards to the OpenAI modules.
pub const OPENAI_KEY_HEADER: &str = "X-OpenAI-Api-Key";

// ============================================================================
// Seed
// ============================================================================

/// Public Jeopardy sample dataset imported by `vectorino-seed`.
pub const DATASET_URL: &str =
    "https://raw.githubusercontent.com/weaviate-tutorials/quickstart/main/data/jeopardy_tiny.json";

// ============================================================================
// UI
// ============================================================================

/// Number of skeleton rows rendered while a search is in flight.
pub const PLACEHOLDER_ROWS: usize = 5;

/// Page title shown above the search box.
pub const PAGE_TITLE: &str = "Vectorino";
