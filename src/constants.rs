//! Centralized constants for querent.
//!
//! All magic numbers, default strings, and configuration constants live here
//! so they can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "querent";

/// Default LLM model identifier.
pub const DEFAULT_MODEL: &str = "gpt-4.1";

/// Default provider when none is configured.
pub const DEFAULT_PROVIDER: &str = "openai";

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Per-project configuration filename.
pub const PROJECT_CONFIG_FILENAME: &str = "querent.toml";

/// Readline history filename.
pub const HISTORY_FILENAME: &str = "chat_history.txt";

/// Environment variable consulted for the database URL.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

// --- Provider defaults ---

/// Default LLM model identifier for Anthropic.
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-6";

/// Default LLM model identifier for OpenRouter.
pub const DEFAULT_OPENROUTER_MODEL: &str = "arcee-ai/trinity-large-preview:free";

/// Default LLM model identifier for Gemini.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Default LLM model identifier for DeepSeek.
pub const DEFAULT_DEEPSEEK_MODEL: &str = "deepseek-chat";

/// Default base URL for local Ollama server.
pub const OLLAMA_DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default LLM model identifier for Ollama.
pub const OLLAMA_DEFAULT_MODEL: &str = "llama3";

// --- Generation defaults ---

/// Maximum tokens for LLM completions.
pub const MAX_TOKENS: u64 = 4096;

/// Sampling temperature. Low, since the model writes SQL.
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Number of conversation messages kept in the generator's history window.
pub const DEFAULT_MAX_MESSAGES: usize = 20;

// --- Agent loop ---

/// Upper bound on tool-call passes per user prompt.
pub const MAX_TOOL_ITERATIONS: usize = 10;

/// Prefix put in front of every line typed at the chat prompt.
pub const USER_QUESTION_PREFIX: &str = "User Question:";

/// Label that introduces an execution result spliced into a response.
pub const SQL_RESULT_LABEL: &str = "SQL Query Result:";

/// Prefix marking an execution result as a database failure.
pub const SQL_ERROR_PREFIX: &str = "SQL Error:";

/// Default system prompt prepended to all conversations.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an intelligent SQL database agent that helps users \
query and manipulate data using natural language.

AVAILABLE TOOL:
SQLQuery - Execute any SQL query you write
Format:
Tool: SQLQuery
Args: <your_sql_query>

IMPORTANT: Use the exact format above without any backticks or code blocks.

WORKFLOW:
1. When the user asks about data, FIRST discover the database schema by running the query \
that lists all tables for this database engine
2. Identify the relevant table(s) for the user's question from the schema results
3. Write and execute the final query to answer the user's question using the discovered table names
4. You can chain multiple SQLQuery tool calls in one response

CRITICAL RULES:
- NEVER invent or guess table names
- ONLY use table names that you discover from schema queries
- If a table doesn't exist in the schema results, DO NOT use it
- Always verify table names exist before using them in queries";
