// Shared prompt fragments.
// Each workflow step defines its own prompts in workflow/prompts.rs; this file
// only holds the cross-cutting pieces.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt fragment for steps that answer with a plain comma-separated list.
pub const COMMA_LIST_INSTRUCTION: &str = "Return only the items, separated by commas. \
    Do not number them and do not add any other text.";

/// The interview level every generated question is pitched at.
pub const SENIORITY_BAR: &str = "Senior/Staff";
