// All LLM prompt constants for the workflow steps.
// System prompts are completed at call time with the shared fragments in
// llm_client::prompts; templates use `{placeholder}` markers filled via `str::replace`.

/// Query planner system prompt. Answer is a comma-separated list.
pub const PLANNER_SYSTEM: &str = "You are a senior technical interviewer planning a deep-dive \
    interview question. Given a high-level topic, write 3 specific web search queries that will \
    surface recent (2023-2025) research papers discussing system design patterns, failure modes, \
    or architectural choices for that topic. Favour Deep Learning, LLM Systems and Generative AI \
    Infrastructure sources.";

/// Replace `{topic}`.
pub const PLANNER_PROMPT_TEMPLATE: &str = "Topic: {topic}";

/// Paper selector system prompt.
pub const SELECTOR_SYSTEM: &str = "You are an expert researcher choosing the key paper for a \
    technical interview question. Review the search results and pick the single one best suited \
    to a {seniority} level system design question. Prefer papers that describe a specific failure \
    mode, optimization technique, or architectural pattern.";

/// Replace `{topic}` and `{papers}`.
pub const SELECTOR_PROMPT_TEMPLATE: &str = r#"Topic: {topic}

Papers:
{papers}

Return a JSON object with this EXACT schema:
{
  "title": "Title of the chosen paper or article",
  "authors": "Authors if the summary names them, otherwise \"Unknown\"",
  "summary": "The key technical insight in two or three sentences",
  "url": "The URL exactly as listed above",
  "reason": "Why this paper makes a strong interview question"
}"#;

/// Question generator system prompt (creation mode).
pub const GENERATOR_SYSTEM: &str = "You are a Staff GenAI Engineer writing a system design \
    interview question grounded in a research paper. The question must be hard and must reveal \
    whether the candidate understands the nuances of the topic.";

/// Replace `{topic}`, `{title}`, `{summary}`, `{url}`.
pub const GENERATOR_PROMPT_TEMPLATE: &str = r#"Topic: {topic}

Paper Title: {title}
Summary: {summary}
URL: {url}

Write the question in four parts:
1. The Interview Question: a scenario-based question that tests deep understanding.
2. The Common Wrong Answer: a plausible but flawed response a strong engineer might give.
3. How It Actually Works: a concise technical breakdown of the real answer, based on the paper.
4. Key Paper: the citation for the paper.

Return a JSON object with this EXACT schema:
{
  "question": "...",
  "wrong_answer": "...",
  "explanation": "...",
  "citation": "..."
}"#;

/// Question generator system prompt (refinement mode).
pub const REFINE_SYSTEM: &str = "You are a Staff GenAI Engineer revising an interview question \
    after a bar-raiser review. Address every point of the feedback while keeping the same \
    four-part format.";

/// Replace `{question}`, `{wrong_answer}`, `{explanation}`, `{feedback}`.
pub const REFINE_PROMPT_TEMPLATE: &str = r#"Original Question: {question}
Original Wrong Answer: {wrong_answer}
Original Explanation: {explanation}

Feedback: {feedback}

Return a JSON object with this EXACT schema:
{
  "question": "...",
  "wrong_answer": "...",
  "explanation": "...",
  "citation": "..."
}"#;

/// Reviewer system prompt. Answer is free text; the approval keyword ends the loop.
pub const REVIEWER_SYSTEM: &str = "You are a Bar Raiser at a top tech company reviewing an \
    interview question. Critique it for depth, clarity and correctness. \
    Is it a {seniority} level question? Does the Common Wrong Answer sound realistic? \
    Is the explanation technically accurate? \
    If the question is good, reply with exactly \"APPROVE\". \
    Otherwise give specific feedback on what to change.";

/// Replace `{digest}`.
pub const REVIEWER_PROMPT_TEMPLATE: &str = "{digest}";

/// LinkedIn post writer system prompt (batch mode).
pub const LINKEDIN_SYSTEM: &str = "You are a popular tech writer on LinkedIn. Turn the interview \
    question into a post with this structure: \
    1. Hook: a catchy opening that sets the scene (\"You're in an ML Engineer interview at...\"). \
    2. The Scenario: briefly state the question. \
    3. The Trap: \"Don't answer: [Common Wrong Answer]\" and why it is shallow. \
    4. The Insight: the core tradeoff or mechanism. \
    5. The Hired Answer: \"The answer that gets you hired: [The Solution]\". \
    Keep it punchy, bold the key terms, and use emojis sparingly.";

/// Replace `{digest}`.
pub const LINKEDIN_PROMPT_TEMPLATE: &str = "{digest}";

/// Daily topic planner system prompt (batch mode). Answer is a comma-separated list.
pub const TOPICS_SYSTEM: &str = "You are a senior technical interviewer planning a daily batch \
    of 5 deep-dive interview questions. For the theme \"Trending Research and Production Best \
    Practices in Generative AI\", propose 5 distinct, specific sub-topics, for example: \
    Speculative Decoding for Latency, RAG Context Window Tradeoffs, KV Cache Optimization, \
    LoRA Fine-tuning Stability, Agentic Tool Use Patterns.";

pub const TOPICS_PROMPT: &str = "Generate 5 topics.";
