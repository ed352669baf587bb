//! Prompt construction for the delegated planner.
//!
//! Pure string assembly; no I/O.

/// Fewest steps the model is asked for.
pub const MIN_STEPS: usize = 4;
/// Most steps the model is asked for.
pub const MAX_STEPS: usize = 8;

/// Output contract included in the system instruction.
const OUTPUT_SCHEMA: &str = r#"## Output Schema

Return a single JSON object with exactly these keys:

- "dish": string. Short, appetizing dish name.
- "steps": array of objects, each with:
  - "label": string. What to do, in a few words.
  - "start_offset_sec": integer >= 0. Seconds from the start of cooking.
  - "duration_sec": integer > 0. How long the step takes.
- "substitutions": array of strings. Swaps for missing or optional ingredients.
"#;

/// Scheduling guidance included in the system instruction.
const SCHEDULING_GUIDELINES: &str = r#"## Scheduling Guidelines

1. Run things in parallel where a real cook would: give overlapping steps the same or overlapping start offsets (e.g. preheat while chopping).
2. List steps in the order the cook should read them.
3. End with a short "Serve" step.
"#;

/// Build the system instruction for a given time limit.
pub fn build_system_prompt(time_limit_minutes: i64) -> String {
    let max_seconds = time_limit_minutes.saturating_mul(60);
    let mut prompt = String::with_capacity(2048);

    prompt.push_str(
        "You are a practical home-cooking planner. Given the ingredients someone \
         has on hand and how long they have, you pick one dish and lay out a timed \
         cooking plan.\n\n",
    );

    prompt.push_str(OUTPUT_SCHEMA);
    prompt.push('\n');
    prompt.push_str(SCHEDULING_GUIDELINES);
    prompt.push('\n');

    prompt.push_str("## Constraints\n\n");
    prompt.push_str(&format!(
        "- Every step must finish by {max_seconds} seconds \
         (start_offset_sec + duration_sec <= {max_seconds}).\n"
    ));
    prompt.push_str(&format!("- Use between {MIN_STEPS} and {MAX_STEPS} steps.\n"));
    prompt.push_str(
        "- Respond with JSON only. No prose, no markdown, no code fences, \
         nothing before or after the object.\n",
    );

    prompt
}

/// Build the user instruction carrying the raw ingredients and an example.
pub fn build_user_prompt(ingredients: &str, time_limit_minutes: i64) -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str("Ingredients:\n");
    prompt.push_str(ingredients.trim());
    prompt.push_str("\n\n");
    prompt.push_str(&format!("Time limit: {time_limit_minutes} minutes\n\n"));
    prompt.push_str("Respond in exactly this JSON shape:\n");
    prompt.push_str(&example_plan_json());
    prompt.push('\n');

    prompt
}

/// The worked example shown to the model.
fn example_plan_json() -> String {
    let example = serde_json::json!({
        "dish": "Quick Egg & Greens Wraps",
        "steps": [
            {"label": "Preheat pan", "start_offset_sec": 0, "duration_sec": 180},
            {"label": "Whisk eggs; chop spinach", "start_offset_sec": 0, "duration_sec": 180},
            {"label": "Cook eggs; warm tortillas", "start_offset_sec": 180, "duration_sec": 300},
            {"label": "Assemble wraps", "start_offset_sec": 480, "duration_sec": 240},
            {"label": "Serve", "start_offset_sec": 720, "duration_sec": 60}
        ],
        "substitutions": ["No tortillas? Serve on toast."]
    });
    // Serializing a literal `Value` cannot fail.
    serde_json::to_string_pretty(&example).unwrap_or_default()
}
