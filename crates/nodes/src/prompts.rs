//! Stage prompt construction.
//!
//! Each stage prompt is the role's optional template followed by fixed
//! instructional text with the prior stage outputs embedded verbatim. An
//! empty template leaves just the fixed text.

/// Planner instructions. `{request}` is replaced with the user request.
const PLANNER_INSTRUCTIONS: &str = "\
You are the Planner for this project. You share a model with the Builder, \
but your only task is planning: never write code.

User request: {request}

Break this request down into a concrete technical task list for the Builder to implement.
Output only the task list, as a Markdown list.";

/// Builder instructions. `{plan}` is replaced with the planner output.
const BUILDER_INSTRUCTIONS: &str = "\
You are the Builder.
Based on the plan below, present the required code changes or the concrete implementation code.

Plan:
{plan}";

/// Auditor instructions. `{plan}` and `{build}` are replaced with the planner
/// and builder outputs.
const AUDITOR_INSTRUCTIONS: &str = "\
You are the Auditor.
Audit the Planner's plan and the Builder's implementation.

1. Are there any security problems?
2. Does it satisfy the request?
3. What should be improved?

Judge strictly.

Planner's plan:
{plan}

Builder's implementation:
{build}";

/// Builds the planner prompt around `request`.
pub fn planner_prompt(template: &str, request: &str) -> String {
    compose(template, &fill(PLANNER_INSTRUCTIONS, &[("{request}", request)]))
}

/// Builds the builder prompt around `plan`.
pub fn builder_prompt(template: &str, plan: &str) -> String {
    compose(template, &fill(BUILDER_INSTRUCTIONS, &[("{plan}", plan)]))
}

/// Builds the auditor prompt around `plan` and `build`.
pub fn auditor_prompt(template: &str, plan: &str, build: &str) -> String {
    compose(
        template,
        &fill(AUDITOR_INSTRUCTIONS, &[("{plan}", plan), ("{build}", build)]),
    )
}

/// Substitutes each placeholder exactly once, in a single left-to-right pass,
/// so placeholder-looking text inside a stage output is never expanded.
fn fill(instructions: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(
        instructions.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>(),
    );
    let mut rest = instructions;

    loop {
        let next = values
            .iter()
            .filter_map(|&(key, value)| rest.find(key).map(|pos| (pos, key, value)))
            .min_by_key(|&(pos, _, _)| pos);
        let Some((start, key, value)) = next else {
            break;
        };
        out.push_str(&rest[..start]);
        out.push_str(value);
        rest = &rest[start + key.len()..];
    }
    out.push_str(rest);
    out
}

fn compose(template: &str, instructions: &str) -> String {
    let template = template.trim();
    if template.is_empty() {
        instructions.to_string()
    } else {
        format!("{template}\n\n{instructions}")
    }
}
