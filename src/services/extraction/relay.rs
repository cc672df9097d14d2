//! Agent Relay Protocol
//!
//! Builds a prompt for an external reasoning agent and parses the text a
//! user pastes back into task records. No network is involved; the human
//! is the transport. The parser is tolerant of surrounding prose: it
//! extracts the first bracketed JSON array it can find, and falls back
//! to line-based extraction when no array parses.

use regex::Regex;
use tracing::{debug, warn};

use crate::models::task::{TaskRecord, TaskType, STATUS_NOT_START};
use crate::utils::error::{ExtractError, ExtractResult};

use super::classifier::{classify_module, classify_type};
use super::generator::truncate_with_ellipsis;
use super::keywords::MODULE_OTHER;

/// Title budget for tasks recovered by the line-based fallback.
const LINE_TITLE_MAX: usize = 60;

/// Render the fixed prompt handed to the external reasoning agent.
pub fn build_prompt(project_name: &str, description: &str) -> String {
    format!(
        r#"You are helping break a software project description into trackable tasks.

Project: {}

Description:
{}

Identify every discrete piece of work in the description. For each one, decide whether it is new functionality ("Feature") or something wrong that needs correcting ("Issue"), and name the subsystem it belongs to.

Return a JSON array of objects, each with exactly these fields:
- "title": a short task title
- "description": what needs to be done
- "type": "Feature" or "Issue"
- "status": always "Not start"
- "module": the subsystem the task belongs to, or "Other"

Rules:
1. One object per discrete work item, in the order they appear.
2. "type" must be exactly "Feature" or "Issue".
3. "status" must be exactly "Not start".
4. Return ONLY the JSON array, no markdown fences, no commentary."#,
        project_name, description
    )
}

/// Parse the pasted agent reply into task records.
///
/// Tries the JSON path first; when no array parses, falls back to
/// line-based extraction. Zero tasks from both paths is a malformed
/// response.
pub fn parse_response(pasted: &str) -> ExtractResult<Vec<TaskRecord>> {
    let tasks = match parse_json_tasks(pasted) {
        Some(tasks) if !tasks.is_empty() => {
            debug!(tasks = tasks.len(), "relay: parsed JSON array");
            tasks
        }
        _ => {
            warn!("relay: no JSON array parsed, falling back to line-based extraction");
            parse_numbered_lines(pasted)
        }
    };

    if tasks.is_empty() {
        return Err(ExtractError::malformed_response(
            "relay response contained no parseable tasks",
            pasted,
        ));
    }
    Ok(tasks)
}

/// Extract and parse the first JSON array in the reply.
///
/// Objects missing any of `title`/`description`/`type`/`status` are
/// rejected individually; the rest of the batch survives.
fn parse_json_tasks(pasted: &str) -> Option<Vec<TaskRecord>> {
    let stripped = strip_fences(pasted);
    let array = find_json_array(stripped)?;
    let values: Vec<serde_json::Value> = serde_json::from_str(&array).ok()?;

    let tasks: Vec<TaskRecord> = values.iter().filter_map(task_from_value).collect();
    if tasks.len() < values.len() {
        warn!(
            rejected = values.len() - tasks.len(),
            "relay: dropped objects missing required fields"
        );
    }
    Some(tasks)
}

/// Strip markdown code fences if the reply is wrapped in them.
fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.starts_with("```") {
        trimmed
            .trim_start_matches("```json")
            .trim_start_matches("```")
            .trim_end_matches("```")
            .trim()
    } else {
        trimmed
    }
}

/// Locate the first complete `[...]` block, respecting nesting and
/// string literals.
fn find_json_array(text: &str) -> Option<String> {
    let start = text.find('[')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(text[start..start + offset + 1].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

/// Build a task record from one JSON object, or reject it.
fn task_from_value(value: &serde_json::Value) -> Option<TaskRecord> {
    let object = value.as_object()?;

    let title = required_field(object, "title")?;
    let description = required_field(object, "description")?;
    let type_str = required_field(object, "type")?;
    // Presence is required; the value itself is replaced below.
    required_field(object, "status")?;

    let task_type = match type_str.to_lowercase().as_str() {
        "feature" => TaskType::Feature,
        "issue" => TaskType::Issue,
        _ => return None,
    };

    let module = object
        .get("module")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(MODULE_OTHER)
        .to_string();

    let summary = keyword_summary(&description);

    Some(TaskRecord {
        title,
        description,
        task_type,
        module,
        summary,
        status: STATUS_NOT_START.to_string(),
    })
}

fn required_field(
    object: &serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> Option<String> {
    object
        .get(key)
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Line-based fallback: a new task begins at any numbered line;
/// subsequent unnumbered lines extend the current task's description.
fn parse_numbered_lines(pasted: &str) -> Vec<TaskRecord> {
    let Some(marker) = Regex::new(r"^\s*\d+\.\s*").ok() else {
        return Vec::new();
    };

    let mut drafts: Vec<(String, String)> = Vec::new();
    for line in pasted.lines() {
        if let Some(found) = marker.find(line) {
            let rest = line[found.end()..].trim();
            if !rest.is_empty() {
                drafts.push((rest.to_string(), rest.to_string()));
            }
        } else if let Some((_, description)) = drafts.last_mut() {
            let extra = line.trim();
            if !extra.is_empty() {
                description.push(' ');
                description.push_str(extra);
            }
        }
    }

    drafts
        .into_iter()
        .map(|(title, description)| TaskRecord {
            title: truncate_with_ellipsis(&title, LINE_TITLE_MAX),
            task_type: classify_type(&description),
            module: classify_module(&description),
            summary: keyword_summary(&description),
            description,
            status: STATUS_NOT_START.to_string(),
        })
        .collect()
}

/// Short summary for tasks whose source did not provide one.
fn keyword_summary(description: &str) -> String {
    super::generator::derive_summary(description)
}
