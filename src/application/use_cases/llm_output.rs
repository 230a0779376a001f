pub(crate) fn extract_json_payload(output: &str) -> String {
    let stripped = strip_code_fence(output.trim());

    if serde_json::from_str::<serde_json::Value>(&stripped).is_ok() {
        return stripped;
    }

    // Models sometimes wrap the payload in prose; slice the outermost object
    if let (Some(start), Some(end)) = (stripped.find('{'), stripped.rfind('}')) {
        if start < end {
            return stripped[start..=end].to_string();
        }
    }

    stripped
}

fn strip_code_fence(value: &str) -> String {
    let trimmed = value.trim();
    if let Some(stripped) = trimmed.strip_prefix("```json") {
        return stripped.trim().trim_end_matches("```").trim().to_string();
    }
    if let Some(stripped) = trimmed.strip_prefix("```") {
        return stripped.trim().trim_end_matches("```").trim().to_string();
    }
    trimmed.to_string()
}
