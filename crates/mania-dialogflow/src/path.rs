//! Resource paths and endpoints of the Dialogflow v2 API.

/// Global endpoint of the Dialogflow API.
pub const DEFAULT_BASE_URL: &str = "https://dialogflow.googleapis.com";

/// Path of the agent owned by `project_id`.
///
/// Agents are singletons per project (or per project and location), so the
/// path carries no agent id.
pub fn agent_path(project_id: &str, location: Option<&str>) -> String {
    match location {
        Some(loc) if loc != "global" => format!("projects/{project_id}/locations/{loc}/agent"),
        _ => format!("projects/{project_id}/agent"),
    }
}

/// Collection under which the entity types of `parent` live.
pub fn entity_types_path(parent: &str) -> String {
    format!("{}/entityTypes", parent.trim_end_matches('/'))
}

/// Endpoint serving agents in `location`; regional agents are only reachable
/// through their regional host.
pub fn default_base_url(location: Option<&str>) -> String {
    match location {
        Some(loc) if loc != "global" => format!("https://{loc}-dialogflow.googleapis.com"),
        _ => DEFAULT_BASE_URL.to_string(),
    }
}
