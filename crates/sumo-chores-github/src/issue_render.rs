use std::collections::BTreeSet;

use sumo_chores_core::ComplianceResult;

const PLATFORM_DISPLAY_NAME: &str = "Sumo Logic";

pub fn render_compliance_issue_title(monitor_name: &str) -> String {
    format!("Non-compliant tags found in {PLATFORM_DISPLAY_NAME} monitor: {monitor_name}")
}

fn render_tag_list(tags: &BTreeSet<String>) -> String {
    tags.iter()
        .map(|tag| format!("`{tag}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render_compliance_issue_body(violation: &ComplianceResult) -> String {
    let compliant = if violation.compliant_tags.is_empty() {
        "None".to_string()
    } else {
        render_tag_list(&violation.compliant_tags)
    };
    let lines = [
        "## Non-compliant Monitor Tags".to_string(),
        String::new(),
        format!("A {PLATFORM_DISPLAY_NAME} monitor has been found with non-compliant tags."),
        String::new(),
        "### Monitor Details".to_string(),
        format!("- **Name**: {}", violation.name),
        format!("- **ID**: {}", violation.id),
        format!("- **URL**: {}", violation.url),
        String::new(),
        "### Tag Issues".to_string(),
        "The following tags are not on the allowlist:".to_string(),
        render_tag_list(&violation.non_compliant_tags),
        String::new(),
        "### Compliant Tags".to_string(),
        "The following tags on this monitor are compliant:".to_string(),
        compliant,
        String::new(),
        "Please update the monitor to use only approved tags.".to_string(),
    ];
    let mut body = lines.join("\n");
    body.push('\n');
    body
}
