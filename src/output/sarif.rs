use crate::finding::{AuditReport, Severity};
use crate::scanners::all_rules;
use serde_sarif::sarif::{
    ArtifactContent, ArtifactLocation, Location, Message, MultiformatMessageString,
    PhysicalLocation, Region, ReportingDescriptor, Result as SarifResult, ResultLevel, Run, Sarif, Tool, ToolComponent,
};
use std::collections::HashMap;

pub fn format(report: &AuditReport) -> String {
    let findings = report.findings();

    // The full rule catalogue is small, so every rule is declared even when unused.
    let catalogue = all_rules();
    let rule_index: HashMap<&str, i64> = catalogue
        .iter()
        .enumerate()
        .map(|(i, rule)| (rule.id, i as i64))
        .collect();

    let rules: Vec<ReportingDescriptor> = catalogue
        .iter()
        .map(|info| {
            let mut rule = ReportingDescriptor::builder().id(info.id.to_string()).build();
            rule.short_description = Some(
                MultiformatMessageString::builder()
                    .text(info.message.to_string())
                    .build(),
            );
            rule.help = Some(
                MultiformatMessageString::builder()
                    .text(info.remediation.to_string())
                    .build(),
            );
            rule
        })
        .collect();

    let results: Vec<SarifResult> = findings
        .iter()
        .map(|f| {
            let level = match f.severity {
                Severity::Error => ResultLevel::Error,
                Severity::Info => ResultLevel::Note,
            };

            let mut result = SarifResult::builder()
                .message(Message::builder().text(f.message.clone()).build())
                .build();

            result.rule_id = Some(f.rule_id.clone());
            result.level = Some(level);
            result.rule_index = rule_index.get(f.rule_id.as_str()).copied();

            if let Some(ref file) = f.file {
                let uri = file.to_string_lossy().replace('\\', "/");

                let mut location = Location::builder().build();
                let mut physical = PhysicalLocation::builder().build();
                physical.artifact_location = Some(ArtifactLocation::builder().uri(uri).build());

                if let Some(ref text) = f.snippet {
                    let mut snippet = ArtifactContent::builder().build();
                    snippet.text = Some(text.clone());
                    let mut region = Region::builder().build();
                    region.snippet = Some(snippet);
                    physical.region = Some(region);
                }

                location.physical_location = Some(physical);
                result.locations = Some(vec![location]);
            }

            result
        })
        .collect();

    let driver = ToolComponent::builder()
        .name(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION").to_string())
        .rules(rules)
        .build();

    let tool = Tool::builder().driver(driver).build();

    let run = Run::builder().tool(tool).results(results).build();

    let sarif = Sarif::builder().version("2.1.0").runs(vec![run]).build();

    serde_json::to_string_pretty(&sarif).expect("SARIF serialization failed")
}
