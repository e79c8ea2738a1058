use garden_catalog::{CatalogItem, ProbeOutcome, ResolveReport, UnavailableReason};

/// Renders the org-policy listing emitted on stdout: a comment header plus
/// one `- <model>:predict` line per available model.
pub(crate) fn render_policy_lines(report: &ResolveReport) -> String {
    let mut out = format!(
        "# Models available in {} for publisher '{}'\n",
        report.region, report.publisher
    );
    for item in &report.available {
        out.push_str(&format!("- {item}:predict\n"));
    }
    out
}

pub(crate) fn render_probe_status(
    item: &CatalogItem,
    outcome: &ProbeOutcome,
    region: &str,
) -> String {
    match outcome {
        ProbeOutcome::Available => format!("{item}: available in {region}"),
        ProbeOutcome::Unavailable(UnavailableReason::NotFound) => {
            format!("{item}: not available in {region} (not found)")
        }
        ProbeOutcome::Unavailable(UnavailableReason::Error(reason)) => {
            format!("{item}: not available in {region} ({reason})")
        }
    }
}

#[cfg(test)]
mod tests {
    use garden_catalog::{CatalogItem, ProbeOutcome, ResolveReport, UnavailableReason};

    use super::{render_policy_lines, render_probe_status};

    #[test]
    fn policy_lines_carry_header_and_predict_suffix() {
        let report = ResolveReport {
            region: "europe-west4".to_string(),
            publisher: "google".to_string(),
            discovered: 3,
            available: vec![
                CatalogItem::new("publishers/google/models/gemini-pro"),
                CatalogItem::new("publishers/google/models/gemini-flash"),
            ],
        };

        let rendered = render_policy_lines(&report);
        assert_eq!(
            rendered,
            "# Models available in europe-west4 for publisher 'google'\n\
             - publishers/google/models/gemini-pro:predict\n\
             - publishers/google/models/gemini-flash:predict\n"
        );
    }

    #[test]
    fn empty_report_renders_header_only() {
        let report = ResolveReport {
            region: "europe-west4".to_string(),
            publisher: "google".to_string(),
            discovered: 0,
            available: Vec::new(),
        };
        assert_eq!(
            render_policy_lines(&report),
            "# Models available in europe-west4 for publisher 'google'\n"
        );
    }

    #[test]
    fn probe_status_lines_distinguish_not_found_from_errors() {
        let item = CatalogItem::new("publishers/google/models/bert-base");
        assert_eq!(
            render_probe_status(&item, &ProbeOutcome::Available, "europe-west4"),
            "publishers/google/models/bert-base: available in europe-west4"
        );
        assert_eq!(
            render_probe_status(
                &item,
                &ProbeOutcome::Unavailable(UnavailableReason::NotFound),
                "europe-west4"
            ),
            "publishers/google/models/bert-base: not available in europe-west4 (not found)"
        );
        assert_eq!(
            render_probe_status(
                &item,
                &ProbeOutcome::Unavailable(UnavailableReason::Error("403".to_string())),
                "europe-west4"
            ),
            "publishers/google/models/bert-base: not available in europe-west4 (403)"
        );
    }
}
