use crate::analysis::outcome::ExtractedFields;

/// Render the post-call summary sentence.
pub fn compose_summary(fields: &ExtractedFields) -> String {
    format!(
        "The customer discussed {}. The post call summary generated {}.",
        fields.discussion_points, fields.summary_intent
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_fixed_sentence() {
        let fields = ExtractedFields {
            discussion_points: "UI and UX issues".to_string(),
            summary_intent: "needs navigation improvements".to_string(),
        };
        assert_eq!(
            compose_summary(&fields),
            "The customer discussed UI and UX issues. The post call summary generated needs navigation improvements."
        );
    }
}
