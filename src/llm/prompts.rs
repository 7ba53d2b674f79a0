/// Marker introducing the discussion points in a generated response.
pub const DISCUSSIONS_MARKER: &str = "Key Discussions:";

/// Marker introducing the closing summary in a generated response.
pub const SUMMARY_MARKER: &str = "Summary:";

/// Build the call-analysis prompt. The call text is embedded verbatim.
pub fn build_call_prompt(call_text: &str) -> String {
    format!(
        "Analyze this call text and provide:\n\
Key Discussions and summary.\n\
\n\
Answer in plain text with exactly these two labelled sections:\n\
{DISCUSSIONS_MARKER} <the main points the customer raised>\n\
{SUMMARY_MARKER} <one sentence describing the outcome of the call>\n\
\n\
Call Text: {call_text}"
    )
}
