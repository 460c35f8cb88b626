//! Reduces a `generateContent` response to a single [`Outcome`].

use super::types::GenerateContentResponse;

const DEFAULT_BLOCK_MESSAGE: &str = "Content was blocked.";

/// What a provider response amounts to. Exactly one per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Description(String),
    Blocked { reason: String, message: String },
    SafetyStopped,
    NoCandidates,
    NoText,
}

/// Interpret `response`. Never fails: every shape maps to an [`Outcome`].
///
/// A prompt-level block reason wins over any candidates. Only the first
/// candidate is read; its text parts are joined with single spaces, and a
/// blank result falls back to the finish reason.
pub fn interpret(response: &GenerateContentResponse) -> Outcome {
    if let Some(feedback) = &response.prompt_feedback {
        if let Some(reason) = &feedback.block_reason {
            let message = feedback
                .block_reason_message
                .clone()
                .unwrap_or_else(|| DEFAULT_BLOCK_MESSAGE.to_string());
            tracing::warn!(
                "Content generation blocked by Gemini. Reason: {}, Message: {}",
                reason,
                message
            );
            return Outcome::Blocked {
                reason: reason.clone(),
                message,
            };
        }
    }

    let Some(candidate) = response.candidates.as_deref().and_then(|c| c.first()) else {
        tracing::warn!("Gemini API returned no candidates.");
        return Outcome::NoCandidates;
    };

    let description = candidate
        .content
        .as_ref()
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.text())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|text| !text.trim().is_empty());

    match description {
        Some(text) => Outcome::Description(text),
        None if candidate
            .finish_reason
            .as_deref()
            .is_some_and(|reason| reason.eq_ignore_ascii_case("SAFETY")) =>
        {
            tracing::warn!(
                "Candidate finished due to SAFETY. Safety ratings: {:?}",
                candidate.safety_ratings
            );
            Outcome::SafetyStopped
        }
        None => {
            tracing::warn!("Gemini API returned a candidate with no text content.");
            Outcome::NoText
        }
    }
}
