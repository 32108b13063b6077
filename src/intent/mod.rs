//! Keyword intent detection.
//!
//! Small-talk classification over a fixed trigger table. The first intent in
//! table order with any trigger contained in the input wins; containment is
//! raw substring matching, not word-boundary aware ("hi" matches "this").

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Thanks,
    Greeting,
    Farewell,
    WhoAreYou,
    Okay,
    General,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Thanks => "thanks",
            Intent::Greeting => "greeting",
            Intent::Farewell => "farewell",
            Intent::WhoAreYou => "who_are_you",
            Intent::Okay => "okay",
            Intent::General => "general",
        }
    }
}

/// Trigger table. Order matters: earlier intents win ties.
const INTENT_TRIGGERS: &[(Intent, &[&str])] = &[
    (
        Intent::Thanks,
        &["thank you", "thanks", "thank u", "okay thanks", "much appreciated"],
    ),
    (
        Intent::Greeting,
        &["hi", "hello", "hey", "good morning", "good afternoon", "good evening"],
    ),
    (
        Intent::Farewell,
        &["bye", "goodbye", "see you later", "take care", "farewell"],
    ),
    (
        Intent::WhoAreYou,
        &["who are you", "what is your name", "what are you", "are you a bot"],
    ),
    (
        Intent::Okay,
        &["ok", "okay", "fine", "got it", "alright", "hmm"],
    ),
];

/// Classify an input against the trigger table.
pub fn detect_intent(input: &str) -> Intent {
    let input = input.to_lowercase();
    for (intent, triggers) in INTENT_TRIGGERS {
        if triggers.iter().any(|trigger| input.contains(trigger)) {
            return *intent;
        }
    }
    Intent::General
}

/// Canned response for an intent; `General` has none and defers to the
/// rest of the pipeline.
pub fn response_for(intent: Intent) -> Option<&'static str> {
    match intent {
        Intent::Thanks => {
            Some("You're welcome! Let me know if there is anything else I can help with.")
        }
        Intent::Greeting => {
            Some("Hello! I'm the support assistant for our help desk. How can I assist you today?")
        }
        Intent::Farewell => Some("Goodbye! Have a great day."),
        Intent::WhoAreYou => Some(
            "I'm an automated assistant here to help with questions about our products and services.",
        ),
        Intent::Okay => Some("Alright! Let me know if you have any questions."),
        Intent::General => None,
    }
}
