use serde::{Deserialize, Serialize};

/// Structured output of the generation step.
///
/// Deserialized from the JSON text the model returns; both fields default so
/// a sparse model answer still yields a usable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poem {
    #[serde(default)]
    pub poetry_content: String,
    #[serde(default)]
    pub suggested_hashtags: Vec<String>,
}

impl Poem {
    /// Format the poem for posting: bold topic header, poem body, hashtags
    /// space-joined in italics.
    pub fn to_post_message(&self, topic: &str) -> String {
        let hashtags = self.suggested_hashtags.join(" ");
        format!(
            "**【{}】**\n\n{}\n\n_{}_",
            topic, self.poetry_content, hashtags
        )
    }
}
