//! Prompt text and the structured-output schema for topic content.

use serde_json::{json, Value};

pub const SYSTEM_INSTRUCTION: &str = "You are an expert biology teacher. Focus on clear explanations and visual learning. Use markdown for the notes section, including bold text, lists, and headers.";

const IMAGE_STYLE: &str =
    "educational science illustration, biology textbook style, white background, high resolution, clear details";

/// User prompt asking for the whole study bundle of one topic
pub fn topic_prompt(unit_name: &str, topic_name: &str) -> String {
    format!(
        "Generate educational content for a high school biology course.
Unit: {}
Topic: {}

Please provide:
1. Study notes (markdown).
2. 2 Visual Aid descriptions (for generating diagrams).
3. 5 Flashcards.
4. 3 Quiz Questions.
5. A Virtual Lab.

Make the tone engaging and student-friendly.",
        unit_name, topic_name
    )
}

/// Visual prompt prefixed with the textbook diagram style
pub fn image_prompt(prompt: &str) -> String {
    format!("{}: {}", IMAGE_STYLE, prompt)
}

fn string_array() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

/// Response schema matching [`TopicContentPayload`](super::TopicContentPayload)
pub fn content_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "notes": {
                "type": "STRING",
                "description": "Comprehensive study notes in Markdown format. Use headers (#, ##), bullet points, and bold text for key terms."
            },
            "visuals": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "prompt": {
                            "type": "STRING",
                            "description": "A highly detailed, descriptive prompt for an educational diagram or illustration (e.g., 'A cross-section diagram of a mitochondrion with labels for matrix and cristae on a white background')."
                        },
                        "caption": {
                            "type": "STRING",
                            "description": "A short, educational caption explaining the diagram."
                        }
                    },
                    "required": ["prompt", "caption"]
                },
                "description": "Generate 2 distinct visual aids (diagrams or illustrations) that help explain the most complex parts of this topic."
            },
            "flashcards": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "front": { "type": "STRING", "description": "The term or concept." },
                        "back": { "type": "STRING", "description": "The definition or explanation." }
                    },
                    "required": ["front", "back"]
                },
                "description": "5 key flashcards for the topic."
            },
            "checkpoints": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "question": { "type": "STRING" },
                        "options": string_array(),
                        "correctAnswerIndex": {
                            "type": "INTEGER",
                            "description": "Index of the correct option (0-3)."
                        },
                        "explanation": {
                            "type": "STRING",
                            "description": "Explanation of why the answer is correct."
                        }
                    },
                    "required": ["question", "options", "correctAnswerIndex", "explanation"]
                },
                "description": "3 multiple choice questions to test understanding."
            },
            "lab": {
                "type": "OBJECT",
                "properties": {
                    "title": { "type": "STRING" },
                    "objective": { "type": "STRING" },
                    "materials": string_array(),
                    "procedure": string_array(),
                    "safety": { "type": "STRING" }
                },
                "required": ["title", "objective", "materials", "procedure", "safety"],
                "description": "A virtual lab experiment guide related to the topic."
            }
        },
        "required": ["notes", "visuals", "flashcards", "checkpoints", "lab"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_prompt_names_unit_and_topic() {
        let prompt = topic_prompt("3. Genetics", "Protein Synthesis");
        assert!(prompt.contains("Unit: 3. Genetics"));
        assert!(prompt.contains("Topic: Protein Synthesis"));
        assert!(prompt.contains("5 Flashcards"));
    }

    #[test]
    fn test_image_prompt_adds_style() {
        let prompt = image_prompt("A labelled chloroplast");
        assert!(prompt.starts_with("educational science illustration"));
        assert!(prompt.ends_with("A labelled chloroplast"));
    }

    #[test]
    fn test_schema_requires_every_section() {
        let schema = content_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(required, ["notes", "visuals", "flashcards", "checkpoints", "lab"]);
        assert_eq!(
            schema["properties"]["checkpoints"]["items"]["properties"]["correctAnswerIndex"]["type"],
            "INTEGER"
        );
    }
}
