//! Prompt templates for the entity detail descriptions.
use likes_shared::types::EntityType;

/// Builds the prompt asking for a plain-text description of an entity.
pub fn description_prompt(entity_type: EntityType, name: &str) -> String {
    match entity_type {
        EntityType::Character => format!(
            "Write a short profile about the character {name} from the series Rick and Morty. \
             There shouldn't be any formatting or special characters. Return it as a simple string. \
             The text should be 100 words"
        ),
        EntityType::Episode => format!(
            "Summarize the Rick & Morty episode {name}. Write a short paragraph summarizing the episode. \
             There shouldn't be any formatting or special characters. Return it as a simple string"
        ),
        EntityType::Location => format!(
            "Write a small text about the {name} location from the Rick & Morty series. \
             Write a short paragraph describing the location. \
             There shouldn't be any formatting or special characters. Return it as a simple string"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_mention_the_entity() {
        for kind in EntityType::ALL {
            let prompt = description_prompt(kind, "Anatomy Park");
            assert!(prompt.contains("Anatomy Park"));
            assert!(prompt.contains("Rick"));
        }
        assert!(description_prompt(EntityType::Character, "Rick Sanchez").contains("100 words"));
        assert!(description_prompt(EntityType::Episode, "Pilot").starts_with("Summarize"));
    }
}
