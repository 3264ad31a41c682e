//! Built-in knowledge used when the knowledge resource cannot be loaded

use std::collections::HashMap;

use crate::models::{DestinationInfo, EmergencyContacts, KnowledgeBase, Phrasebook};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn phrasebook_entry(
    greetings: &[&str],
    directions: &[&str],
    emergency: &[&str],
    food: &[&str],
) -> HashMap<String, Vec<String>> {
    HashMap::from([
        ("greetings".to_string(), strings(greetings)),
        ("directions".to_string(), strings(directions)),
        ("emergency".to_string(), strings(emergency)),
        ("food".to_string(), strings(food)),
    ])
}

/// Two sample destinations and a four-language phrasebook
pub fn builtin() -> KnowledgeBase {
    let destinations = HashMap::from([
        (
            "paris".to_string(),
            DestinationInfo {
                name: "Paris, France".to_string(),
                basic_info: "The City of Light, famous for its art, fashion, and culture."
                    .to_string(),
                attractions: strings(&[
                    "Eiffel Tower - Iconic iron tower offering city views",
                    "Louvre Museum - World's largest art museum",
                    "Notre-Dame Cathedral - Medieval Catholic cathedral",
                ]),
                emergency: Some(EmergencyContacts {
                    police: "17".to_string(),
                    ambulance: "15".to_string(),
                    fire: "18".to_string(),
                }),
                tips: strings(&[
                    "Learn basic French phrases",
                    "Purchase museum passes in advance",
                    "Use the Metro for transportation",
                ]),
            },
        ),
        (
            "tokyo".to_string(),
            DestinationInfo {
                name: "Tokyo, Japan".to_string(),
                basic_info: "Bustling metropolis blending tradition and technology.".to_string(),
                attractions: strings(&[
                    "Tokyo Tower - Communications and observation tower",
                    "Sensoji Temple - Ancient Buddhist temple",
                    "Shibuya Crossing - World's busiest pedestrian crossing",
                ]),
                emergency: Some(EmergencyContacts {
                    police: "110".to_string(),
                    ambulance: "119".to_string(),
                    fire: "119".to_string(),
                }),
                tips: strings(&[
                    "Carry cash as some places don't accept cards",
                    "Learn to use the train system",
                    "Be punctual for appointments",
                ]),
            },
        ),
    ]);

    let phrases: Phrasebook = HashMap::from([
        (
            "en".to_string(),
            phrasebook_entry(
                &["Hello", "Good morning", "Good afternoon"],
                &["Where is...", "How do I get to...", "Is it far?"],
                &["Help", "I need a doctor", "Call the police"],
                &["I'm hungry", "Restaurant", "Menu please"],
            ),
        ),
        (
            "es".to_string(),
            phrasebook_entry(
                &["Hola", "Buenos días", "Buenas tardes"],
                &["¿Dónde está...?", "¿Cómo llego a...?", "¿Está lejos?"],
                &["Ayuda", "Necesito un médico", "Llame a la policía"],
                &["Tengo hambre", "Restaurante", "La carta por favor"],
            ),
        ),
        (
            "fr".to_string(),
            phrasebook_entry(
                &["Bonjour", "Bonne matin", "Bonne après-midi"],
                &["Où est...", "Comment aller à...", "C'est loin?"],
                &["Au secours", "J'ai besoin d'un médecin", "Appelez la police"],
                &["J'ai faim", "Restaurant", "La carte s'il vous plaît"],
            ),
        ),
        (
            "ja".to_string(),
            phrasebook_entry(
                &["こんにちは", "おはようございます", "こんばんは"],
                &["...はどこですか", "...へはどう行きますか", "遠いですか"],
                &["助けて", "医者が必要です", "警察を呼んでください"],
                &["お腹が空きました", "レストラン", "メニューをください"],
            ),
        ),
    ]);

    KnowledgeBase {
        destinations,
        phrases,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PhraseCategory;

    #[test]
    fn test_builtin_shape() {
        let kb = builtin();
        assert_eq!(kb.destinations.len(), 2);
        assert_eq!(kb.languages(), vec!["en", "es", "fr", "ja"]);

        for language in kb.languages() {
            for category in PhraseCategory::ALL {
                let phrases = kb.phrases(language, category).unwrap();
                assert_eq!(phrases.len(), 3, "{} {}", language, category);
            }
        }
    }

    #[test]
    fn test_builtin_emergency_numbers() {
        let kb = builtin();
        let tokyo = kb.destination("tokyo").unwrap().emergency.clone().unwrap();
        assert_eq!(tokyo.police, "110");
        assert_eq!(tokyo.ambulance, "119");
    }
}
