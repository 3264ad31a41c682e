//! Offline response resolution
//!
//! Literal, case-insensitive substring matching against a fixed trigger list.
//! The first matching rule wins.

use rand::seq::SliceRandom;
use rand::Rng;
use tourguide_core::models::{Language, Localized};

use crate::models::{DestinationInfo, KnowledgeBase, PhraseCategory};

/// Returned when a phrase category is missing from the phrasebook
pub const OFFLINE_FALLBACK: &str = "I'm currently in offline mode. Basic information is available.";

const DEFAULT_EMERGENCY: Localized<&str> = Localized {
    en: "Emergency: Call 112 (EU) or 911 (US). Describe your location and emergency clearly.",
    es: "Emergencia: Llame al 112 (UE) o 911 (EEUU). Describa su ubicación y emergencia claramente.",
    fr: "Urgence: Appelez le 112 (UE) ou le 911 (États-Unis). Décrivez clairement votre emplacement et votre urgence.",
    ja: "緊急時：112（EU）または911（米国）に電話してください。場所と緊急事態を明確に説明してください。",
};

const FOOD: Localized<&str> = Localized {
    en: "In offline mode, I recommend trying local cuisine. Look for busy restaurants with local customers for authentic food.",
    es: "En modo offline, recomiendo probar la cocina local. Busque restaurantes concurridos con clientes locales para comida auténtica.",
    fr: "En mode hors ligne, je recommande d'essayer la cuisine locale. Cherchez des restaurants animés avec des clients locaux pour une nourriture authentique.",
    ja: "オフラインモードでは、地元の料理を試すことをお勧めします。本格的な料理を求めて、地元の客でにぎわうレストランを探してください。",
};

const GENERIC: Localized<&str> = Localized {
    en: "I'm currently in offline mode. I can provide basic information about destinations, emergency contacts, and common phrases. For detailed information, please check when online.",
    es: "Actualmente estoy en modo offline. Puedo proporcionar información básica sobre destinos, contactos de emergencia y frases comunes. Para información detallada, consulte cuando esté en línea.",
    fr: "Je suis actuellement en mode hors ligne. Je peux fournir des informations de base sur les destinations, les contacts d'urgence et les phrases courantes. Pour des informations détaillées, veuillez vérifier lorsque vous êtes en ligne.",
    ja: "現在オフラインモードです。目的地、緊急連絡先、一般的なフレーズに関する基本情報を提供できます。詳細な情報については、オンライン時に確認してください。",
};

/// Keyword rules in resolution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Directions,
    Emergency,
    Attractions,
    Food,
    Generic,
}

impl Intent {
    pub fn detect(message: &str) -> Self {
        let lower = message.to_lowercase();
        let has = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

        if has(&["hello", "hi"]) {
            Intent::Greeting
        } else if has(&["where", "direction"]) {
            Intent::Directions
        } else if has(&["emergency", "help"]) {
            Intent::Emergency
        } else if has(&["attraction", "place to visit"]) {
            Intent::Attractions
        } else if has(&["food", "restaurant"]) {
            Intent::Food
        } else {
            Intent::Generic
        }
    }
}

impl KnowledgeBase {
    /// Answer a chat message from offline knowledge
    pub fn resolve(&self, message: &str, destination_id: &str, language: &str) -> String {
        self.resolve_with_rng(message, destination_id, language, &mut rand::thread_rng())
    }

    /// Same as [`KnowledgeBase::resolve`] with a caller-supplied random source
    pub fn resolve_with_rng<R: Rng + ?Sized>(
        &self,
        message: &str,
        destination_id: &str,
        language: &str,
        rng: &mut R,
    ) -> String {
        let destination = self.destination(destination_id);

        match Intent::detect(message) {
            Intent::Greeting => self.random_phrase(PhraseCategory::Greetings, language, rng),
            Intent::Directions => match destination {
                Some(info) => directions_text(info, language),
                None => self.random_phrase(PhraseCategory::Directions, language, rng),
            },
            Intent::Emergency => emergency_text(destination, language),
            Intent::Attractions => match destination {
                Some(info) => attractions_text(info, language),
                None => GENERIC.get(language).to_string(),
            },
            Intent::Food => FOOD.get(language).to_string(),
            Intent::Generic => GENERIC.get(language).to_string(),
        }
    }

    /// Uniformly pick one phrase from a category
    pub fn random_phrase<R: Rng + ?Sized>(
        &self,
        category: PhraseCategory,
        language: &str,
        rng: &mut R,
    ) -> String {
        self.phrases(language, category)
            .and_then(|phrases| phrases.choose(rng))
            .cloned()
            .unwrap_or_else(|| OFFLINE_FALLBACK.to_string())
    }
}

fn directions_text(info: &DestinationInfo, language: &str) -> String {
    let top: Vec<&str> = info.attractions.iter().take(2).map(String::as_str).collect();
    match Language::from_code(language) {
        Language::English => format!(
            "For {}, major attractions include {}. Use offline maps for navigation.",
            info.name,
            top.join(" and ")
        ),
        Language::Spanish => format!(
            "Para {}, las atracciones principales incluyen {}. Use mapas sin conexión para navegación.",
            info.name,
            top.join(" y ")
        ),
        Language::French => format!(
            "Pour {}, les attractions principales incluent {}. Utilisez des cartes hors ligne pour la navigation.",
            info.name,
            top.join(" et ")
        ),
        Language::Japanese => format!(
            "{}の主なアトラクションには、{}が含まれます。オフラインマップを使用してナビゲーションしてください。",
            info.name,
            top.join("と")
        ),
    }
}

fn emergency_text(destination: Option<&DestinationInfo>, language: &str) -> String {
    let Some(contacts) = destination.and_then(|info| info.emergency.as_ref()) else {
        return DEFAULT_EMERGENCY.get(language).to_string();
    };

    let (police, ambulance, fire) = (&contacts.police, &contacts.ambulance, &contacts.fire);
    match Language::from_code(language) {
        Language::English => format!(
            "Emergency contacts - Police: {}, Ambulance: {}, Fire: {}. Stay calm and describe your location.",
            police, ambulance, fire
        ),
        Language::Spanish => format!(
            "Contactos de emergencia - Policía: {}, Ambulancia: {}, Bomberos: {}. Mantenga la calma y describa su ubicación.",
            police, ambulance, fire
        ),
        Language::French => format!(
            "Contacts d'urgence - Police: {}, Ambulance: {}, Pompiers: {}. Restez calme et décrivez votre emplacement.",
            police, ambulance, fire
        ),
        Language::Japanese => format!(
            "緊急連絡先 - 警察: {}, 救急車: {}, 消防: {}. 落ち着いてあなたの場所を説明してください。",
            police, ambulance, fire
        ),
    }
}

fn attractions_text(info: &DestinationInfo, language: &str) -> String {
    let attractions = info.attractions.join(", ");
    let tips = info.tips.join(" ");
    let text = match Language::from_code(language) {
        Language::English => format!("Top attractions in {}: {}. {}", info.name, attractions, tips),
        Language::Spanish => {
            format!("Principales atracciones en {}: {}. {}", info.name, attractions, tips)
        }
        Language::French => {
            format!("Principales attractions à {}: {}. {}", info.name, attractions, tips)
        }
        Language::Japanese => format!("{}の主なアトラクション: {}. {}", info.name, attractions, tips),
    };
    text.trim_end().to_string()
}
