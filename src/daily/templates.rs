//! The fixed pool of daily challenge templates, easiest first.

use super::types::{ChallengeType, TemplateDifficulty};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeTemplate {
    pub id: &'static str,
    pub kind: ChallengeType,
    pub name_en: &'static str,
    pub name_es: &'static str,
    /// `{target}` is replaced with the day's target.
    pub description_en: &'static str,
    pub description_es: &'static str,
    pub difficulty: TemplateDifficulty,
    pub target_min: u32,
    pub target_max: u32,
    pub reward_points: u32,
    pub badge: Option<&'static str>,
    pub unlock: Option<&'static str>,
}

impl ChallengeTemplate {
    pub fn describe_en(&self, target: u32) -> String {
        self.description_en.replace("{target}", &target.to_string())
    }

    pub fn describe_es(&self, target: u32) -> String {
        self.description_es.replace("{target}", &target.to_string())
    }
}

pub const CHALLENGE_TEMPLATES: [ChallengeTemplate; 14] = [
    ChallengeTemplate {
        id: "score_easy",
        kind: ChallengeType::Score,
        name_en: "Coding Starter",
        name_es: "Iniciador de Código",
        description_en: "Score {target}+ points in any mode",
        description_es: "Consigue {target}+ puntos en cualquier modo",
        difficulty: TemplateDifficulty::Easy,
        target_min: 500,
        target_max: 1000,
        reward_points: 100,
        badge: None,
        unlock: None,
    },
    ChallengeTemplate {
        id: "collect_easy",
        kind: ChallengeType::Collect,
        name_en: "Coffee Break",
        name_es: "Pausa para Café",
        description_en: "Collect {target} coffee cups",
        description_es: "Recoge {target} tazas de café",
        difficulty: TemplateDifficulty::Easy,
        target_min: 5,
        target_max: 10,
        reward_points: 100,
        badge: None,
        unlock: None,
    },
    ChallengeTemplate {
        id: "survive_easy",
        kind: ChallengeType::Survive,
        name_en: "Survivor",
        name_es: "Superviviente",
        description_en: "Survive for {target} seconds",
        description_es: "Sobrevive durante {target} segundos",
        difficulty: TemplateDifficulty::Easy,
        target_min: 30,
        target_max: 45,
        reward_points: 100,
        badge: None,
        unlock: None,
    },
    ChallengeTemplate {
        id: "score_medium",
        kind: ChallengeType::Score,
        name_en: "Score Hunter",
        name_es: "Cazador de Puntos",
        description_en: "Score {target}+ points in one run",
        description_es: "Consigue {target}+ puntos en una partida",
        difficulty: TemplateDifficulty::Medium,
        target_min: 1500,
        target_max: 2500,
        reward_points: 200,
        badge: None,
        unlock: None,
    },
    ChallengeTemplate {
        id: "collect_medium",
        kind: ChallengeType::Collect,
        name_en: "Caffeine Addict",
        name_es: "Adicto a la Cafeína",
        description_en: "Collect {target} coffee cups in one game",
        description_es: "Recoge {target} tazas de café en una partida",
        difficulty: TemplateDifficulty::Medium,
        target_min: 15,
        target_max: 25,
        reward_points: 250,
        badge: None,
        unlock: None,
    },
    ChallengeTemplate {
        id: "survive_medium",
        kind: ChallengeType::Survive,
        name_en: "Endurance Runner",
        name_es: "Corredor de Resistencia",
        description_en: "Survive for {target} seconds without power-ups",
        description_es: "Sobrevive {target} segundos sin potenciadores",
        difficulty: TemplateDifficulty::Medium,
        target_min: 60,
        target_max: 90,
        reward_points: 300,
        badge: None,
        unlock: None,
    },
    ChallengeTemplate {
        id: "avoid_medium",
        kind: ChallengeType::Avoid,
        name_en: "Bug Dodger",
        name_es: "Esquivador de Bugs",
        description_en: "Avoid {target} obstacles without getting hit",
        description_es: "Esquiva {target} obstáculos sin ser golpeado",
        difficulty: TemplateDifficulty::Medium,
        target_min: 20,
        target_max: 35,
        reward_points: 250,
        badge: None,
        unlock: None,
    },
    ChallengeTemplate {
        id: "score_hard",
        kind: ChallengeType::Score,
        name_en: "Master Coder",
        name_es: "Maestro Programador",
        description_en: "Score {target}+ points in one run",
        description_es: "Consigue {target}+ puntos en una partida",
        difficulty: TemplateDifficulty::Hard,
        target_min: 3000,
        target_max: 4500,
        reward_points: 350,
        badge: Some("master_coder"),
        unlock: None,
    },
    ChallengeTemplate {
        id: "collect_hard",
        kind: ChallengeType::Collect,
        name_en: "Coffee Connoisseur",
        name_es: "Conocedor de Café",
        description_en: "Collect {target} coffee cups without missing any",
        description_es: "Recoge {target} tazas de café sin perder ninguna",
        difficulty: TemplateDifficulty::Hard,
        target_min: 30,
        target_max: 40,
        reward_points: 400,
        badge: Some("coffee_master"),
        unlock: None,
    },
    ChallengeTemplate {
        id: "survive_hard",
        kind: ChallengeType::Survive,
        name_en: "Iron Will",
        name_es: "Voluntad de Hierro",
        description_en: "Survive for {target} seconds with increasing speed",
        description_es: "Sobrevive {target} segundos con velocidad creciente",
        difficulty: TemplateDifficulty::Hard,
        target_min: 120,
        target_max: 150,
        reward_points: 400,
        badge: None,
        unlock: None,
    },
    ChallengeTemplate {
        id: "avoid_hard",
        kind: ChallengeType::Avoid,
        name_en: "Perfect Dodge",
        name_es: "Esquiva Perfecta",
        description_en: "Avoid {target} obstacles in a row without jumping",
        description_es: "Esquiva {target} obstáculos seguidos sin saltar",
        difficulty: TemplateDifficulty::Hard,
        target_min: 15,
        target_max: 25,
        reward_points: 350,
        badge: Some("dodge_master"),
        unlock: None,
    },
    ChallengeTemplate {
        id: "score_expert",
        kind: ChallengeType::Score,
        name_en: "Legendary Developer",
        name_es: "Desarrollador Legendario",
        description_en: "Score {target}+ points in one perfect run",
        description_es: "Consigue {target}+ puntos en una partida perfecta",
        difficulty: TemplateDifficulty::Expert,
        target_min: 5000,
        target_max: 7500,
        reward_points: 500,
        badge: Some("legendary_dev"),
        unlock: Some("golden_skin"),
    },
    ChallengeTemplate {
        id: "collect_expert",
        kind: ChallengeType::Collect,
        name_en: "Coffee Overlord",
        name_es: "Señor del Café",
        description_en: "Collect {target} coffee cups in under 2 minutes",
        description_es: "Recoge {target} tazas de café en menos de 2 minutos",
        difficulty: TemplateDifficulty::Expert,
        target_min: 50,
        target_max: 75,
        reward_points: 500,
        badge: Some("coffee_god"),
        unlock: Some("coffee_theme"),
    },
    ChallengeTemplate {
        id: "survive_expert",
        kind: ChallengeType::Survive,
        name_en: "Immortal Code",
        name_es: "Código Inmortal",
        description_en: "Survive for {target} seconds at maximum speed",
        description_es: "Sobrevive {target} segundos a velocidad máxima",
        difficulty: TemplateDifficulty::Expert,
        target_min: 180,
        target_max: 240,
        reward_points: 500,
        badge: Some("immortal"),
        unlock: Some("immortal_aura"),
    },
];
