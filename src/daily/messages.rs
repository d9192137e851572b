//! Player-facing challenge messages in English and Spanish.
//!
//! Where several phrasings exist the caller supplies `pick`, so the same
//! inputs always produce the same text.

use super::types::{ChallengeProgress, Locale};

const MOTIVATION_EN: [[&str; 3]; 5] = [
    ["You got this!", "Let's do this!", "Ready to code!"],
    ["Great start!", "Keep it up!", "You're doing great!"],
    ["Halfway there!", "Almost there!", "Don't give up!"],
    ["So close!", "Almost done!", "You can do it!"],
    ["One more push!", "Almost there!", "Finish strong!"],
];

const MOTIVATION_ES: [[&str; 3]; 5] = [
    ["¡Tú puedes!", "¡Vamos a por ello!", "¡Listo para programar!"],
    ["¡Buen comienzo!", "¡Sigue así!", "¡Lo estás haciendo genial!"],
    ["¡A mitad de camino!", "¡Ya casi!", "¡No te rindas!"],
    ["¡Muy cerca!", "¡Casi terminado!", "¡Tú puedes!"],
    ["¡Un empujón más!", "¡Ya casi!", "¡Termina fuerte!"],
];

const FAILURE_EN: [&str; 5] = [
    "So close! Try again?",
    "You can do it!",
    "Don't give up!",
    "One more time!",
    "Almost had it!",
];

const FAILURE_ES: [&str; 5] = [
    "¡Tan cerca! ¿Intentas de nuevo?",
    "¡Tú puedes!",
    "¡No te rindas!",
    "¡Una vez más!",
    "¡Casi lo tenías!",
];

pub fn motivational_message(progress: &ChallengeProgress, locale: Locale, pick: usize) -> &'static str {
    let bucket = match progress.percentage {
        p if p < 25.0 => 0,
        p if p < 50.0 => 1,
        p if p < 75.0 => 2,
        p if p < 95.0 => 3,
        _ => 4,
    };
    let options = match locale {
        Locale::En => &MOTIVATION_EN[bucket],
        Locale::Es => &MOTIVATION_ES[bucket],
    };
    options[pick % options.len()]
}

/// Only shown from 80% up while something is still left to do.
pub fn near_completion_message(progress: &ChallengeProgress, locale: Locale) -> Option<String> {
    let remaining = progress.target.saturating_sub(progress.current);
    if remaining == 0 || progress.percentage < 80.0 {
        return None;
    }
    Some(match locale {
        Locale::En => format!("Only {} more to go!", remaining),
        Locale::Es => format!("¡Solo {} más!", remaining),
    })
}

pub fn failure_message(attempts: u32, locale: Locale) -> &'static str {
    let options = match locale {
        Locale::En => &FAILURE_EN,
        Locale::Es => &FAILURE_ES,
    };
    options[attempts as usize % options.len()]
}

pub fn streak_message(streak: u32, locale: Locale) -> Option<String> {
    if streak < 2 {
        return None;
    }
    Some(match (locale, streak) {
        (Locale::En, s) if s >= 7 => format!("🔥 {} Day Streak! On fire!", s),
        (Locale::En, s) if s >= 3 => format!("⭐ {} Day Streak! Keep it up!", s),
        (Locale::En, s) => format!("🎯 {} Day Streak!", s),
        (Locale::Es, s) if s >= 7 => format!("🔥 ¡{} Días Seguidos! ¡Imparable!", s),
        (Locale::Es, s) if s >= 3 => format!("⭐ ¡{} Días Seguidos! ¡Sigue así!", s),
        (Locale::Es, s) => format!("🎯 ¡{} Días Seguidos!", s),
    })
}
