use serde::Serialize;

/// A true/false question about an animal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Question {
    pub text: &'static str,
    pub answer: bool,
    pub emoji: &'static str,
    /// Shown after a wrong answer; may be empty.
    pub explanation: &'static str,
}

const fn q(text: &'static str, answer: bool, emoji: &'static str, explanation: &'static str) -> Question {
    Question { text, answer, emoji, explanation }
}

/// Every question the quiz can ask.
pub const QUESTIONS: [Question; 20] = [
    q("A whale is a fish", false, "🐋", "It is a mammal."),
    q("Penguins cannot fly", true, "🐧", ""),
    q("Dogs cool down by panting with their tongue", true, "🐕", ""),
    q("Snakes have ears", false, "🐍", "They have no outer ears."),
    q("Giraffes have long necks", true, "🦒", ""),
    q("Rabbits only eat carrots", false, "🐰", "They eat grass too."),
    q("An octopus has three hearts", true, "🐙", ""),
    q("Elephants cannot jump", true, "🐘", ""),
    q("Cats cannot see any colour", false, "🐱", "They see some colours."),
    q("Starfish have no brain", true, "⭐", ""),
    q("Dolphins sleep with one eye open", true, "🐬", ""),
    q("Hippos are good swimmers", false, "🦛", "They walk along the bottom."),
    q("Ladybugs hibernate in winter", true, "🐞", ""),
    q("Eagles have sharp eyesight", true, "🦅", ""),
    q("Ostrich eggs are the largest eggs in the world", true, "🥚", ""),
    q("Butterflies taste with their feet", true, "🦋", ""),
    q("Polar bear skin is white", false, "🐻‍❄️", "It is black."),
    q("Ants can lift 50 times their own weight", true, "🐜", ""),
    q("Crocodiles cannot move their tongue", true, "🐊", ""),
    q("Pandas never eat meat", false, "🐼", "They sometimes do."),
];
