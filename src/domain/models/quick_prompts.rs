/// Seed questions offered before the first user turn.
pub const QUICK_PROMPTS: [&str; 4] = [
    "Who are the top at-risk students?",
    "Summarise overall class performance",
    "Are there any fairness concerns?",
    "Which cluster needs the most attention?",
];

pub fn quick_prompt(idx: usize) -> Option<&'static str> {
    return QUICK_PROMPTS.get(idx).copied();
}
