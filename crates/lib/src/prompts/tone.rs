use crate::types::ToneOption;

pub const B2B_FORMAL_INSTRUCTION: &str = "Write in a professional B2B tone. Be authoritative, data-driven and insightful. Cut the fluff.";
pub const B2B_CASUAL_INSTRUCTION: &str = "Write for a B2B audience but keep it conversational. Use contractions, speak to the reader directly, and sound like a friendly expert.";
pub const B2C_FORMAL_INSTRUCTION: &str = "Write for consumers in a polished tone. Be informative and credible while staying accessible to a general reader.";
pub const B2C_CASUAL_INSTRUCTION: &str = "Write in a fun, consumer-friendly tone. Be relatable, use everyday language, and connect with the reader emotionally.";

/// The only tone-dependent input to generation.
pub fn tone_instruction(tone: ToneOption) -> &'static str {
    match tone {
        ToneOption::B2bFormal => B2B_FORMAL_INSTRUCTION,
        ToneOption::B2bCasual => B2B_CASUAL_INSTRUCTION,
        ToneOption::B2cFormal => B2C_FORMAL_INSTRUCTION,
        ToneOption::B2cCasual => B2C_CASUAL_INSTRUCTION,
    }
}
