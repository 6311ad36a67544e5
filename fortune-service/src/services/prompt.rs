//! Prompt assembly for fortune requests.
//!
//! Turns a [`FortuneRequest`] into the Korean instruction text sent to the
//! text model. Optional fields that are empty leave no trace in the prompt.

use crate::models::FortuneRequest;
use chrono::NaiveDate;

/// Fortune type token that is expanded to [`NEW_YEAR_LABEL`].
pub const NEW_YEAR_TOKEN: &str = "newYear";

/// Display label substituted for [`NEW_YEAR_TOKEN`].
pub const NEW_YEAR_LABEL: &str = "2026년 신년 운세";

/// Prefix of the additional-question line.
pub const CUSTOM_QUESTION_PREFIX: &str = "- 추가 질문/요청:";

/// Suffix of the tone directive line.
pub const TONE_DIRECTIVE_SUFFIX: &str = "인 관점에서 예언한다.";

const GENERIC_PREAMBLE: &str = "너는 20년 경력의 전문 점술가야.";

const ANSWER_GUIDELINES: &str = "[답변 지침]
- 결과는 **Markdown** 형식을 적극 활용하여 가독성 있게 작성한다 (## 제목, **강조**, > 인용구 등).
- 점성술적인 관점에서 구체적인 조언을 제공한다.
- 마지막 한 번 더 요약해준다.
";

/// Switches that select between the prompt variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptOptions {
    /// Open with the chosen persona instead of the generic astrologer.
    pub persona_enabled: bool,
    /// Append the tone directive when the request carries a tone.
    pub tone_instruction_enabled: bool,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            persona_enabled: false,
            tone_instruction_enabled: true,
        }
    }
}

/// Builds prompts. Pure: the same request, persona and date always give the
/// same text.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    options: PromptOptions,
}

impl PromptBuilder {
    pub fn new(options: PromptOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> PromptOptions {
        self.options
    }

    /// Assemble the prompt.
    ///
    /// `persona` is ignored unless personas are enabled. An empty birth date
    /// is interpolated as-is.
    pub fn build(&self, input: &FortuneRequest, persona: Option<&str>, today: NaiveDate) -> String {
        let mut prompt = String::new();

        match persona.filter(|_| self.options.persona_enabled) {
            Some(persona) => prompt.push_str(&format!(
                "너는 '{}' 콘셉트로 활동하는 20년 경력의 전문 점술가야.\n",
                persona
            )),
            None => {
                prompt.push_str(GENERIC_PREAMBLE);
                prompt.push('\n');
            }
        }

        prompt.push_str(&format!(
            "다음 사용자 정보와 {}의 날짜를 바탕으로 2분 안으로 읽을 수 있는 간단 요약 운세를 알려줘.\n\n",
            format_korean_date(today)
        ));

        prompt.push_str("[사용자 정보]\n");
        prompt.push_str(&format!("- 생년월일: {}\n", input.birth_date));
        prompt.push_str(&format!("- 성별: {}\n", input.gender.label()));
        if let Some(birth_time) = input.birth_time() {
            prompt.push_str(&format!("- 태어난 시간: {}\n", birth_time));
        }
        if let Some(birth_place) = input.birth_place() {
            prompt.push_str(&format!("- 태어난 장소: {}\n", birth_place));
        }
        prompt.push_str(&format!(
            "- 운세 종류: {}\n",
            fortune_type_label(&input.fortune_type)
        ));
        if let Some(question) = input.custom_question() {
            prompt.push_str(&format!("{} {}\n", CUSTOM_QUESTION_PREFIX, question));
        }

        prompt.push('\n');
        prompt.push_str(ANSWER_GUIDELINES);

        if self.options.tone_instruction_enabled {
            if let Some(tone) = input.tone.label() {
                prompt.push_str(&format!("- **{}**{}\n", tone, TONE_DIRECTIVE_SUFFIX));
            }
        }

        prompt
    }
}

/// Expand the new-year token; every other fortune type passes through.
pub fn fortune_type_label(fortune_type: &str) -> &str {
    if fortune_type == NEW_YEAR_TOKEN {
        NEW_YEAR_LABEL
    } else {
        fortune_type
    }
}

/// Date in the Korean locale short form, e.g. `2026. 1. 5.`
pub fn format_korean_date(date: NaiveDate) -> String {
    date.format("%Y. %-m. %-d.").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Tone};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    fn scenario_a() -> FortuneRequest {
        FortuneRequest {
            birth_date: "1999-12-31".to_string(),
            gender: Gender::Male,
            fortune_type: "연애운".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn includes_birth_date_and_gender_without_tone_line() {
        let prompt = PromptBuilder::default().build(&scenario_a(), None, today());

        assert!(prompt.contains("1999-12-31"));
        assert!(prompt.contains("남성"));
        assert!(prompt.contains("- 운세 종류: 연애운"));
        assert!(!prompt.contains(TONE_DIRECTIVE_SUFFIX));
        assert!(prompt.starts_with(GENERIC_PREAMBLE));
    }

    #[test]
    fn omits_absent_optional_sections() {
        let prompt = PromptBuilder::default().build(&scenario_a(), None, today());

        assert!(!prompt.contains("태어난 시간"));
        assert!(!prompt.contains("태어난 장소"));
        assert!(!prompt.contains(CUSTOM_QUESTION_PREFIX));
    }

    #[test]
    fn empty_optional_strings_count_as_absent() {
        let input = FortuneRequest {
            birth_time: Some(String::new()),
            birth_place: Some(String::new()),
            ..scenario_a()
        };
        let prompt = PromptBuilder::default().build(&input, None, today());

        assert!(!prompt.contains("태어난 시간"));
        assert!(!prompt.contains("태어난 장소"));
    }

    #[test]
    fn includes_present_optional_sections() {
        let input = FortuneRequest {
            birth_time: Some("07:30".to_string()),
            birth_place: Some("부산".to_string()),
            custom_question: "이직해도 될까요?".to_string(),
            ..scenario_a()
        };
        let prompt = PromptBuilder::default().build(&input, None, today());

        assert!(prompt.contains("- 태어난 시간: 07:30\n"));
        assert!(prompt.contains("- 태어난 장소: 부산\n"));
        assert!(prompt.contains("- 추가 질문/요청: 이직해도 될까요?\n"));
    }

    #[test]
    fn whitespace_question_is_omitted() {
        let input = FortuneRequest {
            custom_question: "  ".to_string(),
            ..scenario_a()
        };
        let prompt = PromptBuilder::default().build(&input, None, today());

        assert!(!prompt.contains(CUSTOM_QUESTION_PREFIX));
    }

    #[test]
    fn new_year_token_is_expanded() {
        let input = FortuneRequest {
            fortune_type: NEW_YEAR_TOKEN.to_string(),
            ..scenario_a()
        };
        let prompt = PromptBuilder::default().build(&input, None, today());

        assert!(prompt.contains(NEW_YEAR_LABEL));
        assert!(!prompt.contains(NEW_YEAR_TOKEN));
    }

    #[test]
    fn korean_new_year_label_passes_through() {
        assert_eq!(fortune_type_label("신년 운세"), "신년 운세");
    }

    #[test]
    fn tone_directive_follows_options() {
        let input = FortuneRequest {
            tone: Tone::Pessimistic,
            ..scenario_a()
        };

        let with_tone = PromptBuilder::default().build(&input, None, today());
        assert!(with_tone.ends_with("- **염세적**인 관점에서 예언한다.\n"));

        let without_tone = PromptBuilder::new(PromptOptions {
            tone_instruction_enabled: false,
            ..Default::default()
        })
        .build(&input, None, today());
        assert!(!without_tone.contains(TONE_DIRECTIVE_SUFFIX));
    }

    #[test]
    fn persona_preamble_only_when_enabled() {
        let enabled = PromptBuilder::new(PromptOptions {
            persona_enabled: true,
            ..Default::default()
        });
        let prompt = enabled.build(&scenario_a(), Some("신비로운 타로 마스터"), today());
        assert!(prompt.starts_with("너는 '신비로운 타로 마스터' 콘셉트로"));

        let disabled = PromptBuilder::default();
        let prompt = disabled.build(&scenario_a(), Some("신비로운 타로 마스터"), today());
        assert!(!prompt.contains("신비로운 타로 마스터"));
    }

    #[test]
    fn includes_formatted_date() {
        let prompt = PromptBuilder::default().build(&scenario_a(), None, today());
        assert!(prompt.contains("2026. 1. 5.의 날짜를 바탕으로"));
    }

    #[test]
    fn identical_inputs_give_identical_prompts() {
        let builder = PromptBuilder::new(PromptOptions {
            persona_enabled: true,
            tone_instruction_enabled: true,
        });
        let input = FortuneRequest {
            tone: Tone::Optimistic,
            custom_question: "올해 건강은?".to_string(),
            ..scenario_a()
        };

        let first = builder.build(&input, Some("냉철한 점성학자"), today());
        let second = builder.build(&input, Some("냉철한 점성학자"), today());
        assert_eq!(first, second);
    }

    #[test]
    fn empty_birth_date_is_interpolated() {
        let input = FortuneRequest {
            birth_date: String::new(),
            ..scenario_a()
        };
        let prompt = PromptBuilder::default().build(&input, None, today());
        assert!(prompt.contains("- 생년월일: \n"));
    }
}
